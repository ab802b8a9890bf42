use std::fmt;
use std::sync::{PoisonError, RwLock};

/// One registered command identifier and the provider that registered it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandEntry {
    pub identifier: String,
    /// `None` when the command was added outside a provider's boot
    pub provider: Option<String>,
}

impl fmt::Display for CommandEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.provider {
            Some(provider) => write!(f, "{} (from {})", self.identifier, provider),
            None => write!(f, "{}", self.identifier),
        }
    }
}

/// Append-only, ordered registry of console command identifiers.
///
/// Shared as `Arc<CommandCollection>` through the service container, so
/// appends go through an internal lock. Duplicates are kept.
#[derive(Default)]
pub struct CommandCollection {
    entries: RwLock<Vec<CommandEntry>>,
}

impl CommandCollection {
    pub fn new() -> Self {
        Self { entries: RwLock::new(Vec::new()) }
    }

    /// Append a command identifier.
    pub fn add(&self, identifier: impl Into<String>) {
        self.push(CommandEntry { identifier: identifier.into(), provider: None });
    }

    /// Append a command identifier, recording the provider it came from.
    pub fn add_from(&self, identifier: impl Into<String>, provider: &str) {
        self.push(CommandEntry {
            identifier: identifier.into(),
            provider: Some(provider.to_string()),
        });
    }

    fn push(&self, entry: CommandEntry) {
        log::debug!("Registering console command: {}", entry);
        // Appends are single pushes, so a poisoned list is still consistent
        self.entries.write().unwrap_or_else(PoisonError::into_inner).push(entry);
    }

    /// Identifiers in registration order
    pub fn identifiers(&self) -> Vec<String> {
        self.read(|entries| entries.iter().map(|e| e.identifier.clone()).collect())
    }

    /// Entries in registration order
    pub fn entries(&self) -> Vec<CommandEntry> {
        self.read(|entries| entries.to_vec())
    }

    pub fn contains(&self, identifier: &str) -> bool {
        self.read(|entries| entries.iter().any(|e| e.identifier == identifier))
    }

    pub fn len(&self) -> usize {
        self.read(|entries| entries.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn read<R>(&self, f: impl FnOnce(&[CommandEntry]) -> R) -> R {
        let guard = self.entries.read().unwrap_or_else(PoisonError::into_inner);
        f(&guard)
    }
}

impl fmt::Debug for CommandCollection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CommandCollection")
            .field("commands", &self.identifiers())
            .finish()
    }
}
