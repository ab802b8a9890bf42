//! # Bootwire Console
//!
//! Holds the [`CommandCollection`], the registry service providers append
//! their console command identifiers to during boot.
pub mod collection;

pub use collection::{CommandCollection, CommandEntry};
