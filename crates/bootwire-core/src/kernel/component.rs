use std::any::{type_name, Any, TypeId};
use std::collections::HashMap;
use std::fmt::{self, Debug};
use std::sync::Arc;
use async_trait::async_trait;
use crate::kernel::error::{Error, Result};

/// Lifecycle trait for long-lived services the kernel starts and stops
#[async_trait]
pub trait KernelComponent: Any + Send + Sync + Debug {
    fn name(&self) -> &'static str;
    async fn initialize(&self) -> Result<()>;
    async fn start(&self) -> Result<()>;
    async fn stop(&self) -> Result<()>;
}

/// A single container binding. Keeps the type name around for diagnostics.
#[derive(Clone)]
struct Binding {
    type_name: &'static str,
    instance: Arc<dyn Any + Send + Sync>,
}

/// Service container mapping concrete types to shared instances.
///
/// Instances are keyed by the `TypeId` of their concrete type, so there is at
/// most one binding per type. Binding a type again replaces the previous
/// instance; code that resolved the old `Arc` keeps it.
#[derive(Default)]
pub struct ServiceContainer {
    instances: HashMap<TypeId, Binding>,
    // Lifecycle components in registration order
    components: Vec<(TypeId, Arc<dyn KernelComponent>)>,
}

impl ServiceContainer {
    /// Create a new empty container
    pub fn new() -> Self {
        Self {
            instances: HashMap::new(),
            components: Vec::new(),
        }
    }

    /// Bind an instance under its concrete type `T`, replacing any existing
    /// binding. Returns the previously bound instance, if any.
    pub fn register_instance<T>(&mut self, instance: Arc<T>) -> Option<Arc<T>>
    where
        T: Any + Send + Sync,
    {
        let binding = Binding {
            type_name: type_name::<T>(),
            instance,
        };
        self.instances
            .insert(TypeId::of::<T>(), binding)
            .and_then(|previous| Arc::downcast::<T>(previous.instance).ok())
    }

    /// Bind a kernel component and enroll it in the kernel lifecycle.
    ///
    /// Re-registering the same type replaces the binding but keeps its
    /// original lifecycle position.
    pub fn register_component<C: KernelComponent>(&mut self, component: Arc<C>) {
        let type_id = TypeId::of::<C>();
        self.register_instance(component.clone());
        let as_component: Arc<dyn KernelComponent> = component;
        match self.components.iter_mut().find(|(id, _)| *id == type_id) {
            Some(slot) => slot.1 = as_component,
            None => self.components.push((type_id, as_component)),
        }
    }

    /// Get an instance by concrete type, if bound.
    pub fn get_concrete<T: Any + Send + Sync>(&self) -> Option<Arc<T>> {
        self.instances
            .get(&TypeId::of::<T>())
            .and_then(|binding| Arc::downcast::<T>(binding.instance.clone()).ok())
    }

    /// Resolve an instance by concrete type, failing if nothing is bound.
    pub fn resolve<T: Any + Send + Sync>(&self) -> Result<Arc<T>> {
        self.get_concrete::<T>().ok_or_else(|| Error::ComponentRegistryError {
            operation: "Resolve".to_string(),
            type_name: Some(type_name::<T>().to_string()),
            message: "No instance bound for this type".to_string(),
        })
    }

    /// Whether an instance of `T` is bound.
    pub fn contains<T: Any>(&self) -> bool {
        self.instances.contains_key(&TypeId::of::<T>())
    }

    /// Lifecycle components in registration order.
    pub fn get_all_components(&self) -> Vec<Arc<dyn KernelComponent>> {
        self.components.iter().map(|(_, c)| c.clone()).collect()
    }

    /// Get TypeIds of all bound instances.
    pub fn get_registered_ids(&self) -> Vec<TypeId> {
        self.instances.keys().cloned().collect()
    }

    /// Type names of all bound instances, sorted.
    pub fn registered_type_names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.instances.values().map(|b| b.type_name).collect();
        names.sort_unstable();
        names
    }

    /// Number of bound instances.
    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    /// Clear all bindings and components.
    pub fn clear(&mut self) {
        self.instances.clear();
        self.components.clear();
    }
}

impl Debug for ServiceContainer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceContainer")
            .field("bindings", &self.registered_type_names())
            .field("components", &self.components.iter().map(|(_, c)| c.name()).collect::<Vec<_>>())
            .finish()
    }
}
