use std::{
    any::{type_name, Any},
    sync::Arc,
};

use crate::container::Container;

/// All factory errors must be Send + Sync
pub type DynError = Box<dyn std::error::Error + Send + Sync>;

/// Anything held by the container crosses a type-erasure boundary,
/// so values need to be Send + Sync + 'static.
pub trait Storable: Send + Sync + 'static {}
impl<T: Send + Sync + 'static> Storable for T {}

/// Caller-supplied constructor for a service.
///
/// Receives the container itself so it can resolve other services and
/// parameters while building its value.
pub type Factory = Box<dyn Fn(&Container) -> Result<Instance, DynError> + Send + Sync>;

/// A produced service instance, type-erased
#[derive(Clone)]
pub struct Instance {
    type_name: &'static str,
    value: Arc<dyn Any + Send + Sync + 'static>,
}

impl Instance {
    pub fn new<T: Storable>(value: T) -> Self {
        Instance {
            type_name: type_name::<T>(),
            value: Arc::new(value),
        }
    }

    /// Name of the concrete type the factory produced
    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn downcast<T: Storable>(&self) -> Result<Arc<T>, &'static str> {
        match Arc::downcast::<T>(self.value.clone()) {
            Ok(downcasted) => Ok(downcasted),
            Err(_) => Err(self.type_name),
        }
    }

    /// Whether two handles point at the same underlying value.
    ///
    /// Singleton resolutions hand out clones sharing one allocation, so this
    /// is the identity the cache guarantees.
    pub fn ptr_eq(&self, other: &Instance) -> bool {
        Arc::ptr_eq(&self.value, &other.value)
    }
}

impl std::fmt::Debug for Instance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Instance").field(&self.type_name).finish()
    }
}

/// A named configuration value, type-erased
#[derive(Clone)]
pub struct Parameter {
    type_name: &'static str,
    value: Arc<dyn Any + Send + Sync + 'static>,
}

impl Parameter {
    pub fn new<T: Storable>(value: T) -> Self {
        Parameter {
            type_name: type_name::<T>(),
            value: Arc::new(value),
        }
    }

    pub fn type_name(&self) -> &'static str {
        self.type_name
    }

    pub fn downcast<T: Storable>(&self) -> Result<Arc<T>, &'static str> {
        match Arc::downcast::<T>(self.value.clone()) {
            Ok(downcasted) => Ok(downcasted),
            Err(_) => Err(self.type_name),
        }
    }
}

impl std::fmt::Debug for Parameter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Parameter").field(&self.type_name).finish()
    }
}
