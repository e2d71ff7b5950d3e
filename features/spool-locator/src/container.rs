use std::{
    any::type_name,
    collections::HashMap,
    fmt::Debug,
    sync::{Arc, Mutex},
};

use crate::{
    errors::{ParameterError, RegisterError, ResolveError},
    types::{DynError, Factory, Instance, Parameter, Storable},
};

/// A registered service: the caller-supplied factory plus the flag deciding
/// whether every resolution constructs fresh or the first result is cached.
struct Definition {
    factory: Factory,
    is_factory: bool,
}

/// Container holding service definitions, cached singleton instances and
/// named parameters.
///
/// Services are registered under string aliases and constructed lazily on
/// first resolution. Each container is independent - there is no global
/// instance.
pub struct Container {
    definitions: Mutex<HashMap<String, Arc<Definition>>>,
    instances: Mutex<HashMap<String, Instance>>,
    parameters: Mutex<HashMap<String, Parameter>>,
}

impl Debug for Container {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let definitions = self.definitions.lock().unwrap();
        let instances = self.instances.lock().unwrap();

        let mut map = f.debug_struct("Container");
        for (alias, definition) in definitions.iter() {
            let state = if definition.is_factory {
                "factory"
            } else if instances.contains_key(alias) {
                "cached"
            } else {
                "pending"
            };
            map.field(alias, &state);
        }
        map.finish()
    }
}

impl Default for Container {
    fn default() -> Self {
        Self::new()
    }
}

impl Container {
    pub fn new() -> Self {
        Container {
            definitions: Mutex::new(HashMap::new()),
            instances: Mutex::new(HashMap::new()),
            parameters: Mutex::new(HashMap::new()),
        }
    }
}

// Service registration
impl Container {
    /// Registers a factory under `alias`.
    ///
    /// With `is_factory = false` the first resolved instance is cached and
    /// reused for every later [`Container::make`]. With `is_factory = true`
    /// the factory runs on every resolution and nothing is cached.
    ///
    /// Nothing is constructed here - instantiation is lazy.
    pub fn register<T, F>(
        &self,
        alias: impl Into<String>,
        is_factory: bool,
        factory: F,
    ) -> Result<(), RegisterError>
    where
        T: Storable,
        F: Fn(&Container) -> Result<T, DynError> + Send + Sync + 'static,
    {
        self.register_erased(
            alias.into(),
            is_factory,
            Box::new(move |container| factory(container).map(Instance::new)),
        )
    }

    /// Registers an already created value as a singleton service.
    ///
    /// The cache is still populated on first resolution; every resolution
    /// returns a handle to this exact value.
    pub fn register_instance<T: Storable>(
        &self,
        alias: impl Into<String>,
        value: T,
    ) -> Result<(), RegisterError> {
        let instance = Instance::new(value);
        self.register_erased(alias.into(), false, Box::new(move |_| Ok(instance.clone())))
    }

    /// Registers a type-erased factory - the core all registration funnels
    /// through.
    pub fn register_erased(
        &self,
        alias: String,
        is_factory: bool,
        factory: Factory,
    ) -> Result<(), RegisterError> {
        if alias.is_empty() {
            return Err(RegisterError::InvalidAlias);
        }

        let mut definitions = self.definitions.lock().unwrap();
        if definitions.contains_key(&alias) {
            return Err(RegisterError::AlreadyRegistered(alias));
        }

        tracing::debug!("Registered service '{alias}' (factory mode: {is_factory})");
        definitions.insert(alias, Arc::new(Definition { factory, is_factory }));
        Ok(())
    }

    /// Returns whether a definition is registered under `alias`,
    /// regardless of whether it has been resolved yet.
    pub fn has_service(&self, alias: &str) -> Result<bool, ResolveError> {
        if alias.is_empty() {
            return Err(ResolveError::InvalidAlias);
        }
        Ok(self.definitions.lock().unwrap().contains_key(alias))
    }
}

// Service resolution
impl Container {
    /// Resolves the service registered under `alias`.
    ///
    /// Factory-mode services construct a fresh instance on every call.
    /// Singleton services construct once and return the cached instance
    /// afterwards - it is never replaced, so every call after the first
    /// hands out a handle to the same value.
    pub fn make(&self, alias: &str) -> Result<Instance, ResolveError> {
        if alias.is_empty() {
            return Err(ResolveError::InvalidAlias);
        }

        // Clone the definition out of the lock - the factory runs with no
        // lock held so it can resolve other aliases through `self`.
        let definition = {
            let definitions = self.definitions.lock().unwrap();
            definitions
                .get(alias)
                .cloned()
                .ok_or_else(|| ResolveError::NotRegistered(alias.to_owned()))?
        };

        if definition.is_factory {
            let instance = self.construct(alias, &definition)?;
            tracing::debug!("Constructed fresh instance of {}", instance.type_name());
            return Ok(instance);
        }

        if let Some(cached) = self.instances.lock().unwrap().get(alias) {
            tracing::debug!("Reusing cached instance of {}", cached.type_name());
            return Ok(cached.clone());
        }

        let instance = self.construct(alias, &definition)?;
        tracing::debug!("Constructed instance of {}", instance.type_name());

        // First writer wins - an alias's cached instance is never replaced.
        let mut instances = self.instances.lock().unwrap();
        Ok(instances
            .entry(alias.to_owned())
            .or_insert(instance)
            .clone())
    }

    /// Resolves the service under `alias` and downcasts it to `T`.
    pub fn make_as<T: Storable>(&self, alias: &str) -> Result<Arc<T>, ResolveError> {
        let instance = self.make(alias)?;
        instance
            .downcast()
            .map_err(|actual_type| ResolveError::DowncastFailed {
                alias: alias.to_owned(),
                required_type: type_name::<T>(),
                actual_type,
            })
    }

    fn construct(&self, alias: &str, definition: &Definition) -> Result<Instance, ResolveError> {
        (definition.factory)(self).map_err(|error| ResolveError::FactoryFailed {
            alias: alias.to_owned(),
            error: Arc::new(error),
        })
    }
}

// Parameter store
impl Container {
    /// Stores a new parameter value under `name`.
    ///
    /// Fails if a value already exists under the name - use
    /// [`Container::update_parameter`] to overwrite.
    pub fn add_parameter<T: Storable>(
        &self,
        name: impl Into<String>,
        value: T,
    ) -> Result<(), ParameterError> {
        let name = name.into();
        if name.is_empty() {
            return Err(ParameterError::InvalidName);
        }

        let mut parameters = self.parameters.lock().unwrap();
        if parameters.contains_key(&name) {
            return Err(ParameterError::AlreadyExists(name));
        }

        tracing::debug!("Added parameter '{name}'");
        parameters.insert(name, Parameter::new(value));
        Ok(())
    }

    /// Retrieves the parameter stored under `name`.
    pub fn get_parameter(&self, name: &str) -> Result<Parameter, ParameterError> {
        if name.is_empty() {
            return Err(ParameterError::InvalidName);
        }

        self.parameters
            .lock()
            .unwrap()
            .get(name)
            .cloned()
            .ok_or_else(|| ParameterError::NotFound(name.to_owned()))
    }

    /// Retrieves the parameter stored under `name` and downcasts it to `T`.
    pub fn get_parameter_as<T: Storable>(&self, name: &str) -> Result<Arc<T>, ParameterError> {
        let parameter = self.get_parameter(name)?;
        parameter
            .downcast()
            .map_err(|actual_type| ParameterError::DowncastFailed {
                name: name.to_owned(),
                required_type: type_name::<T>(),
                actual_type,
            })
    }

    /// Overwrites the parameter stored under `name`.
    ///
    /// The parameter must already exist.
    pub fn update_parameter<T: Storable>(
        &self,
        name: impl Into<String>,
        value: T,
    ) -> Result<(), ParameterError> {
        let name = name.into();
        if name.is_empty() {
            return Err(ParameterError::InvalidName);
        }

        let mut parameters = self.parameters.lock().unwrap();
        if !parameters.contains_key(&name) {
            return Err(ParameterError::NotFound(name));
        }

        tracing::debug!("Updated parameter '{name}'");
        parameters.insert(name, Parameter::new(value));
        Ok(())
    }

    /// Removes the parameter stored under `name`.
    ///
    /// Removing a name that does not exist is not an error.
    pub fn remove_parameter(&self, name: &str) -> Result<(), ParameterError> {
        if name.is_empty() {
            return Err(ParameterError::InvalidName);
        }

        if self.parameters.lock().unwrap().remove(name).is_some() {
            tracing::debug!("Removed parameter '{name}'");
        }
        Ok(())
    }

    /// Returns whether a parameter is stored under `name`.
    pub fn has_parameter(&self, name: &str) -> Result<bool, ParameterError> {
        if name.is_empty() {
            return Err(ParameterError::InvalidName);
        }
        Ok(self.parameters.lock().unwrap().contains_key(name))
    }
}
