//! Spool Locator is a minimal service-locator container: register named
//! service factories, resolve instances later, and keep auxiliary
//! configuration parameters alongside them.
//!
//! The container owns three stores:
//! 1. Service definitions: an alias mapped to a factory plus a flag deciding
//!    singleton vs. always-fresh construction
//! 2. Cached instances: the memoized result of each singleton's first
//!    resolution
//! 3. Parameters: named arbitrary values, independent of services
//!
//! Factories receive the container itself, so a factory can resolve other
//! services and parameters - that is the composition mechanism.
//!
//! # Example
//!
//! ```rust
//! use spool_locator::Container;
//!
//! struct Greeter {
//!     greeting: String,
//! }
//!
//! let container = Container::new();
//! container.add_parameter("greeting", "hello".to_string()).unwrap();
//!
//! container
//!     .register("greeter", false, |c: &Container| {
//!         let greeting = c.get_parameter_as::<String>("greeting")?;
//!         Ok(Greeter {
//!             greeting: greeting.as_ref().clone(),
//!         })
//!     })
//!     .unwrap();
//!
//! let greeter = container.make_as::<Greeter>("greeter").unwrap();
//! assert_eq!(greeter.greeting, "hello");
//! ```
//!
//! Spool Locator consists of the following components:
//!
//! 1. Container - registration, resolution and the parameter store
//! 2. Types - the type-erased value wrappers and the factory type
//! 3. Errors - registration, resolution and parameter errors

pub mod container;
pub mod errors;
pub mod types;

pub use container::Container;
pub use errors::{ParameterError, RegisterError, ResolveError};
pub use types::{DynError, Factory, Instance, Parameter, Storable};
