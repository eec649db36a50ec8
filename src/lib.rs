//! Dependency-respecting load order for named modules.
//!
//! A [`Resolver`] walks a [`ModuleSource`] depth-first from a list of
//! requested modules. Dependencies are emitted before their dependents, and
//! modules indexed as conditional candidates of a visited module join the
//! walk when their [`Condition`] holds.
//!
//! ```
//! use modorder::{Module, ModuleRegistry, Resolver};
//!
//! let reg: ModuleRegistry = [
//!     Module::new("a"),
//!     Module::new("b").with_dependencies(["a"]),
//!     Module::new("c").with_dependencies(["a", "b"]),
//! ]
//! .into_iter()
//! .collect();
//!
//! let order = Resolver::new(&reg).resolve(&["c"]).unwrap();
//! assert_eq!(order, ["a", "b", "c"]);
//! ```

pub mod config;
pub mod context;
pub mod error;
pub mod module;
pub mod registry;
pub mod resolve;

pub use config::{ConditionConfig, ModuleConfig, RegistryConfig};
pub use context::{ConditionEnv, Platform};
pub use error::ResolveError;
pub use module::{Condition, Module};
pub use registry::{ModuleRegistry, ModuleSource};
pub use resolve::Resolver;
