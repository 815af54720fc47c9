pub mod target_registry;

pub use target_registry::{RegistryChange, TargetEntry, TargetRegistry};
