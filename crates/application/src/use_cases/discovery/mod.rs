pub mod discover_targets;
pub mod refresh_targets;

pub use discover_targets::DiscoverTargetsUseCase;
pub use refresh_targets::RefreshTargetsUseCase;
