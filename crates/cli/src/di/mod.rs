mod discovery;
mod probe;

pub use discovery::build_discovery;
pub use probe::ProbeServices;
