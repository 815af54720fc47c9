pub mod endpoints;
pub mod health;
pub mod metrics;

pub use endpoints::get_endpoints;
pub use health::health_check;
pub use metrics::get_metrics;
