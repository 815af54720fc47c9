pub mod endpoint;
pub mod health;

pub use endpoint::EndpointResponse;
pub use health::HealthResponse;
