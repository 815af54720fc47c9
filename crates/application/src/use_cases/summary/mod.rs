pub mod build_summary;

pub use build_summary::{BuildSummaryUseCase, EndpointSummary, SummaryReport};
