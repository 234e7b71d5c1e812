//! Application use cases. Orchestrate domain logic via ports.

pub mod pipeline_service;
pub mod summary_service;

pub use pipeline_service::PipelineService;
pub use summary_service::SummaryService;
