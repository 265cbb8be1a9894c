mod chain;
mod finding;
mod service;

pub use chain::{Chain, PipelineMetadata, PipelineStage, StageDetails};
pub use finding::{Finding, FindingType, Severity, Stage, VulnerablePackage};
pub use service::{Service, ServiceFindings};
