mod base_images;
mod generator;
mod ids;
mod summary;
mod technologies;

pub use base_images::{
    generate_base_image, generate_base_images, generate_vulnerability, BaseImage, BaseImageReport,
    BaseImageSummary, ImageVulnerability, VulnerabilityCounts,
};
pub use generator::{ChainGenerator, GenerateOptions, GeneratedChain};
pub use summary::{summarize, StageCounts, Summary};
pub use technologies::{
    generate_technologies, CloudPlatform, Database, Framework, TechnologyReport, Tool,
};
