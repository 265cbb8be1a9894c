use serde::{Deserialize, Serialize};

use crate::domain::{Chain, Finding};

/// One microservice descriptor, immutable for the duration of a run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Service {
    pub name: String,
    pub language: String,
    pub files: Vec<String>,
    pub image: String,
}

impl Service {
    #[must_use]
    pub fn new(name: &str, language: &str, files: &[&str], image: &str) -> Self {
        Self {
            name: name.to_string(),
            language: language.to_string(),
            files: files.iter().map(|f| (*f).to_string()).collect(),
            image: image.to_string(),
        }
    }
}

/// Everything generated for one service: its findings and the chains that
/// connect them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceFindings {
    pub name: String,
    pub language: String,
    pub image: String,
    pub image_sha: String,
    pub findings_count: usize,
    pub findings: Vec<Finding>,
    pub connected_findings: Vec<Chain>,
}
