use serde::{Deserialize, Serialize};

/// A traceable code-to-cloud pipeline instance linking findings across
/// stages via `connected_to` edges and a shared `chain_id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chain {
    pub chain_id: String,
    pub commit_sha: String,
    pub name: String,
    pub status: String,
    pub stages: Vec<PipelineStage>,
    pub findings: Vec<String>,
    pub metadata: PipelineMetadata,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineStage {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub status: String,
    pub details: StageDetails,
}

/// Artifact locator for one pipeline stage plus the finding ids produced
/// there. `findings` is always present; a runtime stage that produced
/// nothing carries an empty list rather than a missing field.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StageDetails {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commit_sha: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sha: Option<String>,
    pub findings: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineMetadata {
    pub start_time: String,
    pub end_time: String,
    pub triggered_by: String,
    pub source_branch: String,
    pub target_branch: String,
}
