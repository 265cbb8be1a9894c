use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
    Informational,
}

impl Severity {
    /// Severities drawn for findings that belong to a chain.
    pub const CHAIN: [Severity; 4] = [
        Severity::Critical,
        Severity::High,
        Severity::Medium,
        Severity::Low,
    ];

    /// Full pool, used for standalone findings.
    pub const ALL: [Severity; 5] = [
        Severity::Critical,
        Severity::High,
        Severity::Medium,
        Severity::Low,
        Severity::Informational,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Critical => "Critical",
            Severity::High => "High",
            Severity::Medium => "Medium",
            Severity::Low => "Low",
            Severity::Informational => "Informational",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Code,
    Build,
    Runtime,
}

impl Stage {
    pub const ALL: [Stage; 3] = [Stage::Code, Stage::Build, Stage::Runtime];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Stage::Code => "code",
            Stage::Build => "build",
            Stage::Runtime => "runtime",
        }
    }
}

/// Finding category. Each category belongs to exactly one pipeline stage
/// and is reported by exactly one tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FindingType {
    #[serde(rename = "SAST")]
    Sast,
    #[serde(rename = "SCA")]
    Sca,
    Secrets,
    #[serde(rename = "Image Scan")]
    ImageScan,
    Misconfiguration,
    #[serde(rename = "Runtime Findings")]
    RuntimeFindings,
}

impl FindingType {
    pub const CODE: [FindingType; 3] = [FindingType::Sast, FindingType::Sca, FindingType::Secrets];
    pub const RUNTIME: [FindingType; 2] =
        [FindingType::Misconfiguration, FindingType::RuntimeFindings];

    #[must_use]
    pub fn stage(self) -> Stage {
        match self {
            FindingType::Sast | FindingType::Sca | FindingType::Secrets => Stage::Code,
            FindingType::ImageScan => Stage::Build,
            FindingType::Misconfiguration | FindingType::RuntimeFindings => Stage::Runtime,
        }
    }

    /// The tool that "detected" the finding.
    #[must_use]
    pub fn source(self) -> &'static str {
        match self {
            FindingType::Sast => "CodeQL",
            FindingType::Sca => "Dependabot",
            FindingType::Secrets => "TruffleHog",
            FindingType::ImageScan => "Trivy",
            FindingType::Misconfiguration => "Kube-bench",
            FindingType::RuntimeFindings => "Falco",
        }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            FindingType::Sast => "SAST",
            FindingType::Sca => "SCA",
            FindingType::Secrets => "Secrets",
            FindingType::ImageScan => "Image Scan",
            FindingType::Misconfiguration => "Misconfiguration",
            FindingType::RuntimeFindings => "Runtime Findings",
        }
    }

    /// Identifier-safe fragment used when composing finding ids.
    #[must_use]
    pub fn slug(self) -> &'static str {
        match self {
            FindingType::Sast => "sast",
            FindingType::Sca => "sca",
            FindingType::Secrets => "secrets",
            FindingType::ImageScan => "image",
            FindingType::Misconfiguration => "misconfiguration",
            FindingType::RuntimeFindings => "runtime-findings",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VulnerablePackage {
    pub name: String,
    pub version: String,
    pub fixed_version: String,
}

/// A single security/compliance observation attached to one pipeline stage.
///
/// Locator fields are stage-specific: `file`/`line` for code, `image` and
/// `image_sha` for build and runtime, `pod_name` for runtime only. Absent
/// locators are omitted from the serialized record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Finding {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chain_id: Option<String>,
    pub stage: Stage,
    #[serde(rename = "type")]
    pub kind: FindingType,
    pub severity: Severity,
    pub source: String,
    pub description: String,
    pub owner: String,
    pub commit_sha: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file_commit_sha: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_sha: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub build_commit_sha: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pod_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deployment_commit_sha: Option<String>,
    pub connected_to: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vulnerable_package: Option<VulnerablePackage>,
}
