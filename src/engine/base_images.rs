//! Mock base-image scan results: a fleet of container base images, each
//! with a randomized CVE inventory and a derived security score.

use std::collections::BTreeMap;

use chrono::{Duration, Utc};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::domain::Severity;
use crate::engine::generator::pick;

const BASE_IMAGE_TYPES: [&str; 14] = [
    "node",
    "python",
    "java",
    "dotnet",
    "golang",
    "ruby",
    "php",
    "nginx",
    "alpine",
    "ubuntu",
    "debian",
    "centos",
    "fedora",
    "amazonlinux",
];

const VULNERABILITY_TITLES: [&str; 12] = [
    "Remote Code Execution",
    "SQL Injection",
    "Cross-Site Scripting",
    "Path Traversal",
    "Denial of Service",
    "Information Disclosure",
    "Privilege Escalation",
    "Buffer Overflow",
    "Memory Leak",
    "Insecure Deserialization",
    "XML External Entity",
    "Server-Side Request Forgery",
];

const COMPONENTS: [&str; 21] = [
    "openssl",
    "glibc",
    "libxml2",
    "curl",
    "openssh",
    "bash",
    "python",
    "nodejs",
    "openjdk",
    "dotnet",
    "nginx",
    "apache",
    "mysql",
    "postgresql",
    "redis",
    "mongodb",
    "libc",
    "libcurl",
    "libpng",
    "libjpeg",
    "zlib",
];

const CONSUMERS: [&str; 13] = [
    "frontend",
    "backend",
    "api",
    "auth",
    "database",
    "cache",
    "queue",
    "worker",
    "scheduler",
    "notification",
    "payment",
    "shipping",
    "inventory",
];

const IMPACTS: [&str; 5] = [
    "execute arbitrary code",
    "access sensitive information",
    "cause denial of service",
    "bypass authentication",
    "escalate privileges",
];

const REGISTRIES: [&str; 5] = [
    "Docker Hub",
    "GitHub Container Registry",
    "Google Container Registry",
    "Amazon ECR",
    "Azure Container Registry",
];

const REMEDIATIONS: [&str; 5] = [
    "Upgrade to latest version",
    "Apply security patch",
    "Replace with secure alternative",
    "Configure security settings",
    "Remove unused component",
];

const UPDATE_FREQUENCIES: [&str; 3] = ["Weekly", "Monthly", "Quarterly"];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageVulnerability {
    pub id: String,
    pub title: String,
    pub description: String,
    pub severity: Severity,
    pub cvss_score: f64,
    pub component: String,
    pub component_version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fixed_version: Option<String>,
    pub published_date: String,
    pub remediation: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VulnerabilityCounts {
    pub critical: usize,
    pub high: usize,
    pub medium: usize,
    pub low: usize,
    pub total: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BaseImage {
    pub name: String,
    pub tag: String,
    pub full_name: String,
    pub size: String,
    pub layers: u32,
    pub created: String,
    pub registry: String,
    pub vulnerabilities: Vec<ImageVulnerability>,
    pub vulnerability_counts: VulnerabilityCounts,
    pub security_score: u32,
    pub scan_date: String,
    pub used_by: Vec<String>,
    pub last_updated: String,
    pub next_update: String,
    pub update_frequency: String,
    pub is_latest: bool,
    pub is_recommended: bool,
    pub is_deprecated: bool,
    pub alternatives: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BaseImageSummary {
    pub total_images: usize,
    pub vulnerable_images: usize,
    pub deprecated_images: usize,
    pub outdated_images: usize,
    pub vulnerabilities: VulnerabilityCounts,
    pub image_types: BTreeMap<String, usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BaseImageReport {
    pub base_images: Vec<BaseImage>,
    pub summary: BaseImageSummary,
    pub timestamp: String,
}

/// CVSS band matching the vulnerability's severity, rounded to one decimal.
fn cvss_for(rng: &mut StdRng, severity: Severity) -> f64 {
    let raw: f64 = match severity {
        Severity::Critical => rng.gen_range(9.0..=10.0),
        Severity::High => rng.gen_range(7.0..=8.9),
        Severity::Medium => rng.gen_range(4.0..=6.9),
        Severity::Low | Severity::Informational => rng.gen_range(0.1..=3.9),
    };
    (raw * 10.0).round() / 10.0
}

fn bump_patch(rng: &mut StdRng, version: &str) -> String {
    let parts: Vec<&str> = version.split('.').collect();
    if parts.len() >= 3 {
        if let Ok(patch) = parts[2].parse::<u32>() {
            return format!("{}.{}.{}", parts[0], parts[1], patch + rng.gen_range(1..=5));
        }
    }
    format!("{version}.1")
}

pub fn generate_vulnerability(rng: &mut StdRng) -> ImageVulnerability {
    let severity = *pick(rng, &Severity::CHAIN);
    let cvss_score = cvss_for(rng, severity);
    let component = (*pick(rng, &COMPONENTS)).to_string();
    let component_version = format!(
        "{}.{}.{}",
        rng.gen_range(0..=5),
        rng.gen_range(0..=20),
        rng.gen_range(0..=50)
    );
    let title_kind = *pick(rng, &VULNERABILITY_TITLES);
    let fixed_version = if rng.gen_bool(0.5) {
        Some(bump_patch(rng, &component_version))
    } else {
        None
    };
    let published = Utc::now() - Duration::days(rng.gen_range(30..=365));

    ImageVulnerability {
        id: format!(
            "CVE-{}-{}",
            rng.gen_range(2020..=2023),
            rng.gen_range(10000..=99999)
        ),
        title: format!("{title_kind} in {component}"),
        description: format!(
            "A {} severity {} vulnerability was found in {component} version {component_version} that allows attackers to {}.",
            severity.as_str().to_lowercase(),
            (*pick(rng, &VULNERABILITY_TITLES)).to_lowercase(),
            *pick(rng, &IMPACTS)
        ),
        severity,
        cvss_score,
        component,
        component_version,
        fixed_version,
        published_date: published.format("%Y-%m-%d").to_string(),
        remediation: (*pick(rng, &REMEDIATIONS)).to_string(),
    }
}

pub fn generate_base_image(rng: &mut StdRng) -> BaseImage {
    let image_type = (*pick(rng, &BASE_IMAGE_TYPES)).to_string();
    let tag = format!("{}.{}", rng.gen_range(1..=20), rng.gen_range(0..=20));

    let vulnerability_count = rng.gen_range(0..=10);
    let mut vulnerabilities = Vec::with_capacity(vulnerability_count);
    for _ in 0..vulnerability_count {
        vulnerabilities.push(generate_vulnerability(rng));
    }
    let counts = count_severities(&vulnerabilities);

    let mut security_score = 100i64;
    security_score -= counts.critical as i64 * 15;
    security_score -= counts.high as i64 * 7;
    security_score -= counts.medium as i64 * 3;
    security_score -= counts.low as i64;
    let security_score = security_score.max(0) as u32;

    let consumer_count = rng.gen_range(1..=5);
    let used_by: Vec<String> = CONSUMERS
        .choose_multiple(rng, consumer_count)
        .map(|s| (*s).to_string())
        .collect();

    let now = Utc::now();

    BaseImage {
        full_name: format!("{image_type}:{tag}"),
        size: format!("{}MB", rng.gen_range(10..=500)),
        layers: rng.gen_range(3..=15),
        created: (now - Duration::days(rng.gen_range(0..=365)))
            .format("%Y-%m-%d")
            .to_string(),
        registry: (*pick(rng, &REGISTRIES)).to_string(),
        vulnerabilities,
        vulnerability_counts: counts,
        security_score,
        scan_date: (now - Duration::days(rng.gen_range(0..=30)))
            .format("%Y-%m-%d")
            .to_string(),
        used_by,
        last_updated: (now - Duration::days(rng.gen_range(0..=365)))
            .format("%Y-%m-%d")
            .to_string(),
        next_update: (now + Duration::days(rng.gen_range(1..=90)))
            .format("%Y-%m-%d")
            .to_string(),
        update_frequency: (*pick(rng, &UPDATE_FREQUENCIES)).to_string(),
        is_latest: rng.gen_bool(0.5),
        is_recommended: rng.gen_bool(0.5),
        is_deprecated: rng.gen_bool(0.5),
        alternatives: vec![
            format!("{image_type}:{}.{}", rng.gen_range(1..=20), rng.gen_range(0..=20)),
            format!("{image_type}:{}.{}", rng.gen_range(1..=20), rng.gen_range(0..=20)),
        ],
        name: image_type,
        tag,
    }
}

/// A full base-image fleet with aggregate summary.
pub fn generate_base_images(rng: &mut StdRng) -> BaseImageReport {
    let image_count = rng.gen_range(10..=20);
    let mut base_images = Vec::with_capacity(image_count);
    for _ in 0..image_count {
        base_images.push(generate_base_image(rng));
    }

    let mut totals = VulnerabilityCounts::default();
    let mut image_types: BTreeMap<String, usize> = BTreeMap::new();
    for image in &base_images {
        totals.critical += image.vulnerability_counts.critical;
        totals.high += image.vulnerability_counts.high;
        totals.medium += image.vulnerability_counts.medium;
        totals.low += image.vulnerability_counts.low;
        totals.total += image.vulnerability_counts.total;
        *image_types.entry(image.name.clone()).or_default() += 1;
    }

    let summary = BaseImageSummary {
        total_images: base_images.len(),
        vulnerable_images: base_images
            .iter()
            .filter(|i| i.vulnerability_counts.total > 0)
            .count(),
        deprecated_images: base_images.iter().filter(|i| i.is_deprecated).count(),
        outdated_images: base_images.iter().filter(|i| !i.is_latest).count(),
        vulnerabilities: totals,
        image_types,
    };

    BaseImageReport {
        base_images,
        summary,
        timestamp: Utc::now().to_rfc3339(),
    }
}

fn count_severities(vulnerabilities: &[ImageVulnerability]) -> VulnerabilityCounts {
    let mut counts = VulnerabilityCounts {
        total: vulnerabilities.len(),
        ..VulnerabilityCounts::default()
    };
    for vulnerability in vulnerabilities {
        match vulnerability.severity {
            Severity::Critical => counts.critical += 1,
            Severity::High => counts.high += 1,
            Severity::Medium => counts.medium += 1,
            Severity::Low | Severity::Informational => counts.low += 1,
        }
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn rng() -> StdRng {
        StdRng::seed_from_u64(2024)
    }

    #[test]
    fn test_cvss_bands_match_severity() {
        let mut rng = rng();
        for _ in 0..50 {
            let vulnerability = generate_vulnerability(&mut rng);
            let score = vulnerability.cvss_score;
            match vulnerability.severity {
                Severity::Critical => assert!((9.0..=10.0).contains(&score)),
                Severity::High => assert!((7.0..=8.9).contains(&score)),
                Severity::Medium => assert!((4.0..=6.9).contains(&score)),
                _ => assert!((0.1..=3.9).contains(&score)),
            }
            assert!(vulnerability.id.starts_with("CVE-"));
        }
    }

    #[test]
    fn test_image_counts_are_consistent() {
        let mut rng = rng();
        for _ in 0..20 {
            let image = generate_base_image(&mut rng);
            let counts = &image.vulnerability_counts;
            assert_eq!(counts.total, image.vulnerabilities.len());
            assert_eq!(
                counts.critical + counts.high + counts.medium + counts.low,
                counts.total
            );
            assert!(image.security_score <= 100);
            assert_eq!(image.full_name, format!("{}:{}", image.name, image.tag));
        }
    }

    #[test]
    fn test_used_by_has_no_duplicates() {
        let mut rng = rng();
        let image = generate_base_image(&mut rng);
        let mut consumers = image.used_by.clone();
        consumers.sort();
        consumers.dedup();
        assert_eq!(consumers.len(), image.used_by.len());
    }

    #[test]
    fn test_report_summary_totals() {
        let mut rng = rng();
        let report = generate_base_images(&mut rng);
        assert!(report.summary.total_images >= 10);
        let expected: usize = report
            .base_images
            .iter()
            .map(|i| i.vulnerability_counts.total)
            .sum();
        assert_eq!(report.summary.vulnerabilities.total, expected);
        assert_eq!(
            report.summary.image_types.values().sum::<usize>(),
            report.summary.total_images
        );
    }

    #[test]
    fn test_bump_patch_raises_version() {
        let mut rng = rng();
        let bumped = bump_patch(&mut rng, "1.2.3");
        let patch: u32 = bumped.split('.').nth(2).unwrap().parse().unwrap();
        assert!(patch > 3);
        assert_eq!(bump_patch(&mut rng, "1.2"), "1.2.1");
    }
}
