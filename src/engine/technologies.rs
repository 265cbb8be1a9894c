//! Mock technology-stack profile: a language distribution that sums to
//! exactly 100, plus frameworks, databases, cloud platforms, and tooling.

use std::collections::BTreeMap;

use chrono::Utc;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::engine::generator::pick;

const LANGUAGES: [(&str, &[&str]); 10] = [
    (
        "JavaScript",
        &["React", "Angular", "Vue", "Express", "Next.js", "Gatsby"],
    ),
    ("Python", &["Django", "Flask", "FastAPI", "Pyramid", "Tornado"]),
    (
        "Java",
        &["Spring Boot", "Quarkus", "Micronaut", "Jakarta EE", "Hibernate"],
    ),
    ("Go", &["Gin", "Echo", "Fiber", "Gorilla", "Buffalo"]),
    ("Ruby", &["Rails", "Sinatra", "Hanami", "Grape", "Padrino"]),
    (
        "TypeScript",
        &["NestJS", "Angular", "React", "Vue", "Express"],
    ),
    (
        "C#",
        &["ASP.NET Core", "Entity Framework", "Blazor", "MVC", "Xamarin"],
    ),
    (
        "PHP",
        &["Laravel", "Symfony", "CodeIgniter", "Yii", "CakePHP"],
    ),
    ("Rust", &["Actix", "Rocket", "Warp", "Tide", "Axum"]),
    (
        "Kotlin",
        &["Spring Boot", "Ktor", "Micronaut", "Quarkus", "Android SDK"],
    ),
];

const DATABASES: [&str; 15] = [
    "PostgreSQL",
    "MySQL",
    "MongoDB",
    "Redis",
    "Cassandra",
    "DynamoDB",
    "SQLite",
    "Oracle",
    "SQL Server",
    "Elasticsearch",
    "Neo4j",
    "CouchDB",
    "MariaDB",
    "Firebase",
    "InfluxDB",
];

const CLOUD_PLATFORMS: [&str; 10] = [
    "AWS",
    "Azure",
    "Google Cloud",
    "Heroku",
    "DigitalOcean",
    "IBM Cloud",
    "Oracle Cloud",
    "Alibaba Cloud",
    "Linode",
    "Vultr",
];

const TOOLS: [&str; 20] = [
    "Docker",
    "Kubernetes",
    "Jenkins",
    "GitHub Actions",
    "CircleCI",
    "Terraform",
    "Ansible",
    "Prometheus",
    "Grafana",
    "ELK Stack",
    "Git",
    "Jira",
    "Confluence",
    "Slack",
    "Notion",
    "VS Code",
    "IntelliJ IDEA",
    "PyCharm",
    "WebStorm",
    "Eclipse",
];

const TOOL_CATEGORIES: [&str; 5] = [
    "CI/CD",
    "Monitoring",
    "Development",
    "Collaboration",
    "Infrastructure",
];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Framework {
    pub name: String,
    pub language: String,
    pub version: String,
    pub usage: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Database {
    pub name: String,
    pub version: String,
    pub usage: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CloudPlatform {
    pub name: String,
    pub services: u32,
    pub usage: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tool {
    pub name: String,
    pub category: String,
    pub usage: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TechnologyReport {
    /// Lines of code per language.
    pub languages: BTreeMap<String, u64>,
    /// Percentage split per language; values sum to exactly 100.
    pub language_distribution: BTreeMap<String, u32>,
    pub primary_language: String,
    pub frameworks: Vec<Framework>,
    pub databases: Vec<Database>,
    pub cloud_platforms: Vec<CloudPlatform>,
    pub tools: Vec<Tool>,
    pub timestamp: String,
}

/// The primary language claims 40-70%; 2-5 secondary languages split the
/// rest, each getting at least 5%, the last taking the exact remainder.
fn language_distribution(rng: &mut StdRng) -> (String, BTreeMap<String, u32>) {
    let primary_index = rng.gen_range(0..LANGUAGES.len());
    let primary = LANGUAGES[primary_index].0.to_string();

    let mut distribution = BTreeMap::new();
    let primary_percentage = rng.gen_range(40..=70u32);
    distribution.insert(primary.clone(), primary_percentage);
    let mut remaining = 100 - primary_percentage;

    let others: Vec<usize> = (0..LANGUAGES.len())
        .filter(|&i| i != primary_index)
        .collect();
    let secondary_count = rng.gen_range(2..=5usize);
    let selected: Vec<usize> = others
        .choose_multiple(rng, secondary_count)
        .copied()
        .collect();

    for (position, &index) in selected.iter().enumerate() {
        let language = LANGUAGES[index].0.to_string();
        let left_after_this = (selected.len() - position - 1) as u32;
        if left_after_this == 0 {
            distribution.insert(language, remaining);
        } else {
            let share = rng.gen_range(5..=remaining - 5 * left_after_this);
            distribution.insert(language, share);
            remaining -= share;
        }
    }

    (primary, distribution)
}

fn frameworks_for(language: &str) -> &'static [&'static str] {
    LANGUAGES
        .iter()
        .find(|(name, _)| *name == language)
        .map_or(&[], |(_, frameworks)| *frameworks)
}

pub fn generate_technologies(rng: &mut StdRng) -> TechnologyReport {
    let (primary_language, language_distribution) = language_distribution(rng);

    let total_loc: u64 = rng.gen_range(10_000..=100_000);
    let languages: BTreeMap<String, u64> = language_distribution
        .iter()
        .map(|(language, percentage)| (language.clone(), total_loc * u64::from(*percentage) / 100))
        .collect();

    let mut frameworks = Vec::new();
    for language in language_distribution.keys() {
        let pool = frameworks_for(language);
        let count = rng.gen_range(1..=3usize).min(pool.len());
        for name in pool.choose_multiple(rng, count) {
            frameworks.push(Framework {
                name: (*name).to_string(),
                language: language.clone(),
                version: format!(
                    "{}.{}.{}",
                    rng.gen_range(1..=10),
                    rng.gen_range(0..=20),
                    rng.gen_range(0..=50)
                ),
                usage: rng.gen_range(1..=10),
            });
        }
    }

    let database_count = rng.gen_range(2..=5usize);
    let databases: Vec<Database> = DATABASES
        .choose_multiple(rng, database_count)
        .map(|name| Database {
            name: (*name).to_string(),
            version: format!("{}.{}", rng.gen_range(1..=20), rng.gen_range(0..=50)),
            usage: rng.gen_range(1..=10),
        })
        .collect();

    let platform_count = rng.gen_range(1..=3usize);
    let cloud_platforms: Vec<CloudPlatform> = CLOUD_PLATFORMS
        .choose_multiple(rng, platform_count)
        .map(|name| CloudPlatform {
            name: (*name).to_string(),
            services: rng.gen_range(3..=15),
            usage: rng.gen_range(1..=10),
        })
        .collect();

    let tool_count = rng.gen_range(5..=10usize);
    let tool_names: Vec<&str> = TOOLS.choose_multiple(rng, tool_count).copied().collect();
    let mut tools = Vec::with_capacity(tool_names.len());
    for name in tool_names {
        tools.push(Tool {
            name: name.to_string(),
            category: (*pick(rng, &TOOL_CATEGORIES)).to_string(),
            usage: rng.gen_range(1..=10),
        });
    }

    TechnologyReport {
        languages,
        language_distribution,
        primary_language,
        frameworks,
        databases,
        cloud_platforms,
        tools,
        timestamp: Utc::now().to_rfc3339(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn test_distribution_sums_to_one_hundred() {
        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            let (primary, distribution) = language_distribution(&mut rng);
            assert_eq!(distribution.values().sum::<u32>(), 100);
            let primary_share = distribution[&primary];
            assert!((40..=70).contains(&primary_share));
            for share in distribution.values() {
                assert!(*share >= 5);
            }
        }
    }

    #[test]
    fn test_frameworks_belong_to_selected_languages() {
        let mut rng = StdRng::seed_from_u64(9);
        let report = generate_technologies(&mut rng);
        for framework in &report.frameworks {
            assert!(report.language_distribution.contains_key(&framework.language));
            assert!(frameworks_for(&framework.language).contains(&framework.name.as_str()));
        }
    }

    #[test]
    fn test_loc_split_tracks_distribution() {
        let mut rng = StdRng::seed_from_u64(17);
        let report = generate_technologies(&mut rng);
        assert_eq!(
            report.languages.len(),
            report.language_distribution.len()
        );
        for (language, loc) in &report.languages {
            let share = report.language_distribution[language];
            assert!(*loc <= 100_000 * u64::from(share) / 100 + 1);
        }
    }

    #[test]
    fn test_collections_within_bounds() {
        let mut rng = StdRng::seed_from_u64(33);
        let report = generate_technologies(&mut rng);
        assert!((2..=5).contains(&report.databases.len()));
        assert!((1..=3).contains(&report.cloud_platforms.len()));
        assert!((5..=10).contains(&report.tools.len()));
    }
}
