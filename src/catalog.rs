//! The shared finding catalogue: every table the generators draw from
//! lives here so the "pick a random severity / package / description"
//! pattern has exactly one home.

use std::path::Path;

use crate::domain::{FindingType, Service};
use crate::error::{ChainsmithError, Result};

/// Known-vulnerable packages attached to finding chains, as
/// `(name, version, fixed_version)`.
pub const VULNERABLE_PACKAGES: [(&str, &str, &str); 8] = [
    ("log4j", "2.14.1", "2.15.0"),
    ("spring-core", "5.3.13", "5.3.14"),
    ("jackson-databind", "2.12.3", "2.12.6.1"),
    ("commons-text", "1.9", "1.10.0"),
    ("golang.org/x/crypto", "v0.0.1", "v0.0.2"),
    ("github.com/gorilla/websocket", "v1.4.0", "v1.4.2"),
    ("@angular/core", "12.0.0", "12.0.1"),
    ("react-dom", "16.0.0", "16.0.1"),
];

pub const OWNERS: [&str; 4] = ["Team A", "Team B", "Team C", "Security Team"];

pub const TRIGGERS: [&str; 3] = ["push", "pull_request", "schedule"];

pub const REGISTRY_PREFIX: &str = "gke.gcr.io/gcp-com";

/// Description pool for one finding category.
#[must_use]
pub fn descriptions(kind: FindingType) -> &'static [&'static str] {
    match kind {
        FindingType::Sast => &[
            "SQL Injection vulnerability",
            "Cross-Site Scripting (XSS) detected",
            "Path Traversal vulnerability",
            "Insecure Deserialization",
            "Command Injection risk",
        ],
        FindingType::Sca => &[
            "Outdated library with known vulnerabilities",
            "Vulnerable dependency found",
            "Critical update required for package",
            "Library with unsupported version used",
            "Security patch missing in dependency",
        ],
        FindingType::Secrets => &[
            "Hardcoded API key detected",
            "Potential password in code",
            "Authentication credentials found",
            "Encryption key in source code",
            "Token or secret leaked in code",
        ],
        FindingType::ImageScan => &[
            "OS vulnerability in base image",
            "Outdated package in container",
            "Malware signature detected",
            "Insecure configuration in image",
            "Unnecessary package increasing attack surface",
        ],
        FindingType::Misconfiguration => &[
            "Excessive permissions in deployment",
            "Privileged container execution",
            "Missing network policy",
            "Insecure port exposed",
            "Resource quota not defined",
        ],
        FindingType::RuntimeFindings => &[
            "Unusual process execution detected",
            "Unexpected network connection",
            "File system modification alert",
            "Privilege escalation attempt",
            "Container escape attempt",
        ],
    }
}

/// The built-in microservice catalogue the dashboard is modeled on.
#[must_use]
pub fn default_services() -> Vec<Service> {
    vec![
        Service::new(
            "frontend",
            "Go",
            &[
                "main.go",
                "handlers.go",
                "router.go",
                "templates/home.html",
                "static/styles.css",
            ],
            "frontend:v1.0.0",
        ),
        Service::new(
            "cartservice",
            "C#",
            &["Program.cs", "CartService.cs", "Startup.cs", "Models/Cart.cs"],
            "cartservice:v1.0.0",
        ),
        Service::new(
            "productcatalogservice",
            "Go",
            &["server.go", "products.go", "data/products.json"],
            "productcatalogservice:v1.0.0",
        ),
        Service::new(
            "currencyservice",
            "Node.js",
            &["server.js", "currency_converter.js", "data/currency_data.json"],
            "currencyservice:v1.0.0",
        ),
        Service::new(
            "paymentservice",
            "Node.js",
            &["index.js", "charge.js", "payment_methods.js"],
            "paymentservice:v1.0.0",
        ),
        Service::new(
            "shippingservice",
            "Go",
            &["main.go", "shipping.go", "quote.go", "tracking.go"],
            "shippingservice:v1.0.0",
        ),
        Service::new(
            "emailservice",
            "Python",
            &["email_server.py", "templates.py", "sender.py"],
            "emailservice:v1.0.0",
        ),
        Service::new(
            "checkoutservice",
            "Go",
            &["main.go", "checkout.go", "money.go", "order.go"],
            "checkoutservice:v1.0.0",
        ),
        Service::new(
            "recommendationservice",
            "Python",
            &["recommendation_server.py", "model.py", "product_catalog.py"],
            "recommendationservice:v1.0.0",
        ),
        Service::new(
            "adservice",
            "Java",
            &["AdService.java", "AdServiceClient.java", "AdCatalog.java"],
            "adservice:v1.0.0",
        ),
        Service::new(
            "loadgenerator",
            "Python",
            &["locustfile.py", "generator.py", "requirements.txt"],
            "loadgenerator:v1.0.0",
        ),
        Service::new(
            "shoppingassistantservice",
            "Python",
            &["assistant.py", "recommendation_engine.py", "user_profiles.py"],
            "shoppingassistantservice:v1.0.0",
        ),
    ]
}

/// Load a service catalogue from a JSON file holding a `[Service]` array.
pub fn load_services_file(path: &Path) -> Result<Vec<Service>> {
    let content = std::fs::read_to_string(path)?;
    let services: Vec<Service> = serde_json::from_str(&content)?;
    if services.is_empty() {
        return Err(ChainsmithError::EmptyCatalog);
    }
    Ok(services)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Stage;

    #[test]
    fn test_every_type_has_descriptions() {
        for kind in [
            FindingType::Sast,
            FindingType::Sca,
            FindingType::Secrets,
            FindingType::ImageScan,
            FindingType::Misconfiguration,
            FindingType::RuntimeFindings,
        ] {
            assert!(!descriptions(kind).is_empty());
        }
    }

    #[test]
    fn test_default_services_are_well_formed() {
        let services = default_services();
        assert_eq!(services.len(), 12);
        for service in &services {
            assert!(!service.files.is_empty(), "{} has no files", service.name);
            assert!(service.image.contains(':'));
        }
    }

    #[test]
    fn test_code_types_cover_code_stage_only() {
        for kind in FindingType::CODE {
            assert_eq!(kind.stage(), Stage::Code);
        }
    }

    #[test]
    fn test_load_services_file_roundtrip() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("services.json");
        std::fs::write(
            &path,
            r#"[{"name": "api", "language": "Rust", "files": ["main.rs"], "image": "api:v2"}]"#,
        )
        .unwrap();
        let services = load_services_file(&path).unwrap();
        assert_eq!(services.len(), 1);
        assert_eq!(services[0].name, "api");
    }

    #[test]
    fn test_load_services_file_rejects_empty() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("services.json");
        std::fs::write(&path, "[]").unwrap();
        assert!(load_services_file(&path).is_err());
    }
}
