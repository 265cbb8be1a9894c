use serde::{Deserialize, Serialize};

use crate::domain::ServiceFindings;
use crate::engine::{summarize, Summary};

/// The aggregate the dashboard consumes: run-wide summary plus the
/// per-service findings and chains.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityReport {
    pub summary: Summary,
    pub services: Vec<ServiceFindings>,
}

#[must_use]
pub fn build_security_report(services: Vec<ServiceFindings>) -> SecurityReport {
    let summary = summarize(&services);
    SecurityReport { summary, services }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;
    use crate::engine::{ChainGenerator, GenerateOptions};

    #[test]
    fn test_report_summary_matches_services() {
        let options = GenerateOptions {
            seed: Some(8),
            ..GenerateOptions::default()
        };
        let rows: Vec<ServiceFindings> = catalog::default_services()
            .iter()
            .take(3)
            .map(|service| {
                ChainGenerator::for_service(&options, &service.name)
                    .generate_service(service)
                    .unwrap()
            })
            .collect();

        let report = build_security_report(rows);
        let expected: usize = report.services.iter().map(|s| s.findings.len()).sum();
        assert_eq!(report.summary.total_findings, expected);
        for service in &report.services {
            assert_eq!(service.findings_count, service.findings.len());
        }
    }
}
