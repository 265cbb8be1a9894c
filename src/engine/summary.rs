use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::{ServiceFindings, Severity, Stage};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageCounts {
    pub code: usize,
    pub build: usize,
    pub runtime: usize,
}

impl StageCounts {
    #[must_use]
    pub fn total(&self) -> usize {
        self.code + self.build + self.runtime
    }
}

/// Aggregate counts across every service in a run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Summary {
    pub total_findings: usize,
    pub critical: usize,
    pub high: usize,
    pub medium: usize,
    pub low: usize,
    pub informational: usize,
    pub by_type: BTreeMap<String, usize>,
    pub by_service: BTreeMap<String, usize>,
    pub by_stage: StageCounts,
}

/// Pure aggregation over the generated per-service rows. Applying it twice
/// to the same input yields the same summary.
#[must_use]
pub fn summarize(services: &[ServiceFindings]) -> Summary {
    let mut summary = Summary::default();

    for service in services {
        summary
            .by_service
            .insert(service.name.clone(), service.findings.len());

        for finding in &service.findings {
            summary.total_findings += 1;
            match finding.severity {
                Severity::Critical => summary.critical += 1,
                Severity::High => summary.high += 1,
                Severity::Medium => summary.medium += 1,
                Severity::Low => summary.low += 1,
                Severity::Informational => summary.informational += 1,
            }
            match finding.stage {
                Stage::Code => summary.by_stage.code += 1,
                Stage::Build => summary.by_stage.build += 1,
                Stage::Runtime => summary.by_stage.runtime += 1,
            }
            *summary
                .by_type
                .entry(finding.kind.as_str().to_string())
                .or_default() += 1;
        }
    }

    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;
    use crate::engine::{ChainGenerator, GenerateOptions};

    fn sample_rows() -> Vec<ServiceFindings> {
        let options = GenerateOptions {
            seed: Some(21),
            ..GenerateOptions::default()
        };
        catalog::default_services()
            .iter()
            .take(4)
            .map(|service| {
                ChainGenerator::for_service(&options, &service.name)
                    .generate_service(service)
                    .unwrap()
            })
            .collect()
    }

    #[test]
    fn test_summary_round_trip() {
        let rows = sample_rows();
        let summary = summarize(&rows);

        let expected: usize = rows.iter().map(|s| s.findings.len()).sum();
        assert_eq!(summary.total_findings, expected);
        assert_eq!(summary.by_stage.total(), summary.total_findings);
        assert_eq!(
            summary.critical
                + summary.high
                + summary.medium
                + summary.low
                + summary.informational,
            summary.total_findings
        );
        assert_eq!(
            summary.by_type.values().sum::<usize>(),
            summary.total_findings
        );
        assert_eq!(
            summary.by_service.values().sum::<usize>(),
            summary.total_findings
        );
    }

    #[test]
    fn test_summarize_is_idempotent() {
        let rows = sample_rows();
        assert_eq!(summarize(&rows), summarize(&rows));
    }

    #[test]
    fn test_empty_input_yields_zero_summary() {
        let summary = summarize(&[]);
        assert_eq!(summary.total_findings, 0);
        assert!(summary.by_type.is_empty());
        assert!(summary.by_service.is_empty());
    }
}
