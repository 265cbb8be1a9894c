//! Cross-record consistency of generated chains: every chain id must
//! resolve, every edge must mirror stage adjacency, and the summary must
//! round-trip against the per-service rows.

use std::collections::HashMap;

use chainsmith::domain::{Finding, Stage};
use chainsmith::{catalog, generate, GenerateOptions, SecurityReport};

fn seeded_report(seed: u64, runtime_probability: f64) -> SecurityReport {
    let services = catalog::default_services();
    let options = GenerateOptions {
        seed: Some(seed),
        runtime_probability,
        ..GenerateOptions::default()
    };
    let (report, skipped) = generate(&services, &options);
    assert!(skipped.is_empty(), "catalogue services must all generate");
    report
}

#[test]
fn referential_closure_holds_for_every_chain() {
    let report = seeded_report(1, 0.5);

    for service in &report.services {
        let by_id: HashMap<&str, &Finding> = service
            .findings
            .iter()
            .map(|f| (f.id.as_str(), f))
            .collect();

        for chain in &service.connected_findings {
            for id in &chain.findings {
                assert!(
                    by_id.contains_key(id.as_str()),
                    "chain {} references missing finding {id} in {}",
                    chain.chain_id,
                    service.name
                );
            }
            for stage in &chain.stages {
                for id in &stage.details.findings {
                    assert!(by_id.contains_key(id.as_str()));
                }
            }
        }
    }
}

#[test]
fn edges_mirror_stage_adjacency() {
    let report = seeded_report(2, 0.5);

    for service in &report.services {
        let by_id: HashMap<&str, &Finding> = service
            .findings
            .iter()
            .map(|f| (f.id.as_str(), f))
            .collect();

        for chain in &service.connected_findings {
            let code = by_id[chain.findings[0].as_str()];
            let build = by_id[chain.findings[1].as_str()];

            assert_eq!(code.stage, Stage::Code);
            assert_eq!(build.stage, Stage::Build);
            assert!(code.connected_to.contains(&build.id));
            assert_eq!(build.connected_to[0], code.id);

            if let Some(runtime_id) = chain.findings.get(2) {
                let runtime = by_id[runtime_id.as_str()];
                assert_eq!(runtime.stage, Stage::Runtime);
                assert!(build.connected_to.contains(&runtime.id));
                assert_eq!(runtime.connected_to, vec![build.id.clone()]);
            }
        }
    }
}

#[test]
fn chains_span_two_or_three_stages() {
    let report = seeded_report(3, 0.5);

    for service in &report.services {
        for chain in &service.connected_findings {
            assert!(
                chain.findings.len() == 2 || chain.findings.len() == 3,
                "chain {} spans {} findings",
                chain.chain_id,
                chain.findings.len()
            );
            assert_eq!(chain.stages.len(), 3, "pipeline always shows three stages");
        }
    }
}

#[test]
fn forced_runtime_always_yields_three_stages() {
    let report = seeded_report(4, 1.0);

    for service in &report.services {
        for chain in &service.connected_findings {
            assert_eq!(chain.findings.len(), 3);
            assert!(!chain.stages[2].details.findings.is_empty());
        }
    }
}

#[test]
fn disabled_runtime_always_yields_two_stages() {
    let report = seeded_report(5, 0.0);

    for service in &report.services {
        for chain in &service.connected_findings {
            assert_eq!(chain.findings.len(), 2);
            assert!(
                chain.stages[2].details.findings.is_empty(),
                "cloud stage must carry an explicit empty finding list"
            );
        }
        for finding in &service.findings {
            if finding.chain_id.is_some() {
                assert_ne!(finding.stage, Stage::Runtime);
            }
        }
    }
}

#[test]
fn summary_round_trips_against_services() {
    let report = seeded_report(6, 0.5);
    let summary = &report.summary;

    let expected: usize = report.services.iter().map(|s| s.findings.len()).sum();
    assert_eq!(summary.total_findings, expected);
    assert_eq!(summary.by_stage.total(), summary.total_findings);
    assert_eq!(
        summary.by_service.values().sum::<usize>(),
        summary.total_findings
    );
    assert_eq!(
        summary.critical + summary.high + summary.medium + summary.low + summary.informational,
        summary.total_findings
    );
}

#[test]
fn standalone_findings_have_no_edges() {
    let report = seeded_report(7, 0.5);

    for service in &report.services {
        for finding in &service.findings {
            if finding.chain_id.is_none() {
                assert!(finding.connected_to.is_empty());
                assert!(finding.id.contains("standalone"));
                assert!(finding.vulnerable_package.is_none());
            }
        }
    }
}

#[test]
fn chain_findings_share_chain_metadata() {
    let report = seeded_report(8, 1.0);

    for service in &report.services {
        for chain in &service.connected_findings {
            let members: Vec<&Finding> = service
                .findings
                .iter()
                .filter(|f| f.chain_id.as_deref() == Some(chain.chain_id.as_str()))
                .collect();
            assert_eq!(members.len(), chain.findings.len());

            let package = members[0].vulnerable_package.as_ref().unwrap();
            for member in &members {
                assert_eq!(member.commit_sha, chain.chain_id);
                assert_eq!(member.vulnerable_package.as_ref().unwrap(), package);
            }
        }
    }
}
