pub mod catalog;
pub mod config;
pub mod domain;
pub mod engine;
pub mod error;
pub mod output;

use crossbeam_channel::unbounded;

pub use config::ChainsmithConfig;
pub use domain::{
    Chain, Finding, FindingType, Service, ServiceFindings, Severity, Stage, VulnerablePackage,
};
pub use engine::{ChainGenerator, GenerateOptions, Summary};
pub use error::{ChainsmithError, Result as ChainsmithResult};
pub use output::SecurityReport;

/// A service the run could not generate data for, reported instead of
/// aborting the rest of the run.
#[derive(Debug, Clone)]
pub struct Skipped {
    pub service: String,
    pub reason: String,
}

/// Generate the full security report for a service catalogue.
///
/// Services are independent, so each one is generated on its own thread
/// with its own child-seeded random source and the rows are collected over
/// a channel. Input order is preserved in the output.
///
/// # Example
/// ```no_run
/// use chainsmith::{catalog, generate, GenerateOptions};
///
/// let services = catalog::default_services();
/// let (report, skipped) = generate(&services, &GenerateOptions::default());
/// assert!(skipped.is_empty());
/// println!("{} findings", report.summary.total_findings);
/// ```
#[must_use]
pub fn generate(
    services: &[Service],
    options: &GenerateOptions,
) -> (SecurityReport, Vec<Skipped>) {
    let (sender, receiver) = unbounded();

    std::thread::scope(|scope| {
        for (index, service) in services.iter().enumerate() {
            let sender = sender.clone();
            scope.spawn(move || {
                let mut generator = ChainGenerator::for_service(options, &service.name);
                let result = generator.generate_service(service);
                let _ = sender.send((index, service.name.clone(), result));
            });
        }
    });
    drop(sender);

    let mut rows = Vec::new();
    let mut skipped = Vec::new();
    for (index, name, result) in receiver.iter() {
        match result {
            Ok(findings) => rows.push((index, findings)),
            Err(error) => skipped.push(Skipped {
                service: name,
                reason: error.to_string(),
            }),
        }
    }
    rows.sort_by_key(|(index, _)| *index);

    let rows: Vec<ServiceFindings> = rows.into_iter().map(|(_, findings)| findings).collect();
    (output::build_security_report(rows), skipped)
}

/// Generate using a loaded configuration: resolves the service catalogue
/// (built-in table, or the configured services file) and the generation
/// options in one step.
///
/// # Example
/// ```no_run
/// use chainsmith::{generate_with_config, ChainsmithConfig};
/// # fn main() -> chainsmith::ChainsmithResult<()> {
/// let config = ChainsmithConfig::load()?;
/// let (report, _skipped) = generate_with_config(&config)?;
/// println!("{} services", report.services.len());
/// # Ok(())
/// # }
/// ```
pub fn generate_with_config(
    config: &ChainsmithConfig,
) -> ChainsmithResult<(SecurityReport, Vec<Skipped>)> {
    let services = match &config.catalog.services_file {
        Some(path) => catalog::load_services_file(path)?,
        None => catalog::default_services(),
    };
    Ok(generate(&services, &config.options()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_preserves_service_order() {
        let services = catalog::default_services();
        let options = GenerateOptions {
            seed: Some(99),
            ..GenerateOptions::default()
        };
        let (report, skipped) = generate(&services, &options);

        assert!(skipped.is_empty());
        let names: Vec<_> = report.services.iter().map(|s| s.name.clone()).collect();
        let expected: Vec<_> = services.iter().map(|s| s.name.clone()).collect();
        assert_eq!(names, expected);
    }

    #[test]
    fn test_bad_service_is_skipped_not_fatal() {
        let services = vec![
            Service::new("frontend", "Go", &["main.go"], "frontend:v1.0.0"),
            Service::new("ghost", "Go", &[], "ghost:v1.0.0"),
        ];
        let (report, skipped) = generate(&services, &GenerateOptions::default());

        assert_eq!(report.services.len(), 1);
        assert_eq!(skipped.len(), 1);
        assert_eq!(skipped[0].service, "ghost");
    }

    #[test]
    fn test_seeded_runs_agree_on_identifiers() {
        let services = catalog::default_services();
        let options = GenerateOptions {
            seed: Some(2024),
            ..GenerateOptions::default()
        };
        let (first, _) = generate(&services, &options);
        let (second, _) = generate(&services, &options);

        let ids = |report: &SecurityReport| -> Vec<String> {
            report
                .services
                .iter()
                .flat_map(|s| s.findings.iter().map(|f| f.id.clone()))
                .collect()
        };
        assert_eq!(ids(&first), ids(&second));
        assert_eq!(first.summary, second.summary);
    }
}
