use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use colored::Colorize;
use rand::rngs::StdRng;
use rand::SeedableRng;

use chainsmith::catalog;
use chainsmith::config::ChainsmithConfig;
use chainsmith::engine::{generate_base_images, generate_technologies};
use chainsmith::output::{render_summary, write_fanout};

pub const SECURITY_FILE: &str = "security_findings.json";
pub const BASE_IMAGES_FILE: &str = "base_images_data.json";
pub const TECHNOLOGIES_FILE: &str = "technologies_data.json";

pub struct GenerateParams<'a> {
    pub config_path: Option<&'a Path>,
    pub services_file: Option<&'a Path>,
    pub seed: Option<u64>,
    pub runtime_probability: Option<f64>,
    pub out_dirs: &'a [PathBuf],
    pub compact: bool,
    pub quiet: bool,
}

fn load_config(config_path: Option<&Path>) -> Result<ChainsmithConfig> {
    match config_path {
        Some(path) => ChainsmithConfig::load_from(path)
            .with_context(|| format!("Failed to load {}", path.display())),
        None => ChainsmithConfig::load().context("Failed to load chainsmith.toml"),
    }
}

fn resolve_dirs(config: &ChainsmithConfig, out_dirs: &[PathBuf]) -> Vec<PathBuf> {
    if out_dirs.is_empty() {
        config.output_dirs()
    } else {
        out_dirs.to_vec()
    }
}

fn announce(written: &[PathBuf], quiet: bool) {
    if quiet {
        return;
    }
    for path in written {
        println!("\u{2713} wrote {}", path.display());
    }
}

pub fn run_generate(params: &GenerateParams) -> Result<()> {
    let mut config = load_config(params.config_path)?;

    if let Some(seed) = params.seed {
        config.generate.seed = Some(seed);
    }
    if let Some(probability) = params.runtime_probability {
        if !(0.0..=1.0).contains(&probability) {
            anyhow::bail!("--runtime-probability must be within [0, 1], got {probability}");
        }
        config.generate.runtime_probability = probability;
    }

    let services = match params.services_file {
        Some(path) => catalog::load_services_file(path)
            .with_context(|| format!("Failed to load services from {}", path.display()))?,
        None => match &config.catalog.services_file {
            Some(path) => catalog::load_services_file(path)
                .with_context(|| format!("Failed to load services from {}", path.display()))?,
            None => catalog::default_services(),
        },
    };

    let (report, skipped) = chainsmith::generate(&services, &config.options());

    for skip in &skipped {
        eprintln!(
            "{} skipped {}: {}",
            "warning:".yellow().bold(),
            skip.service,
            skip.reason
        );
    }

    let dirs = resolve_dirs(&config, params.out_dirs);
    let pretty = config.output.pretty && !params.compact;
    let written = write_fanout(&report, SECURITY_FILE, &dirs, pretty)?;
    announce(&written, params.quiet);

    if !params.quiet {
        print!("{}", render_summary(&report));
    }

    Ok(())
}

pub fn run_base_images(
    config_path: Option<&Path>,
    seed: Option<u64>,
    out_dirs: &[PathBuf],
    compact: bool,
    quiet: bool,
) -> Result<()> {
    let config = load_config(config_path)?;
    let mut rng = rng_from(seed.or(config.generate.seed));
    let report = generate_base_images(&mut rng);

    let dirs = resolve_dirs(&config, out_dirs);
    let written = write_fanout(&report, BASE_IMAGES_FILE, &dirs, config.output.pretty && !compact)?;
    announce(&written, quiet);

    if !quiet {
        println!(
            "{} base images, {} vulnerabilities total",
            report.summary.total_images, report.summary.vulnerabilities.total
        );
    }

    Ok(())
}

pub fn run_technologies(
    config_path: Option<&Path>,
    seed: Option<u64>,
    out_dirs: &[PathBuf],
    compact: bool,
    quiet: bool,
) -> Result<()> {
    let config = load_config(config_path)?;
    let mut rng = rng_from(seed.or(config.generate.seed));
    let report = generate_technologies(&mut rng);

    let dirs = resolve_dirs(&config, out_dirs);
    let written = write_fanout(
        &report,
        TECHNOLOGIES_FILE,
        &dirs,
        config.output.pretty && !compact,
    )?;
    announce(&written, quiet);

    if !quiet {
        println!(
            "primary language {}, {} frameworks",
            report.primary_language,
            report.frameworks.len()
        );
    }

    Ok(())
}

/// Generate every dataset the dashboard consumes in one run.
pub fn run_bundle(params: &GenerateParams) -> Result<()> {
    run_generate(params)?;
    run_base_images(
        params.config_path,
        params.seed,
        params.out_dirs,
        params.compact,
        params.quiet,
    )?;
    run_technologies(
        params.config_path,
        params.seed,
        params.out_dirs,
        params.compact,
        params.quiet,
    )?;
    Ok(())
}

pub fn run_services() -> Result<()> {
    let services = catalog::default_services();

    println!("Built-in service catalogue ({}):", services.len());
    println!("{:<26} {:<10} {:<32} Files", "Name", "Language", "Image");
    println!("{}", "-".repeat(80));
    for service in &services {
        println!(
            "{:<26} {:<10} {:<32} {}",
            service.name,
            service.language,
            service.image,
            service.files.len()
        );
    }

    Ok(())
}

fn rng_from(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}
