mod cli;
mod presets;

use std::path::PathBuf;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use clap_complete::{generate, Shell};

use cli::generate::GenerateParams;

#[derive(Parser)]
#[command(
    name = "chainsmith",
    about = "Forges mock code-to-cloud security data for the dashboard",
    version
)]
enum Cli {
    /// Generate the security findings report with connected chains
    Generate(GenerateArgs),
    /// Generate base-image scan data
    BaseImages(DatasetArgs),
    /// Generate the technology-stack profile
    Technologies(DatasetArgs),
    /// Generate every dashboard dataset in one run
    Bundle(GenerateArgs),
    /// Print the built-in service catalogue
    Services,
    Init(InitArgs),
    /// Generate shell completion scripts
    Completions(CompletionsArgs),
}

#[derive(Parser)]
struct GenerateArgs {
    #[arg(long, help = "Path to a configuration file (default: chainsmith.toml)")]
    config: Option<PathBuf>,

    #[arg(long, help = "JSON file overriding the built-in service catalogue")]
    services: Option<PathBuf>,

    #[arg(long, help = "Master seed for reproducible output")]
    seed: Option<u64>,

    #[arg(
        long,
        help = "Probability that a chain reaches the runtime stage (0.0 - 1.0)"
    )]
    runtime_probability: Option<f64>,

    #[arg(long, short, help = "Output directory (repeatable, overrides config)")]
    out: Vec<PathBuf>,

    #[arg(long, help = "Write compact JSON instead of pretty-printed")]
    compact: bool,

    #[arg(long, short, help = "Suppress the run summary")]
    quiet: bool,
}

#[derive(Parser)]
struct DatasetArgs {
    #[arg(long, help = "Path to a configuration file (default: chainsmith.toml)")]
    config: Option<PathBuf>,

    #[arg(long, help = "Master seed for reproducible output")]
    seed: Option<u64>,

    #[arg(long, short, help = "Output directory (repeatable, overrides config)")]
    out: Vec<PathBuf>,

    #[arg(long, help = "Write compact JSON instead of pretty-printed")]
    compact: bool,

    #[arg(long, short, help = "Suppress the run summary")]
    quiet: bool,
}

#[derive(Parser)]
struct InitArgs {
    #[arg(
        long,
        default_value = "demo",
        value_parser = ["demo", "ci", "compact"],
        help = "Configuration preset: demo, ci, compact"
    )]
    preset: String,

    #[arg(long, help = "Overwrite existing chainsmith.toml if it already exists")]
    force: bool,
}

#[derive(Parser)]
struct CompletionsArgs {
    #[arg(help = "Target shell: bash, zsh, fish, elvish, powershell")]
    shell: Shell,
}

impl GenerateArgs {
    fn params(&self) -> GenerateParams<'_> {
        GenerateParams {
            config_path: self.config.as_deref(),
            services_file: self.services.as_deref(),
            seed: self.seed,
            runtime_probability: self.runtime_probability,
            out_dirs: &self.out,
            compact: self.compact,
            quiet: self.quiet,
        }
    }
}

fn main() -> Result<()> {
    match Cli::parse() {
        Cli::Generate(args) => cli::generate::run_generate(&args.params()),
        Cli::BaseImages(args) => cli::generate::run_base_images(
            args.config.as_deref(),
            args.seed,
            &args.out,
            args.compact,
            args.quiet,
        ),
        Cli::Technologies(args) => cli::generate::run_technologies(
            args.config.as_deref(),
            args.seed,
            &args.out,
            args.compact,
            args.quiet,
        ),
        Cli::Bundle(args) => cli::generate::run_bundle(&args.params()),
        Cli::Services => cli::generate::run_services(),
        Cli::Init(args) => cli::init::run_init(&args.preset, args.force),
        Cli::Completions(args) => {
            generate(
                args.shell,
                &mut Cli::command(),
                "chainsmith",
                &mut std::io::stdout(),
            );
            Ok(())
        }
    }
}
