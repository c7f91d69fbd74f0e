use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use colony_pigmentation::models::{AnalysisConfig, ConfigOverrides};
use colony_pigmentation::services::{average_files, run_analysis};

#[derive(Parser)]
#[command(name = "colony-pigmentation")]
#[command(about = "Quantify the pigmentation profile of photographed colonies")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze colony images and average their profiles
    Analyze {
        /// Images to analyze
        #[arg(short, long, num_args = 1.., required = true)]
        images: Vec<PathBuf>,

        /// Output directory for all artifacts
        #[arg(short, long)]
        output: PathBuf,

        /// YAML configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,

        #[command(flatten)]
        overrides: ConfigOverrides,

        /// Log every pipeline stage with its timing
        #[arg(long)]
        detailed_progress: bool,
    },
    /// Average previously written profile files
    Average {
        /// Output CSV file; the 1D histogram is written next to it
        #[arg(short, long)]
        output: PathBuf,

        /// Profile CSV files to average
        #[arg(required = true)]
        series: Vec<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Analyze {
            images,
            output,
            config,
            overrides,
            detailed_progress,
        }) => run_analyze_command(images, output, config, overrides, detailed_progress).await,
        Some(Commands::Average { output, series }) => {
            init_tracing("colony_pigmentation=info,colony_kit=warn");
            average_files(&series, &output)?;
            println!("Averaged {} series into {}", series.len(), output.display());
            Ok(())
        }
        None => {
            run_status_command();
            Ok(())
        }
    }
}

fn init_tracing(default_filter: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

async fn run_analyze_command(
    images: Vec<PathBuf>,
    output: PathBuf,
    config_file: Option<PathBuf>,
    overrides: ConfigOverrides,
    detailed_progress: bool,
) -> anyhow::Result<()> {
    init_tracing(if detailed_progress {
        "colony_pigmentation=debug,colony_kit=debug"
    } else {
        "colony_pigmentation=info,colony_kit=warn"
    });

    let mut config = match config_file {
        Some(path) => AnalysisConfig::load(&path)?,
        None => AnalysisConfig::default(),
    };
    overrides.apply(&mut config);

    let summary = run_analysis(config, images, &output).await?;
    println!(
        "Analyzed {} images into {}",
        summary.succeeded,
        output.display()
    );
    Ok(())
}

/// Display version, defaults and usage
fn run_status_command() {
    const VERSION: &str = env!("CARGO_PKG_VERSION");

    let defaults = AnalysisConfig::default();

    println!("colony-pigmentation v{VERSION}");
    println!("Colony segmentation and pigmentation profiling\n");

    println!("Default Parameters:");
    println!("  background key color  = {}", defaults.background_key_color);
    println!("  background threshold  = {}", defaults.background_threshold);
    println!("  pigmentation color    = {}", defaults.pigmentation_color);
    println!("  baseline pigmentation = {}", defaults.baseline_pigmentation);
    println!("  sample count          = {}", defaults.sample_count);
    println!("  roi height            = {}", defaults.roi_height);
    println!(
        "  workers               = {}",
        num_cpus::get().max(1)
    );

    println!("\nCommands:");
    println!("  colony-pigmentation analyze   Analyze images and average their profiles");
    println!("  colony-pigmentation average   Average previously written profiles");
    println!("\nRun 'colony-pigmentation --help' for more details.");
}
