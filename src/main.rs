use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::{Parser, Subcommand, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};

use wiki_extractor::output::write_artifact;
use wiki_extractor::{ExtractionResult, Extractor, ResolutionPolicy, Settings};

#[derive(Parser)]
#[command(name = "wiki_extractor", about = "Wikipedia infobox + article text extractor")]
struct Cli {
    /// How a name is matched to an article (overrides WIKI_RESOLUTION)
    #[arg(long, global = true, value_enum)]
    policy: Option<Policy>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum Policy {
    /// Exact title lookup, suggestions on a miss
    Direct,
    /// Always take the top search result
    TopSearch,
}

impl From<Policy> for ResolutionPolicy {
    fn from(p: Policy) -> Self {
        match p {
            Policy::Direct => ResolutionPolicy::Direct,
            Policy::TopSearch => ResolutionPolicy::TopSearch,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Extract an article and write <Title>_output.txt
    Fetch {
        /// Person name, e.g. `Marie Curie`
        #[arg(required = true)]
        name: Vec<String>,
        /// Output directory (overrides WIKI_OUTPUT_DIR)
        #[arg(short, long)]
        out_dir: Option<PathBuf>,
    },
    /// Extract an article and print it
    Show {
        #[arg(required = true)]
        name: Vec<String>,
        /// Print the whole result as JSON
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();

    let mut settings = Settings::load()?;
    if let Some(policy) = cli.policy {
        settings.resolution = policy.into();
    }

    let json_output = matches!(cli.command, Commands::Show { json: true, .. });

    let result = match cli.command {
        Commands::Fetch { name, out_dir } => {
            let dir = out_dir.unwrap_or_else(|| settings.output_dir.clone());
            let extracted = run_extraction(&settings, &name.join(" ")).await?;
            let path = write_artifact(&dir, &extracted).await?;
            println!("Done! Written to {}", path.display());
            Ok(())
        }
        Commands::Show { name, json } => {
            let extracted = run_extraction(&settings, &name.join(" ")).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&extracted)?);
            } else {
                println!("{}", extracted.full_text);
            }
            Ok(())
        }
    };

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 && !json_output {
        println!("\nDone in {}", format_duration(elapsed));
    }

    result
}

async fn run_extraction(settings: &Settings, name: &str) -> anyhow::Result<ExtractionResult> {
    let extractor = Extractor::from_settings(settings)?;

    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg} [{elapsed}]")?);
    pb.set_message(format!("Fetching Wikipedia for: {}", name.trim()));
    pb.enable_steady_tick(Duration::from_millis(100));

    let extracted = extractor.extract(name).await;
    pb.finish_and_clear();

    Ok(extracted?)
}

fn format_duration(d: std::time::Duration) -> String {
    let secs = d.as_secs();
    if secs < 60 {
        format!("{:.1}s", d.as_secs_f64())
    } else if secs < 3600 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{}h {}m {}s", secs / 3600, (secs % 3600) / 60, secs % 60)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn durations() {
        assert_eq!(format_duration(Duration::from_millis(2500)), "2.5s");
        assert_eq!(format_duration(Duration::from_secs(125)), "2m 5s");
        assert_eq!(format_duration(Duration::from_secs(3725)), "1h 2m 5s");
    }
}
