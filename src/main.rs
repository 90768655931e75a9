use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};
use tracing::info;

use podforge::core::script::{MAX_TARGET_SECONDS, MIN_TARGET_SECONDS};
use podforge::pipeline::{self, EpisodeRequest};
use podforge::{PodcastMode, Settings};

/// CLI-facing generation mode. Keeps the clap coupling out of the library
/// data model.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum ModeArg {
    Solo,
    SingleLlm,
    MultiAgent,
}

impl From<ModeArg> for PodcastMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Solo => PodcastMode::Solo,
            ModeArg::SingleLlm => PodcastMode::SingleLlm,
            ModeArg::MultiAgent => PodcastMode::MultiAgent,
        }
    }
}

/// podforge - Turn documents into multi-speaker podcast episodes
#[derive(Parser, Debug)]
#[command(name = "podforge")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate a podcast episode from a document
    Generate {
        /// Input document (.txt, .md, .html)
        #[arg(short, long)]
        input: PathBuf,

        /// Target duration in seconds
        #[arg(short, long, default_value_t = 300,
              value_parser = clap::value_parser!(u32).range(MIN_TARGET_SECONDS as i64..=MAX_TARGET_SECONDS as i64))]
        duration: u32,

        /// Generation mode
        #[arg(short, long, value_enum, default_value = "solo")]
        mode: ModeArg,

        /// Output directory (defaults to PODFORGE_OUTPUT_DIR)
        #[arg(short, long = "out")]
        out: Option<PathBuf>,

        /// Episode title (skips the title generation call)
        #[arg(short, long)]
        title: Option<String>,
    },

    /// List available synthesis voices
    Voices,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file if it exists (must be done before config loading)
    let _ = dotenvy::dotenv();

    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let settings = Settings::from_env().context("failed to load configuration")?;

    match cli.command {
        Commands::Generate {
            input,
            duration,
            mode,
            out,
            title,
        } => {
            let output_dir = out.unwrap_or_else(|| settings.output_dir.clone());
            let result = pipeline::run_episode(
                &settings,
                EpisodeRequest {
                    input,
                    mode: mode.into(),
                    target_duration_seconds: duration,
                    title,
                    output_dir,
                },
            )
            .await
            .context("episode generation failed")?;

            println!("Episode generated");
            println!("  Title:    {}", result.script.meta().title);
            println!(
                "  Duration: {:.1}s estimated ({} words)",
                result.script.estimated_duration_seconds(),
                result.script.total_words()
            );
            println!("  Script:   {}", result.script_path.display());
            println!("  Audio:    {}", result.audio_path.display());
            println!("  LLM cost: ${:.4}", result.llm_cost_usd);
        }
        Commands::Voices => {
            let voices = pipeline::list_voices(&settings)
                .await
                .context("failed to list voices")?;
            info!(count = voices.len(), "voices listed");
            println!("Available voices:");
            for voice in &voices {
                println!(
                    "  {} ({}, {} Hz)",
                    voice.name, voice.gender, voice.natural_sample_rate_hertz
                );
            }
        }
    }

    Ok(())
}
