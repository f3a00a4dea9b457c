mod analyze_cmd;
mod history_cmd;
mod sop_cmd;

use anyhow::Result;
use clap::{Parser, Subcommand};

use reelscope_config::{provider_config_from_env, ProviderConfig};
use reelscope_core::ProviderKind;

#[derive(Parser)]
#[command(name = "reelscope")]
#[command(about = "ReelScope — reverse-engineer viral short videos with an LLM")]
#[command(version)]
struct Cli {
    /// Provider kind: gemini or openai
    #[arg(long, global = true)]
    provider: Option<String>,

    /// API key (overrides REELSCOPE_API_KEY)
    #[arg(long, global = true)]
    api_key: Option<String>,

    /// Provider base URL (proxies / compatible endpoints)
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Model name to request
    #[arg(long, global = true)]
    model: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Upload a video file and run the structured analysis
    Analyze(analyze_cmd::AnalyzeArgs),
    /// Extract script material from a remote video URL
    ExtractUrl {
        /// The video page URL
        url: String,
    },
    /// Generate the 8-step SOP script for a niche/topic
    GenerateSop(sop_cmd::SopArgs),
    /// Manage saved analyses
    #[command(subcommand)]
    History(history_cmd::HistoryCommand),
    /// Manage history categories
    #[command(subcommand)]
    Categories(history_cmd::CategoryCommand),
}

impl Cli {
    /// Env config with CLI flag overrides applied on top.
    fn provider_config(&self) -> ProviderConfig {
        let mut config = provider_config_from_env();
        if let Some(provider) = &self.provider {
            config.provider = match provider.to_lowercase().as_str() {
                "openai" | "openai_compatible" | "openai-compatible" => {
                    ProviderKind::OpenAiCompatible
                }
                _ => ProviderKind::Gemini,
            };
        }
        if let Some(key) = &self.api_key {
            config.user_api_key = key.clone();
        }
        if let Some(base_url) = &self.base_url {
            config.base_url = base_url.clone();
        }
        if let Some(model) = &self.model {
            config.model_name = model.clone();
        }
        config
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = cli.provider_config();

    match cli.command {
        Commands::Analyze(args) => analyze_cmd::run(&config, args).await,
        Commands::ExtractUrl { url } => {
            let material = reelscope_providers::extract_url_content(&config, &url).await?;
            println!("{material}");
            Ok(())
        }
        Commands::GenerateSop(args) => sop_cmd::run(&config, args).await,
        Commands::History(command) => history_cmd::run_history(command),
        Commands::Categories(command) => history_cmd::run_categories(command),
    }
}
