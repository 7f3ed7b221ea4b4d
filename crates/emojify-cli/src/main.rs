//! CLI binary for generating emojis from a prompt.

mod command;
mod session;

use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};

use emojify_client::{ClientConfig, EmojiService, HttpEmojiService};
use emojify_screen::{PromptScreen, DEFAULT_EMOJI_COUNT};

#[derive(Parser)]
#[command(name = "emojify", version, about = "Get emojis from a prompt")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Base URL of the emoji service (overrides EMOJIFY_BASE_URL)
    #[arg(short, long, global = true)]
    endpoint: Option<String>,

    /// Request timeout in seconds (overrides EMOJIFY_TIMEOUT_SECS)
    #[arg(long, global = true)]
    timeout_secs: Option<u64>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Start an interactive session (default)
    Interactive,

    /// Generate emojis for a single prompt and exit
    Generate {
        /// The sentence to turn into emojis
        #[arg(short, long)]
        prompt: String,

        /// Number of emojis to ask for
        #[arg(short = 'n', long, default_value = DEFAULT_EMOJI_COUNT)]
        count: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Logs go to stderr so results can be piped
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        tracing_subscriber::EnvFilter::new(if cli.verbose { "debug" } else { "info" })
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let service = build_service(cli.endpoint.as_deref(), cli.timeout_secs)?;

    match cli.command.unwrap_or(Commands::Interactive) {
        Commands::Interactive => session::run(service).await?,
        Commands::Generate { prompt, count } => {
            cmd_generate(service.as_ref(), prompt, count).await?;
        }
    }

    Ok(())
}

fn build_service(
    endpoint: Option<&str>,
    timeout_secs: Option<u64>,
) -> anyhow::Result<Arc<dyn EmojiService>> {
    let mut config = ClientConfig::from_env()?;
    if let Some(url) = endpoint {
        config = config.with_base_url(url);
    }
    if let Some(secs) = timeout_secs {
        config = config.with_timeout(Duration::from_secs(secs));
    }
    tracing::debug!(endpoint = %config.endpoint(), timeout = ?config.timeout, "client configured");
    Ok(Arc::new(HttpEmojiService::new(&config)?))
}

async fn cmd_generate(
    service: &dyn EmojiService,
    prompt: String,
    count: String,
) -> anyhow::Result<()> {
    let mut screen = PromptScreen::new();
    screen.set_prompt(prompt);
    screen.set_emoji_count(count);

    if screen.submit(service).await.is_err() {
        for notice in screen.take_notices() {
            eprintln!("{notice}");
        }
        std::process::exit(1);
    }

    if let Some(emojis) = screen.results().last() {
        println!("{emojis}");
    }
    Ok(())
}
