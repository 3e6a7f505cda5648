//! precis CLI - text summarisation workspace
//!
//! The application logic is contained in lib.rs, and this file is responsible
//! for parsing arguments and handling top-level errors.

use std::path::PathBuf;

use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use colored::Colorize;

use precis::client::{AnalysisApi, AnalysisResult, HttpAnalysisClient, SentimentLabel};
use precis::options::{Algorithm, SummarizeOptions, SummaryLength};
use precis::{ui, Config};

#[derive(Parser)]
#[command(name = "precis")]
#[command(author, version, about = "TUI workspace for text summarisation", long_about = None)]
struct Cli {
    /// Base URL of the summarization service (overrides config)
    #[arg(long, global = true)]
    server: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Options shared by the one-shot commands.
#[derive(clap::Args)]
struct SummarizeArgs {
    /// Summarization algorithm
    #[arg(long, value_enum, default_value_t = Algorithm::FrequencyBased)]
    algorithm: Algorithm,
    /// Target length for abstractive summaries
    #[arg(long, value_enum, default_value_t = SummaryLength::Medium)]
    length: SummaryLength,
    /// Percentage of the original text to keep (extractive algorithms)
    #[arg(long, default_value_t = 40, value_parser = clap::value_parser!(u8).range(10..=80))]
    ratio: u8,
    /// Recognize named entities in the summary
    #[arg(long)]
    entities: bool,
    /// Analyze the sentiment of the source text
    #[arg(long)]
    sentiment: bool,
}

impl SummarizeArgs {
    fn into_options(self) -> SummarizeOptions {
        SummarizeOptions {
            algorithm: self.algorithm,
            summary_length: self.length,
            compression_ratio: self.ratio,
            recognize_entities: self.entities,
            analyze_sentiment: self.sentiment,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Summarise text from a file, or stdin when no file is given
    Text {
        file: Option<PathBuf>,
        #[command(flatten)]
        args: SummarizeArgs,
    },
    /// Summarise the contents of a webpage
    Url {
        url: String,
        #[command(flatten)]
        args: SummarizeArgs,
    },
    /// Fetch the preloaded sample text and summarise it
    Sample {
        #[command(flatten)]
        args: SummarizeArgs,
    },
    /// Generate shell completions
    Completions { shell: Shell },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if !atty::is(atty::Stream::Stdout) {
        colored::control::set_override(false);
    }

    let mut config = Config::load()?;
    if let Some(server) = cli.server {
        config.server.base_url = server;
    }

    match cli.command {
        Some(Commands::Text { file, args }) => {
            let text = read_source(file)?;
            let client = HttpAnalysisClient::new(config.server.base_url.clone())?;
            let result = client.submit_text(&text, &args.into_options()).await?;
            print_result(&result);
        }
        Some(Commands::Url { url, args }) => {
            println!("Fetching: {url}\n");
            let client = HttpAnalysisClient::new(config.server.base_url.clone())?;
            let result = client.submit_url(&url, &args.into_options()).await?;
            print_result(&result);
        }
        Some(Commands::Sample { args }) => {
            let client = HttpAnalysisClient::new(config.server.base_url.clone())?;
            let sample = client.fetch_sample().await?;
            println!("Summarising sample ({} characters)...\n", sample.len());
            let result = client.submit_text(&sample, &args.into_options()).await?;
            print_result(&result);
        }
        Some(Commands::Completions { shell }) => {
            clap_complete::generate(shell, &mut Cli::command(), "precis", &mut std::io::stdout());
        }
        None => {
            // Default: launch the TUI workspace
            ui::run(&config).await?;
        }
    }

    Ok(())
}

/// Read the text to summarise from a file or stdin.
fn read_source(file: Option<PathBuf>) -> anyhow::Result<String> {
    match file {
        Some(path) => Ok(std::fs::read_to_string(path)?),
        None => Ok(std::io::read_to_string(std::io::stdin().lock())?),
    }
}

fn print_result(result: &AnalysisResult) {
    println!("=== Summary ===\n");
    println!("{}", result.summary);

    if let Some(entities) = &result.entities {
        println!("\n🏷️  Entities:");
        if entities.is_empty() {
            println!("  (none found)");
        } else {
            for entity in entities {
                println!(
                    "  • {} [{}]",
                    entity.text.cyan(),
                    entity.label.as_str().dimmed()
                );
            }
        }
    }

    if let Some(sentiment) = &result.sentiment {
        let label = match sentiment.label {
            SentimentLabel::Positive => sentiment.label.as_str().green(),
            SentimentLabel::Negative => sentiment.label.as_str().red(),
            SentimentLabel::Neutral => sentiment.label.as_str().normal(),
        };
        println!("\n📈 Sentiment: {} ({:.2})", label, sentiment.score);
    }
}
