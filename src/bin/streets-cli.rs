use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use serde_json::Value;

use colorful_streets::config::{load_config, ObservabilityConfig};
use colorful_streets::observability::logging;
use colorful_streets::StreetClassifier;

#[derive(Parser)]
#[command(name = "streets-cli")]
#[command(about = "Classify street names and inspect a Colorful Streets server", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the color of each street name
    Classify {
        names: Vec<String>,

        /// Use the rules of this config file instead of the built-in ones
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Show the rule that decided each name
        #[arg(long)]
        explain: bool,
    },
    /// List the rules in priority order
    Legend {
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Classify names through a running server
    Remote {
        names: Vec<String>,

        #[arg(short, long, default_value = "http://localhost:8080")]
        url: String,
    },
    /// Show the status of a running server
    Status {
        #[arg(short, long, default_value = "http://localhost:8080")]
        url: String,
    },
    /// Validate a config file
    Check { config: PathBuf },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    logging::init_logging(&ObservabilityConfig {
        log_level: "warn".to_string(),
        ..Default::default()
    })?;

    match cli.command {
        Commands::Classify { names, config, explain } => {
            let classifier = classifier(config.as_deref())?;
            for name in &names {
                let color = classifier.classify(name);
                if explain {
                    match classifier.matching_rule(name) {
                        Some((priority, rule)) => {
                            println!("{}\t{}\trule {}: {}", name, color, priority, rule.pattern())
                        }
                        None => println!("{}\t{}\tdefault", name, color),
                    }
                } else {
                    println!("{}\t{}", name, color);
                }
            }
        }
        Commands::Legend { config } => {
            let classifier = classifier(config.as_deref())?;
            for (i, rule) in classifier.rules().iter().enumerate() {
                println!("{:>2}  {}  {}", i + 1, rule.color(), rule.pattern());
            }
            println!("--  {}  (default)", classifier.default_color());
        }
        Commands::Remote { names, url } => {
            let client = reqwest::Client::new();
            for name in &names {
                let res = client
                    .get(format!("{}/api/classify", url))
                    .query(&[("name", name)])
                    .send()
                    .await?;
                print_response(res).await?;
            }
        }
        Commands::Status { url } => {
            let res = reqwest::get(format!("{}/api/status", url)).await?;
            print_response(res).await?;
        }
        Commands::Check { config } => match load_config(&config) {
            Ok(_) => println!("{}: ok", config.display()),
            Err(e) => {
                eprintln!("{}: {}", config.display(), e);
                std::process::exit(1);
            }
        },
    }

    Ok(())
}

fn classifier(config: Option<&Path>) -> Result<StreetClassifier, Box<dyn std::error::Error>> {
    match config {
        Some(path) => {
            let config = load_config(path)?;
            tracing::debug!(path = %path.display(), rules = config.classifier.rules.len(), "Loaded rules");
            Ok(StreetClassifier::from_config(&config.classifier)?)
        }
        None => Ok(StreetClassifier::default()),
    }
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: server returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        return Ok(());
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
