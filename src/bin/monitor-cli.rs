use std::collections::BTreeMap;

use clap::{Parser, Subcommand};
use serde::Deserialize;
use service_monitor::search::{Document, DocumentIndex, HttpDocumentIndex, SearchConfig};

#[derive(Parser)]
#[command(name = "monitor-cli")]
#[command(about = "Command-line client for the service monitor and search service", long_about = None)]
struct Cli {
    /// Base URL of the monitor.
    #[arg(short, long, default_value = "http://localhost:8080")]
    url: String,

    /// Base URL of the search service.
    #[arg(long, default_value = "http://localhost:8082")]
    search_url: String,

    /// Shared secret for the search service.
    #[arg(long, env = "SEARCH_SERVICE_SECRET", default_value = "changeme", hide_env_values = true)]
    secret: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show health, uptime and latency of every monitored service
    Status,
    /// Print the raw Prometheus exposition
    Metrics,
    /// Add a document to the search index
    Index {
        #[arg(long)]
        id: String,
        #[arg(long, default_value = "")]
        title: String,
        #[arg(long, default_value = "")]
        description: String,
    },
    /// Query the search index
    Search { query: String },
}

#[derive(Deserialize)]
struct StatusEntry {
    health: u8,
    latency: f64,
    uptime: f64,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let search = SearchConfig {
        base_url: cli.search_url,
        secret: cli.secret,
    };

    match cli.command {
        Commands::Status => {
            let res = client
                .get(format!("{}/status", cli.url))
                .send()
                .await?
                .error_for_status()?;
            let status: BTreeMap<String, StatusEntry> = res.json().await?;
            print_status(&status);
        }
        Commands::Metrics => {
            let res = client
                .get(format!("{}/metrics", cli.url))
                .send()
                .await?
                .error_for_status()?;
            print!("{}", res.text().await?);
        }
        Commands::Index {
            id,
            title,
            description,
        } => {
            let index = HttpDocumentIndex::from_config(&search)?;
            let ack = index
                .index(&Document {
                    id,
                    title,
                    description,
                })
                .await?;
            println!("{} {}", ack.status, ack.id);
        }
        Commands::Search { query } => {
            let index = HttpDocumentIndex::from_config(&search)?;
            let results = index.search(&query).await?;
            println!("{} hit(s)", results.total_hits);
            for hit in results.hits {
                println!("{:>8.3}  {}", hit.score, hit.id);
            }
        }
    }

    Ok(())
}

fn print_status(status: &BTreeMap<String, StatusEntry>) {
    println!("{:<16} {:<6} {:>12} {:>14}", "SERVICE", "STATUS", "UPTIME (s)", "LATENCY (ms)");
    for (service, entry) in status {
        if entry.health == 1 {
            println!(
                "{:<16} {:<6} {:>12.0} {:>14.1}",
                service, "UP", entry.uptime, entry.latency
            );
        } else {
            println!("{:<16} {:<6} {:>12} {:>14}", service, "DOWN", "-", "-");
        }
    }
}
