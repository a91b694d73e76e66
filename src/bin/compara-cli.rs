use clap::{Parser, Subcommand};
use serde_json::Value;

#[derive(Parser)]
#[command(name = "compara-cli")]
#[command(about = "Command-line client for the Compara+ search proxy", long_about = None)]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8080")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search products through the proxy
    Search {
        /// Search terms
        query: String,

        /// Number of products (the proxy clamps to 1..=50)
        #[arg(short, long)]
        limit: Option<u32>,

        /// Upstream sort order, e.g. price_asc
        #[arg(short, long)]
        sort: Option<String>,
    },
    /// Check proxy status
    Health,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let base = cli.url.trim_end_matches('/');

    let res = match cli.command {
        Commands::Search { query, limit, sort } => {
            let mut params = vec![("q", query)];
            if let Some(limit) = limit {
                params.push(("limit", limit.to_string()));
            }
            if let Some(sort) = sort {
                params.push(("sort", sort));
            }
            client
                .get(format!("{}/search", base))
                .query(&params)
                .send()
                .await?
        }
        Commands::Health => client.get(format!("{}/health", base)).send().await?,
    };

    print_response(res).await
}

async fn print_response(res: reqwest::Response) -> Result<(), Box<dyn std::error::Error>> {
    let status = res.status();
    if !status.is_success() {
        eprintln!("Error: proxy returned status {}", status);
        if let Ok(text) = res.text().await {
            eprintln!("Response: {}", text);
        }
        return Ok(());
    }

    let json: Value = res.json().await?;
    println!("{}", serde_json::to_string_pretty(&json)?);
    Ok(())
}
