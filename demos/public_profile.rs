//! Look up a public Google+ profile and its recent public posts.
//!
//! ```sh
//! GOOGLE_PLUS_API_KEY=AIza... cargo run --example public_profile -- 109813896768294978296
//! ```

use clap::Parser;
use google_plus::{Client, ClientConfig, ListOptions};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "public_profile")]
#[command(about = "Fetch a Google+ profile with an API key", long_about = None)]
struct Args {
    /// Person id to look up
    user_id: String,

    /// API key for unauthenticated requests
    #[arg(long, env = "GOOGLE_PLUS_API_KEY")]
    api_key: Option<String>,

    /// TOML configuration file (overrides --api-key)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of recent activities to list
    #[arg(short = 'n', long, default_value_t = 5)]
    activities: u32,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    let config = match (&args.config, args.api_key) {
        (Some(path), _) => ClientConfig::from_file(path)?,
        (None, Some(api_key)) => ClientConfig::new().with_api_key(api_key),
        (None, None) => anyhow::bail!("Pass --api-key, set GOOGLE_PLUS_API_KEY or use --config"),
    };
    let client = Client::new(config)?;

    let person = client.get_person(&args.user_id).await?;
    println!("{}", serde_json::to_string_pretty(&person)?);

    let feed = client
        .list_activities(&args.user_id, &ListOptions::new().max_results(args.activities))
        .await?;
    if let Some(items) = feed["items"].as_array() {
        for item in items {
            println!(
                "{}  {}",
                item["published"].as_str().unwrap_or("-"),
                item["title"].as_str().unwrap_or("(untitled)")
            );
        }
    }

    Ok(())
}
