//! Fruits CLI - Command-line client for the Fruits catalog HTTP API

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use reqwest::{Method, StatusCode, Url};
use serde::Deserialize;
use serde_json::json;
use tabled::{Table, Tabled};

const DEFAULT_URL: &str = "http://127.0.0.1:8080";

#[derive(Parser)]
#[command(name = "fruits")]
#[command(about = "Fruits catalog CLI", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Server base URL
    #[arg(long, env = "FRUITS_URL", default_value = DEFAULT_URL)]
    url: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a fruit
    Add {
        /// Fruit name
        #[arg(short, long)]
        name: String,

        /// Season (e.g. Spring, Summer, Fall, Winter)
        #[arg(short, long)]
        season: String,

        /// Emoji code point (e.g. U+1F34E)
        #[arg(short, long)]
        emoji: Option<String>,

        /// Explicit id (default: next in sequence)
        #[arg(long)]
        id: Option<i64>,
    },

    /// List all fruits
    List {
        /// Only fruits of this season
        #[arg(short, long)]
        season: Option<String>,
    },

    /// Find fruits by name (case-insensitive)
    Name { name: String },

    /// Find fruits by season (case-insensitive)
    Season { season: String },

    /// Replace a fruit's fields
    Update {
        id: i64,

        #[arg(short, long)]
        name: String,

        #[arg(short, long)]
        season: String,

        #[arg(short, long)]
        emoji: Option<String>,
    },

    /// Delete a fruit by id
    Delete { id: i64 },

    /// Delete every fruit
    DeleteAll {
        /// Skip confirmation
        #[arg(long)]
        yes: bool,
    },

    /// Show server status
    Status,
}

#[derive(Deserialize)]
struct Fruit {
    id: i64,
    name: String,
    #[serde(default)]
    emoji: Option<String>,
    season: String,
}

#[derive(Tabled)]
struct FruitRow {
    id: i64,
    name: String,
    emoji: String,
    season: String,
}

impl From<Fruit> for FruitRow {
    fn from(f: Fruit) -> Self {
        Self {
            id: f.id,
            name: f.name,
            emoji: f.emoji.unwrap_or_else(|| "-".to_string()),
            season: f.season,
        }
    }
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
    message: String,
}

struct ApiClient {
    base: Url,
    http: reqwest::Client,
}

impl ApiClient {
    fn new(base: &str) -> Result<Self> {
        Ok(Self {
            base: Url::parse(base).with_context(|| format!("Invalid server URL: {}", base))?,
            http: reqwest::Client::new(),
        })
    }

    /// Base URL joined with percent-encoded path segments
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| anyhow::anyhow!("Server URL cannot be a base: {}", self.base))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn call(
        &self,
        method: Method,
        url: Url,
        body: Option<serde_json::Value>,
    ) -> Result<reqwest::Response> {
        let mut request = self.http.request(method, url);
        if let Some(body) = body {
            request = request.json(&body);
        }

        let response = request
            .send()
            .await
            .context("Failed to connect to server")?;

        if response.status().is_success() {
            return Ok(response);
        }

        let status = response.status();
        match response.json::<ErrorBody>().await {
            Ok(err) => anyhow::bail!("HTTP {} ({}): {}", status.as_u16(), err.error, err.message),
            Err(_) => anyhow::bail!("HTTP {}", status),
        }
    }

    async fn fruits(&self, url: Url) -> Result<Vec<Fruit>> {
        self.call(Method::GET, url, None)
            .await?
            .json()
            .await
            .context("Failed to parse response")
    }
}

fn print_fruits(fruits: Vec<Fruit>) {
    if fruits.is_empty() {
        println!("{}", "No fruits found".yellow());
        return;
    }
    let rows: Vec<FruitRow> = fruits.into_iter().map(FruitRow::from).collect();
    println!("{}", Table::new(rows));
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let client = ApiClient::new(&cli.url)?;

    match cli.command {
        Commands::Add {
            name,
            season,
            emoji,
            id,
        } => {
            let body = json!({
                "id": id,
                "name": name,
                "season": season,
                "emoji": emoji,
            });
            let url = client.endpoint(&["api", "fruits", "add"])?;
            let fruit: Fruit = client
                .call(Method::POST, url, Some(body))
                .await?
                .json()
                .await
                .context("Failed to parse response")?;

            println!("{}", "✓ Fruit added".green().bold());
            println!();
            print_fruits(vec![fruit]);
        }

        Commands::List { season } => {
            let mut url = client.endpoint(&["api", "fruits"])?;
            if let Some(season) = season {
                url.query_pairs_mut().append_pair("season", &season);
            }
            print_fruits(client.fruits(url).await?);
        }

        Commands::Name { name } => {
            let url = client.endpoint(&["api", "fruits", &name])?;
            print_fruits(client.fruits(url).await?);
        }

        Commands::Season { season } => {
            let url = client.endpoint(&["api", "fruits", "season", &season])?;
            print_fruits(client.fruits(url).await?);
        }

        Commands::Update {
            id,
            name,
            season,
            emoji,
        } => {
            let body = json!({ "name": name, "season": season, "emoji": emoji });
            let url = client.endpoint(&["api", "fruits", &id.to_string()])?;
            let fruit: Fruit = client
                .call(Method::PUT, url, Some(body))
                .await?
                .json()
                .await
                .context("Failed to parse response")?;

            println!("{}", format!("✓ Fruit {} updated", id).green().bold());
            println!();
            print_fruits(vec![fruit]);
        }

        Commands::Delete { id } => {
            let url = client.endpoint(&["api", "fruits", &id.to_string()])?;
            client.call(Method::DELETE, url, None).await?;
            println!("{}", format!("✓ Fruit {} deleted", id).green().bold());
        }

        Commands::DeleteAll { yes } => {
            if !yes {
                println!(
                    "{}",
                    "Refusing to delete all fruits without --yes".yellow()
                );
                return Ok(());
            }
            let url = client.endpoint(&["api", "fruits"])?;
            client.call(Method::DELETE, url, None).await?;
            println!("{}", "✓ All fruits deleted".green().bold());
        }

        Commands::Status => {
            println!("{}", "Server Status".cyan().bold());
            println!();

            let url = client.endpoint(&["health"])?;
            match client.call(Method::GET, url, None).await {
                Ok(response) if response.status() == StatusCode::OK => {
                    let health: serde_json::Value = response.json().await?;
                    println!("  {} {}", "URL:".bold(), cli.url);
                    println!("  {} {}", "Status:".bold(), "ONLINE".green());
                    println!("  {} {}", "Version:".bold(), health["version"]);
                    println!("  {} {}", "Fruits:".bold(), health["fruits"]);
                }
                Ok(response) => {
                    println!("  {} {}", "Status:".bold(), response.status().as_str().yellow());
                }
                Err(e) => {
                    println!("  {} {}", "Status:".bold(), "ERROR".red());
                    println!("  {} {}", "Error:".bold(), e);
                }
            }
        }
    }

    Ok(())
}
