use std::process::ExitCode;

use clap::{Parser, Subcommand};
use reqwest::{Method, RequestBuilder};
use serde_json::Value;

#[derive(Parser)]
#[command(name = "posts-cli")]
#[command(about = "Command-line client for the posts proxy", long_about = None)]
struct Cli {
    /// Base URL of a running proxy.
    #[arg(short, long, default_value = "http://localhost:5000")]
    url: String,

    /// Route prefix the proxy serves posts under.
    #[arg(short, long, default_value = "/posts")]
    prefix: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List all posts
    List,
    /// Fetch a single post
    Get { id: String },
    /// Create a post from a JSON document
    Create {
        #[arg(long)]
        json: String,
    },
    /// Replace a post with a JSON document
    Update {
        id: String,
        #[arg(long)]
        json: String,
    },
    /// Delete a post
    Delete { id: String },
    /// Print the OpenAPI document
    Docs {
        #[arg(long, default_value = "/api-docs")]
        docs_path: String,
    },
}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();
    let base = format!("{}{}", cli.url.trim_end_matches('/'), cli.prefix);

    let request = match cli.command {
        Commands::List => client.request(Method::GET, &base),
        Commands::Get { id } => client.request(Method::GET, format!("{base}/{id}")),
        Commands::Create { json } => with_json(client.request(Method::POST, &base), &json)?,
        Commands::Update { id, json } => {
            with_json(client.request(Method::PUT, format!("{base}/{id}")), &json)?
        }
        Commands::Delete { id } => client.request(Method::DELETE, format!("{base}/{id}")),
        Commands::Docs { docs_path } => client.get(format!(
            "{}{}/openapi.json",
            cli.url.trim_end_matches('/'),
            docs_path
        )),
    };

    print_response(request.send().await?).await
}

fn with_json(request: RequestBuilder, raw: &str) -> Result<RequestBuilder, serde_json::Error> {
    let body: Value = serde_json::from_str(raw)?;
    Ok(request.json(&body))
}

/// Print the reply; non-2xx replies go to stderr and yield a failure exit code.
async fn print_response(res: reqwest::Response) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let status = res.status();
    let text = res.text().await?;

    let rendered = match serde_json::from_str::<Value>(&text) {
        Ok(json) => serde_json::to_string_pretty(&json)?,
        Err(_) => text,
    };

    if succeeded(status) {
        println!("{rendered}");
        Ok(ExitCode::SUCCESS)
    } else {
        eprintln!("Error: proxy returned status {status}");
        eprintln!("{rendered}");
        Ok(ExitCode::FAILURE)
    }
}

/// Only 2xx replies count as success; the proxy reports failures as
/// `{"status": "Failed"}` with a non-2xx status.
fn succeeded(status: reqwest::StatusCode) -> bool {
    status.is_success()
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;

    #[test]
    fn failed_proxy_replies_are_not_success() {
        assert!(succeeded(StatusCode::OK));
        assert!(!succeeded(StatusCode::NOT_FOUND));
        assert!(!succeeded(StatusCode::BAD_GATEWAY));
    }

    #[test]
    fn cli_parses_update_command() {
        let cli = Cli::try_parse_from(["posts-cli", "update", "3", "--json", "{}"]).unwrap();
        assert!(matches!(cli.command, Commands::Update { ref id, .. } if id == "3"));
        assert_eq!(cli.url, "http://localhost:5000");
    }
}
