//! Prompt normalization binary.
//!
//! Reads a free-form video description from the command line (or stdin when
//! no arguments are given), normalizes it through Gemini, and prints the
//! validated prompt as pretty JSON on stdout.

use std::io::Read;

use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use veoprompt_gemini::GeminiClient;

#[tokio::main]
async fn main() {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing with colored output for dev, JSON for production
    let use_json = std::env::var("LOG_FORMAT")
        .map(|v| v.to_lowercase() == "json")
        .unwrap_or(false);

    let env_filter = EnvFilter::from_default_env()
        .add_directive("veoprompt_cli=info".parse().unwrap())
        .add_directive("veoprompt_gemini=info".parse().unwrap());

    if use_json {
        tracing_subscriber::registry()
            .with(fmt::layer().json())
            .with(env_filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_ansi(true)
                    .with_target(false)
                    .with_file(false)
                    .with_line_number(false),
            )
            .with(env_filter)
            .init();
    }

    let text = match read_input() {
        Some(text) => text,
        None => {
            error!("usage: veoprompt <video description>  (or pipe the description on stdin)");
            std::process::exit(2);
        }
    };

    let client = match GeminiClient::from_env() {
        Ok(client) => client,
        Err(e) => {
            error!("failed to initialize Gemini client: {}", e);
            std::process::exit(1);
        }
    };

    info!("normalizing description ({} chars)", text.len());

    let prompt = match client.normalize(&text).await {
        Ok(prompt) => prompt,
        Err(e) => {
            error!("normalization failed: {}", e);
            std::process::exit(1);
        }
    };

    match prompt.to_json_pretty() {
        Ok(json) => println!("{json}"),
        Err(e) => {
            error!("failed to serialize prompt: {}", e);
            std::process::exit(1);
        }
    }
}

fn read_input() -> Option<String> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    if !args.is_empty() {
        let joined = args.join(" ");
        return if joined.trim().is_empty() {
            None
        } else {
            Some(joined)
        };
    }

    let mut buffer = String::new();
    std::io::stdin().read_to_string(&mut buffer).ok()?;
    let trimmed = buffer.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
