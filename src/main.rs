// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! Mustekala CLI - Headless Web Client
//!
//! Example usage and demonstration of the mustekala library.

use std::env;
use std::process::ExitCode;

use mustekala::{Client, ParamValue};

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("mustekala=info".parse().unwrap()),
        )
        .init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        print_usage();
        return ExitCode::from(1);
    }

    match args[1].as_str() {
        "fetch" => {
            if args.len() < 3 {
                eprintln!("Usage: mustekala fetch <url>");
                return ExitCode::from(1);
            }
            fetch_url(&args[2]).await
        }
        "submit" => {
            if args.len() < 3 {
                eprintln!("Usage: mustekala submit <url> [name=value]...");
                return ExitCode::from(1);
            }
            submit_form(&args[2], &args[3..]).await
        }
        "--help" | "-h" | "help" => {
            print_usage();
            ExitCode::SUCCESS
        }
        "--version" | "-v" | "version" => {
            println!("mustekala {}", env!("CARGO_PKG_VERSION"));
            ExitCode::SUCCESS
        }
        cmd => {
            eprintln!("Unknown command: {}", cmd);
            print_usage();
            ExitCode::from(1)
        }
    }
}

fn print_usage() {
    println!(
        r#"Mustekala - Headless Web Client Session Core

USAGE:
    mustekala <COMMAND> [OPTIONS]

COMMANDS:
    fetch <url>                     Fetch a URL and print status and headers
    submit <url> [name=value]...    POST a form and print the response status
    help                            Show this help
    version                         Show version

Redirects are reported, not followed; pass RUST_LOG=mustekala=debug for
request tracing."#
    );
}

async fn fetch_url(url: &str) -> ExitCode {
    let client = match Client::new() {
        Ok(client) => client,
        Err(e) => {
            eprintln!("Failed to create client: {}", e);
            return ExitCode::from(1);
        }
    };

    match client.get(url).await {
        Ok(response) => {
            println!("{} {}", response.status_code(), response.url_str());
            for (name, value) in response.headers.iter() {
                println!("{}: {}", name, value.to_str().unwrap_or("<binary>"));
            }
            println!();
            println!("{}", response.text_lossy());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Request failed: {}", e);
            ExitCode::from(1)
        }
    }
}

async fn submit_form(url: &str, fields: &[String]) -> ExitCode {
    let client = match Client::new() {
        Ok(client) => client,
        Err(e) => {
            eprintln!("Failed to create client: {}", e);
            return ExitCode::from(1);
        }
    };

    let parameters: Vec<(String, ParamValue)> = fields
        .iter()
        .filter_map(|field| {
            field
                .split_once('=')
                .map(|(name, value)| (name.to_string(), ParamValue::from(value)))
        })
        .collect();

    match client.post(url, parameters).await {
        Ok(response) => {
            println!("{} {}", response.status_code(), response.url_str());
            if response.is_redirect() {
                if let Some(location) = response.header("location") {
                    println!("Redirect target: {}", location);
                }
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Request failed: {}", e);
            ExitCode::from(1)
        }
    }
}
