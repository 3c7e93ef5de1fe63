mod audit;
mod cli;

use anyhow::Context;
use clap::Parser;
use cli::{Cli, Commands};
use std::io::Read;
use token_service::{SigningConfig, TokenService};
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.json_logs);

    let config = SigningConfig::from_env().map_err(|e| {
        error!("Failed to load configuration: {}", e);
        e
    })?;
    let service = TokenService::from_config(&config).map_err(|e| {
        error!("Failed to build token service: {}", e);
        e
    })?;

    info!(
        issuer = service.issuer(),
        validity_hours = service.validity().num_hours(),
        issuer_policy = ?service.issuer_policy(),
        "Token service ready"
    );

    match cli.command {
        Commands::Issue { subject_id, label } => {
            let result = service.issue(&subject_id, &label);
            match &result {
                Ok(_) => audit::record_issued(&subject_id),
                Err(e) => audit::record_issue_failed(&subject_id, e),
            }
            println!("{}", result?);
        }
        Commands::Validate { token } => {
            let token = match token {
                Some(token) => token,
                None => read_stdin()?,
            };

            let result = service.validate(token.trim());
            audit::record_validation(&result);
            let claims = result?;
            println!("{}", serde_json::to_string_pretty(&claims)?);
        }
    }

    Ok(())
}

fn init_tracing(json_logs: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "token_tool=info,token_service=info".into());

    // Logs go to stderr so stdout carries only the token or claims.
    if json_logs {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn read_stdin() -> anyhow::Result<String> {
    let mut buffer = String::new();
    std::io::stdin()
        .read_to_string(&mut buffer)
        .context("failed to read token from stdin")?;
    Ok(buffer)
}
