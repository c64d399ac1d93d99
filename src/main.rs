use clap::{Parser, ValueEnum};
use log::{error, info};
use std::io::Read;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

use console_dns_provider::auth::credentials::EnvCredentialManager;
use console_dns_provider::config::Config;
use console_dns_provider::providers::console::error::map_error;
use console_dns_provider::providers::console::{ConsoleDnsClient, ConsoleDnsProvider};
use console_dns_provider::{DNSProvider, DNSRecord, Error};

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Action {
    Get,
    Append,
    Set,
    Delete,
}

/// Manage console-dns records through the generic record interface.
///
/// Mutating actions read a JSON array of records from stdin. Every action
/// prints the resulting records as JSON.
#[derive(Parser, Debug)]
#[command(name = "console-dns-provider", version, about)]
struct Args {
    action: Action,

    /// Zone to operate on, with or without the trailing dot
    zone: String,
}

fn read_records() -> Result<Vec<DNSRecord>, Error> {
    let mut input = String::new();
    std::io::stdin()
        .read_to_string(&mut input)
        .map_err(|e| Error::InvalidInput(format!("reading stdin: {e}")))?;
    serde_json::from_str(&input).map_err(|e| Error::InvalidInput(format!("records: {e}")))
}

async fn run(provider: &dyn DNSProvider, args: &Args) -> Result<Vec<DNSRecord>, Error> {
    match args.action {
        Action::Get => provider.get_records(&args.zone).await,
        Action::Append => provider.append_records(&args.zone, read_records()?).await,
        Action::Set => provider.set_records(&args.zone, read_records()?).await,
        Action::Delete => provider.delete_records(&args.zone, read_records()?).await,
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = Config::from_env().map_err(|e| format!("CONSOLE_DNS_API_URL: {e}"))?;
    let client = ConsoleDnsClient::new(&config, Arc::new(EnvCredentialManager::new()))
        .map_err(map_error)?;
    let provider = ConsoleDnsProvider::new(client);

    match run(&provider, &args).await {
        Ok(records) => {
            info!("{:?} returned {} records", args.action, records.len());
            println!("{}", serde_json::to_string_pretty(&records)?);
            Ok(())
        }
        Err(e) => {
            error!("{:?} on zone {} failed: {e}", args.action, args.zone);
            Err(e.into())
        }
    }
}
