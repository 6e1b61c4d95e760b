//! ARP cache lookup tool
//!
//! Resolves addresses against the host neighbor table through
//! [`NeighborCache`], the same path library users take.
//!
//! # Usage
//!
//! ```bash
//! # MAC for an address on eth0
//! arpcache --interface eth0 lookup 192.168.1.1
//!
//! # Address for a MAC, with a custom neighbor table profile
//! arpcache --interface eth0 --profile /etc/sonic/arp-profile.json inverse aa:bb:cc:dd:ee:ff
//!
//! # Every binding on eth0
//! arpcache --interface eth0 dump
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use sonic_arpcache::{ArpProfile, NeighborCache, bindings};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, info};

#[derive(Parser, Debug)]
#[command(name = "arpcache")]
#[command(about = "Query the host ARP table for one interface", long_about = None)]
struct Args {
    /// Interface whose bindings are considered
    #[arg(short, long)]
    interface: String,

    /// JSON neighbor table profile (defaults to the built-in one for this OS)
    #[arg(long)]
    profile: Option<PathBuf>,

    /// Re-read the neighbor table before answering
    #[arg(long)]
    refresh: bool,

    /// Log level used when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Query,
}

#[derive(Subcommand, Debug)]
enum Query {
    /// Hardware address bound to ADDRESS
    Lookup { address: String },
    /// Network address bound to HW_ADDRESS
    Inverse { hw_address: String },
    /// All bindings on the interface
    Dump,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let args = Args::parse();
    init_logging(&args.log_level);

    let profile = match &args.profile {
        Some(path) => ArpProfile::load(path)
            .with_context(|| format!("Failed to load profile {}", path.display()))?,
        None => ArpProfile::native(),
    };
    debug!(command = %profile.command, args = ?profile.args, "Using neighbor table profile");

    let cache = NeighborCache::from_profile(&profile).context("Invalid neighbor table profile")?;

    let answer = match &args.command {
        Query::Lookup { address } => cache.lookup(&args.interface, address, args.refresh).await,
        Query::Inverse { hw_address } => {
            cache
                .inverse_lookup(&args.interface, hw_address, args.refresh)
                .await
        }
        Query::Dump => {
            let table = cache
                .refresh(&args.interface)
                .await
                .context("Failed to read neighbor table")?;
            info!(interface = %args.interface, bindings = table.len(), "Neighbor table read");
            for binding in bindings(&table) {
                println!("{}\t{}", binding.address, binding.hw_address);
            }
            return Ok(ExitCode::SUCCESS);
        }
    };

    match answer {
        Ok(value) => {
            println!("{}", value);
            Ok(ExitCode::SUCCESS)
        }
        Err(e) if e.is_not_found() => {
            eprintln!("{}", e);
            Ok(ExitCode::FAILURE)
        }
        Err(e) => Err(anyhow::Error::new(e).context("Failed to read neighbor table")),
    }
}

/// Initialize structured logging on stderr, leaving stdout for answers
fn init_logging(log_level: &str) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(true)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .init();
}
