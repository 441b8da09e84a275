use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use lookout::config::Config;
use lookout::registry::Registry;

#[derive(Parser)]
#[command(
    name = "lookout",
    version,
    about = "Concurrent fan-out user profile lookups with explicit caching",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log format (text, json)
    #[arg(long, global = true, default_value = "text")]
    log_format: String,

    /// Configuration file (TOML); falls back to environment variables
    #[arg(short, long, global = true)]
    config: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Look up several profiles concurrently and report in order
    Batch {
        /// Identifiers to look up
        #[arg(required = true)]
        identifiers: Vec<String>,

        /// Artificial per-lookup delay in milliseconds
        #[arg(long)]
        delay_ms: Option<u64>,

        /// Override the lookup service base URL
        #[arg(long)]
        base_url: Option<String>,
    },

    /// Look up a single profile through the cache
    User {
        /// Identifier to look up
        identifier: String,

        /// Bypass the profile cache
        #[arg(long, default_value = "false")]
        no_cache: bool,

        /// Override the lookup service base URL
        #[arg(long)]
        base_url: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    setup_tracing(&cli.log_format, cli.verbose)?;

    let mut config = match &cli.config {
        Some(path) => Config::from_file(std::path::Path::new(path))?,
        None => Config::from_env()?,
    };

    match cli.command {
        Commands::Batch {
            identifiers,
            delay_ms,
            base_url,
        } => {
            if let Some(delay_ms) = delay_ms {
                config.runner.simulated_delay_ms = delay_ms;
            }
            if let Some(base_url) = base_url {
                config.lookup.base_url = base_url;
            }

            tracing::info!(count = identifiers.len(), "Starting batch command");
            batch(config, identifiers).await?;
        }

        Commands::User {
            identifier,
            no_cache,
            base_url,
        } => {
            if no_cache {
                config.cache.enabled = false;
            }
            if let Some(base_url) = base_url {
                config.lookup.base_url = base_url;
            }

            tracing::info!(identifier = %identifier, "Starting user command");
            user(config, identifier).await?;
        }
    }

    Ok(())
}

fn setup_tracing(format: &str, verbose: bool) -> Result<()> {
    let env_filter = if verbose {
        tracing_subscriber::EnvFilter::new("lookout=debug,info")
    } else {
        tracing_subscriber::EnvFilter::new("lookout=info,warn")
    };

    match format {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().pretty())
                .init();
        }
    }

    Ok(())
}

async fn batch(config: Config, identifiers: Vec<String>) -> Result<()> {
    let registry = Registry::from_config(config)?;
    let report = registry.run_batch(identifiers).await;

    println!(
        "Completed {} lookups in {} ms ({} ok, {} failed)",
        report.total(),
        report.elapsed.as_millis(),
        report.success_count(),
        report.failure_count()
    );

    for outcome in &report.outcomes {
        match &outcome.result {
            Ok(profile) => println!("  {} -> {}", outcome.request, profile.summary()),
            Err(err) => println!("  {} -> error: {err}", outcome.request),
        }
    }

    if report.failure_count() > 0 {
        anyhow::bail!("{} of {} lookups failed", report.failure_count(), report.total());
    }

    Ok(())
}

async fn user(config: Config, identifier: String) -> Result<()> {
    let registry = Registry::from_config(config)?;
    let profile = registry.cached_lookup(&identifier).await?;

    println!("{}", profile.summary());
    if let Some(location) = &profile.location {
        println!("  location: {location}");
    }
    if let Some(blog) = &profile.blog {
        println!("  blog: {blog}");
    }
    if let Some(repos) = profile.public_repos {
        println!("  public repos: {repos}");
    }
    if let Some(followers) = profile.followers {
        println!("  followers: {followers}");
    }

    let stats = registry.cache().stats();
    tracing::debug!(hits = stats.hits, misses = stats.misses, "Cache stats");

    Ok(())
}
