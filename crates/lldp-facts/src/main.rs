//! lldp-facts entry point.
//!
//! Prints LLDP neighbor facts for the host's Ethernet interfaces on stdout,
//! either as `key=value` lines (external fact format) or as JSON. Logs go to
//! stderr.

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use tracing::{debug, error};

use lldp_facts::{
    config::DEFAULT_CONFIG_PATH, output, split_interface_list, FactRegistry, Facts,
    InterfaceSource, LldpFactsConfig,
};

#[derive(Parser, Debug)]
#[command(name = "lldp-facts", version)]
#[command(about = "Publish LLDP neighbor information as inventory facts", long_about = None)]
struct Args {
    /// Configuration file
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Comma-separated interface list (default: read from sysfs)
    #[arg(short, long)]
    interfaces: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    format: Format,

    /// Resolve and print a single fact
    #[arg(long, value_name = "KEY")]
    fact: Option<String>,

    /// lldptool name or path
    #[arg(long, value_name = "PATH")]
    lldptool: Option<String>,

    /// Run lldptool without sudo
    #[arg(long)]
    no_sudo: bool,

    /// Per-query timeout in seconds
    #[arg(long, value_name = "SECS")]
    timeout_secs: Option<u64>,

    /// Publish fact keys in lowercase
    #[arg(long)]
    lowercase_keys: bool,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    /// key=value lines
    Text,
    /// JSON object
    Json,
}

/// Initialize tracing/logging on stderr; RUST_LOG takes precedence.
fn init_logging(verbose: bool) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false),
        )
        .init();
}

/// Loads the config file and applies command line overrides.
fn build_config(args: &Args) -> anyhow::Result<LldpFactsConfig> {
    let mut config = LldpFactsConfig::load_or_default(&args.config)
        .with_context(|| format!("loading {}", args.config.display()))?;

    if let Some(list) = &args.interfaces {
        config.interfaces.list = Some(split_interface_list(list));
    }
    if let Some(tool) = &args.lldptool {
        config.lldptool.path = tool.clone();
    }
    if args.no_sudo {
        config.lldptool.use_sudo = false;
    }
    if let Some(secs) = args.timeout_secs {
        config.lldptool.timeout_secs = secs;
    }
    if args.lowercase_keys {
        config.facts.lowercase_keys = true;
    }

    config.validate()?;
    Ok(config)
}

async fn run(args: Args) -> anyhow::Result<()> {
    let config = build_config(&args)?;

    let source = config.interface_source();
    let interfaces = source.names().with_context(|| match &source {
        InterfaceSource::Sysfs(dir) => format!("listing interfaces in {}", dir.display()),
        InterfaceSource::List(_) => "reading interface list".to_string(),
    })?;
    debug!(?interfaces, "Host interfaces");

    let registry = FactRegistry::discover(&config.query_options(), interfaces)
        .with_lowercase_keys(config.facts.lowercase_keys);

    let facts: Facts = match args.fact.as_deref() {
        Some(key) => match registry.registered_key(key) {
            Some(key) => Facts::from([(key.to_string(), registry.get(key).await)]),
            None => {
                debug!(key = %key, "Fact not registered");
                Facts::new()
            }
        },
        None => registry.resolve_all().await,
    };

    let rendered = match args.format {
        Format::Text => output::render_text(&facts),
        Format::Json => output::render_json(&facts).context("serializing facts")?,
    };

    let mut stdout = std::io::stdout().lock();
    stdout.write_all(rendered.as_bytes())?;
    if args.format == Format::Json {
        writeln!(stdout)?;
    }
    stdout.flush()?;
    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("lldp-facts error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
