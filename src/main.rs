use clap::Parser;
use color_eyre::eyre::{eyre, WrapErr};
use color_eyre::Result;
use env_logger::Env;
use log::info;
use std::net::Ipv4Addr;
use std::path::PathBuf;

use vlsmgen::config_loader;
use vlsmgen::ip::Alignment;
use vlsmgen::orchestrator::{generate_commands, write_registry};
use vlsmgen::table_parser::read_table_file;
use vlsmgen::utils::validate_rows;

/// Generates Cisco IOS commands to setup subnets, DHCP, and RIP
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Input markdown file. Should contain only the input table
    #[arg(value_name = "INPUT_TABLE")]
    input_table: PathBuf,

    /// The IPv4 address space you're given (defaults to allocation.base_address from the config)
    address: Option<Ipv4Addr>,

    /// Path to an optional YAML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write the commands to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Write the allocation registry as JSON to this file
    #[arg(long)]
    plan: Option<PathBuf>,

    /// Override how blocks are aligned to the running cursor
    #[arg(long, value_enum)]
    alignment: Option<Alignment>,
}

fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    // Parse command-line arguments
    let args = Args::parse();

    let mut config = config_loader::load_or_default(args.config.as_deref())?;

    // Initialize logging, defaulting to the configured level or "info"
    let default_level = config.general.log_level.clone().unwrap_or_else(|| "info".to_string());
    env_logger::Builder::from_env(Env::default().default_filter_or(default_level)).init();

    info!("Input table: {:?}", args.input_table);

    if let Some(alignment) = args.alignment {
        config.allocation.alignment = alignment;
    }

    let base = args
        .address
        .or(config.allocation.base_address)
        .ok_or_else(|| eyre!("No address space given: pass an IPv4 address or set allocation.base_address"))?;

    let rows = read_table_file(&args.input_table)?;
    validate_rows(&rows).map_err(|e| eyre!("Invalid input table: {}", e))?;

    let generated = generate_commands(&rows, base, &config)?;

    match &args.output {
        Some(path) => {
            std::fs::write(path, &generated.text)
                .wrap_err_with(|| format!("Failed to write commands to '{}'", path.display()))?;
            info!("Wrote commands to {:?}", path);
        }
        None => println!("{}", generated.text),
    }

    if let Some(path) = &args.plan {
        write_registry(&generated.registry, path)?;
    }

    info!("Generated commands for {} subnets", generated.registry.len());
    Ok(())
}
