use bank_ledger::cli::{demo, utils::Console, Session};
use bank_ledger::config;
use clap::{Parser, Subcommand};
use dotenv::dotenv;
use env_logger::Env;
use log::{error, info};
use std::io;
use std::process;

/// Bank Ledger CLI - an in-memory account ledger driven from a terminal menu
#[derive(Parser)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    /// Sets the configuration file
    #[clap(short, long, value_name = "FILE", default_value = "config.toml")]
    config: String,

    /// Turn debugging information on
    #[clap(short, long, action = clap::ArgAction::Count)]
    debug: u8,

    #[clap(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the interactive account menu (default)
    Menu,

    /// Show how checking and savings accounts handle the same withdrawal
    Demo,
}

fn main() {
    // Load environment variables from .env file
    dotenv().ok();

    // Initialize logger
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    // Parse command line arguments
    let cli = Cli::parse();

    // Set log level based on verbosity
    match cli.debug {
        0 => log::set_max_level(log::LevelFilter::Info),
        1 => log::set_max_level(log::LevelFilter::Debug),
        _ => log::set_max_level(log::LevelFilter::Trace),
    }

    info!("Starting Bank Ledger CLI");

    // Initialize config from the provided file
    match config::load_config(&cli.config) {
        Ok(_) => {
            info!("Configuration loaded successfully");
        }
        Err(err) => {
            error!("Failed to load configuration: {}", err);
            process::exit(1);
        }
    }
    let config = config::get_config();

    let stdin = io::stdin();
    let result = match cli.command.unwrap_or(Commands::Menu) {
        Commands::Menu => Session::new(stdin.lock(), io::stdout(), config).run(),
        Commands::Demo => {
            let mut console = Console::new(stdin.lock(), io::stdout());
            demo::demonstrate_polymorphism(&mut console, &config)
        }
    };

    if let Err(err) = result {
        error!("Error: {:#}", err);
        process::exit(1);
    }
}
