use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;

use commands::{
    BuildingCommand, ConfigCommand, EnumsCommand, ItemCommand, MenuCommand, OccupancyCommand,
    RoomCommand,
};
use config::Config;

#[derive(Parser)]
#[command(name = "runroom")]
#[command(version)]
#[command(about = "Console for the running room: menus, buildings, rooms and beds", long_about = None)]
struct Cli {
    /// Path to config file
    #[arg(long, short, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse, copy and manage menus
    Menu(MenuCommand),

    /// Manage the items of a menu
    Item(ItemCommand),

    /// Manage buildings
    Building(BuildingCommand),

    /// Manage rooms
    Room(RoomCommand),

    /// Show bed occupancy per room
    Occupancy(OccupancyCommand),

    /// Show the lookup lists served by the API
    Enums(EnumsCommand),

    /// Manage configuration
    Config(ConfigCommand),
}

fn main() {
    // Logs go to stderr so command output stays clean
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "runroom=warn,runroom_core=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Load configuration
    let config = Config::load(cli.config)?;
    tracing::debug!("Using API at {}", config.api_url.value);

    match &cli.command {
        Some(Commands::Menu(cmd)) => cmd.run(&config)?,
        Some(Commands::Item(cmd)) => cmd.run(&config)?,
        Some(Commands::Building(cmd)) => cmd.run(&config)?,
        Some(Commands::Room(cmd)) => cmd.run(&config)?,
        Some(Commands::Occupancy(cmd)) => cmd.run(&config)?,
        Some(Commands::Enums(cmd)) => cmd.run(&config)?,
        Some(Commands::Config(cmd)) => cmd.run(&config)?,
        None => {
            println!("Use --help to see available commands");
        }
    }

    Ok(())
}
