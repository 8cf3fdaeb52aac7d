mod building;
mod config_cmd;
mod enums;
mod item;
mod menu;
mod occupancy;
mod room;

pub use building::BuildingCommand;
pub use config_cmd::ConfigCommand;
pub use enums::EnumsCommand;
pub use item::ItemCommand;
pub use menu::MenuCommand;
pub use occupancy::OccupancyCommand;
pub use room::RoomCommand;

use clap::ValueEnum;
use std::io::{self, Write};

#[derive(Clone, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Asks a yes/no question on stdin. Anything but `y` counts as no.
pub(crate) fn confirm(prompt: &str) -> bool {
    print!("{} [y/N] ", prompt);
    if io::stdout().flush().is_err() {
        return false;
    }

    let mut input = String::new();
    if io::stdin().read_line(&mut input).is_err() {
        return false;
    }
    input.trim().eq_ignore_ascii_case("y")
}

/// Runtime for the async API calls made by a single command.
pub(crate) fn runtime() -> Result<tokio::runtime::Runtime, Box<dyn std::error::Error>> {
    tokio::runtime::Runtime::new().map_err(|e| format!("Failed to create runtime: {}", e).into())
}

#[cfg(test)]
pub(crate) mod stub {
    use runroom_core::ApiClient;

    /// Serves `app` on a free local port and returns a client for it.
    pub async fn client(app: axum::Router) -> ApiClient {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        ApiClient::new(format!("http://{}", addr), None, None).unwrap()
    }
}
