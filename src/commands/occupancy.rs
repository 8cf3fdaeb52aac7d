use clap::Args;
use std::fmt::Write;

use runroom_core::models::label_for;
use runroom_core::{AppContext, CatalogApi, EnumCatalog, OccupancyApi, RoomOccupancy};

use super::{runtime, OutputFormat};
use crate::config::Config;

/// Show bed occupancy per room
#[derive(Args)]
pub struct OccupancyCommand {
    /// Only show this room number
    #[arg(long, short)]
    room: Option<String>,

    /// Print crew and meal details for each bed
    #[arg(long, short)]
    details: bool,

    /// Output format
    #[arg(long, short, value_enum, default_value = "text")]
    format: OutputFormat,
}

impl OccupancyCommand {
    pub fn run(&self, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
        let rt = runtime()?;
        let client = config.client()?;
        let output = rt.block_on(self.execute(&client))?;
        print!("{}", output);
        Ok(())
    }

    pub(crate) async fn execute<A>(&self, api: &A) -> Result<String, Box<dyn std::error::Error>>
    where
        A: OccupancyApi + CatalogApi,
    {
        let context = AppContext::load(api)
            .await
            .map_err(|e| e.display_message("Failed to load enums"))?;
        let mut rooms = api
            .occupancy_dashboard()
            .await
            .map_err(|e| e.display_message("Failed to load occupancy"))?;

        if let Some(room) = &self.room {
            rooms.retain(|number, _| number == room);
            if rooms.is_empty() {
                return Err(format!("Room not found on the dashboard: {}", room).into());
            }
        }

        match self.format {
            OutputFormat::Json => Ok(format!("{}\n", serde_json::to_string_pretty(&rooms)?)),
            OutputFormat::Text => render(&rooms, context.catalog(), self.details),
        }
    }
}

fn render(
    rooms: &RoomOccupancy,
    catalog: &EnumCatalog,
    details: bool,
) -> Result<String, Box<dyn std::error::Error>> {
    let mut out = String::new();
    if rooms.is_empty() {
        writeln!(out, "No rooms on the dashboard")?;
        return Ok(out);
    }

    for (i, (number, beds)) in rooms.iter().enumerate() {
        if i > 0 {
            writeln!(out)?;
        }
        writeln!(out, "Room {} ({})", number, catalog.room_tone(beds))?;
        for bed in beds {
            let status = bed.occupancy_status.as_deref();
            writeln!(
                out,
                "  Bed {:<4} {:<14} {:<11} {}",
                bed.bed_number,
                status
                    .map(|key| label_for(&catalog.occupancy_status, key))
                    .unwrap_or("-"),
                catalog.occupancy_tone(status).to_string(),
                bed.crew_name.as_deref().unwrap_or("")
            )?;
            if details {
                for (label, value) in bed.details() {
                    writeln!(out, "      {}: {}", label, value)?;
                }
            }
        }
    }
    Ok(out)
}
