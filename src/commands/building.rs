use clap::{Args, Subcommand};
use std::fmt::Write;

use runroom_core::{Building, BuildingApi, BuildingDraft};

use super::{confirm, runtime, OutputFormat};
use crate::config::Config;

#[derive(Args)]
pub struct BuildingCommand {
    #[command(subcommand)]
    pub command: BuildingSubcommand,
}

#[derive(Subcommand)]
pub enum BuildingSubcommand {
    /// List all buildings
    List {
        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Add a building
    Create {
        /// Building name
        #[arg(long, short)]
        name: String,

        /// Address
        #[arg(long, short)]
        address: String,

        /// Number of floors
        #[arg(long)]
        floors: u32,

        /// Description
        #[arg(long, short, default_value = "")]
        description: String,
    },

    /// Change a building
    Update {
        /// Building ID
        id: String,

        /// New name
        #[arg(long, short)]
        name: Option<String>,

        /// New address
        #[arg(long, short)]
        address: Option<String>,

        /// New number of floors
        #[arg(long)]
        floors: Option<u32>,

        /// New description
        #[arg(long, short)]
        description: Option<String>,
    },

    /// Delete a building
    Delete {
        /// Building ID
        id: String,

        /// Skip confirmation prompt
        #[arg(long, short)]
        force: bool,
    },
}

impl BuildingCommand {
    pub fn run(&self, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
        let rt = runtime()?;
        let client = config.client()?;
        let output = rt.block_on(self.execute(&client, confirm))?;
        print!("{}", output);
        Ok(())
    }

    pub(crate) async fn execute<A, F>(
        &self,
        api: &A,
        confirm: F,
    ) -> Result<String, Box<dyn std::error::Error>>
    where
        A: BuildingApi,
        F: FnOnce(&str) -> bool,
    {
        match &self.command {
            BuildingSubcommand::List { format } => {
                let buildings = load(api).await?;
                render_list(&buildings, format)
            }

            BuildingSubcommand::Create {
                name,
                address,
                floors,
                description,
            } => {
                let draft = BuildingDraft {
                    building_name: name.clone(),
                    address: address.clone(),
                    floors: Some(*floors),
                    description: description.clone(),
                };
                let building = draft.validate()?;
                api.create_building(&building)
                    .await
                    .map_err(|e| e.display_message("Failed to save building"))?;

                let mut out = String::from("Building created successfully\n\n");
                out.push_str(&render_list(&load(api).await?, &OutputFormat::Text)?);
                Ok(out)
            }

            BuildingSubcommand::Update {
                id,
                name,
                address,
                floors,
                description,
            } => {
                if name.is_none() && address.is_none() && floors.is_none() && description.is_none()
                {
                    return Err("Nothing to update. Provide at least one option.".into());
                }

                let buildings = load(api).await?;
                let existing = buildings
                    .iter()
                    .find(|b| b.id.as_deref() == Some(id.as_str()))
                    .ok_or_else(|| format!("Building not found: {}", id))?;

                let mut draft = BuildingDraft::from_building(existing);
                if let Some(n) = name {
                    draft.building_name = n.clone();
                }
                if let Some(a) = address {
                    draft.address = a.clone();
                }
                if let Some(f) = floors {
                    draft.floors = Some(*f);
                }
                if let Some(d) = description {
                    draft.description = d.clone();
                }
                let building = draft.validate()?;
                api.update_building(id, &building)
                    .await
                    .map_err(|e| e.display_message("Failed to save building"))?;

                let mut out = String::from("Building updated successfully\n\n");
                out.push_str(&render_list(&load(api).await?, &OutputFormat::Text)?);
                Ok(out)
            }

            BuildingSubcommand::Delete { id, force } => {
                let prompt = format!("Are you sure you want to delete building {}?", id);
                if !*force && !confirm(&prompt) {
                    return Ok("Deletion cancelled.\n".to_string());
                }
                api.delete_building(id)
                    .await
                    .map_err(|e| e.display_message("Failed to delete building"))?;
                Ok("Building deleted successfully\n".to_string())
            }
        }
    }
}

async fn load<A: BuildingApi>(api: &A) -> Result<Vec<Building>, String> {
    api.list_buildings()
        .await
        .map_err(|e| e.display_message("Failed to load buildings"))
}

fn render_list(
    buildings: &[Building],
    format: &OutputFormat,
) -> Result<String, Box<dyn std::error::Error>> {
    let mut out = String::new();
    match format {
        OutputFormat::Json => {
            writeln!(out, "{}", serde_json::to_string_pretty(buildings)?)?;
        }
        OutputFormat::Text => {
            if buildings.is_empty() {
                writeln!(out, "No buildings found")?;
                return Ok(out);
            }
            writeln!(out, "{:<10} BUILDING", "ID")?;
            for building in buildings {
                writeln!(
                    out,
                    "{:<10} {}",
                    building.id.as_deref().unwrap_or("-"),
                    building
                )?;
            }
        }
    }
    Ok(out)
}
