use clap::Args;

use runroom_core::models::label_for;
use runroom_core::AppContext;

use super::{runtime, OutputFormat};
use crate::config::Config;

/// Show the lookup lists served by the API
#[derive(Args)]
pub struct EnumsCommand {
    /// Only resolve this key to its label in every list that has it
    key: Option<String>,

    /// Output format
    #[arg(long, short, value_enum, default_value = "text")]
    format: OutputFormat,
}

impl EnumsCommand {
    pub fn run(&self, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
        let rt = runtime()?;
        let client = config.client()?;
        let context = rt
            .block_on(AppContext::load(&client))
            .map_err(|e| e.display_message("Failed to load enums"))?;
        let catalog = context.catalog();

        if let Some(key) = &self.key {
            let mut found = false;
            for (name, items) in catalog.sections() {
                if items.iter().any(|item| &item.key == key) {
                    println!("{}: {}", name, label_for(items, key));
                    found = true;
                }
            }
            if !found {
                return Err(format!("Unknown enum key: {}", key).into());
            }
            return Ok(());
        }

        match self.format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(catalog)?);
            }
            OutputFormat::Text => {
                for (i, (name, items)) in catalog.sections().iter().enumerate() {
                    if i > 0 {
                        println!();
                    }
                    println!("{}", name);
                    println!("{}", "-".repeat(name.len()));
                    if items.is_empty() {
                        println!("  (none)");
                    }
                    for item in items.iter() {
                        if *name == "occupancyStatus" {
                            println!(
                                "  {:14} {} ({})",
                                item.key,
                                item.label,
                                catalog.occupancy_tone(Some(item.key.as_str()))
                            );
                        } else {
                            println!("  {:14} {}", item.key, item.label);
                        }
                    }
                }
            }
        }
        Ok(())
    }
}
