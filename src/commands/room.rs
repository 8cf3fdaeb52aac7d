use clap::{Args, Subcommand};
use std::fmt::Write;

use runroom_core::models::{attach_building_names, filter_by_number};
use runroom_core::{BuildingApi, CatalogApi, Room, RoomApi, RoomDraft};

use super::{confirm, runtime, OutputFormat};
use crate::config::Config;

#[derive(Args)]
pub struct RoomCommand {
    #[command(subcommand)]
    pub command: RoomSubcommand,
}

#[derive(Subcommand)]
pub enum RoomSubcommand {
    /// List rooms with their building
    List {
        /// Only rooms whose number contains this text
        #[arg(long, short)]
        search: Option<String>,

        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Show one room
    Show {
        /// Room ID
        id: String,

        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Add a room (every field but the description is required)
    Create {
        #[command(flatten)]
        fields: RoomFields,
    },

    /// Change a room
    Update {
        /// Room ID
        id: String,

        #[command(flatten)]
        fields: RoomFields,
    },

    /// Delete a room
    Delete {
        /// Room ID
        id: String,

        /// Skip confirmation prompt
        #[arg(long, short)]
        force: bool,
    },
}

/// Room form fields. Select fields take enum catalog keys.
#[derive(Args, Default)]
pub struct RoomFields {
    /// Room number
    #[arg(long)]
    number: Option<String>,

    /// Room type key
    #[arg(long = "type", value_name = "TYPE")]
    room_type: Option<String>,

    /// Air conditioned (true, false)
    #[arg(long)]
    ac: Option<bool>,

    /// Capacity
    #[arg(long)]
    capacity: Option<u32>,

    /// Floor
    #[arg(long, allow_hyphen_values = true)]
    floor: Option<i32>,

    /// Building ID
    #[arg(long)]
    building: Option<String>,

    /// Crew type key
    #[arg(long)]
    crew_type: Option<String>,

    /// Room category key
    #[arg(long)]
    category: Option<String>,

    /// Number of beds
    #[arg(long)]
    beds: Option<u32>,

    /// Attachment type key
    #[arg(long)]
    attachment: Option<String>,

    /// Room status key
    #[arg(long)]
    status: Option<String>,

    /// Description
    #[arg(long)]
    description: Option<String>,
}

impl RoomFields {
    fn is_empty(&self) -> bool {
        self.number.is_none()
            && self.room_type.is_none()
            && self.ac.is_none()
            && self.capacity.is_none()
            && self.floor.is_none()
            && self.building.is_none()
            && self.crew_type.is_none()
            && self.category.is_none()
            && self.beds.is_none()
            && self.attachment.is_none()
            && self.status.is_none()
            && self.description.is_none()
    }

    fn apply(&self, draft: &mut RoomDraft) {
        let set = |target: &mut String, value: &Option<String>| {
            if let Some(v) = value {
                *target = v.clone();
            }
        };
        set(&mut draft.room_number, &self.number);
        set(&mut draft.room_type, &self.room_type);
        set(&mut draft.building_id, &self.building);
        set(&mut draft.crew_type, &self.crew_type);
        set(&mut draft.room_category, &self.category);
        set(&mut draft.attachment, &self.attachment);
        set(&mut draft.status, &self.status);
        set(&mut draft.description, &self.description);
        draft.ac = self.ac.or(draft.ac);
        draft.capacity = self.capacity.or(draft.capacity);
        draft.floor = self.floor.or(draft.floor);
        draft.bed_count = self.beds.or(draft.bed_count);
    }
}

impl RoomCommand {
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
        A: RoomApi + BuildingApi + CatalogApi,
        F: FnOnce(&str) -> bool,
    {
        match &self.command {
            RoomSubcommand::List { search, format } => {
                let mut rooms = api
                    .list_rooms()
                    .await
                    .map_err(|e| e.display_message("Failed to fetch rooms"))?;
                name_buildings(api, &mut rooms).await;

                let shown: Vec<&Room> = filter_by_number(&rooms, search.as_deref().unwrap_or(""));
                render_list(&shown, format)
            }

            RoomSubcommand::Show { id, format } => {
                let room = fetch_room(api, id).await?;
                render_room(&room, format)
            }

            RoomSubcommand::Create { fields } => {
                let mut draft = RoomDraft::default();
                fields.apply(&mut draft);
                let room = checked(api, &draft).await?;
                api.create_room(&room)
                    .await
                    .map_err(|e| e.display_message("Failed to create room"))?;
                Ok(format!("Room {} created successfully\n", room.room_number))
            }

            RoomSubcommand::Update { id, fields } => {
                if fields.is_empty() {
                    return Err("Nothing to update. Provide at least one option.".into());
                }
                let existing = fetch_room(api, id).await?;
                let mut draft = RoomDraft::from_room(&existing);
                fields.apply(&mut draft);
                let room = checked(api, &draft).await?;
                api.update_room(id, &room)
                    .await
                    .map_err(|e| e.display_message("Failed to update room"))?;

                let mut out = String::from("Room updated successfully\n\n");
                out.push_str(&render_room(&fetch_room(api, id).await?, &OutputFormat::Text)?);
                Ok(out)
            }

            RoomSubcommand::Delete { id, force } => {
                if !*force && !confirm(&format!("Delete room {}? Are you sure?", id)) {
                    return Ok("Deletion cancelled.\n".to_string());
                }
                api.delete_room(id)
                    .await
                    .map_err(|e| e.display_message("Failed to delete room"))?;
                Ok("Room deleted successfully\n".to_string())
            }
        }
    }
}

/// Rooms still list when the buildings cannot be loaded, just unnamed.
async fn name_buildings<A: BuildingApi>(api: &A, rooms: &mut [Room]) {
    match api.list_buildings().await {
        Ok(buildings) => attach_building_names(rooms, &buildings),
        Err(e) => tracing::warn!("Could not load buildings for the room list: {}", e),
    }
}

async fn fetch_room<A>(api: &A, id: &str) -> Result<Room, String>
where
    A: RoomApi + BuildingApi,
{
    let mut room = api
        .room_by_id(id)
        .await
        .map_err(|e| e.display_message("Failed to fetch room"))?;
    name_buildings(api, std::slice::from_mut(&mut room)).await;
    Ok(room)
}

/// Validates the draft, then checks its select fields against the catalog.
async fn checked<A: CatalogApi>(
    api: &A,
    draft: &RoomDraft,
) -> Result<Room, Box<dyn std::error::Error>> {
    let room = draft.validate()?;
    let catalog = api
        .fetch_enums()
        .await
        .map_err(|e| e.display_message("Failed to load enums"))?;
    draft.check_options(&catalog)?;
    Ok(room)
}

/// `LOCO_PILOT` -> `Loco Pilot`; empty keys show as `-`.
fn format_key(key: &str) -> String {
    if key.trim().is_empty() {
        return "-".to_string();
    }
    key.split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let lower = word.to_lowercase();
            let mut chars = lower.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

fn render_list(
    rooms: &[&Room],
    format: &OutputFormat,
) -> Result<String, Box<dyn std::error::Error>> {
    let mut out = String::new();
    match format {
        OutputFormat::Json => {
            writeln!(out, "{}", serde_json::to_string_pretty(rooms)?)?;
        }
        OutputFormat::Text => {
            if rooms.is_empty() {
                writeln!(out, "No rooms found")?;
                return Ok(out);
            }
            writeln!(
                out,
                "{:<8} {:<10} {:<12} {:<6} {:<5} {:<12} {}",
                "ID", "ROOM", "TYPE", "AC", "BEDS", "STATUS", "BUILDING"
            )?;
            for room in rooms {
                writeln!(
                    out,
                    "{:<8} {:<10} {:<12} {:<6} {:<5} {:<12} {}",
                    room.id.as_deref().unwrap_or("-"),
                    room.room_number,
                    format_key(&room.room_type),
                    if room.ac { "Yes" } else { "No" },
                    room.bed_count,
                    format_key(&room.status),
                    room.building_name.as_deref().unwrap_or("-")
                )?;
            }
        }
    }
    Ok(out)
}

fn render_room(
    room: &Room,
    format: &OutputFormat,
) -> Result<String, Box<dyn std::error::Error>> {
    let mut out = String::new();
    match format {
        OutputFormat::Json => {
            writeln!(out, "{}", serde_json::to_string_pretty(room)?)?;
        }
        OutputFormat::Text => {
            writeln!(out, "Room {}", room.room_number)?;
            writeln!(out, "  ID:            {}", room.id.as_deref().unwrap_or("-"))?;
            writeln!(
                out,
                "  Building:      {}",
                room.building_name.as_deref().unwrap_or(&room.building_id)
            )?;
            writeln!(out, "  Type:          {}", format_key(&room.room_type))?;
            writeln!(out, "  AC:            {}", if room.ac { "Yes" } else { "No" })?;
            writeln!(out, "  Capacity:      {}", room.capacity)?;
            writeln!(out, "  Floor:         {}", room.floor)?;
            writeln!(out, "  Beds:          {}", room.bed_count)?;
            writeln!(out, "  Crew type:     {}", format_key(&room.crew_type))?;
            writeln!(out, "  Category:      {}", format_key(&room.room_category))?;
            writeln!(out, "  Attachment:    {}", format_key(&room.attachment))?;
            writeln!(out, "  Status:        {}", format_key(&room.status))?;
            if !room.description.is_empty() {
                writeln!(out, "  Description:   {}", room.description)?;
            }
        }
    }
    Ok(out)
}
