use chrono::Local;
use clap::{Args, Subcommand};

use runroom_core::calendar::parse_date;
use runroom_core::{
    ActionOutcome, ApiClient, MealCategory, MealType, Menu, MenuItemDraft, MenuNavigator, View,
};

use super::menu::{failure, print_view};
use super::{confirm, runtime, OutputFormat};
use crate::config::Config;

#[derive(Args)]
pub struct ItemCommand {
    #[command(subcommand)]
    pub command: ItemSubcommand,
}

#[derive(Subcommand)]
pub enum ItemSubcommand {
    /// Add an item to the menu of a date
    Add {
        /// Menu date (YYYY-MM-DD)
        #[arg(long, short)]
        date: String,

        /// Item name
        #[arg(long, short)]
        name: String,

        /// Meal type (breakfast, lunch, dinner, snacks)
        #[arg(long = "type", short = 't', value_name = "TYPE")]
        meal_type: String,

        /// Meal category (veg, non_veg, vegan, ...)
        #[arg(long, short)]
        category: String,

        /// Price
        #[arg(long, short, default_value_t = 0.0)]
        price: f64,

        /// Description
        #[arg(long, default_value = "")]
        description: String,
    },

    /// Update an item on the menu of a date
    Update {
        /// Item ID
        item_id: String,

        /// Menu date (YYYY-MM-DD)
        #[arg(long, short)]
        date: String,

        /// New name
        #[arg(long, short)]
        name: Option<String>,

        /// New meal type
        #[arg(long = "type", short = 't', value_name = "TYPE")]
        meal_type: Option<String>,

        /// New meal category
        #[arg(long, short)]
        category: Option<String>,

        /// New price
        #[arg(long, short)]
        price: Option<f64>,

        /// New description
        #[arg(long)]
        description: Option<String>,
    },

    /// Delete an item from the menu of a date
    Delete {
        /// Item ID
        item_id: String,

        /// Menu date (YYYY-MM-DD)
        #[arg(long, short)]
        date: String,

        /// Skip confirmation prompt
        #[arg(long, short)]
        force: bool,
    },
}

impl ItemCommand {
    pub fn run(&self, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
        let rt = runtime()?;
        let today = Local::now().date_naive();

        let date = match &self.command {
            ItemSubcommand::Add { date, .. }
            | ItemSubcommand::Update { date, .. }
            | ItemSubcommand::Delete { date, .. } => parse_date(date)?,
        };

        // Items are edited through the daily view of their menu's date.
        let mut nav = MenuNavigator::new(config.client()?, today).at(View::Daily, date);
        if !rt.block_on(nav.refresh()) {
            return Err(failure(&nav).into());
        }
        let menu = daily_menu(&nav)?;
        let menu_id = menu.id.clone();

        match &self.command {
            ItemSubcommand::Add {
                name,
                meal_type,
                category,
                price,
                description,
                ..
            } => {
                let draft = MenuItemDraft {
                    name: name.clone(),
                    description: description.clone(),
                    price: *price,
                    meal_type: Some(meal_type.parse::<MealType>()?),
                    meal_category: Some(category.parse::<MealCategory>()?),
                };

                match rt.block_on(nav.save_item(&menu_id, None, &draft)) {
                    ActionOutcome::Applied => {
                        println!("Added '{}' to the menu of {}", draft.name.trim(), date);
                        print_view(&nav, &OutputFormat::Text)
                    }
                    _ => Err(failure(&nav).into()),
                }
            }

            ItemSubcommand::Update {
                item_id,
                name,
                meal_type,
                category,
                price,
                description,
                ..
            } => {
                let has_updates = name.is_some()
                    || meal_type.is_some()
                    || category.is_some()
                    || price.is_some()
                    || description.is_some();
                if !has_updates {
                    return Err("Nothing to update. Provide at least one option.".into());
                }

                let existing = menu
                    .find_item(item_id)
                    .ok_or_else(|| format!("Menu item not found: {}", item_id))?;

                let mut draft = MenuItemDraft::from_item(existing);
                if let Some(n) = name {
                    draft.name = n.clone();
                }
                if let Some(mt) = meal_type {
                    draft.meal_type = Some(mt.parse::<MealType>()?);
                }
                if let Some(c) = category {
                    draft.meal_category = Some(c.parse::<MealCategory>()?);
                }
                if let Some(p) = price {
                    draft.price = *p;
                }
                if let Some(d) = description {
                    draft.description = d.clone();
                }

                match rt.block_on(nav.save_item(&menu_id, Some(item_id.as_str()), &draft)) {
                    ActionOutcome::Applied => {
                        println!("Updated menu item {}", item_id);
                        print_view(&nav, &OutputFormat::Text)
                    }
                    _ => Err(failure(&nav).into()),
                }
            }

            ItemSubcommand::Delete { item_id, force, .. } => {
                let name = menu
                    .find_item(item_id)
                    .map(|item| item.name.clone())
                    .unwrap_or_else(|| item_id.clone());
                let prompt = format!("Delete '{}' from the menu of {}?", name, date);

                match rt.block_on(nav.delete_item(&menu_id, item_id, || *force || confirm(&prompt))) {
                    ActionOutcome::Applied => {
                        println!("Deleted menu item: {}", name);
                        Ok(())
                    }
                    ActionOutcome::Cancelled => {
                        println!("Deletion cancelled.");
                        Ok(())
                    }
                    _ => Err(failure(&nav).into()),
                }
            }
        }
    }
}

fn daily_menu(nav: &MenuNavigator<ApiClient>) -> Result<Menu, String> {
    nav.menus().first().cloned().ok_or_else(|| {
        format!(
            "No menu for {}. Create it first with 'runroom menu create --date {}'.",
            nav.selected_date(),
            nav.selected_date()
        )
    })
}
