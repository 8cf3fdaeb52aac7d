use chrono::{Local, NaiveDate};
use clap::{Args, Subcommand};
use serde_json::json;

use runroom_core::calendar::parse_date;
use runroom_core::{
    ActionOutcome, ApiClient, Direction, MenuDraft, MenuNavigator, View,
};

use super::{confirm, runtime, OutputFormat};
use crate::config::Config;

#[derive(Args)]
pub struct MenuCommand {
    #[command(subcommand)]
    pub command: MenuSubcommand,
}

#[derive(Subcommand)]
pub enum MenuSubcommand {
    /// Show the menus of a week or a day
    Show {
        /// View (weekly, daily)
        #[arg(long, short, default_value = "weekly")]
        view: String,

        /// Date to show (YYYY-MM-DD), defaults to today
        #[arg(long, short)]
        date: Option<String>,

        /// Weeks (weekly) or days (daily) to step from the date, e.g. -1
        #[arg(long, short, default_value_t = 0, allow_hyphen_values = true)]
        offset: i32,

        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Copy menus forward (previous week, current week or today)
    Copy {
        /// View (weekly, daily)
        #[arg(long, short, default_value = "weekly")]
        view: String,

        /// Selected date (YYYY-MM-DD), defaults to today
        #[arg(long, short)]
        date: Option<String>,

        /// Skip confirmation prompt
        #[arg(long, short)]
        force: bool,
    },

    /// Create an empty menu for a date
    Create {
        /// Date (YYYY-MM-DD)
        #[arg(long, short)]
        date: String,
    },

    /// Move a menu to another date
    Update {
        /// Menu ID
        id: String,

        /// New date (YYYY-MM-DD)
        #[arg(long, short)]
        date: String,
    },

    /// Delete a menu, then show the view it was deleted from
    Delete {
        /// Menu ID
        id: String,

        /// View to show afterwards (weekly, daily)
        #[arg(long, short, default_value = "weekly")]
        view: String,

        /// Date of that view (YYYY-MM-DD), defaults to today
        #[arg(long, short)]
        date: Option<String>,

        /// Skip confirmation prompt
        #[arg(long, short)]
        force: bool,
    },
}

impl MenuCommand {
    pub fn run(&self, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
        let rt = runtime()?;
        let client = config.client()?;
        let today = Local::now().date_naive();

        match &self.command {
            MenuSubcommand::Show {
                view,
                date,
                offset,
                format,
            } => {
                let view: View = view.parse()?;
                let selected = selected_date(date.as_deref(), today)?;
                let mut nav = MenuNavigator::new(client, today).at(view, selected);

                rt.block_on(async {
                    if *offset == 0 {
                        nav.refresh().await
                    } else {
                        let direction = if *offset > 0 {
                            Direction::Next
                        } else {
                            Direction::Previous
                        };
                        nav.advance(direction, offset.unsigned_abs()).await
                    }
                });

                print_view(&nav, format)
            }

            MenuSubcommand::Copy { view, date, force } => {
                let view: View = view.parse()?;
                let selected = selected_date(date.as_deref(), today)?;
                let mut nav = MenuNavigator::new(client, today).at(view, selected);

                let outcome = rt.block_on(async {
                    if !nav.refresh().await {
                        return ActionOutcome::Failed;
                    }
                    nav.execute_copy(|action| *force || confirm(&action.prompt()))
                        .await
                });

                match outcome {
                    ActionOutcome::Applied => {
                        println!("Copied. Now showing {}:", nav.label());
                        println!();
                        print_view(&nav, &OutputFormat::Text)
                    }
                    ActionOutcome::Cancelled => {
                        println!("Copy cancelled.");
                        Ok(())
                    }
                    ActionOutcome::Unavailable => {
                        println!("No copy action is available for {}.", nav.label());
                        Ok(())
                    }
                    ActionOutcome::Failed => Err(failure(&nav).into()),
                }
            }

            MenuSubcommand::Create { date } => {
                let date = parse_date(date)?;
                let mut nav = MenuNavigator::new(client, today).at(View::Daily, date);

                match rt.block_on(nav.save_menu(None, MenuDraft::new(date))) {
                    ActionOutcome::Applied => {
                        println!("Created menu:");
                        print_view(&nav, &OutputFormat::Text)
                    }
                    _ => Err(failure(&nav).into()),
                }
            }

            MenuSubcommand::Update { id, date } => {
                let date = parse_date(date)?;
                let mut nav = MenuNavigator::new(client, today).at(View::Daily, date);

                match rt.block_on(nav.save_menu(Some(id.as_str()), MenuDraft::new(date))) {
                    ActionOutcome::Applied => {
                        println!("Updated menu:");
                        print_view(&nav, &OutputFormat::Text)
                    }
                    _ => Err(failure(&nav).into()),
                }
            }

            MenuSubcommand::Delete {
                id,
                view,
                date,
                force,
            } => {
                let view: View = view.parse()?;
                let selected = selected_date(date.as_deref(), today)?;
                let mut nav = MenuNavigator::new(client, today).at(view, selected);
                let prompt = format!("Delete menu {}?", id);

                match rt.block_on(nav.delete_menu(id, || *force || confirm(&prompt))) {
                    ActionOutcome::Applied => {
                        println!("Deleted menu: {}", id);
                        println!();
                        print_view(&nav, &OutputFormat::Text)
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

fn selected_date(date: Option<&str>, today: NaiveDate) -> Result<NaiveDate, String> {
    match date {
        Some(d) => parse_date(d),
        None => Ok(today),
    }
}

pub(crate) fn failure(nav: &MenuNavigator<ApiClient>) -> String {
    nav.error().unwrap_or("Request failed").to_string()
}

pub(crate) fn print_view(
    nav: &MenuNavigator<ApiClient>,
    format: &OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    match format {
        OutputFormat::Json => {
            let value = json!({
                "view": nav.view(),
                "selectedDate": nav.selected_date(),
                "period": nav.period(),
                "label": nav.label(),
                "weekPosition": nav.week_position(),
                "menus": nav.menus(),
                "copyAction": nav.copy_action(),
                "error": nav.error(),
            });
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
        OutputFormat::Text => {
            let heading = match nav.view() {
                View::Weekly => format!("Weekly menu: {} ({})", nav.label(), nav.week_position()),
                View::Daily => format!("Daily menu: {}", nav.label()),
            };
            println!("{}", heading);
            println!("{}", "-".repeat(heading.chars().count()));
            println!();

            if nav.menus().is_empty() {
                println!("No menus found");
            }
            for menu in nav.menus() {
                println!("Menu {}", menu.id);
                println!("{}", menu);
            }

            if let Some(action) = nav.copy_action() {
                println!("Available: {}", action);
            }
            if let Some(error) = nav.error() {
                eprintln!("Error: {}", error);
            }
        }
    }
    Ok(())
}
