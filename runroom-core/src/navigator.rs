//! View state for the kitchen menu screens.
//!
//! A [`MenuNavigator`] holds the selected view and date, the menus last
//! fetched for that period, and the error banner. Every change to the view
//! or the date resolves the period again and replaces `menus` wholesale.
//! Mutations are sent to the server and followed by a refetch; nothing is
//! patched locally.
//!
//! Failures never propagate out of the navigator. They are turned into a
//! display string on [`MenuNavigator::error`] and the previously fetched
//! menus stay in place.

use chrono::{Duration, NaiveDate};

use crate::api::{ApiError, MenuApi};
use crate::calendar::{self, Direction, Period, View, WeekPosition};
use crate::copy_forward::{available_copy_action, CopyAction};
use crate::forms::{MenuDraft, MenuItemDraft};
use crate::models::{sort_by_date, Menu};

pub const NO_PREVIOUS_WEEK_MENU: &str = "No menu found for the previous week to copy";

const LOAD_FAILED: &str = "Failed to load menus";
const COPY_FAILED: &str = "Failed to copy menu";
const SAVE_MENU_FAILED: &str = "Failed to save menu";
const DELETE_MENU_FAILED: &str = "Failed to delete menu";
const SAVE_ITEM_FAILED: &str = "Failed to save menu item";
const DELETE_ITEM_FAILED: &str = "Failed to delete menu item";

/// How a user-triggered action ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    /// The server accepted the change and the view was refreshed
    Applied,
    /// The user declined the confirmation
    Cancelled,
    /// The action is not offered in the current view state
    Unavailable,
    /// The action failed; see [`MenuNavigator::error`]
    Failed,
}

pub struct MenuNavigator<A> {
    api: A,
    view: View,
    selected_date: NaiveDate,
    today: NaiveDate,
    menus: Vec<Menu>,
    error: Option<String>,
}

impl<A: MenuApi> MenuNavigator<A> {
    /// Starts in the weekly view on `today`. Nothing is fetched until
    /// [`refresh`](Self::refresh) or a navigation method is called.
    pub fn new(api: A, today: NaiveDate) -> Self {
        Self {
            api,
            view: View::Weekly,
            selected_date: today,
            today,
            menus: Vec::new(),
            error: None,
        }
    }

    /// Positions the navigator without fetching.
    pub fn at(mut self, view: View, selected_date: NaiveDate) -> Self {
        self.view = view;
        self.selected_date = selected_date;
        self
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn selected_date(&self) -> NaiveDate {
        self.selected_date
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn menus(&self) -> &[Menu] {
        &self.menus
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn period(&self) -> Period {
        Period::resolve(self.view, self.selected_date)
    }

    pub fn label(&self) -> String {
        self.period().label()
    }

    pub fn week_position(&self) -> WeekPosition {
        WeekPosition::of(self.selected_date, self.today)
    }

    /// The copy action offered for the current state, if any.
    pub fn copy_action(&self) -> Option<CopyAction> {
        available_copy_action(
            self.view,
            self.selected_date,
            self.today,
            !self.menus.is_empty(),
        )
    }

    /// Fetches the menus of the current period. Returns whether the fetch
    /// succeeded.
    pub async fn refresh(&mut self) -> bool {
        let period = self.period();
        let fetched = self.fetch(period).await;
        match fetched {
            Ok(mut menus) => {
                sort_by_date(&mut menus);
                tracing::debug!("Loaded {} menu(s) for {}", menus.len(), period);
                self.menus = menus;
                self.error = None;
                true
            }
            Err(e) => {
                tracing::warn!("Failed to load menus for {}: {}", period, e);
                self.error = Some(e.display_message(LOAD_FAILED));
                false
            }
        }
    }

    async fn fetch(&self, period: Period) -> Result<Vec<Menu>, ApiError> {
        match period {
            Period::Week { start, end } => self.api.list_menus(start, end).await,
            Period::Day { date } => Ok(self.api.menu_by_date(date).await?.into_iter().collect()),
        }
    }

    /// Switches view. The selected date always goes back to today.
    pub async fn set_view(&mut self, view: View) -> bool {
        self.view = view;
        self.selected_date = self.today;
        self.refresh().await
    }

    pub async fn set_selected_date(&mut self, date: NaiveDate) -> bool {
        self.selected_date = date;
        self.refresh().await
    }

    /// Steps by `amount` weeks or days depending on the view.
    pub async fn advance(&mut self, direction: Direction, amount: u32) -> bool {
        self.selected_date = calendar::advance(self.view, self.selected_date, direction, amount);
        self.refresh().await
    }

    /// Runs the offered copy action after `confirm` approves it.
    ///
    /// Copying from the previous week first checks that the previous week
    /// has menus and makes no write when it does not.
    pub async fn execute_copy<F>(&mut self, confirm: F) -> ActionOutcome
    where
        F: FnOnce(&CopyAction) -> bool,
    {
        let Some(action) = self.copy_action() else {
            return ActionOutcome::Unavailable;
        };
        if !confirm(&action) {
            return ActionOutcome::Cancelled;
        }

        if let CopyAction::CopyFromPreviousWeek { source, .. } = action {
            let end = source + Duration::days(6);
            let previous = self.api.list_menus(source, end).await;
            match previous {
                Ok(previous) if previous.is_empty() => {
                    self.error = Some(NO_PREVIOUS_WEEK_MENU.to_string());
                    return ActionOutcome::Failed;
                }
                Ok(_) => {}
                Err(e) => return self.fail(&e, COPY_FAILED),
            }
        }

        let result = if action.is_weekly() {
            self.api.copy_week(action.source(), action.target()).await
        } else {
            self.api.copy_day(action.source(), action.target()).await
        };

        match result {
            Ok(()) => {
                tracing::info!("{}", action);
                self.selected_date = match action {
                    CopyAction::CopyFromPreviousWeek { target, .. } => target,
                    CopyAction::CopyToCurrentWeek { .. } | CopyAction::CopyToToday { .. } => {
                        self.today
                    }
                };
                self.error = None;
                self.refresh().await;
                ActionOutcome::Applied
            }
            Err(e) => self.fail(&e, COPY_FAILED),
        }
    }

    /// Creates a menu, or updates the date of `existing_id`.
    pub async fn save_menu(&mut self, existing_id: Option<&str>, draft: MenuDraft) -> ActionOutcome {
        let result = match existing_id {
            Some(id) => self.api.update_menu(id, draft.menu_date).await,
            None => self.api.create_menu(draft.menu_date).await,
        };
        match result {
            Ok(menu) => {
                tracing::info!("Saved menu {} for {}", menu.id, menu.menu_date);
                self.refresh().await;
                ActionOutcome::Applied
            }
            Err(e) => self.fail(&e, SAVE_MENU_FAILED),
        }
    }

    pub async fn delete_menu<F>(&mut self, id: &str, confirm: F) -> ActionOutcome
    where
        F: FnOnce() -> bool,
    {
        if !confirm() {
            return ActionOutcome::Cancelled;
        }
        let result = self.api.delete_menu(id).await;
        match result {
            Ok(()) => {
                self.refresh().await;
                ActionOutcome::Applied
            }
            Err(e) => self.fail(&e, DELETE_MENU_FAILED),
        }
    }

    /// Adds an item to `menu_id`, or replaces `item_id` when given.
    pub async fn save_item(
        &mut self,
        menu_id: &str,
        item_id: Option<&str>,
        draft: &MenuItemDraft,
    ) -> ActionOutcome {
        let item = match draft.validate() {
            Ok(item) => item,
            Err(e) => {
                self.error = Some(e.to_string());
                return ActionOutcome::Failed;
            }
        };

        let result = match item_id {
            Some(item_id) => self.api.update_item(menu_id, item_id, &item).await,
            None => self.api.add_item(menu_id, &item).await,
        };
        match result {
            Ok(()) => {
                self.refresh().await;
                ActionOutcome::Applied
            }
            Err(e) => self.fail(&e, SAVE_ITEM_FAILED),
        }
    }

    pub async fn delete_item<F>(&mut self, menu_id: &str, item_id: &str, confirm: F) -> ActionOutcome
    where
        F: FnOnce() -> bool,
    {
        if !confirm() {
            return ActionOutcome::Cancelled;
        }
        let result = self.api.delete_item(menu_id, item_id).await;
        match result {
            Ok(()) => {
                self.refresh().await;
                ActionOutcome::Applied
            }
            Err(e) => self.fail(&e, DELETE_ITEM_FAILED),
        }
    }

    fn fail(&mut self, err: &ApiError, fallback: &str) -> ActionOutcome {
        tracing::warn!("{}: {}", fallback, err);
        self.error = Some(err.display_message(fallback));
        ActionOutcome::Failed
    }
}
