//! Board state: the item store plus everything a user interaction touches.
//!
//! `Board` is the single owner of the canonical item list. Filtering,
//! selection, the add/edit dialogs, and notifications all hang off it, and
//! every user action is one synchronous method call.

pub mod filter;
pub mod form;
pub mod notifications;

use std::time::Duration;

use tracing::debug;

pub use filter::{TypeFilter, filter_items};
pub use form::{
    DialogKind, DialogState, FieldIssue, FormController, FormField, FormState, IssueKind,
    Submitted, ValidationError,
};
pub use notifications::{NotificationLevel, NotificationManager, Toast};

use crate::models::RoadmapItem;
use crate::render::card::Card;
use crate::render::timeline::{self, TimelineMarker};
use crate::store::ItemStore;
use crate::{Error, Result};

/// Interactive roadmap board.
#[derive(Debug)]
pub struct Board {
    store: ItemStore,
    filter: TypeFilter,
    /// Index into the visible (filtered) items
    selected: usize,
    forms: FormController,
    notifications: NotificationManager,
    /// strftime pattern for timeline labels
    date_format: String,
}

impl Board {
    pub fn new(store: ItemStore) -> Self {
        Self {
            store,
            filter: TypeFilter::All,
            selected: 0,
            forms: FormController::new(),
            notifications: NotificationManager::new(),
            date_format: timeline::DEFAULT_DATE_FORMAT.to_string(),
        }
    }

    /// Set the starting filter.
    pub fn with_filter(mut self, filter: TypeFilter) -> Self {
        self.set_filter(filter);
        self
    }

    /// Set the timeline label date pattern.
    pub fn with_date_format(mut self, date_format: impl Into<String>) -> Self {
        self.date_format = date_format.into();
        self
    }

    /// Set how long toasts stay up.
    pub fn with_toast_duration(mut self, duration: Duration) -> Self {
        self.notifications = NotificationManager::with_dismiss_after(duration);
        self
    }

    pub fn store(&self) -> &ItemStore {
        &self.store
    }

    pub fn into_store(self) -> ItemStore {
        self.store
    }

    pub fn filter(&self) -> TypeFilter {
        self.filter
    }

    pub fn date_format(&self) -> &str {
        &self.date_format
    }

    /// Change the filter, keeping the selection in range.
    pub fn set_filter(&mut self, filter: TypeFilter) {
        debug!(%filter, "filter changed");
        self.filter = filter;
        self.clamp_selection();
    }

    /// Advance the filter control to its next option.
    pub fn cycle_filter(&mut self) {
        self.set_filter(self.filter.next());
    }

    /// Items passing the current filter, in store order.
    pub fn visible_items(&self) -> Vec<&RoadmapItem> {
        filter_items(self.store.items(), self.filter)
    }

    /// Timeline markers for the visible items.
    pub fn timeline(&self) -> Vec<TimelineMarker> {
        timeline::layout_with_format(&self.visible_items(), &self.date_format)
    }

    // === Selection ===

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn selected_item(&self) -> Option<&RoadmapItem> {
        self.visible_items().get(self.selected).copied()
    }

    pub fn select_next(&mut self) {
        let count = self.visible_items().len();
        if count > 0 {
            self.selected = (self.selected + 1).min(count - 1);
        }
    }

    pub fn select_previous(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn select_first(&mut self) {
        self.selected = 0;
    }

    pub fn select_last(&mut self) {
        self.selected = self.visible_items().len().saturating_sub(1);
    }

    fn clamp_selection(&mut self) {
        let count = self.visible_items().len();
        if self.selected >= count {
            self.selected = count.saturating_sub(1);
        }
    }

    // === Dialogs ===

    pub fn active_dialog(&self) -> Option<DialogKind> {
        self.forms.active_kind()
    }

    pub fn form(&self) -> Option<&FormState> {
        self.forms.active()
    }

    pub fn form_mut(&mut self) -> Option<&mut FormState> {
        self.forms.active_mut()
    }

    /// "+ Add Item": open the add dialog.
    pub fn open_add(&mut self) -> Result<&mut FormState> {
        self.forms.open_add()
    }

    /// Open the edit dialog for the item with `id`.
    pub fn open_edit(&mut self, id: u64) -> Result<&mut FormState> {
        let item = self.store.get(id).ok_or(Error::ItemNotFound(id))?;
        self.forms.open_edit(item)
    }

    /// Activate the edit affordance on the selected card.
    ///
    /// Returns the id of the item whose dialog opened, if one is selected.
    pub fn edit_selected(&mut self) -> Result<Option<u64>> {
        let mut requested = None;
        if let Some(item) = self.selected_item() {
            let id = item.id;
            let mut card = Card::new(item, || requested = Some(id));
            card.activate_edit();
        }
        match requested {
            Some(id) => {
                self.open_edit(id)?;
                Ok(Some(id))
            }
            None => Ok(None),
        }
    }

    /// Close the open dialog without changes.
    pub fn cancel_dialog(&mut self) -> Result<DialogKind> {
        self.forms.cancel()
    }

    /// Submit the open dialog.
    ///
    /// Success commits to the store, raises a confirmation toast and closes
    /// the dialog. A missing edit target raises an error toast and leaves the
    /// dialog open. Validation failures only mark the form.
    pub fn submit_dialog(&mut self) -> Result<Submitted> {
        match self.forms.submit(&mut self.store) {
            Ok(submitted) => {
                match &submitted {
                    Submitted::Added(_) => self.notifications.success(
                        "Item added",
                        "New roadmap item has been successfully added.",
                    ),
                    Submitted::Updated(_) => self.notifications.success(
                        "Item updated",
                        "The roadmap item has been successfully updated.",
                    ),
                }
                self.clamp_selection();
                Ok(submitted)
            }
            Err(Error::ItemNotFound(id)) => {
                self.notifications.error(
                    "Item not found",
                    format!("Roadmap item {} no longer exists.", id),
                );
                Err(Error::ItemNotFound(id))
            }
            Err(err) => Err(err),
        }
    }

    // === Notifications ===

    pub fn notifications(&self) -> &NotificationManager {
        &self.notifications
    }

    pub fn notifications_mut(&mut self) -> &mut NotificationManager {
        &mut self.notifications
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new(ItemStore::with_sample_items())
    }
}
