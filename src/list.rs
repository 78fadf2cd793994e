use tracing::{debug, error, info};

use crate::error::MenuError;
use crate::notifier::Notifier;
use crate::repository::MenuRepository;
use crate::types::{ItemId, MenuItem};

pub const EMPTY_MESSAGE: &str = "No items registered.";
const LOAD_FAILED: &str = "Could not load the menu. Check that the data source is reachable.";
const DELETE_PROMPT: &str = "Delete this item?";
const DELETE_FAILED: &str = "Could not delete the item.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Declined,
    Deleted,
    Failed,
}

/// What the list screen should show right now.
#[derive(Debug, PartialEq)]
pub enum ListDisplay<'a> {
    Loading,
    Empty,
    Items(&'a [MenuItem]),
}

/// State behind the menu list. Items always mirror the last completed fetch;
/// nothing is predicted locally after a mutation.
#[derive(Debug, Default)]
pub struct MenuList {
    items: Vec<MenuItem>,
    loading: bool,
}

impl MenuList {
    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn display(&self) -> ListDisplay<'_> {
        if !self.items.is_empty() {
            ListDisplay::Items(&self.items)
        } else if self.loading {
            ListDisplay::Loading
        } else {
            ListDisplay::Empty
        }
    }

    pub fn begin_load(&mut self) {
        self.loading = true;
    }

    /// Apply a finished fetch; returns whether it succeeded. Overlapping
    /// fetches are not sequenced: whichever result is applied last is what
    /// the list shows.
    pub fn finish_load(&mut self, result: Result<Vec<MenuItem>, MenuError>, notifier: &dyn Notifier) -> bool {
        self.loading = false;
        match result {
            Ok(items) => {
                debug!(count = items.len(), "menu loaded");
                self.items = items;
                true
            }
            Err(e) => {
                error!(error = %e, "loading menu failed");
                notifier.notify("Error", LOAD_FAILED);
                false
            }
        }
    }

    pub async fn load_items(&mut self, repo: &dyn MenuRepository, notifier: &dyn Notifier) -> bool {
        self.begin_load();
        let result = repo.list().await;
        self.finish_load(result, notifier)
    }

    /// Confirm, delete, then reload from the source of truth.
    pub async fn delete_item(&mut self, repo: &dyn MenuRepository, id: ItemId, notifier: &dyn Notifier) -> DeleteOutcome {
        let outcome = remove_item(repo, id, notifier).await;
        if outcome == DeleteOutcome::Deleted {
            self.load_items(repo, notifier).await;
        }
        outcome
    }
}

/// Ask for confirmation, then delete `id`. Only `Deleted` changes the
/// collection.
pub async fn remove_item(repo: &dyn MenuRepository, id: ItemId, notifier: &dyn Notifier) -> DeleteOutcome {
    if !begin_delete(id, notifier) {
        return DeleteOutcome::Declined;
    }
    let result = repo.delete(id).await;
    finish_delete(id, result, notifier)
}

/// The confirmation half of `remove_item`: true when the delete may be sent.
pub fn begin_delete(id: ItemId, notifier: &dyn Notifier) -> bool {
    let confirmed = notifier.confirm(DELETE_PROMPT);
    if !confirmed {
        debug!(id, "delete declined");
    }
    confirmed
}

pub fn finish_delete(id: ItemId, result: Result<(), MenuError>, notifier: &dyn Notifier) -> DeleteOutcome {
    match result {
        Ok(()) => {
            info!(id, "item deleted");
            notifier.notify("Success", "Item deleted.");
            DeleteOutcome::Deleted
        }
        Err(e) => {
            error!(id, error = %e, "delete failed");
            notifier.notify("Error", DELETE_FAILED);
            DeleteOutcome::Failed
        }
    }
}
