use tracing::{error, info, warn};

use crate::error::{MenuError, ValidationError};
use crate::notifier::Notifier;
use crate::repository::MenuRepository;
use crate::types::{ItemId, MenuItem, NewMenuItem};

const NOT_FOUND: &str = "Item not found.";
const LOAD_FAILED: &str = "Could not load the item. Check that the data source is reachable.";
const SAVE_FAILED: &str = "Could not save the item. Check the connection and try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(ItemId),
}

impl FormMode {
    /// Mode from the navigation parameter. Anything that is not a non-zero
    /// integer means "create".
    pub fn from_param(param: Option<&str>) -> Self {
        match param.and_then(|p| p.trim().parse::<ItemId>().ok()) {
            Some(id) if id != 0 => FormMode::Edit(id),
            _ => FormMode::Create,
        }
    }
}

/// Raw text of the three inputs, exactly as typed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormFields {
    pub name: String,
    pub description: String,
    pub price: String,
}

impl FormFields {
    pub fn from_item(item: &MenuItem) -> Self {
        Self {
            name: item.name.clone(),
            description: item.description.clone(),
            price: item.price.to_string(),
        }
    }
}

pub fn validate(fields: &FormFields) -> Result<NewMenuItem, ValidationError> {
    let name = fields.name.trim();
    if name.is_empty() {
        return Err(ValidationError::MissingName);
    }
    let price_text = fields.price.trim();
    if price_text.is_empty() {
        return Err(ValidationError::MissingPrice);
    }
    let price: f64 = price_text.parse().map_err(|_| ValidationError::InvalidPrice)?;
    // `parse` accepts "inf" and "NaN".
    if !price.is_finite() {
        return Err(ValidationError::InvalidPrice);
    }
    if price < 0.0 {
        return Err(ValidationError::NegativePrice);
    }
    Ok(NewMenuItem {
        name: name.to_string(),
        description: fields.description.trim().to_string(),
        price,
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormOutcome {
    Stay,
    NavigateBack,
}

/// A validated write, ready to send to the repository.
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    pub mode: FormMode,
    pub item: NewMenuItem,
}

impl Submission {
    pub async fn send(&self, repo: &dyn MenuRepository) -> Result<(), MenuError> {
        match self.mode {
            FormMode::Create => repo.create(&self.item).await,
            FormMode::Edit(id) => repo.update(id, &self.item).await,
        }
    }
}

#[derive(Debug)]
pub struct MenuForm {
    mode: FormMode,
    pub fields: FormFields,
    loading: bool,
    submitting: bool,
}

impl MenuForm {
    /// Edit mode starts out loading; the fields stay locked until
    /// `finish_load` runs.
    pub fn new(mode: FormMode) -> Self {
        Self {
            mode,
            fields: FormFields::default(),
            loading: matches!(mode, FormMode::Edit(_)),
            submitting: false,
        }
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn can_submit(&self) -> bool {
        !self.loading && !self.submitting
    }

    pub fn title(&self) -> &'static str {
        match self.mode {
            FormMode::Create => "New Item",
            FormMode::Edit(_) => "Edit Item",
        }
    }

    pub fn save_label(&self) -> &'static str {
        match (self.submitting, self.mode) {
            (true, _) => "Saving...",
            (false, FormMode::Edit(_)) => "Update Item",
            (false, FormMode::Create) => "Save Item",
        }
    }

    /// Populate the fields from a fetched collection. A missing item or a
    /// failed fetch sends the user straight back to the list.
    pub fn finish_load(&mut self, result: Result<Vec<MenuItem>, MenuError>, notifier: &dyn Notifier) -> FormOutcome {
        self.loading = false;
        let FormMode::Edit(id) = self.mode else {
            return FormOutcome::Stay;
        };
        match result {
            Ok(items) => match items.iter().find(|i| i.id == id) {
                Some(item) => {
                    self.fields = FormFields::from_item(item);
                    FormOutcome::Stay
                }
                None => {
                    warn!(id, "edit target not found");
                    notifier.notify("Error", NOT_FOUND);
                    FormOutcome::NavigateBack
                }
            },
            Err(e) => {
                error!(id, error = %e, "loading item for edit failed");
                notifier.notify("Error", LOAD_FAILED);
                FormOutcome::NavigateBack
            }
        }
    }

    pub async fn load_for_edit(&mut self, repo: &dyn MenuRepository, notifier: &dyn Notifier) -> FormOutcome {
        if self.mode == FormMode::Create {
            self.loading = false;
            return FormOutcome::Stay;
        }
        let result = repo.list().await;
        self.finish_load(result, notifier)
    }

    /// Validate and mark the form as submitting. `None` means nothing should
    /// be sent: a save is already in flight, the form is still loading, or
    /// validation failed (already reported through `notifier`).
    pub fn begin_save(&mut self, notifier: &dyn Notifier) -> Option<Submission> {
        if !self.can_submit() {
            return None;
        }
        match validate(&self.fields) {
            Ok(item) => {
                self.submitting = true;
                Some(Submission { mode: self.mode, item })
            }
            Err(e) => {
                notifier.notify("Error", &e.to_string());
                None
            }
        }
    }

    pub fn finish_save(&mut self, result: Result<(), MenuError>, notifier: &dyn Notifier) -> FormOutcome {
        self.submitting = false;
        match result {
            Ok(()) => {
                info!(mode = ?self.mode, name = %self.fields.name.trim(), "item saved");
                FormOutcome::NavigateBack
            }
            Err(e) => {
                error!(mode = ?self.mode, error = %e, "save failed");
                notifier.notify("Error", SAVE_FAILED);
                FormOutcome::Stay
            }
        }
    }

    pub async fn handle_save(&mut self, repo: &dyn MenuRepository, notifier: &dyn Notifier) -> FormOutcome {
        let Some(submission) = self.begin_save(notifier) else {
            return FormOutcome::Stay;
        };
        let result = submission.send(repo).await;
        self.finish_save(result, notifier)
    }
}
