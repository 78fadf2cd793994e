use anyhow::{bail, Result};

use crate::form::{FormMode, FormOutcome, MenuForm};
use crate::notifier::Notifier;
use crate::repository::MenuRepository;
use crate::types::ItemId;

/// Field overrides from the command line; `None` keeps the stored value.
#[derive(Debug, Default)]
pub struct FieldChanges {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<String>,
}

pub async fn run(repo: &dyn MenuRepository, notifier: &dyn Notifier, id: ItemId, changes: FieldChanges) -> Result<()> {
    let mut form = MenuForm::new(FormMode::Edit(id));
    if form.load_for_edit(repo, notifier).await == FormOutcome::NavigateBack {
        bail!("item {id} not loaded");
    }

    if let Some(name) = changes.name {
        form.fields.name = name;
    }
    if let Some(description) = changes.description {
        form.fields.description = description;
    }
    if let Some(price) = changes.price {
        form.fields.price = price;
    }

    match form.handle_save(repo, notifier).await {
        FormOutcome::NavigateBack => {
            println!("✓ Updated item {id}");
            Ok(())
        }
        FormOutcome::Stay => bail!("item {id} not updated"),
    }
}
