use anyhow::{bail, Result};

use crate::form::{FormFields, FormMode, FormOutcome, MenuForm};
use crate::notifier::Notifier;
use crate::repository::MenuRepository;

/// Create an item through the same form rules the TUI uses.
pub async fn run(repo: &dyn MenuRepository, notifier: &dyn Notifier, fields: FormFields) -> Result<()> {
    let mut form = MenuForm::new(FormMode::Create);
    form.fields = fields;
    match form.handle_save(repo, notifier).await {
        FormOutcome::NavigateBack => {
            println!("✓ Saved \"{}\"", form.fields.name.trim());
            Ok(())
        }
        FormOutcome::Stay => bail!("item not saved"),
    }
}
