use anyhow::{bail, Result};

use crate::list::{remove_item, DeleteOutcome};
use crate::notifier::Notifier;
use crate::repository::MenuRepository;
use crate::types::ItemId;

pub async fn run(repo: &dyn MenuRepository, notifier: &dyn Notifier, id: ItemId) -> Result<()> {
    match remove_item(repo, id, notifier).await {
        DeleteOutcome::Deleted => Ok(()),
        DeleteOutcome::Declined => {
            println!("Nothing deleted.");
            Ok(())
        }
        DeleteOutcome::Failed => bail!("item {id} not deleted"),
    }
}
