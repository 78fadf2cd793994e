//! Data access for the menu. Screens only ever see [`MenuRepository`]; which
//! backend sits behind it is decided once, from configuration.

use async_trait::async_trait;

use crate::error::MenuError;
use crate::types::{ItemId, MenuItem, NewMenuItem};

pub mod local;
pub mod remote;

pub use local::LocalRepository;
pub use remote::RemoteRepository;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MenuRepository: Send + Sync {
    /// The whole collection, in the backend's order.
    async fn list(&self) -> Result<Vec<MenuItem>, MenuError>;

    /// Add a new item; the backend assigns its id.
    async fn create(&self, item: &NewMenuItem) -> Result<(), MenuError>;

    /// Replace every field of the item with `id`.
    async fn update(&self, id: ItemId, item: &NewMenuItem) -> Result<(), MenuError>;

    async fn delete(&self, id: ItemId) -> Result<(), MenuError>;
}
