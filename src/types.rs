use serde::{Deserialize, Deserializer, Serialize};

/// Identifier of a menu item: server-assigned remotely, a millisecond
/// timestamp locally.
pub type ItemId = i64;

/// A sellable product on the menu.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: ItemId,
    pub name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,
    pub price: f64,
}

/// Validated field values for a create or an update. Updates replace every
/// field at once, so there is no partial variant.
#[derive(Debug, Clone, PartialEq)]
pub struct NewMenuItem {
    pub name: String,
    pub description: String,
    pub price: f64,
}

impl MenuItem {
    pub fn from_new(id: ItemId, item: &NewMenuItem) -> Self {
        Self {
            id,
            name: item.name.clone(),
            description: item.description.clone(),
            price: item.price,
        }
    }

    /// Overwrite all editable fields, keeping the id.
    pub fn replace_fields(&mut self, item: &NewMenuItem) {
        self.name = item.name.clone();
        self.description = item.description.clone();
        self.price = item.price;
    }
}

pub fn format_price(currency: &str, price: f64) -> String {
    format!("{currency} {price:.2}")
}

// The server stores whatever the client sent, so `description` may come back as null.
fn null_as_empty<'de, D>(d: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(d)?.unwrap_or_default())
}
