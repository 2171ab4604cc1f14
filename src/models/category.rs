use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Represents a catalog category.
#[derive(FromRow, Serialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    /// The unique identifier for the category.
    pub id: Uuid,
    /// The category's display name.
    pub name: String,
    /// The category's description.
    pub description: String,
    /// Public path of the category's image, if any.
    pub image: Option<String>,
    /// The timestamp when the category was created.
    pub created_at: DateTime<Utc>,
}

/// The request body for creating a category.
#[derive(Deserialize, Clone, Debug)]
pub struct NewCategory {
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub image: Option<String>,
}

/// A per-field category update. Absent fields stay unchanged; an
/// explicit `null` on `image` clears it.
#[derive(Deserialize, Default, Clone, Debug)]
#[serde(default)]
pub struct CategoryPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    #[serde(deserialize_with = "super::patch::double_option")]
    pub image: Option<Option<String>>,
}

impl CategoryPatch {
    /// Whether the patch changes nothing.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.description.is_none() && self.image.is_none()
    }
}
