use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Represents a catalog product.
#[derive(FromRow, Clone, Debug)]
pub struct Product {
    /// The unique identifier for the product.
    pub id: Uuid,
    /// The product's display name.
    pub name: String,
    /// The product's description.
    pub description: String,
    /// The product's price.
    pub price: f64,
    /// The referenced category. Resolved by convention, never by a
    /// foreign key; may dangle after the category is deleted.
    pub category_id: Uuid,
    /// Public paths of the product's images.
    pub images: Vec<String>,
    /// Units in stock.
    pub stock: i32,
    /// The product's material, if specified.
    pub material: Option<String>,
    /// The product's color, if specified.
    pub color: Option<String>,
    /// Width in centimeters, if specified.
    pub width: Option<f64>,
    /// Height in centimeters, if specified.
    pub height: Option<f64>,
    /// Depth in centimeters, if specified.
    pub depth: Option<f64>,
    /// Whether the product is publicly visible in listings.
    pub is_active: bool,
    /// The timestamp when the product was created.
    pub created_at: DateTime<Utc>,
}

/// A product row joined with its category's public fields.
#[derive(FromRow, Clone, Debug)]
pub struct ProductRow {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub category_id: Uuid,
    pub images: Vec<String>,
    pub stock: i32,
    pub material: Option<String>,
    pub color: Option<String>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub depth: Option<f64>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    /// Name of the joined category; `None` when the reference dangles.
    pub category_name: Option<String>,
    /// Description of the joined category.
    pub category_description: Option<String>,
}

/// Optional physical dimensions, grouped on the wire.
#[derive(Serialize, Deserialize, Default, Clone, Debug, PartialEq)]
pub struct Dimensions {
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub depth: Option<f64>,
}

impl Dimensions {
    fn from_columns(width: Option<f64>, height: Option<f64>, depth: Option<f64>) -> Option<Self> {
        if width.is_none() && height.is_none() && depth.is_none() {
            return None;
        }
        Some(Self { width, height, depth })
    }
}

/// The category fields embedded in product responses.
#[derive(Serialize, Clone, Debug)]
pub struct CategoryRef {
    pub id: Uuid,
    pub name: String,
    /// Only present on single-product fetches.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// The wire shape of a product. The category reference is embedded as
/// its resolved fields, or `null` when it dangles.
#[derive(Serialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ProductResponse {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub category: Option<CategoryRef>,
    pub images: Vec<String>,
    pub stock: i32,
    pub material: Option<String>,
    pub color: Option<String>,
    pub dimensions: Option<Dimensions>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl ProductResponse {
    /// Listing shape: the embedded category carries its name only.
    pub fn from_listing(row: ProductRow) -> Self {
        Self::from_row(row, false)
    }

    /// Detail shape: the embedded category carries name and description.
    pub fn from_detail(row: ProductRow) -> Self {
        Self::from_row(row, true)
    }

    /// Mutation shape: built from a bare row plus a separately resolved
    /// category name.
    pub fn from_parts(product: Product, category_name: Option<String>) -> Self {
        Self {
            category: category_name.map(|name| CategoryRef {
                id: product.category_id,
                name,
                description: None,
            }),
            dimensions: Dimensions::from_columns(product.width, product.height, product.depth),
            id: product.id,
            name: product.name,
            description: product.description,
            price: product.price,
            images: product.images,
            stock: product.stock,
            material: product.material,
            color: product.color,
            is_active: product.is_active,
            created_at: product.created_at,
        }
    }

    fn from_row(row: ProductRow, with_category_description: bool) -> Self {
        let category = row.category_name.map(|name| CategoryRef {
            id: row.category_id,
            name,
            description: if with_category_description {
                row.category_description
            } else {
                None
            },
        });

        Self {
            category,
            dimensions: Dimensions::from_columns(row.width, row.height, row.depth),
            id: row.id,
            name: row.name,
            description: row.description,
            price: row.price,
            images: row.images,
            stock: row.stock,
            material: row.material,
            color: row.color,
            is_active: row.is_active,
            created_at: row.created_at,
        }
    }
}

/// The request body for creating a product.
#[derive(Deserialize, Clone, Debug)]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub price: f64,
    /// Id of the referenced category. Existence is not checked.
    pub category: Uuid,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub stock: i32,
    #[serde(default)]
    pub material: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub dimensions: Option<Dimensions>,
}

/// A per-field product update. Absent fields stay unchanged; an explicit
/// `null` clears `material`, `color` or `dimensions`.
#[derive(Deserialize, Default, Clone, Debug)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub category: Option<Uuid>,
    pub images: Option<Vec<String>>,
    pub stock: Option<i32>,
    #[serde(deserialize_with = "super::patch::double_option")]
    pub material: Option<Option<String>>,
    #[serde(deserialize_with = "super::patch::double_option")]
    pub color: Option<Option<String>>,
    #[serde(deserialize_with = "super::patch::double_option")]
    pub dimensions: Option<Option<Dimensions>>,
    pub is_active: Option<bool>,
}

impl ProductPatch {
    /// Whether the patch changes nothing.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.price.is_none()
            && self.category.is_none()
            && self.images.is_none()
            && self.stock.is_none()
            && self.material.is_none()
            && self.color.is_none()
            && self.dimensions.is_none()
            && self.is_active.is_none()
    }
}
