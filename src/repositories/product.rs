use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;
use crate::{
    error::Result,
    models::product::{NewProduct, Product, ProductPatch, ProductRow},
};

/// Optional filters applied to the public product listing. All present
/// filters combine conjunctively; only the search clause contains an OR.
#[derive(Debug, Default, Clone)]
pub struct ProductFilter {
    /// Restrict to products referencing this category.
    pub category: Option<Uuid>,
    /// Case-insensitive substring match against name or description.
    pub search: Option<String>,
    /// Lower price bound, inclusive.
    pub min_price: Option<f64>,
    /// Upper price bound, inclusive.
    pub max_price: Option<f64>,
}

const PRODUCT_JOIN_SELECT: &str = r#"
        SELECT p.id, p.name, p.description, p.price, p.category_id, p.images,
               p.stock, p.material, p.color, p.width, p.height, p.depth,
               p.is_active, p.created_at,
               c.name AS category_name, c.description AS category_description
        FROM products p
        LEFT JOIN categories c ON c.id = p.category_id
        "#;

/// Lists active products matching the filter, newest first, each joined
/// with its category's public fields.
///
/// # Arguments
///
/// * `db` - The database connection pool.
/// * `filter` - The optional listing filters.
///
/// # Returns
///
/// A `Result` containing the matching rows.
pub async fn list_products(db: &PgPool, filter: &ProductFilter) -> Result<Vec<ProductRow>> {
    let mut builder = QueryBuilder::<Postgres>::new(PRODUCT_JOIN_SELECT);
    builder.push("WHERE p.is_active = TRUE");
    push_filters(&mut builder, filter);
    builder.push(" ORDER BY p.created_at DESC");

    let products = builder
        .build_query_as::<ProductRow>()
        .fetch_all(db)
        .await?;

    Ok(products)
}

/// Finds a product by id, joined with its category's public fields.
///
/// No `is_active` filter here: inactive products stay directly
/// addressable by id even though listings hide them.
///
/// # Arguments
///
/// * `db` - The database connection pool.
/// * `id` - The product's id.
///
/// # Returns
///
/// A `Result` containing an `Option<ProductRow>`.
pub async fn find_product(db: &PgPool, id: Uuid) -> Result<Option<ProductRow>> {
    let mut builder = QueryBuilder::<Postgres>::new(PRODUCT_JOIN_SELECT);
    builder.push("WHERE p.id = ");
    builder.push_bind(id);

    let product = builder
        .build_query_as::<ProductRow>()
        .fetch_optional(db)
        .await?;

    Ok(product)
}

/// Inserts a new product.
///
/// # Arguments
///
/// * `db` - The database connection pool.
/// * `id` - The unique identifier for the product.
/// * `new` - The validated create payload.
///
/// # Returns
///
/// A `Result` containing the created `Product`.
pub async fn insert_product(db: &PgPool, id: Uuid, new: &NewProduct) -> Result<Product> {
    let dimensions = new.dimensions.clone().unwrap_or_default();

    let product = sqlx::query_as::<_, Product>(
        r#"
        INSERT INTO products (id, name, description, price, category_id, images,
                              stock, material, color, width, height, depth)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
        RETURNING id, name, description, price, category_id, images, stock,
                  material, color, width, height, depth, is_active, created_at
        "#,
    )
    .bind(id)
    .bind(new.name.clone())
    .bind(new.description.clone())
    .bind(new.price)
    .bind(new.category)
    .bind(new.images.clone())
    .bind(new.stock)
    .bind(new.material.clone())
    .bind(new.color.clone())
    .bind(dimensions.width)
    .bind(dimensions.height)
    .bind(dimensions.depth)
    .fetch_one(db)
    .await?;

    Ok(product)
}

/// Applies a per-field patch to a product. An empty patch is a no-op
/// that returns the current row.
///
/// # Arguments
///
/// * `db` - The database connection pool.
/// * `id` - The product's id.
/// * `patch` - The fields to change.
///
/// # Returns
///
/// A `Result` containing the updated `Product`, or `None` when the id
/// does not exist.
pub async fn update_product(
    db: &PgPool,
    id: Uuid,
    patch: &ProductPatch,
) -> Result<Option<Product>> {
    if patch.is_empty() {
        return select_product(db, id).await;
    }

    let mut builder = QueryBuilder::<Postgres>::new("UPDATE products SET ");
    push_product_sets(&mut builder, patch);
    builder.push(" WHERE id = ");
    builder.push_bind(id);
    builder.push(
        " RETURNING id, name, description, price, category_id, images, stock, \
         material, color, width, height, depth, is_active, created_at",
    );

    let product = builder
        .build_query_as::<Product>()
        .fetch_optional(db)
        .await?;

    Ok(product)
}

/// Deletes a product by id.
///
/// # Arguments
///
/// * `db` - The database connection pool.
/// * `id` - The product's id.
///
/// # Returns
///
/// A `Result` containing `true` when a row was deleted.
pub async fn delete_product(db: &PgPool, id: Uuid) -> Result<bool> {
    let result = sqlx::query("DELETE FROM products WHERE id = $1")
        .bind(id)
        .execute(db)
        .await?;

    Ok(result.rows_affected() > 0)
}

async fn select_product(db: &PgPool, id: Uuid) -> Result<Option<Product>> {
    let product = sqlx::query_as::<_, Product>(
        r#"
        SELECT id, name, description, price, category_id, images, stock,
               material, color, width, height, depth, is_active, created_at
        FROM products
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(db)
    .await?;

    Ok(product)
}

/// Appends the filter predicates to a listing query.
fn push_filters(builder: &mut QueryBuilder<'_, Postgres>, filter: &ProductFilter) {
    if let Some(category) = filter.category {
        builder.push(" AND p.category_id = ");
        builder.push_bind(category);
    }

    if let Some(search) = &filter.search {
        let pattern = like_pattern(search);
        builder.push(" AND (p.name ILIKE ");
        builder.push_bind(pattern.clone());
        builder.push(" OR p.description ILIKE ");
        builder.push_bind(pattern);
        builder.push(")");
    }

    if let Some(min_price) = filter.min_price {
        builder.push(" AND p.price >= ");
        builder.push_bind(min_price);
    }

    if let Some(max_price) = filter.max_price {
        builder.push(" AND p.price <= ");
        builder.push_bind(max_price);
    }
}

/// Appends `column = $n` assignments for every provided patch field.
/// Nullable fields arrive double-wrapped: `Some(None)` binds NULL and
/// clears the column. A `dimensions` entry always assigns all three
/// columns so a partial object replaces the whole group.
fn push_product_sets(builder: &mut QueryBuilder<'_, Postgres>, patch: &ProductPatch) {
    let mut sets = builder.separated(", ");

    if let Some(name) = &patch.name {
        sets.push("name = ");
        sets.push_bind_unseparated(name.clone());
    }
    if let Some(description) = &patch.description {
        sets.push("description = ");
        sets.push_bind_unseparated(description.clone());
    }
    if let Some(price) = patch.price {
        sets.push("price = ");
        sets.push_bind_unseparated(price);
    }
    if let Some(category) = patch.category {
        sets.push("category_id = ");
        sets.push_bind_unseparated(category);
    }
    if let Some(images) = &patch.images {
        sets.push("images = ");
        sets.push_bind_unseparated(images.clone());
    }
    if let Some(stock) = patch.stock {
        sets.push("stock = ");
        sets.push_bind_unseparated(stock);
    }
    if let Some(material) = &patch.material {
        sets.push("material = ");
        sets.push_bind_unseparated(material.clone());
    }
    if let Some(color) = &patch.color {
        sets.push("color = ");
        sets.push_bind_unseparated(color.clone());
    }
    if let Some(dimensions) = &patch.dimensions {
        let d = dimensions.clone().unwrap_or_default();
        sets.push("width = ");
        sets.push_bind_unseparated(d.width);
        sets.push("height = ");
        sets.push_bind_unseparated(d.height);
        sets.push("depth = ");
        sets.push_bind_unseparated(d.depth);
    }
    if let Some(is_active) = patch.is_active {
        sets.push("is_active = ");
        sets.push_bind_unseparated(is_active);
    }
}

/// Builds a `%…%` ILIKE pattern, escaping the wildcard characters so the
/// search text is matched literally.
fn like_pattern(term: &str) -> String {
    let escaped = term
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}
