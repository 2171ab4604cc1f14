use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;
use crate::{
    error::Result,
    models::category::{Category, CategoryPatch},
};

/// Lists every category, newest first.
///
/// # Arguments
///
/// * `db` - The database connection pool.
///
/// # Returns
///
/// A `Result` containing the categories.
pub async fn list_categories(db: &PgPool) -> Result<Vec<Category>> {
    let categories = sqlx::query_as::<_, Category>(
        r#"
        SELECT id, name, description, image, created_at
        FROM categories
        ORDER BY created_at DESC
        "#,
    )
    .fetch_all(db)
    .await?;

    Ok(categories)
}

/// Finds a category by id.
///
/// # Arguments
///
/// * `db` - The database connection pool.
/// * `id` - The category's id.
///
/// # Returns
///
/// A `Result` containing an `Option<Category>`.
pub async fn find_category(db: &PgPool, id: Uuid) -> Result<Option<Category>> {
    let category = sqlx::query_as::<_, Category>(
        r#"
        SELECT id, name, description, image, created_at
        FROM categories
        WHERE id = $1
        "#,
    )
    .bind(id)
    .fetch_optional(db)
    .await?;

    Ok(category)
}

/// Resolves a category reference to its name, used when embedding the
/// category into a freshly mutated product.
pub async fn find_name(db: &PgPool, id: Uuid) -> Result<Option<String>> {
    let name = sqlx::query_scalar::<_, String>("SELECT name FROM categories WHERE id = $1")
        .bind(id)
        .fetch_optional(db)
        .await?;

    Ok(name)
}

/// Inserts a new category.
///
/// # Arguments
///
/// * `db` - The database connection pool.
/// * `id` - The unique identifier for the category.
/// * `name` - The category's name.
/// * `description` - The category's description.
/// * `image` - Public path of the category's image, if any.
///
/// # Returns
///
/// A `Result` containing the created `Category`.
pub async fn insert_category(
    db: &PgPool,
    id: Uuid,
    name: String,
    description: String,
    image: Option<String>,
) -> Result<Category> {
    let category = sqlx::query_as::<_, Category>(
        r#"
        INSERT INTO categories (id, name, description, image)
        VALUES ($1, $2, $3, $4)
        RETURNING id, name, description, image, created_at
        "#,
    )
    .bind(id)
    .bind(name)
    .bind(description)
    .bind(image)
    .fetch_one(db)
    .await?;

    Ok(category)
}

/// Applies a per-field patch to a category. An empty patch is a no-op
/// that returns the current row.
///
/// # Arguments
///
/// * `db` - The database connection pool.
/// * `id` - The category's id.
/// * `patch` - The fields to change.
///
/// # Returns
///
/// A `Result` containing the updated `Category`, or `None` when the id
/// does not exist.
pub async fn update_category(
    db: &PgPool,
    id: Uuid,
    patch: &CategoryPatch,
) -> Result<Option<Category>> {
    if patch.is_empty() {
        return find_category(db, id).await;
    }

    let mut builder = QueryBuilder::<Postgres>::new("UPDATE categories SET ");
    push_category_sets(&mut builder, patch);
    builder.push(" WHERE id = ");
    builder.push_bind(id);
    builder.push(" RETURNING id, name, description, image, created_at");

    let category = builder
        .build_query_as::<Category>()
        .fetch_optional(db)
        .await?;

    Ok(category)
}

/// Appends `column = $n` assignments for every provided patch field.
/// `image` is nullable: a patch carrying `Some(None)` binds NULL.
fn push_category_sets(builder: &mut QueryBuilder<'_, Postgres>, patch: &CategoryPatch) {
    let mut sets = builder.separated(", ");
    if let Some(name) = &patch.name {
        sets.push("name = ");
        sets.push_bind_unseparated(name.clone());
    }
    if let Some(description) = &patch.description {
        sets.push("description = ");
        sets.push_bind_unseparated(description.clone());
    }
    if let Some(image) = &patch.image {
        sets.push("image = ");
        sets.push_bind_unseparated(image.clone());
    }
}

/// Deletes a category by id.
///
/// # Arguments
///
/// * `db` - The database connection pool.
/// * `id` - The category's id.
///
/// # Returns
///
/// A `Result` containing `true` when a row was deleted.
pub async fn delete_category(db: &PgPool, id: Uuid) -> Result<bool> {
    let result = sqlx::query("DELETE FROM categories WHERE id = $1")
        .bind(id)
        .execute(db)
        .await?;

    Ok(result.rows_affected() > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_patch_builds_only_provided_columns() {
        let patch = CategoryPatch {
            name: Some("Masalar".to_string()),
            description: None,
            image: Some(None),
        };

        let mut builder = QueryBuilder::<Postgres>::new("UPDATE categories SET ");
        push_category_sets(&mut builder, &patch);

        let sql = builder.sql();
        assert!(sql.contains("name = $1"));
        assert!(sql.contains("image = $2"));
        assert!(!sql.contains("description ="));
    }

    #[test]
    fn test_full_patch_sets_every_column() {
        let patch = CategoryPatch {
            name: Some("Masalar".to_string()),
            description: Some("Tables".to_string()),
            image: Some(Some("/uploads/masa.jpg".to_string())),
        };

        let mut builder = QueryBuilder::<Postgres>::new("UPDATE categories SET ");
        push_category_sets(&mut builder, &patch);

        assert_eq!(
            builder.sql(),
            "UPDATE categories SET name = $1, description = $2, image = $3"
        );
    }
}
