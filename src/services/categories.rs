use uuid::Uuid;
use crate::{
    error::Result,
    models::category::{Category, CategoryPatch, NewCategory},
    repositories::category as category_repo,
    state::AppState,
};

/// Lists every category, newest first.
///
/// # Arguments
///
/// * `state` - The application state.
///
/// # Returns
///
/// A `Result` containing the categories.
pub async fn list_categories(state: &AppState) -> Result<Vec<Category>> {
    category_repo::list_categories(&state.db).await
}

/// Gets a category by id.
///
/// # Arguments
///
/// * `state` - The application state.
/// * `category_id` - The category's id.
///
/// # Returns
///
/// A `Result` containing an `Option<Category>`.
pub async fn get_category(state: &AppState, category_id: Uuid) -> Result<Option<Category>> {
    category_repo::find_category(&state.db, category_id).await
}

/// Creates a new category.
///
/// # Arguments
///
/// * `state` - The application state.
/// * `new` - The validated create payload.
///
/// # Returns
///
/// A `Result` containing the created `Category`.
pub async fn create_category(state: &AppState, new: NewCategory) -> Result<Category> {
    let category_id = Uuid::new_v4();

    let category = category_repo::insert_category(
        &state.db,
        category_id,
        new.name,
        new.description,
        new.image,
    )
    .await?;

    tracing::info!("✅ Category created: {} ({})", category.name, category.id);
    Ok(category)
}

/// Applies a per-field patch to a category.
///
/// # Arguments
///
/// * `state` - The application state.
/// * `category_id` - The category's id.
/// * `patch` - The fields to change.
///
/// # Returns
///
/// A `Result` containing the updated `Category`, or `None` when the id
/// does not exist.
pub async fn update_category(
    state: &AppState,
    category_id: Uuid,
    patch: CategoryPatch,
) -> Result<Option<Category>> {
    category_repo::update_category(&state.db, category_id, &patch).await
}

/// Deletes a category by id.
///
/// Products referencing the category keep their reference; it dangles
/// and embeds as `null` from then on.
///
/// # Arguments
///
/// * `state` - The application state.
/// * `category_id` - The category's id.
///
/// # Returns
///
/// A `Result` containing `true` when a row was deleted.
pub async fn delete_category(state: &AppState, category_id: Uuid) -> Result<bool> {
    let deleted = category_repo::delete_category(&state.db, category_id).await?;
    if deleted {
        tracing::info!("🧹 Category deleted: {}", category_id);
    }
    Ok(deleted)
}
