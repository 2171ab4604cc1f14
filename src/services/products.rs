use uuid::Uuid;
use crate::{
    error::Result,
    models::product::{NewProduct, ProductPatch, ProductResponse},
    repositories::{category as category_repo, product as product_repo},
    repositories::product::ProductFilter,
    state::AppState,
};

/// Lists active products matching the filter, newest first, with the
/// category name embedded.
///
/// # Arguments
///
/// * `state` - The application state.
/// * `filter` - The optional listing filters.
///
/// # Returns
///
/// A `Result` containing the matching products.
pub async fn list_products(
    state: &AppState,
    filter: &ProductFilter,
) -> Result<Vec<ProductResponse>> {
    let rows = product_repo::list_products(&state.db, filter).await?;
    Ok(rows.into_iter().map(ProductResponse::from_listing).collect())
}

/// Gets a product by id with the category name and description embedded.
///
/// # Arguments
///
/// * `state` - The application state.
/// * `product_id` - The product's id.
///
/// # Returns
///
/// A `Result` containing an `Option<ProductResponse>`.
pub async fn get_product(state: &AppState, product_id: Uuid) -> Result<Option<ProductResponse>> {
    let row = product_repo::find_product(&state.db, product_id).await?;
    Ok(row.map(ProductResponse::from_detail))
}

/// Creates a new product.
///
/// # Arguments
///
/// * `state` - The application state.
/// * `new` - The validated create payload.
///
/// # Returns
///
/// A `Result` containing the created product with its category embed.
pub async fn create_product(state: &AppState, new: NewProduct) -> Result<ProductResponse> {
    let product_id = Uuid::new_v4();

    let product = product_repo::insert_product(&state.db, product_id, &new).await?;
    let category_name = category_repo::find_name(&state.db, product.category_id).await?;

    tracing::info!("✅ Product created: {} ({})", product.name, product.id);
    Ok(ProductResponse::from_parts(product, category_name))
}

/// Applies a per-field patch to a product.
///
/// # Arguments
///
/// * `state` - The application state.
/// * `product_id` - The product's id.
/// * `patch` - The fields to change.
///
/// # Returns
///
/// A `Result` containing the updated product, or `None` when the id does
/// not exist.
pub async fn update_product(
    state: &AppState,
    product_id: Uuid,
    patch: ProductPatch,
) -> Result<Option<ProductResponse>> {
    let Some(product) = product_repo::update_product(&state.db, product_id, &patch).await? else {
        return Ok(None);
    };

    let category_name = category_repo::find_name(&state.db, product.category_id).await?;
    Ok(Some(ProductResponse::from_parts(product, category_name)))
}

/// Deletes a product by id.
///
/// # Arguments
///
/// * `state` - The application state.
/// * `product_id` - The product's id.
///
/// # Returns
///
/// A `Result` containing `true` when a row was deleted.
pub async fn delete_product(state: &AppState, product_id: Uuid) -> Result<bool> {
    let deleted = product_repo::delete_product(&state.db, product_id).await?;
    if deleted {
        tracing::info!("🧹 Product deleted: {}", product_id);
    }
    Ok(deleted)
}
