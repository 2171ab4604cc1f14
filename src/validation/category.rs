use crate::error::{AppError, Result};
use crate::models::category::{CategoryPatch, NewCategory};

/// Validates a category name.
///
/// # Arguments
///
/// * `name` - The name to validate.
///
/// # Returns
///
/// A `Result<()>` indicating whether the name is valid.
pub fn validate_category_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(AppError::Validation(
            "Category name is required".to_string(),
        ));
    }

    if name.len() > 200 {
        return Err(AppError::Validation(
            "Category name must be at most 200 characters".to_string(),
        ));
    }

    Ok(())
}

/// Validates a category description.
///
/// # Arguments
///
/// * `description` - The description to validate.
///
/// # Returns
///
/// A `Result<()>` indicating whether the description is valid.
pub fn validate_category_description(description: &str) -> Result<()> {
    if description.trim().is_empty() {
        return Err(AppError::Validation(
            "Category description is required".to_string(),
        ));
    }

    if description.len() > 5000 {
        return Err(AppError::Validation(
            "Category description must be at most 5000 characters".to_string(),
        ));
    }

    Ok(())
}

/// Validates the full create payload.
pub fn validate_new_category(category: &NewCategory) -> Result<()> {
    validate_category_name(&category.name)?;
    validate_category_description(&category.description)?;
    Ok(())
}

/// Validates whichever fields a patch provides.
pub fn validate_category_patch(patch: &CategoryPatch) -> Result<()> {
    if let Some(name) = &patch.name {
        validate_category_name(name)?;
    }
    if let Some(description) = &patch.description {
        validate_category_description(description)?;
    }
    Ok(())
}
