use crate::error::{AppError, Result};
use crate::models::product::{Dimensions, NewProduct, ProductPatch};

/// Validates a product name.
///
/// # Arguments
///
/// * `name` - The name to validate.
///
/// # Returns
///
/// A `Result<()>` indicating whether the name is valid.
pub fn validate_product_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(AppError::Validation("Product name is required".to_string()));
    }

    if name.len() > 200 {
        return Err(AppError::Validation(
            "Product name must be at most 200 characters".to_string(),
        ));
    }

    Ok(())
}

/// Validates a product description.
///
/// # Arguments
///
/// * `description` - The description to validate.
///
/// # Returns
///
/// A `Result<()>` indicating whether the description is valid.
pub fn validate_product_description(description: &str) -> Result<()> {
    if description.trim().is_empty() {
        return Err(AppError::Validation(
            "Product description is required".to_string(),
        ));
    }

    if description.len() > 5000 {
        return Err(AppError::Validation(
            "Product description must be at most 5000 characters".to_string(),
        ));
    }

    Ok(())
}

/// Validates a price.
///
/// # Arguments
///
/// * `price` - The price to validate.
///
/// # Returns
///
/// A `Result<()>` indicating whether the price is valid.
pub fn validate_price(price: f64) -> Result<()> {
    if !price.is_finite() || price < 0.0 {
        return Err(AppError::Validation(
            "Price must be a non-negative number".to_string(),
        ));
    }

    Ok(())
}

/// Validates a stock count.
///
/// # Arguments
///
/// * `stock` - The stock count to validate.
///
/// # Returns
///
/// A `Result<()>` indicating whether the stock count is valid.
pub fn validate_stock(stock: i32) -> Result<()> {
    if stock < 0 {
        return Err(AppError::Validation(
            "Stock must be a non-negative integer".to_string(),
        ));
    }

    Ok(())
}

/// Validates a set of dimensions. Each dimension is optional but must be
/// non-negative when present.
pub fn validate_dimensions(dimensions: &Dimensions) -> Result<()> {
    for (label, value) in [
        ("Width", dimensions.width),
        ("Height", dimensions.height),
        ("Depth", dimensions.depth),
    ] {
        if let Some(value) = value {
            if !value.is_finite() || value < 0.0 {
                return Err(AppError::Validation(format!(
                    "{label} must be a non-negative number"
                )));
            }
        }
    }

    Ok(())
}

/// Validates the full create payload.
pub fn validate_new_product(product: &NewProduct) -> Result<()> {
    validate_product_name(&product.name)?;
    validate_product_description(&product.description)?;
    validate_price(product.price)?;
    validate_stock(product.stock)?;
    if let Some(dimensions) = &product.dimensions {
        validate_dimensions(dimensions)?;
    }
    Ok(())
}

/// Validates whichever fields a patch provides.
pub fn validate_product_patch(patch: &ProductPatch) -> Result<()> {
    if let Some(name) = &patch.name {
        validate_product_name(name)?;
    }
    if let Some(description) = &patch.description {
        validate_product_description(description)?;
    }
    if let Some(price) = patch.price {
        validate_price(price)?;
    }
    if let Some(stock) = patch.stock {
        validate_stock(stock)?;
    }
    if let Some(Some(dimensions)) = &patch.dimensions {
        validate_dimensions(dimensions)?;
    }
    Ok(())
}
