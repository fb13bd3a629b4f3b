//! Field-level validation rules.
//!
//! Pure functions over plain records, invoked explicitly before any store
//! call. Every rule failure is collected; callers always see the full list of
//! offending fields.
//!
//! SKU uniqueness is deliberately absent here: it is enforced atomically by
//! the store (unique constraint / map scan) so the invariant also holds under
//! concurrent creates.

use warehouse_core::{DomainResult, ValidationErrors};

use crate::product::{
    DESCRIPTION_MAX_LEN, MAX_TOP_UP, NAME_MAX_LEN, NAME_MIN_LEN, NewProduct, ProductPatch,
    SKU_MAX_LEN, SKU_MIN_LEN,
};

/// Validate fields for product creation.
pub fn validate_new_product(new: &NewProduct) -> DomainResult<()> {
    let mut errors = ValidationErrors::new();
    check_sku(&mut errors, &new.sku);
    check_name(&mut errors, &new.name);
    if let Some(description) = &new.description {
        check_description(&mut errors, description);
    }
    if let Some(stock) = new.stock {
        if stock < 0 {
            errors.push("stock", "initial stock cannot be negative");
        }
    }
    errors.into_result()
}

/// Validate a partial update; absent fields are skipped.
pub fn validate_patch(patch: &ProductPatch) -> DomainResult<()> {
    let mut errors = ValidationErrors::new();
    if let Some(sku) = &patch.sku {
        check_sku(&mut errors, sku);
    }
    if let Some(name) = &patch.name {
        check_name(&mut errors, name);
    }
    if let Some(description) = &patch.description {
        check_description(&mut errors, description);
    }
    errors.into_result()
}

/// Validate a stock top-up amount: positive, at most `MAX_TOP_UP` per call.
pub fn validate_top_up(amount: i64) -> DomainResult<()> {
    let mut errors = ValidationErrors::new();
    if amount <= 0 {
        errors.push("stock", "stock to add must be a positive amount");
    } else if amount > MAX_TOP_UP {
        errors.push("stock", format!("stock to add cannot exceed {MAX_TOP_UP}"));
    }
    errors.into_result()
}

/// Validate an order quantity: at least 1.
pub fn validate_order_quantity(quantity: i64) -> DomainResult<()> {
    let mut errors = ValidationErrors::new();
    if quantity < 1 {
        errors.push("quantity", "quantity must be at least 1");
    }
    errors.into_result()
}

fn check_sku(errors: &mut ValidationErrors, sku: &str) {
    let len = sku.chars().count();
    if len < SKU_MIN_LEN {
        errors.push("sku", format!("SKU must be at least {SKU_MIN_LEN} characters"));
    } else if len > SKU_MAX_LEN {
        errors.push("sku", format!("SKU cannot exceed {SKU_MAX_LEN} characters"));
    }
}

fn check_name(errors: &mut ValidationErrors, name: &str) {
    let len = name.chars().count();
    if len < NAME_MIN_LEN {
        errors.push("name", format!("name must be at least {NAME_MIN_LEN} characters"));
    } else if len > NAME_MAX_LEN {
        errors.push("name", format!("name cannot exceed {NAME_MAX_LEN} characters"));
    }
}

fn check_description(errors: &mut ValidationErrors, description: &str) {
    if description.chars().count() > DESCRIPTION_MAX_LEN {
        errors.push(
            "description",
            format!("description cannot exceed {DESCRIPTION_MAX_LEN} characters"),
        );
    }
}
