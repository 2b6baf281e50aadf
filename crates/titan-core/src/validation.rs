//! # Validation Module
//!
//! Input validation for records written to the order store.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Two Directions, Two Policies                       │
//! │                                                                         │
//! │  WRITE (seed, imports) ── THIS MODULE ──► reject bad records early     │
//! │                                                                         │
//! │  READ  (reports)       ── normalize.rs ─► coerce, never fail            │
//! │                                                                         │
//! │  A report must render even when historic data is dirty, but nothing    │
//! │  new should add to the dirt.                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use titan_core::validation::{validate_product_name, validate_quantity};
//!
//! assert!(validate_product_name("Cà phê sữa đá").is_ok());
//! assert!(validate_quantity(0).is_err());
//! ```

use crate::error::ValidationError;
use crate::money::Money;
use crate::normalize::parse_timestamp;
use crate::types::{OrderStatus, PaymentMethod, RawOrder, RawOrderItem};
use crate::{MAX_ITEM_QUANTITY, MAX_PRODUCT_NAME_LEN};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a product name.
///
/// ## Rules
/// - Must not be empty
/// - Must be at most 200 characters
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "product_name".to_string(),
        });
    }

    if name.chars().count() > MAX_PRODUCT_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "product_name".to_string(),
            max: MAX_PRODUCT_NAME_LEN,
        });
    }

    Ok(())
}

/// Validates a tenant domain.
///
/// ## Rules
/// - Must not be empty
/// - Letters, digits, dots, hyphens only
pub fn validate_tenant_domain(domain: &str) -> ValidationResult<()> {
    let domain = domain.trim();

    if domain.is_empty() {
        return Err(ValidationError::Required {
            field: "tenant domain".to_string(),
        });
    }

    if !domain
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-')
    {
        return Err(ValidationError::InvalidFormat {
            field: "tenant domain".to_string(),
            reason: "must contain only letters, numbers, dots, and hyphens".to_string(),
        });
    }

    Ok(())
}

/// Validates an order status code.
pub fn validate_status(code: &str) -> ValidationResult<OrderStatus> {
    match OrderStatus::from_code(code) {
        OrderStatus::Other => Err(ValidationError::NotAllowed {
            field: "status".to_string(),
            allowed: OrderStatus::KNOWN.iter().map(|s| s.code().to_string()).collect(),
        }),
        status => Ok(status),
    }
}

/// Validates a payment method code.
///
/// Reads tolerate unknown codes (they count as cash); writes do not.
pub fn validate_payment_method(code: &str) -> ValidationResult<PaymentMethod> {
    PaymentMethod::recognize(code).ok_or_else(|| ValidationError::NotAllowed {
        field: "payment_method".to_string(),
        allowed: PaymentMethod::ALL.iter().map(|m| m.code().to_string()).collect(),
    })
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a quantity value.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed MAX_ITEM_QUANTITY (999)
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_ITEM_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_ITEM_QUANTITY,
        });
    }

    Ok(())
}

/// Validates a decimal amount field and returns the parsed value.
///
/// ## Rules
/// - Missing is allowed (treated as zero)
/// - Must parse as a decimal number
/// - Must be non-negative
pub fn validate_amount(field: &str, raw: Option<&str>) -> ValidationResult<Money> {
    let Some(raw) = raw else {
        return Ok(Money::zero());
    };

    let amount = Money::parse_decimal(raw).ok_or_else(|| ValidationError::InvalidFormat {
        field: field.to_string(),
        reason: format!("'{}' is not a decimal number", raw),
    })?;

    if amount.is_negative() {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(amount)
}

// =============================================================================
// Record Validators
// =============================================================================

/// Validates an order before it is written.
pub fn validate_raw_order(order: &RawOrder) -> ValidationResult<()> {
    validate_status(order.status.as_deref().unwrap_or_default())?;
    validate_amount("total", order.total.as_deref())?;
    validate_amount("subtotal", order.subtotal.as_deref())?;
    validate_amount("tax", order.tax.as_deref())?;
    validate_amount("discount", order.discount.as_deref())?;

    if let Some(code) = order.payment_method.as_deref() {
        validate_payment_method(code)?;
    }

    if let Some(count) = order.customer_count {
        if count < 1 {
            return Err(ValidationError::MustBePositive {
                field: "customer_count".to_string(),
            });
        }
    }

    match order.ordered_at.as_deref() {
        None => Err(ValidationError::Required {
            field: "ordered_at".to_string(),
        }),
        Some(raw) if parse_timestamp(raw).is_none() => Err(ValidationError::InvalidFormat {
            field: "ordered_at".to_string(),
            reason: format!("'{}' is not an RFC 3339 or SQL timestamp", raw),
        }),
        Some(_) => Ok(()),
    }
}

/// Validates an order item before it is written.
pub fn validate_raw_order_item(item: &RawOrderItem) -> ValidationResult<()> {
    validate_product_name(item.product_name.as_deref().unwrap_or_default())?;
    validate_quantity(item.quantity.unwrap_or(0))?;
    validate_amount("unit_price", item.unit_price.as_deref())?;
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
