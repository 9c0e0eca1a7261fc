//! # Validation Module
//!
//! Input validation utilities for Stockroom.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Frontend form                                                │
//! │  ├── Basic format checks (empty, length)                               │
//! │  └── Immediate user feedback                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: backoffice command                                           │
//! │  ├── Type validation (deserialization)                                 │
//! │  └── THIS MODULE: Business rule validation                             │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Inventory state                                              │
//! │  └── Existence checks (not found, duplicate category)                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The query engine never validates: records already in the store are
//! filtered as they are. These checks only guard the way in.
//!
//! ## Usage
//! ```rust
//! use stockroom_core::validation::{validate_product_code, validate_stock};
//!
//! validate_product_code("E-100").unwrap();
//! assert!(validate_stock(-1).is_err());
//! ```

use crate::error::ValidationError;
use crate::types::{Product, Settings, Supplier};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

const MAX_NAME_LEN: usize = 200;
const MAX_CODE_LEN: usize = 50;
const MAX_CATEGORY_LEN: usize = 50;
const MAX_DOCUMENT_LEN: usize = 30;
const MAX_PHONE_LEN: usize = 30;
const MAX_SEARCH_LEN: usize = 100;
const MAX_ID_LEN: usize = 64;

// =============================================================================
// String Validators
// =============================================================================

fn required(field: &str, value: &str, max: usize) -> ValidationResult<()> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if value.chars().count() > max {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
        });
    }

    Ok(())
}

/// Validates a product name.
///
/// ## Rules
/// - Must not be empty
/// - At most 200 characters
///
/// ## Example
/// ```rust
/// use stockroom_core::validation::validate_product_name;
///
/// assert!(validate_product_name("Whole Milk 1L").is_ok());
/// assert!(validate_product_name("   ").is_err());
/// ```
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    required("name", name, MAX_NAME_LEN)
}

/// Validates a product code.
///
/// ## Rules
/// - Must not be empty
/// - At most 50 characters
/// - No whitespace inside the code
pub fn validate_product_code(code: &str) -> ValidationResult<()> {
    required("code", code, MAX_CODE_LEN)?;

    if code.trim().chars().any(char::is_whitespace) {
        return Err(ValidationError::InvalidFormat {
            field: "code".to_string(),
            reason: "must not contain spaces".to_string(),
        });
    }

    Ok(())
}

/// Validates a category label.
pub fn validate_category_name(label: &str) -> ValidationResult<()> {
    required("category", label, MAX_CATEGORY_LEN)
}

/// Validates a supplier's legal name.
pub fn validate_legal_name(name: &str) -> ValidationResult<()> {
    required("legalName", name, MAX_NAME_LEN)
}

/// Validates a supplier registration document.
///
/// ## Rules
/// - Must not be empty
/// - At most 30 characters
/// - Digits plus the usual punctuation (`.`, `-`, `/`)
///
/// ## Example
/// ```rust
/// use stockroom_core::validation::validate_document;
///
/// assert!(validate_document("12.345.678/0001-90").is_ok());
/// assert!(validate_document("ABC").is_err());
/// ```
pub fn validate_document(document: &str) -> ValidationResult<()> {
    required("document", document, MAX_DOCUMENT_LEN)?;

    let document = document.trim();
    let valid = document.chars().any(|c| c.is_ascii_digit())
        && document
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '.' | '-' | '/'));

    if !valid {
        return Err(ValidationError::InvalidFormat {
            field: "document".to_string(),
            reason: "must contain only digits, dots, hyphens, and slashes".to_string(),
        });
    }

    Ok(())
}

/// Validates a phone number. Empty is allowed.
pub fn validate_phone(phone: &str) -> ValidationResult<()> {
    if phone.trim().chars().count() > MAX_PHONE_LEN {
        return Err(ValidationError::TooLong {
            field: "phone".to_string(),
            max: MAX_PHONE_LEN,
        });
    }

    Ok(())
}

/// Validates a search query.
///
/// ## Rules
/// - Can be empty (matches everything)
/// - Maximum 100 characters
///
/// ## Returns
/// The trimmed query string.
pub fn validate_search_query(query: &str) -> ValidationResult<String> {
    let query = query.trim();

    if query.chars().count() > MAX_SEARCH_LEN {
        return Err(ValidationError::TooLong {
            field: "query".to_string(),
            max: MAX_SEARCH_LEN,
        });
    }

    Ok(query.to_string())
}

/// Validates an ISO 4217 style currency code: exactly three ASCII letters.
///
/// ## Example
/// ```rust
/// use stockroom_core::validation::validate_currency_code;
///
/// assert!(validate_currency_code("BRL").is_ok());
/// assert!(validate_currency_code("R$").is_err());
/// ```
pub fn validate_currency_code(code: &str) -> ValidationResult<()> {
    if code.is_empty() {
        return Err(ValidationError::Required {
            field: "defaultCurrency".to_string(),
        });
    }

    if code.len() != 3 || !code.chars().all(|c| c.is_ascii_uppercase()) {
        return Err(ValidationError::InvalidFormat {
            field: "defaultCurrency".to_string(),
            reason: "must be three uppercase letters".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a price in cents.
///
/// ## Rules
/// - Must be non-negative (>= 0)
/// - Zero is allowed (free samples)
///
/// ## Example
/// ```rust
/// use stockroom_core::validation::validate_price_cents;
///
/// assert!(validate_price_cents(1099).is_ok());
/// assert!(validate_price_cents(0).is_ok());
/// assert!(validate_price_cents(-100).is_err());
/// ```
pub fn validate_price_cents(cents: i64) -> ValidationResult<()> {
    if cents < 0 {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

/// Validates a stock count. Zero means out of stock and is allowed.
pub fn validate_stock(stock: i64) -> ValidationResult<()> {
    if stock < 0 {
        return Err(ValidationError::OutOfRange {
            field: "stock".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

// =============================================================================
// Id Validators
// =============================================================================

/// Validates a record id.
///
/// New records get a UUID, but ids already in the store are opaque: any
/// non-empty token without whitespace is accepted.
///
/// ## Example
/// ```rust
/// use stockroom_core::validation::validate_record_id;
///
/// assert!(validate_record_id("550e8400-e29b-41d4-a716-446655440000").is_ok());
/// assert!(validate_record_id("1").is_ok());
/// assert!(validate_record_id(" ").is_err());
/// ```
pub fn validate_record_id(id: &str) -> ValidationResult<()> {
    if id.is_empty() || id.chars().all(char::is_whitespace) {
        return Err(ValidationError::Required {
            field: "id".to_string(),
        });
    }

    if id.chars().count() > MAX_ID_LEN {
        return Err(ValidationError::TooLong {
            field: "id".to_string(),
            max: MAX_ID_LEN,
        });
    }

    if id.chars().any(char::is_whitespace) {
        return Err(ValidationError::InvalidFormat {
            field: "id".to_string(),
            reason: "must not contain whitespace".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Entity Validators
// =============================================================================

/// Checks every field of a product before it is stored.
pub fn validate_product(product: &Product) -> ValidationResult<()> {
    validate_record_id(&product.id)?;
    validate_product_name(&product.name)?;
    validate_product_code(&product.code)?;
    if let Some(category) = product.category() {
        validate_category_name(category)?;
    }
    validate_price_cents(product.price_cents)?;
    validate_stock(product.stock)
}

/// Checks every field of a supplier before it is stored.
pub fn validate_supplier(supplier: &Supplier) -> ValidationResult<()> {
    validate_record_id(&supplier.id)?;
    validate_legal_name(&supplier.legal_name)?;
    if let Some(trade_name) = supplier.trade_name.as_deref() {
        if trade_name.chars().count() > MAX_NAME_LEN {
            return Err(ValidationError::TooLong {
                field: "tradeName".to_string(),
                max: MAX_NAME_LEN,
            });
        }
    }
    validate_document(&supplier.document)?;
    validate_phone(&supplier.phone)
}

/// Validates the company name shown in the header.
pub fn validate_company_name(name: &str) -> ValidationResult<()> {
    required("companyName", name, MAX_NAME_LEN)
}

/// Invariants a stored product must hold to be loaded.
///
/// Looser than [`validate_product`]: only what the tables and the
/// dashboard depend on.
pub fn validate_stored_product(product: &Product) -> ValidationResult<()> {
    validate_record_id(&product.id)?;
    validate_price_cents(product.price_cents)?;
    validate_stock(product.stock)
}

/// Invariants a stored supplier must hold to be loaded.
pub fn validate_stored_supplier(supplier: &Supplier) -> ValidationResult<()> {
    validate_record_id(&supplier.id)
}

/// Checks the settings object before it replaces the current one.
pub fn validate_settings(settings: &Settings) -> ValidationResult<()> {
    validate_company_name(&settings.company_name)?;
    validate_currency_code(&settings.default_currency)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DocumentType;

    const ID: &str = "550e8400-e29b-41d4-a716-446655440000";

    #[test]
    fn test_validate_product_code() {
        assert!(validate_product_code("E-100").is_ok());
        assert!(validate_product_code("").is_err());
        assert!(validate_product_code("E 100").is_err());
        assert!(validate_product_code(&"A".repeat(51)).is_err());
    }

    #[test]
    fn test_validate_product_name() {
        assert!(validate_product_name("Whole Milk").is_ok());
        assert!(validate_product_name("").is_err());
        assert!(validate_product_name(&"A".repeat(300)).is_err());
    }

    #[test]
    fn test_validate_numbers() {
        assert!(validate_price_cents(0).is_ok());
        assert!(validate_price_cents(-1).is_err());
        assert!(validate_stock(0).is_ok());
        assert!(validate_stock(-3).is_err());
    }

    #[test]
    fn test_validate_search_query_trims() {
        assert_eq!(validate_search_query("  milk ").unwrap(), "milk");
        assert!(validate_search_query(&"x".repeat(101)).is_err());
    }

    #[test]
    fn test_validate_currency_code() {
        assert!(validate_currency_code("USD").is_ok());
        assert!(validate_currency_code("usd").is_err());
        assert!(validate_currency_code("EURO").is_err());
        assert!(validate_currency_code("").is_err());
    }

    #[test]
    fn test_validate_document() {
        assert!(validate_document("123.456.789-00").is_ok());
        assert!(validate_document("---").is_err());
        assert!(validate_document("").is_err());
    }

    #[test]
    fn test_validate_record_id() {
        assert!(validate_record_id(ID).is_ok());
        assert!(validate_record_id("1").is_ok());
        assert!(validate_record_id("").is_err());
        assert!(validate_record_id("a b").is_err());
        assert!(validate_record_id(&"x".repeat(65)).is_err());
    }

    #[test]
    fn test_validate_stored_product() {
        let mut product = Product {
            id: "1".to_string(),
            name: String::new(),
            code: "A".to_string(),
            category: None,
            price_cents: 500,
            stock: 3,
            expiry: None,
        };
        // Stored records only need the invariants, not a full form check
        assert!(validate_stored_product(&product).is_ok());

        product.stock = -3;
        assert!(validate_stored_product(&product).is_err());

        product.stock = 3;
        product.price_cents = -500;
        assert!(validate_stored_product(&product).is_err());
    }

    #[test]
    fn test_validate_product() {
        let mut product = Product {
            id: ID.to_string(),
            name: "Rice 5kg".to_string(),
            code: "F-10".to_string(),
            category: Some("Food".to_string()),
            price_cents: 2590,
            stock: 0,
            expiry: None,
        };
        assert!(validate_product(&product).is_ok());

        product.category = None;
        assert!(validate_product(&product).is_ok());

        // Ids from older data need not be UUIDs
        product.id = "1".to_string();
        assert!(validate_product(&product).is_ok());

        product.price_cents = -1;
        assert!(matches!(
            validate_product(&product),
            Err(ValidationError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_validate_supplier() {
        let mut supplier = Supplier {
            id: ID.to_string(),
            legal_name: "Acme Comercio Ltda".to_string(),
            trade_name: None,
            document: "12.345.678/0001-90".to_string(),
            document_type: DocumentType::Company,
            phone: String::new(),
        };
        assert!(validate_supplier(&supplier).is_ok());

        supplier.legal_name = " ".to_string();
        assert!(matches!(
            validate_supplier(&supplier),
            Err(ValidationError::Required { .. })
        ));
    }

    #[test]
    fn test_validate_settings() {
        let mut settings = Settings::default();
        assert!(validate_settings(&settings).is_ok());

        settings.default_currency = "R$".to_string();
        assert!(validate_settings(&settings).is_err());

        settings.default_currency = "EUR".to_string();
        settings.company_name = String::new();
        assert!(validate_settings(&settings).is_err());
    }
}
