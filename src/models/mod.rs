//! Data models for Bookshelf

pub mod author;
pub mod book;

use std::borrow::Cow;

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use validator::ValidationError;

// Re-export commonly used types
pub use author::{Author, AuthorPatch, CreateAuthor, UpdateAuthor};
pub use book::{Book, BookPatch, BookQuery, CreateBook, UpdateBook};

fn validation_error(code: &'static str, message: &'static str) -> ValidationError {
    ValidationError::new(code).with_message(Cow::Borrowed(message))
}

pub(crate) fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(validation_error("blank", "must not be blank"));
    }
    Ok(())
}

/// Strictly before today's UTC date
pub(crate) fn validate_past_date(value: &NaiveDate) -> Result<(), ValidationError> {
    if *value >= Utc::now().date_naive() {
        return Err(validation_error("past_date", "must be in the past"));
    }
    Ok(())
}

/// Largest scale and exclusive upper bound of the `NUMERIC(10, 2)` price column
const PRICE_SCALE: u32 = 2;
const PRICE_LIMIT: i64 = 100_000_000;

/// Non-negative and representable in the price column without rounding
pub(crate) fn validate_price(value: &Decimal) -> Result<(), ValidationError> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(validation_error("non_negative", "must not be negative"));
    }
    if value.normalize().scale() > PRICE_SCALE {
        return Err(validation_error("scale", "must have at most 2 decimal places"));
    }
    if *value >= Decimal::from(PRICE_LIMIT) {
        return Err(validation_error("range", "must be less than 100000000"));
    }
    Ok(())
}
