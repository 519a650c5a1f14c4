//! Strongly-typed value objects used by domain entities.
//!
//! These wrappers enforce basic invariants (positive identifiers, parseable
//! monetary amounts) so that once a value reaches the domain layer it can be
//! treated as trusted.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors produced when attempting to construct a constrained value object.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeConstraintError {
    /// Provided identifier is zero or negative.
    #[error("id must be greater than zero")]
    NonPositiveId,
    /// Provided monetary amount could not be parsed as a decimal.
    #[error("invalid monetary amount: {0}")]
    InvalidAmount(String),
    /// Provided value failed custom validation.
    #[error("invalid value: {0}")]
    InvalidValue(String),
}

/// Macro to generate lightweight newtypes for positive identifiers.
macro_rules! id_newtype {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
        pub struct $name(i32);

        impl $name {
            /// Creates a new identifier ensuring it is greater than zero.
            pub fn new(value: i32) -> Result<Self, TypeConstraintError> {
                if value > 0 {
                    Ok(Self(value))
                } else {
                    Err(TypeConstraintError::NonPositiveId)
                }
            }

            /// Returns the raw `i32` backing this identifier.
            pub const fn get(self) -> i32 {
                self.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl TryFrom<i32> for $name {
            type Error = TypeConstraintError;

            fn try_from(value: i32) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for i32 {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

id_newtype!(ClientId, "Unique identifier for a client.");
id_newtype!(InterventionId, "Unique identifier for an intervention.");
id_newtype!(InvoiceId, "Unique identifier for an invoice.");

/// Parses a monetary column stored as `TEXT` into an exact decimal.
///
/// SQLite has no decimal type and binary floats drift under repeated
/// aggregation, so amounts cross the DB boundary as strings.
pub fn parse_amount(value: &str) -> Result<Decimal, TypeConstraintError> {
    Decimal::from_str(value.trim())
        .map_err(|_| TypeConstraintError::InvalidAmount(value.to_string()))
}

/// Optional counterpart of [`parse_amount`] for nullable columns.
pub fn parse_amount_opt(value: Option<&str>) -> Result<Option<Decimal>, TypeConstraintError> {
    value.map(parse_amount).transpose()
}
