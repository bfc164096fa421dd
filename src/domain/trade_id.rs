//! Type-safe trade identifier.
//!
//! [`TradeId`] is a newtype wrapper around the client-chosen identifier string
//! so that trade ids cannot be confused with other free-text trade fields.

use std::fmt;
use std::str::FromStr;

use crate::error::BookingError;

/// Unique identifier for a booked trade.
///
/// Chosen by the client at booking time and immutable thereafter. Used as
/// the primary key of the `trade` table and as the owner key of every
/// [`super::TradeDetails`] row.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TradeId(String);

impl TradeId {
    /// Creates a `TradeId`, rejecting blank identifiers.
    ///
    /// # Errors
    ///
    /// Returns [`BookingError::BadRequest`] if `id` is empty or whitespace.
    pub fn new(id: impl Into<String>) -> Result<Self, BookingError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(BookingError::BadRequest(
                "trade_id must not be blank".to_string(),
            ));
        }
        Ok(Self(id))
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the id, returning the inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for TradeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for TradeId {
    type Err = BookingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for TradeId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn accepts_non_blank_ids() {
        let Ok(id) = TradeId::new("T1") else {
            panic!("valid id rejected");
        };
        assert_eq!(id.as_str(), "T1");
        assert_eq!(format!("{id}"), "T1");
    }

    #[test]
    fn rejects_blank_ids() {
        assert!(TradeId::new("").is_err());
        assert!(TradeId::new("   ").is_err());
        assert!("\t".parse::<TradeId>().is_err());
    }

    #[test]
    fn preserves_surrounding_whitespace() {
        let Ok(id) = TradeId::new(" T1 ") else {
            panic!("valid id rejected");
        };
        assert_eq!(id.into_inner(), " T1 ");
    }
}
