//! Route tag value object

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// Upstream identifier of a route, for example `"504"` or `"7"`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RouteTag(String);

impl RouteTag {
    /// Create a route tag, trimming surrounding whitespace
    ///
    /// # Errors
    ///
    /// Returns `DomainError::ValidationError` if the trimmed value is empty
    pub fn new(value: impl AsRef<str>) -> Result<Self, DomainError> {
        let trimmed = value.as_ref().trim();
        if trimmed.is_empty() {
            return Err(DomainError::ValidationError(
                "route tag must not be empty".to_string(),
            ));
        }
        Ok(Self(trimmed.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for RouteTag {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<RouteTag> for String {
    fn from(tag: RouteTag) -> Self {
        tag.0
    }
}

impl AsRef<str> for RouteTag {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RouteTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_numeric_and_alpha_tags() {
        assert_eq!(RouteTag::new("504").expect("valid").as_str(), "504");
        assert_eq!(RouteTag::new(" 7A ").expect("valid").as_str(), "7A");
    }

    #[test]
    fn rejects_blank() {
        assert!(RouteTag::new("").is_err());
        assert!(RouteTag::new("  ").is_err());
    }

    #[test]
    fn display_matches_value() {
        let tag = RouteTag::new("29").expect("valid");
        assert_eq!(format!("Bus {tag}"), "Bus 29");
    }
}
