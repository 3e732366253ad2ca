//! Canonical category slugs.
//!
//! The catalog backend and the UI disagree about category spelling: the
//! backend serves slugs like `mens-shirts` while screens display labels
//! like "Mens Shirts". Every category string entering the engine is
//! normalized to one canonical slug form at the boundary so comparisons
//! are exact equality, never substring matching.

use serde::{Deserialize, Deserializer, Serialize};

/// A normalized category identifier: lower-case, alphanumeric runs joined
/// by single hyphens.
///
/// `CategorySlug::new("Mens Shirts")` and `CategorySlug::new("mens-shirts")`
/// compare equal.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct CategorySlug(String);

impl CategorySlug {
    /// Normalize an arbitrary category label or slug into canonical form.
    #[must_use]
    pub fn new(raw: &str) -> Self {
        let mut slug = String::with_capacity(raw.len());
        let mut pending_hyphen = false;
        for ch in raw.chars() {
            if ch.is_alphanumeric() {
                if pending_hyphen && !slug.is_empty() {
                    slug.push('-');
                }
                pending_hyphen = false;
                slug.extend(ch.to_lowercase());
            } else {
                pending_hyphen = true;
            }
        }
        Self(slug)
    }

    /// Get the canonical slug string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CategorySlug {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for CategorySlug {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

// Deserialization normalizes, so slugs read back from the store or the
// catalog wire are canonical no matter how they were written.
impl<'de> Deserialize<'de> for CategorySlug {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::new(&raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_and_slug_normalize_to_same_form() {
        assert_eq!(CategorySlug::new("Mens Shirts"), CategorySlug::new("mens-shirts"));
        assert_eq!(CategorySlug::new("Mens Shirts").as_str(), "mens-shirts");
    }

    #[test]
    fn test_no_substring_false_positives() {
        // "Car" must not match "Scarf" once both are canonical slugs.
        assert_ne!(CategorySlug::new("Car"), CategorySlug::new("Scarf"));
    }

    #[test]
    fn test_collapses_separator_runs() {
        assert_eq!(CategorySlug::new("  Home --&-- Garden ").as_str(), "home-garden");
    }

    #[test]
    fn test_deserialize_normalizes() {
        let slug: CategorySlug = serde_json::from_str("\"Mens Shirts\"").unwrap();
        assert_eq!(slug.as_str(), "mens-shirts");
    }
}
