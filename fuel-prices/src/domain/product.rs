//! Fuel products.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// A fuel product from the catalog (`G95E5`, `GOA`, ...).
///
/// The abbreviation is the product's identity and display name.
#[derive(Debug, Clone)]
pub struct Product {
    code: u32,
    abbreviation: String,
    description: String,
}

impl Product {
    pub fn new(code: u32, abbreviation: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            code,
            abbreviation: abbreviation.into().trim().to_owned(),
            description: description.into().trim().to_owned(),
        }
    }

    pub fn code(&self) -> u32 {
        self.code
    }

    pub fn abbreviation(&self) -> &str {
        &self.abbreviation
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn display_name(&self) -> &str {
        &self.abbreviation
    }

    /// Whether a lower-case needle occurs in the abbreviation or description.
    pub fn mentions(&self, needle: &str) -> bool {
        self.abbreviation.to_lowercase().contains(needle)
            || self.description.to_lowercase().contains(needle)
    }
}

impl PartialEq for Product {
    fn eq(&self, other: &Self) -> bool {
        self.abbreviation == other.abbreviation
    }
}

impl Eq for Product {}

impl Hash for Product {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.abbreviation.hash(state);
    }
}

impl PartialOrd for Product {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Product {
    fn cmp(&self, other: &Self) -> Ordering {
        self.abbreviation.cmp(&other.abbreviation)
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.abbreviation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mentions_is_case_insensitive_substring() {
        let p = Product::new(1, "G95E5", "Gasolina 95 E5");
        assert!(p.mentions("g95"));
        assert!(p.mentions("gasolina"));
        assert!(p.mentions("95 e5"));
        assert!(!p.mentions("gasoleo"));
    }

    #[test]
    fn identity_is_abbreviation() {
        let a = Product::new(1, "G95E5", "Gasolina 95 E5");
        let b = Product::new(23, " G95E5 ", "otra descripción");
        assert_eq!(a, b);
        assert_eq!(a.to_string(), "G95E5");
        assert!(a < Product::new(4, "GOA", "Gasóleo A habitual"));
    }
}
