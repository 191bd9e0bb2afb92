//! Product types.

use crate::ids::ProductId;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Metal a piece is made of.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum MetalType {
    #[default]
    Gold,
    WhiteGold,
    RoseGold,
    Platinum,
    Silver,
}

impl MetalType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MetalType::Gold => "gold",
            MetalType::WhiteGold => "white_gold",
            MetalType::RoseGold => "rose_gold",
            MetalType::Platinum => "platinum",
            MetalType::Silver => "silver",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            MetalType::Gold => "Gold",
            MetalType::WhiteGold => "White Gold",
            MetalType::RoseGold => "Rose Gold",
            MetalType::Platinum => "Platinum",
            MetalType::Silver => "Silver",
        }
    }

    /// Parse from either the wire form (`rose_gold`) or a display form (`Rose Gold`).
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().replace([' ', '-'], "_").as_str() {
            "gold" => Some(MetalType::Gold),
            "white_gold" => Some(MetalType::WhiteGold),
            "rose_gold" => Some(MetalType::RoseGold),
            "platinum" => Some(MetalType::Platinum),
            "silver" => Some(MetalType::Silver),
            _ => None,
        }
    }

    /// All metal types in display order.
    pub fn all() -> [MetalType; 5] {
        [
            MetalType::Gold,
            MetalType::WhiteGold,
            MetalType::RoseGold,
            MetalType::Platinum,
            MetalType::Silver,
        ]
    }
}

/// A product as it appears in a catalog file, before validation.
///
/// Prices are plain decimals in the catalog's currency.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProductRecord {
    pub id: String,
    pub name: String,
    pub category: String,
    pub price: f64,
    #[serde(default)]
    pub purity: String,
    #[serde(default)]
    pub weight: String,
    #[serde(default)]
    pub metal_type: MetalType,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default = "default_true")]
    pub in_stock: bool,
    #[serde(default)]
    pub new_arrival: bool,
    #[serde(default)]
    pub description: String,
}

fn default_true() -> bool {
    true
}

/// A validated product in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    /// Unique product identifier.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Category display name, one of the catalog's categories.
    pub category: String,
    /// Price, never negative.
    pub price: Money,
    /// Purity code (e.g., "22K", "925").
    pub purity: String,
    /// Weight with unit suffix (e.g., "8.5g").
    pub weight: String,
    /// Metal the piece is made of.
    pub metal_type: MetalType,
    /// Ordered image URLs.
    pub images: Vec<String>,
    /// Free-text keywords.
    pub tags: Vec<String>,
    /// Whether the piece can be ordered now.
    pub in_stock: bool,
    /// Whether the piece is flagged as a new arrival.
    pub new_arrival: bool,
    /// Long description.
    pub description: String,
}

impl Product {
    /// Create a product with the required fields; the rest take defaults.
    pub fn new(
        id: impl Into<ProductId>,
        name: impl Into<String>,
        category: impl Into<String>,
        price: Money,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            category: category.into(),
            price,
            purity: String::new(),
            weight: String::new(),
            metal_type: MetalType::default(),
            images: Vec::new(),
            tags: Vec::new(),
            in_stock: true,
            new_arrival: false,
            description: String::new(),
        }
    }

    /// Add a tag to this product.
    pub fn add_tag(&mut self, tag: impl Into<String>) {
        let tag = tag.into();
        if !self.tags.contains(&tag) {
            self.tags.push(tag);
        }
    }

    /// Builder-style tag addition.
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for tag in tags {
            self.add_tag(tag);
        }
        self
    }

    /// Check if the product is available for purchase.
    pub fn is_available(&self) -> bool {
        self.in_stock
    }

    /// First image, used as the thumbnail in suggestion dropdowns.
    pub fn thumbnail(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Currency;

    #[test]
    fn test_product_creation() {
        let product = Product::new("1", "Gold Chandbalis", "Earrings", Money::new(100, Currency::INR))
            .with_tags(["gold", "chandbali", "gold"]);
        assert_eq!(product.id.as_str(), "1");
        assert_eq!(product.tags, vec!["gold", "chandbali"]);
        assert!(product.is_available());
        assert!(product.thumbnail().is_none());
    }

    #[test]
    fn test_metal_type_parsing() {
        assert_eq!(MetalType::from_str("rose_gold"), Some(MetalType::RoseGold));
        assert_eq!(MetalType::from_str("White Gold"), Some(MetalType::WhiteGold));
        assert_eq!(MetalType::from_str("bronze"), None);
    }

    #[test]
    fn test_record_defaults() {
        let record: ProductRecord = serde_json::from_str(
            r#"{"id":"9","name":"Silver Anklet","category":"Anklets","price":1200,"metalType":"silver"}"#,
        )
        .unwrap();
        assert_eq!(record.metal_type, MetalType::Silver);
        assert!(record.in_stock);
        assert!(!record.new_arrival);
        assert!(record.tags.is_empty());
    }
}
