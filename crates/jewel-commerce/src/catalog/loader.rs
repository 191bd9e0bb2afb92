//! Catalog loading and validation.

use std::collections::HashSet;
use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::catalog::{Category, Product, ProductRecord};
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::{Currency, Money};

/// Fixture catalog shipped with the crate.
const BUILTIN_CATALOG: &str = include_str!("../../fixtures/catalog.json");

/// Raw catalog file contents.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CatalogDocument {
    /// Currency code all prices are expressed in.
    #[serde(default = "default_currency")]
    pub currency: String,
    /// Closed set of category names, in display order.
    pub categories: Vec<String>,
    /// Product records, in display order.
    #[serde(default)]
    pub products: Vec<ProductRecord>,
}

fn default_currency() -> String {
    Currency::default().code().to_string()
}

/// A product record that was skipped during loading.
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogIssue {
    /// Record has an empty id.
    MissingId { index: usize },
    /// Record has an empty name.
    MissingName { id: String },
    /// Another record already uses this id.
    DuplicateId { id: String },
    /// Record names a category outside the category list.
    UnknownCategory { id: String, category: String },
    /// Record has a negative, NaN or infinite price.
    InvalidPrice { id: String, price: f64 },
}

impl fmt::Display for CatalogIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingId { index } => write!(f, "product #{} has no id", index),
            Self::MissingName { id } => write!(f, "product {} has no name", id),
            Self::DuplicateId { id } => write!(f, "duplicate product id {}", id),
            Self::UnknownCategory { id, category } => {
                write!(f, "product {} has unknown category '{}'", id, category)
            }
            Self::InvalidPrice { id, price } => {
                write!(f, "product {} has invalid price {}", id, price)
            }
        }
    }
}

/// Result of loading a catalog: the usable catalog plus skipped records.
#[derive(Debug, Clone)]
pub struct LoadReport {
    pub catalog: Catalog,
    pub issues: Vec<CatalogIssue>,
}

impl LoadReport {
    /// Check whether every record was accepted.
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }
}

/// An immutable, validated product catalog.
///
/// Built once and shared by reference with the search functions.
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    currency: Currency,
    categories: Vec<Category>,
    products: Vec<Product>,
}

impl Catalog {
    /// Load the fixture catalog embedded in the crate.
    pub fn builtin() -> Result<Self, CommerceError> {
        Ok(Self::from_json_str(BUILTIN_CATALOG)?.catalog)
    }

    /// Load a catalog from a `.json` or `.toml` file.
    pub fn load(path: impl AsRef<Path>) -> Result<LoadReport, CommerceError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| CommerceError::CatalogRead {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Self::from_json_str(&content),
            Some("toml") => Self::from_toml_str(&content),
            other => Err(CommerceError::UnsupportedFormat(
                other.unwrap_or("<none>").to_string(),
            )),
        }
    }

    /// Parse a JSON catalog document.
    pub fn from_json_str(content: &str) -> Result<LoadReport, CommerceError> {
        let doc: CatalogDocument = serde_json::from_str(content)?;
        Self::from_document(doc)
    }

    /// Parse a TOML catalog document.
    pub fn from_toml_str(content: &str) -> Result<LoadReport, CommerceError> {
        let doc: CatalogDocument = toml::from_str(content)?;
        Self::from_document(doc)
    }

    /// Validate a raw document.
    ///
    /// Malformed product records are skipped and reported; only problems with
    /// the document as a whole are returned as errors.
    pub fn from_document(doc: CatalogDocument) -> Result<LoadReport, CommerceError> {
        let currency = Currency::from_code(&doc.currency)
            .ok_or_else(|| CommerceError::UnknownCurrency(doc.currency.clone()))?;

        let mut categories: Vec<Category> = Vec::with_capacity(doc.categories.len());
        for name in &doc.categories {
            let category = Category::new(name.trim());
            if categories.iter().any(|c| c.slug == category.slug) {
                return Err(CommerceError::DuplicateCategory(name.clone()));
            }
            categories.push(category);
        }

        let mut products = Vec::with_capacity(doc.products.len());
        let mut issues = Vec::new();
        let mut seen: HashSet<String> = HashSet::new();

        for (index, record) in doc.products.into_iter().enumerate() {
            match validate_record(index, record, currency, &categories, &seen) {
                Ok(product) => {
                    seen.insert(product.id.as_str().to_string());
                    products.push(product);
                }
                Err(issue) => {
                    tracing::warn!(%issue, "skipping catalog record");
                    issues.push(issue);
                }
            }
        }

        tracing::debug!(
            products = products.len(),
            categories = categories.len(),
            skipped = issues.len(),
            "catalog loaded"
        );

        Ok(LoadReport {
            catalog: Catalog {
                currency,
                categories,
                products,
            },
            issues,
        })
    }

    /// Build a catalog from already-constructed parts.
    ///
    /// Products that fail validation are dropped, as with [`Catalog::from_document`].
    pub fn from_parts(
        currency: Currency,
        categories: Vec<Category>,
        products: Vec<Product>,
    ) -> LoadReport {
        let mut kept: Vec<Product> = Vec::with_capacity(products.len());
        let mut issues = Vec::new();

        for (index, product) in products.into_iter().enumerate() {
            let id = product.id.as_str().to_string();
            let issue = if product.id.is_blank() {
                Some(CatalogIssue::MissingId { index })
            } else if product.name.trim().is_empty() {
                Some(CatalogIssue::MissingName { id })
            } else if kept.iter().any(|p| p.id == product.id) {
                Some(CatalogIssue::DuplicateId { id })
            } else if !categories.iter().any(|c| c.matches(&product.category)) {
                Some(CatalogIssue::UnknownCategory {
                    id,
                    category: product.category.clone(),
                })
            } else if product.price.is_negative() {
                Some(CatalogIssue::InvalidPrice {
                    id,
                    price: product.price.to_decimal(),
                })
            } else {
                None
            };

            match issue {
                Some(issue) => issues.push(issue),
                None => kept.push(product),
            }
        }

        LoadReport {
            catalog: Catalog {
                currency,
                categories,
                products: kept,
            },
            issues,
        }
    }

    /// An empty catalog with the given categories.
    pub fn empty(categories: Vec<Category>) -> Self {
        Self {
            currency: Currency::default(),
            categories,
            products: Vec::new(),
        }
    }

    /// Currency all prices are expressed in.
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Products in catalog order.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Categories in display order.
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Look up a product by id.
    pub fn get(&self, id: &ProductId) -> Option<&Product> {
        self.products.iter().find(|p| &p.id == id)
    }

    /// Look up a category by name or slug.
    pub fn category(&self, name: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.matches(name))
    }

    /// Like [`Catalog::get`], but a missing id is an error.
    pub fn require_product(&self, id: &str) -> Result<&Product, CommerceError> {
        self.get(&ProductId::new(id))
            .ok_or_else(|| CommerceError::ProductNotFound(id.to_string()))
    }

    /// Like [`Catalog::category`], but a missing category is an error.
    pub fn require_category(&self, name: &str) -> Result<&Category, CommerceError> {
        self.category(name)
            .ok_or_else(|| CommerceError::CategoryNotFound(name.to_string()))
    }

    /// Products belonging to a category, in catalog order.
    pub fn products_in(&self, category: &Category) -> impl Iterator<Item = &Product> + '_ {
        let category = category.clone();
        self.products
            .iter()
            .filter(move |p| category.matches(&p.category))
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

fn validate_record(
    index: usize,
    record: ProductRecord,
    currency: Currency,
    categories: &[Category],
    seen: &HashSet<String>,
) -> Result<Product, CatalogIssue> {
    let id = record.id.trim().to_string();
    if id.is_empty() {
        return Err(CatalogIssue::MissingId { index });
    }
    if record.name.trim().is_empty() {
        return Err(CatalogIssue::MissingName { id });
    }
    if seen.contains(&id) {
        return Err(CatalogIssue::DuplicateId { id });
    }
    let category = match categories.iter().find(|c| c.matches(&record.category)) {
        Some(category) => category.name.clone(),
        None => {
            return Err(CatalogIssue::UnknownCategory {
                id,
                category: record.category,
            })
        }
    };
    if !record.price.is_finite() || record.price < 0.0 {
        return Err(CatalogIssue::InvalidPrice {
            id,
            price: record.price,
        });
    }

    Ok(Product {
        id: ProductId::new(id),
        name: record.name.trim().to_string(),
        category,
        price: Money::from_decimal(record.price, currency),
        purity: record.purity,
        weight: record.weight,
        metal_type: record.metal_type,
        images: record.images,
        tags: record.tags,
        in_stock: record.in_stock,
        new_arrival: record.new_arrival,
        description: record.description,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::MetalType;

    #[test]
    fn test_require_lookups() {
        let catalog = Catalog::builtin().unwrap();
        assert_eq!(catalog.require_product("3").unwrap().name, "Solitaire Engagement Ring");
        assert!(matches!(
            catalog.require_product("999"),
            Err(CommerceError::ProductNotFound(_))
        ));
        assert_eq!(catalog.require_category("nose-pins").unwrap().name, "Nose Pins");
        assert!(matches!(
            catalog.require_category("Watches"),
            Err(CommerceError::CategoryNotFound(_))
        ));
    }

    fn record(id: &str, name: &str, category: &str, price: f64) -> ProductRecord {
        ProductRecord {
            id: id.to_string(),
            name: name.to_string(),
            category: category.to_string(),
            price,
            purity: "22K".to_string(),
            weight: "5g".to_string(),
            metal_type: MetalType::Gold,
            images: Vec::new(),
            tags: Vec::new(),
            in_stock: true,
            new_arrival: false,
            description: String::new(),
        }
    }

    #[test]
    fn test_builtin_catalog_is_clean() {
        let report = Catalog::from_json_str(BUILTIN_CATALOG).unwrap();
        assert!(report.is_clean(), "issues: {:?}", report.issues);
        assert!(report.catalog.len() >= 10);
        assert_eq!(report.catalog.currency(), Currency::INR);
    }

    #[test]
    fn test_malformed_records_are_skipped() {
        let doc = CatalogDocument {
            currency: "INR".to_string(),
            categories: vec!["Earrings".to_string(), "Rings".to_string()],
            products: vec![
                record("1", "Gold Chandbalis", "Earrings", 100.0),
                record("1", "Copy", "Earrings", 100.0),
                record("", "No Id", "Rings", 10.0),
                record("3", " ", "Rings", 10.0),
                record("4", "Anklet", "Anklets", 10.0),
                record("5", "Band", "rings", -1.0),
                record("6", "Band", "rings", f64::NAN),
                record("7", "Solitaire", "rings", 50000.0),
            ],
        };

        let report = Catalog::from_document(doc).unwrap();
        let ids: Vec<&str> = report.catalog.products().iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "7"]);
        assert_eq!(report.issues.len(), 6);
        assert_eq!(report.issues[0], CatalogIssue::DuplicateId { id: "1".to_string() });
        assert_eq!(report.issues[1], CatalogIssue::MissingId { index: 2 });

        // Category names are canonicalized to the category list's spelling.
        assert_eq!(report.catalog.products()[1].category, "Rings");
    }

    #[test]
    fn test_document_level_errors() {
        let bad_currency = CatalogDocument {
            currency: "XYZ".to_string(),
            categories: vec![],
            products: vec![],
        };
        assert!(matches!(
            Catalog::from_document(bad_currency),
            Err(CommerceError::UnknownCurrency(_))
        ));

        let dup = CatalogDocument {
            currency: "INR".to_string(),
            categories: vec!["Rings".to_string(), "rings".to_string()],
            products: vec![],
        };
        assert!(matches!(
            Catalog::from_document(dup),
            Err(CommerceError::DuplicateCategory(_))
        ));
    }

    #[test]
    fn test_toml_catalog() {
        let content = r#"
currency = "AED"
categories = ["Bangles"]

[[products]]
id = "b1"
name = "Kundan Bangle Pair"
category = "Bangles"
price = 2450.5
metalType = "gold"
tags = ["kundan", "bridal"]
"#;
        let report = Catalog::from_toml_str(content).unwrap();
        let product = &report.catalog.products()[0];
        assert_eq!(product.price, Money::new(245050, Currency::AED));
        assert_eq!(product.tags, vec!["kundan", "bridal"]);
    }

    #[test]
    fn test_from_parts_and_lookup() {
        let categories = vec![Category::new("Earrings")];
        let products = vec![
            Product::new("1", "Jhumkas", "Earrings", Money::new(100, Currency::INR)),
            Product::new("2", "Ring", "Rings", Money::new(100, Currency::INR)),
        ];
        let report = Catalog::from_parts(Currency::INR, categories, products);
        assert_eq!(report.issues.len(), 1);

        let catalog = report.catalog;
        assert!(catalog.get(&ProductId::new("1")).is_some());
        assert!(catalog.get(&ProductId::new("2")).is_none());
        let earrings = catalog.category("earrings").unwrap();
        assert_eq!(catalog.products_in(earrings).count(), 1);
    }

    #[test]
    fn test_unsupported_extension() {
        let dir = std::env::temp_dir().join("jewel-commerce-loader-test.yaml");
        std::fs::write(&dir, "categories: []").unwrap();
        let result = Catalog::load(&dir);
        let _ = std::fs::remove_file(&dir);
        assert!(matches!(result, Err(CommerceError::UnsupportedFormat(_))));
    }
}
