//! Product catalog module.
//!
//! Contains types for products, categories, metal types, and the catalog
//! loader that validates raw fixture records.

mod category;
mod loader;
mod product;

pub use category::Category;
pub use loader::{Catalog, CatalogDocument, CatalogIssue, LoadReport};
pub use product::{MetalType, Product, ProductRecord};
