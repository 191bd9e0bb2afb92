//! Catalog inspection commands.

use anyhow::{bail, Result};
use jewel_commerce::catalog::{Catalog, LoadReport};
use serde::Serialize;

use super::{CatalogArgs, CatalogCommand};
use crate::context::Context;

#[derive(Serialize)]
struct CategoryRow<'a> {
    name: &'a str,
    slug: &'a str,
    products: usize,
    in_stock: usize,
}

/// Run the catalog command.
pub async fn run(args: CatalogArgs, ctx: &Context) -> Result<()> {
    match args.command {
        CatalogCommand::List { category } => list_products(category.as_deref(), ctx).await,
        CatalogCommand::Show { id } => show_product(&id, ctx).await,
        CatalogCommand::Categories => list_categories(ctx).await,
        CatalogCommand::Validate { path } => validate_catalog(path.as_deref(), ctx).await,
    }
}

async fn list_products(category: Option<&str>, ctx: &Context) -> Result<()> {
    let report = ctx.load_catalog()?;
    let catalog = &report.catalog;

    let products: Vec<_> = match category {
        Some(name) => {
            let category = catalog.require_category(name)?;
            catalog.products_in(category).collect()
        }
        None => catalog.products().iter().collect(),
    };

    if ctx.output.is_json() {
        ctx.output.json(&products);
        return Ok(());
    }

    ctx.output.header(&format!(
        "{} products ({})",
        products.len(),
        catalog.currency().code()
    ));
    if products.is_empty() {
        ctx.output.info("No products found.");
    }
    ctx.output.products(&products);

    Ok(())
}

async fn show_product(id: &str, ctx: &Context) -> Result<()> {
    let report = ctx.load_catalog()?;
    let product = report.catalog.require_product(id)?;

    if ctx.output.is_json() {
        ctx.output.json(product);
        return Ok(());
    }

    ctx.output.header(&product.name);
    ctx.output.kv("id", product.id.as_str());
    ctx.output.kv("category", &product.category);
    ctx.output.kv("price", &product.price.display());
    ctx.output.kv("metal", product.metal_type.display_name());
    if !product.purity.is_empty() {
        ctx.output.kv("purity", &product.purity);
    }
    if !product.weight.is_empty() {
        ctx.output.kv("weight", &product.weight);
    }
    ctx.output.kv("in stock", &product.in_stock.to_string());
    ctx.output.kv("new arrival", &product.new_arrival.to_string());
    if !product.tags.is_empty() {
        ctx.output.kv("tags", &product.tags.join(", "));
    }
    if let Some(image) = product.thumbnail() {
        ctx.output.kv("image", image);
    }
    if !product.description.is_empty() {
        ctx.output.line("");
        ctx.output.line(&format!("  {}", product.description));
    }

    Ok(())
}

async fn list_categories(ctx: &Context) -> Result<()> {
    let report = ctx.load_catalog()?;
    let rows = category_rows(&report.catalog);

    if ctx.output.is_json() {
        ctx.output.json(&rows);
        return Ok(());
    }

    ctx.output.header("Categories");
    let widths = [16, 16, 8, 8];
    ctx.output
        .table_row(&["NAME", "SLUG", "PRODUCTS", "IN STOCK"], &widths);
    for row in &rows {
        ctx.output.table_row(
            &[
                row.name,
                row.slug,
                row.products.to_string().as_str(),
                row.in_stock.to_string().as_str(),
            ],
            &widths,
        );
    }

    Ok(())
}

fn category_rows(catalog: &Catalog) -> Vec<CategoryRow<'_>> {
    catalog
        .categories()
        .iter()
        .map(|category| {
            let products: Vec<_> = catalog.products_in(category).collect();
            CategoryRow {
                name: &category.name,
                slug: category.slug.as_str(),
                products: products.len(),
                in_stock: products.iter().filter(|p| p.in_stock).count(),
            }
        })
        .collect()
}

async fn validate_catalog(path: Option<&str>, ctx: &Context) -> Result<()> {
    ctx.output.header("Validating catalog");

    let spinner = ctx.output.spinner("Loading catalog...");
    let report = match path {
        Some(path) => Catalog::load(ctx.resolve_path(path)),
        None => match ctx.catalog_path() {
            Some(path) => Catalog::load(path),
            None => Catalog::builtin().map(|catalog| LoadReport {
                catalog,
                issues: Vec::new(),
            }),
        },
    };
    spinner.finish_and_clear();
    let report = report?;

    if ctx.output.is_json() {
        let issues: Vec<String> = report.issues.iter().map(|i| i.to_string()).collect();
        ctx.output.json(&serde_json::json!({
            "products": report.catalog.len(),
            "categories": report.catalog.categories().len(),
            "currency": report.catalog.currency().code(),
            "issues": issues,
        }));
    } else {
        ctx.output.kv("currency", report.catalog.currency().code());
        ctx.output
            .kv("categories", &report.catalog.categories().len().to_string());
        ctx.output.kv("products", &report.catalog.len().to_string());

        for issue in &report.issues {
            ctx.output.warn(&format!("Skipped: {}", issue));
        }

        let empty: Vec<&str> = category_rows(&report.catalog)
            .iter()
            .filter(|row| row.products == 0)
            .map(|row| row.name)
            .collect();
        if !empty.is_empty() {
            ctx.output
                .info(&format!("Categories with no products: {}", empty.join(", ")));
        }
    }

    if !report.is_clean() {
        bail!("Catalog has {} invalid record(s)", report.issues.len());
    }

    ctx.output.success("Catalog is valid");
    Ok(())
}
