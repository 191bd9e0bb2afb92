//! Collections page browse command.

use anyhow::{anyhow, Result};
use jewel_commerce::catalog::MetalType;
use jewel_commerce::search::{Filter, ProductQuery, SortOption};
use jewel_commerce::{Currency, Money};

use super::BrowseArgs;
use crate::context::Context;

/// Run the browse command.
pub async fn run(args: BrowseArgs, ctx: &Context) -> Result<()> {
    let report = ctx.load_catalog()?;
    let catalog = &report.catalog;
    let query = build_query(&args, catalog.currency())?;

    ctx.output.debug(&format!(
        "Filters: {}",
        query
            .filters
            .iter()
            .map(Filter::label)
            .collect::<Vec<_>>()
            .join(", ")
    ));

    let results = query.run(catalog);

    if ctx.output.is_json() {
        ctx.output.json(&results);
        return Ok(());
    }

    let pagination = &results.pagination;
    ctx.output.header(&format!(
        "{} ({} pieces, {})",
        query.sort.display_name(),
        pagination.total,
        if pagination.total == 0 {
            "page 1 of 1".to_string()
        } else if pagination.page > pagination.total_pages {
            format!("page {} is past the last page {}", pagination.page, pagination.total_pages)
        } else {
            format!(
                "showing {}-{}, page {} of {}",
                pagination.start_item(),
                pagination.end_item(),
                pagination.page,
                pagination.total_pages
            )
        }
    ));

    if results.is_empty() {
        ctx.output.info("No pieces match these filters.");
    } else {
        ctx.output.products(&results.items);
    }

    for facet in &results.facets {
        ctx.output.header(&facet.name);
        for value in &facet.values {
            let marker = if value.selected { " *" } else { "" };
            ctx.output
                .list_item(&format!("{} ({}){}", value.value, value.count, marker));
        }
    }

    if pagination.has_next {
        ctx.output.info(&format!(
            "More results: --page {}",
            pagination.page.saturating_add(1)
        ));
    }

    ctx.output
        .debug(&format!("Query time: {}us", results.query_time_us));

    Ok(())
}

/// Translate command-line flags into a browse query.
pub fn build_query(args: &BrowseArgs, currency: Currency) -> Result<ProductQuery> {
    let sort = SortOption::from_str(&args.sort)
        .ok_or_else(|| anyhow!("Unknown sort option: {}", args.sort))?;

    let mut query = ProductQuery::new()
        .with_sort(sort)
        .with_pagination(args.page, args.per_page);

    if let Some(ref text) = args.query {
        query = query.with_query(text.clone());
    }

    match args.categories.as_slice() {
        [] => {}
        [one] => query = query.with_filter(Filter::category(one.clone())),
        many => query = query.with_filter(Filter::Categories(many.to_vec())),
    }

    if let Some(ref metal) = args.metal {
        let metal = MetalType::from_str(metal)
            .ok_or_else(|| anyhow!("Unknown metal type: {}", metal))?;
        query = query.with_filter(Filter::metal(metal));
    }

    if args.min_price.is_some() || args.max_price.is_some() {
        let to_money = |amount: f64| -> Result<Money> {
            if !amount.is_finite() || amount < 0.0 {
                return Err(anyhow!("Price must be a non-negative number: {}", amount));
            }
            Ok(Money::from_decimal(amount, currency))
        };
        let min = args.min_price.map(to_money).transpose()?;
        let max = args.max_price.map(to_money).transpose()?;
        query = query.with_filter(Filter::price_range(min, max));
    }

    if args.in_stock {
        query = query.with_filter(Filter::in_stock());
    }

    if args.new_arrivals {
        query = query.with_filter(Filter::new_arrival());
    }

    match args.tags.as_slice() {
        [] => {}
        [one] => query = query.with_filter(Filter::tag(one.clone())),
        many => query = query.with_filter(Filter::Tags(many.to_vec())),
    }

    if let Some(ref purity) = args.purity {
        query = query.with_filter(Filter::purity(purity.clone()));
    }

    if args.facets {
        query = query.with_facets();
    }

    Ok(query)
}

#[cfg(test)]
mod tests {
    use super::*;
    use jewel_commerce::catalog::Catalog;

    fn args() -> BrowseArgs {
        BrowseArgs {
            query: None,
            categories: Vec::new(),
            metal: None,
            min_price: None,
            max_price: None,
            in_stock: false,
            new_arrivals: false,
            tags: Vec::new(),
            purity: None,
            sort: "featured".to_string(),
            page: 1,
            per_page: 24,
            facets: false,
        }
    }

    #[test]
    fn test_build_query_filters() {
        let query = build_query(
            &BrowseArgs {
                categories: vec!["Rings".to_string(), "Earrings".to_string()],
                metal: Some("rose_gold".to_string()),
                max_price: Some(20000.0),
                in_stock: true,
                sort: "price_asc".to_string(),
                ..args()
            },
            Currency::INR,
        )
        .unwrap();

        assert_eq!(query.sort, SortOption::PriceAsc);
        assert_eq!(query.filters.len(), 4);
        assert!(query.filters.contains(&Filter::metal(MetalType::RoseGold)));
    }

    #[test]
    fn test_build_query_rejects_bad_input() {
        let bad_sort = BrowseArgs {
            sort: "cheapest".to_string(),
            ..args()
        };
        assert!(build_query(&bad_sort, Currency::INR).is_err());

        let bad_metal = BrowseArgs {
            metal: Some("bronze".to_string()),
            ..args()
        };
        assert!(build_query(&bad_metal, Currency::INR).is_err());

        let bad_price = BrowseArgs {
            min_price: Some(-5.0),
            ..args()
        };
        assert!(build_query(&bad_price, Currency::INR).is_err());
    }

    #[test]
    fn test_huge_page_runs_without_overflow() {
        let catalog = Catalog::builtin().unwrap();
        let query = build_query(
            &BrowseArgs {
                page: usize::MAX,
                ..args()
            },
            catalog.currency(),
        )
        .unwrap();

        let results = query.run(&catalog);
        assert!(results.is_empty());
        assert!(!results.pagination.has_next);
        assert_eq!(results.pagination.page.saturating_add(1), usize::MAX);
    }

    #[test]
    fn test_build_query_runs_against_catalog() {
        let catalog = Catalog::builtin().unwrap();
        let query = build_query(
            &BrowseArgs {
                new_arrivals: true,
                in_stock: true,
                ..args()
            },
            catalog.currency(),
        )
        .unwrap();

        let results = query.run(&catalog);
        assert!(!results.is_empty());
        assert!(results.items.iter().all(|p| p.new_arrival && p.in_stock));
    }
}
