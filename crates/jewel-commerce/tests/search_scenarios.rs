//! End-to-end search behaviour over small hand-built catalogs.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use jewel_commerce::prelude::*;

fn sample_catalog() -> Catalog {
    let products = vec![
        Product::new("1", "Diamond Studded Jhumkas", "Earrings", Money::new(4_599_900, Currency::INR))
            .with_tags(["diamond", "jhumka"]),
        Product::new("2", "Gold Chandbalis", "Earrings", Money::new(3_850_000, Currency::INR))
            .with_tags(["gold", "chandbali"]),
    ];
    let categories = ["Earrings", "Rings", "Necklaces"].into_iter().map(Category::new).collect();
    let report = Catalog::from_parts(Currency::INR, categories, products);
    assert!(report.is_clean());
    report.catalog
}

fn product_ids(products: &[&Product]) -> Vec<String> {
    products.iter().map(|p| p.id.to_string()).collect()
}

#[test]
fn jhumka_suggests_product_one() {
    let catalog = sample_catalog();
    let s = suggest("jhumka", catalog.products(), catalog.categories(), DEFAULT_SUGGESTION_LIMIT);
    assert!(s
        .iter()
        .any(|s| s.kind == SuggestionKind::Product && s.product.map(|p| p.id.as_str()) == Some("1")));
}

#[test]
fn misspelt_category_is_corrected() {
    let catalog = sample_catalog();
    let s = suggest("earings", catalog.products(), catalog.categories(), DEFAULT_SUGGESTION_LIMIT);
    assert!(s.is_empty());

    let c = fuzzy_correct(
        "earings",
        catalog.products(),
        catalog.categories(),
        DEFAULT_SIMILARITY_THRESHOLD,
    );
    assert_eq!(c.correction.as_deref(), Some("Earrings"));
    assert_eq!(product_ids(&c.results), vec!["1", "2"]);
}

#[test]
fn single_character_is_idle() {
    let catalog = sample_catalog();
    let engine = SearchEngine::new(&catalog, SearchConfig::default());
    assert!(engine.suggest("x").is_empty());
    assert_eq!(engine.search("x"), SearchOutcome::Idle);
}

#[test]
fn nothing_similar_is_empty() {
    let catalog = sample_catalog();
    let c = fuzzy_correct(
        "zzzzz",
        catalog.products(),
        catalog.categories(),
        DEFAULT_SIMILARITY_THRESHOLD,
    );
    assert!(c.correction.is_none());
    assert!(c.results.is_empty());

    let engine = SearchEngine::new(&catalog, SearchConfig::default());
    assert_eq!(engine.search("zzzzz"), SearchOutcome::Empty);
}

#[test]
fn results_are_deterministic() {
    let catalog = Catalog::builtin().unwrap();
    let engine = SearchEngine::new(&catalog, SearchConfig::default());
    for q in ["dia", "gold", "earings", "neklace", "zzzzz", "r"] {
        assert_eq!(engine.search(q), engine.search(q), "query {q}");
    }
}

#[test]
fn every_name_substring_suggests_its_product() {
    let catalog = sample_catalog();
    for product in catalog.products() {
        let name = normalize(&product.name);
        let chars: Vec<char> = name.chars().collect();
        for start in 0..chars.len() {
            for end in (start + 2)..=chars.len() {
                let sub: String = chars[start..end].iter().collect();
                // normalize() trims, so an edge space leaves a different,
                // possibly sub-threshold, query. Only untrimmed substrings
                // are guaranteed to find their product.
                if sub.starts_with(' ') || sub.ends_with(' ') {
                    continue;
                }
                let s = suggest(&sub, catalog.products(), catalog.categories(), 10);
                assert!(
                    s.iter().any(|s| s.product.map(|p| &p.id) == Some(&product.id)),
                    "substring {sub:?} of {:?}",
                    product.name
                );
            }
        }
    }
}

#[test]
fn correction_is_never_surfaced_alongside_suggestions() {
    let catalog = Catalog::builtin().unwrap();
    let engine = SearchEngine::new(&catalog, SearchConfig::default());
    for q in ["gold", "dia", "ring", "pendant", "bridal", "silver"] {
        assert!(!engine.suggest(q).is_empty());
        assert!(matches!(engine.search(q), SearchOutcome::Suggested(_)), "query {q}");
    }
}

#[test]
fn correction_is_idempotent() {
    let catalog = Catalog::builtin().unwrap();
    let engine = SearchEngine::new(&catalog, SearchConfig::default());
    for q in ["earings", "neklace", "jhumkaa", "mangalsutr", "solitare", "chandbaali"] {
        let c = engine.correct(q);
        let term = c.correction.clone().unwrap_or_else(|| panic!("no correction for {q}"));
        let again = engine.products_matching(&term);
        assert!(!again.is_empty());
        assert_eq!(product_ids(&again), product_ids(&c.results), "query {q}");
    }
}

#[test]
fn output_is_bounded_for_large_catalogs() {
    let products: Vec<Product> = (0..600)
        .map(|i| {
            Product::new(
                format!("p{i}"),
                format!("Gold Hoop {i}"),
                "Earrings",
                Money::new(1000 + i, Currency::INR),
            )
            .with_tags(["gold", "hoop"])
        })
        .collect();
    let report = Catalog::from_parts(Currency::INR, vec![Category::new("Earrings")], products);
    let catalog = report.catalog;

    let s = suggest("gold", catalog.products(), catalog.categories(), MAX_SUGGESTION_LIMIT);
    assert_eq!(s.len(), MAX_SUGGESTION_LIMIT);
    assert!(s.iter().all(|s| s.kind == SuggestionKind::Product));

    let engine = SearchEngine::new(&catalog, SearchConfig::default());
    assert!(engine.suggest("hoop").len() <= SearchConfig::default().max_suggestions);
}

#[tokio::test(start_paused = true)]
async fn typing_burst_runs_matcher_once() {
    let catalog = Arc::new(Catalog::builtin().unwrap());
    let resolved: Arc<Mutex<Vec<(String, String)>>> = Arc::new(Mutex::new(Vec::new()));

    let sink = Arc::clone(&resolved);
    let shared = Arc::clone(&catalog);
    let debouncer = Debouncer::spawn(Duration::from_millis(150), move |query: String| {
        let engine = SearchEngine::new(&shared, SearchConfig::default());
        let mut session = SearchSession::new();
        session.input(&query);
        session.resolve(&engine);
        sink.lock()
            .unwrap()
            .push((query, session.state().name().to_string()));
    });

    for q in ["d", "di", "dia"] {
        debouncer.push(q.to_string()).unwrap();
        tokio::time::sleep(Duration::from_millis(50)).await;
    }
    tokio::time::sleep(Duration::from_millis(250)).await;

    let resolved = resolved.lock().unwrap();
    assert_eq!(*resolved, vec![("dia".to_string(), "suggested".to_string())]);
}
