//! Output formatting for the CLI.

use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use jewel_commerce::catalog::Product;
use jewel_commerce::search::{SearchSuggestion, SuggestionKind};

/// Output handler for CLI messages.
#[derive(Clone)]
pub struct Output {
    verbose: bool,
    json: bool,
}

impl Output {
    /// Create a new output handler.
    pub fn new(verbose: bool, json: bool) -> Self {
        Self { verbose, json }
    }

    /// Print an info message.
    pub fn info(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{} {}", style("ℹ").blue(), msg);
    }

    /// Print a success message.
    pub fn success(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{} {}", style("✓").green(), msg);
    }

    /// Print a warning message.
    pub fn warn(&self, msg: &str) {
        if self.json {
            return;
        }
        eprintln!("{} {}", style("⚠").yellow(), msg);
    }

    /// Print an error message.
    pub fn error(&self, msg: &str) {
        if self.json {
            eprintln!("{}", serde_json::json!({ "error": msg }));
            return;
        }
        eprintln!("{} {}", style("✗").red(), style(msg).red());
    }

    /// Print a debug message (only in verbose mode).
    pub fn debug(&self, msg: &str) {
        if !self.verbose || self.json {
            return;
        }
        eprintln!("{} {}", style("→").dim(), style(msg).dim());
    }

    /// Print a header/title.
    pub fn header(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("\n{}", style(msg).bold().underlined());
    }

    /// Print plain text.
    pub fn line(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{}", msg);
    }

    /// Print JSON output.
    pub fn json<T: serde::Serialize>(&self, value: &T) {
        if let Ok(json) = serde_json::to_string_pretty(value) {
            println!("{}", json);
        }
    }

    /// Print a key-value pair.
    pub fn kv(&self, key: &str, value: &str) {
        if self.json {
            return;
        }
        println!("  {}: {}", style(key).dim(), value);
    }

    /// Print a list item.
    pub fn list_item(&self, item: &str) {
        if self.json {
            return;
        }
        println!("  {} {}", style("•").dim(), item);
    }

    /// Print a table row.
    pub fn table_row(&self, cols: &[&str], widths: &[usize]) {
        if self.json {
            return;
        }
        let formatted: Vec<String> = cols
            .iter()
            .zip(widths.iter())
            .map(|(col, width)| format!("{:width$}", col, width = width))
            .collect();
        println!("  {}", formatted.join("  ").trim_end());
    }

    /// Print one suggestion row.
    pub fn suggestion(&self, suggestion: &SearchSuggestion<'_>) {
        if self.json {
            return;
        }
        let detail = match suggestion.product {
            Some(product) => format!(
                "{}  {}",
                style(product.price.display()).cyan(),
                style(&product.category).dim()
            ),
            None => String::new(),
        };
        println!(
            "  {} {}  {}",
            kind_badge(suggestion.kind),
            suggestion.text,
            detail
        );
    }

    /// Print product rows as a table.
    pub fn products(&self, products: &[&Product]) {
        if self.json || products.is_empty() {
            return;
        }
        let widths = [4, 32, 12, 14, 12, 0];
        self.table_row(&["ID", "NAME", "CATEGORY", "PRICE", "METAL", "FLAGS"], &widths);
        for product in products {
            let name = truncate(&product.name, widths[1]);
            let price = product.price.display();
            let flags = flags(product);
            self.table_row(
                &[
                    product.id.as_str(),
                    name.as_str(),
                    product.category.as_str(),
                    price.as_str(),
                    product.metal_type.display_name(),
                    flags.as_str(),
                ],
                &widths,
            );
        }
    }

    /// Create a spinner for indeterminate progress.
    pub fn spinner(&self, msg: &str) -> ProgressBar {
        if self.json {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new_spinner();
        if let Ok(spinner_style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
            pb.set_style(spinner_style);
        }
        pb.set_message(msg.to_string());
        pb.enable_steady_tick(std::time::Duration::from_millis(100));
        pb
    }

    /// Check if verbose mode is enabled.
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    /// Check if JSON mode is enabled.
    pub fn is_json(&self) -> bool {
        self.json
    }
}

/// Colored label for a suggestion kind.
pub fn kind_badge(kind: SuggestionKind) -> String {
    let label = format!("[{}]", kind.as_str());
    match kind {
        SuggestionKind::Product => style(label).green().to_string(),
        SuggestionKind::Category => style(label).magenta().to_string(),
        SuggestionKind::Tag => style(label).yellow().to_string(),
    }
}

/// Stock and arrival flags for a product row.
pub fn flags(product: &Product) -> String {
    let mut flags = Vec::new();
    if product.new_arrival {
        flags.push("new");
    }
    if !product.in_stock {
        flags.push("sold out");
    }
    flags.join(", ")
}

/// Shorten text to `width` characters, marking the cut with an ellipsis.
pub fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let kept: String = text.chars().take(width.saturating_sub(1)).collect();
    format!("{}…", kept)
}

#[cfg(test)]
mod tests {
    use super::*;
    use jewel_commerce::{Currency, Money};

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Gold Chandbalis", 32), "Gold Chandbalis");
        assert_eq!(truncate("Diamond Studded Jhumkas", 10), "Diamond S…");
        assert_eq!(truncate("Diamond", 7), "Diamond");
    }

    #[test]
    fn test_flags() {
        let mut product = Product::new("1", "Polki Choker Set", "Necklaces", Money::new(100, Currency::INR));
        assert_eq!(flags(&product), "");
        product.in_stock = false;
        product.new_arrival = true;
        assert_eq!(flags(&product), "new, sold out");
    }
}
