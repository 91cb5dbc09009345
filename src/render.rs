//! Plain-text rendering of products for the terminal

use std::fmt::Write;

use crate::data::Product;
use crate::store::{ProductLoader, PRODUCTS_KEY};

/// Column width for wrapped descriptions
const DESCRIPTION_WIDTH: usize = 80;

/// Maximum description lines shown per product in a list
const DESCRIPTION_LINES: usize = 3;

/// Formats a price as dollars with two decimals
pub fn format_price(price: f64) -> String {
    format!("${:.2}", price)
}

/// Word-wraps `text` to `width` columns, keeping at most `max_lines` lines
///
/// When text is dropped the last kept line ends with "...".
pub fn wrap_text(text: &str, width: usize, max_lines: usize) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut truncated = false;

    if max_lines == 0 {
        return lines;
    }

    for word in text.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
        } else if current.chars().count() + 1 + word.chars().count() <= width {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(std::mem::take(&mut current));
            if lines.len() == max_lines {
                truncated = true;
                break;
            }
            current.push_str(word);
        }
    }

    if !truncated && !current.is_empty() {
        lines.push(current);
    }

    let last = lines.len().saturating_sub(1);
    for (i, line) in lines.iter_mut().enumerate() {
        if line.chars().count() > width || (truncated && i == last) {
            *line = ellipsize(line, width);
        }
    }

    lines
}

/// Cuts `line` so that, with a trailing "...", it fits in `width` columns
///
/// Widths under 3 have no room for the marker and just cut.
fn ellipsize(line: &str, width: usize) -> String {
    if width < 3 {
        return line.chars().take(width).collect();
    }
    let keep = width.saturating_sub(3).min(line.chars().count());
    let mut out: String = line.chars().take(keep).collect();
    out.push_str("...");
    out
}

/// Renders the product list: title, price and a short description per entry
pub fn render_list(products: &[Product]) -> String {
    if products.is_empty() {
        return "No products.\n".to_string();
    }

    let mut out = String::new();
    for (i, product) in products.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        let _ = writeln!(out, "{}", product.title);
        let _ = writeln!(out, "  {}", format_price(product.price));
        for line in wrap_text(&product.description, DESCRIPTION_WIDTH, DESCRIPTION_LINES) {
            let _ = writeln!(out, "  {}", line);
        }
    }
    out
}

/// Renders every field of one product
pub fn render_product(product: &Product) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "#{} {}", product.id, product.title);
    let _ = writeln!(out, "Price:    {}", format_price(product.price));
    let _ = writeln!(out, "Category: {}", product.category);
    let _ = writeln!(out, "Image:    {}", product.image);
    let _ = writeln!(out);
    for line in wrap_text(&product.description, DESCRIPTION_WIDTH, usize::MAX) {
        let _ = writeln!(out, "{}", line);
    }
    out
}

/// Describes the endpoint and the state of the persisted snapshot
pub fn render_status(loader: &ProductLoader) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Endpoint: {}", loader.client().base_url());

    let Some(storage) = loader.storage() else {
        let _ = writeln!(out, "Caching disabled");
        return out;
    };

    let _ = writeln!(out, "Cache:    {}", storage.cache_path(PRODUCTS_KEY).display());
    match loader.read_cached() {
        Some(products) => {
            let _ = writeln!(out, "Cached products: {}", products.len());
            if let Some(modified) = storage.modified_at(PRODUCTS_KEY) {
                let _ = writeln!(out, "Saved at: {}", modified.format("%Y-%m-%d %H:%M:%S UTC"));
            }
        }
        None => {
            let _ = writeln!(out, "No cached snapshot");
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::CacheManager;
    use crate::data::ProductsClient;
    use tempfile::TempDir;

    fn shirt() -> Product {
        Product {
            id: 1,
            title: "Shirt".to_string(),
            price: 19.99,
            description: "Cotton shirt".to_string(),
            category: "clothing".to_string(),
            image: "http://x/y.png".to_string(),
        }
    }

    #[test]
    fn test_format_price_two_decimals() {
        assert_eq!(format_price(19.99), "$19.99");
        assert_eq!(format_price(7.0), "$7.00");
        assert_eq!(format_price(109.954), "$109.95");
    }

    #[test]
    fn test_wrap_short_text_is_one_line() {
        assert_eq!(wrap_text("Cotton   shirt", 80, 3), vec!["Cotton shirt"]);
    }

    #[test]
    fn test_wrap_empty_text() {
        assert!(wrap_text("", 80, 3).is_empty());
        assert!(wrap_text("words", 80, 0).is_empty());
    }

    #[test]
    fn test_wrap_breaks_on_word_boundaries() {
        let lines = wrap_text("aaa bbb ccc ddd", 7, 10);
        assert_eq!(lines, vec!["aaa bbb", "ccc ddd"]);
    }

    #[test]
    fn test_wrap_truncates_to_max_lines() {
        let lines = wrap_text("aaa bbb ccc ddd eee fff", 7, 2);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "aaa bbb");
        assert_eq!(lines[1], "ccc ...");
    }

    #[test]
    fn test_wrap_cuts_overlong_word() {
        let lines = wrap_text("abcdefghijkl", 8, 3);
        assert_eq!(lines, vec!["abcde..."]);
    }

    #[test]
    fn test_wrap_never_exceeds_narrow_width() {
        assert_eq!(wrap_text("abcdef", 2, 1), vec!["ab"]);
        assert_eq!(wrap_text("abc def", 3, 1), vec!["..."]);
        for width in 0..6 {
            for line in wrap_text("abcdef ghi", width, 3) {
                assert!(line.chars().count() <= width, "{:?} wider than {}", line, width);
            }
        }
    }

    #[test]
    fn test_render_list_shows_title_price_and_description() {
        let out = render_list(&[shirt()]);
        assert_eq!(out, "Shirt\n  $19.99\n  Cotton shirt\n");
    }

    #[test]
    fn test_render_list_separates_entries() {
        let mut mug = shirt();
        mug.title = "Mug".to_string();
        let out = render_list(&[shirt(), mug]);
        assert!(out.contains("Cotton shirt\n\nMug\n"));
    }

    #[test]
    fn test_render_empty_list() {
        assert_eq!(render_list(&[]), "No products.\n");
    }

    #[test]
    fn test_render_product_includes_every_field() {
        let out = render_product(&shirt());
        assert!(out.starts_with("#1 Shirt\n"));
        assert!(out.contains("$19.99"));
        assert!(out.contains("clothing"));
        assert!(out.contains("http://x/y.png"));
        assert!(out.ends_with("Cotton shirt\n"));
    }

    #[test]
    fn test_render_status_without_storage() {
        let loader = ProductLoader::new(None, ProductsClient::with_base_url("http://shop/p"));
        let out = render_status(&loader);
        assert!(out.contains("Endpoint: http://shop/p"));
        assert!(out.contains("Caching disabled"));
    }

    #[test]
    fn test_render_status_with_snapshot() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let storage = CacheManager::with_dir(temp_dir.path().to_path_buf());
        let loader = ProductLoader::new(Some(storage), ProductsClient::new());

        assert!(render_status(&loader).contains("No cached snapshot"));

        loader.try_save(&[shirt()]).expect("Save should succeed");
        let out = render_status(&loader);
        assert!(out.contains("Cached products: 1"));
        assert!(out.contains("Saved at: "));
    }
}
