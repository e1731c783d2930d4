use std::sync::LazyLock;

use regex::Regex;

use crate::NO_NAME;
use crate::domain::product::{CleanProduct, RawProduct};

static NON_ALPHANUMERIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-zA-Z0-9\s]").expect("valid character class"));

/// Join the textual fields of a product into one lowercase string with every
/// character outside `[a-zA-Z0-9\s]` removed.
///
/// Whitespace is kept exactly as the character-class substitution leaves it;
/// there is no collapsing or trimming.
pub fn combined_text(fields: &[&str]) -> String {
    let joined = fields.join(" ").to_lowercase();
    NON_ALPHANUMERIC.replace_all(&joined, "").into_owned()
}

/// Trimmed display name, or the `no_name` sentinel when blank.
pub fn display_name(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        NO_NAME.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Normalize raw products, assigning 0-based row indexes as identifiers.
pub fn clean_products(raw: &[RawProduct]) -> Vec<CleanProduct> {
    raw.iter()
        .enumerate()
        .map(|(row, product)| CleanProduct {
            id: row as i32,
            product_name: display_name(&product.product_name),
            combined_text: combined_text(&[
                &product.product_title,
                &product.product_summary,
                &product.product_name,
                &product.brand,
                &product.unspsc,
                &product.description,
            ]),
        })
        .collect()
}
