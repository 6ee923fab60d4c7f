// crates/citywater-core/src/text.rs

//! Slug and name-folding helpers.
//!
//! City identifiers are slugs: lowercase words joined by underscore,
//! derived from a display name ("New York City" -> "new_york_city"). The
//! reverse mapping is lossy for names with unusual capitalization, which is
//! fine here: the reconstructed name is only ever used as a search
//! candidate against the store.

/// Convert a string into a folded key suitable for comparison.
///
/// 1\) Transliterate Unicode → ASCII (e.g. `Zürich` -> `Zurich`)
/// 2\) Normalize to lowercase
///
/// # Examples
///
/// ```rust
/// use citywater_core::text::fold_key;
///
/// assert_eq!(fold_key("Zürich"), "zurich");
/// assert_eq!(fold_key("SÃO PAULO"), "sao paulo");
/// ```
pub fn fold_key(s: &str) -> String {
    deunicode::deunicode(s).to_lowercase()
}

/// Case-insensitive, accent-insensitive equality on folded form.
pub fn equals_folded(a: &str, b: &str) -> bool {
    fold_key(a) == fold_key(b)
}

/// Derive a slug identifier from a display name.
///
/// Lowercases and replaces whitespace runs with a single underscore.
///
/// ```rust
/// use citywater_core::text::slug_from_name;
///
/// assert_eq!(slug_from_name("New York City"), "new_york_city");
/// assert_eq!(slug_from_name("  Los   Angeles "), "los_angeles");
/// ```
pub fn slug_from_name(name: &str) -> String {
    name.trim()
        .split_whitespace()
        .map(|w| w.to_lowercase())
        .collect::<Vec<_>>()
        .join("_")
}

/// Reconstruct a candidate display name from a slug.
///
/// Splits on underscore and capitalizes the first letter of each word:
/// `"lake_city"` -> `"Lake City"`. Inverse of [`slug_from_name`] up to
/// capitalization.
pub fn name_from_slug(slug: &str) -> String {
    slug.split('_')
        .filter(|w| !w.is_empty())
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
