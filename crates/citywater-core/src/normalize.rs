// crates/citywater-core/src/normalize.rs

//! Free-form field normalization.
//!
//! The store's `population` column is text ("8.4 million", "8,400,000") and
//! its `tier` column is a loose categorical label. Both get normalized here
//! with silent recovery: a value the parser cannot make sense of becomes a
//! documented default, never an error.

use crate::model::Trend;

/// Fallback when population text is absent or unparseable.
pub const DEFAULT_POPULATION_MILLIONS: f64 = 1.0;

/// Parse free-form population text into millions, rounded to 2 decimals.
///
/// Text containing "million" (any case) or a literal `M` is read as a
/// count already expressed in millions: the first decimal substring is
/// taken directly. Anything else is treated as a full headcount: strip
/// every non-digit/non-dot character and divide by 1,000,000.
///
/// Returns [`DEFAULT_POPULATION_MILLIONS`] when the result would be zero,
/// negative, or not a number.
///
/// ```rust
/// use citywater_core::normalize::parse_population;
///
/// assert_eq!(parse_population("8.4 million"), 8.4);
/// assert_eq!(parse_population("8,400,000"), 8.4);
/// assert_eq!(parse_population("13.96M"), 13.96);
/// assert_eq!(parse_population("garbage"), 1.0);
/// ```
pub fn parse_population(raw: &str) -> f64 {
    let value = if raw.to_lowercase().contains("million") || raw.contains('M') {
        first_decimal_substring(raw)
    } else {
        let digits: String = raw.chars().filter(|c| c.is_ascii_digit() || *c == '.').collect();
        digits.parse::<f64>().ok().map(|n| n / 1_000_000.0)
    };

    match value {
        Some(v) if v.is_finite() && v > 0.0 => round2(v),
        _ => DEFAULT_POPULATION_MILLIONS,
    }
}

/// First `\d+(\.\d+)?` run in the text, if any.
fn first_decimal_substring(raw: &str) -> Option<f64> {
    let start = raw.find(|c: char| c.is_ascii_digit())?;
    let tail = &raw[start..];
    let mut end = 0;
    let mut seen_dot = false;
    for (i, c) in tail.char_indices() {
        if c.is_ascii_digit() {
            end = i + 1;
        } else if c == '.' && !seen_dot {
            seen_dot = true;
            end = i + 1;
        } else {
            break;
        }
    }
    tail[..end].trim_end_matches('.').parse().ok()
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

/// Mapping from the store's categorical `tier` label to a [`Trend`].
///
/// The label scheme changed across dataset revisions ("efficient" /
/// "growing" in one, "tier-1" / "tier-3" in another), so the mapping is a
/// value you construct and hand to the resolver rather than a fixed rule.
/// [`TrendRules::default`] accepts both schemes.
#[derive(Clone, Debug)]
pub struct TrendRules {
    /// Folded substrings mapping to [`Trend::Decreasing`].
    pub decreasing: Vec<String>,
    /// Folded substrings mapping to [`Trend::Increasing`].
    pub increasing: Vec<String>,
}

impl Default for TrendRules {
    fn default() -> Self {
        TrendRules {
            decreasing: vec!["efficient".into(), "1".into()],
            increasing: vec!["growing".into(), "3".into()],
        }
    }
}

impl TrendRules {
    /// Map a tier label to a trend. Absent or unrecognized labels are
    /// [`Trend::Stable`].
    pub fn derive(&self, tier: Option<&str>) -> Trend {
        let Some(tier) = tier else {
            return Trend::Stable;
        };
        let folded = tier.to_lowercase();
        if self.decreasing.iter().any(|k| folded.contains(k.as_str())) {
            Trend::Decreasing
        } else if self.increasing.iter().any(|k| folded.contains(k.as_str())) {
            Trend::Increasing
        } else {
            Trend::Stable
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_million_suffix() {
        assert_eq!(parse_population("8.4 million"), 8.4);
        assert_eq!(parse_population("Around 2 Million people"), 2.0);
        assert_eq!(parse_population("5.31M"), 5.31);
    }

    #[test]
    fn parses_full_headcounts() {
        assert_eq!(parse_population("8,400,000"), 8.4);
        assert_eq!(parse_population("2160000"), 2.16);
        // Rounds to 2 decimals.
        assert_eq!(parse_population("13964324"), 13.96);
    }

    #[test]
    fn recovers_from_garbage() {
        assert_eq!(parse_population("garbage"), 1.0);
        assert_eq!(parse_population(""), 1.0);
        assert_eq!(parse_population("0"), 1.0);
        assert_eq!(parse_population("..."), 1.0);
    }

    #[test]
    fn default_rules_cover_both_label_schemes() {
        let rules = TrendRules::default();
        assert_eq!(rules.derive(Some("efficient")), Trend::Decreasing);
        assert_eq!(rules.derive(Some("Tier-1")), Trend::Decreasing);
        assert_eq!(rules.derive(Some("growing")), Trend::Increasing);
        assert_eq!(rules.derive(Some("tier 3")), Trend::Increasing);
        assert_eq!(rules.derive(Some("")), Trend::Stable);
        assert_eq!(rules.derive(Some("tier-2")), Trend::Stable);
        assert_eq!(rules.derive(None), Trend::Stable);
    }
}
