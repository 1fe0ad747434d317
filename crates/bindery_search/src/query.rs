//! Solr query string builders.
//!
//! Pure functions producing the query renderings the search backend
//! understands. Terms are passed through verbatim; weighted variants render
//! weights in decimal form with a trailing `.0` for integral values, so
//! `200.0` stays `200.0`.

/// A single keyword query.
pub fn keyword(term: &str) -> String {
    term.to_string()
}

/// Conjunction of keywords: `"a AND b AND c"`.
pub fn all_keywords(terms: &[&str]) -> String {
    join_terms("AND", terms)
}

/// Disjunction of keywords: `"a OR b OR c"`.
pub fn any_keywords(terms: &[&str]) -> String {
    join_terms("OR", terms)
}

/// Proximity query: `"\"a b\"~4"` finds the terms within `proximity` words
/// of each other.
pub fn keywords_near(proximity: u32, terms: &[&str]) -> String {
    format!("\"{}\"~{}", terms.join(" "), proximity)
}

/// Prefix query: `"term*"`.
pub fn starts_with(term: &str) -> String {
    format!("{term}*")
}

/// Prefix and suffix query: `"prefix*suffix"`.
pub fn starts_with_ends_with(prefix: &str, suffix: &str) -> String {
    format!("{prefix}*{suffix}")
}

/// Weighted conjunction: `"(a)^1.59 AND (b)^200.0"`.
///
/// Terms and weights are paired by index.
pub fn all_keywords_weighted(terms: &[&str], weights: &[f64]) -> String {
    terms
        .iter()
        .zip(weights)
        .map(|(term, weight)| format!("({})^{}", term, render_weight(*weight)))
        .collect::<Vec<_>>()
        .join(" AND ")
}

fn join_terms(operator: &str, terms: &[&str]) -> String {
    terms.join(&format!(" {operator} "))
}

// Integral weights keep a trailing `.0` in the rendering.
fn render_weight(weight: f64) -> String {
    if weight.is_finite() && weight.fract() == 0.0 {
        format!("{weight:.1}")
    } else {
        format!("{weight}")
    }
}
