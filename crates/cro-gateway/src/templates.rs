//! Deterministic insight texts for the simulated backend.
//!
//! The same URL always yields the same insights; only the confidence score
//! and the record identity vary between submissions.

use cro_core::report::keys;
use cro_core::{InsightValue, Insights};
use url::Url;

/// Build the insight map for `url`, canonical keys first, then the
/// improvement list.
#[must_use]
pub fn insights_for(url: &Url) -> Insights {
    let host = url.host_str().unwrap_or("the page");
    let page = page_label(url);

    let mut insights = Insights::new();
    insights.insert(
        keys::LAYOUT_ANALYSIS.into(),
        InsightValue::Text(format!(
            "The {page} on {host} places the primary product content above the fold, \
             but secondary navigation competes with the main purchase path."
        )),
    );
    insights.insert(
        keys::CTA_EVALUATION.into(),
        InsightValue::Text(format!(
            "The main call to action on {host} is visible but lacks contrast against the \
             surrounding elements; urgency cues are missing."
        )),
    );
    insights.insert(
        keys::IMAGE_QUALITY.into(),
        InsightValue::Text(format!(
            "Product imagery on the {page} is sharp, though alternate angles and zoom \
             support would help shoppers evaluate the item."
        )),
    );
    insights.insert(
        keys::DESCRIPTION_CLARITY.into(),
        InsightValue::Text(format!(
            "The description on {host} covers core features; benefits and sizing details \
             are buried below technical specifications."
        )),
    );
    insights.insert(
        keys::IMPROVEMENTS.into(),
        InsightValue::List(vec![
            format!("Increase the contrast of the primary button on {host}"),
            "Add trust signals (reviews, guarantees) next to the call to action".into(),
            format!("Lead the {page} description with customer benefits"),
            "Offer additional product images with zoom".into(),
        ]),
    );
    insights
}

/// Short human label for the analyzed page, derived from its last path
/// segment.
fn page_label(url: &Url) -> String {
    url.path_segments()
        .and_then(|mut segments| segments.rfind(|s| !s.is_empty()))
        .map_or_else(|| "home page".to_string(), |segment| format!("\"{segment}\" page"))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[test]
    fn same_url_same_insights() {
        let u = url("https://shop.example.com/products/blue-mug");
        assert_eq!(insights_for(&u), insights_for(&u));
    }

    #[test]
    fn canonical_keys_in_order_then_improvements() {
        let insights = insights_for(&url("https://shop.example.com/"));
        let order: Vec<&str> = insights.keys().map(String::as_str).collect();
        assert_eq!(
            order,
            vec![
                keys::LAYOUT_ANALYSIS,
                keys::CTA_EVALUATION,
                keys::IMAGE_QUALITY,
                keys::DESCRIPTION_CLARITY,
                keys::IMPROVEMENTS,
            ]
        );
        assert!(insights[keys::IMPROVEMENTS].as_list().is_some());
    }

    #[test]
    fn texts_mention_the_host_and_page() {
        let insights = insights_for(&url("https://shop.example.com/products/blue-mug/"));
        let layout = insights[keys::LAYOUT_ANALYSIS].as_text().unwrap();
        assert!(layout.contains("shop.example.com"));
        assert!(layout.contains("\"blue-mug\" page"));
    }

    #[test]
    fn root_path_is_the_home_page() {
        assert_eq!(page_label(&url("https://example.com")), "home page");
    }
}
