// src/alfred.rs
use crate::error::SearchError;
use crate::history::SearchHistoryEntry;
use crate::pipeline::{ProcessedResults, ScoredResult};
use crate::score::round2;
use crate::search::{Linkable, SearchResult};
use crate::utils;
use serde::Serialize;
use std::error::Error;

/// Represents an Alfred Script Filter item
#[derive(Serialize, Debug, PartialEq)]
pub struct AlfredItem {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uid: Option<String>,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub arg: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub valid: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<Text>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quicklookurl: Option<String>,
}

#[derive(Serialize, Debug, PartialEq)]
pub struct Text {
    pub copy: String,
    pub largetype: String,
}

#[derive(Serialize, Debug)]
pub struct AlfredResponse {
    pub items: Vec<AlfredItem>,
}

impl AlfredItem {
    /// A non-actionable line of text
    pub fn message(title: impl Into<String>, subtitle: impl Into<String>) -> Self {
        AlfredItem {
            uid: None,
            title: title.into(),
            subtitle: Some(subtitle.into()),
            arg: None,
            valid: Some(false),
            text: None,
            quicklookurl: None,
        }
    }

    /// Build the item for one result
    pub fn from_result(result: &ScoredResult, show_score: bool) -> Self {
        let subtitle = match &result.result {
            SearchResult::Product(p) => {
                let mut parts = Vec::new();
                if let Some(price) = p.price {
                    parts.push(format!("{:.2}", price));
                }
                if p.rating > 0.0 {
                    parts.push(format!("★ {} ({} reviews)", p.rating, p.review_count));
                } else {
                    parts.push(format!("Unrated ({} reviews)", p.review_count));
                }
                if show_score {
                    if let Some(score) = result.winning_score {
                        parts.push(format!("Score: {}", round2(score)));
                    }
                }
                if !p.badge.is_empty() {
                    parts.push(p.badge.clone());
                }
                parts.join(" · ")
            }
            SearchResult::Ad(a) => {
                let host = utils::get_domain(&a.link).unwrap_or_else(|| a.link.clone());
                match &a.advertiser {
                    Some(advertiser) => format!("{} · {}", advertiser, host),
                    None => host,
                }
            }
        };

        let uid = match &result.result {
            SearchResult::Product(p) => p.sku.clone().unwrap_or_else(|| p.link.clone()),
            SearchResult::Ad(a) => a.link.clone(),
        };

        AlfredItem {
            uid: Some(uid),
            title: result.title().to_string(),
            subtitle: Some(subtitle),
            arg: Some(result.link().to_string()),
            valid: Some(true),
            text: Some(Text {
                copy: result.link().to_string(),
                largetype: result.title().to_string(),
            }),
            quicklookurl: Some(result.link().to_string()),
        }
    }
}

impl From<&SearchHistoryEntry> for AlfredItem {
    fn from(entry: &SearchHistoryEntry) -> Self {
        AlfredItem {
            uid: Some(format!("{}:{}", entry.source.key(), entry.keyword)),
            title: entry.keyword.clone(),
            subtitle: Some(format!("Search {} again", entry.source)),
            arg: Some(format!("{} {}", entry.source.key(), entry.keyword)),
            valid: Some(true),
            text: None,
            quicklookurl: None,
        }
    }
}

/// Items for one page: a summary line, the top result, then the page itself
pub fn result_items(
    processed: &ProcessedResults,
    page: usize,
    page_size: usize,
    show_score: bool,
) -> Vec<AlfredItem> {
    if processed.is_empty() {
        return vec![AlfredItem::message("No results", "Try another keyword")];
    }

    let shown = processed.displayed_page(page, page_size);
    let stats = &processed.stats;
    let mut summary = format!(
        "Page {}/{} · {} shown of {}",
        page,
        processed.page_count(page_size),
        shown.len(),
        stats.total
    );
    if stats.avg_price > 0.0 || stats.avg_rating > 0.0 {
        summary.push_str(&format!(
            " · avg price {:.2} · avg rating {:.2} · {} reviews",
            stats.avg_price, stats.avg_rating, stats.total_reviews
        ));
    }

    let mut items = vec![AlfredItem::message("Search results", summary)];

    if let Some(top) = &processed.top {
        let mut item = AlfredItem::from_result(top, show_score);
        item.title = format!("🏆 {}", item.title);
        item.uid = None;
        items.push(item);
    }

    items.extend(shown.into_iter().map(|r| AlfredItem::from_result(r, show_score)));
    items
}

/// A failed action shown as a single notification item
pub fn error_item(err: &SearchError) -> AlfredItem {
    AlfredItem::message(err.title(), err.to_string())
}

/// Output items to Alfred
pub fn output_items(items: Vec<AlfredItem>) -> Result<(), Box<dyn Error>> {
    let response = AlfredResponse { items };
    println!("{}", serde_json::to_string(&response)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::process;
    use crate::search::{Ad, Product, Source};

    fn processed() -> ProcessedResults {
        process(vec![
            SearchResult::Product(Product {
                sku: Some("SKU-1".to_string()),
                title: "Lamp".to_string(),
                price: Some(50.0),
                rating: 4.4,
                review_count: 13973,
                badge: "Best Seller".to_string(),
                link: "https://amazon.com/lamp".to_string(),
            }),
            SearchResult::Product(Product {
                sku: None,
                title: "Desk".to_string(),
                price: Some(300.0),
                rating: 0.0,
                review_count: 2,
                badge: String::new(),
                link: "https://amazon.com/desk".to_string(),
            }),
        ])
        .unwrap()
    }

    #[test]
    fn test_product_item() {
        let processed = processed();
        let item = AlfredItem::from_result(&processed.results[0], true);

        assert_eq!(item.uid.as_deref(), Some("SKU-1"));
        assert_eq!(item.arg.as_deref(), Some("https://amazon.com/lamp"));
        assert_eq!(
            item.subtitle.as_deref(),
            Some("50.00 · ★ 4.4 (13973 reviews) · Score: 79.33 · Best Seller")
        );

        let hidden = AlfredItem::from_result(&processed.results[1], false);
        assert_eq!(hidden.uid.as_deref(), Some("https://amazon.com/desk"));
        assert_eq!(hidden.subtitle.as_deref(), Some("300.00 · Unrated (2 reviews)"));
    }

    #[test]
    fn test_ad_item_uses_host() {
        let processed = process(vec![SearchResult::Ad(Ad {
            title: "Sale".to_string(),
            link: "https://www.facebook.com/ads/library/?id=1".to_string(),
            advertiser: Some("Nike".to_string()),
            body: None,
        })])
        .unwrap();
        let item = AlfredItem::from_result(&processed.results[0], true);

        assert_eq!(item.subtitle.as_deref(), Some("Nike · www.facebook.com"));
    }

    #[test]
    fn test_result_items_layout() {
        let items = result_items(&processed(), 1, 12, true);

        assert_eq!(items.len(), 4);
        assert_eq!(items[0].valid, Some(false));
        assert!(items[0].subtitle.as_ref().unwrap().starts_with("Page 1/1 · 2 shown of 2"));
        assert_eq!(items[1].title, "🏆 Lamp");
        assert_eq!(items[2].title, "Lamp");
        assert_eq!(items[3].title, "Desk");
    }

    #[test]
    fn test_empty_results_message() {
        let items = result_items(&ProcessedResults::default(), 1, 12, true);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].title, "No results");
    }

    #[test]
    fn test_history_item() {
        let entry = SearchHistoryEntry::new("watch", Source::Ebay);
        let item = AlfredItem::from(&entry);

        assert_eq!(item.title, "watch");
        assert_eq!(item.arg.as_deref(), Some("ebay watch"));
        assert_eq!(item.subtitle.as_deref(), Some("Search eBay again"));
    }

    #[test]
    fn test_error_item() {
        let item = error_item(&SearchError::BackendError("HTTP 502".to_string()));
        assert_eq!(item.title, "Backend error");
        assert_eq!(item.subtitle.as_deref(), Some("backend error: HTTP 502"));
        assert_eq!(item.valid, Some(false));
    }
}
