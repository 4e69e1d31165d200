//! Core search-result types.
//!
//! Defines:
//! - `Source` enum naming the backends a keyword can be sent to
//! - `Product` and `Ad`, the two result shapes the backends return
//! - `SearchResult`, the tagged union of both, and the `Linkable` capability
//! - lenient deserializers for the backend's loosely typed fields

use crate::error::SearchError;
use crate::score::{clean_title, parse_price};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Known search backends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Source {
    Amazon,
    Ebay,
    MetaAds,
}

impl Source {
    /// Path of the scrape endpoint, relative to the backend base URL
    pub fn endpoint(&self) -> &'static str {
        match self {
            Source::Amazon => "scrape_amazon",
            Source::Ebay => "scrape_ebay",
            Source::MetaAds => "scrape_meta_ads",
        }
    }

    /// Whether this backend returns ads rather than products
    pub fn returns_ads(&self) -> bool {
        matches!(self, Source::MetaAds)
    }

    /// Identifier used on the command line, in history and in export filenames
    pub fn key(&self) -> &'static str {
        match self {
            Source::Amazon => "amazon",
            Source::Ebay => "ebay",
            Source::MetaAds => "meta_ads",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Source::Amazon => "Amazon",
            Source::Ebay => "eBay",
            Source::MetaAds => "Meta Ads",
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Source {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "amazon" => Ok(Source::Amazon),
            "ebay" => Ok(Source::Ebay),
            "meta_ads" | "meta" | "ads" => Ok(Source::MetaAds),
            other => Err(SearchError::InvalidInput(format!(
                "unknown source '{}' (expected amazon, ebay or meta_ads)",
                other
            ))),
        }
    }
}

/// Anything that can be shown as a titled, clickable entry
pub trait Linkable {
    fn title(&self) -> &str;
    fn link(&self) -> &str;
}

/// A product listing from a marketplace backend
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Product {
    #[serde(default, alias = "SKU")]
    pub sku: Option<String>,
    #[serde(alias = "Nom", alias = "name", deserialize_with = "deserialize_title")]
    pub title: String,
    #[serde(default, alias = "Prix", deserialize_with = "deserialize_price")]
    pub price: Option<f64>,
    #[serde(default, alias = "Rating", deserialize_with = "null_as_default")]
    pub rating: f64,
    #[serde(
        default,
        alias = "Review_Count",
        alias = "reviews",
        deserialize_with = "null_as_default"
    )]
    pub review_count: u64,
    #[serde(default, alias = "Badge", deserialize_with = "deserialize_badge")]
    pub badge: String,
    #[serde(alias = "Lien", alias = "url")]
    pub link: String,
}

/// An advertisement from the ad library backend
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Ad {
    #[serde(default, alias = "ad_title", deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(alias = "url", alias = "ad_link")]
    pub link: String,
    #[serde(default, alias = "page_name")]
    pub advertiser: Option<String>,
    #[serde(default, alias = "ad_text")]
    pub body: Option<String>,
}

impl Ad {
    /// Ads without a usable title are hidden from the displayed page
    pub fn has_display_title(&self) -> bool {
        let title = self.title.trim();
        !title.is_empty() && !title.eq_ignore_ascii_case("no title")
    }
}

/// A fetched item, keyed by the kind of backend that produced it
#[derive(Debug, Clone, PartialEq)]
pub enum SearchResult {
    Product(Product),
    Ad(Ad),
}

impl SearchResult {
    pub fn as_product(&self) -> Option<&Product> {
        match self {
            SearchResult::Product(p) => Some(p),
            SearchResult::Ad(_) => None,
        }
    }

    #[cfg(test)]
    pub fn as_ad(&self) -> Option<&Ad> {
        match self {
            SearchResult::Ad(a) => Some(a),
            SearchResult::Product(_) => None,
        }
    }
}

impl Linkable for Product {
    fn title(&self) -> &str {
        &self.title
    }
    fn link(&self) -> &str {
        &self.link
    }
}

impl Linkable for Ad {
    fn title(&self) -> &str {
        &self.title
    }
    fn link(&self) -> &str {
        &self.link
    }
}

impl Linkable for SearchResult {
    fn title(&self) -> &str {
        match self {
            SearchResult::Product(p) => p.title(),
            SearchResult::Ad(a) => a.title(),
        }
    }
    fn link(&self) -> &str {
        match self {
            SearchResult::Product(p) => p.link(),
            SearchResult::Ad(a) => a.link(),
        }
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn deserialize_title<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: String = null_as_default(deserializer)?;
    Ok(clean_title(&raw))
}

/// Prices arrive either as numbers or as display strings like "$399.00"
fn deserialize_price<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawPrice {
        Number(f64),
        Text(String),
    }

    Ok(match Option::<RawPrice>::deserialize(deserializer)? {
        Some(RawPrice::Number(n)) => Some(n),
        Some(RawPrice::Text(text)) => parse_price(&text),
        None => None,
    })
}

/// The scraper fills missing badges with the placeholder "Aucun"
fn deserialize_badge<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: String = null_as_default(deserializer)?;
    let trimmed = raw.trim();
    if trimmed.eq_ignore_ascii_case("aucun") {
        Ok(String::new())
    } else {
        Ok(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_from_backend_keys() {
        let json = r#"{
            "SKU": "SKU-1a2b3c4d",
            "Nom": "  AT&T CD4930 Cordless Phone ",
            "Prix": 50.0,
            "Lien": "https://www.amazon.com/dp/B00",
            "Rating": 4.4,
            "Review_Count": 13973,
            "Badge": "Aucun",
            "Winning_Score": 12.0
        }"#;
        let product: Product = serde_json::from_str(json).unwrap();

        assert_eq!(product.sku.as_deref(), Some("SKU-1a2b3c4d"));
        assert_eq!(product.title, "AT&T CD4930 Cordless Phone");
        assert_eq!(product.price, Some(50.0));
        assert_eq!(product.rating, 4.4);
        assert_eq!(product.review_count, 13973);
        assert_eq!(product.badge, "");
        assert_eq!(product.link, "https://www.amazon.com/dp/B00");
    }

    #[test]
    fn test_product_price_as_display_string() {
        let json = r#"{
            "name": "Samsung Galaxy Watch 6 Classic 47mm",
            "price": "$1,329.99",
            "rating": 4.3,
            "reviews": 8932,
            "badge": "Best Seller",
            "link": "https://amazon.com/product2"
        }"#;
        let product: Product = serde_json::from_str(json).unwrap();

        assert_eq!(product.price, Some(1329.99));
        assert_eq!(product.review_count, 8932);
        assert_eq!(product.badge, "Best Seller");
    }

    #[test]
    fn test_product_missing_optional_fields() {
        let json = r#"{"title": "USB CABLE", "link": "https://x", "rating": null, "price": null}"#;
        let product: Product = serde_json::from_str(json).unwrap();

        assert_eq!(product.title, "Usb cable");
        assert_eq!(product.price, None);
        assert_eq!(product.rating, 0.0);
        assert_eq!(product.review_count, 0);
        assert!(product.sku.is_none());
    }

    #[test]
    fn test_negative_review_count_is_rejected() {
        let json = r#"{"title": "x", "link": "https://x", "reviews": -3}"#;
        assert!(serde_json::from_str::<Product>(json).is_err());
    }

    #[test]
    fn test_ad_display_title() {
        let mut ad = Ad {
            title: "Summer sale".to_string(),
            link: "https://facebook.com/ads/1".to_string(),
            advertiser: None,
            body: None,
        };
        assert!(ad.has_display_title());

        ad.title = "No Title".to_string();
        assert!(!ad.has_display_title());

        ad.title = "   ".to_string();
        assert!(!ad.has_display_title());
    }

    #[test]
    fn test_source_parsing() {
        assert_eq!("Amazon".parse::<Source>().unwrap(), Source::Amazon);
        assert_eq!("ebay".parse::<Source>().unwrap(), Source::Ebay);
        assert_eq!("meta".parse::<Source>().unwrap(), Source::MetaAds);
        assert!(matches!(
            "walmart".parse::<Source>(),
            Err(SearchError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_linkable_on_union() {
        let result = SearchResult::Ad(Ad {
            title: "Ad".to_string(),
            link: "https://l".to_string(),
            advertiser: Some("Shop".to_string()),
            body: None,
        });
        assert_eq!(result.title(), "Ad");
        assert_eq!(result.link(), "https://l");
        assert!(result.as_product().is_none());
        assert!(result.as_ad().is_some());
    }
}
