// src/mock.rs
use crate::backend::ResultProvider;
use crate::error::SearchError;
use crate::language::detect_language;
use crate::search::{Ad, Product, SearchResult, Source};
use std::thread;
use std::time::Duration;

/// (title, price, rating, reviews, badge)
const MOCK_PRODUCTS: &[(&str, &str, f64, u64, &str)] = &[
    ("Apple Watch Series 9 GPS 45mm Midnight Aluminum Case", "$399.00", 4.5, 12847, "Amazon's Choice"),
    ("Samsung Galaxy Watch 6 Classic 47mm", "$329.99", 4.3, 8932, "Best Seller"),
    ("Fitbit Sense 2 Health & Fitness Smartwatch", "$249.95", 4.1, 5621, ""),
    ("Garmin Venu 3 GPS Smartwatch", "$449.99", 4.6, 3847, "Editor's Choice"),
    ("AT&T CD4930 Corded Phone", "$50.00", 4.4, 13973, ""),
];

/// (title, advertiser)
const MOCK_ADS: &[(&str, &str)] = &[
    ("Summer collection is here", "Urban Outfitters"),
    ("No title", "Unknown Page"),
    ("Free shipping on every order", "Nordstrom"),
    ("", "Draft Ads Co"),
    ("Limited drop, 48 hours only", "Nike"),
];

/// Offline stand-in for the backend: fabricates a fixed result set after an
/// artificial delay.
#[derive(Debug, Clone)]
pub struct MockProvider {
    delay: Duration,
}

impl MockProvider {
    pub fn new(delay: Duration) -> Self {
        MockProvider { delay }
    }
}

impl ResultProvider for MockProvider {
    fn fetch(
        &self,
        source: Source,
        keyword: &str,
        num_products: u32,
    ) -> Result<Vec<SearchResult>, SearchError> {
        log::debug!("Mock search for {:?} on {}, sleeping {:?}", keyword, source, self.delay);
        if !self.delay.is_zero() {
            thread::sleep(self.delay);
        }

        let limit = num_products as usize;
        let results = if source.returns_ads() {
            mock_ads(keyword).into_iter().take(limit).collect()
        } else {
            mock_products(source, keyword).into_iter().take(limit).collect()
        };
        Ok(results)
    }
}

fn mock_products(source: Source, keyword: &str) -> Vec<SearchResult> {
    let base = match source {
        Source::Ebay => "https://www.ebay.com",
        _ => detect_language(keyword).marketplace(),
    };

    MOCK_PRODUCTS
        .iter()
        .enumerate()
        .map(|(i, (title, price, rating, reviews, badge))| {
            SearchResult::Product(Product {
                sku: Some(format!("SKU-MOCK{:04}", i + 1)),
                title: title.to_string(),
                price: crate::score::parse_price(price),
                rating: *rating,
                review_count: *reviews,
                badge: badge.to_string(),
                link: format!("{}/product{}", base, i + 1),
            })
        })
        .collect()
}

fn mock_ads(keyword: &str) -> Vec<SearchResult> {
    MOCK_ADS
        .iter()
        .enumerate()
        .map(|(i, (title, advertiser))| {
            SearchResult::Ad(Ad {
                title: title.to_string(),
                link: format!("https://www.facebook.com/ads/library/?id={}", 1000 + i),
                advertiser: Some(advertiser.to_string()),
                body: Some(format!("Sponsored result for {}", keyword)),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::Linkable;

    #[test]
    fn test_mock_products_follow_keyword_language() {
        let provider = MockProvider::new(Duration::ZERO);
        let results = provider.fetch(Source::Amazon, "coque iPhone", 50).unwrap();

        assert_eq!(results.len(), MOCK_PRODUCTS.len());
        assert!(results.iter().all(|r| r.link().starts_with("https://www.amazon.fr/")));
        assert_eq!(results[0].as_product().unwrap().price, Some(399.0));
    }

    #[test]
    fn test_mock_ebay_links() {
        let provider = MockProvider::new(Duration::ZERO);
        let results = provider.fetch(Source::Ebay, "watch", 2).unwrap();

        assert_eq!(results.len(), 2);
        assert!(results[0].link().starts_with("https://www.ebay.com/"));
    }

    #[test]
    fn test_mock_ads_include_untitled_entries() {
        let provider = MockProvider::new(Duration::ZERO);
        let results = provider.fetch(Source::MetaAds, "shoes", 50).unwrap();

        assert_eq!(results.len(), MOCK_ADS.len());
        let hidden = results
            .iter()
            .filter(|r| !r.as_ad().unwrap().has_display_title())
            .count();
        assert_eq!(hidden, 2);
    }
}
