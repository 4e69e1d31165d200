//! Turns a raw result list into what gets displayed.
//!
//! - `process` annotates products with their winning score, sorts, picks
//!   the top result and computes `Stats`
//! - `page` / `page_count` slice the sorted list into 1-based pages
//! - `displayed_page` applies the ad title filter to a single page

use crate::error::SearchError;
use crate::score::{round2, winning_score};
use crate::search::{Linkable, SearchResult};

/// Results per page
pub const PAGE_SIZE: usize = 12;

/// A result together with its derived ranking score. Ads carry no score.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredResult {
    pub result: SearchResult,
    pub winning_score: Option<f64>,
}

impl ScoredResult {
    /// Annotate a raw result. Only products are scored.
    pub fn annotate(result: SearchResult) -> Result<Self, SearchError> {
        let winning_score = match &result {
            SearchResult::Product(p) => Some(winning_score(
                p.price.unwrap_or(0.0),
                p.rating,
                p.review_count,
            )?),
            SearchResult::Ad(_) => None,
        };

        Ok(ScoredResult {
            result,
            winning_score,
        })
    }

    fn sort_key(&self) -> f64 {
        self.winning_score.unwrap_or(f64::NEG_INFINITY)
    }

    /// Ads without a real title are not shown; products always are
    pub fn is_displayable(&self) -> bool {
        match &self.result {
            SearchResult::Ad(ad) => ad.has_display_title(),
            SearchResult::Product(_) => true,
        }
    }
}

impl Linkable for ScoredResult {
    fn title(&self) -> &str {
        self.result.title()
    }
    fn link(&self) -> &str {
        self.result.link()
    }
}

/// Aggregate figures over a result set
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Stats {
    pub total: usize,
    pub avg_price: f64,
    pub avg_rating: f64,
    pub total_reviews: u64,
}

impl Stats {
    /// Average price covers priced items, average rating covers rated items
    pub fn from_results<'a, I>(results: I) -> Self
    where
        I: IntoIterator<Item = &'a ScoredResult>,
    {
        let mut stats = Stats::default();
        let mut price_sum = 0.0;
        let mut priced = 0usize;
        let mut rating_sum = 0.0;
        let mut rated = 0usize;

        for scored in results {
            stats.total += 1;
            if let Some(product) = scored.result.as_product() {
                if let Some(price) = product.price {
                    price_sum += price;
                    priced += 1;
                }
                if product.rating > 0.0 {
                    rating_sum += product.rating;
                    rated += 1;
                }
                stats.total_reviews = stats.total_reviews.saturating_add(product.review_count);
            }
        }

        if priced > 0 {
            stats.avg_price = round2(price_sum / priced as f64);
        }
        if rated > 0 {
            stats.avg_rating = round2(rating_sum / rated as f64);
        }
        stats
    }
}

/// Output of `process`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProcessedResults {
    pub results: Vec<ScoredResult>,
    pub top: Option<ScoredResult>,
    pub stats: Stats,
}

impl ProcessedResults {
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn page_count(&self, page_size: usize) -> usize {
        page_count(self.results.len(), page_size)
    }

    pub fn displayed_page(&self, number: usize, page_size: usize) -> Vec<&ScoredResult> {
        displayed_page(&self.results, number, page_size)
    }
}

/// Score, sort and summarise a raw result list.
///
/// The sort is stable, so entries with equal scores (including every ad)
/// keep the order the source returned them in.
pub fn process(raw: Vec<SearchResult>) -> Result<ProcessedResults, SearchError> {
    log::trace!("Processing {} raw results", raw.len());

    let mut results = raw
        .into_iter()
        .map(ScoredResult::annotate)
        .collect::<Result<Vec<_>, _>>()?;

    sort_results(&mut results);

    let top = results.first().cloned();
    let stats = Stats::from_results(&results);

    Ok(ProcessedResults {
        results,
        top,
        stats,
    })
}

/// Highest score first. The sort is stable; unscored entries go last.
pub fn sort_results(results: &mut [ScoredResult]) {
    results.sort_by(|a, b| b.sort_key().total_cmp(&a.sort_key()));
}

/// Number of pages needed for `total` items
pub fn page_count(total: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    total.div_ceil(page_size)
}

/// 1-based page slice. Page 0 and pages past the end are empty.
pub fn page<T>(items: &[T], number: usize, page_size: usize) -> &[T] {
    if number == 0 || page_size == 0 {
        return &[];
    }

    let start = (number - 1).saturating_mul(page_size);
    if start >= items.len() {
        return &[];
    }
    let end = start.saturating_add(page_size).min(items.len());
    &items[start..end]
}

/// The entries actually shown for a page.
///
/// The page is cut from the unfiltered list first and untitled ads are
/// dropped afterwards, so a page can show fewer than `page_size` entries
/// while `page_count` still counts the hidden ones.
pub fn displayed_page(results: &[ScoredResult], number: usize, page_size: usize) -> Vec<&ScoredResult> {
    page(results, number, page_size)
        .iter()
        .filter(|r| r.is_displayable())
        .collect()
}
