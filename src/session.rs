//! One user's search session: keyword in, ranked results out.
//!
//! The session owns the results currently on display. A search replaces
//! them on success and clears them on failure; `search` takes `&mut self`
//! so only one search can be pending at a time.

use crate::backend::ResultProvider;
use crate::error::SearchError;
use crate::history::{HistoryStore, SearchHistoryEntry};
use crate::language::detect_language;
use crate::pipeline::{process, ProcessedResults};
use crate::search::Source;
use std::time::Instant;

pub struct SearchSession<P, H> {
    provider: P,
    history: H,
    num_products: u32,
    current: Option<ProcessedResults>,
}

impl<P: ResultProvider, H: HistoryStore> SearchSession<P, H> {
    pub fn new(provider: P, history: H, num_products: u32) -> Self {
        SearchSession {
            provider,
            history,
            num_products,
            current: None,
        }
    }

    /// Run a search and make its results the current ones
    pub fn search(&mut self, keyword: &str, source: Source) -> Result<&ProcessedResults, SearchError> {
        // A failed search never leaves the previous query's results on screen
        self.current = None;

        let keyword = keyword.trim();
        if keyword.is_empty() {
            return Err(SearchError::InvalidInput(
                "enter a keyword to search for".to_string(),
            ));
        }

        let language = detect_language(keyword);
        log::debug!(
            "Searching {} for {:?} (language: {}, storefront: {})",
            source,
            keyword,
            language.name(),
            language.marketplace()
        );

        let start = Instant::now();
        let raw = self.provider.fetch(source, keyword, self.num_products)?;
        let processed = process(raw)?;
        log::debug!(
            "{} results for {:?} in {:?}",
            processed.results.len(),
            keyword,
            start.elapsed()
        );

        if let Err(e) = self.history.append(SearchHistoryEntry::new(keyword, source)) {
            // The search itself worked, so don't throw its results away
            log::warn!("Could not record search history: {}", e);
        }

        Ok(self.current.insert(processed))
    }

    #[cfg(test)]
    pub fn current(&self) -> Option<&ProcessedResults> {
        self.current.as_ref()
    }

    #[cfg(test)]
    pub fn recent_searches(&self) -> Result<Vec<SearchHistoryEntry>, SearchError> {
        self.history.load()
    }
}
