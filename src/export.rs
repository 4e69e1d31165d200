// src/export.rs
use crate::error::SearchError;
use crate::pipeline::ScoredResult;
use crate::score::round2;
use crate::search::{SearchResult, Source};
use chrono::NaiveDate;
use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

const PRODUCT_HEADERS: [&str; 7] = ["Name", "Price", "Rating", "Reviews", "Badge", "Score", "Link"];
const AD_HEADERS: [&str; 3] = ["Title", "Advertiser", "Link"];

/// `{source}_scraping_{keyword}_{YYYY-MM-DD}.csv`, whitespace in the keyword
/// replaced by underscores and path separators dropped
pub fn export_filename(source: Source, keyword: &str, date: NaiveDate) -> String {
    let keyword: String = keyword
        .trim()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .chars()
        .filter(|c| !matches!(c, '/' | '\\' | ':'))
        .collect();

    format!("{}_scraping_{}_{}.csv", source.key(), keyword, date.format("%Y-%m-%d"))
}

/// Write results as CSV. The header follows the shape of the first result;
/// fields with commas, quotes or newlines are quoted.
pub fn write_csv<W: Write>(results: &[ScoredResult], writer: W) -> Result<(), SearchError> {
    let first = results
        .first()
        .ok_or_else(|| SearchError::InvalidInput("no results to export, run a search first".to_string()))?;

    let mut wtr = csv::Writer::from_writer(writer);
    match first.result {
        SearchResult::Product(_) => wtr.write_record(PRODUCT_HEADERS)?,
        SearchResult::Ad(_) => wtr.write_record(AD_HEADERS)?,
    }

    for scored in results {
        wtr.write_record(&csv_record(scored))?;
    }
    wtr.flush()?;
    Ok(())
}

fn csv_record(scored: &ScoredResult) -> Vec<String> {
    match &scored.result {
        SearchResult::Product(p) => vec![
            p.title.clone(),
            p.price.map(|v| format!("{:.2}", v)).unwrap_or_default(),
            p.rating.to_string(),
            p.review_count.to_string(),
            p.badge.clone(),
            scored
                .winning_score
                .map(|s| round2(s).to_string())
                .unwrap_or_default(),
            p.link.clone(),
        ],
        SearchResult::Ad(a) => vec![
            a.title.clone(),
            a.advertiser.clone().unwrap_or_default(),
            a.link.clone(),
        ],
    }
}

/// Export into `dir` under the dated filename; returns the written path
pub fn export_to_dir(
    results: &[ScoredResult],
    source: Source,
    keyword: &str,
    date: NaiveDate,
    dir: &Path,
) -> Result<PathBuf, SearchError> {
    if results.is_empty() {
        return Err(SearchError::InvalidInput(
            "no results to export, run a search first".to_string(),
        ));
    }

    let path = dir.join(export_filename(source, keyword, date));
    let file = File::create(&path)?;
    write_csv(results, file)?;
    log::debug!("Exported {} results to {:?}", results.len(), path);
    Ok(path)
}
