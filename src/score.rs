//! Winning score calculation and the small text helpers feeding it.
//!
//! The score is the unweighted mean of three sub-scores in [0, 1],
//! scaled to a percentage:
//! - price band: 0.5 inside [10, 100], 0.2 outside
//! - rating: rating / 5, or 0 when unrated
//! - reviews: review_count / 1000, capped at 1

use crate::error::SearchError;

pub const PRICE_BAND_MIN: f64 = 10.0;
pub const PRICE_BAND_MAX: f64 = 100.0;
pub const REVIEW_CAP: u64 = 1000;
pub const MAX_RATING: f64 = 5.0;

pub fn price_score(price: f64) -> f64 {
    if (PRICE_BAND_MIN..=PRICE_BAND_MAX).contains(&price) {
        0.5
    } else {
        0.2
    }
}

pub fn rating_score(rating: f64) -> f64 {
    if rating > 0.0 {
        rating / 5.0
    } else {
        0.0
    }
}

pub fn review_score(review_count: u64) -> f64 {
    (review_count as f64 / REVIEW_CAP as f64).min(1.0)
}

/// Compute the 0-100 winning score of a product.
///
/// Prices must be finite and non-negative, ratings finite and within
/// [0, 5]; anything else is `InvalidInput`, which keeps the result in [0, 100].
pub fn winning_score(price: f64, rating: f64, review_count: u64) -> Result<f64, SearchError> {
    if !price.is_finite() || price < 0.0 {
        return Err(SearchError::InvalidInput(format!("invalid price: {}", price)));
    }
    if !rating.is_finite() || !(0.0..=MAX_RATING).contains(&rating) {
        return Err(SearchError::InvalidInput(format!(
            "rating {} outside 0-{}",
            rating, MAX_RATING
        )));
    }

    let mean = (price_score(price) + rating_score(rating) + review_score(review_count)) / 3.0;
    Ok(mean * 100.0)
}

/// Round to two decimals, the precision scores and stats are shown with
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Pull the first amount out of a display price such as "$399.00",
/// "1,299.99 €", "45,99 €", "1 299,99 €" or "SAR 45".
///
/// A comma followed by exactly two final digits is the decimal separator
/// (European storefronts); otherwise commas, and spaces ahead of a group of
/// three digits, are thousands separators.
pub fn parse_price(text: &str) -> Option<f64> {
    let start = text.find(|c: char| c.is_ascii_digit())?;
    let chars: Vec<char> = text[start..].chars().collect();

    let mut token = String::new();
    for (i, &c) in chars.iter().enumerate() {
        if c.is_ascii_digit() || c == '.' || c == ',' {
            token.push(c);
        } else if is_group_space(c) && starts_digit_group(&chars[i + 1..]) {
            continue;
        } else {
            break;
        }
    }

    let token = token.trim_end_matches(|c| c == '.' || c == ',');
    let normalized = match token.rfind(|c| c == '.' || c == ',') {
        Some(pos) if token[pos..].starts_with(',') && token.len() - pos - 1 == 2 => {
            token.replace('.', "").replace(',', ".")
        }
        _ => token.replace(',', ""),
    };

    normalized.parse().ok()
}

fn is_group_space(c: char) -> bool {
    matches!(c, ' ' | '\u{a0}' | '\u{202f}')
}

/// Exactly three digits, then no further digit
fn starts_digit_group(rest: &[char]) -> bool {
    rest.len() >= 3
        && rest[..3].iter().all(|c| c.is_ascii_digit())
        && !rest.get(3).is_some_and(|c| c.is_ascii_digit())
}

/// Trim a scraped title and tone down titles written in all caps
pub fn clean_title(name: &str) -> String {
    let name = name.trim();

    let has_cased = name.chars().any(|c| c.is_lowercase() || c.is_uppercase());
    let all_upper = name.chars().all(|c| !c.is_lowercase());

    if has_cased && all_upper {
        let mut chars = name.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
            None => String::new(),
        }
    } else {
        name.to_string()
    }
}
