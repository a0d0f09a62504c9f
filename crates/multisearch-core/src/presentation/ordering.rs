//! Sorting and pagination of result items.
//!
//! Prices and ratings arrive as display strings, so ordering needs a typed
//! coercion first. Items whose value cannot be read sort last.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::str::FromStr;

use crate::error::SearchError;
use crate::outcome::ResultItem;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum SortOrder {
    /// Order returned by the remote service.
    #[default]
    Relevance,
    PriceAsc,
    PriceDesc,
    RatingDesc,
}

impl FromStr for SortOrder {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "relevance" => Ok(Self::Relevance),
            "price-asc" => Ok(Self::PriceAsc),
            "price-desc" => Ok(Self::PriceDesc),
            "rating-desc" | "rating" => Ok(Self::RatingDesc),
            other => Err(SearchError::validation(format!("unknown sort order '{other}'"))),
        }
    }
}

fn is_group_separator(c: char) -> bool {
    matches!(c, '.' | ',' | ' ' | '\u{a0}' | '\u{202f}')
}

/// Reads the first number in a price string.
///
/// A `.` or `,` followed by exactly three digits is a thousands separator
/// (`"60.000FCFA"` is 60000), otherwise the last one is the decimal point
/// (`"12.99"`, `"9,5 €"`).
pub fn parse_price(text: &str) -> Option<f64> {
    let mut groups: Vec<String> = Vec::new();
    let mut separators: Vec<char> = Vec::new();
    let mut current = String::new();
    let mut pending: Option<char> = None;

    for c in text.chars() {
        if c.is_ascii_digit() {
            if let Some(sep) = pending.take() {
                groups.push(std::mem::take(&mut current));
                separators.push(sep);
            }
            current.push(c);
        } else if !current.is_empty() && pending.is_none() && is_group_separator(c) {
            pending = Some(c);
        } else if !current.is_empty() {
            break;
        }
    }

    if current.is_empty() {
        return None;
    }
    groups.push(current);

    let number = match (separators.last(), groups.last()) {
        (Some('.' | ','), Some(last)) if last.len() != 3 => {
            let integer = groups[..groups.len() - 1].concat();
            format!("{integer}.{last}")
        }
        _ => groups.concat(),
    };

    number.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Reads a rating such as `"4.5"`, `"4,5"` or `"4.5/5"`.
pub fn parse_rating(text: &str) -> Option<f64> {
    let numeric: String = text
        .trim()
        .chars()
        .take_while(|c| c.is_ascii_digit() || *c == '.' || *c == ',')
        .map(|c| if c == ',' { '.' } else { c })
        .collect();
    numeric.parse::<f64>().ok().filter(|v| v.is_finite())
}

fn compare_present_first(a: Option<f64>, b: Option<f64>, descending: bool) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => {
            let ordering = a.total_cmp(&b);
            if descending { ordering.reverse() } else { ordering }
        }
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Returns the items in the requested order. Stable for equal keys.
pub fn sort_results(items: &[ResultItem], order: SortOrder) -> Vec<&ResultItem> {
    let mut sorted: Vec<&ResultItem> = items.iter().collect();
    let price = |item: &ResultItem| item.price.as_deref().and_then(parse_price);
    let rating = |item: &ResultItem| item.rating.as_deref().and_then(parse_rating);

    match order {
        SortOrder::Relevance => {}
        SortOrder::PriceAsc => {
            sorted.sort_by(|a, b| compare_present_first(price(*a), price(*b), false))
        }
        SortOrder::PriceDesc => {
            sorted.sort_by(|a, b| compare_present_first(price(*a), price(*b), true))
        }
        SortOrder::RatingDesc => {
            sorted.sort_by(|a, b| compare_present_first(rating(*a), rating(*b), true))
        }
    }
    sorted
}

/// One page of results. `number` is 1-based.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<'a, T> {
    pub items: &'a [T],
    pub number: usize,
    pub page_count: usize,
}

impl<T> Page<'_, T> {
    pub fn has_next(&self) -> bool {
        self.number < self.page_count
    }

    pub fn has_previous(&self) -> bool {
        self.number > 1
    }
}

/// Slices out page `number`, clamped into range. A zero page size means one page.
pub fn paginate<T>(items: &[T], number: usize, page_size: usize) -> Page<'_, T> {
    if page_size == 0 || items.is_empty() {
        return Page {
            items,
            number: 1,
            page_count: 1,
        };
    }
    let page_count = items.len().div_ceil(page_size);
    let number = number.clamp(1, page_count);
    let start = (number - 1) * page_size;
    let end = (start + page_size).min(items.len());
    Page {
        items: &items[start..end],
        number,
        page_count,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(title: &str, price: Option<&str>, rating: Option<&str>) -> ResultItem {
        ResultItem {
            title: title.to_string(),
            price: price.map(str::to_string),
            rating: rating.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn test_parse_price() {
        assert_eq!(parse_price("60.000FCFA"), Some(60000.0));
        assert_eq!(parse_price("7.500FCFA"), Some(7500.0));
        assert_eq!(parse_price("12.99"), Some(12.99));
        assert_eq!(parse_price("$1,234.50"), Some(1234.5));
        assert_eq!(parse_price("45 000 FCFA"), Some(45000.0));
        assert_eq!(parse_price("9,5 €"), Some(9.5));
        assert_eq!(parse_price("1500"), Some(1500.0));
        assert_eq!(parse_price("N/A"), None);
        assert_eq!(parse_price(""), None);
    }

    #[test]
    fn test_parse_rating() {
        assert_eq!(parse_rating("4.5"), Some(4.5));
        assert_eq!(parse_rating("4,8"), Some(4.8));
        assert_eq!(parse_rating("4.5/5"), Some(4.5));
        assert_eq!(parse_rating("great"), None);
    }

    #[test]
    fn test_sort_by_price_puts_unknown_last() {
        let items = vec![
            item("b", Some("25.000FCFA"), None),
            item("unknown", Some("N/A"), None),
            item("a", Some("7.500FCFA"), None),
        ];
        let titles: Vec<&str> = sort_results(&items, SortOrder::PriceAsc)
            .iter()
            .map(|i| i.title.as_str())
            .collect();
        assert_eq!(titles, vec!["a", "b", "unknown"]);

        let titles: Vec<&str> = sort_results(&items, SortOrder::PriceDesc)
            .iter()
            .map(|i| i.title.as_str())
            .collect();
        assert_eq!(titles, vec!["b", "a", "unknown"]);
    }

    #[test]
    fn test_sort_by_rating_and_relevance() {
        let items = vec![
            item("low", None, Some("3.9")),
            item("none", None, None),
            item("high", None, Some("4.9")),
        ];
        let titles: Vec<&str> = sort_results(&items, SortOrder::RatingDesc)
            .iter()
            .map(|i| i.title.as_str())
            .collect();
        assert_eq!(titles, vec!["high", "low", "none"]);

        let titles: Vec<&str> = sort_results(&items, SortOrder::Relevance)
            .iter()
            .map(|i| i.title.as_str())
            .collect();
        assert_eq!(titles, vec!["low", "none", "high"]);
    }

    #[test]
    fn test_sort_order_parsing() {
        assert_eq!("price-asc".parse::<SortOrder>().unwrap(), SortOrder::PriceAsc);
        assert_eq!("RATING".parse::<SortOrder>().unwrap(), SortOrder::RatingDesc);
        assert!("cheapest".parse::<SortOrder>().is_err());
    }

    #[test]
    fn test_paginate() {
        let items: Vec<u32> = (1..=25).collect();
        let page = paginate(&items, 3, 10);
        assert_eq!(page.items, &[21, 22, 23, 24, 25]);
        assert_eq!(page.page_count, 3);
        assert!(!page.has_next());
        assert!(page.has_previous());

        let clamped = paginate(&items, 99, 10);
        assert_eq!(clamped.number, 3);
        let first = paginate(&items, 0, 10);
        assert_eq!(first.number, 1);
        assert_eq!(first.items.len(), 10);
    }

    #[test]
    fn test_paginate_empty_and_unbounded() {
        let empty: Vec<u32> = Vec::new();
        let page = paginate(&empty, 2, 10);
        assert_eq!(page.page_count, 1);
        assert!(page.items.is_empty());

        let items = vec![1, 2, 3];
        assert_eq!(paginate(&items, 1, 0).items.len(), 3);
    }
}
