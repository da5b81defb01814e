//! Static company list and the fixed set of chart time ranges.

use serde::{Deserialize, Serialize};

/// Symbols the dashboard offers. Not user-extensible.
pub const COMPANY_LIST: [&str; 10] = [
    "AAPL", "MSFT", "GOOGL", "AMZN", "META", "TSLA", "NVDA", "JPM", "V", "WMT",
];

/// Symbol selected at startup.
pub const DEFAULT_SYMBOL: &str = "MSFT";

/// Case-insensitive substring filter over the company list.
///
/// An empty query keeps every company. Input order is preserved.
pub fn filter_companies(companies: &[&'static str], query: &str) -> Vec<&'static str> {
    let needle = query.to_lowercase();
    companies
        .iter()
        .copied()
        .filter(|symbol| symbol.to_lowercase().contains(&needle))
        .collect()
}

/// A (range, interval, label) tuple accepted by the upstream chart API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TimeRange {
    #[default]
    OneDay,
    OneMonth,
    SixMonths,
    OneYear,
    FiveYears,
}

impl TimeRange {
    const ALL: [TimeRange; 5] = [
        TimeRange::OneDay,
        TimeRange::OneMonth,
        TimeRange::SixMonths,
        TimeRange::OneYear,
        TimeRange::FiveYears,
    ];

    pub fn all() -> &'static [TimeRange] {
        &Self::ALL
    }

    /// Upstream `range` query value.
    pub fn range(self) -> &'static str {
        match self {
            TimeRange::OneDay => "1d",
            TimeRange::OneMonth => "1mo",
            TimeRange::SixMonths => "6mo",
            TimeRange::OneYear => "1y",
            TimeRange::FiveYears => "5y",
        }
    }

    /// Upstream `interval` query value (bar width).
    pub fn interval(self) -> &'static str {
        match self {
            TimeRange::OneDay => "5m",
            TimeRange::OneMonth | TimeRange::SixMonths | TimeRange::OneYear => "1d",
            TimeRange::FiveYears => "1wk",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TimeRange::OneDay => "1 Day",
            TimeRange::OneMonth => "1 Month",
            TimeRange::SixMonths => "6 Months",
            TimeRange::OneYear => "1 Year",
            TimeRange::FiveYears => "5 Years",
        }
    }

    pub fn index(self) -> usize {
        match self {
            TimeRange::OneDay => 0,
            TimeRange::OneMonth => 1,
            TimeRange::SixMonths => 2,
            TimeRange::OneYear => 3,
            TimeRange::FiveYears => 4,
        }
    }

    pub fn from_index(i: usize) -> Option<Self> {
        Self::ALL.get(i).copied()
    }

    pub fn next(self) -> TimeRange {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> TimeRange {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_is_case_insensitive_substring() {
        assert_eq!(filter_companies(&COMPANY_LIST, "m"), vec!["MSFT", "AMZN", "META", "JPM", "WMT"]);
        assert_eq!(filter_companies(&COMPANY_LIST, "Goo"), vec!["GOOGL"]);
        assert!(filter_companies(&COMPANY_LIST, "xyz").is_empty());
    }

    #[test]
    fn empty_filter_keeps_everything() {
        assert_eq!(filter_companies(&COMPANY_LIST, ""), COMPANY_LIST.to_vec());
    }

    #[test]
    fn default_selection() {
        assert_eq!(TimeRange::default(), TimeRange::OneDay);
        assert!(COMPANY_LIST.contains(&DEFAULT_SYMBOL));
    }

    #[test]
    fn range_tuples() {
        let tuples: Vec<_> = TimeRange::all()
            .iter()
            .map(|r| (r.range(), r.interval(), r.label()))
            .collect();
        assert_eq!(
            tuples,
            vec![
                ("1d", "5m", "1 Day"),
                ("1mo", "1d", "1 Month"),
                ("6mo", "1d", "6 Months"),
                ("1y", "1d", "1 Year"),
                ("5y", "1wk", "5 Years"),
            ]
        );
    }

    #[test]
    fn range_cycle() {
        assert_eq!(TimeRange::OneDay.next(), TimeRange::OneMonth);
        assert_eq!(TimeRange::FiveYears.next(), TimeRange::OneDay);
        assert_eq!(TimeRange::OneDay.prev(), TimeRange::FiveYears);
        for (i, r) in TimeRange::all().iter().enumerate() {
            assert_eq!(TimeRange::from_index(i), Some(*r));
        }
        assert!(TimeRange::from_index(5).is_none());
    }
}
