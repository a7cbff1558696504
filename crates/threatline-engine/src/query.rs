//! Timeline query engine
//!
//! Stateless filter/sort/limit over a derived event list. All filters are
//! AND-combined. Events with no parseable date pass every date bound
//! (unknown never excludes, favoring recall) and sort at a fixed far-past
//! sentinel so they surface first ascending and last descending.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use threatline_core::model::TimelineEvent;

/// Inclusive bounds on the number of returned events
pub const MIN_LIMIT: usize = 1;
pub const MAX_LIMIT: usize = 5000;
pub const DEFAULT_LIMIT: usize = 500;

/// Sort position for events without a parseable date
const UNDATED_SENTINEL: NaiveDate = NaiveDate::MIN;

/// Clamp a requested limit into `[MIN_LIMIT, MAX_LIMIT]`, defaulting when
/// absent. Out-of-range requests are corrected at this boundary, not
/// rejected.
pub fn clamp_limit(requested: Option<usize>) -> usize {
    requested.unwrap_or(DEFAULT_LIMIT).clamp(MIN_LIMIT, MAX_LIMIT)
}

/// Timeline sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    DateAsc,
    #[default]
    DateDesc,
}

impl SortOrder {
    /// Permissive parse: anything other than `date_asc` is descending.
    pub fn parse(raw: &str) -> Self {
        match raw {
            "date_asc" => SortOrder::DateAsc,
            _ => SortOrder::DateDesc,
        }
    }
}

/// Filter, sort and truncation policy for one timeline read
#[derive(Debug, Clone)]
pub struct TimelineFilter {
    /// Case-insensitive exact match on the resolved actor name. Exact, not
    /// substring: aliasing is already collapsed to one canonical name per
    /// event upstream.
    pub group: Option<String>,
    /// Case-insensitive exact match on the resolved country
    pub country: Option<String>,
    /// Inclusive lower bound on the primary date
    pub from_date: Option<NaiveDate>,
    /// Inclusive upper bound on the primary date
    pub to_date: Option<NaiveDate>,
    pub sort: SortOrder,
    pub limit: usize,
}

impl Default for TimelineFilter {
    fn default() -> Self {
        Self {
            group: None,
            country: None,
            from_date: None,
            to_date: None,
            sort: SortOrder::default(),
            limit: DEFAULT_LIMIT,
        }
    }
}

impl TimelineFilter {
    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    pub fn with_country(mut self, country: impl Into<String>) -> Self {
        self.country = Some(country.into());
        self
    }

    pub fn with_dates(mut self, from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        self.from_date = from;
        self.to_date = to;
        self
    }

    pub fn with_sort(mut self, sort: SortOrder) -> Self {
        self.sort = sort;
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = clamp_limit(Some(limit));
        self
    }

    fn matches(&self, event: &TimelineEvent, group: Option<&str>, country: Option<&str>) -> bool {
        if let Some(wanted) = group {
            if event.group_name.to_lowercase() != wanted {
                return false;
            }
        }
        if let Some(wanted) = country {
            if event.country.to_lowercase() != wanted {
                return false;
            }
        }
        if let Some(date) = event.date {
            if let Some(from) = self.from_date {
                if date < from {
                    return false;
                }
            }
            if let Some(to) = self.to_date {
                if date > to {
                    return false;
                }
            }
        }
        // No parseable date: passes every bound
        true
    }
}

/// Apply a filter to an event list: predicate pass, stable sort, truncate.
pub fn apply(events: Vec<TimelineEvent>, filter: &TimelineFilter) -> Vec<TimelineEvent> {
    let group = filter.group.as_ref().map(|g| g.to_lowercase());
    let country = filter.country.as_ref().map(|c| c.to_lowercase());

    let mut events: Vec<TimelineEvent> = events
        .into_iter()
        .filter(|e| filter.matches(e, group.as_deref(), country.as_deref()))
        .collect();

    match filter.sort {
        SortOrder::DateAsc => {
            events.sort_by_key(|e| e.date.unwrap_or(UNDATED_SENTINEL));
        }
        SortOrder::DateDesc => {
            events.sort_by(|a, b| {
                b.date
                    .unwrap_or(UNDATED_SENTINEL)
                    .cmp(&a.date.unwrap_or(UNDATED_SENTINEL))
            });
        }
    }

    events.truncate(filter.limit);
    events
}
