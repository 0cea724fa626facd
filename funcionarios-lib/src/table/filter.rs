//! Filter pipeline
//!
//! Reduces a complete collection to the records matching every active
//! predicate. Predicates are independent and ANDed, so evaluation order does
//! not matter and applying the same state twice changes nothing.
//!
//! Input-shape problems never hide data: a predicate that cannot be evaluated
//! (an unparseable date in the record or in the filter) passes. Predicates
//! report that case as [`FilterInputError`] and [`filter_records`] maps it to
//! a pass.

use std::collections::HashMap;

use chrono::NaiveDate;

use super::TableRecord;
use super::date::parse_date;

/// Sentinel filter value meaning "no constraint".
pub const ALL: &str = "all";

/// A filter value that could not be interpreted.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FilterInputError {
    /// A date (in the filter or in the record) failed to parse.
    #[error("Invalid date: '{value}'")]
    InvalidDate { value: String },
}

/// Inclusive date bounds for one date axis.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DateRange {
    /// Lower bound, as typed.
    pub from: Option<String>,
    /// Upper bound, as typed.
    pub to: Option<String>,
}

impl DateRange {
    /// Returns `true` if neither bound is set.
    pub fn is_empty(&self) -> bool {
        self.from.is_none() && self.to.is_none()
    }
}

/// Which side of a [`DateRange`] a bound sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    From,
    To,
}

/// Current filter values of a list view.
///
/// Absent keys mean "no constraint on this axis". Values are stored as typed
/// by the user and only interpreted when the pipeline runs.
#[derive(Debug, Clone)]
pub struct FilterState<R: TableRecord> {
    search: Option<String>,
    enums: HashMap<R::EnumFilter, String>,
    dates: HashMap<R::DateFilter, DateRange>,
}

impl<R: TableRecord> Default for FilterState<R> {
    fn default() -> Self {
        Self {
            search: None,
            enums: HashMap::new(),
            dates: HashMap::new(),
        }
    }
}

impl<R: TableRecord> PartialEq for FilterState<R> {
    fn eq(&self, other: &Self) -> bool {
        self.search == other.search && self.enums == other.enums && self.dates == other.dates
    }
}

impl<R: TableRecord> FilterState<R> {
    /// Creates an empty filter state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the free-text search term. Blank clears it.
    pub fn set_search(&mut self, term: impl Into<String>) {
        let term = term.into();
        let term = term.trim();
        self.search = (!term.is_empty()).then(|| term.to_string());
    }

    /// Builder form of [`FilterState::set_search`].
    pub fn with_search(mut self, term: impl Into<String>) -> Self {
        self.set_search(term);
        self
    }

    /// Sets an exact-match filter. Blank or [`ALL`] clears it.
    pub fn set_enum(&mut self, key: R::EnumFilter, value: impl Into<String>) {
        let value = value.into();
        let value = value.trim();
        if value.is_empty() || value.eq_ignore_ascii_case(ALL) {
            self.enums.remove(&key);
        } else {
            self.enums.insert(key, value.to_string());
        }
    }

    /// Builder form of [`FilterState::set_enum`].
    pub fn with_enum(mut self, key: R::EnumFilter, value: impl Into<String>) -> Self {
        self.set_enum(key, value);
        self
    }

    /// Sets or clears one bound of a date range.
    pub fn set_date_bound(&mut self, key: R::DateFilter, bound: Bound, value: Option<String>) {
        let value = value
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty());
        let range = self.dates.entry(key).or_default();
        match bound {
            Bound::From => range.from = value,
            Bound::To => range.to = value,
        }
        if range.is_empty() {
            self.dates.remove(&key);
        }
    }

    /// Builder form setting the inclusive lower bound of a date axis.
    pub fn with_date_from(mut self, key: R::DateFilter, value: impl Into<String>) -> Self {
        self.set_date_bound(key, Bound::From, Some(value.into()));
        self
    }

    /// Builder form setting the inclusive upper bound of a date axis.
    pub fn with_date_to(mut self, key: R::DateFilter, value: impl Into<String>) -> Self {
        self.set_date_bound(key, Bound::To, Some(value.into()));
        self
    }

    /// Removes every constraint.
    pub fn clear(&mut self) {
        self.search = None;
        self.enums.clear();
        self.dates.clear();
    }

    pub fn search(&self) -> Option<&str> {
        self.search.as_deref()
    }

    pub fn enum_value(&self, key: R::EnumFilter) -> Option<&str> {
        self.enums.get(&key).map(String::as_str)
    }

    pub fn date_range(&self, key: R::DateFilter) -> Option<&DateRange> {
        self.dates.get(&key)
    }

    /// Number of active predicates, for "N filters applied" badges.
    pub fn active_count(&self) -> usize {
        usize::from(self.search.is_some())
            + self.enums.len()
            + self
                .dates
                .values()
                .map(|range| usize::from(range.from.is_some()) + usize::from(range.to.is_some()))
                .sum::<usize>()
    }

    /// Returns `true` if no predicate is active.
    pub fn is_empty(&self) -> bool {
        self.active_count() == 0
    }

    /// Evaluates every predicate against one record.
    pub fn matches(&self, record: &R) -> bool {
        if let Some(term) = &self.search {
            if !matches_search(record, &term.to_lowercase()) {
                return false;
            }
        }

        for (key, expected) in &self.enums {
            if !matches_enum(record, *key, expected) {
                return false;
            }
        }

        for (key, range) in &self.dates {
            for (bound, value) in [(Bound::From, &range.from), (Bound::To, &range.to)] {
                let Some(value) = value else { continue };
                if !fail_open(matches_date_bound(record, *key, bound, value)) {
                    return false;
                }
            }
        }

        true
    }
}

/// Keeps the records matching `filters` in the requested deleted partition.
///
/// With `show_deleted` only soft-deleted records are kept, without it only
/// live ones: the two views never overlap. The input is not modified and the
/// output preserves its relative order.
pub fn filter_records<'a, R, I>(records: I, filters: &FilterState<R>, show_deleted: bool) -> Vec<&'a R>
where
    R: TableRecord,
    I: IntoIterator<Item = &'a R>,
{
    records
        .into_iter()
        .filter(|record| record.is_deleted() == show_deleted)
        .filter(|record| filters.matches(record))
        .collect()
}

/// Case-insensitive substring match against any searchable field.
///
/// `term` must already be lowercased.
pub fn matches_search<R: TableRecord>(record: &R, term: &str) -> bool {
    record
        .search_fields()
        .iter()
        .any(|field| field.to_lowercase().contains(term))
}

/// Exact match; a record without a value for the axis does not match.
pub fn matches_enum<R: TableRecord>(record: &R, key: R::EnumFilter, expected: &str) -> bool {
    record
        .enum_value(key)
        .is_some_and(|value| value.as_ref() == expected)
}

/// Inclusive day-granularity comparison of one date bound.
///
/// A record without the date passes. An unparseable bound or record date is
/// reported as an error for the caller to fail open on.
pub fn matches_date_bound<R: TableRecord>(
    record: &R,
    key: R::DateFilter,
    bound: Bound,
    value: &str,
) -> Result<bool, FilterInputError> {
    let Some(raw) = record.date_value(key) else {
        return Ok(true);
    };
    let limit = parse_date(value)?;
    let date: NaiveDate = parse_date(raw)?;

    Ok(match bound {
        Bound::From => date >= limit,
        Bound::To => date <= limit,
    })
}

fn fail_open(result: Result<bool, FilterInputError>) -> bool {
    result.unwrap_or_else(|err| {
        log::trace!("filter predicate passes on bad input: {err}");
        true
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Sancion;
    use crate::model::SancionDateFilter;
    use crate::model::SancionFilter;
    use crate::model::test_support::sancion;

    fn ids(records: &[&Sancion]) -> Vec<i64> {
        records.iter().map(|r| r.id).collect()
    }

    fn sample() -> Vec<Sancion> {
        vec![
            sancion(1, "Juan García López", "suspension", Some("2024-01-10"), Some("2024-01-20")),
            sancion(2, "Ana Pérez", "amonestacion", Some("2024-02-01"), None),
            sancion(3, "Luis Gómez", "suspension", Some("2024-03-05"), Some("2024-03-15")),
            sancion(4, "Marta Ruiz", "multa", None, Some("2024-04-01")),
            sancion(5, "Pedro García", "amonestacion", Some("fecha rota"), None),
        ]
    }

    #[test]
    fn test_empty_filters_keep_everything_in_order() {
        let records = sample();
        let filtered = filter_records(&records, &FilterState::new(), false);
        assert_eq!(ids(&filtered), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_search_is_case_insensitive() {
        let records = sample();
        let filters = FilterState::<Sancion>::new().with_search("GARCÍA");
        assert_eq!(ids(&filter_records(&records, &filters, false)), vec![1, 5]);
    }

    #[test]
    fn test_search_matches_id_as_string() {
        let records = sample();
        let filters = FilterState::<Sancion>::new().with_search("3");
        assert_eq!(ids(&filter_records(&records, &filters, false)), vec![3]);
    }

    #[test]
    fn test_enum_filter_and_all_sentinel() {
        let records = sample();
        let mut filters = FilterState::<Sancion>::new().with_enum(SancionFilter::TipoSancion, "suspension");
        assert_eq!(ids(&filter_records(&records, &filters, false)), vec![1, 3]);

        filters.set_enum(SancionFilter::TipoSancion, "all");
        assert!(filters.is_empty());
        assert_eq!(filter_records(&records, &filters, false).len(), 5);
    }

    #[test]
    fn test_date_range_is_inclusive() {
        let records = sample();
        let filters = FilterState::<Sancion>::new()
            .with_date_from(SancionDateFilter::FechaInicio, "2024-02-01")
            .with_date_to(SancionDateFilter::FechaInicio, "2024-03-05");
        // 4 has no fecha_inicio, 5 has a malformed one: both pass.
        assert_eq!(ids(&filter_records(&records, &filters, false)), vec![2, 3, 4, 5]);
    }

    #[test]
    fn test_missing_date_passes_upper_bound() {
        let records = sample();
        let filters =
            FilterState::<Sancion>::new().with_date_to(SancionDateFilter::FechaFin, "2024-01-31");
        assert_eq!(ids(&filter_records(&records, &filters, false)), vec![1, 2, 5]);
    }

    #[test]
    fn test_malformed_bound_fails_open() {
        let records = sample();
        let filters = FilterState::<Sancion>::new()
            .with_date_from(SancionDateFilter::FechaInicio, "no-es-fecha")
            .with_date_to(SancionDateFilter::FechaInicio, "2024-01-31");
        // Only the valid upper bound constrains.
        assert_eq!(ids(&filter_records(&records, &filters, false)), vec![1, 4, 5]);
    }

    #[test]
    fn test_matches_date_bound_reports_bad_input() {
        let records = sample();
        assert_eq!(
            matches_date_bound(&records[4], SancionDateFilter::FechaInicio, Bound::From, "2024-01-01"),
            Err(FilterInputError::InvalidDate {
                value: "fecha rota".to_string()
            })
        );
        assert_eq!(
            matches_date_bound(&records[3], SancionDateFilter::FechaInicio, Bound::From, "basura"),
            Ok(true)
        );
    }

    #[test]
    fn test_deleted_partition_is_exclusive() {
        let mut records = sample();
        records[1].lifecycle.deleted_at = Some("2024-05-01T10:00:00Z".to_string());
        records[3].lifecycle.deleted_at = Some("2024-05-02T10:00:00Z".to_string());

        let live = filter_records(&records, &FilterState::new(), false);
        let trash = filter_records(&records, &FilterState::new(), true);

        assert_eq!(ids(&live), vec![1, 3, 5]);
        assert_eq!(ids(&trash), vec![2, 4]);
        assert!(ids(&live).iter().all(|id| !ids(&trash).contains(id)));
        assert_eq!(live.len() + trash.len(), records.len());
    }

    #[test]
    fn test_idempotent() {
        let records = sample();
        let filters = FilterState::<Sancion>::new()
            .with_search("a")
            .with_enum(SancionFilter::TipoSancion, "amonestacion")
            .with_date_to(SancionDateFilter::FechaFin, "2024-12-31");

        let once = filter_records(&records, &filters, false);
        let twice = filter_records(once.iter().copied(), &filters, false);
        assert_eq!(ids(&once), ids(&twice));
    }

    #[test]
    fn test_order_independent() {
        let records = sample();
        let combined = FilterState::<Sancion>::new()
            .with_search("g")
            .with_enum(SancionFilter::TipoSancion, "suspension");

        let search_only = FilterState::<Sancion>::new().with_search("g");
        let enum_only = FilterState::<Sancion>::new().with_enum(SancionFilter::TipoSancion, "suspension");

        let a = filter_records(filter_records(&records, &search_only, false), &enum_only, false);
        let b = filter_records(filter_records(&records, &enum_only, false), &search_only, false);
        let c = filter_records(&records, &combined, false);

        assert_eq!(ids(&a), ids(&b));
        assert_eq!(ids(&a), ids(&c));
    }

    #[test]
    fn test_active_count() {
        let filters = FilterState::<Sancion>::new()
            .with_search("x")
            .with_enum(SancionFilter::Estado, "vigente")
            .with_date_from(SancionDateFilter::FechaInicio, "2024-01-01")
            .with_date_to(SancionDateFilter::FechaInicio, "2024-12-31");
        assert_eq!(filters.active_count(), 4);

        let mut cleared = filters.clone();
        cleared.clear();
        assert!(cleared.is_empty());
    }
}
