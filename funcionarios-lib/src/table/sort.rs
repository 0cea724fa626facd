//! Sort pipeline

use std::borrow::Cow;

use chrono::NaiveDateTime;

use super::TableRecord;
use super::date::parse_timestamp;
use crate::model::FuncionarioRef;

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    /// Ascending order (A-Z, oldest first).
    #[default]
    Asc,
    /// Descending order (Z-A, newest first).
    Desc,
}

impl Direction {
    /// Returns the opposite direction.
    pub fn flip(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

/// The single active sort of a list view.
///
/// `field: None` keeps the natural (filtered) order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortState<F> {
    field: Option<F>,
    direction: Direction,
}

impl<F> Default for SortState<F> {
    fn default() -> Self {
        Self {
            field: None,
            direction: Direction::Asc,
        }
    }
}

impl<F: Copy + PartialEq> SortState<F> {
    /// Creates a sort on `field` in `direction`.
    pub fn new(field: F, direction: Direction) -> Self {
        Self {
            field: Some(field),
            direction,
        }
    }

    /// Clicking the active column flips its direction; any other column
    /// becomes active in ascending order.
    pub fn toggle(&mut self, field: F) {
        if self.field == Some(field) {
            self.direction = self.direction.flip();
        } else {
            self.field = Some(field);
            self.direction = Direction::Asc;
        }
    }

    /// Removes the sort.
    pub fn clear(&mut self) {
        self.field = None;
        self.direction = Direction::Asc;
    }

    pub fn field(&self) -> Option<F> {
        self.field
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Direction shown on `field`'s column header, if it is the active one.
    pub fn indicator(&self, field: F) -> Option<Direction> {
        (self.field == Some(field)).then_some(self.direction)
    }
}

/// A comparable projection of one record field.
///
/// One sort field always yields the same variant, so the derived ordering is
/// a total order within a column. Absent timestamps are the minimum value.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum SortKey<'a> {
    Number(i64),
    /// Lowercased text.
    Text(Cow<'a, str>),
    Timestamp(Option<NaiveDateTime>),
    /// `false` sorts before `true`.
    Flag(bool),
}

impl<'a> SortKey<'a> {
    /// Case-insensitive text key. Absent text sorts as empty.
    pub fn text(value: Option<&'a str>) -> Self {
        let value = value.unwrap_or_default();
        if value.chars().any(char::is_uppercase) {
            Self::Text(Cow::Owned(value.to_lowercase()))
        } else {
            Self::Text(Cow::Borrowed(value))
        }
    }

    /// Timestamp key. Absent or unparseable dates are the minimum value.
    pub fn timestamp(value: Option<&str>) -> Self {
        Self::Timestamp(value.and_then(|raw| parse_timestamp(raw).ok()))
    }

    /// Sorts by the funcionario's full name.
    pub fn funcionario(funcionario: Option<&'a FuncionarioRef>) -> Self {
        Self::text(funcionario.map(|f| f.nombre_completo.as_str()))
    }
}

/// Orders `records` by the active sort field.
///
/// The sort is stable: records with equal keys keep their input order in
/// both directions. Without an active field the input is returned as is.
pub fn sort_records<'a, R: TableRecord>(
    records: Vec<&'a R>,
    sort: &SortState<R::SortField>,
) -> Vec<&'a R> {
    let Some(field) = sort.field() else {
        return records;
    };

    let mut keyed: Vec<(SortKey<'a>, &'a R)> = records
        .into_iter()
        .map(|record| (record.sort_key(field), record))
        .collect();

    match sort.direction() {
        Direction::Asc => keyed.sort_by(|a, b| a.0.cmp(&b.0)),
        Direction::Desc => keyed.sort_by(|a, b| b.0.cmp(&a.0)),
    }

    keyed.into_iter().map(|(_, record)| record).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Sancion;
    use crate::model::SancionSort;
    use crate::model::test_support::sancion;

    fn ids(records: &[&Sancion]) -> Vec<i64> {
        records.iter().map(|r| r.id).collect()
    }

    fn sample() -> Vec<Sancion> {
        vec![
            sancion(1, "Carla Díaz", "multa", Some("2024-03-01"), None),
            sancion(2, "ana Pérez", "suspension", None, None),
            sancion(3, "Bruno Sosa", "multa", Some("2024-01-15"), None),
            sancion(4, "Álvaro Núñez", "suspension", Some("2024-02-20 09:00:00"), None),
        ]
    }

    #[test]
    fn test_toggle_flips_then_resets() {
        let mut sort = SortState::<SancionSort>::default();
        sort.toggle(SancionSort::FechaInicio);
        assert_eq!(sort.field(), Some(SancionSort::FechaInicio));
        assert_eq!(sort.direction(), Direction::Asc);

        sort.toggle(SancionSort::FechaInicio);
        assert_eq!(sort.direction(), Direction::Desc);

        sort.toggle(SancionSort::Funcionario);
        assert_eq!(sort.field(), Some(SancionSort::Funcionario));
        assert_eq!(sort.direction(), Direction::Asc);
        assert_eq!(sort.indicator(SancionSort::FechaInicio), None);
    }

    #[test]
    fn test_no_field_is_identity() {
        let records = sample();
        let sorted = sort_records(records.iter().collect(), &SortState::default());
        assert_eq!(ids(&sorted), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_null_date_sorts_first_ascending() {
        let records = sample();
        let sorted = sort_records(
            records.iter().collect(),
            &SortState::new(SancionSort::FechaInicio, Direction::Asc),
        );
        assert_eq!(ids(&sorted), vec![2, 3, 4, 1]);
    }

    #[test]
    fn test_null_date_sorts_last_descending() {
        let records = sample();
        let sorted = sort_records(
            records.iter().collect(),
            &SortState::new(SancionSort::FechaInicio, Direction::Desc),
        );
        assert_eq!(ids(&sorted), vec![1, 4, 3, 2]);
    }

    #[test]
    fn test_funcionario_sorts_case_insensitive() {
        let records = sample();
        let sorted = sort_records(
            records.iter().collect(),
            &SortState::new(SancionSort::Funcionario, Direction::Asc),
        );
        // "ana" < "bruno" < "carla" < "álvaro" (code point order after lowercasing)
        assert_eq!(ids(&sorted), vec![2, 3, 1, 4]);
    }

    #[test]
    fn test_stable_for_equal_keys() {
        let records = sample();
        let asc = sort_records(
            records.iter().collect(),
            &SortState::new(SancionSort::TipoSancion, Direction::Asc),
        );
        assert_eq!(ids(&asc), vec![1, 3, 2, 4]);

        let desc = sort_records(
            records.iter().collect(),
            &SortState::new(SancionSort::TipoSancion, Direction::Desc),
        );
        assert_eq!(ids(&desc), vec![2, 4, 1, 3]);
    }

    #[test]
    fn test_unparseable_date_ties_with_missing() {
        let mut records = sample();
        records[0].fecha_inicio = Some("31/31/2024".to_string());
        let sorted = sort_records(
            records.iter().collect(),
            &SortState::new(SancionSort::FechaInicio, Direction::Asc),
        );
        assert_eq!(ids(&sorted), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_ascending_reversed_equals_descending() {
        let records = sample();
        let mut asc = sort_records(
            records.iter().collect(),
            &SortState::new(SancionSort::Id, Direction::Asc),
        );
        asc.reverse();
        let desc = sort_records(
            records.iter().collect(),
            &SortState::new(SancionSort::Id, Direction::Desc),
        );
        assert_eq!(ids(&asc), ids(&desc));
    }

    #[test]
    fn test_flag_orders_false_first() {
        assert!(SortKey::Flag(false) < SortKey::Flag(true));
        assert!(SortKey::timestamp(None) < SortKey::timestamp(Some("1900-01-01")));
    }
}
