//! Filtered, sorted derivation of a record collection.

use std::cmp::Ordering;
use std::mem::discriminant;

use icu_collator::{Collator, CollatorOptions, Strength};
use tracing::{debug, warn};

use crate::record::{FieldValue, Record, ToRecord};
use crate::view::{SearchQuery, SortDirection, SortSpec};

/// Renders the filtered, sorted sequence of records to display.
///
/// Records are never mutated; the result holds clones in display order.
#[must_use]
pub fn render_table<S: AsRef<str>>(
    records: &[Record],
    query: &SearchQuery,
    sort: &SortSpec,
    search_fields: &[S],
) -> Vec<Record> {
    display_order(records, query, sort, search_fields)
        .into_iter()
        .map(|index| records[index].clone())
        .collect()
}

/// Renders typed rows through their record projection.
///
/// Same contract as [`render_table`], but returns the original rows so
/// callers keep their typed data.
#[must_use]
pub fn render_rows<T, S>(
    rows: &[T],
    query: &SearchQuery,
    sort: &SortSpec,
    search_fields: &[S],
) -> Vec<T>
where
    T: ToRecord + Clone,
    S: AsRef<str>,
{
    let records: Vec<Record> = rows.iter().map(ToRecord::to_record).collect();
    display_order(&records, query, sort, search_fields)
        .into_iter()
        .map(|index| rows[index].clone())
        .collect()
}

/// Returns input indices of matching records in display order.
#[must_use]
pub fn display_order<S: AsRef<str>>(
    records: &[Record],
    query: &SearchQuery,
    sort: &SortSpec,
    search_fields: &[S],
) -> Vec<usize> {
    let matching: Vec<usize> = records
        .iter()
        .enumerate()
        .filter(|(_, record)| query.matches(record, search_fields))
        .map(|(index, _)| index)
        .collect();

    let keyed: Option<Vec<(usize, &FieldValue)>> = matching
        .iter()
        .map(|&index| records[index].get(sort.field()).map(|value| (index, value)))
        .collect();
    let Some(mut keyed) = keyed else {
        debug!(
            field = sort.field(),
            "sort field missing on record, keeping filtered order"
        );
        return matching;
    };

    if !values_are_comparable(keyed.iter().map(|(_, value)| *value)) {
        debug!(
            field = sort.field(),
            "sort values are not mutually comparable, keeping filtered order"
        );
        return matching;
    }

    // `sort_by` is stable, so equal keys keep input order in both directions.
    keyed.sort_by(|(_, left), (_, right)| {
        let ordering = compare_values(left, right).unwrap_or(Ordering::Equal);
        match sort.direction() {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    });

    keyed.into_iter().map(|(index, _)| index).collect()
}

fn values_are_comparable<'a>(mut values: impl Iterator<Item = &'a FieldValue>) -> bool {
    let Some(first) = values.next() else {
        return true;
    };
    if first.as_number().is_some_and(f64::is_nan) {
        return false;
    }

    let kind = discriminant(first);
    values.all(|value| {
        discriminant(value) == kind && !value.as_number().is_some_and(f64::is_nan)
    })
}

fn compare_values(left: &FieldValue, right: &FieldValue) -> Option<Ordering> {
    match (left, right) {
        (FieldValue::Number(left), FieldValue::Number(right)) => left.partial_cmp(right),
        (FieldValue::Date(left), FieldValue::Date(right)) => Some(left.cmp(right)),
        (FieldValue::Text(left), FieldValue::Text(right)) => Some(locale_compare(left, right)),
        _ => None,
    }
}

thread_local! {
    static ROOT_COLLATOR: Option<Collator> = root_collator();
}

fn root_collator() -> Option<Collator> {
    let mut options = CollatorOptions::new();
    options.strength = Some(Strength::Tertiary);

    match Collator::try_new(&Default::default(), options) {
        Ok(collator) => Some(collator),
        Err(error) => {
            warn!(%error, "root collator unavailable, comparing case-folded text");
            None
        }
    }
}

/// Compares two strings with the Unicode root collation.
///
/// Accents and case only break ties between otherwise equal letters, so
/// "Émile" sorts with the other E names and "a" sorts before "A".
#[must_use]
pub fn locale_compare(left: &str, right: &str) -> Ordering {
    ROOT_COLLATOR.with(|collator| match collator {
        Some(collator) => collator.compare(left, right),
        None => folded_compare(left, right),
    })
}

fn folded_compare(left: &str, right: &str) -> Ordering {
    let folded = |value: &str| value.chars().flat_map(char::to_lowercase).collect::<Vec<_>>();

    folded(left)
        .cmp(&folded(right))
        .then_with(|| {
            left.chars()
                .map(char::is_uppercase)
                .cmp(right.chars().map(char::is_uppercase))
        })
        .then_with(|| left.cmp(right))
}
