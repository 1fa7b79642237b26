//! Single-key comparator chosen by the key field's kind.

use std::cmp::Ordering;

use recordkit_core::{FieldKind, FieldValue, Record, Schema, SortDirection, SortSpec, parse_date};

use crate::SearchError;

/// Comparator for one schema field.
#[derive(Debug, Clone)]
pub struct Comparator<'s> {
    field: &'s str,
    kind: &'s FieldKind,
    direction: SortDirection,
}

impl<'s> Comparator<'s> {
    pub fn new(schema: &'s Schema, spec: &SortSpec) -> Result<Self, SearchError> {
        let field = schema.get_field(&spec.key).ok_or_else(|| SearchError::UnknownSortKey {
            schema: schema.name.clone(),
            key: spec.key.clone(),
        })?;
        Ok(Self { field: &field.name, kind: &field.kind, direction: spec.direction })
    }

    /// Compare two records under the active direction.
    #[must_use]
    pub fn compare(&self, a: &Record, b: &Record) -> Ordering {
        let ord = compare_values(self.kind, a.get(self.field), b.get(self.field));
        match self.direction {
            SortDirection::Ascending => ord,
            SortDirection::Descending => ord.reverse(),
        }
    }

    /// Stable in-place sort.
    pub fn sort(&self, records: &mut [Record]) {
        records.sort_by(|a, b| self.compare(a, b));
    }
}

/// Ascending order of two optional values. Missing and null sort first.
#[must_use]
pub fn compare_values(kind: &FieldKind, a: Option<&FieldValue>, b: Option<&FieldValue>) -> Ordering {
    let a = a.filter(|v| !matches!(v, FieldValue::Null));
    let b = b.filter(|v| !matches!(v, FieldValue::Null));
    match (a, b) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(a), Some(b)) => compare_present(kind, a, b),
    }
}

fn compare_present(kind: &FieldKind, a: &FieldValue, b: &FieldValue) -> Ordering {
    match (kind, a, b) {
        (&FieldKind::Number, &FieldValue::Number(x), &FieldValue::Number(y)) => x.total_cmp(&y),
        (&FieldKind::Bool, &FieldValue::Bool(x), &FieldValue::Bool(y)) => x.cmp(&y),
        (&FieldKind::Date, &FieldValue::Text(ref x), &FieldValue::Text(ref y)) => {
            // Readable dates come before unreadable ones, which keep text order.
            match (parse_date(x), parse_date(y)) {
                (Some(dx), Some(dy)) => dx.cmp(&dy).then_with(|| compare_text(x, y)),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => compare_text(x, y),
            }
        },
        (_, &FieldValue::Text(ref x), &FieldValue::Text(ref y)) => compare_text(x, y),
        // Mixed kinds only occur in hand-edited snapshots; order by kind name.
        _ => a.kind_name().cmp(b.kind_name()),
    }
}

/// Case-folded order first, raw order as tie-break (close to `localeCompare`).
fn compare_text(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase()).then_with(|| a.cmp(b))
}
