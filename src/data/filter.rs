use std::collections::BTreeSet;

use serde::Serialize;

use super::model::EnrichedRow;

// ---------------------------------------------------------------------------
// Filter predicate: which zones and alignments are selected
// ---------------------------------------------------------------------------

/// Zone and alignment selections from the two dashboard controls.
///
/// An empty set means "no filter" on that dimension, not "nothing selected".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Selection {
    pub zones: BTreeSet<String>,
    pub alignments: BTreeSet<String>,
}

impl Selection {
    pub fn new<Z, A>(zones: Z, alignments: A) -> Self
    where
        Z: IntoIterator,
        Z::Item: Into<String>,
        A: IntoIterator,
        A::Item: Into<String>,
    {
        Self {
            zones: zones.into_iter().map(Into::into).collect(),
            alignments: alignments.into_iter().map(Into::into).collect(),
        }
    }

    /// Whether `row` passes both dimensions.
    pub fn matches(&self, row: &EnrichedRow) -> bool {
        let zone_ok = self.zones.is_empty() || self.zones.contains(row.zone.label());
        let alignment_ok = self.alignments.is_empty() || self.alignments.contains(&row.alignment);
        zone_ok && alignment_ok
    }
}

/// Return the rows that pass the selection, in dataset order.
///
/// Labels that do not occur in the data simply match nothing.
pub fn filter_rows<'a>(rows: &'a [EnrichedRow], selection: &Selection) -> Vec<&'a EnrichedRow> {
    rows.iter().filter(|row| selection.matches(row)).collect()
}
