//! Aggregation & Pivot Module
//! Mean EPA per (alignment, formation), pivoted into an alignment x formation matrix.

use crate::data::EnrichedRow;
use rayon::prelude::*;
use serde::Serialize;
use statrs::statistics::Statistics;
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Mean EPA matrix. Rows are alignments, columns are formations, both sorted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PivotMatrix {
    pub alignments: Vec<String>,
    pub formations: Vec<String>,
    /// `values[row][col]`; pairs with no plays hold 0.
    pub values: Vec<Vec<f64>>,
    /// Number of plays behind each cell.
    pub counts: Vec<Vec<usize>>,
}

impl PivotMatrix {
    pub fn value(&self, alignment: &str, formation: &str) -> Option<f64> {
        let (row, col) = self.position(alignment, formation)?;
        Some(self.values[row][col])
    }

    pub fn count(&self, alignment: &str, formation: &str) -> Option<usize> {
        let (row, col) = self.position(alignment, formation)?;
        Some(self.counts[row][col])
    }

    /// Smallest and largest cell value, including filled zeros.
    pub fn value_range(&self) -> (f64, f64) {
        self.values
            .iter()
            .flatten()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            })
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.alignments.len(), self.formations.len())
    }

    fn position(&self, alignment: &str, formation: &str) -> Option<(usize, usize)> {
        let row = self.alignments.iter().position(|a| a == alignment)?;
        let col = self.formations.iter().position(|f| f == formation)?;
        Some((row, col))
    }
}

/// Result of aggregating a filtered subset.
#[derive(Debug, Clone, PartialEq)]
pub enum Aggregation {
    /// No rows passed the filter.
    Empty,
    Matrix(PivotMatrix),
}

impl Aggregation {
    pub fn is_empty(&self) -> bool {
        matches!(self, Aggregation::Empty)
    }

    pub fn matrix(&self) -> Option<&PivotMatrix> {
        match self {
            Aggregation::Empty => None,
            Aggregation::Matrix(matrix) => Some(matrix),
        }
    }
}

/// Handles grouping and pivoting of filtered rows.
pub struct PivotCalculator;

impl PivotCalculator {
    /// Group by (alignment, formation), average EPA and pivot.
    ///
    /// Row and column labels are exactly the values present in `rows`.
    pub fn aggregate(rows: &[&EnrichedRow]) -> Aggregation {
        if rows.is_empty() {
            return Aggregation::Empty;
        }

        let mut groups: BTreeMap<(&str, &str), Vec<f64>> = BTreeMap::new();
        for row in rows {
            groups
                .entry((row.alignment.as_str(), row.formation.as_str()))
                .or_default()
                .push(row.epa);
        }

        let group_means: Vec<((&str, &str), f64, usize)> = groups
            .into_par_iter()
            .map(|(key, values)| {
                let count = values.len();
                (key, values.iter().mean(), count)
            })
            .collect();

        let alignments: BTreeSet<&str> = group_means.iter().map(|((a, _), _, _)| *a).collect();
        let formations: BTreeSet<&str> = group_means.iter().map(|((_, f), _, _)| *f).collect();
        let row_index: HashMap<&str, usize> =
            alignments.iter().enumerate().map(|(i, a)| (*a, i)).collect();
        let col_index: HashMap<&str, usize> =
            formations.iter().enumerate().map(|(i, f)| (*f, i)).collect();

        let mut values = vec![vec![0.0; formations.len()]; alignments.len()];
        let mut counts = vec![vec![0; formations.len()]; alignments.len()];
        for ((alignment, formation), mean, count) in group_means {
            let (row, col) = (row_index[alignment], col_index[formation]);
            values[row][col] = mean;
            counts[row][col] = count;
        }

        Aggregation::Matrix(PivotMatrix {
            alignments: alignments.into_iter().map(str::to_string).collect(),
            formations: formations.into_iter().map(str::to_string).collect(),
            values,
            counts,
        })
    }
}
