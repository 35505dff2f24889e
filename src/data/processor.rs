//! Data Processor Module
//! Penalty filter, play/defense inner join, null drop and field zone derivation.

use crate::data::model::{DefenseRecord, EnrichedRow, FieldZone, PlayRecord};
use std::collections::HashMap;

/// Row counts from one enrichment pass, logged at startup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EnrichmentSummary {
    pub plays_read: usize,
    pub defense_read: usize,
    pub penalty_dropped: usize,
    pub joined: usize,
    pub null_dropped: usize,
    pub kept: usize,
}

/// The projected play side of the join.
struct PlaySide<'a> {
    formation: Option<&'a str>,
    field_position: Option<f64>,
    epa: Option<f64>,
}

/// Handles the join and enrichment of the two source tables.
pub struct DataProcessor;

impl DataProcessor {
    /// Build the enriched dataset.
    ///
    /// Penalized plays are removed before the join, so they never reach the
    /// output through a matching defense row. The join is a plain inner join:
    /// duplicate ids on either side yield every pairing. Output follows defense
    /// file order, then plays file order within one id.
    pub fn enrich(
        plays: &[PlayRecord],
        defense: &[DefenseRecord],
    ) -> (Vec<EnrichedRow>, EnrichmentSummary) {
        let mut summary = EnrichmentSummary {
            plays_read: plays.len(),
            defense_read: defense.len(),
            ..Default::default()
        };

        let mut plays_by_id: HashMap<&str, Vec<PlaySide<'_>>> = HashMap::new();
        for play in plays {
            if play.is_no_play != Some(false) {
                summary.penalty_dropped += 1;
                continue;
            }
            let Some(play_id) = play.play_id.as_deref() else {
                continue;
            };
            plays_by_id.entry(play_id).or_default().push(PlaySide {
                formation: play.formation.as_deref(),
                field_position: play.field_position,
                epa: play.epa,
            });
        }

        let mut rows = Vec::new();
        for def in defense {
            let Some(play_id) = def.play_id.as_deref() else {
                continue;
            };
            let Some(matches) = plays_by_id.get(play_id) else {
                continue;
            };

            for play in matches {
                summary.joined += 1;
                match Self::complete_row(play_id, def, play) {
                    Some(row) => rows.push(row),
                    None => summary.null_dropped += 1,
                }
            }
        }

        summary.kept = rows.len();
        (rows, summary)
    }

    /// A joined pair becomes a row only when every column is present.
    fn complete_row(play_id: &str, def: &DefenseRecord, play: &PlaySide<'_>) -> Option<EnrichedRow> {
        let alignment = def.alignment.as_ref()?;
        let def_target = def.def_target.as_ref()?;
        let formation = play.formation?;
        let field_position = play.field_position?;
        let epa = play.epa?;

        Some(EnrichedRow {
            play_id: play_id.to_string(),
            alignment: alignment.clone(),
            def_target: def_target.clone(),
            formation: formation.to_string(),
            field_position,
            epa,
            zone: FieldZone::categorize(field_position),
        })
    }
}
