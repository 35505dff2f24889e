//! Typed records for the two source tables and the enriched join result.

use std::fmt;

/// One row of `plays.csv`, projected to the columns the dashboard reads.
///
/// Every field is optional: a malformed or empty cell loads as `None` and is
/// dropped later by the enrichment stage.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlayRecord {
    pub play_id: Option<String>,
    pub is_no_play: Option<bool>,
    pub formation: Option<String>,
    pub field_position: Option<f64>,
    pub epa: Option<f64>,
}

/// One row of `defense.csv`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DefenseRecord {
    pub play_id: Option<String>,
    pub alignment: Option<String>,
    pub def_target: Option<String>,
}

/// Field position bucket.
///
/// Variants are declared in field order, so `Ord` follows the field and not
/// the label text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FieldZone {
    BackedUp,
    OwnTerritory,
    Midfield,
    ScoringRange,
}

impl FieldZone {
    pub const ALL: [FieldZone; 4] = [
        FieldZone::BackedUp,
        FieldZone::OwnTerritory,
        FieldZone::Midfield,
        FieldZone::ScoringRange,
    ];

    /// Bucket a yard-line value. Each upper boundary belongs to the lower zone.
    pub fn categorize(field_position: f64) -> Self {
        if field_position <= -20.0 {
            FieldZone::BackedUp
        } else if field_position <= 0.0 {
            FieldZone::OwnTerritory
        } else if field_position <= 40.0 {
            FieldZone::Midfield
        } else {
            FieldZone::ScoringRange
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FieldZone::BackedUp => "Backed Up",
            FieldZone::OwnTerritory => "Own Territory",
            FieldZone::Midfield => "Midfield",
            FieldZone::ScoringRange => "Scoring Range",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|zone| zone.label() == label)
    }
}

impl fmt::Display for FieldZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A complete (play, defense) pair with its derived zone.
#[derive(Debug, Clone, PartialEq)]
pub struct EnrichedRow {
    pub play_id: String,
    pub alignment: String,
    pub def_target: String,
    pub formation: String,
    pub field_position: f64,
    pub epa: f64,
    pub zone: FieldZone,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zone_boundaries_belong_to_the_lower_zone() {
        assert_eq!(FieldZone::categorize(-20.0), FieldZone::BackedUp);
        assert_eq!(FieldZone::categorize(-20.0001), FieldZone::BackedUp);
        assert_eq!(FieldZone::categorize(-19.999), FieldZone::OwnTerritory);
        assert_eq!(FieldZone::categorize(0.0), FieldZone::OwnTerritory);
        assert_eq!(FieldZone::categorize(0.0001), FieldZone::Midfield);
        assert_eq!(FieldZone::categorize(40.0), FieldZone::Midfield);
        assert_eq!(FieldZone::categorize(40.0001), FieldZone::ScoringRange);
    }

    #[test]
    fn extreme_positions_land_in_the_outer_zones() {
        assert_eq!(FieldZone::categorize(f64::NEG_INFINITY), FieldZone::BackedUp);
        assert_eq!(FieldZone::categorize(-50.0), FieldZone::BackedUp);
        assert_eq!(FieldZone::categorize(50.0), FieldZone::ScoringRange);
    }

    #[test]
    fn zone_order_follows_the_field_not_the_label() {
        let mut zones = vec![
            FieldZone::ScoringRange,
            FieldZone::Midfield,
            FieldZone::BackedUp,
            FieldZone::OwnTerritory,
        ];
        zones.sort();
        assert_eq!(zones, FieldZone::ALL.to_vec());
    }

    #[test]
    fn labels_round_trip() {
        for zone in FieldZone::ALL {
            assert_eq!(FieldZone::from_label(zone.label()), Some(zone));
        }
        assert_eq!(FieldZone::from_label("Red Zone"), None);
    }
}
