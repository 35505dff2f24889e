//! CSV Data Loader Module
//! Reads the plays and defense tables with Polars and projects them into typed records.

use crate::data::model::{DefenseRecord, PlayRecord};
use polars::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

pub const PLAY_ID_COL: &str = "play_id";
pub const NO_PLAY_COL: &str = "is_no_play";
pub const FORMATION_COL: &str = "offensive_formation_group";
pub const FIELD_POSITION_COL: &str = "field_position";
pub const EPA_COL: &str = "expected_points_added";
pub const ALIGNMENT_COL: &str = "alignment";
pub const DEF_TARGET_COL: &str = "def_target";

/// Cell texts read as missing, the usual NA markers written by dataframe and
/// R exports. Matched exactly; surrounding whitespace makes a cell a value.
pub const MISSING_MARKERS: [&str; 18] = [
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Data file not found: {}", .0.display())]
    MissingFile(PathBuf),
    #[error("Failed to load {}: {source}", .path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: PolarsError,
    },
}

/// Handles CSV file loading with Polars.
///
/// Malformed cells are tolerated and load as nulls; a missing file or a
/// missing required column fails the whole load.
pub struct DataLoader {
    infer_schema_length: usize,
}

impl Default for DataLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl DataLoader {
    pub fn new() -> Self {
        Self {
            infer_schema_length: 10_000,
        }
    }

    /// Load `plays.csv`-shaped data, keeping file order.
    pub fn load_plays(&self, file_path: &Path) -> Result<Vec<PlayRecord>, LoaderError> {
        let df = self.read_csv(file_path)?;
        let records = Self::project_plays(&df).map_err(|source| LoaderError::Csv {
            path: file_path.to_path_buf(),
            source,
        })?;
        info!(path = %file_path.display(), rows = records.len(), "loaded plays");
        Ok(records)
    }

    /// Load `defense.csv`-shaped data, keeping file order.
    pub fn load_defense(&self, file_path: &Path) -> Result<Vec<DefenseRecord>, LoaderError> {
        let df = self.read_csv(file_path)?;
        let records = Self::project_defense(&df).map_err(|source| LoaderError::Csv {
            path: file_path.to_path_buf(),
            source,
        })?;
        info!(path = %file_path.display(), rows = records.len(), "loaded defense");
        Ok(records)
    }

    fn read_csv(&self, file_path: &Path) -> Result<DataFrame, LoaderError> {
        if !file_path.is_file() {
            return Err(LoaderError::MissingFile(file_path.to_path_buf()));
        }

        LazyCsvReader::new(file_path)
            .with_infer_schema_length(Some(self.infer_schema_length))
            .with_ignore_errors(true)
            .with_null_values(Some(NullValues::AllColumns(
                MISSING_MARKERS.iter().map(|marker| (*marker).into()).collect(),
            )))
            .finish()
            .and_then(|lazy| lazy.collect())
            .map_err(|source| LoaderError::Csv {
                path: file_path.to_path_buf(),
                source,
            })
    }

    fn project_plays(df: &DataFrame) -> PolarsResult<Vec<PlayRecord>> {
        let play_ids = key_values(df, PLAY_ID_COL)?;
        let no_play = flag_values(df, NO_PLAY_COL)?;
        let formations = text_values(df, FORMATION_COL)?;
        let field_positions = float_values(df, FIELD_POSITION_COL)?;
        let epa = float_values(df, EPA_COL)?;

        let records = play_ids
            .into_iter()
            .zip(no_play)
            .zip(formations)
            .zip(field_positions)
            .zip(epa)
            .map(
                |((((play_id, no_play), formation), field_position), epa)| PlayRecord {
                    play_id,
                    is_no_play: no_play,
                    formation,
                    field_position,
                    epa,
                },
            )
            .collect();
        Ok(records)
    }

    fn project_defense(df: &DataFrame) -> PolarsResult<Vec<DefenseRecord>> {
        let play_ids = key_values(df, PLAY_ID_COL)?;
        let alignments = text_values(df, ALIGNMENT_COL)?;
        let targets = text_values(df, DEF_TARGET_COL)?;

        let records = play_ids
            .into_iter()
            .zip(alignments)
            .zip(targets)
            .map(|((play_id, alignment), def_target)| DefenseRecord {
                play_id,
                alignment,
                def_target,
            })
            .collect();
        Ok(records)
    }
}

/// Read a column as text. Empty cells and NA markers are `None`; any other
/// text is kept verbatim, whitespace included.
fn text_values(df: &DataFrame, name: &str) -> PolarsResult<Vec<Option<String>>> {
    let text = df.column(name)?.cast(&DataType::String)?;
    let values = text
        .str()?
        .into_iter()
        .map(|v| v.filter(|s| !is_missing(s)).map(str::to_string))
        .collect();
    Ok(values)
}

fn is_missing(text: &str) -> bool {
    text.is_empty() || MISSING_MARKERS.contains(&text)
}

/// Read a column as `f64`. Unparsable cells and NaN become `None`.
fn float_values(df: &DataFrame, name: &str) -> PolarsResult<Vec<Option<f64>>> {
    let floats = df.column(name)?.cast(&DataType::Float64)?;
    let values = floats
        .f64()?
        .into_iter()
        .map(|v| v.filter(|x| !x.is_nan()))
        .collect();
    Ok(values)
}

/// Read a 0/1 flag. Text columns also accept `true`/`false` in any case.
fn flag_values(df: &DataFrame, name: &str) -> PolarsResult<Vec<Option<bool>>> {
    let column = df.column(name)?;
    if matches!(column.dtype(), DataType::String) {
        let values = column.str()?.into_iter().map(|v| v.and_then(parse_flag)).collect();
        return Ok(values);
    }

    let values = float_values(df, name)?
        .into_iter()
        .map(|v| v.map(|flag| flag != 0.0))
        .collect();
    Ok(values)
}

fn parse_flag(text: &str) -> Option<bool> {
    let text = text.trim();
    if text.eq_ignore_ascii_case("true") {
        Some(true)
    } else if text.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        text.parse::<f64>().ok().filter(|x| !x.is_nan()).map(|x| x != 0.0)
    }
}

/// Read a join key as text. Integral floats render without a fraction so an
/// id inferred as `Float64` in one file still matches `Int64` in the other.
fn key_values(df: &DataFrame, name: &str) -> PolarsResult<Vec<Option<String>>> {
    let column = df.column(name)?;
    if !column.dtype().is_float() {
        return text_values(df, name);
    }

    let floats = column.cast(&DataType::Float64)?;
    let values = floats
        .f64()?
        .into_iter()
        .map(|v| {
            v.filter(|x| x.is_finite()).map(|x| {
                if x.fract() == 0.0 {
                    format!("{}", x as i64)
                } else {
                    x.to_string()
                }
            })
        })
        .collect();
    Ok(values)
}
