// core/src/model.rs
//
// Loader for the precomputed co-occurrence model: a `spool_map`
// (word -> id) and a sparse `freq_mat` (source id -> target id -> count).
// Ids are canonicalized to strings on the way in.

use crate::error::{NormalizeError, Result};
use indexmap::IndexMap;
use serde_json::{Map, Value};
use std::path::Path;
use tracing::{debug, info};

pub const SPOOL_MAP_KEY: &str = "spool_map";
pub const FREQ_MAT_KEY: &str = "freq_mat";

/// word -> canonical id string, in file order.
pub type SpoolMap = IndexMap<String, String>;

/// target id -> raw count.
pub type FrequencyRow = IndexMap<String, f64>;

/// source id -> row, in file order.
pub type FrequencyMatrix = IndexMap<String, FrequencyRow>;

/// The parsed input model.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Model {
    pub spool_map: SpoolMap,
    pub freq_mat: FrequencyMatrix,
}

impl Model {
    /// Read and validate a model file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| NormalizeError::io(path, e))?;
        let value: Value = serde_json::from_str(&content).map_err(|source| NormalizeError::Parse {
            path: Some(path.to_path_buf()),
            source,
        })?;
        let model = Self::from_value(value)?;
        info!(
            path = %path.display(),
            words = model.spool_map.len(),
            rows = model.freq_mat.len(),
            "loaded model"
        );
        Ok(model)
    }

    /// Parse a model from an in-memory JSON document.
    pub fn from_json_str(content: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(content)
            .map_err(|source| NormalizeError::Parse { path: None, source })?;
        Self::from_value(value)
    }

    /// Validate an already-parsed JSON document.
    ///
    /// Counts are checked here rather than at division time: anything
    /// that is not a finite, non-negative number is a schema error.
    pub fn from_value(value: Value) -> Result<Self> {
        let mut top = match value {
            Value::Object(map) => map,
            _ => return Err(NormalizeError::MissingKey(SPOOL_MAP_KEY)),
        };
        let spool = top
            .remove(SPOOL_MAP_KEY)
            .ok_or(NormalizeError::MissingKey(SPOOL_MAP_KEY))?;
        let freq = top
            .remove(FREQ_MAT_KEY)
            .ok_or(NormalizeError::MissingKey(FREQ_MAT_KEY))?;

        Ok(Model {
            spool_map: parse_spool_map(spool)?,
            freq_mat: parse_freq_mat(freq)?,
        })
    }
}

fn expect_object(value: Value, what: &str) -> Result<Map<String, Value>> {
    match value {
        Value::Object(map) => Ok(map),
        other => Err(NormalizeError::Schema(format!(
            "{} must be an object, found {}",
            what,
            kind(&other)
        ))),
    }
}

fn parse_spool_map(value: Value) -> Result<SpoolMap> {
    let raw = expect_object(value, SPOOL_MAP_KEY)?;
    let mut spool = SpoolMap::with_capacity(raw.len());
    for (word, id) in raw {
        let id = canonical_id(&id).ok_or_else(|| {
            NormalizeError::Schema(format!(
                "id for word `{}` must be an integer or string, found {}",
                word,
                kind(&id)
            ))
        })?;
        spool.insert(word, id);
    }
    Ok(spool)
}

fn parse_freq_mat(value: Value) -> Result<FrequencyMatrix> {
    let raw = expect_object(value, FREQ_MAT_KEY)?;
    let mut matrix = FrequencyMatrix::with_capacity(raw.len());
    for (source_id, row) in raw {
        let row = expect_object(row, &format!("row `{}`", source_id))?;
        let mut counts = FrequencyRow::with_capacity(row.len());
        for (target_id, count) in row {
            let n = count
                .as_f64()
                .filter(|n| n.is_finite() && *n >= 0.0)
                .ok_or_else(|| {
                    NormalizeError::Schema(format!(
                        "count for `{}` -> `{}` must be a non-negative number, found {}",
                        source_id, target_id, count
                    ))
                })?;
            counts.insert(target_id, n);
        }
        debug!(row = %source_id, entries = counts.len(), "parsed row");
        matrix.insert(source_id, counts);
    }
    Ok(matrix)
}

/// Integer ids become their decimal text; string ids are kept verbatim.
pub fn canonical_id(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => n
            .as_i64()
            .map(|i| i.to_string())
            .or_else(|| n.as_u64().map(|u| u.to_string())),
        _ => None,
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
