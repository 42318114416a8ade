use std::collections::BTreeMap;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use arrow::array::{Array, AsArray};
use arrow::datatypes::DataType;
use arrow::error::ArrowError;
use arrow::util::display::array_value_to_string;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use regex::Regex;
use serde::Deserialize;
use serde_json::Value as JsonValue;
use thiserror::Error;

use super::model::{Movie, MovieDataset, NumericColumn};

/// Columns the source file must provide.
pub const REQUIRED_COLUMNS: [&str; 10] = [
    "budget",
    "revenue",
    "popularity",
    "vote_average",
    "runtime",
    "original_language",
    "original_title",
    "belongs_to_collection",
    "tagline",
    "production_countries",
];

/// Cell texts treated as null, on top of the empty string.
const NA_TOKENS: [&str; 18] = [
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Fatal load failures. Bad individual cells are never reported here: they
/// degrade to missing values during cleaning.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("source file not found: {}", path.display())]
    SourceNotFound { path: PathBuf },

    #[error("{} is not a readable movie table: {reason}", path.display())]
    SourceFormat { path: PathBuf, reason: String },

    #[error("reading {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl LoadError {
    pub(crate) fn from_io(path: &Path, err: io::Error) -> Self {
        if err.kind() == io::ErrorKind::NotFound {
            LoadError::SourceNotFound {
                path: path.to_path_buf(),
            }
        } else {
            LoadError::Io {
                path: path.to_path_buf(),
                source: err,
            }
        }
    }

    fn format(path: &Path, reason: impl Into<String>) -> Self {
        LoadError::SourceFormat {
            path: path.to_path_buf(),
            reason: reason.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// RawTable – uncleaned cells, shared by every source format
// ---------------------------------------------------------------------------

/// Header names plus rows of optional text cells (`None` = null).
#[derive(Debug, Clone, Default)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<Option<String>>>,
}

impl RawTable {
    fn column_index(&self, path: &Path) -> Result<BTreeMap<&'static str, usize>, LoadError> {
        let mut index = BTreeMap::new();
        let mut missing = Vec::new();
        for name in REQUIRED_COLUMNS {
            match self.headers.iter().position(|h| h == name) {
                Some(i) => {
                    index.insert(name, i);
                }
                None => missing.push(name),
            }
        }
        if !missing.is_empty() {
            return Err(LoadError::format(
                path,
                format!("missing required column(s): {}", missing.join(", ")),
            ));
        }
        Ok(index)
    }
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load and clean a movie metadata file. Dispatch by extension.
///
/// Supported formats:
/// * `.csv`           – comma-delimited text with a header row
/// * `.tsv`           – tab-delimited text with a header row
/// * `.parquet`/`.pq` – every cell is rendered to text, then cleaned the same way
///
/// Anything else is read as comma-delimited text.
pub fn load_file(path: &Path) -> Result<MovieDataset, LoadError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let table = match ext.as_str() {
        "parquet" | "pq" => read_parquet(path)?,
        "tsv" => read_delimited(path, b'\t')?,
        _ => read_delimited(path, b',')?,
    };
    clean(&table, path)
}

// ---------------------------------------------------------------------------
// Delimited text reader
// ---------------------------------------------------------------------------

/// Short rows are padded with nulls and extra fields are ignored, so a
/// ragged line never fails the whole file. Invalid UTF-8 does.
fn read_delimited(path: &Path, delimiter: u8) -> Result<RawTable, LoadError> {
    let file = File::open(path).map_err(|e| LoadError::from_io(path, e))?;
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .from_reader(file);

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| LoadError::format(path, format!("header: {e}")))?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();
    if headers.iter().all(|h| h.is_empty()) {
        return Err(LoadError::format(path, "no header row"));
    }

    let mut rows = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result.map_err(|e| LoadError::format(path, format!("row {row_no}: {e}")))?;
        let row = (0..headers.len())
            .map(|i| record.get(i).and_then(normalize_cell))
            .collect();
        rows.push(row);
    }

    Ok(RawTable { headers, rows })
}

/// Map a raw text cell to `None` when it spells a null.
pub fn normalize_cell(raw: &str) -> Option<String> {
    if raw.is_empty() || NA_TOKENS.contains(&raw) {
        None
    } else {
        Some(raw.to_string())
    }
}

// ---------------------------------------------------------------------------
// Parquet reader
// ---------------------------------------------------------------------------

/// Works with files written by both **Pandas** (`df.to_parquet()`) and
/// **Polars** (`df.write_parquet()`). Typed columns are rendered to text so
/// that numeric coercion and null handling stay identical to the CSV path.
/// Nested list and struct cells (e.g. `production_countries` stored as
/// `list<struct<iso_3166_1, name>>`) are rendered as JSON.
fn read_parquet(path: &Path) -> Result<RawTable, LoadError> {
    let file = File::open(path).map_err(|e| LoadError::from_io(path, e))?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)
        .map_err(|e| LoadError::format(path, format!("parquet metadata: {e}")))?;
    let headers: Vec<String> = builder
        .schema()
        .fields()
        .iter()
        .map(|f| f.name().clone())
        .collect();
    let reader = builder
        .build()
        .map_err(|e| LoadError::format(path, format!("parquet reader: {e}")))?;

    let mut rows = Vec::new();
    for batch_result in reader {
        let batch = batch_result
            .map_err(|e| LoadError::format(path, format!("parquet record batch: {e}")))?;

        for row in 0..batch.num_rows() {
            let mut cells = Vec::with_capacity(headers.len());
            for col in batch.columns() {
                if col.is_null(row) {
                    cells.push(None);
                    continue;
                }
                let text = if is_nested(col.data_type()) {
                    nested_cell_to_json(col.as_ref(), row).map(|v| v.to_string())
                } else {
                    array_value_to_string(col.as_ref(), row)
                }
                .map_err(|e| LoadError::format(path, format!("row {row}: {e}")))?;
                cells.push(normalize_cell(&text));
            }
            rows.push(cells);
        }
    }

    Ok(RawTable { headers, rows })
}

fn is_nested(data_type: &DataType) -> bool {
    matches!(
        data_type,
        DataType::List(_) | DataType::LargeList(_) | DataType::Struct(_)
    )
}

/// JSON value of one cell, descending into lists and structs. Leaf values
/// become strings; the cleaner only ever reads them as text.
fn nested_cell_to_json(col: &dyn Array, row: usize) -> Result<JsonValue, ArrowError> {
    if col.is_null(row) {
        return Ok(JsonValue::Null);
    }
    match col.data_type() {
        DataType::List(_) => {
            let items = col.as_list::<i32>().value(row);
            (0..items.len())
                .map(|i| nested_cell_to_json(items.as_ref(), i))
                .collect::<Result<Vec<_>, _>>()
                .map(JsonValue::Array)
        }
        DataType::LargeList(_) => {
            let items = col.as_list::<i64>().value(row);
            (0..items.len())
                .map(|i| nested_cell_to_json(items.as_ref(), i))
                .collect::<Result<Vec<_>, _>>()
                .map(JsonValue::Array)
        }
        DataType::Struct(_) => {
            let structs = col.as_struct();
            let mut object = serde_json::Map::new();
            for (field, child) in structs.fields().iter().zip(structs.columns()) {
                object.insert(field.name().clone(), nested_cell_to_json(child.as_ref(), row)?);
            }
            Ok(JsonValue::Object(object))
        }
        _ => array_value_to_string(col, row).map(JsonValue::String),
    }
}

// ---------------------------------------------------------------------------
// Cleaning
// ---------------------------------------------------------------------------

/// Coerce the numeric columns, derive the boolean and country fields and
/// drop every row missing one of the numeric values.
pub fn clean(table: &RawTable, path: &Path) -> Result<MovieDataset, LoadError> {
    let index = table.column_index(path)?;
    let cell = |row: &[Option<String>], name: &str| -> Option<String> {
        index
            .get(name)
            .and_then(|&i| row.get(i))
            .and_then(|c| c.clone())
    };

    let mut coerced_missing: BTreeMap<NumericColumn, usize> = BTreeMap::new();
    let mut movies = Vec::with_capacity(table.rows.len());

    for row in &table.rows {
        let mut numbers = [0.0_f64; 5];
        let mut complete = true;
        for (slot, column) in numbers.iter_mut().zip(NumericColumn::ALL) {
            let raw = cell(row, column.source_name());
            match coerce_numeric(raw.as_deref()) {
                Some(v) => *slot = v,
                None => {
                    if raw.is_some() {
                        *coerced_missing.entry(column).or_default() += 1;
                    }
                    complete = false;
                }
            }
        }
        if !complete {
            continue;
        }

        let [budget, revenue, popularity, vote_average, runtime] = numbers;
        let countries = cell(row, "production_countries");
        movies.push(Movie {
            original_title: cell(row, "original_title"),
            budget,
            revenue,
            popularity,
            vote_average,
            runtime,
            original_language: cell(row, "original_language"),
            belongs_to_collection: belongs_to_collection(cell(row, "belongs_to_collection").as_deref()),
            has_slogan: has_slogan(cell(row, "tagline").as_deref()),
            production_country: countries.as_deref().and_then(extract_production_country),
        });
    }

    for (column, n) in &coerced_missing {
        log::debug!("{column}: {n} non-numeric value(s) treated as missing");
    }
    let dropped = table.rows.len() - movies.len();
    if dropped > 0 {
        log::warn!(
            "{}: dropped {dropped} of {} rows with missing numeric values",
            path.display(),
            table.rows.len()
        );
    }

    Ok(MovieDataset::new(movies, table.rows.len()))
}

/// Best-effort numeric conversion: anything unparsable is missing, never zero.
pub fn coerce_numeric(raw: Option<&str>) -> Option<f64> {
    let value = raw?.trim().parse::<f64>().ok()?;
    if value.is_nan() {
        None
    } else {
        Some(value)
    }
}

/// The collection field's content is irrelevant; only its presence counts.
pub fn belongs_to_collection(raw: Option<&str>) -> bool {
    raw.is_some()
}

pub fn has_slogan(tagline: Option<&str>) -> bool {
    tagline.is_some_and(|t| !t.trim().is_empty())
}

#[derive(Deserialize)]
struct CountryEntry {
    name: Option<String>,
}

/// First country name in the raw `production_countries` text.
///
/// Proper JSON is parsed structurally and yields the first object's `name`
/// (nothing when that object has none). The usual dump is a Python-style
/// literal (`[{'iso_3166_1': 'US', 'name': 'United States'}]`), which falls
/// back to matching the first single-quoted `'name'` value.
pub fn extract_production_country(raw: &str) -> Option<String> {
    if let Ok(entries) = serde_json::from_str::<Vec<CountryEntry>>(raw) {
        return entries.into_iter().next().and_then(|e| e.name);
    }

    static NAME_PATTERN: OnceLock<Regex> = OnceLock::new();
    let pattern = NAME_PATTERN
        .get_or_init(|| Regex::new(r"'name': '([^']+)'").expect("country pattern is valid"));
    pattern
        .captures(raw)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
}
