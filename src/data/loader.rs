use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use arrow::array::{Array, AsArray};
use arrow::datatypes::{DataType, Float32Type, Float64Type, Int32Type, Int64Type};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde::Deserialize;

use super::model::{LaunchDataset, LaunchRecord, Outcome};

/// Source column headers (the original dataset's names).
pub const COL_SITE: &str = "Launch Site";
pub const COL_PAYLOAD: &str = "Payload Mass (kg)";
pub const COL_CLASS: &str = "class";
pub const COL_BOOSTER_CATEGORY: &str = "Booster Version Category";
pub const COL_FLIGHT_NUMBER: &str = "Flight Number";
pub const COL_BOOSTER_VERSION: &str = "Booster Version";

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a launch dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row with the source column names (extra columns ignored)
/// * `.json`    – `[{ "Launch Site": ..., "Payload Mass (kg)": ..., "class": 1, ... }, ...]`
/// * `.parquet` – scalar columns with the same names
///
/// Any malformed row fails the whole load.
pub fn load_file(path: &Path) -> Result<LaunchDataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let dataset = match ext.as_str() {
        "csv" => load_csv(path),
        "json" => load_json(path),
        "parquet" | "pq" => load_parquet(path),
        other => bail!("Unsupported file extension: .{other}"),
    }
    .with_context(|| format!("loading launch records from {}", path.display()))?;

    log::info!(
        "Loaded {} launches across {} sites (payload {:.1}..{:.1} kg)",
        dataset.len(),
        dataset.sites().len(),
        dataset.payload_range().min,
        dataset.payload_range().max
    );
    Ok(dataset)
}

// ---------------------------------------------------------------------------
// Row-oriented formats (CSV / JSON)
// ---------------------------------------------------------------------------

/// One raw row as it appears in CSV or records-oriented JSON.
#[derive(Debug, Deserialize)]
struct RawRecord {
    #[serde(rename = "Launch Site")]
    site: String,
    #[serde(rename = "Payload Mass (kg)")]
    payload_mass_kg: f64,
    #[serde(rename = "class")]
    class: i64,
    #[serde(rename = "Booster Version Category", default)]
    booster_category: Option<String>,
    #[serde(rename = "Flight Number", default)]
    flight_number: Option<u32>,
    #[serde(rename = "Booster Version", default)]
    booster_version: Option<String>,
}

impl TryFrom<RawRecord> for LaunchRecord {
    type Error = anyhow::Error;

    fn try_from(raw: RawRecord) -> Result<Self> {
        let outcome = Outcome::from_class(raw.class)?;
        Ok(LaunchRecord::new(
            raw.site,
            raw.payload_mass_kg,
            outcome,
            raw.booster_category.unwrap_or_default(),
        )?
        .with_flight_number(raw.flight_number)
        .with_booster_version(raw.booster_version))
    }
}

fn load_csv(path: &Path) -> Result<LaunchDataset> {
    let mut reader = csv::Reader::from_path(path).context("opening CSV")?;
    let headers = reader.headers().context("reading CSV headers")?.clone();
    for required in [COL_SITE, COL_PAYLOAD, COL_CLASS] {
        if !headers.iter().any(|h| h == required) {
            bail!("CSV missing '{required}' column");
        }
    }

    let mut records = Vec::new();
    for (row_no, result) in reader.deserialize::<RawRecord>().enumerate() {
        let raw = result.with_context(|| format!("CSV row {row_no}"))?;
        let record = LaunchRecord::try_from(raw).with_context(|| format!("CSV row {row_no}"))?;
        records.push(record);
    }

    LaunchDataset::from_records(records)
}

fn load_json(path: &Path) -> Result<LaunchDataset> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let rows: Vec<RawRecord> =
        serde_json::from_str(&text).context("Expected a JSON array of launch records")?;

    let records = rows
        .into_iter()
        .enumerate()
        .map(|(i, raw)| LaunchRecord::try_from(raw).with_context(|| format!("JSON row {i}")))
        .collect::<Result<Vec<_>>>()?;

    LaunchDataset::from_records(records)
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file of launch records.
///
/// Expected schema:
/// - `Launch Site`, `Booster Version Category`, `Booster Version`: Utf8 or LargeUtf8
/// - `Payload Mass (kg)`: any integer or float column
/// - `class`: integer, float or boolean
/// - `Flight Number`: optional integer
///
/// Works with files written by both Pandas and Polars.
fn load_parquet(path: &Path) -> Result<LaunchDataset> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut records = Vec::new();
    let mut row_offset = 0usize;

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let schema = batch.schema();

        let required = |name: &str| {
            schema
                .index_of(name)
                .map_err(|_| anyhow::anyhow!("Parquet file missing '{name}' column"))
        };
        let site_col = batch.column(required(COL_SITE)?);
        let payload_col = batch.column(required(COL_PAYLOAD)?);
        let class_col = batch.column(required(COL_CLASS)?);
        let booster_col = schema
            .index_of(COL_BOOSTER_CATEGORY)
            .ok()
            .map(|i| batch.column(i));
        let flight_col = schema.index_of(COL_FLIGHT_NUMBER).ok().map(|i| batch.column(i));
        let version_col = schema
            .index_of(COL_BOOSTER_VERSION)
            .ok()
            .map(|i| batch.column(i));

        for row in 0..batch.num_rows() {
            let row_no = row_offset + row;
            let record = (|| -> Result<LaunchRecord> {
                let site = extract_string(site_col, row)?.context("null launch site")?;
                let payload = extract_f64(payload_col, row)?.context("null payload mass")?;
                let class = extract_f64(class_col, row)?.context("null class")?;
                if class.fract() != 0.0 {
                    bail!("class must be 0 or 1, got {class}");
                }
                let outcome = Outcome::from_class(class as i64)?;
                let booster = match booster_col {
                    Some(col) => extract_string(col, row)?.unwrap_or_default(),
                    None => String::new(),
                };
                let flight_number = match flight_col {
                    Some(col) => match extract_f64(col, row)? {
                        Some(v) if v < 0.0 || v.fract() != 0.0 || v > f64::from(u32::MAX) => {
                            bail!("flight number must be a non-negative integer, got {v}")
                        }
                        v => v.map(|v| v as u32),
                    },
                    None => None,
                };
                let booster_version = match version_col {
                    Some(col) => extract_string(col, row)?,
                    None => None,
                };
                Ok(LaunchRecord::new(site, payload, outcome, booster)?
                    .with_flight_number(flight_number)
                    .with_booster_version(booster_version))
            })()
            .with_context(|| format!("Parquet row {row_no}"))?;
            records.push(record);
        }
        row_offset += batch.num_rows();
    }

    LaunchDataset::from_records(records)
}

// -- Parquet / Arrow helpers --

/// Read a string cell. `Ok(None)` for a null.
fn extract_string(col: &Arc<dyn Array>, row: usize) -> Result<Option<String>> {
    if col.is_null(row) {
        return Ok(None);
    }
    let value = match col.data_type() {
        DataType::Utf8 => col.as_string::<i32>().value(row).to_string(),
        DataType::LargeUtf8 => col.as_string::<i64>().value(row).to_string(),
        other => bail!("Expected a string column, got {other:?}"),
    };
    Ok(Some(value))
}

/// Read a numeric cell as `f64`. Booleans map to 0/1. `Ok(None)` for a null.
fn extract_f64(col: &Arc<dyn Array>, row: usize) -> Result<Option<f64>> {
    if col.is_null(row) {
        return Ok(None);
    }
    let value = match col.data_type() {
        DataType::Int32 => col.as_primitive::<Int32Type>().value(row) as f64,
        DataType::Int64 => col.as_primitive::<Int64Type>().value(row) as f64,
        DataType::Float32 => col.as_primitive::<Float32Type>().value(row) as f64,
        DataType::Float64 => col.as_primitive::<Float64Type>().value(row),
        DataType::Boolean => {
            if col.as_boolean().value(row) {
                1.0
            } else {
                0.0
            }
        }
        other => bail!("Expected a numeric column, got {other:?}"),
    };
    Ok(Some(value))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use arrow::array::{ArrayRef, Float64Array, Int64Array, StringArray};
    use arrow::datatypes::{Field, Schema};
    use arrow::record_batch::RecordBatch;
    use parquet::arrow::ArrowWriter;

    use super::*;

    fn write_temp(suffix: &str, contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    fn write_parquet(fields: Vec<Field>, columns: Vec<ArrayRef>) -> tempfile::NamedTempFile {
        let schema = Arc::new(Schema::new(fields));
        let batch = RecordBatch::try_new(schema.clone(), columns).unwrap();

        let file = tempfile::Builder::new().suffix(".parquet").tempfile().unwrap();
        let mut writer = ArrowWriter::try_new(file.reopen().unwrap(), schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();
        file
    }

    #[test]
    fn csv_with_pandas_index_and_extra_columns_loads() {
        let file = write_temp(
            ".csv",
            ",Flight Number,Launch Site,class,Payload Mass (kg),Booster Version,Booster Version Category\n\
             0,1,CCAFS LC-40,0,0.0,F9 v1.0  B0003,v1.0\n\
             1,2,KSC LC-39A,1,525.0,F9 FT B1031.1,FT\n\
             2,3,CCAFS LC-40,1,677.0,,\n",
        );

        let ds = load_file(file.path()).unwrap();
        assert_eq!(ds.len(), 3);
        assert_eq!(ds.sites(), ["CCAFS LC-40", "KSC LC-39A"]);

        let second = &ds.records()[1];
        assert_eq!(second.outcome, Outcome::Success);
        assert_eq!(second.flight_number, Some(2));
        assert_eq!(second.booster_version.as_deref(), Some("F9 FT B1031.1"));

        let third = &ds.records()[2];
        assert_eq!(third.booster_category, "Unknown");
        assert_eq!(third.booster_version, None);
    }

    #[test]
    fn csv_missing_required_column_fails() {
        let file = write_temp(".csv", "Launch Site,class\nA,1\n");
        let err = load_file(file.path()).unwrap_err();
        assert!(format!("{err:#}").contains("Payload Mass (kg)"));
    }

    #[test]
    fn csv_bad_class_fails_with_row_context() {
        let file = write_temp(
            ".csv",
            "Launch Site,class,Payload Mass (kg)\nA,1,100\nA,3,200\n",
        );
        let err = format!("{:#}", load_file(file.path()).unwrap_err());
        assert!(err.contains("CSV row 1"), "{err}");
    }

    #[test]
    fn json_records_load() {
        let file = write_temp(
            ".json",
            r#"[
                {"Launch Site": "VAFB SLC-4E", "Payload Mass (kg)": 500, "class": 0,
                 "Booster Version Category": "v1.1"},
                {"Launch Site": "VAFB SLC-4E", "Payload Mass (kg)": 9600.0, "class": 1,
                 "Booster Version Category": "B4", "Flight Number": null}
            ]"#,
        );
        let ds = load_file(file.path()).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.payload_range().max, 9600.0);
    }

    #[test]
    fn parquet_records_load() {
        let file = write_parquet(
            vec![
                Field::new(COL_SITE, DataType::Utf8, false),
                Field::new(COL_PAYLOAD, DataType::Float64, false),
                Field::new(COL_CLASS, DataType::Int64, false),
                Field::new(COL_BOOSTER_CATEGORY, DataType::Utf8, true),
                Field::new(COL_FLIGHT_NUMBER, DataType::Float64, true),
            ],
            vec![
                Arc::new(StringArray::from(vec!["A", "B"])),
                Arc::new(Float64Array::from(vec![100.0, 2000.0])),
                Arc::new(Int64Array::from(vec![1, 0])),
                Arc::new(StringArray::from(vec![Some("FT"), None])),
                Arc::new(Float64Array::from(vec![Some(7.0), None])),
            ],
        );

        let ds = load_file(file.path()).unwrap();
        assert_eq!(ds.sites(), ["A", "B"]);
        assert_eq!(ds.records()[0].outcome, Outcome::Success);
        assert_eq!(ds.records()[0].flight_number, Some(7));
        assert_eq!(ds.records()[1].booster_category, "Unknown");
        assert_eq!(ds.records()[1].flight_number, None);
    }

    #[test]
    fn parquet_rejects_fractional_or_negative_flight_number() {
        for bad in [-1.0, 2.5] {
            let file = write_parquet(
                vec![
                    Field::new(COL_SITE, DataType::Utf8, false),
                    Field::new(COL_PAYLOAD, DataType::Float64, false),
                    Field::new(COL_CLASS, DataType::Int64, false),
                    Field::new(COL_FLIGHT_NUMBER, DataType::Float64, false),
                ],
                vec![
                    Arc::new(StringArray::from(vec!["A"])),
                    Arc::new(Float64Array::from(vec![100.0])),
                    Arc::new(Int64Array::from(vec![1])),
                    Arc::new(Float64Array::from(vec![bad])),
                ],
            );
            let err = format!("{:#}", load_file(file.path()).unwrap_err());
            assert!(err.contains("Parquet row 0"), "{err}");
            assert!(err.contains("flight number"), "{err}");
        }
    }

    #[test]
    fn unsupported_extension_fails() {
        let file = write_temp(".xlsx", "");
        assert!(load_file(file.path()).is_err());
    }

    #[test]
    fn header_only_file_fails() {
        let file = write_temp(".csv", "Launch Site,class,Payload Mass (kg)\n");
        assert!(load_file(file.path()).is_err());
    }
}
