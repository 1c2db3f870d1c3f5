use std::fs::File;
use std::path::Path;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde_json::Value;
use tracing::{error, info, warn};

use crate::error::{RejectReason, Result};
use crate::schema::{FieldType, Schema};
use crate::types::{RawRecord, RejectedRecord, ValidatedRecord};

/// Validates raw records against the filing schema and partitions each
/// ingestion batch into validated and rejected collections.
///
/// Each instance owns its result collections exclusively. Every call to
/// [`load_from_csv`](Self::load_from_csv) or
/// [`load_from_records`](Self::load_from_records) replaces the previous
/// results; nothing is appended across batches.
pub struct SchemaValidator {
    schema: Schema,
    raw_data: Vec<RawRecord>,
    validated: Vec<ValidatedRecord>,
    rejected: Vec<RejectedRecord>,
}

impl Default for SchemaValidator {
    fn default() -> Self {
        Self::new()
    }
}

impl SchemaValidator {
    pub fn new() -> Self {
        info!("schema validator initialized");
        Self {
            schema: Schema::filing(),
            raw_data: Vec::new(),
            validated: Vec::new(),
            rejected: Vec::new(),
        }
    }

    /// Validates a single record: required-field presence first, then type
    /// coercion over every recognized field that carries a value.
    ///
    /// The first failure rejects the whole record; no partial output is kept.
    pub fn validate_record(
        &self,
        record_number: usize,
        record: &RawRecord,
    ) -> std::result::Result<ValidatedRecord, RejectReason> {
        for (field, _) in self.schema.required_fields() {
            if record.get(field).map_or(true, is_empty) {
                warn!(record_number, field, "missing required field, skipping record");
                return Err(RejectReason::MissingRequiredField(field.to_string()));
            }
        }

        let mut validated = ValidatedRecord::new();
        for (field, field_type) in self.schema.all_fields() {
            match record.get(field).filter(|value| !is_empty(value)) {
                Some(value) => match coerce(value, field_type) {
                    Some(coerced) => {
                        validated.insert(field.to_string(), coerced);
                    }
                    None => {
                        warn!(
                            record_number,
                            field,
                            expected = field_type.type_name(),
                            %value,
                            "invalid data type, skipping record"
                        );
                        return Err(RejectReason::InvalidFieldType(field.to_string()));
                    }
                },
                // Required fields already passed the presence check above;
                // kept as a guard against inconsistent input.
                None if self.schema.is_required(field) => {
                    warn!(record_number, field, "required field resolved empty, skipping record");
                    return Err(RejectReason::EmptyRequiredField(field.to_string()));
                }
                None => {}
            }
        }

        Ok(validated)
    }

    /// Ingests a delimited file with a header row naming schema fields.
    ///
    /// Rows where every column is empty are discarded before validation.
    /// Source-level failures are contained: an unopenable file yields empty
    /// collections, and a mid-stream read failure keeps whatever rows were
    /// already consumed. Nothing propagates to the caller.
    pub fn load_from_csv(&mut self, path: impl AsRef<Path>) {
        let path = path.as_ref();
        info!(path = %path.display(), "loading records from CSV");
        self.reset();

        match read_rows(path) {
            Ok(rows) => {
                info!(count = rows.len(), path = %path.display(), "read non-empty rows");
                self.ingest(rows);
            }
            Err(e) => {
                error!(path = %path.display(), error = %e, "failed to load CSV source");
            }
        }
    }

    /// Ingests an in-memory batch. Every supplied mapping is copied; the
    /// caller's structures are never aliased or mutated.
    pub fn load_from_records(&mut self, records: &[RawRecord]) {
        info!(count = records.len(), "loading records from memory");
        self.reset();
        self.ingest(records.to_vec());
    }

    /// Records that passed validation, in input order.
    pub fn validated_data(&self) -> &[ValidatedRecord] {
        &self.validated
    }

    /// Records rejected during the last ingestion, with reasons.
    pub fn rejected_records(&self) -> &[RejectedRecord] {
        &self.rejected
    }

    /// Raw records captured by the last ingestion call.
    pub fn raw_data(&self) -> &[RawRecord] {
        &self.raw_data
    }

    fn reset(&mut self) {
        self.raw_data.clear();
        self.validated.clear();
        self.rejected.clear();
    }

    fn ingest(&mut self, rows: Vec<RawRecord>) {
        self.raw_data = rows;
        for (i, record) in self.raw_data.iter().enumerate() {
            let record_number = i + 1;
            match self.validate_record(record_number, record) {
                Ok(validated) => self.validated.push(validated),
                Err(reason) => self.rejected.push(RejectedRecord {
                    record_number,
                    data: record.clone(),
                    reason,
                }),
            }
        }
        info!(
            validated = self.validated.len(),
            rejected = self.rejected.len(),
            "ingestion complete"
        );
    }
}

/// Reads all non-blank rows from a delimited file into raw records keyed by
/// header name. Row-level read failures stop consumption but keep the rows
/// read so far; only an open/header failure is an error.
fn read_rows(path: &Path) -> Result<Vec<RawRecord>> {
    let file = File::open(path)?;
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(file);
    let headers = reader.headers()?.clone();

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = match result {
            Ok(record) => record,
            Err(e) => {
                warn!(error = %e, "stopping row consumption after read failure");
                break;
            }
        };

        // Blank rows are padding, not data
        if record.iter().all(|value| value.is_empty()) {
            continue;
        }

        let mut row = RawRecord::new();
        for (name, value) in headers.iter().zip(record.iter()) {
            row.insert(name.to_string(), Value::String(value.to_string()));
        }
        rows.push(row);
    }

    Ok(rows)
}

/// A value counts as empty when it is null or an empty string. Numeric zero
/// and `false` are values, not gaps.
fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        _ => false,
    }
}

/// Coerces a raw value to its declared type, or `None` when it cannot be
/// represented as that type.
fn coerce(value: &Value, field_type: FieldType) -> Option<Value> {
    match field_type {
        // The original string is stored unchanged; parsing is only a check
        FieldType::Timestamp => {
            let s = value.as_str()?;
            parses_as_timestamp(s).then(|| value.clone())
        }
        FieldType::Int => coerce_int(value),
        FieldType::Float => coerce_float(value),
        FieldType::Str => coerce_str(value),
    }
}

/// Accepts RFC 3339 datetimes (trailing `Z` as UTC), naive datetimes with a
/// `T` or space separator, and bare dates.
fn parses_as_timestamp(s: &str) -> bool {
    DateTime::parse_from_rfc3339(s).is_ok()
        || s.parse::<NaiveDateTime>().is_ok()
        || NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f").is_ok()
        || s.parse::<NaiveDate>().is_ok()
}

fn coerce_int(value: &Value) -> Option<Value> {
    match value {
        Value::Number(n) => n.as_i64().map(Value::from),
        Value::String(s) => s.trim().parse::<i64>().ok().map(Value::from),
        _ => None,
    }
}

fn coerce_float(value: &Value) -> Option<Value> {
    match value {
        Value::Number(n) => n.as_f64().filter(|f| f.is_finite()).map(Value::from),
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|f| f.is_finite())
            .map(Value::from),
        _ => None,
    }
}

fn coerce_str(value: &Value) -> Option<Value> {
    match value {
        Value::String(_) => Some(value.clone()),
        Value::Number(n) => Some(Value::String(n.to_string())),
        Value::Bool(b) => Some(Value::String(b.to_string())),
        _ => None,
    }
}
