use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::RejectReason;

/// A raw record as supplied by a source, keyed by field name. Values are
/// strings when file-sourced and arbitrary JSON values when supplied from
/// memory.
pub type RawRecord = Map<String, Value>;

/// A record that passed validation, with every value coerced to its declared
/// type. Optional fields absent from the input are absent here too.
pub type ValidatedRecord = Map<String, Value>;

/// A record that failed validation, with enough context to audit the batch.
#[derive(Debug, Clone, Serialize)]
pub struct RejectedRecord {
    /// 1-based position among the non-blank records of the batch
    pub record_number: usize,
    /// The unmodified raw record
    pub data: RawRecord,
    /// Why the record was rejected
    pub reason: RejectReason,
}
