use anyhow::{Context, Result};
use serde_json::{json, Value};

use filing_ingest::logging::init_logging;
use filing_ingest::types::RawRecord;
use filing_ingest::validator::SchemaValidator;

fn sample_batch() -> Result<Vec<RawRecord>> {
    let records = vec![
        json!({
            "filing_id": "TXN-LST-001", "timestamp": "2023-02-01T10:00:00Z",
            "user_id": "USRLST001", "region_code": "US-TX", "income_bracket": "70k-120k",
            "filing_type": "individual", "tax_year": 2022, "total_income": 75000.0,
        }),
        json!({
            "filing_id": "TXN-LST-002", "timestamp": "2023-02-02T11:00:00Z",
            "user_id": "USRLST002", "region_code": "US-FL", "income_bracket": "100k-200k",
            "filing_type": "joint", "tax_year": 2022,
        }),
        // Invalid timestamp
        json!({
            "filing_id": "TXN-LST-003", "timestamp": "bad_date",
            "user_id": "USRLST003", "region_code": "US-WA", "income_bracket": "50k-80k",
            "filing_type": "individual", "tax_year": 2022,
        }),
        // Invalid tax_year type
        json!({
            "filing_id": "TXN-LST-004", "timestamp": "2023-02-03T12:00:00Z",
            "user_id": "USRLST004", "region_code": "US-GA", "income_bracket": "100k-200k",
            "filing_type": "individual", "tax_year": "WRONG_YEAR_TYPE",
        }),
        // Missing user_id
        json!({
            "filing_id": "TXN-LST-005", "timestamp": "2023-02-04T13:00:00Z",
            "user_id": Value::Null, "region_code": "US-NC", "income_bracket": "40k-60k",
            "filing_type": "individual", "tax_year": 2022,
        }),
    ];

    records
        .into_iter()
        .map(|value| {
            value
                .as_object()
                .cloned()
                .context("sample record must be a JSON object")
        })
        .collect()
}

fn main() -> Result<()> {
    init_logging();

    let mut validator = SchemaValidator::new();
    validator.load_from_records(&sample_batch()?);

    println!("Validated records:");
    for record in validator.validated_data() {
        println!("{}", serde_json::to_string_pretty(record)?);
    }

    println!("\nRejected records:");
    for rejected in validator.rejected_records() {
        println!("{}", serde_json::to_string_pretty(rejected)?);
    }

    Ok(())
}
