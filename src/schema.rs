use serde::{Deserialize, Serialize};

/// The closed set of primitive types a schema field can declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    /// UTF-8 string
    Str,
    /// 64-bit signed integer
    Int,
    /// 64-bit floating point
    Float,
    /// ISO-8601 datetime string, stored verbatim after a parse check
    Timestamp,
}

impl FieldType {
    /// Returns the type name used in diagnostics
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldType::Str => "string",
            FieldType::Int => "int",
            FieldType::Float => "float",
            FieldType::Timestamp => "timestamp",
        }
    }
}

/// Immutable field schema split into required and optional subsets.
///
/// Required and optional names are disjoint; their union is the complete set
/// of recognized fields. Built once at validator construction and never
/// mutated afterwards.
#[derive(Debug, Clone)]
pub struct Schema {
    required: Vec<(&'static str, FieldType)>,
    optional: Vec<(&'static str, FieldType)>,
}

impl Schema {
    /// The fixed schema for tax filing records.
    pub fn filing() -> Self {
        Self {
            required: vec![
                ("filing_id", FieldType::Str),
                ("timestamp", FieldType::Timestamp),
                ("user_id", FieldType::Str),
                ("region_code", FieldType::Str),
                ("income_bracket", FieldType::Str),
                ("filing_type", FieldType::Str),
                ("tax_year", FieldType::Int),
            ],
            optional: vec![
                ("total_income", FieldType::Float),
                ("total_deductions", FieldType::Float),
                ("tax_owed", FieldType::Float),
                ("refund_amount", FieldType::Float),
                ("filing_method", FieldType::Str),
                ("language_preference", FieldType::Str),
            ],
        }
    }

    /// Required fields in declared order.
    pub fn required_fields(&self) -> impl Iterator<Item = (&'static str, FieldType)> + '_ {
        self.required.iter().copied()
    }

    /// All recognized fields in declared order: required first, then optional.
    pub fn all_fields(&self) -> impl Iterator<Item = (&'static str, FieldType)> + '_ {
        self.required.iter().chain(self.optional.iter()).copied()
    }

    /// Whether `field` belongs to the required subset.
    pub fn is_required(&self, field: &str) -> bool {
        self.required.iter().any(|(name, _)| *name == field)
    }

    /// Names of all recognized fields in declared order.
    pub fn field_names(&self) -> Vec<&'static str> {
        self.all_fields().map(|(name, _)| name).collect()
    }
}
