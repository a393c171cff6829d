//! Attribute-equality filtering over validated records.

use thiserror::Error;

use crate::record::{FieldValue, Record};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FilterError {
    /// A criterion names a field the record does not have.
    #[error("{schema} record does not have field {field}")]
    UnknownField {
        /// Schema of the offending record.
        schema: String,
        /// The field named by the criterion.
        field: String,
    },
}

/// Keep the records whose fields equal every `(field, value)` criterion.
///
/// Numbers compare numerically. An empty criteria list keeps everything.
///
/// # Errors
///
/// Returns [`FilterError::UnknownField`] when a criterion names a field that
/// a record lacks.
pub fn filter_records<'a>(
    records: &'a [Record],
    criteria: &[(&str, FieldValue)],
) -> Result<Vec<&'a Record>, FilterError> {
    let mut kept = Vec::new();
    'records: for record in records {
        for (field, wanted) in criteria {
            let actual = record.get(field).ok_or_else(|| FilterError::UnknownField {
                schema: record.schema_name().to_string(),
                field: field.to_string(),
            })?;
            if !actual.matches(wanted) {
                continue 'records;
            }
        }
        kept.push(record);
    }
    Ok(kept)
}
