use crate::error::{LedgerError, Result};
use crate::schema::{LedgerRecord, MonthlySeries, RawRow};
use crate::series::{calendar_months, month_index, month_key};
use log::debug;
use serde_json::Value;

pub const LABEL_FIELD: &str = "conta";
pub const TYPE_FIELD: &str = "tipo";
pub const AMOUNT_FIELD: &str = "valor";

/// Looks a field up by name, falling back to a case-insensitive match.
pub fn field<'a>(row: &'a RawRow, name: &str) -> Option<&'a Value> {
    row.get(name).or_else(|| {
        row.iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value)
    })
}

/// Renders a field as trimmed text. Null, absent and composite values read as empty.
pub fn text_field(row: &RawRow, name: &str) -> String {
    match field(row, name) {
        Some(Value::String(s)) => s.trim().to_string(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => String::new(),
    }
}

/// Strict numeric coercion. Absent, null and blank values are zero; anything else that is not
/// a finite number is reported as malformed.
pub fn try_coerce_number(field_name: &str, value: Option<&Value>) -> Result<f64> {
    let malformed = |raw: String| LedgerError::MalformedValue {
        field: field_name.to_string(),
        value: raw,
    };

    match value {
        None | Some(Value::Null) => Ok(0.0),
        Some(Value::Number(n)) => n
            .as_f64()
            .filter(|v| v.is_finite())
            .ok_or_else(|| malformed(n.to_string())),
        Some(Value::String(s)) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return Ok(0.0);
            }
            trimmed
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .ok_or_else(|| malformed(s.clone()))
        }
        Some(other) => Err(malformed(other.to_string())),
    }
}

/// Lenient numeric coercion used throughout the engine: malformed input degrades to `0.0`.
pub fn coerce_number(field_name: &str, value: Option<&Value>) -> f64 {
    match try_coerce_number(field_name, value) {
        Ok(v) => v,
        Err(e) => {
            debug!("{}; treating as 0.0", e);
            0.0
        }
    }
}

pub fn monthly_values(row: &RawRow) -> MonthlySeries {
    let mut series = [0.0; 12];
    for month in calendar_months() {
        let key = month_key(month);
        series[month_index(month)] = coerce_number(key, field(row, key));
    }
    series
}

pub fn normalize_ledger_row(row: &RawRow) -> LedgerRecord {
    let account_label = text_field(row, LABEL_FIELD);
    let match_label = account_label.to_uppercase();
    let record_type = text_field(row, TYPE_FIELD).to_uppercase();
    let amount = coerce_number(AMOUNT_FIELD, field(row, AMOUNT_FIELD));

    LedgerRecord {
        account_label,
        match_label,
        record_type,
        amount,
        entity_label: None,
        monthly_values: None,
    }
}

pub fn normalize_ledger_rows(rows: &[RawRow]) -> Vec<LedgerRecord> {
    rows.iter().map(normalize_ledger_row).collect()
}

/// Normalizes a row of an entity/month table. `label_field` names the column that holds the
/// entity label (`fraccao` for income tables, `despesas` for the expense table).
pub fn normalize_entity_row(row: &RawRow, label_field: &str) -> LedgerRecord {
    let label = text_field(row, label_field);
    let match_label = label.to_uppercase();
    let entity_label = if label.is_empty() {
        None
    } else {
        Some(label.clone())
    };

    LedgerRecord {
        account_label: label,
        match_label,
        record_type: String::new(),
        amount: 0.0,
        entity_label,
        monthly_values: Some(monthly_values(row)),
    }
}

pub fn normalize_entity_rows(rows: &[RawRow], label_field: &str) -> Vec<LedgerRecord> {
    rows.iter()
        .map(|row| normalize_entity_row(row, label_field))
        .collect()
}

/// Lower-cases field names the way the table reader hands them to the engine.
pub fn lowercase_field_names(row: RawRow) -> RawRow {
    row.into_iter()
        .map(|(key, value)| (key.to_lowercase(), value))
        .collect()
}
