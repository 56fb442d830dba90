use crate::ingestion::normalize_entity_rows;
use crate::schema::{LedgerRecord, MonthlySeries, MonthlySeriesMap, RawRow};
use chrono::Month;
use log::debug;

/// Field names of the month columns, January first.
pub const MONTH_KEYS: [&str; 12] = [
    "jan", "fev", "mar", "abr", "mai", "jun", "jul", "ago", "set", "out", "nov", "dez",
];

/// Label of the aggregate row closing every entity/month table.
pub const AGGREGATE_LABEL: &str = "TOTAIS";

/// Column holding the entity label in the income tables.
pub const ENTITY_LABEL_FIELD: &str = "fraccao";

/// Column holding the row label in the expense-by-month table.
pub const EXPENSE_LABEL_FIELD: &str = "despesas";

/// January through December.
pub fn calendar_months() -> impl Iterator<Item = Month> {
    (1..=12u8).filter_map(|n| Month::try_from(n).ok())
}

/// Position of a month inside a [`MonthlySeries`].
pub fn month_index(month: Month) -> usize {
    month.number_from_month() as usize - 1
}

pub fn month_key(month: Month) -> &'static str {
    MONTH_KEYS[month_index(month)]
}

fn is_aggregate(label: &str) -> bool {
    label.trim().eq_ignore_ascii_case(AGGREGATE_LABEL)
}

/// Builds the per-entity map in row order, skipping unlabelled and aggregate rows. A label seen
/// twice keeps its first position and takes the later series.
pub fn entity_series(records: &[LedgerRecord]) -> MonthlySeriesMap {
    let mut map = MonthlySeriesMap::new();

    for record in records {
        let Some(label) = record.entity_label.as_deref() else {
            continue;
        };
        if is_aggregate(label) {
            continue;
        }
        let values = record.monthly_values.unwrap_or([0.0; 12]);
        if map.insert(label.to_string(), values).is_some() {
            debug!("Entity '{}' appears more than once; taking the later row's values", label);
        }
    }

    map
}

/// The first aggregate row's series, or twelve zeros when the table has none.
pub fn aggregate_series(records: &[LedgerRecord]) -> MonthlySeries {
    records
        .iter()
        .find(|record| is_aggregate(&record.account_label))
        .and_then(|record| record.monthly_values)
        .unwrap_or([0.0; 12])
}

pub fn extract_entity_series(rows: &[RawRow]) -> MonthlySeriesMap {
    entity_series(&normalize_entity_rows(rows, ENTITY_LABEL_FIELD))
}

pub fn extract_expense_series(rows: &[RawRow]) -> MonthlySeries {
    aggregate_series(&normalize_entity_rows(rows, EXPENSE_LABEL_FIELD))
}
