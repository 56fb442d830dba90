//! Report-specific shapes handed to the presentation layer.
//!
//! Nothing here recomputes ledger figures; the builders only restructure what the resolver and
//! the series extractor produced. Keys follow the names the report templates expect.

use crate::schema::{
    DetailEntry, FinalBalanceOrigin, IncomeBreakdown, LedgerSummary, MonthlySeries,
    MonthlySeriesMap, PreviousBalanceBreakdown, RawRow, Summary,
};
use indexmap::IndexMap;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Figures formatted with two decimals, as shown on the landing page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
pub struct OverviewView {
    pub saldo_anterior: String,
    pub total_receitas: String,
    pub total_despesas: String,
    pub saldo_final: String,
}

impl Default for OverviewView {
    fn default() -> Self {
        overview(&Summary::default())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, JsonSchema)]
pub struct BalanceSheetView {
    #[schemars(description = "Itemized expense lines in ledger order")]
    pub despesas: Vec<DetailEntry>,
    pub total_despesas: f64,
    pub saldo_anterior: PreviousBalanceBreakdown,
    pub receitas: IncomeBreakdown,
    pub saldo_final: f64,
    pub final_balance_origin: FinalBalanceOrigin,
    pub total_debitos: f64,
    pub total_creditos: f64,
}

impl BalanceSheetView {
    pub fn generate_json_schema() -> schemars::schema::RootSchema {
        schemars::schema_for!(BalanceSheetView)
    }

    pub fn schema_as_json() -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&Self::generate_json_schema())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, JsonSchema)]
pub struct BalanceComposition {
    pub saldo_anterior: f64,
    pub total_receitas: f64,
    pub total_despesas: f64,
    #[schemars(description = "Result of the period: total_receitas - total_despesas")]
    pub saldo_corrente: f64,
    pub saldo_final: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
pub struct DashboardView {
    #[schemars(description = "Normal income per fraction, twelve months from January")]
    pub rec_n_fracoes: MonthlySeriesMap,
    #[schemars(description = "Extraordinary income per fraction, twelve months from January")]
    pub rec_e_fracoes: MonthlySeriesMap,
    #[schemars(description = "Expense totals per month taken from the TOTAIS row")]
    pub despesas_mensais: MonthlySeries,
    pub balanco: BalanceComposition,
}

impl Default for DashboardView {
    fn default() -> Self {
        Self {
            rec_n_fracoes: MonthlySeriesMap::new(),
            rec_e_fracoes: MonthlySeriesMap::new(),
            despesas_mensais: [0.0; 12],
            balanco: BalanceComposition::default(),
        }
    }
}

impl DashboardView {
    pub fn generate_json_schema() -> schemars::schema::RootSchema {
        schemars::schema_for!(DashboardView)
    }

    pub fn schema_as_json() -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&Self::generate_json_schema())
    }
}

/// A listing table where null and zero cells render as empty. Cells keep the source's column order.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct TableView {
    pub rows: Vec<IndexMap<String, Option<Value>>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SourceDiagnostics {
    pub table: String,
    pub exists: bool,
    pub location: String,
    pub total_rows: usize,
    pub fields: Vec<String>,
    pub preview: Vec<RawRow>,
    pub error: Option<String>,
}

pub fn format_amount(value: f64) -> String {
    format!("{:.2}", value)
}

pub fn overview(summary: &Summary) -> OverviewView {
    OverviewView {
        saldo_anterior: format_amount(summary.previous_balance),
        total_receitas: format_amount(summary.total_income),
        total_despesas: format_amount(summary.total_expense),
        saldo_final: format_amount(summary.final_balance),
    }
}

pub fn balance_sheet(ledger: &LedgerSummary) -> BalanceSheetView {
    let summary = &ledger.summary;
    BalanceSheetView {
        despesas: ledger.expense_details.clone(),
        total_despesas: summary.total_expense,
        saldo_anterior: ledger.previous_balance_breakdown.clone(),
        receitas: ledger.income_breakdown.clone(),
        saldo_final: summary.final_balance,
        final_balance_origin: summary.final_balance_origin,
        total_debitos: summary.total_debits,
        total_creditos: summary.total_credits,
    }
}

pub fn balance_composition(summary: &Summary) -> BalanceComposition {
    BalanceComposition {
        saldo_anterior: summary.previous_balance,
        total_receitas: summary.total_income,
        total_despesas: summary.total_expense,
        saldo_corrente: summary.total_income - summary.total_expense,
        saldo_final: summary.final_balance,
    }
}

pub fn dashboard(
    summary: &Summary,
    normal_income: MonthlySeriesMap,
    extra_income: MonthlySeriesMap,
    expenses_by_month: MonthlySeries,
) -> DashboardView {
    DashboardView {
        rec_n_fracoes: normal_income,
        rec_e_fracoes: extra_income,
        despesas_mensais: expenses_by_month,
        balanco: balance_composition(summary),
    }
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Number(n) => n.as_f64() == Some(0.0),
        _ => false,
    }
}

pub fn table_view(rows: Vec<RawRow>) -> TableView {
    let rows: Vec<IndexMap<String, Option<Value>>> = rows
        .into_iter()
        .map(|row| {
            row.into_iter()
                .map(|(key, value)| {
                    let cell = if is_blank(&value) { None } else { Some(value) };
                    (key, cell)
                })
                .collect()
        })
        .collect();

    TableView { rows }
}

pub fn diagnostics(
    table: &str,
    location: String,
    exists: bool,
    rows: &[RawRow],
    preview_rows: usize,
) -> SourceDiagnostics {
    SourceDiagnostics {
        table: table.to_string(),
        exists,
        location,
        total_rows: rows.len(),
        fields: rows
            .first()
            .map(|row| row.keys().cloned().collect())
            .unwrap_or_default(),
        preview: rows.iter().take(preview_rows).cloned().collect(),
        error: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_summary() -> Summary {
        Summary {
            previous_balance: 100.0,
            total_income: 50.0,
            total_expense: 30.0,
            final_balance: 120.0,
            total_debits: 150.0,
            total_credits: 150.0,
            final_balance_origin: FinalBalanceOrigin::Derived,
        }
    }

    #[test]
    fn test_overview_formats_two_decimals() {
        let view = overview(&sample_summary());
        assert_eq!(view.saldo_anterior, "100.00");
        assert_eq!(view.total_receitas, "50.00");
        assert_eq!(view.total_despesas, "30.00");
        assert_eq!(view.saldo_final, "120.00");
        assert_eq!(format_amount(2.5), "2.50");
        assert_eq!(format_amount(-3.0), "-3.00");
    }

    #[test]
    fn test_default_overview_is_all_zero() {
        let view = OverviewView::default();
        assert_eq!(view.saldo_anterior, "0.00");
        assert_eq!(view.saldo_final, "0.00");
    }

    #[test]
    fn test_dashboard_composition() {
        let view = dashboard(
            &sample_summary(),
            MonthlySeriesMap::new(),
            MonthlySeriesMap::new(),
            [1.0; 12],
        );
        assert_eq!(view.balanco.saldo_corrente, 20.0);
        assert_eq!(view.balanco.saldo_final, 120.0);
        assert_eq!(view.despesas_mensais, [1.0; 12]);
    }

    #[test]
    fn test_table_view_blanks_null_and_zero() {
        let rows: Vec<RawRow> = serde_json::from_value(json!([
            {"fraccao": "A", "jan": 0, "fev": 0.0, "mar": null, "abr": 12.5, "mai": "0"}
        ]))
        .unwrap();

        let view = table_view(rows);
        let row = &view.rows[0];
        assert_eq!(row["fraccao"], Some(json!("A")));
        assert_eq!(row["jan"], None);
        assert_eq!(row["fev"], None);
        assert_eq!(row["mar"], None);
        assert_eq!(row["abr"], Some(json!(12.5)));
        assert_eq!(row["mai"], Some(json!("0")));
    }

    #[test]
    fn test_diagnostics_preview_and_fields() {
        let rows: Vec<RawRow> = serde_json::from_value(json!([
            {"data": "2024-01-01", "valor": 1},
            {"data": "2024-01-02", "valor": 2},
            {"data": "2024-01-03", "valor": 3},
            {"data": "2024-01-04", "valor": 4}
        ]))
        .unwrap();

        let diag = diagnostics("Bancos", "memory://Bancos".to_string(), true, &rows, 3);
        assert_eq!(diag.total_rows, 4);
        assert_eq!(diag.fields, vec!["data".to_string(), "valor".to_string()]);
        assert_eq!(diag.preview.len(), 3);
        assert!(diag.error.is_none());
    }

    #[test]
    fn test_diagnostics_fields_follow_column_order() {
        let rows: Vec<RawRow> = serde_json::from_value(json!([
            {"valor": 10, "descricao": "Agua", "data": "2024-01-01"}
        ]))
        .unwrap();

        let diag = diagnostics("Bancos", "memory://Bancos".to_string(), true, &rows, 3);
        assert_eq!(diag.fields, vec!["valor", "descricao", "data"]);

        let view = table_view(rows);
        let columns: Vec<&str> = view.rows[0].keys().map(String::as_str).collect();
        assert_eq!(columns, vec!["valor", "descricao", "data"]);
    }

    #[test]
    fn test_schema_generation() {
        let balance = BalanceSheetView::schema_as_json().unwrap();
        assert!(balance.contains("total_debitos"));
        assert!(balance.contains("despesas"));

        let dashboard = DashboardView::schema_as_json().unwrap();
        assert!(dashboard.contains("rec_n_fracoes"));
        assert!(dashboard.contains("saldo_corrente"));
    }
}
