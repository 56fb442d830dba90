use indexmap::IndexMap;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// One row as handed over by the record source: field name to loosely-typed value, in column
/// order. Absent fields are treated exactly like present-but-null ones.
pub type RawRow = IndexMap<String, serde_json::Value>;

/// Twelve values in calendar order, January first.
pub type MonthlySeries = [f64; 12];

/// Entity label (e.g. a building fraction) to its monthly series, in the order the entities
/// first appear in the table.
pub type MonthlySeriesMap = IndexMap<String, MonthlySeries>;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, JsonSchema)]
#[serde(rename_all = "PascalCase")]
pub enum Category {
    #[schemars(description = "Balance carried over from the previous period (TSA / 'Saldo anterior' rows)")]
    PreviousBalance,

    #[schemars(description = "Subtotal or total line of all income ('Receitas')")]
    TotalIncome,

    #[schemars(description = "Subtotal or total line of all expenses ('Despesas')")]
    TotalExpense,

    #[schemars(description = "Closing balance of the period ('Saldo final' or the bare TOTAL line)")]
    FinalBalance,

    #[schemars(description = "An individual expense line, itemized rather than aggregated")]
    ExpenseItem,

    #[schemars(description = "Demand deposit component of the previous balance")]
    DepositOrdem,

    #[schemars(description = "Petty cash component of the previous balance")]
    NumerarioCaixa,

    #[schemars(description = "Recurring condominium fees")]
    QuotasNormais,

    #[schemars(description = "One-off condominium fees")]
    QuotasExtras,

    #[schemars(description = "Interest earned, only on income-typed rows")]
    Juros,

    #[schemars(description = "Matched no rule; ignored by aggregation")]
    Unclassified,
}

/// A ledger or entity row after normalization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerRecord {
    /// Trimmed label in its original case, used for display.
    pub account_label: String,
    /// Trimmed, upper-cased label, used for matching.
    pub match_label: String,
    /// Trimmed, upper-cased type marker (SUBTOTAL, TOTAL, SALDO, DESPESA, RECEITA...).
    pub record_type: String,
    pub amount: f64,
    pub entity_label: Option<String>,
    pub monthly_values: Option<MonthlySeries>,
}

impl LedgerRecord {
    pub fn label_contains(&self, needle: &str) -> bool {
        self.match_label.contains(needle)
    }

    pub fn label_contains_all(&self, needles: &[&str]) -> bool {
        needles.iter().all(|needle| self.match_label.contains(needle))
    }

    pub fn type_is(&self, marker: &str) -> bool {
        self.record_type == marker
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, JsonSchema)]
#[serde(rename_all = "PascalCase")]
pub enum FinalBalanceOrigin {
    /// Taken from a final-balance row of the ledger
    Reported,
    /// Computed as previous + income - expense because no final balance was found
    #[default]
    Derived,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, JsonSchema)]
pub struct Summary {
    #[serde(rename = "saldo_anterior")]
    pub previous_balance: f64,

    #[serde(rename = "total_receitas")]
    pub total_income: f64,

    #[serde(rename = "total_despesas")]
    pub total_expense: f64,

    #[serde(rename = "saldo_final")]
    pub final_balance: f64,

    #[serde(rename = "total_debitos")]
    #[schemars(description = "total_despesas + saldo_final")]
    pub total_debits: f64,

    #[serde(rename = "total_creditos")]
    #[schemars(description = "saldo_anterior + total_receitas")]
    pub total_credits: f64,

    #[schemars(description = "Whether saldo_final came from the ledger or was derived")]
    pub final_balance_origin: FinalBalanceOrigin,
}

/// Composition of the balance carried over from the previous period.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, JsonSchema)]
pub struct PreviousBalanceBreakdown {
    #[schemars(description = "Savings deposit; the ledger has no row for it, always 0.0")]
    pub deposito_poupanca: f64,
    pub deposito_ordem: f64,
    pub numerario_caixa: f64,
    pub total: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, JsonSchema)]
pub struct IncomeBreakdown {
    pub quotas_normais: f64,
    pub quotas_extras: f64,
    pub juros: f64,
    pub total: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
pub struct DetailEntry {
    #[serde(rename = "nome")]
    pub label: String,
    #[serde(rename = "valor")]
    pub amount: f64,
}

/// Everything the ledger table yields once classified and resolved.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, JsonSchema)]
pub struct LedgerSummary {
    pub summary: Summary,
    pub previous_balance_breakdown: PreviousBalanceBreakdown,
    pub income_breakdown: IncomeBreakdown,
    pub expense_details: Vec<DetailEntry>,
    pub unclassified_rows: usize,
}

/// The tables the engine knows how to ask the record source for.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum TableKind {
    Balance,
    BankMovements,
    NormalIncome,
    ExtraIncome,
    Expenses,
}

impl TableKind {
    pub const ALL: [TableKind; 5] = [
        TableKind::Balance,
        TableKind::BankMovements,
        TableKind::NormalIncome,
        TableKind::ExtraIncome,
        TableKind::Expenses,
    ];
}
