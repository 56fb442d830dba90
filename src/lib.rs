//! # Condo Ledger
//!
//! A library for turning a condominium's semi-structured ledger tables into canonical balance
//! figures, itemized breakdowns and monthly series for reporting.
//!
//! ## Core Concepts
//!
//! - **Ledger rows**: free-text account label (`conta`), coarse type marker (`tipo`), amount (`valor`)
//! - **Classification**: one priority-ordered rule table maps every row onto a [`Category`]
//! - **Slots**: classified amounts overwrite a named slot; they are never summed
//! - **Fallback**: a missing final balance is derived as previous + income - expense
//! - **Monthly series**: entity tables (`fraccao` + `jan`..`dez`) become twelve-value series,
//!   with the `TOTAIS` aggregate row kept apart
//!
//! ## Example
//!
//! ```rust,ignore
//! use condo_ledger::*;
//! use serde_json::json;
//!
//! let rows: Vec<RawRow> = serde_json::from_value(json!([
//!     {"conta": "TSA", "tipo": "SUBTOTAL", "valor": 100},
//!     {"conta": "TOTAL RECEITAS", "tipo": "TOTAL", "valor": 50},
//!     {"conta": "TOTAL DESPESAS", "tipo": "TOTAL", "valor": 30},
//! ])).unwrap();
//!
//! let ledger = summarize_rows(&rows);
//! assert_eq!(ledger.summary.final_balance, 120.0);
//! ```

pub mod aggregator;
pub mod balancer;
pub mod classifier;
pub mod config;
pub mod error;
pub mod ingestion;
pub mod schema;
pub mod series;
pub mod source;
pub mod views;

pub use aggregator::{Aggregator, DetailCollector, SlotValues};
pub use balancer::{
    income_breakdown, previous_balance_breakdown, resolve_summary, verify_balance_identity,
    BalanceCheck, BalanceResolver,
};
pub use classifier::{classify, ClassificationRule, RuleSet, SlotPolicy, STANDARD_RULES};
pub use config::{EngineConfig, TableNames};
pub use error::{LedgerError, Result};
pub use ingestion::{
    normalize_entity_row, normalize_entity_rows, normalize_ledger_row, normalize_ledger_rows,
};
pub use schema::*;
pub use series::{
    calendar_months, extract_entity_series, extract_expense_series, month_key, MONTH_KEYS,
};
pub use source::{InMemorySource, JsonDirectorySource, RecordSource};
pub use views::{
    BalanceComposition, BalanceSheetView, DashboardView, OverviewView, SourceDiagnostics,
    TableView,
};

use log::{debug, info, warn};

/// Classifies, aggregates and resolves ledger rows with the standard rule table.
pub fn summarize_rows(rows: &[RawRow]) -> LedgerSummary {
    summarize_rows_with(rows, &RuleSet::standard())
}

pub fn summarize_rows_with(rows: &[RawRow], rules: &RuleSet) -> LedgerSummary {
    let records = normalize_ledger_rows(rows);

    let mut aggregator = Aggregator::new();
    let mut details = DetailCollector::new();
    let mut unclassified_rows = 0usize;

    for record in &records {
        match rules.matching_rule(record) {
            Some(rule) if rule.category == Category::ExpenseItem => details.push(record),
            Some(rule) => aggregator.apply(rule, record.amount),
            None => unclassified_rows += 1,
        }
    }

    debug!(
        "Classified {} ledger rows: {} expense items, {} unclassified",
        records.len(),
        details.len(),
        unclassified_rows
    );

    let slots = aggregator.into_slots();

    LedgerSummary {
        summary: resolve_summary(&slots),
        previous_balance_breakdown: previous_balance_breakdown(&slots),
        income_breakdown: income_breakdown(&slots),
        expense_details: details.into_entries(),
        unclassified_rows,
    }
}

/// Runs the report views against a record source.
///
/// Every view is infallible: a table that cannot be read is logged and treated as empty, which
/// yields all-zero figures and empty lists.
pub struct LedgerProcessor<'a, S: RecordSource + ?Sized> {
    source: &'a S,
    config: EngineConfig,
    rules: RuleSet,
}

impl<'a, S: RecordSource + ?Sized> LedgerProcessor<'a, S> {
    pub fn new(source: &'a S, config: EngineConfig) -> Self {
        Self {
            source,
            config,
            rules: RuleSet::standard(),
        }
    }

    pub fn with_rules(mut self, rules: RuleSet) -> Self {
        self.rules = rules;
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    fn load(&self, kind: TableKind) -> Vec<RawRow> {
        let table = self.config.table_name(kind);
        match self.source.read_table(table) {
            Ok(rows) => {
                debug!("Read {} rows from '{}'", rows.len(), table);
                rows
            }
            Err(e) => {
                warn!("{}; continuing with an empty table", e);
                Vec::new()
            }
        }
    }

    pub fn ledger_summary(&self) -> LedgerSummary {
        let rows = self.load(TableKind::Balance);
        summarize_rows_with(&rows, &self.rules)
    }

    pub fn overview(&self) -> OverviewView {
        views::overview(&self.ledger_summary().summary)
    }

    pub fn balance_sheet(&self) -> BalanceSheetView {
        views::balance_sheet(&self.ledger_summary())
    }

    pub fn dashboard(&self) -> DashboardView {
        info!("Building dashboard from {}", self.config.data_dir.display());

        let normal_income = extract_entity_series(&self.load(TableKind::NormalIncome));
        let extra_income = extract_entity_series(&self.load(TableKind::ExtraIncome));
        let expenses_by_month = extract_expense_series(&self.load(TableKind::Expenses));
        let ledger = self.ledger_summary();

        views::dashboard(&ledger.summary, normal_income, extra_income, expenses_by_month)
    }

    /// Rows echoed as read, without classification.
    pub fn raw_table(&self, kind: TableKind) -> Vec<RawRow> {
        self.load(kind)
    }

    /// Rows for a listing page, with null and zero cells blanked.
    pub fn table(&self, kind: TableKind) -> TableView {
        views::table_view(self.load(kind))
    }

    pub fn diagnose(&self, kind: TableKind) -> SourceDiagnostics {
        let table = self.config.table_name(kind);
        let location = self.source.location(table);

        if !self.source.exists(table) {
            return SourceDiagnostics {
                table: table.to_string(),
                location,
                error: Some("table not found".to_string()),
                ..Default::default()
            };
        }

        match self.source.read_table(table) {
            Ok(rows) => views::diagnostics(table, location, true, &rows, self.config.preview_rows),
            Err(e) => SourceDiagnostics {
                table: table.to_string(),
                exists: true,
                location,
                error: Some(e.to_string()),
                ..Default::default()
            },
        }
    }

    pub fn verify_balance_identity(&self) -> Result<BalanceCheck> {
        let summary = self.ledger_summary().summary;
        BalanceResolver::new(self.config.identity_tolerance).verify_balance_identity(&summary)
    }
}
