//! Priority-ordered rule table mapping normalized ledger rows onto categories.
//!
//! All matching is done on the upper-cased label and type marker produced by the normalizer, so
//! it is case-insensitive by construction. Accented and unaccented spellings are listed
//! explicitly; no diacritic folding happens here.

use crate::schema::{Category, LedgerRecord};

pub type Predicate = fn(&LedgerRecord) -> bool;

/// How the aggregator treats a value matched by a rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotPolicy {
    /// Every match replaces the slot, so the last matching row wins.
    Overwrite,
    /// Only written while the slot is still zero, so the first matching row wins.
    FillIfUnset,
}

#[derive(Clone, Copy)]
pub struct ClassificationRule {
    pub priority: u32,
    pub name: &'static str,
    pub predicate: Predicate,
    pub category: Category,
    pub policy: SlotPolicy,
}

impl std::fmt::Debug for ClassificationRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClassificationRule")
            .field("priority", &self.priority)
            .field("name", &self.name)
            .field("category", &self.category)
            .field("policy", &self.policy)
            .finish()
    }
}

impl ClassificationRule {
    pub fn matches(&self, record: &LedgerRecord) -> bool {
        (self.predicate)(record)
    }
}

const fn rule(
    priority: u32,
    name: &'static str,
    predicate: Predicate,
    category: Category,
) -> ClassificationRule {
    ClassificationRule {
        priority,
        name,
        predicate,
        category,
        policy: SlotPolicy::Overwrite,
    }
}

fn is_total_like(r: &LedgerRecord) -> bool {
    r.record_type.contains("TOTAL") || r.label_contains("TOTAL")
}

pub const STANDARD_RULES: &[ClassificationRule] = &[
    rule(10, "tsa_marker", |r| r.label_contains("TSA"), Category::PreviousBalance),
    rule(
        20,
        "subtotal_saldo_anterior",
        |r| r.type_is("SUBTOTAL") && r.label_contains_all(&["SALDO", "ANTERIOR"]),
        Category::PreviousBalance,
    ),
    rule(
        30,
        "total_saldo_anterior",
        |r| is_total_like(r) && r.label_contains_all(&["SALDO", "ANTERIOR"]),
        Category::PreviousBalance,
    ),
    rule(
        40,
        "subtotal_receitas",
        |r| r.type_is("SUBTOTAL") && r.label_contains("RECEITAS"),
        Category::TotalIncome,
    ),
    rule(
        41,
        "total_receitas",
        |r| r.label_contains_all(&["TOTAL", "RECEITAS"]),
        Category::TotalIncome,
    ),
    rule(
        50,
        "subtotal_despesas",
        |r| r.type_is("SUBTOTAL") && r.label_contains("DESPESAS"),
        Category::TotalExpense,
    ),
    rule(
        51,
        "total_despesas",
        |r| r.label_contains_all(&["TOTAL", "DESPESAS"]),
        Category::TotalExpense,
    ),
    rule(
        60,
        "saldo_final",
        |r| r.type_is("SALDO") && r.label_contains("FINAL"),
        Category::FinalBalance,
    ),
    ClassificationRule {
        priority: 70,
        name: "bare_total",
        predicate: |r| r.type_is("TOTAL") && r.match_label == "TOTAL",
        category: Category::FinalBalance,
        policy: SlotPolicy::FillIfUnset,
    },
    rule(80, "expense_item", |r| r.type_is("DESPESA"), Category::ExpenseItem),
    rule(
        90,
        "deposito_ordem",
        |r| r.label_contains("DEPÓSITO ORDEM") || r.label_contains("DEPOSITO ORDEM"),
        Category::DepositOrdem,
    ),
    rule(
        91,
        "numerario_caixa",
        |r| r.label_contains("NUMERÁRIO CAIXA") || r.label_contains("NUMERARIO CAIXA"),
        Category::NumerarioCaixa,
    ),
    rule(92, "quotas_normais", |r| r.label_contains("QUOTAS NORMAIS"), Category::QuotasNormais),
    rule(93, "quotas_extras", |r| r.label_contains("QUOTAS EXTRAS"), Category::QuotasExtras),
    rule(
        94,
        "juros",
        |r| r.label_contains("JUROS") && r.type_is("RECEITA"),
        Category::Juros,
    ),
];

#[derive(Debug, Clone)]
pub struct RuleSet {
    rules: Vec<ClassificationRule>,
}

impl Default for RuleSet {
    fn default() -> Self {
        Self::standard()
    }
}

impl RuleSet {
    /// Builds a rule set from arbitrary rules. Rules sharing a priority keep their given order.
    pub fn new(mut rules: Vec<ClassificationRule>) -> Self {
        rules.sort_by_key(|r| r.priority);
        Self { rules }
    }

    pub fn standard() -> Self {
        Self::new(STANDARD_RULES.to_vec())
    }

    pub fn rules(&self) -> &[ClassificationRule] {
        &self.rules
    }

    /// The first rule, in priority order, that matches the record.
    pub fn matching_rule(&self, record: &LedgerRecord) -> Option<&ClassificationRule> {
        self.rules.iter().find(|rule| rule.matches(record))
    }

    pub fn classify(&self, record: &LedgerRecord) -> Category {
        self.matching_rule(record)
            .map(|rule| rule.category)
            .unwrap_or(Category::Unclassified)
    }
}

/// Classifies a record against the standard rule table.
pub fn classify(record: &LedgerRecord) -> Category {
    STANDARD_RULES
        .iter()
        .find(|rule| rule.matches(record))
        .map(|rule| rule.category)
        .unwrap_or(Category::Unclassified)
}
