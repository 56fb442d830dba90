use crate::classifier::{ClassificationRule, SlotPolicy};
use crate::schema::{Category, DetailEntry, LedgerRecord};
use serde::{Deserialize, Serialize};

/// Raw slot values as read from the ledger, before any fallback is applied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SlotValues {
    pub previous_balance: f64,
    pub total_income: f64,
    pub total_expense: f64,
    pub final_balance: f64,
    pub deposito_ordem: f64,
    pub numerario_caixa: f64,
    pub quotas_normais: f64,
    pub quotas_extras: f64,
    pub juros: f64,
}

impl SlotValues {
    fn slot_mut(&mut self, category: Category) -> Option<&mut f64> {
        match category {
            Category::PreviousBalance => Some(&mut self.previous_balance),
            Category::TotalIncome => Some(&mut self.total_income),
            Category::TotalExpense => Some(&mut self.total_expense),
            Category::FinalBalance => Some(&mut self.final_balance),
            Category::DepositOrdem => Some(&mut self.deposito_ordem),
            Category::NumerarioCaixa => Some(&mut self.numerario_caixa),
            Category::QuotasNormais => Some(&mut self.quotas_normais),
            Category::QuotasExtras => Some(&mut self.quotas_extras),
            Category::Juros => Some(&mut self.juros),
            Category::ExpenseItem | Category::Unclassified => None,
        }
    }
}

/// Collects classified amounts into summary slots.
///
/// Slots are overwritten, never summed: a ledger carrying two rows of the same category keeps
/// only the later one. Whether such ledgers should sum instead is an open accounting question,
/// so the overwrite is kept as the contract.
#[derive(Debug, Clone, Default)]
pub struct Aggregator {
    slots: SlotValues,
}

impl Aggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrites the slot for `category`. Categories without a slot are ignored.
    pub fn accumulate(&mut self, category: Category, amount: f64) {
        if let Some(slot) = self.slots.slot_mut(category) {
            *slot = amount;
        }
    }

    /// Writes the slot only while it still reads `0.0`. An explicit zero and an unset slot are
    /// indistinguishable.
    pub fn accumulate_if_unset(&mut self, category: Category, amount: f64) {
        if let Some(slot) = self.slots.slot_mut(category) {
            if *slot == 0.0 {
                *slot = amount;
            }
        }
    }

    pub fn apply(&mut self, rule: &ClassificationRule, amount: f64) {
        match rule.policy {
            SlotPolicy::Overwrite => self.accumulate(rule.category, amount),
            SlotPolicy::FillIfUnset => self.accumulate_if_unset(rule.category, amount),
        }
    }

    pub fn slots(&self) -> &SlotValues {
        &self.slots
    }

    pub fn into_slots(self) -> SlotValues {
        self.slots
    }
}

/// Keeps itemized expense lines in input order. Repeated labels stay repeated.
#[derive(Debug, Clone, Default)]
pub struct DetailCollector {
    entries: Vec<DetailEntry>,
}

impl DetailCollector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: &LedgerRecord) {
        self.entries.push(DetailEntry {
            label: record.account_label.clone(),
            amount: record.amount,
        });
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn into_entries(self) -> Vec<DetailEntry> {
        self.entries
    }
}
