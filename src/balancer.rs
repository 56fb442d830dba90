use crate::aggregator::SlotValues;
use crate::error::{LedgerError, Result};
use crate::schema::{FinalBalanceOrigin, IncomeBreakdown, PreviousBalanceBreakdown, Summary};
use log::debug;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BalanceCheck {
    pub credits: f64,
    pub debits: f64,
    pub difference: f64,
}

pub struct BalanceResolver {
    tolerance: f64,
}

impl Default for BalanceResolver {
    fn default() -> Self {
        Self { tolerance: 0.005 }
    }
}

impl BalanceResolver {
    pub fn new(tolerance: f64) -> Self {
        Self { tolerance }
    }

    /// Turns raw slots into a summary, deriving the final balance when the ledger left it at
    /// zero. Credits and debits are always computed from the resolved figures.
    pub fn resolve(&self, slots: &SlotValues) -> Summary {
        let previous_balance = slots.previous_balance;
        let total_income = slots.total_income;
        let total_expense = slots.total_expense;

        let (final_balance, final_balance_origin) = if slots.final_balance == 0.0 {
            let derived = previous_balance + total_income - total_expense;
            debug!(
                "No final balance in ledger; derived {:.2} from {:.2} + {:.2} - {:.2}",
                derived, previous_balance, total_income, total_expense
            );
            (derived, FinalBalanceOrigin::Derived)
        } else {
            (slots.final_balance, FinalBalanceOrigin::Reported)
        };

        Summary {
            previous_balance,
            total_income,
            total_expense,
            final_balance,
            total_credits: previous_balance + total_income,
            total_debits: total_expense + final_balance,
            final_balance_origin,
        }
    }

    /// Compares both sides of the balance-sheet identity. The views never call this; it exists
    /// for operators checking a source ledger.
    pub fn verify_balance_identity(&self, summary: &Summary) -> Result<BalanceCheck> {
        let check = BalanceCheck {
            credits: summary.total_credits,
            debits: summary.total_debits,
            difference: (summary.total_credits - summary.total_debits).abs(),
        };

        if check.difference > self.tolerance {
            return Err(LedgerError::BalanceIdentityViolation {
                credits: check.credits,
                debits: check.debits,
                difference: check.difference,
            });
        }

        Ok(check)
    }
}

pub fn previous_balance_breakdown(slots: &SlotValues) -> PreviousBalanceBreakdown {
    PreviousBalanceBreakdown {
        deposito_poupanca: 0.0,
        deposito_ordem: slots.deposito_ordem,
        numerario_caixa: slots.numerario_caixa,
        total: slots.previous_balance,
    }
}

pub fn income_breakdown(slots: &SlotValues) -> IncomeBreakdown {
    IncomeBreakdown {
        quotas_normais: slots.quotas_normais,
        quotas_extras: slots.quotas_extras,
        juros: slots.juros,
        total: slots.total_income,
    }
}

pub fn resolve_summary(slots: &SlotValues) -> Summary {
    BalanceResolver::default().resolve(slots)
}

pub fn verify_balance_identity(summary: &Summary, tolerance: f64) -> Result<BalanceCheck> {
    BalanceResolver::new(tolerance).verify_balance_identity(summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_final_balance_derived_when_missing() {
        let slots = SlotValues {
            previous_balance: 100.0,
            total_income: 50.0,
            total_expense: 30.0,
            ..Default::default()
        };

        let summary = resolve_summary(&slots);
        assert_eq!(summary.final_balance, 120.0);
        assert_eq!(summary.final_balance_origin, FinalBalanceOrigin::Derived);
        assert_eq!(summary.total_credits, 150.0);
        assert_eq!(summary.total_debits, 150.0);
        assert!(verify_balance_identity(&summary, 0.01).is_ok());
    }

    #[test]
    fn test_reported_final_balance_kept_even_if_unbalanced() {
        let slots = SlotValues {
            previous_balance: 100.0,
            total_income: 50.0,
            total_expense: 30.0,
            final_balance: 200.0,
            ..Default::default()
        };

        let summary = resolve_summary(&slots);
        assert_eq!(summary.final_balance, 200.0);
        assert_eq!(summary.final_balance_origin, FinalBalanceOrigin::Reported);
        assert_eq!(summary.total_debits, 230.0);
        assert_eq!(summary.total_credits, 150.0);

        let result = verify_balance_identity(&summary, 0.01);
        match result {
            Err(LedgerError::BalanceIdentityViolation { difference, .. }) => {
                assert!((difference - 80.0).abs() < 1e-9)
            }
            other => panic!("expected violation, got {:?}", other),
        }
    }

    #[test]
    fn test_all_zero_slots_resolve_to_zero_summary() {
        let summary = resolve_summary(&SlotValues::default());
        assert_eq!(summary.final_balance, 0.0);
        assert_eq!(summary.total_debits, 0.0);
        assert_eq!(summary.total_credits, 0.0);
    }

    #[test]
    fn test_breakdowns_copy_slots() {
        let slots = SlotValues {
            previous_balance: 10.0,
            total_income: 20.0,
            deposito_ordem: 7.0,
            numerario_caixa: 3.0,
            quotas_normais: 15.0,
            quotas_extras: 4.0,
            juros: 1.0,
            ..Default::default()
        };

        let previous = previous_balance_breakdown(&slots);
        assert_eq!(previous.deposito_poupanca, 0.0);
        assert_eq!(previous.deposito_ordem, 7.0);
        assert_eq!(previous.total, 10.0);

        let income = income_breakdown(&slots);
        assert_eq!(income.quotas_normais, 15.0);
        assert_eq!(income.juros, 1.0);
        assert_eq!(income.total, 20.0);
    }
}
