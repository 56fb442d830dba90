use crate::error::{LedgerError, Result};
use crate::schema::TableKind;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TableNames {
    pub balance: String,
    pub bank_movements: String,
    pub normal_income: String,
    pub extra_income: String,
    pub expenses: String,
}

impl Default for TableNames {
    fn default() -> Self {
        Self {
            balance: "Balanco".to_string(),
            bank_movements: "Bancos".to_string(),
            normal_income: "ReceitasN".to_string(),
            extra_income: "ReceitasE".to_string(),
            expenses: "Despesas".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EngineConfig {
    /// Directory holding the current period's tables.
    pub data_dir: PathBuf,
    pub tables: TableNames,
    /// Rows included in a source diagnostics preview.
    pub preview_rows: usize,
    /// Maximum |credits - debits| accepted by the balance identity check.
    pub identity_tolerance: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("corrente"),
            tables: TableNames::default(),
            preview_rows: 3,
            identity_tolerance: 0.005,
        }
    }
}

impl EngineConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: EngineConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.identity_tolerance.is_finite() || self.identity_tolerance < 0.0 {
            return Err(LedgerError::InvalidConfig(format!(
                "identity_tolerance must be a non-negative number, got {}",
                self.identity_tolerance
            )));
        }

        for kind in TableKind::ALL {
            if self.table_name(kind).trim().is_empty() {
                return Err(LedgerError::InvalidConfig(format!(
                    "table name for {:?} must not be empty",
                    kind
                )));
            }
        }

        Ok(())
    }

    pub fn table_name(&self, kind: TableKind) -> &str {
        match kind {
            TableKind::Balance => &self.tables.balance,
            TableKind::BankMovements => &self.tables.bank_movements,
            TableKind::NormalIncome => &self.tables.normal_income,
            TableKind::ExtraIncome => &self.tables.extra_income,
            TableKind::Expenses => &self.tables.expenses,
        }
    }
}
