use crate::config::EngineConfig;
use crate::error::{LedgerError, Result};
use crate::ingestion::lowercase_field_names;
use crate::schema::RawRow;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Hands the engine an immutable snapshot of a named table per call.
pub trait RecordSource {
    fn read_table(&self, table: &str) -> Result<Vec<RawRow>>;

    /// Human-readable location of a table, for diagnostics.
    fn location(&self, table: &str) -> String;

    fn exists(&self, table: &str) -> bool;
}

#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    tables: BTreeMap<String, Vec<RawRow>>,
}

impl InMemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_table(mut self, table: impl Into<String>, rows: Vec<RawRow>) -> Self {
        self.insert(table, rows);
        self
    }

    pub fn insert(&mut self, table: impl Into<String>, rows: Vec<RawRow>) {
        let rows = rows.into_iter().map(lowercase_field_names).collect();
        self.tables.insert(table.into(), rows);
    }
}

impl RecordSource for InMemorySource {
    fn read_table(&self, table: &str) -> Result<Vec<RawRow>> {
        self.tables
            .get(table)
            .cloned()
            .ok_or_else(|| LedgerError::SourceUnavailable {
                table: table.to_string(),
                reason: "table not loaded".to_string(),
            })
    }

    fn location(&self, table: &str) -> String {
        format!("memory://{}", table)
    }

    fn exists(&self, table: &str) -> bool {
        self.tables.contains_key(table)
    }
}

/// Reads `<dir>/<table>.json`, each file holding a JSON array of row objects.
#[derive(Debug, Clone)]
pub struct JsonDirectorySource {
    dir: PathBuf,
}

impl JsonDirectorySource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// A source rooted at the configured data directory.
    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(config.data_dir.clone())
    }

    fn table_path(&self, table: &str) -> PathBuf {
        self.dir.join(format!("{}.json", table))
    }
}

impl RecordSource for JsonDirectorySource {
    fn read_table(&self, table: &str) -> Result<Vec<RawRow>> {
        let path = self.table_path(table);
        let contents =
            std::fs::read_to_string(&path).map_err(|e| LedgerError::SourceUnavailable {
                table: table.to_string(),
                reason: format!("{}: {}", path.display(), e),
            })?;

        let rows: Vec<RawRow> = serde_json::from_str(&contents)?;
        Ok(rows.into_iter().map(lowercase_field_names).collect())
    }

    fn location(&self, table: &str) -> String {
        self.table_path(table).display().to_string()
    }

    fn exists(&self, table: &str) -> bool {
        self.table_path(table).is_file()
    }
}
