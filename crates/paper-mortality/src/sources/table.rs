//! In-memory key to citation-years table.

use std::collections::HashMap;
use std::io::Read;
use std::path::Path;

use super::CitationSource;
use crate::error::SourceResult;

/// Precomputed citation years, e.g. loaded from a cache dump.
///
/// Keys in the table may carry a prefix naming the service they were fetched
/// from (`openalex_10.1145/...`); lookups add it back before searching.
#[derive(Debug, Clone, Default)]
pub struct YearTable {
    name: String,
    prefix: String,
    years: HashMap<String, Vec<i32>>,
}

impl YearTable {
    /// Create an empty table.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), ..Default::default() }
    }

    /// Build a table from existing entries.
    #[must_use]
    pub fn from_map(name: impl Into<String>, years: HashMap<String, Vec<i32>>) -> Self {
        Self { name: name.into(), prefix: String::new(), years }
    }

    /// Set the key prefix added to every lookup.
    #[must_use]
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Parse a JSON object of `{"key": [year, ...]}`.
    pub fn from_json_reader(name: impl Into<String>, reader: impl Read) -> SourceResult<Self> {
        let years: HashMap<String, Vec<i32>> = serde_json::from_reader(reader)?;
        Ok(Self::from_map(name, years))
    }

    /// Load a JSON table from disk.
    pub async fn from_json_file(
        name: impl Into<String>,
        path: impl AsRef<Path>,
    ) -> SourceResult<Self> {
        let path = path.as_ref();
        let bytes = tokio::fs::read(path).await?;
        let table = Self::from_json_reader(name, bytes.as_slice())?;
        tracing::info!(path = %path.display(), keys = table.len(), "Loaded citation table");
        Ok(table)
    }

    /// Record citation years for a key (the key is stored with the prefix).
    pub fn insert(&mut self, key: &str, years: impl IntoIterator<Item = i32>) {
        let key = self.full_key(key);
        self.years.entry(key).or_default().extend(years);
    }

    /// Number of keys in the table.
    #[must_use]
    pub fn len(&self) -> usize {
        self.years.len()
    }

    /// Check if the table has no keys.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.years.is_empty()
    }

    /// Synchronous lookup.
    #[must_use]
    pub fn get(&self, key: &str) -> &[i32] {
        self.years.get(&self.full_key(key)).map_or(&[], Vec::as_slice)
    }

    fn full_key(&self, key: &str) -> String {
        format!("{}{}", self.prefix, key)
    }
}

#[async_trait::async_trait]
impl CitationSource for YearTable {
    fn name(&self) -> &str {
        &self.name
    }

    async fn citation_years(&self, key: &str) -> SourceResult<Vec<i32>> {
        Ok(self.get(key).to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefixed_lookup() {
        let json = r#"{"openalex_10.1/a": [2001, 2003, 2003], "openalex_10.1/b": []}"#;
        let table = YearTable::from_json_reader("openalex", json.as_bytes())
            .unwrap()
            .with_prefix("openalex_");

        assert_eq!(table.len(), 2);
        assert_eq!(table.get("10.1/a"), &[2001, 2003, 2003]);
        assert!(table.get("10.1/b").is_empty());
        assert!(table.get("10.1/missing").is_empty());
    }

    #[test]
    fn test_insert_extends() {
        let mut table = YearTable::new("memory");
        table.insert("k", [2000]);
        table.insert("k", [2001, 2001]);
        assert_eq!(table.get("k"), &[2000, 2001, 2001]);
    }

    #[test]
    fn test_rejects_malformed_json() {
        let result = YearTable::from_json_reader("bad", r#"{"k": ["twenty"]}"#.as_bytes());
        assert!(result.is_err());
    }

    #[test]
    fn test_async_lookup() {
        let mut table = YearTable::new("memory");
        table.insert("k", [1999, 2004]);

        let years = tokio_test::block_on(table.citation_years("k")).unwrap();
        assert_eq!(years, vec![1999, 2004]);
        assert_eq!(table.name(), "memory");
    }
}
