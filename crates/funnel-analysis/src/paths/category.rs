//! Category mapping: a total, pure function from raw column values to labels.
//!
//! Every input maps to either a known label or the unknown sentinel. Mapping
//! runs before path building; the builder then only trims and checks the
//! separator.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use funnel_core::{FxHashMap, Record};

/// How raw category values become path labels for one dimension.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case", tag = "kind", content = "value")]
pub enum CategoryMapper {
    /// Trimmed raw value; blank or null becomes the unknown sentinel.
    #[default]
    Identity,
    /// Explicit lookup on the trimmed value; unmapped values become the sentinel.
    Table(BTreeMap<String, String>),
    /// Keep the `n` most frequent values (ties broken lexicographically).
    TopN(usize),
}

impl CategoryMapper {
    pub fn table<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self::Table(
            entries
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }

    /// Resolve data-dependent mappers (`TopN`) against the record set.
    pub fn resolve(&self, records: &[Record]) -> CategoryMapper {
        match self {
            Self::TopN(n) => Self::Table(
                top_categories(records, *n)
                    .into_iter()
                    .map(|c| (c.clone(), c))
                    .collect(),
            ),
            other => other.clone(),
        }
    }

    /// Map one raw value. `TopN` must be resolved first; unresolved it keeps nothing.
    pub fn map(&self, value: Option<&str>, unknown: &str) -> String {
        let trimmed = match value.map(str::trim) {
            Some(v) if !v.is_empty() => v,
            _ => return unknown.to_string(),
        };
        match self {
            Self::Identity => trimmed.to_string(),
            Self::Table(table) => table
                .get(trimmed)
                .cloned()
                .unwrap_or_else(|| unknown.to_string()),
            Self::TopN(_) => unknown.to_string(),
        }
    }

    /// Resolve against `records`, then relabel each record's category.
    pub fn apply(&self, records: Vec<Record>, unknown: &str) -> Vec<Record> {
        let resolved = self.resolve(&records);
        records
            .into_iter()
            .map(|mut r| {
                r.category = Some(resolved.map(r.category.as_deref(), unknown));
                r
            })
            .collect()
    }
}

/// The `n` most frequent non-blank trimmed values, most frequent first.
pub fn top_categories(records: &[Record], n: usize) -> Vec<String> {
    let mut counts: FxHashMap<&str, usize> = FxHashMap::default();
    for record in records {
        if let Some(v) = record.category.as_deref().map(str::trim) {
            if !v.is_empty() {
                *counts.entry(v).or_insert(0) += 1;
            }
        }
    }

    let mut ranked: Vec<(&str, usize)> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    ranked
        .into_iter()
        .take(n)
        .map(|(v, _)| v.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(category: Option<&str>) -> Record {
        Record::new(vec![None], category.map(str::to_string))
    }

    #[test]
    fn test_identity_trims_and_defaults() {
        let mapper = CategoryMapper::Identity;
        assert_eq!(mapper.map(Some("  STORE "), "UNKNOWN"), "STORE");
        assert_eq!(mapper.map(Some("   "), "UNKNOWN"), "UNKNOWN");
        assert_eq!(mapper.map(Some(""), "UNKNOWN"), "UNKNOWN");
        assert_eq!(mapper.map(None, "UNKNOWN"), "UNKNOWN");
    }

    #[test]
    fn test_table_lookup() {
        let mapper = CategoryMapper::table([("门店", "STORE"), ("总部", "HQ")]);
        assert_eq!(mapper.map(Some("门店"), "UNKNOWN"), "STORE");
        assert_eq!(mapper.map(Some("总部"), "UNKNOWN"), "HQ");
        assert_eq!(mapper.map(Some("其他"), "UNKNOWN"), "UNKNOWN");
        assert_eq!(mapper.map(None, "UNKNOWN"), "UNKNOWN");
    }

    #[test]
    fn test_top_n_ties_broken_lexicographically() {
        let records = vec![
            record(Some("Zhejiang")),
            record(Some("Jiangsu")),
            record(Some("Zhejiang")),
            record(Some("Anhui")),
            record(Some("Jiangsu")),
            record(Some("Fujian")),
            record(None),
        ];
        assert_eq!(top_categories(&records, 3), vec!["Jiangsu", "Zhejiang", "Anhui"]);

        let mapped = CategoryMapper::TopN(2).apply(records, "UNKNOWN");
        let labels: Vec<_> = mapped.iter().map(|r| r.category.clone().unwrap()).collect();
        assert_eq!(
            labels,
            vec!["Zhejiang", "Jiangsu", "Zhejiang", "UNKNOWN", "Jiangsu", "UNKNOWN", "UNKNOWN"]
        );
    }
}
