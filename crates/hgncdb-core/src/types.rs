//! Domain types shared by the store, query and chart crates.

use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;

pub type GeneId = String;

/// Logical partition of the key-value store. The discriminant is the
/// backend database index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Namespace {
    Records = 0,
    Artifacts = 1,
    Reserved = 2,
}

impl Namespace {
    pub fn db_index(self) -> i64 {
        self as i64
    }
}

/// One HGNC nomenclature entry.
///
/// Fields the service interprets are typed; everything else the upstream
/// sends is kept verbatim in `extra` so a stored record round-trips to the
/// same set of fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GeneRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hgnc_id: Option<GeneId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub symbol: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locus_group: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locus_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_approved_reserved: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_modified: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_symbol_changed: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_name_changed: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl GeneRecord {
    /// The record's key, if present and non-blank.
    pub fn id(&self) -> Option<&str> {
        self.hgnc_id.as_deref().map(str::trim).filter(|id| !id.is_empty())
    }

    /// Up to the first four characters of `date_approved_reserved`. Any
    /// present date yields a label, even a short or empty one.
    pub fn approval_year(&self) -> Option<&str> {
        let date = self.date_approved_reserved.as_deref()?;
        Some(date.char_indices().nth(4).map_or(date, |(end, _)| &date[..end]))
    }

    pub fn locus_group(&self) -> Option<&str> {
        self.locus_group.as_deref()
    }

    /// Look up any field by its upstream name.
    pub fn field(&self, name: &str) -> Option<Value> {
        let typed = match name {
            "hgnc_id" => &self.hgnc_id,
            "symbol" => &self.symbol,
            "name" => &self.name,
            "status" => &self.status,
            "locus_group" => &self.locus_group,
            "locus_type" => &self.locus_type,
            "date_approved_reserved" => &self.date_approved_reserved,
            "date_modified" => &self.date_modified,
            "date_symbol_changed" => &self.date_symbol_changed,
            "date_name_changed" => &self.date_name_changed,
            other => return self.extra.get(other).cloned(),
        };
        typed.clone().map(Value::String)
    }

    pub fn from_value(value: Value) -> crate::Result<Self> {
        Ok(serde_json::from_value(value)?)
    }
}

/// Ordered `label -> value` view extracted from one record.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldView(Vec<(String, Value)>);

impl FieldView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, label: impl Into<String>, value: Value) {
        self.0.push((label.into(), value));
    }

    pub fn get(&self, label: &str) -> Option<&Value> {
        self.0.iter().find(|(l, _)| l == label).map(|(_, v)| v)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for FieldView {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (label, value) in &self.0 {
            map.serialize_entry(label, value)?;
        }
        map.end()
    }
}

/// Grouped counts with a two-column header.
///
/// Entries are kept in ascending label order. On the wire this is a single
/// JSON object whose first entry is the header pair, followed by one entry
/// per label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregationResult {
    header: (String, String),
    entries: Vec<(String, u64)>,
}

impl AggregationResult {
    pub fn from_counts(header: (&str, &str), counts: BTreeMap<String, u64>) -> Self {
        Self {
            header: (header.0.to_string(), header.1.to_string()),
            entries: counts.into_iter().collect(),
        }
    }

    pub fn header(&self) -> (&str, &str) {
        (&self.header.0, &self.header.1)
    }

    pub fn entries(&self) -> &[(String, u64)] {
        &self.entries
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(l, _)| l.as_str())
    }

    pub fn total(&self) -> u64 {
        self.entries.iter().map(|(_, c)| c).sum()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Keep only the entries whose label satisfies `keep`. Order is preserved.
    pub fn retain<F>(mut self, mut keep: F) -> Self
    where
        F: FnMut(&str) -> bool,
    {
        self.entries.retain(|(label, _)| keep(label));
        self
    }
}

impl Serialize for AggregationResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len() + 1))?;
        map.serialize_entry(&self.header.0, &self.header.1)?;
        for (label, count) in &self.entries {
            map.serialize_entry(label, count)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for AggregationResult {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct AggregationVisitor;

        impl<'de> Visitor<'de> for AggregationVisitor {
            type Value = AggregationResult;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a header entry followed by label/count entries")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let header: (String, String) = map
                    .next_entry()?
                    .ok_or_else(|| de::Error::custom("missing header entry"))?;
                let mut counts = BTreeMap::new();
                while let Some((label, count)) = map.next_entry::<String, u64>()? {
                    counts.insert(label, count);
                }
                Ok(AggregationResult {
                    header,
                    entries: counts.into_iter().collect(),
                })
            }
        }

        deserializer.deserialize_map(AggregationVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn approval_year_is_the_date_prefix() {
        let mut rec = GeneRecord { date_approved_reserved: Some("1989-06-01".into()), ..Default::default() };
        assert_eq!(rec.approval_year(), Some("1989"));
        rec.date_approved_reserved = Some("89".into());
        assert_eq!(rec.approval_year(), Some("89"));
        rec.date_approved_reserved = Some(String::new());
        assert_eq!(rec.approval_year(), Some(""));
        rec.date_approved_reserved = None;
        assert_eq!(rec.approval_year(), None);
    }

    #[test]
    fn blank_id_is_treated_as_missing() {
        let rec = GeneRecord { hgnc_id: Some("  ".into()), ..Default::default() };
        assert!(rec.id().is_none());
    }

    #[test]
    fn aggregation_serializes_header_first() {
        let mut counts = BTreeMap::new();
        counts.insert("2001".to_string(), 3);
        counts.insert("1999".to_string(), 1);
        let result = AggregationResult::from_counts(("Years", "Number of Entries Approved"), counts);
        let text = serde_json::to_string(&result).unwrap();
        assert_eq!(text, r#"{"Years":"Number of Entries Approved","1999":1,"2001":3}"#);

        let back: AggregationResult = serde_json::from_str(&text).unwrap();
        assert_eq!(back, result);
    }

    #[test]
    fn field_view_keeps_table_order() {
        let mut view = FieldView::new();
        view.push("z label", json!("1"));
        view.push("a label", json!("2"));
        assert_eq!(serde_json::to_string(&view).unwrap(), r#"{"z label":"1","a label":"2"}"#);
    }
}
