//! Read-only point lookups against the record namespace.

use hgncdb_core::types::{FieldView, GeneRecord};
use hgncdb_core::{Error, Result};
use hgncdb_store::RecordStore;

/// Approval and modification dates, upstream name to display label.
pub const DATE_FIELDS: &[(&str, &str)] = &[
    ("date_approved_reserved", "date first approved"),
    ("date_modified", "date last modified"),
    ("date_symbol_changed", "date symbol last changed"),
    ("date_name_changed", "date name last changed"),
];

pub const LOCUS_FIELDS: &[(&str, &str)] = &[("locus_group", "locus group")];

#[derive(Clone)]
pub struct GeneQueries {
    store: RecordStore,
}

impl GeneQueries {
    pub fn new(store: RecordStore) -> Self {
        Self { store }
    }

    /// Sorted ids. Empty when nothing has been ingested.
    pub async fn list_keys(&self) -> Result<Vec<String>> {
        self.store.keys().await
    }

    pub async fn list_records(&self) -> Result<Vec<GeneRecord>> {
        self.store.all().await
    }

    pub async fn get_record(&self, id: &str) -> Result<GeneRecord> {
        self.store
            .get(id)
            .await?
            .ok_or_else(|| Error::NotFound(format!("no gene with id {}", id)))
    }

    /// Pick the fields named in `table` and relabel them. Fields the record
    /// lacks are left out rather than defaulted.
    pub async fn get_field_subset(&self, id: &str, table: &[(&str, &str)]) -> Result<FieldView> {
        let record = self.get_record(id).await?;
        Ok(project(&record, table))
    }

    pub async fn get_single_field(&self, id: &str, field: &str, label: &str) -> Result<FieldView> {
        self.get_field_subset(id, &[(field, label)]).await
    }
}

fn project(record: &GeneRecord, table: &[(&str, &str)]) -> FieldView {
    let mut view = FieldView::new();
    for (field, label) in table {
        if let Some(value) = record.field(field) {
            view.push(*label, value);
        }
    }
    view
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn project_omits_absent_fields() {
        let record = GeneRecord {
            date_approved_reserved: Some("1989-06-30".into()),
            date_modified: Some("2023-01-20".into()),
            ..Default::default()
        };
        let view = project(&record, DATE_FIELDS);
        assert_eq!(view.len(), 2);
        assert_eq!(view.get("date first approved"), Some(&json!("1989-06-30")));
        assert_eq!(view.get("date last modified"), Some(&json!("2023-01-20")));
        assert!(view.get("date symbol last changed").is_none());
    }
}
