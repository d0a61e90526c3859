//! Grouped counts over the whole record namespace.

use std::collections::BTreeMap;

use hgncdb_core::config::AggregationSettings;
use hgncdb_core::types::{AggregationResult, GeneRecord};
use hgncdb_core::{Error, Result};
use hgncdb_store::RecordStore;

/// Which field a record is grouped by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Grouping {
    /// Up to the first four characters of `date_approved_reserved`.
    ApprovalYear,
    LocusGroup,
}

impl Grouping {
    pub fn header(self) -> (&'static str, &'static str) {
        match self {
            Grouping::ApprovalYear => ("Years", "Number of Entries Approved"),
            Grouping::LocusGroup => ("Locus Group", "Number of Entries"),
        }
    }

    pub fn label(self, record: &GeneRecord) -> Option<&str> {
        match self {
            Grouping::ApprovalYear => record.approval_year(),
            Grouping::LocusGroup => record.locus_group(),
        }
    }
}

/// Tally `records` by `grouping`. Records without the field are not counted.
pub fn count_by(records: &[GeneRecord], grouping: Grouping) -> AggregationResult {
    let mut counts: BTreeMap<String, u64> = BTreeMap::new();
    for record in records {
        if let Some(label) = grouping.label(record) {
            *counts.entry(label.to_string()).or_default() += 1;
        }
    }
    AggregationResult::from_counts(grouping.header(), counts)
}

/// Inclusive year bounds, `start < end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearRange {
    pub start: i64,
    pub end: i64,
}

impl YearRange {
    pub fn new(start: i64, end: i64) -> Result<Self> {
        if start >= end {
            return Err(Error::InvalidRange(format!(
                "start year {} must be less than end year {}",
                start, end
            )));
        }
        Ok(Self { start, end })
    }

    /// Build a range from raw query parameters. Missing or blank bounds fall
    /// back to the configured defaults.
    pub fn parse(start: Option<&str>, end: Option<&str>, defaults: &AggregationSettings) -> Result<Self> {
        let start = parse_year("start", start)?.unwrap_or(defaults.default_start_year);
        let end = parse_year("end", end)?.unwrap_or(defaults.default_end_year);
        Self::new(start, end)
    }

    pub fn contains(&self, label: &str) -> bool {
        label
            .parse::<i64>()
            .map(|year| (self.start..=self.end).contains(&year))
            .unwrap_or(false)
    }
}

fn parse_year(which: &str, raw: Option<&str>) -> Result<Option<i64>> {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(None);
    };
    match raw.parse::<i64>() {
        Ok(year) if year > 0 => Ok(Some(year)),
        _ => Err(Error::InvalidInput(format!(
            "enter a positive integer for {} year, got {:?}",
            which, raw
        ))),
    }
}

#[derive(Clone)]
pub struct Aggregator {
    store: RecordStore,
}

impl Aggregator {
    pub fn new(store: RecordStore) -> Self {
        Self { store }
    }

    pub async fn group_count(&self, grouping: Grouping) -> Result<AggregationResult> {
        let records = self.store.all().await?;
        let result = count_by(&records, grouping);
        tracing::debug!(?grouping, records = records.len(), groups = result.len(), "grouped");
        Ok(result)
    }

    /// Like [`group_count`](Self::group_count) but keeps only numeric labels
    /// inside `range`. Bounds with no data are clamped to whatever observed
    /// labels fall inside; an empty window is `NotFound`.
    pub async fn group_count_ranged(&self, grouping: Grouping, range: YearRange) -> Result<AggregationResult> {
        let result = self.group_count(grouping).await?.retain(|label| range.contains(label));
        if result.is_empty() {
            return Err(Error::NotFound(format!(
                "no entries between {} and {}",
                range.start, range.end
            )));
        }
        Ok(result)
    }
}
