use serde_json::json;

use hgncdb_core::types::GeneRecord;
use hgncdb_core::Error;
use hgncdb_fetch::ingest;
use hgncdb_query::{count_by, Aggregator, GeneQueries, Grouping, YearRange, DATE_FIELDS, LOCUS_FIELDS};
use hgncdb_store::Stores;

fn rec(value: serde_json::Value) -> GeneRecord {
    GeneRecord::from_value(value).expect("fixture")
}

fn two_records() -> Vec<GeneRecord> {
    vec![
        rec(json!({"hgnc_id": "HGNC:1", "date_approved_reserved": "1989-06-01", "locus_group": "protein-coding gene"})),
        rec(json!({"hgnc_id": "HGNC:2", "date_approved_reserved": "1989-07-01", "locus_group": "pseudogene"})),
    ]
}

fn wider_fixture() -> Vec<GeneRecord> {
    vec![
        rec(json!({"hgnc_id": "HGNC:10", "date_approved_reserved": "1986-01-01", "locus_group": "protein-coding gene"})),
        rec(json!({"hgnc_id": "HGNC:11", "date_approved_reserved": "1991-03-04", "locus_group": "protein-coding gene"})),
        rec(json!({"hgnc_id": "HGNC:12", "date_approved_reserved": "1991-09-09", "locus_group": "non-coding RNA"})),
        rec(json!({"hgnc_id": "HGNC:13", "date_approved_reserved": "2005-05-05", "locus_group": "pseudogene"})),
        rec(json!({"hgnc_id": "HGNC:14", "date_approved_reserved": "2019-12-31"})),
        rec(json!({"hgnc_id": "HGNC:15", "locus_group": "other"})),
        rec(json!({"hgnc_id": "HGNC:16", "date_approved_reserved": ""})),
        rec(json!({"hgnc_id": "HGNC:17", "date_approved_reserved": "89"})),
    ]
}

async fn seeded(records: &[GeneRecord]) -> Stores {
    let stores = Stores::in_memory();
    ingest(&stores.records, records).await.expect("ingest");
    stores
}

#[tokio::test]
async fn two_record_example_counts() -> anyhow::Result<()> {
    let stores = seeded(&two_records()).await;
    let agg = Aggregator::new(stores.records.clone());

    let by_year = agg.group_count(Grouping::ApprovalYear).await?;
    assert_eq!(by_year.header(), ("Years", "Number of Entries Approved"));
    assert_eq!(by_year.entries(), &[("1989".to_string(), 2)]);

    let by_locus = agg.group_count(Grouping::LocusGroup).await?;
    assert_eq!(
        serde_json::to_value(&by_locus)?,
        json!({"Locus Group": "Number of Entries", "protein-coding gene": 1, "pseudogene": 1})
    );
    Ok(())
}

#[tokio::test]
async fn counts_sum_to_records_with_the_field() -> anyhow::Result<()> {
    let records = wider_fixture();
    let stores = seeded(&records).await;
    let agg = Aggregator::new(stores.records.clone());

    for grouping in [Grouping::ApprovalYear, Grouping::LocusGroup] {
        let result = agg.group_count(grouping).await?;
        let with_field = records
            .iter()
            .filter(|r| match grouping {
                Grouping::ApprovalYear => r.date_approved_reserved.is_some(),
                Grouping::LocusGroup => r.locus_group.is_some(),
            })
            .count() as u64;
        assert_eq!(result.total(), with_field, "{grouping:?}");

        let labels: Vec<_> = result.labels().collect();
        assert!(labels.windows(2).all(|w| w[0] < w[1]), "labels not strictly ascending: {labels:?}");
    }
    Ok(())
}

#[test]
fn short_approval_dates_are_counted_under_their_prefix() {
    let records = vec![
        rec(json!({"hgnc_id": "HGNC:1", "date_approved_reserved": "1989-06-01"})),
        rec(json!({"hgnc_id": "HGNC:2", "date_approved_reserved": ""})),
        rec(json!({"hgnc_id": "HGNC:3", "date_approved_reserved": "89"})),
    ];
    let result = count_by(&records, Grouping::ApprovalYear);
    assert_eq!(result.total(), 3);
    assert_eq!(
        result.entries(),
        &[("".to_string(), 1), ("1989".to_string(), 1), ("89".to_string(), 1)]
    );
}

#[test]
fn count_by_empty_input_is_header_only() {
    let result = count_by(&[], Grouping::ApprovalYear);
    assert!(result.is_empty());
    assert_eq!(serde_json::to_string(&result).unwrap(), r#"{"Years":"Number of Entries Approved"}"#);
}

#[tokio::test]
async fn ranged_clamps_to_observed_years() -> anyhow::Result<()> {
    let stores = seeded(&wider_fixture()).await;
    let agg = Aggregator::new(stores.records.clone());

    // Neither 1988 nor 2010 appear in the data.
    let result = agg.group_count_ranged(Grouping::ApprovalYear, YearRange::new(1988, 2010)?).await?;
    assert_eq!(result.entries(), &[("1991".to_string(), 2), ("2005".to_string(), 1)]);
    Ok(())
}

#[tokio::test]
async fn ranged_empty_window_is_not_found() -> anyhow::Result<()> {
    let stores = seeded(&wider_fixture()).await;
    let agg = Aggregator::new(stores.records.clone());

    let err = agg.group_count_ranged(Grouping::ApprovalYear, YearRange::new(1992, 2004)?).await.unwrap_err();
    assert!(matches!(err, Error::NotFound(_)));
    Ok(())
}

#[test]
fn ranged_start_not_before_end_is_invalid() {
    assert!(matches!(YearRange::new(2000, 1999), Err(Error::InvalidRange(_))));
    assert!(matches!(YearRange::new(2000, 2000), Err(Error::InvalidRange(_))));
}

#[tokio::test]
async fn get_record_returns_stored_fields_or_not_found() -> anyhow::Result<()> {
    let records = two_records();
    let stores = seeded(&records).await;
    let queries = GeneQueries::new(stores.records.clone());

    assert_eq!(queries.get_record("HGNC:1").await?, records[0]);
    assert!(matches!(queries.get_record("HGNC:404").await, Err(Error::NotFound(_))));
    Ok(())
}

#[tokio::test]
async fn list_keys_is_empty_before_ingest() -> anyhow::Result<()> {
    let queries = GeneQueries::new(Stores::in_memory().records);
    assert!(queries.list_keys().await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn field_subsets_relabel_and_omit() -> anyhow::Result<()> {
    let stores = seeded(&[rec(json!({
        "hgnc_id": "HGNC:5",
        "date_approved_reserved": "1989-06-30",
        "date_name_changed": "2015-07-13",
        "locus_group": "protein-coding gene"
    }))])
    .await;
    let queries = GeneQueries::new(stores.records.clone());

    let dates = queries.get_field_subset("HGNC:5", DATE_FIELDS).await?;
    assert_eq!(
        serde_json::to_value(&dates)?,
        json!({"date first approved": "1989-06-30", "date name last changed": "2015-07-13"})
    );

    let locus = queries.get_single_field("HGNC:5", LOCUS_FIELDS[0].0, LOCUS_FIELDS[0].1).await?;
    assert_eq!(serde_json::to_value(&locus)?, json!({"locus group": "protein-coding gene"}));

    let missing = queries.get_single_field("HGNC:5", "date_modified", "date last modified").await?;
    assert!(missing.is_empty());

    assert!(matches!(queries.get_field_subset("HGNC:6", DATE_FIELDS).await, Err(Error::NotFound(_))));
    Ok(())
}
