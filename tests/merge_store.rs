// tests/merge_store.rs
use espn_mma_scrape::store::{upsert, DataSet};

fn keys() -> Vec<String> {
    ["Player", "Date", "Opponent"].map(String::from).to_vec()
}

fn ds(rows: &[[&str; 4]]) -> DataSet {
    DataSet::new(
        ["Player", "Date", "Opponent", "KD"].map(String::from).to_vec(),
        rows.iter().map(|r| r.map(String::from).to_vec()).collect(),
    )
}

/// A handful of table / incoming pairs covering overlap, no overlap and
/// conflicting duplicates inside the incoming set.
fn cases() -> Vec<(DataSet, DataSet)> {
    let base = ds(&[["A", "2024-01-01", "B", "1"], ["A", "2023-01-01", "C", "0"]]);
    vec![
        (base.clone(), ds(&[["A", "2024-01-01", "B", "9"]])),
        (base.clone(), ds(&[["D", "2022-02-02", "E", "2"], ["D", "2021-02-02", "F", "0"]])),
        (base.clone(), ds(&[["X", "2020-01-01", "Y", "1"], ["X", "2020-01-01", "Y", "2"]])),
        (DataSet::default(), ds(&[["A", "2024-01-01", "B", "1"]])),
        (base, DataSet::default()),
    ]
}

#[test]
fn merging_twice_equals_merging_once() {
    for (table, incoming) in cases() {
        let once = upsert(table.clone(), incoming.clone(), &keys()).dataset;
        let twice = upsert(once.clone(), incoming, &keys()).dataset;
        assert_eq!(twice, once);
    }
}

#[test]
fn empty_incoming_is_identity() {
    for (table, _) in cases() {
        assert_eq!(upsert(table.clone(), DataSet::default(), &keys()).dataset, table);
    }
}

#[test]
fn existing_rows_are_a_prefix() {
    for (table, incoming) in cases() {
        let merged = upsert(table.clone(), incoming, &keys()).dataset;
        assert_eq!(&merged.rows[..table.rows.len()], &table.rows[..]);
    }
}

#[test]
fn keys_stay_unique() {
    for (table, incoming) in cases() {
        let merged = upsert(table, incoming, &keys()).dataset;
        let mut seen = std::collections::HashSet::new();
        for r in &merged.rows {
            assert!(seen.insert((&r[0], &r[1], &r[2])), "duplicate key {r:?}");
        }
    }
}

#[test]
fn key_with_separator_chars_does_not_collide() {
    // ("a|b", "c") and ("a", "b|c") would collide under a joined-string key.
    let headers = ["P", "Q"].map(String::from).to_vec();
    let existing = DataSet::new(headers.clone(), vec![vec![String::from("a|b"), String::from("c")]]);
    let incoming = DataSet::new(headers, vec![vec![String::from("a"), String::from("b|c")]]);
    let m = upsert(existing, incoming, &[String::from("P"), String::from("Q")]);
    assert_eq!(m.report.appended, 1);
    assert_eq!(m.dataset.len(), 2);
}

#[test]
fn merging_the_merged_table_into_the_original_changes_nothing() {
    for (table, incoming) in cases() {
        let merged = upsert(table.clone(), incoming, &keys()).dataset;
        let again = upsert(table, merged.clone(), &keys()).dataset;
        assert_eq!(again, merged);
    }
}
