mod test_utils;

use listkit::{
    ListError, NumberList, NumberTable, StringList, Table, TypeTag, TypedContainer, Value,
    types::{Validate, ValidationResult},
};
use pretty_assertions::assert_eq;

fn strings(items: &[&str]) -> StringList {
    StringList::from_vec(items.iter().map(|s| s.to_string()).collect())
}

/// Rows `[["a",1],["b",2],["a",3]]` as two columns.
fn rows_table() -> Table {
    Table::from_vec(vec![
        strings(&["a", "b", "a"]).named("col0").into_container(),
        NumberList::from_vec(vec![1.0, 2.0, 3.0]).named("col1").into_container(),
    ])
}

#[test]
fn test_repetition_count_on_a_column() {
    test_utils::init_logging();

    let table = rows_table();
    let col0 = table.get_column_by_name("col0").and_then(TypedContainer::as_string_list).unwrap();

    let repetitions = col0.get_elements_repetition_count(true);
    assert_eq!(repetitions.elements.items(), &["a", "b"]);
    assert_eq!(repetitions.counts.items(), &[2.0, 1.0]);

    let unique = col0.get_without_repetitions();
    assert_eq!(unique.type_tag(), TypeTag::StringList);
    assert_eq!(unique.items(), &["a", "b"]);
}

#[test]
fn test_transpose_round_trip() {
    let table = Table::from_vec(vec![
        NumberList::from_vec(vec![1.0, 2.0]).into_container(),
        NumberList::from_vec(vec![3.0, 4.0]).into_container(),
        NumberList::from_vec(vec![5.0, 6.0]).into_container(),
    ]);

    let once = table.get_transposed(false).to_table().unwrap();
    assert_eq!(once.len(), 2);
    let twice = once.get_transposed(false).to_table().unwrap();

    let original: Vec<Vec<Value>> = table.iter().map(TypedContainer::to_values).collect();
    let restored: Vec<Vec<Value>> = twice.iter().map(TypedContainer::to_values).collect();
    assert_eq!(restored, original);
}

#[test]
fn test_transpose_with_headers_names_columns() {
    let transposed = rows_table().get_transposed(true).to_table().unwrap();
    assert_eq!(transposed.get_names().items(), &["a", "b", "a"]);
    assert_eq!(
        transposed
            .iter()
            .map(|column| column.value_at(0))
            .collect::<Vec<_>>(),
        vec![Value::from(1.0), Value::from(2.0), Value::from(3.0)]
    );

    // the header row is consumed: transposing back has no names to recover
    let back = transposed.get_transposed(false).to_table().unwrap();
    assert_eq!(back.len(), 1);
    assert_eq!(back[0].name(), "");
}

#[test]
fn test_row_sums_require_equal_lengths() {
    let ragged = NumberTable::from_vec(vec![
        NumberList::from_vec(vec![1.0, 2.0, 3.0]),
        NumberList::from_vec(vec![1.0]),
    ]);
    match ragged.get_rows_sums() {
        Err(ListError::ShapeMismatch {
            expected, found, ..
        }) => assert_eq!((expected, found), (3, 1)),
        other => panic!("expected a shape mismatch, got {:?}", other),
    }

    let container = ragged.into_container();
    assert_eq!(container.validate().warnings().len(), 1);
}

#[test]
fn test_co_sorting_keeps_rows_aligned() {
    let sorted = rows_table().get_lists_sorted_by_column(1, false).unwrap();
    let rows: Vec<Vec<Value>> = (0..3).map(|row| sorted.get_row(row).to_values()).collect();
    assert_eq!(
        rows,
        vec![
            vec![Value::from("a"), Value::from(3.0)],
            vec![Value::from("b"), Value::from(2.0)],
            vec![Value::from("a"), Value::from(1.0)],
        ]
    );
}

#[test]
fn test_serde_round_trip() {
    let table = rows_table().named("rows").into_container();
    let json = serde_json::to_string(&table).unwrap();
    let decoded: TypedContainer = serde_json::from_str(&json).unwrap();
    assert_eq!(decoded, table);
    assert!(matches!(decoded.validate(), ValidationResult::Valid(())));
}
