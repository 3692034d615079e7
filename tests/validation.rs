mod common;

use common::{MOQ_10, MULTIPLES_OF_3, n, paths_sheet, s, workbook};
use orderdesk_tools::SheetError;
use orderdesk_tools::catalog::{PathCatalog, catalog_label};
use orderdesk_tools::config::SheetConfig;
use orderdesk_tools::io::store::{MemoryWorkbook, Sheet, SheetStore, atomically};
use orderdesk_tools::model::{Cell, CellRef, Issue, Record};
use orderdesk_tools::table::Table;
use orderdesk_tools::validate::{check_orders, validate_orders, validate_row};

fn catalog() -> PathCatalog {
    let table = Table::from_grid(paths_sheet().rows(), 0);
    PathCatalog::from_records(&table.records, &SheetConfig::default())
}

fn order(item: &str, inventory_id: &str, path_id: f64, quantity: impl Into<Cell>) -> Record {
    Record::new()
        .with("Item", item)
        .with("Inventory ID", inventory_id)
        .with("Path ID", path_id)
        .with("Quantity", quantity)
}

#[test]
fn catalog_finds_paths_by_inventory_and_path_id() {
    let catalog = catalog();

    assert_eq!(catalog.len(), 4);
    assert_eq!(catalog_label("A1", "2"), "A1-P2");
    let path = catalog.get_path("A1", "2").expect("A1-P2 present");
    assert_eq!(path.value("OH Label"), &s("*Express"));
    assert!(catalog.get_path("A1", "3").is_none());
    assert!(catalog.get_path("A", "11").is_none());
}

#[test]
fn catalog_skips_unlabelled_rows_and_keeps_the_last_duplicate() {
    let config = SheetConfig::default();
    let records = vec![
        Record::new().with("Catalog Label", "A1-P1").with("MOQ", 1.0),
        Record::new().with("Catalog Label", "").with("MOQ", 2.0),
        Record::new().with("Catalog Label", "A1-P1").with("MOQ", 3.0),
    ];

    let catalog = PathCatalog::from_records(&records, &config);

    assert_eq!(catalog.len(), 1);
    assert_eq!(catalog.lookup("A1-P1").unwrap().value("MOQ"), &n(3.0));
}

#[test]
fn short_order_breaks_both_rules() {
    let issues = validate_row(
        &order("Widget", "A1", 1.0, 5.0),
        &catalog(),
        &SheetConfig::default(),
    )
    .expect("row validated");

    assert_eq!(
        issues,
        vec![Issue::new("Widget", MOQ_10), Issue::new("Widget", MULTIPLES_OF_3)]
    );
}

#[test]
fn order_above_moq_in_whole_increments_is_clean() {
    let issues = validate_row(
        &order("Widget", "A1", 1.0, 12.0),
        &catalog(),
        &SheetConfig::default(),
    )
    .expect("row validated");

    assert!(issues.is_empty());
}

#[test]
fn order_exactly_at_moq_is_flagged() {
    let issues = validate_row(
        &order("Case", "C3", 1.0, 6.0),
        &catalog(),
        &SheetConfig::default(),
    )
    .expect("row validated");

    assert_eq!(issues.len(), 1);
    assert!(issues[0].message.starts_with("Our MOQ on this item is 6."));
}

#[test]
fn increment_rule_flags_one_short_of_a_multiple() {
    let config = SheetConfig::default();

    let issues = validate_row(&order("Case", "C3", 1.0, 11.0), &catalog(), &config).unwrap();
    assert_eq!(issues.len(), 1);
    assert!(issues[0].message.contains("multiples of 3"));

    let issues = validate_row(&order("Case", "C3", 1.0, 9.0), &catalog(), &config).unwrap();
    assert!(issues.is_empty());
}

#[test]
fn zero_increment_disables_the_increment_rule() {
    let issues = validate_row(
        &order("Bulk", "B2", 1.0, 7.0),
        &catalog(),
        &SheetConfig::default(),
    )
    .unwrap();

    assert!(issues.is_empty());
}

#[test]
fn numeric_text_is_accepted_as_quantity() {
    let issues = validate_row(
        &order("Widget", "A1", 1.0, "12"),
        &catalog(),
        &SheetConfig::default(),
    )
    .unwrap();

    assert!(issues.is_empty());
}

#[test]
fn validation_is_repeatable() {
    let config = SheetConfig::default();
    let catalog = catalog();
    let row = order("Widget", "A1", 1.0, 5.0);

    let first = validate_row(&row, &catalog, &config).unwrap();
    let second = validate_row(&row, &catalog, &config).unwrap();

    assert_eq!(first, second);
}

#[test]
fn rows_without_inventory_id_are_not_checked() {
    let row = Record::new().with("Item", "Notes only").with("Inventory ID", "");

    let issues = validate_row(&row, &catalog(), &SheetConfig::default()).unwrap();

    assert!(issues.is_empty());
}

#[test]
fn unknown_path_is_a_lookup_error() {
    let err = validate_row(
        &order("Gizmo", "A1", 9.0, 5.0),
        &catalog(),
        &SheetConfig::default(),
    )
    .expect_err("path is missing");

    match err {
        SheetError::MissingPath { item, label } => {
            assert_eq!(item, "Gizmo");
            assert_eq!(label, "A1-P9");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn non_numeric_quantity_is_rejected() {
    let err = validate_row(
        &order("Widget", "A1", 1.0, "lots"),
        &catalog(),
        &SheetConfig::default(),
    )
    .expect_err("quantity is not a number");

    assert!(matches!(err, SheetError::InvalidNumber { ref value, .. } if value == "lots"));
}

#[test]
fn non_finite_quantity_text_is_rejected() {
    let config = SheetConfig::default();

    for text in ["NaN", "inf", "-infinity"] {
        let err = validate_row(&order("Widget", "A1", 1.0, text), &catalog(), &config)
            .expect_err("quantity is not finite");
        assert!(matches!(err, SheetError::InvalidNumber { ref value, .. } if value == text));
    }
}

#[test]
fn paths_sheet_without_catalog_labels_fails_each_row() {
    let book = MemoryWorkbook::new()
        .with_sheet(Sheet::with_rows("Order", common::order_rows()))
        .with_sheet(Sheet::with_rows(
            "Paths",
            vec![vec![s("Inventory ID"), s("MOQ")], vec![s("A1"), n(10.0)]],
        ));

    let report = check_orders(&book, &SheetConfig::default()).expect("run completes");

    assert_eq!(report.checked, 0);
    assert!(report.issues.is_empty());
    let rows: Vec<u32> = report.failures.iter().map(|failure| failure.row).collect();
    assert_eq!(rows, vec![3, 4, 6]);
    assert!(
        report
            .failures
            .iter()
            .all(|failure| matches!(failure.error, SheetError::MissingPath { .. }))
    );
}

#[test]
fn batch_run_reports_failed_rows_and_checks_the_rest() {
    let mut book = workbook();

    let report = validate_orders(&mut book, &SheetConfig::default()).expect("run completes");

    assert_eq!(report.checked, 2);
    assert_eq!(
        report.issues,
        vec![Issue::new("Widget", MOQ_10), Issue::new("Widget", MULTIPLES_OF_3)]
    );
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].row, 6);
    assert!(matches!(report.failures[0].error, SheetError::MissingPath { .. }));
    assert!(!report.is_clean());
}

#[test]
fn batch_run_replaces_the_issues_list() {
    let mut book = workbook();

    validate_orders(&mut book, &SheetConfig::default()).expect("run completes");

    assert_eq!(
        book.sheet("Issues").unwrap().rows(),
        &vec![
            vec![s("Item"), s("Issue")],
            vec![s("Widget"), s(MOQ_10)],
            vec![s("Widget"), s(MULTIPLES_OF_3)],
        ]
    );
}

#[test]
fn batch_run_creates_a_missing_issues_sheet() {
    let mut book = MemoryWorkbook::new()
        .with_sheet(Sheet::with_rows("Order", common::order_rows()))
        .with_sheet(paths_sheet());

    validate_orders(&mut book, &SheetConfig::default()).expect("run completes");

    let issues = book.sheet("Issues").expect("issues sheet created");
    assert_eq!(issues.rows()[0], vec![s("Item"), s("Issue")]);
    assert_eq!(issues.rows().len(), 3);
}

#[test]
fn missing_paths_sheet_aborts_without_touching_issues() {
    let mut book = MemoryWorkbook::new()
        .with_sheet(Sheet::with_rows("Order", common::order_rows()))
        .with_sheet(Sheet::with_rows(
            "Issues",
            vec![vec![s("Item"), s("Issue")], vec![s("Old"), s("stale issue")]],
        ));
    let before = book.clone();

    let err = validate_orders(&mut book, &SheetConfig::default()).expect_err("paths missing");

    assert!(matches!(err, SheetError::MissingSheet(ref name) if name == "Paths"));
    assert_eq!(book, before);
}

#[test]
fn order_sheet_without_item_header_is_a_configuration_error() {
    let book = MemoryWorkbook::new()
        .with_sheet(Sheet::with_rows("Order", vec![vec![s("Product"), s("Quantity")]]))
        .with_sheet(paths_sheet());

    let err = check_orders(&book, &SheetConfig::default()).expect_err("no header row");

    assert!(matches!(err, SheetError::MissingColumn { ref column, .. } if column == "Item"));
}

#[test]
fn renamed_columns_follow_the_configuration() {
    let config: SheetConfig = serde_json::from_value(serde_json::json!({
        "order_sheet": "Bestellung",
        "quantity_header": "Menge"
    }))
    .expect("config parsed");
    let book = MemoryWorkbook::new()
        .with_sheet(Sheet::with_rows(
            "Bestellung",
            vec![
                vec![s("Item"), s("Inventory ID"), s("Path ID"), s("Menge")],
                vec![s("Widget"), s("A1"), n(1.0), n(12.0)],
            ],
        ))
        .with_sheet(paths_sheet());

    let report = check_orders(&book, &config).expect("run completes");

    assert_eq!(report.checked, 1);
    assert!(report.is_clean());
}

#[test]
fn failed_operations_roll_the_store_back() {
    let mut book = workbook();
    let before = book.clone();

    let result: orderdesk_tools::Result<()> = atomically(&mut book, |store| {
        store.set_cell("Order", CellRef::new(2, 3), n(99.0))?;
        Err(SheetError::MissingSheet("Elsewhere".into()))
    });

    assert!(result.is_err());
    assert_eq!(book, before);
}
