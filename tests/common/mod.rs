#![allow(dead_code)]

use orderdesk_tools::io::store::{MemoryWorkbook, Sheet};
use orderdesk_tools::model::{Cell, Grid};

pub fn s(value: &str) -> Cell {
    Cell::from(value)
}

pub fn n(value: f64) -> Cell {
    Cell::Number(value)
}

pub fn paths_sheet() -> Sheet {
    Sheet::with_rows(
        "Paths",
        vec![
            vec![
                s("Catalog Label"),
                s("Inventory ID"),
                s("Path ID"),
                s("OH Label"),
                s("MOQ"),
                s("Quantity Increment"),
            ],
            vec![s("A1-P1"), s("A1"), n(1.0), s("Standard"), n(10.0), n(3.0)],
            vec![s("A1-P2"), s("A1"), n(2.0), s("*Express"), n(5.0), n(1.0)],
            vec![s("B2-P1"), s("B2"), n(1.0), s("Bulk"), n(2.0), n(0.0)],
            vec![s("C3-P1"), s("C3"), n(1.0), s("Cased"), n(6.0), n(3.0)],
        ],
    )
}

/// Order sheet with a title row above the header row.
pub fn order_rows() -> Grid {
    vec![
        vec![s("Spring order")],
        vec![
            s("Item"),
            s("Inventory ID"),
            s("Path ID"),
            s("Quantity"),
            s("Path"),
        ],
        vec![s("Widget"), s("A1"), n(1.0), n(5.0)],
        vec![s("Gadget"), s("A1"), n(1.0), n(12.0)],
        vec![s("Notes only")],
        vec![s("Gizmo"), s("A1"), n(9.0), n(5.0)],
    ]
}

pub fn workbook() -> MemoryWorkbook {
    MemoryWorkbook::new()
        .with_sheet(Sheet::with_rows("Order", order_rows()))
        .with_sheet(paths_sheet())
        .with_sheet(Sheet::with_rows(
            "Issues",
            vec![
                vec![s("Item"), s("Issue")],
                vec![s("Old"), s("stale issue")],
            ],
        ))
}

pub const MOQ_10: &str =
    "Our MOQ on this item is 10. Let us know if we can increase the quantity you requested.";
pub const MULTIPLES_OF_3: &str = "This item needs to be ordered in multiples of 3. Let us know if we can increase the quantity you requested.";
