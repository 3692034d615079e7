//! Core library for the orderdesk command line application.
//!
//! The library automates an order workbook: the data store sits behind
//! [`orderdesk::tools::io::store::SheetStore`], sheets are read into records by
//! [`orderdesk::tools::table`], fulfilment paths are indexed in
//! [`orderdesk::tools::catalog`], quantity rules live in
//! [`orderdesk::tools::validate`], and the dependent path dropdown is kept in
//! step by [`orderdesk::tools::dropdown`]. File-level workflows used by the CLI
//! are under [`orderdesk::tools::sync`].

pub mod orderdesk;

pub use orderdesk::tools::{
    Result, SheetError, catalog, config, dropdown, error, io, model, sync, table, validate, writer,
};
