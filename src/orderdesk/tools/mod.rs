pub mod catalog;
pub mod config;
pub mod dropdown;
pub mod error;
pub mod io;
pub mod model;
pub mod sync;
pub mod table;
pub mod validate;
pub mod writer;

pub use error::{Result, SheetError};
