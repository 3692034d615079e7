use std::collections::BTreeMap;

use tracing::{debug, error, info, warn};

use crate::orderdesk::tools::config::SheetConfig;
use crate::orderdesk::tools::error::{Result, SheetError};
use crate::orderdesk::tools::io::store::SheetStore;
use crate::orderdesk::tools::model::Record;
use crate::orderdesk::tools::table::read_table;

/// Builds the `{InventoryID}-P{PathID}` label paths are keyed by.
pub fn catalog_label(inventory_id: &str, path_id: &str) -> String {
    format!("{inventory_id}-P{path_id}")
}

/// Fulfilment paths keyed by their catalog label. Read-only once built.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PathCatalog {
    paths: BTreeMap<String, Record>,
}

impl PathCatalog {
    pub fn from_records<'a, I>(records: I, config: &SheetConfig) -> Self
    where
        I: IntoIterator<Item = &'a Record>,
    {
        let mut paths = BTreeMap::new();
        for record in records {
            let label = record.value(&config.catalog_label_header);
            if label.is_blank() {
                debug!("skipping path without a catalog label");
                continue;
            }
            let label = label.text();
            if paths.insert(label.clone(), record.clone()).is_some() {
                warn!(%label, "duplicate catalog label, keeping the last row");
            }
        }
        Self { paths }
    }

    /// Reads the paths sheet of `store`.
    ///
    /// A paths sheet without the catalog label column yields an empty catalog,
    /// so every order row then fails its own lookup.
    pub fn load<S: SheetStore + ?Sized>(store: &S, config: &SheetConfig) -> Result<Self> {
        if !store.has_sheet(&config.paths_sheet) {
            return Err(SheetError::MissingSheet(config.paths_sheet.clone()));
        }
        let table = read_table(store, &config.paths_sheet, 0)?;
        if let Err(error) = table.require_column(&config.catalog_label_header) {
            error!(%error, "path catalog unavailable");
            return Ok(Self::default());
        }
        let catalog = Self::from_records(&table.records, config);
        info!(paths = catalog.len(), "path catalog loaded");
        Ok(catalog)
    }

    pub fn get_path(&self, inventory_id: &str, path_id: &str) -> Option<&Record> {
        self.lookup(&catalog_label(inventory_id, path_id))
    }

    pub fn lookup(&self, label: &str) -> Option<&Record> {
        self.paths.get(label)
    }

    pub fn len(&self) -> usize {
        self.paths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }
}
