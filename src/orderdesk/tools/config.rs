use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::orderdesk::tools::error::Result;

/// Sheet and column names the workbook follows.
///
/// Every component receives the configuration explicitly. Keys missing from a
/// configuration file fall back to [`SheetConfig::default`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SheetConfig {
    /// Sheet holding the order rows.
    pub order_sheet: String,
    /// Reference sheet listing every fulfilment path.
    pub paths_sheet: String,
    /// Sheet receiving the validation issues.
    pub issues_sheet: String,
    pub item_header: String,
    /// Order column carrying the path dropdown.
    pub path_header: String,
    pub inventory_id_header: String,
    pub path_id_header: String,
    pub quantity_header: String,
    /// Paths column projected into the dropdown options.
    pub oh_label_header: String,
    /// Paths column holding `{InventoryID}-P{PathID}`.
    pub catalog_label_header: String,
    pub moq_header: String,
    pub increment_header: String,
    /// Issues column holding the message text.
    pub issue_header: String,
    /// Options starting with this character are pre-selected.
    pub default_marker: char,
    /// Text written into the path cell while no item is chosen.
    pub prompt_text: String,
}

impl Default for SheetConfig {
    fn default() -> Self {
        Self {
            order_sheet: "Order".into(),
            paths_sheet: "Paths".into(),
            issues_sheet: "Issues".into(),
            item_header: "Item".into(),
            path_header: "Path".into(),
            inventory_id_header: "Inventory ID".into(),
            path_id_header: "Path ID".into(),
            quantity_header: "Quantity".into(),
            oh_label_header: "OH Label".into(),
            catalog_label_header: "Catalog Label".into(),
            moq_header: "MOQ".into(),
            increment_header: "Quantity Increment".into(),
            issue_header: "Issue".into(),
            default_marker: '*',
            prompt_text: "Choose an item".into(),
        }
    }
}

impl SheetConfig {
    /// Loads a configuration from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&data)?)
    }
}
