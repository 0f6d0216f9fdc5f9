use serde::{Deserialize, Serialize};

use crate::structure::identifiers::table_reference_name;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FromTable {
    pub table_name: String,
    pub alias: Option<String>,
}

impl FromTable {
    pub fn new(table_name: &str) -> Self {
        Self { table_name: table_name.to_string(), alias: None }
    }

    pub fn with_alias(mut self, alias: &str) -> Self { self.alias = Some(alias.to_string()); self }

    /// Name the rest of the statement uses for this table.
    pub fn reference(&self) -> &str {
        self.alias.as_deref().unwrap_or_else(|| table_reference_name(&self.table_name))
    }
}
