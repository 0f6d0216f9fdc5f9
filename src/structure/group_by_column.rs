use serde::{Deserialize, Serialize};

use crate::structure::AggregateFunction;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GroupByColumn {
    pub table: Option<String>,
    pub column: String,
    /// Never valid here; kept so a pasted or hand-built structure can be reported instead of silently dropped.
    pub aggregate_function: Option<AggregateFunction>,
}

impl GroupByColumn {
    pub fn new(column: &str) -> Self {
        Self { column: column.to_string(), ..Default::default() }
    }

    pub fn with_table(mut self, table: &str) -> Self { self.table = Some(table.to_string()); self }
    pub fn with_aggregate(mut self, function: AggregateFunction) -> Self { self.aggregate_function = Some(function); self }
}
