use serde::{Deserialize, Serialize};

use crate::structure::{AggregateFunction, SortDirection};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct OrderByColumn {
    pub table: Option<String>,
    /// Column name, select alias or `*` inside `COUNT(*)`.
    pub column: String,
    pub aggregate_function: Option<AggregateFunction>,
    pub aggregate_distinct: bool,
    pub direction: SortDirection,
}

impl OrderByColumn {
    pub fn new(column: &str) -> Self {
        Self { column: column.to_string(), ..Default::default() }
    }

    pub fn asc(column: &str) -> Self {
        Self::new(column)
    }

    pub fn desc(column: &str) -> Self {
        Self { direction: SortDirection::Desc, ..Self::new(column) }
    }

    pub fn with_table(mut self, table: &str) -> Self { self.table = Some(table.to_string()); self }
    pub fn with_aggregate(mut self, function: AggregateFunction) -> Self { self.aggregate_function = Some(function); self }
    pub fn with_direction(mut self, direction: SortDirection) -> Self { self.direction = direction; self }
}
