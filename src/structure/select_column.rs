use serde::{Deserialize, Serialize};

use crate::structure::AggregateFunction;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SelectColumn {
    pub table: Option<String>,
    pub column: String,
    pub aggregate_function: Option<AggregateFunction>,
    pub alias: Option<String>,
    /// `DISTINCT` inside the aggregate, as in `COUNT(DISTINCT x)`.
    pub distinct: bool,
}

impl SelectColumn {
    pub fn new(column: &str) -> Self {
        Self { column: column.to_string(), ..Default::default() }
    }

    pub fn wildcard() -> Self {
        Self::new("*")
    }

    pub fn aggregate(function: AggregateFunction, column: &str) -> Self {
        Self { aggregate_function: Some(function), ..Self::new(column) }
    }

    pub fn with_table(mut self, table: &str) -> Self { self.table = Some(table.to_string()); self }
    pub fn with_alias(mut self, alias: &str) -> Self { self.alias = Some(alias.to_string()); self }
    pub fn with_distinct(mut self) -> Self { self.distinct = true; self }

    pub fn is_wildcard(&self) -> bool {
        self.column == "*"
    }

    pub fn is_aggregate(&self) -> bool {
        self.aggregate_function.is_some()
    }
}
