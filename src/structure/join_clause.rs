use serde::{Deserialize, Serialize};

use crate::structure::{identifiers::table_reference_name, JoinType, Operator};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct JoinCondition {
    pub left_table: String,
    pub left_column: String,
    pub operator: Operator,
    pub right_table: String,
    pub right_column: String,
}

impl JoinCondition {
    pub fn new(left_table: &str, left_column: &str, operator: Operator, right_table: &str, right_column: &str) -> Self {
        Self {
            left_table: left_table.to_string(),
            left_column: left_column.to_string(),
            operator,
            right_table: right_table.to_string(),
            right_column: right_column.to_string(),
        }
    }

    pub fn eq(left_table: &str, left_column: &str, right_table: &str, right_column: &str) -> Self {
        Self::new(left_table, left_column, Operator::Eq, right_table, right_column)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct JoinClause {
    pub join_type: JoinType,
    pub table_name: String,
    pub alias: Option<String>,
    /// All conditions must hold (joined with `AND`).
    pub conditions: Vec<JoinCondition>,
}

impl JoinClause {
    pub fn new(join_type: JoinType, table_name: &str) -> Self {
        Self { join_type, table_name: table_name.to_string(), ..Default::default() }
    }

    pub fn with_alias(mut self, alias: &str) -> Self { self.alias = Some(alias.to_string()); self }
    pub fn with_condition(mut self, condition: JoinCondition) -> Self { self.conditions.push(condition); self }

    pub fn reference(&self) -> &str {
        self.alias.as_deref().unwrap_or_else(|| table_reference_name(&self.table_name))
    }
}
