use serde::{Deserialize, Serialize};

use crate::structure::{
    FromTable, GroupByColumn, JoinClause, OrderByColumn, SelectColumn, WhereCondition,
};

/// Clause-separated form of a single SELECT statement.
///
/// Owned by one editing session or request at a time. Built incrementally
/// with the `with_*` methods or replaced wholesale by the parser.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct QueryStructure {
    pub select_columns: Vec<SelectColumn>,
    pub distinct: bool,
    pub from_tables: Vec<FromTable>,
    pub joins: Vec<JoinClause>,
    pub where_conditions: Vec<WhereCondition>,
    pub group_by_columns: Vec<GroupByColumn>,
    pub having_conditions: Vec<WhereCondition>,
    pub order_by_columns: Vec<OrderByColumn>,
    pub limit: Option<u64>,
    pub offset: Option<u64>,
}

/// A FROM or JOIN entry as seen by the other clauses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeclaredTable<'a> {
    pub reference: &'a str,
    pub table_name: &'a str,
    pub aliased: bool,
}

impl QueryStructure {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_select(mut self, column: SelectColumn) -> Self { self.select_columns.push(column); self }
    pub fn with_distinct(mut self, distinct: bool) -> Self { self.distinct = distinct; self }
    pub fn with_from(mut self, table: FromTable) -> Self { self.from_tables.push(table); self }
    pub fn with_join(mut self, join: JoinClause) -> Self { self.joins.push(join); self }
    pub fn with_where(mut self, condition: WhereCondition) -> Self { self.where_conditions.push(condition); self }
    pub fn with_group_by(mut self, column: GroupByColumn) -> Self { self.group_by_columns.push(column); self }
    pub fn with_having(mut self, condition: WhereCondition) -> Self { self.having_conditions.push(condition); self }
    pub fn with_order_by(mut self, column: OrderByColumn) -> Self { self.order_by_columns.push(column); self }
    pub fn with_limit(mut self, limit: u64) -> Self { self.limit = Some(limit); self }
    pub fn with_offset(mut self, offset: u64) -> Self { self.offset = Some(offset); self }

    /// FROM tables first, then joins, in declaration order.
    pub fn declared_tables(&self) -> Vec<DeclaredTable<'_>> {
        let from = self.from_tables.iter().map(|table| DeclaredTable {
            reference: table.reference(),
            table_name: &table.table_name,
            aliased: table.alias.is_some(),
        });
        let joins = self.joins.iter().map(|join| DeclaredTable {
            reference: join.reference(),
            table_name: &join.table_name,
            aliased: join.alias.is_some(),
        });
        from.chain(joins).collect()
    }

    pub fn has_aggregates(&self) -> bool {
        self.select_columns.iter().any(SelectColumn::is_aggregate)
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}
