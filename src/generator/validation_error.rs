use thiserror::Error;

use crate::structure::{AggregateFunction, Clause, Operator};

/// A structural problem that prevents SQL from being generated.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("At least one SELECT column is required")]
    NoSelectColumns,
    #[error("At least one FROM table is required")]
    NoFromTable,
    #[error("{clause} references undeclared table or alias '{reference}'")]
    UndeclaredReference { clause: Clause, reference: String },
    #[error("Aggregate function {function}({column}) is not allowed in WHERE, use HAVING")]
    AggregateInWhere { function: AggregateFunction, column: String },
    #[error("Aggregate function {function}({column}) is not allowed in GROUP BY")]
    AggregateInGroupBy { function: AggregateFunction, column: String },
    #[error("Table reference '{reference}' is declared more than once")]
    DuplicateReference { reference: String },
    #[error("JOIN {table} requires at least one ON condition")]
    JoinWithoutCondition { table: String },
    #[error("JOIN {table} uses unsupported operator {operator} in its ON condition")]
    InvalidJoinOperator { table: String, operator: Operator },
    #[error("{clause} BETWEEN on '{column}' requires both bounds")]
    BetweenBounds { clause: Clause, column: String },
    #[error("{clause} condition on '{column}' requires a value for {operator}")]
    MissingValue { clause: Clause, column: String, operator: Operator },
    #[error("{clause} IN on '{column}' requires at least one value")]
    EmptyInList { clause: Clause, column: String },
    #[error("{clause} contains invalid identifier '{identifier}'")]
    InvalidIdentifier { clause: Clause, identifier: String },
    #[error("{clause} contains invalid number '{value}'")]
    InvalidNumber { clause: Clause, value: String },
    #[error("{clause} uses '*' outside a bare SELECT column or COUNT(*)")]
    InvalidWildcard { clause: Clause },
    #[error("{clause} uses DISTINCT with '*', which is not supported")]
    DistinctWildcard { clause: Clause },
    #[error("{clause} marks '{column}' DISTINCT without an aggregate function")]
    DistinctWithoutAggregate { clause: Clause, column: String },
    #[error("{clause} contains invalid parameter name ':{name}'")]
    InvalidParameter { clause: Clause, name: String },
}
