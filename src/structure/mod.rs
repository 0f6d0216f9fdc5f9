pub mod operators;
pub use operators::*;

pub mod identifiers;

pub mod operand;
pub use operand::*;

pub mod select_column;
pub use select_column::*;

pub mod from_table;
pub use from_table::*;

pub mod join_clause;
pub use join_clause::*;

pub mod where_condition;
pub use where_condition::*;

pub mod group_by_column;
pub use group_by_column::*;

pub mod order_by_column;
pub use order_by_column::*;

pub mod query_structure;
pub use query_structure::*;

pub mod alias_sync;
pub use alias_sync::*;

#[cfg(test)]
pub mod _tests;
