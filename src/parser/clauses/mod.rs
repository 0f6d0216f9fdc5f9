pub mod text_collector;
pub use text_collector::*;

pub mod column_ref;
pub use column_ref::*;

pub mod operand_parser;
pub use operand_parser::*;

pub mod projection_parser;
pub use projection_parser::*;

pub mod collections_parser;
pub use collections_parser::*;

pub mod join_parser;
pub use join_parser::*;

pub mod predicate_parser;
pub use predicate_parser::*;

pub mod where_parser;
pub use where_parser::*;

pub mod group_by_parser;
pub use group_by_parser::*;

pub mod order_by_parser;
pub use order_by_parser::*;

pub mod limit_offset_parser;
pub use limit_offset_parser::*;

pub mod query;
pub use query::*;
