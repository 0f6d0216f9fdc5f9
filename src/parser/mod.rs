pub mod scanner;

pub mod params;
pub use params::*;

pub mod splitter;

pub mod phase;
pub use phase::*;

pub mod query_parser;
pub use query_parser::*;

pub mod parse_error;
pub use parse_error::*;

pub mod word_comparer;
pub use word_comparer::*;

pub mod query_comparers;
pub use query_comparers::*;

pub mod clause_locator;
pub use clause_locator::*;

pub mod clauses;
pub use clauses::{parse_query, StructureParser};
