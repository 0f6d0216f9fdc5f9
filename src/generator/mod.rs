pub mod build_options;
pub use build_options::*;
pub mod parameter_types;
pub use parameter_types::*;
pub mod validation_error;
pub use validation_error::*;
pub mod validator;
pub use validator::*;
pub mod warnings;
pub use warnings::*;
pub mod sql_writer;
pub use sql_writer::*;
pub mod query_generator;
pub use query_generator::*;
