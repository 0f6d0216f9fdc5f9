pub mod structure;
pub use structure::{QueryStructure, rename_alias, AliasError};

pub mod parser;
pub use parser::{parse_query, extract_parameters, replace_parameters_positionally, ParseError, PositionalSql};

pub mod generator;
pub use generator::{BuildOptions, BuildOutput, QueryGenerator, ParameterType};

pub mod api;
pub use api::{Translator, TranslatorConfig};
