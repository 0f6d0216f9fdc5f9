use indexmap::IndexMap;
use tracing::debug;

use crate::{
    generator::{BuildOptions, BuildWarning, ParameterDetector, ParameterType, SqlWriter, ValidationError, Validator, WarningCollector},
    structure::QueryStructure,
};

/// Result of turning a structure into SQL.
///
/// `sql` is `None` whenever `validation_errors` is not empty. Warnings and
/// detected parameters are reported either way.
#[derive(Debug, Clone, PartialEq)]
pub struct BuildOutput {
    pub sql: Option<String>,
    pub detected_parameters: IndexMap<String, ParameterType>,
    pub validation_errors: Vec<ValidationError>,
    pub warnings: Vec<BuildWarning>,
}

impl BuildOutput {
    pub fn is_valid(&self) -> bool {
        self.validation_errors.is_empty()
    }
}

#[derive(Debug, Clone, Default)]
pub struct QueryGenerator {
    options: BuildOptions,
}

impl QueryGenerator {
    pub fn new(options: BuildOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &BuildOptions {
        &self.options
    }

    pub fn build(&self, structure: &QueryStructure) -> BuildOutput {
        let validation_errors = Validator::validate(structure);
        let warnings = WarningCollector::collect(structure);
        let detected_parameters = ParameterDetector::detect(structure);

        let sql = if validation_errors.is_empty() { Some(SqlWriter::new(&self.options).write(structure)) } else { None };

        debug!(
            valid = validation_errors.is_empty(),
            errors = validation_errors.len(),
            warnings = warnings.len(),
            parameters = detected_parameters.len(),
            "query built"
        );

        BuildOutput { sql, detected_parameters, validation_errors, warnings }
    }
}
