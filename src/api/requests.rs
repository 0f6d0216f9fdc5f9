use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::{
    generator::{BuildOptions, BuildOutput, ParameterType},
    parser::ParseError,
    structure::{Clause, QueryStructure},
};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BuildRequest {
    pub structure: QueryStructure,
    /// Overrides the translator's build options for this request.
    pub options: Option<BuildOptions>,
}

impl BuildRequest {
    pub fn new(structure: QueryStructure) -> Self {
        Self { structure, options: None }
    }

    pub fn with_options(mut self, options: BuildOptions) -> Self {
        self.options = Some(options);
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BuildResponse {
    pub generated_sql: Option<String>,
    pub valid: bool,
    pub validation_errors: Vec<String>,
    pub warnings: Vec<String>,
    pub detected_parameters: IndexMap<String, ParameterType>,
    pub build_time_ms: u64,
}

impl BuildResponse {
    pub fn from_output(output: BuildOutput, build_time_ms: u64) -> Self {
        Self {
            valid: output.is_valid(),
            generated_sql: output.sql,
            validation_errors: output.validation_errors.iter().map(ToString::to_string).collect(),
            warnings: output.warnings.iter().map(ToString::to_string).collect(),
            detected_parameters: output.detected_parameters,
            build_time_ms,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ParseRequest {
    pub sql: String,
}

impl ParseRequest {
    pub fn new(sql: &str) -> Self {
        Self { sql: sql.to_string() }
    }
}

/// Where a parse failed, as byte offsets into `originalSql`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorLocation {
    pub clause: Option<Clause>,
    pub text: String,
    pub start: usize,
    pub end: usize,
}

impl From<&ParseError> for ErrorLocation {
    fn from(err: &ParseError) -> Self {
        Self { clause: err.clause, text: err.text.clone(), start: err.start, end: err.end }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ParseResponse {
    pub success: bool,
    pub query_structure: Option<QueryStructure>,
    pub error_message: Option<String>,
    pub error_location: Option<ErrorLocation>,
    pub original_sql: String,
}

impl ParseResponse {
    pub fn parsed(structure: QueryStructure, original_sql: &str) -> Self {
        Self {
            success: true,
            query_structure: Some(structure),
            original_sql: original_sql.to_string(),
            ..Default::default()
        }
    }

    pub fn failed(err: &ParseError, original_sql: &str) -> Self {
        Self {
            success: false,
            error_message: Some(err.message.clone()),
            error_location: Some(err.into()),
            original_sql: original_sql.to_string(),
            ..Default::default()
        }
    }

    /// Rejected before parsing started; there is no location.
    pub fn rejected(message: &str, original_sql: &str) -> Self {
        Self {
            success: false,
            error_message: Some(message.to_string()),
            original_sql: original_sql.to_string(),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::{
        api::{BuildRequest, ParseRequest, ParseResponse},
        parser::ParseError,
        structure::Clause,
    };

    #[test]
    pub fn test_build_request_from_json() {
        let request: BuildRequest = serde_json::from_value(json!({
            "structure": {
                "selectColumns": [{ "table": "u", "column": "name" }],
                "fromTables": [{ "tableName": "users", "alias": "u" }],
                "whereConditions": [{
                    "table": "u",
                    "column": "age",
                    "operator": ">=",
                    "value": { "kind": "parameter", "value": "min_age" }
                }],
                "limit": 10
            },
            "options": { "formatSql": false }
        }))
        .expect("Failed to deserialize request");

        assert_eq!(request.structure.select_columns.len(), 1);
        assert_eq!(request.structure.where_conditions[0].table.as_deref(), Some("u"));
        assert_eq!(request.structure.limit, Some(10));
        assert!(!request.options.expect("Failed to read options").format_sql);
    }

    #[test]
    pub fn test_parse_request_from_json() {
        let request: ParseRequest =
            serde_json::from_value(json!({ "sql": "SELECT * FROM users" })).expect("Failed to deserialize request");

        assert_eq!(request, ParseRequest::new("SELECT * FROM users"));
    }

    #[test]
    pub fn test_failed_parse_response_json() {
        let err = ParseError::at("Unsupported value expression", Some(Clause::Where), "UPPER(x)", 26);

        let response = ParseResponse::failed(&err, "SELECT a FROM t WHERE a = UPPER(x)");
        let value = serde_json::to_value(&response).expect("Failed to serialize response");

        assert_eq!(
            value,
            json!({
                "success": false,
                "queryStructure": null,
                "errorMessage": "Unsupported value expression",
                "errorLocation": { "clause": "where", "text": "UPPER(x)", "start": 26, "end": 34 },
                "originalSql": "SELECT a FROM t WHERE a = UPPER(x)"
            })
        );
    }
}
