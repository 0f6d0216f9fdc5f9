use std::time::Instant;

use tracing::debug;

use crate::{
    api::{BuildRequest, BuildResponse, ParseRequest, ParseResponse, TranslatorConfig},
    generator::QueryGenerator,
    parser::parse_query,
};

/// Entry point for the editor: structure to SQL and SQL to structure.
#[derive(Debug, Clone, Default)]
pub struct Translator {
    config: TranslatorConfig,
}

impl Translator {
    pub fn new(config: TranslatorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &TranslatorConfig {
        &self.config
    }

    pub fn build(&self, request: &BuildRequest) -> BuildResponse {
        let started = Instant::now();

        let options = request.options.clone().unwrap_or_else(|| self.config.build.clone());
        let output = QueryGenerator::new(options).build(&request.structure);

        let elapsed = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);
        BuildResponse::from_output(output, elapsed)
    }

    pub fn parse(&self, request: &ParseRequest) -> ParseResponse {
        let sql = request.sql.as_str();

        if sql.trim().is_empty() {
            return ParseResponse::rejected("SQL text is empty", sql);
        }
        if sql.len() > self.config.max_sql_length {
            debug!(length = sql.len(), max = self.config.max_sql_length, "sql rejected");
            return ParseResponse::rejected(
                &format!("SQL text exceeds the maximum length of {} bytes", self.config.max_sql_length),
                sql,
            );
        }

        match parse_query(sql) {
            Ok(structure) => ParseResponse::parsed(structure, sql),
            Err(err) => {
                debug!(message = %err.message, start = err.start, end = err.end, "sql not parsed");
                ParseResponse::failed(&err, sql)
            },
        }
    }
}

/// Builds with the default configuration.
pub fn build(request: &BuildRequest) -> BuildResponse {
    Translator::default().build(request)
}

/// Parses with the default configuration.
pub fn parse(request: &ParseRequest) -> ParseResponse {
    Translator::default().parse(request)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use crate::{
        api::{build, parse, BuildRequest, ParseRequest, Translator, TranslatorConfig},
        generator::{BuildOptions, ParameterType},
        structure::{AggregateFunction, FromTable, Operand, Operator, QueryStructure, SelectColumn, WhereCondition, _tests::fixtures},
    };

    #[test]
    pub fn test_build_response() {
        let request = BuildRequest::new(fixtures::people_by_city()).with_options(BuildOptions::compact());

        let response = build(&request);

        assert!(response.valid);
        assert_eq!(
            response.generated_sql.as_deref(),
            Some("SELECT p.full_name, p.city FROM People p WHERE p.age > :min_age AND p.city = 'Porto' OR p.vip = TRUE ORDER BY p.full_name LIMIT 20")
        );
        assert_eq!(response.detected_parameters.get("min_age"), Some(&ParameterType::Number));
        assert!(response.validation_errors.is_empty());
    }

    #[test]
    pub fn test_build_response_uses_config_options() {
        let translator = Translator::new(TranslatorConfig::compact());
        let structure = QueryStructure::new().with_select(SelectColumn::wildcard()).with_from(FromTable::new("users"));

        let response = translator.build(&BuildRequest::new(structure));

        assert_eq!(response.generated_sql.as_deref(), Some("SELECT * FROM users"));
        assert_eq!(response.warnings, vec!["Query has no WHERE clause and no LIMIT, all rows are returned".to_string()]);
    }

    #[test]
    pub fn test_build_response_invalid() {
        let structure = QueryStructure::new().with_from(FromTable::new("users")).with_where(
            WhereCondition::compare("*", Operator::Gt, Operand::number(1)).with_aggregate(AggregateFunction::Count),
        );

        let response = build(&BuildRequest::new(structure));
        let value = serde_json::to_value(&response).expect("Failed to serialize response");

        assert_eq!(value["valid"], json!(false));
        assert_eq!(value["generatedSql"], json!(null));
        assert_eq!(
            value["validationErrors"],
            json!([
                "At least one SELECT column is required",
                "Aggregate function COUNT(*) is not allowed in WHERE, use HAVING"
            ])
        );
    }

    #[test]
    pub fn test_parse_response() {
        let sql = "SELECT p.full_name, p.city FROM People p WHERE p.age > :min_age AND p.city = 'Porto' OR p.vip = TRUE ORDER BY p.full_name LIMIT 20";

        let response = parse(&ParseRequest::new(sql));

        assert!(response.success);
        assert_eq!(response.query_structure, Some(fixtures::people_by_city()));
        assert_eq!(response.original_sql, sql);
        assert_eq!(response.error_message, None);
    }

    #[test]
    pub fn test_parse_response_failure() {
        let sql = "SELECT * FROM a UNION SELECT * FROM b";

        let response = parse(&ParseRequest::new(sql));

        assert!(!response.success);
        assert_eq!(response.query_structure, None);
        assert_eq!(
            response.error_message.as_deref(),
            Some("Set operations (UNION/INTERSECT/EXCEPT) are not supported")
        );
        let location = response.error_location.expect("Failed to read error location");
        assert_eq!(location.start, 16);
        assert_eq!(location.text, "UNION");
    }

    #[test]
    pub fn test_parse_rejects_long_and_empty_sql() {
        let translator = Translator::new(TranslatorConfig::new().with_max_sql_length(16));

        let response = translator.parse(&ParseRequest::new("SELECT name FROM users"));
        assert!(!response.success);
        assert_eq!(response.error_message.as_deref(), Some("SQL text exceeds the maximum length of 16 bytes"));
        assert_eq!(response.error_location, None);

        let response = translator.parse(&ParseRequest::new("  \n"));
        assert_eq!(response.error_message.as_deref(), Some("SQL text is empty"));
    }
}
