use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::structure::{AggregateFunction, Operator, QueryStructure, WhereCondition};

/// Expected value type of a `:name` parameter, inferred from where it is used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterType {
    String,
    Number,
    Boolean,
    Date,
    List,
    Any,
}

impl fmt::Display for ParameterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ParameterType::String => "string",
            ParameterType::Number => "number",
            ParameterType::Boolean => "boolean",
            ParameterType::Date => "date",
            ParameterType::List => "list",
            ParameterType::Any => "any",
        };
        write!(f, "{}", name)
    }
}

const NUMBER_HINTS: &[&str] =
    &["id", "count", "age", "amount", "price", "qty", "total", "limit", "offset", "number", "num"];

pub struct ParameterDetector;

impl ParameterDetector {
    /// Every parameter of WHERE and HAVING in first-use order.
    ///
    /// A later use refines an earlier `Any` but never overrides a concrete type.
    pub fn detect(structure: &QueryStructure) -> IndexMap<String, ParameterType> {
        let mut parameters: IndexMap<String, ParameterType> = IndexMap::new();

        for condition in structure.where_conditions.iter().chain(structure.having_conditions.iter()) {
            for operand in condition.operands() {
                let Some(name) = operand.parameter_name() else {
                    continue;
                };
                let inferred = Self::infer(condition, name);
                match parameters.get_mut(name) {
                    Some(current) if *current == ParameterType::Any => *current = inferred,
                    Some(_) => {},
                    None => {
                        parameters.insert(name.to_string(), inferred);
                    },
                }
            }
        }

        parameters
    }

    pub fn infer(condition: &WhereCondition, name: &str) -> ParameterType {
        match condition.operator {
            Operator::Like => return ParameterType::String,
            Operator::In => return ParameterType::List,
            _ => {},
        }

        if condition.aggregate_function.as_ref().is_some_and(AggregateFunction::is_numeric) {
            return ParameterType::Number;
        }

        if let Some(hinted) = Self::from_name(name).or_else(|| Self::from_name(&condition.column)) {
            return hinted;
        }

        if condition.operator.is_range() {
            ParameterType::Any
        } else {
            ParameterType::String
        }
    }

    /// Type suggested by a parameter or column name, e.g. `is_active`,
    /// `created_at` or `min_age`.
    pub fn from_name(name: &str) -> Option<ParameterType> {
        let name = name.to_ascii_lowercase();

        if name.starts_with("is_") || name.starts_with("has_") {
            return Some(ParameterType::Boolean);
        }
        if name.contains("date") || name.contains("time") || name.ends_with("_at") {
            return Some(ParameterType::Date);
        }
        if name.split('_').any(|part| NUMBER_HINTS.contains(&part)) {
            return Some(ParameterType::Number);
        }

        None
    }
}
