use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::{
    generator::ValidationError,
    structure::{
        identifiers::{is_valid_identifier, is_valid_table_name, same_identifier, table_reference_name},
        is_number_literal, AggregateFunction, Clause, Literal, Operand, Operator, QueryStructure, WhereCondition,
    },
};

static PARAMETER_NAME: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z0-9_]+$").expect("parameter name pattern"));

/// Names visible to the clauses after FROM/JOIN.
pub struct ValidationContext {
    /// map visible name (lowercase) -> table name
    pub collections: IndexMap<String, String>,
}

impl ValidationContext {
    pub fn new() -> Self {
        Self { collections: IndexMap::new() }
    }

    pub fn add_collection(&mut self, visible: &str, backing: &str) {
        self.collections.insert(visible.to_ascii_lowercase(), backing.to_string());
    }

    /// Alias, unaliased table name or full table name of a declared entry.
    pub fn resolves(&self, reference: &str) -> bool {
        self.collections.iter().any(|(visible, backing)| {
            same_identifier(visible, reference)
                || same_identifier(backing, reference)
                || same_identifier(table_reference_name(backing), reference)
        })
    }
}

impl Default for ValidationContext {
    fn default() -> Self {
        Self::new()
    }
}

/// A column reference as it appears in any clause.
struct ColumnUse<'a> {
    clause: Clause,
    table: Option<&'a str>,
    column: &'a str,
    aggregate_function: Option<AggregateFunction>,
    distinct: bool,
}

pub struct Validator {
    context: ValidationContext,
    errors: Vec<ValidationError>,
}

impl Validator {
    /// Every structural problem of `structure`, in clause order.
    pub fn validate(structure: &QueryStructure) -> Vec<ValidationError> {
        let mut validator = Self { context: ValidationContext::new(), errors: vec![] };

        validator.check_collections(structure);
        validator.check_select(structure);
        validator.check_joins(structure);

        for condition in &structure.where_conditions {
            if let Some(function) = condition.aggregate_function {
                validator.errors.push(ValidationError::AggregateInWhere {
                    function,
                    column: condition.column.clone(),
                });
            }
            validator.check_condition(Clause::Where, condition);
        }

        for column in &structure.group_by_columns {
            if let Some(function) = column.aggregate_function {
                validator.errors.push(ValidationError::AggregateInGroupBy { function, column: column.column.clone() });
            }
            validator.check_column(ColumnUse {
                clause: Clause::GroupBy,
                table: column.table.as_deref(),
                column: &column.column,
                aggregate_function: column.aggregate_function,
                distinct: false,
            });
        }

        for condition in &structure.having_conditions {
            validator.check_condition(Clause::Having, condition);
        }

        for column in &structure.order_by_columns {
            validator.check_column(ColumnUse {
                clause: Clause::OrderBy,
                table: column.table.as_deref(),
                column: &column.column,
                aggregate_function: column.aggregate_function,
                distinct: column.aggregate_distinct,
            });
        }

        validator.errors
    }

    fn check_collections(&mut self, structure: &QueryStructure) {
        if structure.from_tables.is_empty() {
            self.errors.push(ValidationError::NoFromTable);
        }

        for table in &structure.from_tables {
            self.check_table(Clause::From, &table.table_name, table.alias.as_deref());
        }
        for join in &structure.joins {
            self.check_table(Clause::Join, &join.table_name, join.alias.as_deref());
        }

        for declared in structure.declared_tables() {
            if self.context.collections.contains_key(&declared.reference.to_ascii_lowercase()) {
                let error = ValidationError::DuplicateReference { reference: declared.reference.to_string() };
                if !self.errors.contains(&error) {
                    self.errors.push(error);
                }
                continue;
            }
            self.context.add_collection(declared.reference, declared.table_name);
        }
    }

    fn check_table(&mut self, clause: Clause, table_name: &str, alias: Option<&str>) {
        if !is_valid_table_name(table_name) {
            self.invalid_identifier(clause, table_name);
        }
        if let Some(alias) = alias {
            if !is_valid_identifier(alias) {
                self.invalid_identifier(clause, alias);
            }
        }
    }

    fn check_select(&mut self, structure: &QueryStructure) {
        if structure.select_columns.is_empty() {
            self.errors.push(ValidationError::NoSelectColumns);
        }

        for column in &structure.select_columns {
            self.check_column(ColumnUse {
                clause: Clause::Select,
                table: column.table.as_deref(),
                column: &column.column,
                aggregate_function: column.aggregate_function,
                distinct: column.distinct,
            });

            if let Some(alias) = &column.alias {
                if column.is_wildcard() && column.aggregate_function.is_none() {
                    self.errors.push(ValidationError::InvalidWildcard { clause: Clause::Select });
                } else if !is_valid_identifier(alias) {
                    self.invalid_identifier(Clause::Select, alias);
                }
            }
        }
    }

    fn check_joins(&mut self, structure: &QueryStructure) {
        for join in &structure.joins {
            if join.conditions.is_empty() {
                self.errors.push(ValidationError::JoinWithoutCondition { table: join.table_name.clone() });
            }

            for condition in &join.conditions {
                if !condition.operator.is_comparison() {
                    self.errors.push(ValidationError::InvalidJoinOperator {
                        table: join.table_name.clone(),
                        operator: condition.operator,
                    });
                }
                for (table, column) in [
                    (&condition.left_table, &condition.left_column),
                    (&condition.right_table, &condition.right_column),
                ] {
                    self.check_column(ColumnUse {
                        clause: Clause::Join,
                        table: Some(table.as_str()),
                        column: column.as_str(),
                        aggregate_function: None,
                        distinct: false,
                    });
                }
            }
        }
    }

    fn check_condition(&mut self, clause: Clause, condition: &WhereCondition) {
        self.check_column(ColumnUse {
            clause,
            table: condition.table.as_deref(),
            column: &condition.column,
            aggregate_function: condition.aggregate_function,
            distinct: condition.aggregate_distinct,
        });

        let column = condition.column.clone();
        match condition.operator {
            Operator::Between => {
                if condition.min_value.is_none() || condition.max_value.is_none() {
                    self.errors.push(ValidationError::BetweenBounds { clause, column });
                }
            },
            Operator::In => {
                if condition.values.is_empty() {
                    self.errors.push(ValidationError::EmptyInList { clause, column });
                }
            },
            Operator::IsNull | Operator::IsNotNull => {},
            operator => {
                if condition.value.is_none() {
                    self.errors.push(ValidationError::MissingValue { clause, column, operator });
                }
            },
        }

        for operand in condition.operands() {
            self.check_operand(clause, operand);
        }
    }

    fn check_operand(&mut self, clause: Clause, operand: &Operand) {
        match operand {
            Operand::Parameter(name) => {
                if !PARAMETER_NAME.is_match(name) {
                    self.errors.push(ValidationError::InvalidParameter { clause, name: name.clone() });
                }
            },
            Operand::Literal(Literal::Number(value)) => {
                if !is_number_literal(value) {
                    self.errors.push(ValidationError::InvalidNumber { clause, value: value.clone() });
                }
            },
            Operand::Literal(_) => {},
            Operand::Column { table, column } => self.check_column(ColumnUse {
                clause,
                table: table.as_deref(),
                column,
                aggregate_function: None,
                distinct: false,
            }),
        }
    }

    fn check_column(&mut self, usage: ColumnUse<'_>) {
        let ColumnUse { clause, table, column, aggregate_function, distinct } = usage;

        if let Some(table) = table {
            if !is_valid_identifier(table) {
                self.invalid_identifier(clause, table);
            } else if !self.context.resolves(table) {
                self.errors.push(ValidationError::UndeclaredReference { clause, reference: table.to_string() });
            }
        }

        if column == "*" {
            match aggregate_function {
                None if clause == Clause::Select => {},
                Some(_) if table.is_some() => self.errors.push(ValidationError::InvalidWildcard { clause }),
                Some(function) if function.accepts_wildcard() => {
                    if distinct {
                        self.errors.push(ValidationError::DistinctWildcard { clause });
                    }
                },
                _ => self.errors.push(ValidationError::InvalidWildcard { clause }),
            }
            return;
        }

        if !is_valid_identifier(column) {
            self.invalid_identifier(clause, column);
        }
        if distinct && aggregate_function.is_none() {
            self.errors.push(ValidationError::DistinctWithoutAggregate { clause, column: column.to_string() });
        }
    }

    fn invalid_identifier(&mut self, clause: Clause, identifier: &str) {
        self.errors.push(ValidationError::InvalidIdentifier { clause, identifier: identifier.to_string() });
    }
}
