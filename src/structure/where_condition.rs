use serde::{Deserialize, Serialize};

use crate::structure::{AggregateFunction, Connector, Operand, Operator};

/// One predicate of a WHERE or HAVING clause.
///
/// `connector` joins this condition to the one before it; the first
/// condition's connector is never rendered.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WhereCondition {
    pub table: Option<String>,
    pub column: String,
    pub aggregate_function: Option<AggregateFunction>,
    pub aggregate_distinct: bool,
    pub operator: Operator,
    pub value: Option<Operand>,
    pub values: Vec<Operand>,
    pub min_value: Option<Operand>,
    pub max_value: Option<Operand>,
    pub negated: bool,
    pub connector: Connector,
}

impl WhereCondition {
    pub fn new(column: &str, operator: Operator) -> Self {
        Self { column: column.to_string(), operator, ..Default::default() }
    }

    pub fn compare(column: &str, operator: Operator, value: Operand) -> Self {
        Self { value: Some(value), ..Self::new(column, operator) }
    }

    pub fn like(column: &str, pattern: Operand) -> Self {
        Self::compare(column, Operator::Like, pattern)
    }

    pub fn between(column: &str, min_value: Operand, max_value: Operand) -> Self {
        Self { min_value: Some(min_value), max_value: Some(max_value), ..Self::new(column, Operator::Between) }
    }

    pub fn in_list(column: &str, values: Vec<Operand>) -> Self {
        Self { values, ..Self::new(column, Operator::In) }
    }

    pub fn is_null(column: &str) -> Self {
        Self::new(column, Operator::IsNull)
    }

    pub fn is_not_null(column: &str) -> Self {
        Self::new(column, Operator::IsNotNull)
    }

    pub fn with_table(mut self, table: &str) -> Self { self.table = Some(table.to_string()); self }
    pub fn with_connector(mut self, connector: Connector) -> Self { self.connector = connector; self }
    pub fn with_negated(mut self, negated: bool) -> Self { self.negated = negated; self }
    pub fn with_aggregate(mut self, function: AggregateFunction) -> Self { self.aggregate_function = Some(function); self }
    pub fn with_aggregate_distinct(mut self) -> Self { self.aggregate_distinct = true; self }

    pub fn or(self) -> Self {
        self.with_connector(Connector::Or)
    }

    pub fn negate(self) -> Self {
        let negated = !self.negated;
        self.with_negated(negated)
    }

    /// Every operand the condition carries, in textual order.
    pub fn operands(&self) -> Vec<&Operand> {
        let mut operands: Vec<&Operand> = vec![];
        operands.extend(self.value.iter());
        operands.extend(self.values.iter());
        operands.extend(self.min_value.iter());
        operands.extend(self.max_value.iter());
        operands
    }

    pub(crate) fn operands_mut(&mut self) -> impl Iterator<Item = &mut Operand> {
        self.value
            .iter_mut()
            .chain(self.values.iter_mut())
            .chain(self.min_value.iter_mut())
            .chain(self.max_value.iter_mut())
    }
}
