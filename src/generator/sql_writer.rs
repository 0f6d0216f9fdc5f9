use std::fmt;

use crate::{
    generator::BuildOptions,
    structure::{
        AggregateFunction, FromTable, GroupByColumn, JoinClause, JoinCondition, Operator, OrderByColumn,
        QueryStructure, SelectColumn, SortDirection, WhereCondition,
    },
};

/// `[t.]col` or `FUNC([DISTINCT ][t.]col)`.
fn column_expression(
    f: &mut fmt::Formatter<'_>,
    table: Option<&str>,
    column: &str,
    aggregate_function: Option<AggregateFunction>,
    distinct: bool,
) -> fmt::Result {
    if let Some(function) = aggregate_function {
        write!(f, "{}(", function)?;
        if distinct {
            write!(f, "DISTINCT ")?;
        }
    }
    if let Some(table) = table {
        write!(f, "{}.", table)?;
    }
    write!(f, "{}", column)?;
    if aggregate_function.is_some() {
        write!(f, ")")?;
    }
    Ok(())
}

impl fmt::Display for SelectColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        column_expression(f, self.table.as_deref(), &self.column, self.aggregate_function, self.distinct)?;
        if let Some(alias) = &self.alias {
            write!(f, " AS {}", alias)?;
        }
        Ok(())
    }
}

impl fmt::Display for FromTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.alias {
            Some(alias) => write!(f, "{} {}", self.table_name, alias),
            None => write!(f, "{}", self.table_name),
        }
    }
}

impl fmt::Display for JoinCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{} {} {}.{}",
            self.left_table, self.left_column, self.operator, self.right_table, self.right_column
        )
    }
}

impl fmt::Display for JoinClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.join_type, self.table_name)?;
        if let Some(alias) = &self.alias {
            write!(f, " {}", alias)?;
        }
        for (index, condition) in self.conditions.iter().enumerate() {
            let keyword = if index == 0 { "ON" } else { "AND" };
            write!(f, " {} {}", keyword, condition)?;
        }
        Ok(())
    }
}

impl fmt::Display for WhereCondition {
    /// The predicate alone; the connector is written by the enclosing clause.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let not = if self.negated { "NOT " } else { "" };
        let wrapped = self.negated && !matches!(self.operator, Operator::Between | Operator::In | Operator::Like);

        if wrapped {
            write!(f, "NOT (")?;
        }
        column_expression(f, self.table.as_deref(), &self.column, self.aggregate_function, self.aggregate_distinct)?;

        match self.operator {
            Operator::Between => {
                write!(f, " {}BETWEEN ", not)?;
                optional_operand(f, &self.min_value)?;
                write!(f, " AND ")?;
                optional_operand(f, &self.max_value)?;
            },
            Operator::In => {
                let values = self.values.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ");
                write!(f, " {}IN ({})", not, values)?;
            },
            Operator::Like => {
                write!(f, " {}LIKE ", not)?;
                optional_operand(f, &self.value)?;
            },
            Operator::IsNull | Operator::IsNotNull => write!(f, " {}", self.operator)?,
            operator => {
                write!(f, " {} ", operator)?;
                optional_operand(f, &self.value)?;
            },
        }

        if wrapped {
            write!(f, ")")?;
        }
        Ok(())
    }
}

fn optional_operand<T: fmt::Display>(f: &mut fmt::Formatter<'_>, operand: &Option<T>) -> fmt::Result {
    match operand {
        Some(operand) => write!(f, "{}", operand),
        None => write!(f, "NULL"),
    }
}

impl fmt::Display for GroupByColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        column_expression(f, self.table.as_deref(), &self.column, self.aggregate_function, false)
    }
}

impl fmt::Display for OrderByColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        column_expression(f, self.table.as_deref(), &self.column, self.aggregate_function, self.aggregate_distinct)?;
        if self.direction == SortDirection::Desc {
            write!(f, " {}", self.direction)?;
        }
        Ok(())
    }
}

/// Renders a validated structure as SQL text.
pub struct SqlWriter<'a> {
    options: &'a BuildOptions,
}

impl<'a> SqlWriter<'a> {
    pub fn new(options: &'a BuildOptions) -> Self {
        Self { options }
    }

    pub fn write(&self, structure: &QueryStructure) -> String {
        let mut lines: Vec<String> = vec![];

        let keyword = if structure.distinct { "SELECT DISTINCT" } else { "SELECT" };
        lines.push(self.list(keyword, &structure.select_columns));
        lines.push(self.list("FROM", &structure.from_tables));
        lines.extend(structure.joins.iter().map(ToString::to_string));

        if !structure.where_conditions.is_empty() {
            lines.push(self.conditions("WHERE", &structure.where_conditions));
        }
        if !structure.group_by_columns.is_empty() {
            lines.push(self.list("GROUP BY", &structure.group_by_columns));
        }
        if !structure.having_conditions.is_empty() {
            lines.push(self.conditions("HAVING", &structure.having_conditions));
        }
        if !structure.order_by_columns.is_empty() {
            lines.push(self.list("ORDER BY", &structure.order_by_columns));
        }

        match (structure.limit, structure.offset) {
            (Some(limit), Some(offset)) => lines.push(format!("LIMIT {} OFFSET {}", limit, offset)),
            (Some(limit), None) => lines.push(format!("LIMIT {}", limit)),
            (None, Some(offset)) => lines.push(format!("OFFSET {}", offset)),
            (None, None) => {},
        }

        let statement = lines.join(self.separator());

        if !self.options.include_comments {
            return statement;
        }

        let summary = Self::summary(structure);
        if self.options.format_sql {
            let comments = summary.iter().map(|line| format!("-- {}", line)).collect::<Vec<_>>().join("\n");
            format!("{}\n{}", comments, statement)
        } else {
            format!("/* {} */ {}", summary.join("; "), statement)
        }
    }

    /// Lines echoed as comments: tables, join count and filter counts.
    pub fn summary(structure: &QueryStructure) -> Vec<String> {
        let tables = structure
            .from_tables
            .iter()
            .map(ToString::to_string)
            .chain(structure.joins.iter().map(|join| match &join.alias {
                Some(alias) => format!("{} {}", join.table_name, alias),
                None => join.table_name.clone(),
            }))
            .collect::<Vec<_>>()
            .join(", ");

        vec![
            format!("Tables: {}", tables),
            format!("Joins: {}", structure.joins.len()),
            format!(
                "Filters: {} WHERE, {} HAVING",
                structure.where_conditions.len(),
                structure.having_conditions.len()
            ),
        ]
    }

    fn separator(&self) -> &'static str {
        if self.options.format_sql { "\n" } else { " " }
    }

    fn list<T: fmt::Display>(&self, keyword: &str, items: &[T]) -> String {
        let items = items.iter().map(ToString::to_string).collect::<Vec<_>>();

        if self.options.format_sql && items.len() > 1 {
            let indent = self.options.indent();
            let body = items.iter().map(|item| format!("{}{}", indent, item)).collect::<Vec<_>>().join(",\n");
            format!("{}\n{}", keyword, body)
        } else {
            format!("{} {}", keyword, items.join(", "))
        }
    }

    fn conditions(&self, keyword: &str, conditions: &[WhereCondition]) -> String {
        let mut text = keyword.to_string();
        let continuation = if self.options.format_sql { format!("\n{}", self.options.indent()) } else { " ".to_string() };

        for (index, condition) in conditions.iter().enumerate() {
            if index == 0 {
                text.push_str(&format!(" {}", condition));
            } else {
                text.push_str(&format!("{}{} {}", continuation, condition.connector, condition));
            }
        }

        text
    }
}
