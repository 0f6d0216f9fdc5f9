use std::fmt;

use crate::structure::{
    identifiers::{same_identifier, table_reference_name},
    Clause, DeclaredTable, Literal, Operand, Operator, QueryStructure, SelectColumn,
};

/// Something legal but probably unintended. Never blocks generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BuildWarning {
    UnboundedResult,
    TableNameWithAlias { clause: Clause, table: String, alias: String },
    UngroupedColumn { column: String },
    LikeWithoutWildcard { column: String, pattern: String },
    HavingWithoutGroupBy,
}

impl fmt::Display for BuildWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildWarning::UnboundedResult => write!(f, "Query has no WHERE clause and no LIMIT, all rows are returned"),
            BuildWarning::TableNameWithAlias { clause, table, alias } => {
                write!(f, "{} refers to '{}' by table name although it is aliased as '{}'", clause, table, alias)
            },
            BuildWarning::UngroupedColumn { column } => {
                write!(f, "SELECT column '{}' is neither aggregated nor listed in GROUP BY", column)
            },
            BuildWarning::LikeWithoutWildcard { column, pattern } => {
                write!(f, "LIKE on '{}' uses pattern '{}' without % or _, it behaves like =", column, pattern)
            },
            BuildWarning::HavingWithoutGroupBy => write!(f, "HAVING is used without GROUP BY"),
        }
    }
}

pub struct WarningCollector;

impl WarningCollector {
    pub fn collect(structure: &QueryStructure) -> Vec<BuildWarning> {
        let mut warnings = vec![];

        if structure.where_conditions.is_empty() && structure.limit.is_none() {
            warnings.push(BuildWarning::UnboundedResult);
        }

        Self::table_names_with_alias(structure, &mut warnings);

        if structure.has_aggregates() || !structure.group_by_columns.is_empty() {
            for column in structure.select_columns.iter().filter(|column| !column.is_aggregate() && !column.is_wildcard()) {
                if !Self::is_grouped(structure, column) {
                    warnings.push(BuildWarning::UngroupedColumn { column: qualified(column.table.as_deref(), &column.column) });
                }
            }
        }

        for condition in structure.where_conditions.iter().chain(structure.having_conditions.iter()) {
            if condition.operator != Operator::Like {
                continue;
            }
            if let Some(Operand::Literal(Literal::String(pattern))) = &condition.value {
                if !pattern.contains(['%', '_']) {
                    warnings.push(BuildWarning::LikeWithoutWildcard {
                        column: qualified(condition.table.as_deref(), &condition.column),
                        pattern: pattern.clone(),
                    });
                }
            }
        }

        if !structure.having_conditions.is_empty() && structure.group_by_columns.is_empty() {
            warnings.push(BuildWarning::HavingWithoutGroupBy);
        }

        warnings
    }

    fn is_grouped(structure: &QueryStructure, column: &SelectColumn) -> bool {
        structure.group_by_columns.iter().any(|grouped| {
            let same_table = match (&grouped.table, &column.table) {
                (Some(left), Some(right)) => same_identifier(left, right),
                _ => true,
            };
            same_table && same_identifier(&grouped.column, &column.column)
        })
    }

    fn table_names_with_alias(structure: &QueryStructure, warnings: &mut Vec<BuildWarning>) {
        let declared = structure.declared_tables();

        let mut references: Vec<(Clause, &str)> = vec![];
        references.extend(structure.select_columns.iter().filter_map(|c| c.table.as_deref()).map(|t| (Clause::Select, t)));
        for join in &structure.joins {
            for condition in &join.conditions {
                references.push((Clause::Join, condition.left_table.as_str()));
                references.push((Clause::Join, condition.right_table.as_str()));
            }
        }
        for (clause, conditions) in
            [(Clause::Where, &structure.where_conditions), (Clause::Having, &structure.having_conditions)]
        {
            for condition in conditions {
                references.extend(condition.table.as_deref().map(|t| (clause, t)));
                for operand in condition.operands() {
                    if let Operand::Column { table: Some(table), .. } = operand {
                        references.push((clause, table.as_str()));
                    }
                }
            }
        }
        references.extend(structure.group_by_columns.iter().filter_map(|c| c.table.as_deref()).map(|t| (Clause::GroupBy, t)));
        references.extend(structure.order_by_columns.iter().filter_map(|c| c.table.as_deref()).map(|t| (Clause::OrderBy, t)));

        for (clause, reference) in references {
            if let Some(table) = aliased_table_named(&declared, reference) {
                let warning = BuildWarning::TableNameWithAlias {
                    clause,
                    table: reference.to_string(),
                    alias: table.reference.to_string(),
                };
                if !warnings.contains(&warning) {
                    warnings.push(warning);
                }
            }
        }
    }
}

/// The aliased entry whose table name is `reference`, unless the name is also a visible reference.
fn aliased_table_named<'a>(declared: &'a [DeclaredTable<'a>], reference: &str) -> Option<&'a DeclaredTable<'a>> {
    if declared.iter().any(|table| same_identifier(table.reference, reference)) {
        return None;
    }
    declared.iter().find(|table| {
        table.aliased
            && (same_identifier(table.table_name, reference)
                || same_identifier(table_reference_name(table.table_name), reference))
    })
}

fn qualified(table: Option<&str>, column: &str) -> String {
    match table {
        Some(table) => format!("{}.{}", table, column),
        None => column.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        generator::{BuildWarning, WarningCollector},
        structure::{
            AggregateFunction, Clause, FromTable, GroupByColumn, Operand, Operator, QueryStructure, SelectColumn,
            WhereCondition, _tests::fixtures,
        },
    };

    #[test]
    pub fn test_fixtures_have_no_warnings() {
        assert!(WarningCollector::collect(&fixtures::people_by_city()).is_empty());
        assert!(WarningCollector::collect(&fixtures::orders_per_person()).is_empty());
        assert!(WarningCollector::collect(&fixtures::product_search()).is_empty());
    }

    #[test]
    pub fn test_unbounded_and_table_name() {
        let structure = QueryStructure::new()
            .with_select(SelectColumn::new("name").with_table("users"))
            .with_from(FromTable::new("public.users").with_alias("u"));

        let warnings = WarningCollector::collect(&structure);

        assert_eq!(
            warnings,
            vec![
                BuildWarning::UnboundedResult,
                BuildWarning::TableNameWithAlias { clause: Clause::Select, table: "users".into(), alias: "u".into() },
            ]
        );
    }

    #[test]
    pub fn test_grouping_warnings() {
        let structure = QueryStructure::new()
            .with_select(SelectColumn::new("city").with_table("u"))
            .with_select(SelectColumn::new("name").with_table("u"))
            .with_select(SelectColumn::aggregate(AggregateFunction::Count, "*"))
            .with_from(FromTable::new("users").with_alias("u"))
            .with_group_by(GroupByColumn::new("city"))
            .with_limit(10);

        let warnings = WarningCollector::collect(&structure);

        assert_eq!(warnings, vec![BuildWarning::UngroupedColumn { column: "u.name".into() }]);
    }

    #[test]
    pub fn test_like_and_having() {
        let structure = QueryStructure::new()
            .with_select(SelectColumn::aggregate(AggregateFunction::Count, "*"))
            .with_from(FromTable::new("users"))
            .with_where(WhereCondition::like("name", Operand::string("Ana")))
            .with_where(WhereCondition::like("email", Operand::string("%@mail.com")))
            .with_having(
                WhereCondition::compare("*", Operator::Gt, Operand::number(1)).with_aggregate(AggregateFunction::Count),
            );

        let warnings = WarningCollector::collect(&structure);

        assert_eq!(
            warnings,
            vec![
                BuildWarning::LikeWithoutWildcard { column: "name".into(), pattern: "Ana".into() },
                BuildWarning::HavingWithoutGroupBy,
            ]
        );
        assert_eq!(warnings[1].to_string(), "HAVING is used without GROUP BY");
    }
}
