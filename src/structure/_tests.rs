#[cfg(test)]
pub mod fixtures {
    use crate::structure::{
        AggregateFunction, FromTable, GroupByColumn, JoinClause, JoinCondition, JoinType, Operand, Operator,
        OrderByColumn, QueryStructure, SelectColumn, WhereCondition,
    };

    /// People filtered with three mixed AND/OR conditions.
    pub fn people_by_city() -> QueryStructure {
        QueryStructure::new()
            .with_select(SelectColumn::new("full_name").with_table("p"))
            .with_select(SelectColumn::new("city").with_table("p"))
            .with_from(FromTable::new("People").with_alias("p"))
            .with_where(WhereCondition::compare("age", Operator::Gt, Operand::param("min_age")).with_table("p"))
            .with_where(WhereCondition::compare("city", Operator::Eq, Operand::string("Porto")).with_table("p"))
            .with_where(WhereCondition::compare("vip", Operator::Eq, Operand::boolean(true)).with_table("p").or())
            .with_order_by(OrderByColumn::asc("full_name").with_table("p"))
            .with_limit(20)
    }

    /// Orders per person with joins, grouping and a HAVING filter.
    pub fn orders_per_person() -> QueryStructure {
        QueryStructure::new()
            .with_select(SelectColumn::new("full_name").with_table("p"))
            .with_select(SelectColumn::aggregate(AggregateFunction::Count, "id").with_table("o").with_alias("total_orders"))
            .with_select(SelectColumn::aggregate(AggregateFunction::Sum, "quantity").with_table("o").with_alias("items"))
            .with_from(FromTable::new("People").with_alias("p"))
            .with_join(
                JoinClause::new(JoinType::Inner, "Orders")
                    .with_alias("o")
                    .with_condition(JoinCondition::eq("o", "person_id", "p", "id")),
            )
            .with_join(
                JoinClause::new(JoinType::Left, "Products")
                    .with_alias("pr")
                    .with_condition(JoinCondition::eq("pr", "id", "o", "product_id")),
            )
            .with_where(
                WhereCondition::between("order_date", Operand::param("start_date"), Operand::param("end_date"))
                    .with_table("o"),
            )
            .with_where(
                WhereCondition::in_list("status", vec![Operand::string("new"), Operand::string("processing")])
                    .with_table("o"),
            )
            .with_group_by(GroupByColumn::new("full_name").with_table("p"))
            .with_having(
                WhereCondition::compare("id", Operator::Gt, Operand::number(1))
                    .with_table("o")
                    .with_aggregate(AggregateFunction::Count),
            )
            .with_order_by(
                OrderByColumn::desc("id").with_table("o").with_aggregate(AggregateFunction::Count),
            )
            .with_limit(10)
            .with_offset(5)
    }

    /// Product search using LIKE, negations and null checks.
    pub fn product_search() -> QueryStructure {
        QueryStructure::new()
            .with_distinct(true)
            .with_select(SelectColumn::new("category").with_table("pr"))
            .with_select(SelectColumn::new("name").with_table("pr").with_alias("product"))
            .with_from(FromTable::new("Products").with_alias("pr"))
            .with_where(WhereCondition::like("name", Operand::param("pattern")).with_table("pr"))
            .with_where(
                WhereCondition::between("price", Operand::number(10), Operand::number("99.90"))
                    .with_table("pr")
                    .negate(),
            )
            .with_where(WhereCondition::is_not_null("category").with_table("pr").or())
            .with_where(
                WhereCondition::compare("price", Operator::GtEq, Operand::param("max_price"))
                    .with_table("pr")
                    .negate(),
            )
            .with_where(
                WhereCondition::in_list("category", vec![Operand::string("Books"), Operand::string("Toys")])
                    .with_table("pr")
                    .negate()
                    .or(),
            )
            .with_limit(50)
    }
}
