use once_cell::sync::Lazy;

use crate::parser::WordComparer;

pub static COMPARERS: Lazy<QueryComparers> = Lazy::new(QueryComparers::new);

#[derive(Debug)]
pub struct QueryComparers {
    pub select: WordComparer,
    pub distinct: WordComparer,
    pub from: WordComparer,
    pub join: WordComparer,
    pub inner_join: WordComparer,
    pub left_join: WordComparer,
    pub left_outer_join: WordComparer,
    pub right_join: WordComparer,
    pub right_outer_join: WordComparer,
    pub full_join: WordComparer,
    pub full_outer_join: WordComparer,
    pub cross_join: WordComparer,
    pub natural: WordComparer,
    pub on: WordComparer,
    pub using: WordComparer,
    pub r#where: WordComparer,
    pub group_by: WordComparer,
    pub having: WordComparer,
    pub order_by: WordComparer,
    pub limit: WordComparer,
    pub offset: WordComparer,
    pub and: WordComparer,
    pub or: WordComparer,
    pub not: WordComparer,
    pub between: WordComparer,
    pub r#in: WordComparer,
    pub like: WordComparer,
    pub is_null: WordComparer,
    pub is_not_null: WordComparer,
    pub equal: WordComparer,
    pub not_equal_b: WordComparer, // basic
    pub not_equal_c: WordComparer, // c
    pub greater_than: WordComparer,
    pub greater_than_or_equal: WordComparer,
    pub less_than: WordComparer,
    pub less_than_or_equal: WordComparer,
    pub with: WordComparer,
    pub union: WordComparer,
    pub intersect: WordComparer,
    pub except: WordComparer,
    pub over: WordComparer,
    pub insert: WordComparer,
    pub update: WordComparer,
    pub delete: WordComparer,
}

impl Default for QueryComparers {
    fn default() -> Self {
        Self::new()
    }
}

impl QueryComparers {
    pub fn new() -> Self {
        Self {
            select: WordComparer::new("SELECT"),
            distinct: WordComparer::new("DISTINCT"),
            from: WordComparer::new("FROM"),
            join: WordComparer::new("JOIN"),
            inner_join: WordComparer::new("INNER JOIN"),
            left_join: WordComparer::new("LEFT JOIN"),
            left_outer_join: WordComparer::new("LEFT OUTER JOIN"),
            right_join: WordComparer::new("RIGHT JOIN"),
            right_outer_join: WordComparer::new("RIGHT OUTER JOIN"),
            full_join: WordComparer::new("FULL JOIN"),
            full_outer_join: WordComparer::new("FULL OUTER JOIN"),
            cross_join: WordComparer::new("CROSS JOIN"),
            natural: WordComparer::new("NATURAL"),
            on: WordComparer::new("ON"),
            using: WordComparer::new("USING"),
            r#where: WordComparer::new("WHERE"),
            group_by: WordComparer::new("GROUP BY"),
            having: WordComparer::new("HAVING"),
            order_by: WordComparer::new("ORDER BY"),
            limit: WordComparer::new("LIMIT"),
            offset: WordComparer::new("OFFSET"),
            and: WordComparer::new("AND"),
            or: WordComparer::new("OR"),
            not: WordComparer::new("NOT"),
            between: WordComparer::new("BETWEEN"),
            r#in: WordComparer::new("IN"),
            like: WordComparer::new("LIKE"),
            is_null: WordComparer::new("IS NULL"),
            is_not_null: WordComparer::new("IS NOT NULL"),
            equal: WordComparer::symbol("="),
            not_equal_b: WordComparer::symbol("<>"),
            not_equal_c: WordComparer::symbol("!="),
            greater_than: WordComparer::symbol(">"),
            greater_than_or_equal: WordComparer::symbol(">="),
            less_than: WordComparer::symbol("<"),
            less_than_or_equal: WordComparer::symbol("<="),
            with: WordComparer::new("WITH"),
            union: WordComparer::new("UNION"),
            intersect: WordComparer::new("INTERSECT"),
            except: WordComparer::new("EXCEPT"),
            over: WordComparer::new("OVER"),
            insert: WordComparer::new("INSERT"),
            update: WordComparer::new("UPDATE"),
            delete: WordComparer::new("DELETE"),
        }
    }
}
