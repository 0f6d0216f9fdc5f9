use crate::structure::Clause;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Phase {
    #[default]
    Projection = 0,
    Collections = 1,
    Joins = 2,
    Criteria = 3,
    Aggregates = 4,
    Having = 5,
    OrderBy = 6,
    LimitAndOffset = 7,
    EOF = 8,
}

impl Phase {
    pub fn clause(&self) -> Option<Clause> {
        match self {
            Phase::Projection => Some(Clause::Select),
            Phase::Collections => Some(Clause::From),
            Phase::Joins => Some(Clause::Join),
            Phase::Criteria => Some(Clause::Where),
            Phase::Aggregates => Some(Clause::GroupBy),
            Phase::Having => Some(Clause::Having),
            Phase::OrderBy => Some(Clause::OrderBy),
            Phase::LimitAndOffset => Some(Clause::LimitOffset),
            Phase::EOF => None,
        }
    }
}
