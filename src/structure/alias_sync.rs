use thiserror::Error;
use tracing::debug;

use crate::structure::{
    identifiers::{is_valid_identifier, same_identifier, table_reference_name},
    Operand, QueryStructure,
};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AliasError {
    #[error("Alias '{alias}' is already used by table '{table}'")]
    Conflict { alias: String, table: String },
    #[error("Alias '{alias}' is not declared in FROM or JOIN")]
    NotDeclared { alias: String },
    #[error("'{alias}' is not a valid alias")]
    InvalidAlias { alias: String },
}

/// Which FROM/JOIN entry declares a reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Declaration {
    From(usize),
    Join(usize),
}

/// Returns a copy of `structure` where the table reference `old_alias` is
/// renamed to `new_alias` everywhere it is used.
///
/// The input is never modified; on error nothing is renamed.
pub fn rename_alias(structure: &QueryStructure, old_alias: &str, new_alias: &str) -> Result<QueryStructure, AliasError> {
    let old_alias = old_alias.trim();
    let new_alias = new_alias.trim();

    if !is_valid_identifier(new_alias) {
        return Err(AliasError::InvalidAlias { alias: new_alias.to_string() });
    }

    let declaration = find_declaration(structure, old_alias)
        .ok_or_else(|| AliasError::NotDeclared { alias: old_alias.to_string() })?;

    if let Some(table) = find_conflict(structure, declaration, new_alias) {
        debug!(old_alias, new_alias, table = %table, "alias rename rejected");
        return Err(AliasError::Conflict { alias: new_alias.to_string(), table });
    }

    let mut renamed = structure.clone();
    match declaration {
        Declaration::From(index) => renamed.from_tables[index].alias = Some(new_alias.to_string()),
        Declaration::Join(index) => renamed.joins[index].alias = Some(new_alias.to_string()),
    }
    rewrite_references(&mut renamed, old_alias, new_alias);

    debug!(old_alias, new_alias, "alias renamed");
    Ok(renamed)
}

fn find_declaration(structure: &QueryStructure, reference: &str) -> Option<Declaration> {
    let from = structure
        .from_tables
        .iter()
        .position(|table| same_identifier(table.reference(), reference))
        .map(Declaration::From);

    from.or_else(|| {
        structure
            .joins
            .iter()
            .position(|join| same_identifier(join.reference(), reference))
            .map(Declaration::Join)
    })
}

/// Name of another table already answering to `alias`, if any.
///
/// An aliased table still answers to its own name, so that name is taken too.
fn find_conflict(structure: &QueryStructure, declaration: Declaration, alias: &str) -> Option<String> {
    let from = structure.from_tables.iter().enumerate().map(|(index, table)| {
        (Declaration::From(index), &table.table_name, table.alias.as_deref())
    });
    let joins = structure.joins.iter().enumerate().map(|(index, join)| {
        (Declaration::Join(index), &join.table_name, join.alias.as_deref())
    });

    from.chain(joins)
        .filter(|(candidate, _, _)| *candidate != declaration)
        .find(|(_, table_name, table_alias)| {
            let reference = table_alias.unwrap_or_else(|| table_reference_name(table_name));
            same_identifier(reference, alias)
                || same_identifier(table_name, alias)
                || same_identifier(table_reference_name(table_name), alias)
        })
        .map(|(_, table_name, _)| table_name.to_string())
}

fn rename(reference: &mut String, old_alias: &str, new_alias: &str) {
    if same_identifier(reference, old_alias) {
        *reference = new_alias.to_string();
    }
}

fn rename_optional(reference: &mut Option<String>, old_alias: &str, new_alias: &str) {
    if let Some(reference) = reference.as_mut() {
        rename(reference, old_alias, new_alias);
    }
}

fn rewrite_references(structure: &mut QueryStructure, old_alias: &str, new_alias: &str) {
    for column in structure.select_columns.iter_mut() {
        rename_optional(&mut column.table, old_alias, new_alias);
    }

    for condition in structure.joins.iter_mut().flat_map(|join| join.conditions.iter_mut()) {
        rename(&mut condition.left_table, old_alias, new_alias);
        rename(&mut condition.right_table, old_alias, new_alias);
    }

    let conditions = structure.where_conditions.iter_mut().chain(structure.having_conditions.iter_mut());
    for condition in conditions {
        rename_optional(&mut condition.table, old_alias, new_alias);
        for operand in condition.operands_mut() {
            if let Operand::Column { table, .. } = operand {
                rename_optional(table, old_alias, new_alias);
            }
        }
    }

    for column in structure.group_by_columns.iter_mut() {
        rename_optional(&mut column.table, old_alias, new_alias);
    }

    for column in structure.order_by_columns.iter_mut() {
        rename_optional(&mut column.table, old_alias, new_alias);
    }
}
