//! Set-operation planner — unions with compatibility checking.
//!
//! Both inputs must have the same arity, and column names must agree
//! pairwise in positional order (case-insensitively). The output view is
//! dropped first so re-creation is deterministic and idempotent.

use crate::error::{CsvRelError, CsvRelResult};
use crate::registry::ViewRegistry;
use crate::relation::Relation;
use std::sync::Arc;
use tracing::debug;

/// Union two relations into a new view.
///
/// `distinct = true` emits `UNION` (duplicate-eliminating); `false` emits
/// `UNION ALL`, whose result cardinality is exactly `|left| + |right|`.
pub fn union(
    left: &Relation,
    right: &Relation,
    output: &str,
    distinct: bool,
) -> CsvRelResult<Relation> {
    let left_cols = left.columns()?;
    let right_cols = right.columns()?;
    check_compatible(&left_cols, &right_cols)?;

    let select = union_select(left.name(), right.name(), &left_cols, distinct);
    debug!(output, distinct, "planning union");

    let registry = ViewRegistry::new(Arc::clone(left.backend()));
    registry.create_view(output, &select)?;
    Ok(Relation::new(
        crate::plan::stmt::sanitize_ident(output),
        Arc::clone(left.backend()),
    ))
}

/// Arity first, then pairwise positional names (case-insensitive).
fn check_compatible(left: &[String], right: &[String]) -> CsvRelResult<()> {
    if left.len() != right.len() {
        return Err(CsvRelError::UnionArity {
            left: left.len(),
            right: right.len(),
        });
    }
    for (position, (l, r)) in left.iter().zip(right).enumerate() {
        if !l.eq_ignore_ascii_case(r) {
            return Err(CsvRelError::UnionColumnMismatch {
                position,
                left: l.clone(),
                right: r.clone(),
            });
        }
    }
    Ok(())
}

/// Assemble the union SELECT. Pure; no backend contact.
pub fn union_select(left_table: &str, right_table: &str, columns: &[String], distinct: bool) -> String {
    let cols = columns.join(", ");
    let op = if distinct { "UNION" } else { "UNION ALL" };
    format!("SELECT {cols} FROM {left_table} {op} SELECT {cols} FROM {right_table}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cols(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn arity_mismatch_reports_both_counts() {
        let err = check_compatible(&cols(&["a", "b"]), &cols(&["a"])).unwrap_err();
        assert_eq!(
            err.to_string(),
            "union arity mismatch: left has 2 columns, right has 1"
        );
    }

    #[test]
    fn name_mismatch_reports_position_and_both_sides() {
        let err = check_compatible(&cols(&["id", "name"]), &cols(&["id", "dept"])).unwrap_err();
        assert_eq!(
            err.to_string(),
            "union column mismatch at position 1: 'name' vs 'dept'"
        );
    }

    #[test]
    fn name_comparison_is_case_insensitive() {
        assert!(check_compatible(&cols(&["ID", "Name"]), &cols(&["id", "name"])).is_ok());
    }

    #[test]
    fn union_select_shape() {
        assert_eq!(
            union_select("a2022", "a2023", &cols(&["id", "name"]), false),
            "SELECT id, name FROM a2022 UNION ALL SELECT id, name FROM a2023"
        );
        assert_eq!(
            union_select("a2022", "a2023", &cols(&["id"]), true),
            "SELECT id FROM a2022 UNION SELECT id FROM a2023"
        );
    }
}
