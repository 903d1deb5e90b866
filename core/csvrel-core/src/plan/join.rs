//! Join planner — two-way and multi-way joins with deterministic aliasing.
//!
//! The left (or base) relation is always aliased `a`; join targets take
//! `b`, `c`, `d`, … in the order given. Target order determines both the
//! aliasing and the join associativity and is part of the contract — no
//! optimizer reordering happens here.
//!
//! Two-way joins default to the uniform policy (every output column is
//! prefixed with its side's alias), the only policy that generalizes to
//! N-way joins. The conflict-aware policy — prefix only names present in
//! both inputs — remains available through [`join_with_style`].

use crate::error::{CsvRelError, CsvRelResult};
use crate::registry::ViewRegistry;
use crate::relation::Relation;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::debug;

/// Supported join kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinKind {
    Inner,
    Left,
    Right,
    Full,
    Cross,
    Natural,
}

impl JoinKind {
    /// Whether this kind needs an ON condition.
    pub fn requires_condition(self) -> bool {
        !matches!(self, JoinKind::Cross | JoinKind::Natural)
    }

    /// SQL keyword preceding `JOIN`.
    pub fn sql_keyword(self) -> &'static str {
        match self {
            JoinKind::Inner => "INNER",
            JoinKind::Left => "LEFT",
            JoinKind::Right => "RIGHT",
            JoinKind::Full => "FULL",
            JoinKind::Cross => "CROSS",
            JoinKind::Natural => "NATURAL",
        }
    }
}

impl std::fmt::Display for JoinKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.sql_keyword())
    }
}

/// Column naming policy for two-way joins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AliasStyle {
    /// Every output column is prefixed with its side's alias (`a_col`).
    Uniform,
    /// Only columns present in both relations get the prefix; the rest keep
    /// their bare name. Defined for two relations only.
    ConflictAware,
}

/// One edge of a multi-way join request.
#[derive(Debug, Clone)]
pub struct JoinTarget {
    pub relation: Relation,
    pub kind: JoinKind,
    pub condition: Option<String>,
}

impl JoinTarget {
    pub fn new(relation: &Relation, kind: JoinKind, condition: Option<&str>) -> Self {
        JoinTarget {
            relation: relation.clone(),
            kind,
            condition: condition.map(str::to_string),
        }
    }
}

/// Two-way join with the default uniform aliasing policy.
pub fn join(
    left: &Relation,
    right: &Relation,
    kind: JoinKind,
    condition: Option<&str>,
    output: &str,
) -> CsvRelResult<Relation> {
    join_with_style(left, right, kind, condition, output, AliasStyle::Uniform)
}

/// Two-way join with an explicit aliasing policy.
pub fn join_with_style(
    left: &Relation,
    right: &Relation,
    kind: JoinKind,
    condition: Option<&str>,
    output: &str,
    style: AliasStyle,
) -> CsvRelResult<Relation> {
    check_condition(kind, condition)?;

    let left_cols = left.columns()?;
    let right_cols = right.columns()?;
    let select = two_way_select(
        left.name(),
        &left_cols,
        right.name(),
        &right_cols,
        kind,
        condition,
        style,
    );

    debug!(output, %kind, "planning two-way join");
    create_output(left.backend(), output, &select)
}

/// Multi-way join: `base` aliased `a`, targets `b`, `c`, … in given order.
///
/// Uniform aliasing only — pairwise conflict has no unique meaning across
/// more than two relations.
pub fn join_multiple(
    output: &str,
    base: &Relation,
    targets: &[JoinTarget],
) -> CsvRelResult<Relation> {
    if targets.len() > 25 {
        return Err(CsvRelError::Plan(format!(
            "too many join targets ({}), at most 25 supported",
            targets.len()
        )));
    }
    for target in targets {
        check_condition(target.kind, target.condition.as_deref())?;
    }

    let base_cols = base.columns()?;
    let mut planned = Vec::with_capacity(targets.len());
    for target in targets {
        planned.push((
            target.relation.name().to_string(),
            target.kind,
            target.condition.clone(),
            target.relation.columns()?,
        ));
    }
    let select = multi_way_select(base.name(), &base_cols, &planned);

    debug!(output, targets = targets.len(), "planning multi-way join");
    create_output(base.backend(), output, &select)
}

fn check_condition(kind: JoinKind, condition: Option<&str>) -> CsvRelResult<()> {
    if kind.requires_condition() && condition.map_or(true, |c| c.trim().is_empty()) {
        return Err(CsvRelError::ConditionRequired {
            kind: kind.sql_keyword().to_string(),
        });
    }
    Ok(())
}

fn create_output(
    backend: &Arc<dyn crate::backend::Backend>,
    output: &str,
    select: &str,
) -> CsvRelResult<Relation> {
    let registry = ViewRegistry::new(Arc::clone(backend));
    registry.create_view(output, select)?;
    Ok(Relation::new(
        crate::plan::stmt::sanitize_ident(output),
        Arc::clone(backend),
    ))
}

/// Assemble the SELECT for a two-way join. Pure; no backend contact.
pub fn two_way_select(
    left_table: &str,
    left_cols: &[String],
    right_table: &str,
    right_cols: &[String],
    kind: JoinKind,
    condition: Option<&str>,
    style: AliasStyle,
) -> String {
    let conflicts: HashSet<&str> = match style {
        AliasStyle::Uniform => HashSet::new(),
        AliasStyle::ConflictAware => {
            let left_set: HashSet<&str> = left_cols.iter().map(String::as_str).collect();
            right_cols
                .iter()
                .map(String::as_str)
                .filter(|c| left_set.contains(c))
                .collect()
        }
    };

    let mut select_list = Vec::with_capacity(left_cols.len() + right_cols.len());
    for (side, cols) in [("a", left_cols), ("b", right_cols)] {
        for col in cols {
            let alias = match style {
                AliasStyle::Uniform => format!("{side}_{col}"),
                AliasStyle::ConflictAware if conflicts.contains(col.as_str()) => {
                    format!("{side}_{col}")
                }
                AliasStyle::ConflictAware => col.clone(),
            };
            select_list.push(format!("{side}.{col} AS {alias}"));
        }
    }

    let on = match condition {
        Some(cond) if kind.requires_condition() => format!(" ON {cond}"),
        _ => String::new(),
    };
    format!(
        "SELECT {} FROM {} a {} JOIN {} b{}",
        select_list.join(", "),
        left_table,
        kind.sql_keyword(),
        right_table,
        on
    )
}

/// Assemble the SELECT for a multi-way join. Pure; no backend contact.
///
/// `targets` carry (table, kind, condition, columns) in join order.
pub fn multi_way_select(
    base_table: &str,
    base_cols: &[String],
    targets: &[(String, JoinKind, Option<String>, Vec<String>)],
) -> String {
    let mut select_list = Vec::new();
    for col in base_cols {
        select_list.push(format!("a.{col} AS a_{col}"));
    }

    let mut from_clause = format!("{base_table} a");
    for (i, (table, kind, condition, cols)) in targets.iter().enumerate() {
        let alias = (b'b' + i as u8) as char;
        for col in cols {
            select_list.push(format!("{alias}.{col} AS {alias}_{col}"));
        }
        from_clause.push_str(&format!(" {} JOIN {} {}", kind.sql_keyword(), table, alias));
        if kind.requires_condition() {
            if let Some(cond) = condition {
                from_clause.push_str(&format!(" ON {cond}"));
            }
        }
    }

    format!("SELECT {} FROM {}", select_list.join(", "), from_clause)
}
