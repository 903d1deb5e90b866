//! Planners for relational composition.
//!
//! Statement text is assembled by pure builders in [`stmt`], [`join`] and
//! [`union`] so aliasing and sanitization rules live in one place and are
//! unit-testable without a live backend; execution happens separately
//! through the view registry.

pub mod join;
mod join_tests;
pub mod stmt;
pub mod union;

pub use join::{AliasStyle, JoinKind, JoinTarget, join, join_multiple, join_with_style};
pub use union::union;
