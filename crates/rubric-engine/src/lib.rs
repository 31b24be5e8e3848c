//! Rubric engine for school assessment workflows.
//!
//! Teachers author rubrics (criteria × performance levels) or import them from
//! Markdown/CSV tables; students are later assessed by selecting one level per
//! criterion. Every operation here is a pure function over its inputs, so the
//! host decides where and when to run it.

pub mod config;
pub mod error;
pub mod rubrics;
pub mod telemetry;
