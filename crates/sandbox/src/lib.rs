#![deny(unused)]
//! Sandboxed code execution for CodeCrew.
//!
//! This crate provides the dynamic-code-execution tool behind a two-stage
//! security boundary:
//!
//! 1. A static [`SecurityFilter`] screens the raw script text against a
//!    fixed, case-insensitive list of forbidden constructs (module access,
//!    dynamic evaluation, file handles, reflective introspection) and
//!    refuses matches before anything runs.
//! 2. A restricted interpreter executes the remainder in an environment
//!    exposing only allow-listed primitives — arithmetic, list literals,
//!    comparisons, aggregation builtins, and a captured `print`.
//!
//! The filter exists because a restricted environment alone does not stop
//! scripts that reach forbidden capabilities indirectly; it is defense in
//! depth, pattern-based and deliberately bypassable rather than a proof of
//! safety. Scripts run with no internal time or memory limit.

pub mod filter;
pub mod interp;
pub mod tool;

pub use filter::SecurityFilter;
pub use interp::{ExecOutcome, ScriptValue, RESULT_VARIABLE};
pub use tool::ExecuteCodeTool;
