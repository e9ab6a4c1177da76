#![deny(unused)]
//! Tool framework for CodeCrew.
//!
//! This crate provides:
//! - `ToolRegistry`: name-keyed tool storage with a category index, timed
//!   execution, and function-calling schema export
//! - `FunctionTool`: tools built from plain functions, with explicit or
//!   derived parameter schemas
//! - Built-in coding tools: `read_file`, `write_file`, `search_code`, plus
//!   the sandboxed `execute_code` tool
//!
//! Tool failures never cross the registry boundary as errors; every
//! invocation yields one `ToolResult` whose `success` flag the caller
//! inspects.

pub mod builtin;
pub mod derive;
pub mod function;
pub mod registry;

pub use builtin::{default_registry, ReadFileTool, SearchCodeTool, WriteFileTool};
pub use derive::derive_parameters;
pub use function::FunctionTool;
pub use registry::{ToolRegistry, DEFAULT_CATEGORY};
