//! Structured thinking for AI agents, served over MCP.
//!
//! Thinkwell is an [MCP](https://modelcontextprotocol.io/) server that keeps
//! session-scoped records of an agent's reasoning:
//!
//! | Record | Tool | Limits |
//! |--------|------|--------|
//! | **Thought** | `sequential_thinking` | Capped per session (`max_thoughts_per_session`) |
//! | **Mental-model application** | `mental_model` | Uncapped; model must exist in the catalog |
//! | **Debugging approach** | `debugging_approach` | Stored as a `debugging_<approach>` application |
//!
//! Statistics and full exports are derived from the same state
//! (`session_stats`, `session_export`).
//!
//! # Architecture
//!
//! - **Storage**: in-memory, process lifetime. One read/write lock per record
//!   kind plus one for session metadata, always acquired in the same order.
//! - **Catalog**: four built-in mental models, optionally extended or
//!   overridden from TOML at startup
//! - **Transport**: MCP over stdio (primary) or Streamable HTTP
//!
//! # Modules
//!
//! - [`config`]: Configuration loading from TOML files and environment variables
//! - [`error`]: Error taxonomy with stable error codes
//! - [`catalog`]: Mental-model definitions and the lookup contract
//! - [`session`]: Session registry, record stores, statistics, and operations

pub mod catalog;
pub mod config;
pub mod error;
pub mod session;
