//! MCP server exposing Google Custom Search to agent hosts, with a local
//! estimate of the daily query quota.

pub mod config;
pub mod mcp;
pub mod paths;
pub mod search;
pub mod usage;
