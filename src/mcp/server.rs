use super::error::DispatchError;
use super::protocol::{
    error_codes, InitializeParams, InitializeResult, JsonRpcRequest, JsonRpcResponse, PeerInfo,
    ServerCapabilities, ToolCallParams, ToolCallResult, ToolsCapability, ToolsListResult,
    JSONRPC_VERSION,
};
use super::tools::{self, GET_USAGE_TOOL, SEARCH_TOOL};
use crate::search::{Credentials, SearchClient};
use crate::usage::{QuotaTracker, UsageStore, DAILY_QUOTA};
use anyhow::Result;
use serde_json::{json, Value};
use std::io::{BufRead, Write};

const SERVER_NAME: &str = "google-search";
const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");
const PROTOCOL_VERSION: &str = "2024-11-05";

/// MCP server exposing `search` and `get_usage`.
///
/// Requests are handled one at a time, each to completion, in the order they
/// arrive on the input stream.
pub struct McpSearchServer<C, S> {
    client: C,
    tracker: QuotaTracker<S>,
    /// Checked when a search is dispatched, not at startup.
    credentials: Option<Credentials>,
}

impl<C: SearchClient, S: UsageStore> McpSearchServer<C, S> {
    pub fn new(client: C, tracker: QuotaTracker<S>, credentials: Option<Credentials>) -> Self {
        Self {
            client,
            tracker,
            credentials,
        }
    }

    pub fn tracker(&self) -> &QuotaTracker<S> {
        &self.tracker
    }

    /// Serves stdin/stdout until stdin closes.
    pub fn run_stdio(&self) -> Result<()> {
        let stdin = std::io::stdin();
        let stdout = std::io::stdout();
        self.serve(stdin.lock(), stdout.lock())
    }

    /// Reads line-delimited JSON-RPC messages from `input` and writes one
    /// response line per request to `output`.
    pub fn serve<R: BufRead, W: Write>(&self, mut input: R, mut output: W) -> Result<()> {
        let mut buf = Vec::new();
        loop {
            buf.clear();
            if input.read_until(b'\n', &mut buf)? == 0 {
                break;
            }

            // A line that is not UTF-8 gets a parse error; the loop keeps going.
            let response = match std::str::from_utf8(&buf) {
                Ok(line) if line.trim().is_empty() => continue,
                Ok(line) => self.handle_message(line.trim_end_matches(['\r', '\n'])),
                Err(e) => Some(JsonRpcResponse::error(
                    None,
                    error_codes::PARSE_ERROR,
                    format!("Failed to parse request: {}", e),
                )),
            };

            if let Some(resp) = response {
                let json = serde_json::to_string(&resp)?;
                writeln!(output, "{}", json)?;
                output.flush()?;
            }
        }

        tracing::info!("Input closed, shutting down");
        Ok(())
    }

    /// Handle a single JSON-RPC message
    pub fn handle_message(&self, message: &str) -> Option<JsonRpcResponse> {
        let request: JsonRpcRequest = match serde_json::from_str(message) {
            Ok(req) => req,
            Err(e) => {
                return Some(JsonRpcResponse::error(
                    None,
                    error_codes::PARSE_ERROR,
                    format!("Failed to parse request: {}", e),
                ));
            }
        };

        if request.is_notification() {
            self.handle_notification(&request);
            return None;
        }

        if request.jsonrpc != JSONRPC_VERSION {
            return Some(JsonRpcResponse::error(
                request.id,
                error_codes::INVALID_REQUEST,
                format!("Unsupported jsonrpc version: {}", request.jsonrpc),
            ));
        }

        let result = match request.method.as_str() {
            "initialize" => self.handle_initialize(request.params),
            "ping" => Ok(json!({})),
            "tools/list" => self.handle_tools_list(),
            "tools/call" => self.handle_tool_call(request.params),
            _ => Err((
                error_codes::METHOD_NOT_FOUND,
                format!("Method not found: {}", request.method),
            )),
        };

        Some(match result {
            Ok(value) => JsonRpcResponse::success(request.id, value),
            Err((code, message)) => JsonRpcResponse::error(request.id, code, message),
        })
    }

    fn handle_notification(&self, request: &JsonRpcRequest) {
        match request.method.as_str() {
            "notifications/initialized" => tracing::debug!("Client initialized"),
            other => tracing::debug!("Ignoring notification: {}", other),
        }
    }

    fn handle_initialize(&self, params: Option<Value>) -> Result<Value, (i32, String)> {
        let init_params: InitializeParams = params
            .map(serde_json::from_value)
            .transpose()
            .map_err(|e| {
                (
                    error_codes::INVALID_PARAMS,
                    format!("Invalid initialize params: {}", e),
                )
            })?
            .unwrap_or_default();

        if let Some(client) = &init_params.client_info {
            tracing::info!("Client connected: {} {}", client.name, client.version);
        }

        let result = InitializeResult {
            protocol_version: PROTOCOL_VERSION.to_string(),
            capabilities: ServerCapabilities {
                tools: ToolsCapability {
                    list_changed: false,
                },
            },
            server_info: PeerInfo {
                name: SERVER_NAME.to_string(),
                version: SERVER_VERSION.to_string(),
            },
        };

        serde_json::to_value(result)
            .map_err(|e| (error_codes::INTERNAL_ERROR, format!("Serialization error: {}", e)))
    }

    fn handle_tools_list(&self) -> Result<Value, (i32, String)> {
        let result = ToolsListResult {
            tools: tools::tool_definitions(),
        };
        serde_json::to_value(result)
            .map_err(|e| (error_codes::INTERNAL_ERROR, format!("Serialization error: {}", e)))
    }

    fn handle_tool_call(&self, params: Option<Value>) -> Result<Value, (i32, String)> {
        let call_params: ToolCallParams = params
            .ok_or((error_codes::INVALID_PARAMS, "Missing params".to_string()))
            .and_then(|p| {
                serde_json::from_value(p).map_err(|e| {
                    (
                        error_codes::INVALID_PARAMS,
                        format!("Invalid tool call params: {}", e),
                    )
                })
            })?;

        let result = match self.call_tool(&call_params.name, call_params.arguments) {
            Ok(text) => ToolCallResult::text(text),
            Err(e) => {
                tracing::warn!("Tool call {} failed: {}", call_params.name, e);
                ToolCallResult::error(e.to_string())
            }
        };

        serde_json::to_value(result)
            .map_err(|e| (error_codes::INTERNAL_ERROR, format!("Serialization error: {}", e)))
    }

    /// Dispatches a tool by name and returns its text payload.
    pub fn call_tool(&self, name: &str, arguments: Value) -> Result<String, DispatchError> {
        match name {
            SEARCH_TOOL => self.search(arguments),
            GET_USAGE_TOOL => Ok(self.get_usage()),
            _ => Err(DispatchError::UnknownTool(name.to_string())),
        }
    }

    /// Validate, search, then count the search. Usage is only recorded once
    /// the provider call has succeeded.
    fn search(&self, arguments: Value) -> Result<String, DispatchError> {
        let query = tools::parse_search_args(arguments)?;
        let credentials = self
            .credentials
            .as_ref()
            .ok_or(DispatchError::ConfigurationMissing)?;

        let results = self.client.search(credentials, &query)?;

        let usage = self.tracker.record_usage();
        tracing::info!(
            "API usage: {}/{} ({} remaining today)",
            usage.used,
            DAILY_QUOTA,
            usage.remaining
        );

        Ok(serde_json::to_string_pretty(&results)?)
    }

    fn get_usage(&self) -> String {
        tools::format_usage_report(self.tracker.get_usage())
    }
}

#[cfg(test)]
#[path = "tests/server_tests.rs"]
mod tests;
