//! Tool definitions, argument validation and output formatting.

use super::error::DispatchError;
use super::protocol::Tool;
use crate::search::{SearchQuery, DEFAULT_NUM};
use crate::usage::{Usage, DAILY_QUOTA};
use serde::Deserialize;
use serde_json::{json, Value};

pub const SEARCH_TOOL: &str = "search";
pub const GET_USAGE_TOOL: &str = "get_usage";

/// Both tools as advertised by `tools/list`.
pub fn tool_definitions() -> Vec<Tool> {
    vec![
        Tool {
            name: SEARCH_TOOL.to_string(),
            description: "Search Google for information".to_string(),
            input_schema: search_schema(),
        },
        Tool {
            name: GET_USAGE_TOOL.to_string(),
            description: "Get current API usage and remaining quota".to_string(),
            input_schema: get_usage_schema(),
        },
    ]
}

/// JSON Schema for the search tool
pub fn search_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "query": {
                "type": "string",
                "description": "Search query"
            },
            "num": {
                "type": "number",
                "description": "Number of results to return (at least 1; values above 10 are reduced to 10)",
                "minimum": 1,
                "default": DEFAULT_NUM
            }
        },
        "required": ["query"]
    })
}

/// JSON Schema for the get_usage tool
pub fn get_usage_schema() -> Value {
    json!({
        "type": "object",
        "properties": {}
    })
}

#[derive(Debug, Deserialize)]
struct SearchArgs {
    query: String,
    #[serde(default)]
    num: Option<f64>,
}

/// Validates `search` arguments and builds the provider query.
///
/// `query` must be a non-blank string. `num` is optional; when present it
/// must be a finite number of at least 1. Fractions are truncated and values
/// above the provider limit are clamped.
pub fn parse_search_args(arguments: Value) -> Result<SearchQuery, DispatchError> {
    let args: SearchArgs = serde_json::from_value(arguments)
        .map_err(|e| DispatchError::invalid_arguments(SEARCH_TOOL, e.to_string()))?;

    if args.query.trim().is_empty() {
        return Err(DispatchError::invalid_arguments(
            SEARCH_TOOL,
            "query must be a non-empty string",
        ));
    }

    let num = match args.num {
        None => DEFAULT_NUM,
        Some(n) if n.is_finite() && n >= 1.0 => n.trunc() as u32,
        Some(n) => {
            return Err(DispatchError::invalid_arguments(
                SEARCH_TOOL,
                format!("num must be a number of at least 1, got {}", n),
            ))
        }
    };

    Ok(SearchQuery::new(args.query, num))
}

/// Human-readable report returned by `get_usage`.
pub fn format_usage_report(usage: Usage) -> String {
    format!(
        "Google Custom Search API Usage:\n\n\
         Used today: {}/{}\n\
         Remaining: {}\n\n\
         Note: This is a local estimate. Check Google Cloud Console for accurate usage.",
        usage.used, DAILY_QUOTA, usage.remaining
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_definitions() {
        let tools = tool_definitions();
        let names: Vec<&str> = tools.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["search", "get_usage"]);
        assert_eq!(tools[0].input_schema["required"], json!(["query"]));
        assert_eq!(tools[0].input_schema["properties"]["num"]["default"], 10);
        assert_eq!(tools[0].input_schema["properties"]["num"]["minimum"], 1);
        assert!(tools[0].input_schema["properties"]["num"]["description"]
            .as_str()
            .unwrap()
            .contains("at least 1"));
    }

    #[test]
    fn test_parse_search_args_defaults_num() {
        let query = parse_search_args(json!({"query": "rust ownership"})).unwrap();
        assert_eq!(query.query, "rust ownership");
        assert_eq!(query.num, 10);
    }

    #[test]
    fn test_parse_search_args_clamps_num() {
        let query = parse_search_args(json!({"query": "q", "num": 50})).unwrap();
        assert_eq!(query.num, 10);
    }

    #[test]
    fn test_parse_search_args_keeps_small_num() {
        let query = parse_search_args(json!({"query": "q", "num": 3})).unwrap();
        assert_eq!(query.num, 3);
        let query = parse_search_args(json!({"query": "q", "num": 4.9})).unwrap();
        assert_eq!(query.num, 4);
    }

    #[test]
    fn test_parse_search_args_null_num_is_default() {
        let query = parse_search_args(json!({"query": "q", "num": null})).unwrap();
        assert_eq!(query.num, 10);
    }

    #[test]
    fn test_parse_search_args_rejects_empty_query() {
        let err = parse_search_args(json!({"query": ""})).unwrap_err();
        assert!(matches!(err, DispatchError::InvalidArguments { .. }));
        let err = parse_search_args(json!({"query": "   "})).unwrap_err();
        assert!(matches!(err, DispatchError::InvalidArguments { .. }));
    }

    #[test]
    fn test_parse_search_args_rejects_missing_query() {
        let err = parse_search_args(json!({"num": 3})).unwrap_err();
        assert!(matches!(err, DispatchError::InvalidArguments { .. }));
        let err = parse_search_args(Value::Null).unwrap_err();
        assert!(matches!(err, DispatchError::InvalidArguments { .. }));
    }

    #[test]
    fn test_parse_search_args_rejects_non_numeric_num() {
        let err = parse_search_args(json!({"query": "q", "num": "five"})).unwrap_err();
        assert!(err.to_string().starts_with("Invalid arguments for search"));
    }

    #[test]
    fn test_parse_search_args_rejects_zero_num() {
        let err = parse_search_args(json!({"query": "q", "num": 0})).unwrap_err();
        assert!(err.to_string().contains("at least 1"));
    }

    #[test]
    fn test_format_usage_report() {
        let report = format_usage_report(Usage::from_count(12));
        assert!(report.contains("Used today: 12/100"));
        assert!(report.contains("Remaining: 88"));
        assert!(report.contains("local estimate"));
    }
}
