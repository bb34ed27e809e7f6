/// MCP server implementation that handles JSON-RPC communication
///
/// This module implements the actual MCP server that:
/// 1. Reads JSON-RPC requests from stdin
/// 2. Processes tool calls using our health stats server
/// 3. Sends JSON-RPC responses to stdout

use std::collections::HashMap;
use schemars::schema_for;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{debug, error, info};

use crate::mcp::protocol::*;
use crate::tools;
use crate::{HealthStatsServer, ServerError};

/// MCP server that handles communication with Claude
pub struct McpServer {
    /// The underlying health stats server
    server: HealthStatsServer,
    /// Whether the server has been initialized
    initialized: bool,
}

/// Deserialize a tool's arguments map into its typed parameter struct
fn parse_args<T: DeserializeOwned>(args: HashMap<String, Value>) -> Result<T, serde_json::Error> {
    serde_json::from_value(Value::Object(args.into_iter().collect()))
}

impl McpServer {
    /// Create a new MCP server
    pub fn new(server: HealthStatsServer) -> Self {
        Self {
            server,
            initialized: false,
        }
    }

    /// Run the MCP server, handling JSON-RPC over stdin/stdout
    pub async fn run(&mut self) -> Result<(), ServerError> {
        info!("Starting MCP server, waiting for JSON-RPC requests...");

        let stdin = tokio::io::stdin();
        let mut reader = BufReader::new(stdin);
        let mut stdout = tokio::io::stdout();

        let mut line = String::new();

        loop {
            line.clear();

            // Read one line from stdin
            match reader.read_line(&mut line).await {
                Ok(0) => {
                    info!("MCP server shutting down (stdin closed)");
                    break;
                }
                Ok(_) => {
                    // Process the line
                    if let Some(response) = self.process_line(&line).await {
                        let response_str = serde_json::to_string(&response)?;

                        // Write response + newline
                        stdout.write_all(response_str.as_bytes()).await?;
                        stdout.write_all(b"\n").await?;
                        stdout.flush().await?;

                        debug!("Sent response: {}", response_str);
                    }
                }
                Err(e) => {
                    error!("Failed to read from stdin: {}", e);
                    break;
                }
            }
        }

        Ok(())
    }

    /// Process a single line of JSON-RPC input
    async fn process_line(&mut self, line: &str) -> Option<JsonRpcResponse> {
        let line = line.trim();
        if line.is_empty() {
            return None;
        }

        debug!("Processing request: {}", line);

        // Parse JSON-RPC request
        let request: JsonRpcRequest = match serde_json::from_str(line) {
            Ok(req) => req,
            Err(e) => {
                error!("Failed to parse JSON-RPC request: {}", e);
                return Some(JsonRpcResponse::error(
                    json!(null),
                    error_codes::PARSE_ERROR,
                    format!("Invalid JSON: {}", e),
                    None,
                ));
            }
        };

        Some(self.handle_request(request).await)
    }

    /// Handle a JSON-RPC request
    async fn handle_request(&mut self, request: JsonRpcRequest) -> JsonRpcResponse {
        match request.method.as_str() {
            "initialize" => self.handle_initialize(request).await,
            "initialized" => {
                self.initialized = true;
                JsonRpcResponse::success(request.id, json!(null))
            }
            "tools/list" => self.handle_tools_list(request).await,
            "tools/call" => self.handle_tools_call(request).await,
            _ => JsonRpcResponse::error(
                request.id,
                error_codes::METHOD_NOT_FOUND,
                format!("Method '{}' not found", request.method),
                None,
            ),
        }
    }

    /// Handle MCP initialization request
    async fn handle_initialize(&mut self, request: JsonRpcRequest) -> JsonRpcResponse {
        info!("MCP client connected");

        let result = InitializeResult {
            protocol_version: MCP_VERSION.to_string(),
            capabilities: ServerCapabilities {
                tools: Some(ToolsCapability {
                    list_changed: false,
                }),
            },
            server_info: ServerInfo {
                name: "Health Stats MCP".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
        };

        JsonRpcResponse::success(request.id, serde_json::to_value(result).unwrap())
    }

    /// Handle tools/list request
    ///
    /// Input schemas are derived from the tools' parameter structs so the
    /// advertised contract cannot drift from what the tools deserialize.
    async fn handle_tools_list(&mut self, request: JsonRpcRequest) -> JsonRpcResponse {
        let tools = vec![
            ToolDefinition {
                name: "log_daily_stats".to_string(),
                description: "Log one day's aggregated health statistics (steps, calories, active minutes, sleep hours)".to_string(),
                input_schema: serde_json::to_value(schema_for!(tools::LogStatsParams)).unwrap(),
            },
            ToolDefinition {
                name: "log_activity".to_string(),
                description: "Record one activity such as a walk, run, or yoga session".to_string(),
                input_schema: serde_json::to_value(schema_for!(tools::LogActivityParams)).unwrap(),
            },
            ToolDefinition {
                name: "weekly_summary".to_string(),
                description: "Build the weekly summary: chart series, seven-day averages, and insight messages".to_string(),
                input_schema: serde_json::to_value(schema_for!(tools::WeeklySummaryParams)).unwrap(),
            },
            ToolDefinition {
                name: "recent_activities".to_string(),
                description: "List the most recently logged activities, newest first".to_string(),
                input_schema: serde_json::to_value(schema_for!(tools::RecentActivitiesParams)).unwrap(),
            },
            ToolDefinition {
                name: "dashboard_view".to_string(),
                description: "Refresh the health dashboard and return the weekly summary plus recent activities".to_string(),
                input_schema: serde_json::to_value(schema_for!(tools::DashboardParams)).unwrap(),
            },
        ];

        JsonRpcResponse::success(request.id, json!({"tools": tools}))
    }

    /// Handle tools/call request
    async fn handle_tools_call(&mut self, request: JsonRpcRequest) -> JsonRpcResponse {
        let tool_params: ToolCallParams = match request.params {
            Some(params) => match serde_json::from_value(params) {
                Ok(p) => p,
                Err(e) => {
                    return JsonRpcResponse::error(
                        request.id,
                        error_codes::INVALID_PARAMS,
                        format!("Invalid parameters: {}", e),
                        None,
                    );
                }
            },
            None => {
                return JsonRpcResponse::error(
                    request.id,
                    error_codes::INVALID_PARAMS,
                    "Missing parameters".to_string(),
                    None,
                );
            }
        };

        let result = match tool_params.name.as_str() {
            "log_daily_stats" => self.call_log_daily_stats(tool_params.arguments).await,
            "log_activity" => self.call_log_activity(tool_params.arguments).await,
            "weekly_summary" => self.call_weekly_summary(tool_params.arguments).await,
            "recent_activities" => self.call_recent_activities(tool_params.arguments).await,
            "dashboard_view" => self.call_dashboard_view(tool_params.arguments).await,
            _ => ToolCallResult::error(format!("Unknown tool: {}", tool_params.name)),
        };

        JsonRpcResponse::success(request.id, serde_json::to_value(result).unwrap())
    }

    /// Call the log_daily_stats tool
    async fn call_log_daily_stats(&self, args: HashMap<String, Value>) -> ToolCallResult {
        let params: tools::LogStatsParams = match parse_args(args) {
            Ok(p) => p,
            Err(e) => return ToolCallResult::error(format!("Invalid arguments: {}", e)),
        };

        match tools::log_daily_stats(self.server.store(), params).await {
            Ok(response) => ToolCallResult::success(response.message),
            Err(e) => ToolCallResult::error(e.to_string()),
        }
    }

    /// Call the log_activity tool
    async fn call_log_activity(&self, args: HashMap<String, Value>) -> ToolCallResult {
        let params: tools::LogActivityParams = match parse_args(args) {
            Ok(p) => p,
            Err(e) => return ToolCallResult::error(format!("Invalid arguments: {}", e)),
        };

        match tools::log_activity(self.server.store(), params).await {
            Ok(response) => {
                let message = format!("{}\nActivity ID: {}", response.message, response.activity_id);
                ToolCallResult::success(message)
            }
            Err(e) => ToolCallResult::error(e.to_string()),
        }
    }

    /// Call the weekly_summary tool
    async fn call_weekly_summary(&self, args: HashMap<String, Value>) -> ToolCallResult {
        let params: tools::WeeklySummaryParams = match parse_args(args) {
            Ok(p) => p,
            Err(e) => return ToolCallResult::error(format!("Invalid arguments: {}", e)),
        };

        match tools::weekly_summary(self.server.store(), self.server.engine(), params).await {
            Ok(response) => ToolCallResult::success(response.message),
            Err(e) => ToolCallResult::error(e.to_string()),
        }
    }

    /// Call the recent_activities tool
    async fn call_recent_activities(&self, args: HashMap<String, Value>) -> ToolCallResult {
        let params: tools::RecentActivitiesParams = match parse_args(args) {
            Ok(p) => p,
            Err(e) => return ToolCallResult::error(format!("Invalid arguments: {}", e)),
        };

        match tools::recent_activities(self.server.store(), params).await {
            Ok(response) => ToolCallResult::success(response.message),
            Err(e) => ToolCallResult::error(e.to_string()),
        }
    }

    /// Call the dashboard_view tool
    async fn call_dashboard_view(&mut self, args: HashMap<String, Value>) -> ToolCallResult {
        let params: tools::DashboardParams = match parse_args(args) {
            Ok(p) => p,
            Err(e) => return ToolCallResult::error(format!("Invalid arguments: {}", e)),
        };

        match tools::dashboard_view(self.server.dashboard_mut(), params).await {
            Ok(response) => ToolCallResult::success(response.message),
            Err(e) => ToolCallResult::error(e.to_string()),
        }
    }
}
