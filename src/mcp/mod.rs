/// MCP protocol implementation
///
/// This module handles the Model Context Protocol communication: JSON-RPC
/// message parsing and routing requests to the health tracking tools.

pub mod protocol;
pub mod server;

// Re-export main types
pub use server::McpServer;
