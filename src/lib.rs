/// Public library interface for the Health Stats MCP server
///
/// This module exports the main server implementation and public types
/// that can be used by other applications or tests.

use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;

// Internal modules
mod domain;
mod storage;
mod insights;
mod dashboard;
pub mod tools;
mod mcp;

// Re-export public modules and types
pub use domain::*;
pub use storage::{HealthStore, SqliteStore, StorageError};
pub use insights::{normalize_week, Insight, InsightEngine, InsightKind, WeeklyAverages, WeeklySummary};
pub use dashboard::{Dashboard, DEFAULT_RECENT_LIMIT};

/// Errors that can occur during server operation
#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Database error: {0}")]
    Database(#[from] storage::StorageError),

    #[error("Domain validation error: {0}")]
    Domain(#[from] domain::DomainError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Main health stats server that implements the MCP protocol
///
/// This server stores health data in a SQLite database and provides tools
/// for logging daily statistics and activities and for reading the weekly
/// dashboard with generated insights.
pub struct HealthStatsServer {
    store: Arc<SqliteStore>,
    engine: InsightEngine,
    dashboard: Dashboard<SqliteStore>,
}

impl HealthStatsServer {
    /// Create a new health stats server with the specified database path
    ///
    /// This will initialize the SQLite database with the required schema
    /// if it doesn't already exist.
    pub async fn new(db_path: PathBuf) -> Result<Self, ServerError> {
        tracing::info!("Initializing Health Stats server with database: {:?}", db_path);

        // Initialize storage layer
        let store = Arc::new(SqliteStore::new(db_path)?);

        // The insight engine and the retained dashboard share the store
        let engine = InsightEngine::new();
        let dashboard = Dashboard::new(Arc::clone(&store));

        Ok(Self {
            store,
            engine,
            dashboard,
        })
    }

    /// Run the MCP server, handling JSON-RPC requests over stdin/stdout
    ///
    /// This method will block until the server is shut down or an error occurs.
    pub async fn run(self) -> Result<(), ServerError> {
        tracing::info!("Starting MCP server...");

        // Test database connectivity
        let recent = self.store.recent_activities(1).await?;
        tracing::info!(
            "Server started successfully, {} recent activities on record",
            recent.len()
        );

        // Create and run the MCP server
        let mut mcp_server = mcp::McpServer::new(self);
        mcp_server.run().await?;

        Ok(())
    }

    /// Get a reference to the storage layer (useful for testing)
    pub fn store(&self) -> &SqliteStore {
        &self.store
    }

    /// Get a reference to the insight engine (useful for testing)
    pub fn engine(&self) -> &InsightEngine {
        &self.engine
    }

    /// Get a reference to the retained dashboard
    pub fn dashboard(&self) -> &Dashboard<SqliteStore> {
        &self.dashboard
    }

    /// Get a mutable reference to the retained dashboard
    pub fn dashboard_mut(&mut self) -> &mut Dashboard<SqliteStore> {
        &mut self.dashboard
    }
}
