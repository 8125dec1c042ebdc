// src/backend/xserver/mock.rs

//! In-memory `XAdapter` for tests and headless callers.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use super::adapter::XAdapter;
use crate::error::{DisplayError, Result};
use crate::geometry::ScreenMetrics;

#[derive(Debug, Default)]
struct MockXState {
    servers: HashMap<String, ScreenMetrics>,
    default_name: Option<String>,
    opened: Vec<String>,
    live_connections: usize,
}

/// Simulates a set of named X servers.
///
/// Clones share state, so a test can keep a handle after moving the adapter
/// into an `X11Backend`.
#[derive(Debug, Clone, Default)]
pub struct MockXAdapter {
    state: Arc<Mutex<MockXState>>,
}

/// A connection to a simulated server. Dropping it "closes" the connection.
#[derive(Debug)]
pub struct MockConnection {
    name: String,
    metrics: ScreenMetrics,
    state: Arc<Mutex<MockXState>>,
}

impl MockConnection {
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Drop for MockConnection {
    fn drop(&mut self) {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        state.live_connections = state.live_connections.saturating_sub(1);
    }
}

impl MockXAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a reachable server and returns the adapter, for builder-style setup.
    pub fn with_server(self, name: &str, metrics: ScreenMetrics) -> Self {
        self.add_server(name, metrics);
        self
    }

    /// Sets what `DISPLAY` would resolve to.
    pub fn with_default_display(self, name: &str) -> Self {
        self.set_default_display(Some(name));
        self
    }

    pub fn add_server(&self, name: &str, metrics: ScreenMetrics) {
        self.lock().servers.insert(name.to_string(), metrics);
    }

    /// Makes a server unreachable for future connections.
    pub fn remove_server(&self, name: &str) {
        self.lock().servers.remove(name);
    }

    pub fn set_default_display(&self, name: Option<&str>) {
        self.lock().default_name = name.map(str::to_string);
    }

    /// Names of every successfully opened connection, oldest first.
    pub fn opened(&self) -> Vec<String> {
        self.lock().opened.clone()
    }

    pub fn open_count(&self) -> usize {
        self.lock().opened.len()
    }

    /// Connections opened and not yet dropped.
    pub fn live_connections(&self) -> usize {
        self.lock().live_connections
    }

    fn lock(&self) -> MutexGuard<'_, MockXState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl XAdapter for MockXAdapter {
    type Connection = MockConnection;

    fn open_display(&self, name: Option<&str>) -> Result<MockConnection> {
        if let Some(n) = name.filter(|n| n.contains('\0')) {
            return Err(DisplayError::InvalidDisplayName {
                name: n.to_string(),
            });
        }

        let mut state = self.lock();
        let resolved = match name {
            Some(n) => n.to_string(),
            None => state
                .default_name
                .clone()
                .ok_or(DisplayError::OpenDisplayFailed { name: None })?,
        };
        let metrics = *state
            .servers
            .get(&resolved)
            .ok_or_else(|| DisplayError::OpenDisplayFailed {
                name: name.map(str::to_string),
            })?;

        state.opened.push(resolved.clone());
        state.live_connections += 1;
        Ok(MockConnection {
            name: resolved,
            metrics,
            state: Arc::clone(&self.state),
        })
    }

    fn default_display_name(&self) -> Option<String> {
        self.lock().default_name.clone().filter(|n| !n.is_empty())
    }

    fn display_string(&self, connection: &MockConnection) -> Option<String> {
        Some(connection.name.clone())
    }

    fn screen_metrics(&self, connection: &MockConnection) -> Result<ScreenMetrics> {
        Ok(connection.metrics)
    }
}
