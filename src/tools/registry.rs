//! Tool registry
//!
//! Manages the collection of available tools and their metadata. Tools are
//! discovered at startup from compile-time `inventory` entries submitted by
//! the `#[gitlab_tool]` macro. In read-only mode, registration of mutating
//! tools is skipped entirely: they do not exist in the registry, are not
//! listed, and cannot be invoked.

use crate::error::ToolError;
use crate::tools::executor::{OperationKind, ToolContext, ToolExecutor, ToolInfo, ToolOutput};
// async_trait required for dyn-compatibility with Box<dyn ToolHandler>
use async_trait::async_trait;
use schemars::Schema;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::HashMap;
use std::time::Instant;
use tracing::{debug, instrument, warn};

/// Compile-time tool registration entry for auto-discovery
///
/// Submitted via `inventory::submit!` by the `#[gitlab_tool]` macro, allowing
/// tools to register without explicit calls.
pub struct ToolRegistration {
    /// Function that registers the tool with a registry
    pub register_fn: fn(&mut ToolRegistry),
}

inventory::collect!(ToolRegistration);

/// A registered tool with all its metadata
pub struct RegisteredTool {
    /// Tool name
    pub name: &'static str,
    /// Tool description
    pub description: &'static str,
    /// Operation kind (read/write/delete/execute)
    pub operation: OperationKind,
    /// JSON Schema for the tool's input
    pub input_schema: Schema,
    /// The tool handler
    handler: Box<dyn ToolHandler>,
}

/// Internal trait for type-erased tool handling
#[async_trait]
trait ToolHandler: Send + Sync {
    /// Execute the tool with raw JSON arguments
    async fn call(&self, ctx: &ToolContext, args: Value) -> Result<ToolOutput, ToolError>;
}

/// Generic tool handler implementation
struct TypedToolHandler<T>
where
    T: ToolExecutor + DeserializeOwned + 'static,
{
    _marker: std::marker::PhantomData<fn() -> T>,
}

impl<T> TypedToolHandler<T>
where
    T: ToolExecutor + DeserializeOwned + 'static,
{
    fn new() -> Self {
        Self {
            _marker: std::marker::PhantomData,
        }
    }
}

#[async_trait]
impl<T> ToolHandler for TypedToolHandler<T>
where
    T: ToolExecutor + DeserializeOwned + Send + Sync + 'static,
{
    async fn call(&self, ctx: &ToolContext, args: Value) -> Result<ToolOutput, ToolError> {
        // Deserialize arguments into the tool struct
        let tool: T = serde_json::from_value(args).map_err(|e| {
            ToolError::InvalidArguments(format!("Failed to parse arguments: {}", e))
        })?;

        tool.execute(ctx).await
    }
}

/// Tool registry
pub struct ToolRegistry {
    tools: HashMap<String, RegisteredTool>,
    read_only: bool,
}

impl ToolRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::with_mode(false)
    }

    /// Create a new empty registry with the given read-only mode
    pub fn with_mode(read_only: bool) -> Self {
        Self {
            tools: HashMap::new(),
            read_only,
        }
    }

    /// Build a registry from all tools discovered via `#[gitlab_tool]`.
    ///
    /// In read-only mode, mutating tools are filtered out here, at
    /// registration time.
    pub fn discover(read_only: bool) -> Self {
        let mut registry = Self::with_mode(read_only);
        for registration in inventory::iter::<ToolRegistration> {
            (registration.register_fn)(&mut registry);
        }
        registry
    }

    /// Whether this registry was built in read-only mode
    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    /// Register a tool
    pub fn register<T>(&mut self)
    where
        T: ToolExecutor
            + DeserializeOwned
            + schemars::JsonSchema
            + ToolInfo
            + Send
            + Sync
            + 'static,
    {
        let name = <T as ToolInfo>::name();
        let operation = <T as ToolInfo>::operation();

        if self.read_only && operation.is_mutating() {
            debug!(name, operation = %operation, "Skipping mutating tool in read-only mode");
            return;
        }

        let tool = RegisteredTool {
            name,
            description: <T as ToolInfo>::description(),
            operation,
            input_schema: schemars::schema_for!(T),
            handler: Box::new(TypedToolHandler::<T>::new()),
        };

        if self.tools.insert(name.to_string(), tool).is_some() {
            // Tool names must be unique; a collision is a definition bug
            warn!(name, "Duplicate tool registration replaced an existing tool");
        }

        debug!(name, operation = %operation, "Registered tool");
    }

    /// Get a tool by name
    pub fn get(&self, name: &str) -> Option<&RegisteredTool> {
        self.tools.get(name)
    }

    /// Get all tool names
    pub fn tool_names(&self) -> impl Iterator<Item = &str> {
        self.tools.keys().map(|s| s.as_str())
    }

    /// Get all tools
    pub fn tools(&self) -> impl Iterator<Item = &RegisteredTool> {
        self.tools.values()
    }

    /// Get the number of registered tools
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Execute a tool by name
    #[instrument(skip(self, ctx, args), fields(tool = %name, request_id = %ctx.request_id))]
    pub async fn execute(
        &self,
        name: &str,
        ctx: &ToolContext,
        args: Value,
    ) -> Result<ToolOutput, ToolError> {
        let start = Instant::now();

        let tool = self
            .tools
            .get(name)
            .ok_or_else(|| ToolError::NotFound(name.to_string()))?;

        let result = tool.handler.call(ctx, args).await;

        debug!(
            duration_ms = start.elapsed().as_millis() as u64,
            success = result.as_ref().map(|o| !o.is_error).unwrap_or(false),
            "Tool call finished"
        );

        result
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_registry() {
        let registry = ToolRegistry::new();
        assert!(registry.is_empty());
        assert_eq!(registry.len(), 0);
    }

    #[test]
    fn test_tool_not_found() {
        let registry = ToolRegistry::new();
        assert!(registry.get("nonexistent").is_none());
    }

    #[test]
    fn test_discover_filters_mutating_tools_in_read_only_mode() {
        let full = ToolRegistry::discover(false);
        let read_only = ToolRegistry::discover(true);

        assert!(read_only.len() < full.len());
        assert!(read_only.tools().all(|t| !t.operation.is_mutating()));

        // Every read tool survives the filter
        let full_reads = full.tools().filter(|t| !t.operation.is_mutating()).count();
        assert_eq!(read_only.len(), full_reads);
    }
}
