//! Tool registry
//!
//! The set of tools is fixed at compile time. [`ToolName`] is the closed set
//! of names the dispatcher routes on, and [`ToolRegistry`] holds the
//! descriptors served to `tools/list`.

use rmcp::model::{JsonObject, Tool, ToolAnnotations};
use serde_json::{Value, json};
use std::fmt;
use std::sync::Arc;

/// Names of the tools this server exposes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolName {
    FetchInstances,
    SendText,
}

impl ToolName {
    /// Every tool, in listing order
    pub const ALL: [ToolName; 2] = [ToolName::FetchInstances, ToolName::SendText];

    /// Wire name of the tool
    pub fn as_str(&self) -> &'static str {
        match self {
            ToolName::FetchInstances => "fetchInstances",
            ToolName::SendText => "sendText",
        }
    }

    /// Look a wire name up; `None` for anything not registered
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|tool| tool.as_str() == name)
    }
}

impl fmt::Display for ToolName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// JSON type of a tool parameter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParameterType {
    String,
    Number,
}

impl ParameterType {
    fn as_str(&self) -> &'static str {
        match self {
            ParameterType::String => "string",
            ParameterType::Number => "number",
        }
    }
}

/// One entry of a tool's argument schema
#[derive(Debug, Clone)]
pub struct ParameterSpec {
    pub name: &'static str,
    pub kind: ParameterType,
    pub description: &'static str,
    pub required: bool,
    pub default: Option<Value>,
}

impl ParameterSpec {
    fn required(name: &'static str, kind: ParameterType, description: &'static str) -> Self {
        Self {
            name,
            kind,
            description,
            required: true,
            default: None,
        }
    }

    fn optional(
        name: &'static str,
        kind: ParameterType,
        description: &'static str,
        default: Value,
    ) -> Self {
        Self {
            name,
            kind,
            description,
            required: false,
            default: Some(default),
        }
    }
}

/// Static description of one tool
#[derive(Debug, Clone)]
pub struct ToolDescriptor {
    pub name: ToolName,
    pub description: &'static str,
    pub parameters: Vec<ParameterSpec>,
    /// Behavior hints for clients, not guarantees
    pub annotations: ToolAnnotations,
}

impl ToolDescriptor {
    /// Descriptor for a registered tool
    pub fn for_tool(name: ToolName) -> Self {
        match name {
            ToolName::FetchInstances => Self {
                name,
                description: "List all WhatsApp instances registered in the Evolution API",
                parameters: Vec::new(),
                annotations: ToolAnnotations::with_title("List instances")
                    .read_only(true)
                    .destructive(false)
                    .idempotent(true)
                    .open_world(true),
            },
            ToolName::SendText => Self {
                name,
                description: "Send a WhatsApp text message through an Evolution API instance",
                parameters: vec![
                    ParameterSpec::required(
                        "instance",
                        ParameterType::String,
                        "Name of the instance to send from",
                    ),
                    ParameterSpec::required(
                        "number",
                        ParameterType::String,
                        "Recipient number, digits only, including country code",
                    ),
                    ParameterSpec::required("text", ParameterType::String, "Message text"),
                    ParameterSpec::optional(
                        "delay",
                        ParameterType::Number,
                        "Seconds to wait before the message is sent",
                        json!(1),
                    ),
                ],
                annotations: ToolAnnotations::with_title("Send text message")
                    .read_only(false)
                    .destructive(false)
                    .idempotent(false)
                    .open_world(true),
            },
        }
    }

    /// JSON Schema of the arguments object
    pub fn input_schema(&self) -> JsonObject {
        let mut properties = JsonObject::new();
        for param in &self.parameters {
            let mut schema = JsonObject::new();
            schema.insert("type".to_string(), json!(param.kind.as_str()));
            schema.insert("description".to_string(), json!(param.description));
            if let Some(default) = &param.default {
                schema.insert("default".to_string(), default.clone());
            }
            properties.insert(param.name.to_string(), Value::Object(schema));
        }

        let required: Vec<&str> = self
            .parameters
            .iter()
            .filter(|p| p.required)
            .map(|p| p.name)
            .collect();

        let mut schema = JsonObject::new();
        schema.insert("type".to_string(), json!("object"));
        schema.insert("properties".to_string(), Value::Object(properties));
        if !required.is_empty() {
            schema.insert("required".to_string(), json!(required));
        }
        schema
    }

    /// The tool as advertised in `tools/list`
    pub fn to_tool(&self) -> Tool {
        Tool::new(self.name.as_str(), self.description, Arc::new(self.input_schema()))
            .annotate(self.annotations.clone())
    }
}

/// Registry of the tools served by this process
#[derive(Debug, Clone)]
pub struct ToolRegistry {
    tools: Vec<ToolDescriptor>,
}

impl ToolRegistry {
    /// Registry holding every tool in [`ToolName::ALL`]
    pub fn new() -> Self {
        Self {
            tools: ToolName::ALL.into_iter().map(ToolDescriptor::for_tool).collect(),
        }
    }

    /// Get all tools
    pub fn tools(&self) -> &[ToolDescriptor] {
        &self.tools
    }

    /// Tool models served to `tools/list`, in registration order
    pub fn list_tools(&self) -> Vec<Tool> {
        self.tools.iter().map(ToolDescriptor::to_tool).collect()
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}
