//! Tool dispatch
//!
//! A call arrives as a tool name plus an untyped argument object. The
//! dispatcher resolves the name, validates the arguments into a [`ToolCall`]
//! once, issues the matching gateway request and wraps whatever happens into
//! a [`ToolResponse`]. Nothing escapes as a protocol fault.
//!
//! Unknown tool names are answered directly with `Unknown tool: <name>`.
//! Every other failure goes through [`ToolError`] and is reported as
//! `Error: <message>`.

use crate::envelope::ToolResponse;
use crate::error::{ToolError, ToolResult};
use crate::registry::ToolName;
use evolution_api::{Gateway, SendTextRequest};
use serde_json::{Map, Number, Value};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Untyped argument bag as received from the client
pub type JsonObject = Map<String, Value>;

const REQUIRED_SEND_TEXT_ARGUMENTS: [&str; 3] = ["instance", "number", "text"];

/// Validated arguments of `sendText`
#[derive(Debug, Clone, PartialEq)]
pub struct SendTextArgs {
    /// Instance to send from
    pub instance: String,
    /// Body posted to the gateway
    pub request: SendTextRequest,
}

impl SendTextArgs {
    /// Validate a raw argument object
    ///
    /// `instance`, `number` and `text` must be non-empty strings. `delay` is
    /// optional and falls back to the gateway default of 1. Presence of all
    /// required fields is checked before any of their types.
    pub fn from_arguments(arguments: &JsonObject) -> ToolResult<Self> {
        if !REQUIRED_SEND_TEXT_ARGUMENTS
            .iter()
            .all(|name| is_present(arguments, name))
        {
            return Err(ToolError::MissingRequiredArguments {
                tool: ToolName::SendText,
            });
        }

        let instance = string_argument(arguments, "instance")?;
        let number = string_argument(arguments, "number")?;
        let text = string_argument(arguments, "text")?;

        let mut request = SendTextRequest::new(number, text);
        if let Some(delay) = number_argument(arguments, "delay")? {
            request = request.with_delay(delay);
        }

        Ok(Self {
            instance: instance.to_string(),
            request,
        })
    }
}

/// A validated tool invocation
#[derive(Debug, Clone, PartialEq)]
pub enum ToolCall {
    FetchInstances,
    SendText(SendTextArgs),
}

impl ToolCall {
    /// Validate the arguments for a known tool
    ///
    /// Tools that take arguments fail with [`ToolError::ArgumentsMissing`]
    /// when the call carried no argument object at all.
    pub fn parse(tool: ToolName, arguments: Option<&JsonObject>) -> ToolResult<Self> {
        match tool {
            ToolName::FetchInstances => Ok(ToolCall::FetchInstances),
            ToolName::SendText => {
                let arguments = arguments.ok_or(ToolError::ArgumentsMissing { tool })?;
                SendTextArgs::from_arguments(arguments).map(ToolCall::SendText)
            }
        }
    }
}

/// Routes tool calls to the gateway
pub struct Dispatcher<G> {
    gateway: Arc<G>,
}

impl<G> Clone for Dispatcher<G> {
    fn clone(&self) -> Self {
        Self {
            gateway: Arc::clone(&self.gateway),
        }
    }
}

impl<G: Gateway> Dispatcher<G> {
    /// Create a dispatcher over a gateway
    pub fn new(gateway: G) -> Self {
        Self::from_arc(Arc::new(gateway))
    }

    /// Create a dispatcher over a shared gateway
    pub fn from_arc(gateway: Arc<G>) -> Self {
        Self { gateway }
    }

    /// Handle one call and always produce a response
    pub async fn dispatch(&self, name: &str, arguments: Option<JsonObject>) -> ToolResponse {
        let Some(tool) = ToolName::parse(name) else {
            warn!(tool = %name, "Unknown tool requested");
            return ToolResponse::error(format!("Unknown tool: {}", name));
        };

        debug!(tool = %tool, "Calling tool");

        match self.invoke(tool, arguments.as_ref()).await {
            Ok(response) => {
                info!(tool = %tool, "Tool call succeeded");
                response
            }
            Err(e) => {
                warn!(tool = %tool, kind = e.kind(), error = %e, "Tool call failed");
                ToolResponse::error(format!("Error: {}", e))
            }
        }
    }

    /// Validate, call the gateway and render the result
    async fn invoke(
        &self,
        tool: ToolName,
        arguments: Option<&JsonObject>,
    ) -> ToolResult<ToolResponse> {
        let call = ToolCall::parse(tool, arguments)?;
        let value = self.execute(&call).await?;
        Ok(ToolResponse::json(&value)?)
    }

    /// Issue the gateway request for a validated call
    pub async fn execute(&self, call: &ToolCall) -> ToolResult<Value> {
        let value = match call {
            ToolCall::FetchInstances => self.gateway.fetch_instances().await?,
            ToolCall::SendText(args) => {
                self.gateway
                    .send_text(&args.instance, &args.request)
                    .await?
            }
        };
        Ok(value)
    }
}

/// Absent, null and empty-string values all count as missing
fn is_present(arguments: &JsonObject, name: &str) -> bool {
    match arguments.get(name) {
        None | Some(Value::Null) => false,
        Some(Value::String(s)) => !s.is_empty(),
        Some(_) => true,
    }
}

/// A required string argument already known to be present
fn string_argument<'a>(arguments: &'a JsonObject, name: &'static str) -> ToolResult<&'a str> {
    match arguments.get(name) {
        Some(Value::String(s)) => Ok(s),
        _ => Err(ToolError::invalid_argument(ToolName::SendText, name, "string")),
    }
}

/// A numeric argument, `None` when absent or null
fn number_argument(arguments: &JsonObject, name: &'static str) -> ToolResult<Option<Number>> {
    match arguments.get(name) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => Ok(Some(n.clone())),
        Some(_) => Err(ToolError::invalid_argument(ToolName::SendText, name, "number")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use evolution_api::{ApiError, ApiResult};
    use rstest::rstest;
    use serde_json::json;
    use std::sync::Mutex;

    /// Records every gateway request and answers with a canned result
    #[derive(Default)]
    struct RecordingGateway {
        calls: Mutex<Vec<(String, Option<SendTextRequest>)>>,
        fail_with: Option<(u16, &'static str, &'static str)>,
    }

    impl RecordingGateway {
        fn failing(status: u16, status_text: &'static str, body: &'static str) -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                fail_with: Some((status, status_text, body)),
            }
        }

        fn answer(&self, value: Value) -> ApiResult<Value> {
            match self.fail_with {
                Some((status, text, body)) => Err(ApiError::status(status, text, body)),
                None => Ok(value),
            }
        }

        fn calls(&self) -> Vec<(String, Option<SendTextRequest>)> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl Gateway for RecordingGateway {
        async fn fetch_instances(&self) -> ApiResult<Value> {
            self.calls
                .lock()
                .unwrap()
                .push(("fetchInstances".to_string(), None));
            self.answer(json!([{"name": "main", "connectionStatus": "open"}]))
        }

        async fn send_text(&self, instance: &str, request: &SendTextRequest) -> ApiResult<Value> {
            self.calls
                .lock()
                .unwrap()
                .push((instance.to_string(), Some(request.clone())));
            self.answer(json!({"key": {"remoteJid": format!("{}@s.whatsapp.net", request.number)}}))
        }
    }

    fn args(value: Value) -> Option<JsonObject> {
        value.as_object().cloned()
    }

    fn dispatcher(gateway: RecordingGateway) -> (Dispatcher<RecordingGateway>, Arc<RecordingGateway>) {
        let gateway = Arc::new(gateway);
        (Dispatcher::from_arc(Arc::clone(&gateway)), gateway)
    }

    #[tokio::test]
    async fn test_fetch_instances_success() {
        let (dispatcher, gateway) = dispatcher(RecordingGateway::default());

        let response = dispatcher.dispatch("fetchInstances", None).await;

        assert!(!response.is_error());
        assert_eq!(
            response.text(),
            "[\n  {\n    \"name\": \"main\",\n    \"connectionStatus\": \"open\"\n  }\n]"
        );
        assert_eq!(gateway.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_fetch_instances_ignores_arguments() {
        let (dispatcher, gateway) = dispatcher(RecordingGateway::default());

        let response = dispatcher
            .dispatch("fetchInstances", args(json!({"unused": true})))
            .await;

        assert!(!response.is_error());
        assert_eq!(gateway.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_send_text_defaults_delay() {
        let (dispatcher, gateway) = dispatcher(RecordingGateway::default());

        let response = dispatcher
            .dispatch(
                "sendText",
                args(json!({"instance": "main", "number": "5511999999999", "text": "hi"})),
            )
            .await;

        assert!(!response.is_error());
        let calls = gateway.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, "main");
        assert_eq!(
            calls[0].1,
            Some(SendTextRequest::new("5511999999999", "hi"))
        );
    }

    #[tokio::test]
    async fn test_send_text_passes_delay() {
        let (dispatcher, gateway) = dispatcher(RecordingGateway::default());

        dispatcher
            .dispatch(
                "sendText",
                args(json!({"instance": "main", "number": "5511999999999", "text": "hi", "delay": 5})),
            )
            .await;

        let request = gateway.calls()[0].1.clone().unwrap();
        assert_eq!(serde_json::to_value(&request).unwrap()["delay"], 5);
    }

    #[tokio::test]
    async fn test_send_text_without_arguments() {
        let (dispatcher, gateway) = dispatcher(RecordingGateway::default());

        let response = dispatcher.dispatch("sendText", None).await;

        assert!(response.is_error());
        assert_eq!(response.text(), "Error: Arguments are required for sendText");
        assert!(gateway.calls().is_empty());
    }

    #[rstest]
    #[case::no_instance(json!({"number": "5511999999999", "text": "hi"}))]
    #[case::no_number(json!({"instance": "main", "text": "hi"}))]
    #[case::no_text(json!({"instance": "main", "number": "5511999999999"}))]
    #[case::empty_instance(json!({"instance": "", "number": "5511999999999", "text": "hi"}))]
    #[case::empty_text(json!({"instance": "main", "number": "5511999999999", "text": ""}))]
    #[case::null_number(json!({"instance": "main", "number": null, "text": "hi"}))]
    #[case::empty_object(json!({}))]
    #[case::no_instance_numeric_number(json!({"number": 5511999999999u64, "text": "hi"}))]
    #[case::empty_text_string_delay(json!({"instance": "main", "number": "1", "text": "", "delay": "5"}))]
    #[tokio::test]
    async fn test_send_text_missing_required(#[case] arguments: Value) {
        let (dispatcher, gateway) = dispatcher(RecordingGateway::default());

        let response = dispatcher.dispatch("sendText", args(arguments)).await;

        assert!(response.is_error());
        assert_eq!(response.text(), "Error: Missing required arguments for sendText");
        assert!(gateway.calls().is_empty());
    }

    #[rstest]
    #[case::numeric_number(json!({"instance": "main", "number": 5511999999999u64, "text": "hi"}), "number", "string")]
    #[case::string_delay(json!({"instance": "main", "number": "1", "text": "hi", "delay": "5"}), "delay", "number")]
    #[case::object_instance(json!({"instance": {"name": "main"}, "number": "1", "text": "hi"}), "instance", "string")]
    #[tokio::test]
    async fn test_send_text_wrong_types(
        #[case] arguments: Value,
        #[case] argument: &str,
        #[case] expected: &str,
    ) {
        let (dispatcher, gateway) = dispatcher(RecordingGateway::default());

        let response = dispatcher.dispatch("sendText", args(arguments)).await;

        assert!(response.is_error());
        assert_eq!(
            response.text(),
            format!("Error: Invalid argument '{argument}' for sendText: expected {expected}")
        );
        assert!(gateway.calls().is_empty());
    }

    #[rstest]
    #[case("deleteInstance")]
    #[case("")]
    #[case("SendText")]
    #[tokio::test]
    async fn test_unknown_tool(#[case] name: &str) {
        let (dispatcher, gateway) = dispatcher(RecordingGateway::default());

        let response = dispatcher
            .dispatch(name, args(json!({"instance": "main"})))
            .await;

        assert!(response.is_error());
        assert_eq!(response.text(), format!("Unknown tool: {name}"));
        assert!(gateway.calls().is_empty());
    }

    #[tokio::test]
    async fn test_remote_error_is_enveloped() {
        let (dispatcher, _gateway) =
            dispatcher(RecordingGateway::failing(500, "Internal Server Error", "oops"));

        let response = dispatcher.dispatch("fetchInstances", None).await;

        assert!(response.is_error());
        assert_eq!(
            response.text(),
            "Error: Evolution API error: 500 Internal Server Error\noops"
        );
    }

    #[tokio::test]
    async fn test_each_call_reaches_gateway() {
        let (dispatcher, gateway) = dispatcher(RecordingGateway::default());

        dispatcher.dispatch("fetchInstances", None).await;
        dispatcher.dispatch("fetchInstances", None).await;

        assert_eq!(gateway.calls().len(), 2);
    }

    #[test]
    fn test_parse_builds_typed_call() {
        let arguments = args(json!({"instance": "main", "number": "1", "text": "x", "delay": 2.5})).unwrap();
        let call = ToolCall::parse(ToolName::SendText, Some(&arguments)).unwrap();

        let ToolCall::SendText(send) = call else {
            panic!("expected sendText call");
        };
        assert_eq!(send.instance, "main");
        assert_eq!(send.request.delay, Number::from_f64(2.5).unwrap());
    }

    #[test]
    fn test_parse_fetch_instances_needs_no_arguments() {
        let call = ToolCall::parse(ToolName::FetchInstances, None).unwrap();
        assert_eq!(call, ToolCall::FetchInstances);
    }
}
