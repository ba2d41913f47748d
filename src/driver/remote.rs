//! WebSocket-backed [`UiDriver`].
//!
//! Each trait call becomes one request on a [`Connection`] to the automation
//! bridge running inside the browser.
//!
//! | Call | Command | Result key |
//! |------|---------|------------|
//! | `query` | `element.find` | `elementId` (string or null) |
//! | `query_all` | `element.findAll` | `elementIds` |
//! | `text` | `element.getProperty("innerText")` | `value` |
//! | `attribute` | `element.getAttribute` | `value` (string or null) |
//! | `attribute("value")` | `element.getProperty("value")` | `value` |
//! | `is_visible` | `element.callMethod("checkVisibility")` | `value` |
//! | `is_selected` | `element.getProperty("checked")`, then `"selected"` | `value` |
//! | `click` | `element.callMethod("click")` | - |
//! | `send_keys` | `input.typeText` | - |
//! | `shadow_root` | `element.getShadowRoot` | `hasShadowRoot` |

// ============================================================================
// Imports
// ============================================================================

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, trace};

use crate::config::TimeoutConfig;
use crate::error::{Error, Result};
use crate::identifiers::{NodeId, SessionId};
use crate::protocol::{
    BrowsingContextCommand, Command, ElementCommand, InputCommand, Request, Response,
    ResponseType, SearchRoot,
};
use crate::transport::{Connection, PendingServer};

use super::{By, Scope, UiContext, UiDriver};

// ============================================================================
// Constants
// ============================================================================

/// Error code the bridge reports for a detached element.
const STALE_ELEMENT_CODE: &str = "stale element reference";

// ============================================================================
// RemoteDriver
// ============================================================================

/// Drives a live page through the automation bridge.
///
/// Cheap to clone; clones share the connection.
#[derive(Debug, Clone)]
pub struct RemoteDriver {
    connection: Connection,
    session_id: SessionId,
}

impl RemoteDriver {
    /// Waits for the bridge on `server` and wraps the connection.
    ///
    /// # Errors
    ///
    /// Any error from [`PendingServer::accept`].
    pub async fn accept(server: PendingServer, timeouts: &TimeoutConfig) -> Result<Self> {
        let (connection, session_id) = server
            .with_connect_timeout(Duration::from_millis(timeouts.connect_ms))
            .accept()
            .await?;

        debug!(%session_id, "Remote driver ready");

        Ok(Self::from_connection(
            connection.with_command_timeout(Duration::from_millis(timeouts.command_ms)),
            session_id,
        ))
    }

    /// Wraps an already handshaken connection.
    #[must_use]
    pub fn from_connection(connection: Connection, session_id: SessionId) -> Self {
        Self {
            connection,
            session_id,
        }
    }

    /// Session announced by the bridge.
    #[inline]
    #[must_use]
    pub fn session_id(&self) -> SessionId {
        self.session_id
    }

    /// Returns a document-scope context backed by this driver.
    #[must_use]
    pub fn context(&self) -> UiContext {
        UiContext::document(Arc::new(self.clone()))
    }

    /// Loads `url` in the bridge's browsing context.
    pub async fn navigate(&self, url: &str) -> Result<()> {
        debug!(url, "Navigating");
        self.send(BrowsingContextCommand::Navigate {
            url: url.to_string(),
        })
        .await?;
        Ok(())
    }

    /// Closes the connection.
    pub fn shutdown(&self) {
        self.connection.shutdown();
    }

    async fn send(&self, command: impl Into<Command>) -> Result<Response> {
        let request = Request::new(command);
        trace!(id = %request.id, "Sending command");
        self.connection.send(request).await
    }

    /// Sends an element-level command, mapping a stale-element error.
    async fn send_for(&self, node: &NodeId, command: impl Into<Command>) -> Result<Response> {
        let response = self.send(command).await?;
        if response.response_type == ResponseType::Error
            && response.error.as_deref() == Some(STALE_ELEMENT_CODE)
        {
            return Err(Error::stale_node(node.clone()));
        }
        Ok(response)
    }

    async fn value_of(&self, node: &NodeId, command: impl Into<Command>) -> Result<Value> {
        let result = self.send_for(node, command).await?.into_result()?;
        Ok(result.get("value").cloned().unwrap_or(Value::Null))
    }

    async fn get_property(&self, node: &NodeId, name: &str) -> Result<Value> {
        self.value_of(
            node,
            ElementCommand::GetProperty {
                element_id: node.clone(),
                name: name.to_string(),
            },
        )
        .await
    }

    async fn call_method(&self, node: &NodeId, name: &str) -> Result<Value> {
        self.value_of(
            node,
            ElementCommand::CallMethod {
                element_id: node.clone(),
                name: name.to_string(),
                args: Vec::new(),
            },
        )
        .await
    }
}

/// Maps a query scope onto the bridge's search root.
fn search_root(scope: &Scope) -> SearchRoot {
    match scope {
        Scope::Document => SearchRoot::default(),
        Scope::Node(id) => SearchRoot {
            parent_id: Some(id.clone()),
            ..SearchRoot::default()
        },
        Scope::Shadow(id) => SearchRoot {
            shadow_host_id: Some(id.clone()),
            ..SearchRoot::default()
        },
    }
}

// ============================================================================
// UiDriver
// ============================================================================

#[async_trait]
impl UiDriver for RemoteDriver {
    async fn query(&self, scope: &Scope, by: &By) -> Result<Option<NodeId>> {
        let result = self
            .send(ElementCommand::find(by, search_root(scope)))
            .await?
            .into_result()?;
        Ok(result
            .get("elementId")
            .and_then(Value::as_str)
            .map(NodeId::new))
    }

    async fn query_all(&self, scope: &Scope, by: &By) -> Result<Vec<NodeId>> {
        let result = self
            .send(ElementCommand::find_all(by, search_root(scope)))
            .await?
            .into_result()?;
        let ids = result
            .get("elementIds")
            .and_then(Value::as_array)
            .map(|ids| ids.iter().filter_map(Value::as_str).map(NodeId::new).collect())
            .unwrap_or_default();
        Ok(ids)
    }

    async fn text(&self, node: &NodeId) -> Result<String> {
        let value = self.get_property(node, "innerText").await?;
        Ok(value.as_str().unwrap_or_default().to_string())
    }

    async fn attribute(&self, node: &NodeId, name: &str) -> Result<Option<String>> {
        // The attribute only holds the initial value of a form field.
        if name == "value" {
            let value = self.get_property(node, "value").await?;
            return Ok(value.as_str().map(str::to_string));
        }

        let value = self
            .value_of(
                node,
                ElementCommand::GetAttribute {
                    element_id: node.clone(),
                    name: name.to_string(),
                },
            )
            .await?;
        Ok(value.as_str().map(str::to_string))
    }

    async fn is_visible(&self, node: &NodeId) -> Result<bool> {
        let value = self.call_method(node, "checkVisibility").await?;
        Ok(value.as_bool().unwrap_or(false))
    }

    async fn is_selected(&self, node: &NodeId) -> Result<bool> {
        // `checked` is undefined on `<option>`, which reports `selected`.
        if let Some(checked) = self.get_property(node, "checked").await?.as_bool() {
            return Ok(checked);
        }
        let value = self.get_property(node, "selected").await?;
        Ok(value.as_bool().unwrap_or(false))
    }

    async fn click(&self, node: &NodeId) -> Result<()> {
        self.call_method(node, "click").await?;
        Ok(())
    }

    async fn send_keys(&self, node: &NodeId, text: &str) -> Result<()> {
        self.send_for(
            node,
            InputCommand::TypeText {
                element_id: node.clone(),
                text: text.to_string(),
            },
        )
        .await?
        .into_result()?;
        Ok(())
    }

    async fn shadow_root(&self, node: &NodeId) -> Result<Option<Scope>> {
        let result = self
            .send_for(
                node,
                ElementCommand::GetShadowRoot {
                    element_id: node.clone(),
                },
            )
            .await?
            .into_result()?;
        let hosts = result
            .get("hasShadowRoot")
            .and_then(Value::as_bool)
            .unwrap_or(false);
        Ok(hosts.then(|| Scope::Shadow(node.clone())))
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use std::net::{IpAddr, Ipv4Addr};

    use futures_util::{SinkExt, StreamExt};
    use serde_json::json;
    use tokio::task::JoinHandle;
    use tokio_tungstenite::connect_async;
    use tokio_tungstenite::tungstenite::Message;

    use crate::config::SuiteConfig;
    use crate::pages::CheckboxesPage;
    use crate::shadow::{self, SelectorPath};

    /// Plays the bridge: answers each request with `reply(method, params)`.
    ///
    /// A reply of `Err(code)` is sent as an error response.
    fn spawn_bridge<F>(url: String, reply: F) -> JoinHandle<Vec<Value>>
    where
        F: Fn(&str, &Value) -> std::result::Result<Value, &'static str> + Send + 'static,
    {
        tokio::spawn(async move {
            let (mut ws, _) = connect_async(url).await.expect("connect");
            let ready = json!({
                "id": "00000000-0000-0000-0000-000000000000",
                "type": "success",
                "result": {"sessionId": 3}
            });
            ws.send(Message::Text(ready.to_string().into())).await.expect("ready");

            let mut seen = Vec::new();
            while let Some(Ok(Message::Text(text))) = ws.next().await {
                let request: Value = serde_json::from_str(&text).expect("request json");
                let method = request["method"].as_str().unwrap_or_default().to_string();
                let response = match reply(&method, &request["params"]) {
                    Ok(result) => json!({"id": request["id"], "type": "success", "result": result}),
                    Err(code) => json!({
                        "id": request["id"],
                        "type": "error",
                        "error": code,
                        "message": "detached"
                    }),
                };
                seen.push(request);
                ws.send(Message::Text(response.to_string().into()))
                    .await
                    .expect("reply");
            }
            seen
        })
    }

    async fn connect<F>(reply: F) -> (RemoteDriver, JoinHandle<Vec<Value>>)
    where
        F: Fn(&str, &Value) -> std::result::Result<Value, &'static str> + Send + 'static,
    {
        let server = PendingServer::bind(IpAddr::V4(Ipv4Addr::LOCALHOST), 0)
            .await
            .expect("bind");
        let bridge = spawn_bridge(server.ws_url(), reply);
        let driver = RemoteDriver::accept(server, &TimeoutConfig::default())
            .await
            .expect("accept");
        (driver, bridge)
    }

    #[test]
    fn test_search_root_mapping() {
        let id = NodeId::new("h1");
        assert_eq!(search_root(&Scope::Document), SearchRoot::default());
        assert_eq!(search_root(&Scope::Node(id.clone())).parent_id, Some(id.clone()));
        assert_eq!(search_root(&Scope::Shadow(id.clone())).shadow_host_id, Some(id));
    }

    #[tokio::test]
    async fn test_shadow_path_over_bridge() {
        let (driver, bridge) = connect(|method, params| match method {
            "element.find" if params["value"] == "#shadow_host" => Ok(json!({"elementId": "host"})),
            "element.find" if params["shadowHostId"] == "host" => Ok(json!({"elementId": "span"})),
            "element.find" => Ok(json!({"elementId": null})),
            "element.getShadowRoot" => Ok(json!({"hasShadowRoot": true})),
            "element.getProperty" => Ok(json!({"value": "Mobiles"})),
            _ => Ok(json!({})),
        })
        .await;
        assert_eq!(driver.session_id(), SessionId::new(3));

        let path = SelectorPath::parse("#shadow_host >>> span.info").expect("path");
        let node = shadow::locate(&driver.context(), &path).await.expect("located");
        assert_eq!(node.text().await.expect("text"), "Mobiles");

        let missing = driver.context().try_find(By::css("#nope")).await.expect("query");
        assert!(missing.is_none());

        driver.shutdown();
        let seen = bridge.await.expect("bridge");
        assert_eq!(seen[1]["method"], "element.getShadowRoot");
        assert_eq!(seen[2]["params"]["shadowHostId"], "host");
    }

    #[tokio::test]
    async fn test_navigate_and_find_all() {
        let (driver, bridge) = connect(|method, _| match method {
            "element.findAll" => Ok(json!({"elementIds": ["r1", "r2", "r3"]})),
            _ => Ok(json!({})),
        })
        .await;

        driver.navigate("https://example.test/").await.expect("navigate");
        let rows = driver.context().find_all(By::tag("tr")).await.expect("rows");
        assert_eq!(rows.len(), 3);

        driver.shutdown();
        let seen = bridge.await.expect("bridge");
        assert_eq!(seen[0]["method"], "browsingContext.navigate");
        assert_eq!(seen[0]["params"]["url"], "https://example.test/");
    }

    #[tokio::test]
    async fn test_page_runs_on_base_url() {
        let (driver, bridge) = connect(|method, _| match method {
            "element.findAll" => Ok(json!({"elementIds": ["c1", "c2"]})),
            _ => Ok(json!({})),
        })
        .await;
        let config = SuiteConfig::default();

        driver.navigate(config.page_url(None)).await.expect("navigate");
        let page = CheckboxesPage::new(driver.context(), &config.checkboxes);
        assert_eq!(page.count().await.expect("count"), 2);

        driver.shutdown();
        let seen = bridge.await.expect("bridge");
        assert_eq!(seen[0]["params"]["url"], config.base_url.as_str());
        assert_eq!(seen[1]["method"], "element.findAll");
        assert_eq!(seen[1]["params"]["value"], config.checkboxes.boxes.value());
    }

    #[tokio::test]
    async fn test_is_selected_reads_option_state() {
        let (driver, bridge) = connect(|method, params| match (method, params["name"].as_str()) {
            ("element.getProperty", Some("checked")) if params["elementId"] == "box" => {
                Ok(json!({"value": false}))
            }
            ("element.getProperty", Some("checked")) => Ok(json!({"value": null})),
            ("element.getProperty", Some("selected")) => Ok(json!({"value": true})),
            _ => Ok(json!({})),
        })
        .await;

        assert!(driver.is_selected(&NodeId::new("opt")).await.expect("option"));
        assert!(!driver.is_selected(&NodeId::new("box")).await.expect("checkbox"));

        driver.shutdown();
        let seen = bridge.await.expect("bridge");
        let names: Vec<&str> = seen
            .iter()
            .filter_map(|request| request["params"]["name"].as_str())
            .collect();
        assert_eq!(names, ["checked", "selected", "checked"]);
    }

    #[tokio::test]
    async fn test_error_responses() {
        let (driver, _bridge) = connect(|method, _| match method {
            "element.callMethod" => Err(STALE_ELEMENT_CODE),
            _ => Err("unknown command"),
        })
        .await;

        let node = NodeId::new("gone");
        let err = driver.click(&node).await.expect_err("stale");
        assert!(matches!(err, Error::StaleNode { ref node_id } if node_id == &node));
        assert!(err.is_element_error());

        let err = driver
            .query(&Scope::Document, &By::css("div"))
            .await
            .expect_err("protocol");
        assert!(matches!(err, Error::Protocol { .. }));
        assert!(err.to_string().contains("unknown command: detached"));
    }
}
