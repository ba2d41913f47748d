//! Command definitions organized by module.
//!
//! Commands follow `module.methodName` format.
//!
//! # Command Modules
//!
//! | Module | Commands |
//! |--------|----------|
//! | `browsingContext` | Navigation |
//! | `element` | Find, properties, attributes, methods, shadow roots |
//! | `input` | Typing |

// ============================================================================
// Imports
// ============================================================================

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::driver::By;
use crate::identifiers::NodeId;

// ============================================================================
// Command Wrapper
// ============================================================================

/// All protocol commands organized by module.
///
/// This enum wraps module-specific command enums for unified serialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Command {
    /// BrowsingContext module commands.
    BrowsingContext(BrowsingContextCommand),
    /// Element module commands.
    Element(ElementCommand),
    /// Input module commands.
    Input(InputCommand),
}

impl From<BrowsingContextCommand> for Command {
    fn from(command: BrowsingContextCommand) -> Self {
        Self::BrowsingContext(command)
    }
}

impl From<ElementCommand> for Command {
    fn from(command: ElementCommand) -> Self {
        Self::Element(command)
    }
}

impl From<InputCommand> for Command {
    fn from(command: InputCommand) -> Self {
        Self::Input(command)
    }
}

// ============================================================================
// BrowsingContext Commands
// ============================================================================

/// BrowsingContext module commands.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "method", content = "params")]
pub enum BrowsingContextCommand {
    /// Navigate to URL.
    #[serde(rename = "browsingContext.navigate")]
    Navigate {
        /// URL to navigate to.
        url: String,
    },
}

// ============================================================================
// Element Commands
// ============================================================================

/// Where a find command searches.
///
/// At most one of the two IDs is set; neither means the whole document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRoot {
    /// Search below this element (light tree).
    #[serde(rename = "parentId", skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<NodeId>,
    /// Search inside this host's shadow root.
    #[serde(rename = "shadowHostId", skip_serializing_if = "Option::is_none")]
    pub shadow_host_id: Option<NodeId>,
}

/// Element module commands.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "method", content = "params")]
pub enum ElementCommand {
    /// Find the first matching element.
    #[serde(rename = "element.find")]
    Find {
        /// Locator strategy name.
        strategy: String,
        /// Locator value.
        value: String,
        /// Search root.
        #[serde(flatten)]
        root: SearchRoot,
    },

    /// Find every matching element.
    #[serde(rename = "element.findAll")]
    FindAll {
        /// Locator strategy name.
        strategy: String,
        /// Locator value.
        value: String,
        /// Search root.
        #[serde(flatten)]
        root: SearchRoot,
    },

    /// Get property via `element[name]`.
    #[serde(rename = "element.getProperty")]
    GetProperty {
        /// Element ID.
        #[serde(rename = "elementId")]
        element_id: NodeId,
        /// Property name.
        name: String,
    },

    /// Get attribute via `element.getAttribute(name)`.
    #[serde(rename = "element.getAttribute")]
    GetAttribute {
        /// Element ID.
        #[serde(rename = "elementId")]
        element_id: NodeId,
        /// Attribute name.
        name: String,
    },

    /// Call method via `element[name](...args)`.
    #[serde(rename = "element.callMethod")]
    CallMethod {
        /// Element ID.
        #[serde(rename = "elementId")]
        element_id: NodeId,
        /// Method name.
        name: String,
        /// Method arguments.
        #[serde(default)]
        args: Vec<Value>,
    },

    /// Report whether the element hosts an open shadow root.
    #[serde(rename = "element.getShadowRoot")]
    GetShadowRoot {
        /// Element ID.
        #[serde(rename = "elementId")]
        element_id: NodeId,
    },
}

impl ElementCommand {
    /// Builds a find command.
    #[must_use]
    pub fn find(by: &By, root: SearchRoot) -> Self {
        Self::Find {
            strategy: by.strategy().to_string(),
            value: by.value().to_string(),
            root,
        }
    }

    /// Builds a find-all command.
    #[must_use]
    pub fn find_all(by: &By, root: SearchRoot) -> Self {
        Self::FindAll {
            strategy: by.strategy().to_string(),
            value: by.value().to_string(),
            root,
        }
    }
}

// ============================================================================
// Input Commands
// ============================================================================

/// Input module commands.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "method", content = "params")]
pub enum InputCommand {
    /// Type text string character by character.
    #[serde(rename = "input.typeText")]
    TypeText {
        /// Element ID.
        #[serde(rename = "elementId")]
        element_id: NodeId,
        /// Text to type.
        text: String,
    },
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use serde_json::json;

    #[test]
    fn test_find_in_shadow_root() {
        let cmd = ElementCommand::find(
            &By::css("span.info"),
            SearchRoot {
                shadow_host_id: Some(NodeId::new("host-1")),
                ..SearchRoot::default()
            },
        );
        let value = serde_json::to_value(&cmd).expect("serialize");
        assert_eq!(
            value,
            json!({
                "method": "element.find",
                "params": {"strategy": "css", "value": "span.info", "shadowHostId": "host-1"}
            })
        );
    }

    #[test]
    fn test_find_all_in_document() {
        let cmd = ElementCommand::find_all(&By::link_text("3"), SearchRoot::default());
        let value = serde_json::to_value(&cmd).expect("serialize");
        assert_eq!(value["method"], "element.findAll");
        assert_eq!(value["params"], json!({"strategy": "linkText", "value": "3"}));
    }

    #[test]
    fn test_element_get_property() {
        let cmd = ElementCommand::GetProperty {
            element_id: NodeId::new("test-uuid"),
            name: "innerText".to_string(),
        };
        let json = serde_json::to_string(&cmd).expect("serialize");
        assert!(json.contains("element.getProperty"));
        assert!(json.contains("test-uuid"));
        assert!(json.contains("innerText"));
    }

    #[test]
    fn test_type_text() {
        let cmd = Command::Input(InputCommand::TypeText {
            element_id: NodeId::new("input-1"),
            text: "hello".to_string(),
        });
        let value = serde_json::to_value(&cmd).expect("serialize");
        assert_eq!(value["method"], "input.typeText");
        assert_eq!(value["params"]["text"], "hello");
    }
}
