//! In-memory DOM backend.
//!
//! [`FixtureDom`] implements [`UiDriver`] over a small element tree so page
//! objects and the traversal algorithms can run without a browser. It models
//! exactly what the widgets need: tags, attributes, text, shadow roots,
//! visibility, selection, the default click behavior of checkboxes, radios
//! and options, and click handlers that bubble from the target up through its
//! ancestors (crossing shadow hosts like DOM events do). Disabled elements
//! ignore clicks.
//!
//! # Example
//!
//! ```ignore
//! use widget_verify::fixture::{FixtureDom, FixtureNode};
//!
//! let dom = FixtureDom::new();
//! let host = dom.append_to_document(FixtureNode::new("div").with_id("shadow_host"));
//! dom.append_to_shadow(&host, FixtureNode::new("span").with_class("info").with_text("Mobiles"));
//!
//! let ctx = dom.context();
//! ```
//!
//! # Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | `css` | Selector subset parser and matcher |
//! | [`widgets`] | Canned replicas of the demo-site widgets |

// ============================================================================
// Submodules
// ============================================================================

mod css;

/// Canned replicas of the demo-site widgets.
pub mod widgets;

// ============================================================================
// Imports
// ============================================================================

use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use rustc_hash::FxHashMap;
use tracing::{trace, warn};

use crate::driver::{By, Scope, UiContext, UiDriver};
use crate::error::{Error, Result};
use crate::identifiers::NodeId;

use css::CssSelector;

// ============================================================================
// Types
// ============================================================================

/// Click handler: receives the tree and the clicked target.
pub type ClickHandler = Arc<dyn Fn(&mut FixtureTree, &NodeId) + Send + Sync>;

// ============================================================================
// FixtureNode
// ============================================================================

/// Element data: tag, attributes, own text, and state flags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixtureNode {
    /// Lowercase tag name.
    pub tag: String,
    /// Attributes, including `id`, `class` and input `value`.
    pub attrs: FxHashMap<String, String>,
    /// Own text (children contribute theirs to the text content).
    pub text: String,
    /// Rendered flag.
    pub visible: bool,
    /// Checked/selected flag.
    pub selected: bool,
}

impl FixtureNode {
    /// Creates a visible, unselected element.
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into().to_ascii_lowercase(),
            attrs: FxHashMap::default(),
            text: String::new(),
            visible: true,
            selected: false,
        }
    }

    /// Sets the `id` attribute.
    #[must_use]
    pub fn with_id(self, id: impl Into<String>) -> Self {
        self.with_attr("id", id)
    }

    /// Adds a class to the `class` attribute.
    #[must_use]
    pub fn with_class(mut self, class: impl AsRef<str>) -> Self {
        let entry = self.attrs.entry("class".to_string()).or_default();
        if !entry.is_empty() {
            entry.push(' ');
        }
        entry.push_str(class.as_ref());
        self
    }

    /// Sets an attribute.
    #[must_use]
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(name.into(), value.into());
        self
    }

    /// Sets the own text.
    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    /// Marks the element as not rendered.
    #[must_use]
    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }

    /// Returns an attribute value.
    #[must_use]
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }

    /// Returns `true` if the `class` attribute lists `class`.
    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.attr("class")
            .is_some_and(|classes| classes.split_whitespace().any(|c| c == class))
    }

    /// Marks the element as checked or selected.
    #[must_use]
    pub fn checked(mut self) -> Self {
        self.selected = true;
        self
    }

    /// Marks the element as disabled.
    #[must_use]
    pub fn disabled(self) -> Self {
        self.with_attr("disabled", "")
    }

    /// Returns `true` if the element carries `disabled`.
    #[must_use]
    pub fn is_disabled(&self) -> bool {
        self.attr("disabled").is_some()
    }

    /// Lowercase `type` of an `<input>`.
    fn input_type(&self) -> Option<String> {
        if self.tag != "input" {
            return None;
        }
        self.attr("type").map(str::to_ascii_lowercase)
    }
}

// ============================================================================
// FixtureTree
// ============================================================================

/// Storage slot: element data plus tree links.
#[derive(Debug, Clone)]
struct Slot {
    node: FixtureNode,
    /// Light-tree parent.
    parent: Option<NodeId>,
    /// Host whose shadow root directly contains this node.
    host: Option<NodeId>,
    children: Vec<NodeId>,
    shadow: Option<Vec<NodeId>>,
}

/// The element tree behind a [`FixtureDom`].
///
/// Click handlers get mutable access to it to re-render widgets.
#[derive(Debug, Default)]
pub struct FixtureTree {
    slots: FxHashMap<NodeId, Slot>,
    roots: Vec<NodeId>,
    next_id: u64,
}

impl FixtureTree {
    fn insert(&mut self, node: FixtureNode, parent: Option<NodeId>, host: Option<NodeId>) -> NodeId {
        self.next_id += 1;
        let id = NodeId::new(format!("node-{}", self.next_id));
        self.slots.insert(
            id.clone(),
            Slot {
                node,
                parent,
                host,
                children: Vec::new(),
                shadow: None,
            },
        );
        id
    }

    /// Appends a top-level element to the document.
    pub fn append_to_document(&mut self, node: FixtureNode) -> NodeId {
        let id = self.insert(node, None, None);
        self.roots.push(id.clone());
        id
    }

    /// Appends a light-tree child.
    pub fn append_child(&mut self, parent: &NodeId, node: FixtureNode) -> NodeId {
        let id = self.insert(node, Some(parent.clone()), None);
        match self.slots.get_mut(parent) {
            Some(slot) => slot.children.push(id.clone()),
            None => warn!(%parent, "Appending to unknown parent; node left detached"),
        }
        id
    }

    /// Appends a node to `host`'s shadow root, attaching one if needed.
    pub fn append_to_shadow(&mut self, host: &NodeId, node: FixtureNode) -> NodeId {
        let id = self.insert(node, None, Some(host.clone()));
        match self.slots.get_mut(host) {
            Some(slot) => slot.shadow.get_or_insert_with(Vec::new).push(id.clone()),
            None => warn!(%host, "Attaching to unknown host; node left detached"),
        }
        id
    }

    /// Attaches an empty shadow root to `host`.
    pub fn attach_shadow(&mut self, host: &NodeId) {
        if let Some(slot) = self.slots.get_mut(host) {
            slot.shadow.get_or_insert_with(Vec::new);
        }
    }

    /// Removes every light-tree descendant of `id`.
    pub fn remove_children(&mut self, id: &NodeId) {
        let children = self
            .slots
            .get_mut(id)
            .map(|slot| std::mem::take(&mut slot.children))
            .unwrap_or_default();
        for child in children {
            self.remove_subtree(&child);
        }
    }

    fn remove_subtree(&mut self, id: &NodeId) {
        if let Some(slot) = self.slots.remove(id) {
            for child in slot.children.iter().chain(slot.shadow.iter().flatten()) {
                self.remove_subtree(child);
            }
        }
    }

    /// Returns element data.
    #[must_use]
    pub fn node(&self, id: &NodeId) -> Option<&FixtureNode> {
        self.slots.get(id).map(|slot| &slot.node)
    }

    /// Returns mutable element data.
    pub fn node_mut(&mut self, id: &NodeId) -> Option<&mut FixtureNode> {
        self.slots.get_mut(id).map(|slot| &mut slot.node)
    }

    /// Returns light-tree children.
    #[must_use]
    pub fn children(&self, id: &NodeId) -> &[NodeId] {
        self.slots
            .get(id)
            .map(|slot| slot.children.as_slice())
            .unwrap_or_default()
    }

    /// Returns the light-tree parent (stops at a shadow root).
    #[must_use]
    pub fn light_parent(&self, id: &NodeId) -> Option<NodeId> {
        self.slots.get(id).and_then(|slot| slot.parent.clone())
    }

    /// Returns the parent for event bubbling (crosses into the host).
    #[must_use]
    pub fn composed_parent(&self, id: &NodeId) -> Option<NodeId> {
        self.slots
            .get(id)
            .and_then(|slot| slot.parent.clone().or_else(|| slot.host.clone()))
    }

    /// Returns the nearest of `id` and its composed ancestors matching `pred`.
    pub fn closest(&self, id: &NodeId, pred: impl Fn(&FixtureNode) -> bool) -> Option<NodeId> {
        let mut cursor = Some(id.clone());
        while let Some(current) = cursor {
            if self.node(&current).is_some_and(&pred) {
                return Some(current);
            }
            cursor = self.composed_parent(&current);
        }
        None
    }

    /// Returns the first light-tree node in the document with `id` attribute.
    #[must_use]
    pub fn element_by_id(&self, id: &str) -> Option<NodeId> {
        self.document_nodes()
            .into_iter()
            .find(|node| self.node(node).and_then(|n| n.attr("id")) == Some(id))
    }

    /// Returns the first light-tree node in the document listing `class`.
    #[must_use]
    pub fn element_by_class(&self, class: &str) -> Option<NodeId> {
        self.document_nodes()
            .into_iter()
            .find(|node| self.node(node).is_some_and(|n| n.has_class(class)))
    }

    /// Light-tree nodes reachable from the document, in document order.
    fn document_nodes(&self) -> Vec<NodeId> {
        let mut out = Vec::new();
        for root in &self.roots {
            self.collect_light(root, &mut out);
        }
        out
    }

    /// Returns the text content: own text followed by light-tree descendants'.
    #[must_use]
    pub fn text_content(&self, id: &NodeId) -> String {
        let mut out = String::new();
        self.push_text(id, &mut out);
        out
    }

    fn push_text(&self, id: &NodeId, out: &mut String) {
        if let Some(slot) = self.slots.get(id) {
            out.push_str(&slot.node.text);
            for child in &slot.children {
                self.push_text(child, out);
            }
        }
    }

    /// Replaces the own text.
    pub fn set_text(&mut self, id: &NodeId, text: impl Into<String>) {
        if let Some(node) = self.node_mut(id) {
            node.text = text.into();
        }
    }

    /// Sets an attribute.
    pub fn set_attr(&mut self, id: &NodeId, name: impl Into<String>, value: impl Into<String>) {
        if let Some(node) = self.node_mut(id) {
            node.attrs.insert(name.into(), value.into());
        }
    }

    /// Sets the rendered flag.
    pub fn set_visible(&mut self, id: &NodeId, visible: bool) {
        if let Some(node) = self.node_mut(id) {
            node.visible = visible;
        }
    }

    /// Returns `true` if the node and all composed ancestors are rendered.
    #[must_use]
    pub fn is_rendered(&self, id: &NodeId) -> bool {
        let mut cursor = Some(id.clone());
        while let Some(current) = cursor {
            match self.node(&current) {
                Some(node) if node.visible => cursor = self.composed_parent(&current),
                _ => return false,
            }
        }
        true
    }

    fn collect_light(&self, id: &NodeId, out: &mut Vec<NodeId>) {
        out.push(id.clone());
        for child in self.children(id) {
            self.collect_light(child, out);
        }
    }

    /// Applies the browser's default click behavior for form controls.
    ///
    /// Checkboxes toggle; a radio is checked and its same-name group in the
    /// document cleared; an `<option>` toggles in a `multiple` select and
    /// otherwise becomes the select's only selected option.
    pub fn apply_default_action(&mut self, id: &NodeId) {
        let Some(node) = self.node(id) else {
            return;
        };

        if node.tag == "option" {
            self.select_option(id);
            return;
        }

        match node.input_type().as_deref() {
            Some("checkbox") => {
                if let Some(node) = self.node_mut(id) {
                    node.selected = !node.selected;
                }
            }
            Some("radio") => {
                let group = node.attr("name").map(str::to_string);
                if let Some(group) = group {
                    let peers: Vec<NodeId> = self
                        .document_nodes()
                        .into_iter()
                        .filter(|peer| {
                            self.node(peer).is_some_and(|n| {
                                n.input_type().as_deref() == Some("radio")
                                    && n.attr("name") == Some(group.as_str())
                            })
                        })
                        .collect();
                    for peer in peers {
                        if let Some(n) = self.node_mut(&peer) {
                            n.selected = false;
                        }
                    }
                }
                if let Some(node) = self.node_mut(id) {
                    node.selected = true;
                }
            }
            _ => {}
        }
    }

    fn select_option(&mut self, option: &NodeId) {
        let mut cursor = self.light_parent(option);
        while let Some(current) = &cursor {
            if self.node(current).is_some_and(|n| n.tag == "select") {
                break;
            }
            cursor = self.light_parent(current);
        }
        let Some(select) = cursor else {
            return;
        };

        let multiple = self.node(&select).is_some_and(|n| n.attr("multiple").is_some());
        if multiple {
            if let Some(node) = self.node_mut(option) {
                node.selected = !node.selected;
            }
            return;
        }

        let mut options = Vec::new();
        self.collect_light(&select, &mut options);
        for other in options {
            if let Some(node) = self.node_mut(&other) {
                if node.tag == "option" {
                    node.selected = &other == option;
                }
            }
        }
    }

    /// Candidates for a query in `scope`, in document order.
    fn candidates(&self, scope: &Scope) -> Result<Vec<NodeId>> {
        let tops: Vec<NodeId> = match scope {
            Scope::Document => self.roots.clone(),
            Scope::Node(id) => self.existing(id)?.children.clone(),
            Scope::Shadow(host) => self
                .existing(host)?
                .shadow
                .clone()
                .ok_or_else(|| Error::no_encapsulated_scope(host.to_string()))?,
        };

        let mut out = Vec::new();
        for top in &tops {
            self.collect_light(top, &mut out);
        }
        Ok(out)
    }

    fn existing(&self, id: &NodeId) -> Result<&Slot> {
        self.slots.get(id).ok_or_else(|| Error::stale_node(id.clone()))
    }

    fn matches(&self, id: &NodeId, by: &By, css: Option<&CssSelector>) -> bool {
        let Some(node) = self.node(id) else {
            return false;
        };
        let text = || self.text_content(id);
        match by {
            By::Css(_) => css.is_some_and(|selector| selector.matches(self, id)),
            By::Id(v) => node.attr("id") == Some(v.as_str()),
            By::Tag(v) => node.tag.eq_ignore_ascii_case(v),
            By::Name(v) => node.attr("name") == Some(v.as_str()),
            By::Class(v) => node.has_class(v),
            By::Text(v) => text().trim() == v.as_str(),
            By::PartialText(v) => text().contains(v.as_str()),
            By::LinkText(v) => node.tag == "a" && text().trim() == v.as_str(),
            By::PartialLinkText(v) => node.tag == "a" && text().contains(v.as_str()),
            By::XPath(_) => false,
        }
    }

    fn resolve(&self, scope: &Scope, by: &By) -> Result<Vec<NodeId>> {
        let css = match by {
            By::Css(selector) => Some(CssSelector::parse(selector)?),
            By::XPath(_) => {
                return Err(Error::invalid_argument(
                    "fixture DOM does not evaluate XPath; use a CSS or text locator",
                ));
            }
            _ => None,
        };

        Ok(self
            .candidates(scope)?
            .into_iter()
            .filter(|id| self.matches(id, by, css.as_ref()))
            .collect())
    }
}

// ============================================================================
// FixtureStats
// ============================================================================

/// Counters for driver calls, used to check traversal costs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FixtureStats {
    /// `query` + `query_all` calls.
    pub queries: usize,
    /// `shadow_root` calls.
    pub scope_switches: usize,
    /// `click` calls.
    pub clicks: usize,
}

// ============================================================================
// FixtureDom
// ============================================================================

/// Shared handle to an in-memory DOM. Clones see the same tree.
#[derive(Clone, Default)]
pub struct FixtureDom {
    tree: Arc<Mutex<FixtureTree>>,
    handlers: Arc<Mutex<FxHashMap<NodeId, ClickHandler>>>,
    stats: Arc<Mutex<FixtureStats>>,
}

impl std::fmt::Debug for FixtureDom {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FixtureDom")
            .field("nodes", &self.tree.lock().slots.len())
            .field("stats", &*self.stats.lock())
            .finish_non_exhaustive()
    }
}

impl FixtureDom {
    /// Creates an empty document.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a query context at the document root.
    #[must_use]
    pub fn context(&self) -> UiContext {
        UiContext::document(Arc::new(self.clone()))
    }

    /// Appends a top-level element.
    pub fn append_to_document(&self, node: FixtureNode) -> NodeId {
        self.tree.lock().append_to_document(node)
    }

    /// Appends a light-tree child.
    pub fn append_child(&self, parent: &NodeId, node: FixtureNode) -> NodeId {
        self.tree.lock().append_child(parent, node)
    }

    /// Appends a node to `host`'s shadow root.
    pub fn append_to_shadow(&self, host: &NodeId, node: FixtureNode) -> NodeId {
        self.tree.lock().append_to_shadow(host, node)
    }

    /// Runs a closure with mutable access to the tree.
    pub fn with_tree<R>(&self, f: impl FnOnce(&mut FixtureTree) -> R) -> R {
        f(&mut *self.tree.lock())
    }

    /// Registers a click handler on `node`.
    ///
    /// Handlers fire for clicks on `node` and on any of its descendants,
    /// innermost first.
    pub fn on_click(
        &self,
        node: &NodeId,
        handler: impl Fn(&mut FixtureTree, &NodeId) + Send + Sync + 'static,
    ) {
        self.handlers.lock().insert(node.clone(), Arc::new(handler));
    }

    /// Returns a snapshot of the call counters.
    #[must_use]
    pub fn stats(&self) -> FixtureStats {
        *self.stats.lock()
    }

    /// Resets the call counters.
    pub fn reset_stats(&self) {
        *self.stats.lock() = FixtureStats::default();
    }

    fn with_node<R>(&self, node: &NodeId, f: impl FnOnce(&FixtureTree, &FixtureNode) -> R) -> Result<R> {
        let tree = self.tree.lock();
        let data = tree.node(node).ok_or_else(|| Error::stale_node(node.clone()))?;
        Ok(f(&tree, data))
    }
}

// ============================================================================
// UiDriver
// ============================================================================

#[async_trait]
impl UiDriver for FixtureDom {
    async fn query(&self, scope: &Scope, by: &By) -> Result<Option<NodeId>> {
        self.stats.lock().queries += 1;
        let found = self.tree.lock().resolve(scope, by)?.into_iter().next();
        trace!(%scope, locator = %by, found = found.is_some(), "Fixture query");
        Ok(found)
    }

    async fn query_all(&self, scope: &Scope, by: &By) -> Result<Vec<NodeId>> {
        self.stats.lock().queries += 1;
        self.tree.lock().resolve(scope, by)
    }

    async fn text(&self, node: &NodeId) -> Result<String> {
        self.with_node(node, |tree, _| tree.text_content(node).trim().to_string())
    }

    async fn attribute(&self, node: &NodeId, name: &str) -> Result<Option<String>> {
        self.with_node(node, |_, data| data.attr(name).map(str::to_string))
    }

    async fn is_visible(&self, node: &NodeId) -> Result<bool> {
        self.with_node(node, |tree, _| tree.is_rendered(node))
    }

    async fn is_selected(&self, node: &NodeId) -> Result<bool> {
        self.with_node(node, |_, data| data.selected)
    }

    async fn click(&self, node: &NodeId) -> Result<()> {
        self.stats.lock().clicks += 1;

        let chain: Vec<ClickHandler> = {
            let mut tree = self.tree.lock();
            let data = tree.node(node).ok_or_else(|| Error::stale_node(node.clone()))?;
            if data.is_disabled() {
                trace!(node_id = %node, "Click on disabled element ignored");
                return Ok(());
            }
            tree.apply_default_action(node);

            let handlers = self.handlers.lock();
            let mut chain = Vec::new();
            let mut cursor = Some(node.clone());
            while let Some(current) = cursor {
                if let Some(handler) = handlers.get(&current) {
                    chain.push(Arc::clone(handler));
                }
                cursor = tree.composed_parent(&current);
            }
            chain
        };

        let mut tree = self.tree.lock();
        for handler in chain {
            handler(&mut *tree, node);
        }
        Ok(())
    }

    async fn send_keys(&self, node: &NodeId, text: &str) -> Result<()> {
        let mut tree = self.tree.lock();
        let data = tree.node_mut(node).ok_or_else(|| Error::stale_node(node.clone()))?;
        data.attrs.entry("value".to_string()).or_default().push_str(text);
        Ok(())
    }

    async fn shadow_root(&self, node: &NodeId) -> Result<Option<Scope>> {
        self.stats.lock().scope_switches += 1;
        let tree = self.tree.lock();
        let slot = tree.existing(node)?;
        Ok(slot.shadow.as_ref().map(|_| Scope::Shadow(node.clone())))
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> (FixtureDom, NodeId) {
        let dom = FixtureDom::new();
        let host = dom.append_to_document(FixtureNode::new("div").with_id("host"));
        dom.append_child(&host, FixtureNode::new("span").with_class("light").with_text("outside"));
        dom.append_to_shadow(&host, FixtureNode::new("span").with_class("inner").with_text("inside"));
        (dom, host)
    }

    #[tokio::test]
    async fn test_shadow_content_hidden_from_document_queries() {
        let (dom, _) = sample();
        let ctx = dom.context();

        assert!(ctx.try_find(By::css("span.inner")).await.expect("query").is_none());
        assert!(ctx.try_find(By::css("span.light")).await.expect("query").is_some());
    }

    #[tokio::test]
    async fn test_shadow_scope_query() {
        let (dom, host) = sample();
        let found = dom
            .query(&Scope::Shadow(host), &By::css("span.inner"))
            .await
            .expect("query");
        assert!(found.is_some());
    }

    #[tokio::test]
    async fn test_descendant_selector() {
        let dom = FixtureDom::new();
        let table = dom.append_to_document(FixtureNode::new("table").with_id("t"));
        let row = dom.append_child(&table, FixtureNode::new("tr"));
        dom.append_child(&row, FixtureNode::new("td").with_text("a"));
        dom.append_to_document(FixtureNode::new("td").with_text("stray"));

        let cells = dom
            .query_all(&Scope::Document, &By::css("table#t td"))
            .await
            .expect("query");
        assert_eq!(cells.len(), 1);
    }

    #[tokio::test]
    async fn test_checkbox_click_toggles() {
        let dom = FixtureDom::new();
        let input = dom.append_to_document(FixtureNode::new("input").with_attr("type", "checkbox"));

        dom.click(&input).await.expect("click");
        assert!(dom.is_selected(&input).await.expect("state"));
        dom.click(&input).await.expect("click");
        assert!(!dom.is_selected(&input).await.expect("state"));
    }

    #[tokio::test]
    async fn test_radio_group_is_exclusive() {
        let dom = FixtureDom::new();
        let radio = || FixtureNode::new("input").with_attr("type", "radio").with_attr("name", "like");
        let yes = dom.append_to_document(radio());
        let other = dom.append_to_document(radio().checked());

        dom.click(&yes).await.expect("click");
        assert!(dom.is_selected(&yes).await.expect("state"));
        assert!(!dom.is_selected(&other).await.expect("state"));

        dom.click(&yes).await.expect("click again");
        assert!(dom.is_selected(&yes).await.expect("radio stays on"));
    }

    #[tokio::test]
    async fn test_disabled_click_is_inert() {
        let dom = FixtureDom::new();
        let radio = dom.append_to_document(
            FixtureNode::new("input").with_attr("type", "radio").disabled(),
        );
        dom.on_click(&radio, |tree, target| tree.set_text(target, "fired"));

        dom.click(&radio).await.expect("click");
        assert!(!dom.is_selected(&radio).await.expect("state"));
        assert_eq!(dom.text(&radio).await.expect("text"), "");
        assert_eq!(dom.stats().clicks, 1);
    }

    #[tokio::test]
    async fn test_option_selection() {
        let dom = FixtureDom::new();
        let single = dom.append_to_document(FixtureNode::new("select"));
        let a = dom.append_child(&single, FixtureNode::new("option").checked());
        let b = dom.append_child(&single, FixtureNode::new("option"));

        dom.click(&b).await.expect("click");
        assert!(!dom.is_selected(&a).await.expect("state"));
        assert!(dom.is_selected(&b).await.expect("state"));

        let multi = dom.append_to_document(FixtureNode::new("select").with_attr("multiple", ""));
        let c = dom.append_child(&multi, FixtureNode::new("option"));
        let d = dom.append_child(&multi, FixtureNode::new("option"));
        dom.click(&c).await.expect("click");
        dom.click(&d).await.expect("click");
        assert!(dom.is_selected(&c).await.expect("state"));
        assert!(dom.is_selected(&d).await.expect("state"));
        assert!(dom.is_selected(&b).await.expect("other select untouched"));

        dom.click(&c).await.expect("toggle off");
        assert!(!dom.is_selected(&c).await.expect("state"));
    }

    #[tokio::test]
    async fn test_click_bubbles_through_shadow_host() {
        let (dom, host) = sample();
        let inner = dom
            .query(&Scope::Shadow(host.clone()), &By::css("span.inner"))
            .await
            .expect("query")
            .expect("present");

        dom.on_click(&host, |tree, target| {
            tree.set_text(target, "clicked");
        });
        dom.click(&inner).await.expect("click");

        assert_eq!(dom.text(&inner).await.expect("text"), "clicked");
    }

    #[tokio::test]
    async fn test_hidden_ancestor_hides_node() {
        let dom = FixtureDom::new();
        let popup = dom.append_to_document(FixtureNode::new("div").hidden());
        let link = dom.append_child(&popup, FixtureNode::new("a").with_text("1"));

        assert!(!dom.is_visible(&link).await.expect("visible"));
        dom.with_tree(|tree| tree.set_visible(&popup, true));
        assert!(dom.is_visible(&link).await.expect("visible"));
    }

    #[tokio::test]
    async fn test_empty_shadow_root_is_a_scope() {
        let dom = FixtureDom::new();
        let host = dom.append_to_document(FixtureNode::new("div"));
        assert_eq!(dom.shadow_root(&host).await.expect("shadow"), None);

        dom.with_tree(|tree| tree.attach_shadow(&host));
        let scope = dom.shadow_root(&host).await.expect("shadow").expect("attached");
        let found = dom.query_all(&scope, &By::css("*")).await.expect("query");
        assert!(found.is_empty());
    }

    #[tokio::test]
    async fn test_xpath_rejected() {
        let dom = FixtureDom::new();
        let err = dom
            .query(&Scope::Document, &By::xpath("//a"))
            .await
            .expect_err("xpath unsupported");
        assert!(matches!(err, Error::InvalidArgument { .. }));
    }

    #[tokio::test]
    async fn test_removed_node_is_stale() {
        let dom = FixtureDom::new();
        let list = dom.append_to_document(FixtureNode::new("ul"));
        let item = dom.append_child(&list, FixtureNode::new("li"));
        dom.with_tree(|tree| tree.remove_children(&list));

        let err = dom.click(&item).await.expect_err("stale");
        assert!(matches!(err, Error::StaleNode { .. }));
    }

    #[tokio::test]
    async fn test_stats_count_calls() {
        let (dom, host) = sample();
        dom.query(&Scope::Document, &By::id("host")).await.expect("query");
        dom.shadow_root(&host).await.expect("shadow");
        dom.click(&host).await.expect("click");

        assert_eq!(
            dom.stats(),
            FixtureStats {
                queries: 1,
                scope_switches: 1,
                clicks: 1,
            }
        );
    }
}
