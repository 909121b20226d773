//! In-memory DOM host for testing.
//!
//! Provides an arena-backed document that records style writes, listeners,
//! timers and navigation so the zoom state machine can be driven natively.

use std::collections::{BTreeMap, BTreeSet};

use crate::events::{InputResult, ZoomEvent};
use crate::host::{DomHost, EventKind, ListenTarget};
use crate::math::{Rect, Size, Vec2};
use crate::style::StyleProp;
use crate::types::TimerId;
use crate::zooming::Zooming;

/// Handle to a node of a [`MemoryDom`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

#[derive(Debug, Default)]
struct Node {
    tag: String,
    attributes: BTreeMap<String, String>,
    styles: BTreeMap<StyleProp, String>,
    style_writes: Vec<(StyleProp, String)>,
    layout_flushes: usize,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    rect: Rect,
    natural: Size,
}

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
enum ListenKey {
    Document,
    Window,
    Element(NodeId),
}

impl From<&ListenTarget<NodeId>> for ListenKey {
    fn from(target: &ListenTarget<NodeId>) -> Self {
        match target {
            ListenTarget::Document => ListenKey::Document,
            ListenTarget::Window => ListenKey::Window,
            ListenTarget::Element(id) => ListenKey::Element(*id),
        }
    }
}

#[derive(Clone, Copy, Debug)]
struct Timer {
    due: u64,
    delay: u32,
}

/// In-memory document for testing.
pub struct MemoryDom {
    nodes: Vec<Node>,
    body: NodeId,
    viewport: Size,
    scroll: Vec2,
    listeners: BTreeSet<(ListenKey, EventKind)>,
    timers: BTreeMap<TimerId, Timer>,
    /// Virtual clock in milliseconds
    now: u64,
    loaded_images: Vec<(String, Option<NodeId>)>,
    opened_urls: Vec<String>,
}

impl Default for MemoryDom {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryDom {
    /// Create an empty document with a 1024x768 viewport.
    pub fn new() -> Self {
        Self::with_viewport(Size::new(1024.0, 768.0))
    }

    pub fn with_viewport(viewport: Size) -> Self {
        let body = Node {
            tag: "BODY".to_string(),
            ..Node::default()
        };
        Self {
            nodes: vec![body],
            body: NodeId(0),
            viewport,
            scroll: Vec2::ZERO,
            listeners: BTreeSet::new(),
            timers: BTreeMap::new(),
            now: 0,
            loaded_images: Vec::new(),
            opened_urls: Vec::new(),
        }
    }

    fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id.0]
    }

    fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id.0]
    }

    /// Layout box reported by `bounding_rect`
    pub fn set_rect(&mut self, el: &NodeId, rect: Rect) {
        self.node_mut(*el).rect = rect;
    }

    pub fn set_natural_size(&mut self, el: &NodeId, size: Size) {
        self.node_mut(*el).natural = size;
    }

    pub fn set_viewport(&mut self, viewport: Size) {
        self.viewport = viewport;
    }

    pub fn set_scroll_position(&mut self, position: Vec2) {
        self.scroll = position;
    }

    pub fn children(&self, el: &NodeId) -> &[NodeId] {
        &self.node(*el).children
    }

    /// Every inline style write on `el`, oldest first
    pub fn style_writes(&self, el: &NodeId) -> &[(StyleProp, String)] {
        &self.node(*el).style_writes
    }

    /// Number of forced layouts on `el`
    pub fn layout_flushes(&self, el: &NodeId) -> usize {
        self.node(*el).layout_flushes
    }

    pub fn is_listening(&self, target: &ListenTarget<NodeId>, kind: EventKind) -> bool {
        self.listeners.contains(&(ListenKey::from(target), kind))
    }

    /// Number of attached listeners across all targets
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Delay a pending timer was scheduled with
    pub fn timer_delay(&self, id: TimerId) -> Option<u32> {
        self.timers.get(&id).map(|t| t.delay)
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.len()
    }

    pub fn now(&self) -> u64 {
        self.now
    }

    /// Pop the earliest timer due at or before `until`, moving the clock to
    /// its due time
    pub fn pop_due(&mut self, until: u64) -> Option<TimerId> {
        let (id, timer) = self
            .timers
            .iter()
            .filter(|(_, t)| t.due <= until)
            .min_by_key(|(id, t)| (t.due, **id))
            .map(|(id, t)| (*id, *t))?;
        self.timers.remove(&id);
        self.now = self.now.max(timer.due);
        Some(id)
    }

    /// Advance the clock by `ms`, returning the timers that fired in order
    pub fn advance(&mut self, ms: u64) -> Vec<TimerId> {
        let until = self.now + ms;
        let mut fired = Vec::new();
        while let Some(id) = self.pop_due(until) {
            fired.push(id);
        }
        self.now = until;
        fired
    }

    /// Images requested through `load_image`, with their notify target
    pub fn loaded_images(&self) -> &[(String, Option<NodeId>)] {
        &self.loaded_images
    }

    pub fn opened_urls(&self) -> &[String] {
        &self.opened_urls
    }

    fn is_connected(&self, mut id: NodeId) -> bool {
        loop {
            if id == self.body {
                return true;
            }
            match self.node(id).parent {
                Some(parent) => id = parent,
                None => return false,
            }
        }
    }

    /// Body descendants in document order
    fn descendants(&self) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.node(self.body).children.iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            out.push(id);
            stack.extend(self.node(id).children.iter().rev().copied());
        }
        out
    }

    /// Compound selectors only: `tag`, `#id`, `.class` and combinations
    /// such as `img.zoomable`, optionally comma-separated
    fn matches(&self, id: NodeId, selector: &str) -> bool {
        selector
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .any(|compound| self.matches_compound(id, compound))
    }

    fn matches_compound(&self, id: NodeId, compound: &str) -> bool {
        let node = self.node(id);
        let mut rest = compound;
        let tag_end = rest.find(is_marker).unwrap_or(rest.len());
        let tag = &rest[..tag_end];
        if !tag.is_empty() && tag != "*" && !tag.eq_ignore_ascii_case(&node.tag) {
            return false;
        }
        rest = &rest[tag_end..];

        while let Some(marker) = rest.chars().next() {
            let body = &rest[1..];
            let end = body.find(is_marker).unwrap_or(body.len());
            let name = &body[..end];
            let ok = match marker {
                '#' => node.attributes.get("id").map(String::as_str) == Some(name),
                _ => node
                    .attributes
                    .get("class")
                    .map(|c| c.split_whitespace().any(|class| class == name))
                    .unwrap_or(false),
            };
            if !ok {
                return false;
            }
            rest = &body[end..];
        }
        true
    }
}

fn is_marker(c: char) -> bool {
    c == '#' || c == '.'
}

impl DomHost for MemoryDom {
    type Element = NodeId;

    fn body(&self) -> NodeId {
        self.body
    }

    fn create_element(&mut self, tag: &str) -> NodeId {
        self.nodes.push(Node {
            tag: tag.to_ascii_uppercase(),
            ..Node::default()
        });
        NodeId(self.nodes.len() - 1)
    }

    fn query_selector(&self, selector: &str) -> Option<NodeId> {
        self.descendants()
            .into_iter()
            .find(|id| self.matches(*id, selector))
    }

    fn query_selector_all(&self, selector: &str) -> Vec<NodeId> {
        self.descendants()
            .into_iter()
            .filter(|id| self.matches(*id, selector))
            .collect()
    }

    fn tag_name(&self, el: &NodeId) -> String {
        self.node(*el).tag.clone()
    }

    fn parent(&self, el: &NodeId) -> Option<NodeId> {
        self.node(*el).parent
    }

    fn append_child(&mut self, parent: &NodeId, child: &NodeId) {
        if let Some(old) = self.node(*child).parent {
            self.node_mut(old).children.retain(|c| c != child);
        }
        self.node_mut(*child).parent = Some(*parent);
        self.node_mut(*parent).children.push(*child);
    }

    fn remove_child(&mut self, parent: &NodeId, child: &NodeId) {
        if self.node(*child).parent != Some(*parent) {
            return;
        }
        self.node_mut(*parent).children.retain(|c| c != child);
        self.node_mut(*child).parent = None;
    }

    fn clone_node(&mut self, el: &NodeId) -> NodeId {
        let source = self.node(*el);
        let copy = Node {
            tag: source.tag.clone(),
            attributes: source.attributes.clone(),
            styles: source.styles.clone(),
            rect: source.rect,
            natural: source.natural,
            ..Node::default()
        };
        self.nodes.push(copy);
        NodeId(self.nodes.len() - 1)
    }

    fn attribute(&self, el: &NodeId, name: &str) -> Option<String> {
        self.node(*el).attributes.get(name).cloned()
    }

    fn set_attribute(&mut self, el: &NodeId, name: &str, value: &str) {
        self.node_mut(*el)
            .attributes
            .insert(name.to_string(), value.to_string());
    }

    fn remove_attribute(&mut self, el: &NodeId, name: &str) {
        self.node_mut(*el).attributes.remove(name);
    }

    fn style(&self, el: &NodeId, prop: StyleProp) -> String {
        self.node(*el).styles.get(&prop).cloned().unwrap_or_default()
    }

    fn set_style(&mut self, el: &NodeId, prop: StyleProp, value: &str) {
        let node = self.node_mut(*el);
        node.style_writes.push((prop, value.to_string()));
        if value.is_empty() {
            node.styles.remove(&prop);
        } else {
            node.styles.insert(prop, value.to_string());
        }
    }

    fn force_layout(&mut self, el: &NodeId) {
        self.node_mut(*el).layout_flushes += 1;
    }

    fn bounding_rect(&self, el: &NodeId) -> Rect {
        if self.is_connected(*el) {
            self.node(*el).rect
        } else {
            Rect::default()
        }
    }

    fn natural_size(&self, el: &NodeId) -> Size {
        self.node(*el).natural
    }

    fn viewport_size(&self) -> Size {
        self.viewport
    }

    fn scroll_position(&self) -> Vec2 {
        self.scroll
    }

    fn set_listener(&mut self, target: ListenTarget<NodeId>, kind: EventKind, active: bool) {
        let key = (ListenKey::from(&target), kind);
        if active {
            self.listeners.insert(key);
        } else {
            self.listeners.remove(&key);
        }
    }

    fn set_timeout(&mut self, id: TimerId, delay_ms: u32) {
        let due = self.now + u64::from(delay_ms);
        self.timers.insert(id, Timer { due, delay: delay_ms });
    }

    fn clear_timeout(&mut self, id: TimerId) {
        self.timers.remove(&id);
    }

    fn load_image(&mut self, src: &str, notify: Option<&NodeId>) {
        self.loaded_images.push((src.to_string(), notify.copied()));
    }

    fn open_in_new_context(&mut self, url: &str) {
        self.opened_urls.push(url.to_string());
    }
}

/// Test drivers that play the browser's part
impl Zooming<MemoryDom> {
    /// Advance the virtual clock by `ms`, delivering every timer that comes
    /// due in order. Timers scheduled by a handler fire in the same call if
    /// they fall within the window.
    pub fn run_timers(&mut self, ms: u64) {
        let until = self.host().now() + ms;
        while let Some(id) = self.host_mut().pop_due(until) {
            self.handle_event(ZoomEvent::TimerFired(id));
        }
        let remaining = until.saturating_sub(self.host().now());
        self.host_mut().advance(remaining);
    }

    /// Deliver `transitionend` on the zoomed image if a listener is attached
    pub fn finish_transition(&mut self) -> InputResult {
        let Some(target) = self.target_element().copied() else {
            return InputResult::Ignored;
        };
        if !self
            .host()
            .is_listening(&ListenTarget::Element(target), EventKind::TransitionEnd)
        {
            return InputResult::Ignored;
        }
        self.handle_event(ZoomEvent::TransitionEnd { target })
    }

    /// Deliver a click on `target`
    pub fn click(&mut self, target: NodeId) -> InputResult {
        self.handle_event(ZoomEvent::Click {
            target,
            modifiers: Default::default(),
        })
    }
}

#[cfg(test)]
#[path = "memory_tests.rs"]
mod memory_tests;
