//! In-memory page used by the unit tests.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use leptos_toast::{ToastOptions, ToastWidget};

use super::Page;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

#[derive(Default)]
struct Element {
    tag: String,
    attributes: BTreeMap<String, String>,
    text: String,
    inner_html: String,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    file_size: Option<u64>,
    value: String,
    change_handlers: Vec<Rc<dyn Fn()>>,
}

impl Element {
    fn matches(&self, selector: &str) -> bool {
        if let Some(class) = selector.strip_prefix('.') {
            self.attributes
                .get("class")
                .is_some_and(|c| c.split_whitespace().any(|c| c == class))
        } else if let Some(id) = selector.strip_prefix('#') {
            self.attributes.get("id").is_some_and(|v| v == id)
        } else if let Some(attr) = selector.strip_prefix('[').and_then(|s| s.strip_suffix(']')) {
            self.attributes.contains_key(attr)
        } else {
            self.tag.eq_ignore_ascii_case(selector)
        }
    }
}

pub struct MemoryPage {
    nodes: RefCell<Vec<Element>>,
    body: Option<NodeId>,
    alerts: RefCell<Vec<String>>,
}

impl MemoryPage {
    pub fn new() -> Self {
        let body = Element { tag: "body".to_string(), ..Default::default() };
        Self {
            nodes: RefCell::new(vec![body]),
            body: Some(NodeId(0)),
            alerts: RefCell::new(Vec::new()),
        }
    }

    /// A document whose `<body>` has not been parsed yet.
    pub fn without_body() -> Self {
        Self { nodes: RefCell::new(Vec::new()), body: None, alerts: RefCell::new(Vec::new()) }
    }

    pub fn root(&self) -> NodeId {
        self.body.expect("page has no body")
    }

    /// Appends a new `tag` element with `attributes` under `parent`.
    pub fn add(&self, parent: NodeId, tag: &str, attributes: &[(&str, &str)]) -> NodeId {
        let node = self.create_element(tag).unwrap();
        for (name, value) in attributes {
            self.set_attribute(&node, name, value).unwrap();
        }
        self.append_child(&parent, &node).unwrap();
        node
    }

    pub fn add_text(&self, parent: NodeId, tag: &str, attributes: &[(&str, &str)], text: &str) -> NodeId {
        let node = self.add(parent, tag, attributes);
        self.set_text(&node, text);
        node
    }

    /// Simulates the user picking a file (or cancelling with `None`) and fires `change`.
    pub fn pick_file(&self, input: NodeId, size: Option<u64>) {
        let handlers = {
            let mut nodes = self.nodes.borrow_mut();
            let el = &mut nodes[input.0];
            el.file_size = size;
            el.value = if size.is_some() { "C:\\fakepath\\recording.webm".to_string() } else { String::new() };
            el.change_handlers.clone()
        };
        for handler in handlers {
            handler();
        }
    }

    pub fn value(&self, input: NodeId) -> String {
        self.nodes.borrow()[input.0].value.clone()
    }

    pub fn inner_html(&self, node: NodeId) -> String {
        self.nodes.borrow()[node.0].inner_html.clone()
    }

    pub fn children(&self, node: NodeId) -> Vec<NodeId> {
        self.nodes.borrow()[node.0].children.clone()
    }

    pub fn is_attached(&self, node: NodeId) -> bool {
        let nodes = self.nodes.borrow();
        let mut current = Some(node);
        while let Some(id) = current {
            if Some(id) == self.body {
                return true;
            }
            current = nodes[id.0].parent;
        }
        false
    }

    pub fn alerts(&self) -> Vec<String> {
        self.alerts.borrow().clone()
    }

    fn attached_in_order(&self) -> Vec<NodeId> {
        let Some(body) = self.body else {
            return Vec::new();
        };
        let nodes = self.nodes.borrow();
        let mut out = Vec::new();
        let mut stack = vec![body];
        while let Some(id) = stack.pop() {
            out.push(id);
            stack.extend(nodes[id.0].children.iter().rev().copied());
        }
        out
    }

    fn detach(&self, node: NodeId) {
        let mut nodes = self.nodes.borrow_mut();
        if let Some(parent) = nodes[node.0].parent.take() {
            nodes[parent.0].children.retain(|c| *c != node);
        }
    }
}

impl Page for MemoryPage {
    type Node = NodeId;

    fn body(&self) -> Option<NodeId> {
        self.body
    }

    fn element_by_id(&self, id: &str) -> Option<NodeId> {
        let ordered = self.attached_in_order();
        let nodes = self.nodes.borrow();
        ordered
            .into_iter()
            .find(|n| nodes[n.0].attributes.get("id").is_some_and(|v| v == id))
    }

    fn query_all(&self, selector: &str) -> Vec<NodeId> {
        let ordered = self.attached_in_order();
        let nodes = self.nodes.borrow();
        ordered
            .into_iter()
            .filter(|n| Some(*n) != self.body && nodes[n.0].matches(selector))
            .collect()
    }

    fn create_element(&self, tag: &str) -> Result<NodeId, String> {
        let mut nodes = self.nodes.borrow_mut();
        nodes.push(Element { tag: tag.to_string(), ..Default::default() });
        Ok(NodeId(nodes.len() - 1))
    }

    fn set_attribute(&self, node: &NodeId, name: &str, value: &str) -> Result<(), String> {
        self.nodes.borrow_mut()[node.0]
            .attributes
            .insert(name.to_string(), value.to_string());
        Ok(())
    }

    fn attribute(&self, node: &NodeId, name: &str) -> Option<String> {
        self.nodes.borrow()[node.0].attributes.get(name).cloned()
    }

    fn text(&self, node: &NodeId) -> String {
        self.nodes.borrow()[node.0].text.clone()
    }

    fn set_text(&self, node: &NodeId, text: &str) {
        self.nodes.borrow_mut()[node.0].text = text.to_string();
    }

    fn set_inner_html(&self, node: &NodeId, html: &str) {
        self.nodes.borrow_mut()[node.0].inner_html = html.to_string();
    }

    fn append_child(&self, parent: &NodeId, child: &NodeId) -> Result<(), String> {
        if parent == child {
            return Err("cannot append a node to itself".to_string());
        }
        self.detach(*child);
        let mut nodes = self.nodes.borrow_mut();
        nodes[child.0].parent = Some(*parent);
        nodes[parent.0].children.push(*child);
        Ok(())
    }

    fn remove(&self, node: &NodeId) {
        self.detach(*node);
    }

    fn selected_file_size(&self, input: &NodeId) -> Option<u64> {
        self.nodes.borrow()[input.0].file_size
    }

    fn clear_input(&self, input: &NodeId) {
        let mut nodes = self.nodes.borrow_mut();
        nodes[input.0].value.clear();
        nodes[input.0].file_size = None;
    }

    fn alert(&self, message: &str) {
        self.alerts.borrow_mut().push(message.to_string());
    }

    fn on_change(&self, node: &NodeId, handler: Box<dyn Fn()>) -> Result<(), String> {
        self.nodes.borrow_mut()[node.0].change_handlers.push(Rc::from(handler));
        Ok(())
    }
}

/// Records `show` calls and holds hidden callbacks until the test fires them.
#[derive(Default)]
pub struct MemoryToastWidget {
    pub shown: RefCell<Vec<(NodeId, ToastOptions)>>,
    pending: RefCell<Vec<(NodeId, Box<dyn FnOnce()>)>>,
    pub fail_show: bool,
    pub fail_hidden: bool,
}

impl MemoryToastWidget {
    pub fn failing() -> Self {
        Self { fail_show: true, ..Default::default() }
    }

    pub fn failing_hidden() -> Self {
        Self { fail_hidden: true, ..Default::default() }
    }

    /// Fires the hidden callback registered for `toast`. Returns false if none was pending.
    pub fn hide(&self, toast: NodeId) -> bool {
        let done = {
            let mut pending = self.pending.borrow_mut();
            let Some(pos) = pending.iter().position(|(n, _)| *n == toast) else {
                return false;
            };
            pending.remove(pos).1
        };
        done();
        true
    }
}

impl ToastWidget<NodeId> for MemoryToastWidget {
    fn show(&self, toast: &NodeId, options: &ToastOptions) -> Result<(), String> {
        if self.fail_show {
            return Err("toast widget unavailable".to_string());
        }
        self.shown.borrow_mut().push((*toast, *options));
        Ok(())
    }

    fn on_hidden(&self, toast: &NodeId, done: Box<dyn FnOnce()>) -> Result<(), String> {
        if self.fail_hidden {
            return Err("could not listen for hidden event".to_string());
        }
        self.pending.borrow_mut().push((*toast, done));
        Ok(())
    }
}
