#[cfg(test)]
pub mod memory;
mod web;

pub use web::WebPage;

/// The slice of the DOM the page helpers touch. `WebPage` backs it with
/// `web-sys`; tests use an in-memory tree.
pub trait Page {
    type Node: Clone;

    fn body(&self) -> Option<Self::Node>;
    fn element_by_id(&self, id: &str) -> Option<Self::Node>;
    /// Matches in document order.
    fn query_all(&self, selector: &str) -> Vec<Self::Node>;
    fn create_element(&self, tag: &str) -> Result<Self::Node, String>;
    fn set_attribute(&self, node: &Self::Node, name: &str, value: &str) -> Result<(), String>;
    fn attribute(&self, node: &Self::Node, name: &str) -> Option<String>;
    fn text(&self, node: &Self::Node) -> String;
    fn set_text(&self, node: &Self::Node, text: &str);
    fn set_inner_html(&self, node: &Self::Node, html: &str);
    fn append_child(&self, parent: &Self::Node, child: &Self::Node) -> Result<(), String>;
    fn remove(&self, node: &Self::Node);

    /// Size in bytes of the first file picked in a file input, if any.
    fn selected_file_size(&self, input: &Self::Node) -> Option<u64>;
    fn clear_input(&self, input: &Self::Node);
    fn alert(&self, message: &str);
    fn on_change(&self, node: &Self::Node, handler: Box<dyn Fn()>) -> Result<(), String>;
}

/// Reads `data-{key}`; empty values count as missing.
pub fn data_attribute<P: Page>(page: &P, node: &P::Node, key: &str) -> Option<String> {
    page.attribute(node, &format!("data-{}", key)).filter(|v| !v.is_empty())
}
