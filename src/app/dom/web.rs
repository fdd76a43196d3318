use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlInputElement, Window};

use super::Page;

fn js_err(e: JsValue) -> String {
    format!("{:?}", e)
}

#[derive(Clone)]
pub struct WebPage {
    window: Window,
    document: Document,
}

impl WebPage {
    pub fn current() -> Option<Self> {
        let window = web_sys::window()?;
        let document = window.document()?;
        Some(Self { window, document })
    }

    pub fn is_loading(&self) -> bool {
        self.document.ready_state() == "loading"
    }

    /// Runs `handler` once on `DOMContentLoaded`.
    pub fn on_ready(&self, handler: impl FnOnce() + 'static) -> Result<(), String> {
        let opts = web_sys::AddEventListenerOptions::new();
        opts.set_once(true);
        let cb = Closure::once_into_js(move |_ev: web_sys::Event| handler());
        self.document
            .add_event_listener_with_callback_and_add_event_listener_options("DOMContentLoaded", cb.unchecked_ref(), &opts)
            .map_err(js_err)
    }
}

impl Page for WebPage {
    type Node = Element;

    fn body(&self) -> Option<Element> {
        self.document.body().map(Element::from)
    }

    fn element_by_id(&self, id: &str) -> Option<Element> {
        self.document.get_element_by_id(id)
    }

    fn query_all(&self, selector: &str) -> Vec<Element> {
        let Ok(list) = self.document.query_selector_all(selector) else {
            return Vec::new();
        };
        (0..list.length())
            .filter_map(|i| list.get(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect()
    }

    fn create_element(&self, tag: &str) -> Result<Element, String> {
        self.document.create_element(tag).map_err(js_err)
    }

    fn set_attribute(&self, node: &Element, name: &str, value: &str) -> Result<(), String> {
        node.set_attribute(name, value).map_err(js_err)
    }

    fn attribute(&self, node: &Element, name: &str) -> Option<String> {
        node.get_attribute(name)
    }

    fn text(&self, node: &Element) -> String {
        node.text_content().unwrap_or_default()
    }

    fn set_text(&self, node: &Element, text: &str) {
        node.set_text_content(Some(text));
    }

    fn set_inner_html(&self, node: &Element, html: &str) {
        node.set_inner_html(html);
    }

    fn append_child(&self, parent: &Element, child: &Element) -> Result<(), String> {
        parent.append_child(child).map(|_| ()).map_err(js_err)
    }

    fn remove(&self, node: &Element) {
        node.remove();
    }

    fn selected_file_size(&self, input: &Element) -> Option<u64> {
        let input = input.dyn_ref::<HtmlInputElement>()?;
        let file = input.files()?.get(0)?;
        Some(file.size() as u64)
    }

    fn clear_input(&self, input: &Element) {
        if let Some(input) = input.dyn_ref::<HtmlInputElement>() {
            input.set_value("");
        }
    }

    fn alert(&self, message: &str) {
        let _ = self.window.alert_with_message(message);
    }

    fn on_change(&self, node: &Element, handler: Box<dyn Fn()>) -> Result<(), String> {
        let cb = Closure::<dyn FnMut(_)>::new(move |_ev: web_sys::Event| handler());
        node.add_event_listener_with_callback("change", cb.as_ref().unchecked_ref())
            .map_err(js_err)?;
        cb.forget();
        Ok(())
    }
}
