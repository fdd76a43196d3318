use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use std::str::FromStr;
use std::time::Duration;

use leptos::prelude::set_timeout;
use serde::Serialize;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

/// Event Bootstrap dispatches on the toast element once its hide transition ends.
pub const HIDDEN_EVENT: &str = "hidden.bs.toast";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Severity {
    #[default]
    Info,
    Success,
    Warning,
    Danger,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Success => "success",
            Severity::Warning => "warning",
            Severity::Danger => "danger",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "info" => Ok(Severity::Info),
            "success" => Ok(Severity::Success),
            "warning" => Ok(Severity::Warning),
            "danger" => Ok(Severity::Danger),
            other => Err(format!("unknown toast type \"{}\"", other)),
        }
    }
}

/// Options object handed to `new bootstrap.Toast(el, options)`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ToastOptions {
    pub autohide: bool,
    pub delay: u32,
}

impl Default for ToastOptions {
    fn default() -> Self {
        Self { autohide: true, delay: 5000 }
    }
}

pub fn toast_class(severity: Severity) -> String {
    format!("toast align-items-center text-bg-{} border-0", severity)
}

/// Inner markup of a toast. `message` is inserted as-is, so callers escape untrusted text.
pub fn toast_body(message: &str) -> String {
    format!(
        concat!(
            r#"<div class="d-flex">"#,
            r#"<div class="toast-body">{}</div>"#,
            r#"<button type="button" class="btn-close btn-close-white me-2 m-auto" data-bs-dismiss="toast" aria-label="Close"></button>"#,
            r#"</div>"#
        ),
        message
    )
}

/// Something that can animate a toast element in and report when it is gone again.
pub trait ToastWidget<N> {
    fn show(&self, toast: &N, options: &ToastOptions) -> Result<(), String>;

    /// `done` runs once, after the toast finished hiding (timeout or manual close).
    fn on_hidden(&self, toast: &N, done: Box<dyn FnOnce()>) -> Result<(), String>;
}

#[wasm_bindgen(js_namespace = bootstrap)]
extern "C" {
    #[wasm_bindgen(js_name = Toast)]
    type BsToast;

    #[wasm_bindgen(constructor, js_class = "Toast", catch)]
    fn new(element: &web_sys::Element, options: &JsValue) -> Result<BsToast, JsValue>;

    #[wasm_bindgen(method, js_class = "Toast")]
    fn show(this: &BsToast);
}

pub fn bootstrap_available() -> bool {
    web_sys::window()
        .and_then(|win| js_sys::Reflect::get(&win, &JsValue::from_str("bootstrap")).ok())
        .map(|v| !v.is_undefined() && !v.is_null())
        .unwrap_or(false)
}

/// Bootstrap 5 toast plugin. Requires `bootstrap.bundle.js` on the page.
pub struct BootstrapToast;

impl ToastWidget<web_sys::Element> for BootstrapToast {
    fn show(&self, toast: &web_sys::Element, options: &ToastOptions) -> Result<(), String> {
        let options = serde_wasm_bindgen::to_value(options).map_err(|e| e.to_string())?;
        let widget = BsToast::new(toast, &options).map_err(|e| format!("bootstrap.Toast failed: {:?}", e))?;
        widget.show();
        Ok(())
    }

    fn on_hidden(&self, toast: &web_sys::Element, done: Box<dyn FnOnce()>) -> Result<(), String> {
        listen_once(toast, HIDDEN_EVENT, done)
    }
}

/// Stand-in used when Bootstrap is not loaded: adds the `show` class and
/// reports the toast hidden after `delay` or on a click of its close button.
pub struct TimedToast {
    options: ToastOptions,
}

impl TimedToast {
    pub fn new(options: ToastOptions) -> Self {
        Self { options }
    }
}

impl ToastWidget<web_sys::Element> for TimedToast {
    fn show(&self, toast: &web_sys::Element, _options: &ToastOptions) -> Result<(), String> {
        toast.class_list().add_1("show").map_err(|e| format!("{:?}", e))
    }

    fn on_hidden(&self, toast: &web_sys::Element, done: Box<dyn FnOnce()>) -> Result<(), String> {
        let slot: Rc<RefCell<Option<Box<dyn FnOnce()>>>> = Rc::new(RefCell::new(Some(done)));
        let fire = move |slot: &Rc<RefCell<Option<Box<dyn FnOnce()>>>>| {
            let pending = slot.borrow_mut().take();
            if let Some(done) = pending {
                done();
            }
        };

        if let Ok(Some(close)) = toast.query_selector(".btn-close") {
            let on_click = Rc::clone(&slot);
            listen_once(&close, "click", Box::new(move || fire(&on_click)))?;
        }
        if self.options.autohide {
            let on_timer = Rc::clone(&slot);
            set_timeout(move || fire(&on_timer), Duration::from_millis(u64::from(self.options.delay)));
        }
        Ok(())
    }
}

fn listen_once(target: &web_sys::Element, event: &str, done: Box<dyn FnOnce()>) -> Result<(), String> {
    let opts = web_sys::AddEventListenerOptions::new();
    opts.set_once(true);
    let cb = Closure::once_into_js(move |_ev: web_sys::Event| done());
    target
        .add_event_listener_with_callback_and_add_event_listener_options(event, cb.unchecked_ref(), &opts)
        .map_err(|e| format!("{:?}", e))
}
