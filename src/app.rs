use std::rc::Rc;

use leptos_toast::{bootstrap_available, BootstrapToast, TimedToast};
use wasm_bindgen::prelude::*;

pub mod config;
pub mod dates;
pub mod dom;
pub mod init;
pub mod log;
pub mod toast;
pub mod upload;
pub mod utils;

use crate::app::config::UiConfig;
use crate::app::dom::WebPage;

pub use init::start;

#[wasm_bindgen(js_name = formatDate)]
pub fn format_date(date_string: &str) -> String {
    dates::format_date(date_string)
}

/// `showToast(message, type?)` for inline page scripts. Never throws.
#[wasm_bindgen(js_name = showToast)]
pub fn show_toast(message: &str, kind: Option<String>) {
    let Some(page) = WebPage::current() else {
        return;
    };
    let severity = toast::parse_severity(kind.as_deref());
    let config = UiConfig::load_cached(&page);
    let page = Rc::new(page);
    let result = if bootstrap_available() {
        toast::show_toast(&page, &BootstrapToast, &config, message, severity)
    } else {
        log::warn("[Toast] bootstrap not loaded, using timed fallback");
        toast::show_toast(&page, &TimedToast::new(config.toast_options()), &config, message, severity)
    };
    if let Err(e) = result {
        log::error(&format!("[Toast] {}", e));
    }
}
