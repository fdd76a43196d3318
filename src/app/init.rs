use std::fmt::Display;
use std::rc::Rc;

use chrono::{Local, TimeZone};

use crate::app::config::UiConfig;
use crate::app::dates::format_date_in;
use crate::app::dom::{data_attribute, Page, WebPage};
use crate::app::log;
use crate::app::upload::attach_upload_guard;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PageSetup {
    pub upload_guard: bool,
    pub dates_formatted: usize,
}

/// Replaces the text of every date element with its formatted `data-date` value.
pub fn apply_date_formatting<P, Tz>(page: &P, config: &UiConfig, tz: &Tz) -> usize
where
    P: Page,
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let mut updated = 0;
    for node in page.query_all(&config.date_selector) {
        let Some(raw) = data_attribute(page, &node, &config.date_attribute) else {
            continue;
        };
        page.set_text(&node, &format_date_in(&raw, tz));
        updated += 1;
    }
    updated
}

pub fn init_page<P>(page: &Rc<P>, config: &UiConfig) -> PageSetup
where
    P: Page + 'static,
    P::Node: 'static,
{
    let upload_guard = attach_upload_guard(page, config).unwrap_or_else(|e| {
        log::error(&format!("[Upload] could not attach guard: {}", e));
        false
    });
    let dates_formatted = apply_date_formatting(&**page, config, &Local);
    PageSetup { upload_guard, dates_formatted }
}

/// Wasm entry point: runs `init_page` once the DOM is parsed.
pub fn start() {
    let Some(page) = WebPage::current() else {
        log::error("[Page] no window or document");
        return;
    };
    if page.is_loading() {
        let ready = page.clone();
        if let Err(e) = page.on_ready(move || run(ready)) {
            log::error(&format!("[Page] could not wait for DOMContentLoaded: {}", e));
        }
    } else {
        run(page);
    }
}

fn run(page: WebPage) {
    let config = UiConfig::load_cached(&page);
    let setup = init_page(&Rc::new(page), &config);
    log::info(&format!(
        "[Page] ready: upload guard {}, {} dates formatted",
        if setup.upload_guard { "on" } else { "off" },
        setup.dates_formatted
    ));
}
