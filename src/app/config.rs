use std::cell::OnceCell;

use leptos_toast::ToastOptions;
use serde::Deserialize;

use crate::app::dom::Page;
use crate::app::log;

pub const DEFAULT_UPLOAD_LIMIT_MB: f64 = 100.0;

/// `<script type="application/json" id="ui-config">` holding overrides.
pub const CONFIG_ELEMENT_ID: &str = "ui-config";

thread_local! {
    static PAGE_CONFIG: OnceCell<UiConfig> = const { OnceCell::new() };
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UiConfig {
    pub file_input_id: String,
    pub upload_limit_mb: f64,
    pub date_selector: String,
    pub date_attribute: String,
    pub toast_container_id: String,
    pub toast_delay_ms: u32,
    pub toast_autohide: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            file_input_id: "fileInput".to_string(),
            upload_limit_mb: DEFAULT_UPLOAD_LIMIT_MB,
            date_selector: ".date-format".to_string(),
            date_attribute: "date".to_string(),
            toast_container_id: "toastContainer".to_string(),
            toast_delay_ms: 5000,
            toast_autohide: true,
        }
    }
}

impl UiConfig {
    pub fn from_json(raw: &str) -> Result<Self, String> {
        let config: UiConfig = serde_json::from_str(raw).map_err(|e| e.to_string())?;
        if !config.upload_limit_mb.is_finite() || config.upload_limit_mb <= 0.0 {
            return Err(format!("uploadLimitMb must be a positive number, got {}", config.upload_limit_mb));
        }
        Ok(config)
    }

    /// Reads the page's config block; falls back to defaults when it is absent or broken.
    pub fn load<P: Page>(page: &P) -> Self {
        let Some(node) = page.element_by_id(CONFIG_ELEMENT_ID) else {
            return Self::default();
        };
        let raw = page.text(&node);
        if raw.trim().is_empty() {
            return Self::default();
        }
        match Self::from_json(&raw) {
            Ok(config) => config,
            Err(e) => {
                log::warn(&format!("[Config] ignoring #{}: {}", CONFIG_ELEMENT_ID, e));
                Self::default()
            }
        }
    }

    /// `load` for the lifetime of the page: the config block is read once and reused.
    pub fn load_cached<P: Page>(page: &P) -> Self {
        PAGE_CONFIG.with(|cell| cell.get_or_init(|| Self::load(page)).clone())
    }

    pub fn toast_options(&self) -> ToastOptions {
        ToastOptions { autohide: self.toast_autohide, delay: self.toast_delay_ms }
    }
}
