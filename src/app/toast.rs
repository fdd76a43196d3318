use std::rc::Rc;

use leptos_toast::{toast_body, toast_class, Severity, ToastWidget};

use crate::app::config::UiConfig;
use crate::app::dom::Page;
use crate::app::log;

const CONTAINER_CLASS: &str = "toast-container position-fixed top-0 end-0 p-3";

/// Returns the page's toast container, creating it under `<body>` on first use.
pub fn toast_container<P: Page>(page: &P, container_id: &str) -> Result<P::Node, String> {
    if let Some(existing) = page.element_by_id(container_id) {
        return Ok(existing);
    }
    let body = page.body().ok_or_else(|| "document has no body".to_string())?;
    let container = page.create_element("div")?;
    page.set_attribute(&container, "id", container_id)?;
    page.set_attribute(&container, "class", CONTAINER_CLASS)?;
    page.append_child(&body, &container)?;
    log::info(&format!("[Toast] created #{}", container_id));
    Ok(container)
}

/// Appends a toast to the container and shows it. The node removes itself once
/// the widget reports it hidden.
pub fn show_toast<P, W>(
    page: &Rc<P>,
    widget: &W,
    config: &UiConfig,
    message: &str,
    severity: Severity,
) -> Result<P::Node, String>
where
    P: Page + 'static,
    P::Node: 'static,
    W: ToastWidget<P::Node>,
{
    let container = toast_container(&**page, &config.toast_container_id)?;

    let toast = page.create_element("div")?;
    page.set_attribute(&toast, "class", &toast_class(severity))?;
    page.set_attribute(&toast, "role", "alert")?;
    page.set_attribute(&toast, "aria-live", "assertive")?;
    page.set_attribute(&toast, "aria-atomic", "true")?;
    page.set_inner_html(&toast, &toast_body(message));
    page.append_child(&container, &toast)?;

    if let Err(e) = widget.show(&toast, &config.toast_options()) {
        page.remove(&toast);
        return Err(e);
    }

    let owner = Rc::clone(page);
    let node = toast.clone();
    if let Err(e) = widget.on_hidden(&toast, Box::new(move || owner.remove(&node))) {
        page.remove(&toast);
        return Err(e);
    }
    Ok(toast)
}

/// Severity named from JS; unknown names fall back to info.
pub fn parse_severity(kind: Option<&str>) -> Severity {
    match kind {
        None => Severity::Info,
        Some(raw) => raw.parse::<Severity>().unwrap_or_else(|e: String| {
            log::warn(&format!("[Toast] {}, using info", e));
            Severity::Info
        }),
    }
}
