use std::rc::Rc;

use crate::app::config::UiConfig;
use crate::app::dom::Page;
use crate::app::log;
use crate::app::utils::{bytes_to_mb, format_file_size};

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum UploadVerdict {
    NoFile,
    Accepted { size_mb: f64 },
    Rejected { size_mb: f64 },
}

/// Files strictly larger than `limit_mb` MiB are rejected.
pub fn check_upload(size_bytes: Option<u64>, limit_mb: f64) -> UploadVerdict {
    let Some(bytes) = size_bytes else {
        return UploadVerdict::NoFile;
    };
    let size_mb = bytes_to_mb(bytes);
    if size_mb > limit_mb {
        UploadVerdict::Rejected { size_mb }
    } else {
        UploadVerdict::Accepted { size_mb }
    }
}

pub fn rejection_message(size_bytes: u64, limit_mb: f64) -> String {
    format!(
        "File size must be less than {}MB (selected file is {})",
        limit_mb,
        format_file_size(size_bytes)
    )
}

/// Checks the current selection of `input`; an oversized file triggers an alert and is cleared.
pub fn guard_selection<P: Page>(page: &P, input: &P::Node, limit_mb: f64) -> UploadVerdict {
    let size = page.selected_file_size(input);
    let verdict = check_upload(size, limit_mb);
    if let (UploadVerdict::Rejected { size_mb }, Some(bytes)) = (verdict, size) {
        log::warn(&format!("[Upload] rejected {:.2} MB file (limit {} MB)", size_mb, limit_mb));
        page.alert(&rejection_message(bytes, limit_mb));
        page.clear_input(input);
    }
    verdict
}

/// Hooks the guard to the configured file input. `Ok(false)` when the page has no such input.
pub fn attach_upload_guard<P>(page: &Rc<P>, config: &UiConfig) -> Result<bool, String>
where
    P: Page + 'static,
    P::Node: 'static,
{
    let Some(input) = page.element_by_id(&config.file_input_id) else {
        return Ok(false);
    };
    let limit_mb = config.upload_limit_mb;
    let owner = Rc::clone(page);
    let target = input.clone();
    page.on_change(
        &input,
        Box::new(move || {
            guard_selection(&*owner, &target, limit_mb);
        }),
    )?;
    Ok(true)
}
