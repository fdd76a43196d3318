pub mod app;

pub use app::{format_date, show_toast, start};
