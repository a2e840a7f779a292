pub mod app;
pub mod quote_display;
pub mod add_quote_form;
pub mod transfer_controls;
pub mod sync_notification;
pub mod sync_indicator;

pub use app::render_app;
pub use quote_display::{render_quote_display, render_quote_controls};
pub use add_quote_form::render_add_quote_form;
pub use transfer_controls::render_transfer_controls;
pub use sync_notification::render_sync_notification;
pub use sync_indicator::render_sync_indicator;
