pub mod quote_viewmodel;
pub mod sync_viewmodel;

pub use quote_viewmodel::{QuoteViewModel, PickMode};
pub use sync_viewmodel::{SyncViewModel, schedule_notification_dismiss};
