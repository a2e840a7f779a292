pub mod quote;
pub mod category;
pub mod sync;

pub use quote::{Quote, ImportedQuote, RemotePost};
pub use category::CategoryFilter;
pub use sync::{SyncState, MergeReport, SyncResult, Notification};
