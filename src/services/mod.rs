pub mod api_client;
pub mod sync_service;
pub mod preferences_service;
pub mod transfer_service;

pub use api_client::ApiClient;
pub use sync_service::SyncService;
pub use preferences_service::PreferencesService;
pub use transfer_service::TransferService;
