// ============================================================================
// STORES - Datos persistidos del catálogo
// ============================================================================

pub mod quote_store;

pub use quote_store::QuoteStore;
