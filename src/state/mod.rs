// ============================================================================
// STATE MODULE - State Management con Rc<RefCell> + notificaciones
// ============================================================================

pub mod sync_state;
pub mod app_state;

pub use sync_state::*;
pub use app_state::*;
