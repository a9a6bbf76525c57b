//! REST API for the carbon prediction daemon

pub mod extract;
pub mod handlers;
pub mod router;
pub mod state;

pub use router::create_router;
pub use state::AppState;
