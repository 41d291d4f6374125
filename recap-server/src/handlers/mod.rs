// System handlers (health, prompt presets) and shared state
pub mod main_handlers;
pub use main_handlers::AppState;

pub mod auth_handlers;

pub mod transcript_handlers;

// Summary handlers, including generation and email sharing
pub mod summary_handlers;

pub mod share_handlers;

pub mod dashboard_handlers;

// Static HTML shells
pub mod page_handlers;
