pub mod state;

pub use state::{SessionState, SessionStore};
