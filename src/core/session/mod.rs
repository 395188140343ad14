// Session module - Session lifecycle
pub mod session;
pub mod state;

pub use session::{Session, SessionConfig, SessionOutcome};
pub use state::{LifecycleEvent, SessionState, SessionStatistics, SessionStatus};
