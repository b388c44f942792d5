//! Terminal front end

pub mod console;
pub mod session;

pub use console::Console;
pub use session::{drive, run_session, Input, SessionEnd, EXIT_WORDS};
