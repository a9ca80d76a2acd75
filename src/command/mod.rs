//! Command-recording abstraction
//!
//! The outline pipeline is pure command *recording*: every operation appends
//! work to a deferred recorder, and the host engine executes the recorded
//! commands later on its own timeline.

pub mod recorder;
pub mod types;

pub use recorder::*;
pub use types::*;
