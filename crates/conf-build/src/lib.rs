//! Build polling driven by resolved configuration
//!
//! A long-running image build periodically re-checks whether the project
//! that asked for it still exists and still wants the build, and aborts
//! early when it does not. The check interval is resolved through
//! [`conf_core::ConfigResolver`].

pub mod error;
pub mod pulse;
pub mod watch;

pub use error::{Error, Result};
pub use pulse::{
    CHECK_INTERVAL_KEY, DEFAULT_CHECK_INTERVAL, NotebookPulse, NotebookState, ProjectStore,
    PulseCheck, PulseDecision,
};
pub use watch::{BuildOutcome, watch_build};
