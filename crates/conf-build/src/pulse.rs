//! Pulse checks for long-running image builds
//!
//! While a build streams its output, a counter is bumped for every event.
//! Once the counter exceeds the check interval the owning project is looked
//! up again, and the build is aborted if the project is gone or no longer
//! wants what is being built.

use conf_core::{ConfigResolver, Lookup};

use crate::{Error, Result};

/// Key holding the number of build events between two pulse checks
pub const CHECK_INTERVAL_KEY: &str = "POLYAXON_BUILD_CHECK_INTERVAL";

/// Check interval used when none is configured
pub const DEFAULT_CHECK_INTERVAL: u64 = 10;

/// Outcome of a single pulse check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PulseDecision {
    /// Counter to carry into the next check
    pub counter: u64,
    /// Whether the build should be aborted
    pub stop: bool,
}

impl PulseDecision {
    fn carry_on(counter: u64) -> Self {
        Self { counter, stop: false }
    }

    fn stop(counter: u64) -> Self {
        Self { counter, stop: true }
    }
}

/// Decides, every so often, whether a running build is still wanted
pub trait PulseCheck {
    fn check(&self, counter: u64) -> PulseDecision;
}

/// Notebook settings of a project, as currently stored
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotebookState {
    /// Whether the project still asks for a notebook
    pub has_notebook: bool,
    /// Name of the notebook job attached to the project, if any
    pub notebook: Option<String>,
}

impl NotebookState {
    fn wants_notebook(&self) -> bool {
        self.has_notebook && self.notebook.is_some()
    }
}

/// Looks up the current state of projects
pub trait ProjectStore {
    /// `None` when the project no longer exists
    fn notebook_state(&self, project_id: u64) -> Option<NotebookState>;
}

impl<S: ProjectStore + ?Sized> ProjectStore for &S {
    fn notebook_state(&self, project_id: u64) -> Option<NotebookState> {
        (**self).notebook_state(project_id)
    }
}

/// Pulse check for notebook image builds.
///
/// Stops the build when the project was deleted or dropped its notebook.
#[derive(Debug, Clone)]
pub struct NotebookPulse<S> {
    store: S,
    project_id: u64,
    project_name: String,
    check_interval: u64,
}

impl<S: ProjectStore> NotebookPulse<S> {
    pub fn new(store: S, project_id: u64, project_name: impl Into<String>) -> Self {
        Self {
            store,
            project_id,
            project_name: project_name.into(),
            check_interval: DEFAULT_CHECK_INTERVAL,
        }
    }

    /// Create a pulse whose check interval comes from [`CHECK_INTERVAL_KEY`].
    ///
    /// The key is optional and local to the builder.
    pub fn from_config(
        config: &mut ConfigResolver,
        store: S,
        project_id: u64,
        project_name: impl Into<String>,
    ) -> Result<Self> {
        let default = DEFAULT_CHECK_INTERVAL as i64;
        let lookup = Lookup::new().optional().local().with_default(default);
        let value = config.get_int(CHECK_INTERVAL_KEY, lookup)?.unwrap_or(default);
        let check_interval = u64::try_from(value)
            .ok()
            .filter(|interval| *interval > 0)
            .ok_or(Error::InvalidCheckInterval { value })?;

        Ok(Self::new(store, project_id, project_name).with_check_interval(check_interval))
    }

    pub fn with_check_interval(mut self, check_interval: u64) -> Self {
        self.check_interval = check_interval;
        self
    }

    pub fn check_interval(&self) -> u64 {
        self.check_interval
    }
}

impl<S: ProjectStore> PulseCheck for NotebookPulse<S> {
    fn check(&self, counter: u64) -> PulseDecision {
        if counter <= self.check_interval {
            return PulseDecision::carry_on(counter);
        }

        let Some(state) = self.store.notebook_state(self.project_id) else {
            tracing::info!(
                project = %self.project_name,
                "Project `{}` does not exist anymore, stopping build",
                self.project_name
            );
            return PulseDecision::stop(counter);
        };

        if !state.wants_notebook() {
            tracing::info!(
                project = %self.project_name,
                "Project `{}` does not have a notebook anymore, stopping build",
                self.project_name
            );
            return PulseDecision::stop(counter);
        }

        PulseDecision::carry_on(0)
    }
}
