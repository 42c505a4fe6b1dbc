//! Driving a build stream with pulse checks

use crate::pulse::PulseCheck;

/// How a watched build ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildOutcome {
    /// The stream was consumed to the end
    Completed { events: u64 },
    /// A pulse check asked to stop after `events` events
    Aborted { events: u64 },
}

impl BuildOutcome {
    pub fn is_aborted(&self) -> bool {
        matches!(self, Self::Aborted { .. })
    }

    pub fn events(&self) -> u64 {
        match self {
            Self::Completed { events } | Self::Aborted { events } => *events,
        }
    }
}

/// Consume `events`, running a pulse check after each one.
///
/// `on_event` sees every event before it is counted. The stream is dropped
/// as soon as a check asks to stop.
pub fn watch_build<I, P, F>(events: I, pulse: &P, mut on_event: F) -> BuildOutcome
where
    I: IntoIterator,
    P: PulseCheck + ?Sized,
    F: FnMut(&I::Item),
{
    let mut counter = 0;
    let mut seen = 0;

    for event in events {
        on_event(&event);
        seen += 1;
        counter += 1;

        let decision = pulse.check(counter);
        if decision.stop {
            tracing::debug!(events = seen, "Build aborted by pulse check");
            return BuildOutcome::Aborted { events: seen };
        }
        counter = decision.counter;
    }

    BuildOutcome::Completed { events: seen }
}
