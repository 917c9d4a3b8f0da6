//! Interactive save/cancel preview
//!
//! The decision logic is a plain state machine with no windowing code in it;
//! the `preview` cargo feature adds the window runner that drives it. Builds
//! without the feature still generate and save images, they just cannot show
//! the confirmation window.

#[cfg(feature = "preview")]
mod window;

#[cfg(feature = "preview")]
pub use window::run_preview;

/// Terminal verdict of a preview session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Persist the image
    Save,
    /// Discard the image
    Cancel,
}

/// Decision as seen by the orchestrator at any point in time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreviewDecision {
    /// No terminal state reached yet
    Pending,
    /// The user confirmed the save
    Save,
    /// The user cancelled the save
    Cancel,
}

/// Closed set of inputs the preview loop reacts to.
///
/// Everything the backend reports is folded into one of these variants and
/// consumed by exhaustive matching; there are no open-ended event codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreviewEvent {
    /// Explicit confirmation (`y`)
    Confirm,
    /// Explicit cancellation (`n`)
    Cancel,
    /// Explicit quit (Escape)
    Quit,
    /// The window manager asked to close the window
    CloseRequested,
    /// Any other input, ignored
    Other,
}

/// Preview state machine.
///
/// `Idle` is the initial state; both `Decided` variants are terminal and
/// absorb all further events.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PreviewState {
    /// Nothing shown yet
    #[default]
    Idle,
    /// The window is up and a frame is rendered each iteration
    Displaying,
    /// A terminal decision has been reached
    Decided(Verdict),
}

impl PreviewState {
    /// Interactive entry: start displaying frames
    pub fn display(self) -> Self {
        match self {
            Self::Idle => Self::Displaying,
            other => other,
        }
    }

    /// Non-interactive entry: jump straight to the save decision without
    /// rendering anything
    pub fn finish_without_display(self) -> Self {
        match self {
            Self::Idle => Self::Decided(Verdict::Save),
            other => other,
        }
    }

    /// Advance the machine by one input event
    pub fn apply(self, event: PreviewEvent) -> Self {
        match (self, event) {
            (Self::Displaying, PreviewEvent::Confirm) => Self::Decided(Verdict::Save),
            // A close that is not an explicit cancel counts as confirmation
            (Self::Displaying, PreviewEvent::CloseRequested) => Self::Decided(Verdict::Save),
            (Self::Displaying, PreviewEvent::Cancel) => Self::Decided(Verdict::Cancel),
            (Self::Displaying, PreviewEvent::Quit) => Self::Decided(Verdict::Cancel),
            (Self::Displaying, PreviewEvent::Other) => Self::Displaying,
            (state, _) => state,
        }
    }

    /// The decision reached so far
    pub fn decision(&self) -> PreviewDecision {
        match self {
            Self::Idle | Self::Displaying => PreviewDecision::Pending,
            Self::Decided(Verdict::Save) => PreviewDecision::Save,
            Self::Decided(Verdict::Cancel) => PreviewDecision::Cancel,
        }
    }

    /// The terminal verdict, once one exists
    pub fn verdict(&self) -> Option<Verdict> {
        match self {
            Self::Decided(verdict) => Some(*verdict),
            Self::Idle | Self::Displaying => None,
        }
    }
}

/// Decision for non-interactive runs.
///
/// The machine goes straight from idle to a save verdict; no window, no
/// frames, no other side effects.
pub fn headless_decision() -> Verdict {
    match PreviewState::Idle.finish_without_display() {
        PreviewState::Decided(verdict) => verdict,
        PreviewState::Idle | PreviewState::Displaying => Verdict::Save,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headless_entry_saves_immediately() {
        let state = PreviewState::Idle.finish_without_display();
        assert_eq!(state.decision(), PreviewDecision::Save);
        assert_eq!(headless_decision(), Verdict::Save);
    }

    #[test]
    fn test_confirm_saves() {
        let state = PreviewState::Idle.display().apply(PreviewEvent::Confirm);
        assert_eq!(state.decision(), PreviewDecision::Save);
    }

    #[test]
    fn test_window_close_saves() {
        let state = PreviewState::Idle.display().apply(PreviewEvent::CloseRequested);
        assert_eq!(state.decision(), PreviewDecision::Save);
    }

    #[test]
    fn test_cancel_and_quit_cancel() {
        let cancel = PreviewState::Idle.display().apply(PreviewEvent::Cancel);
        assert_eq!(cancel.decision(), PreviewDecision::Cancel);

        let quit = PreviewState::Idle.display().apply(PreviewEvent::Quit);
        assert_eq!(quit.decision(), PreviewDecision::Cancel);
    }

    #[test]
    fn test_other_input_keeps_displaying() {
        let state = PreviewState::Idle.display().apply(PreviewEvent::Other);
        assert_eq!(state, PreviewState::Displaying);
        assert_eq!(state.decision(), PreviewDecision::Pending);
    }

    #[test]
    fn test_decided_absorbs_further_events() {
        let decided = PreviewState::Idle.display().apply(PreviewEvent::Cancel);
        for event in [
            PreviewEvent::Confirm,
            PreviewEvent::Cancel,
            PreviewEvent::Quit,
            PreviewEvent::CloseRequested,
            PreviewEvent::Other,
        ] {
            assert_eq!(decided.apply(event), decided);
        }
    }

    #[test]
    fn test_idle_ignores_input_events() {
        let state = PreviewState::Idle.apply(PreviewEvent::Confirm);
        assert_eq!(state, PreviewState::Idle);
    }
}
