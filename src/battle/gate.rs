//! Presentation-side gating.
//!
//! Some player actions are only legal when the UI is idle. The session asks
//! an `InputGate` instead of depending on any UI type.

/// Queried before player-driven execute and end-turn actions.
pub trait InputGate {
    /// Whether a card is currently held by the pointer.
    fn card_held(&self) -> bool;
}

/// A gate that never blocks. Used by headless callers and tests.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoGate;

impl InputGate for NoGate {
    fn card_held(&self) -> bool {
        false
    }
}
