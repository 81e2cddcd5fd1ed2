//! Component lifecycle: the per-instance state machine.
//!
//! ```text
//! Created → ParametersReceiving → Initializing → ParametersApplying → Rendering
//!                 ↑                                                      │
//!                 └──────────────── (parameters changed) ───────────────┘
//!
//! any live state → Disposing → Disposed
//! ```
//!
//! `Initializing` happens exactly once; a later parameter pass goes straight
//! from `ParametersReceiving` to `ParametersApplying`. `Rendering` may repeat.

use crate::error::{Error, Result};

// ---------------------------------------------------------------------------
// LifecycleState
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LifecycleState {
    Created,
    ParametersReceiving,
    Initializing,
    ParametersApplying,
    /// Attributes and content building; replayed on every render.
    Rendering,
    Disposing,
    Disposed,
}

// ---------------------------------------------------------------------------
// Lifecycle
// ---------------------------------------------------------------------------

/// Validates and records state transitions of one component instance.
#[derive(Debug, Clone)]
pub struct Lifecycle {
    component: &'static str,
    state: LifecycleState,
    initialized: bool,
    renders: u32,
}

impl Lifecycle {
    /// A tracker in [`LifecycleState::Created`].
    pub fn new(component: &'static str) -> Self {
        Self {
            component,
            state: LifecycleState::Created,
            initialized: false,
            renders: 0,
        }
    }

    /// The current state.
    pub fn state(&self) -> LifecycleState {
        self.state
    }

    /// Whether `Initializing` has already been entered.
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Number of completed transitions into `Rendering`.
    pub fn render_count(&self) -> u32 {
        self.renders
    }

    /// Whether disposal has started.
    pub fn is_disposed(&self) -> bool {
        matches!(self.state, LifecycleState::Disposing | LifecycleState::Disposed)
    }

    /// Whether `to` is a legal next state.
    pub fn can_transition(&self, to: LifecycleState) -> bool {
        use LifecycleState::*;
        match (self.state, to) {
            (Created, ParametersReceiving) => true,
            (ParametersReceiving, Initializing) => !self.initialized,
            (ParametersReceiving, ParametersApplying) => self.initialized,
            (Initializing, ParametersApplying) => true,
            (ParametersApplying, Rendering) => true,
            (Rendering, Rendering) | (Rendering, ParametersReceiving) => true,
            (Disposing, Disposed) => true,
            (Disposing | Disposed, _) => false,
            (_, Disposing) => true,
            _ => false,
        }
    }

    /// Move to `to`, or fail with [`Error::Lifecycle`] leaving the state unchanged.
    pub fn transition(&mut self, to: LifecycleState) -> Result<()> {
        if !self.can_transition(to) {
            return Err(Error::Lifecycle {
                component: self.component,
                from: self.state,
                to,
            });
        }
        tracing::trace!(
            component = self.component,
            from = ?self.state,
            to = ?to,
            "lifecycle transition"
        );
        match to {
            LifecycleState::Initializing => self.initialized = true,
            LifecycleState::Rendering => self.renders += 1,
            _ => {}
        }
        self.state = to;
        Ok(())
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use LifecycleState::*;

    fn walk(lifecycle: &mut Lifecycle, states: &[LifecycleState]) {
        for state in states {
            lifecycle.transition(*state).unwrap();
        }
    }

    #[test]
    fn new_lifecycle_is_created() {
        let lifecycle = Lifecycle::new("Button");
        assert_eq!(lifecycle.state(), Created);
        assert!(!lifecycle.is_initialized());
        assert_eq!(lifecycle.render_count(), 0);
    }

    #[test]
    fn first_pass_initializes_once() {
        let mut lifecycle = Lifecycle::new("Button");
        walk(
            &mut lifecycle,
            &[ParametersReceiving, Initializing, ParametersApplying, Rendering],
        );
        assert!(lifecycle.is_initialized());
        assert_eq!(lifecycle.render_count(), 1);
    }

    #[test]
    fn rerender_skips_initializing() {
        let mut lifecycle = Lifecycle::new("Button");
        walk(
            &mut lifecycle,
            &[ParametersReceiving, Initializing, ParametersApplying, Rendering, Rendering],
        );
        lifecycle.transition(ParametersReceiving).unwrap();
        assert!(lifecycle.transition(Initializing).is_err());
        walk(&mut lifecycle, &[ParametersApplying, Rendering]);
        assert_eq!(lifecycle.render_count(), 3);
    }

    #[test]
    fn cannot_render_before_parameters() {
        let mut lifecycle = Lifecycle::new("Button");
        let err = lifecycle.transition(Rendering).unwrap_err();
        assert!(matches!(
            err,
            Error::Lifecycle { component: "Button", from: Created, to: Rendering }
        ));
        assert_eq!(lifecycle.state(), Created);
    }

    #[test]
    fn cannot_apply_before_initializing() {
        let mut lifecycle = Lifecycle::new("Button");
        lifecycle.transition(ParametersReceiving).unwrap();
        assert!(!lifecycle.can_transition(ParametersApplying));
    }

    #[test]
    fn dispose_from_any_live_state() {
        let mut created = Lifecycle::new("Button");
        walk(&mut created, &[Disposing, Disposed]);
        assert!(created.is_disposed());

        let mut rendered = Lifecycle::new("Button");
        walk(
            &mut rendered,
            &[ParametersReceiving, Initializing, ParametersApplying, Rendering, Disposing],
        );
        assert!(rendered.transition(Rendering).is_err());
        walk(&mut rendered, &[Disposed]);
    }

    #[test]
    fn disposed_is_terminal() {
        let mut lifecycle = Lifecycle::new("Button");
        walk(&mut lifecycle, &[Disposing, Disposed]);
        for state in [Created, ParametersReceiving, Rendering, Disposing, Disposed] {
            assert!(lifecycle.transition(state).is_err());
        }
    }
}
