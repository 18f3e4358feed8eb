//! Navigation directions, events, and lifecycle hooks

use std::fmt;
use std::future::Future;
use std::pin::Pin;

use crate::page::PageState;

/// Direction of a navigation transition
///
/// Direction determines both the stack-mutation shape (append, remove-top,
/// replace-all) and which screen edge the animation strategies slide from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Push a new page on top of the stack
    #[default]
    Forward,
    /// Return to the previous page
    Back,
    /// Replace the entire stack with a new root
    Root,
    /// No animation (instant swap)
    None,
}

impl Direction {
    /// Parse a direction from its attribute form
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "forward" => Some(Self::Forward),
            "back" => Some(Self::Back),
            "root" => Some(Self::Root),
            "none" => Some(Self::None),
            _ => None,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Forward => "forward",
            Self::Back => "back",
            Self::Root => "root",
            Self::None => "none",
        };
        f.write_str(name)
    }
}

/// The four lifecycle notifications surfaced per navigated page
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TransitionPhase {
    WillEnter,
    DidEnter,
    WillLeave,
    DidLeave,
}

/// Transient value describing one transition
///
/// Snapshots of the page states involved; discarded once the episode's
/// lifecycle callbacks have finished.
#[derive(Clone, Debug)]
pub struct NavigationEvent {
    pub direction: Direction,
    /// Page being navigated from (absent on the first navigation)
    pub from: Option<PageState>,
    /// Page being navigated to
    pub to: PageState,
}

/// Future returned by an async lifecycle hook
pub type HookFuture = Pin<Box<dyn Future<Output = anyhow::Result<()>>>>;

/// One awaited lifecycle hook
pub type LifecycleHook = Box<dyn FnMut(&NavigationEvent) -> HookFuture>;

/// Wrap a synchronous closure as a lifecycle hook
pub fn sync_hook<F>(mut f: F) -> LifecycleHook
where
    F: FnMut(&NavigationEvent) + 'static,
{
    Box::new(move |event| {
        f(event);
        Box::pin(std::future::ready(Ok(())))
    })
}

/// Wrap a synchronous fallible closure as a lifecycle hook
pub fn try_hook<F>(mut f: F) -> LifecycleHook
where
    F: FnMut(&NavigationEvent) -> anyhow::Result<()> + 'static,
{
    Box::new(move |event| {
        let result = f(event);
        Box::pin(std::future::ready(result))
    })
}

/// Lifecycle hooks registered for one page id
///
/// All four are optional; the controller awaits whichever are present, in
/// will_leave -> will_enter -> did_enter -> did_leave episode order.
#[derive(Default)]
pub struct LifecycleHooks {
    pub will_enter: Option<LifecycleHook>,
    pub did_enter: Option<LifecycleHook>,
    pub will_leave: Option<LifecycleHook>,
    pub did_leave: Option<LifecycleHook>,
}

impl LifecycleHooks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on_will_enter(mut self, hook: LifecycleHook) -> Self {
        self.will_enter = Some(hook);
        self
    }

    pub fn on_did_enter(mut self, hook: LifecycleHook) -> Self {
        self.did_enter = Some(hook);
        self
    }

    pub fn on_will_leave(mut self, hook: LifecycleHook) -> Self {
        self.will_leave = Some(hook);
        self
    }

    pub fn on_did_leave(mut self, hook: LifecycleHook) -> Self {
        self.did_leave = Some(hook);
        self
    }
}

impl fmt::Debug for LifecycleHooks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LifecycleHooks")
            .field("will_enter", &self.will_enter.is_some())
            .field("did_enter", &self.did_enter.is_some())
            .field("will_leave", &self.will_leave.is_some())
            .field("did_leave", &self.did_leave.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_parse_round_trip() {
        for direction in [
            Direction::Forward,
            Direction::Back,
            Direction::Root,
            Direction::None,
        ] {
            assert_eq!(Direction::parse(&direction.to_string()), Some(direction));
        }
        assert_eq!(Direction::parse("sideways"), None);
    }

    #[test]
    fn test_hooks_builder() {
        let hooks = LifecycleHooks::new()
            .on_did_enter(sync_hook(|_| {}))
            .on_will_leave(sync_hook(|_| {}));
        assert!(hooks.did_enter.is_some());
        assert!(hooks.will_leave.is_some());
        assert!(hooks.will_enter.is_none());
    }
}
