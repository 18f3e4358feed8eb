//! Swish Core
//!
//! Foundational types for the Swish transition system:
//!
//! - **Element Handles**: shared references to host-owned visual elements,
//!   with the small presentation surface the controller may mutate
//! - **Page State**: immutable-identity records for navigable units
//! - **Navigation Events**: direction, lifecycle phases, and per-transition
//!   event payloads
//! - **Errors**: the transition error taxonomy and result values
//!
//! # Example
//!
//! ```rust
//! use swish_core::{ElementHandle, PageOptions, PageState, Region};
//!
//! let page = ElementHandle::new("page");
//! page.append_child(ElementHandle::new("content").with_region(Region::Content));
//!
//! let state = PageState::create(page, PageOptions::new().with_id("home"));
//! assert_eq!(state.id.as_str(), "home");
//! assert!(state.content.is_some());
//! ```

pub mod element;
pub mod error;
pub mod event;
pub mod page;

pub use element::{
    Display, ElementHandle, Length, PhaseObserver, Position, PresentationStyle, Region,
    ScrollOffset, Transform,
};
pub use error::{TransitionError, TransitionResult};
pub use event::{
    sync_hook, try_hook, Direction, HookFuture, LifecycleHook, LifecycleHooks, NavigationEvent,
    TransitionPhase,
};
pub use page::{PageId, PageOptions, PageState};
