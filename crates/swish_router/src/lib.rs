//! Swish Router
//!
//! The navigation state machine and its host-facing coordinator:
//!
//! - **[`TransitionController`]**: owns the page stack and lifecycle
//!   registry, runs the push / pop / set-root navigation algorithm, and
//!   arbitrates animation episodes (one at a time; newer navigations
//!   supersede in-flight ones)
//! - **[`RouterOutlet`]**: binds a container element to a controller,
//!   bootstraps the first page, maps child insertions to navigations, and
//!   enforces the page retention policy
//! - **Configuration**: controller-wide [`GlobalConfig`] with partial
//!   [`ConfigPatch`] updates, plus per-call [`TransitionConfig`]
//!
//! # Example
//!
//! ```no_run
//! use swish_core::ElementHandle;
//! use swish_router::{TransitionConfig, TransitionController};
//!
//! # async fn demo() {
//! let controller = TransitionController::new();
//! let result = controller
//!     .push(ElementHandle::new("detail-page"), TransitionConfig::new())
//!     .await;
//! assert!(result.success);
//! # }
//! ```

pub mod config;
pub mod controller;
pub mod outlet;

pub use config::{ConfigPatch, DetectFn, GlobalConfig, Target, TargetSet, TransitionConfig};
pub use controller::{create_controller, TransitionController};
pub use outlet::{OutletOptions, RouterOutlet, DEFAULT_MAX_CACHED};
