//! Router outlet
//!
//! Host-facing coordinator that binds a container element to a
//! [`TransitionController`]: it bootstraps the first page, turns child
//! insertions into navigations, and enforces the page retention policy.

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use swish_animation::AnimationDriver;
use swish_core::{Direction, ElementHandle, PageState, TransitionResult};
use swish_platform::Platform;

use crate::config::{ConfigPatch, TransitionConfig};
use crate::controller::TransitionController;

/// Default cap on retained inactive pages
pub const DEFAULT_MAX_CACHED: usize = 10;

/// Outlet retention policy
#[derive(Clone, Copy, Debug)]
pub struct OutletOptions {
    /// Keep navigated-away pages attached (hidden) for instant back
    /// navigation
    pub retain_pages: bool,
    /// Evict the oldest inactive pages beyond this many
    pub max_cached: usize,
}

impl Default for OutletOptions {
    fn default() -> Self {
        Self {
            retain_pages: true,
            max_cached: DEFAULT_MAX_CACHED,
        }
    }
}

/// Binds a container element to a transition controller
pub struct RouterOutlet {
    controller: TransitionController,
    container: ElementHandle,
    options: OutletOptions,
    /// Child appended by the outlet itself; `child_added` must not treat it
    /// as a second navigation
    pending: Option<ElementHandle>,
    mounted: bool,
}

impl RouterOutlet {
    pub fn new(container: ElementHandle) -> Self {
        Self::with_controller(container, TransitionController::new())
    }

    /// Outlet over an existing (possibly shared) controller
    pub fn with_controller(container: ElementHandle, controller: TransitionController) -> Self {
        Self {
            controller,
            container,
            options: OutletOptions::default(),
            pending: None,
            mounted: false,
        }
    }

    pub fn with_options(mut self, options: OutletOptions) -> Self {
        self.options = options;
        self
    }

    /// Replace the controller's animation driver
    pub fn with_driver(mut self, driver: Arc<dyn AnimationDriver>) -> Self {
        self.controller = self.controller.with_driver(driver);
        self
    }

    pub fn controller(&self) -> &TransitionController {
        &self.controller
    }

    pub fn container(&self) -> &ElementHandle {
        &self.container
    }

    /// Attach the outlet; a pre-existing last child becomes the initial
    /// page without animation
    pub fn mount(&mut self) {
        if self.mounted {
            return;
        }
        self.mounted = true;
        if let Some(first) = self.container.children().last() {
            let state = self.controller.adopt(first.clone());
            debug!(page = %state.id, "adopted initial page");
        }
    }

    /// Detach the outlet, dropping all pages and hooks
    pub fn unmount(&mut self) {
        self.mounted = false;
        self.pending = None;
        self.controller.clear();
    }

    // ------------------------------------------------------------------
    // Host integration
    // ------------------------------------------------------------------

    /// React to a child element appearing in the container
    ///
    /// Children inserted by the outlet's own navigation calls are already
    /// accounted for; anything else is treated as a declarative navigation,
    /// using the element's direction hint (forward when unhinted). Before
    /// the outlet mounts, insertions are ignored; `mount` adopts the last
    /// child instead.
    pub async fn child_added(&mut self, element: ElementHandle) -> Option<TransitionResult> {
        if !self.mounted {
            return None;
        }
        if let Some(pending) = &self.pending {
            if pending.same(&element) {
                return None;
            }
        }
        if self.controller.stack_len() == 0 {
            let state = self.controller.adopt(element);
            debug!(page = %state.id, "adopted first inserted page");
            return None;
        }

        let direction = element.direction_hint().unwrap_or(Direction::Forward);
        let result = match direction {
            Direction::Root => {
                self.controller
                    .set_root(element, TransitionConfig::new())
                    .await
            }
            _ => {
                self.controller
                    .navigate(element, TransitionConfig::new().direction(direction))
                    .await
            }
        };
        self.apply_retention();
        Some(result)
    }

    // ------------------------------------------------------------------
    // Programmatic navigation
    // ------------------------------------------------------------------

    /// Append a page element and push it onto the stack
    pub async fn push(&mut self, element: ElementHandle, config: TransitionConfig) -> TransitionResult {
        self.pending = Some(element.clone());
        self.container.append_child(element.clone());
        let result = self.controller.push(element, config).await;
        self.pending = None;
        self.apply_retention();
        result
    }

    /// Navigate back to the previous page
    pub async fn pop(&mut self, config: TransitionConfig) -> TransitionResult {
        let leaving = self.controller.current_page();
        let result = self.controller.pop(config).await;
        if result.success {
            if let Some(leaving) = leaving {
                self.release_page(&leaving);
            }
        }
        result
    }

    /// Append a page element and make it the sole stack entry
    pub async fn set_root(&mut self, element: ElementHandle, config: TransitionConfig) -> TransitionResult {
        let previous = self.controller.stack();
        self.pending = Some(element.clone());
        self.container.append_child(element.clone());
        let result = self.controller.set_root(element, config).await;
        self.pending = None;
        if result.success {
            for page in &previous {
                self.release_page(page);
            }
            self.apply_retention();
        }
        result
    }

    pub fn can_go_back(&self) -> bool {
        self.controller.stack_len() > 1
    }

    pub fn stack_len(&self) -> usize {
        self.controller.stack_len()
    }

    // ------------------------------------------------------------------
    // Attribute surface
    // ------------------------------------------------------------------

    /// Apply a host attribute to the outlet
    ///
    /// Recognized: `platform`, `duration` (milliseconds), `retain-pages`,
    /// `max-cached`. Unparseable values fall back to defaults with a
    /// warning.
    pub fn set_attribute(&mut self, name: &str, value: &str) {
        match name {
            "platform" => match Platform::parse(value) {
                Some(platform) => self
                    .controller
                    .configure(ConfigPatch::new().platform(platform)),
                None => warn!(value, "ignoring unknown platform attribute"),
            },
            "duration" => match value.parse::<u64>() {
                Ok(millis) => self
                    .controller
                    .configure(ConfigPatch::new().duration(Duration::from_millis(millis))),
                Err(_) => warn!(value, "ignoring unparseable duration attribute"),
            },
            "retain-pages" => {
                self.options.retain_pages = value != "false";
                self.apply_retention();
            }
            "max-cached" => match value.parse::<usize>() {
                Ok(max) => {
                    self.options.max_cached = max;
                    self.apply_retention();
                }
                Err(_) => warn!(value, "ignoring unparseable max-cached attribute"),
            },
            _ => warn!(name, "unknown outlet attribute"),
        }
    }

    // ------------------------------------------------------------------
    // Retention
    // ------------------------------------------------------------------

    /// Enforce the retention policy over retained (off-stack or inactive)
    /// pages
    fn apply_retention(&mut self) {
        if !self.options.retain_pages {
            let stack = self.controller.stack();
            let orphans: Vec<ElementHandle> = self
                .container
                .children()
                .into_iter()
                .filter(|child| {
                    !child.keep_alive() && !stack.iter().any(|p| p.element.same(child))
                })
                .collect();
            for child in orphans {
                self.container.remove_child(&child);
            }
            return;
        }

        let stack = self.controller.stack();
        let mut inactive: Vec<PageState> = stack.iter().filter(|p| !p.is_active).cloned().collect();
        if inactive.len() <= self.options.max_cached {
            return;
        }
        // Oldest first: stack order is insertion order
        let excess = inactive.len() - self.options.max_cached;
        for page in inactive.drain(..excess) {
            if page.element.keep_alive() {
                continue;
            }
            debug!(page = %page.id, "evicting cached page");
            self.container.remove_child(&page.element);
            self.controller.remove_page(&page.id);
        }
    }

    /// Detach a page element unless retention keeps it around
    fn release_page(&mut self, page: &PageState) {
        if self.options.retain_pages || page.element.keep_alive() {
            return;
        }
        self.container.remove_child(&page.element);
        self.controller.remove_page(&page.id);
    }
}

impl std::fmt::Debug for RouterOutlet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RouterOutlet")
            .field("options", &self.options)
            .field("mounted", &self.mounted)
            .field("stack_len", &self.stack_len())
            .finish()
    }
}
