//! Transition controller
//!
//! The navigation state machine: owns the page stack, the lifecycle hook
//! registry, and the in-flight animation guard, and runs the navigation
//! algorithm (push / pop / set-root / navigate).
//!
//! The controller is a cheap-to-clone shared handle; all state lives behind
//! one mutex that is never held across an await. Two states exist: Idle and
//! Animating. Only one animation episode runs at a time - a navigation
//! arriving mid-episode cancels the in-flight animation handles
//! (fire-and-forget, no rollback of already-committed stack mutations) and
//! starts its own episode.

use std::sync::{Arc, Mutex};
use std::time::Instant;

use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use tracing::{debug, warn};

use swish_animation::{
    cancel_all, footer_animations, header_animations, wait_all, AnimationDriver, AnimationHandle,
    ClockDriver, Easing, KeyframeAnimation, ResolvedEasing, StrategyOptions, SynchronizedSwap,
    TransitionStrategy,
};
use swish_core::{
    Direction, Display, ElementHandle, LifecycleHook, LifecycleHooks, NavigationEvent, PageId,
    PageOptions, PageState, Position, TransitionError, TransitionPhase, TransitionResult,
};
use swish_platform::{default_duration, resolve, ResolvedPlatform};

use crate::config::{ConfigPatch, GlobalConfig, Target, TransitionConfig};

/// Effective duration when reduced motion is requested
const REDUCED_MOTION_DURATION: std::time::Duration = std::time::Duration::from_millis(1);

/// How the stack mutates for one episode
enum StackOp {
    /// Append the entering page (forward navigation)
    Push(PageState),
    /// Replace the entire stack with the entering page (root navigation)
    ReplaceRoot(PageState),
    /// Remove the former top (pop; the entering page is already below it)
    PopTop,
}

fn apply_stack_op(stack: &mut Vec<PageState>, op: &StackOp) {
    match op {
        StackOp::Push(entering) => stack.push(entering.clone()),
        StackOp::ReplaceRoot(entering) => {
            stack.clear();
            stack.push(entering.clone());
        }
        StackOp::PopTop => {
            stack.pop();
        }
    }
}

/// Final visibility commit: entering page shown in normal flow, leaving page
/// hidden but left attached
fn update_page_visibility(entering: &PageState, leaving: Option<&PageState>) {
    let element = &entering.element;
    element.set_display(Display::Block);
    element.set_visible(true);
    element.set_opacity(1.0);
    element.reset_transform();
    element.set_position(Position::Relative);

    if let Some(leaving) = leaving {
        leaving.element.set_display(Display::None);
        leaving.element.set_visible(false);
    }
}

struct ControllerInner {
    config: GlobalConfig,
    stack: Vec<PageState>,
    lifecycle: FxHashMap<PageId, LifecycleHooks>,
    in_flight: SmallVec<[AnimationHandle; 6]>,
    animating: bool,
    /// Monotonic episode counter; a finished episode only clears the
    /// Animating flag if it is still the current one
    epoch: u64,
    driver: Arc<dyn AnimationDriver>,
    swap: Option<Arc<dyn SynchronizedSwap>>,
}

/// Shared handle to the transition controller
///
/// Clones refer to the same controller, the way animation scheduler handles
/// do. Construct explicitly and pass where needed; there is deliberately no
/// process-wide instance.
#[derive(Clone)]
pub struct TransitionController {
    inner: Arc<Mutex<ControllerInner>>,
}

impl TransitionController {
    /// Controller with default configuration and the clock driver
    pub fn new() -> Self {
        Self::with_config(GlobalConfig::new())
    }

    /// Controller with explicit configuration
    pub fn with_config(config: GlobalConfig) -> Self {
        Self {
            inner: Arc::new(Mutex::new(ControllerInner {
                config,
                stack: Vec::new(),
                lifecycle: FxHashMap::default(),
                in_flight: SmallVec::new(),
                animating: false,
                epoch: 0,
                driver: Arc::new(ClockDriver),
                swap: None,
            })),
        }
    }

    /// Replace the animation driver
    pub fn with_driver(self, driver: Arc<dyn AnimationDriver>) -> Self {
        self.inner.lock().unwrap().driver = driver;
        self
    }

    /// Install a synchronized-swap primitive
    pub fn with_swap(self, swap: Arc<dyn SynchronizedSwap>) -> Self {
        self.inner.lock().unwrap().swap = Some(swap);
        self
    }

    // ------------------------------------------------------------------
    // Read-only views
    // ------------------------------------------------------------------

    /// Snapshot of the navigation stack, bottom to top
    pub fn stack(&self) -> Vec<PageState> {
        self.inner.lock().unwrap().stack.clone()
    }

    /// The current top of the stack, if any
    pub fn current_page(&self) -> Option<PageState> {
        self.inner.lock().unwrap().stack.last().cloned()
    }

    pub fn stack_len(&self) -> usize {
        self.inner.lock().unwrap().stack.len()
    }

    /// Whether an animation episode is in flight
    pub fn is_animating(&self) -> bool {
        self.inner.lock().unwrap().animating
    }

    /// The concrete platform the controller resolves to right now
    pub fn platform(&self) -> ResolvedPlatform {
        let inner = self.inner.lock().unwrap();
        resolve(inner.config.platform, inner.config.detect_platform.as_deref())
    }

    // ------------------------------------------------------------------
    // Configuration and registry
    // ------------------------------------------------------------------

    /// Apply a partial configuration update
    pub fn configure(&self, patch: ConfigPatch) {
        self.inner.lock().unwrap().config.apply(patch);
    }

    /// Register lifecycle hooks for a page id
    ///
    /// Registration is independent of stack membership: hooks survive a pop
    /// so a page can re-enter with its callbacks intact. `remove_page` and
    /// `unregister_lifecycle` are the only ways an entry leaves the registry.
    pub fn register_lifecycle(&self, id: PageId, hooks: LifecycleHooks) {
        self.inner.lock().unwrap().lifecycle.insert(id, hooks);
    }

    /// Remove a page's lifecycle hooks
    pub fn unregister_lifecycle(&self, id: &PageId) {
        self.inner.lock().unwrap().lifecycle.remove(id);
    }

    /// Cache the scroll offset of a page's content region
    pub fn save_scroll_position(&self, id: &PageId) {
        let mut inner = self.inner.lock().unwrap();
        if let Some(page) = inner.stack.iter_mut().find(|p| &p.id == id) {
            if let Some(content) = &page.content {
                page.scroll_position = Some(content.scroll_offset());
            }
        }
    }

    /// Restore a previously cached scroll offset
    pub fn restore_scroll_position(&self, id: &PageId) {
        let inner = self.inner.lock().unwrap();
        if let Some(page) = inner.stack.iter().find(|p| &p.id == id) {
            if let (Some(content), Some(offset)) = (&page.content, page.scroll_position) {
                content.set_scroll_offset(offset);
            }
        }
    }

    /// Remove a page from the stack and clear its lifecycle entry
    pub fn remove_page(&self, id: &PageId) {
        let mut inner = self.inner.lock().unwrap();
        inner.stack.retain(|p| &p.id != id);
        inner.lifecycle.remove(id);
    }

    /// Drop every page, hook, and in-flight animation
    pub fn clear(&self) {
        let mut inner = self.inner.lock().unwrap();
        cancel_all(&inner.in_flight);
        inner.in_flight.clear();
        inner.stack.clear();
        inner.lifecycle.clear();
        inner.animating = false;
    }

    /// Register an already-visible element as the initial stack entry
    ///
    /// Bootstrap path for outlets: no animation, no lifecycle protocol.
    pub fn adopt(&self, element: ElementHandle) -> PageState {
        element.set_position(Position::Relative);
        element.set_display(Display::Block);
        element.set_visible(true);

        let mut state = PageState::create(element, PageOptions::new());
        state.is_active = true;
        self.inner.lock().unwrap().stack.push(state.clone());
        state
    }

    // ------------------------------------------------------------------
    // Navigation
    // ------------------------------------------------------------------

    /// Push a new page (direction forced to forward)
    pub async fn push(
        &self,
        entering: ElementHandle,
        config: TransitionConfig,
    ) -> TransitionResult {
        self.navigate(entering, TransitionConfig {
            direction: Some(Direction::Forward),
            ..config
        })
        .await
    }

    /// Replace the entire stack with a new root
    pub async fn set_root(
        &self,
        entering: ElementHandle,
        config: TransitionConfig,
    ) -> TransitionResult {
        self.navigate(entering, TransitionConfig {
            direction: Some(Direction::Root),
            ..config
        })
        .await
    }

    /// Navigate back to the previous page
    ///
    /// Fails immediately - no stack mutation, no animation - when there is
    /// nothing to go back to.
    pub async fn pop(&self, mut config: TransitionConfig) -> TransitionResult {
        let (entering, leaving) = {
            let inner = self.inner.lock().unwrap();
            if inner.stack.len() <= 1 {
                warn!(stack_len = inner.stack.len(), "pop with no page to go back to");
                return TransitionResult::failed(
                    std::time::Duration::ZERO,
                    TransitionError::InvalidOperation(
                        "cannot pop: no page to go back to".to_string(),
                    ),
                );
            }
            let leaving = inner.stack[inner.stack.len() - 1].clone();
            let entering = inner.stack[inner.stack.len() - 2].clone();
            (entering, leaving)
        };

        config.direction = Some(Direction::Back);
        // The former top leaves the stack only after its animation completes
        self.navigate_with_states(entering, Some(leaving), config, StackOp::PopTop)
            .await
    }

    /// Generic navigation entry point (direction defaults to forward)
    ///
    /// A fresh page state with a generated id wraps the element; use
    /// [`TransitionController::navigate_state`] to navigate a page whose id
    /// was chosen up front (for lifecycle registration).
    pub async fn navigate(
        &self,
        entering: ElementHandle,
        config: TransitionConfig,
    ) -> TransitionResult {
        self.navigate_state(PageState::create(entering, PageOptions::new()), config)
            .await
    }

    /// Navigate to an already-constructed page state
    ///
    /// Stack ids stay unique: navigating to an id already on the stack is a
    /// reported failure with no mutation, except for root navigations, which
    /// replace the stack wholesale.
    pub async fn navigate_state(
        &self,
        entering: PageState,
        config: TransitionConfig,
    ) -> TransitionResult {
        let direction = config.direction.unwrap_or_default();
        if direction != Direction::Root
            && self
                .inner
                .lock()
                .unwrap()
                .stack
                .iter()
                .any(|p| p.id == entering.id)
        {
            warn!(page = %entering.id, "navigation to a page id already on the stack");
            return TransitionResult::failed(
                std::time::Duration::ZERO,
                TransitionError::InvalidOperation(format!(
                    "page {} is already on the stack",
                    entering.id
                )),
            );
        }
        let leaving = self.current_page();

        let op = match direction {
            Direction::Root => StackOp::ReplaceRoot(entering.clone()),
            _ => StackOp::Push(entering.clone()),
        };

        self.navigate_with_states(entering, leaving, config, op).await
    }

    /// The shared navigation algorithm
    async fn navigate_with_states(
        &self,
        entering: PageState,
        leaving: Option<PageState>,
        mut config: TransitionConfig,
        op: StackOp,
    ) -> TransitionResult {
        let start = Instant::now();
        let direction = config.direction.unwrap_or_default();

        // Enter Animating; supersede any in-flight episode. Cancellation is
        // fire-and-forget: the older episode's remaining lifecycle callbacks
        // still run, only its visual result is truncated.
        let epoch = {
            let mut inner = self.inner.lock().unwrap();
            if inner.animating {
                debug!(%direction, "superseding in-flight transition");
                cancel_all(&inner.in_flight);
            }
            inner.in_flight.clear();
            inner.animating = true;
            inner.epoch += 1;
            inner.epoch
        };

        let event = NavigationEvent {
            direction,
            from: leaving.clone(),
            to: entering.clone(),
        };

        debug!(page = %entering.id, %direction, "navigation started");

        let outcome = self
            .run_episode(&entering, leaving.as_ref(), &mut config, &event, op, epoch)
            .await;

        // Exit Animating, but only if this episode is still the current one
        {
            let mut inner = self.inner.lock().unwrap();
            if inner.epoch == epoch {
                inner.animating = false;
                inner.in_flight.clear();
            }
        }

        match outcome {
            Ok(()) => {
                debug!(page = %entering.id, elapsed_ms = start.elapsed().as_millis() as u64, "navigation settled");
                TransitionResult::ok(start.elapsed())
            }
            Err(error) => {
                warn!(page = %entering.id, %error, "navigation failed");
                TransitionResult::failed(start.elapsed(), error)
            }
        }
    }

    /// Steps 3-10 of the navigation algorithm
    ///
    /// An error aborts the remaining steps; a stack mutation that already
    /// committed stays committed (at-least-applied, not transactional).
    async fn run_episode(
        &self,
        entering: &PageState,
        leaving: Option<&PageState>,
        config: &mut TransitionConfig,
        event: &NavigationEvent,
        op: StackOp,
        epoch: u64,
    ) -> Result<(), TransitionError> {
        let direction = event.direction;

        if let Some(leaving) = leaving {
            self.run_hook(&leaving.id, TransitionPhase::WillLeave, event)
                .await?;
            leaving.element.emit(TransitionPhase::WillLeave, event);
            if let Some(on_start) = config.on_start.as_mut() {
                on_start();
            }
        }

        self.run_hook(&entering.id, TransitionPhase::WillEnter, event)
            .await?;
        entering.element.emit(TransitionPhase::WillEnter, event);

        if let Some(swap) = self.active_swap(config) {
            // The swap primitive supplies its own capture and animation; the
            // stack mutation and visibility commit happen inside its update
            // callback, and the controller drives no keyframes itself.
            let shared = Arc::clone(&self.inner);
            let entering_commit = entering.clone();
            let leaving_commit = leaving.cloned();
            swap.run(
                direction,
                Box::new(move || {
                    apply_stack_op(&mut shared.lock().unwrap().stack, &op);
                    update_page_visibility(&entering_commit, leaving_commit.as_ref());
                }),
            )
            .await?;
        } else {
            let (duration, easing, platform) = self.resolve_timing(config);
            apply_stack_op(&mut self.inner.lock().unwrap().stack, &op);

            // Position both pages for the animation overlap window
            entering.element.set_position(Position::Absolute);
            entering.element.set_display(Display::Block);
            entering.element.set_visible(true);
            if let Some(leaving) = leaving {
                leaving.element.set_position(Position::Absolute);
            }

            let animations =
                self.build_animations(entering, leaving, config, direction, duration, easing, platform);

            let handles: SmallVec<[AnimationHandle; 6]> = {
                let inner = self.inner.lock().unwrap();
                animations.iter().map(|a| inner.driver.start(a)).collect()
            };
            {
                let mut inner = self.inner.lock().unwrap();
                if inner.epoch == epoch {
                    inner.in_flight = handles.clone();
                }
            }

            wait_all(&handles).await?;

            update_page_visibility(entering, leaving);
        }

        self.mark_active(&entering.id, true);
        self.run_hook(&entering.id, TransitionPhase::DidEnter, event)
            .await?;
        entering.element.emit(TransitionPhase::DidEnter, event);

        if let Some(leaving) = leaving {
            self.mark_active(&leaving.id, false);
            self.run_hook(&leaving.id, TransitionPhase::DidLeave, event)
                .await?;
            leaving.element.emit(TransitionPhase::DidLeave, event);
        }

        if let Some(on_complete) = config.on_complete.as_mut() {
            on_complete();
        }

        Ok(())
    }

    /// Build the keyframe animation set for the explicit path
    #[allow(clippy::too_many_arguments)]
    fn build_animations(
        &self,
        entering: &PageState,
        leaving: Option<&PageState>,
        config: &TransitionConfig,
        direction: Direction,
        duration: std::time::Duration,
        easing: ResolvedEasing,
        platform: ResolvedPlatform,
    ) -> Vec<KeyframeAnimation> {
        let opts = StrategyOptions {
            entering: entering.element.clone(),
            leaving: leaving.map(|l| l.element.clone()),
            direction,
            duration,
            easing,
        };

        let strategy = TransitionStrategy::select(platform, direction);
        let mut animations = if config.targets.contains(Target::Content) {
            // Ordering contract: entering animation first, leaving second
            strategy.content_animations(&opts)
        } else {
            Vec::new()
        };

        if let Some(frames) = &config.enter_keyframes {
            match animations.first_mut() {
                Some(enter) => enter.frames = frames.clone(),
                None => animations.push(KeyframeAnimation::new(
                    opts.entering.clone(),
                    frames.clone(),
                    opts.duration,
                    opts.easing.clone(),
                )),
            }
        }
        if let Some(frames) = &config.leave_keyframes {
            if let Some(leaving) = &opts.leaving {
                match animations.get_mut(1) {
                    Some(leave) => leave.frames = frames.clone(),
                    None => animations.push(KeyframeAnimation::new(
                        leaving.clone(),
                        frames.clone(),
                        opts.duration,
                        opts.easing.clone(),
                    )),
                }
            }
        }

        let entering_header = entering.header.as_ref();
        let leaving_header = leaving.and_then(|l| l.header.as_ref());
        if config.targets.contains(Target::Header)
            && (entering_header.is_some() || leaving_header.is_some())
        {
            animations.extend(header_animations(&opts, entering_header, leaving_header));
        }

        let entering_footer = entering.footer.as_ref();
        let leaving_footer = leaving.and_then(|l| l.footer.as_ref());
        if config.targets.contains(Target::Footer) {
            animations.extend(footer_animations(&opts, entering_footer, leaving_footer));
        }

        animations
    }

    /// Effective duration/easing: per-call over controller-wide over
    /// platform defaults
    fn resolve_timing(
        &self,
        config: &TransitionConfig,
    ) -> (std::time::Duration, ResolvedEasing, ResolvedPlatform) {
        let inner = self.inner.lock().unwrap();
        let platform = resolve(inner.config.platform, inner.config.detect_platform.as_deref());

        let mut duration = config
            .duration
            .or(inner.config.duration)
            .unwrap_or_else(|| default_duration(platform));
        if inner.config.reduced_motion {
            duration = REDUCED_MOTION_DURATION;
        }

        let easing = config
            .easing
            .clone()
            .or_else(|| inner.config.easing.clone())
            .unwrap_or_else(|| Easing::platform_default(platform))
            .resolve();

        (duration, easing, platform)
    }

    /// The swap primitive to use for this navigation, if the path is
    /// enabled and supported (otherwise the keyframe path runs)
    fn active_swap(&self, config: &TransitionConfig) -> Option<Arc<dyn SynchronizedSwap>> {
        let inner = self.inner.lock().unwrap();
        let enabled = config
            .use_synchronized_swap
            .unwrap_or(inner.config.use_synchronized_swap);
        inner
            .swap
            .as_ref()
            .filter(|swap| enabled && swap.is_supported())
            .cloned()
    }

    fn mark_active(&self, id: &PageId, active: bool) {
        let mut inner = self.inner.lock().unwrap();
        if let Some(page) = inner.stack.iter_mut().find(|p| &p.id == id) {
            page.is_active = active;
        }
    }

    /// Run one registered lifecycle hook, awaited outside the state lock
    ///
    /// The hook is taken out of the registry for the duration of the await
    /// and put back afterwards, unless the entry was unregistered meanwhile.
    async fn run_hook(
        &self,
        id: &PageId,
        phase: TransitionPhase,
        event: &NavigationEvent,
    ) -> Result<(), TransitionError> {
        let hook = {
            let mut inner = self.inner.lock().unwrap();
            inner
                .lifecycle
                .get_mut(id)
                .and_then(|hooks| hook_slot(hooks, phase).take())
        };
        let Some(mut hook) = hook else {
            return Ok(());
        };

        let result = hook(event).await;

        {
            let mut inner = self.inner.lock().unwrap();
            if let Some(hooks) = inner.lifecycle.get_mut(id) {
                let slot = hook_slot(hooks, phase);
                if slot.is_none() {
                    *slot = Some(hook);
                }
            }
        }

        result.map_err(TransitionError::Lifecycle)
    }
}

impl Default for TransitionController {
    fn default() -> Self {
        Self::new()
    }
}

fn hook_slot(hooks: &mut LifecycleHooks, phase: TransitionPhase) -> &mut Option<LifecycleHook> {
    match phase {
        TransitionPhase::WillEnter => &mut hooks.will_enter,
        TransitionPhase::DidEnter => &mut hooks.did_enter,
        TransitionPhase::WillLeave => &mut hooks.will_leave,
        TransitionPhase::DidLeave => &mut hooks.did_leave,
    }
}

/// Convenience factory mirroring [`TransitionController::with_config`]
pub fn create_controller(config: GlobalConfig) -> TransitionController {
    TransitionController::with_config(config)
}
