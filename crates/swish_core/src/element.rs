//! Element handles for externally-owned visual surfaces
//!
//! The transition system never owns rendering. It sees pages through
//! [`ElementHandle`]: a shared reference to a node in a host-owned element
//! tree that it can query (find header/content/footer regions) and mutate
//! (visibility, opacity, transform, position, scroll offset). Framework
//! adapters build these handles around whatever the host UI actually renders.

use std::fmt;
use std::sync::{Arc, Mutex};

use crate::event::{NavigationEvent, TransitionPhase};

/// Sub-regions of a page recognized by the transition system
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Region {
    Header,
    Content,
    Footer,
}

/// Whether an element participates in layout at all
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Display {
    #[default]
    Block,
    None,
}

/// Positioning mode applied to a page root during/after a transition
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Position {
    #[default]
    Relative,
    Absolute,
}

/// A translation distance, in pixels or percent of the element's own size
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Length {
    Px(f32),
    Percent(f32),
}

impl Length {
    /// Zero-length translation
    pub const ZERO: Length = Length::Px(0.0);
}

/// Visual transform applied to an element
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub translate_x: Length,
    pub translate_y: Length,
    pub scale: f32,
}

impl Transform {
    /// The identity transform (no translation, scale 1)
    pub fn identity() -> Self {
        Self {
            translate_x: Length::ZERO,
            translate_y: Length::ZERO,
            scale: 1.0,
        }
    }

    /// Horizontal translation only
    pub fn translate_x(x: Length) -> Self {
        Self {
            translate_x: x,
            ..Self::identity()
        }
    }

    /// Vertical translation only
    pub fn translate_y(y: Length) -> Self {
        Self {
            translate_y: y,
            ..Self::identity()
        }
    }

    /// Uniform scale only
    pub fn scale(scale: f32) -> Self {
        Self {
            scale,
            ..Self::identity()
        }
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

/// Presentation state the controller is allowed to mutate
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PresentationStyle {
    pub display: Display,
    pub visible: bool,
    pub opacity: f32,
    pub transform: Transform,
    pub position: Position,
}

impl Default for PresentationStyle {
    fn default() -> Self {
        Self {
            display: Display::Block,
            visible: true,
            opacity: 1.0,
            transform: Transform::identity(),
            position: Position::Relative,
        }
    }
}

/// Scroll offset of a content region
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScrollOffset {
    pub x: f32,
    pub y: f32,
}

/// Observer invoked for lifecycle notifications emitted on an element
pub type PhaseObserver = Arc<dyn Fn(TransitionPhase, &NavigationEvent) + Send + Sync>;

struct ElementNode {
    tag: String,
    region: Option<Region>,
    direction_hint: Option<crate::event::Direction>,
    keep_alive: bool,
    style: PresentationStyle,
    scroll: ScrollOffset,
    children: Vec<ElementHandle>,
    observers: Vec<PhaseObserver>,
}

/// Shared handle to a host-owned visual element
///
/// Cloning is cheap and refers to the same node; equality is node identity.
#[derive(Clone)]
pub struct ElementHandle {
    node: Arc<Mutex<ElementNode>>,
}

impl ElementHandle {
    /// Create a detached element with the given tag (for debugging only)
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            node: Arc::new(Mutex::new(ElementNode {
                tag: tag.into(),
                region: None,
                direction_hint: None,
                keep_alive: false,
                style: PresentationStyle::default(),
                scroll: ScrollOffset::default(),
                children: Vec::new(),
                observers: Vec::new(),
            })),
        }
    }

    /// Mark this element as a recognized page region
    pub fn with_region(self, region: Region) -> Self {
        self.node.lock().unwrap().region = Some(region);
        self
    }

    /// Attach a navigation direction hint (read by the router outlet)
    pub fn with_direction_hint(self, direction: crate::event::Direction) -> Self {
        self.node.lock().unwrap().direction_hint = Some(direction);
        self
    }

    /// Keep this element attached even when the outlet evicts off-stack pages
    pub fn with_keep_alive(self) -> Self {
        self.node.lock().unwrap().keep_alive = true;
        self
    }

    /// Append a child element
    pub fn append_child(&self, child: ElementHandle) {
        self.node.lock().unwrap().children.push(child);
    }

    /// Detach a child element; returns true if it was present
    pub fn remove_child(&self, child: &ElementHandle) -> bool {
        let mut node = self.node.lock().unwrap();
        let before = node.children.len();
        node.children.retain(|c| !c.same(child));
        node.children.len() != before
    }

    /// Snapshot of the current children
    pub fn children(&self) -> Vec<ElementHandle> {
        self.node.lock().unwrap().children.clone()
    }

    /// The element's tag
    pub fn tag(&self) -> String {
        self.node.lock().unwrap().tag.clone()
    }

    /// The region marker, if any
    pub fn region(&self) -> Option<Region> {
        self.node.lock().unwrap().region
    }

    /// The direction hint, if any
    pub fn direction_hint(&self) -> Option<crate::event::Direction> {
        self.node.lock().unwrap().direction_hint
    }

    /// Whether the outlet should skip this element when evicting
    pub fn keep_alive(&self) -> bool {
        self.node.lock().unwrap().keep_alive
    }

    /// Depth-first search for the first descendant marked with `region`
    pub fn find_region(&self, region: Region) -> Option<ElementHandle> {
        for child in self.children() {
            if child.region() == Some(region) {
                return Some(child);
            }
            if let Some(found) = child.find_region(region) {
                return Some(found);
            }
        }
        None
    }

    /// Identity comparison (same underlying node)
    pub fn same(&self, other: &ElementHandle) -> bool {
        Arc::ptr_eq(&self.node, &other.node)
    }

    // ------------------------------------------------------------------
    // Presentation mutations
    // ------------------------------------------------------------------

    /// Current presentation style
    pub fn style(&self) -> PresentationStyle {
        self.node.lock().unwrap().style
    }

    pub fn set_display(&self, display: Display) {
        self.node.lock().unwrap().style.display = display;
    }

    pub fn set_visible(&self, visible: bool) {
        self.node.lock().unwrap().style.visible = visible;
    }

    pub fn set_opacity(&self, opacity: f32) {
        self.node.lock().unwrap().style.opacity = opacity;
    }

    pub fn set_transform(&self, transform: Transform) {
        self.node.lock().unwrap().style.transform = transform;
    }

    /// Reset any animated transform back to identity
    pub fn reset_transform(&self) {
        self.set_transform(Transform::identity());
    }

    pub fn set_position(&self, position: Position) {
        self.node.lock().unwrap().style.position = position;
    }

    /// Current scroll offset (meaningful for content regions)
    pub fn scroll_offset(&self) -> ScrollOffset {
        self.node.lock().unwrap().scroll
    }

    pub fn set_scroll_offset(&self, offset: ScrollOffset) {
        self.node.lock().unwrap().scroll = offset;
    }

    // ------------------------------------------------------------------
    // Lifecycle notifications
    // ------------------------------------------------------------------

    /// Register an observer for lifecycle notifications on this element
    pub fn observe<F>(&self, observer: F)
    where
        F: Fn(TransitionPhase, &NavigationEvent) + Send + Sync + 'static,
    {
        self.node.lock().unwrap().observers.push(Arc::new(observer));
    }

    /// Emit a lifecycle notification to every observer on this element
    ///
    /// Observers run outside the node lock, so they may freely query the
    /// element they are attached to.
    pub fn emit(&self, phase: TransitionPhase, event: &NavigationEvent) {
        let observers: Vec<PhaseObserver> = self.node.lock().unwrap().observers.clone();
        for observer in observers {
            observer(phase, event);
        }
    }
}

impl PartialEq for ElementHandle {
    fn eq(&self, other: &Self) -> bool {
        self.same(other)
    }
}

impl Eq for ElementHandle {}

impl fmt::Debug for ElementHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let node = self.node.lock().unwrap();
        f.debug_struct("ElementHandle")
            .field("tag", &node.tag)
            .field("region", &node.region)
            .field("children", &node.children.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::Direction;

    fn page_with_regions() -> ElementHandle {
        let page = ElementHandle::new("page");
        let chrome = ElementHandle::new("chrome");
        chrome.append_child(ElementHandle::new("header").with_region(Region::Header));
        page.append_child(chrome);
        page.append_child(ElementHandle::new("content").with_region(Region::Content));
        page
    }

    #[test]
    fn test_find_region_walks_descendants() {
        let page = page_with_regions();
        let header = page.find_region(Region::Header).unwrap();
        assert_eq!(header.tag(), "header");
        assert!(page.find_region(Region::Footer).is_none());
    }

    #[test]
    fn test_handle_identity() {
        let a = ElementHandle::new("page");
        let b = a.clone();
        let c = ElementHandle::new("page");
        assert!(a.same(&b));
        assert!(!a.same(&c));
        assert_eq!(a, b);
    }

    #[test]
    fn test_remove_child() {
        let parent = ElementHandle::new("outlet");
        let child = ElementHandle::new("page");
        parent.append_child(child.clone());
        assert_eq!(parent.children().len(), 1);
        assert!(parent.remove_child(&child));
        assert!(parent.children().is_empty());
        assert!(!parent.remove_child(&child));
    }

    #[test]
    fn test_direction_hint() {
        let page = ElementHandle::new("page").with_direction_hint(Direction::Back);
        assert_eq!(page.direction_hint(), Some(Direction::Back));
    }

    #[test]
    fn test_style_mutations() {
        let el = ElementHandle::new("page");
        el.set_display(Display::None);
        el.set_visible(false);
        el.set_opacity(0.8);
        el.set_position(Position::Absolute);
        let style = el.style();
        assert_eq!(style.display, Display::None);
        assert!(!style.visible);
        assert_eq!(style.position, Position::Absolute);

        el.set_transform(Transform::scale(0.95));
        el.reset_transform();
        assert_eq!(el.style().transform, Transform::identity());
    }
}
