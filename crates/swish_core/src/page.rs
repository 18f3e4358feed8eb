//! Page state records
//!
//! One [`PageState`] exists per navigable unit known to the controller. It
//! never owns the page's rendering; it records identity, region lookups, the
//! active flag, and an optional cached scroll position.

use std::any::Any;
use std::fmt;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use rand::Rng;

use crate::element::{ElementHandle, Region, ScrollOffset};

/// Opaque, stable identifier for a page
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PageId(String);

impl PageId {
    /// Wrap a caller-supplied id
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a collision-resistant id (timestamp plus random suffix)
    pub fn generate() -> Self {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis())
            .unwrap_or(0);
        let suffix: u32 = rand::thread_rng().gen();
        Self(format!("page-{millis}-{suffix:08x}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Options accepted by the page state factory
#[derive(Default)]
pub struct PageOptions {
    /// Explicit id; generated when absent
    pub id: Option<PageId>,
    /// Opaque caller payload, never inspected by the controller
    pub data: Option<Arc<dyn Any + Send + Sync>>,
}

impl PageOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(PageId::new(id));
        self
    }

    pub fn with_data(mut self, data: Arc<dyn Any + Send + Sync>) -> Self {
        self.data = Some(data);
        self
    }
}

/// State of one page in the navigation stack
#[derive(Clone)]
pub struct PageState {
    /// Unique identifier, stable for the page's lifetime
    pub id: PageId,
    /// Externally-owned visual root
    pub element: ElementHandle,
    /// Header region, when the page has one (lookup, not ownership)
    pub header: Option<ElementHandle>,
    /// Content region, when the page has one
    pub content: Option<ElementHandle>,
    /// Footer region, when the page has one
    pub footer: Option<ElementHandle>,
    /// True exactly while this page is considered on screen
    pub is_active: bool,
    /// Cached scroll position, written only by explicit save calls
    pub scroll_position: Option<ScrollOffset>,
    /// Opaque caller payload
    pub data: Option<Arc<dyn Any + Send + Sync>>,
}

impl PageState {
    /// Build a page state from an element
    ///
    /// Locates header/content/footer by region marker at creation time and
    /// starts inactive. Pure construction; nothing is registered anywhere.
    pub fn create(element: ElementHandle, options: PageOptions) -> Self {
        let id = options.id.unwrap_or_else(PageId::generate);
        let header = element.find_region(Region::Header);
        let content = element.find_region(Region::Content);
        let footer = element.find_region(Region::Footer);

        Self {
            id,
            element,
            header,
            content,
            footer,
            is_active: false,
            scroll_position: None,
            data: options.data,
        }
    }
}

impl fmt::Debug for PageState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PageState")
            .field("id", &self.id)
            .field("is_active", &self.is_active)
            .field("header", &self.header.is_some())
            .field("content", &self.content.is_some())
            .field("footer", &self.footer.is_some())
            .field("scroll_position", &self.scroll_position)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_ids_are_unique() {
        let a = PageId::generate();
        let b = PageId::generate();
        assert_ne!(a, b);
        assert!(a.as_str().starts_with("page-"));
    }

    #[test]
    fn test_create_locates_regions() {
        let page = ElementHandle::new("page");
        page.append_child(ElementHandle::new("header").with_region(Region::Header));
        page.append_child(ElementHandle::new("content").with_region(Region::Content));

        let state = PageState::create(page, PageOptions::new());
        assert!(state.header.is_some());
        assert!(state.content.is_some());
        assert!(state.footer.is_none());
        assert!(!state.is_active);
    }

    #[test]
    fn test_explicit_id_and_data() {
        let state = PageState::create(
            ElementHandle::new("page"),
            PageOptions::new()
                .with_id("home")
                .with_data(Arc::new(42u32)),
        );
        assert_eq!(state.id.as_str(), "home");
        let data = state.data.as_ref().unwrap();
        assert_eq!(data.downcast_ref::<u32>(), Some(&42));
    }
}
