//! Fake host environment: background probe, visibility tracker, and a
//! document wired into a pipeline.

use std::cell::RefCell;
use std::rc::Rc;

use reink::dom::{ElementHandle, NodeRef, Tree};
use reink::models::{RecolorConfig, Theme};
use reink::services::{BackgroundProbe, RecolorPipeline, VisibilityEvent, VisibilityTracker};

/// Background probe with shared-cell state so tests can flip the theme or
/// container backgrounds mid-run.
#[derive(Clone, Default)]
pub struct FakeProbe {
    pub content: Rc<RefCell<Option<String>>>,
    pub shell: Rc<RefCell<Option<String>>>,
    pub theme: Rc<RefCell<Theme>>,
}

impl FakeProbe {
    /// Dark theme, no container backgrounds: resolves to the dark fallback.
    pub fn dark() -> Self {
        let probe = Self::default();
        *probe.theme.borrow_mut() = Theme::Dark;
        probe
    }

    pub fn set_content_background(&self, value: Option<&str>) {
        *self.content.borrow_mut() = value.map(str::to_string);
    }
}

impl BackgroundProbe for FakeProbe {
    fn content_background(&self) -> Option<String> {
        self.content.borrow().clone()
    }

    fn shell_background(&self) -> Option<String> {
        self.shell.borrow().clone()
    }

    fn theme(&self) -> Theme {
        *self.theme.borrow()
    }
}

/// Visibility tracker that records observations instead of watching a
/// viewport.
#[derive(Default)]
pub struct RecordingTracker {
    pub observed: Rc<RefCell<Vec<NodeRef>>>,
    pub disconnected: Rc<RefCell<bool>>,
}

impl VisibilityTracker<NodeRef> for RecordingTracker {
    fn observe(&mut self, element: &NodeRef) {
        self.observed.borrow_mut().push(element.clone());
    }

    fn disconnect(&mut self) {
        *self.disconnected.borrow_mut() = true;
    }
}

/// A parsed document plus a pipeline over it, with handles into the fake
/// host state for assertions.
pub struct TestHost {
    pub tree: Tree,
    pub pipeline: RecolorPipeline<NodeRef, RecordingTracker, FakeProbe>,
    pub probe: FakeProbe,
    pub observed: Rc<RefCell<Vec<NodeRef>>>,
    pub disconnected: Rc<RefCell<bool>>,
}

impl TestHost {
    /// Pipeline with a visibility tracker: elements defer until an event.
    pub fn with_tracker(document: &str) -> Self {
        let tracker = RecordingTracker::default();
        let observed = tracker.observed.clone();
        let disconnected = tracker.disconnected.clone();
        Self::build(document, Some(tracker), observed, disconnected)
    }

    /// Pipeline without a tracker: elements are processed during the scan.
    pub fn without_tracker(document: &str) -> Self {
        Self::build(document, None, Rc::default(), Rc::default())
    }

    fn build(
        document: &str,
        tracker: Option<RecordingTracker>,
        observed: Rc<RefCell<Vec<NodeRef>>>,
        disconnected: Rc<RefCell<bool>>,
    ) -> Self {
        let probe = FakeProbe::dark();
        let tree = Tree::parse(document).expect("test document parses");
        let pipeline = RecolorPipeline::new(RecolorConfig::default(), tracker, probe.clone());
        Self {
            tree,
            pipeline,
            probe,
            observed,
            disconnected,
        }
    }

    /// Hand the document root to the pipeline as a freshly rendered
    /// container.
    pub fn render(&mut self) {
        let root = self.tree.root();
        self.pipeline.on_render(&root);
    }

    /// Deliver a fully-visible intersection event for one element.
    pub fn show(&mut self, element: &NodeRef) {
        self.pipeline.on_visibility(&[VisibilityEvent {
            element: element.clone(),
            intersecting: true,
            ratio: 1.0,
        }]);
    }

    /// First descendant with the given tag.
    pub fn find(&self, tag: &str) -> NodeRef {
        self.tree
            .root()
            .descendants()
            .into_iter()
            .find(|e| e.tag_name().eq_ignore_ascii_case(tag))
            .unwrap_or_else(|| panic!("no <{tag}> in document"))
    }
}
