use std::sync::{Arc, Mutex, MutexGuard, Weak};

use bellpanel_shared::domain::NotificationRecord;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use crate::document::{Document, DocumentEvent, EventKind, ListenerGuard, NodeId};
use crate::dropdown::{DropdownInput, DropdownState};
use crate::loader::{self, NotificationSource};
use crate::navigation::Navigator;
use crate::render::{self, Align, DEFAULT_EMPTY_MESSAGE, RenderError, RenderInput};
use crate::transition::{Phase, Transition};

#[derive(Debug, Default)]
struct WidgetState {
    dropdown: DropdownState,
    notifications: Vec<NotificationRecord>,
    loaded: bool,
}

type SharedState = Arc<Mutex<WidgetState>>;

fn lock(state: &Mutex<WidgetState>) -> MutexGuard<'_, WidgetState> {
    state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn apply(state: &Mutex<WidgetState>, input: &DropdownInput) -> DropdownState {
    let mut s = lock(state);
    let next = s.dropdown.next(input);
    if next != s.dropdown {
        debug!(from = ?s.dropdown, to = ?next, ?input, "dropdown transition");
        s.dropdown = next;
    }
    next
}

/// Bell button with a dropdown list of notifications.
///
/// Configure with the builder methods, then [`mount`](Self::mount) it into a
/// [`Document`]. Mounting starts the one-shot feed load and attaches the
/// document listeners that close the panel on outside clicks and Escape.
pub struct DropdownNotifications {
    source: Arc<dyn NotificationSource>,
    navigator: Arc<dyn Navigator>,
    align: Align,
    transition: Transition,
    empty_message: String,
}

impl DropdownNotifications {
    pub fn new(source: Arc<dyn NotificationSource>, navigator: Arc<dyn Navigator>) -> Self {
        Self {
            source,
            navigator,
            align: Align::default(),
            transition: Transition::default(),
            empty_message: DEFAULT_EMPTY_MESSAGE.to_string(),
        }
    }

    pub fn align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    pub fn transition(mut self, transition: Transition) -> Self {
        self.transition = transition;
        self
    }

    pub fn empty_message(mut self, message: impl Into<String>) -> Self {
        self.empty_message = message.into();
        self
    }

    /// Attach the widget under `parent` (or the body). Must be called from
    /// within a tokio runtime; the feed is fetched on a spawned task.
    pub fn mount(self, doc: &Document, parent: Option<NodeId>) -> MountedWidget {
        let root = doc.create_node(parent);
        let trigger = doc.create_node(Some(root));
        let panel = doc.create_node(Some(root));
        let state: SharedState = Arc::default();

        let click_state = state.clone();
        let click_guard = doc.add_listener(EventKind::Click, move |doc, ev| {
            let DocumentEvent::Click { target } = ev else {
                return;
            };
            if !doc.is_attached(panel) {
                return;
            }
            if doc.contains(panel, *target) || doc.contains(trigger, *target) {
                return;
            }
            apply(&click_state, &DropdownInput::OutsidePointer);
        });

        let key_state = state.clone();
        let key_guard = doc.add_listener(EventKind::KeyDown, move |_, ev| {
            if let DocumentEvent::KeyDown { key } = ev {
                apply(&key_state, &DropdownInput::KeyPressed(key.clone()));
            }
        });

        let load = tokio::spawn(load_into(self.source.clone(), Arc::downgrade(&state)));
        debug!(%root, source = %self.source.describe(), "widget mounted");

        MountedWidget {
            doc: doc.clone(),
            root,
            trigger,
            panel,
            state,
            guards: vec![click_guard, key_guard],
            load: Some(load),
            config: self,
        }
    }
}

async fn load_into(source: Arc<dyn NotificationSource>, state: Weak<Mutex<WidgetState>>) {
    let records = loader::load_once(source.as_ref()).await;
    let Some(state) = state.upgrade() else {
        debug!("widget dropped before notifications arrived");
        return;
    };
    let mut s = lock(&state);
    s.notifications = records;
    s.loaded = true;
}

/// A widget attached to a document. Dropping it detaches all listeners.
pub struct MountedWidget {
    doc: Document,
    root: NodeId,
    trigger: NodeId,
    panel: NodeId,
    state: SharedState,
    guards: Vec<ListenerGuard>,
    load: Option<JoinHandle<()>>,
    config: DropdownNotifications,
}

impl MountedWidget {
    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn trigger(&self) -> NodeId {
        self.trigger
    }

    pub fn panel(&self) -> NodeId {
        self.panel
    }

    pub fn is_mounted(&self) -> bool {
        !self.guards.is_empty()
    }

    pub fn state(&self) -> DropdownState {
        lock(&self.state).dropdown
    }

    pub fn is_open(&self) -> bool {
        self.state().is_open()
    }

    pub fn notifications(&self) -> Vec<NotificationRecord> {
        lock(&self.state).notifications.clone()
    }

    /// Whether the one-shot load has completed (successfully or not).
    pub fn is_loaded(&self) -> bool {
        lock(&self.state).loaded
    }

    /// Wait for the one-shot load to finish. Returns immediately if it
    /// already has been awaited.
    pub async fn wait_loaded(&mut self) {
        if let Some(handle) = self.load.take()
            && let Err(e) = handle.await
        {
            warn!(error = %e, "notification load task failed");
        }
    }

    pub fn click_trigger(&self) -> DropdownState {
        self.input(DropdownInput::TriggerClicked)
    }

    pub fn focus_panel(&self) -> DropdownState {
        self.input(DropdownInput::PanelFocused)
    }

    pub fn blur_panel(&self) -> DropdownState {
        self.input(DropdownInput::PanelBlurred)
    }

    /// Activate the link of entry `index`: the panel closes and the target is
    /// handed to the navigator. Returns the target, or `None` if there is no
    /// such entry or the widget is no longer mounted.
    pub fn activate_entry(&self, index: usize) -> Option<String> {
        if !self.is_mounted() {
            debug!(index, "activation ignored on unmounted widget");
            return None;
        }
        let target = {
            let s = lock(&self.state);
            s.notifications.get(index).map(|n| n.target().to_string())
        };
        let Some(target) = target else {
            debug!(index, "activate_entry: no such notification");
            return None;
        };
        self.input(DropdownInput::EntryActivated);
        self.config.navigator.navigate(&target);
        Some(target)
    }

    fn input(&self, input: DropdownInput) -> DropdownState {
        if !self.is_mounted() {
            debug!(?input, "input ignored on unmounted widget");
            return self.state();
        }
        apply(&self.state, &input)
    }

    pub fn render(&self) -> Result<String, RenderError> {
        self.render_phase(Phase::End)
    }

    /// Render as seen at a given point of the open/close animation.
    pub fn render_phase(&self, phase: Phase) -> Result<String, RenderError> {
        let s = lock(&self.state);
        render::render(&RenderInput {
            state: s.dropdown,
            align: self.config.align,
            phase,
            transition: &self.config.transition,
            notifications: &s.notifications,
            empty_message: &self.config.empty_message,
        })
    }

    /// Detach the document listeners and remove the widget's nodes.
    /// Idempotent; also runs on drop.
    pub fn unmount(&mut self) {
        if self.guards.is_empty() {
            return;
        }
        self.guards.clear();
        self.doc.remove_node(self.root);
        debug!(root = %self.root, "widget unmounted");
    }
}

impl Drop for MountedWidget {
    fn drop(&mut self) {
        self.unmount();
    }
}
