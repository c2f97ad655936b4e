//! Minimal document model: a node tree for containment checks and a
//! document-level event stream that widgets subscribe to.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, Weak};

use tracing::trace;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(u64);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node#{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    Escape,
    Enter,
    Tab,
    Char(char),
    Other(String),
}

impl Key {
    /// Map a legacy DOM `keyCode` to a key.
    pub fn from_key_code(code: u32) -> Self {
        match code {
            27 => Key::Escape,
            13 => Key::Enter,
            9 => Key::Tab,
            c => char::from_u32(c)
                .filter(|ch| !ch.is_control())
                .map(Key::Char)
                .unwrap_or_else(|| Key::Other(format!("keyCode {c}"))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentEvent {
    Click { target: NodeId },
    KeyDown { key: Key },
}

impl DocumentEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            DocumentEvent::Click { .. } => EventKind::Click,
            DocumentEvent::KeyDown { .. } => EventKind::KeyDown,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Click,
    KeyDown,
}

type Handler = Arc<dyn Fn(&Document, &DocumentEvent) + Send + Sync>;

struct Listener {
    id: u64,
    kind: EventKind,
    handler: Handler,
}

struct DocumentInner {
    next_node: u64,
    next_listener: u64,
    // child -> parent; the body has no parent
    parents: HashMap<NodeId, Option<NodeId>>,
    listeners: Vec<Listener>,
}

/// Shared handle to a document. Cloning is cheap and yields the same document.
#[derive(Clone)]
pub struct Document {
    inner: Arc<Mutex<DocumentInner>>,
    body: NodeId,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = lock(&self.inner);
        f.debug_struct("Document")
            .field("nodes", &inner.parents.len())
            .field("listeners", &inner.listeners.len())
            .finish()
    }
}

fn lock(inner: &Mutex<DocumentInner>) -> MutexGuard<'_, DocumentInner> {
    // A panicking listener must not take the whole document down with it.
    inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

impl Document {
    pub fn new() -> Self {
        let body = NodeId(0);
        let mut parents = HashMap::new();
        parents.insert(body, None);
        Self {
            inner: Arc::new(Mutex::new(DocumentInner {
                next_node: 1,
                next_listener: 1,
                parents,
                listeners: Vec::new(),
            })),
            body,
        }
    }

    pub fn body(&self) -> NodeId {
        self.body
    }

    /// Create a node attached under `parent`, or under the body when `None`.
    pub fn create_node(&self, parent: Option<NodeId>) -> NodeId {
        let mut inner = lock(&self.inner);
        let id = NodeId(inner.next_node);
        inner.next_node += 1;
        inner.parents.insert(id, Some(parent.unwrap_or(self.body)));
        id
    }

    /// Detach `node` and all of its descendants. The body cannot be removed.
    pub fn remove_node(&self, node: NodeId) {
        if node == self.body {
            return;
        }
        let mut inner = lock(&self.inner);
        let doomed: Vec<NodeId> = inner
            .parents
            .keys()
            .copied()
            .filter(|&n| is_descendant(&inner.parents, node, n))
            .collect();
        for n in doomed {
            inner.parents.remove(&n);
        }
    }

    pub fn is_attached(&self, node: NodeId) -> bool {
        lock(&self.inner).parents.contains_key(&node)
    }

    /// True when `node` is `ancestor` itself or lies somewhere beneath it.
    pub fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        let inner = lock(&self.inner);
        inner.parents.contains_key(&ancestor) && is_descendant(&inner.parents, ancestor, node)
    }

    /// Register a document-level listener. It stays attached until the
    /// returned guard is dropped.
    #[must_use = "dropping the guard detaches the listener immediately"]
    pub fn add_listener<F>(&self, kind: EventKind, handler: F) -> ListenerGuard
    where
        F: Fn(&Document, &DocumentEvent) + Send + Sync + 'static,
    {
        let mut inner = lock(&self.inner);
        let id = inner.next_listener;
        inner.next_listener += 1;
        inner.listeners.push(Listener {
            id,
            kind,
            handler: Arc::new(handler),
        });
        trace!(listener = id, ?kind, "listener attached");
        ListenerGuard {
            doc: Arc::downgrade(&self.inner),
            id,
        }
    }

    pub fn listener_count(&self) -> usize {
        lock(&self.inner).listeners.len()
    }

    pub fn listener_count_for(&self, kind: EventKind) -> usize {
        lock(&self.inner)
            .listeners
            .iter()
            .filter(|l| l.kind == kind)
            .count()
    }

    /// Deliver `event` to every listener of its kind, in registration order.
    /// Returns the number of listeners invoked.
    pub fn dispatch(&self, event: &DocumentEvent) -> usize {
        let kind = event.kind();
        // Snapshot first so handlers may query the document (or detach) freely.
        let handlers: Vec<Handler> = lock(&self.inner)
            .listeners
            .iter()
            .filter(|l| l.kind == kind)
            .map(|l| l.handler.clone())
            .collect();
        for h in &handlers {
            h(self, event);
        }
        handlers.len()
    }
}

fn is_descendant(parents: &HashMap<NodeId, Option<NodeId>>, ancestor: NodeId, node: NodeId) -> bool {
    let mut cur = Some(node);
    while let Some(n) = cur {
        if n == ancestor {
            return true;
        }
        cur = parents.get(&n).copied().flatten();
    }
    false
}

/// Scoped registration of a document listener; detaches on drop.
pub struct ListenerGuard {
    doc: Weak<Mutex<DocumentInner>>,
    id: u64,
}

impl fmt::Debug for ListenerGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenerGuard").field("id", &self.id).finish()
    }
}

impl Drop for ListenerGuard {
    fn drop(&mut self) {
        // Document already gone: nothing left to detach from.
        let Some(inner) = self.doc.upgrade() else {
            return;
        };
        let removed = {
            let mut inner = lock(&inner);
            let pos = inner.listeners.iter().position(|l| l.id == self.id);
            pos.map(|p| inner.listeners.remove(p))
        };
        // Handler captures are released outside the lock.
        drop(removed);
        trace!(listener = self.id, "listener detached");
    }
}
