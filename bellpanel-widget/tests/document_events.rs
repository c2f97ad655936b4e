use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use bellpanel_widget::{Document, DocumentEvent, EventKind, Key};

#[test]
fn containment_follows_the_tree() {
    let doc = Document::new();
    let root = doc.create_node(None);
    let child = doc.create_node(Some(root));
    let grandchild = doc.create_node(Some(child));
    let sibling = doc.create_node(None);

    assert!(doc.contains(root, root));
    assert!(doc.contains(root, grandchild));
    assert!(doc.contains(doc.body(), grandchild));
    assert!(!doc.contains(child, root));
    assert!(!doc.contains(root, sibling));

    doc.remove_node(child);
    assert!(doc.is_attached(root));
    assert!(!doc.is_attached(child));
    assert!(!doc.is_attached(grandchild));
    assert!(!doc.contains(root, grandchild));

    doc.remove_node(doc.body());
    assert!(doc.is_attached(doc.body()));
}

#[test]
fn listeners_receive_only_their_kind_until_guard_drops() {
    let doc = Document::new();
    let clicks = Arc::new(AtomicUsize::new(0));
    let keys = Arc::new(AtomicUsize::new(0));

    let c = clicks.clone();
    let click_guard = doc.add_listener(EventKind::Click, move |_, _| {
        c.fetch_add(1, Ordering::SeqCst);
    });
    let k = keys.clone();
    let key_guard = doc.add_listener(EventKind::KeyDown, move |_, _| {
        k.fetch_add(1, Ordering::SeqCst);
    });

    let target = doc.create_node(None);
    assert_eq!(doc.dispatch(&DocumentEvent::Click { target }), 1);
    assert_eq!(doc.dispatch(&DocumentEvent::KeyDown { key: Key::Enter }), 1);
    assert_eq!(clicks.load(Ordering::SeqCst), 1);
    assert_eq!(keys.load(Ordering::SeqCst), 1);

    drop(click_guard);
    assert_eq!(doc.listener_count_for(EventKind::Click), 0);
    assert_eq!(doc.dispatch(&DocumentEvent::Click { target }), 0);
    assert_eq!(clicks.load(Ordering::SeqCst), 1);

    drop(key_guard);
    assert_eq!(doc.listener_count(), 0);
}

#[test]
fn handlers_may_query_document_during_dispatch() {
    let doc = Document::new();
    let panel = doc.create_node(None);
    let inside = doc.create_node(Some(panel));
    let hits = Arc::new(AtomicUsize::new(0));
    let h = hits.clone();
    let _guard = doc.add_listener(EventKind::Click, move |doc, ev| {
        if let DocumentEvent::Click { target } = ev
            && doc.contains(panel, *target)
        {
            h.fetch_add(1, Ordering::SeqCst);
        }
    });
    doc.dispatch(&DocumentEvent::Click { target: inside });
    doc.dispatch(&DocumentEvent::Click { target: doc.body() });
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

#[test]
fn guard_outliving_document_is_harmless() {
    let doc = Document::new();
    let guard = doc.add_listener(EventKind::KeyDown, |_, _| {});
    drop(doc);
    drop(guard);
}
