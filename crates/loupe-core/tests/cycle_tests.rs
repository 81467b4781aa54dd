/// Cycle detection through shared, interior-mutable graphs.
///
/// Only composites are checked against the ancestor stack. A composite that
/// reappears on its own path renders as `"circular"`; the same composite on a
/// sibling path renders in full.
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::{Arc, RwLock};

use loupe_core::{render, render_with_depth, Reflect};

#[derive(Reflect)]
struct Node {
    name: &'static str,
    next: Option<Rc<RefCell<Node>>>,
}

fn node(name: &'static str) -> Rc<RefCell<Node>> {
    Rc::new(RefCell::new(Node { name, next: None }))
}

#[test]
fn self_reference_is_circular() {
    let a = node("a");
    a.borrow_mut().next = Some(Rc::clone(&a));

    assert_eq!(render(&a), r#"{"name":"a", "next":"circular"}"#);

    a.borrow_mut().next = None;
}

#[test]
fn self_reference_rendered_from_borrowed_root_is_circular() {
    // The root is the node itself; the back edge reaches it through the cell.
    let a = node("a");
    a.borrow_mut().next = Some(Rc::clone(&a));

    assert_eq!(render(&*a.borrow()), r#"{"name":"a", "next":"circular"}"#);

    a.borrow_mut().next = None;
}

#[derive(Reflect)]
struct CellLink {
    name: &'static str,
    next: RefCell<Option<Rc<CellLink>>>,
}

#[test]
fn self_reference_through_inner_cell_is_circular() {
    let a = Rc::new(CellLink {
        name: "a",
        next: RefCell::new(None),
    });
    *a.next.borrow_mut() = Some(Rc::clone(&a));

    assert_eq!(render(&a), r#"{"name":"a", "next":"circular"}"#);

    a.next.borrow_mut().take();
}

#[test]
fn two_node_cycle_is_circular_at_the_back_edge() {
    let a = node("a");
    let b = node("b");
    a.borrow_mut().next = Some(Rc::clone(&b));
    b.borrow_mut().next = Some(Rc::clone(&a));

    assert_eq!(
        render(&a),
        r#"{"name":"a", "next":{"name":"b", "next":"circular"}}"#
    );
    assert_eq!(
        render(&b),
        r#"{"name":"b", "next":{"name":"a", "next":"circular"}}"#
    );

    a.borrow_mut().next = None;
}

#[test]
fn depth_limit_wins_over_cycle() {
    // With max depth 0 the back edge at depth 1 is cut off before the
    // ancestor check runs.
    let a = node("a");
    a.borrow_mut().next = Some(Rc::clone(&a));

    assert_eq!(render_with_depth(&a, 0), r#"{"name":"a", "next":"omit"}"#);

    a.borrow_mut().next = None;
}

#[derive(Reflect)]
struct Tree {
    label: &'static str,
    parent: Option<Rc<RefCell<Tree>>>,
    children: Vec<Rc<RefCell<Tree>>>,
}

#[test]
fn cycle_through_sequence_is_detected_on_the_composite() {
    let root = Rc::new(RefCell::new(Tree {
        label: "root",
        parent: None,
        children: Vec::new(),
    }));
    let child = Rc::new(RefCell::new(Tree {
        label: "child",
        parent: Some(Rc::clone(&root)),
        children: Vec::new(),
    }));
    root.borrow_mut().children.push(Rc::clone(&child));

    assert_eq!(
        render(&root),
        r#"{"label":"root", "parent":null, "children":[{"label":"child", "parent":"circular", "children":[]}]}"#
    );

    root.borrow_mut().children.clear();
}

#[test]
fn diamond_is_not_circular() {
    #[derive(Reflect)]
    struct Pair {
        left: Rc<Leaf>,
        right: Rc<Leaf>,
    }

    #[derive(Reflect)]
    struct Leaf {
        v: u8,
    }

    let leaf = Rc::new(Leaf { v: 1 });
    let pair = Pair {
        left: Rc::clone(&leaf),
        right: leaf,
    };
    assert_eq!(render(&pair), r#"{"left":{"v":1}, "right":{"v":1}}"#);
}

#[derive(Reflect)]
struct SharedNode {
    id: u8,
    next: Option<Arc<RwLock<SharedNode>>>,
}

#[test]
fn cycle_through_rwlock_is_circular() {
    let a = Arc::new(RwLock::new(SharedNode { id: 1, next: None }));
    let b = Arc::new(RwLock::new(SharedNode {
        id: 2,
        next: Some(Arc::clone(&a)),
    }));
    a.write().unwrap().next = Some(Arc::clone(&b));

    assert_eq!(
        render(&a),
        r#"{"id":1, "next":{"id":2, "next":"circular"}}"#
    );

    a.write().unwrap().next = None;
}

#[test]
fn rwlock_cycle_rendered_from_read_guard_is_circular() {
    let a = Arc::new(RwLock::new(SharedNode { id: 1, next: None }));
    a.write().unwrap().next = Some(Arc::clone(&a));

    let guard = a.read().unwrap();
    assert_eq!(render(&*guard), r#"{"id":1, "next":"circular"}"#);
    drop(guard);

    a.write().unwrap().next = None;
}
