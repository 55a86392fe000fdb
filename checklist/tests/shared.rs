use std::thread;

use checklist::{CheckState, NodeId, SharedChecklist, TreeDocument};

fn sample() -> SharedChecklist {
    SharedChecklist::new(TreeDocument::sample().into_roots())
}

#[test]
fn test_clones_share_state() {
    let list = sample();
    let other = list.clone();
    assert_eq!(list.id(), other.id());

    let key = list.find(NodeId(3)).unwrap();
    other.toggle_branch(key);

    assert!(list.is_selected(key));
    assert_eq!(
        list.selected_ids(),
        vec![NodeId(3), NodeId(21), NodeId(29), NodeId(35), NodeId(36)]
    );
}

#[test]
fn test_instances_are_independent() {
    let a = sample();
    let b = sample();
    assert_ne!(a.id(), b.id());

    let key = a.find(NodeId(35)).unwrap();
    a.toggle_leaf(key);

    assert!(b.selected_ids().is_empty());
}

#[test]
fn test_dirty_tracking() {
    let list = sample();
    assert!(!list.is_dirty());

    let key = list.find(NodeId(77)).unwrap();
    list.toggle(key);
    assert!(list.is_dirty());

    list.clear_dirty();
    assert!(!list.is_dirty());
    assert_eq!(list.check_state(list.find(NodeId(4)).unwrap()), CheckState::Checked);
}

#[test]
fn test_concurrent_toggles_keep_ancestors_consistent() {
    let list = sample();
    let leaves: Vec<_> = [17, 18, 21, 35, 36, 77]
        .into_iter()
        .map(|id| list.find(NodeId(id)).unwrap())
        .collect();

    let handles: Vec<_> = leaves
        .into_iter()
        .map(|key| {
            let list = list.clone();
            thread::spawn(move || {
                list.toggle_leaf(key);
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(list.selected_ids().len(), list.len());
    let root = list.find(NodeId(1)).unwrap();
    assert_eq!(list.check_state(root), CheckState::Checked);
    assert!(list.is_selected(root));
}

#[test]
fn test_rows_snapshot_and_reset() {
    let list = sample();
    let rows = list.rows();
    assert_eq!(rows.len(), 11);
    assert_eq!(rows[0].1.name, "Aula Virtual");

    list.toggle_branch(rows[0].0);
    assert_eq!(list.deselect_all().len(), 11);

    list.set_roots(Vec::new());
    assert!(list.is_empty());
}
