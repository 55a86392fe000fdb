use checklist::{Checklist, FlatKey, NestedNode, NodeId, TreeDocument};

fn sample() -> Checklist {
    Checklist::new(TreeDocument::sample().into_roots())
}

fn ids_of(list: &Checklist, keys: &[FlatKey]) -> Vec<u64> {
    keys.iter().map(|k| list.node(*k).unwrap().id.0).collect()
}

fn transitive_children(node: &NestedNode, out: &mut Vec<u64>) {
    for child in &node.children {
        out.push(child.id.0);
        transitive_children(child, out);
    }
}

#[test]
fn test_refresh_reuses_flat_nodes() {
    let mut list = sample();
    let before = list.rows().to_vec();
    let nodes: Vec<_> = list.iter().map(|(_, n)| n.clone()).collect();

    list.refresh();

    assert_eq!(list.rows(), &before[..]);
    let after: Vec<_> = list.iter().map(|(_, n)| n.clone()).collect();
    assert_eq!(after, nodes);
}

#[test]
fn test_selection_survives_refresh() {
    let mut list = sample();
    let mis_clases = list.find(NodeId(3)).unwrap();
    list.toggle_branch(mis_clases);
    let selected = list.selected_ids();

    list.refresh();

    assert_eq!(list.selected_ids(), selected);
    assert!(list.is_selected(mis_clases));
}

#[test]
fn test_update_roots_refreshes_in_place() {
    let mut list = sample();
    let consultar = list.find(NodeId(35)).unwrap();
    list.toggle_leaf(consultar);

    let mut roots = list.roots().to_vec();
    roots[0].children[1].children[1].children[0].name = "Consultar detalle".to_string();
    list.update_roots(roots);

    assert_eq!(list.find(NodeId(35)), Some(consultar));
    assert_eq!(list.node(consultar).unwrap().name, "Consultar detalle");
    assert!(list.is_selected(consultar));
}

#[test]
fn test_update_roots_keeps_identity_when_sibling_prepended() {
    let mut list = sample();
    let registrar = list.find(NodeId(77)).unwrap();
    list.toggle_leaf(registrar);
    let asistencia = list.find(NodeId(4)).unwrap();
    assert!(list.is_selected(asistencia));

    let mut roots = list.roots().to_vec();
    roots[0].children.insert(0, NestedNode::leaf(99, "Inicio"));
    list.update_roots(roots);

    assert_eq!(list.find(NodeId(77)), Some(registrar));
    assert_eq!(list.find(NodeId(4)), Some(asistencia));
    assert!(list.is_selected(registrar));
    assert!(list.is_selected(asistencia));
    assert_eq!(list.selected_ids(), vec![NodeId(4), NodeId(77)]);
    let root = list.find(NodeId(1)).unwrap();
    assert!(!list.is_selected(root));
    assert_eq!(
        list.nested_node(registrar).unwrap().name,
        list.node(registrar).unwrap().name
    );
}

#[test]
fn test_update_roots_promotes_branch_when_last_unselected_child_removed() {
    let mut list = sample();
    let consultar = list.find(NodeId(35)).unwrap();
    list.toggle_leaf(consultar);
    let resumen = list.find(NodeId(29)).unwrap();
    assert!(!list.is_selected(resumen));

    let mut roots = list.roots().to_vec();
    roots[0].children[1].children[1].children.pop();
    list.update_roots(roots);

    assert!(list.all_selected(resumen));
    assert!(list.is_selected(resumen));

    list.toggle_branch(resumen);
    assert!(!list.is_selected(resumen));
    assert!(!list.is_selected(consultar));
    assert!(list.selection().is_empty());
}

#[test]
fn test_update_roots_demotes_branch_when_selected_leaf_gains_child() {
    let mut list = sample();
    let visualizar = list.find(NodeId(17)).unwrap();
    let filtrar = list.find(NodeId(18)).unwrap();
    list.toggle_leaf(visualizar);
    list.toggle_leaf(filtrar);
    let pagina = list.find(NodeId(2)).unwrap();
    assert!(list.is_selected(pagina));

    let mut roots = list.roots().to_vec();
    roots[0].children[0].children[0]
        .children
        .push(NestedNode::leaf(91, "Ver avisos"));
    list.update_roots(roots);

    // 17 is now a branch with an unselected child.
    assert!(!list.is_selected(visualizar));
    assert!(!list.is_selected(pagina));
    assert!(list.is_selected(filtrar));
}

#[test]
fn test_update_roots_reallocates_on_id_change() {
    let mut list = sample();
    let old = list.find(NodeId(77)).unwrap();
    list.toggle_leaf(old);

    let mut roots = list.roots().to_vec();
    roots[0].children[2].children[0] = NestedNode::leaf(78, "Registrar asistencia");
    list.update_roots(roots);

    let new = list.find(NodeId(78)).unwrap();
    assert_ne!(new, old);
    assert!(list.node(old).is_none());
    assert!(!list.is_selected(new));
    assert!(!list.selection().is_selected(old));
    let asistencia = list.find(NodeId(4)).unwrap();
    assert!(!list.is_selected(asistencia));
}

#[test]
fn test_update_roots_drops_removed_nodes() {
    let mut list = sample();
    let asistencia = list.find(NodeId(4)).unwrap();
    list.toggle_branch(asistencia);

    let mut roots = list.roots().to_vec();
    roots[0].children.pop();
    list.update_roots(roots);

    assert_eq!(list.len(), 9);
    assert!(list.find(NodeId(4)).is_none());
    assert!(list.selection().is_empty());
}

#[test]
fn test_expandable_tracks_children() {
    let mut list = sample();
    let visualizar = list.find(NodeId(21)).unwrap();
    assert!(!list.node(visualizar).unwrap().expandable);

    let mut roots = list.roots().to_vec();
    roots[0].children[1].children[0]
        .children
        .push(NestedNode::leaf(90, "Detalle"));
    list.update_roots(roots);

    assert_eq!(list.find(NodeId(21)), Some(visualizar));
    assert!(list.node(visualizar).unwrap().expandable);
    assert_eq!(list.node(list.find(NodeId(90)).unwrap()).unwrap().level, 4);
}

#[test]
fn test_set_roots_discards_identity() {
    let mut list = sample();
    let before = list.find(NodeId(1)).unwrap();
    list.toggle_branch(before);

    list.set_roots(TreeDocument::sample().into_roots());

    assert!(list.selection().is_empty());
    assert_ne!(list.find(NodeId(1)), Some(before));
}

#[test]
fn test_flattening_twice_gives_equal_content() {
    let a = sample();
    let b = sample();
    let left: Vec<_> = a.iter().map(|(_, n)| n.clone()).collect();
    let right: Vec<_> = b.iter().map(|(_, n)| n.clone()).collect();
    assert_eq!(left, right);
}

#[test]
fn test_descendants_match_nested_children() {
    let list = sample();
    for key in list.rows() {
        let nested = list.nested_node(*key).unwrap();
        assert_eq!(nested.id, list.node(*key).unwrap().id);

        let mut expected = Vec::new();
        transitive_children(nested, &mut expected);
        assert_eq!(ids_of(&list, &list.descendants(*key)), expected);
    }
}

#[test]
fn test_levels_follow_depth() {
    let list = sample();
    let levels: Vec<(u64, u16)> = list.iter().map(|(_, n)| (n.id.0, n.level)).collect();
    assert_eq!(
        levels,
        vec![
            (1, 1),
            (2, 2),
            (17, 3),
            (18, 3),
            (3, 2),
            (21, 3),
            (29, 3),
            (35, 4),
            (36, 4),
            (4, 2),
            (77, 3),
        ]
    );
}

#[test]
fn test_require_unknown_id() {
    let list = sample();
    assert!(list.require(NodeId(1)).is_ok());
    assert!(matches!(
        list.require(NodeId(999)),
        Err(checklist::ChecklistError::UnknownNode(NodeId(999)))
    ));
}

#[test]
fn test_empty_tree() {
    let mut list = Checklist::new(Vec::new());
    assert!(list.is_empty());
    assert!(list.find(NodeId(1)).is_none());
    list.refresh();
    assert!(list.rows().is_empty());
}
