//! Plain-text rendering of checklist rows.

use checklist::{Checklist, ROOT_LEVEL};

/// Render every row as `<indent><marker> <name> (<id>)`.
///
/// Inactive nodes are suffixed with `[inactive]`.
pub fn render(list: &Checklist) -> String {
    let mut out = String::new();
    for (key, node) in list.iter() {
        let indent = "  ".repeat(node.level.saturating_sub(ROOT_LEVEL) as usize);
        let marker = list.check_state(key).marker();
        out.push_str(&format!("{}{} {} ({})", indent, marker, node.name, node.id));
        if !node.is_active() {
            out.push_str(" [inactive]");
        }
        out.push('\n');
    }
    out
}

/// Render the selected ids on one line, comma separated.
pub fn render_ids(list: &Checklist) -> String {
    list.selected_ids()
        .iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(",")
}
