//! Keeps the twin panes of a diff at the same horizontal offset.

use super::{closest_diff_root, DiffRegistry, DiffViewId, HitTester};

/// Scroll the active diff under the cursor by `delta_x`.
///
/// The wider pane (left on a tie) scrolls within its own range and the
/// other pane copies its offset. Returns the diff that moved, or `None`
/// when the cursor is not over an active diff.
pub fn sync_horizontal(
    registry: &mut DiffRegistry,
    hit: &dyn HitTester,
    cursor_x: f64,
    cursor_y: f64,
    delta_x: f64,
) -> Option<DiffViewId> {
    let root = closest_diff_root(hit, cursor_x, cursor_y)?;
    let Some(diff) = registry.find_active_mut(root) else {
        log::trace!("diff root {:?} is not active", root);
        return None;
    };

    let (master, slave) = diff.master_and_slave();
    let offset = master.scroll_by(delta_x);
    slave.mirror(offset);

    Some(diff.id)
}
