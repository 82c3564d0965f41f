//! The realized on-screen layout of an action list: popup geometry, the
//! bound adapter, and the hit regions recorded by the last draw.

use ratatui::layout::{Position, Rect};

use contact_proto::config::UiConfig;

use super::adapter::ActionAdapter;
use crate::widgets::list_cursor::ListCursor;

/// Opaque id of a created surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SurfaceHandle(pub(super) u64);

/// Template the surface is built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListLayout {
    pub title: String,
    pub width_percent: u16,
    pub max_visible_rows: u16,
    pub divider: String,
    pub default_alternate_icon: String,
    /// Lines per row: body + subtitle.
    pub row_height: u16,
    pub button_width: u16,
}

impl Default for ListLayout {
    fn default() -> Self {
        Self::from(&UiConfig::default())
    }
}

impl From<&UiConfig> for ListLayout {
    fn from(ui: &UiConfig) -> Self {
        Self {
            title: ui.title.clone(),
            width_percent: ui.width_percent.clamp(10, 100),
            max_visible_rows: ui.max_visible_rows.max(1),
            divider: ui.divider.clone(),
            default_alternate_icon: ui.default_alternate_icon.clone(),
            row_height: 2,
            button_width: 3,
        }
    }
}

impl ListLayout {
    /// Popup rect for `rows` rows, centered in `container`.
    pub fn panel_rect(&self, container: Rect, rows: usize) -> Rect {
        let visible = u16::try_from(rows)
            .unwrap_or(u16::MAX)
            .clamp(1, self.max_visible_rows);
        let height = visible
            .saturating_mul(self.row_height)
            .saturating_add(2)
            .min(container.height);
        let width = ((u32::from(container.width) * u32::from(self.width_percent)) / 100) as u16;
        let width = width
            .max(24)
            .min(container.width);
        Rect {
            x: container.x + (container.width - width) / 2,
            y: container.y + (container.height - height) / 2,
            width,
            height,
        }
    }
}

/// Hit regions of one drawn row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowBinding {
    pub index: usize,
    pub row: Rect,
    pub button: Option<Rect>,
}

/// What a click at a terminal cell lands on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget {
    Row(usize),
    Secondary(usize),
    Outside,
}

pub(super) struct Surface {
    pub handle: SurfaceHandle,
    pub layout: ListLayout,
    pub adapter: Option<ActionAdapter>,
    pub cursor: ListCursor,
    pub container: Rect,
    pub panel: Rect,
    pub bindings: Vec<RowBinding>,
    /// False between a rebind and the next draw; recorded regions are stale.
    pub laid_out: bool,
}

impl Surface {
    pub fn new(handle: SurfaceHandle, layout: ListLayout) -> Self {
        Self {
            handle,
            layout,
            adapter: None,
            cursor: ListCursor::default(),
            container: Rect::default(),
            panel: Rect::default(),
            bindings: Vec::new(),
            laid_out: false,
        }
    }

    pub fn bind(&mut self, adapter: ActionAdapter) {
        self.cursor.set_len(adapter.count());
        self.adapter = Some(adapter);
        self.bindings.clear();
        self.laid_out = false;
    }

    pub fn row_count(&self) -> usize {
        self.adapter.as_ref().map_or(0, ActionAdapter::count)
    }

    pub fn hit_test(&self, column: u16, row: u16) -> Option<ClickTarget> {
        if !self.laid_out {
            return None;
        }
        let pos = Position::new(column, row);
        if !self.container.contains(pos) {
            return None;
        }
        for binding in &self.bindings {
            if binding.button.is_some_and(|b| b.contains(pos)) {
                return Some(ClickTarget::Secondary(binding.index));
            }
            if binding.row.contains(pos) {
                return Some(ClickTarget::Row(binding.index));
            }
        }
        // Border, title and placeholder belong to the panel: consumed.
        if self.panel.contains(pos) {
            return None;
        }
        Some(ClickTarget::Outside)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_panel_is_centered_and_capped() {
        let layout = ListLayout::default();
        let container = Rect::new(0, 0, 100, 40);

        let panel = layout.panel_rect(container, 3);
        assert_eq!(panel.width, 60);
        assert_eq!(panel.height, 3 * 2 + 2);
        assert_eq!(panel.x, 20);
        assert_eq!(panel.y, 16);

        let panel = layout.panel_rect(container, 50);
        assert_eq!(panel.height, 8 * 2 + 2);
    }

    #[test]
    fn test_panel_height_for_more_rows_than_u16() {
        let layout = ListLayout::default();
        let container = Rect::new(0, 0, 100, 40);
        let capped = layout.panel_rect(container, 20);
        assert_eq!(layout.panel_rect(container, 65_536), capped);
        assert_eq!(layout.panel_rect(container, 70_000).height, 8 * 2 + 2);
    }

    #[test]
    fn test_panel_fits_tiny_terminal() {
        let layout = ListLayout::default();
        let panel = layout.panel_rect(Rect::new(0, 0, 20, 5), 4);
        assert_eq!(panel, Rect::new(0, 0, 20, 5));
    }

    #[test]
    fn test_hit_test_prefers_button_over_row() {
        let mut surface = Surface::new(SurfaceHandle(1), ListLayout::default());
        surface.container = Rect::new(0, 0, 40, 10);
        surface.panel = Rect::new(0, 0, 40, 4);
        surface.bindings = vec![RowBinding {
            index: 0,
            row: Rect::new(1, 1, 38, 2),
            button: Some(Rect::new(36, 1, 3, 2)),
        }];
        assert_eq!(surface.hit_test(5, 1), None);

        surface.laid_out = true;
        assert_eq!(surface.hit_test(5, 1), Some(ClickTarget::Row(0)));
        assert_eq!(surface.hit_test(37, 2), Some(ClickTarget::Secondary(0)));
        assert_eq!(surface.hit_test(5, 6), Some(ClickTarget::Outside));
        assert_eq!(surface.hit_test(50, 6), None);
        // Panel border: neither a row nor outside.
        assert_eq!(surface.hit_test(5, 0), None);
        assert_eq!(surface.hit_test(0, 2), None);
    }
}
