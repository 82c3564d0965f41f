//! ActionListView — popup list of contact actions below the header.
//!
//! The view keeps the caller's actions and listener across surface
//! recreation: `create_surface` / `destroy_surface` only build and drop the
//! on-screen layout, and binding happens once both a surface and actions
//! exist. Clicks are routed by the hit regions recorded on the last draw:
//! a row reports `on_item_clicked(action, false)`, its secondary button
//! `on_item_clicked(action, true)`, a click beyond the panel
//! `on_outside_click()`. The panel's own border, title and placeholder
//! swallow clicks.

pub mod adapter;
pub mod surface;


use std::rc::{Rc, Weak};

use ratatui::crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Clear, Paragraph},
    Frame,
};
use tracing::{debug, trace};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use contact_proto::action::Action;

use crate::{
    component::Component,
    event::AppEvent,
    theme::{
        style_alternate, style_default, style_muted, style_selected, style_subtitle, C_BADGE,
        C_SEPARATOR,
    },
    widgets::{
        list_cursor::ListCursor,
        pane_chrome::{pane_chrome, Badge},
    },
};

use adapter::{ActionAdapter, RowView};
pub use surface::{ClickTarget, ListLayout, RowBinding, SurfaceHandle};
use surface::Surface;

/// Observer of list interactions.
pub trait Listener {
    fn on_outside_click(&self);
    fn on_item_clicked(&self, action: &Action, alternate: bool);
}

pub struct ActionListView {
    actions: Option<Rc<[Action]>>,
    listener: Option<Weak<dyn Listener>>,
    surface: Option<Surface>,
    next_handle: u64,
}

impl ActionListView {
    pub fn new() -> Self {
        Self {
            actions: None,
            listener: None,
            surface: None,
            next_handle: 1,
        }
    }

    /// Build the on-screen layout from `layout`, binding the current actions
    /// if they are already set. Replaces any existing surface.
    pub fn create_surface(&mut self, layout: &ListLayout) -> SurfaceHandle {
        let handle = SurfaceHandle(self.next_handle);
        self.next_handle += 1;
        if let Some(old) = self.surface.take() {
            debug!("replacing surface {:?} with {:?}", old.handle, handle);
        }
        self.surface = Some(Surface::new(handle, layout.clone()));
        self.configure_adapter();
        debug!("created surface {:?}", handle);
        handle
    }

    /// Drop the on-screen layout. Actions and listener are retained.
    pub fn destroy_surface(&mut self) {
        if let Some(surface) = self.surface.take() {
            debug!("destroyed surface {:?}", surface.handle);
        }
    }

    #[cfg(test)]
    pub fn surface_handle(&self) -> Option<SurfaceHandle> {
        self.surface.as_ref().map(|s| s.handle)
    }

    pub fn set_actions(&mut self, actions: Vec<Action>) {
        self.actions = Some(Rc::from(actions));
        self.configure_adapter();
    }

    /// Replace the listener. The view only holds a weak reference; a
    /// listener dropped by its owner silently stops receiving events.
    pub fn set_listener(&mut self, listener: Option<&Rc<dyn Listener>>) {
        self.listener = listener.map(Rc::downgrade);
    }

    #[cfg(test)]
    pub fn actions(&self) -> Option<&[Action]> {
        self.actions.as_deref()
    }

    fn configure_adapter(&mut self) {
        let (Some(actions), Some(surface)) = (&self.actions, &mut self.surface) else {
            return;
        };
        let adapter = ActionAdapter::new(
            Rc::clone(actions),
            surface.layout.default_alternate_icon.clone(),
        );
        debug!(
            "binding {} actions to surface {:?}",
            adapter.count(),
            surface.handle
        );
        surface.bind(adapter);
    }

    /// Rows in the bound adapter; 0 when nothing is bound.
    pub fn row_count(&self) -> usize {
        self.surface.as_ref().map_or(0, Surface::row_count)
    }

    #[cfg(test)]
    pub fn row_at(&self, index: usize) -> Option<RowView> {
        self.surface.as_ref()?.adapter.as_ref()?.row(index)
    }

    /// Hit regions recorded by the last draw.
    #[cfg(test)]
    pub fn bindings(&self) -> &[RowBinding] {
        self.surface
            .as_ref()
            .map(|s| s.bindings.as_slice())
            .unwrap_or_default()
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.surface.as_ref()?.cursor.selected()
    }

    pub fn selected_action(&self) -> Option<&Action> {
        let surface = self.surface.as_ref()?;
        surface.adapter.as_ref()?.item(surface.cursor.selected()?)
    }

    fn listener(&self) -> Option<Rc<dyn Listener>> {
        self.listener.as_ref()?.upgrade()
    }

    /// Route a click to the listener. Rows that no longer exist are ignored.
    pub fn dispatch(&mut self, target: ClickTarget) {
        let listener = self.listener();
        let Some(surface) = self.surface.as_mut() else {
            return;
        };
        let (index, alternate) = match target {
            ClickTarget::Outside => {
                trace!("outside click");
                if let Some(listener) = listener {
                    listener.on_outside_click();
                }
                return;
            }
            ClickTarget::Row(index) => (index, false),
            ClickTarget::Secondary(index) => (index, true),
        };
        let Some(actions) = surface.adapter.as_ref().map(ActionAdapter::snapshot) else {
            return;
        };
        let Some(action) = actions.get(index) else {
            return;
        };
        if alternate && !action.has_alternate() {
            return;
        }
        surface.cursor.select(index);
        trace!("item click: row={} alternate={}", index, alternate);
        if let Some(listener) = listener {
            listener.on_item_clicked(action, alternate);
        }
    }

    fn with_cursor(&mut self, f: impl FnOnce(&mut ListCursor)) {
        if let Some(surface) = self.surface.as_mut() {
            f(&mut surface.cursor);
        }
    }

    fn draw_row(
        frame: &mut Frame,
        layout: &ListLayout,
        row: &RowView,
        area: Rect,
        selected: bool,
    ) -> RowBinding {
        let mut text_area = area;
        let mut button_area = None;

        if let Some(button) = &row.button {
            let bw = layout.button_width.min(area.width);
            let rect = Rect {
                x: area.x + area.width - bw,
                width: bw,
                ..area
            };
            let divider_w = u16::from(row.divider_visible).min(area.width - bw);
            text_area.width = area.width - bw - divider_w;

            if divider_w > 0 {
                let divider = Rect {
                    x: rect.x - divider_w,
                    width: divider_w,
                    ..area
                };
                let divider_style = Style::default().fg(C_SEPARATOR);
                let lines: Vec<Line> = (0..area.height)
                    .map(|_| Line::from(Span::styled(layout.divider.as_str(), divider_style)))
                    .collect();
                frame.render_widget(Paragraph::new(lines), divider);
            }

            let icon = Line::from(Span::styled(button.icon.as_str(), style_alternate())).centered();
            frame.render_widget(Paragraph::new(icon), rect);
            button_area = Some(rect);
        }

        let width = text_area.width.saturating_sub(1) as usize;
        let (body_style, bg) = if selected {
            (style_selected(), style_selected())
        } else {
            (style_default(), Style::default())
        };
        let lines = vec![
            Line::from(vec![
                Span::raw(" "),
                Span::styled(truncate(&row.primary, width), body_style),
            ]),
            Line::from(vec![
                Span::raw(" "),
                Span::styled(truncate(&row.secondary, width), style_subtitle()),
            ]),
        ];
        frame.render_widget(Paragraph::new(lines).style(bg), text_area);

        RowBinding {
            index: row.index,
            row: area,
            button: button_area,
        }
    }
}

impl Default for ActionListView {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for ActionListView {
    fn handle_key(&mut self, key: KeyEvent) -> Vec<AppEvent> {
        if key.kind == KeyEventKind::Release || self.surface.is_none() {
            return vec![];
        }
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                return vec![AppEvent::Quit];
            }
            KeyCode::Up | KeyCode::Char('k') => self.with_cursor(|c| c.select_up(1)),
            KeyCode::Down | KeyCode::Char('j') => self.with_cursor(|c| c.select_down(1)),
            KeyCode::PageUp => self.with_cursor(|c| c.select_up(10)),
            KeyCode::PageDown => self.with_cursor(|c| c.select_down(10)),
            KeyCode::Home | KeyCode::Char('g') => self.with_cursor(|c| c.select_first()),
            KeyCode::End | KeyCode::Char('G') => self.with_cursor(|c| c.select_last()),
            KeyCode::Enter => {
                if let Some(idx) = self.selected_index() {
                    self.dispatch(ClickTarget::Row(idx));
                }
            }
            KeyCode::Right | KeyCode::Tab | KeyCode::Char('l') => {
                if let Some(idx) = self.selected_index() {
                    self.dispatch(ClickTarget::Secondary(idx));
                }
            }
            KeyCode::Esc | KeyCode::Char('q') => self.dispatch(ClickTarget::Outside),
            KeyCode::Char('?') => return vec![AppEvent::ToggleHelp],
            KeyCode::Char('y') => {
                if let Some(action) = self.selected_action() {
                    return vec![AppEvent::CopyToClipboard(action.body.clone())];
                }
            }
            _ => {}
        }
        vec![]
    }

    fn handle_mouse(&mut self, event: MouseEvent, _area: Rect) -> Vec<AppEvent> {
        match event.kind {
            MouseEventKind::ScrollUp => self.with_cursor(|c| c.select_up(1)),
            MouseEventKind::ScrollDown => self.with_cursor(|c| c.select_down(1)),
            MouseEventKind::Down(MouseButton::Left) => {
                let target = self
                    .surface
                    .as_ref()
                    .and_then(|s| s.hit_test(event.column, event.row));
                if let Some(target) = target {
                    self.dispatch(target);
                }
            }
            _ => {}
        }
        vec![]
    }

    fn draw(&mut self, frame: &mut Frame, area: Rect, focused: bool) {
        let Some(surface) = self.surface.as_mut() else {
            return;
        };
        surface.container = area;
        surface.bindings.clear();

        let rows = surface.row_count();
        let panel = surface.layout.panel_rect(area, rows);
        surface.panel = panel;

        let badge_text = match surface.cursor.selected() {
            Some(sel) if rows > 0 => format!("{}/{}", sel + 1, rows),
            _ => String::new(),
        };
        let badge = (!badge_text.is_empty()).then(|| Badge {
            text: badge_text.as_str(),
            color: C_BADGE,
        });
        let block = pane_chrome(&surface.layout.title, focused, badge);
        let inner = block.inner(panel);
        frame.render_widget(Clear, panel);
        frame.render_widget(block, panel);

        let Some(adapter) = surface.adapter.as_ref() else {
            // Not bound yet; nothing to hit except the container.
            surface.laid_out = true;
            return;
        };

        if rows == 0 {
            frame.render_widget(
                Paragraph::new(Span::styled("  no actions", style_muted())),
                inner,
            );
            surface.laid_out = true;
            return;
        }

        let row_h = surface.layout.row_height.max(1);
        let visible = (inner.height / row_h) as usize;
        surface.cursor.ensure_visible(visible);
        let selected = surface.cursor.selected();

        for (slot, index) in surface.cursor.visible_range(visible).enumerate() {
            let Some(row) = adapter.row(index) else {
                continue;
            };
            let row_area = Rect {
                x: inner.x,
                y: inner.y + slot as u16 * row_h,
                width: inner.width,
                height: row_h,
            };
            let is_selected = selected == Some(index);
            let binding = Self::draw_row(frame, &surface.layout, &row, row_area, is_selected);
            surface.bindings.push(binding);
        }
        surface.laid_out = true;
    }
}

/// Truncate `s` to at most `width` terminal columns, marking the cut with `…`.
fn truncate(s: &str, width: usize) -> String {
    if s.width() <= width {
        return s.to_string();
    }
    if width == 0 {
        return String::new();
    }
    let mut out = String::new();
    let mut used = 0;
    for ch in s.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w + 1 > width {
            break;
        }
        out.push(ch);
        used += w;
    }
    out.push('…');
    out
}
