//! Component trait — the interface every UI panel implements.
//!
//! - Components own their state and render themselves.
//! - Components produce `Vec<AppEvent>`; they never touch the App directly.

use ratatui::crossterm::event::{KeyEvent, MouseEvent};
use ratatui::{layout::Rect, Frame};

use crate::event::AppEvent;

pub trait Component {
    /// Handle a key event. Returns events to be dispatched.
    fn handle_key(&mut self, key: KeyEvent) -> Vec<AppEvent>;

    /// Handle a mouse event. `area` is the region last passed to `draw`.
    fn handle_mouse(&mut self, event: MouseEvent, area: Rect) -> Vec<AppEvent>;

    /// Receive an event dispatched by the App.
    fn on_event(&mut self, _event: &AppEvent) -> Vec<AppEvent> {
        Vec::new()
    }

    /// Render the component into `area`.
    fn draw(&mut self, frame: &mut Frame, area: Rect, focused: bool);
}
