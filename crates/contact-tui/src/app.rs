//! App — hosts the action list popup and listens to it.
//!
//! Architecture:
//! - `App` owns the components; the list view reports picks to a `PickQueue`
//!   listener, which the App drains after every input event.
//! - A blocking task reads crossterm events into a `tokio::mpsc` channel.
//! - The loop draws when something changed, then awaits the next message.
//! - The first pick or dismissal ends the loop with an `Outcome`.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::io;
use std::rc::Rc;
use std::time::Duration;

use ratatui::crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    widgets::Block,
    Frame, Terminal,
};
use serde::Serialize;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use contact_proto::action::{Action, Intent};
use contact_proto::config::UiConfig;

use crate::{
    component::Component,
    components::{
        action_list::{ActionListView, ListLayout, Listener},
        help_overlay::HelpOverlay,
    },
    event::AppEvent,
    theme::C_POPUP_BG,
    widgets::{status_bar, toast::ToastManager},
};

/// The action the user settled on.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Pick {
    pub body: String,
    pub subtitle: String,
    pub alternate: bool,
    pub intent: Option<Intent>,
}

impl Pick {
    fn new(action: &Action, alternate: bool) -> Self {
        Self {
            body: action.body.clone(),
            subtitle: action.subtitle.clone(),
            alternate,
            intent: action.resolve(alternate).cloned(),
        }
    }

    /// What to hand to the caller: the resolved intent, else the raw body.
    pub fn target(&self) -> String {
        self.intent
            .as_ref()
            .map_or_else(|| self.body.clone(), Intent::to_string)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Picked(Pick),
    Dismissed,
    Quit,
}

/// Messages into the event loop.
enum AppMessage {
    Event(Event),
}

/// Listener that queues list interactions for the App to dispatch.
#[derive(Default)]
struct PickQueue {
    pending: RefCell<VecDeque<AppEvent>>,
}

impl PickQueue {
    fn drain(&self) -> Vec<AppEvent> {
        self.pending.borrow_mut().drain(..).collect()
    }
}

impl Listener for PickQueue {
    fn on_outside_click(&self) {
        self.pending.borrow_mut().push_back(AppEvent::Dismissed);
    }

    fn on_item_clicked(&self, action: &Action, alternate: bool) {
        self.pending.borrow_mut().push_back(AppEvent::Picked {
            action: action.clone(),
            alternate,
        });
    }
}

pub struct App {
    action_list: ActionListView,
    help_overlay: HelpOverlay,
    toast: ToastManager,
    picks: Rc<PickQueue>,
    show_keys: bool,
    list_area: Rect,
    outcome: Option<Outcome>,
}

impl App {
    pub fn new(actions: Vec<Action>, ui: &UiConfig) -> Self {
        let picks = Rc::new(PickQueue::default());
        let listener: Rc<dyn Listener> = picks.clone();

        let mut action_list = ActionListView::new();
        action_list.set_listener(Some(&listener));
        action_list.set_actions(actions);
        action_list.create_surface(&ListLayout::from(ui));

        let mut toast = ToastManager::new();
        if action_list.row_count() == 0 {
            toast.warning("no actions to show");
        }

        Self {
            action_list,
            help_overlay: HelpOverlay::new(),
            toast,
            picks,
            show_keys: ui.show_keys,
            list_area: Rect::default(),
            outcome: None,
        }
    }

    // ── Main run loop ─────────────────────────────────────────────────────────

    pub async fn run(mut self) -> anyhow::Result<Outcome> {
        debug!("run(): enabling raw mode");
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let result = self.event_loop(&mut terminal).await;

        self.action_list.destroy_surface();
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;

        result
    }

    async fn event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> anyhow::Result<Outcome> {
        let (tx, mut rx) = mpsc::channel::<AppMessage>(256);

        // ── Background task: keyboard/mouse events ────────────────────────────
        // Polls so the thread notices the receiver going away on exit.
        tokio::task::spawn_blocking(move || loop {
            if tx.is_closed() {
                break;
            }
            match event::poll(Duration::from_millis(100)) {
                Ok(true) => match event::read() {
                    Ok(ev) => {
                        if tx.blocking_send(AppMessage::Event(ev)).is_err() {
                            break;
                        }
                    }
                    Err(_) => break,
                },
                Ok(false) => {}
                Err(_) => break,
            }
        });

        let mut toast_tick = tokio::time::interval(Duration::from_millis(100));
        toast_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal.draw(|f| self.draw(f))?;
            }
            needs_redraw = false;

            if let Some(outcome) = self.outcome.take() {
                info!("finished: {:?}", outcome);
                return Ok(outcome);
            }

            tokio::select! {
                msg = rx.recv() => match msg {
                    Some(msg) => needs_redraw = self.handle_message(msg),
                    None => {
                        warn!("input reader stopped");
                        return Ok(Outcome::Quit);
                    }
                },
                _ = toast_tick.tick() => {
                    if !self.toast.is_empty() {
                        self.toast.tick();
                        needs_redraw = true;
                    }
                }
            }
        }
    }

    /// Returns true when the screen needs a redraw.
    fn handle_message(&mut self, msg: AppMessage) -> bool {
        match msg {
            AppMessage::Event(Event::Key(key)) => {
                let events = if self.help_overlay.visible {
                    self.help_overlay.handle_key(key)
                } else {
                    self.action_list.handle_key(key)
                };
                self.dispatch_all(events);
            }
            AppMessage::Event(Event::Mouse(mouse)) => {
                if !self.help_overlay.visible {
                    let events = self.action_list.handle_mouse(mouse, self.list_area);
                    self.dispatch_all(events);
                }
            }
            AppMessage::Event(Event::Resize(w, h)) => {
                debug!("resize {}x{}", w, h);
            }
            AppMessage::Event(_) => return false,
        }
        true
    }

    fn dispatch_all(&mut self, events: Vec<AppEvent>) {
        let mut queue: VecDeque<AppEvent> = events.into();
        queue.extend(self.picks.drain());
        while let Some(event) = queue.pop_front() {
            let follow_up = self.dispatch(event);
            queue.extend(follow_up);
            queue.extend(self.picks.drain());
        }
    }

    fn dispatch(&mut self, event: AppEvent) -> Vec<AppEvent> {
        // The first outcome wins; later events from the same input are dropped.
        if self.outcome.is_some() {
            return vec![];
        }
        match &event {
            AppEvent::Picked { action, alternate } => {
                let pick = Pick::new(action, *alternate);
                info!("picked {:?} (alternate={})", pick.body, alternate);
                self.outcome = Some(Outcome::Picked(pick));
            }
            AppEvent::Dismissed => {
                info!("dismissed");
                self.outcome = Some(Outcome::Dismissed);
            }
            AppEvent::Quit => {
                self.outcome = Some(Outcome::Quit);
            }
            AppEvent::CopyToClipboard(text) => {
                match arboard::Clipboard::new().and_then(|mut cb| cb.set_text(text.clone())) {
                    Ok(()) => self.toast.success(format!("copied: {}", text)),
                    Err(e) => {
                        warn!("clipboard error: {}", e);
                        self.toast.error(format!("clipboard error: {}", e));
                    }
                }
            }
            AppEvent::ToggleHelp => {}
        }

        let mut follow_up = self.help_overlay.on_event(&event);
        follow_up.extend(self.action_list.on_event(&event));
        follow_up
    }

    // ── Drawing ───────────────────────────────────────────────────────────────

    fn draw(&mut self, frame: &mut Frame) {
        let area = frame.area();
        frame.render_widget(Block::default().style(Style::default().bg(C_POPUP_BG)), area);

        let status_h = if self.show_keys { 1u16 } else { 0 };
        let outer = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(status_h)])
            .split(area);

        self.list_area = outer[0];
        let focused = !self.help_overlay.visible;
        self.action_list.draw(frame, outer[0], focused);

        if self.show_keys {
            let has_alternate = self
                .action_list
                .selected_action()
                .is_some_and(Action::has_alternate);
            status_bar::draw_keys_bar(frame, outer[1], has_alternate);
        }

        self.help_overlay.draw(frame, area, false);
        self.toast.draw(frame, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use ratatui::crossterm::event::{
        KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers, MouseButton, MouseEvent,
        MouseEventKind,
    };

    fn actions() -> Vec<Action> {
        vec![
            Action::new("555-1234", "mobile")
                .with_intent(Intent::new("tel", "555-1234"))
                .with_alternate(Intent::new("sms", "555-1234"), Some("✉")),
            Action::new("jo@example.com", "work"),
        ]
    }

    fn key(code: KeyCode) -> AppMessage {
        AppMessage::Event(Event::Key(KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }))
    }

    fn left_click(column: u16, row: u16) -> AppMessage {
        AppMessage::Event(Event::Mouse(MouseEvent {
            kind: MouseEventKind::Down(MouseButton::Left),
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }))
    }

    fn drawn_app() -> App {
        let mut app = App::new(actions(), &UiConfig::default());
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal.draw(|f| app.draw(f)).unwrap();
        app
    }

    #[test]
    fn test_alternate_pick_resolves_sms_intent() {
        let mut app = drawn_app();
        app.handle_message(key(KeyCode::Tab));
        let Some(Outcome::Picked(pick)) = app.outcome.clone() else {
            panic!("expected a pick, got {:?}", app.outcome);
        };
        assert!(pick.alternate);
        assert_eq!(pick.target(), "sms:555-1234");
    }

    #[test]
    fn test_pick_without_intent_falls_back_to_body() {
        let mut app = drawn_app();
        app.handle_message(key(KeyCode::Down));
        app.handle_message(key(KeyCode::Enter));
        let Some(Outcome::Picked(pick)) = app.outcome.clone() else {
            panic!("expected a pick, got {:?}", app.outcome);
        };
        assert!(!pick.alternate);
        assert_eq!(pick.intent, None);
        assert_eq!(pick.target(), "jo@example.com");
    }

    #[test]
    fn test_click_outside_dismisses() {
        let mut app = drawn_app();
        app.handle_message(left_click(0, 0));
        assert_eq!(app.outcome, Some(Outcome::Dismissed));
    }

    #[test]
    fn test_click_on_row_picks_primary() {
        let mut app = drawn_app();
        let binding = app.action_list.bindings()[0];
        app.handle_message(left_click(binding.row.x + 1, binding.row.y + 1));
        let Some(Outcome::Picked(pick)) = app.outcome.clone() else {
            panic!("expected a pick, got {:?}", app.outcome);
        };
        assert_eq!(pick.target(), "tel:555-1234");
    }

    #[test]
    fn test_help_overlay_swallows_list_keys() {
        let mut app = drawn_app();
        app.handle_message(key(KeyCode::Char('?')));
        assert!(app.help_overlay.visible);

        app.handle_message(key(KeyCode::Enter));
        assert_eq!(app.outcome, None);
        app.handle_message(left_click(0, 0));
        assert_eq!(app.outcome, None);

        app.handle_message(key(KeyCode::Esc));
        assert!(!app.help_overlay.visible);
        assert_eq!(app.outcome, None);
    }

    #[test]
    fn test_pick_serializes_intent_as_string() {
        let pick = Pick::new(&actions()[0], true);
        let json = serde_json::to_value(&pick).unwrap();
        assert_eq!(json["intent"], "sms:555-1234");
        assert_eq!(json["alternate"], true);
    }
}
