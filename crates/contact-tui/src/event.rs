//! AppEvent enum — intents that flow from components back to the App.

use contact_proto::action::Action;

/// All events that can flow through the App.
/// Components produce events; the App dispatches them.
#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// A row (or its secondary button when `alternate`) was picked.
    Picked { action: Action, alternate: bool },
    /// The user clicked outside the list.
    Dismissed,
    ToggleHelp,
    CopyToClipboard(String),
    Quit,
}
