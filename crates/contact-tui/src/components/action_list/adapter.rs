//! Adapter between an action snapshot and the rows the list renders.

use std::rc::Rc;

use contact_proto::action::Action;

/// Secondary button shown at the right edge of a row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecondaryButton {
    pub icon: String,
}

/// Display state of one row, derived from `actions[index]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowView {
    pub index: usize,
    pub primary: String,
    /// Subtitle as displayed (upper-cased); the action itself is untouched.
    pub secondary: String,
    pub divider_visible: bool,
    pub button: Option<SecondaryButton>,
}

/// Read-only view over one immutable snapshot of the actions. Rebinding the
/// list means building a new adapter, so an adapter can never observe a
/// sequence shorter than the one it counted.
#[derive(Debug, Clone)]
pub struct ActionAdapter {
    actions: Rc<[Action]>,
    fallback_icon: String,
}

impl ActionAdapter {
    pub fn new(actions: Rc<[Action]>, fallback_icon: impl Into<String>) -> Self {
        Self {
            actions,
            fallback_icon: fallback_icon.into(),
        }
    }

    pub fn count(&self) -> usize {
        self.actions.len()
    }

    pub fn item(&self, position: usize) -> Option<&Action> {
        self.actions.get(position)
    }

    pub fn snapshot(&self) -> Rc<[Action]> {
        Rc::clone(&self.actions)
    }

    pub fn row(&self, position: usize) -> Option<RowView> {
        let action = self.actions.get(position)?;
        let has_alternate = action.has_alternate();
        let button = has_alternate.then(|| SecondaryButton {
            icon: action
                .alternate_icon
                .clone()
                .unwrap_or_else(|| self.fallback_icon.clone()),
        });
        Some(RowView {
            index: position,
            primary: action.body.clone(),
            secondary: action.subtitle.to_uppercase(),
            divider_visible: has_alternate,
            button,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contact_proto::action::Intent;

    fn adapter(actions: Vec<Action>) -> ActionAdapter {
        ActionAdapter::new(Rc::from(actions), "»")
    }

    #[test]
    fn test_rows_mirror_actions() {
        let actions = vec![
            Action::new("555-1234", "mobile"),
            Action::new("jo@example.com", "Work"),
            Action::new("221B Baker St", "home"),
        ];
        let adapter = adapter(actions.clone());
        assert_eq!(adapter.count(), 3);
        for (i, action) in actions.iter().enumerate() {
            let row = adapter.row(i).unwrap();
            assert_eq!(row.index, i);
            assert_eq!(row.primary, action.body);
            assert_eq!(row.secondary, action.subtitle.to_uppercase());
            assert_eq!(adapter.item(i), Some(action));
        }
        assert!(adapter.row(3).is_none());
    }

    #[test]
    fn test_alternate_controls_button_and_divider() {
        let plain = Action::new("555-1234", "home");
        let with_icon = Action::new("555-1234", "mobile")
            .with_alternate(Intent::new("sms", "555-1234"), Some("✉"));
        let no_icon = Action::new("555-1234", "mobile")
            .with_alternate(Intent::new("sms", "555-1234"), None);
        let adapter = adapter(vec![plain, with_icon, no_icon]);

        let row = adapter.row(0).unwrap();
        assert!(!row.divider_visible);
        assert_eq!(row.button, None);

        let row = adapter.row(1).unwrap();
        assert!(row.divider_visible);
        assert_eq!(row.button.unwrap().icon, "✉");

        assert_eq!(adapter.row(2).unwrap().button.unwrap().icon, "»");
    }

    #[test]
    fn test_uppercase_is_display_only() {
        let adapter = adapter(vec![Action::new("x", "straße")]);
        assert_eq!(adapter.row(0).unwrap().secondary, "STRASSE");
        assert_eq!(adapter.item(0).unwrap().subtitle, "straße");
    }
}
