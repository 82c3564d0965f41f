//! Contact actions — the selectable rows of a quick-contact popup.
//!
//! An action file is TOML with one `[[action]]` table per row:
//!
//! ```toml
//! [[action]]
//! body = "555-1234"
//! subtitle = "mobile"
//! intent = "tel:555-1234"
//! alternate_intent = "sms:555-1234"
//! alternate_icon = "✉"
//! ```

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A triggerable side action, written `scheme:target` (e.g. `sms:555-1234`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Intent {
    pub scheme: String,
    pub target: String,
}

impl Intent {
    pub fn new(scheme: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            scheme: scheme.into(),
            target: target.into(),
        }
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.scheme, self.target)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IntentParseError {
    #[error("intent `{0}` has no scheme (expected `scheme:target`)")]
    MissingScheme(String),
    #[error("intent `{0}` has an empty target")]
    EmptyTarget(String),
}

impl FromStr for Intent {
    type Err = IntentParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (scheme, target) = s
            .split_once(':')
            .ok_or_else(|| IntentParseError::MissingScheme(s.to_string()))?;
        if scheme.is_empty() || scheme.contains(char::is_whitespace) {
            return Err(IntentParseError::MissingScheme(s.to_string()));
        }
        if target.trim().is_empty() {
            return Err(IntentParseError::EmptyTarget(s.to_string()));
        }
        Ok(Self::new(scheme.to_ascii_lowercase(), target.trim()))
    }
}

impl TryFrom<String> for Intent {
    type Error = IntentParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Intent> for String {
    fn from(intent: Intent) -> Self {
        intent.to_string()
    }
}

/// One selectable contact detail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    pub body: String,
    #[serde(default)]
    pub subtitle: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intent: Option<Intent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alternate_intent: Option<Intent>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alternate_icon: Option<String>,
}

impl Action {
    pub fn new(body: impl Into<String>, subtitle: impl Into<String>) -> Self {
        Self {
            body: body.into(),
            subtitle: subtitle.into(),
            intent: None,
            alternate_intent: None,
            alternate_icon: None,
        }
    }

    pub fn with_intent(mut self, intent: Intent) -> Self {
        self.intent = Some(intent);
        self
    }

    pub fn with_alternate(mut self, intent: Intent, icon: Option<&str>) -> Self {
        self.alternate_intent = Some(intent);
        self.alternate_icon = icon.map(str::to_string);
        self
    }

    pub fn has_alternate(&self) -> bool {
        self.alternate_intent.is_some()
    }

    /// The intent a pick resolves to: the alternate one for secondary-button
    /// picks, the primary one otherwise.
    pub fn resolve(&self, alternate: bool) -> Option<&Intent> {
        if alternate {
            self.alternate_intent.as_ref()
        } else {
            self.intent.as_ref()
        }
    }
}

#[derive(Debug, Error)]
pub enum ActionsError {
    #[error("failed to read action file {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse action file {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ActionFile {
    #[serde(default, rename = "action")]
    pub actions: Vec<Action>,
}

impl ActionFile {
    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    pub fn load(path: &Path) -> Result<Self, ActionsError> {
        let content = std::fs::read_to_string(path).map_err(|source| ActionsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let file = Self::parse(&content).map_err(|source| ActionsError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!("loaded {} actions from {}", file.actions.len(), path.display());
        Ok(file)
    }
}
