//! Descriptions of notebook UI elements, independent of the automation driver.
//!
//! `UiTarget::selector` renders a Playwright selector string; this is the
//! same syntax `getByText`/`getByRole`/… generate in the official clients.

/// A UI element to query or act on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiTarget {
    /// Element containing `text` (case-insensitive substring unless `exact`).
    Text { text: String, exact: bool },
    /// Element whose visible text matches a regular expression.
    TextPattern(String),
    /// Input with the given placeholder.
    Placeholder(String),
    /// Element with the given accessible label.
    Label { label: String, exact: bool },
    /// Element with ARIA `role`, optionally filtered by accessible name.
    Role { role: String, name: Option<String> },
    /// Raw CSS selector.
    Css(String),
    /// Enter the iframe matched by a CSS selector.
    Frame(String),
    /// Each target resolved inside the previous one.
    Chain(Vec<UiTarget>),
    /// First element matched by the inner target, never a strict-mode error.
    First(Box<UiTarget>),
}

impl UiTarget {
    #[must_use]
    pub fn text(text: &str) -> Self {
        Self::Text {
            text: text.to_string(),
            exact: false,
        }
    }

    #[must_use]
    pub fn exact_text(text: &str) -> Self {
        Self::Text {
            text: text.to_string(),
            exact: true,
        }
    }

    #[must_use]
    pub fn label(label: &str) -> Self {
        Self::Label {
            label: label.to_string(),
            exact: false,
        }
    }

    #[must_use]
    pub fn exact_label(label: &str) -> Self {
        Self::Label {
            label: label.to_string(),
            exact: true,
        }
    }

    #[must_use]
    pub fn placeholder(text: &str) -> Self {
        Self::Placeholder(text.to_string())
    }

    #[must_use]
    pub fn button(name: &str) -> Self {
        Self::Role {
            role: "button".to_string(),
            name: Some(name.to_string()),
        }
    }

    #[must_use]
    pub fn role(role: &str) -> Self {
        Self::Role {
            role: role.to_string(),
            name: None,
        }
    }

    #[must_use]
    pub fn css(selector: &str) -> Self {
        Self::Css(selector.to_string())
    }

    /// Resolve to the first match instead of requiring a unique one.
    #[must_use]
    pub fn first(self) -> Self {
        Self::First(Box::new(self))
    }

    /// The raw CSS behind a `Css` target, looking through `First`.
    #[must_use]
    pub fn as_css(&self) -> Option<&str> {
        match self {
            Self::Css(css) => Some(css),
            Self::First(inner) => inner.as_css(),
            _ => None,
        }
    }

    /// Playwright selector string for this target.
    #[must_use]
    pub fn selector(&self) -> String {
        match self {
            Self::Text { text, exact } => format!("internal:text={}", quote(text, *exact)),
            Self::TextPattern(pattern) => format!("internal:text=/{pattern}/"),
            Self::Placeholder(text) => {
                format!("internal:attr=[placeholder={}]", quote(text, false))
            }
            Self::Label { label, exact } => format!("internal:label={}", quote(label, *exact)),
            Self::Role { role, name: None } => format!("internal:role={role}"),
            Self::Role {
                role,
                name: Some(name),
            } => format!("internal:role={role}[name={}]", quote(name, false)),
            Self::Css(css) => css.clone(),
            Self::Frame(css) => format!("{css} >> internal:control=enter-frame"),
            Self::Chain(parts) => parts
                .iter()
                .map(Self::selector)
                .collect::<Vec<_>>()
                .join(" >> "),
            Self::First(inner) => format!("{} >> nth=0", inner.selector()),
        }
    }
}

impl std::fmt::Display for UiTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text { text, .. } | Self::Placeholder(text) => write!(f, "{text}"),
            Self::Label { label, .. } => write!(f, "{label}"),
            Self::Role {
                name: Some(name), ..
            } => write!(f, "{name}"),
            Self::First(inner) => write!(f, "{inner}"),
            _ => write!(f, "{}", self.selector()),
        }
    }
}

/// JSON-quote `text` and append Playwright's match-mode suffix
/// (`s` = exact, case-sensitive; `i` = substring, case-insensitive).
fn quote(text: &str, exact: bool) -> String {
    let quoted = serde_json::Value::String(text.to_string()).to_string();
    format!("{quoted}{}", if exact { "s" } else { "i" })
}
