//! Styles for query reports and import feedback
//!
//! Reports go to stdout and diagnostics to stderr, so each stream gets its
//! own theme. A stream that is not a terminal is always plain, which keeps
//! piped reports byte-identical to [`QueryOutcome::render`].
//!
//! [`QueryOutcome::render`]: crate::QueryOutcome::render

use console::Term;
use owo_colors::Style;
use std::sync::OnceLock;

static STDOUT_THEME: OnceLock<Theme> = OnceLock::new();
static STDERR_THEME: OnceLock<Theme> = OnceLock::new();

#[derive(Debug, Clone, Copy)]
pub struct Theme {
    /// "X interacts with Y" headline
    pub pair: Style,
    /// Interaction description under the headline
    pub description: Style,
    /// Name missing from the database
    pub unknown: Style,
    /// Import and stats banners
    pub banner: Style,
    pub done: Style,
    pub failure: Style,
    /// Labels of key/value lines
    pub label: Style,
}

impl Theme {
    pub fn for_term(term: &Term) -> Self {
        if term.is_term() && console::colors_enabled() {
            Self::colored()
        } else {
            Self::plain()
        }
    }

    pub fn colored() -> Self {
        Self {
            pair: Style::new().yellow().bold(),
            description: Style::new(),
            unknown: Style::new().red().bold(),
            banner: Style::new().cyan().bold(),
            done: Style::new().green().bold(),
            failure: Style::new().red().bold(),
            label: Style::new().bright_black(),
        }
    }

    pub fn plain() -> Self {
        let none = Style::new();
        Self {
            pair: none,
            description: none,
            unknown: none,
            banner: none,
            done: none,
            failure: none,
            label: none,
        }
    }
}

pub fn stdout_theme() -> &'static Theme {
    STDOUT_THEME.get_or_init(|| Theme::for_term(&Term::stdout()))
}

pub fn stderr_theme() -> &'static Theme {
    STDERR_THEME.get_or_init(|| Theme::for_term(&Term::stderr()))
}
