//! Colored terminal output for progress and summaries.
//!
//! Everything goes to stderr so stdout stays clean for piping.

use console::{Style, Term};

/// Width of the banner rule.
const RULE_WIDTH: usize = 60;

/// Terminal output formatter.
pub(crate) struct Output {
    term: Term,
    green: Style,
    yellow: Style,
    red: Style,
    title: Style,
}

impl Output {
    /// Create a new output formatter.
    #[must_use]
    pub(crate) fn new() -> Self {
        Self {
            term: Term::stderr(),
            green: Style::new().green(),
            yellow: Style::new().yellow(),
            red: Style::new().red(),
            title: Style::new().cyan().bold(),
        }
    }

    /// Print a plain line.
    pub(crate) fn info(&self, msg: &str) {
        self.line(msg);
    }

    /// Print a success line (green).
    pub(crate) fn success(&self, msg: &str) {
        self.styled(&self.green, msg);
    }

    /// Print a warning line (yellow).
    pub(crate) fn warning(&self, msg: &str) {
        self.styled(&self.yellow, msg);
    }

    /// Print an error line (red).
    pub(crate) fn error(&self, msg: &str) {
        self.styled(&self.red, msg);
    }

    /// Print a title framed by horizontal rules.
    pub(crate) fn banner(&self, title: &str) {
        let rule = "=".repeat(RULE_WIDTH);
        self.line(&rule);
        self.styled(&self.title, title);
        self.line(&rule);
    }

    fn styled(&self, style: &Style, msg: &str) {
        self.line(&style.apply_to(msg).to_string());
    }

    fn line(&self, msg: &str) {
        // Output is best-effort; a closed stderr must not abort the command.
        let _ = self.term.write_line(msg);
    }
}
