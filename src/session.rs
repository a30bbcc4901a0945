use std::collections::VecDeque;

use crate::{
    Evaluation, Evaluator,
    i18n::{Language, Messages},
    util::num::format_number,
};

/// Number of successful lines a session remembers by default.
pub const DEFAULT_HISTORY: usize = 50;

/// What the front end should do after a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Print the text and keep reading.
    Output(String),
    /// Print nothing and keep reading.
    Silent,
    /// Print the text and stop.
    Exit(String),
}

/// One interactive calculator session.
///
/// A session owns an [`Evaluator`] for its whole lifetime, so assignments
/// persist from line to line. It never touches a terminal: the front end
/// passes each line to [`Session::handle`] and prints the [`Reply`].
///
/// # Example
/// ```
/// use calcbox::{
///     i18n::Language,
///     session::{Reply, Session},
/// };
///
/// let mut session = Session::new(Language::En);
/// assert_eq!(session.handle("x = 2.5"), Reply::Output("x = 2.5".to_string()));
/// assert_eq!(session.handle("x * 2"), Reply::Output("5".to_string()));
/// assert_eq!(session.handle("exit"), Reply::Exit("Goodbye!".to_string()));
/// ```
#[derive(Debug, Clone)]
pub struct Session {
    evaluator: Evaluator,
    language:  Language,
    history:   VecDeque<(String, f64)>,
    capacity:  usize,
}

impl Session {
    /// Creates a session remembering the last [`DEFAULT_HISTORY`] lines.
    #[must_use]
    pub fn new(language: Language) -> Self {
        Self::with_capacity(language, DEFAULT_HISTORY)
    }

    /// Creates a session remembering the last `capacity` successful lines.
    #[must_use]
    pub fn with_capacity(language: Language, capacity: usize) -> Self {
        Self { evaluator: Evaluator::new(),
               language,
               history: VecDeque::with_capacity(capacity),
               capacity }
    }

    #[must_use]
    pub const fn evaluator(&self) -> &Evaluator {
        &self.evaluator
    }

    /// The line printed when the session starts.
    #[must_use]
    pub const fn welcome(&self) -> &'static str {
        self.messages().welcome
    }

    /// The line printed when the session ends.
    #[must_use]
    pub const fn goodbye(&self) -> &'static str {
        self.messages().goodbye
    }

    /// The remembered lines with their values, oldest first.
    pub fn history(&self) -> impl Iterator<Item = (&str, f64)> {
        self.history.iter().map(|(line, value)| (line.as_str(), *value))
    }

    /// Handles one input line.
    ///
    /// Blank lines are ignored. The help, history and exit commands of the
    /// session's language are matched case-insensitively. Anything else is
    /// evaluated: an assignment replies `name = value`, an expression its
    /// value, and a failure `Error: <message>`. Only successful lines are
    /// remembered, and a failure never ends the session.
    pub fn handle(&mut self, line: &str) -> Reply {
        let line = line.trim();
        if line.is_empty() {
            return Reply::Silent;
        }

        let messages = self.messages();
        if Language::matches(messages.exit_commands, line) {
            return Reply::Exit(messages.goodbye.to_string());
        }
        if Language::matches(messages.help_commands, line) {
            return Reply::Output(messages.help.to_string());
        }
        if Language::matches(messages.history_commands, line) {
            return Reply::Output(self.render_history());
        }

        match self.evaluator.eval_line(line) {
            Ok(Evaluation { value, name }) => {
                self.remember(line, value);
                let shown = format_number(value);
                Reply::Output(match name {
                                  Some(name) => format!("{name} = {shown}"),
                                  None => shown,
                              })
            },
            Err(err) => {
                tracing::debug!(%err, line, "line failed");
                Reply::Output(format!("{}{}", messages.error_prefix, self.language.render(&err)))
            },
        }
    }

    const fn messages(&self) -> &'static Messages {
        self.language.messages()
    }

    fn remember(&mut self, line: &str, value: f64) {
        if self.capacity == 0 {
            return;
        }
        if self.history.len() == self.capacity {
            self.history.pop_front();
        }
        self.history.push_back((line.to_string(), value));
    }

    fn render_history(&self) -> String {
        if self.history.is_empty() {
            return self.messages().empty_history.to_string();
        }
        self.history
            .iter()
            .enumerate()
            .map(|(i, (line, value))| format!("{:02}. {line} = {}", i + 1, format_number(*value)))
            .collect::<Vec<_>>()
            .join("\n")
    }
}
