//! The calculator as a keypad user drives it: an expression built up key by key,
//! previewed after every edit and finally evaluated with `=`.

mod key;
mod preview;

pub use key::Key;
pub use preview::{live_preview, PreviewResult};

use crate::interpreter::angle::AngleMode;
use crate::interpreter::calculate;
use crate::interpreter::error::EvaluationError;
use crate::interpreter::operator::BinaryOperator;
use anyhow::Result;
use log::{debug, trace};
use preview::{ends_with_operator, is_operator_symbol};
use std::fmt;
use std::fmt::Formatter;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Mode {
    Editing,
    /// A result from `=` is on display and no key has been pressed since.
    ResultShown,
}

/// Everything besides the expression text that decides how the next key
/// behaves.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    pub mode: Mode,
    pub angle_mode: AngleMode,
    /// Whether the next invertible function key inserts its inverse.
    pub inverse: bool,
    /// The last successful result, inserted by [`Key::Answer`].
    pub last_answer: String,
}

/// What the delete key does right now.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum DeleteAction {
    DeleteLast,
    ClearAll,
}

impl fmt::Display for DeleteAction {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            DeleteAction::DeleteLast => write!(f, "DEL"),
            DeleteAction::ClearAll => write!(f, "AC"),
        }
    }
}

/// A single calculator session.
///
/// # Examples
///
/// ```
/// use scientific_calculator::{AngleMode, Key, Session};
/// # use anyhow::Result;
///
/// # fn main() -> Result<()> {
/// let mut session = Session::new(AngleMode::Degrees);
/// session.append(Key::Function(scientific_calculator::interpreter::function::Function::Sin));
/// session.append_str("3")?;
/// let preview = session.append_str("0")?;
/// assert_eq!(preview.preview_text, Some("0.5".to_string()));
/// assert_eq!(session.evaluate_final(), Ok("0.5".to_string()));
/// # Ok::<(), anyhow::Error>(()) }
/// ```
#[derive(Debug, Clone)]
pub struct Session {
    expression: String,
    state: SessionState,
}

impl Default for Session {
    fn default() -> Self {
        Session::new(AngleMode::default())
    }
}

impl Session {
    pub fn new(angle_mode: AngleMode) -> Session {
        Session {
            expression: String::new(),
            state: SessionState {
                mode: Mode::Editing,
                angle_mode,
                inverse: false,
                last_answer: "0".to_string(),
            },
        }
    }

    /// Applies a keystroke to the expression and previews the outcome.
    pub fn append(&mut self, key: Key) -> PreviewResult {
        trace!("{:?} pressed on '{}' ({:?})", key, self.expression, self.state.mode);

        if let Key::Answer = key {
            match self.state.mode {
                Mode::ResultShown => self.expression = self.state.last_answer.clone(),
                Mode::Editing => self.expression.push_str(&self.state.last_answer),
            }
            self.state.mode = Mode::Editing;
            return self.preview();
        }

        if self.state.mode == Mode::ResultShown {
            if key.starts_fresh() {
                self.expression.clear();
            }
            self.state.mode = Mode::Editing;
        }

        match key {
            Key::Operator(operator) => self.append_operator(operator),
            key => match key.inverse_text() {
                Some(inverse_text) if self.state.inverse => {
                    self.expression.push_str(inverse_text);
                    self.state.inverse = false;
                }
                _ => self.expression.push_str(&key.text()),
            },
        }
        self.preview()
    }

    /// Parses the key first, see [`Key`] for the accepted names.
    pub fn append_str(&mut self, key: &str) -> Result<PreviewResult> {
        let key = key.parse::<Key>()?;
        Ok(self.append(key))
    }

    fn append_operator(&mut self, operator: BinaryOperator) {
        let symbol = operator.to_string();

        if ends_with_operator(&self.expression) {
            let follows_other_operator = !self.expression.ends_with('-');
            if operator == BinaryOperator::Subtract && follows_other_operator {
                self.expression.push_str(&symbol);
                return;
            }
            let operand_end = self.expression.trim_end_matches(is_operator_symbol).len();
            self.expression.truncate(operand_end);
        }

        if !self.expression.is_empty() || operator == BinaryOperator::Subtract {
            self.expression.push_str(&symbol);
        }
    }

    /// Removes the last character, or everything if a result is on display.
    pub fn delete_or_clear(&mut self) -> PreviewResult {
        match self.delete_action() {
            DeleteAction::ClearAll => {
                trace!("Clearing '{}'", self.expression);
                self.expression.clear();
                self.state.mode = Mode::Editing;
            }
            DeleteAction::DeleteLast => {
                self.expression.pop();
            }
        }
        self.preview()
    }

    /// Cycles RAW → RADIANS → DEGREES → RAW.
    pub fn toggle_angle_mode(&mut self) -> AngleMode {
        self.state.angle_mode = self.state.angle_mode.next();
        debug!("Angle mode is now {}", self.state.angle_mode);
        self.state.angle_mode
    }

    pub fn toggle_inverse(&mut self) -> bool {
        self.state.inverse = !self.state.inverse;
        self.state.inverse
    }

    /// Evaluates the whole expression, as the `=` key does.
    ///
    /// On success the result replaces the expression and becomes the last
    /// answer. On failure nothing changes, so the expression can be corrected.
    pub fn evaluate_final(&mut self) -> Result<String, EvaluationError> {
        match calculate(&self.expression, self.state.angle_mode) {
            Ok(result) => {
                debug!("{} = {}", self.expression, result);
                self.expression = result.clone();
                self.state.last_answer = result.clone();
                self.state.mode = Mode::ResultShown;
                Ok(result)
            }
            Err(error) => {
                debug!("{} failed: {}", self.expression, error);
                Err(error)
            }
        }
    }

    pub fn expression_text(&self) -> &str {
        &self.expression
    }

    /// The live preview, empty when there is nothing to show.
    pub fn preview_text(&self) -> String {
        self.preview().preview_text.unwrap_or_default()
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn delete_action(&self) -> DeleteAction {
        match self.state.mode {
            Mode::Editing => DeleteAction::DeleteLast,
            Mode::ResultShown => DeleteAction::ClearAll,
        }
    }

    fn preview(&self) -> PreviewResult {
        let (preview_text, is_error) = match self.state.mode {
            Mode::ResultShown => (None, false),
            Mode::Editing => match live_preview(&self.expression, self.state.angle_mode) {
                Ok(preview_text) => (preview_text, false),
                Err(error) => {
                    trace!("No preview for '{}': {}", self.expression, error);
                    (None, true)
                }
            },
        };
        PreviewResult {
            expression_text: self.expression.clone(),
            preview_text,
            is_error,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interpreter::function::Function;
    use pretty_assertions::assert_eq;

    fn type_keys(session: &mut Session, keys: &[&str]) -> PreviewResult {
        let mut last = None;
        for key in keys {
            last = Some(session.append_str(key).unwrap());
        }
        last.unwrap()
    }

    #[test]
    fn new_session_starts_empty() {
        let session = Session::default();

        assert_eq!(session.expression_text(), "");
        assert_eq!(session.preview_text(), "");
        assert_eq!(session.state().angle_mode, AngleMode::Raw);
        assert_eq!(session.state().last_answer, "0");
        assert_eq!(session.delete_action(), DeleteAction::DeleteLast);
    }

    #[test]
    fn typing_previews_the_value_so_far() {
        let mut session = Session::default();

        let preview = type_keys(&mut session, &["2", "+", "3", "*", "4"]);

        assert_eq!(
            preview,
            PreviewResult {
                expression_text: "2+3*4".to_string(),
                preview_text: Some("14".to_string()),
                is_error: false,
            }
        );
    }

    #[test]
    fn operator_continues_from_result() {
        let mut session = Session::default();
        type_keys(&mut session, &["2", "+", "2"]);
        assert_eq!(session.evaluate_final(), Ok("4".to_string()));
        assert_eq!(session.delete_action(), DeleteAction::ClearAll);

        type_keys(&mut session, &["+", "3"]);

        assert_eq!(session.expression_text(), "4+3");
        assert_eq!(session.evaluate_final(), Ok("7".to_string()));
    }

    #[test]
    fn digit_after_result_starts_fresh() {
        let mut session = Session::default();
        type_keys(&mut session, &["2", "*", "3"]);
        session.evaluate_final().unwrap();

        type_keys(&mut session, &["5"]);

        assert_eq!(session.expression_text(), "5");
        assert_eq!(session.state().last_answer, "6");
    }

    #[test]
    fn answer_key_inserts_last_result() {
        let mut session = Session::default();
        type_keys(&mut session, &["1", "2"]);
        session.evaluate_final().unwrap();

        type_keys(&mut session, &["ans", "+", "ans"]);

        assert_eq!(session.expression_text(), "12+12");
        assert_eq!(session.preview_text(), "24");
    }

    #[test]
    fn result_shown_has_no_preview() {
        let mut session = Session::default();
        type_keys(&mut session, &["1", "+", "1"]);

        session.evaluate_final().unwrap();

        assert_eq!(session.expression_text(), "2");
        assert_eq!(session.preview_text(), "");
    }

    #[test]
    fn inverse_applies_to_next_function_only() {
        let mut session = Session::default();

        assert!(session.toggle_inverse());
        session.append(Key::Function(Function::Sin));
        assert!(!session.state().inverse);
        session.append(Key::Function(Function::Sin));

        assert_eq!(session.expression_text(), "asin(sin(");
    }

    #[test]
    fn square_root_leaves_inverse_set() {
        let mut session = Session::default();
        session.toggle_inverse();

        type_keys(&mut session, &["√", "log"]);

        assert_eq!(session.expression_text(), "√(10^(");
        assert!(!session.state().inverse);
    }

    #[test]
    fn angle_mode_cycles_back_to_raw() {
        let mut session = Session::default();

        assert_eq!(session.toggle_angle_mode(), AngleMode::Radians);
        assert_eq!(session.toggle_angle_mode(), AngleMode::Degrees);
        assert_eq!(session.toggle_angle_mode(), AngleMode::Raw);
    }

    #[test]
    fn toggling_angle_mode_changes_preview() {
        let mut session = Session::default();
        type_keys(&mut session, &["sin", "9", "0", ")"]);
        let raw_preview = session.preview_text();

        session.toggle_angle_mode();
        session.toggle_angle_mode();

        assert_eq!(raw_preview, "0.8939966636");
        assert_eq!(session.preview_text(), "1");
    }

    #[test]
    fn delete_removes_last_character_while_editing() {
        let mut session = Session::default();
        type_keys(&mut session, &["1", "2", "+"]);

        let preview = session.delete_or_clear();

        assert_eq!(preview.expression_text, "12");
        assert_eq!(preview.preview_text, None);
    }

    #[test]
    fn delete_clears_everything_after_result() {
        let mut session = Session::default();
        type_keys(&mut session, &["9", "-", "1"]);
        session.evaluate_final().unwrap();

        let preview = session.delete_or_clear();

        assert_eq!(preview.expression_text, "");
        assert_eq!(session.delete_action(), DeleteAction::DeleteLast);
        assert_eq!(session.state().last_answer, "8");
    }

    #[test]
    fn only_minus_starts_an_empty_expression() {
        let mut session = Session::default();

        type_keys(&mut session, &["*", "+", "/"]);
        assert_eq!(session.expression_text(), "");

        type_keys(&mut session, &["-", "5"]);
        assert_eq!(session.expression_text(), "-5");
    }

    #[test]
    fn last_operator_wins() {
        let mut session = Session::default();

        type_keys(&mut session, &["5", "+", "*"]);
        assert_eq!(session.expression_text(), "5*");

        type_keys(&mut session, &["-"]);
        assert_eq!(session.expression_text(), "5*-");

        type_keys(&mut session, &["/"]);
        assert_eq!(session.expression_text(), "5/");
    }

    #[test]
    fn minus_after_operator_signs_the_operand() {
        let mut session = Session::default();

        type_keys(&mut session, &["8", "+", "-", "3"]);

        assert_eq!(session.expression_text(), "8+-3");
        assert_eq!(session.evaluate_final(), Ok("5".to_string()));
    }

    #[test]
    fn repeated_minus_is_not_stacked() {
        let mut session = Session::default();

        type_keys(&mut session, &["8", "-", "-"]);

        assert_eq!(session.expression_text(), "8-");
    }

    #[test]
    fn replacing_lone_minus_clears_expression() {
        let mut session = Session::default();

        type_keys(&mut session, &["-", "+"]);

        assert_eq!(session.expression_text(), "");
    }

    #[test]
    fn factorial_domain_error_leaves_session_editing() {
        let mut session = Session::default();
        let preview = type_keys(&mut session, &["2", "1", "!"]);
        assert!(preview.is_error);

        let error = session.evaluate_final().unwrap_err();

        assert_eq!(
            error,
            EvaluationError::FactorialDomain("Factorial too large".to_string())
        );
        assert_eq!(session.expression_text(), "21!");
        assert_eq!(session.state().mode, Mode::Editing);
        assert_eq!(session.state().last_answer, "0");
    }

    #[test]
    fn division_by_zero_keeps_session_usable() {
        let mut session = Session::default();
        let preview = type_keys(&mut session, &["5", "/", "0"]);
        assert!(preview.is_error);

        let error = session.evaluate_final().unwrap_err();
        assert_eq!(error, EvaluationError::DivisionByInfinity);
        assert_eq!(error.display_text(), "∞");

        session.delete_or_clear();
        type_keys(&mut session, &["2"]);
        assert_eq!(session.evaluate_final(), Ok("2.5".to_string()));
    }

    #[test]
    fn unknown_key_is_rejected() {
        let mut session = Session::default();

        session.append_str("sinh").expect_err("Should return Err");

        assert_eq!(session.expression_text(), "");
    }
}
