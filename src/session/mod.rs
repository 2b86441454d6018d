//! One round of the guessing game as a state machine.
//!
//! A [GuessSession] walks the tree from the root, asks the question of every
//! internal node it passes and finally guesses the character at a leaf. A
//! wrong guess makes it ask for a distinguishing question and the missing
//! character, and [teach](DecisionTree::teach)es the tree.
//!
//! ```text
//! Asking(node) --y/n--> Asking(child) | Confirming(leaf)
//! Confirming(leaf) --y--> Done
//! Confirming(leaf) --n--> Teaching(leaf) --question--> --name--> Done
//! ```
//!
//! The session never reads or prints anything itself: callers show
//! [`prompt`](GuessSession::prompt) and feed each input line to
//! [`answer`](GuessSession::answer).

use crate::model::teach::validate_text;
use crate::model::{DecisionTree, NodeIndex, TeachError, TeachOutcome};
use thiserror::Error;

// =#========================================================================#=
// ANSWER
// =#========================================================================#=
/// A yes/no answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Answer {
    Yes,
    No,
}

impl Answer {
    /// Parses `y`, `yes`, `n` or `no` (case-insensitive, surrounding
    /// whitespace ignored).
    ///
    /// # Example
    /// ```
    /// use akitree::session::Answer;
    ///
    /// assert_eq!(Answer::parse(" Yes "), Some(Answer::Yes));
    /// assert_eq!(Answer::parse("n"), Some(Answer::No));
    /// assert_eq!(Answer::parse("maybe"), None);
    /// ```
    pub fn parse(line: &str) -> Option<Answer> {
        let line = line.trim();
        if line.eq_ignore_ascii_case("y") || line.eq_ignore_ascii_case("yes") {
            Some(Answer::Yes)
        } else if line.eq_ignore_ascii_case("n") || line.eq_ignore_ascii_case("no") {
            Some(Answer::No)
        } else {
            None
        }
    }
}

// =#========================================================================#=
// STATE & ERRORS
// =#========================================================================#=
/// How a finished session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The guess at this leaf was right
    Guessed(NodeIndex),
    /// The guess was wrong and the tree learned the new character
    Learned(TeachOutcome),
}

/// State of a [GuessSession].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    /// Waiting for the answer to the question at this internal node
    Asking(NodeIndex),
    /// Waiting for confirmation of the guess at this leaf
    Confirming(NodeIndex),
    /// Guess was wrong; collecting the distinguishing question (first) and
    /// the name of the character (second)
    Teaching {
        leaf: NodeIndex,
        question: Option<String>,
    },
    /// Terminal state
    Done(Outcome),
}

/// Input a [GuessSession] could not use; the state is unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("Answer y or n, not {0:?}")]
    InvalidAnswer(String),
    #[error("The session is already finished")]
    Finished,
    #[error(transparent)]
    Teach(#[from] TeachError),
}

// =#========================================================================#=
// GUESS SESSION
// =#========================================================================$=
/// A single guessing round on a borrowed tree.
///
/// # Example
/// ```
/// use akitree::format::parse_str;
/// use akitree::session::{GuessSession, Outcome, SessionState};
///
/// let mut tree = parse_str(r#"{"has wings"{"bird"}{"dog"}}"#).unwrap();
/// let mut session = GuessSession::new(&mut tree);
///
/// assert_eq!(session.prompt().unwrap(), "has wings? (y or n): ");
/// session.answer("n").unwrap();
/// assert_eq!(session.prompt().unwrap(), "Is it dog? (y or n): ");
/// session.answer("n").unwrap();
/// session.answer("has fur").unwrap();
/// session.answer("cat").unwrap();
/// assert!(matches!(session.state(), SessionState::Done(Outcome::Learned(_))));
///
/// assert_eq!(tree.num_nodes(), 5);
/// ```
#[derive(Debug)]
pub struct GuessSession<'a> {
    tree: &'a mut DecisionTree,
    state: SessionState,
}

impl<'a> GuessSession<'a> {
    /// Starts a session at the root of `tree`.
    pub fn new(tree: &'a mut DecisionTree) -> Self {
        let state = arrive_at(tree, tree.root_index());
        GuessSession { tree, state }
    }

    /// Returns the current state.
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Returns the tree this session plays on.
    pub fn tree(&self) -> &DecisionTree {
        self.tree
    }

    /// Returns `true` once the session reached [SessionState::Done].
    pub fn is_done(&self) -> bool {
        matches!(self.state, SessionState::Done(_))
    }

    /// Returns the outcome of a finished session.
    pub fn outcome(&self) -> Option<Outcome> {
        match self.state {
            SessionState::Done(outcome) => Some(outcome),
            _ => None,
        }
    }

    /// Returns the text to show before reading the next line, or `None` once
    /// the session is done.
    pub fn prompt(&self) -> Option<String> {
        match &self.state {
            SessionState::Asking(node) => {
                let question = self.tree.label(*node);
                let mark = if question.ends_with('?') { "" } else { "?" };
                Some(format!("{question}{mark} (y or n): "))
            }
            SessionState::Confirming(leaf) => {
                Some(format!("Is it {}? (y or n): ", self.tree.label(*leaf)))
            }
            SessionState::Teaching { leaf, question: None } => Some(format!(
                "Please, write a property that {} has but your character does not: ",
                self.tree.label(*leaf)
            )),
            SessionState::Teaching { question: Some(_), .. } => {
                Some("Please, write your character: ".to_string())
            }
            SessionState::Done(_) => None,
        }
    }

    /// Feeds one input line to the session and returns the new state.
    ///
    /// # Errors
    /// * [SessionError::InvalidAnswer] - a yes/no was expected
    /// * [SessionError::Teach] - the question or name cannot be stored
    /// * [SessionError::Finished] - the session is already done
    ///
    /// The state does not change on error, so the caller can prompt again.
    pub fn answer(&mut self, line: &str) -> Result<&SessionState, SessionError> {
        let next = match &self.state {
            SessionState::Asking(node) => {
                let (yes, no) = match self.tree.node(*node).children() {
                    Some(children) => children,
                    None => unreachable!("Asking state always holds an internal node"),
                };
                let child = match parse_answer(line)? {
                    Answer::Yes => yes,
                    Answer::No => no,
                };
                arrive_at(self.tree, child)
            }
            SessionState::Confirming(leaf) => match parse_answer(line)? {
                Answer::Yes => SessionState::Done(Outcome::Guessed(*leaf)),
                Answer::No => SessionState::Teaching {
                    leaf: *leaf,
                    question: None,
                },
            },
            SessionState::Teaching {
                leaf,
                question: None,
            } => {
                let question = validate_text(line, TeachError::EmptyQuestion)?;
                SessionState::Teaching {
                    leaf: *leaf,
                    question: Some(question.to_string()),
                }
            }
            SessionState::Teaching {
                leaf,
                question: Some(question),
            } => {
                let outcome = self.tree.teach(*leaf, question, line)?;
                SessionState::Done(Outcome::Learned(outcome))
            }
            SessionState::Done(_) => return Err(SessionError::Finished),
        };

        tracing::debug!(from = ?self.state, to = ?next, "Session transition");
        self.state = next;
        Ok(&self.state)
    }
}

/// State for reaching `node`: ask its question, or guess if it is a leaf.
fn arrive_at(tree: &DecisionTree, node: NodeIndex) -> SessionState {
    if tree.is_leaf(node) {
        SessionState::Confirming(node)
    } else {
        SessionState::Asking(node)
    }
}

fn parse_answer(line: &str) -> Result<Answer, SessionError> {
    Answer::parse(line).ok_or_else(|| SessionError::InvalidAnswer(line.trim().to_string()))
}
