//! Trivia question as returned by the remote question service.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub question: String,
    pub answer: String,
    pub category: String,
    pub choices: Vec<String>,
}

impl Question {
    /// Returns whether the choice at `index` is the correct answer.
    ///
    /// Out-of-range indexes are never correct.
    pub fn is_correct_choice(&self, index: usize) -> bool {
        self.choices
            .get(index)
            .is_some_and(|choice| *choice == self.answer)
    }
}
