//! Quiz progress over a fetched question list.

use crate::model::question::Question;

/// Result of answering the current question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerOutcome {
    Correct,
    Incorrect,
    /// No question at the current position.
    NoQuestion,
}

/// Position, answers and score for one quiz run.
///
/// Answering the same question again replaces the earlier answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriviaProgress {
    questions: Vec<Question>,
    index: usize,
    answers: Vec<Option<bool>>,
}

impl TriviaProgress {
    pub fn new(questions: Vec<Question>) -> Self {
        let answers = vec![None; questions.len()];
        Self {
            questions,
            index: 0,
            answers,
        }
    }

    pub fn total(&self) -> usize {
        self.questions.len()
    }

    /// Zero-based position of the current question.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn current(&self) -> Option<&Question> {
        self.questions.get(self.index)
    }

    pub fn answer(&mut self, choice: usize) -> AnswerOutcome {
        let Some(question) = self.questions.get(self.index) else {
            return AnswerOutcome::NoQuestion;
        };
        let correct = question.is_correct_choice(choice);
        self.answers[self.index] = Some(correct);
        if correct {
            AnswerOutcome::Correct
        } else {
            AnswerOutcome::Incorrect
        }
    }

    /// Moves to the next question. Returns `false` at the end of the list.
    pub fn advance(&mut self) -> bool {
        if self.index + 1 >= self.questions.len() {
            return false;
        }
        self.index += 1;
        true
    }

    pub fn score(&self) -> usize {
        self.answers.iter().filter(|answer| **answer == Some(true)).count()
    }

    pub fn answered(&self) -> usize {
        self.answers.iter().filter(|answer| answer.is_some()).count()
    }

    pub fn is_complete(&self) -> bool {
        self.answered() == self.total()
    }
}
