//! Trivia quiz use-cases.

use crate::derive::trivia::TriviaProgress;
use crate::model::question::Question;
use crate::reactive::{AsyncResult, FetchController, FetchTicket, Producer};

/// The question service takes no parameters, so every fetch uses the unit key.
pub struct TriviaService {
    questions: FetchController<(), Vec<Question>>,
}

impl TriviaService {
    /// Must be called inside a tokio runtime.
    pub fn new(api: impl Producer<(), Vec<Question>> + 'static) -> Self {
        Self {
            questions: FetchController::new("trivia", api),
        }
    }

    pub fn load(&self) -> FetchTicket {
        self.questions.fetch(())
    }

    pub fn questions(&self) -> &FetchController<(), Vec<Question>> {
        &self.questions
    }

    pub fn question_count(&self) -> AsyncResult<usize> {
        self.questions.current().map(|questions| questions.len())
    }

    /// Starts a quiz over the loaded questions. `None` until loaded.
    pub fn start_quiz(&self) -> Option<TriviaProgress> {
        self.questions
            .current()
            .into_result()?
            .ok()
            .map(TriviaProgress::new)
    }
}
