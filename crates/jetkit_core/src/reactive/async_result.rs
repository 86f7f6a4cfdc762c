//! Tagged state for an in-progress, succeeded or failed asynchronous value.

use crate::repo::RepoError;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Coarse failure category, used by the UI to pick an inline error message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FetchErrorKind {
    /// Transport failure or remote service error.
    Network,
    /// Payload could not be decoded into the expected shape.
    Decode,
    /// Local store read failed.
    Store,
    /// The producer panicked.
    Panicked,
    Other,
}

impl FetchErrorKind {
    fn as_str(self) -> &'static str {
        match self {
            Self::Network => "network",
            Self::Decode => "decode",
            Self::Store => "store",
            Self::Panicked => "panicked",
            Self::Other => "other",
        }
    }
}

/// Cause carried by `AsyncResult::Failure`.
///
/// Cloneable so one failure can be fanned out to every subscriber.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FetchError {
    kind: FetchErrorKind,
    message: String,
}

impl FetchError {
    pub fn new(kind: FetchErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(FetchErrorKind::Network, message)
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::new(FetchErrorKind::Decode, message)
    }

    pub fn store(message: impl Into<String>) -> Self {
        Self::new(FetchErrorKind::Store, message)
    }

    pub fn kind(&self) -> FetchErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl Display for FetchError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} error: {}", self.kind.as_str(), self.message)
    }
}

impl Error for FetchError {}

impl From<RepoError> for FetchError {
    fn from(value: RepoError) -> Self {
        Self::store(value.to_string())
    }
}

/// State of one asynchronous value.
///
/// There is no "successful but empty" sentinel: data that is not there yet is
/// `Loading`, data that could not be obtained is `Failure`. A successful
/// fetch of an empty list is `Success(vec![])`.
#[derive(Debug, Clone, PartialEq)]
pub enum AsyncResult<T> {
    /// Fetch issued and not resolved. May carry a placeholder to render.
    Loading { placeholder: Option<T> },
    Success(T),
    Failure(FetchError),
}

impl<T> AsyncResult<T> {
    pub fn loading() -> Self {
        Self::Loading { placeholder: None }
    }

    pub fn loading_with(placeholder: T) -> Self {
        Self::Loading {
            placeholder: Some(placeholder),
        }
    }

    pub fn success(value: T) -> Self {
        Self::Success(value)
    }

    pub fn failure(cause: FetchError) -> Self {
        Self::Failure(cause)
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading { .. })
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failure(_))
    }

    /// Returns the payload of a `Success`. Placeholders are not values.
    pub fn value(&self) -> Option<&T> {
        match self {
            Self::Success(value) => Some(value),
            _ => None,
        }
    }

    pub fn placeholder(&self) -> Option<&T> {
        match self {
            Self::Loading { placeholder } => placeholder.as_ref(),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&FetchError> {
        match self {
            Self::Failure(cause) => Some(cause),
            _ => None,
        }
    }

    pub fn as_ref(&self) -> AsyncResult<&T> {
        match self {
            Self::Loading { placeholder } => AsyncResult::Loading {
                placeholder: placeholder.as_ref(),
            },
            Self::Success(value) => AsyncResult::Success(value),
            Self::Failure(cause) => AsyncResult::Failure(cause.clone()),
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> AsyncResult<U> {
        match self {
            Self::Loading { placeholder } => AsyncResult::Loading {
                placeholder: placeholder.map(f),
            },
            Self::Success(value) => AsyncResult::Success(f(value)),
            Self::Failure(cause) => AsyncResult::Failure(cause),
        }
    }

    /// Converts a settled state into a `Result`. Returns `None` while loading.
    pub fn into_result(self) -> Option<Result<T, FetchError>> {
        match self {
            Self::Loading { .. } => None,
            Self::Success(value) => Some(Ok(value)),
            Self::Failure(cause) => Some(Err(cause)),
        }
    }
}

impl<T> Default for AsyncResult<T> {
    fn default() -> Self {
        Self::loading()
    }
}

impl<T> From<Result<T, FetchError>> for AsyncResult<T> {
    fn from(value: Result<T, FetchError>) -> Self {
        match value {
            Ok(value) => Self::Success(value),
            Err(cause) => Self::Failure(cause),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{AsyncResult, FetchError, FetchErrorKind};

    #[test]
    fn default_state_is_loading_without_placeholder() {
        let state: AsyncResult<u32> = AsyncResult::default();
        assert!(state.is_loading());
        assert_eq!(state.placeholder(), None);
        assert_eq!(state.value(), None);
    }

    #[test]
    fn placeholder_is_not_reported_as_value() {
        let state = AsyncResult::loading_with("Loading".to_string());
        assert_eq!(state.placeholder().map(String::as_str), Some("Loading"));
        assert_eq!(state.value(), None);
        assert_eq!(state.into_result(), None);
    }

    #[test]
    fn empty_success_is_distinct_from_loading() {
        let empty: AsyncResult<Vec<u8>> = AsyncResult::success(Vec::new());
        assert!(empty.is_success());
        assert_ne!(empty, AsyncResult::loading());
    }

    #[test]
    fn map_keeps_failure_cause() {
        let failed: AsyncResult<u32> = AsyncResult::failure(FetchError::network("timeout"));
        let mapped = failed.map(|value| value * 2);
        let cause = mapped.error().expect("failure should carry a cause");
        assert_eq!(cause.kind(), FetchErrorKind::Network);
        assert_eq!(cause.message(), "timeout");
    }

    #[test]
    fn from_result_folds_both_arms() {
        let ok: AsyncResult<u8> = Ok(3).into();
        assert_eq!(ok, AsyncResult::success(3));

        let err: AsyncResult<u8> = Err(FetchError::decode("bad json")).into();
        assert!(err.is_failure());
        assert_eq!(
            err.error().map(ToString::to_string).as_deref(),
            Some("decode error: bad json")
        );
    }
}
