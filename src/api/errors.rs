use serde::{Deserialize, Serialize};

use crate::engine::{EngineError, ErrorClass};

/// Ошибки внешнего API (то, что отдаём клиенту).
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum ApiError {
    /// Неправильные входные данные (например, битый JSON).
    BadRequest(String),

    /// Движок отклонил команду.
    Rejected { class: ErrorClass, message: String },
}

impl ApiError {
    /// Можно ли повторить команду с другими аргументами.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            ApiError::BadRequest(_)
                | ApiError::Rejected {
                    class: ErrorClass::UserInput,
                    ..
                }
        )
    }
}

impl From<EngineError> for ApiError {
    fn from(err: EngineError) -> Self {
        ApiError::Rejected {
            class: err.class(),
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::BadRequest(err.to_string())
    }
}
