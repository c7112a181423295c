use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use matchday_server_app::domain::error::MatchError;
use serde_json::json;

#[derive(Debug)]
pub enum ApiError {
    Match(MatchError),
    Unauthorized(String),
}

impl From<MatchError> for ApiError {
    fn from(err: MatchError) -> Self {
        ApiError::Match(err)
    }
}

pub fn status_for(err: &MatchError) -> StatusCode {
    match err {
        MatchError::InvalidState(_) => StatusCode::BAD_REQUEST,
        MatchError::Forbidden(_) => StatusCode::FORBIDDEN,
        MatchError::NotFound(_) => StatusCode::NOT_FOUND,
        MatchError::Conflict(_) => StatusCode::CONFLICT,
        MatchError::InsufficientPlayers { .. } | MatchError::InvalidInput(_) => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        MatchError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::Match(err) => {
                let status = status_for(&err);
                if status == StatusCode::INTERNAL_SERVER_ERROR {
                    log::error!("Request failed: {}", err);
                    (status, "Internal server error".to_string())
                } else {
                    let message = match err {
                        MatchError::InvalidState(msg)
                        | MatchError::NotFound(msg)
                        | MatchError::Forbidden(msg)
                        | MatchError::Conflict(msg)
                        | MatchError::InvalidInput(msg) => msg,
                        other => other.to_string(),
                    };
                    (status, message)
                }
            }
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg),
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            status_for(&MatchError::InvalidState("x".into())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_for(&MatchError::Forbidden("x".into())),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            status_for(&MatchError::NotFound("x".into())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_for(&MatchError::Conflict("x".into())),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status_for(&MatchError::InsufficientPlayers {
                available: 1,
                required: 2
            }),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            status_for(&MatchError::Storage("x".into())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
