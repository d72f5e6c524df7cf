//! Mapping engine errors onto HTTP responses

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use gridplay_core::Error;
use serde_json::json;

#[derive(Debug)]
pub enum ApiError {
    Engine(Error),
    LockPoisoned,
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        ApiError::Engine(err)
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Engine(err) => match err {
                Error::IllegalMove { .. } | Error::NotTournamentGame(_) => StatusCode::BAD_REQUEST,
                Error::GameAlreadyOver
                | Error::TournamentCompleted
                | Error::RoundInProgress(_)
                | Error::TournamentGameLocked(_) => StatusCode::CONFLICT,
                Error::UnknownGame(_) | Error::UnknownTournament(_) => StatusCode::NOT_FOUND,
                _ => StatusCode::UNPROCESSABLE_ENTITY,
            },
            ApiError::LockPoisoned => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            ApiError::Engine(err) => err.to_string(),
            ApiError::LockPoisoned => "session state unavailable".to_string(),
        };
        if status.is_server_error() {
            tracing::error!(%message, "Request failed");
        }
        (status, Json(json!({ "error": message }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridplay_core::{GameHandle, IllegalReason, TournamentHandle};

    #[test]
    fn test_status_mapping() {
        let illegal = ApiError::from(Error::IllegalMove {
            index: 4,
            reason: IllegalReason::Occupied,
        });
        assert_eq!(illegal.status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::from(Error::GameAlreadyOver).status(), StatusCode::CONFLICT);
        assert_eq!(
            ApiError::from(Error::UnknownGame(GameHandle(3))).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::from(Error::InvalidRounds(0)).status(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            ApiError::from(Error::RoundInProgress(TournamentHandle(1))).status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ApiError::from(Error::TournamentGameLocked(GameHandle(2))).status(),
            StatusCode::CONFLICT
        );
        assert_eq!(ApiError::LockPoisoned.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
