use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;

/// Handler error, rendered as a plain-text body with `code` as the status
#[derive(Debug)]
pub struct Error {
    pub code: StatusCode,
    pub message: String,
}

impl Error {
    pub fn new(code: StatusCode, message: &str) -> Self {
        Self {
            code,
            message: message.to_owned(),
        }
    }

    pub fn not_found(message: String) -> Self {
        Self {
            code: StatusCode::NOT_FOUND,
            message,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        (self.code, self.message).into_response()
    }
}

impl From<sqlx::error::Error> for Error {
    fn from(error: sqlx::error::Error) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, &error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn renders_status_and_plain_text_body() {
        let response = Error::not_found("User not found: 7".to_owned()).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&body[..], b"User not found: 7");
    }

    #[test]
    fn storage_errors_map_to_internal_server_error() {
        let error = Error::from(sqlx::Error::RowNotFound);
        assert_eq!(error.code, StatusCode::INTERNAL_SERVER_ERROR);
    }
}
