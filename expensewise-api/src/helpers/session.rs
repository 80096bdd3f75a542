use actix_web::dev::Payload;
use actix_web::http::header::AUTHORIZATION;
use actix_web::{web, FromRequest, HttpRequest};
use futures::future::LocalBoxFuture;
use shared_types::{Session, User};
use std::sync::Arc;

use crate::database::{sessions, Database};
use crate::error::ApiError;

/// The authenticated user behind a request's `Authorization: Bearer` token.
///
/// Taking this as a handler argument makes the route require a live session.
pub struct SessionContext {
    pub user: User,
    pub session: Session,
}

pub fn bearer_token(req: &HttpRequest) -> Option<String> {
    let value = req.headers().get(AUTHORIZATION)?.to_str().ok()?;
    let token = value.strip_prefix("Bearer ")?.trim();
    (!token.is_empty()).then(|| token.to_string())
}

impl FromRequest for SessionContext {
    type Error = ApiError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let token = bearer_token(req);
        let database = req.app_data::<web::Data<Arc<Database>>>().cloned();

        Box::pin(async move {
            let token =
                token.ok_or_else(|| ApiError::Unauthorized("Authentication required".to_string()))?;
            let database = database
                .ok_or_else(|| ApiError::Internal("Database is not configured".to_string()))?;

            let now = chrono::Utc::now().timestamp();
            match sessions::get_session_user(database.async_connection.clone(), &token, now).await? {
                Some((user, session)) => Ok(SessionContext { user, session }),
                None => Err(ApiError::Unauthorized(
                    "Session expired or invalid".to_string(),
                )),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[test]
    fn test_bearer_token_parsing() {
        let req = TestRequest::default()
            .insert_header((AUTHORIZATION, "Bearer abc123"))
            .to_http_request();
        assert_eq!(bearer_token(&req).as_deref(), Some("abc123"));

        let req = TestRequest::default()
            .insert_header((AUTHORIZATION, "Basic abc123"))
            .to_http_request();
        assert!(bearer_token(&req).is_none());

        let req = TestRequest::default()
            .insert_header((AUTHORIZATION, "Bearer   "))
            .to_http_request();
        assert!(bearer_token(&req).is_none());

        assert!(bearer_token(&TestRequest::default().to_http_request()).is_none());
    }
}
