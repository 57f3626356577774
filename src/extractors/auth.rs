use actix_web::{dev::Payload, web, FromRequest, HttpRequest};
use futures::future::{ready, Ready};
use secrecy::Secret;
use uuid::Uuid;

use crate::auth::{decode_token, extract_token};
use crate::errors::AppError;

/// Extractor that validates the bearer JWT and yields the caller's user id.
///
/// Handlers never read an owner id from the path, query or body.
pub struct AuthenticatedUser {
    pub user_id: Uuid,
}

impl AuthenticatedUser {
    fn from_http(req: &HttpRequest) -> Result<Self, AppError> {
        let jwt_secret = req
            .app_data::<web::Data<Secret<String>>>()
            .ok_or_else(|| AppError::InternalError("JWT secret not configured".to_string()))?;

        let token = extract_token(req)?;
        let claims = decode_token(&token, jwt_secret.get_ref())?;

        Ok(AuthenticatedUser {
            user_id: claims.sub,
        })
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(Self::from_http(req))
    }
}
