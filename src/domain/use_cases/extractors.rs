use actix_web::{FromRequest, HttpRequest, HttpMessage};
use futures_util::future::{ready, Ready};
use crate::{entities::user::CurrentUser, errors::AuthError};

/// Extractor for the authenticated caller placed in the request extensions
/// by the authentication middleware.
/// Returns 401 if the request was not authenticated.
#[derive(Debug)]
pub struct Caller(pub CurrentUser);

impl FromRequest for Caller {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        match req.extensions().get::<CurrentUser>() {
            Some(user) => ready(Ok(Caller(user.clone()))),
            None => ready(Err(AuthError::MissingCredentials.into())),
        }
    }
}
