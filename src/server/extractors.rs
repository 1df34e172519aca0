//! Request extractors

use crate::core::identity::ClientIdentity;
use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest};
use futures::future::{Ready, ready};
use std::convert::Infallible;

fn header<'a>(req: &'a HttpRequest, name: &str) -> Option<&'a str> {
    req.headers().get(name).and_then(|v| v.to_str().ok())
}

/// Caller fingerprint from `x-forwarded-for`, `x-real-ip` and `user-agent`
impl FromRequest for ClientIdentity {
    type Error = Infallible;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(Ok(ClientIdentity::derive(
            header(req, "x-forwarded-for"),
            header(req, "x-real-ip"),
            header(req, "user-agent"),
        )))
    }
}
