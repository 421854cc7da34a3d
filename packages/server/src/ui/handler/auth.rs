//! Token extraction from incoming requests.

use std::convert::Infallible;

use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, header::AUTHORIZATION, request::Parts},
};

use crate::domain::Token;

const BEARER_PREFIX: &str = "Bearer ";

/// Token presented in the `Authorization: Bearer <token>` header.
///
/// A missing or malformed header yields an empty token, which the session
/// store rejects like any unknown token. This keeps the error code tied to
/// the operation being called.
#[derive(Debug, Clone)]
pub struct BearerToken(pub Token);

impl<S> FromRequestParts<S> for BearerToken
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(token_from_headers(&parts.headers)))
    }
}

fn token_from_headers(headers: &HeaderMap) -> Token {
    let token = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix(BEARER_PREFIX))
        .map(str::trim)
        .unwrap_or_default();
    Token::new(token)
}
