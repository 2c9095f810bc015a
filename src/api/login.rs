use std::sync::Arc;

use axum::{
    body::{Body, Bytes},
    extract::{Extension, FromRequest, RequestParts},
    http::{Method, Request, StatusCode},
    response::{IntoResponse, Response},
};

use crate::{
    auth::TokenIssuer,
    config,
    error::Result,
    model::Account,
    utility::action,
};

use super::{finish, AppState};

pub async fn controller(Extension(state): Extension<AppState>, req: Request<Body>) -> Response {
    finish(
        LoginHandler::new(req, state.token_issuer)
            .handle_request()
            .await,
    )
}

/// Terminates one login exchange.
pub struct LoginHandler {
    request: RequestParts<Body>,
    authorizer: Arc<dyn TokenIssuer>,
}

impl LoginHandler {
    pub fn new(request: Request<Body>, authorizer: Arc<dyn TokenIssuer>) -> Self {
        Self {
            request: RequestParts::new(request),
            authorizer,
        }
    }

    /// `None` for methods other than OPTIONS and POST.
    pub async fn handle_request(mut self) -> Option<Response> {
        let method = self.request.method().clone();
        match method {
            Method::OPTIONS => Some(action::Preflight.into_response()),
            Method::POST => Some(match self.handle_post().await {
                Ok(response) => response,
                Err(err) => internal_error!(err).into_response(),
            }),
            _ => None,
        }
    }

    async fn handle_post(&mut self) -> Result<Response> {
        let body = Bytes::from_request(&mut self.request).await?;
        let account: Account = serde_json::from_slice(&body)?;

        Ok(match self.authorizer.generate_token(&account).await? {
            Some(token) => action::Create(token).into_response(),
            None => action::Reject(StatusCode::NOT_FOUND, config::WRONG_CREDENTIALS).into_response(),
        })
    }
}
