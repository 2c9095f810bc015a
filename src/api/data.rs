use std::sync::Arc;

use axum::{
    body::Body,
    extract::{Extension, FromRequest, Query, RequestParts},
    http::{header, HeaderMap, Method, Request, StatusCode},
    response::{IntoResponse, Response},
};
use serde::Deserialize;

use crate::{
    auth::TokenValidator,
    config,
    error::Result,
    model::AccessRight,
    store::UsersStore,
    utility::action,
};

use super::{finish, AppState};

pub async fn controller(Extension(state): Extension<AppState>, req: Request<Body>) -> Response {
    finish(
        DataHandler::new(req, state.token_validator, state.users)
            .handle_request()
            .await,
    )
}

#[derive(Debug, Deserialize)]
struct UsersQuery {
    name: Option<String>,
}

/// Token id presented in the authorization header, with or without a
/// `Bearer` scheme.
fn presented_token(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let token = value.strip_prefix(config::BEARER_PREFIX).unwrap_or(value).trim();
    (!token.is_empty()).then(|| token.to_string())
}

fn unauthorized() -> Response {
    action::Reject(StatusCode::UNAUTHORIZED, config::UNAUTHORIZED_OPERATION).into_response()
}

/// Terminates one authorized user query.
pub struct DataHandler {
    request: RequestParts<Body>,
    token_validator: Arc<dyn TokenValidator>,
    users: Arc<dyn UsersStore>,
}

impl DataHandler {
    pub fn new(
        request: Request<Body>,
        token_validator: Arc<dyn TokenValidator>,
        users: Arc<dyn UsersStore>,
    ) -> Self {
        Self {
            request: RequestParts::new(request),
            token_validator,
            users,
        }
    }

    /// `None` for methods other than OPTIONS and GET.
    pub async fn handle_request(mut self) -> Option<Response> {
        let method = self.request.method().clone();
        match method {
            Method::OPTIONS => Some(action::Preflight.into_response()),
            Method::GET => Some(match self.handle_get().await {
                Ok(response) => response,
                Err(err) => internal_error!(err).into_response(),
            }),
            _ => None,
        }
    }

    async fn handle_get(&mut self) -> Result<Response> {
        let token_id = match presented_token(self.request.headers()) {
            Some(token_id) => token_id,
            None => return Ok(unauthorized()),
        };

        let rights = self.token_validator.validate_token(&token_id).await?;
        if !rights.grants(AccessRight::Read) {
            tracing::debug!("token without read access ({:?})", rights.state);
            return Ok(unauthorized());
        }

        let name = Query::<UsersQuery>::from_request(&mut self.request)
            .await
            .ok()
            .and_then(|Query(query)| query.name)
            .filter(|name| !name.is_empty());
        let name = match name {
            Some(name) => name,
            None => {
                return Ok(
                    action::Reject(StatusCode::BAD_REQUEST, config::MISSING_NAME_PARAMETER)
                        .into_response(),
                )
            }
        };

        let users = self.users.get_users_by_name(&name).await?;
        Ok(action::List(users).into_response())
    }
}
