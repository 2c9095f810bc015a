use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serializer;

macro_rules! internal_error {
    ($err:expr) => {{
        let err = $err;
        tracing::error!("{:?}", err);
        (
            axum::http::StatusCode::INTERNAL_SERVER_ERROR,
            format!("{}{}", $crate::config::INTERNAL_ERROR_PREFIX, err),
        )
    }};
}

/// Writes a timestamp the way `Date.prototype.toJSON` does, e.g.
/// `1970-01-01T01:00:00.000Z`.
pub fn serialize_iso_millis<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Millis, true))
}

pub mod action {
    use axum::{http::StatusCode, response::IntoResponse, Json};
    use serde::Serialize;

    pub struct List<T>(pub Vec<T>);
    impl<T> IntoResponse for List<T>
    where
        T: Serialize,
    {
        fn into_response(self) -> axum::response::Response {
            let Self(values) = self;
            (StatusCode::OK, Json(values)).into_response()
        }
    }

    pub struct Create<T>(pub T);
    impl<T> IntoResponse for Create<T>
    where
        T: Serialize,
    {
        fn into_response(self) -> axum::response::Response {
            let Self(value) = self;
            (StatusCode::CREATED, Json(value)).into_response()
        }
    }

    /// Bare 200, used for preflight requests.
    pub struct Preflight;
    impl IntoResponse for Preflight {
        fn into_response(self) -> axum::response::Response {
            StatusCode::OK.into_response()
        }
    }

    pub struct Reject(pub StatusCode, pub &'static str);
    impl IntoResponse for Reject {
        fn into_response(self) -> axum::response::Response {
            let Self(status, message) = self;
            (status, message).into_response()
        }
    }
}
