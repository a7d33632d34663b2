//! National id resolution for `/patients/{nationalId}` routes.
//!
//! Handlers receive a [`RequestContext`] carrying the matched path parameters and the raw
//! request path. [`resolve_national_id`] prefers the structured parameter and falls back to
//! the trailing segment of the raw path.

use axum::{
    async_trait,
    extract::{FromRequestParts, OriginalUri, Path},
    http::request::Parts,
};
use std::collections::HashMap;
use std::convert::Infallible;

/// Name of the path parameter holding the national id.
pub const NATIONAL_ID_PARAM: &str = "nationalId";

/// Request metadata needed to identify the target patient.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestContext {
    pub path_params: HashMap<String, String>,
    pub raw_path: String,
}

impl RequestContext {
    pub fn new(path_params: HashMap<String, String>, raw_path: impl Into<String>) -> Self {
        Self {
            path_params,
            raw_path: raw_path.into(),
        }
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for RequestContext
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let path_params =
            match Path::<HashMap<String, String>>::from_request_parts(parts, state).await {
                Ok(Path(params)) => params,
                Err(rejection) => {
                    tracing::debug!(%rejection, "no structured path parameters");
                    HashMap::new()
                }
            };

        // Nested routers see a stripped `parts.uri`; the original keeps the full path.
        let raw_path = match parts.extensions.get::<OriginalUri>() {
            Some(OriginalUri(uri)) => uri.path().to_owned(),
            None => parts.uri.path().to_owned(),
        };

        Ok(Self {
            path_params,
            raw_path,
        })
    }
}

/// Returns the national id addressed by a request, if any.
pub fn resolve_national_id(ctx: &RequestContext) -> Option<String> {
    if let Some(national_id) = ctx
        .path_params
        .get(NATIONAL_ID_PARAM)
        .filter(|v| !v.is_empty())
    {
        return Some(national_id.clone());
    }

    trailing_segment(&ctx.raw_path).map(str::to_owned)
}

/// Last path segment after dropping one trailing `/`.
///
/// `None` when that segment is empty.
pub fn trailing_segment(path: &str) -> Option<&str> {
    let path = path.strip_suffix('/').unwrap_or(path);
    let segment = match path.rfind('/') {
        Some(idx) => &path[idx + 1..],
        None => path,
    };
    (!segment.is_empty()).then_some(segment)
}
