//! Custom Axum extractors

use axum::body::Bytes;
use axum::extract::rejection::BytesRejection;
use axum::extract::{FromRequest, Request};
use axum::http::header::CONTENT_TYPE;
use axum::http::HeaderMap;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// JSON body that never rejects on content.
///
/// A missing or non-JSON content type, an empty body, malformed JSON or a
/// body of the wrong shape all yield `T::default()`, so handlers apply their
/// own validation to whatever arrived instead of returning a framework error.
pub struct LenientJson<T>(pub T);

impl<T, S> FromRequest<S> for LenientJson<T>
where
    T: DeserializeOwned + Default,
    S: Send + Sync,
{
    type Rejection = BytesRejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_json = is_json_content_type(req.headers());
        let bytes = Bytes::from_request(req, state).await?;

        if !is_json || bytes.is_empty() {
            return Ok(Self(T::default()));
        }

        Ok(Self(from_object_body(&bytes)))
    }
}

/// Deserialize `T` from a JSON object body; anything else yields `T::default()`.
///
/// Derived struct deserializers also accept sequences, so the object check
/// comes first to keep `["a","b"]` from filling fields positionally.
fn from_object_body<T>(bytes: &[u8]) -> T
where
    T: DeserializeOwned + Default,
{
    let value = match serde_json::from_slice::<Value>(bytes) {
        Ok(value @ Value::Object(_)) => value,
        Ok(_) => {
            tracing::debug!("Ignoring JSON body that is not an object");
            return T::default();
        }
        Err(e) => {
            tracing::debug!("Ignoring unparseable JSON body: {}", e);
            return T::default();
        }
    };

    serde_json::from_value(value).unwrap_or_else(|e| {
        tracing::debug!("Ignoring JSON body of unexpected shape: {}", e);
        T::default()
    })
}

fn is_json_content_type(headers: &HeaderMap) -> bool {
    let Some(content_type) = headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok()) else {
        return false;
    };

    let mime = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    mime == "application/json" || (mime.starts_with("application/") && mime.ends_with("+json"))
}
