//! API-gateway style invocation.
//!
//! A gateway hands each handler an event describing one request and expects
//! a `{statusCode, headers, body}` object back. This module turns such an
//! event into an `http::Request`, drives it through the same axum router the
//! HTTP listener uses, and flattens the response back into the gateway shape.
//!
//! Two event styles are accepted for the method:
//! - REST style: top-level `httpMethod`
//! - HTTP style: `requestContext.http.method`

use std::collections::{BTreeMap, HashMap};

use anyhow::Context;
use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Method, Request},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tower::ServiceExt;
use url::Url;

use crate::error::MovementError;
use crate::middleware::cors;
use crate::store::{SharedLocationStore, SharedMovementStore};
use crate::{location_routes, movement_routes};

/// Inbound request description.
///
/// # Example
///
/// ```json
/// {
///   "httpMethod": "PUT",
///   "pathParameters": { "movement_id": "m-1" },
///   "body": "{\"nome\": \"Feira\"}"
/// }
/// ```
///
/// `body` may be a JSON-encoded string or an already structured object.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GatewayEvent {
    #[serde(default)]
    pub http_method: Option<String>,

    #[serde(default)]
    pub request_context: Option<RequestContext>,

    #[serde(default)]
    pub path_parameters: Option<HashMap<String, String>>,

    #[serde(default)]
    pub body: Option<Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RequestContext {
    #[serde(default)]
    pub http: Option<HttpContext>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct HttpContext {
    #[serde(default)]
    pub method: Option<String>,
}

impl GatewayEvent {
    /// Request method, from `httpMethod` first and `requestContext.http.method` second.
    pub fn method(&self) -> Option<Method> {
        self.http_method
            .as_deref()
            .or_else(|| self.request_context.as_ref()?.http.as_ref()?.method.as_deref())
            .and_then(|method| Method::from_bytes(method.as_bytes()).ok())
    }

    /// A non-empty path parameter.
    pub fn path_parameter(&self, name: &str) -> Option<&str> {
        self.path_parameters
            .as_ref()?
            .get(name)
            .map(String::as_str)
            .filter(|value| !value.is_empty())
    }

    /// The body as JSON text; structured bodies are re-encoded.
    fn body_text(&self) -> anyhow::Result<String> {
        match &self.body {
            None | Some(Value::Null) => Ok(String::new()),
            Some(Value::String(text)) => Ok(text.clone()),
            Some(other) => serde_json::to_string(other).context("re-encoding event body"),
        }
    }
}

/// Outbound response description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GatewayResponse {
    pub status_code: u16,
    pub headers: BTreeMap<String, String>,
    pub body: String,
}

impl GatewayResponse {
    /// Flatten an axum response. Header names come out lower-case.
    pub async fn from_response(response: Response) -> anyhow::Result<Self> {
        let status_code = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| {
                value
                    .to_str()
                    .ok()
                    .map(|value| (name.as_str().to_string(), value.to_string()))
            })
            .collect();

        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .context("reading response body")?;
        let body = String::from_utf8(bytes.to_vec()).context("response body is not UTF-8")?;

        Ok(Self {
            status_code,
            headers,
            body,
        })
    }
}

/// Run one event through the movement handler.
///
/// An event without a usable method is answered with the 405 movement body.
pub async fn invoke_movements(
    store: SharedMovementStore,
    event: GatewayEvent,
) -> anyhow::Result<GatewayResponse> {
    let Some(method) = event.method() else {
        tracing::warn!("movement event carries no method");
        let mut response = MovementError::MethodNotSupported.into_response();
        cors::MOVEMENTS.apply(response.headers_mut());
        return GatewayResponse::from_response(response).await;
    };

    let mut url = Url::parse("http://gateway/movements").context("base url")?;
    if let Some(movement_id) = event.path_parameter("movement_id") {
        url.path_segments_mut()
            .map_err(|_| anyhow::anyhow!("base url cannot take path segments"))?
            .push(movement_id);
    }

    dispatch(movement_routes(store), method, url.path(), event.body_text()?).await
}

/// Run one event through the location handler.
///
/// An event without a method is treated as `GET`.
pub async fn invoke_locations(
    store: SharedLocationStore,
    event: GatewayEvent,
) -> anyhow::Result<GatewayResponse> {
    let method = event.method().unwrap_or(Method::GET);

    dispatch(location_routes(store), method, "/locations", event.body_text()?).await
}

async fn dispatch(
    router: Router,
    method: Method,
    path: &str,
    body: String,
) -> anyhow::Result<GatewayResponse> {
    tracing::debug!(%method, path, "dispatching gateway event");

    let request = Request::builder()
        .method(method)
        .uri(path)
        .body(Body::from(body))
        .context("building request from event")?;
    let response = router.oneshot(request).await?;

    GatewayResponse::from_response(response).await
}
