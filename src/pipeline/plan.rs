//! Turns an API definition into the concrete requests to send.
//!
//! Without a stored dependency result a definition yields one request built
//! from its static fields. With one, placeholders are substituted; when the
//! URL, parameters or body hold a broadcast placeholder for the dependency and
//! the dependency's data is an array, one request is built per element, each
//! substituted against the single-element view `{"data": [element]}`.

use super::store::ResultStore;
use crate::models::definition::is_absolute_url;
use crate::models::{data_field, ApiDefinition, ApiRequest};
use crate::variables::{contains_broadcast, substitute, substitute_str, value_to_string};
use serde_json::{json, Map, Value};

/// Requests derived from one definition.
#[derive(Debug, Clone, PartialEq)]
pub enum RequestPlan {
    /// One request for the whole definition.
    Single(ApiRequest),
    /// One request per element of the dependency's data array, in array order.
    FanOut(Vec<ApiRequest>),
}

impl RequestPlan {
    pub fn requests(&self) -> &[ApiRequest] {
        match self {
            RequestPlan::Single(request) => std::slice::from_ref(request),
            RequestPlan::FanOut(requests) => requests,
        }
    }

    pub fn is_fan_out(&self) -> bool {
        matches!(self, RequestPlan::FanOut(_))
    }
}

/// Plans the requests for `api` given the results stored so far.
pub fn plan_requests(api: &ApiDefinition, store: &ResultStore) -> RequestPlan {
    let Some(dependency) = api.previous_api_id.as_deref() else {
        return RequestPlan::Single(build_request(api, None));
    };

    let Some(payload) = store.get(dependency) else {
        log::warn!(
            "No stored result for '{}' (dependency of '{}'); sending the request without substitution",
            dependency,
            api.id
        );
        return RequestPlan::Single(build_request(api, None));
    };

    match data_field(payload) {
        Value::Array(items) if references_broadcast(api, dependency) => {
            log::info!(
                "Fanning out '{}' over {} elements of '{}'",
                api.id,
                items.len(),
                dependency
            );
            RequestPlan::FanOut(
                items
                    .iter()
                    .map(|item| {
                        let view = json!({ "data": [item] });
                        build_request(api, Some((dependency, &view)))
                    })
                    .collect(),
            )
        }
        _ => RequestPlan::Single(build_request(api, Some((dependency, payload)))),
    }
}

/// Whether the URL, parameters or body hold a broadcast placeholder for `dependency`.
fn references_broadcast(api: &ApiDefinition, dependency: &str) -> bool {
    if contains_broadcast(&api.url, dependency) {
        return true;
    }

    let parameters = serde_json::to_string(&api.parameters).unwrap_or_default();
    if contains_broadcast(&parameters, dependency) {
        return true;
    }

    api.body
        .as_ref()
        .is_some_and(|body| contains_broadcast(&body.to_string(), dependency))
}

/// Builds one request, substituting placeholders when a previous result is given.
fn build_request(api: &ApiDefinition, previous: Option<(&str, &Value)>) -> ApiRequest {
    let (path, parameters, body) = match previous {
        Some((dependency, payload)) => (
            substitute_str(&api.url, payload, dependency),
            substitute_map(&api.parameters, payload, dependency),
            api.body
                .as_ref()
                .map(|body| substitute(body, payload, dependency)),
        ),
        None => (api.url.clone(), api.parameters.clone(), api.body.clone()),
    };

    let mut request = ApiRequest::new(&api.id, api.method, compose_url(&api.host, &path));

    // Null parameters are omitted, the way form encoders drop unset values.
    request.query = parameters
        .iter()
        .filter(|(_, value)| !value.is_null())
        .map(|(name, value)| (name.clone(), value_to_string(value)))
        .collect();

    request.headers = api
        .headers
        .iter()
        .map(|(name, value)| (name.clone(), value_to_string(value)))
        .collect();

    request.body = body;
    request
}

fn substitute_map(map: &Map<String, Value>, payload: &Value, dependency: &str) -> Map<String, Value> {
    map.iter()
        .map(|(key, value)| (key.clone(), substitute(value, payload, dependency)))
        .collect()
}

/// Composes the request URL from host and path.
///
/// An absolute path wins. Otherwise `https://` is assumed unless the host
/// carries its own scheme.
///
/// ```
/// use api_harvest::pipeline::plan::compose_url;
///
/// assert_eq!(compose_url("api.example.com", "/users"), "https://api.example.com/users");
/// assert_eq!(compose_url("http://localhost:8080/", "users"), "http://localhost:8080/users");
/// assert_eq!(compose_url("ignored", "http://other.test/x"), "http://other.test/x");
/// ```
pub fn compose_url(host: &str, path: &str) -> String {
    let path = path.trim();
    if is_absolute_url(path) {
        return path.to_string();
    }

    let host = host.trim().trim_end_matches('/');
    let base = if host.contains("://") {
        host.to_string()
    } else {
        format!("https://{}", host)
    };

    if path.is_empty() || path.starts_with('/') || path.starts_with('?') {
        format!("{}{}", base, path)
    } else {
        format!("{}/{}", base, path)
    }
}
