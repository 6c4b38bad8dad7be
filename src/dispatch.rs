//! Method dispatch: one inbound request, one record operation.

use axum::http::{Method, StatusCode};

use crate::error::RecordError;
use crate::handlers::{create_handler, delete_handler, get_handler, list_handler, update_handler};
use crate::models::{HandlerRequest, HandlerResponse};
use crate::state::AppState;

pub const UNSUPPORTED_METHOD: &str = "Unsupported HTTP method";

/// Route `request` to the operation for its method and return the response.
///
/// Errors never escape: every failure is turned into a status code and an
/// `"Error: ..."` body.
pub async fn dispatch(state: &AppState, request: HandlerRequest) -> HandlerResponse {
    let store = state.store.as_ref();

    let Ok(method) = Method::from_bytes(request.method().as_bytes()) else {
        tracing::warn!("Rejected unparseable HTTP method: {:?}", request.method());
        return HandlerResponse::message(StatusCode::BAD_REQUEST, UNSUPPORTED_METHOD);
    };

    tracing::debug!("Dispatching {} (id: {:?})", method, request.path_id());

    let result = match method {
        Method::GET => match request.path_id() {
            Some(id) => get_handler(store, id).await,
            None => list_handler(store).await,
        },
        Method::POST => match request.json_object() {
            Ok(payload) => create_handler(store, payload).await,
            Err(e) => Err(e),
        },
        Method::PUT => match request.json_object() {
            Ok(payload) => update_handler(store, payload, &state.config.updatable_attributes).await,
            Err(e) => Err(e),
        },
        Method::DELETE => match request.path_id() {
            Some(id) => delete_handler(store, id).await,
            None => Err(RecordError::MalformedInput(
                "missing path parameter 'id'".to_string(),
            )),
        },
        other => {
            tracing::warn!("Rejected unsupported HTTP method: {}", other);
            return HandlerResponse::message(StatusCode::BAD_REQUEST, UNSUPPORTED_METHOD);
        }
    };

    result.unwrap_or_else(RecordError::into_response)
}
