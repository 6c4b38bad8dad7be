//! AWS Lambda runtime integration.

use lambda_runtime::{Error, LambdaEvent, service_fn};
use tracing::Instrument;

use crate::dispatch::dispatch;
use crate::models::{HandlerRequest, HandlerResponse};
use crate::state::AppState;

/// Run the Lambda invocation loop until the runtime shuts the process down
pub async fn run(state: AppState) -> anyhow::Result<()> {
    tracing::info!("Starting Lambda runtime for table {}", state.config.table_name);

    lambda_runtime::run(service_fn(move |event: LambdaEvent<HandlerRequest>| {
        let state = state.clone();
        async move { handle_event(&state, event).await }
    }))
    .await
    .map_err(|e| anyhow::anyhow!("Lambda runtime failed: {}", e))
}

/// Handle one invocation
///
/// Always answers with a response; failures are already folded into the
/// status code and body by the dispatcher.
pub async fn handle_event(
    state: &AppState,
    event: LambdaEvent<HandlerRequest>,
) -> Result<HandlerResponse, Error> {
    let LambdaEvent { payload: request, context, .. } = event;
    let span = tracing::info_span!(
        "invocation",
        request_id = %context.request_id,
        method = %request.method()
    );

    let response = dispatch(state, request).instrument(span.clone()).await;
    span.in_scope(|| tracing::info!("Responded with status {}", response.status_code));

    Ok(response)
}
