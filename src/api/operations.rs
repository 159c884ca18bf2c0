use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};

use crate::error::Result;
use crate::operation::{DispatchResult, ReferencesOperation};
use crate::server::AppState;

/// Section of the request body that carries the operation fields
const REQUEST_SECTION: &str = "data";

/// POST /api/v1/operations/goods-return
///
/// Body: `{"data": {...}}`. Responds with the per-channel dispatch result.
/// A body that is not JSON is answered with the standard error envelope.
pub async fn goods_return(
    State(state): State<AppState>,
    body: std::result::Result<Json<serde_json::Value>, JsonRejection>,
) -> Result<Json<DispatchResult>> {
    let Json(payload) = body?;
    let data = state.operation.request_data(&payload, REQUEST_SECTION);
    let result = state.operation.do_operation(data).await?;
    Ok(Json(result))
}
