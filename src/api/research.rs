//! Research API handler

use crate::error::AppError;
use crate::research::{ResearchRequest, ResearchResponse};
use crate::state::SharedContext;
use axum::{extract::rejection::JsonRejection, extract::State, Json};

/// POST /api/research - Answer a question with the selected mode
///
/// Blocks until the selected collaborator finishes; there is no job id or
/// polling.
///
/// # Returns
/// * `Ok(Json<ResearchResponse>)` - Mode, question, and a non-empty report
/// * `Err(AppError)` - 4xx for a malformed body or blank question, 500 if the
///   collaborator fails
pub async fn run_research(
    State(context): State<SharedContext>,
    payload: Result<Json<ResearchRequest>, JsonRejection>,
) -> Result<Json<ResearchResponse>, AppError> {
    let Json(request) = payload?;
    context.dispatcher.dispatch(request).await.map(Json)
}
