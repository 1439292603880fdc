use crate::models::{
    AskEmptyResponse, AskRequest, AskSuccessResponse, ChartsPayload, ErrorResponse,
};
use crate::AppState;
use actix_web::{post, web, HttpResponse, Responder};
use enrolliq_core::{AskError, AskOutcome};
use enrolliq_store::format_result_table;
use tracing::{error, info, warn};

#[post("/ask")]
pub async fn ask(state: web::Data<AppState>, request: web::Json<AskRequest>) -> impl Responder {
    let question = request.question.trim();
    if question.is_empty() {
        return HttpResponse::BadRequest().json(ErrorResponse {
            status: "bad_request".to_string(),
            error: "question cannot be empty".to_string(),
            hint: None,
            sql: None,
        });
    }

    info!(question, "question received");

    match state.service.ask(question).await {
        Ok(AskOutcome::Rows { sql, table, charts }) => {
            let formatted = format_result_table(&table);
            HttpResponse::Ok().json(AskSuccessResponse {
                status: "ok".to_string(),
                sql,
                row_count: table.row_count(),
                formatted,
                charts: charts.map(|(bar, pie)| ChartsPayload { bar, pie }),
                table,
            })
        }
        Ok(AskOutcome::Empty { sql }) => HttpResponse::Ok().json(AskEmptyResponse {
            status: "empty".to_string(),
            sql,
            message: "The query ran but matched no rows. Check the year or the \
                      department name in your question."
                .to_string(),
        }),
        Err(AskError::Synthesis(e)) => {
            error!(error = %e, "query synthesis failed");
            HttpResponse::BadGateway().json(ErrorResponse {
                status: "synthesis_failed".to_string(),
                error: format!("cannot generate query: {e}"),
                hint: None,
                sql: None,
            })
        }
        Err(AskError::Rejected { sql, reason }) => {
            warn!(sql = %sql, %reason, "generated query rejected");
            HttpResponse::UnprocessableEntity().json(ErrorResponse {
                status: "rejected".to_string(),
                error: reason.to_string(),
                hint: None,
                sql: Some(sql),
            })
        }
        Err(AskError::Execution(e)) => {
            error!(error = %e, "query execution failed");
            HttpResponse::BadGateway().json(ErrorResponse {
                status: "execution_failed".to_string(),
                error: e.diagnostic().to_string(),
                hint: Some(
                    "Check that the store host is reachable from this network and \
                     that the credentials are correct."
                        .to_string(),
                ),
                sql: None,
            })
        }
    }
}
