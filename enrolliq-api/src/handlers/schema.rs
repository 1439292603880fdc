use crate::models::SchemaResponse;
use crate::AppState;
use actix_web::{get, web, HttpResponse, Responder};

#[get("/schema")]
pub async fn get_schema(state: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(SchemaResponse {
        schema: state.service.schema().clone(),
        example_questions: vec![
            "113學年各系所的學生人數？".to_string(),
            "113學年資訊工程系的男女比例？".to_string(),
        ],
    })
}
