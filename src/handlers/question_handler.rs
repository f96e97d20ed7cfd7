use actix_web::{get, post, web, HttpRequest, HttpResponse};
use validator::Validate;

use crate::{
    app_state::AppState,
    errors::AppError,
    middleware::get_request_id,
    models::domain::Question,
    models::dto::{
        request::{GenerateQuestionsRequest, QuestionCountParams},
        response::{HealthResponse, QuestionDto},
    },
};

#[get("/api/health")]
pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse { status: "ok" })
}

#[post("/api/questions/generate")]
pub async fn generate_questions(
    req: HttpRequest,
    state: web::Data<AppState>,
    request: web::Json<GenerateQuestionsRequest>,
) -> Result<HttpResponse, AppError> {
    let request = request.into_inner();
    request.validate()?;

    log::info!(
        "[{}] Generating {} questions from submitted content",
        get_request_id(&req),
        request.question_count()
    );

    let questions = state
        .question_generator
        .generate(&request.content, request.question_count())
        .await?;

    Ok(HttpResponse::Ok().json(into_dtos(questions)))
}

#[post("/api/learning_notes/{id}/questions")]
pub async fn generate_note_questions(
    req: HttpRequest,
    state: web::Data<AppState>,
    id: web::Path<i64>,
    params: web::Query<QuestionCountParams>,
) -> Result<HttpResponse, AppError> {
    let note_id = id.into_inner();
    let params = params.into_inner();
    params.validate()?;

    let note = state
        .note_repository
        .find_by_id(note_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Learning note {} not found", note_id)))?;

    log::info!(
        "[{}] Generating {} questions for learning note {}",
        get_request_id(&req),
        params.question_count(),
        note_id
    );

    let questions = state
        .question_generator
        .generate(&note.content, params.question_count())
        .await?;

    Ok(HttpResponse::Ok().json(into_dtos(questions)))
}

fn into_dtos(questions: Vec<Question>) -> Vec<QuestionDto> {
    questions.into_iter().map(QuestionDto::from).collect()
}
