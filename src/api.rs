use axum::{
    extract::{DefaultBodyLimit, Multipart, State},
    http::StatusCode,
    response::Json,
    routing::{get, post},
    Router,
};

use crate::{
    api_error,
    errors::ErrorResponse,
    models::*,
    pdf::{extract_text_from_pdf, is_pdf},
    prompts::{truncate_chars, PDF_INPUT_LIMIT},
    study_service::StudyService,
};

// Import logging macros
use crate::{log_api_start, log_api_success, log_api_warn};

/// Largest accepted PDF upload.
pub const MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

#[derive(Clone)]
pub struct AppState {
    pub study_service: StudyService,
}

type ApiResult<T> = Result<Json<T>, (StatusCode, Json<ErrorResponse>)>;

pub async fn home() -> Json<MessageResponse> {
    log_api_start!("home");
    Json(MessageResponse {
        message: "AI Study Buddy Backend is Running!".to_string(),
    })
}

pub async fn explain(
    State(state): State<AppState>,
    Json(request): Json<ExplainRequest>,
) -> Json<ExplanationResponse> {
    log_api_start!("explain", topic = request.topic);

    let explanation = state
        .study_service
        .get_explanation(&request.topic, &request.difficulty)
        .await;

    log_api_success!("explain", "explanation generated");
    Json(ExplanationResponse { explanation })
}

pub async fn summarize_text(
    State(state): State<AppState>,
    Json(request): Json<TextRequest>,
) -> Json<SummaryResponse> {
    log_api_start!("summarize_text", input_length = request.text.chars().count());

    let summary = state.study_service.get_summary(&request.text).await;

    log_api_success!("summarize_text", "summary generated");
    Json(SummaryResponse { summary })
}

pub async fn summarize_pdf(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> ApiResult<SummaryResponse> {
    log_api_start!("summarize_pdf");

    let mut upload = None;
    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => return Err(api_error!(bad_request, "summarize_pdf", "upload", e.body_text())),
        };

        if field.name() != Some("file") {
            continue;
        }

        match field.bytes().await {
            Ok(bytes) => {
                upload = Some(bytes);
                break;
            }
            Err(e) => return Err(api_error!(bad_request, "summarize_pdf", "upload", e.body_text())),
        }
    }

    let Some(data) = upload else {
        return Err(api_error!(validation, "summarize_pdf", "upload", "Missing 'file' field in multipart body."));
    };

    if !is_pdf(&data) {
        log_api_warn!("summarize_pdf", "upload is not a PDF");
        return Err(api_error!(bad_request, "summarize_pdf", "upload", "Uploaded file is not a PDF."));
    }

    let pdf_text = extract_text_from_pdf(&data).await;
    if pdf_text.trim().is_empty() {
        log_api_warn!("summarize_pdf", "no text extracted");
        return Err(api_error!(bad_request, "summarize_pdf", "upload", "PDF is empty or unreadable."));
    }

    let summary = state
        .study_service
        .get_summary(truncate_chars(&pdf_text, PDF_INPUT_LIMIT))
        .await;

    log_api_success!("summarize_pdf", "summary generated");
    Ok(Json(SummaryResponse { summary }))
}

pub async fn quiz(
    State(state): State<AppState>,
    Json(request): Json<QuizRequest>,
) -> Json<QuizResponse> {
    log_api_start!("quiz", input_length = request.material.chars().count());

    let questions = state
        .study_service
        .get_quiz(&request.material, request.num_questions)
        .await;

    log_api_success!("quiz", count = questions.len(), "questions generated");
    Json(QuizResponse { questions })
}

pub async fn flashcards(
    State(state): State<AppState>,
    Json(request): Json<FlashcardRequest>,
) -> Json<FlashcardsResponse> {
    log_api_start!("flashcards", topic = request.topic);

    let flashcards = state
        .study_service
        .get_flashcards(&request.topic, request.num_cards)
        .await;

    log_api_success!("flashcards", count = flashcards.len(), "flashcards generated");
    Json(FlashcardsResponse { flashcards })
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(home))
        .route("/explain", post(explain))
        .route("/summarize-text", post(summarize_text))
        .route("/summarize-pdf", post(summarize_pdf))
        .route("/quiz", post(quiz))
        .route("/flashcards", post(flashcards))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .with_state(state)
}
