use crate::dates::{format_date, parse_date};
use crate::errors::AppError;
use crate::models::{
    AddRepsRequest, DayCountsResponse, SessionKind, SessionResponse, SummaryResponse,
};
use crate::state::AppState;
use crate::sync::SessionState;
use crate::ui::render_index;
use axum::{
    extract::{Form, Query, State},
    response::{Html, Redirect},
    Json,
};
use chrono::{Local, NaiveDate};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct SummaryQuery {
    pub date: Option<String>,
}

pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<SummaryQuery>,
) -> Result<Html<String>, AppError> {
    let date = resolve_date(query.date.as_deref())?;
    let summary = state.controller.summary(date).await;
    let session = state.controller.session_state().await;
    Ok(Html(render_index(&summary, &session)))
}

pub async fn get_summary(
    State(state): State<AppState>,
    Query(query): Query<SummaryQuery>,
) -> Result<Json<SummaryResponse>, AppError> {
    let date = resolve_date(query.date.as_deref())?;
    Ok(Json(state.controller.summary(date).await))
}

pub async fn add_reps(
    State(state): State<AppState>,
    Json(payload): Json<AddRepsRequest>,
) -> Result<Json<DayCountsResponse>, AppError> {
    let date = resolve_date(payload.date.as_deref())?;
    let counts = state
        .controller
        .add_reps(payload.exercise, payload.amount, date)
        .await;
    Ok(Json(DayCountsResponse {
        date: format_date(date),
        counts,
    }))
}

pub async fn add_reps_form(
    State(state): State<AppState>,
    Form(form): Form<AddRepsRequest>,
) -> Result<Redirect, AppError> {
    let date = resolve_date(form.date.as_deref())?;
    state
        .controller
        .add_reps(form.exercise, form.amount, date)
        .await;
    Ok(Redirect::to("/"))
}

pub async fn get_session(State(state): State<AppState>) -> Json<SessionResponse> {
    Json(session_response(&state.controller.session_state().await))
}

pub async fn sign_in(State(state): State<AppState>) -> Result<Json<SessionResponse>, AppError> {
    state.controller.sign_in().await?;
    // The signed-in state lands via the session listener; until then this
    // reports whatever the controller currently knows.
    Ok(Json(session_response(&state.controller.session_state().await)))
}

pub async fn sign_out(State(state): State<AppState>) -> Result<Json<SessionResponse>, AppError> {
    state.controller.sign_out().await?;
    Ok(Json(session_response(&state.controller.session_state().await)))
}

fn session_response(session: &SessionState) -> SessionResponse {
    match session {
        SessionState::NoRemote => SessionResponse {
            state: SessionKind::NoRemote,
            user_id: None,
        },
        SessionState::SignedOut => SessionResponse {
            state: SessionKind::SignedOut,
            user_id: None,
        },
        SessionState::SignedIn(user_id) => SessionResponse {
            state: SessionKind::SignedIn,
            user_id: Some(user_id.clone()),
        },
    }
}

fn resolve_date(raw: Option<&str>) -> Result<NaiveDate, AppError> {
    match raw {
        None | Some("") => Ok(Local::now().date_naive()),
        Some(raw) => {
            parse_date(raw).ok_or_else(|| AppError::bad_request("date must be YYYY-MM-DD"))
        }
    }
}
