use axum::{
    extract::{Path, Query, State},
    response::Redirect,
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use service::joke::{Joke, JokeInput};
use tracing::info;

use crate::{errors::JsonApiError, gates::Caller, state::ServerState};

/// Mutating posts land back on the list.
const INDEX: &str = "/jokes";

#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SearchQuery {
    /// Substring looked up in question and answer; case-sensitive.
    pub phrase: Option<String>,
}

/// Payload of the authorized GET steps: the record being edited or
/// confirmed for deletion, and the token the following POST must carry.
#[derive(Debug, Serialize)]
pub struct FormView {
    pub joke: Option<Joke>,
    pub antiforgery_token: String,
}

/// Routes may be hit without an id; that is answered like an unknown id.
fn require_id(id: Option<Path<i32>>) -> Result<i32, JsonApiError> {
    id.map(|Path(id)| id).ok_or_else(|| JsonApiError::not_found("joke id missing"))
}

fn form_view(state: &ServerState, caller: &Caller, joke: Option<Joke>) -> Result<Json<FormView>, JsonApiError> {
    let antiforgery_token = state.auth.tokens().issue_antiforgery(&caller.0)?;
    Ok(Json(FormView { joke, antiforgery_token }))
}

async fn load(state: &ServerState, id: Option<Path<i32>>) -> Result<Joke, JsonApiError> {
    let id = require_id(id)?;
    state
        .jokes
        .get(id)
        .await?
        .ok_or_else(|| JsonApiError::not_found(format!("joke {id} not found")))
}

#[utoipa::path(
    get, path = "/jokes", tag = "jokes",
    responses((status = 200, description = "All jokes in store order"), (status = 500, description = "Storage Error"))
)]
pub async fn index(State(state): State<ServerState>) -> Result<Json<Vec<Joke>>, JsonApiError> {
    let list = state.jokes.list().await?;
    info!(count = list.len(), "list jokes");
    Ok(Json(list))
}

#[utoipa::path(
    get, path = "/jokes/search", tag = "jokes",
    params(SearchQuery),
    responses((status = 200, description = "Matching jokes"))
)]
pub async fn search_query(
    State(state): State<ServerState>,
    Query(q): Query<SearchQuery>,
) -> Result<Json<Vec<Joke>>, JsonApiError> {
    Ok(Json(state.jokes.search(q.phrase.as_deref()).await?))
}

#[utoipa::path(
    post, path = "/jokes/search", tag = "jokes",
    request_body = crate::openapi::SearchRequestDoc,
    responses((status = 200, description = "Matching jokes"))
)]
pub async fn search(
    State(state): State<ServerState>,
    Json(q): Json<SearchQuery>,
) -> Result<Json<Vec<Joke>>, JsonApiError> {
    Ok(Json(state.jokes.search(q.phrase.as_deref()).await?))
}

#[utoipa::path(
    get, path = "/jokes/details/{id}", tag = "jokes",
    params(("id" = i32, Path, description = "Joke id")),
    responses((status = 200, description = "OK"), (status = 404, description = "Not Found"))
)]
pub async fn details(State(state): State<ServerState>, id: Option<Path<i32>>) -> Result<Json<Joke>, JsonApiError> {
    Ok(Json(load(&state, id).await?))
}

#[utoipa::path(
    get, path = "/jokes/create", tag = "jokes",
    responses((status = 200, description = "Anti-forgery token for the create form"), (status = 401, description = "Unauthorized"))
)]
pub async fn create_form(
    State(state): State<ServerState>,
    Extension(caller): Extension<Caller>,
) -> Result<Json<FormView>, JsonApiError> {
    form_view(&state, &caller, None)
}

#[utoipa::path(
    post, path = "/jokes/create", tag = "jokes",
    request_body = crate::openapi::JokeInputDoc,
    responses(
        (status = 303, description = "Created, see /jokes"),
        (status = 400, description = "Anti-forgery token missing or invalid"),
        (status = 401, description = "Unauthorized"),
        (status = 422, description = "Validation Error")
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    Json(input): Json<JokeInput>,
) -> Result<Redirect, JsonApiError> {
    let joke = state.jokes.create(input).await?;
    info!(id = joke.id, "created joke");
    Ok(Redirect::to(INDEX))
}

#[utoipa::path(
    get, path = "/jokes/edit/{id}", tag = "jokes",
    params(("id" = i32, Path, description = "Joke id")),
    responses((status = 200, description = "Joke and anti-forgery token"), (status = 401, description = "Unauthorized"), (status = 404, description = "Not Found"))
)]
pub async fn edit_form(
    State(state): State<ServerState>,
    Extension(caller): Extension<Caller>,
    id: Option<Path<i32>>,
) -> Result<Json<FormView>, JsonApiError> {
    let joke = load(&state, id).await?;
    form_view(&state, &caller, Some(joke))
}

#[utoipa::path(
    post, path = "/jokes/edit/{id}", tag = "jokes",
    params(("id" = i32, Path, description = "Joke id")),
    request_body = crate::openapi::JokeInputDoc,
    responses(
        (status = 303, description = "Updated, see /jokes"),
        (status = 400, description = "Anti-forgery token missing or invalid"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Not Found"),
        (status = 422, description = "Validation Error"),
        (status = 500, description = "Concurrency Conflict")
    )
)]
pub async fn edit(
    State(state): State<ServerState>,
    Path(id): Path<i32>,
    Json(input): Json<JokeInput>,
) -> Result<Redirect, JsonApiError> {
    state.jokes.update(id, input).await?;
    info!(id, "updated joke");
    Ok(Redirect::to(INDEX))
}

#[utoipa::path(
    get, path = "/jokes/delete/{id}", tag = "jokes",
    params(("id" = i32, Path, description = "Joke id")),
    responses((status = 200, description = "Joke and anti-forgery token"), (status = 401, description = "Unauthorized"), (status = 404, description = "Not Found"))
)]
pub async fn delete_confirm(
    State(state): State<ServerState>,
    Extension(caller): Extension<Caller>,
    id: Option<Path<i32>>,
) -> Result<Json<FormView>, JsonApiError> {
    let joke = load(&state, id).await?;
    form_view(&state, &caller, Some(joke))
}

#[utoipa::path(
    post, path = "/jokes/delete/{id}", tag = "jokes",
    params(("id" = i32, Path, description = "Joke id")),
    responses(
        (status = 303, description = "Deleted or already absent, see /jokes"),
        (status = 400, description = "Anti-forgery token missing or invalid"),
        (status = 401, description = "Unauthorized")
    )
)]
pub async fn delete_confirmed(
    State(state): State<ServerState>,
    Path(id): Path<i32>,
) -> Result<Redirect, JsonApiError> {
    state.jokes.delete(id).await?;
    Ok(Redirect::to(INDEX))
}
