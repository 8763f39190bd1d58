use axum::{
    extract::{rejection::FormRejection, Path, State},
    http::HeaderMap,
    response::Redirect,
    Form,
};
use serde::Deserialize;

use crate::api::JokeRouteError;
use crate::error::ApiError;
use crate::services::{ActionOutcome, FormDirective};
use crate::state::AppState;

/// Form body posted from the joke page. Only `_method` is read.
#[derive(Debug, Default, Deserialize)]
pub struct ActionForm {
    #[serde(rename = "_method")]
    pub method: Option<String>,
}

/// POST /jokes/:joke_id - form actions on a joke (only `_method=delete`)
pub async fn post(
    State(state): State<AppState>,
    Path(joke_id): Path<String>,
    headers: HeaderMap,
    form: Result<Form<ActionForm>, FormRejection>,
) -> Result<Redirect, JokeRouteError> {
    let directive = match form_directive(form) {
        Ok(directive) => directive,
        Err(e) => return Err(JokeRouteError::new(joke_id, e)),
    };

    match state.jokes.act(&joke_id, directive, &headers).await {
        Ok(ActionOutcome::Redirect(location)) => Ok(Redirect::to(&location)),
        Err(e) => Err(JokeRouteError::new(joke_id, e)),
    }
}

/// A request that is not a form at all carries no directive; a form body
/// that does not parse is malformed
fn form_directive(form: Result<Form<ActionForm>, FormRejection>) -> Result<FormDirective, ApiError> {
    match form {
        Ok(Form(form)) => Ok(FormDirective::parse(form.method.as_deref())),
        Err(FormRejection::FailedToDeserializeForm(e)) => Err(ApiError::bad_request(e.body_text())),
        Err(FormRejection::FailedToDeserializeFormBody(e)) => Err(ApiError::bad_request(e.body_text())),
        Err(rejection) => {
            tracing::debug!("No form body on joke action: {}", rejection.body_text());
            Ok(FormDirective::Missing)
        }
    }
}
