//! Page handlers.
//!
//! Read-only pages render straight from the service. Form submissions either
//! redirect to the contact list with a flash message, or re-render the form
//! with every validation failure and the submitted values.

use super::AppState;
use crate::error::{StoreError, SubmitError};
use crate::models::{AddContactForm, DeleteContactForm, EditContactForm};
use crate::session::SessionId;
use crate::views::{self, ContactFormValues, FormMode};
use axum::extract::{Form, Path, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::Extension;
use tracing::{error, warn};

pub const CONTACT_ADDED: &str = "New contact added!";
pub const CONTACT_EDITED: &str = "Data contact edited!";
pub const CONTACT_DELETED: &str = "Contact's data deleted!";

const CONTACT_LIST: &str = "/contact";

/// A store failure surfaced to the browser as a generic 500 page.
#[derive(Debug)]
pub struct ServerError(StoreError);

impl From<StoreError> for ServerError {
    fn from(err: StoreError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        error!("Request failed: {}", self.0);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Html(views::server_error_page()),
        )
            .into_response()
    }
}

type PageResult = Result<Response, ServerError>;

fn contact_not_found(name: &str) -> Response {
    (
        StatusCode::NOT_FOUND,
        Html(views::not_found_page(&format!("No contact named {}.", name))),
    )
        .into_response()
}

pub async fn home(State(state): State<AppState>) -> Html<String> {
    Html(views::home_page(&state.site_owner))
}

pub async fn about() -> Html<String> {
    Html(views::about_page())
}

pub async fn list_contacts(
    State(state): State<AppState>,
    Extension(session): Extension<SessionId>,
) -> PageResult {
    let contacts = state.contacts.list_contacts().await?;
    let flash = state.flash.consume(&session);

    Ok(Html(views::contact_list_page(&contacts, flash.as_deref())).into_response())
}

pub async fn show_add_form() -> Html<String> {
    Html(views::contact_form_page(
        FormMode::Add,
        &ContactFormValues::default(),
        None,
    ))
}

pub async fn add_contact(
    State(state): State<AppState>,
    Extension(session): Extension<SessionId>,
    Form(form): Form<AddContactForm>,
) -> PageResult {
    match state.contacts.add_contact(&form).await {
        Ok(_) => {
            state.flash.queue(&session, CONTACT_ADDED);
            Ok(Redirect::to(CONTACT_LIST).into_response())
        }
        Err(SubmitError::Rejected(errors)) => {
            warn!("Add contact rejected: {}", errors);
            let values = ContactFormValues::from(&form);
            Ok(Html(views::contact_form_page(FormMode::Add, &values, Some(&errors))).into_response())
        }
        Err(SubmitError::Store(err)) => Err(err.into()),
    }
}

pub async fn show_edit_form(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> PageResult {
    let Some(contact) = state.contacts.find_contact(&name).await? else {
        return Ok(contact_not_found(&name));
    };

    let values = ContactFormValues::from(&contact);
    Ok(Html(views::contact_form_page(FormMode::Edit, &values, None)).into_response())
}

pub async fn edit_contact(
    State(state): State<AppState>,
    Extension(session): Extension<SessionId>,
    Form(form): Form<EditContactForm>,
) -> PageResult {
    match state.contacts.edit_contact(&form).await {
        Ok(_) => {
            state.flash.queue(&session, CONTACT_EDITED);
            Ok(Redirect::to(CONTACT_LIST).into_response())
        }
        Err(SubmitError::Rejected(errors)) => {
            warn!("Edit of contact {} rejected: {}", form.old_name, errors);
            let values = ContactFormValues::from(&form);
            Ok(Html(views::contact_form_page(FormMode::Edit, &values, Some(&errors))).into_response())
        }
        Err(SubmitError::Store(err)) => Err(err.into()),
    }
}

pub async fn delete_contact(
    State(state): State<AppState>,
    Extension(session): Extension<SessionId>,
    Form(form): Form<DeleteContactForm>,
) -> PageResult {
    state.contacts.delete_contact(&form.name).await?;
    state.flash.queue(&session, CONTACT_DELETED);
    Ok(Redirect::to(CONTACT_LIST).into_response())
}

pub async fn show_contact(State(state): State<AppState>, Path(name): Path<String>) -> PageResult {
    match state.contacts.find_contact(&name).await? {
        Some(contact) => Ok(Html(views::contact_detail_page(&contact)).into_response()),
        None => Ok(contact_not_found(&name)),
    }
}

pub async fn not_found() -> (StatusCode, Html<String>) {
    (
        StatusCode::NOT_FOUND,
        Html(views::not_found_page("That page does not exist.")),
    )
}
