//! Client registration pages.

use axum::{
    extract::{multipart::MultipartError, Multipart},
    http::{StatusCode, Uri},
    response::{Html, IntoResponse, Redirect, Response},
    Extension,
};
use std::sync::Arc;
use tracing::{debug, warn};

use super::{
    failure_status,
    pages::{clients_page, render},
};
use crate::{
    admin::{views, views::Notice, AdminState},
    api::FailureKind,
    clients::{register_client, ImageUpload, NewClientForm, RegistrationOutcome},
    guard::LOGIN_PATH,
    session::RequestSession,
};

const TITLE: &str = "Cadastrar Novo Cliente";
const IMAGE_FIELD: &str = "image";

pub async fn form(Extension(session): Extension<RequestSession>, uri: Uri) -> Html<String> {
    Html(render(
        &session,
        uri.path(),
        TITLE,
        &[],
        &views::client_form(&NewClientForm::initial(), &[]),
    ))
}

pub async fn submit(
    Extension(state): Extension<Arc<AdminState>>,
    Extension(session): Extension<RequestSession>,
    uri: Uri,
    multipart: Multipart,
) -> Response {
    let path = uri.path();

    let (submitted, image) = match read_submission(multipart).await {
        Ok(submission) => submission,
        Err(err) => {
            warn!("Invalid registration upload: {}", err.body_text());
            let page = render(
                &session,
                path,
                TITLE,
                &[Notice::Error(err.body_text())],
                &views::client_form(&NewClientForm::initial(), &[]),
            );
            return (err.status(), Html(page)).into_response();
        }
    };

    let client = match submitted.validate() {
        Ok(client) => client,
        Err(errors) => {
            debug!(fields = errors.len(), "Registration form rejected");
            let page = render(
                &session,
                path,
                TITLE,
                &[],
                &views::client_form(&submitted, &errors),
            );
            return (StatusCode::UNPROCESSABLE_ENTITY, Html(page)).into_response();
        }
    };

    match register_client(state.primary(), state.hotsite(), &session, &client, image).await {
        RegistrationOutcome::Registered {
            message, hotsite, ..
        } => {
            let mut notices = vec![Notice::Info(message)];
            if let Some(failure) = hotsite {
                notices.push(Notice::Error(format!(
                    "Não foi possível publicar o hotsite: {}",
                    failure.message
                )));
            }
            Html(clients_page(&session, &notices)).into_response()
        }
        RegistrationOutcome::Rejected(failure) if failure.kind == FailureKind::Unauthorized => {
            Redirect::to(LOGIN_PATH).into_response()
        }
        RegistrationOutcome::Rejected(failure) => {
            let page = render(
                &session,
                path,
                TITLE,
                &[Notice::Error(failure.message.clone())],
                &views::client_form(&submitted, &[]),
            );
            (failure_status(&failure), Html(page)).into_response()
        }
    }
}

async fn read_submission(
    mut multipart: Multipart,
) -> Result<(NewClientForm, Option<ImageUpload>), MultipartError> {
    let mut form = NewClientForm::default();
    let mut image = None;

    while let Some(field) = multipart.next_field().await? {
        let Some(name) = field.name().map(ToString::to_string) else {
            continue;
        };

        if name == IMAGE_FIELD {
            let file_name = field.file_name().unwrap_or_default().to_string();
            let content_type = field.content_type().map(ToString::to_string);
            let bytes = field.bytes().await?;
            // An empty file input still submits a part.
            if !file_name.is_empty() && !bytes.is_empty() {
                image = Some(ImageUpload {
                    file_name,
                    content_type,
                    bytes: bytes.to_vec(),
                });
            }
        } else {
            let value = field.text().await?;
            form.set(&name, value);
        }
    }

    Ok((form, image))
}
