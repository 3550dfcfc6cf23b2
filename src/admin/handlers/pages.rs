use axum::{
    extract::Request,
    http::{StatusCode, Uri},
    response::{Html, IntoResponse, Response},
    Extension,
};

use super::chrome;
use crate::admin::views::{self, Notice};
use crate::session::RequestSession;

pub const ASSOCIATES_PATH: &str = "/painel/associados";
pub const CLIENTS_PATH: &str = "/painel/clientes";
pub const USERS_PATH: &str = "/painel/usuarios";
pub const NEW_CLIENT_PATH: &str = "/painel/clientes/cadastrar-cliente";

/// Full dashboard page for the current user.
pub(super) fn render(
    session: &RequestSession,
    path: &str,
    title: &str,
    notices: &[Notice],
    content: &str,
) -> String {
    let (sections, user_name) = chrome(session, path);
    views::dashboard(title, &sections, &user_name, notices, content)
}

pub async fn associates(Extension(session): Extension<RequestSession>, uri: Uri) -> Html<String> {
    Html(render(
        &session,
        uri.path(),
        "Associados",
        &[],
        &views::section_content("Associados vinculados aos clientes Farma4U.", None),
    ))
}

pub(super) fn clients_page(session: &RequestSession, notices: &[Notice]) -> String {
    render(
        session,
        CLIENTS_PATH,
        "Clientes",
        notices,
        &views::section_content(
            "Clientes parceiros cadastrados na plataforma.",
            Some((NEW_CLIENT_PATH, "Cadastrar cliente")),
        ),
    )
}

pub async fn clients(Extension(session): Extension<RequestSession>) -> Html<String> {
    Html(clients_page(&session, &[]))
}

pub async fn users(Extension(session): Extension<RequestSession>, uri: Uri) -> Html<String> {
    Html(render(
        &session,
        uri.path(),
        "Usuários",
        &[],
        &views::section_content("Usuários com acesso ao painel.", None),
    ))
}

pub async fn not_found(request: Request) -> Response {
    let session = request
        .extensions()
        .get::<RequestSession>()
        .cloned()
        .unwrap_or_default();
    let html = render(
        &session,
        request.uri().path(),
        "Página não encontrada",
        &[],
        "",
    );
    (StatusCode::NOT_FOUND, Html(html)).into_response()
}
