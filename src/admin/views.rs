//! Server-rendered pages.
//!
//! Markup is plain HTML assembled with `format!`; every interpolated value
//! goes through [`escape`].

use std::fmt::Write;

use crate::clients::{ClientStatus, FieldError, NewClientForm, FIELDS, SEGMENTS};
use crate::navigation::NavSection;

const STYLESHEET: &str = "body{margin:0;font-family:system-ui,sans-serif;background:#f8fafc;color:#0f172a}\
aside{position:fixed;width:15rem;min-height:100vh;border-right:1px solid #e2e8f0;background:#fff;padding:1rem}\
main{margin-left:17rem;padding:2rem}\
nav a{display:block;padding:.5rem 1rem;border-radius:.375rem;color:inherit;text-decoration:none}\
nav a.active{background:#f1f5f9}\
.notice{padding:.75rem 1rem;border-radius:.375rem;background:#ecfdf5}\
.error{color:#ef4444;font-size:.75rem}\
.alert{padding:.75rem 1rem;border-radius:.375rem;background:#fef2f2;color:#b91c1c}\
form.grid{display:grid;grid-template-columns:repeat(3,1fr);gap:1rem}\
label{display:block;font-size:.875rem;margin-bottom:.25rem}";

/// Feedback shown at the top of a page.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Notice {
    Info(String),
    Error(String),
}

/// Escape text for HTML element and attribute contexts.
#[must_use]
pub fn escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn document(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html lang=\"pt-BR\"><head><meta charset=\"utf-8\">\
<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\
<title>{} | Farma4U</title><style>{STYLESHEET}</style></head><body>{body}</body></html>",
        escape(title)
    )
}

fn notices(notices: &[Notice]) -> String {
    notices
        .iter()
        .map(|notice| match notice {
            Notice::Info(message) => format!("<p class=\"notice\">{}</p>", escape(message)),
            Notice::Error(message) => {
                format!("<p class=\"alert\" role=\"alert\">{}</p>", escape(message))
            }
        })
        .collect()
}

fn sidebar(sections: &[NavSection], user_name: &str) -> String {
    let mut html = String::from("<aside><nav>");
    let _ = write!(html, "<p><strong>{}</strong></p>", escape(user_name));
    for section in sections {
        let _ = write!(html, "<h3>{}</h3>", escape(section.heading));
        for link in &section.links {
            let _ = write!(
                html,
                "<a href=\"{}\"{}>{}</a>",
                escape(link.link),
                if link.active { " class=\"active\"" } else { "" },
                escape(link.name)
            );
        }
    }
    html.push_str(
        "</nav><form method=\"post\" action=\"/logout\"><button type=\"submit\">Sair</button></form></aside>",
    );
    html
}

/// Dashboard page: sidebar, title, notices and content.
#[must_use]
pub fn dashboard(
    title: &str,
    sections: &[NavSection],
    user_name: &str,
    page_notices: &[Notice],
    content: &str,
) -> String {
    let body = format!(
        "{}<main><h1>{}</h1>{}{content}</main>",
        sidebar(sections, user_name),
        escape(title),
        notices(page_notices)
    );
    document(title, &body)
}

#[must_use]
pub fn login_page(email: &str, error: Option<&str>) -> String {
    let alert = error.map(|message| notices(&[Notice::Error(message.to_string())]));
    let body = format!(
        "<main style=\"margin:4rem auto;max-width:24rem\"><h1>Entrar</h1>{}\
<form method=\"post\" action=\"/login\">\
<label for=\"email\">E-mail</label><input id=\"email\" name=\"email\" type=\"email\" value=\"{}\" required>\
<label for=\"password\">Senha</label><input id=\"password\" name=\"password\" type=\"password\" required>\
<button type=\"submit\">Entrar</button></form></main>",
        alert.unwrap_or_default(),
        escape(email)
    );
    document("Entrar", &body)
}

/// Content of a section page that links to its registration form.
#[must_use]
pub fn section_content(description: &str, action: Option<(&str, &str)>) -> String {
    let mut html = format!("<p>{}</p>", escape(description));
    if let Some((href, label)) = action {
        let _ = write!(html, "<a href=\"{}\">{}</a>", escape(href), escape(label));
    }
    html
}

fn field_error(errors: &[FieldError], field: &str) -> String {
    errors
        .iter()
        .find(|error| error.field == field)
        .map(|error| format!("<span class=\"error\">{}</span>", escape(&error.message)))
        .unwrap_or_default()
}

fn select(name: &str, current: &str, options: &[(String, &str)]) -> String {
    let mut html = format!("<select id=\"{name}\" name=\"{name}\">");
    for (value, label) in options {
        let _ = write!(
            html,
            "<option value=\"{}\"{}>{}</option>",
            escape(value),
            if value == current { " selected" } else { "" },
            escape(label)
        );
    }
    html.push_str("</select>");
    html
}

/// Registration form body, repopulated with submitted values and errors.
#[must_use]
pub fn client_form(form: &NewClientForm, errors: &[FieldError]) -> String {
    let mut html = String::from(
        "<form class=\"grid\" method=\"post\" action=\"/painel/clientes/cadastrar-cliente\" enctype=\"multipart/form-data\">",
    );

    for (name, label) in FIELDS {
        let value = form.value(name);
        let input = match *name {
            "segment" => {
                let mut options = vec![(String::new(), "")];
                options.extend(SEGMENTS.iter().map(|segment| ((*segment).to_string(), *segment)));
                select(name, value, &options)
            }
            "statusId" => {
                let options: Vec<(String, &str)> = ClientStatus::ALL
                    .iter()
                    .map(|status| (status.id().to_string(), status.label()))
                    .collect();
                select(name, value, &options)
            }
            "lumpSum" | "unitValue" => format!(
                "<input id=\"{name}\" name=\"{name}\" type=\"number\" min=\"0\" step=\"0.01\" value=\"{}\">",
                escape(value)
            ),
            _ => format!(
                "<input id=\"{name}\" name=\"{name}\" value=\"{}\">",
                escape(value)
            ),
        };
        let _ = write!(
            html,
            "<div><label for=\"{name}\">{}</label>{input}{}</div>",
            escape(label),
            field_error(errors, name)
        );
    }

    html.push_str(
        "<div><label for=\"image\">Imagem</label><input id=\"image\" name=\"image\" type=\"file\" accept=\"image/*\"></div>\
<div><button type=\"submit\">Cadastrar cliente</button></div></form>",
    );
    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigation::sidebar as nav;
    use crate::session::Role;

    #[test]
    fn escapes_markup() {
        assert_eq!(
            escape(r#"<a href="x">'&'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;&#39;&amp;&#39;&lt;/a&gt;"
        );
    }

    #[test]
    fn login_page_shows_error_and_keeps_email() {
        let html = login_page("maria@exemplo.com", Some("Credenciais inválidas"));
        assert!(html.contains("value=\"maria@exemplo.com\""));
        assert!(html.contains("Credenciais inválidas"));
        assert!(!html.contains("name=\"password\" type=\"password\" value"));
    }

    #[test]
    fn dashboard_marks_active_link() {
        let sections = nav(Some(Role::Master), "/painel/clientes");
        let html = dashboard("Clientes", &sections, "Maria <Admin>", &[], "");
        assert!(html.contains("<a href=\"/painel/clientes\" class=\"active\">Clientes</a>"));
        assert!(html.contains("<a href=\"/painel/associados\">Associados</a>"));
        assert!(html.contains("Maria &lt;Admin&gt;"));
    }

    #[test]
    fn client_form_renders_errors_next_to_fields() {
        let mut form = NewClientForm::initial();
        form.set("cnpj", "123");
        let errors = vec![FieldError {
            field: "cnpj",
            message: "O campo CNPJ deve ter pelo menos 14 caracteres.".to_string(),
        }];
        let html = client_form(&form, &errors);

        assert!(html.contains("name=\"cnpj\" value=\"123\""));
        assert!(html.contains("O campo CNPJ deve ter pelo menos 14 caracteres."));
        assert!(html.contains("<option value=\"1\" selected>Ativo</option>"));
        assert!(html.contains("<option value=\"Clube de benefícios\">Clube de benefícios</option>"));
        assert!(html.contains("enctype=\"multipart/form-data\""));
    }
}
