//! Microsite provisioning payload for the hotsite API.

use crate::api::MultipartBody;

use super::NewClient;

pub const ADD_SITE_ENDPOINT: &str = "/addSite";

/// Logo uploaded with the registration form.
#[derive(Clone, Debug)]
pub struct ImageUpload {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

/// Multipart body for `POST /addSite`.
///
/// Without an image the `image` field is still sent, as an empty text part.
#[must_use]
pub fn site_form(client_id: &str, client: &NewClient, image: Option<ImageUpload>) -> MultipartBody {
    let form = MultipartBody::new().text("id", client_id);
    let form = match image {
        Some(image) => form.file("image", image.file_name, image.content_type, image.bytes),
        None => form.text("image", ""),
    };
    form.text("urlSite", client.url_site.as_str())
        .text("primaryColor", client.primary_color.as_str())
        .text("secondColor", client.second_color.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MultipartField;
    use crate::clients::form::test_support::valid_form;

    fn client() -> NewClient {
        valid_form()
            .validate()
            .unwrap_or_else(|errors| panic!("unexpected errors: {errors:?}"))
    }

    #[test]
    fn carries_site_fields_in_order() {
        let form = site_form("10", &client(), None);
        let names: Vec<&str> = form.fields().iter().map(|(name, _)| name.as_str()).collect();

        assert_eq!(names, ["id", "image", "urlSite", "primaryColor", "secondColor"]);
        assert_eq!(form.text_value("id"), Some("10"));
        assert_eq!(form.text_value("image"), Some(""));
        assert_eq!(form.text_value("urlSite"), Some("drogaria-exemplo"));
        assert_eq!(form.text_value("primaryColor"), Some("#112233"));
        assert_eq!(form.text_value("secondColor"), Some("#fff"));
    }

    #[test]
    fn image_is_sent_as_file_part() {
        let image = ImageUpload {
            file_name: "logo.png".to_string(),
            content_type: Some("image/png".to_string()),
            bytes: vec![137, 80, 78, 71],
        };
        let form = site_form("10", &client(), Some(image));

        let image_field = form
            .fields()
            .iter()
            .find(|(name, _)| name == "image")
            .map(|(_, field)| field);
        assert!(matches!(
            image_field,
            Some(MultipartField::File { file_name, bytes, .. }) if file_name == "logo.png" && bytes.len() == 4
        ));
    }
}
