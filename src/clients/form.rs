//! New-client form: raw submitted values, validation and normalization.

use regex::Regex;
use serde::Serialize;
use std::collections::BTreeMap;
use url::Url;

/// Segments offered in the registration form.
pub const SEGMENTS: &[&str] = &[
    "Proteção Veicular",
    "Telecom",
    "Plano Funerário",
    "RH",
    "Sindicato",
    "Associação",
    "Clube de benefícios",
    "Outros",
];

/// Form field names (wire names) with their labels, in display order.
pub const FIELDS: &[(&str, &str)] = &[
    ("fantasyName", "Nome Fantasia"),
    ("corporateName", "Razão Social"),
    ("cnpj", "CNPJ"),
    ("segment", "Segmento"),
    ("statusId", "Status"),
    ("lumpSum", "Valor do Boleto"),
    ("unitValue", "Valor Unitário"),
    ("contractUrl", "URL do Contrato"),
    ("managerName", "Nome do Responsável"),
    ("managerEmail", "E-mail do Responsável"),
    ("managerPhoneNumber", "Telefone do Responsável"),
    ("financePhoneNumber", "Telefone do Financeiro"),
    ("address", "Endereço"),
    ("city", "Cidade"),
    ("state", "Estado"),
    ("urlSite", "URL Site"),
    ("primaryColor", "Cor Primária"),
    ("secondColor", "Cor Secundária"),
];

const STATUS_MESSAGE: &str = "O campo Status deve 1 (ativo), 2 (inativo) ou 3 (excluído).";

/// Client lifecycle status as stored upstream.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum ClientStatus {
    #[default]
    Active,
    Inactive,
    Deleted,
}

impl ClientStatus {
    pub const ALL: [Self; 3] = [Self::Active, Self::Inactive, Self::Deleted];

    #[must_use]
    pub const fn from_id(id: u8) -> Option<Self> {
        match id {
            1 => Some(Self::Active),
            2 => Some(Self::Inactive),
            3 => Some(Self::Deleted),
            _ => None,
        }
    }

    #[must_use]
    pub const fn id(self) -> u8 {
        match self {
            Self::Active => 1,
            Self::Inactive => 2,
            Self::Deleted => 3,
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Active => "Ativo",
            Self::Inactive => "Inativo",
            Self::Deleted => "Excluído",
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

/// Values as submitted by the browser.
#[derive(Clone, Debug, Default)]
pub struct NewClientForm {
    values: BTreeMap<&'static str, String>,
}

impl NewClientForm {
    /// Form pre-filled the way the registration page first shows it.
    #[must_use]
    pub fn initial() -> Self {
        let mut form = Self::default();
        form.set("lumpSum", "0");
        form.set("unitValue", "0");
        form.set("statusId", ClientStatus::default().id().to_string());
        form
    }

    /// Store a submitted value. Unknown field names are ignored.
    pub fn set(&mut self, name: &str, value: impl Into<String>) -> bool {
        match FIELDS.iter().find(|(field, _)| *field == name) {
            Some((field, _)) => {
                self.values.insert(*field, value.into());
                true
            }
            None => false,
        }
    }

    /// Submitted value, empty when missing.
    #[must_use]
    pub fn value(&self, name: &str) -> &str {
        self.values.get(name).map_or("", String::as_str)
    }

    /// Validate and normalize the submission.
    ///
    /// # Errors
    /// Returns every failing field with its message, in form order.
    pub fn validate(&self) -> Result<NewClient, Vec<FieldError>> {
        let mut check = Checker {
            form: self,
            errors: Vec::new(),
        };

        let cnpj = check.text("cnpj", Some(14), Some(18));
        let corporate_name = check.text("corporateName", Some(3), None);
        let fantasy_name = check.text("fantasyName", Some(3), None);
        let segment = check.text("segment", Some(3), None);
        let address = check.text("address", Some(3), None);
        let state = check.exact("state", 2);
        let city = check.text("city", Some(3), None);
        let manager_name = check.text("managerName", Some(3), None);
        let manager_phone_number = check.text("managerPhoneNumber", Some(10), None);
        let manager_email = check.email("managerEmail");
        let finance_phone_number = check.text("financePhoneNumber", Some(10), None);
        let lump_sum = check.amount("lumpSum");
        let unit_value = check.amount("unitValue");
        let contract_url = check.optional_url("contractUrl");
        let status = check.status("statusId");
        let url_site = check.text("urlSite", Some(3), None);
        let primary_color = check.text("primaryColor", Some(3), Some(7));
        let second_color = check.text("secondColor", Some(3), Some(7));

        if !check.errors.is_empty() {
            let mut errors = check.errors;
            errors.sort_by_key(|error| position(error.field));
            return Err(errors);
        }

        Ok(NewClient {
            cnpj: normalize_cnpj(&cnpj),
            corporate_name,
            fantasy_name,
            segment,
            address,
            state,
            city,
            manager_name,
            manager_phone_number: normalize_phone(&manager_phone_number),
            manager_email,
            finance_phone_number: normalize_phone(&finance_phone_number),
            lump_sum,
            unit_value,
            contract_url,
            status_id: status.id(),
            url_site,
            primary_color,
            second_color,
        })
    }
}

/// Validated client, as sent to `POST /client`.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewClient {
    pub cnpj: String,
    pub corporate_name: String,
    pub fantasy_name: String,
    pub segment: String,
    pub address: String,
    pub state: String,
    pub city: String,
    pub manager_name: String,
    pub manager_phone_number: String,
    pub manager_email: String,
    pub finance_phone_number: String,
    pub lump_sum: i64,
    pub unit_value: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contract_url: Option<String>,
    pub status_id: u8,
    pub url_site: String,
    pub primary_color: String,
    pub second_color: String,
}

/// Strip CNPJ mask characters.
#[must_use]
pub fn normalize_cnpj(cnpj: &str) -> String {
    cnpj.chars()
        .filter(|c| !matches!(c, '.' | '/' | '-' | '_'))
        .collect()
}

/// Strip phone mask characters.
#[must_use]
pub fn normalize_phone(phone: &str) -> String {
    phone
        .chars()
        .filter(|c| !matches!(c, '(' | ')' | '-' | ' ' | '_'))
        .collect()
}

fn label(field: &str) -> &'static str {
    FIELDS
        .iter()
        .find(|(name, _)| *name == field)
        .map_or("", |(_, label)| *label)
}

fn position(field: &str) -> usize {
    FIELDS
        .iter()
        .position(|(name, _)| *name == field)
        .unwrap_or(usize::MAX)
}

fn is_valid_email(email: &str) -> bool {
    if email.starts_with('.') || email.contains("..") {
        return false;
    }
    Regex::new(r"^[A-Za-z0-9_'+\-.]*[A-Za-z0-9_+\-]@([A-Za-z0-9][A-Za-z0-9\-]*\.)+[A-Za-z]{2,}$")
        .is_ok_and(|regex| regex.is_match(email))
}

struct Checker<'a> {
    form: &'a NewClientForm,
    errors: Vec<FieldError>,
}

impl Checker<'_> {
    fn fail(&mut self, field: &'static str, message: String) {
        self.errors.push(FieldError { field, message });
    }

    fn required(&mut self, field: &'static str) -> Option<String> {
        let value = self.form.values.get(field).cloned();
        if value.is_none() {
            self.fail(field, format!("O campo {} é obrigatório.", label(field)));
        }
        value
    }

    fn text(&mut self, field: &'static str, min: Option<usize>, max: Option<usize>) -> String {
        let Some(value) = self.required(field) else {
            return String::new();
        };
        let len = value.chars().count();
        if let Some(min) = min.filter(|min| len < *min) {
            self.fail(
                field,
                format!("O campo {} deve ter pelo menos {min} caracteres.", label(field)),
            );
        } else if let Some(max) = max.filter(|max| len > *max) {
            self.fail(
                field,
                format!("O campo {} deve ter no máximo {max} caracteres.", label(field)),
            );
        }
        value
    }

    fn exact(&mut self, field: &'static str, len: usize) -> String {
        let Some(value) = self.required(field) else {
            return String::new();
        };
        if value.chars().count() != len {
            self.fail(
                field,
                format!("O campo {} deve ter {len} caracteres.", label(field)),
            );
        }
        value
    }

    fn email(&mut self, field: &'static str) -> String {
        let Some(value) = self.required(field) else {
            return String::new();
        };
        if !is_valid_email(&value) {
            self.fail(
                field,
                format!("O campo {} deve ser um e-mail válido.", label(field)),
            );
        }
        value
    }

    /// Optional non-negative amount, floored; blank counts as zero.
    fn amount(&mut self, field: &'static str) -> i64 {
        let raw = self.form.value(field).trim();
        if raw.is_empty() {
            return 0;
        }
        match raw.parse::<f64>() {
            #[allow(clippy::cast_possible_truncation)]
            Ok(number) if number.is_finite() && number >= 0.0 => number.floor() as i64,
            Ok(number) if number.is_finite() => {
                self.fail(
                    field,
                    format!("O campo {} deve ser maior ou igual a 0.", label(field)),
                );
                0
            }
            _ => {
                self.fail(field, format!("O campo {} deve ser um número.", label(field)));
                0
            }
        }
    }

    /// Optional URL; blank counts as absent.
    ///
    /// The legacy form rejected an empty string here; an empty input now
    /// simply omits `contractUrl` from the payload.
    fn optional_url(&mut self, field: &'static str) -> Option<String> {
        let raw = self.form.value(field).trim();
        if raw.is_empty() {
            return None;
        }
        if Url::parse(raw).is_err() {
            self.fail(
                field,
                format!("O campo {} deve ser uma URL válida.", label(field)),
            );
        }
        Some(raw.to_string())
    }

    fn status(&mut self, field: &'static str) -> ClientStatus {
        let Some(raw) = self.required(field) else {
            return ClientStatus::default();
        };
        let raw = raw.trim();
        // A blank select coerces to 0, which is out of range.
        let id = if raw.is_empty() { Some(0) } else { raw.parse::<u8>().ok() };
        match id.and_then(ClientStatus::from_id) {
            Some(status) => status,
            None => {
                self.fail(field, STATUS_MESSAGE.to_string());
                ClientStatus::default()
            }
        }
    }
}
