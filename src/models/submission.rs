use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::{
    models::validation::{ValidationError, validate_contact},
    utils::{lenient_string, lenient_vec, scalar_text},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ContactType {
    #[default]
    Telegram,
    WhatsApp,
}

impl ContactType {
    /// Anything other than "whatsapp" renders as a Telegram handle.
    pub fn from_string(s: &str) -> Self {
        if s.trim().eq_ignore_ascii_case("whatsapp") {
            ContactType::WhatsApp
        } else {
            ContactType::Telegram
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            ContactType::Telegram => "telegram",
            ContactType::WhatsApp => "whatsapp",
        }
    }
}

impl<'de> Deserialize<'de> for ContactType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Ok(scalar_text(Value::deserialize(deserializer)?)
            .map(|s| Self::from_string(&s))
            .unwrap_or_default())
    }
}

/// A monetary value kept in the form the storefront sent it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Amount(String);

impl Amount {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Amount {
    fn default() -> Self {
        Self("0".to_string())
    }
}

impl Display for Amount {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let amount = match Value::deserialize(deserializer)? {
            Value::Number(n) => Self(n.to_string()),
            Value::String(s) if !s.trim().is_empty() => Self(s.trim().to_string()),
            _ => Self::default(),
        };

        Ok(amount)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Contact {
    pub kind: ContactType,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct OrderItem {
    #[serde(default, deserialize_with = "lenient_string")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub detail: String,
    #[serde(default)]
    pub total: Amount,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    pub contact: Contact,
    pub items: Vec<OrderItem>,
    pub total: Amount,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Inquiry {
    pub contact: Contact,
    pub product_name: Option<String>,
    pub message: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionKind {
    Order,
    Inquiry,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    Order(Order),
    Inquiry(Inquiry),
}

impl Submission {
    /// Parses a raw request body. The endpoint decides the kind, not the
    /// shape of the payload.
    pub fn parse(kind: SubmissionKind, body: &[u8]) -> Result<Self, ValidationError> {
        let value = parse_object(body)?;

        match kind {
            SubmissionKind::Order => {
                let payload: OrderPayload =
                    serde_json::from_value(value).map_err(|_| ValidationError::MalformedBody)?;
                Ok(Submission::Order(Order {
                    contact: contact_from(payload.contact_type, &payload.contact)?,
                    items: payload.items,
                    total: payload.total,
                }))
            }
            SubmissionKind::Inquiry => {
                let payload: InquiryPayload =
                    serde_json::from_value(value).map_err(|_| ValidationError::MalformedBody)?;
                Ok(Submission::Inquiry(Inquiry {
                    contact: contact_from(payload.contact_type, &payload.contact)?,
                    product_name: non_blank(payload.product_name),
                    message: non_blank(payload.message),
                }))
            }
        }
    }

    pub fn contact(&self) -> &Contact {
        match self {
            Submission::Order(order) => &order.contact,
            Submission::Inquiry(inquiry) => &inquiry.contact,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct OrderPayload {
    #[serde(default)]
    contact_type: ContactType,
    #[serde(default, deserialize_with = "lenient_string")]
    contact: String,
    #[serde(default, deserialize_with = "lenient_vec")]
    items: Vec<OrderItem>,
    #[serde(default)]
    total: Amount,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InquiryPayload {
    #[serde(default)]
    contact_type: ContactType,
    #[serde(default, deserialize_with = "lenient_string")]
    contact: String,
    #[serde(default, deserialize_with = "lenient_string")]
    product_name: String,
    #[serde(default, deserialize_with = "lenient_string")]
    message: String,
}

fn parse_object(body: &[u8]) -> Result<Value, ValidationError> {
    let value: Value =
        serde_json::from_slice(body).map_err(|_| ValidationError::MalformedBody)?;

    match &value {
        Value::Object(map) if !map.is_empty() => Ok(value),
        _ => Err(ValidationError::EmptyPayload),
    }
}

fn contact_from(kind: ContactType, raw: &str) -> Result<Contact, ValidationError> {
    Ok(Contact {
        kind,
        value: validate_contact(raw)?,
    })
}

fn non_blank(value: String) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}
