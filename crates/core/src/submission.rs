//! Lead submission types.

use chrono::{DateTime, SecondsFormat, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::Result;
use crate::limits::ID_SUFFIX_LEN;
use crate::sanitize::LeadForm;

/// Origin form of a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FormType {
    Contact,
    Consultation,
    Catalogue,
}

impl FormType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Contact => "contact",
            Self::Consultation => "consultation",
            Self::Catalogue => "catalogue",
        }
    }
}

impl FromStr for FormType {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "contact" => Ok(Self::Contact),
            "consultation" => Ok(Self::Consultation),
            "catalogue" => Ok(Self::Catalogue),
            _ => Err(()),
        }
    }
}

impl std::fmt::Display for FormType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw request body as posted by the site forms.
///
/// Every field is optional here so that a missing or unknown `formType`
/// surfaces as a validation error rather than a parse failure.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadPayload {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub city: Option<String>,
    pub investment_range: Option<String>,
    pub message: Option<String>,
    pub budget: Option<String>,
    pub preferred_location: Option<String>,
    /// Kept as raw JSON: a non-string value is an invalid form type, not
    /// an unreadable body.
    pub form_type: Option<serde_json::Value>,
}

impl LeadPayload {
    /// Parse a JSON request body.
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(bytes)?)
    }
}

/// A stored lead record. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Submission {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub investment_range: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferred_location: Option<String>,
    pub form_type: FormType,
    /// ISO-8601 UTC, millisecond precision.
    pub submitted_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
}

impl Submission {
    /// Builds a record from a sanitized, validated form.
    pub fn new(form: LeadForm, form_type: FormType, user_agent: Option<String>) -> Self {
        Self::new_at(form, form_type, user_agent, Utc::now())
    }

    pub fn new_at(
        form: LeadForm,
        form_type: FormType,
        user_agent: Option<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: generate_submission_id(now),
            name: form.name,
            email: form.email,
            phone: form.phone,
            city: form.city,
            investment_range: form.investment_range,
            message: form.message,
            budget: form.budget,
            preferred_location: form.preferred_location,
            form_type,
            submitted_at: now.to_rfc3339_opts(SecondsFormat::Millis, true),
            user_agent,
        }
    }
}

/// Generates `<epochMillis>-<base36 suffix>`.
///
/// Collision-improbable, not unique by construction.
pub fn generate_submission_id(now: DateTime<Utc>) -> String {
    const ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

    let mut rng = rand::thread_rng();
    let suffix: String = (0..ID_SUFFIX_LEN)
        .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
        .collect();

    format!("{}-{}", now.timestamp_millis(), suffix)
}
