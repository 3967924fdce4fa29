//! Request inputs and the rules that turn them into validated values
//!
//! Inputs are lenient: every field is optional and a field of the wrong JSON
//! type reads as absent, so a malformed field is reported with the same
//! message as an empty one. Rules run in a fixed order and only the first
//! failure is reported.

use crate::types::{Destination, NewItinerary};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::Value;
use thiserror::Error;

pub const TITLE_REQUIRED: &str = "Title is required";
pub const DESTINATIONS_REQUIRED: &str = "At least one destination is required";
pub const LOCATION_REQUIRED: &str = "Location is required";
pub const START_DATE_INVALID: &str = "Valid start date is required";
pub const END_DATE_INVALID: &str = "Valid end date is required";

pub const NAME_REQUIRED: &str = "Name is required";
pub const EMAIL_INVALID: &str = "Please include a valid email";
pub const PASSWORD_TOO_SHORT: &str = "Password must be at least 6 characters";
pub const CREDENTIALS_REQUIRED: &str = "Email and password are required";

/// Minimum accepted password length, in characters
pub const MIN_PASSWORD_LEN: usize = 6;

/// The first rule an input failed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct ValidationError(pub &'static str);

impl ValidationError {
    /// Human-readable message for the failed rule
    pub fn message(&self) -> &'static str {
        self.0
    }
}

/// Itinerary body for create and update requests
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItineraryInput {
    #[serde(
        default,
        deserialize_with = "deserialize_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub title: Option<String>,
    #[serde(
        default,
        deserialize_with = "deserialize_destinations",
        skip_serializing_if = "Option::is_none"
    )]
    pub destinations: Option<Vec<DestinationInput>>,
}

/// One destination inside an [`ItineraryInput`]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DestinationInput {
    #[serde(
        default,
        deserialize_with = "deserialize_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub location: Option<String>,
    #[serde(
        default,
        deserialize_with = "deserialize_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub start_date: Option<String>,
    #[serde(
        default,
        deserialize_with = "deserialize_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub end_date: Option<String>,
    #[serde(
        default,
        deserialize_with = "deserialize_text",
        skip_serializing_if = "Option::is_none"
    )]
    pub notes: Option<String>,
    #[serde(default, deserialize_with = "deserialize_coordinate")]
    pub latitude: Option<f64>,
    #[serde(default, deserialize_with = "deserialize_coordinate")]
    pub longitude: Option<f64>,
}

impl ItineraryInput {
    /// Check every rule and produce the trimmed, parsed itinerary
    pub fn validate(&self) -> Result<NewItinerary, ValidationError> {
        let title = non_empty(self.title.as_deref()).ok_or(ValidationError(TITLE_REQUIRED))?;

        let inputs = match self.destinations.as_deref() {
            Some(inputs) if !inputs.is_empty() => inputs,
            _ => return Err(ValidationError(DESTINATIONS_REQUIRED)),
        };

        // Each rule is checked across all rows before the next rule runs.
        let locations = inputs
            .iter()
            .map(|d| non_empty(d.location.as_deref()).ok_or(ValidationError(LOCATION_REQUIRED)))
            .collect::<Result<Vec<_>, _>>()?;
        let start_dates = inputs
            .iter()
            .map(|d| {
                d.start_date
                    .as_deref()
                    .and_then(parse_iso8601)
                    .ok_or(ValidationError(START_DATE_INVALID))
            })
            .collect::<Result<Vec<_>, _>>()?;
        let end_dates = inputs
            .iter()
            .map(|d| {
                d.end_date
                    .as_deref()
                    .and_then(parse_iso8601)
                    .ok_or(ValidationError(END_DATE_INVALID))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let destinations = inputs
            .iter()
            .zip(locations)
            .zip(start_dates.into_iter().zip(end_dates))
            .map(|((input, location), (start_date, end_date))| Destination {
                location,
                start_date,
                end_date,
                notes: non_empty(input.notes.as_deref()),
                latitude: input.latitude,
                longitude: input.longitude,
            })
            .collect();

        Ok(NewItinerary {
            title,
            destinations,
        })
    }
}

impl From<&Destination> for DestinationInput {
    fn from(destination: &Destination) -> Self {
        Self {
            location: Some(destination.location.clone()),
            start_date: Some(destination.start_date.to_rfc3339()),
            end_date: Some(destination.end_date.to_rfc3339()),
            notes: destination.notes.clone(),
            latitude: destination.latitude,
            longitude: destination.longitude,
        }
    }
}

impl From<&NewItinerary> for ItineraryInput {
    fn from(itinerary: &NewItinerary) -> Self {
        Self {
            title: Some(itinerary.title.clone()),
            destinations: Some(itinerary.destinations.iter().map(Into::into).collect()),
        }
    }
}

/// Body of `POST /auth/register`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegisterInput {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

/// A registration that passed validation; the password is still plain text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl RegisterInput {
    pub fn validate(&self) -> Result<Registration, ValidationError> {
        let name = non_empty(self.name.as_deref()).ok_or(ValidationError(NAME_REQUIRED))?;
        let email = self
            .email
            .as_deref()
            .and_then(normalize_email)
            .ok_or(ValidationError(EMAIL_INVALID))?;
        let password = match self.password.as_deref() {
            Some(p) if p.chars().count() >= MIN_PASSWORD_LEN => p.to_string(),
            _ => return Err(ValidationError(PASSWORD_TOO_SHORT)),
        };

        Ok(Registration {
            name,
            email,
            password,
        })
    }
}

/// Body of `POST /auth/login`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoginInput {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

impl LoginInput {
    /// Returns the normalized email and the password
    pub fn validate(&self) -> Result<(String, String), ValidationError> {
        let email = self
            .email
            .as_deref()
            .and_then(normalize_email)
            .ok_or(ValidationError(CREDENTIALS_REQUIRED))?;
        let password = match self.password.as_deref() {
            Some(p) if !p.is_empty() => p.to_string(),
            _ => return Err(ValidationError(CREDENTIALS_REQUIRED)),
        };
        Ok((email, password))
    }
}

/// Parse the ISO 8601 forms a date input or API caller may send
///
/// Accepts RFC 3339 timestamps, naive date-times (taken as UTC) and plain
/// calendar dates (midnight UTC).
pub fn parse_iso8601(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }

    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Trim and lower-case an email, rejecting anything not shaped `local@domain.tld`
pub fn normalize_email(raw: &str) -> Option<String> {
    let email = raw.trim().to_lowercase();
    if email.chars().any(char::is_whitespace) {
        return None;
    }

    let (local, domain) = email.split_once('@')?;
    if local.is_empty() || domain.contains('@') {
        return None;
    }

    let (host, tld) = domain.rsplit_once('.')?;
    if host.is_empty() || tld.is_empty() {
        return None;
    }

    Some(email)
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

/// Strings pass through and scalars read as their text. Anything else is
/// absent, leaving the field's rule to report it.
fn deserialize_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::Bool(b)) => Some(b.to_string()),
        _ => None,
    })
}

/// A non-array reads as absent and a non-object row as a blank row
fn deserialize_destinations<'de, D>(
    deserializer: D,
) -> Result<Option<Vec<DestinationInput>>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(Value::Array(rows)) = Option::<Value>::deserialize(deserializer)? else {
        return Ok(None);
    };

    rows.into_iter()
        .map(|row| match row {
            Value::Object(_) => {
                DestinationInput::deserialize(row).map_err(<D::Error as de::Error>::custom)
            }
            _ => Ok(DestinationInput::default()),
        })
        .collect::<Result<Vec<_>, _>>()
        .map(Some)
}

/// HTML number inputs submit `""` when blank and numeric strings otherwise
fn deserialize_coordinate<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
    }

    match Option::<Raw>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Raw::Number(n)) => Ok(Some(n)),
        Some(Raw::Text(s)) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return Ok(None);
            }
            trimmed
                .parse::<f64>()
                .ok()
                .filter(|n| n.is_finite())
                .map(Some)
                .ok_or_else(|| de::Error::custom(format!("invalid coordinate: {s}")))
        }
    }
}
