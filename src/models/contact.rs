//! School staff contacts.

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::MAIL_DOMAIN;
use super::de;
use super::user::Person;

/// Homeroom class designation, e.g. `3.B`.
const HOMEROOM_PATTERN: &str = r"[1-6]\.[A-F]";

/// Contact listing category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum ContactCategory {
    Teacher,
    Canteen,
    Other,
}

impl ContactCategory {
    /// Numeric code used by the API.
    pub fn code(self) -> i64 {
        match self {
            Self::Teacher => 1,
            Self::Canteen => 2,
            Self::Other => 3,
        }
    }
}

impl TryFrom<i64> for ContactCategory {
    type Error = String;

    fn try_from(code: i64) -> std::result::Result<Self, Self::Error> {
        match code {
            1 => Ok(Self::Teacher),
            2 => Ok(Self::Canteen),
            3 => Ok(Self::Other),
            other => Err(format!("unknown contact category {other}")),
        }
    }
}

impl From<ContactCategory> for i64 {
    fn from(category: ContactCategory) -> Self {
        category.code()
    }
}

#[derive(Deserialize)]
struct RawContact {
    #[serde(default)]
    description: Option<String>,
    name: String,
    #[serde(default, deserialize_with = "de::string_or_empty")]
    phone: String,
    #[serde(default, deserialize_with = "de::string_or_empty")]
    mail: String,
    #[serde(default, deserialize_with = "de::string_or_empty")]
    degree: String,
    #[serde(default, deserialize_with = "de::string_or_empty")]
    degree2: String,
    #[serde(rename = "type", deserialize_with = "de::int")]
    category: i64,
}

/// A contact for a school employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawContact")]
pub struct Contact {
    pub name: String,
    pub description: Option<String>,
    pub phone: String,

    /// Local part of the school mailbox
    #[serde(rename = "mail")]
    pub mail_local: String,

    /// Degree written before the name, trimmed
    pub degree: String,

    /// Degree written after the name, trimmed
    pub degree2: String,

    #[serde(rename = "type")]
    pub category: ContactCategory,
}

impl TryFrom<RawContact> for Contact {
    type Error = String;

    fn try_from(raw: RawContact) -> std::result::Result<Self, Self::Error> {
        Ok(Self {
            name: raw.name,
            description: raw.description,
            phone: raw.phone,
            mail_local: raw.mail,
            degree: raw.degree.trim().to_string(),
            degree2: raw.degree2.trim().to_string(),
            category: ContactCategory::try_from(raw.category)?,
        })
    }
}

impl Contact {
    /// Name with degrees, e.g. `Mgr. Jana Nováková Ph.D.`.
    pub fn full_name(&self) -> String {
        [self.degree.as_str(), self.name.as_str(), self.degree2.as_str()]
            .into_iter()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// The class this teacher is homeroom teacher of.
    pub fn homeroom(&self) -> Option<&str> {
        let description = self.description.as_deref()?;
        let pattern = Regex::new(HOMEROOM_PATTERN).ok()?;
        pattern.find(description).map(|m| m.as_str())
    }
}

impl Person for Contact {
    fn name(&self) -> &str {
        &self.name
    }

    fn mail(&self) -> String {
        if self.mail_local.is_empty() {
            return String::new();
        }
        format!("{}{MAIL_DOMAIN}", self.mail_local)
    }

    fn display_name(&self) -> String {
        self.full_name()
    }
}
