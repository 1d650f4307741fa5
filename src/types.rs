/// Shared radar types used by the store, the service layer and the CLI client

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// A literal outside the allowed set for an enumerated field
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid {field}. Allowed: {}", .allowed.join(", "))]
pub struct InvalidLiteral {
    pub field: &'static str,
    pub value: String,
    pub allowed: &'static [&'static str],
}

/// Adoption stage of a technology
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Adopt,
    Trial,
    Assess,
    Hold,
}

impl Status {
    pub const ALLOWED: &'static [&'static str] = &["adopt", "trial", "assess", "hold"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Adopt => "adopt",
            Status::Trial => "trial",
            Status::Assess => "assess",
            Status::Hold => "hold",
        }
    }
}

impl FromStr for Status {
    type Err = InvalidLiteral;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "adopt" => Ok(Status::Adopt),
            "trial" => Ok(Status::Trial),
            "assess" => Ok(Status::Assess),
            "hold" => Ok(Status::Hold),
            other => Err(InvalidLiteral {
                field: "status",
                value: other.to_string(),
                allowed: Self::ALLOWED,
            }),
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Category bucket on the radar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Quadrant {
    LanguagesFrameworks,
    Techniques,
    Tools,
    Platforms,
}

impl Quadrant {
    pub const ALLOWED: &'static [&'static str] =
        &["languages-frameworks", "techniques", "tools", "platforms"];

    pub fn as_str(&self) -> &'static str {
        match self {
            Quadrant::LanguagesFrameworks => "languages-frameworks",
            Quadrant::Techniques => "techniques",
            Quadrant::Tools => "tools",
            Quadrant::Platforms => "platforms",
        }
    }
}

impl FromStr for Quadrant {
    type Err = InvalidLiteral;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "languages-frameworks" => Ok(Quadrant::LanguagesFrameworks),
            "techniques" => Ok(Quadrant::Techniques),
            "tools" => Ok(Quadrant::Tools),
            "platforms" => Ok(Quadrant::Platforms),
            other => Err(InvalidLiteral {
                field: "quadrant",
                value: other.to_string(),
                allowed: Self::ALLOWED,
            }),
        }
    }
}

impl fmt::Display for Quadrant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One technology assessment record as stored and as returned to clients.
///
/// `private` is carried through storage and responses but no read path
/// consults it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RadarEntry {
    pub id: Uuid,
    pub title: String,
    pub private: bool,
    pub status: Status,
    pub quadrant: Quadrant,
    pub reason: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A validated entry that has not been stored yet
#[derive(Debug, Clone, PartialEq)]
pub struct NewRadarEntry {
    pub title: String,
    pub private: bool,
    pub status: Status,
    pub quadrant: Quadrant,
    pub reason: String,
    pub description: String,
}
