//! Identity types for Verse entities

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Timestamp type using UTC timezone.
pub type Timestamp = DateTime<Utc>;

macro_rules! define_entity_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            pub const fn new(raw: i64) -> Self {
                Self(raw)
            }

            pub const fn get(self) -> i64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = std::num::ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim().parse::<i64>().map(Self)
            }
        }

        impl From<i64> for $name {
            fn from(raw: i64) -> Self {
                Self(raw)
            }
        }

        impl From<$name> for i64 {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

define_entity_id!(
    /// Store-assigned patient identifier. Zero is a valid id.
    PatientId
);

define_entity_id!(
    /// Store-assigned note identifier. Zero is a valid id.
    NoteId
);

/// Decode a patient reference that the store may emit as a number or as text.
pub(crate) fn deserialize_lenient_patient_id<'de, D>(deserializer: D) -> Result<PatientId, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Number(i64),
        Text(String),
    }

    match RawId::deserialize(deserializer)? {
        RawId::Number(raw) => Ok(PatientId(raw)),
        RawId::Text(text) => text
            .parse::<PatientId>()
            .map_err(|_| serde::de::Error::custom(format!("invalid patient id: {text:?}"))),
    }
}

/// Serde helpers for store timestamps.
///
/// The store emits ISO 8601 without an offset; values are read as UTC.
/// RFC 3339 with an explicit offset is accepted too.
pub mod store_timestamp {
    use super::*;
    use serde::Serializer;

    pub fn parse(raw: &str) -> Result<Timestamp, String> {
        if let Ok(with_offset) = DateTime::parse_from_rfc3339(raw) {
            return Ok(with_offset.with_timezone(&Utc));
        }
        NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
            .map(|naive| naive.and_utc())
            .map_err(|e| format!("invalid timestamp {raw:?}: {e}"))
    }

    pub fn serialize<S>(value: &Timestamp, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.to_rfc3339())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Timestamp, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).map_err(serde::de::Error::custom)
    }

    pub mod option {
        use super::*;

        pub fn serialize<S>(value: &Option<Timestamp>, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            match value {
                Some(ts) => serializer.serialize_some(&ts.to_rfc3339()),
                None => serializer.serialize_none(),
            }
        }

        pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Timestamp>, D::Error>
        where
            D: Deserializer<'de>,
        {
            let raw = Option::<String>::deserialize(deserializer)?;
            raw.map(|value| parse(&value).map_err(serde::de::Error::custom))
                .transpose()
        }
    }
}
