use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Attendee details as typed into the registration form.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistrationFields {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub nama: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub sekolah: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub instagram: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub no_hp: String,
}

impl RegistrationFields {
    /// Names of required fields that are empty, in form order.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("nama", &self.nama),
            ("sekolah", &self.sekolah),
            ("instagram", &self.instagram),
            ("no_hp", &self.no_hp),
        ]
        .into_iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(name, _)| name)
        .collect()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// One registration as persisted by the external store.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Registration {
    #[serde(rename = "objectId")]
    pub object_id: String,
    #[serde(flatten)]
    pub fields: RegistrationFields,
    #[serde(deserialize_with = "created_timestamp")]
    pub created: DateTime<Utc>,
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum SortOrder {
    #[default]
    CreatedDesc,
}

impl SortOrder {
    pub fn as_param(&self) -> &'static str {
        match self {
            SortOrder::CreatedDesc => "created desc",
        }
    }
}

#[derive(Clone, Debug)]
pub struct ListQuery {
    pub page_size: u32,
    pub order: SortOrder,
}

impl ListQuery {
    pub fn newest_first(page_size: u32) -> Self {
        Self {
            page_size,
            order: SortOrder::CreatedDesc,
        }
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawTimestamp {
    Millis(i64),
    Text(String),
}

// Backendless reports `created` as epoch milliseconds; accept RFC 3339 too.
fn created_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    match RawTimestamp::deserialize(deserializer)? {
        RawTimestamp::Millis(ms) => Utc
            .timestamp_millis_opt(ms)
            .single()
            .ok_or_else(|| D::Error::custom(format!("timestamp out of range: {ms}"))),
        RawTimestamp::Text(text) => DateTime::parse_from_rfc3339(&text)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|err| D::Error::custom(format!("invalid timestamp {text:?}: {err}"))),
    }
}
