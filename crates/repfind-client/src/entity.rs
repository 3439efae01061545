//! Company records and the raw-to-normalized mapping.
//!
//! [`RawEntity`] mirrors the registry's JSON object shape. Every field
//! carries `#[serde(default)]` so a partially populated payload still
//! deserializes; the live API returns wildly different subsets of fields
//! per company. `serde(deny_unknown_fields)` is intentionally NOT used.
//!
//! [`Entity`] is the fixed record shape consumed by output writers.
//! [`Entity::from_raw`] is a pure function: no I/O, no error on missing
//! fields, a hard error only for genuinely malformed data.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::RegistryError;

/// Company object as returned by the registry search endpoint.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct RawEntity {
    /// Registry-internal identifier.
    pub id: String,
    /// Taxpayer identification number.
    pub inn: String,
    /// State registration number.
    pub ogrn: String,
    /// Short company name.
    pub name: String,
    /// Alternative names; the first one is treated as the full name.
    pub other_names: Vec<String>,
    pub status: String,
    pub address: String,
    pub manager_name: String,
    pub main_activity_type: Option<ActivityType>,
    /// ISO-8601 date or date-time string, when present.
    pub registration_date: Option<String>,
    pub sites: Vec<String>,
    pub phones: Vec<String>,
    pub emails: Vec<String>,
}

/// Nested activity descriptor on the raw payload.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub struct ActivityType {
    pub name: String,
}

/// Normalized company record, one per successful lookup.
///
/// String fields default to empty rather than absent: a hole in the
/// registry data must not make the record unusable downstream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Entity {
    /// Registry-internal identifier.
    pub id: String,
    /// Taxpayer identification number the record was found under.
    pub inn: String,
    /// State registration number.
    pub ogrn: String,
    pub status: String,
    /// Short company name.
    pub name: String,
    /// Full (alternative) company name.
    pub full_name: String,
    pub address: String,
    /// Name of the current manager.
    pub manager: String,
    /// Description of the primary registered activity.
    pub activity: String,
    pub date_registered: Option<NaiveDate>,
    /// Primary website.
    pub website: String,
    /// Ordered, possibly truncated.
    pub phones: Vec<String>,
    /// Ordered, possibly truncated.
    pub emails: Vec<String>,
}

impl Entity {
    /// Normalize a raw registry object into the fixed record shape.
    ///
    /// `max_list_fields` caps the phone and e-mail lists; `None` keeps
    /// them whole.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::InvalidRegistrationDate`] when the raw
    /// payload carries a non-empty registration date that is not
    /// ISO-8601. A missing or empty date normalizes to `None`.
    pub fn from_raw(
        raw: RawEntity,
        max_list_fields: Option<usize>,
    ) -> Result<Self, RegistryError> {
        let date_registered = match raw.registration_date.as_deref() {
            None | Some("") => None,
            Some(value) => Some(parse_registration_date(value)?),
        };

        let mut phones = raw.phones;
        let mut emails = raw.emails;
        if let Some(cap) = max_list_fields {
            phones.truncate(cap);
            emails.truncate(cap);
        }

        Ok(Self {
            id: raw.id,
            inn: raw.inn,
            ogrn: raw.ogrn,
            status: raw.status,
            name: raw.name,
            full_name: raw.other_names.into_iter().next().unwrap_or_default(),
            address: raw.address,
            manager: raw.manager_name,
            activity: raw
                .main_activity_type
                .map(|a| a.name)
                .unwrap_or_default(),
            date_registered,
            website: raw.sites.into_iter().next().unwrap_or_default(),
            phones,
            emails,
        })
    }
}

/// Parse a registration date in any of the shapes the registry emits:
/// plain date, naive date-time, or date-time with a UTC offset.
fn parse_registration_date(value: &str) -> Result<NaiveDate, RegistryError> {
    if let Ok(date) = value.parse::<NaiveDate>() {
        return Ok(date);
    }
    if let Ok(dt) = value.parse::<chrono::NaiveDateTime>() {
        return Ok(dt.date());
    }
    chrono::DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.date_naive())
        .map_err(|source| RegistryError::InvalidRegistrationDate {
            value: value.to_string(),
            source,
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_from_json(json: serde_json::Value) -> RawEntity {
        serde_json::from_value(json).unwrap()
    }

    #[test]
    fn full_payload_maps_every_field() {
        let raw = raw_from_json(serde_json::json!({
            "Id": "reg-1",
            "Inn": "7707083893",
            "Ogrn": "1027700132195",
            "Name": "Sberbank",
            "OtherNames": ["PAO Sberbank", "Sberbank of Russia"],
            "Status": "Active",
            "Address": "Moscow, Vavilova st. 19",
            "ManagerName": "G. Gref",
            "MainActivityType": {"Name": "Banking"},
            "RegistrationDate": "2020-05-01",
            "Sites": ["sberbank.ru", "sber.ru"],
            "Phones": ["+7 495 500-55-50"],
            "Emails": ["info@sberbank.ru"]
        }));

        let entity = Entity::from_raw(raw, None).unwrap();
        assert_eq!(entity.inn, "7707083893");
        assert_eq!(entity.name, "Sberbank");
        assert_eq!(entity.full_name, "PAO Sberbank");
        assert_eq!(entity.activity, "Banking");
        assert_eq!(
            entity.date_registered,
            Some(NaiveDate::from_ymd_opt(2020, 5, 1).unwrap())
        );
        assert_eq!(entity.website, "sberbank.ru");
        assert_eq!(entity.phones, vec!["+7 495 500-55-50"]);
    }

    #[test]
    fn missing_fields_default_to_empty() {
        let raw = raw_from_json(serde_json::json!({"Inn": "123"}));
        let entity = Entity::from_raw(raw, None).unwrap();
        assert_eq!(entity.inn, "123");
        assert_eq!(entity.name, "");
        assert_eq!(entity.full_name, "");
        assert_eq!(entity.activity, "");
        assert_eq!(entity.website, "");
        assert_eq!(entity.date_registered, None);
        assert!(entity.phones.is_empty());
        assert!(entity.emails.is_empty());
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let raw = raw_from_json(serde_json::json!({
            "Inn": "123",
            "FutureField": {"nested": true}
        }));
        let entity = Entity::from_raw(raw, None).unwrap();
        assert_eq!(entity.inn, "123");
    }

    #[test]
    fn empty_other_names_yields_empty_full_name() {
        let raw = raw_from_json(serde_json::json!({"Inn": "123", "OtherNames": []}));
        let entity = Entity::from_raw(raw, None).unwrap();
        assert_eq!(entity.full_name, "");
    }

    #[test]
    fn list_fields_truncate_to_cap() {
        let raw = raw_from_json(serde_json::json!({
            "Phones": ["a", "b", "c", "d"],
            "Emails": ["x", "y", "z"]
        }));
        let entity = Entity::from_raw(raw, Some(2)).unwrap();
        assert_eq!(entity.phones, vec!["a", "b"]);
        assert_eq!(entity.emails, vec!["x", "y"]);
    }

    #[test]
    fn no_cap_keeps_lists_whole() {
        let raw = raw_from_json(serde_json::json!({"Phones": ["a", "b", "c", "d"]}));
        let entity = Entity::from_raw(raw, None).unwrap();
        assert_eq!(entity.phones.len(), 4);
    }

    #[test]
    fn datetime_registration_date_keeps_calendar_date() {
        let raw = raw_from_json(serde_json::json!({
            "RegistrationDate": "2015-09-18T23:56:04"
        }));
        let entity = Entity::from_raw(raw, None).unwrap();
        assert_eq!(
            entity.date_registered,
            Some(NaiveDate::from_ymd_opt(2015, 9, 18).unwrap())
        );
    }

    #[test]
    fn offset_registration_date_keeps_calendar_date() {
        let raw = raw_from_json(serde_json::json!({
            "RegistrationDate": "2015-09-18T23:56:04+03:00"
        }));
        let entity = Entity::from_raw(raw, None).unwrap();
        assert_eq!(
            entity.date_registered,
            Some(NaiveDate::from_ymd_opt(2015, 9, 18).unwrap())
        );
    }

    #[test]
    fn empty_registration_date_is_absent() {
        let raw = raw_from_json(serde_json::json!({"RegistrationDate": ""}));
        let entity = Entity::from_raw(raw, None).unwrap();
        assert_eq!(entity.date_registered, None);
    }

    #[test]
    fn malformed_registration_date_is_an_error() {
        let raw = raw_from_json(serde_json::json!({"RegistrationDate": "not-a-date"}));
        let result = Entity::from_raw(raw, None);
        match result {
            Err(RegistryError::InvalidRegistrationDate { value, .. }) => {
                assert_eq!(value, "not-a-date");
            }
            other => panic!("expected InvalidRegistrationDate, got: {other:?}"),
        }
    }
}
