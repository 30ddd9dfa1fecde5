use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Packed flag value that expects a content count
pub const PACKED: &str = "Y";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: i64,
    pub item_name: String,
    pub item_cost: i32,
    pub item_quantity: i32,
    pub item_pack: String,
    pub item_content: Option<i32>,
    pub item_dimensions: i32,
    pub item_origin_location: String,
    pub item_ship: bool,
    pub item_company: String,
    #[serde(with = "datetime_format")]
    pub item_manufacturing_date_time: NaiveDateTime,
    #[serde(with = "date_format")]
    pub item_expiry_date: NaiveDate,
}

/// An item that has not been persisted yet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewItem {
    pub item_name: String,
    pub item_cost: i32,
    pub item_quantity: i32,
    pub item_pack: String,
    pub item_content: Option<i32>,
    pub item_dimensions: i32,
    pub item_origin_location: String,
    pub item_ship: bool,
    pub item_company: String,
    pub item_manufacturing_date_time: NaiveDateTime,
    pub item_expiry_date: NaiveDate,
}

impl NewItem {
    pub fn into_item(self, id: i64) -> Item {
        Item {
            id,
            item_name: self.item_name,
            item_cost: self.item_cost,
            item_quantity: self.item_quantity,
            item_pack: self.item_pack,
            item_content: self.item_content,
            item_dimensions: self.item_dimensions,
            item_origin_location: self.item_origin_location,
            item_ship: self.item_ship,
            item_company: self.item_company,
            item_manufacturing_date_time: self.item_manufacturing_date_time,
            item_expiry_date: self.item_expiry_date,
        }
    }
}

/// Packed items should carry a content count; only ever warned about
pub fn is_missing_content(pack: Option<&str>, content: Option<i32>) -> bool {
    pack == Some(PACKED) && content.is_none()
}

/// `yyyy-MM-ddTHH:mm:ss` on the wire
pub(crate) mod datetime_format {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub(super) const FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

    pub fn serialize<S: Serializer>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&raw, FORMAT).map_err(serde::de::Error::custom)
    }
}

/// `yyyy-MM-dd` on the wire
pub(crate) mod date_format {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    pub(super) const FORMAT: &str = "%Y-%m-%d";

    pub fn serialize<S: Serializer>(value: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.format(FORMAT).to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveDate, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NaiveDate::parse_from_str(&raw, FORMAT).map_err(serde::de::Error::custom)
    }
}

/// Optional `yyyy-MM-ddTHH:mm:ss`, for request bodies
pub(crate) mod optional_datetime_format {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error> {
        match Option::<String>::deserialize(deserializer)? {
            Some(raw) => NaiveDateTime::parse_from_str(&raw, super::datetime_format::FORMAT)
                .map(Some)
                .map_err(serde::de::Error::custom),
            None => Ok(None),
        }
    }
}

/// Optional `yyyy-MM-dd`, for request bodies
pub(crate) mod optional_date_format {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer};

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<NaiveDate>, D::Error> {
        match Option::<String>::deserialize(deserializer)? {
            Some(raw) => NaiveDate::parse_from_str(&raw, super::date_format::FORMAT)
                .map(Some)
                .map_err(serde::de::Error::custom),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> NewItem {
        NewItem {
            item_name: "Widget".into(),
            item_cost: 10,
            item_quantity: 3,
            item_pack: "N".into(),
            item_content: None,
            item_dimensions: 40,
            item_origin_location: "Pune".into(),
            item_ship: true,
            item_company: "Acme".into(),
            item_manufacturing_date_time: NaiveDate::from_ymd_opt(2024, 1, 15)
                .unwrap()
                .and_hms_opt(9, 30, 0)
                .unwrap(),
            item_expiry_date: NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
        }
    }

    #[test]
    fn serializes_with_wire_names_and_formats() {
        let json = serde_json::to_value(sample().into_item(4)).unwrap();

        assert_eq!(json["id"], 4);
        assert_eq!(json["itemName"], "Widget");
        assert_eq!(json["itemOriginLocation"], "Pune");
        assert_eq!(json["itemManufacturingDateTime"], "2024-01-15T09:30:00");
        assert_eq!(json["itemExpiryDate"], "2026-01-15");
        assert!(json["itemContent"].is_null());
    }

    #[test]
    fn missing_content_only_matters_when_packed() {
        assert!(!is_missing_content(Some("N"), None));
        assert!(!is_missing_content(None, None));
        assert!(is_missing_content(Some("Y"), None));
        assert!(!is_missing_content(Some("Y"), Some(12)));
    }

    #[derive(Debug, serde::Deserialize)]
    struct Stamp {
        #[serde(default, with = "optional_datetime_format")]
        at: Option<NaiveDateTime>,
        #[serde(default, with = "optional_date_format")]
        on: Option<NaiveDate>,
    }

    #[test]
    fn optional_formats_are_as_strict_as_the_stored_ones() {
        let stamp: Stamp = serde_json::from_str(r#"{"at":"2024-01-15T10:30:00","on":"2025-02-01"}"#).unwrap();
        assert_eq!(stamp.at, NaiveDate::from_ymd_opt(2024, 1, 15).and_then(|d| d.and_hms_opt(10, 30, 0)));
        assert_eq!(stamp.on, NaiveDate::from_ymd_opt(2025, 2, 1));

        let empty: Stamp = serde_json::from_str("{}").unwrap();
        assert!(empty.at.is_none() && empty.on.is_none());

        assert!(serde_json::from_str::<Stamp>(r#"{"at":"2024-01-15T10:30:00.999"}"#).is_err());
        assert!(serde_json::from_str::<Stamp>(r#"{"at":"2024-01-15 10:30:00"}"#).is_err());
        assert!(serde_json::from_str::<Stamp>(r#"{"on":"01/02/2025"}"#).is_err());
    }
}
