use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::database::models::item::{is_missing_content, optional_date_format, optional_datetime_format};
use crate::validation::{FieldError, Validate, Validator};

const PACK_VALUES: &[&str] = &["Y", "N"];

/// Body of `POST /users`. An `isImmutable` flag in the body is ignored.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub username: Option<String>,
    pub password: Option<String>,
    pub role: Option<String>,
}

impl Validate for SignupRequest {
    fn validate(&self) -> Vec<FieldError> {
        Validator::new()
            .not_blank("username", self.username.as_deref(), "Username is required")
            .not_blank("password", self.password.as_deref(), "Password is required")
            .not_blank("role", self.role.as_deref(), "Role is required")
            .finish()
    }
}

/// Transport shape of `POST /items`; cost arrives as text and is parsed later.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemPayload {
    pub item_name: Option<String>,
    #[serde(default, deserialize_with = "string_or_number")]
    pub item_cost: Option<String>,
    pub item_quantity: Option<i32>,
    pub item_pack: Option<String>,
    pub item_content: Option<i32>,
    pub item_dimensions: Option<i32>,
    pub item_origin_location: Option<String>,
    pub item_ship: Option<bool>,
    pub item_company: Option<String>,
    #[serde(default, with = "optional_datetime_format")]
    pub item_manufacturing_date_time: Option<NaiveDateTime>,
    #[serde(default, with = "optional_date_format")]
    pub item_expiry_date: Option<NaiveDate>,
}

impl ItemPayload {
    pub fn is_missing_content(&self) -> bool {
        is_missing_content(self.item_pack.as_deref(), self.item_content)
    }
}

impl Validate for ItemPayload {
    fn validate(&self) -> Vec<FieldError> {
        // An unparseable cost is reported by the conversion step, not here.
        let parsed_cost = self.item_cost.as_deref().and_then(|c| c.parse::<i32>().ok());

        Validator::new()
            .not_blank("itemName", self.item_name.as_deref(), "Item name is required")
            .min("itemCost", parsed_cost, 1, "Item cost must be greater than zero")
            .not_null("itemQuantity", self.item_quantity.as_ref(), "Item quantity is required")
            .not_null("itemPack", self.item_pack.as_ref(), "Item pack must be Y or N")
            .one_of("itemPack", self.item_pack.as_deref(), PACK_VALUES, "Item pack must be Y or N")
            .not_null("itemDimensions", self.item_dimensions.as_ref(), "Item dimensions are required")
            .not_blank(
                "itemOriginLocation",
                self.item_origin_location.as_deref(),
                "Item origin location is required",
            )
            .not_null("itemShip", self.item_ship.as_ref(), "Item ship is required")
            .not_blank("itemCompany", self.item_company.as_deref(), "Item company is required")
            .not_null(
                "itemManufacturingDateTime",
                self.item_manufacturing_date_time.as_ref(),
                "Manufacturing date & time is required",
            )
            .not_null("itemExpiryDate", self.item_expiry_date.as_ref(), "Expiry date is required")
            .finish()
    }
}

/// Body of `PUT /items/{id}`: the stored shape with every field optional.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemUpdate {
    pub item_name: Option<String>,
    #[serde(default, deserialize_with = "integer_or_numeric_string")]
    pub item_cost: Option<i32>,
    pub item_quantity: Option<i32>,
    pub item_pack: Option<String>,
    pub item_content: Option<i32>,
    pub item_dimensions: Option<i32>,
    pub item_origin_location: Option<String>,
    pub item_ship: Option<bool>,
    pub item_company: Option<String>,
    #[serde(default, with = "optional_datetime_format")]
    pub item_manufacturing_date_time: Option<NaiveDateTime>,
    #[serde(default, with = "optional_date_format")]
    pub item_expiry_date: Option<NaiveDate>,
}

impl ItemUpdate {
    pub fn is_missing_content(&self) -> bool {
        is_missing_content(self.item_pack.as_deref(), self.item_content)
    }
}

impl Validate for ItemUpdate {
    fn validate(&self) -> Vec<FieldError> {
        Validator::new()
            .not_blank_if_present("itemName", self.item_name.as_deref(), "Item name is required")
            .min("itemCost", self.item_cost, 1, "Item cost must be greater than zero")
            .one_of("itemPack", self.item_pack.as_deref(), PACK_VALUES, "Item pack must be Y or N")
            .not_blank_if_present(
                "itemOriginLocation",
                self.item_origin_location.as_deref(),
                "Item origin location is required",
            )
            .not_blank_if_present("itemCompany", self.item_company.as_deref(), "Item company is required")
            .finish()
    }
}

/// Accepts `"12"` or `12` for a text field
fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(other) => Err(serde::de::Error::custom(format!(
            "expected a string or number, found {}",
            other
        ))),
    }
}

/// Accepts `12` or `"12"` for an integer field; any other text is an error
fn integer_or_numeric_string<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    match string_or_number(deserializer)? {
        Some(raw) => raw
            .trim()
            .parse::<i32>()
            .map(Some)
            .map_err(|_| serde::de::Error::custom(format!("expected an integer, found \"{}\"", raw))),
        None => Ok(None),
    }
}
