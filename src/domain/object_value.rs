use crate::domain::model::{Contact, DurationValue, Predecessor};
use crate::utils::error::{ApiError, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

const DATE_FORMAT: &str = "%Y-%m-%d";
const ABSTRACT_DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Typed representation of a cell's polymorphic wire value.
///
/// The closed variant set mirrors the service's object-value types. Scalar
/// variants travel as bare JSON scalars; the structured variants travel as
/// objects tagged with an `objectType` field.
#[derive(Debug, Clone, PartialEq)]
pub enum ObjectValue {
    Boolean(bool),
    Number(f64),
    Text(String),
    Date(NaiveDate),
    DateTime(DateTime<Utc>),
    AbstractDateTime(NaiveDateTime),
    Duration(DurationValue),
    PredecessorList(Vec<Predecessor>),
    Contact(Contact),
}

impl ObjectValue {
    pub fn object_type(&self) -> &'static str {
        match self {
            ObjectValue::Boolean(_) => "BOOLEAN",
            ObjectValue::Number(_) => "NUMBER",
            ObjectValue::Text(_) => "STRING",
            ObjectValue::Date(_) => "DATE",
            ObjectValue::DateTime(_) => "DATETIME",
            ObjectValue::AbstractDateTime(_) => "ABSTRACT_DATETIME",
            ObjectValue::Duration(_) => "DURATION",
            ObjectValue::PredecessorList(_) => "PREDECESSOR_LIST",
            ObjectValue::Contact(_) => "CONTACT",
        }
    }

    /// Decode a raw wire value.
    ///
    /// Precedence: an explicit `objectType` tag wins; untagged scalars are
    /// inferred from shape (boolean, number, date-patterned string, text).
    /// Any other shape is a decode error, never a silent default.
    pub fn from_wire(value: &Value) -> Result<Self> {
        match value {
            Value::Bool(b) => Ok(ObjectValue::Boolean(*b)),
            Value::Number(n) => n.as_f64().map(ObjectValue::Number).ok_or_else(|| {
                ApiError::Decode {
                    message: format!("cell value {} is not representable as f64", n),
                }
            }),
            Value::String(s) => Ok(Self::infer_string(s)),
            Value::Object(fields) => {
                let tag = fields
                    .get("objectType")
                    .and_then(Value::as_str)
                    .ok_or_else(|| ApiError::Decode {
                        message: "structured cell value is missing objectType".to_string(),
                    })?;
                Self::from_tagged(tag, value)
            }
            other => Err(ApiError::Decode {
                message: format!("unrecognized cell value shape: {}", other),
            }),
        }
    }

    fn infer_string(s: &str) -> Self {
        if let Ok(date) = NaiveDate::parse_from_str(s, DATE_FORMAT) {
            return ObjectValue::Date(date);
        }
        if let Ok(datetime) = DateTime::parse_from_rfc3339(s) {
            return ObjectValue::DateTime(datetime.with_timezone(&Utc));
        }
        if let Ok(datetime) = NaiveDateTime::parse_from_str(s, ABSTRACT_DATETIME_FORMAT) {
            return ObjectValue::AbstractDateTime(datetime);
        }
        ObjectValue::Text(s.to_string())
    }

    fn from_tagged(tag: &str, value: &Value) -> Result<Self> {
        match tag {
            "DATE" => {
                let raw = tagged_scalar(tag, value)?;
                let date = NaiveDate::parse_from_str(raw, DATE_FORMAT).map_err(|e| {
                    ApiError::Decode {
                        message: format!("invalid DATE value '{}': {}", raw, e),
                    }
                })?;
                Ok(ObjectValue::Date(date))
            }
            "DATETIME" => {
                let raw = tagged_scalar(tag, value)?;
                let datetime = DateTime::parse_from_rfc3339(raw).map_err(|e| ApiError::Decode {
                    message: format!("invalid DATETIME value '{}': {}", raw, e),
                })?;
                Ok(ObjectValue::DateTime(datetime.with_timezone(&Utc)))
            }
            "ABSTRACT_DATETIME" => {
                let raw = tagged_scalar(tag, value)?;
                let datetime = NaiveDateTime::parse_from_str(raw, ABSTRACT_DATETIME_FORMAT)
                    .map_err(|e| ApiError::Decode {
                        message: format!("invalid ABSTRACT_DATETIME value '{}': {}", raw, e),
                    })?;
                Ok(ObjectValue::AbstractDateTime(datetime))
            }
            "DURATION" => {
                let duration: DurationValue = serde_json::from_value(value.clone())?;
                Ok(ObjectValue::Duration(duration))
            }
            "PREDECESSOR_LIST" => {
                let predecessors = match value.get("predecessors") {
                    Some(list) => serde_json::from_value(list.clone())?,
                    None => Vec::new(),
                };
                Ok(ObjectValue::PredecessorList(predecessors))
            }
            "CONTACT" => {
                let contact: Contact = serde_json::from_value(value.clone())?;
                Ok(ObjectValue::Contact(contact))
            }
            other => Err(ApiError::Decode {
                message: format!("unrecognized objectType '{}'", other),
            }),
        }
    }
}

fn tagged_scalar<'a>(tag: &str, value: &'a Value) -> Result<&'a str> {
    value
        .get("value")
        .and_then(Value::as_str)
        .ok_or_else(|| ApiError::Decode {
            message: format!("{} object value is missing its 'value' field", tag),
        })
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Tagged<'a, T: Serialize> {
    object_type: &'static str,
    #[serde(flatten)]
    value: &'a T,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TaggedScalar {
    object_type: &'static str,
    value: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TaggedPredecessors<'a> {
    object_type: &'static str,
    predecessors: &'a [Predecessor],
}

impl Serialize for ObjectValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            ObjectValue::Boolean(b) => serializer.serialize_bool(*b),
            ObjectValue::Number(n) => serializer.serialize_f64(*n),
            ObjectValue::Text(s) => serializer.serialize_str(s),
            ObjectValue::Date(d) => {
                serializer.serialize_str(&d.format(DATE_FORMAT).to_string())
            }
            ObjectValue::DateTime(dt) => serializer.serialize_str(&dt.to_rfc3339()),
            ObjectValue::AbstractDateTime(dt) => TaggedScalar {
                object_type: "ABSTRACT_DATETIME",
                value: dt.format(ABSTRACT_DATETIME_FORMAT).to_string(),
            }
            .serialize(serializer),
            ObjectValue::Duration(d) => Tagged {
                object_type: "DURATION",
                value: d,
            }
            .serialize(serializer),
            ObjectValue::PredecessorList(p) => TaggedPredecessors {
                object_type: "PREDECESSOR_LIST",
                predecessors: p,
            }
            .serialize(serializer),
            ObjectValue::Contact(c) => Tagged {
                object_type: "CONTACT",
                value: c,
            }
            .serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for ObjectValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        ObjectValue::from_wire(&value).map_err(D::Error::custom)
    }
}
