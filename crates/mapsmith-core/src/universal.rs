//! The generic tree-shaped wire value.

use crate::error::{Error, Result};
use indexmap::IndexMap;
use serde_json::{Map, Number, Value};

#[derive(Debug, Clone, PartialEq)]
pub enum Universal {
    Null,
    Boolean(bool),
    Integer(i64),
    Double(f64),
    String(String),
    Object(IndexMap<String, Universal>),
    Collection(Vec<Universal>),
}

impl Universal {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Boolean(_) => "boolean",
            Self::Integer(_) => "integer",
            Self::Double(_) => "double",
            Self::String(_) => "string",
            Self::Object(_) => "object",
            Self::Collection(_) => "collection",
        }
    }

    pub fn is_primitive(&self) -> bool {
        matches!(
            self,
            Self::Boolean(_) | Self::Integer(_) | Self::Double(_) | Self::String(_)
        )
    }

    pub fn as_object(&self) -> Option<&IndexMap<String, Universal>> {
        match self {
            Self::Object(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_collection(&self) -> Option<&[Universal]> {
        match self {
            Self::Collection(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn from_json(value: Value) -> Result<Self> {
        Ok(match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Boolean(b),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Self::Integer(i)
                } else if let Some(f) = n.as_f64() {
                    Self::Double(f)
                } else {
                    return Err(Error::UnrepresentableJson(n.to_string()));
                }
            }
            Value::String(s) => Self::String(s),
            Value::Array(items) => Self::Collection(
                items
                    .into_iter()
                    .map(Self::from_json)
                    .collect::<Result<Vec<_>>>()?,
            ),
            Value::Object(map) => Self::Object(
                map.into_iter()
                    .map(|(k, v)| Ok((k, Self::from_json(v)?)))
                    .collect::<Result<IndexMap<_, _>>>()?,
            ),
        })
    }

    pub fn to_json(&self) -> Result<Value> {
        Ok(match self {
            Self::Null => Value::Null,
            Self::Boolean(b) => Value::Bool(*b),
            Self::Integer(i) => Value::Number(Number::from(*i)),
            Self::Double(f) => Value::Number(
                Number::from_f64(*f).ok_or_else(|| Error::UnrepresentableJson(f.to_string()))?,
            ),
            Self::String(s) => Value::String(s.clone()),
            Self::Collection(items) => {
                Value::Array(items.iter().map(Self::to_json).collect::<Result<Vec<_>>>()?)
            }
            Self::Object(map) => {
                let mut object = Map::new();
                for (key, value) in map {
                    object.insert(key.clone(), value.to_json()?);
                }
                Value::Object(object)
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_json_conversion() {
        let value = json!({"name": "x", "tags": ["a", "b"], "age": 3, "ratio": 0.5, "ok": true, "none": null});
        let universal = Universal::from_json(value.clone()).unwrap();
        let object = universal.as_object().unwrap();
        assert_eq!(object["age"], Universal::Integer(3));
        assert_eq!(object["ratio"], Universal::Double(0.5));
        assert_eq!(object["tags"].as_collection().unwrap().len(), 2);
        assert_eq!(universal.to_json().unwrap(), value);
    }

    #[test]
    fn test_nan_cannot_be_written() {
        assert!(Universal::Double(f64::NAN).to_json().is_err());
    }
}
