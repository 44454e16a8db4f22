//! Wire codecs between universal values and text.

use crate::Result;
use mapsmith_core::Universal;

pub trait Marshaller {
    fn marshal(&self, value: &Universal) -> Result<String>;
}

pub trait Unmarshaller {
    fn unmarshal(&self, input: &str) -> Result<Universal>;
}

/// JSON codec backed by serde_json.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonMarshaller {
    pub pretty: bool,
}

impl JsonMarshaller {
    pub fn pretty() -> Self {
        Self { pretty: true }
    }
}

impl Marshaller for JsonMarshaller {
    fn marshal(&self, value: &Universal) -> Result<String> {
        let json = value.to_json()?;
        let text = if self.pretty {
            serde_json::to_string_pretty(&json)?
        } else {
            serde_json::to_string(&json)?
        };
        Ok(text)
    }
}

impl Unmarshaller for JsonMarshaller {
    fn unmarshal(&self, input: &str) -> Result<Universal> {
        let json: serde_json::Value = serde_json::from_str(input)?;
        Ok(Universal::from_json(json)?)
    }
}
