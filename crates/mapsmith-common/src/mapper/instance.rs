use indexmap::IndexMap;
use mapsmith_core::candidate::mirrors;
use mapsmith_core::{TypeIdentifier, Universal};

/// A native value as the mapper sees it.
#[derive(Debug, Clone, PartialEq)]
pub enum Instance {
    Null,
    /// A built-in or custom primitive holding its scalar value.
    Scalar {
        type_identifier: TypeIdentifier,
        value: Universal,
    },
    Object {
        type_identifier: TypeIdentifier,
        fields: IndexMap<String, Instance>,
    },
    Collection {
        type_identifier: TypeIdentifier,
        elements: Vec<Instance>,
    },
    /// Key/value entries in insertion order.
    Map {
        type_identifier: TypeIdentifier,
        entries: Vec<(Instance, Instance)>,
    },
}

impl Instance {
    pub fn scalar(type_identifier: TypeIdentifier, value: Universal) -> Self {
        Self::Scalar { type_identifier, value }
    }

    pub fn object(type_identifier: TypeIdentifier, fields: impl IntoIterator<Item = (String, Instance)>) -> Self {
        Self::Object {
            type_identifier,
            fields: fields.into_iter().collect(),
        }
    }

    pub fn type_identifier(&self) -> Option<&TypeIdentifier> {
        match self {
            Self::Null => None,
            Self::Scalar { type_identifier, .. }
            | Self::Object { type_identifier, .. }
            | Self::Collection { type_identifier, .. }
            | Self::Map { type_identifier, .. } => Some(type_identifier),
        }
    }

    pub fn describe(&self) -> String {
        match self {
            Self::Null => "null".to_string(),
            Self::Scalar { value, .. } => format!("scalar {}", value.kind()),
            Self::Object { .. } => "object".to_string(),
            Self::Collection { .. } => "collection".to_string(),
            Self::Map { .. } => "map".to_string(),
        }
    }

    /// Equality that accepts a collection or array standing in for one another.
    pub fn mirrors(&self, other: &Instance) -> bool {
        let same_type = |a: &TypeIdentifier, b: &TypeIdentifier| mirrors(a, b);
        match (self, other) {
            (Self::Null, Self::Null) => true,
            (
                Self::Scalar { type_identifier: a, value: x },
                Self::Scalar { type_identifier: b, value: y },
            ) => same_type(a, b) && x == y,
            (
                Self::Object { type_identifier: a, fields: x },
                Self::Object { type_identifier: b, fields: y },
            ) => {
                same_type(a, b)
                    && x.len() == y.len()
                    && x.iter().all(|(name, value)| y.get(name).is_some_and(|v| value.mirrors(v)))
            }
            (
                Self::Collection { type_identifier: a, elements: x },
                Self::Collection { type_identifier: b, elements: y },
            ) => same_type(a, b) && x.len() == y.len() && x.iter().zip(y).all(|(l, r)| l.mirrors(r)),
            (
                Self::Map { type_identifier: a, entries: x },
                Self::Map { type_identifier: b, entries: y },
            ) => {
                same_type(a, b)
                    && x.len() == y.len()
                    && x.iter()
                        .zip(y)
                        .all(|((lk, lv), (rk, rv))| lk.mirrors(rk) && lv.mirrors(rv))
            }
            _ => false,
        }
    }
}
