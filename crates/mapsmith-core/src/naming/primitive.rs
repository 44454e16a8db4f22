use crate::naming::type_identifier::{RealType, TypeIdentifier};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Built-in scalar kinds a custom primitive can be based on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrimitiveKind {
    String,
    Int,
    Long,
    Double,
    Boolean,
    Float,
    Short,
    Byte,
    Char,
}

impl PrimitiveKind {
    /// Order in which base kinds are tried when looking for a symmetric custom primitive.
    pub const PREFERENCE_ORDER: [PrimitiveKind; 9] = [
        PrimitiveKind::String,
        PrimitiveKind::Int,
        PrimitiveKind::Long,
        PrimitiveKind::Double,
        PrimitiveKind::Boolean,
        PrimitiveKind::Float,
        PrimitiveKind::Short,
        PrimitiveKind::Byte,
        PrimitiveKind::Char,
    ];

    /// Native type names that map onto this kind.
    pub fn type_names(self) -> &'static [&'static str] {
        match self {
            Self::String => &["String", "java.lang.String"],
            Self::Int => &["int", "Integer", "java.lang.Integer"],
            Self::Long => &["long", "Long", "java.lang.Long"],
            Self::Double => &["double", "Double", "java.lang.Double"],
            Self::Boolean => &["boolean", "Boolean", "java.lang.Boolean"],
            Self::Float => &["float", "Float", "java.lang.Float"],
            Self::Short => &["short", "Short", "java.lang.Short"],
            Self::Byte => &["byte", "Byte", "java.lang.Byte"],
            Self::Char => &["char", "Character", "java.lang.Character"],
        }
    }

    pub fn from_type_name(name: &str) -> Option<Self> {
        Self::PREFERENCE_ORDER
            .into_iter()
            .find(|kind| kind.type_names().contains(&name))
    }

    /// Kind of a plain, unparameterized built-in type.
    pub fn of(identifier: &TypeIdentifier) -> Option<Self> {
        match identifier {
            TypeIdentifier::Real(RealType::Class { name, parameters }) if parameters.is_empty() => {
                Self::from_type_name(name)
            }
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        self.type_names()[0]
    }

    pub fn type_identifier(self) -> TypeIdentifier {
        TypeIdentifier::class(self.name())
    }
}

impl fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
