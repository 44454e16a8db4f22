use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

const VIRTUAL_PREFIX: &str = "virtual:";

/// Generic type names treated as collections when they carry exactly one parameter.
const COLLECTION_NAMES: &[&str] = &[
    "Collection",
    "List",
    "Set",
    "ArrayList",
    "LinkedList",
    "HashSet",
    "LinkedHashSet",
    "TreeSet",
];

/// Generic type names treated as maps when they carry a key and a value parameter.
const MAP_NAMES: &[&str] = &["Map", "MutableMap"];

/// Identity of a node in the type graph.
///
/// Textual form: `com.example.Person`, `Map<String, Integer>`, `List<String>`,
/// `String[]`, `?` and `virtual:Name`. The same form is used for serde.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum TypeIdentifier {
    Real(RealType),
    /// A type that only exists in the mapping configuration, without a native counterpart.
    Virtual(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RealType {
    Class {
        name: String,
        parameters: Vec<TypeIdentifier>,
    },
    Collection {
        name: String,
        element: Box<TypeIdentifier>,
    },
    Array {
        component: Box<TypeIdentifier>,
    },
    Wildcard,
}

impl TypeIdentifier {
    pub fn class(name: impl Into<String>) -> Self {
        Self::generic(name, Vec::new())
    }

    /// Builds a parameterized type, recognizing the well-known collection names.
    pub fn generic(name: impl Into<String>, mut parameters: Vec<TypeIdentifier>) -> Self {
        let name = name.into();
        if parameters.len() == 1 && is_collection_name(&name) {
            let element = parameters.remove(0);
            return Self::Real(RealType::Collection {
                name,
                element: Box::new(element),
            });
        }
        Self::Real(RealType::Class { name, parameters })
    }

    pub fn list_of(element: TypeIdentifier) -> Self {
        Self::generic("List", vec![element])
    }

    pub fn array_of(component: TypeIdentifier) -> Self {
        Self::Real(RealType::Array {
            component: Box::new(component),
        })
    }

    pub fn wildcard() -> Self {
        Self::Real(RealType::Wildcard)
    }

    pub fn virtual_named(name: impl Into<String>) -> Self {
        Self::Virtual(name.into())
    }

    pub fn parse(input: &str) -> Result<Self> {
        let mut parser = Parser { input, pos: 0 };
        parser
            .parse_complete()
            .map_err(|message| Error::InvalidTypeIdentifier {
                input: input.to_string(),
                message,
            })
    }

    pub fn is_virtual(&self) -> bool {
        matches!(self, Self::Virtual(_))
    }

    pub fn real(&self) -> Option<&RealType> {
        match self {
            Self::Real(real) => Some(real),
            Self::Virtual(_) => None,
        }
    }

    /// True if a wildcard occurs anywhere in the identifier.
    pub fn contains_wildcard(&self) -> bool {
        match self {
            Self::Real(real) => real.contains_wildcard(),
            Self::Virtual(_) => false,
        }
    }

    /// Element type of a collection or array, one level deep.
    pub fn collection_component(&self) -> Option<&TypeIdentifier> {
        match self {
            Self::Real(RealType::Collection { element, .. }) => Some(element),
            Self::Real(RealType::Array { component }) => Some(component),
            _ => None,
        }
    }

    /// Key and value types of a map.
    pub fn map_components(&self) -> Option<(&TypeIdentifier, &TypeIdentifier)> {
        match self {
            Self::Real(RealType::Class { name, parameters }) if is_map_name(name) => match parameters.as_slice() {
                [key, value] => Some((key, value)),
                _ => None,
            },
            _ => None,
        }
    }

    /// Human readable rendering used in diagnostics.
    pub fn description(&self) -> String {
        match self {
            Self::Real(real) => real.to_string(),
            Self::Virtual(name) => format!("{}{}", VIRTUAL_PREFIX, name),
        }
    }
}

impl RealType {
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Class { name, .. } | Self::Collection { name, .. } => Some(name),
            Self::Array { .. } | Self::Wildcard => None,
        }
    }

    pub fn contains_wildcard(&self) -> bool {
        match self {
            Self::Wildcard => true,
            Self::Class { parameters, .. } => parameters.iter().any(TypeIdentifier::contains_wildcard),
            Self::Collection { element, .. } => element.contains_wildcard(),
            Self::Array { component } => component.contains_wildcard(),
        }
    }
}

fn is_collection_name(name: &str) -> bool {
    let simple = name.strip_prefix("java.util.").unwrap_or(name);
    COLLECTION_NAMES.contains(&simple)
}

fn is_map_name(name: &str) -> bool {
    let simple = name.strip_prefix("java.util.").unwrap_or(name);
    MAP_NAMES.contains(&simple)
}

impl fmt::Display for TypeIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Real(real) => write!(f, "{}", real),
            Self::Virtual(name) => write!(f, "{}{}", VIRTUAL_PREFIX, name),
        }
    }
}

impl fmt::Display for RealType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Class { name, parameters } => {
                write!(f, "{}", name)?;
                if !parameters.is_empty() {
                    let rendered: Vec<String> = parameters.iter().map(ToString::to_string).collect();
                    write!(f, "<{}>", rendered.join(", "))?;
                }
                Ok(())
            }
            Self::Collection { name, element } => write!(f, "{}<{}>", name, element),
            Self::Array { component } => write!(f, "{}[]", component),
            Self::Wildcard => write!(f, "?"),
        }
    }
}

impl From<TypeIdentifier> for String {
    fn from(identifier: TypeIdentifier) -> String {
        identifier.to_string()
    }
}

impl TryFrom<String> for TypeIdentifier {
    type Error = String;
    fn try_from(s: String) -> std::result::Result<Self, Self::Error> {
        TypeIdentifier::parse(&s).map_err(|e| e.to_string())
    }
}

impl std::str::FromStr for TypeIdentifier {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self> {
        TypeIdentifier::parse(s)
    }
}

struct Parser<'a> {
    input: &'a str,
    pos: usize,
}

impl Parser<'_> {
    fn rest(&self) -> &str {
        &self.input[self.pos..]
    }

    fn skip_whitespace(&mut self) {
        let trimmed = self.rest().trim_start();
        self.pos = self.input.len() - trimmed.len();
    }

    fn eat(&mut self, token: &str) -> bool {
        if self.rest().starts_with(token) {
            self.pos += token.len();
            true
        } else {
            false
        }
    }

    fn parse_complete(&mut self) -> std::result::Result<TypeIdentifier, String> {
        let identifier = self.parse_type()?;
        self.skip_whitespace();
        if !self.rest().is_empty() {
            return Err(format!("unexpected trailing input '{}'", self.rest()));
        }
        Ok(identifier)
    }

    fn parse_type(&mut self) -> std::result::Result<TypeIdentifier, String> {
        self.skip_whitespace();
        if self.eat(VIRTUAL_PREFIX) {
            return Ok(TypeIdentifier::Virtual(self.parse_name()?));
        }
        let mut identifier = if self.eat("?") {
            TypeIdentifier::wildcard()
        } else {
            let name = self.parse_name()?;
            let mut parameters = Vec::new();
            self.skip_whitespace();
            if self.eat("<") {
                loop {
                    parameters.push(self.parse_type()?);
                    self.skip_whitespace();
                    if self.eat(",") {
                        continue;
                    }
                    if self.eat(">") {
                        break;
                    }
                    return Err(format!("expected ',' or '>' at position {}", self.pos));
                }
            }
            TypeIdentifier::generic(name, parameters)
        };
        loop {
            self.skip_whitespace();
            if !self.eat("[]") {
                break;
            }
            identifier = TypeIdentifier::array_of(identifier);
        }
        Ok(identifier)
    }

    fn parse_name(&mut self) -> std::result::Result<String, String> {
        let rest = self.rest();
        let end = rest
            .find(|c: char| !(c.is_alphanumeric() || c == '.' || c == '_' || c == '$'))
            .unwrap_or(rest.len());
        if end == 0 {
            return Err(format!("expected a type name at position {}", self.pos));
        }
        let name = rest[..end].to_string();
        self.pos += end;
        Ok(name)
    }
}
