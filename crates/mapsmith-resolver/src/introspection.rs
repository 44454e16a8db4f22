//! Introspection boundary.
//!
//! Detection never looks at native types directly; it asks an [`Introspector`]
//! for a [`TypeDescription`] of every real class it needs to analyze.

use indexmap::IndexMap;
use mapsmith_core::{RealType, TypeIdentifier};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IntrospectionError {
    /// Detection cannot continue without parameter names; resolution is aborted.
    #[error("parameter names of {member} in type '{type_name}' are not available")]
    ParameterNamesUnavailable { type_name: String, member: String },

    #[error("type '{0}' is unknown to the introspector")]
    UnknownType(String),
}

/// Provides descriptions of real types.
pub trait Introspector {
    fn describe(&self, ty: &RealType) -> Result<TypeDescription, IntrospectionError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TypeModifiers {
    pub public: bool,
    pub annotation: bool,
    pub anonymous: bool,
    pub local: bool,
    pub inner_non_static: bool,
}

impl Default for TypeModifiers {
    fn default() -> Self {
        Self {
            public: true,
            annotation: false,
            anonymous: false,
            local: false,
            inner_non_static: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TypeKind {
    #[default]
    Class,
    Enum {
        constants: Vec<String>,
    },
    /// Abstract class or interface, mapped through its declared subtypes.
    Abstract {
        subtypes: Vec<TypeIdentifier>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    pub name: String,
    pub ty: TypeIdentifier,
}

impl Parameter {
    pub fn new(name: impl Into<String>, ty: TypeIdentifier) -> Self {
        Self { name: name.into(), ty }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Constructor {
    pub public: bool,
    pub parameters: Vec<Parameter>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Method {
    pub name: String,
    pub public: bool,
    pub is_static: bool,
    pub parameters: Vec<Parameter>,
    pub return_type: Option<TypeIdentifier>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub name: String,
    pub ty: TypeIdentifier,
    pub public: bool,
    pub is_static: bool,
    pub transient: bool,
}

/// Everything detection needs to know about a real type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDescription {
    pub identifier: TypeIdentifier,
    pub modifiers: TypeModifiers,
    pub kind: TypeKind,
    pub constructors: Vec<Constructor>,
    pub methods: Vec<Method>,
    pub fields: Vec<Field>,
}

impl TypeDescription {
    pub fn class(identifier: TypeIdentifier) -> Self {
        Self {
            identifier,
            modifiers: TypeModifiers::default(),
            kind: TypeKind::Class,
            constructors: Vec::new(),
            methods: Vec::new(),
            fields: Vec::new(),
        }
    }

    pub fn enumeration(identifier: TypeIdentifier, constants: &[&str]) -> Self {
        Self {
            kind: TypeKind::Enum {
                constants: constants.iter().map(ToString::to_string).collect(),
            },
            ..Self::class(identifier)
        }
    }

    pub fn with_modifiers(mut self, modifiers: TypeModifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    pub fn with_constructor(mut self, parameters: &[(&str, TypeIdentifier)]) -> Self {
        self.constructors.push(Constructor {
            public: true,
            parameters: to_parameters(parameters),
        });
        self
    }

    pub fn with_factory(mut self, name: &str, parameters: &[(&str, TypeIdentifier)]) -> Self {
        let return_type = Some(self.identifier.clone());
        self.methods.push(Method {
            name: name.to_string(),
            public: true,
            is_static: true,
            parameters: to_parameters(parameters),
            return_type,
        });
        self
    }

    /// Public no-argument instance method.
    pub fn with_accessor(mut self, name: &str, return_type: TypeIdentifier) -> Self {
        self.methods.push(Method {
            name: name.to_string(),
            public: true,
            is_static: false,
            parameters: Vec::new(),
            return_type: Some(return_type),
        });
        self
    }

    pub fn with_public_field(mut self, name: &str, ty: TypeIdentifier) -> Self {
        self.fields.push(Field {
            name: name.to_string(),
            ty,
            public: true,
            is_static: false,
            transient: false,
        });
        self
    }

    pub fn with_field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }
}

fn to_parameters(parameters: &[(&str, TypeIdentifier)]) -> Vec<Parameter> {
    parameters
        .iter()
        .map(|(name, ty)| Parameter::new(*name, ty.clone()))
        .collect()
}

/// Introspector over a fixed set of descriptions.
#[derive(Debug, Clone, Default)]
pub struct MapIntrospector {
    descriptions: IndexMap<TypeIdentifier, TypeDescription>,
}

impl MapIntrospector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, description: TypeDescription) {
        self.descriptions.insert(description.identifier.clone(), description);
    }

    pub fn with(mut self, description: TypeDescription) -> Self {
        self.insert(description);
        self
    }
}

impl Introspector for MapIntrospector {
    fn describe(&self, ty: &RealType) -> Result<TypeDescription, IntrospectionError> {
        let identifier = TypeIdentifier::Real(ty.clone());
        self.descriptions
            .get(&identifier)
            .cloned()
            .ok_or_else(|| IntrospectionError::UnknownType(identifier.description()))
    }
}
