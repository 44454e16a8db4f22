use super::descriptor::{KindEntry, ParameterEntry, TypeEntry, UniverseDescriptor};
use indexmap::IndexMap;
use mapsmith_core::{RealType, TypeIdentifier};
use mapsmith_resolver::introspection::{
    Constructor, Field, Method, Parameter, TypeKind, TypeModifiers,
};
use mapsmith_resolver::{IntrospectionError, Introspector, TypeDescription};

/// Introspector answering from a [`UniverseDescriptor`].
#[derive(Debug, Clone, Default)]
pub struct UniverseIntrospector {
    types: IndexMap<TypeIdentifier, TypeEntry>,
}

impl UniverseIntrospector {
    pub fn new(descriptor: &UniverseDescriptor) -> crate::Result<Self> {
        let mut types = IndexMap::new();
        for entry in &descriptor.types {
            if types.insert(entry.name.clone(), entry.clone()).is_some() {
                return Err(crate::CommonError::DuplicateType {
                    type_name: entry.name.description(),
                });
            }
        }
        Ok(Self { types })
    }
}

fn parameters(
    entries: &[ParameterEntry],
    type_name: &TypeIdentifier,
    member: impl Fn() -> String,
) -> Result<Vec<Parameter>, IntrospectionError> {
    entries
        .iter()
        .map(|p| match &p.name {
            Some(name) => Ok(Parameter::new(name.clone(), p.ty.clone())),
            None => Err(IntrospectionError::ParameterNamesUnavailable {
                type_name: type_name.description(),
                member: member(),
            }),
        })
        .collect()
}

impl Introspector for UniverseIntrospector {
    fn describe(&self, ty: &RealType) -> Result<TypeDescription, IntrospectionError> {
        let identifier = TypeIdentifier::Real(ty.clone());
        let entry = self
            .types
            .get(&identifier)
            .ok_or_else(|| IntrospectionError::UnknownType(identifier.description()))?;

        let kind = match entry.kind {
            KindEntry::Class => TypeKind::Class,
            KindEntry::Enum => TypeKind::Enum {
                constants: entry.constants.clone(),
            },
            KindEntry::Abstract | KindEntry::Interface => TypeKind::Abstract {
                subtypes: entry.subtypes.clone(),
            },
        };
        let constructors = entry
            .constructors
            .iter()
            .map(|c| {
                Ok(Constructor {
                    public: c.public,
                    parameters: parameters(&c.parameters, &identifier, || "constructor".to_string())?,
                })
            })
            .collect::<Result<Vec<_>, IntrospectionError>>()?;
        let methods = entry
            .methods
            .iter()
            .map(|m| {
                Ok(Method {
                    name: m.name.clone(),
                    public: m.public,
                    is_static: m.is_static,
                    parameters: parameters(&m.parameters, &identifier, || format!("method {}", m.name))?,
                    return_type: m.returns.clone(),
                })
            })
            .collect::<Result<Vec<_>, IntrospectionError>>()?;
        let fields = entry
            .fields
            .iter()
            .map(|f| Field {
                name: f.name.clone(),
                ty: f.ty.clone(),
                public: f.public,
                is_static: f.is_static,
                transient: f.transient,
            })
            .collect();

        Ok(TypeDescription {
            identifier,
            modifiers: TypeModifiers {
                public: entry.modifiers.public,
                annotation: entry.modifiers.annotation,
                anonymous: entry.modifiers.anonymous,
                local: entry.modifiers.local,
                inner_non_static: entry.modifiers.inner_non_static,
            },
            kind,
            constructors,
            methods,
            fields,
        })
    }
}
