use crate::naming::TypeIdentifier;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// How a serialization field reads its value from an instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "via", rename_all = "snake_case")]
pub enum FieldQuery {
    Field {
        public: bool,
        is_static: bool,
        transient: bool,
    },
    Getter {
        method: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializationField {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: TypeIdentifier,
    pub query: FieldQuery,
}

impl SerializationField {
    pub fn public_field(name: impl Into<String>, field_type: TypeIdentifier) -> Self {
        Self {
            name: name.into(),
            field_type,
            query: FieldQuery::Field {
                public: true,
                is_static: false,
                transient: false,
            },
        }
    }

    pub fn getter(name: impl Into<String>, field_type: TypeIdentifier, method: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            field_type,
            query: FieldQuery::Getter { method: method.into() },
        }
    }

    pub fn is_public_field(&self) -> bool {
        matches!(self.query, FieldQuery::Field { public: true, .. })
    }

    pub fn describe(&self) -> String {
        let via = match &self.query {
            FieldQuery::Field { .. } => format!("field {}", self.name),
            FieldQuery::Getter { method } => format!("method {}()", method),
        };
        format!("{} [{}] via {}", self.name, self.field_type.description(), via)
    }
}

/// Serializer that emits an object, one entry per field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializedObjectSerializer {
    pub fields: Vec<SerializationField>,
}

impl SerializedObjectSerializer {
    pub fn new(fields: Vec<SerializationField>) -> Self {
        Self { fields }
    }

    pub fn field_names(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.name.as_str()).collect()
    }

    pub fn description(&self) -> String {
        let fields: Vec<String> = self.fields.iter().map(|f| format!("\t- {}", f.describe())).collect();
        format!("as serialized object with fields:\n{}", fields.join("\n"))
    }
}

/// The native member that builds the object from its fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ObjectFactory {
    Constructor { public: bool },
    FactoryMethod { name: String, public: bool, is_static: bool },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializedObjectDeserializer {
    pub fields: IndexMap<String, TypeIdentifier>,
    pub factory: ObjectFactory,
}

impl SerializedObjectDeserializer {
    pub fn constructor(fields: IndexMap<String, TypeIdentifier>) -> Self {
        Self {
            fields,
            factory: ObjectFactory::Constructor { public: true },
        }
    }

    pub fn factory_method(name: impl Into<String>, fields: IndexMap<String, TypeIdentifier>) -> Self {
        Self {
            fields,
            factory: ObjectFactory::FactoryMethod {
                name: name.into(),
                public: true,
                is_static: true,
            },
        }
    }

    pub fn description(&self) -> String {
        let parameters: Vec<String> = self
            .fields
            .iter()
            .map(|(name, ty)| format!("{}: {}", name, ty.description()))
            .collect();
        match &self.factory {
            ObjectFactory::Constructor { .. } => {
                format!("as serialized object using constructor ({})", parameters.join(", "))
            }
            ObjectFactory::FactoryMethod { name, .. } => {
                format!(
                    "as serialized object using factory method {}({})",
                    name,
                    parameters.join(", ")
                )
            }
        }
    }
}
