use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::{Faker, Target, Template, classify};

/// A plain structured value: field names to values, in insertion order.
pub type Record = serde_json::Map<String, Value>;

/// Fluent builder for a plain [`Record`].
///
/// Any field name is accepted; nothing is checked against a schema.
///
/// ```rust
/// let builder = prefab_core::record().set("name", "Ada").set("age", 36);
/// let record = builder.build();
/// assert_eq!(record["name"], "Ada");
/// assert_eq!(record["age"], 36);
/// ```
#[derive(Clone, Debug)]
pub struct RecordBuilder {
    record: Record,
    faker: Faker,
}

impl RecordBuilder {
    /// An empty record with a faker from the environment.
    pub fn new() -> Self {
        Self::from_template(Template::Empty, Faker::new())
    }

    /// A record seeded from `template`. Template generators run here, once.
    pub fn from_template(template: Template<'_, Record>, mut faker: Faker) -> Self {
        log::trace!("new builder for {} from {} template", classify::<Record>(), template.kind());
        let record = template.resolve(&mut faker);
        Self { record, faker }
    }

    /// Sets `field` to `value`, replacing any earlier value.
    pub fn set(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        let field = field.into();
        log::trace!("set record.{field}");
        self.record.insert(field, value.into());
        self
    }

    /// Sets `field` to whatever `generate` returns.
    pub fn set_with<V: Into<Value>>(
        mut self,
        field: impl Into<String>,
        generate: impl FnOnce(&mut Faker) -> V,
    ) -> Self {
        let value = generate(&mut self.faker);
        self.set(field, value)
    }

    /// The accumulated record itself.
    ///
    /// This borrows the builder, so a chain ending in `.build()` needs the
    /// builder bound to a variable first. For a one-liner, end the chain with
    /// [`into_record`](Self::into_record) instead:
    ///
    /// ```rust
    /// let record = prefab_core::record().set("A", "v").into_record();
    /// assert_eq!(record["A"], "v");
    /// ```
    pub fn build(&self) -> &Record {
        log::trace!("build record with {} fields", self.record.len());
        &self.record
    }

    /// The record as a [`Value::Object`].
    pub fn to_value(&self) -> Value {
        Value::Object(self.record.clone())
    }

    /// Consumes the builder, returning the record.
    pub fn into_record(self) -> Record {
        self.record
    }

    /// Deserializes the current record into `T`.
    pub fn build_as<T: DeserializeOwned>(&self) -> Result<T, RecordError> {
        log::trace!("build record as {}", core::any::type_name::<T>());
        serde_json::from_value(self.to_value()).map_err(|source| RecordError::Deserialize {
            type_name: core::any::type_name::<T>(),
            source,
        })
    }

    /// The faker handed to generators.
    pub fn faker(&mut self) -> &mut Faker {
        &mut self.faker
    }

    /// Always [`Target::Plain`].
    pub fn target(&self) -> Target {
        classify::<Record>()
    }
}

impl Default for RecordBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Errors from [`RecordBuilder::build_as`].
#[derive(Debug)]
#[non_exhaustive]
pub enum RecordError {
    /// The record does not fit the requested type
    Deserialize {
        /// The type we tried to produce
        type_name: &'static str,
        /// What serde_json complained about
        source: serde_json::Error,
    },
}

impl core::fmt::Display for RecordError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            RecordError::Deserialize { type_name, source } => {
                write!(f, "record does not fit {type_name}: {source}")
            }
        }
    }
}

impl core::error::Error for RecordError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            RecordError::Deserialize { source, .. } => Some(source),
        }
    }
}
