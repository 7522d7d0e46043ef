//! Entry points. Typed targets go through [`builder`], [`builder_from`] and
//! [`builder_with`]; plain records through [`record`], [`record_from`] and
//! [`record_with`].

use crate::{Builder, Faker, Fixture, Record, RecordBuilder, Template};

/// A builder for `T` with nothing set.
pub fn builder<T: Fixture>() -> T::Builder {
    Builder::<T>::new().into()
}

/// A builder for `T` seeded from `template`: a partial, or a
/// [`Template::generate`] closure.
pub fn builder_from<'a, T: Fixture>(template: impl Into<Template<'a, T::Partial>>) -> T::Builder {
    Builder::<T>::from_template(template.into(), Faker::new()).into()
}

/// A builder for `T` whose starting partial comes from `generate`, called
/// once with the builder's faker.
pub fn builder_with<T: Fixture>(generate: impl FnOnce(&mut Faker) -> T::Partial) -> T::Builder {
    builder_from::<T>(Template::generate(generate))
}

/// An empty record builder.
pub fn record() -> RecordBuilder {
    RecordBuilder::new()
}

/// A record builder seeded from `template`.
pub fn record_from<'a>(template: impl Into<Template<'a, Record>>) -> RecordBuilder {
    RecordBuilder::from_template(template.into(), Faker::new())
}

/// A record builder whose starting fields come from `generate`.
pub fn record_with(generate: impl FnOnce(&mut Faker) -> Record) -> RecordBuilder {
    record_from(Template::generate(generate))
}
