use core::convert::Infallible;

use crate::{Faker, Fixture, Target, Template, classify};

/// Accumulates field values for a [`Fixture`] and materializes it on demand.
///
/// Derived fixtures wrap this in a generated `<Type>Builder` that adds one
/// setter per field and derefs here for [`build`](Builder::build),
/// [`try_build`](Builder::try_build) and friends.
///
/// Terminal operations borrow the builder: it can be built, tweaked and
/// built again, and every build starts from a freshly constructed value.
pub struct Builder<T: Fixture> {
    partial: T::Partial,
    faker: Faker,
}

impl<T: Fixture> Builder<T> {
    /// A builder with nothing set and a faker from the environment.
    pub fn new() -> Self {
        Self::from_template(Template::Empty, Faker::new())
    }

    /// A builder with nothing set that uses `faker` for generated values.
    pub fn with_faker(faker: Faker) -> Self {
        Self::from_template(Template::Empty, faker)
    }

    /// A builder whose initial state comes from `template`. Template
    /// generators run here, exactly once, before any setter.
    pub fn from_template(template: Template<'_, T::Partial>, mut faker: Faker) -> Self {
        log::trace!(
            "new builder for {} from {} template",
            classify::<T>(),
            template.kind()
        );
        let partial = template.resolve(&mut faker);
        Self { partial, faker }
    }

    /// Records a field value. `field` is only used for logging.
    pub fn set(&mut self, field: &'static str, assign: impl FnOnce(&mut T::Partial)) -> &mut Self {
        log::trace!("set {}.{field}", core::any::type_name::<T>());
        assign(&mut self.partial);
        self
    }

    /// Asks `generate` for a value, then records it with `assign`.
    pub fn set_with<V>(
        &mut self,
        field: &'static str,
        generate: impl FnOnce(&mut Faker) -> V,
        assign: impl FnOnce(&mut T::Partial, V),
    ) -> &mut Self {
        let value = generate(&mut self.faker);
        self.set(field, |partial| assign(partial, value))
    }

    /// The fields set so far.
    pub fn partial(&self) -> &T::Partial {
        &self.partial
    }

    /// Mutable access to the fields set so far.
    pub fn partial_mut(&mut self) -> &mut T::Partial {
        &mut self.partial
    }

    /// The faker handed to generators.
    pub fn faker(&mut self) -> &mut Faker {
        &mut self.faker
    }

    /// Always [`Target::Class`] for this builder.
    pub fn target(&self) -> Target {
        classify::<T>()
    }

    /// Constructs a new `T` and copies every set field onto it.
    ///
    /// Constructor errors are returned unchanged; the builder keeps its state
    /// either way.
    pub fn try_build(&self) -> Result<T, T::Error> {
        log::trace!("build {}", core::any::type_name::<T>());
        let mut value = T::construct()?;
        value.apply(&self.partial);
        Ok(value)
    }
}

impl<T: Fixture<Error = Infallible>> Builder<T> {
    /// Constructs a new `T` and copies every set field onto it.
    pub fn build(&self) -> T {
        match self.try_build() {
            Ok(value) => value,
            Err(never) => match never {},
        }
    }
}

impl<T: Fixture> Default for Builder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Fixture> Clone for Builder<T>
where
    T::Partial: Clone,
{
    fn clone(&self) -> Self {
        Self {
            partial: self.partial.clone(),
            faker: self.faker.clone(),
        }
    }
}

impl<T: Fixture> core::fmt::Debug for Builder<T>
where
    T::Partial: core::fmt::Debug,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Builder")
            .field("target", &self.target())
            .field("partial", &self.partial)
            .field("faker", &self.faker)
            .finish()
    }
}
