use crate::Faker;

/// Where a builder's initial state comes from.
///
/// Any partial converts into `Template::Partial`, so factory functions take
/// `impl Into<Template<..>>`. A generator is wrapped with
/// [`Template::generate`].
pub enum Template<'a, P> {
    /// Start with nothing set.
    Empty,

    /// Start from this partial.
    Partial(P),

    /// Ask the faker for the starting partial. Called once, when the builder
    /// is created.
    Generate(Box<dyn FnOnce(&mut Faker) -> P + 'a>),
}

impl<'a, P> Template<'a, P> {
    /// Wraps a generator closure.
    pub fn generate(f: impl FnOnce(&mut Faker) -> P + 'a) -> Self {
        Template::Generate(Box::new(f))
    }

    /// Short name of the variant, used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Template::Empty => "empty",
            Template::Partial(_) => "partial",
            Template::Generate(_) => "generator",
        }
    }
}

impl<P: Default> Template<'_, P> {
    /// Turns the template into the builder's initial state.
    pub fn resolve(self, faker: &mut Faker) -> P {
        match self {
            Template::Empty => P::default(),
            Template::Partial(partial) => partial,
            Template::Generate(generate) => generate(faker),
        }
    }
}

impl<P> Default for Template<'_, P> {
    fn default() -> Self {
        Template::Empty
    }
}

impl<P> From<P> for Template<'_, P> {
    fn from(partial: P) -> Self {
        Template::Partial(partial)
    }
}

impl<P> core::fmt::Debug for Template<'_, P> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "Template::{}", self.kind())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::Cell;

    #[test]
    fn empty_resolves_to_default() {
        let mut faker = Faker::seeded(0);
        let v: Vec<u8> = Template::Empty.resolve(&mut faker);
        assert!(v.is_empty());
    }

    #[test]
    fn partial_is_used_as_is() {
        let mut faker = Faker::seeded(0);
        let v = Template::from(vec![1, 2, 3]).resolve(&mut faker);
        assert_eq!(v, vec![1, 2, 3]);
    }

    #[test]
    fn generator_runs_once_with_the_faker() {
        let calls = Cell::new(0);
        let mut faker = Faker::seeded(11);
        let template = Template::generate(|faker: &mut Faker| {
            calls.set(calls.get() + 1);
            vec![faker.seed()]
        });
        assert_eq!(calls.get(), 0);
        assert_eq!(template.resolve(&mut faker), vec![11]);
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn debug_names_the_kind() {
        let t: Template<'_, Vec<u8>> = Template::generate(|_| Vec::new());
        assert_eq!(format!("{t:?}"), "Template::generator");
        assert_eq!(Template::<Vec<u8>>::default().kind(), "empty");
    }
}
