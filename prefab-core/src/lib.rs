#![warn(missing_docs)]
#![warn(clippy::std_instead_of_core)]
#![forbid(unsafe_code)]
#![doc = include_str!("../README.md")]

pub use rand;

mod config;
pub use config::*;

mod faker;
pub use faker::*;

mod target;
pub use target::*;

mod template;
pub use template::*;

mod builder;
pub use builder::*;

mod record;
pub use record::*;

mod factory;
pub use factory::*;

/// A type that can be assembled by a fluent fixture builder.
///
/// Usually derived with `#[derive(Fixture)]`, which generates the
/// [`Fixture::Partial`] accumulator and the per-field [`Fixture::Builder`].
/// Implementing it by hand is fine too:
///
/// ```rust
/// use prefab_core::{Fixture, Builder};
///
/// #[derive(Default, Debug)]
/// struct Point {
///     x: i32,
///     y: i32,
/// }
///
/// #[derive(Default, Clone)]
/// struct PointPartial {
///     x: Option<i32>,
///     y: Option<i32>,
/// }
///
/// impl Fixture for Point {
///     type Partial = PointPartial;
///     type Builder = Builder<Point>;
///     type Error = core::convert::Infallible;
///
///     fn construct() -> Result<Self, Self::Error> {
///         Ok(Self::default())
///     }
///
///     fn apply(&mut self, partial: &PointPartial) {
///         if let Some(x) = partial.x {
///             self.x = x;
///         }
///         if let Some(y) = partial.y {
///             self.y = y;
///         }
///     }
/// }
///
/// let mut builder = Point::fixture();
/// builder.set("x", |p| p.x = Some(3));
/// let point = builder.build();
/// assert_eq!((point.x, point.y), (3, 0));
/// ```
pub trait Fixture: Sized {
    /// Accumulates the fields that have been set so far. `Default` is the
    /// "nothing set" state.
    type Partial: Default;

    /// The handle returned by the factory functions.
    type Builder: From<Builder<Self>>;

    /// Error produced by [`Fixture::construct`].
    type Error;

    /// Produces a fresh instance through the type's zero-argument form.
    fn construct() -> Result<Self, Self::Error>;

    /// Copies every field set in `partial` onto `self`, overwriting whatever
    /// the constructor put there.
    fn apply(&mut self, partial: &Self::Partial);

    /// Starts a builder with nothing set.
    fn fixture() -> Self::Builder {
        builder::<Self>()
    }

    /// Starts a builder seeded from a template.
    fn fixture_from<'a>(template: impl Into<Template<'a, Self::Partial>>) -> Self::Builder {
        builder_from::<Self>(template)
    }
}
