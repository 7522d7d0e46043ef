#![warn(missing_docs)]
#![warn(clippy::std_instead_of_core)]
#![doc = include_str!("../README.md")]

pub use prefab_core::*;

/// Derive the [`Fixture`] trait for structs with named fields.
///
/// Besides the trait impl, this generates two types next to the struct:
/// `<Name>Partial`, which holds the fields set so far and doubles as a
/// template, and `<Name>Builder`, which has one setter per field.
///
/// This uses unsynn, so it's light, but it _will_ choke on some Rust syntax.
/// Generic structs, tuple structs and enums are rejected.
///
/// ```rust
/// # use prefab::Fixture;
/// #[derive(Fixture, Default)]
/// struct FooBar {
///     foo: u32,
///     bar: String,
/// }
///
/// let foobar = FooBar::fixture().foo(3).build();
/// assert_eq!(foobar.foo, 3);
/// assert_eq!(foobar.bar, "");
/// ```
///
/// Every field type must be `Clone` and `Debug`: a build copies the set
/// values out of the builder so it can be built again, and the partial and
/// builder print their set fields.
///
/// # Container Attributes
///
/// ```rust
/// # use prefab::Fixture;
/// #[derive(Fixture)]
/// #[fixture(construct = "Counter::new")]
/// struct Counter {
///     step: u32,
/// # }
/// # impl Counter { fn new() -> Self { Counter { step: 1 } } }
/// ```
///
/// * `construct = ".."` A `fn() -> Self` used to make the fresh value instead of `Default::default()`.
///
/// * `try_construct = "..", error = ".."` A `fn() -> Result<Self, Error>`. Only `try_build` is available then, and it returns the constructor's error unchanged.
///
/// # Field Attributes
///
/// ```rust
/// # use prefab::Fixture;
/// #[derive(Fixture, Default)]
/// struct FooBar {
///     #[fixture(into)]
///     foo: String,
/// # }
/// ```
///
/// * `into` The setter takes `impl Into<FieldType>`.
///
/// * `skip` No setter, and no slot in the partial. The constructor's value is kept.
///
/// Doc comments on a field become the docs of its setters. Fields named
/// `build` or `try_build` get no builder setter; set them through the partial.
/// A field named `default`, or a pair like `value` and `value_with` whose
/// setters would share a name, is rejected unless one of them is skipped.
pub use prefab_derive::Fixture;
