use crate::{Fixture, Record};

/// What a builder's terminal operation produces. Fixed when the builder is
/// created.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Target {
    /// A value of the named type, made by its zero-argument constructor and
    /// then populated.
    Class(&'static str),

    /// A plain [`Record`] with no type identity.
    Plain,
}

impl Target {
    /// Whether terminal calls construct a typed value.
    pub fn is_class(&self) -> bool {
        matches!(self, Target::Class(_))
    }
}

impl core::fmt::Display for Target {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Target::Class(name) => write!(f, "class {name}"),
            Target::Plain => f.write_str("plain record"),
        }
    }
}

/// Types a builder can target.
pub trait Classify {
    /// The descriptor for `Self`.
    fn target() -> Target;
}

impl<T: Fixture> Classify for T {
    fn target() -> Target {
        Target::Class(core::any::type_name::<T>())
    }
}

impl Classify for Record {
    fn target() -> Target {
        Target::Plain
    }
}

/// Reports whether builders for `T` produce typed instances or plain records.
///
/// ```rust
/// use prefab_core::{classify, Record, Target};
///
/// assert_eq!(classify::<Record>(), Target::Plain);
/// ```
pub fn classify<T: Classify>() -> Target {
    T::target()
}
