use crate::*;
use core::result::Result;

/// A struct, lowered from the raw grammar into what code generation needs.
pub struct PStruct {
    /// Struct name
    pub name: Ident,
    /// Struct visibility, empty when private
    pub vis: TokenStream,
    /// How a fresh instance is made
    pub constructor: PConstructor,
    /// Every named field, skipped ones included
    pub fields: Vec<PField>,
}

/// How `Fixture::construct` produces a fresh instance.
pub enum PConstructor {
    /// `Default::default()`
    Default,
    /// `#[fixture(construct = "path")]`, a `fn() -> Self`
    Infallible(TokenStream),
    /// `#[fixture(try_construct = "path", error = "Type")]`, a
    /// `fn() -> Result<Self, Type>`
    Fallible {
        /// The constructor
        path: TokenStream,
        /// Its error type
        error: TokenStream,
    },
}

/// A named field.
pub struct PField {
    /// Field name as written, `r#` included
    pub name: Ident,
    /// Field visibility, empty when private
    pub vis: TokenStream,
    /// Field type
    pub ty: TokenStream,
    /// `#[fixture(into)]`
    pub into: bool,
    /// `#[fixture(skip)]`
    pub skip: bool,
    /// Doc comment lines
    pub docs: Vec<String>,
}

/// Builder setters with these names would hide the terminal operations.
pub const TERMINAL_NAMES: &[&str] = &["build", "try_build"];

impl PField {
    /// Whether the generated builder gets `name`/`name_with` setters for
    /// this field. Skipped fields and fields named like a terminal do not.
    pub fn has_builder_setter(&self) -> bool {
        !self.skip && !TERMINAL_NAMES.contains(&self.effective_name().as_str())
    }

    /// The field name without any `r#` prefix.
    pub fn effective_name(&self) -> String {
        let raw = self.name.to_string();
        match raw.strip_prefix("r#") {
            Some(stripped) => stripped.to_string(),
            None => raw,
        }
    }
}

impl PStruct {
    /// Fields that get setters.
    pub fn settable(&self) -> impl Iterator<Item = &PField> {
        self.fields.iter().filter(|f| !f.skip)
    }

    pub(crate) fn lower(decl: StructDecl) -> Result<Self, ParseError> {
        let name = decl.name;
        if decl.generics.is_some() {
            return Err(ParseError::Generic {
                name: name.to_string(),
            });
        }

        let fields = match decl.body {
            StructBody::Named(named) => named.second.content.0,
            StructBody::Tuple(_) | StructBody::Unit(_) => {
                return Err(ParseError::NoNamedFields {
                    name: name.to_string(),
                });
            }
        };

        let mut constructor = None;
        let mut try_constructor = None;
        let mut error = None;
        for entry in fixture_entries(&decl.attributes)? {
            match entry {
                FixtureInner::Construct(kv) => constructor = Some(path_from(&kv.third)?),
                FixtureInner::TryConstruct(kv) => try_constructor = Some(path_from(&kv.third)?),
                FixtureInner::Error(kv) => error = Some(path_from(&kv.third)?),
                FixtureInner::Into(_) | FixtureInner::Skip(_) => {
                    return Err(ParseError::Attribute(format!(
                        "`into` and `skip` go on fields, not on `{name}`"
                    )));
                }
            }
        }

        let constructor = match (constructor, try_constructor, error) {
            (None, None, None) => PConstructor::Default,
            (Some(path), None, None) => PConstructor::Infallible(path),
            (None, Some(path), Some(error)) => PConstructor::Fallible { path, error },
            (None, Some(_), None) => {
                return Err(ParseError::Attribute(
                    "`try_construct` needs `error = \"Type\"` next to it".to_string(),
                ));
            }
            (_, None, Some(_)) => {
                return Err(ParseError::Attribute(
                    "`error` only makes sense with `try_construct`".to_string(),
                ));
            }
            (Some(_), Some(_), _) => {
                return Err(ParseError::Attribute(
                    "pick one of `construct` and `try_construct`".to_string(),
                ));
            }
        };

        let fields = fields
            .into_iter()
            .map(|field| PField::lower(field.value))
            .collect::<Result<Vec<_>, _>>()?;
        check_setter_names(&fields)?;

        Ok(Self {
            name,
            vis: vis_tokens(decl.vis),
            constructor,
            fields,
        })
    }
}

impl PField {
    fn lower(field: StructField) -> Result<Self, ParseError> {
        let mut into = false;
        let mut skip = false;
        for entry in fixture_entries(&field.attributes)? {
            match entry {
                FixtureInner::Into(_) => into = true,
                FixtureInner::Skip(_) => skip = true,
                FixtureInner::Construct(_)
                | FixtureInner::TryConstruct(_)
                | FixtureInner::Error(_) => {
                    return Err(ParseError::Attribute(format!(
                        "`construct`, `try_construct` and `error` go on the struct, not on field `{}`",
                        field.name
                    )));
                }
            }
        }

        Ok(Self {
            docs: doc_lines(&field.attributes),
            name: field.name,
            vis: vis_tokens(field.vis),
            ty: field.typ.to_token_stream(),
            into,
            skip,
        })
    }
}

/// Rejects fields whose generated setters would clash with another setter or
/// with `Default::default` on the partial.
fn check_setter_names(fields: &[PField]) -> Result<(), ParseError> {
    for field in fields.iter().filter(|f| !f.skip) {
        let name = field.effective_name();
        if name == "default" {
            return Err(ParseError::Attribute(
                "a field named `default` would hide `Default::default` on the partial; skip it or rename it"
                    .to_string(),
            ));
        }
        if !field.has_builder_setter() {
            continue;
        }
        let with_name = format!("{name}_with");
        if fields
            .iter()
            .any(|other| !other.skip && other.effective_name() == with_name)
        {
            return Err(ParseError::Attribute(format!(
                "fields `{name}` and `{with_name}` both want a setter named `{with_name}`"
            )));
        }
    }
    Ok(())
}

fn vis_tokens(vis: Option<Vis>) -> TokenStream {
    vis.map(|v| v.to_token_stream()).unwrap_or_default()
}

fn fixture_entries(attributes: &[Attribute]) -> Result<Vec<&FixtureInner>, ParseError> {
    let mut entries = Vec::new();
    for attr in attributes {
        match &attr.body.content {
            AttributeInner::Fixture(fixture) => {
                entries.extend(fixture.inner.content.0.iter().map(|d| &d.value));
            }
            AttributeInner::BadFixture(bad) => {
                return Err(ParseError::Attribute(format!(
                    "unrecognized fixture attribute: {}",
                    bad.second
                )));
            }
            AttributeInner::Doc(_) | AttributeInner::Other(_) => {}
        }
    }
    Ok(entries)
}

fn doc_lines(attributes: &[Attribute]) -> Vec<String> {
    attributes
        .iter()
        .filter_map(|attr| match &attr.body.content {
            AttributeInner::Doc(doc) => string_literal_value(&doc.value),
            _ => None,
        })
        .collect()
}

fn path_from(literal: &Literal) -> Result<TokenStream, ParseError> {
    let value = string_literal_value(literal).ok_or_else(|| {
        ParseError::Attribute(format!("expected a string literal, got {literal}"))
    })?;
    value
        .parse::<TokenStream>()
        .map_err(|err| ParseError::Attribute(format!("{value:?} is not a valid path: {err}")))
}

/// Why `#[derive(Fixture)]` rejected its input.
#[derive(Debug)]
pub enum ParseError {
    /// The tokens are not a declaration we can read
    Syntax(String),
    /// Enums have no single set of fields to build
    NotAStruct,
    /// Tuple and unit structs have no field names to hang setters on
    NoNamedFields {
        /// The struct
        name: String,
    },
    /// Generic structs are not supported
    Generic {
        /// The struct
        name: String,
    },
    /// A `#[fixture(..)]` attribute is malformed or misplaced
    Attribute(String),
}

impl core::fmt::Display for ParseError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ParseError::Syntax(msg) => write!(f, "could not parse type declaration: {msg}"),
            ParseError::NotAStruct => write!(f, "Fixture can only be derived for structs"),
            ParseError::NoNamedFields { name } => {
                write!(f, "Fixture needs named fields, `{name}` has none")
            }
            ParseError::Generic { name } => {
                write!(f, "Fixture cannot be derived for generic struct `{name}`")
            }
            ParseError::Attribute(msg) => write!(f, "{msg}"),
        }
    }
}

impl core::error::Error for ParseError {}
