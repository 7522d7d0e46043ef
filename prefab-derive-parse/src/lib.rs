#![warn(missing_docs)]
#![doc = include_str!("../README.md")]

pub use unsynn::*;

mod model;
pub use model::*;

keyword! {
    /// The "struct" keyword.
    pub KStruct = "struct";
    /// The "enum" keyword.
    pub KEnum = "enum";
    /// The "pub" keyword.
    pub KPub = "pub";
    /// The "where" keyword.
    pub KWhere = "where";
    /// The "doc" attribute name.
    pub KDoc = "doc";
    /// The "fixture" attribute name.
    pub KFixture = "fixture";
    /// `#[fixture(into)]`
    pub KInto = "into";
    /// `#[fixture(skip)]`
    pub KSkip = "skip";
    /// `#[fixture(construct = "..")]`
    pub KConstruct = "construct";
    /// `#[fixture(try_construct = "..")]`
    pub KTryConstruct = "try_construct";
    /// `#[fixture(error = "..")]`
    pub KError = "error";
}

/// Parses tokens until `C` is found on the current token tree level, treating
/// `<...>` as one level.
pub type VerbatimUntil<C> = Many<Cons<Except<C>, AngleTokenTree>>;

/// `key = "literal"`
pub type KeyValue<K> = Cons<K, PunctAny<'='>, Literal>;

unsynn! {
    /// Either a `TokenTree` or a `<...>` grouping, which proc-macros do not
    /// see as a [`Group`].
    #[derive(Clone)]
    pub struct AngleTokenTree(
        #[allow(clippy::type_complexity)]
        pub Either<Cons<Lt, Vec<Cons<Except<Gt>, AngleTokenTree>>, Gt>, TokenTree>,
    );

    /// `pub`, `pub(crate)`, `pub(in some::path)`, ...
    pub enum Vis {
        /// `pub(..)`
        PubIn(Cons<KPub, ParenthesisGroup>),
        /// `pub`
        Pub(KPub),
    }

    /// One entry inside `#[fixture(..)]`
    pub enum FixtureInner {
        /// `into`
        Into(KInto),
        /// `skip`
        Skip(KSkip),
        /// `construct = "path"`
        Construct(KeyValue<KConstruct>),
        /// `try_construct = "path"`
        TryConstruct(KeyValue<KTryConstruct>),
        /// `error = "Type"`
        Error(KeyValue<KError>),
    }

    /// `fixture(..)`
    pub struct FixtureAttr {
        /// The "fixture" name
        pub _kw: KFixture,
        /// The comma-separated entries
        pub inner: ParenthesisGroupContaining<CommaDelimitedVec<FixtureInner>>,
    }

    /// `doc = ".."`
    pub struct DocInner {
        /// The "doc" name
        pub _kw: KDoc,
        /// The equals sign
        pub _eq: PunctAny<'='>,
        /// The doc line, still quoted
        pub value: Literal,
    }

    /// What is inside `#[..]`
    pub enum AttributeInner {
        /// A well-formed `fixture(..)`
        Fixture(FixtureAttr),
        /// A `fixture` attribute we could not make sense of
        BadFixture(Cons<KFixture, TokenStream>),
        /// A doc comment
        Doc(DocInner),
        /// Anything else; not ours
        Other(TokenStream),
    }

    /// `#[..]`
    pub struct Attribute {
        /// The # symbol
        pub _pound: PunctAny<'#'>,
        /// The bracketed content
        pub body: BracketGroupContaining<AttributeInner>,
    }

    /// A named field
    pub struct StructField {
        /// Attributes, doc comments included
        pub attributes: Vec<Attribute>,
        /// Visibility
        pub vis: Option<Vis>,
        /// Field name
        pub name: Ident,
        /// The colon
        pub _colon: Colon,
        /// Field type
        pub typ: VerbatimUntil<Comma>,
    }

    /// What follows the struct name and generics
    pub enum StructBody {
        /// `where .. { .. }` or `{ .. }`
        Named(Cons<Option<Cons<KWhere, VerbatimUntil<BraceGroup>>>, BraceGroupContaining<CommaDelimitedVec<StructField>>>),
        /// `( .. ) ..;`
        Tuple(Cons<ParenthesisGroup, TokenStream>),
        /// `;`
        Unit(PunctAny<';'>),
    }

    /// A struct declaration
    pub struct StructDecl {
        /// Container attributes
        pub attributes: Vec<Attribute>,
        /// Visibility
        pub vis: Option<Vis>,
        /// The "struct" keyword
        pub _kw: KStruct,
        /// Struct name
        pub name: Ident,
        /// Generic parameters, which we do not support but want to name in errors
        pub generics: Option<Cons<Lt, Vec<Cons<Except<Gt>, AngleTokenTree>>, Gt>>,
        /// Where clause and fields
        pub body: StructBody,
    }

    /// The input of `#[derive(Fixture)]`
    pub enum AdtDecl {
        /// A struct
        Struct(StructDecl),
        /// An enum
        Enum(Cons<Vec<Attribute>, Option<Vis>, KEnum, TokenStream>),
    }
}

/// Parses the input of `#[derive(Fixture)]` and lowers it into a [`PStruct`].
pub fn parse_struct(input: TokenStream) -> core::result::Result<PStruct, ParseError> {
    let mut it = input.to_token_iter();
    let decl = match it.parse::<Cons<AdtDecl, EndOfStream>>() {
        Ok(it) => it.first,
        Err(err) => return Err(ParseError::Syntax(err.to_string())),
    };

    match decl {
        AdtDecl::Struct(decl) => PStruct::lower(decl),
        AdtDecl::Enum(_) => Err(ParseError::NotAStruct),
    }
}

/// Returns the contents of a string literal (`"..."` or `r#"..."#`), or
/// `None` if `literal` is not one.
pub fn string_literal_value(literal: &Literal) -> Option<String> {
    let repr = literal.to_string();

    if let Some(after_r) = repr.strip_prefix('r') {
        let hashes = after_r.chars().take_while(|&c| c == '#').count();
        let body = after_r[hashes..].strip_prefix('"')?;
        let body = body.strip_suffix(&"#".repeat(hashes))?;
        return body.strip_suffix('"').map(str::to_string);
    }

    let body = repr.strip_prefix('"')?.strip_suffix('"')?;
    Some(body.replace("\\\"", "\"").replace("\\\\", "\\"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use quote::quote;

    fn compact(tokens: &TokenStream) -> String {
        tokens.to_string().replace(' ', "")
    }

    fn parse(input: TokenStream) -> PStruct {
        match parse_struct(input) {
            Ok(parsed) => parsed,
            Err(err) => panic!("{err}"),
        }
    }

    #[test]
    fn plain_struct() {
        let parsed = parse(quote! {
            struct Point {
                x: i32,
                y: i32,
            }
        });
        assert_eq!(parsed.name.to_string(), "Point");
        assert!(parsed.vis.is_empty());
        let names: Vec<_> = parsed.fields.iter().map(|f| f.name.to_string()).collect();
        assert_eq!(names, ["x", "y"]);
        assert!(matches!(parsed.constructor, PConstructor::Default));
    }

    #[test]
    fn generic_field_types_keep_their_commas() {
        let parsed = parse(quote! {
            pub struct Index {
                pub(crate) by_name: HashMap<String, Vec<u32>>,
                count: usize
            }
        });
        assert_eq!(parsed.vis.to_string(), "pub");
        assert_eq!(parsed.fields.len(), 2);
        assert_eq!(compact(&parsed.fields[0].vis), "pub(crate)");
        assert_eq!(compact(&parsed.fields[0].ty), "HashMap<String,Vec<u32>>");
        assert_eq!(compact(&parsed.fields[1].ty), "usize");
    }

    #[test]
    fn field_attributes_and_docs() {
        let parsed = parse(quote! {
            struct User {
                /// Display name
                #[fixture(into)]
                name: String,
                #[serde(default)]
                #[fixture(skip)]
                id: u64,
            }
        });
        let name = &parsed.fields[0];
        assert!(name.into);
        assert!(!name.skip);
        assert_eq!(name.docs, [" Display name"]);
        let id = &parsed.fields[1];
        assert!(id.skip);
        assert!(!id.into);
        assert_eq!(parsed.settable().count(), 1);
    }

    #[test]
    fn raw_identifiers_are_stripped_in_effective_name() {
        let parsed = parse(quote! {
            struct Token {
                r#type: String,
            }
        });
        assert_eq!(parsed.fields[0].name.to_string(), "r#type");
        assert_eq!(parsed.fields[0].effective_name(), "type");
    }

    #[test]
    fn custom_constructor() {
        let parsed = parse(quote! {
            #[fixture(construct = "Self::new")]
            struct Counter {
                value: u32,
            }
        });
        match parsed.constructor {
            PConstructor::Infallible(path) => assert_eq!(compact(&path), "Self::new"),
            _ => panic!("expected an infallible constructor"),
        }
    }

    #[test]
    fn fallible_constructor() {
        let parsed = parse(quote! {
            #[fixture(try_construct = "Conn::open", error = "std::io::Error")]
            struct Conn {
                host: String,
            }
        });
        match parsed.constructor {
            PConstructor::Fallible { path, error } => {
                assert_eq!(compact(&path), "Conn::open");
                assert_eq!(compact(&error), "std::io::Error");
            }
            _ => panic!("expected a fallible constructor"),
        }
    }

    #[test]
    fn try_construct_needs_error() {
        let err = parse_struct(quote! {
            #[fixture(try_construct = "Conn::open")]
            struct Conn {
                host: String,
            }
        })
        .err();
        assert!(matches!(err, Some(ParseError::Attribute(_))));
    }

    #[test]
    fn unknown_fixture_attribute_is_an_error() {
        let err = parse_struct(quote! {
            struct Conn {
                #[fixture(bogus)]
                host: String,
            }
        })
        .err();
        assert!(matches!(err, Some(ParseError::Attribute(_))));
    }

    #[test]
    fn container_only_attribute_on_field_is_an_error() {
        let err = parse_struct(quote! {
            struct Conn {
                #[fixture(construct = "new")]
                host: String,
            }
        })
        .err();
        assert!(matches!(err, Some(ParseError::Attribute(_))));
    }

    #[test]
    fn enums_are_rejected() {
        let err = parse_struct(quote! {
            enum Shape { Circle, Square }
        })
        .err();
        assert!(matches!(err, Some(ParseError::NotAStruct)));
    }

    #[test]
    fn tuple_structs_are_rejected() {
        let err = parse_struct(quote! {
            struct Meters(f64);
        })
        .err();
        assert!(matches!(err, Some(ParseError::NoNamedFields { .. })));
    }

    #[test]
    fn generic_structs_are_rejected() {
        let err = parse_struct(quote! {
            struct Wrapper<T> {
                inner: T,
            }
        })
        .err();
        assert!(matches!(err, Some(ParseError::Generic { .. })));
    }

    #[test]
    fn clashing_with_setter_is_rejected() {
        let err = parse_struct(quote! {
            struct Reading {
                value: u32,
                value_with: u32,
            }
        })
        .err();
        match err {
            Some(ParseError::Attribute(msg)) => {
                assert!(msg.contains("`value`"));
                assert!(msg.contains("`value_with`"));
            }
            _ => panic!("expected a setter clash"),
        }
    }

    #[test]
    fn with_suffix_is_fine_when_the_base_has_no_builder_setter() {
        let parsed = parse(quote! {
            struct Job {
                build: u32,
                build_with: u32,
                #[fixture(skip)]
                value: u32,
                value_with: u32,
            }
        });
        assert_eq!(parsed.settable().count(), 3);
        let with_setters: Vec<_> = parsed
            .fields
            .iter()
            .filter(|f| f.has_builder_setter())
            .map(PField::effective_name)
            .collect();
        assert_eq!(with_setters, ["build_with", "value_with"]);
    }

    #[test]
    fn field_named_default_is_rejected() {
        let err = parse_struct(quote! {
            struct Flag {
                default: bool,
            }
        })
        .err();
        assert!(matches!(err, Some(ParseError::Attribute(msg)) if msg.contains("`default`")));

        let parsed = parse(quote! {
            struct Flag {
                #[fixture(skip)]
                default: bool,
                on: bool,
            }
        });
        assert_eq!(parsed.settable().count(), 1);
    }

    #[test]
    fn string_literals() {
        let lit = Literal::string("a \"quoted\" word");
        assert_eq!(
            string_literal_value(&lit).as_deref(),
            Some("a \"quoted\" word")
        );
        let raw: Literal = match "r#\"raw\"#".parse::<TokenStream>() {
            Ok(ts) => match ts.into_iter().next() {
                Some(TokenTree::Literal(lit)) => lit,
                other => panic!("not a literal: {other:?}"),
            },
            Err(err) => panic!("{err}"),
        };
        assert_eq!(string_literal_value(&raw).as_deref(), Some("raw"));
        assert_eq!(string_literal_value(&Literal::u32_unsuffixed(3)), None);
    }
}
