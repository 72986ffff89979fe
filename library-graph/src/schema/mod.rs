//! The GraphQL schema served over the library.
//!
//! Type definitions are kept as data and paired with the [`ResolverMap`] at
//! startup. Parsing, validation and execution of operations are left to
//! `async-graphql`'s dynamic schema; this module only wires each declared
//! field to its resolver and converts between the engine's values and ours.
mod resolvers;

use std::sync::Arc;

use async_graphql::dynamic;
use async_graphql::dynamic::FieldFuture;
use async_graphql::dynamic::FieldValue;
use async_graphql::dynamic::ResolverContext;
use async_graphql::dynamic::TypeRef;

pub use self::resolvers::Arguments;
pub use self::resolvers::Parent;
pub use self::resolvers::Resolved;
pub use self::resolvers::Resolver;
pub use self::resolvers::ResolverMap;
use crate::configuration::GraphQL;
use crate::context::RequestContext;
use crate::error::SchemaError;
use crate::store::AuthorRecord;
use crate::store::BookRecord;
use crate::store::DataStore;

pub const QUERY_TYPE: &str = "Query";
pub const BOOK_TYPE: &str = "Book";
pub const AUTHOR_TYPE: &str = "Author";

/// An object type and its fields.
#[derive(Clone, Copy, Debug)]
pub struct TypeDefinition {
    pub name: &'static str,
    pub fields: &'static [FieldDefinition],
}

/// A field, with its type written the way it is written in SDL (`[Book!]!`).
#[derive(Clone, Copy, Debug)]
pub struct FieldDefinition {
    pub name: &'static str,
    pub ty: &'static str,
    pub arguments: &'static [ArgumentDefinition],
}

#[derive(Clone, Copy, Debug)]
pub struct ArgumentDefinition {
    pub name: &'static str,
    pub ty: &'static str,
}

/*
  type Book {
    title: String!
    authors: [Author!]!
  }

  type Author {
    name: String
    books: [Book]
  }

  type Query {
    getBooks: [Book!]
    getAuthor(name: String!): Author
  }
*/
pub const TYPE_DEFINITIONS: &[TypeDefinition] = &[
    TypeDefinition {
        name: BOOK_TYPE,
        fields: &[
            FieldDefinition {
                name: "title",
                ty: "String!",
                arguments: &[],
            },
            FieldDefinition {
                name: "authors",
                ty: "[Author!]!",
                arguments: &[],
            },
        ],
    },
    TypeDefinition {
        name: AUTHOR_TYPE,
        fields: &[
            FieldDefinition {
                name: "name",
                ty: "String",
                arguments: &[],
            },
            FieldDefinition {
                name: "books",
                ty: "[Book]",
                arguments: &[],
            },
        ],
    },
    TypeDefinition {
        name: QUERY_TYPE,
        fields: &[
            FieldDefinition {
                name: "getBooks",
                ty: "[Book!]",
                arguments: &[],
            },
            FieldDefinition {
                name: "getAuthor",
                ty: "Author",
                arguments: &[ArgumentDefinition {
                    name: "name",
                    ty: "String!",
                }],
            },
        ],
    },
];

/// The executable schema, bound to the library it serves.
pub struct LibrarySchema {
    schema: dynamic::Schema,
    store: Arc<DataStore>,
}

impl LibrarySchema {
    /// Builds the library schema from [`TYPE_DEFINITIONS`] and the default
    /// [`ResolverMap`].
    pub fn new(store: Arc<DataStore>, configuration: &GraphQL) -> Result<Self, SchemaError> {
        Self::from_definitions(
            store,
            configuration,
            TYPE_DEFINITIONS,
            &ResolverMap::default(),
        )
    }

    /// Builds a schema from arbitrary definitions.
    ///
    /// Every declared field must have a resolver in `resolvers`; resolvers
    /// for undeclared fields are ignored.
    pub fn from_definitions(
        store: Arc<DataStore>,
        configuration: &GraphQL,
        definitions: &[TypeDefinition],
        resolvers: &ResolverMap,
    ) -> Result<Self, SchemaError> {
        let mut builder = dynamic::Schema::build(QUERY_TYPE, None, None);
        for definition in definitions {
            builder = builder.register(object(definition, resolvers)?);
        }
        if !configuration.introspection {
            builder = builder.disable_introspection();
        }
        if let Some(max_depth) = configuration.max_depth {
            builder = builder.limit_depth(max_depth);
        }
        let schema = builder
            .finish()
            .map_err(|err| SchemaError::Rejected(err.to_string()))?;
        tracing::debug!(types = definitions.len(), "built library schema");

        Ok(Self { schema, store })
    }

    /// Executes one GraphQL request.
    ///
    /// The request gets its own [`RequestContext`] over the shared store.
    pub async fn execute(
        &self,
        request: impl Into<async_graphql::Request>,
    ) -> async_graphql::Response {
        let request: async_graphql::Request = request.into();
        let context = RequestContext::new(self.store.clone());
        self.schema.execute(request.data(context)).await
    }

    /// The schema in SDL.
    pub fn sdl(&self) -> String {
        self.schema.sdl()
    }
}

fn object(
    definition: &TypeDefinition,
    resolvers: &ResolverMap,
) -> Result<dynamic::Object, SchemaError> {
    let mut object = dynamic::Object::new(definition.name);
    for field in definition.fields {
        object = object.field(field_of(definition.name, field, resolvers)?);
    }
    Ok(object)
}

fn field_of(
    type_name: &'static str,
    field: &FieldDefinition,
    resolvers: &ResolverMap,
) -> Result<dynamic::Field, SchemaError> {
    let resolver = resolvers
        .get(type_name, field.name)
        .ok_or_else(|| SchemaError::MissingResolver {
            type_name: type_name.to_string(),
            field_name: field.name.to_string(),
        })?;
    let argument_names: Arc<[&'static str]> = field.arguments.iter().map(|a| a.name).collect();

    let ty = parse_type_ref(field.ty)?;
    let mut dynamic_field = dynamic::Field::new(field.name, ty, move |ctx| {
        let argument_names = argument_names.clone();
        FieldFuture::new(async move {
            resolve_field(type_name, resolver, &argument_names, &ctx)
        })
    });
    for argument in field.arguments {
        dynamic_field = dynamic_field.argument(dynamic::InputValue::new(
            argument.name,
            parse_type_ref(argument.ty)?,
        ));
    }
    Ok(dynamic_field)
}

fn resolve_field<'a>(
    type_name: &str,
    resolver: Resolver,
    argument_names: &[&str],
    ctx: &ResolverContext<'a>,
) -> async_graphql::Result<Option<FieldValue<'a>>> {
    let context: &'a RequestContext = ctx.data::<RequestContext>()?;
    let parent = parent_of(type_name, ctx.parent_value)?;
    let mut arguments = Arguments::default();
    for name in argument_names {
        if let Some(value) = ctx.args.get(name) {
            arguments.insert(*name, value.string()?);
        }
    }

    Ok(into_field_value(resolver(&parent, &arguments, context)))
}

/// The record behind a field of `type_name`.
fn parent_of<'a>(type_name: &str, value: &'a FieldValue<'_>) -> async_graphql::Result<Parent<'a>> {
    match type_name {
        QUERY_TYPE => Ok(Parent::Query),
        BOOK_TYPE => Ok(Parent::Book(value.try_downcast_ref::<BookRecord>()?)),
        AUTHOR_TYPE => Ok(Parent::Author(value.try_downcast_ref::<AuthorRecord>()?)),
        other => Err(async_graphql::Error::new(format!(
            "no record resolves fields of type '{other}'"
        ))),
    }
}

fn into_field_value(resolved: Resolved<'_>) -> Option<FieldValue<'_>> {
    match resolved {
        Resolved::Null => None,
        Resolved::String(value) => Some(FieldValue::value(value)),
        Resolved::Book(book) => Some(FieldValue::borrowed_any(book)),
        Resolved::Author(author) => Some(FieldValue::borrowed_any(author)),
        Resolved::List(items) => Some(FieldValue::list(
            items
                .into_iter()
                .map(|item| into_field_value(item).unwrap_or(FieldValue::NULL)),
        )),
    }
}

/// Parses an SDL type reference such as `String`, `[Author!]!` or `[Book]`.
pub fn parse_type_ref(ty: &str) -> Result<TypeRef, SchemaError> {
    let invalid = || SchemaError::InvalidTypeReference(ty.to_string());
    let trimmed = ty.trim();

    if let Some(inner) = trimmed.strip_suffix('!') {
        if inner.trim_end().ends_with('!') {
            return Err(invalid());
        }
        return parse_type_ref(inner)
            .map(|inner| TypeRef::NonNull(Box::new(inner)))
            .map_err(|_| invalid());
    }
    if let Some(inner) = trimmed
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
    {
        return parse_type_ref(inner)
            .map(|inner| TypeRef::List(Box::new(inner)))
            .map_err(|_| invalid());
    }

    let mut chars = trimmed.chars();
    let is_name = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_');
    if is_name {
        Ok(TypeRef::Named(trimmed.to_string().into()))
    } else {
        Err(invalid())
    }
}
