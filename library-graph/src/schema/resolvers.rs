//! The resolver map: one plain function per `(type, field)` pair.

use std::collections::HashMap;
use std::fmt;

use crate::context::RequestContext;
use crate::query;
use crate::store::AuthorRecord;
use crate::store::BookRecord;

use super::AUTHOR_TYPE;
use super::BOOK_TYPE;
use super::QUERY_TYPE;

/// The record a field is being resolved on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Parent<'a> {
    Query,
    Book(&'a BookRecord),
    Author(&'a AuthorRecord),
}

/// What a resolver hands back to the execution engine.
///
/// Records are borrowed from the store the request context points at.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Resolved<'a> {
    Null,
    String(String),
    Book(&'a BookRecord),
    Author(&'a AuthorRecord),
    List(Vec<Resolved<'a>>),
}

impl<'a> Resolved<'a> {
    fn list<I: IntoIterator<Item = Resolved<'a>>>(items: I) -> Self {
        Resolved::List(items.into_iter().collect())
    }
}

/// Arguments of the field being resolved.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Arguments {
    values: HashMap<String, String>,
}

impl Arguments {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.insert(name.into(), value.into());
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Arguments {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut arguments = Arguments::default();
        for (name, value) in iter {
            arguments.insert(name, value);
        }
        arguments
    }
}

pub type Resolver = for<'a> fn(&Parent<'a>, &Arguments, &'a RequestContext) -> Resolved<'a>;

/// Resolvers keyed by type name and field name.
#[derive(Clone)]
pub struct ResolverMap {
    resolvers: HashMap<&'static str, HashMap<&'static str, Resolver>>,
}

impl ResolverMap {
    pub fn empty() -> Self {
        Self {
            resolvers: HashMap::new(),
        }
    }

    /// Registers `resolver` for `type_name.field_name`, replacing any
    /// previous registration.
    pub fn register(
        mut self,
        type_name: &'static str,
        field_name: &'static str,
        resolver: Resolver,
    ) -> Self {
        self.resolvers
            .entry(type_name)
            .or_default()
            .insert(field_name, resolver);
        self
    }

    pub fn get(&self, type_name: &str, field_name: &str) -> Option<Resolver> {
        self.resolvers.get(type_name)?.get(field_name).copied()
    }

    pub fn len(&self) -> usize {
        self.resolvers.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for ResolverMap {
    fn default() -> Self {
        ResolverMap::empty()
            .register(BOOK_TYPE, "title", book_title)
            .register(BOOK_TYPE, "authors", book_authors)
            .register(AUTHOR_TYPE, "name", author_name)
            .register(AUTHOR_TYPE, "books", author_books)
            .register(QUERY_TYPE, "getBooks", get_books)
            .register(QUERY_TYPE, "getAuthor", get_author)
    }
}

impl fmt::Debug for ResolverMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut fields: Vec<String> = self
            .resolvers
            .iter()
            .flat_map(|(type_name, fields)| {
                fields
                    .keys()
                    .map(move |field_name| format!("{type_name}.{field_name}"))
            })
            .collect();
        fields.sort();
        f.debug_struct("ResolverMap")
            .field("fields", &fields)
            .finish()
    }
}

fn book_title<'a>(parent: &Parent<'a>, _: &Arguments, _: &'a RequestContext) -> Resolved<'a> {
    match parent {
        Parent::Book(book) => Resolved::String(book.title.clone()),
        _ => Resolved::Null,
    }
}

fn book_authors<'a>(
    parent: &Parent<'a>,
    _: &Arguments,
    context: &'a RequestContext,
) -> Resolved<'a> {
    match parent {
        Parent::Book(book) => {
            Resolved::list(query::authors_of(context, book).into_iter().map(Resolved::Author))
        }
        _ => Resolved::Null,
    }
}

fn author_name<'a>(parent: &Parent<'a>, _: &Arguments, _: &'a RequestContext) -> Resolved<'a> {
    match parent {
        Parent::Author(author) => Resolved::String(author.name.clone()),
        _ => Resolved::Null,
    }
}

fn author_books<'a>(
    parent: &Parent<'a>,
    _: &Arguments,
    context: &'a RequestContext,
) -> Resolved<'a> {
    match parent {
        Parent::Author(author) => {
            Resolved::list(query::books_of(context, author).into_iter().map(Resolved::Book))
        }
        _ => Resolved::Null,
    }
}

fn get_books<'a>(_: &Parent<'a>, _: &Arguments, context: &'a RequestContext) -> Resolved<'a> {
    Resolved::list(query::list_books(context).iter().map(Resolved::Book))
}

fn get_author<'a>(
    _: &Parent<'a>,
    arguments: &Arguments,
    context: &'a RequestContext,
) -> Resolved<'a> {
    arguments
        .get("name")
        .and_then(|name| query::find_author_by_name(context, name))
        .map_or(Resolved::Null, Resolved::Author)
}
