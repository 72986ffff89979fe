//! The in-memory library: two denormalized collections that refer to each
//! other by title and by name.
//!
//! Nothing keeps the two sides consistent. A book may list an author who is
//! not in `authors`, and an author may list a title that is not in `books`.
//! Lookups silently skip whatever does not resolve.

use crate::cross_reference::KeyIndex;
use crate::cross_reference::Keyed;

/// A book, referring to its authors by name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BookRecord {
    pub title: String,
    pub author_names: Vec<String>,
}

/// An author, referring to their books by title.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthorRecord {
    pub name: String,
    pub book_titles: Vec<String>,
}

impl BookRecord {
    pub fn new<I, S>(title: impl Into<String>, author_names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            title: title.into(),
            author_names: author_names.into_iter().map(Into::into).collect(),
        }
    }
}

impl AuthorRecord {
    pub fn new<I, S>(name: impl Into<String>, book_titles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            book_titles: book_titles.into_iter().map(Into::into).collect(),
        }
    }
}

impl Keyed for BookRecord {
    fn key(&self) -> &str {
        &self.title
    }
}

impl Keyed for AuthorRecord {
    fn key(&self) -> &str {
        &self.name
    }
}

/// Both collections, fixed for the lifetime of the process.
///
/// There is no mutation path: the fields are private and every accessor hands
/// out shared borrows. Share it between requests behind an `Arc`.
#[derive(Debug)]
pub struct DataStore {
    books: Vec<BookRecord>,
    authors: Vec<AuthorRecord>,
    books_by_title: KeyIndex,
    authors_by_name: KeyIndex,
}

impl DataStore {
    pub fn new(books: Vec<BookRecord>, authors: Vec<AuthorRecord>) -> Self {
        let books_by_title = KeyIndex::build(&books);
        let authors_by_name = KeyIndex::build(&authors);
        tracing::debug!(
            books = books.len(),
            authors = authors.len(),
            "built library data store"
        );
        Self {
            books,
            authors,
            books_by_title,
            authors_by_name,
        }
    }

    pub fn books(&self) -> &[BookRecord] {
        &self.books
    }

    pub fn authors(&self) -> &[AuthorRecord] {
        &self.authors
    }

    /// Every author whose name is in `names`, in `names` order.
    pub fn authors_named<S: AsRef<str>>(&self, names: &[S]) -> Vec<&AuthorRecord> {
        self.authors_by_name.resolve(names, &self.authors)
    }

    /// Every book whose title is in `titles`, in `titles` order.
    pub fn books_titled<S: AsRef<str>>(&self, titles: &[S]) -> Vec<&BookRecord> {
        self.books_by_title.resolve(titles, &self.books)
    }
}

impl Default for DataStore {
    fn default() -> Self {
        Self::new(sample_books(), sample_authors())
    }
}

fn sample_books() -> Vec<BookRecord> {
    vec![
        BookRecord::new(
            "Mistakes Were Made (But Not by Me)",
            ["Carol Tavris", "Elliot Aronson"],
        ),
        BookRecord::new("Harry Potter and the Chamber of Secrets", ["J.K. Rowling"]),
        BookRecord::new("Jurassic Park", ["Michael Crichton"]),
    ]
}

fn sample_authors() -> Vec<AuthorRecord> {
    vec![
        AuthorRecord::new("J.K. Rowling", ["Harry Potter and the Chamber of Secrets"]),
        AuthorRecord::new("Michael Crichton", ["Jurassic Park"]),
        AuthorRecord::new("Elliot Aronson", ["Mistakes Were Made (But Not by Me)"]),
        AuthorRecord::new("Carol Tavris", ["Mistakes Were Made (But Not by Me)"]),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cross_reference::resolve_references;

    #[test]
    fn default_store_holds_the_sample_library() {
        let store = DataStore::default();
        let titles: Vec<&str> = store.books().iter().map(|b| b.title.as_str()).collect();
        assert_eq!(
            titles,
            [
                "Mistakes Were Made (But Not by Me)",
                "Harry Potter and the Chamber of Secrets",
                "Jurassic Park",
            ]
        );
        let names: Vec<&str> = store.authors().iter().map(|a| a.name.as_str()).collect();
        assert_eq!(
            names,
            [
                "J.K. Rowling",
                "Michael Crichton",
                "Elliot Aronson",
                "Carol Tavris",
            ]
        );
    }

    #[test]
    fn indexed_lookups_agree_with_linear_scans() {
        let store = DataStore::default();
        for book in store.books() {
            assert_eq!(
                store.authors_named(&book.author_names),
                resolve_references(&book.author_names, store.authors())
            );
        }
        for author in store.authors() {
            assert_eq!(
                store.books_titled(&author.book_titles),
                resolve_references(&author.book_titles, store.books())
            );
        }
    }

    #[test]
    fn book_authors_follow_the_book_order_not_the_collection_order() {
        let store = DataStore::default();
        let names: Vec<&str> = store
            .authors_named(&store.books()[0].author_names)
            .into_iter()
            .map(|a| a.name.as_str())
            .collect();
        // "Carol Tavris" is declared after "Elliot Aronson" in the authors collection.
        assert_eq!(names, ["Carol Tavris", "Elliot Aronson"]);
    }

    #[test]
    fn diverging_collections_are_left_alone() {
        let store = DataStore::new(
            vec![BookRecord::new("Dune", ["Frank Herbert"])],
            vec![AuthorRecord::new("Frank Herbert", ["Dune", "Children of Dune"])],
        );
        let author = &store.authors()[0];
        let titles: Vec<&str> = store
            .books_titled(&author.book_titles)
            .into_iter()
            .map(|b| b.title.as_str())
            .collect();
        assert_eq!(titles, ["Dune"]);
    }
}
