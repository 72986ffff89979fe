//! Lookups behind the root query fields and the relation fields.

use crate::context::RequestContext;
use crate::store::AuthorRecord;
use crate::store::BookRecord;

/// All books, in declaration order.
pub fn list_books(context: &RequestContext) -> &[BookRecord] {
    context.books()
}

/// The first author named exactly `name`, if any.
pub fn find_author_by_name<'a>(
    context: &'a RequestContext,
    name: &str,
) -> Option<&'a AuthorRecord> {
    context.authors().iter().find(|author| author.name == name)
}

/// The authors a book lists, resolved by name.
pub fn authors_of<'a>(context: &'a RequestContext, book: &BookRecord) -> Vec<&'a AuthorRecord> {
    let authors = context.store().authors_named(&book.author_names);
    tracing::debug!(
        title = %book.title,
        requested = book.author_names.len(),
        resolved = authors.len(),
        "resolved book authors"
    );
    authors
}

/// The books an author lists, resolved by title.
pub fn books_of<'a>(context: &'a RequestContext, author: &AuthorRecord) -> Vec<&'a BookRecord> {
    let books = context.store().books_titled(&author.book_titles);
    tracing::debug!(
        name = %author.name,
        requested = author.book_titles.len(),
        resolved = books.len(),
        "resolved author books"
    );
    books
}
