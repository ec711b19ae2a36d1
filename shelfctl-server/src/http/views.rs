//! Server-rendered HTML pages
//!
//! Views take the data they render as arguments; nothing is cached between
//! requests. All interpolated values pass through `escape`.

use std::fmt::Write;

use crate::models::{Book, CoverSize};

/// Heading of the list page
pub const LIST_TITLE: &str = "Books Collection";

/// Escape text for HTML element content and quoted attributes.
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn page(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<link rel="stylesheet" href="/static/styles.css">
</head>
<body>
<main>
{body}
</main>
</body>
</html>
"#,
        title = escape(title),
        body = body
    )
}

fn book_row(book: &Book) -> String {
    let cover = match book.isbn.as_deref() {
        Some(isbn) => format!(
            r#"<img class="cover" src="/covers/isbn/{}/{}" alt="" loading="lazy">"#,
            escape(isbn),
            CoverSize::Medium
        ),
        None => String::new(),
    };
    let recency = book
        .recency
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default();

    format!(
        r#"<tr>
<td>{cover}</td>
<td>{title}</td>
<td>{author}</td>
<td>{rating}</td>
<td>{recency}</td>
<td>{notes}</td>
<td>
<a href="/edit/{id}">Edit</a>
<form action="/delete" method="post">
<input type="hidden" name="deleteBookId" value="{id}">
<button type="submit">Delete</button>
</form>
</td>
</tr>
"#,
        cover = cover,
        title = escape(&book.title),
        author = escape(&book.author),
        rating = book.rating,
        recency = recency,
        notes = escape(book.notes.as_deref().unwrap_or_default()),
        id = book.id,
    )
}

/// Form fields shared by the add and edit pages
fn book_fields(book: Option<&Book>) -> String {
    let title = book.map(|b| escape(&b.title)).unwrap_or_default();
    let author = book.map(|b| escape(&b.author)).unwrap_or_default();
    let rating = book.map(|b| b.rating.to_string()).unwrap_or_default();
    let recency = book
        .and_then(|b| b.recency)
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default();
    let notes = book
        .and_then(|b| b.notes.as_deref())
        .map(escape)
        .unwrap_or_default();
    let isbn = book
        .and_then(|b| b.isbn.as_deref())
        .map(escape)
        .unwrap_or_default();

    format!(
        r#"<label>Title <input name="title" value="{title}" required></label>
<label>Author <input name="author" value="{author}" required></label>
<label>Rating <input name="rating" type="number" value="{rating}" required></label>
<label>Last read <input name="recency" type="date" value="{recency}"></label>
<label>ISBN <input name="isbn" value="{isbn}"></label>
<label>Notes <textarea name="notes">{notes}</textarea></label>
"#
    )
}

/// List page: every book plus the add form.
pub fn index(list_title: &str, books: &[Book]) -> String {
    let mut body = String::new();
    // Writing to a String cannot fail
    let _ = writeln!(body, "<h1>{}</h1>", escape(list_title));

    if books.is_empty() {
        body.push_str("<p class=\"empty\">No books yet.</p>\n");
    } else {
        body.push_str(
            "<table>\n<thead><tr><th></th><th>Title</th><th>Author</th><th>Rating</th>\
             <th>Last read</th><th>Notes</th><th></th></tr></thead>\n<tbody>\n",
        );
        for book in books {
            body.push_str(&book_row(book));
        }
        body.push_str("</tbody>\n</table>\n");
    }

    let _ = write!(
        body,
        "<h2>Add a book</h2>\n<form action=\"/add\" method=\"post\">\n{}<button type=\"submit\">Add</button>\n</form>\n",
        book_fields(None)
    );

    page(list_title, &body)
}

/// Edit page for one book.
pub fn edit(book: &Book) -> String {
    let body = format!(
        "<h1>Edit {title}</h1>\n<form action=\"/edit/{id}\" method=\"post\">\n{fields}<button type=\"submit\">Save</button>\n</form>\n<a href=\"/\">Back</a>\n",
        title = escape(&book.title),
        id = book.id,
        fields = book_fields(Some(book)),
    );
    page(&format!("Edit {}", book.title), &body)
}
