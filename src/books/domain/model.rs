use std::fmt;
use std::fmt::{Display, Formatter};
use serde::{Deserialize, Serialize};
use crate::core::domain::Identifiable;
use crate::core::repository::LineCodec;
use crate::utils::text::{decode_fields, escape, join_fields, parse_number};

// BookEntity abstracts a catalog title; quantity counts the copies the library owns.
// Record layout: isbn|title|author|quantity
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub struct BookEntity {
    pub isbn: String,
    pub title: String,
    pub author: String,
    pub quantity: i64,
}

impl BookEntity {
    pub fn new(isbn: &str, title: &str, author: &str, quantity: i64) -> Self {
        Self {
            isbn: isbn.to_string(),
            title: title.to_string(),
            author: author.to_string(),
            quantity,
        }
    }
}

impl Identifiable for BookEntity {
    fn id(&self) -> &str {
        self.isbn.as_str()
    }
}

impl LineCodec for BookEntity {
    const MIN_FIELDS: usize = 4;

    fn encode(&self) -> String {
        join_fields(&[
            escape(&self.isbn),
            escape(&self.title),
            escape(&self.author),
            self.quantity.to_string(),
        ])
    }

    fn decode(line: &str) -> Option<Self> {
        let fields = decode_fields(line, Self::MIN_FIELDS)?;
        Some(BookEntity::new(&fields[0], &fields[1], &fields[2], parse_number(&fields[3])))
    }
}

impl Display for BookEntity {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "ISBN: {}, Title: {}, Author: {}, Quantity: {}", self.isbn, self.title, self.author, self.quantity)
    }
}

#[cfg(test)]
mod tests {
    use crate::books::domain::model::BookEntity;
    use crate::core::domain::Identifiable;
    use crate::core::repository::LineCodec;

    #[test]
    fn test_should_build_books() {
        let book = BookEntity::new("isbn", "title", "author", 3);
        assert_eq!("isbn", book.id());
        assert_eq!("title", book.title.as_str());
        assert_eq!("author", book.author.as_str());
        assert_eq!(3, book.quantity);
    }

    #[test]
    fn test_should_encode_with_escapes() {
        let book = BookEntity::new("111", "A|B\\C", "Rob", 2);
        assert_eq!("111|A\\|B\\\\C|Rob|2", book.encode());
    }

    #[test]
    fn test_should_round_trip_title_with_delimiter() {
        let book = BookEntity::new("111", "A|B\\C", "R|o\\b\\", 1);
        assert_eq!(Some(book.clone()), BookEntity::decode(book.encode().as_str()));
    }

    #[test]
    fn test_should_skip_short_line() {
        assert_eq!(None, BookEntity::decode("111|Go|Rob"));
        assert_eq!(None, BookEntity::decode("111|Go\\|Rob|1"));
    }

    #[test]
    fn test_should_default_bad_quantity_to_zero() {
        let book = BookEntity::decode("111|Go|Rob|many").expect("should decode");
        assert_eq!(0, book.quantity);
        let book = BookEntity::decode("111|Go|Rob|").expect("should decode");
        assert_eq!(0, book.quantity);
    }

    #[test]
    fn test_should_ignore_extra_fields() {
        let book = BookEntity::decode("111|Go|Rob|4|extra|more").expect("should decode");
        assert_eq!(BookEntity::new("111", "Go", "Rob", 4), book);
    }

    #[test]
    fn test_should_format_book() {
        let book = BookEntity::new("111", "Go", "Rob", 1);
        assert_eq!("ISBN: 111, Title: Go, Author: Rob, Quantity: 1", book.to_string());
    }
}
