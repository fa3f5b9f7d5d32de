use crate::books::domain::model::BookEntity;
use crate::core::domain::Configuration;
use crate::core::repository::Repository;
use crate::utils::file::TextFileRepository;

pub fn create_book_repository(config: &Configuration) -> Box<dyn Repository<BookEntity>> {
    Box::new(TextFileRepository::<BookEntity>::new(&config.books_path(), config.store))
}
