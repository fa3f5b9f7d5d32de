pub mod service;

use crate::books::domain::model::BookEntity;
use crate::core::library::ReturnOutcome;
use crate::loans::domain::model::LoanEntity;
use crate::members::domain::model::MemberEntity;

// CatalogService owns the books, members and loans of one library. Domain rule
// violations come back as false, None or ReturnOutcome::NoActiveLoan; storage
// failures are logged and never returned.
pub trait CatalogService {
    fn add_book(&mut self, isbn: &str, title: &str, author: &str, quantity: i64);
    fn add_member(&mut self, member_id: &str, name: &str, contact: &str) -> bool;
    fn find_book_by_isbn(&self, isbn: &str) -> Option<&BookEntity>;
    fn find_member_by_id(&self, member_id: &str) -> Option<&MemberEntity>;
    fn search_books_by_title(&self, title_part: &str) -> Vec<&BookEntity>;
    fn search_books_by_author(&self, author_part: &str) -> Vec<&BookEntity>;
    fn is_book_available(&self, isbn: &str) -> bool;
    fn available_copies(&self, isbn: &str) -> Option<i64>;
    fn issue_book(&mut self, isbn: &str, member_id: &str, days: i64) -> bool;
    fn return_book(&mut self, isbn: &str, member_id: &str) -> ReturnOutcome;
    fn get_all_books(&self) -> &[BookEntity];
    fn get_all_members(&self) -> &[MemberEntity];
    fn get_all_loans(&self) -> &[LoanEntity];
    fn get_overdue_loans(&self) -> Vec<&LoanEntity>;
}
