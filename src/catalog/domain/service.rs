use tracing::{error, info, warn};
use crate::books::domain::model::BookEntity;
use crate::catalog::domain::CatalogService;
use crate::core::domain::{Clock, Configuration, Identifiable};
use crate::core::library::ReturnOutcome;
use crate::core::repository::Repository;
use crate::loans::domain::model::LoanEntity;
use crate::members::domain::model::MemberEntity;
use crate::utils::text::contains_ignore_case;

pub struct CatalogServiceImpl {
    fine_per_day: f64,
    book_repository: Box<dyn Repository<BookEntity>>,
    member_repository: Box<dyn Repository<MemberEntity>>,
    loan_repository: Box<dyn Repository<LoanEntity>>,
    clock: Box<dyn Clock>,
    books: Vec<BookEntity>,
    members: Vec<MemberEntity>,
    loans: Vec<LoanEntity>,
}

impl CatalogServiceImpl {
    pub fn new(config: &Configuration, book_repository: Box<dyn Repository<BookEntity>>,
               member_repository: Box<dyn Repository<MemberEntity>>,
               loan_repository: Box<dyn Repository<LoanEntity>>,
               clock: Box<dyn Clock>) -> Self {
        let books = load_or_empty("books", book_repository.as_ref());
        let members = load_or_empty("members", member_repository.as_ref());
        let loans = load_or_empty("loans", loan_repository.as_ref());
        Self {
            fine_per_day: config.fine_per_day,
            book_repository,
            member_repository,
            loan_repository,
            clock,
            books,
            members,
            loans,
        }
    }

    fn active_loans_for(&self, isbn: &str) -> i64 {
        self.loans.iter().filter(|l| l.is_active() && l.is_for_book(isbn)).count() as i64
    }

    fn search_books<F>(&self, matches: F) -> Vec<&BookEntity> where F: Fn(&BookEntity) -> bool {
        self.books.iter().filter(|b| matches(b)).collect()
    }
}

impl CatalogService for CatalogServiceImpl {
    fn add_book(&mut self, isbn: &str, title: &str, author: &str, quantity: i64) {
        if let Some(existing) = self.books.iter_mut().find(|b| b.has_id(isbn)) {
            existing.quantity = match existing.quantity.checked_add(quantity) {
                Some(total) => total,
                None => {
                    warn!(isbn = existing.isbn.as_str(), quantity, "quantity overflow, capping copies");
                    existing.quantity.saturating_add(quantity)
                }
            };
            info!(isbn = existing.isbn.as_str(), quantity = existing.quantity, "added copies to book");
        } else {
            self.books.push(BookEntity::new(isbn, title, author, quantity));
            info!(isbn, quantity, "added book");
        }
        persist("books", self.book_repository.as_ref(), &self.books);
    }

    fn add_member(&mut self, member_id: &str, name: &str, contact: &str) -> bool {
        if self.find_member_by_id(member_id).is_some() {
            info!(member_id, "member already exists");
            return false;
        }
        self.members.push(MemberEntity::new(member_id, name, contact));
        info!(member_id, "added member");
        persist("members", self.member_repository.as_ref(), &self.members);
        true
    }

    fn find_book_by_isbn(&self, isbn: &str) -> Option<&BookEntity> {
        self.books.iter().find(|b| b.has_id(isbn))
    }

    fn find_member_by_id(&self, member_id: &str) -> Option<&MemberEntity> {
        self.members.iter().find(|m| m.has_id(member_id))
    }

    fn search_books_by_title(&self, title_part: &str) -> Vec<&BookEntity> {
        self.search_books(|b| contains_ignore_case(&b.title, title_part))
    }

    fn search_books_by_author(&self, author_part: &str) -> Vec<&BookEntity> {
        self.search_books(|b| contains_ignore_case(&b.author, author_part))
    }

    fn is_book_available(&self, isbn: &str) -> bool {
        self.available_copies(isbn).map_or(false, |copies| copies > 0)
    }

    fn available_copies(&self, isbn: &str) -> Option<i64> {
        let book = self.find_book_by_isbn(isbn)?;
        Some((book.quantity - self.active_loans_for(isbn)).max(0))
    }

    fn issue_book(&mut self, isbn: &str, member_id: &str, days: i64) -> bool {
        if self.find_book_by_isbn(isbn).is_none() || self.find_member_by_id(member_id).is_none() {
            return false;
        }
        if !self.is_book_available(isbn) {
            return false;
        }
        let loan = match LoanEntity::issue(isbn, member_id, self.clock.today(), days) {
            Some(loan) => loan,
            None => {
                warn!(isbn, member_id, days, "loan period out of calendar range");
                return false;
            }
        };
        info!(isbn, member_id, due_date = %loan.due_date, "issued book");
        self.loans.push(loan);
        persist("loans", self.loan_repository.as_ref(), &self.loans);
        true
    }

    fn return_book(&mut self, isbn: &str, member_id: &str) -> ReturnOutcome {
        // first match wins when a member holds several copies of the same title
        let pos = match self.loans.iter().position(|l| l.is_active() && l.is_for(isbn, member_id)) {
            Some(pos) => pos,
            None => return ReturnOutcome::NoActiveLoan,
        };
        self.loans[pos].mark_returned();
        persist("loans", self.loan_repository.as_ref(), &self.loans);
        let fine = self.loans[pos].fine_on(self.clock.today(), self.fine_per_day);
        info!(isbn, member_id, fine, "returned book");
        ReturnOutcome::Returned { fine }
    }

    fn get_all_books(&self) -> &[BookEntity] {
        &self.books
    }

    fn get_all_members(&self) -> &[MemberEntity] {
        &self.members
    }

    fn get_all_loans(&self) -> &[LoanEntity] {
        &self.loans
    }

    fn get_overdue_loans(&self) -> Vec<&LoanEntity> {
        let today = self.clock.today();
        self.loans.iter().filter(|l| l.is_overdue(today)).collect()
    }
}

fn load_or_empty<Entity>(kind: &str, repository: &dyn Repository<Entity>) -> Vec<Entity> {
    match repository.load_all() {
        Ok(records) => records,
        Err(err) => {
            error!(kind, error = %err, "failed to load records, starting empty");
            warn!(kind, "next save of this collection overwrites the unreadable file");
            vec![]
        }
    }
}

// persistence failures are logged and the in-memory collection is kept as is
fn persist<Entity>(kind: &str, repository: &dyn Repository<Entity>, entities: &[Entity]) {
    if let Err(err) = repository.save_all(entities) {
        error!(kind, error = %err, "failed to save records");
    }
}
