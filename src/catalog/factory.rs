use crate::books::factory::create_book_repository;
use crate::catalog::domain::CatalogService;
use crate::catalog::domain::service::CatalogServiceImpl;
use crate::core::domain::{Clock, Configuration, SystemClock};
use crate::loans::factory::create_loan_repository;
use crate::members::factory::create_member_repository;

pub fn create_catalog_service(config: &Configuration) -> Box<dyn CatalogService> {
    create_catalog_service_with_clock(config, Box::new(SystemClock))
}

pub fn create_catalog_service_with_clock(config: &Configuration, clock: Box<dyn Clock>) -> Box<dyn CatalogService> {
    let book_repo = create_book_repository(config);
    let member_repo = create_member_repository(config);
    let loan_repo = create_loan_repository(config);
    Box::new(CatalogServiceImpl::new(config, book_repo, member_repo, loan_repo, clock))
}
