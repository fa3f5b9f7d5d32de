use crate::core::domain::Configuration;
use crate::core::repository::Repository;
use crate::loans::domain::model::LoanEntity;
use crate::utils::file::TextFileRepository;

pub fn create_loan_repository(config: &Configuration) -> Box<dyn Repository<LoanEntity>> {
    Box::new(TextFileRepository::<LoanEntity>::new(&config.loans_path(), config.store))
}
