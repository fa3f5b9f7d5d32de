use crate::core::domain::Configuration;
use crate::core::repository::Repository;
use crate::members::domain::model::MemberEntity;
use crate::utils::file::TextFileRepository;

pub fn create_member_repository(config: &Configuration) -> Box<dyn Repository<MemberEntity>> {
    Box::new(TextFileRepository::<MemberEntity>::new(&config.members_path(), config.store))
}
