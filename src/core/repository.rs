use serde::{Deserialize, Serialize};
use crate::core::library::LibraryResult;

// LineCodec converts a record to and from one delimited line of text
pub trait LineCodec: Sized {
    // minimum number of fields a line needs to decode
    const MIN_FIELDS: usize;

    fn encode(&self) -> String;

    // decode returns None for lines that should be skipped
    fn decode(line: &str) -> Option<Self>;
}

pub trait Repository<Entity> {
    // loads every record of the collection, missing storage yields an empty list
    fn load_all(&self) -> LibraryResult<Vec<Entity>>;

    // replaces the stored collection, returns number of records written
    fn save_all(&self, entities: &[Entity]) -> LibraryResult<usize>;
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone, Copy)]
pub enum RepositoryStore {
    // truncate and rewrite the target file in place
    TextFile,
    // write a sibling temp file then rename it over the target
    AtomicTextFile,
}

impl RepositoryStore {
    pub fn is_atomic(&self) -> bool {
        match self {
            RepositoryStore::TextFile => false,
            RepositoryStore::AtomicTextFile => true,
        }
    }
}
