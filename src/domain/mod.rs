pub mod movie;
pub mod vocabulary;

pub use movie::MovieRecord;
pub use vocabulary::{VocabularyRecord, REQUIRED_FIELDS};
