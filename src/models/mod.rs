pub mod loaders;
pub mod record;
pub mod subject;
pub mod unit;

pub use loaders::{load_subject_catalog, parse_subject_catalog};
pub use record::{QuestionRecord, TableRow, STANDARD_HEADER};
pub use subject::SubjectCatalog;
pub use unit::{derive_units, unit_label};
