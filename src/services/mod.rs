pub mod csv_parser;
pub mod paper_renderer;
pub mod print_service;
pub mod selection;

pub use csv_parser::{parse_records, parse_table, ParsedTable};
pub use paper_renderer::{GeneratedPaper, PaperRenderer};
pub use print_service::{PrintFormat, PrintService};
pub use selection::{count_matching, select_questions, SelectionCriteria};
