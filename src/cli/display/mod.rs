pub mod table;

pub use table::{colored_score, colored_severity, list_table, section};
