//! Table and roster I/O.
//!
//! The exam table is CSV with a header row; the roster is TOML. Outputs
//! are two CSV tables: scheduled exams and per-proctor statistics.

mod reader;
mod writer;

pub use reader::{
    load_roster, parse_roster, read_exam_file, read_exam_rows, read_exam_table, ExamTable,
};
pub use writer::{write_exam_file, write_exams, write_stats, write_stats_file, PROCTOR_COLUMN};
