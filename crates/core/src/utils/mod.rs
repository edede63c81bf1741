pub mod csv_parser;
pub mod time_utils;
pub mod xlsx_reader;

pub use csv_parser::{read_sheet, Sheet};
pub use xlsx_reader::read_workbook;
