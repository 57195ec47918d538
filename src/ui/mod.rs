pub mod ansi;
pub mod ascii;
pub mod chrome;
pub mod table_printer;
pub mod width_util;
