pub mod arg_parser;
pub mod args;
