pub mod completion;
pub mod flows;
pub mod line_editor;
pub mod models;
pub mod prompter;
