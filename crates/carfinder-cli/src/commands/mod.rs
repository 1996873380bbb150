pub mod ask;
pub mod options;
pub mod repl;
pub mod search;
