pub mod ast_printer;
pub mod callable;
pub mod environment;
pub mod error;
pub mod expr;
pub mod interpreter;
pub mod natives;
pub mod parser;
pub mod runner;
pub mod scanner;
pub mod stmt;
pub mod token;
pub mod value;
