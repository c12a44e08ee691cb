pub mod config;
pub mod generation;
pub mod history;
pub mod keychain;
pub mod vocabulary;
