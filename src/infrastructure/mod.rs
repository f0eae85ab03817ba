pub mod config;
pub mod http;
pub mod loaders;
pub mod repositories;
pub mod tokenizer;
