pub mod analyzers;
pub mod cities;
pub mod error;
pub mod filter;
pub mod loader;
pub mod output;
pub mod pager;
pub mod parser;
pub mod records;
