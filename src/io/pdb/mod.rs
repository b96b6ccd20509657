mod reader;
mod records;

pub use reader::{count_models, read};
