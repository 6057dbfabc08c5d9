pub mod mapping;
pub mod quote;
pub mod schema;
