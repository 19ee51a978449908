mod query;
mod render;
mod types;

pub use query::{search_api, search_page};
