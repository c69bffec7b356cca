pub mod models;

pub use models::models;
