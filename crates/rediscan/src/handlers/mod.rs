pub mod error;
pub mod health;
pub mod html;
pub mod pages;

pub use error::AppError;
