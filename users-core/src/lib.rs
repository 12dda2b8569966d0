pub mod errors;
pub mod models;

pub use errors::UsersError;

pub type UsersResult<T> = Result<T, UsersError>;
