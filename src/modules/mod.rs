pub mod auth;
pub mod books;
pub mod roles;
pub mod users;
