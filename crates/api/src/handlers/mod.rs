pub mod applications;
pub mod auth;
pub mod builds;
pub mod categories;
pub mod comments;
pub mod compatibility;
pub mod likes;
pub mod offers;
pub mod parts;
pub mod ratings;
pub mod requests;
pub mod stats;
pub mod users;
