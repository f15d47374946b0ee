pub mod application;
pub mod company;
pub mod milestone;
pub mod offer;
pub mod role;
pub mod user;
pub mod validation;
