pub mod catalog;
pub mod games;
pub mod profiles;
