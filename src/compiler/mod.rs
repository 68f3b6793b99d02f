pub mod cl;
pub mod driver;
