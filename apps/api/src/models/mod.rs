pub mod interview;
pub mod market;
pub mod plan;
pub mod profile;
pub mod user;
