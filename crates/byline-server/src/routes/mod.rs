pub mod admin;
pub mod agreement;
pub mod badges;
pub mod config;
pub mod writers;
