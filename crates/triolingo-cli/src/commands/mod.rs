pub mod init;
pub mod languages;
pub mod lessons;
pub mod open;
pub mod quiz;
pub mod scores;
pub mod validate;
