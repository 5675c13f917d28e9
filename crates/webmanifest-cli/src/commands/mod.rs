pub mod build;
pub mod init;
pub mod print;
pub mod serve;
