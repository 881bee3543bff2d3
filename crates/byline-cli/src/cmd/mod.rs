pub mod config;
pub mod evidence;
pub mod init;
pub mod onboarding;
pub mod serve;
