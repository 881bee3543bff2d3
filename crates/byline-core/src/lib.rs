pub mod agreement;
pub mod author;
pub mod badges;
pub mod config;
pub mod content;
pub mod error;
pub mod evidence;
pub mod io;
pub mod onboarding;
pub mod paths;
pub mod writer;

pub use error::{BylineError, Result};
