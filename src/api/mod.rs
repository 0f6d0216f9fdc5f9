pub mod config;
pub use config::*;
pub mod requests;
pub use requests::*;
pub mod translator;
pub use translator::*;
