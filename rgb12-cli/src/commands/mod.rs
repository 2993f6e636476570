//! Command implementations for the rgb12 CLI.

pub mod convert;
pub mod export;
pub mod import;
pub mod info;

pub use convert::cmd_convert;
pub use export::cmd_export;
pub use import::cmd_import;
pub use info::cmd_info;
pub use test::cmd_test;
