pub mod errors;
pub mod config;
pub mod modules;

pub(crate) mod macros {
    pub mod parse_error_handler;
}
