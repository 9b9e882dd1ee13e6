pub mod address;
pub mod args;
pub mod common;
pub mod constants;
pub mod pipeline;
pub mod provider;
pub mod registry;
pub mod taxonomy;
