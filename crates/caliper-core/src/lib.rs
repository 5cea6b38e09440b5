pub mod bridge;
pub mod config;
pub mod consts;
pub mod error;
pub mod export;
pub mod geometry;
pub mod source;
pub mod refine;
pub mod session;
pub mod store;
