pub mod breach;
pub mod cli;
pub mod codec;
pub mod config;
pub mod crypto;
pub mod errors;
pub mod generator;
pub mod remote;
pub mod session;
pub mod storage;
pub mod vault;
