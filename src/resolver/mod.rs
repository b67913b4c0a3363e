pub mod common;
pub mod rpc;
pub mod web;
