pub mod service;
pub mod upstream;
