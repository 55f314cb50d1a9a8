pub mod extract;
pub mod rest;
