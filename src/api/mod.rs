pub mod flash;
pub mod rest;
