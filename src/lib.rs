// src/lib.rs

//! Client for the Gymnázium na Vítězné pláni website.
//!
//! Articles, contacts, static pages, search and news come from the JSON
//! API; events are scraped from the events pages.

pub mod error;
pub mod models;
pub mod services;
pub mod utils;

pub use error::{GvpError, Result};
pub use services::{GvpClient, HttpTransport, Transport};
