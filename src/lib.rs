//! Transcript Server Library
//!
//! Parses academic transcript PDFs into structured course records.
//! The server binary is in main.rs.
//!
//! # Modules
//!
//! - `transcript`: Line parser and course record types
//! - `pdf`: PDF text extraction via MuPDF
//! - `upload`: Temporary storage for uploaded files
//! - `routes`: HTTP endpoints

pub mod config;
pub mod error;
pub mod pdf;
pub mod routes;
pub mod state;
pub mod transcript;
pub mod upload;
