//! Generic DNS record management on top of the console-dns zone API.

pub mod auth;
pub mod config;
pub mod core;
pub mod error;
pub mod providers;

pub use crate::core::provider::{
    DNSProvider, RecordAppender, RecordDeleter, RecordGetter, RecordSetter,
};
pub use crate::core::record::{DNSRecord, DNSRecordType};
pub use crate::error::Error;
pub use crate::providers::console::ConsoleDnsProvider;
