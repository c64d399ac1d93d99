//! Conversion between console-dns records and generic records.
//!
//! The generic record's `id` carries the JSON of the provider record it was
//! built from, so a later `set` can tell an update from a create.

use std::time::Duration;

use crate::core::record::DNSRecord;
use crate::providers::console::error::ConsoleDnsError;
use crate::providers::console::types::ZoneRecord;

pub fn to_dns_record<R: ZoneRecord>(name: &str, record: &R) -> Result<DNSRecord, ConsoleDnsError> {
    Ok(DNSRecord {
        id: serde_json::to_string(record)?,
        record_type: R::TYPE.to_string(),
        name: name.to_string(),
        value: record.value(),
        ttl: Duration::from_secs(u64::from(record.ttl())),
    })
}

/// Returns the previous provider state held in `id` (if any) and the record
/// described by `value` and `ttl`.
pub fn from_dns_record<R: ZoneRecord>(
    record: &DNSRecord,
) -> Result<(Option<R>, R), ConsoleDnsError> {
    let old = if record.id.is_empty() {
        None
    } else {
        Some(serde_json::from_str::<R>(&record.id)?)
    };
    let new = R::new(&record.value, record.ttl.as_secs())?;
    Ok((old, new))
}
