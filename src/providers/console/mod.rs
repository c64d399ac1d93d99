//! console-dns provider implementation

pub mod client;
pub mod convert;
pub mod error;
pub mod types;


pub use client::{ConsoleDnsClient, ZoneClient};
pub use error::ConsoleDnsError;
pub use types::{ProviderRecord, RecordA, RecordAAAA, RecordTXT, Zone};

use crate::core::provider::{RecordAppender, RecordDeleter, RecordGetter, RecordSetter};
use crate::core::record::{DNSRecord, DNSRecordType};
use crate::error::Error;
use crate::providers::console::convert::{from_dns_record, to_dns_record};
use crate::providers::console::error::map_error;
use crate::providers::console::types::ZoneRecord;
use async_trait::async_trait;
use log::{debug, info};

/// Exposes a console-dns zone through the generic record interfaces.
pub struct ConsoleDnsProvider<C = ConsoleDnsClient> {
    client: C,
}

impl<C: ZoneClient> ConsoleDnsProvider<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }

    async fn append_one<R: ZoneRecord>(
        &self,
        zone: &str,
        record: &DNSRecord,
    ) -> Result<DNSRecord, ConsoleDnsError> {
        let (_, new) = from_dns_record::<R>(record)?;
        self.client
            .create_record(zone, &record.name, &new.clone().into())
            .await?;
        to_dns_record(&record.name, &new)
    }

    async fn set_one<R: ZoneRecord>(
        &self,
        zone: &str,
        record: &DNSRecord,
    ) -> Result<DNSRecord, ConsoleDnsError> {
        let (old, new) = from_dns_record::<R>(record)?;
        let target: ProviderRecord = new.clone().into();
        match old {
            Some(old) => {
                self.client
                    .update_record(zone, &record.name, &old.into(), &target)
                    .await?
            }
            None => self.client.create_record(zone, &record.name, &target).await?,
        }
        to_dns_record(&record.name, &new)
    }

    async fn delete_one<R: ZoneRecord>(
        &self,
        zone: &str,
        record: &DNSRecord,
    ) -> Result<(), ConsoleDnsError> {
        let (_, current) = from_dns_record::<R>(record)?;
        self.client
            .delete_record(zone, &record.name, &current.into())
            .await
    }
}

/// Zone names may arrive fully qualified; the API wants them without the
/// trailing dot.
fn normalize_zone(zone: &str) -> &str {
    zone.strip_suffix('.').unwrap_or(zone)
}

fn flatten_zone(zone: &Zone) -> Result<Vec<DNSRecord>, ConsoleDnsError> {
    let mut result = Vec::new();
    for (name, set) in &zone.records {
        for a in &set.a {
            result.push(to_dns_record(name, a)?);
        }
        for aaaa in &set.aaaa {
            result.push(to_dns_record(name, aaaa)?);
        }
        for txt in &set.txt {
            result.push(to_dns_record(name, txt)?);
        }
    }
    Ok(result)
}

#[async_trait]
impl<C: ZoneClient> RecordGetter for ConsoleDnsProvider<C> {
    async fn get_records(&self, zone: &str) -> Result<Vec<DNSRecord>, Error> {
        let zone = normalize_zone(zone);
        info!("listing records in zone {zone}");
        let listed = self.client.list_zone(zone).await.map_err(map_error)?;
        flatten_zone(&listed).map_err(map_error)
    }
}

#[async_trait]
impl<C: ZoneClient> RecordAppender for ConsoleDnsProvider<C> {
    async fn append_records(
        &self,
        zone: &str,
        records: Vec<DNSRecord>,
    ) -> Result<Vec<DNSRecord>, Error> {
        let zone = normalize_zone(zone);
        let mut result = Vec::with_capacity(records.len());
        for record in &records {
            debug!("appending {} record {}", record.record_type, record.name);
            let added = match record.kind()? {
                DNSRecordType::A => self.append_one::<RecordA>(zone, record).await,
                DNSRecordType::AAAA => self.append_one::<RecordAAAA>(zone, record).await,
                DNSRecordType::TXT => self.append_one::<RecordTXT>(zone, record).await,
            };
            result.push(added.map_err(map_error)?);
        }
        Ok(result)
    }
}

#[async_trait]
impl<C: ZoneClient> RecordSetter for ConsoleDnsProvider<C> {
    async fn set_records(
        &self,
        zone: &str,
        records: Vec<DNSRecord>,
    ) -> Result<Vec<DNSRecord>, Error> {
        let zone = normalize_zone(zone);
        let mut result = Vec::with_capacity(records.len());
        for record in &records {
            debug!("setting {} record {}", record.record_type, record.name);
            let set = match record.kind()? {
                DNSRecordType::A => self.set_one::<RecordA>(zone, record).await,
                DNSRecordType::AAAA => self.set_one::<RecordAAAA>(zone, record).await,
                DNSRecordType::TXT => self.set_one::<RecordTXT>(zone, record).await,
            };
            result.push(set.map_err(map_error)?);
        }
        Ok(result)
    }
}

#[async_trait]
impl<C: ZoneClient> RecordDeleter for ConsoleDnsProvider<C> {
    async fn delete_records(
        &self,
        zone: &str,
        records: Vec<DNSRecord>,
    ) -> Result<Vec<DNSRecord>, Error> {
        let zone = normalize_zone(zone);
        let mut result = Vec::with_capacity(records.len());
        for record in records {
            debug!("deleting {} record {}", record.record_type, record.name);
            let deleted = match record.kind()? {
                DNSRecordType::A => self.delete_one::<RecordA>(zone, &record).await,
                DNSRecordType::AAAA => self.delete_one::<RecordAAAA>(zone, &record).await,
                DNSRecordType::TXT => self.delete_one::<RecordTXT>(zone, &record).await,
            };
            deleted.map_err(map_error)?;
            result.push(record);
        }
        Ok(result)
    }
}

// Interface guard
const _: fn() = || {
    fn assert_provider<T: crate::core::provider::DNSProvider>() {}
    assert_provider::<ConsoleDnsProvider<ConsoleDnsClient>>();
};
