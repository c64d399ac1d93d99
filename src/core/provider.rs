use crate::core::record::DNSRecord;
use crate::error::Error;
use async_trait::async_trait;

#[async_trait]
pub trait RecordGetter: Send + Sync {
    /// Lists all the records in the zone.
    async fn get_records(&self, zone: &str) -> Result<Vec<DNSRecord>, Error>;
}

#[async_trait]
pub trait RecordAppender: Send + Sync {
    /// Adds records to the zone and returns the records that were added.
    async fn append_records(
        &self,
        zone: &str,
        records: Vec<DNSRecord>,
    ) -> Result<Vec<DNSRecord>, Error>;
}

#[async_trait]
pub trait RecordSetter: Send + Sync {
    /// Updates existing records or creates new ones, returning the records as
    /// they now stand.
    async fn set_records(
        &self,
        zone: &str,
        records: Vec<DNSRecord>,
    ) -> Result<Vec<DNSRecord>, Error>;
}

#[async_trait]
pub trait RecordDeleter: Send + Sync {
    /// Deletes records from the zone and returns the records that were deleted.
    async fn delete_records(
        &self,
        zone: &str,
        records: Vec<DNSRecord>,
    ) -> Result<Vec<DNSRecord>, Error>;
}

pub trait DNSProvider: RecordGetter + RecordAppender + RecordSetter + RecordDeleter {}

impl<T> DNSProvider for T where T: RecordGetter + RecordAppender + RecordSetter + RecordDeleter {}
