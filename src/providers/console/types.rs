use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::net::{Ipv4Addr, Ipv6Addr};

use crate::core::record::DNSRecordType;
use crate::providers::console::error::ConsoleDnsError;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct RecordA {
    pub ip: Ipv4Addr,
    pub ttl: u32,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct RecordAAAA {
    pub ip: Ipv6Addr,
    pub ttl: u32,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct RecordTXT {
    pub text: String,
    pub ttl: u32,
}

/// All records stored under one name.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordSet {
    #[serde(rename = "A", default)]
    pub a: Vec<RecordA>,
    #[serde(rename = "AAAA", default)]
    pub aaaa: Vec<RecordAAAA>,
    #[serde(rename = "TXT", default)]
    pub txt: Vec<RecordTXT>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct Zone {
    #[serde(default)]
    pub records: BTreeMap<String, RecordSet>,
}

/// Request body for record mutations.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum ProviderRecord {
    A(RecordA),
    AAAA(RecordAAAA),
    TXT(RecordTXT),
}

impl ProviderRecord {
    pub fn record_type(&self) -> DNSRecordType {
        match self {
            ProviderRecord::A(_) => DNSRecordType::A,
            ProviderRecord::AAAA(_) => DNSRecordType::AAAA,
            ProviderRecord::TXT(_) => DNSRecordType::TXT,
        }
    }
}

#[derive(Serialize)]
pub struct UpdateRecordRequest<'a> {
    pub old: &'a ProviderRecord,
    pub new: &'a ProviderRecord,
}

#[derive(Deserialize, Debug)]
pub struct ApiError {
    pub code: String,
    pub message: String,
}

/// A provider-native record kind that can be carried through a generic record.
pub trait ZoneRecord: Serialize + DeserializeOwned + Clone + Into<ProviderRecord> {
    const TYPE: DNSRecordType;

    /// Builds a record from its textual value and a TTL in seconds.
    fn new(value: &str, ttl: u64) -> Result<Self, ConsoleDnsError>;

    fn value(&self) -> String;

    fn ttl(&self) -> u32;
}

fn checked_ttl(ttl: u64) -> Result<u32, ConsoleDnsError> {
    u32::try_from(ttl).map_err(|_| ConsoleDnsError::InvalidInput(format!("ttl out of range: {ttl}")))
}

impl ZoneRecord for RecordA {
    const TYPE: DNSRecordType = DNSRecordType::A;

    fn new(value: &str, ttl: u64) -> Result<Self, ConsoleDnsError> {
        let ip = value
            .trim()
            .parse()
            .map_err(|_| ConsoleDnsError::InvalidInput(format!("invalid IPv4 address: {value}")))?;
        Ok(RecordA {
            ip,
            ttl: checked_ttl(ttl)?,
        })
    }

    fn value(&self) -> String {
        self.ip.to_string()
    }

    fn ttl(&self) -> u32 {
        self.ttl
    }
}

impl ZoneRecord for RecordAAAA {
    const TYPE: DNSRecordType = DNSRecordType::AAAA;

    fn new(value: &str, ttl: u64) -> Result<Self, ConsoleDnsError> {
        let ip = value
            .trim()
            .parse()
            .map_err(|_| ConsoleDnsError::InvalidInput(format!("invalid IPv6 address: {value}")))?;
        Ok(RecordAAAA {
            ip,
            ttl: checked_ttl(ttl)?,
        })
    }

    fn value(&self) -> String {
        self.ip.to_string()
    }

    fn ttl(&self) -> u32 {
        self.ttl
    }
}

impl ZoneRecord for RecordTXT {
    const TYPE: DNSRecordType = DNSRecordType::TXT;

    fn new(value: &str, ttl: u64) -> Result<Self, ConsoleDnsError> {
        Ok(RecordTXT {
            text: value.to_string(),
            ttl: checked_ttl(ttl)?,
        })
    }

    fn value(&self) -> String {
        self.text.clone()
    }

    fn ttl(&self) -> u32 {
        self.ttl
    }
}

impl From<RecordA> for ProviderRecord {
    fn from(r: RecordA) -> Self {
        ProviderRecord::A(r)
    }
}

impl From<RecordAAAA> for ProviderRecord {
    fn from(r: RecordAAAA) -> Self {
        ProviderRecord::AAAA(r)
    }
}

impl From<RecordTXT> for ProviderRecord {
    fn from(r: RecordTXT) -> Self {
        ProviderRecord::TXT(r)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_new_record_a() {
        let a = RecordA::new("192.0.2.10", 300).unwrap();
        assert_eq!(a.ip, Ipv4Addr::new(192, 0, 2, 10));
        assert_eq!(a.ttl, 300);
        assert_eq!(a.value(), "192.0.2.10");
    }

    #[test]
    fn test_new_record_a_rejects_ipv6() {
        assert_matches!(
            RecordA::new("2001:db8::1", 300),
            Err(ConsoleDnsError::InvalidInput(_))
        );
    }

    #[test]
    fn test_new_record_aaaa() {
        let aaaa = RecordAAAA::new("2001:DB8::1", 60).unwrap();
        assert_eq!(aaaa.value(), "2001:db8::1");
        assert_matches!(
            RecordAAAA::new("not-an-ip", 60),
            Err(ConsoleDnsError::InvalidInput(_))
        );
    }

    #[test]
    fn test_ttl_out_of_range() {
        assert_matches!(
            RecordTXT::new("hello", u64::from(u32::MAX) + 1),
            Err(ConsoleDnsError::InvalidInput(msg)) if msg.contains("ttl")
        );
    }

    #[test]
    fn test_zone_json() {
        let zone: Zone = serde_json::from_str(
            r#"{"records":{
                "www":{"A":[{"ip":"192.0.2.1","ttl":600}],"TXT":[{"text":"v=spf1 -all","ttl":60}]},
                "@":{"AAAA":[{"ip":"2001:db8::1","ttl":600}]}
            }}"#,
        )
        .unwrap();
        assert_eq!(zone.records.len(), 2);
        let www = &zone.records["www"];
        assert_eq!(www.a.len(), 1);
        assert!(www.aaaa.is_empty());
        assert_eq!(www.txt[0].text, "v=spf1 -all");
        assert_eq!(zone.records["@"].aaaa[0].ttl, 600);
    }

    #[test]
    fn test_provider_record_serializes_untagged() {
        let rec: ProviderRecord = RecordTXT::new("hello", 30).unwrap().into();
        assert_eq!(rec.record_type(), DNSRecordType::TXT);
        assert_eq!(
            serde_json::to_value(&rec).unwrap(),
            serde_json::json!({ "text": "hello", "ttl": 30 })
        );
    }
}
