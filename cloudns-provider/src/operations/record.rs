use serde::Serialize;
use serde_json::{Map, Value};

use crate::client::{ClouDnsClient, parse_json};
use crate::endpoint::Endpoint;
use crate::error::{ProviderError, Result};
use crate::projection::{outbound_fields, reconstruct};
use crate::types::{Apiaccess, Record};
use crate::utils::lenient;

#[derive(Serialize)]
struct RecordFilter<'a> {
    #[serde(rename = "domain-name")]
    domain: &'a str,
    /// `None` lists every host; `Some("")` selects the apex.
    #[serde(skip_serializing_if = "Option::is_none")]
    host: Option<&'a str>,
    #[serde(rename = "type", skip_serializing_if = "str::is_empty")]
    record_type: &'a str,
}

#[derive(Serialize)]
struct DeleteRecord<'a> {
    #[serde(rename = "domain-name")]
    domain: &'a str,
    #[serde(rename = "record-id")]
    record_id: u64,
}

/// Numeric form of a record id, as the modify and delete calls expect it.
fn numeric_id(endpoint: Endpoint, id: &str) -> Result<u64> {
    id.trim()
        .parse()
        .map_err(|_| ProviderError::decode(endpoint.path(), format!("record id '{id}' is not numeric")))
}

/// Decode a record listing: an object keyed by record id.
///
/// The provider answers `[]` instead of `{}` when nothing matches. Entries
/// that are not objects are skipped.
fn decode_listing(endpoint: Endpoint, domain: &str, body: &str) -> Result<Vec<Record>> {
    let listing: Value = parse_json(endpoint, body)?;
    match listing {
        Value::Object(entries) => Ok(entries
            .iter()
            .filter_map(|(key, entry)| entry.as_object().map(|raw| reconstruct(domain, key, raw)))
            .collect()),
        Value::Array(items) if items.is_empty() => Ok(Vec::new()),
        other => Err(ProviderError::decode(
            endpoint.path(),
            format!("expected a record map, got {}", json_kind(&other)),
        )),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

impl ClouDnsClient {
    /// Create a record and return it with the provider-assigned id.
    ///
    /// Only the attributes registered for the record's type are sent. When
    /// the acknowledgement carries no id the returned record's id is empty.
    pub async fn create_record(&self, auth: &Apiaccess, record: &Record) -> Result<Record> {
        let mut params = outbound_fields(record);
        params.insert(
            "record-type".to_string(),
            Value::from(record.record_type.as_str()),
        );

        let body = self.call(Endpoint::AddRecord, auth, &params).await?;
        let id = serde_json::from_str::<Value>(&body)
            .ok()
            .map(|ack| lenient::text(ack.pointer("/data/id")))
            .unwrap_or_default();
        if id.is_empty() {
            log::warn!(
                "[ClouDNS] add-record for {} in {} returned no id",
                record.host,
                record.domain
            );
        }

        Ok(Record {
            id,
            ..record.clone()
        })
    }

    /// Look a record up by domain, host and type.
    ///
    /// Entries for other hosts are dropped. Among the matches, the one whose
    /// id equals `record.id` wins; otherwise the first match is returned.
    /// `None` when nothing matches.
    pub async fn read_record(&self, auth: &Apiaccess, record: &Record) -> Result<Option<Record>> {
        let filter = RecordFilter {
            domain: &record.domain,
            host: Some(&record.host),
            record_type: record.record_type.as_str(),
        };
        let body = self.call(Endpoint::ListRecords, auth, &filter).await?;
        let mut matches = decode_listing(Endpoint::ListRecords, &record.domain, &body)?;
        matches.retain(|candidate| candidate.host == record.host);

        let preferred = matches
            .iter()
            .position(|candidate| !record.id.is_empty() && candidate.id == record.id)
            .unwrap_or(0);
        Ok((!matches.is_empty()).then(|| matches.swap_remove(preferred)))
    }

    /// Every record in `domain`.
    pub async fn list_records(&self, auth: &Apiaccess, domain: &str) -> Result<Vec<Record>> {
        let filter = RecordFilter {
            domain,
            host: None,
            record_type: "",
        };
        let body = self.call(Endpoint::ListRecords, auth, &filter).await?;
        decode_listing(Endpoint::ListRecords, domain, &body)
    }

    /// Replace a record's value, TTL and type-specific attributes.
    pub async fn update_record(&self, auth: &Apiaccess, record: &Record) -> Result<Record> {
        let record_id = numeric_id(Endpoint::ModifyRecord, &record.id)?;
        let mut params: Map<String, Value> = outbound_fields(record);
        params.insert("record-id".to_string(), Value::from(record_id));

        self.call(Endpoint::ModifyRecord, auth, &params).await?;
        Ok(record.clone())
    }

    /// Delete a record by id.
    pub async fn destroy_record(&self, auth: &Apiaccess, record: &Record) -> Result<()> {
        let record_id = numeric_id(Endpoint::DeleteRecord, &record.id)?;
        self.call(
            Endpoint::DeleteRecord,
            auth,
            &DeleteRecord {
                domain: &record.domain,
                record_id,
            },
        )
        .await?;
        Ok(())
    }
}
