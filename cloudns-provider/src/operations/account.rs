use serde::Serialize;
use serde_json::Value;

use crate::client::{ClouDnsClient, no_params};
use crate::endpoint::Endpoint;
use crate::error::Result;
use crate::types::{Apiaccess, Nameserver, RecordType};
use crate::utils::lenient;

#[derive(Serialize)]
struct NameserverQuery {
    #[serde(rename = "detailed-info")]
    detailed_info: u8,
}

#[derive(Serialize)]
struct RecordTypeQuery<'a> {
    #[serde(rename = "zone-type")]
    zone_type: &'a str,
    #[serde(rename = "master-ip", skip_serializing_if = "Option::is_none")]
    master_ip: Option<&'a str>,
}

impl ClouDnsClient {
    /// Verify credentials. Succeeds when the provider accepts the login.
    pub async fn login_check(&self, auth: &Apiaccess) -> Result<()> {
        self.call(Endpoint::Login, auth, &no_params()).await?;
        Ok(())
    }

    /// TTL values (seconds) the account may use. Entries that are not
    /// positive integers are skipped.
    pub async fn available_ttls(&self, auth: &Apiaccess) -> Result<Vec<u32>> {
        let raw: Vec<Value> = self
            .call_json(Endpoint::AvailableTtl, auth, &no_params())
            .await?;
        Ok(raw
            .iter()
            .map(|v| lenient::uint(Some(v)))
            .filter(|ttl| *ttl > 0)
            .collect())
    }

    /// Nameservers available to the account, with location details.
    pub async fn list_nameservers(&self, auth: &Apiaccess) -> Result<Vec<Nameserver>> {
        self.call_json(
            Endpoint::AvailableNameServers,
            auth,
            &NameserverQuery { detailed_info: 1 },
        )
        .await
    }

    /// Record types that can be created in a zone of `zone_type`
    /// (`"domain"`, `"reverse"` or `"parked"`).
    pub async fn available_record_types(
        &self,
        auth: &Apiaccess,
        zone_type: &str,
        master_ip: Option<&str>,
    ) -> Result<Vec<RecordType>> {
        self.call_json(
            Endpoint::AvailableRecordTypes,
            auth,
            &RecordTypeQuery {
                zone_type,
                master_ip,
            },
        )
        .await
    }
}
