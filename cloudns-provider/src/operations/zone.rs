use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::client::{ClouDnsClient, parse_json};
use crate::endpoint::Endpoint;
use crate::error::{ProviderError, Result};
use crate::types::{Apiaccess, Zone, ZoneQuery, ZoneType};
use crate::utils::lenient::deserialize_text;

/// Page size used when looking a zone up by name.
const LOOKUP_ROWS_PER_PAGE: u32 = 100;

#[derive(Serialize)]
struct RegisterZone<'a> {
    #[serde(rename = "domain-name")]
    domain: &'a str,
    #[serde(rename = "zone-type")]
    zone_type: ZoneType,
    #[serde(skip_serializing_if = "<[String]>::is_empty")]
    ns: &'a [String],
    #[serde(rename = "master-ip", skip_serializing_if = "Option::is_none")]
    master_ip: Option<&'a str>,
}

#[derive(Serialize)]
struct ListZones<'a> {
    page: u32,
    #[serde(rename = "rows-per-page")]
    rows_per_page: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    search: Option<&'a str>,
    #[serde(rename = "group-id", skip_serializing_if = "Option::is_none")]
    group_id: Option<u64>,
}

impl<'a> From<&'a ZoneQuery> for ListZones<'a> {
    fn from(query: &'a ZoneQuery) -> Self {
        Self {
            page: query.page,
            rows_per_page: query.rows_per_page,
            search: query.search.as_deref(),
            group_id: query.group_id,
        }
    }
}

#[derive(Serialize)]
struct DomainOnly<'a> {
    #[serde(rename = "domain-name")]
    domain: &'a str,
}

/// One entry of the zone listing.
#[derive(Deserialize)]
struct ZoneEntry {
    #[serde(default, deserialize_with = "deserialize_text")]
    name: String,
    #[serde(rename = "type", default)]
    zone_type: Option<ZoneType>,
    #[serde(rename = "master-ip", default, deserialize_with = "deserialize_text")]
    master_ip: String,
    #[serde(default)]
    ns: Option<Value>,
}

impl From<ZoneEntry> for Zone {
    fn from(entry: ZoneEntry) -> Self {
        let ns = match entry.ns {
            Some(Value::String(s)) if !s.is_empty() => vec![s],
            Some(Value::Array(items)) => items
                .into_iter()
                .filter_map(|v| v.as_str().map(str::to_string))
                .filter(|s| !s.is_empty())
                .collect(),
            _ => Vec::new(),
        };
        Self {
            domain: entry.name,
            zone_type: entry.zone_type.unwrap_or_default(),
            ns,
            master_ip: (!entry.master_ip.is_empty()).then_some(entry.master_ip),
        }
    }
}

impl ClouDnsClient {
    /// Register a zone. Slave zones carry their master IP, every other type
    /// its nameservers. Returns the zone as given.
    pub async fn create_zone(&self, auth: &Apiaccess, zone: &Zone) -> Result<Zone> {
        if zone.zone_type == ZoneType::Unknown {
            return Err(ProviderError::InvalidParameter {
                param: "zone-type".to_string(),
                detail: format!("cannot register {} with an unrecognised zone type", zone.domain),
            });
        }

        let params = RegisterZone {
            domain: &zone.domain,
            zone_type: zone.zone_type,
            ns: if zone.zone_type == ZoneType::Slave {
                &[]
            } else {
                zone.ns.as_slice()
            },
            master_ip: match zone.zone_type {
                ZoneType::Slave => zone.master_ip.as_deref(),
                _ => None,
            },
        };
        self.call(Endpoint::RegisterZone, auth, &params).await?;
        log::info!("[ClouDNS] Zone {} registered", zone.domain);
        Ok(zone.clone())
    }

    /// Find the zone named exactly `domain`.
    pub async fn read_zone(&self, auth: &Apiaccess, domain: &str) -> Result<Zone> {
        let query = ZoneQuery {
            page: 1,
            rows_per_page: LOOKUP_ROWS_PER_PAGE,
            search: Some(domain.to_string()),
            group_id: None,
        };
        let body = self
            .call(Endpoint::ListZones, auth, &ListZones::from(&query))
            .await?;
        let entries: Vec<ZoneEntry> = parse_json(Endpoint::ListZones, &body)?;

        entries
            .into_iter()
            .find(|entry| entry.name == domain)
            .map(Zone::from)
            .ok_or_else(|| ProviderError::NotFound {
                entity: "zone".to_string(),
                key: domain.to_string(),
            })
    }

    /// One page of zones.
    pub async fn list_zones(&self, auth: &Apiaccess, query: &ZoneQuery) -> Result<Vec<Zone>> {
        let query = query.validated();
        let entries: Vec<ZoneEntry> = self
            .call_json(Endpoint::ListZones, auth, &ListZones::from(&query))
            .await?;
        Ok(entries.into_iter().map(Zone::from).collect())
    }

    /// Zone settings cannot be changed through the API; always fails without
    /// sending a request.
    #[allow(clippy::unused_async)]
    pub async fn update_zone(&self, _auth: &Apiaccess, zone: &Zone) -> Result<Zone> {
        Err(ProviderError::Unsupported {
            operation: "zone update".to_string(),
            detail: format!("the API has no call that modifies zone '{}'", zone.domain),
        })
    }

    /// Push the current zone contents to all nameservers.
    pub async fn trigger_zone_update(&self, auth: &Apiaccess, domain: &str) -> Result<()> {
        self.call(Endpoint::UpdateZone, auth, &DomainOnly { domain })
            .await?;
        Ok(())
    }

    /// Delete the zone and every record in it.
    pub async fn destroy_zone(&self, auth: &Apiaccess, domain: &str) -> Result<()> {
        self.call(Endpoint::DeleteZone, auth, &DomainOnly { domain })
            .await?;
        log::info!("[ClouDNS] Zone {domain} deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{MockTransport, test_auth};
    use serde_json::json;

    const THREE_ZONES: &str = r#"[
        {"name":"a.com","type":"master","zone":"domain","status":"1"},
        {"name":"b.com","type":"master","zone":"domain","status":"1","ns":"ns1.example.net"},
        {"name":"c.com","type":"slave","zone":"domain","status":"1","master-ip":"192.0.2.53"}
    ]"#;

    #[tokio::test]
    async fn read_zone_picks_exact_match() {
        let mock = MockTransport::new();
        mock.respond(THREE_ZONES);
        let zone = mock.client().read_zone(&test_auth(), "b.com").await.unwrap();
        assert_eq!(zone.domain, "b.com");
        assert_eq!(zone.zone_type, ZoneType::Master);
        assert_eq!(zone.ns, vec!["ns1.example.net".to_string()]);

        let body = mock.single_body();
        assert_eq!(body["search"], json!("b.com"));
        assert_eq!(body["page"], json!(1));
        assert_eq!(body["rows-per-page"], json!(100));
    }

    #[tokio::test]
    async fn read_zone_keeps_master_ip_of_slave() {
        let mock = MockTransport::new();
        mock.respond(THREE_ZONES);
        let zone = mock.client().read_zone(&test_auth(), "c.com").await.unwrap();
        assert_eq!(zone.zone_type, ZoneType::Slave);
        assert_eq!(zone.master_ip.as_deref(), Some("192.0.2.53"));
    }

    #[tokio::test]
    async fn read_zone_not_found() {
        let mock = MockTransport::new();
        mock.respond(THREE_ZONES);
        let err = mock.client().read_zone(&test_auth(), "z.com").await.unwrap_err();
        assert_eq!(
            err,
            ProviderError::NotFound {
                entity: "zone".to_string(),
                key: "z.com".to_string()
            }
        );
    }

    #[tokio::test]
    async fn read_zone_substring_is_not_a_match() {
        let mock = MockTransport::new();
        mock.respond(r#"[{"name":"sub.b.com","type":"master"}]"#);
        let err = mock.client().read_zone(&test_auth(), "b.com").await.unwrap_err();
        assert!(matches!(err, ProviderError::NotFound { .. }));
    }

    #[tokio::test]
    async fn read_zone_empty_body() {
        let mock = MockTransport::new();
        mock.respond("");
        let err = mock.client().read_zone(&test_auth(), "a.com").await.unwrap_err();
        assert!(matches!(err, ProviderError::EmptyResponse { .. }));
    }

    #[tokio::test]
    async fn read_zone_unparsable_list() {
        let mock = MockTransport::new();
        mock.respond(r#"{"unexpected":true}"#);
        let err = mock.client().read_zone(&test_auth(), "a.com").await.unwrap_err();
        assert!(matches!(err, ProviderError::Decode { .. }));
    }

    #[tokio::test]
    async fn read_zone_failure_envelope() {
        let mock = MockTransport::new();
        mock.respond(r#"{"status":"Failed","statusDescription":"Invalid login"}"#);
        let err = mock.client().read_zone(&test_auth(), "a.com").await.unwrap_err();
        assert_eq!(err.to_string(), "[/dns/list-zones.json] Invalid login");
    }

    #[tokio::test]
    async fn update_zone_sends_nothing() {
        let mock = MockTransport::new();
        let err = mock
            .client()
            .update_zone(&test_auth(), &Zone::master("a.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, ProviderError::Unsupported { .. }));
        assert!(mock.requests().is_empty());
    }

    #[tokio::test]
    async fn create_master_zone_sends_ns() {
        let mock = MockTransport::new();
        mock.respond(r#"{"status":"Success","statusDescription":"Domain zone example.com was created successfully."}"#);
        let zone = Zone {
            ns: vec!["ns1.example.net".into(), "ns2.example.net".into()],
            master_ip: Some("192.0.2.1".into()),
            ..Zone::master("example.com")
        };
        let created = mock.client().create_zone(&test_auth(), &zone).await.unwrap();
        assert_eq!(created, zone);

        let body = mock.single_body();
        assert_eq!(body["domain-name"], json!("example.com"));
        assert_eq!(body["zone-type"], json!("master"));
        assert_eq!(body["ns"], json!(["ns1.example.net", "ns2.example.net"]));
        assert!(body.get("master-ip").is_none());
    }

    #[tokio::test]
    async fn create_slave_zone_sends_master_ip() {
        let mock = MockTransport::new();
        mock.respond(r#"{"status":"Success"}"#);
        mock.client()
            .create_zone(&test_auth(), &Zone::slave("example.com", "192.0.2.1"))
            .await
            .unwrap();

        let body = mock.single_body();
        assert_eq!(body["zone-type"], json!("slave"));
        assert_eq!(body["master-ip"], json!("192.0.2.1"));
        assert!(body.get("ns").is_none());
    }

    #[tokio::test]
    async fn create_geodns_zone_sends_ns() {
        let mock = MockTransport::new();
        mock.respond(r#"{"status":"Success"}"#);
        let zone = Zone {
            zone_type: ZoneType::Geodns,
            ns: vec!["ns1.example.net".into()],
            ..Zone::master("example.com")
        };
        mock.client().create_zone(&test_auth(), &zone).await.unwrap();

        let body = mock.single_body();
        assert_eq!(body["zone-type"], json!("geodns"));
        assert_eq!(body["ns"], json!(["ns1.example.net"]));
    }

    #[tokio::test]
    async fn create_unknown_zone_type_is_rejected() {
        let mock = MockTransport::new();
        let zone = Zone {
            zone_type: ZoneType::Unknown,
            ..Zone::master("example.com")
        };
        let err = mock.client().create_zone(&test_auth(), &zone).await.unwrap_err();
        assert!(matches!(err, ProviderError::InvalidParameter { ref param, .. } if param == "zone-type"));
        assert!(mock.requests().is_empty());
    }

    #[tokio::test]
    async fn list_zones_validates_query() {
        let mock = MockTransport::new();
        mock.respond(THREE_ZONES);
        let query = ZoneQuery {
            page: 0,
            rows_per_page: 15,
            search: None,
            group_id: Some(9),
        };
        let zones = mock.client().list_zones(&test_auth(), &query).await.unwrap();
        assert_eq!(zones.len(), 3);

        let body = mock.single_body();
        assert_eq!(body["page"], json!(1));
        assert_eq!(body["rows-per-page"], json!(20));
        assert_eq!(body["group-id"], json!(9));
        assert!(body.get("search").is_none());
    }

    #[tokio::test]
    async fn destroy_and_trigger_send_domain_only() {
        let mock = MockTransport::new();
        mock.respond(r#"{"status":"Success"}"#);
        mock.respond(r#"{"status":"Success"}"#);
        let client = mock.client();
        client.trigger_zone_update(&test_auth(), "a.com").await.unwrap();
        client.destroy_zone(&test_auth(), "a.com").await.unwrap();

        let requests = mock.requests();
        assert!(requests[0].0.ends_with("/dns/update-zone.json"));
        assert!(requests[1].0.ends_with("/dns/delete.json"));
        for (_, body) in requests {
            assert_eq!(
                body,
                json!({"auth-id": 1, "auth-password": "secret", "domain-name": "a.com"})
            );
        }
    }
}
