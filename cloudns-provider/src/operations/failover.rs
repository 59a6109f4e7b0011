use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::client::{ClouDnsClient, parse_json};
use crate::endpoint::Endpoint;
use crate::error::{ProviderError, Result};
use crate::port::CustomPort;
use crate::types::{Apiaccess, CheckSettings, Failover, MAX_BACKUP_IPS};
use crate::utils::lenient::deserialize_text;

/// Flat request shape shared by all failover calls.
#[derive(Serialize)]
struct FailoverParams<'a> {
    #[serde(rename = "domain-name")]
    domain: &'a str,
    #[serde(rename = "record-id")]
    record_id: &'a str,
    check_type: &'a str,
    down_event_handler: &'a str,
    up_event_handler: &'a str,
    main_ip: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    backup_ip_1: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    backup_ip_2: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    backup_ip_3: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    backup_ip_4: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    backup_ip_5: Option<&'a str>,
    #[serde(skip_serializing_if = "str::is_empty")]
    monitoring_region: &'a str,
    #[serde(skip_serializing_if = "str::is_empty")]
    host: &'a str,
    #[serde(skip_serializing_if = "CustomPort::is_unset")]
    port: CustomPort,
    #[serde(skip_serializing_if = "str::is_empty")]
    path: &'a str,
    #[serde(skip_serializing_if = "str::is_empty")]
    content: &'a str,
    #[serde(skip_serializing_if = "str::is_empty")]
    query_type: &'a str,
    #[serde(skip_serializing_if = "str::is_empty")]
    query_response: &'a str,
    #[serde(skip_serializing_if = "str::is_empty")]
    check_period: &'a str,
    #[serde(skip_serializing_if = "str::is_empty")]
    notification_mail: &'a str,
    #[serde(skip_serializing_if = "str::is_empty")]
    latency_limit: &'a str,
    #[serde(skip_serializing_if = "str::is_empty")]
    timeout: &'a str,
    #[serde(rename = "checkregion", skip_serializing_if = "str::is_empty")]
    check_region: &'a str,
    #[serde(skip_serializing_if = "str::is_empty")]
    http_request_type: &'a str,
}

impl<'a> FailoverParams<'a> {
    fn new(failover: &'a Failover) -> Result<Self> {
        if failover.backup_ips.len() > MAX_BACKUP_IPS {
            return Err(ProviderError::InvalidParameter {
                param: "backup_ips".to_string(),
                detail: format!(
                    "at most {MAX_BACKUP_IPS} backup IPs are allowed, got {}",
                    failover.backup_ips.len()
                ),
            });
        }
        let backup = move |index: usize| {
            failover
                .backup_ips
                .get(index)
                .map(String::as_str)
                .filter(|ip| !ip.is_empty())
        };
        let settings = &failover.check_settings;

        Ok(Self {
            domain: &failover.domain,
            record_id: &failover.record_id,
            check_type: &failover.check_type,
            down_event_handler: &failover.down_event_handler,
            up_event_handler: &failover.up_event_handler,
            main_ip: &failover.main_ip,
            backup_ip_1: backup(0),
            backup_ip_2: backup(1),
            backup_ip_3: backup(2),
            backup_ip_4: backup(3),
            backup_ip_5: backup(4),
            monitoring_region: &failover.monitoring_region,
            host: &settings.host,
            port: settings.port,
            path: &settings.path,
            content: &settings.content,
            query_type: &settings.query_type,
            query_response: &settings.query_response,
            check_period: &failover.check_period,
            notification_mail: &failover.notification_mail,
            latency_limit: &settings.latency_limit,
            timeout: &settings.timeout,
            check_region: &failover.check_region,
            http_request_type: &settings.http_request_type,
        })
    }
}

/// Check settings as the settings call returns them.
#[derive(Deserialize, Default)]
#[serde(default)]
struct CheckFields {
    #[serde(deserialize_with = "deserialize_text")]
    latency_limit: String,
    #[serde(deserialize_with = "deserialize_text")]
    timeout: String,
    #[serde(deserialize_with = "deserialize_text")]
    http_request_type: String,
    #[serde(deserialize_with = "deserialize_text")]
    host: String,
    port: Option<Value>,
    #[serde(deserialize_with = "deserialize_text")]
    path: String,
    #[serde(deserialize_with = "deserialize_text")]
    content: String,
    #[serde(deserialize_with = "deserialize_text")]
    query_response: String,
    #[serde(deserialize_with = "deserialize_text")]
    query_type: String,
}

/// Flat response of the failover settings call.
///
/// Check settings normally sit at top level; some accounts nest them under
/// `check_settings`, which is used for whatever the top level leaves empty.
#[derive(Deserialize, Default)]
#[serde(default)]
struct FailoverData {
    #[serde(deserialize_with = "deserialize_text")]
    check_type: String,
    #[serde(deserialize_with = "deserialize_text")]
    down_event_handler: String,
    #[serde(deserialize_with = "deserialize_text")]
    up_event_handler: String,
    #[serde(deserialize_with = "deserialize_text")]
    main_ip: String,
    #[serde(deserialize_with = "deserialize_text")]
    backup_ip_1: String,
    #[serde(deserialize_with = "deserialize_text")]
    backup_ip_2: String,
    #[serde(deserialize_with = "deserialize_text")]
    backup_ip_3: String,
    #[serde(deserialize_with = "deserialize_text")]
    backup_ip_4: String,
    #[serde(deserialize_with = "deserialize_text")]
    backup_ip_5: String,
    #[serde(deserialize_with = "deserialize_text")]
    monitoring_region: String,
    #[serde(deserialize_with = "deserialize_text")]
    check_period: String,
    #[serde(deserialize_with = "deserialize_text")]
    notification_mail: String,
    #[serde(rename = "checkregion", deserialize_with = "deserialize_text")]
    check_region: String,
    #[serde(flatten)]
    flat: CheckFields,
    check_settings: Option<CheckFields>,
}

fn either(primary: String, fallback: String) -> String {
    if primary.is_empty() { fallback } else { primary }
}

/// Decode a port that may be an integer, a numeric string, empty or absent.
fn decode_port(raw: Option<Value>) -> Result<CustomPort> {
    match raw {
        None | Some(Value::Null) => Ok(CustomPort::default()),
        Some(Value::String(s)) if s.is_empty() => Ok(CustomPort::default()),
        Some(value) => CustomPort::from_json(value.to_string().as_bytes())
            .map_err(|e| ProviderError::decode(Endpoint::FailoverSettings.path(), e)),
    }
}

impl FailoverData {
    fn into_failover(self, request: &Failover) -> Result<Failover> {
        let nested = self.check_settings.unwrap_or_default();
        let flat = self.flat;
        let port = match flat.port {
            Some(port) => decode_port(Some(port))?,
            None => decode_port(nested.port)?,
        };

        let check_settings = CheckSettings {
            latency_limit: either(flat.latency_limit, nested.latency_limit),
            timeout: either(flat.timeout, nested.timeout),
            http_request_type: either(flat.http_request_type, nested.http_request_type),
            host: either(flat.host, nested.host),
            port,
            path: either(flat.path, nested.path),
            content: either(flat.content, nested.content),
            query_response: either(flat.query_response, nested.query_response),
            query_type: either(flat.query_type, nested.query_type),
        };

        let backup_ips = [
            self.backup_ip_1,
            self.backup_ip_2,
            self.backup_ip_3,
            self.backup_ip_4,
            self.backup_ip_5,
        ]
        .into_iter()
        .filter(|ip| !ip.is_empty())
        .collect();

        Ok(Failover {
            domain: request.domain.clone(),
            record_id: request.record_id.clone(),
            check_type: self.check_type,
            check_settings,
            monitoring_region: self.monitoring_region,
            check_period: self.check_period,
            check_region: self.check_region,
            down_event_handler: self.down_event_handler,
            up_event_handler: self.up_event_handler,
            main_ip: self.main_ip,
            backup_ips,
            notification_mail: self.notification_mail,
        })
    }
}

impl ClouDnsClient {
    /// Enable failover monitoring for a record.
    pub async fn activate_failover(&self, auth: &Apiaccess, failover: &Failover) -> Result<Failover> {
        let params = FailoverParams::new(failover)?;
        self.call(Endpoint::FailoverActivate, auth, &params).await?;
        log::info!(
            "[ClouDNS] Failover activated for record {} in {}",
            failover.record_id,
            failover.domain
        );
        Ok(failover.clone())
    }

    /// Change the failover settings of a record.
    pub async fn modify_failover(&self, auth: &Apiaccess, failover: &Failover) -> Result<Failover> {
        let params = FailoverParams::new(failover)?;
        self.call(Endpoint::FailoverModify, auth, &params).await?;
        Ok(failover.clone())
    }

    /// Disable failover monitoring for a record.
    pub async fn deactivate_failover(&self, auth: &Apiaccess, failover: &Failover) -> Result<()> {
        let params = FailoverParams::new(failover)?;
        self.call(Endpoint::FailoverDeactivate, auth, &params).await?;
        log::info!(
            "[ClouDNS] Failover deactivated for record {} in {}",
            failover.record_id,
            failover.domain
        );
        Ok(())
    }

    /// Read back the failover settings of a record.
    ///
    /// Domain and record id are taken from `failover`; everything else comes
    /// from the provider. Fields the provider leaves out read as empty strings.
    pub async fn read_failover(&self, auth: &Apiaccess, failover: &Failover) -> Result<Failover> {
        let params = FailoverParams::new(failover)?;
        let body = self.call(Endpoint::FailoverSettings, auth, &params).await?;
        let data: FailoverData = parse_json(Endpoint::FailoverSettings, &body)?;
        data.into_failover(failover)
    }
}
