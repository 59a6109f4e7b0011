use std::fmt;

use serde::{Deserialize, Serialize};

use crate::port::CustomPort;
use crate::utils::lenient::{deserialize_text, deserialize_uint};

// ============ Credentials ============

/// API credentials attached to every request.
///
/// Either a main account (`auth-id`) or a sub-user (`sub-auth-id`) is used,
/// always together with the password. Values are sent verbatim.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Apiaccess {
    /// Main account API user id.
    #[serde(rename = "auth-id", default, skip_serializing_if = "Option::is_none")]
    pub auth_id: Option<u64>,
    /// Sub-user id, used instead of `auth_id` for delegated access.
    #[serde(
        rename = "sub-auth-id",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub sub_auth_id: Option<u64>,
    /// API user password.
    #[serde(rename = "auth-password")]
    pub auth_password: String,
}

impl Apiaccess {
    /// Credentials for a main API user.
    pub fn new(auth_id: u64, auth_password: impl Into<String>) -> Self {
        Self {
            auth_id: Some(auth_id),
            sub_auth_id: None,
            auth_password: auth_password.into(),
        }
    }

    /// Credentials for an API sub-user.
    pub fn sub_user(sub_auth_id: u64, auth_password: impl Into<String>) -> Self {
        Self {
            auth_id: None,
            sub_auth_id: Some(sub_auth_id),
            auth_password: auth_password.into(),
        }
    }
}

impl fmt::Debug for Apiaccess {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Apiaccess")
            .field("auth_id", &self.auth_id)
            .field("sub_auth_id", &self.sub_auth_id)
            .field("auth_password", &"***")
            .finish()
    }
}

// ============ Zone Types ============

/// Zone kind as understood by the provider.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZoneType {
    /// Primary zone hosted by the provider; carries nameservers.
    #[default]
    Master,
    /// Secondary zone transferred from `master_ip`.
    Slave,
    /// Parked domain.
    Parked,
    /// GeoDNS-enabled primary zone.
    Geodns,
    /// Any type this crate does not know about.
    #[serde(other)]
    Unknown,
}

impl ZoneType {
    /// Wire representation.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Master => "master",
            Self::Slave => "slave",
            Self::Parked => "parked",
            Self::Geodns => "geodns",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for ZoneType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A DNS zone, identified by its domain name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Zone {
    /// Domain name (e.g., `"example.com"`).
    pub domain: String,
    /// Zone kind.
    pub zone_type: ZoneType,
    /// Nameservers for master zones.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ns: Vec<String>,
    /// Primary server address for slave zones.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub master_ip: Option<String>,
}

impl Zone {
    /// A master zone with no explicit nameservers.
    pub fn master(domain: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            zone_type: ZoneType::Master,
            ns: Vec::new(),
            master_ip: None,
        }
    }

    /// A slave zone transferred from `master_ip`.
    pub fn slave(domain: impl Into<String>, master_ip: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            zone_type: ZoneType::Slave,
            ns: Vec::new(),
            master_ip: Some(master_ip.into()),
        }
    }
}

/// Zone listing parameters.
///
/// # Default
///
/// The default is `page = 1, rows_per_page = 100`, with no search or group filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneQuery {
    /// Page number (1-indexed).
    pub page: u32,
    /// Rows per page. The API accepts 10, 20, 30, 50 or 100.
    pub rows_per_page: u32,
    /// Optional substring filter on the domain name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    /// Optional zone group filter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_id: Option<u64>,
}

/// Page sizes the zone listing endpoint accepts.
pub const ZONE_PAGE_SIZES: [u32; 5] = [10, 20, 30, 50, 100];

impl Default for ZoneQuery {
    fn default() -> Self {
        Self {
            page: 1,
            rows_per_page: 100,
            search: None,
            group_id: None,
        }
    }
}

impl ZoneQuery {
    /// Clamp to values the API accepts.
    ///
    /// - `page` is clamped to `>= 1`
    /// - `rows_per_page` is rounded up to the next allowed size, capped at 100
    #[must_use]
    pub fn validated(&self) -> Self {
        let rows = ZONE_PAGE_SIZES
            .iter()
            .copied()
            .find(|size| *size >= self.rows_per_page)
            .unwrap_or(100);
        Self {
            page: self.page.max(1),
            rows_per_page: rows,
            search: self.search.clone(),
            group_id: self.group_id,
        }
    }
}

/// A nameserver available to the account.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Nameserver {
    #[serde(default, deserialize_with = "deserialize_text")]
    pub id: String,
    /// Nameserver kind (`"premium"`, `"free"`, ...).
    #[serde(rename = "type", default, deserialize_with = "deserialize_text")]
    pub ns_type: String,
    /// Hostname.
    #[serde(default, deserialize_with = "deserialize_text")]
    pub name: String,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub ip4: String,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub ip6: String,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub location: String,
    /// ISO country code of `location`.
    #[serde(default, deserialize_with = "deserialize_text")]
    pub location_cc: String,
    /// `1` when the server sits behind DDoS protection.
    #[serde(default, deserialize_with = "deserialize_uint")]
    pub ddos_protected: u32,
}

// ============ DNS Record Types ============

/// DNS record type tag.
///
/// Serialized as the uppercase wire tag (`"A"`, `"AAAA"`, `"WR"`, ...).
/// Unknown tags are kept verbatim in [`Other`](Self::Other).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum RecordType {
    #[default]
    A,
    Aaaa,
    Cname,
    Txt,
    Ns,
    Ptr,
    Spf,
    Alias,
    OpenPgpKey,
    /// Mail exchange; uses `priority`.
    Mx,
    /// Web redirect; uses the frame/redirect attributes.
    Wr,
    /// Service locator; uses `priority`, `weight` and `port`.
    Srv,
    /// Responsible person; uses `mail` and `txt`.
    Rp,
    Sshfp,
    Naptr,
    Caa,
    Tlsa,
    Ds,
    Cert,
    Hinfo,
    Loc,
    Smimea,
    /// A tag this crate has no dedicated variant for.
    Other(String),
}

impl RecordType {
    /// Uppercase wire tag.
    pub fn as_str(&self) -> &str {
        match self {
            Self::A => "A",
            Self::Aaaa => "AAAA",
            Self::Cname => "CNAME",
            Self::Txt => "TXT",
            Self::Ns => "NS",
            Self::Ptr => "PTR",
            Self::Spf => "SPF",
            Self::Alias => "ALIAS",
            Self::OpenPgpKey => "OPENPGPKEY",
            Self::Mx => "MX",
            Self::Wr => "WR",
            Self::Srv => "SRV",
            Self::Rp => "RP",
            Self::Sshfp => "SSHFP",
            Self::Naptr => "NAPTR",
            Self::Caa => "CAA",
            Self::Tlsa => "TLSA",
            Self::Ds => "DS",
            Self::Cert => "CERT",
            Self::Hinfo => "HINFO",
            Self::Loc => "LOC",
            Self::Smimea => "SMIMEA",
            Self::Other(tag) => tag,
        }
    }
}

impl From<&str> for RecordType {
    fn from(tag: &str) -> Self {
        match tag.trim().to_uppercase().as_str() {
            "A" => Self::A,
            "AAAA" => Self::Aaaa,
            "CNAME" => Self::Cname,
            "TXT" => Self::Txt,
            "NS" => Self::Ns,
            "PTR" => Self::Ptr,
            "SPF" => Self::Spf,
            "ALIAS" => Self::Alias,
            "OPENPGPKEY" => Self::OpenPgpKey,
            "MX" => Self::Mx,
            "WR" => Self::Wr,
            "SRV" => Self::Srv,
            "RP" => Self::Rp,
            "SSHFP" => Self::Sshfp,
            "NAPTR" => Self::Naptr,
            "CAA" => Self::Caa,
            "TLSA" => Self::Tlsa,
            "DS" => Self::Ds,
            "CERT" => Self::Cert,
            "HINFO" => Self::Hinfo,
            "LOC" => Self::Loc,
            "SMIMEA" => Self::Smimea,
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<String> for RecordType {
    fn from(tag: String) -> Self {
        Self::from(tag.as_str())
    }
}

impl From<RecordType> for String {
    fn from(record_type: RecordType) -> Self {
        record_type.as_str().to_string()
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A DNS record.
///
/// Besides the universal fields, a record carries every extended attribute
/// the provider knows about. Only the attributes registered for
/// `record_type` are sent or read back; see
/// [`RecordField::for_type`](crate::RecordField::for_type).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Record {
    /// Provider-assigned id; empty until the record is created.
    pub id: String,
    /// Zone the record belongs to.
    pub domain: String,
    /// Host label (`""` for the apex).
    pub host: String,
    pub record_type: RecordType,
    /// Time to live in seconds.
    pub ttl: u32,
    /// Primary value: address, target, text, ...
    pub value: String,

    // MX / SRV
    pub priority: u32,
    pub weight: u32,
    pub port: u32,

    // WR (web redirect)
    pub frame: String,
    pub frame_title: String,
    pub frame_keywords: String,
    pub frame_description: String,
    pub mobile_meta: u32,
    pub save_path: u32,
    /// 301 or 302.
    pub redirect_type: u32,

    // RP
    pub mail: String,
    pub txt: String,

    // SSHFP / DS
    pub algorithm: u32,
    /// SSHFP fingerprint type.
    pub fptype: u32,

    // GeoDNS, any type
    pub geodns_location: String,
    pub geodns_code: String,

    // CAA
    pub caa_flag: String,
    pub caa_type: String,
    pub caa_value: String,

    // TLSA
    pub tlsa_usage: String,
    pub tlsa_selector: String,
    pub tlsa_matching_type: String,

    // SMIMEA
    pub smimea_usage: String,
    pub smimea_selector: String,
    pub smimea_matching_type: String,

    // DS
    pub key_tag: u32,
    pub digest_type: u32,

    // NAPTR
    pub order: String,
    pub pref: String,
    pub flag: String,
    pub params: String,
    pub regexp: String,
    pub replace: String,

    // CERT
    pub cert_type: u32,
    pub cert_key_tag: u32,
    pub cert_algorithm: u32,

    // LOC
    pub lat_deg: f64,
    pub lat_min: f64,
    pub lat_sec: f64,
    pub lat_dir: String,
    pub long_deg: f64,
    pub long_min: f64,
    pub long_sec: f64,
    pub long_dir: String,
    pub altitude: String,
    pub size: String,
    pub h_precision: String,
    pub v_precision: String,

    // HINFO
    pub cpu: String,
    pub os: String,
}

impl Record {
    /// A record with the universal fields set and every extended attribute empty.
    pub fn new(
        domain: impl Into<String>,
        host: impl Into<String>,
        record_type: RecordType,
        value: impl Into<String>,
        ttl: u32,
    ) -> Self {
        Self {
            domain: domain.into(),
            host: host.into(),
            record_type,
            value: value.into(),
            ttl,
            ..Self::default()
        }
    }
}

// ============ Failover Types ============

/// Health-check parameters of a failover configuration.
///
/// All values are kept as the provider's own strings; `port` is the one field
/// the provider sends in two shapes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckSettings {
    /// Maximum acceptable latency before the check counts as failed.
    pub latency_limit: String,
    pub timeout: String,
    /// `GET`, `POST`, `HEAD` for HTTP checks.
    pub http_request_type: String,
    pub host: String,
    pub port: CustomPort,
    pub path: String,
    /// Content an HTTP check must find in the response.
    pub content: String,
    /// Expected answer for DNS checks.
    pub query_response: String,
    /// Record type queried by DNS checks.
    pub query_type: String,
}

/// Failover configuration bound to an existing record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Failover {
    /// Zone of the monitored record.
    pub domain: String,
    /// Id of the monitored record.
    pub record_id: String,
    /// Provider check type code (ping, TCP, HTTP, DNS, ...).
    pub check_type: String,
    pub check_settings: CheckSettings,
    pub monitoring_region: String,
    pub check_period: String,
    pub check_region: String,
    /// Handler invoked when the main IP goes down.
    pub down_event_handler: String,
    /// Handler invoked when the main IP comes back.
    pub up_event_handler: String,
    pub main_ip: String,
    /// Ordered replacement addresses, at most [`MAX_BACKUP_IPS`].
    pub backup_ips: Vec<String>,
    pub notification_mail: String,
}

/// Number of backup addresses a failover can carry.
pub const MAX_BACKUP_IPS: usize = 5;
