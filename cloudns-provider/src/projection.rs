//! Record field projection.
//!
//! A [`Record`] carries every extended attribute the provider knows about,
//! but the provider treats the mere presence of an attribute as meaningful.
//! [`RecordField::for_type`] is the single table deciding which attributes
//! belong to which record type; [`outbound_fields`] and [`reconstruct`] both
//! read from it.

use serde_json::{Map, Value};

use crate::types::{Record, RecordType};
use crate::utils::lenient;

/// Encoding rules per field kind.
mod kind {
    use serde_json::Value;

    use crate::utils::lenient;

    /// Integer sent whenever the type uses it, zero included.
    pub mod required_int {
        use super::{Value, lenient};

        pub fn encode(value: &u32) -> Option<Value> {
            Some(Value::from(*value))
        }

        pub fn decode(raw: Option<&Value>) -> u32 {
            lenient::uint(raw)
        }
    }

    /// Integer left out when zero.
    pub mod optional_int {
        use super::{Value, lenient};

        pub fn encode(value: &u32) -> Option<Value> {
            (*value != 0).then(|| Value::from(*value))
        }

        pub fn decode(raw: Option<&Value>) -> u32 {
            lenient::uint(raw)
        }
    }

    pub mod text {
        use super::{Value, lenient};

        pub fn encode(value: &str) -> Option<Value> {
            (!value.is_empty()).then(|| Value::from(value))
        }

        pub fn decode(raw: Option<&Value>) -> String {
            lenient::text(raw)
        }
    }

    pub mod float {
        use super::{Value, lenient};
        use serde_json::Number;

        /// Zero and non-finite values are omitted.
        pub fn encode(value: &f64) -> Option<Value> {
            if *value == 0.0 {
                return None;
            }
            Number::from_f64(*value).map(Value::Number)
        }

        pub fn decode(raw: Option<&Value>) -> f64 {
            lenient::float(raw)
        }
    }
}

macro_rules! record_fields {
    ($( $variant:ident => $wire:literal, $kind:ident, $field:ident; )*) => {
        /// An extended record attribute, named after its [`Record`] field.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum RecordField {
            $( $variant, )*
        }

        impl RecordField {
            /// Every known attribute.
            pub const ALL: &'static [RecordField] = &[$( RecordField::$variant, )*];

            /// Key used by the provider in requests and responses.
            pub fn wire_name(self) -> &'static str {
                match self {
                    $( Self::$variant => $wire, )*
                }
            }

            /// Wire value of this attribute, `None` when it should be left out.
            pub fn encode(self, record: &Record) -> Option<Value> {
                match self {
                    $( Self::$variant => kind::$kind::encode(&record.$field), )*
                }
            }

            /// Copy this attribute from a raw response entry into `record`.
            pub fn decode(self, raw: &Map<String, Value>, record: &mut Record) {
                match self {
                    $( Self::$variant => record.$field = kind::$kind::decode(raw.get($wire)), )*
                }
            }
        }
    };
}

record_fields! {
    Priority => "priority", required_int, priority;
    Weight => "weight", required_int, weight;
    Port => "port", required_int, port;

    Frame => "frame", text, frame;
    FrameTitle => "frame-title", text, frame_title;
    FrameKeywords => "frame-keywords", text, frame_keywords;
    FrameDescription => "frame-description", text, frame_description;
    MobileMeta => "mobile-meta", optional_int, mobile_meta;
    SavePath => "save-path", optional_int, save_path;
    RedirectType => "redirect-type", optional_int, redirect_type;

    Mail => "mail", text, mail;
    Txt => "txt", text, txt;

    Algorithm => "algorithm", optional_int, algorithm;
    Fptype => "fptype", optional_int, fptype;

    GeodnsLocation => "geodns-location", text, geodns_location;
    GeodnsCode => "geodns-code", text, geodns_code;

    CaaFlag => "caa_flag", text, caa_flag;
    CaaType => "caa_type", text, caa_type;
    CaaValue => "caa_value", text, caa_value;

    TlsaUsage => "tlsa_usage", text, tlsa_usage;
    TlsaSelector => "tlsa_selector", text, tlsa_selector;
    TlsaMatchingType => "tlsa_matching_type", text, tlsa_matching_type;

    SmimeaUsage => "smimea-usage", text, smimea_usage;
    SmimeaSelector => "smimea-selector", text, smimea_selector;
    SmimeaMatchingType => "smimea-matching-type", text, smimea_matching_type;

    KeyTag => "key-tag", optional_int, key_tag;
    DigestType => "digest-type", optional_int, digest_type;

    Order => "order", text, order;
    Pref => "pref", text, pref;
    Flag => "flag", text, flag;
    Params => "params", text, params;
    Regexp => "regexp", text, regexp;
    Replace => "replace", text, replace;

    CertType => "cert-type", optional_int, cert_type;
    CertKeyTag => "cert-key-tag", optional_int, cert_key_tag;
    CertAlgorithm => "cert-algorithm", optional_int, cert_algorithm;

    LatDeg => "lat-deg", float, lat_deg;
    LatMin => "lat-min", float, lat_min;
    LatSec => "lat-sec", float, lat_sec;
    LatDir => "lat-dir", text, lat_dir;
    LongDeg => "long-deg", float, long_deg;
    LongMin => "long-min", float, long_min;
    LongSec => "long-sec", float, long_sec;
    LongDir => "long-dir", text, long_dir;
    Altitude => "altitude", text, altitude;
    Size => "size", text, size;
    HPrecision => "h-precision", text, h_precision;
    VPrecision => "v-precision", text, v_precision;

    Cpu => "cpu", text, cpu;
    Os => "os", text, os;
}

impl RecordField {
    /// GeoDNS attributes, attached to any record type when set.
    pub const GEODNS: &'static [RecordField] = &[Self::GeodnsLocation, Self::GeodnsCode];

    /// Extended attributes registered for `record_type`, in wire order.
    pub fn for_type(record_type: &RecordType) -> &'static [RecordField] {
        match record_type {
            RecordType::Mx => &[Self::Priority],
            RecordType::Wr => &[
                Self::Frame,
                Self::FrameTitle,
                Self::FrameKeywords,
                Self::FrameDescription,
                Self::MobileMeta,
                Self::SavePath,
                Self::RedirectType,
            ],
            RecordType::Srv => &[Self::Priority, Self::Weight, Self::Port],
            RecordType::Rp => &[Self::Mail, Self::Txt],
            RecordType::Sshfp => &[Self::Algorithm, Self::Fptype],
            RecordType::Naptr => &[
                Self::Flag,
                Self::Order,
                Self::Pref,
                Self::Params,
                Self::Regexp,
                Self::Replace,
            ],
            RecordType::Caa => &[Self::CaaFlag, Self::CaaType, Self::CaaValue],
            RecordType::Tlsa => &[Self::TlsaUsage, Self::TlsaSelector, Self::TlsaMatchingType],
            RecordType::Ds => &[Self::KeyTag, Self::Algorithm, Self::DigestType],
            RecordType::Cert => &[Self::CertType, Self::CertKeyTag, Self::CertAlgorithm],
            RecordType::Hinfo => &[Self::Cpu, Self::Os],
            RecordType::Loc => &[
                Self::LatDeg,
                Self::LatMin,
                Self::LatSec,
                Self::LatDir,
                Self::LongDeg,
                Self::LongMin,
                Self::LongSec,
                Self::LongDir,
                Self::Altitude,
                Self::Size,
                Self::HPrecision,
                Self::VPrecision,
            ],
            RecordType::Smimea => &[
                Self::SmimeaUsage,
                Self::SmimeaSelector,
                Self::SmimeaMatchingType,
            ],
            RecordType::A
            | RecordType::Aaaa
            | RecordType::Cname
            | RecordType::Txt
            | RecordType::Ns
            | RecordType::Ptr
            | RecordType::Spf
            | RecordType::Alias
            | RecordType::OpenPgpKey
            | RecordType::Other(_) => &[],
        }
    }
}

/// Build the record part of a create/update payload.
///
/// Contains `domain-name`, `host`, `record`, `ttl`, the extended attributes
/// registered for the record's type, and GeoDNS attributes when set. The
/// caller adds `record-type` or `record-id` depending on the operation.
pub fn outbound_fields(record: &Record) -> Map<String, Value> {
    let mut payload = Map::new();
    payload.insert("domain-name".into(), Value::from(record.domain.as_str()));
    payload.insert("host".into(), Value::from(record.host.as_str()));
    payload.insert("record".into(), Value::from(record.value.as_str()));
    payload.insert("ttl".into(), Value::from(record.ttl));

    let extended = RecordField::for_type(&record.record_type)
        .iter()
        .chain(RecordField::GEODNS);
    for field in extended {
        if let Some(value) = field.encode(record) {
            payload.insert(field.wire_name().to_string(), value);
        }
    }
    payload
}

/// Rebuild a [`Record`] from one entry of a record listing.
///
/// `key` is the map key the entry was listed under and stands in for a
/// missing `id`. Malformed values degrade to zero values; only the attributes
/// registered for the entry's type are read.
pub fn reconstruct(domain: &str, key: &str, raw: &Map<String, Value>) -> Record {
    let id = match lenient::text(raw.get("id")) {
        id if id.is_empty() => key.to_string(),
        id => id,
    };
    let mut record = Record {
        id,
        domain: domain.to_string(),
        host: lenient::text(raw.get("host")),
        record_type: RecordType::from(lenient::text(raw.get("type"))),
        ttl: lenient::uint(raw.get("ttl")),
        value: lenient::text(raw.get("record")),
        ..Record::default()
    };

    let fields = RecordField::for_type(&record.record_type)
        .iter()
        .chain(RecordField::GEODNS);
    for field in fields {
        field.decode(raw, &mut record);
    }
    record
}
