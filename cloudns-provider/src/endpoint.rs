//! API endpoint catalogue.

use std::fmt;

/// Every endpoint this crate calls. All of them take a POSTed JSON body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Login,
    AvailableTtl,
    AvailableNameServers,
    AvailableRecordTypes,
    ListRecords,
    ListZones,
    AddRecord,
    ModifyRecord,
    DeleteRecord,
    RegisterZone,
    UpdateZone,
    DeleteZone,
    FailoverActivate,
    FailoverModify,
    FailoverDeactivate,
    FailoverSettings,
}

impl Endpoint {
    /// Path relative to the base URL.
    pub fn path(self) -> &'static str {
        match self {
            Self::Login => "/dns/login.json",
            Self::AvailableTtl => "/dns/get-available-ttl.json",
            Self::AvailableNameServers => "/dns/available-name-servers.json",
            Self::AvailableRecordTypes => "/dns/get-available-record-types.json",
            Self::ListRecords => "/dns/records.json",
            Self::ListZones => "/dns/list-zones.json",
            Self::AddRecord => "/dns/add-record.json",
            Self::ModifyRecord => "/dns/mod-record.json",
            Self::DeleteRecord => "/dns/delete-record.json",
            Self::RegisterZone => "/dns/register.json",
            Self::UpdateZone => "/dns/update-zone.json",
            Self::DeleteZone => "/dns/delete.json",
            Self::FailoverActivate => "/dns/failover-activate.json",
            Self::FailoverModify => "/dns/failover-modify.json",
            Self::FailoverDeactivate => "/dns/failover-deactivate.json",
            Self::FailoverSettings => "/dns/failover-settings.json",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}
