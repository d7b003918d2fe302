use std::fmt;

/// REST resources read by the exporter, relative to the API base URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    SystemStatus,
    SystemInfo,
    HostStatus,
    ServiceStatus,
}

impl Resource {
    pub const fn path(self) -> &'static str {
        match self {
            Resource::SystemStatus => "/system/status",
            Resource::SystemInfo => "/system/info",
            Resource::HostStatus => "/objects/hoststatus",
            Resource::ServiceStatus => "/objects/servicestatus",
        }
    }

    /// Short label used in logs and in the `resource` metric label.
    pub const fn name(self) -> &'static str {
        match self {
            Resource::SystemStatus => "status",
            Resource::SystemInfo => "info",
            Resource::HostStatus => "hosts",
            Resource::ServiceStatus => "services",
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
