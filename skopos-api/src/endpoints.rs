//! Endpoint paths for the Glances v4 REST API

use heapless::String;

/// Maximum length of a fully-joined request URL
pub const MAX_URL_LEN: usize = 128;

/// The API endpoints the appliance polls
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Endpoint {
    /// Host information (hostname)
    System,
    /// CPU totals
    Cpu,
    /// Memory usage
    Mem,
    /// Temperature sensor list
    Sensors,
    /// Filesystem list
    Fs,
    /// Network interface list
    Network,
}

impl Endpoint {
    /// Path of this endpoint relative to the server base URL
    pub fn path(self) -> &'static str {
        match self {
            Endpoint::System => "/api/4/system",
            Endpoint::Cpu => "/api/4/cpu",
            Endpoint::Mem => "/api/4/mem",
            Endpoint::Sensors => "/api/4/sensors",
            Endpoint::Fs => "/api/4/fs",
            Endpoint::Network => "/api/4/network",
        }
    }

    /// Join this endpoint onto a server base URL
    ///
    /// A trailing slash on the base is dropped so the result never contains
    /// a double slash. Truncates silently if the base is oversized; the
    /// server URL is configuration and checked at provisioning time.
    pub fn url(self, base: &str) -> String<MAX_URL_LEN> {
        let base = base.strip_suffix('/').unwrap_or(base);
        let mut url: String<MAX_URL_LEN> = String::new();
        let _ = url.push_str(base);
        let _ = url.push_str(self.path());
        url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths() {
        assert_eq!(Endpoint::Cpu.path(), "/api/4/cpu");
        assert_eq!(Endpoint::System.path(), "/api/4/system");
        assert_eq!(Endpoint::Fs.path(), "/api/4/fs");
    }

    #[test]
    fn test_url_join() {
        let url = Endpoint::Mem.url("http://192.168.1.10:61208");
        assert_eq!(url.as_str(), "http://192.168.1.10:61208/api/4/mem");
    }

    #[test]
    fn test_url_join_trailing_slash() {
        let url = Endpoint::Network.url("http://server:61208/");
        assert_eq!(url.as_str(), "http://server:61208/api/4/network");
    }
}
