//! Host platform primitives used by the default guards and hooks.

use std::convert::Infallible;
use std::str::FromStr;

use derive_more::Display;
use futures_util::future::BoxFuture;
use serde_json::Value;

use crate::Result;

/// Key-value cache holding the signed-in user's info.
pub trait CacheStore: Send + Sync {
    /// Read a cached value.
    fn get(&self, key: &str) -> Option<Value>;
}

/// Network status primitive.
pub trait NetworkProbe: Send + Sync {
    /// Query the current network type.
    fn network_type(&self) -> BoxFuture<'_, Result<NetworkType>>;
}

/// Page navigation primitive.
pub trait Navigator: Send + Sync {
    /// Navigate to `path`.
    fn redirect_to(&self, path: &str);
}

/// Loading and toast indicators.
pub trait Indicator: Send + Sync {
    /// Show the loading indicator.
    fn show_loading(&self);

    /// Hide the loading indicator.
    fn hide_loading(&self);

    /// Show a short message.
    fn show_toast(&self, message: &str);
}

/// Network type as reported by the host platform.
///
/// Displays as the raw status string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Display)]
pub enum NetworkType {
    /// Wi-Fi.
    #[display("wifi")]
    Wifi,
    /// Wired ethernet.
    #[display("ethernet")]
    Ethernet,
    /// 2G cellular.
    #[display("2g")]
    Cellular2g,
    /// 3G cellular.
    #[display("3g")]
    Cellular3g,
    /// 4G cellular.
    #[display("4g")]
    Cellular4g,
    /// 5G cellular.
    #[display("5g")]
    Cellular5g,
    /// Status could not be determined.
    #[display("unknown")]
    Unknown,
    /// No network.
    #[display("none")]
    None,
    /// Any other status string.
    #[display("{_0}")]
    Other(String),
}

impl NetworkType {
    /// `unknown` and `none` count as unreachable, every other status as reachable.
    #[must_use]
    pub const fn is_reachable(&self) -> bool {
        !matches!(self, Self::Unknown | Self::None)
    }
}

impl FromStr for NetworkType {
    type Err = Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(match s {
            "wifi" => Self::Wifi,
            "ethernet" => Self::Ethernet,
            "2g" => Self::Cellular2g,
            "3g" => Self::Cellular3g,
            "4g" => Self::Cellular4g,
            "5g" => Self::Cellular5g,
            "unknown" => Self::Unknown,
            "none" => Self::None,
            other => Self::Other(other.to_string()),
        })
    }
}

impl From<&str> for NetworkType {
    fn from(s: &str) -> Self {
        match s.parse() {
            Ok(network) => network,
            Err(never) => match never {},
        }
    }
}
