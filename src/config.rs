use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;

use crate::data::filter::BoundaryPolicy;

pub const DEFAULT_DATA_PATH: &str = "spacex_launch_dash.csv";
pub const DEFAULT_ADDR: SocketAddr = SocketAddr::new(IpAddr::V4(Ipv4Addr::LOCALHOST), 8050);

/// Startup settings. The binaries always run with `DashConfig::default()`;
/// embedders and tests set fields directly.
#[derive(Debug, Clone, PartialEq)]
pub struct DashConfig {
    pub data_path: PathBuf,
    pub bind_addr: SocketAddr,
    pub boundary: BoundaryPolicy,
}

impl Default for DashConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            bind_addr: DEFAULT_ADDR,
            boundary: BoundaryPolicy::Exclusive,
        }
    }
}
