//! HTTP monitor client
//!
//! Implements the core's `MonitorClient` over reqwless + embassy-net.
//! The network runners live on the second core, so each call here can
//! busy-block the control core until its request completes or times out -
//! exactly the synchronous-fetch contract the engine expects.

use alloc::vec::Vec;

use defmt::warn;
use embassy_futures::block_on;
use embassy_net::dns::DnsSocket;
use embassy_net::tcp::client::{TcpClient, TcpClientState};
use embassy_net::Stack;
use embassy_time::{with_timeout, Duration};
use reqwless::client::HttpClient;
use reqwless::request::Method;

use skopos_api::{model, CpuStats, Endpoint, FsEntry, MemStats, NetInterface, Sensor, SystemInfo};
use skopos_core::traits::{MonitorClient, NetError};

use crate::config::HTTP_TIMEOUT_SECS;

/// Response buffer; the filesystem and sensor lists dominate the size
const RX_BUFFER: usize = 8192;

/// Glances REST client over the WiFi stack
pub struct GlancesClient {
    stack: Stack<'static>,
    base_url: &'static str,
    rx: [u8; RX_BUFFER],
}

impl GlancesClient {
    pub fn new(stack: Stack<'static>, base_url: &'static str) -> Self {
        Self {
            stack,
            base_url,
            rx: [0; RX_BUFFER],
        }
    }

    /// One GET against an endpoint, returning the body bytes
    fn get(&mut self, endpoint: Endpoint) -> Result<Vec<u8>, NetError> {
        if !self.stack.is_link_up() {
            return Err(NetError::LinkDown);
        }

        let url = endpoint.url(self.base_url);
        let stack = self.stack;
        let rx = &mut self.rx;

        block_on(async {
            let state: TcpClientState<1, 1024, 1024> = TcpClientState::new();
            let tcp = TcpClient::new(stack, &state);
            let dns = DnsSocket::new(stack);
            let mut client = HttpClient::new(&tcp, &dns);

            let request = async {
                let mut request = client
                    .request(Method::GET, &url)
                    .await
                    .map_err(|_| NetError::Http)?;
                let response = request.send(rx).await.map_err(|_| NetError::Http)?;
                if !response.status.is_successful() {
                    warn!("GET {} failed", endpoint);
                    return Err(NetError::Http);
                }
                let body = response
                    .body()
                    .read_to_end()
                    .await
                    .map_err(|_| NetError::Http)?;
                Ok(Vec::from(&body[..]))
            };

            match with_timeout(Duration::from_secs(HTTP_TIMEOUT_SECS), request).await {
                Ok(result) => result,
                Err(_) => Err(NetError::Timeout),
            }
        })
    }
}

impl MonitorClient for GlancesClient {
    fn fetch_system(&mut self) -> Result<SystemInfo, NetError> {
        let body = self.get(Endpoint::System)?;
        model::parse_system(&body).map_err(|_| NetError::Malformed)
    }

    fn fetch_cpu(&mut self) -> Result<CpuStats, NetError> {
        let body = self.get(Endpoint::Cpu)?;
        model::parse_cpu(&body).map_err(|_| NetError::Malformed)
    }

    fn fetch_mem(&mut self) -> Result<MemStats, NetError> {
        let body = self.get(Endpoint::Mem)?;
        model::parse_mem(&body).map_err(|_| NetError::Malformed)
    }

    fn fetch_sensors(&mut self) -> Result<Vec<Sensor>, NetError> {
        let body = self.get(Endpoint::Sensors)?;
        model::parse_sensors(&body).map_err(|_| NetError::Malformed)
    }

    fn fetch_fs(&mut self) -> Result<Vec<FsEntry>, NetError> {
        let body = self.get(Endpoint::Fs)?;
        model::parse_fs(&body).map_err(|_| NetError::Malformed)
    }

    fn fetch_network(&mut self) -> Result<Vec<NetInterface>, NetError> {
        let body = self.get(Endpoint::Network)?;
        model::parse_network(&body).map_err(|_| NetError::Malformed)
    }
}
