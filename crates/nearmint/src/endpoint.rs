//! Configured query/relayer endpoints.

use crate::error::{Error, Result};
use crate::transport::{HttpTransport, Session, TransportConfig};

/// Public mainnet RPC endpoints, in priority order.
pub const DEFAULT_RPC_ENDPOINTS: [&str; 3] = [
    "https://near.lava.build",
    "https://free.rpc.fastnear.com",
    "https://rpc.mainnet.near.org",
];

/// Base address of the wallet relayer.
pub const DEFAULT_RELAYER_ENDPOINT: &str = "https://near-mobile-production.aws.peersyst.tech";

/// A base address paired with the transport used to reach it.
///
/// Immutable once constructed.
#[derive(Clone, Debug)]
pub struct Endpoint<T> {
    address: String,
    transport: T,
}

impl<T> Endpoint<T> {
    pub fn new(address: impl Into<String>, transport: T) -> Self {
        Self {
            address: address.into(),
            transport,
        }
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }
}

/// An ordered, non-empty set of endpoints. Earlier endpoints are preferred.
#[derive(Clone, Debug)]
pub struct EndpointPool<T> {
    endpoints: Vec<Endpoint<T>>,
}

impl<T> EndpointPool<T> {
    /// # Errors
    ///
    /// Returns [`Error::EmptyEndpointPool`] if `endpoints` is empty.
    pub fn new(endpoints: Vec<Endpoint<T>>) -> Result<Self> {
        if endpoints.is_empty() {
            return Err(Error::EmptyEndpointPool);
        }
        Ok(Self { endpoints })
    }

    pub fn single(endpoint: Endpoint<T>) -> Self {
        Self {
            endpoints: vec![endpoint],
        }
    }

    pub fn len(&self) -> usize {
        self.endpoints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.endpoints.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Endpoint<T>> {
        self.endpoints.iter()
    }
}

impl EndpointPool<HttpTransport> {
    /// Builds one HTTP endpoint per address, all sharing `session`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyEndpointPool`] for an empty address list, or the
    /// error from [`HttpTransport::new`].
    pub fn http<I, A>(addresses: I, config: &TransportConfig, session: &Session) -> Result<Self>
    where
        I: IntoIterator<Item = A>,
        A: Into<String>,
    {
        let endpoints = addresses
            .into_iter()
            .map(|address| Ok(Endpoint::new(address, HttpTransport::new(config, session)?)))
            .collect::<Result<Vec<_>>>()?;
        Self::new(endpoints)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_pool_is_rejected() {
        let result = EndpointPool::<()>::new(Vec::new());
        assert!(matches!(result, Err(Error::EmptyEndpointPool)));
    }

    #[test]
    fn preserves_configured_order() {
        let pool = EndpointPool::new(vec![
            Endpoint::new("https://a", ()),
            Endpoint::new("https://b", ()),
            Endpoint::new("https://c", ()),
        ])
        .unwrap();

        let order: Vec<_> = pool.iter().map(Endpoint::address).collect();
        assert_eq!(order, ["https://a", "https://b", "https://c"]);
    }

    #[test]
    fn http_pool_shares_one_session() {
        let session = Session::new();
        let pool = EndpointPool::http(
            DEFAULT_RPC_ENDPOINTS,
            &TransportConfig::default(),
            &session,
        )
        .unwrap();
        assert_eq!(pool.len(), DEFAULT_RPC_ENDPOINTS.len());
    }
}
