//! Directory lookups (reverse names and text records).
//!
//! # Design Decisions
//! - One attempt per query; the client's own timeout is the only deadline
//! - A timeout is reported like any other lookup failure
//! - Query names are sent fully qualified, so resolv.conf search domains
//!   are never appended

use std::net::IpAddr;
use std::time::Duration;

use async_trait::async_trait;
use hickory_resolver::config::{ResolverConfig, ResolverOpts};
use hickory_resolver::proto::error::ProtoError;
use hickory_resolver::proto::rr::Name;
use hickory_resolver::TokioAsyncResolver;
use thiserror::Error;

/// A failed directory query.
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("lookup failed: {0}")]
    Resolve(#[from] hickory_resolver::error::ResolveError),

    #[error("no {0} record")]
    Empty(&'static str),

    #[error("invalid query name: {0}")]
    InvalidName(#[from] ProtoError),
}

/// Name-service operations used by the network intel chain.
#[async_trait]
pub trait DirectoryLookup: Send + Sync {
    /// Host name for `addr`, without the trailing root dot.
    async fn reverse_name(&self, addr: IpAddr) -> Result<String, LookupError>;

    /// Text records published at `name`, one string per record.
    async fn txt(&self, name: &str) -> Result<Vec<String>, LookupError>;
}

/// [`DirectoryLookup`] over DNS via hickory.
#[derive(Clone)]
pub struct DnsDirectory {
    resolver: TokioAsyncResolver,
}

impl DnsDirectory {
    /// Use the host's resolver configuration, falling back to hickory's
    /// defaults when it cannot be read.
    pub fn from_system_conf(timeout: Duration) -> Self {
        let (config, mut opts) = match hickory_resolver::system_conf::read_system_conf() {
            Ok(conf) => conf,
            Err(e) => {
                tracing::warn!(error = %e, "Cannot read system resolver config, using defaults");
                (ResolverConfig::default(), ResolverOpts::default())
            }
        };
        opts.timeout = timeout;
        opts.attempts = 1;

        Self {
            resolver: TokioAsyncResolver::tokio(config, opts),
        }
    }
}

impl std::fmt::Debug for DnsDirectory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DnsDirectory").finish_non_exhaustive()
    }
}

#[async_trait]
impl DirectoryLookup for DnsDirectory {
    async fn reverse_name(&self, addr: IpAddr) -> Result<String, LookupError> {
        let lookup = self.resolver.reverse_lookup(addr).await?;
        let name = lookup.iter().next().ok_or(LookupError::Empty("PTR"))?;
        Ok(name.to_string().trim_end_matches('.').to_string())
    }

    async fn txt(&self, name: &str) -> Result<Vec<String>, LookupError> {
        let lookup = self.resolver.txt_lookup(rooted(name)?).await?;
        let records: Vec<String> = lookup
            .iter()
            .map(|txt| {
                txt.txt_data()
                    .iter()
                    .map(|chunk| String::from_utf8_lossy(chunk))
                    .collect::<String>()
            })
            .collect();

        if records.is_empty() {
            return Err(LookupError::Empty("TXT"));
        }
        Ok(records)
    }
}

/// `name` as an absolute domain name.
fn rooted(name: &str) -> Result<Name, LookupError> {
    let mut name = Name::from_ascii(name)?;
    name.set_fqdn(true);
    Ok(name)
}
