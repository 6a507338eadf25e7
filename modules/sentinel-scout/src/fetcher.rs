use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{info, warn};

use sentinel_common::{
    classify, Config, IntelRecord, IntelSnapshot, IntelTables, Node, Registry,
};

use crate::feed::{FeedError, GoogleNewsFeed, HeadlineFeed};
use crate::normalizer::HeadlineNormalizer;

const DEFAULT_MAX_ENTRIES: usize = 15;
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Builds one [`IntelRecord`] per registry node.
///
/// Nodes are processed strictly one after another. Feed failures never
/// escape: a node whose query fails is treated like one with no usable
/// headline and gets fallback text.
pub struct IntelFetcher {
    feed: Arc<dyn HeadlineFeed>,
    normalizer: HeadlineNormalizer,
    max_entries: usize,
    timeout: Duration,
    offline: bool,
}

impl IntelFetcher {
    pub fn new(feed: Arc<dyn HeadlineFeed>, tables: Arc<IntelTables>) -> Self {
        Self {
            feed,
            normalizer: HeadlineNormalizer::new(tables),
            max_entries: DEFAULT_MAX_ENTRIES,
            timeout: DEFAULT_TIMEOUT,
            offline: false,
        }
    }

    /// Fetcher backed by the live news feed described in `config`.
    pub fn from_config(config: &Config, tables: Arc<IntelTables>) -> Result<Self, FeedError> {
        let feed = GoogleNewsFeed::new(&config.feed_url, config.feed_timeout)?;
        Ok(Self::new(Arc::new(feed), tables)
            .max_entries(config.feed_max_entries)
            .timeout(config.feed_timeout)
            .offline(config.offline))
    }

    pub fn max_entries(mut self, max_entries: usize) -> Self {
        self.max_entries = max_entries;
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn offline(mut self, offline: bool) -> Self {
        self.offline = offline;
        self
    }

    pub fn tables(&self) -> &IntelTables {
        self.normalizer.tables()
    }

    /// Run one full cycle with an OS-seeded RNG.
    pub async fn run_cycle(&self, registry: &Registry) -> IntelSnapshot {
        let mut rng = StdRng::from_os_rng();
        self.run_cycle_with_rng(registry, &mut rng).await
    }

    pub async fn run_cycle_with_rng<R: Rng + ?Sized>(
        &self,
        registry: &Registry,
        rng: &mut R,
    ) -> IntelSnapshot {
        info!(nodes = registry.len(), offline = self.offline, "Syncing signal grid");

        let mut records = Vec::with_capacity(registry.len());
        for node in registry.nodes() {
            records.push(self.build_record(node, &mut *rng).await);
        }

        let fallbacks = records.iter().filter(|r| r.is_fallback).count();
        info!(records = records.len(), fallbacks, "Signal grid synced");

        IntelSnapshot::new(records, Utc::now())
    }

    pub async fn build_record<R: Rng + ?Sized>(&self, node: &Node, rng: &mut R) -> IntelRecord {
        let tables = self.tables();

        let live = if self.offline || tables.is_monitor_only(&node.name) {
            None
        } else {
            self.scan_feed(node, &mut *rng).await
        };

        let is_fallback = live.is_none();
        let mut intel = live.unwrap_or_else(|| tables.fallback_text(&node.name));
        if !intel.ends_with('.') {
            intel.push('.');
        }

        let classification = classify(node.base_score, is_fallback);
        info!(
            node = %node.name,
            status = %classification.status,
            risk = classification.risk,
            is_fallback,
            "Node classified"
        );

        IntelRecord {
            name: node.name.clone(),
            country: node.country.clone(),
            intel,
            source: uplink_source(rng),
            risk: classification.risk,
            status: classification.status,
            color: classification.color,
            is_fallback,
            latitude: node.latitude.clone(),
            longitude: node.longitude.clone(),
        }
    }

    /// First headline that survives normalization, if any.
    async fn scan_feed<R: Rng + ?Sized>(&self, node: &Node, rng: &mut R) -> Option<String> {
        let headlines = match tokio::time::timeout(self.timeout, self.feed.headlines(node)).await {
            Ok(Ok(headlines)) => headlines,
            Ok(Err(e)) => {
                warn!(node = %node.name, error = %e, "Feed query failed, using fallback");
                return None;
            }
            Err(_) => {
                warn!(node = %node.name, timeout_ms = self.timeout.as_millis() as u64, "Feed query timed out, using fallback");
                return None;
            }
        };

        headlines.iter().take(self.max_entries).find_map(|headline| {
            self.normalizer
                .normalize(headline, &node.name, &node.country, &node.adjective, &mut *rng)
        })
    }
}

/// Cosmetic uplink identifier, e.g. `SAT_UPLINK_04`.
pub fn uplink_source<R: Rng + ?Sized>(rng: &mut R) -> String {
    format!("SAT_UPLINK_0{}", rng.random_range(1..=9))
}
