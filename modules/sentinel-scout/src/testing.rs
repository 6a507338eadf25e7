// Test doubles for the fetch cycle.
//
// MockFeed maps node names to canned headline lists, with optional
// per-node failures and delays, and records every query it receives.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use sentinel_common::{IntelRecord, Node, SignalColor, ThreatStatus};

use crate::feed::{FeedError, HeadlineFeed};

/// HashMap-based headline feed. Returns `Err` for unregistered nodes.
/// Builder pattern: `.on_node()`, `.failing()`, `.slow()`.
pub struct MockFeed {
    headlines: HashMap<String, Vec<String>>,
    failures: HashSet<String>,
    delays: HashMap<String, Duration>,
    calls: Mutex<Vec<String>>,
}

impl MockFeed {
    pub fn new() -> Self {
        Self {
            headlines: HashMap::new(),
            failures: HashSet::new(),
            delays: HashMap::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn on_node(mut self, name: &str, headlines: &[&str]) -> Self {
        self.headlines.insert(
            name.to_string(),
            headlines.iter().map(|h| h.to_string()).collect(),
        );
        self
    }

    pub fn failing(mut self, name: &str) -> Self {
        self.failures.insert(name.to_string());
        self
    }

    pub fn slow(mut self, name: &str, delay: Duration) -> Self {
        self.delays.insert(name.to_string(), delay);
        self
    }

    /// Node names queried so far, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl Default for MockFeed {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HeadlineFeed for MockFeed {
    async fn headlines(&self, node: &Node) -> Result<Vec<String>, FeedError> {
        self.calls.lock().unwrap().push(node.name.clone());

        if let Some(delay) = self.delays.get(&node.name) {
            tokio::time::sleep(*delay).await;
        }
        if self.failures.contains(&node.name) {
            return Err(FeedError::Unavailable(format!("mock failure for {}", node.name)));
        }
        self.headlines
            .get(&node.name)
            .cloned()
            .ok_or_else(|| FeedError::Unavailable(format!("no mock headlines for {}", node.name)))
    }
}

/// Minimal record for snapshot and presentation tests.
pub fn test_record(name: &str, risk: u8, status: ThreatStatus) -> IntelRecord {
    let color = match status {
        ThreatStatus::Critical => SignalColor::Red,
        ThreatStatus::High => SignalColor::Orange,
        ThreatStatus::Medium => SignalColor::Yellow,
        ThreatStatus::Low => SignalColor::Neutral,
    };
    IntelRecord {
        name: name.to_string(),
        country: "Testland".to_string(),
        intel: format!("SECURITY FORCES PATROL {}.", name.to_uppercase()),
        source: "SAT_UPLINK_07".to_string(),
        risk,
        status,
        color,
        is_fallback: false,
        latitude: "0.00".to_string(),
        longitude: "0.00".to_string(),
    }
}
