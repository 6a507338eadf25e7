use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// --- Nodes ---

/// A monitored location. Loaded once from the registry and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    pub name: String,
    pub country: String,
    /// Demonym used when templating actor phrases ("UKRAINIAN FORCES").
    pub adjective: String,
    /// Configured risk, 0-100.
    pub base_score: u8,
    pub latitude: String,
    pub longitude: String,
}

impl Node {
    pub fn new(
        name: &str,
        country: &str,
        adjective: &str,
        base_score: u8,
        latitude: &str,
        longitude: &str,
    ) -> Self {
        Self {
            name: name.to_string(),
            country: country.to_string(),
            adjective: adjective.to_string(),
            base_score,
            latitude: latitude.to_string(),
            longitude: longitude.to_string(),
        }
    }
}

// --- Severity ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ThreatStatus {
    Critical,
    High,
    Medium,
    Low,
}

impl ThreatStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ThreatStatus::Critical => "CRITICAL",
            ThreatStatus::High => "HIGH",
            ThreatStatus::Medium => "MEDIUM",
            ThreatStatus::Low => "LOW",
        }
    }
}

impl fmt::Display for ThreatStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Display token paired with a severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalColor {
    Red,
    Orange,
    Yellow,
    Neutral,
}

impl SignalColor {
    pub fn hex(&self) -> &'static str {
        match self {
            SignalColor::Red => "#ff3b30",
            SignalColor::Orange => "#ff9f0a",
            SignalColor::Yellow => "#ffd60a",
            SignalColor::Neutral => "#ffffff",
        }
    }
}

/// Output of the risk classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub status: ThreatStatus,
    pub color: SignalColor,
    pub risk: u8,
}

// --- Records ---

/// One derived record per node, rebuilt every fetch cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntelRecord {
    pub name: String,
    pub country: String,
    /// Templated sentence. Never empty, always ends with a period.
    pub intel: String,
    pub source: String,
    pub risk: u8,
    pub status: ThreatStatus,
    pub color: SignalColor,
    pub is_fallback: bool,
    pub latitude: String,
    pub longitude: String,
}

/// Stable descending sort by risk. Ties keep their incoming order.
pub fn rank_by_risk(records: &mut [IntelRecord]) {
    records.sort_by(|a, b| b.risk.cmp(&a.risk));
}

/// Immutable result of one fetch cycle.
///
/// Shared read-only with the presentation layer. A refresh would build a new
/// snapshot and swap the reference rather than touch these records.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntelSnapshot {
    pub synced_at: DateTime<Utc>,
    records: Vec<IntelRecord>,
}

impl IntelSnapshot {
    pub fn new(mut records: Vec<IntelRecord>, synced_at: DateTime<Utc>) -> Self {
        rank_by_risk(&mut records);
        Self { synced_at, records }
    }

    pub fn records(&self) -> &[IntelRecord] {
        &self.records
    }

    /// Case-insensitive lookup by node name.
    pub fn find(&self, name: &str) -> Option<&IntelRecord> {
        self.records
            .iter()
            .find(|r| r.name.eq_ignore_ascii_case(name.trim()))
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, risk: u8) -> IntelRecord {
        IntelRecord {
            name: name.to_string(),
            country: "Testland".to_string(),
            intel: "NOTHING TO REPORT.".to_string(),
            source: "SAT_UPLINK_01".to_string(),
            risk,
            status: ThreatStatus::Low,
            color: SignalColor::Neutral,
            is_fallback: false,
            latitude: "0.00".to_string(),
            longitude: "0.00".to_string(),
        }
    }

    #[test]
    fn test_rank_by_risk_descending() {
        let mut records = vec![record("a", 10), record("b", 90), record("c", 50)];
        rank_by_risk(&mut records);
        let risks: Vec<u8> = records.iter().map(|r| r.risk).collect();
        assert_eq!(risks, vec![90, 50, 10]);
    }

    #[test]
    fn test_rank_by_risk_ties_keep_order() {
        let mut records = vec![
            record("first", 15),
            record("top", 80),
            record("second", 15),
            record("third", 15),
        ];
        rank_by_risk(&mut records);
        let names: Vec<&str> = records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["top", "first", "second", "third"]);
    }

    #[test]
    fn test_snapshot_find_ignores_case() {
        let snapshot = IntelSnapshot::new(vec![record("Gaza City", 94)], Utc::now());
        assert!(snapshot.find("gaza city").is_some());
        assert!(snapshot.find("GAZA CITY").is_some());
        assert!(snapshot.find("Gaza").is_none());
    }

    #[test]
    fn test_status_serializes_uppercase() {
        let json = serde_json::to_string(&ThreatStatus::Critical).unwrap();
        assert_eq!(json, "\"CRITICAL\"");
    }
}
