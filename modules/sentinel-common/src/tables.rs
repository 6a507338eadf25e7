//! Lookup tables that drive headline refinement and fallback text.
//!
//! Everything here is plain data so it can be swapped out in tests or
//! localized without touching the normalizer.

use std::collections::{HashMap, HashSet};

const TACTICAL_DOSSIERS: &[(&str, &[&str])] = &[
    (
        "GAZA CITY",
        &[
            "ISRAELI MILITARY NEUTRALIZE HIGH-VALUE COMMAND TARGETS IN GAZA CITY AIR STRIKE.",
            "ISRAELI FORCES CONDUCT KINETIC OPERATION AGAINST TUNNEL INFRASTRUCTURE IN GAZA CITY.",
        ],
    ),
    (
        "TEL AVIV",
        &[
            "IRON DOME AIR DEFENSE INTERCEPTS MULTIPLE PROJECTILES OVER CENTRAL TEL AVIV SECTOR.",
            "ISRAELI SECURITY FORCES INCREASE READINESS LEVELS FOLLOWING BORDER RETALIATION SIGNALS.",
        ],
    ),
    (
        "KHARTOUM",
        &[
            "SUDANESE ARMED FORCES (SAF) CLASH WITH RSF PARAMILITARIES IN HEAVY URBAN COMBAT.",
            "SUDANESE MILITARY CONDUCT ARTILLERY BARRAGE AGAINST RSF POSITIONS ACROSS KHARTOUM.",
        ],
    ),
    (
        "TEHRAN",
        &[
            "ISRAELI MILITARY EXECUTES PRECISION SABOTAGE AGAINST RESEARCH INFRASTRUCTURE IN TEHRAN.",
            "MOSSAD OPERATIVES NEUTRALIZE STRATEGIC INTERNAL SECURITY TARGETS WITHIN TEHRAN PERIMETER.",
        ],
    ),
    (
        "KYIV",
        &[
            "RUSSIAN FORCES LAUNCH LARGE-SCALE DRONE SALVO TARGETING POWER INFRASTRUCTURE IN KYIV.",
            "UKRAINIAN AIR DEFENSE UNITS INTERCEPT CRUISE MISSILES ENTERING KYIV RESTRICTED AIRSPACE.",
        ],
    ),
    (
        "MOSCOW",
        &[
            "RUSSIAN DEFENSE SYSTEMS NEUTRALIZE MULTIPLE UNMANNED AERIAL VEHICLES OVER MOSCOW PERIMETER.",
            "SECURITY FORCES RESTRICT AIRSPACE ACCESS FOLLOWING SIGNAL ANOMALIES DETECTED IN MOSCOW SECTOR.",
        ],
    ),
];

const STATUS_REPORTS: &[(&str, &str)] = &[
    ("Auckland", "INFRASTRUCTURE MONITOR: NOMINAL NETWORK TRAFFIC RECORDED IN REGIONAL HUB."),
    ("Lagos", "SECURITY UPDATE: LOCAL FORCES MAINTAINING STANDARD PERIMETER POSTURE."),
    ("New York City", "DOMESTIC SECURITY: NO DEVIATIONS DETECTED AT KEY TRANSPORTATION NODES."),
    ("Tokyo", "MARITIME SURVEILLANCE: COAST GUARD PATROLS REPORT NO UNUSUAL ACTIVITY."),
    ("Mumbai", "PATTERN ANALYSIS: BACKGROUND SIGNALS REMAIN WITHIN NOMINAL LEVELS."),
    ("Shanghai", "NAVAL LOG: MONITORING PLANNED MARITIME MANEUVERS NEAR HARBOR ENTRANCE."),
    ("London", "URBAN MONITOR: STANDARD VISIBILITY MAINTAINED BY SECURITY UNITS."),
    ("Sydney", "SIGINT SCAN: REGIONAL COMMUNICATIONS GRIDS OPERATING AT BASELINE LEVELS."),
];

const MONITOR_ONLY: &[&str] = &[
    "Auckland",
    "New York City",
    "Lagos",
    "Tokyo",
    "London",
    "Mumbai",
    "Shanghai",
    "Sydney",
];

const VERB_MAP: &[(&str, &str)] = &[
    ("CONDUCTS", "CONDUCT"),
    ("ELIMINATES", "NEUTRALIZE"),
    ("DETAINS", "DETAIN"),
    ("STRIKES", "CONDUCT STRIKE"),
    ("TARGETS", "TARGET"),
    ("LAUNCHES", "LAUNCH"),
];

const STRIKE_KEYWORDS: &[&str] = &["STRIKE", "BOMB", "ATTACK", "STRIKED", "EXPLOSION", "DRONE"];

const HIGH_STAKES_KEYWORDS: &[&str] = &[
    "STRIKE",
    "WAR",
    "COMBAT",
    "MILITARY",
    "FORCES",
    "NEUTRALIZE",
    "DETAIN",
    "SECURITY",
    "BORDER",
    "INTERCEPT",
    "TARGET",
    "RAID",
    "DRONE",
];

/// What makes an actor rule fire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActorTrigger {
    /// The node's upper-cased name equals this value.
    City(String),
    /// The upper-cased headline contains this token.
    Mention(String),
}

/// Overrides the default "<ADJECTIVE> FORCES" actor when any trigger fires.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActorRule {
    pub triggers: Vec<ActorTrigger>,
    pub actor: String,
}

impl ActorRule {
    pub fn matches(&self, city_upper: &str, text_upper: &str) -> bool {
        self.triggers.iter().any(|t| match t {
            ActorTrigger::City(c) => c == city_upper,
            ActorTrigger::Mention(m) => text_upper.contains(m.as_str()),
        })
    }
}

/// All lookup data consulted while building intel records.
#[derive(Debug, Clone)]
pub struct IntelTables {
    /// Upper-cased city name -> pre-written strike sentences.
    pub dossiers: HashMap<String, Vec<String>>,
    /// Node name -> canned status sentence.
    pub status_reports: HashMap<String, String>,
    /// Node names that are never queried.
    pub monitor_only: HashSet<String>,
    /// Leading verb -> replacement phrase.
    pub verb_map: HashMap<String, String>,
    pub strike_keywords: Vec<String>,
    pub high_stakes_keywords: Vec<String>,
    /// Evaluated in order; the last matching rule wins.
    pub actor_rules: Vec<ActorRule>,
}

impl IntelTables {
    pub fn standard() -> Self {
        let dossiers = TACTICAL_DOSSIERS
            .iter()
            .map(|(city, lines)| {
                (
                    city.to_string(),
                    lines.iter().map(|l| l.to_string()).collect(),
                )
            })
            .collect();

        let status_reports = STATUS_REPORTS
            .iter()
            .map(|(name, line)| (name.to_string(), line.to_string()))
            .collect();

        let verb_map = VERB_MAP
            .iter()
            .map(|(from, to)| (from.to_string(), to.to_string()))
            .collect();

        let actor_rules = vec![
            ActorRule {
                triggers: vec![
                    ActorTrigger::City("GAZA CITY".into()),
                    ActorTrigger::City("TEL AVIV".into()),
                    ActorTrigger::Mention("IDF".into()),
                ],
                actor: "ISRAELI MILITARY".into(),
            },
            ActorRule {
                triggers: vec![ActorTrigger::City("KHARTOUM".into())],
                actor: "SUDANESE ARMED FORCES".into(),
            },
            ActorRule {
                triggers: vec![ActorTrigger::Mention("RUSSIA".into())],
                actor: "RUSSIAN FORCES".into(),
            },
        ];

        Self {
            dossiers,
            status_reports,
            monitor_only: MONITOR_ONLY.iter().map(|s| s.to_string()).collect(),
            verb_map,
            strike_keywords: STRIKE_KEYWORDS.iter().map(|s| s.to_string()).collect(),
            high_stakes_keywords: HIGH_STAKES_KEYWORDS.iter().map(|s| s.to_string()).collect(),
            actor_rules,
        }
    }

    pub fn dossier(&self, city_upper: &str) -> Option<&[String]> {
        self.dossiers
            .get(city_upper)
            .map(|v| v.as_slice())
            .filter(|v| !v.is_empty())
    }

    pub fn is_monitor_only(&self, name: &str) -> bool {
        self.monitor_only.contains(name)
    }

    /// Canned sentence for a node, or the generic nominal line when the
    /// node has no table entry.
    pub fn fallback_text(&self, name: &str) -> String {
        match self.status_reports.get(name) {
            Some(line) => line.clone(),
            None => format!(
                "SECTOR MONITORING: {} DATA STREAM REMAINS NOMINAL.",
                name.to_uppercase()
            ),
        }
    }

    /// Resolve the acting party for a headline. Every rule is checked in
    /// order so a later match replaces an earlier one.
    pub fn resolve_actor(&self, city_upper: &str, adjective: &str, text_upper: &str) -> String {
        let mut actor = format!("{adjective} FORCES");
        for rule in &self.actor_rules {
            if rule.matches(city_upper, text_upper) {
                actor = rule.actor.clone();
            }
        }
        actor
    }
}

impl Default for IntelTables {
    fn default() -> Self {
        Self::standard()
    }
}
