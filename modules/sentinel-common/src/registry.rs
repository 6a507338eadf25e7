use crate::types::Node;

/// Built-in node table: (name, country, adjective, base score, lat, lon).
const BASE_NODES: &[(&str, &str, &str, u8, &str, &str)] = &[
    ("Gaza City", "Palestinian Territories", "PALESTINIAN", 94, "31.50", "34.46"),
    ("Tel Aviv", "Israel", "ISRAELI", 82, "32.08", "34.78"),
    ("Kyiv", "Ukraine", "UKRAINIAN", 88, "50.45", "30.52"),
    ("Sydney", "Australia", "AUSTRALIAN", 12, "-33.86", "151.20"),
    ("Khartoum", "Sudan", "SUDANESE", 85, "15.50", "32.55"),
    ("Tehran", "Iran", "IRANIAN", 75, "35.68", "51.38"),
    ("Pyongyang", "North Korea", "NORTH KOREAN", 75, "39.03", "125.76"),
    ("Moscow", "Russia", "RUSSIAN", 70, "55.75", "37.61"),
    ("Lagos", "Nigeria", "NIGERIAN", 15, "6.52", "3.37"),
    ("Shanghai", "China", "CHINESE", 15, "31.23", "121.47"),
    ("Mumbai", "India", "INDIAN", 15, "19.07", "72.87"),
    ("Auckland", "New Zealand", "NEW ZEALAND", 12, "-36.85", "174.76"),
    ("London", "UK", "BRITISH", 10, "51.50", "-0.12"),
    ("New York City", "USA", "U.S.", 10, "40.71", "-74.00"),
    ("Tokyo", "Japan", "JAPANESE", 10, "35.67", "139.65"),
];

/// Ordered list of monitored nodes. Order is significant: it breaks risk ties.
#[derive(Debug, Clone)]
pub struct Registry {
    nodes: Vec<Node>,
}

impl Registry {
    pub fn new(nodes: Vec<Node>) -> Self {
        Self { nodes }
    }

    /// The built-in world grid.
    pub fn standard() -> Self {
        let nodes = BASE_NODES
            .iter()
            .map(|&(name, country, adjective, base, lat, lon)| {
                Node::new(name, country, adjective, base, lat, lon)
            })
            .collect();
        Self { nodes }
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn get(&self, name: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.name.eq_ignore_ascii_case(name))
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_standard_registry_shape() {
        let registry = Registry::standard();
        assert_eq!(registry.len(), 15);
        assert_eq!(registry.nodes()[0].name, "Gaza City");
        assert_eq!(registry.nodes()[14].name, "Tokyo");
    }

    #[test]
    fn test_names_are_unique_and_scores_bounded() {
        let registry = Registry::standard();
        let names: HashSet<&str> = registry.nodes().iter().map(|n| n.name.as_str()).collect();
        assert_eq!(names.len(), registry.len());
        assert!(registry.nodes().iter().all(|n| n.base_score <= 100));
    }

    #[test]
    fn test_get_is_case_insensitive() {
        let registry = Registry::standard();
        let node = registry.get("new york city").unwrap();
        assert_eq!(node.adjective, "U.S.");
        assert!(registry.get("Atlantis").is_none());
    }
}
