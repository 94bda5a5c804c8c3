use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigEntry {
    pub key: String,
    pub value: String,
}

impl ConfigEntry {
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Reference from a stream to one processor in its chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessorRef {
    pub name: String,
    #[serde(default)]
    pub component: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stream {
    pub name: String,
    pub component: String,
    #[serde(default)]
    pub config: Vec<ConfigEntry>,
    #[serde(default)]
    pub processors: Vec<ProcessorRef>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    pub name: String,
    #[serde(default)]
    pub streams: Vec<Stream>,
}

impl Job {
    pub const TEMPLATE_NAME: &'static str = "newJobTemplate";

    /// Skeleton used by the "new job" form: one placeholder stream, nothing configured.
    pub fn new_template() -> Self {
        Self {
            name: Self::TEMPLATE_NAME.to_string(),
            streams: vec![Stream {
                name: "[Stream name]".to_string(),
                component: "comp1".to_string(),
                config: Vec::new(),
                processors: Vec::new(),
            }],
        }
    }

    pub fn first_stream(&self) -> Option<&Stream> {
        self.streams.first()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Topic {
    pub name: String,
    #[serde(default = "default_partitions")]
    pub partitions: u32,
    #[serde(default = "default_replication_factor")]
    pub replication_factor: u16,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub documentation: Option<String>,
}

fn default_partitions() -> u32 {
    1
}

fn default_replication_factor() -> u16 {
    1
}

/// Catalogue entry for a processor component that streams can reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Processor {
    pub name: String,
    pub component: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Left,
    Right,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
    pub name: String,
    pub direction: Direction,
    pub icon: String,
}

impl MenuItem {
    pub fn new(name: impl Into<String>, direction: Direction, icon: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            direction,
            icon: icon.into(),
        }
    }

    pub fn defaults() -> Vec<MenuItem> {
        vec![
            MenuItem::new("Start", Direction::Right, "play"),
            MenuItem::new("Stop", Direction::Right, "stop"),
        ]
    }
}

#[cfg(test)]
#[path = "tests/domain_tests.rs"]
mod tests;
