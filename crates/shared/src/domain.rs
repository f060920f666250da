use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }
    };
}

id_newtype!(ScenarioId);
id_newtype!(AtomId);

/// A position in the scenario's logical coordinate space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AtomRole {
    /// Donates electrons.
    Source,
    /// Accepts electrons up to its `target_slots`.
    Target,
    #[default]
    Bystander,
}

impl AtomRole {
    pub fn is_source(self) -> bool {
        self == Self::Source
    }

    pub fn is_target(self) -> bool {
        self == Self::Target
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Source => "氧化 (失去 e⁻)",
            Self::Target => "還原 (得到 e⁻)",
            Self::Bystander => "旁觀",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AtomState {
    pub id: AtomId,
    pub symbol: String,
    pub name: String,
    #[serde(default)]
    pub atomic_number: u32,
    pub valence_electrons: u32,
    pub max_valence: u32,
    #[serde(default)]
    pub role: AtomRole,
    pub radius: f64,
    pub color: String,
    #[serde(default = "neutral_charge")]
    pub charge: String,
    pub x: f64,
    pub y: f64,
    #[serde(default = "unit")]
    pub opacity: f64,
    #[serde(default = "unit")]
    pub scale: f64,
    #[serde(default)]
    pub target_slots: u32,
}

fn neutral_charge() -> String {
    "0".to_string()
}

fn unit() -> f64 {
    1.0
}

impl AtomState {
    pub fn center(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// True when `point` lies strictly inside the circle of `radius + margin`.
    pub fn hit_by(&self, point: Point, margin: f64) -> bool {
        self.center().distance_to(point) < self.radius + margin
    }

    /// Applies a completion override; unset fields keep their current value.
    pub fn apply_override(&mut self, rewrite: &RoleOverride) {
        if let Some(charge) = &rewrite.charge {
            self.charge = charge.clone();
        }
        if let Some(scale) = rewrite.scale {
            self.scale = scale;
        }
        if let Some(opacity) = rewrite.opacity {
            self.opacity = opacity;
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferRequirement {
    #[serde(rename = "from")]
    pub from_atom_id: AtomId,
    #[serde(rename = "to")]
    pub to_atom_id: AtomId,
    pub count: u32,
}

impl TransferRequirement {
    pub fn new(from: impl Into<String>, to: impl Into<String>, count: u32) -> Self {
        Self {
            from_atom_id: AtomId::new(from),
            to_atom_id: AtomId::new(to),
            count,
        }
    }

    pub fn key(&self) -> TransferKey {
        TransferKey::new(self.from_atom_id.clone(), self.to_atom_id.clone())
    }

    pub fn connects(&self, from: &AtomId, to: &AtomId) -> bool {
        &self.from_atom_id == from && &self.to_atom_id == to
    }
}

/// Counter key for one directed atom pair, rendered as `"from->to"`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct TransferKey {
    pub from: AtomId,
    pub to: AtomId,
}

impl TransferKey {
    pub fn new(from: AtomId, to: AtomId) -> Self {
        Self { from, to }
    }
}

impl fmt::Display for TransferKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}->{}", self.from, self.to)
    }
}

impl From<TransferKey> for String {
    fn from(value: TransferKey) -> Self {
        value.to_string()
    }
}

impl TryFrom<String> for TransferKey {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.split_once("->") {
            Some((from, to)) if !from.is_empty() && !to.is_empty() => {
                Ok(Self::new(AtomId::new(from), AtomId::new(to)))
            }
            _ => Err(format!("malformed transfer key '{value}'")),
        }
    }
}

/// Final visual state for one role once a scenario completes.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RoleOverride {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub charge: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
}

impl RoleOverride {
    pub fn new(charge: &str, scale: f64) -> Self {
        Self {
            charge: Some(charge.to_string()),
            scale: Some(scale),
            opacity: None,
        }
    }

    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = Some(opacity);
        self
    }
}

/// Per-scenario completion rewrite, keyed by role. Bystanders are never rewritten.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CompletionTransform {
    #[serde(default)]
    pub source: RoleOverride,
    #[serde(default)]
    pub target: RoleOverride,
}

impl CompletionTransform {
    pub fn for_role(&self, role: AtomRole) -> Option<&RoleOverride> {
        match role {
            AtomRole::Source => Some(&self.source),
            AtomRole::Target => Some(&self.target),
            AtomRole::Bystander => None,
        }
    }
}

#[cfg(test)]
#[path = "tests/domain_tests.rs"]
mod tests;
