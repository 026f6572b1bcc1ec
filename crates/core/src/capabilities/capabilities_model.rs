use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    LettersOfIntent,
    Messaging,
    DueDiligence,
    SavedSearches,
}

impl Capability {
    pub const ALL: [Capability; 4] = [
        Capability::LettersOfIntent,
        Capability::Messaging,
        Capability::DueDiligence,
        Capability::SavedSearches,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Capability::LettersOfIntent => "letters_of_intent",
            Capability::Messaging => "messaging",
            Capability::DueDiligence => "due_diligence",
            Capability::SavedSearches => "saved_searches",
        }
    }

    /// Human readable name used in "temporarily disabled" messages.
    pub fn label(&self) -> &'static str {
        match self {
            Capability::LettersOfIntent => "Letters of intent",
            Capability::Messaging => "Messaging",
            Capability::DueDiligence => "Due diligence",
            Capability::SavedSearches => "Saved searches",
        }
    }

    pub fn unavailable(&self) -> Error {
        Error::FeatureUnavailable(self.label().to_string())
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Capability {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_ascii_lowercase().replace('-', "_");
        Capability::ALL
            .into_iter()
            .find(|c| c.as_str() == wanted)
            .ok_or_else(|| Error::InvalidConfigValue(format!("Unknown capability '{}'", s.trim())))
    }
}

/// Capabilities enabled at startup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CapabilitySet {
    enabled: BTreeSet<Capability>,
}

impl CapabilitySet {
    pub fn new(enabled: impl IntoIterator<Item = Capability>) -> Self {
        Self {
            enabled: enabled.into_iter().collect(),
        }
    }

    /// Parses a comma-separated list such as `messaging,saved_searches`.
    pub fn parse_list(raw: &str) -> Result<Self> {
        let enabled = raw
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(Capability::from_str)
            .collect::<Result<BTreeSet<_>>>()?;
        Ok(Self { enabled })
    }

    pub fn is_enabled(&self, capability: Capability) -> bool {
        self.enabled.contains(&capability)
    }

    /// Fails with `FeatureUnavailable` when the capability is off.
    pub fn require(&self, capability: Capability) -> Result<()> {
        if self.is_enabled(capability) {
            Ok(())
        } else {
            Err(capability.unavailable())
        }
    }

    /// One entry per known capability, in declaration order.
    pub fn report(&self) -> Vec<CapabilityStatus> {
        Capability::ALL
            .into_iter()
            .map(|capability| {
                let enabled = self.is_enabled(capability);
                CapabilityStatus {
                    capability,
                    enabled,
                    message: (!enabled).then(|| capability.unavailable().to_string()),
                }
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CapabilityStatus {
    pub capability: Capability,
    pub enabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_list() {
        let set = CapabilitySet::parse_list(" messaging, due-diligence ,").unwrap();
        assert!(set.is_enabled(Capability::Messaging));
        assert!(set.is_enabled(Capability::DueDiligence));
        assert!(!set.is_enabled(Capability::LettersOfIntent));

        assert!(CapabilitySet::parse_list("").unwrap().report().iter().all(|s| !s.enabled));
        assert!(matches!(
            CapabilitySet::parse_list("teleport"),
            Err(Error::InvalidConfigValue(_))
        ));
    }

    #[test]
    fn test_require_and_report() {
        let set = CapabilitySet::new([Capability::SavedSearches]);
        assert!(set.require(Capability::SavedSearches).is_ok());
        let err = set.require(Capability::LettersOfIntent).unwrap_err();
        assert_eq!(err.to_string(), "Letters of intent is temporarily disabled");

        let report = set.report();
        assert_eq!(report.len(), Capability::ALL.len());
        let loi = &report[0];
        assert_eq!(loi.capability, Capability::LettersOfIntent);
        assert!(!loi.enabled);
        assert_eq!(
            loi.message.as_deref(),
            Some("Letters of intent is temporarily disabled")
        );
    }
}
