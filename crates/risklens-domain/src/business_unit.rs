//! Business unit module - the closed set of organisational groupings

use crate::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Organisational grouping attached to every risk
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum BusinessUnit {
    /// Sales and account management
    Sales,
    /// Information technology
    #[serde(rename = "IT")]
    It,
    /// Finance and accounting
    Finance,
    /// Operations and supply chain
    Operations,
    /// Human resources
    #[serde(rename = "HR")]
    Hr,
}

impl BusinessUnit {
    /// Every business unit, in dashboard order
    pub const ALL: [BusinessUnit; 5] = [
        BusinessUnit::Sales,
        BusinessUnit::It,
        BusinessUnit::Finance,
        BusinessUnit::Operations,
        BusinessUnit::Hr,
    ];

    /// Get the display name
    pub fn as_str(&self) -> &'static str {
        match self {
            BusinessUnit::Sales => "Sales",
            BusinessUnit::It => "IT",
            BusinessUnit::Finance => "Finance",
            BusinessUnit::Operations => "Operations",
            BusinessUnit::Hr => "HR",
        }
    }
}

impl fmt::Display for BusinessUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for BusinessUnit {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sales" => Ok(BusinessUnit::Sales),
            "it" => Ok(BusinessUnit::It),
            "finance" => Ok(BusinessUnit::Finance),
            "operations" | "ops" => Ok(BusinessUnit::Operations),
            "hr" => Ok(BusinessUnit::Hr),
            _ => Err(DomainError::UnknownBusinessUnit(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("it".parse::<BusinessUnit>(), Ok(BusinessUnit::It));
        assert_eq!("Finance".parse::<BusinessUnit>(), Ok(BusinessUnit::Finance));
        assert_eq!("HR".parse::<BusinessUnit>(), Ok(BusinessUnit::Hr));
        assert!("Legal".parse::<BusinessUnit>().is_err());
    }

    #[test]
    fn test_serde_uses_dashboard_names() {
        let json = serde_json::to_string(&BusinessUnit::It).unwrap();
        assert_eq!(json, "\"IT\"");
        let parsed: BusinessUnit = serde_json::from_str("\"HR\"").unwrap();
        assert_eq!(parsed, BusinessUnit::Hr);
    }
}
