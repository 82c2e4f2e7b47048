use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Visual style selector. Carries no data; `render::style::style_for`
/// maps it to the style bundle every renderer and exporter reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateVariant {
    Modern,
    Classic,
    Minimal,
}

impl TemplateVariant {
    pub const ALL: [TemplateVariant; 3] = [
        TemplateVariant::Modern,
        TemplateVariant::Classic,
        TemplateVariant::Minimal,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TemplateVariant::Modern => "modern",
            TemplateVariant::Classic => "classic",
            TemplateVariant::Minimal => "minimal",
        }
    }
}

impl fmt::Display for TemplateVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TemplateVariant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "modern" => Ok(TemplateVariant::Modern),
            "classic" => Ok(TemplateVariant::Classic),
            "minimal" => Ok(TemplateVariant::Minimal),
            other => Err(format!(
                "Unknown template variant '{other}'. Supported: modern, classic, minimal"
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_variant_is_case_insensitive() {
        assert_eq!("Modern".parse::<TemplateVariant>(), Ok(TemplateVariant::Modern));
        assert_eq!(" classic ".parse::<TemplateVariant>(), Ok(TemplateVariant::Classic));
        assert!("fancy".parse::<TemplateVariant>().is_err());
    }

    #[test]
    fn test_variant_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&TemplateVariant::Minimal).unwrap(),
            "\"minimal\""
        );
        for variant in TemplateVariant::ALL {
            assert_eq!(variant.to_string(), variant.as_str());
        }
    }
}
