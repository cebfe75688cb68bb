//! Selectable dimensions and upsell feature categories.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One axis of carpet customization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Dimension {
    Pattern,
    Color,
    Thread,
    LearningStyle,
    League,
}

impl Dimension {
    pub const ALL: [Self; 5] = [
        Self::Pattern,
        Self::Color,
        Self::Thread,
        Self::LearningStyle,
        Self::League,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pattern => "pattern",
            Self::Color => "color",
            Self::Thread => "thread",
            Self::LearningStyle => "learningStyle",
            Self::League => "league",
        }
    }

    /// Human label used in analytics event labels (`Pattern royal`).
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pattern => "Pattern",
            Self::Color => "Color",
            Self::Thread => "Thread",
            Self::LearningStyle => "Learning style",
            Self::League => "League",
        }
    }

    /// Snake-case key used in analytics action names.
    #[must_use]
    pub const fn action_key(self) -> &'static str {
        match self {
            Self::Pattern => "pattern",
            Self::Color => "color",
            Self::Thread => "thread",
            Self::LearningStyle => "learning_style",
            Self::League => "league",
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Dimension {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pattern" => Ok(Self::Pattern),
            "color" => Ok(Self::Color),
            "thread" => Ok(Self::Thread),
            "learningStyle" | "learning-style" | "learning_style" => Ok(Self::LearningStyle),
            "league" => Ok(Self::League),
            _ => Err(()),
        }
    }
}

/// Category shown by the upsell modal when a premium gate denies a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FeatureCategory {
    Pattern,
    Color,
    Thread,
    LearningStyle,
    League,
    Journey,
}

impl FeatureCategory {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Journey => "journey",
            Self::Pattern => Dimension::Pattern.as_str(),
            Self::Color => Dimension::Color.as_str(),
            Self::Thread => Dimension::Thread.as_str(),
            Self::LearningStyle => Dimension::LearningStyle.as_str(),
            Self::League => Dimension::League.as_str(),
        }
    }
}

impl From<Dimension> for FeatureCategory {
    fn from(value: Dimension) -> Self {
        match value {
            Dimension::Pattern => Self::Pattern,
            Dimension::Color => Self::Color,
            Dimension::Thread => Self::Thread,
            Dimension::LearningStyle => Self::LearningStyle,
            Dimension::League => Self::League,
        }
    }
}

impl fmt::Display for FeatureCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dimension_strings_roundtrip() {
        for dimension in Dimension::ALL {
            assert_eq!(dimension.as_str().parse::<Dimension>(), Ok(dimension));
        }
        assert_eq!("learning-style".parse(), Ok(Dimension::LearningStyle));
        assert!("journey".parse::<Dimension>().is_err());
    }

    #[test]
    fn dimension_serializes_as_camel_case() {
        let json = serde_json::to_string(&Dimension::LearningStyle).unwrap();
        assert_eq!(json, "\"learningStyle\"");
    }

    #[test]
    fn feature_category_mirrors_dimension_keys() {
        for dimension in Dimension::ALL {
            assert_eq!(FeatureCategory::from(dimension).as_str(), dimension.as_str());
        }
        assert_eq!(FeatureCategory::Journey.to_string(), "journey");
    }
}
