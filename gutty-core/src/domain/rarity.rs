use serde::{Deserialize, Serialize};

/// Display tier derived from a record's rarity score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RarityTier {
    Common,
    Uncommon,
    Rare,
    Epic,
    Legendary,
}

impl RarityTier {
    pub fn from_score(score: f64) -> Self {
        match score {
            s if s >= 6.0 => RarityTier::Legendary,
            s if s >= 5.0 => RarityTier::Epic,
            s if s >= 4.0 => RarityTier::Rare,
            s if s >= 3.0 => RarityTier::Uncommon,
            _ => RarityTier::Common,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RarityTier::Common => "Common",
            RarityTier::Uncommon => "Uncommon",
            RarityTier::Rare => "Rare",
            RarityTier::Epic => "Epic",
            RarityTier::Legendary => "Legendary",
        }
    }
}
