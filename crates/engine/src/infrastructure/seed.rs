//! Static data the authority starts from: the item catalog and the seed
//! character. Both load from JSON files when configured, otherwise built-ins.

use std::collections::BTreeMap;
use std::path::Path;

use charsheet_domain::{
    Ability, AbilityScores, CharacterId, CharacterIdentity, CharacterRecord, Item, ItemCatalog,
    ItemId, Level, Skill,
};

#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: String,
        source: serde_json::Error,
    },
    #[error("Invalid catalog: {0}")]
    Catalog(String),
}

/// Item catalog fixed at startup.
#[derive(Debug, Clone, Default)]
pub struct StaticItemCatalog {
    items: BTreeMap<ItemId, Item>,
}

impl StaticItemCatalog {
    /// Build from a list, rejecting duplicate ids.
    pub fn from_items(items: Vec<Item>) -> Result<Self, SeedError> {
        let mut map = BTreeMap::new();
        for item in items {
            let id = item.id;
            if map.insert(id, item).is_some() {
                return Err(SeedError::Catalog(format!("item id {} listed twice", id)));
            }
        }
        Ok(Self { items: map })
    }

    /// Load a JSON array of items.
    pub fn load(path: &Path) -> Result<Self, SeedError> {
        let items: Vec<Item> = read_json(path)?;
        Self::from_items(items)
    }

    pub fn builtin() -> Self {
        let items = [
            Item::new(ItemId::new(1), "Longsword", "Weapon")
                .with_description("Versatile martial blade, 1d8 slashing."),
            Item::new(ItemId::new(2), "Shortbow", "Weapon")
                .with_description("Simple ranged weapon, 1d6 piercing."),
            Item::new(ItemId::new(3), "Leather Armor", "Armor")
                .with_description("Light armor favoured by scouts."),
            Item::new(ItemId::new(4), "Potion of Healing", "Consumable")
                .with_description("Restores 2d4 + 2 hit points."),
            Item::new(ItemId::new(5), "Hempen Rope", "Gear")
                .with_description("Fifty feet of sturdy rope."),
            Item::new(ItemId::new(6), "Torch", "Gear")
                .with_description("Bright light in a 20-foot radius for one hour."),
            Item::new(ItemId::new(7), "Rations", "Consumable")
                .with_description("One day of dry travel food."),
        ];
        Self {
            items: items.into_iter().map(|item| (item.id, item)).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl ItemCatalog for StaticItemCatalog {
    fn resolve(&self, id: ItemId) -> Option<Item> {
        self.items.get(&id).cloned()
    }
}

/// Load the seed character from a JSON [`CharacterRecord`].
pub fn load_character(path: &Path) -> Result<CharacterRecord, SeedError> {
    read_json(path)
}

/// The character served when no seed file is configured.
pub fn builtin_character() -> CharacterRecord {
    let identity = CharacterIdentity {
        name: "Aria Thornwood".to_string(),
        class: "Ranger".to_string(),
        race: "Half-Elf".to_string(),
        alignment: "Neutral Good".to_string(),
    };
    let mut record = CharacterRecord::new(CharacterId::new(1), identity);
    record.level = Level::clamped(3);
    record.current_hit_points = 14;
    record.ability_scores = AbilityScores::new(12, 16, 14, 10, 13, 8);
    record.skill_proficiencies = [Skill::Perception, Skill::Stealth, Skill::Survival]
        .into_iter()
        .collect();
    record.saving_throw_proficiencies = [Ability::Strength, Ability::Dexterity]
        .into_iter()
        .collect();
    record
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, SeedError> {
    let display = path.display().to_string();
    let raw = std::fs::read_to_string(path).map_err(|source| SeedError::Io {
        path: display.clone(),
        source,
    })?;
    serde_json::from_str(&raw).map_err(|source| SeedError::Parse {
        path: display,
        source,
    })
}
