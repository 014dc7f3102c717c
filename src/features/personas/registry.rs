//! # Persona Registry
//!
//! Static catalog of the five personas. Built once, never mutated, safe to
//! share and read from anywhere.

use anyhow::{bail, Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Stable persona key; the same closed set the backend uses on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PersonaKey {
    Tomori,
    Anon,
    Rana,
    Soyo,
    Taki,
}

impl PersonaKey {
    /// All keys in canonical display order
    pub const ALL: [PersonaKey; 5] = [
        PersonaKey::Tomori,
        PersonaKey::Anon,
        PersonaKey::Rana,
        PersonaKey::Soyo,
        PersonaKey::Taki,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PersonaKey::Tomori => "tomori",
            PersonaKey::Anon => "anon",
            PersonaKey::Rana => "rana",
            PersonaKey::Soyo => "soyo",
            PersonaKey::Taki => "taki",
        }
    }
}

impl fmt::Display for PersonaKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PersonaKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "tomori" => Ok(PersonaKey::Tomori),
            "anon" => Ok(PersonaKey::Anon),
            "rana" => Ok(PersonaKey::Rana),
            "soyo" => Ok(PersonaKey::Soyo),
            "taki" => Ok(PersonaKey::Taki),
            other => bail!("unknown persona key '{other}'"),
        }
    }
}

/// One band member the backend can role-play as
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Persona {
    pub key: PersonaKey,
    /// Display name in the band's native script
    pub name: String,
    /// Romanized name
    pub name_romaji: String,
    /// Position in the band
    pub role: String,
    /// Theme accent color (RGB)
    pub color: u32,
    pub description: String,
    /// Avatar glyph shown next to the name
    pub avatar: String,
}

/// Static persona catalog
#[derive(Debug, Clone)]
pub struct PersonaRegistry {
    personas: HashMap<PersonaKey, Persona>,
}

impl Default for PersonaRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl PersonaRegistry {
    pub fn new() -> Self {
        let mut personas = HashMap::new();

        // Colors match each member's stage theme
        personas.insert(PersonaKey::Tomori, Persona {
            key: PersonaKey::Tomori,
            name: "高松灯".to_string(),
            name_romaji: "Takamatsu Tomori".to_string(),
            role: "主唱".to_string(),
            color: 0x7C3AED, // Tomori violet
            description: "感性细腻的\"羽丘怪女生\"，用诗意的语言表达内心".to_string(),
            avatar: "🎤".to_string(),
        });

        personas.insert(PersonaKey::Anon, Persona {
            key: PersonaKey::Anon,
            name: "千早爱音".to_string(),
            name_romaji: "Chihaya Anon".to_string(),
            role: "吉他".to_string(),
            color: 0xF59E0B, // Anon amber
            description: "元气满满的优等生，想要闪闪发光".to_string(),
            avatar: "🎸".to_string(),
        });

        personas.insert(PersonaKey::Rana, Persona {
            key: PersonaKey::Rana,
            name: "要乐奈".to_string(),
            name_romaji: "Kaname Rana".to_string(),
            role: "鼓手".to_string(),
            color: 0x10B981, // Rana emerald
            description: "神出鬼没的古怪少女，觉得一切都很有趣".to_string(),
            avatar: "🥁".to_string(),
        });

        personas.insert(PersonaKey::Soyo, Persona {
            key: PersonaKey::Soyo,
            name: "长崎素世".to_string(),
            name_romaji: "Nagasaki Soyo".to_string(),
            role: "贝斯".to_string(),
            color: 0xEC4899, // Soyo pink
            description: "温柔的大姐姐，内心渴望真正的连接".to_string(),
            avatar: "🎻".to_string(),
        });

        personas.insert(PersonaKey::Taki, Persona {
            key: PersonaKey::Taki,
            name: "椎名立希".to_string(),
            name_romaji: "Shiina Taki".to_string(),
            role: "吉他".to_string(),
            color: 0x3B82F6, // Taki blue
            description: "傲娇的独狼，嘴硬心软的乐队实际领导者".to_string(),
            avatar: "🎵".to_string(),
        });

        PersonaRegistry { personas }
    }

    pub fn get(&self, key: PersonaKey) -> Option<&Persona> {
        self.personas.get(&key)
    }

    /// All personas in canonical display order
    pub fn list(&self) -> Vec<&Persona> {
        PersonaKey::ALL
            .iter()
            .filter_map(|key| self.personas.get(key))
            .collect()
    }
}
