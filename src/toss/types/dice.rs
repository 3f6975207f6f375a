//! Dice-related types and components
//!
//! `DiceType` is the list entry the sequencer cycles through; `Die` is the
//! component carried by the spawned rigid body.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Component attached to the die entity
#[derive(Component)]
pub struct Die {
    pub die_type: DiceType,
    /// Outward face normals in die-local space, paired with the face value.
    pub face_normals: Vec<(Vec3, u32)>,
}

/// Marker component for the tray floor and walls
#[derive(Component)]
pub struct DiceTray;

/// All supported dice types
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DiceType {
    #[serde(rename = "d4")]
    D4,
    #[serde(rename = "d6")]
    D6,
    #[serde(rename = "d8")]
    D8,
    #[serde(rename = "d10")]
    D10,
    #[serde(rename = "d12")]
    D12,
    #[serde(rename = "d20")]
    D20,
}

impl DiceType {
    pub const ALL: [DiceType; 6] = [
        DiceType::D4,
        DiceType::D6,
        DiceType::D8,
        DiceType::D10,
        DiceType::D12,
        DiceType::D20,
    ];

    pub fn max_value(&self) -> u32 {
        match self {
            DiceType::D4 => 4,
            DiceType::D6 => 6,
            DiceType::D8 => 8,
            DiceType::D10 => 10,
            DiceType::D12 => 12,
            DiceType::D20 => 20,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            DiceType::D4 => "D4",
            DiceType::D6 => "D6",
            DiceType::D8 => "D8",
            DiceType::D10 => "D10",
            DiceType::D12 => "D12",
            DiceType::D20 => "D20",
        }
    }

    pub fn color(&self) -> Color {
        match self {
            DiceType::D4 => Color::srgb(0.3, 0.4, 0.9),
            DiceType::D6 => Color::srgb(0.85, 0.85, 0.85),
            DiceType::D8 => Color::srgb(0.6, 0.2, 0.8),
            DiceType::D10 => Color::srgb(0.2, 0.7, 0.4),
            DiceType::D12 => Color::srgb(0.95, 0.5, 0.1),
            DiceType::D20 => Color::srgb(0.85, 0.15, 0.15),
        }
    }

    pub fn parse(s: &str) -> Option<DiceType> {
        match s.trim().to_lowercase().as_str() {
            "d4" => Some(DiceType::D4),
            "d6" => Some(DiceType::D6),
            "d8" => Some(DiceType::D8),
            "d10" => Some(DiceType::D10),
            "d12" => Some(DiceType::D12),
            "d20" => Some(DiceType::D20),
            _ => None,
        }
    }

    /// Collider density used for the rigid body.
    /// Larger dice are heavier so they tumble a little less.
    pub fn density(&self) -> f32 {
        match self {
            DiceType::D4 => 1.0,
            DiceType::D6 => 1.5,
            DiceType::D8 => 1.8,
            DiceType::D10 => 2.0,
            DiceType::D12 => 2.5,
            DiceType::D20 => 3.0,
        }
    }

    /// Uniform scale applied to the mesh and collider.
    pub fn scale(&self) -> f32 {
        match self {
            DiceType::D4 => 0.9,
            DiceType::D6 => 1.0,
            DiceType::D8 => 1.0,
            DiceType::D10 => 1.05,
            DiceType::D12 => 1.1,
            DiceType::D20 => 1.2,
        }
    }
}

impl std::fmt::Display for DiceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dice_type_parse() {
        assert_eq!(DiceType::parse("d4"), Some(DiceType::D4));
        assert_eq!(DiceType::parse(" D12 "), Some(DiceType::D12));
        assert_eq!(DiceType::parse("d20"), Some(DiceType::D20));
        assert_eq!(DiceType::parse("d100"), None);
        assert_eq!(DiceType::parse(""), None);
    }

    #[test]
    fn test_parse_matches_name_for_every_type() {
        for die in DiceType::ALL {
            assert_eq!(DiceType::parse(die.name()), Some(die));
        }
    }

    #[test]
    fn test_dice_type_density_grows_with_faces() {
        for pair in DiceType::ALL.windows(2) {
            assert!(pair[0].density() < pair[1].density());
            assert!(pair[0].max_value() < pair[1].max_value());
        }
    }

    #[test]
    fn test_serde_uses_lowercase_names() {
        let text = ron::to_string(&DiceType::D10).unwrap();
        assert_eq!(text, "d10");
        let back: DiceType = ron::from_str("d6").unwrap();
        assert_eq!(back, DiceType::D6);
    }
}
