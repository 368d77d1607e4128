//! Color themes and surface material presets

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Theme {
    pub name: &'static str,
    pub background: &'static str,
    pub primary: &'static str,
    pub secondary: &'static str,
    pub accent: &'static str,
    pub text: &'static str,
    pub highlight: &'static str,
}

pub static THEMES: [Theme; 6] = [
    Theme {
        name: "Cyberpunk",
        background: "#0a0a0a",
        primary: "#00ffff",
        secondary: "#ff00ff",
        accent: "#ffff00",
        text: "#ffffff",
        highlight: "#ff0080",
    },
    Theme {
        name: "Neon Dreams",
        background: "#1a0033",
        primary: "#ff00ff",
        secondary: "#00ffff",
        accent: "#ffff00",
        text: "#ffffff",
        highlight: "#ff6600",
    },
    Theme {
        name: "Matrix Rain",
        background: "#000000",
        primary: "#00ff00",
        secondary: "#00aa00",
        accent: "#66ff66",
        text: "#ffffff",
        highlight: "#00ff88",
    },
    Theme {
        name: "Fire Code",
        background: "#1a0a00",
        primary: "#ff6600",
        secondary: "#ff0000",
        accent: "#ffff00",
        text: "#ffffff",
        highlight: "#ff9900",
    },
    Theme {
        name: "Ocean Deep",
        background: "#001a33",
        primary: "#0099ff",
        secondary: "#00ccff",
        accent: "#66ffff",
        text: "#ffffff",
        highlight: "#0066cc",
    },
    Theme {
        name: "Purple Haze",
        background: "#1a0033",
        primary: "#9966ff",
        secondary: "#cc00ff",
        accent: "#ff99ff",
        text: "#ffffff",
        highlight: "#ff00ff",
    },
];

impl Theme {
    pub fn by_index(index: usize) -> Option<&'static Theme> {
        THEMES.get(index)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaterialKind {
    #[default]
    Glass,
    Reflective,
    Matte,
    Glowing,
    Crystal,
    Metallic,
}

impl MaterialKind {
    pub const ALL: [MaterialKind; 6] = [
        MaterialKind::Glass,
        MaterialKind::Reflective,
        MaterialKind::Matte,
        MaterialKind::Glowing,
        MaterialKind::Crystal,
        MaterialKind::Metallic,
    ];

    pub fn preset(self) -> &'static MaterialPreset {
        match self {
            MaterialKind::Glass => &GLASS,
            MaterialKind::Reflective => &REFLECTIVE,
            MaterialKind::Matte => &MATTE,
            MaterialKind::Glowing => &GLOWING,
            MaterialKind::Crystal => &CRYSTAL,
            MaterialKind::Metallic => &METALLIC,
        }
    }

    /// Button swatch shown in the material picker
    pub fn option(self) -> MaterialOption {
        let (label, color) = match self {
            MaterialKind::Glass => ("Glass", "rgba(100, 200, 255, 0.3)"),
            MaterialKind::Reflective => ("Reflective", "rgba(192, 192, 192, 0.8)"),
            MaterialKind::Matte => ("Matte", "rgba(128, 128, 128, 0.9)"),
            MaterialKind::Glowing => ("Glowing", "rgba(255, 255, 100, 0.8)"),
            MaterialKind::Crystal => ("Crystal", "rgba(200, 150, 255, 0.4)"),
            MaterialKind::Metallic => ("Metallic", "rgba(180, 180, 180, 0.9)"),
        };
        MaterialOption {
            value: self,
            label,
            color,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MaterialOption {
    pub value: MaterialKind,
    pub label: &'static str,
    pub color: &'static str,
}

/// Shading model the frontend should instantiate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ShadingModel {
    Standard,
    Physical,
}

/// Physically based rendering parameters. Fields left at `None` keep the
/// renderer's own default.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MaterialPreset {
    pub name: &'static str,
    pub shading: ShadingModel,
    pub transparent: bool,
    pub opacity: f32,
    pub roughness: f32,
    pub metalness: f32,
    /// Emissive color follows the surface color when set
    pub emissive_intensity: Option<f32>,
    pub clearcoat: Option<f32>,
    pub clearcoat_roughness: Option<f32>,
    pub transmission: Option<f32>,
    pub thickness: Option<f32>,
    pub ior: Option<f32>,
    pub env_map_intensity: Option<f32>,
    pub specular_intensity: Option<f32>,
}

const OPAQUE_STANDARD: MaterialPreset = MaterialPreset {
    name: "",
    shading: ShadingModel::Standard,
    transparent: false,
    opacity: 1.0,
    roughness: 1.0,
    metalness: 0.0,
    emissive_intensity: None,
    clearcoat: None,
    clearcoat_roughness: None,
    transmission: None,
    thickness: None,
    ior: None,
    env_map_intensity: None,
    specular_intensity: None,
};

pub static GLASS: MaterialPreset = MaterialPreset {
    name: "Glass",
    shading: ShadingModel::Physical,
    transparent: true,
    opacity: 0.3,
    roughness: 0.0,
    metalness: 0.1,
    clearcoat: Some(1.0),
    clearcoat_roughness: Some(0.0),
    env_map_intensity: Some(1.5),
    transmission: Some(0.9),
    thickness: Some(0.5),
    ior: Some(1.5),
    ..OPAQUE_STANDARD
};

pub static REFLECTIVE: MaterialPreset = MaterialPreset {
    name: "Reflective",
    roughness: 0.1,
    metalness: 1.0,
    env_map_intensity: Some(2.0),
    ..OPAQUE_STANDARD
};

pub static MATTE: MaterialPreset = MaterialPreset {
    name: "Matte",
    roughness: 0.8,
    metalness: 0.1,
    ..OPAQUE_STANDARD
};

pub static GLOWING: MaterialPreset = MaterialPreset {
    name: "Glowing",
    roughness: 0.3,
    metalness: 0.2,
    emissive_intensity: Some(0.5),
    ..OPAQUE_STANDARD
};

pub static CRYSTAL: MaterialPreset = MaterialPreset {
    name: "Crystal",
    shading: ShadingModel::Physical,
    transparent: true,
    opacity: 0.6,
    roughness: 0.0,
    metalness: 0.0,
    clearcoat: Some(1.0),
    clearcoat_roughness: Some(0.0),
    transmission: Some(0.95),
    thickness: Some(1.0),
    ior: Some(2.4),
    specular_intensity: Some(1.0),
    ..OPAQUE_STANDARD
};

pub static METALLIC: MaterialPreset = MaterialPreset {
    name: "Metallic",
    roughness: 0.2,
    metalness: 0.9,
    env_map_intensity: Some(1.8),
    ..OPAQUE_STANDARD
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn theme_index_selects_the_matching_record() {
        for (i, theme) in THEMES.iter().enumerate() {
            assert_eq!(Theme::by_index(i), Some(theme));
        }
        assert_eq!(Theme::by_index(0).map(|t| t.name), Some("Cyberpunk"));
        assert_eq!(Theme::by_index(5).map(|t| t.name), Some("Purple Haze"));
        assert_eq!(Theme::by_index(THEMES.len()), None);
    }

    #[test]
    fn every_material_has_a_distinct_preset() {
        let names: Vec<&str> = MaterialKind::ALL.iter().map(|m| m.preset().name).collect();
        assert_eq!(
            names,
            ["Glass", "Reflective", "Matte", "Glowing", "Crystal", "Metallic"]
        );
        for kind in MaterialKind::ALL {
            assert_eq!(kind.option().label, kind.preset().name);
        }
    }

    #[test]
    fn transmissive_presets_are_physical_and_transparent() {
        for kind in MaterialKind::ALL {
            let preset = kind.preset();
            if preset.transmission.is_some() {
                assert_eq!(preset.shading, ShadingModel::Physical);
                assert!(preset.transparent);
                assert!(preset.opacity < 1.0);
            }
        }
        assert_eq!(MaterialKind::Crystal.preset().ior, Some(2.4));
        assert_eq!(MaterialKind::Matte.preset().transmission, None);
    }

    #[test]
    fn material_kind_uses_lowercase_names() {
        assert_eq!(serde_json::to_string(&MaterialKind::Glowing).unwrap(), "\"glowing\"");
        let kind: MaterialKind = serde_json::from_str("\"metallic\"").unwrap();
        assert_eq!(kind, MaterialKind::Metallic);
        assert!(serde_json::from_str::<MaterialKind>("\"plastic\"").is_err());
        assert_eq!(MaterialKind::default(), MaterialKind::Glass);
    }
}
