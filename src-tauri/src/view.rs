//! Presentation settings chosen in the controls panel

use crate::themes::{MaterialKind, Theme, THEMES};
use serde::{Deserialize, Serialize};

pub const MIN_ROTATION_SPEED: f32 = 0.0;
pub const MAX_ROTATION_SPEED: f32 = 3.0;
/// Increment used by the -/+ buttons
pub const ROTATION_SPEED_STEP: f32 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Shape {
    #[default]
    Cube,
    Sphere,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Effect {
    Glow,
    Particles,
    Wireframe,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EffectsConfig {
    pub glow: bool,
    pub particles: bool,
    pub wireframe: bool,
}

impl Default for EffectsConfig {
    fn default() -> Self {
        Self {
            glow: true,
            particles: true,
            wireframe: false,
        }
    }
}

impl EffectsConfig {
    /// Flips one effect and returns its new value
    pub fn toggle(&mut self, effect: Effect) -> bool {
        let flag = match effect {
            Effect::Glow => &mut self.glow,
            Effect::Particles => &mut self.particles,
            Effect::Wireframe => &mut self.wireframe,
        };
        *flag = !*flag;
        *flag
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewSettings {
    pub theme_index: usize,
    pub shape: Shape,
    pub material: MaterialKind,
    pub effects: EffectsConfig,
    pub rotation_speed: f32,
}

impl Default for ViewSettings {
    fn default() -> Self {
        Self {
            theme_index: 0,
            shape: Shape::default(),
            material: MaterialKind::default(),
            effects: EffectsConfig::default(),
            rotation_speed: 1.0,
        }
    }
}

impl ViewSettings {
    pub fn theme(&self) -> &'static Theme {
        // theme_index is only ever written through set_theme
        &THEMES[self.theme_index.min(THEMES.len() - 1)]
    }

    pub fn set_theme(&mut self, index: usize) -> Result<&'static Theme, String> {
        let theme = Theme::by_index(index).ok_or_else(|| {
            format!("Theme index {} out of range (0..{})", index, THEMES.len())
        })?;
        self.theme_index = index;
        Ok(theme)
    }

    /// Stores the speed clamped into the slider range and returns it
    pub fn set_rotation_speed(&mut self, speed: f32) -> Result<f32, String> {
        if !speed.is_finite() {
            return Err("Rotation speed must be a finite number".to_string());
        }
        self.rotation_speed = speed.clamp(MIN_ROTATION_SPEED, MAX_ROTATION_SPEED);
        Ok(self.rotation_speed)
    }

    pub fn step_rotation_speed(&mut self, faster: bool) -> f32 {
        let delta = if faster {
            ROTATION_SPEED_STEP
        } else {
            -ROTATION_SPEED_STEP
        };
        self.rotation_speed = (self.rotation_speed + delta).clamp(MIN_ROTATION_SPEED, MAX_ROTATION_SPEED);
        self.rotation_speed
    }
}

/// Everything the controls panel renders from
#[derive(Debug, Clone, Serialize)]
pub struct ViewState {
    pub settings: ViewSettings,
    pub theme: &'static Theme,
    pub is_generating: bool,
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_first_launch() {
        let settings = ViewSettings::default();
        assert_eq!(settings.theme().name, "Cyberpunk");
        assert_eq!(settings.shape, Shape::Cube);
        assert_eq!(settings.material, MaterialKind::Glass);
        assert!(settings.effects.glow);
        assert!(settings.effects.particles);
        assert!(!settings.effects.wireframe);
    }

    #[test]
    fn effects_toggle_independently() {
        let mut effects = EffectsConfig::default();
        assert!(effects.toggle(Effect::Wireframe));
        assert!(effects.glow && effects.particles);
        assert!(!effects.toggle(Effect::Glow));
        assert!(effects.particles && effects.wireframe);
        assert!(effects.toggle(Effect::Glow));
    }

    #[test]
    fn set_theme_rejects_out_of_range() {
        let mut settings = ViewSettings::default();
        assert_eq!(settings.set_theme(2).unwrap().name, "Matrix Rain");
        assert_eq!(settings.theme().name, "Matrix Rain");
        assert!(settings.set_theme(6).is_err());
        assert_eq!(settings.theme_index, 2);
    }

    #[test]
    fn rotation_speed_is_clamped() {
        let mut settings = ViewSettings::default();
        assert_eq!(settings.set_rotation_speed(10.0).unwrap(), MAX_ROTATION_SPEED);
        assert_eq!(settings.set_rotation_speed(-1.0).unwrap(), MIN_ROTATION_SPEED);
        assert_eq!(settings.set_rotation_speed(1.5).unwrap(), 1.5);
        assert!(settings.set_rotation_speed(f32::NAN).is_err());
        assert_eq!(settings.rotation_speed, 1.5);
    }

    #[test]
    fn speed_buttons_step_by_half_within_range() {
        let mut settings = ViewSettings::default();
        assert_eq!(settings.step_rotation_speed(true), 1.5);
        for _ in 0..10 {
            settings.step_rotation_speed(true);
        }
        assert_eq!(settings.rotation_speed, MAX_ROTATION_SPEED);
        for _ in 0..10 {
            settings.step_rotation_speed(false);
        }
        assert_eq!(settings.rotation_speed, 0.0);
    }

    #[test]
    fn effect_names_are_lowercase() {
        let effect: Effect = serde_json::from_str("\"particles\"").unwrap();
        assert_eq!(effect, Effect::Particles);
        let shape: Shape = serde_json::from_str("\"sphere\"").unwrap();
        assert_eq!(shape, Shape::Sphere);
    }
}
