//! Declarative scene handed to the webview renderer
//!
//! The frontend builds its scene graph straight from this description:
//! camera, fog, lights, orbit controls, the cube or sphere layout and the
//! optional particle field. Only per-frame animation runs in JavaScript.

use crate::models::FACE_LABELS;
use crate::themes::{MaterialPreset, Theme};
use crate::view::{Shape, ViewSettings};
use rand::Rng;
use serde::Serialize;
use std::f32::consts::{FRAC_PI_2, PI};

pub const PARTICLE_COUNT: usize = 300;
const PARTICLE_SPREAD: f32 = 15.0;

#[derive(Debug, Clone, Serialize)]
pub struct Camera {
    pub position: [f32; 3],
    pub fov: f32,
}

#[derive(Debug, Clone, Serialize)]
pub struct Fog {
    pub color: &'static str,
    pub near: f32,
    pub far: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Light {
    Ambient {
        intensity: f32,
    },
    Point {
        position: [f32; 3],
        intensity: f32,
        color: &'static str,
    },
    Spot {
        position: [f32; 3],
        intensity: f32,
        color: &'static str,
        angle: f32,
        penumbra: f32,
    },
}

#[derive(Debug, Clone, Serialize)]
pub struct OrbitControls {
    pub enable_pan: bool,
    pub enable_zoom: bool,
    pub enable_rotate: bool,
    pub auto_rotate: bool,
    pub auto_rotate_speed: f32,
    pub min_distance: f32,
    pub max_distance: f32,
}

#[derive(Debug, Clone, Serialize)]
pub struct CubeFace {
    pub index: usize,
    pub label: &'static str,
    pub position: [f32; 3],
    pub rotation: [f32; 3],
}

/// Flat translucent box drawn on top of a face
#[derive(Debug, Clone, Serialize)]
pub struct Panel {
    pub position: [f32; 3],
    pub size: [f32; 3],
    pub color: &'static str,
    pub opacity: f32,
}

/// Small self-lit highlight mesh
#[derive(Debug, Clone, Serialize)]
pub struct Accent {
    pub position: [f32; 3],
    pub color: &'static str,
    pub emissive_intensity: f32,
}

#[derive(Debug, Clone, Serialize)]
pub struct CubeLayout {
    pub faces: Vec<CubeFace>,
    pub panel_size: [f32; 3],
    /// Base color of the selected material on each panel
    pub surface_color: &'static str,
    pub frame: Panel,
    pub label_band: Panel,
    pub label_color: &'static str,
    pub text_color: &'static str,
    pub corner_size: [f32; 3],
    pub corners: Vec<Accent>,
    pub core_radius: f32,
    pub core_color: &'static str,
    /// Radians per frame around x and y
    pub spin: [f32; 2],
}

#[derive(Debug, Clone, Serialize)]
pub struct SphereLayout {
    pub radius: f32,
    pub segments: u32,
    pub surface_color: &'static str,
    pub ring_inner: f32,
    pub ring_outer: f32,
    pub ring_color: &'static str,
    pub ring_opacity: f32,
    pub text_color: &'static str,
    pub text_distance: f32,
    /// Floating highlight orbiting beside the sphere
    pub accent: Accent,
    pub accent_radius: f32,
    pub spin: [f32; 2],
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ShapeLayout {
    Cube(CubeLayout),
    Sphere(SphereLayout),
}

#[derive(Debug, Clone, Serialize)]
pub struct ParticleField {
    pub count: usize,
    /// xyz triples
    pub positions: Vec<f32>,
    /// rgb triples in 0..1
    pub colors: Vec<f32>,
    pub size: f32,
    pub opacity: f32,
    pub spin: [f32; 2],
}

#[derive(Debug, Clone, Serialize)]
pub struct SceneDescription {
    pub theme: &'static Theme,
    pub background: &'static str,
    pub camera: Camera,
    pub fog: Fog,
    pub lights: Vec<Light>,
    pub controls: OrbitControls,
    pub material: &'static MaterialPreset,
    pub wireframe: bool,
    pub layout: ShapeLayout,
    pub particles: Option<ParticleField>,
}

const FACE_POSITIONS: [[f32; 3]; 6] = [
    [0.0, 0.0, 1.0],
    [1.0, 0.0, 0.0],
    [0.0, 1.0, 0.0],
    [0.0, 0.0, -1.0],
    [-1.0, 0.0, 0.0],
    [0.0, -1.0, 0.0],
];

const FACE_ROTATIONS: [[f32; 3]; 6] = [
    [0.0, 0.0, 0.0],
    [0.0, FRAC_PI_2, 0.0],
    [-FRAC_PI_2, 0.0, 0.0],
    [0.0, PI, 0.0],
    [0.0, -FRAC_PI_2, 0.0],
    [FRAC_PI_2, 0.0, 0.0],
];

fn lights(theme: &'static Theme, glow: bool) -> Vec<Light> {
    let mut lights = vec![
        Light::Ambient { intensity: 0.4 },
        Light::Point {
            position: [5.0, 5.0, 5.0],
            intensity: 1.5,
            color: theme.primary,
        },
        Light::Point {
            position: [-5.0, -5.0, -5.0],
            intensity: 1.0,
            color: theme.secondary,
        },
        Light::Spot {
            position: [0.0, 10.0, 0.0],
            intensity: 0.8,
            color: theme.accent,
            angle: 0.3,
            penumbra: 0.5,
        },
    ];
    if glow {
        lights.push(Light::Point {
            position: [0.0, 0.0, 5.0],
            intensity: 3.0,
            color: theme.highlight,
        });
        lights.push(Light::Point {
            position: [0.0, 0.0, -5.0],
            intensity: 2.0,
            color: theme.primary,
        });
    }
    lights
}

const CORNER_OFFSETS: [[f32; 2]; 4] = [[-0.9, 0.9], [0.9, 0.9], [-0.9, -0.9], [0.9, -0.9]];

fn cube_layout(theme: &'static Theme, speed: f32) -> CubeLayout {
    let faces = (0..FACE_POSITIONS.len())
        .map(|index| CubeFace {
            index,
            label: FACE_LABELS[index],
            position: FACE_POSITIONS[index],
            rotation: FACE_ROTATIONS[index],
        })
        .collect();
    let corners = CORNER_OFFSETS
        .iter()
        .map(|&[x, y]| Accent {
            position: [x, y, 0.08],
            color: theme.highlight,
            emissive_intensity: 0.5,
        })
        .collect();
    CubeLayout {
        faces,
        panel_size: [2.0, 2.0, 0.15],
        surface_color: theme.background,
        frame: Panel {
            position: [0.0, 0.0, 0.0],
            size: [2.05, 2.05, 0.02],
            color: theme.primary,
            opacity: 0.8,
        },
        label_band: Panel {
            position: [0.0, 0.85, 0.08],
            size: [1.8, 0.25, 0.02],
            color: theme.primary,
            opacity: 0.3,
        },
        label_color: theme.accent,
        text_color: theme.text,
        corner_size: [0.1, 0.1, 0.03],
        corners,
        core_radius: 0.3,
        core_color: theme.highlight,
        spin: [0.003 * speed, 0.005 * speed],
    }
}

fn sphere_layout(theme: &'static Theme, speed: f32) -> SphereLayout {
    SphereLayout {
        radius: 1.6,
        segments: 64,
        surface_color: theme.background,
        ring_inner: 1.61,
        ring_outer: 1.63,
        ring_color: theme.primary,
        ring_opacity: 0.6,
        text_color: theme.text,
        text_distance: 1.7,
        accent: Accent {
            position: [2.0, 0.0, 0.0],
            color: theme.highlight,
            emissive_intensity: 0.8,
        },
        accent_radius: 0.05,
        spin: [0.002 * speed, 0.005 * speed],
    }
}

/// Random particle cloud centred on the origin
pub fn particle_field<R: Rng>(rng: &mut R) -> ParticleField {
    let half = PARTICLE_SPREAD / 2.0;
    let positions = (0..PARTICLE_COUNT * 3)
        .map(|_| rng.gen_range(-half..half))
        .collect();
    let colors = (0..PARTICLE_COUNT * 3).map(|_| rng.gen::<f32>()).collect();
    ParticleField {
        count: PARTICLE_COUNT,
        positions,
        colors,
        size: 0.03,
        opacity: 0.8,
        spin: [0.001, 0.002],
    }
}

pub fn build_scene_with_rng<R: Rng>(settings: &ViewSettings, rng: &mut R) -> SceneDescription {
    let theme = settings.theme();
    let speed = settings.rotation_speed;
    let layout = match settings.shape {
        Shape::Cube => ShapeLayout::Cube(cube_layout(theme, speed)),
        Shape::Sphere => ShapeLayout::Sphere(sphere_layout(theme, speed)),
    };

    SceneDescription {
        theme,
        background: theme.background,
        camera: Camera {
            position: [0.0, 0.0, 8.0],
            fov: 60.0,
        },
        fog: Fog {
            color: theme.background,
            near: 5.0,
            far: 15.0,
        },
        lights: lights(theme, settings.effects.glow),
        controls: OrbitControls {
            enable_pan: true,
            enable_zoom: true,
            enable_rotate: true,
            auto_rotate: true,
            auto_rotate_speed: 0.5 * speed,
            min_distance: 3.0,
            max_distance: 15.0,
        },
        material: settings.material.preset(),
        wireframe: settings.effects.wireframe,
        layout,
        particles: settings.effects.particles.then(|| particle_field(rng)),
    }
}

pub fn build_scene(settings: &ViewSettings) -> SceneDescription {
    build_scene_with_rng(settings, &mut rand::thread_rng())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::themes::MaterialKind;
    use crate::view::Effect;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn scene(settings: &ViewSettings) -> SceneDescription {
        build_scene_with_rng(settings, &mut StdRng::seed_from_u64(7))
    }

    fn point_lights(scene: &SceneDescription) -> usize {
        scene
            .lights
            .iter()
            .filter(|l| matches!(l, Light::Point { .. }))
            .count()
    }

    #[test]
    fn glow_adds_two_point_lights() {
        let mut settings = ViewSettings::default();
        assert_eq!(point_lights(&scene(&settings)), 4);

        settings.effects.toggle(Effect::Glow);
        let plain = scene(&settings);
        assert_eq!(point_lights(&plain), 2);
        assert_eq!(plain.lights.len(), 4);
    }

    #[test]
    fn particles_follow_the_toggle() {
        let mut settings = ViewSettings::default();
        let field = scene(&settings).particles.unwrap();
        assert_eq!(field.positions.len(), PARTICLE_COUNT * 3);
        assert_eq!(field.colors.len(), PARTICLE_COUNT * 3);
        assert!(field.positions.iter().all(|p| p.abs() <= PARTICLE_SPREAD / 2.0));
        assert!(field.colors.iter().all(|c| (0.0..1.0).contains(c)));

        settings.effects.toggle(Effect::Particles);
        assert!(scene(&settings).particles.is_none());
    }

    #[test]
    fn cube_layout_has_six_labelled_faces() {
        let settings = ViewSettings::default();
        let ShapeLayout::Cube(cube) = scene(&settings).layout else {
            panic!("default shape is the cube");
        };
        let labels: Vec<&str> = cube.faces.iter().map(|f| f.label).collect();
        assert_eq!(labels, ["HTML", "CSS", "JS", "HTML", "CSS", "JS"]);
        assert_eq!(cube.faces[3].position, [0.0, 0.0, -1.0]);
        assert_eq!(cube.faces[3].rotation, [0.0, PI, 0.0]);
        assert_eq!(cube.frame.color, settings.theme().primary);
        assert_eq!(cube.label_band.position, [0.0, 0.85, 0.08]);
        assert_eq!(cube.corners.len(), 4);
        assert!(cube.corners.iter().all(|c| c.color == settings.theme().highlight));
    }

    #[test]
    fn theme_material_and_speed_flow_through() {
        let mut settings = ViewSettings::default();
        settings.set_theme(3).unwrap();
        settings.material = MaterialKind::Crystal;
        settings.shape = Shape::Sphere;
        settings.set_rotation_speed(2.0).unwrap();

        let scene = scene(&settings);
        assert_eq!(scene.background, "#1a0a00");
        assert_eq!(scene.fog.color, "#1a0a00");
        assert_eq!(scene.material.name, "Crystal");
        assert_eq!(scene.controls.auto_rotate_speed, 1.0);
        let ShapeLayout::Sphere(sphere) = scene.layout else {
            panic!("sphere was selected");
        };
        assert_eq!(sphere.spin, [0.004, 0.01]);
        assert_eq!(sphere.ring_color, "#ff6600");
        assert_eq!(sphere.surface_color, "#1a0a00");
        assert_eq!(sphere.accent.position, [2.0, 0.0, 0.0]);
        assert_eq!(sphere.accent.color, "#ff9900");
    }

    #[test]
    fn panels_use_the_background_color_not_the_frame_color() {
        let settings = ViewSettings::default();
        let ShapeLayout::Cube(cube) = scene(&settings).layout else {
            panic!("default shape is the cube");
        };
        assert_eq!(cube.surface_color, "#0a0a0a");
        assert_ne!(cube.surface_color, cube.frame.color);
    }

    #[test]
    fn serializes_with_kind_tags() {
        let value = serde_json::to_value(scene(&ViewSettings::default())).unwrap();
        assert_eq!(value["layout"]["kind"], "cube");
        assert_eq!(value["lights"][0]["kind"], "ambient");
        assert_eq!(value["lights"][3]["kind"], "spot");
        assert_eq!(value["material"]["shading"], "physical");
    }
}
