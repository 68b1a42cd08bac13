use glam::{Mat4, Vec3};
use log::debug;
use roxmltree::{Document, Node};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::globals::Globals;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid shading XML: {0}")]
    Xml(#[from] roxmltree::Error),
    #[error("root element must be <shading>, found <{0}>")]
    UnexpectedRoot(String),
    #[error("<{tag}> expects 3 components, got {found:?}")]
    MissingComponents { tag: String, found: String },
    #[error("<{tag}> has invalid number {value:?}")]
    InvalidNumber { tag: String, value: String },
    #[error("<lighting> must be true/false/on/off/1/0, got {0:?}")]
    InvalidFlag(String),
}

/// Camera used to derive the view and projection matrices.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraConfig {
    pub position: Vec3,
    pub target: Vec3,
    /// Vertical field of view in degrees.
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 2.0, 6.0),
            target: Vec3::ZERO,
            fov: 60.0,
            aspect: 1.0,
            near: 0.1,
            far: 1000.0,
        }
    }
}

impl CameraConfig {
    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, Vec3::Y)
    }

    pub fn projection(&self) -> Mat4 {
        Mat4::perspective_rh(
            self.fov.to_radians(),
            self.aspect.max(0.01),
            self.near,
            self.far,
        )
    }
}

/// Host-side description of one draw's uniform state.
///
/// ```xml
/// <shading>
///     <camera>
///         <position>0 2 6</position>
///         <target>0 0 0</target>
///         <fov>60</fov>
///     </camera>
///     <light><position>15 300 15</position></light>
///     <lighting>true</lighting>
/// </shading>
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShadeConfig {
    pub camera: CameraConfig,
    pub light_position: Vec3,
    pub lighting_enabled: bool,
}

impl Default for ShadeConfig {
    fn default() -> Self {
        Self {
            camera: CameraConfig::default(),
            light_position: Vec3::new(15.0, 300.0, 15.0),
            lighting_enabled: true,
        }
    }
}

impl ShadeConfig {
    /// Parses the XML form. Missing elements keep their defaults.
    pub fn from_xml(xml: &str) -> Result<Self, ConfigError> {
        let document = Document::parse(xml)?;
        let root = document.root_element();
        if !root.has_tag_name("shading") {
            return Err(ConfigError::UnexpectedRoot(
                root.tag_name().name().to_string(),
            ));
        }

        let mut config = Self::default();
        if let Some(camera) = child(&root, "camera") {
            let cam = &mut config.camera;
            cam.position = parse_vec3(&camera, "position", cam.position)?;
            cam.target = parse_vec3(&camera, "target", cam.target)?;
            cam.fov = parse_f32(&camera, "fov", cam.fov)?;
            cam.aspect = parse_f32(&camera, "aspect", cam.aspect)?;
            cam.near = parse_f32(&camera, "near", cam.near)?;
            cam.far = parse_f32(&camera, "far", cam.far)?;
        }
        if let Some(light) = child(&root, "light") {
            config.light_position = parse_vec3(&light, "position", config.light_position)?;
        }
        if let Some(flag) = optional_text(&root, "lighting") {
            config.lighting_enabled = parse_flag(&flag)?;
        }

        debug!("loaded shading config: {config:?}");
        Ok(config)
    }

    pub fn globals(&self) -> Globals {
        Globals::new(
            self.camera.view(),
            self.camera.projection(),
            self.light_position,
            self.lighting_enabled,
        )
    }
}

fn child<'a, 'input>(node: &Node<'a, 'input>, tag: &str) -> Option<Node<'a, 'input>> {
    node.children().find(|c| c.has_tag_name(tag))
}

fn optional_text(node: &Node<'_, '_>, tag: &str) -> Option<String> {
    child(node, tag)
        .and_then(|child| child.text())
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(|text| text.to_string())
}

fn parse_number(tag: &str, value: &str) -> Result<f32, ConfigError> {
    value.parse::<f32>().map_err(|_| ConfigError::InvalidNumber {
        tag: tag.to_string(),
        value: value.to_string(),
    })
}

fn parse_vec3(node: &Node<'_, '_>, tag: &str, default: Vec3) -> Result<Vec3, ConfigError> {
    let Some(value) = optional_text(node, tag) else {
        return Ok(default);
    };
    let numbers = value
        .split_whitespace()
        .map(|component| parse_number(tag, component))
        .collect::<Result<Vec<_>, _>>()?;
    match numbers.as_slice() {
        [x, y, z] => Ok(Vec3::new(*x, *y, *z)),
        _ => Err(ConfigError::MissingComponents {
            tag: tag.to_string(),
            found: value,
        }),
    }
}

fn parse_f32(node: &Node<'_, '_>, tag: &str, default: f32) -> Result<f32, ConfigError> {
    match optional_text(node, tag) {
        Some(value) => parse_number(tag, &value),
        None => Ok(default),
    }
}

fn parse_flag(value: &str) -> Result<bool, ConfigError> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "on" | "1" => Ok(true),
        "false" | "off" | "0" => Ok(false),
        _ => Err(ConfigError::InvalidFlag(value.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
    <shading>
        <camera>
            <position>4 10 -3</position>
            <target>0 1 0</target>
            <fov>75</fov>
            <aspect>1.5</aspect>
        </camera>
        <light>
            <position>1 2 3</position>
        </light>
        <lighting>off</lighting>
    </shading>
    "#;

    #[test]
    fn parse_overrides_defaults() {
        let config = ShadeConfig::from_xml(SAMPLE).unwrap();
        assert_eq!(config.camera.position, Vec3::new(4.0, 10.0, -3.0));
        assert_eq!(config.camera.target, Vec3::new(0.0, 1.0, 0.0));
        assert_eq!(config.camera.fov, 75.0);
        assert_eq!(config.camera.aspect, 1.5);
        assert_eq!(config.camera.near, CameraConfig::default().near);
        assert_eq!(config.light_position, Vec3::new(1.0, 2.0, 3.0));
        assert!(!config.lighting_enabled);
    }

    #[test]
    fn empty_document_uses_defaults() {
        let config = ShadeConfig::from_xml("<shading/>").unwrap();
        assert_eq!(config, ShadeConfig::default());
        assert!(config.lighting_enabled);
        assert_eq!(config.light_position, Vec3::new(15.0, 300.0, 15.0));
    }

    #[test]
    fn globals_carry_camera_matrices() {
        let config = ShadeConfig::from_xml(SAMPLE).unwrap();
        let globals = config.globals();
        assert_eq!(globals.view, config.camera.view());
        assert_eq!(globals.projection, config.camera.projection());
        assert_eq!(globals.light_position, config.light_position);
        assert!(!globals.lighting_enabled);

        // the camera target lands on the view axis
        let target = globals.view.transform_point3(config.camera.target);
        assert!(target.x.abs() < 1e-5 && target.y.abs() < 1e-5 && target.z < 0.0);
    }

    #[test]
    fn short_vector_is_an_error() {
        let bad = "<shading><light><position>1 2</position></light></shading>";
        assert!(matches!(
            ShadeConfig::from_xml(bad),
            Err(ConfigError::MissingComponents { .. })
        ));
    }

    #[test]
    fn bad_number_is_an_error() {
        let bad = "<shading><camera><fov>wide</fov></camera></shading>";
        assert!(matches!(
            ShadeConfig::from_xml(bad),
            Err(ConfigError::InvalidNumber { .. })
        ));
    }

    #[test]
    fn wrong_root_is_an_error() {
        assert!(matches!(
            ShadeConfig::from_xml("<scene/>"),
            Err(ConfigError::UnexpectedRoot(name)) if name == "scene"
        ));
        assert!(matches!(
            ShadeConfig::from_xml("<shading>"),
            Err(ConfigError::Xml(_))
        ));
    }
}
