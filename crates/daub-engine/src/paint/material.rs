use super::Color;

/// Stroke end style.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum LineCap {
    #[default]
    Butt,
    Round,
    Square,
}

/// Font used by text shapes.
#[derive(Debug, Clone, PartialEq)]
pub struct FontSpec {
    pub family: String,
    /// Size in points.
    pub size: f32,
}

impl Default for FontSpec {
    fn default() -> Self {
        Self { family: "Arial".to_string(), size: 20.0 }
    }
}

/// Fill and stroke description shared between shapes.
///
/// Shapes hold materials behind `Rc` so any number of them can reference the
/// same instance. Nothing in the engine mutates a material during traversal.
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    pub fill: Option<Color>,
    pub stroke: Option<Color>,
    /// Stroke width in logical pixels, before the shape's scale is applied.
    pub line_width: f32,
    pub line_cap: LineCap,
    pub font: FontSpec,
}

impl Material {
    pub fn filled(color: Color) -> Self {
        Self { fill: Some(color), ..Self::default() }
    }

    pub fn stroked(color: Color, line_width: f32) -> Self {
        Self { fill: None, stroke: Some(color), line_width, ..Self::default() }
    }
}

impl Default for Material {
    fn default() -> Self {
        Self {
            fill: Some(Color::from_srgb_u8(50, 100, 0, 255)),
            stroke: None,
            line_width: 0.0,
            line_cap: LineCap::Butt,
            font: FontSpec::default(),
        }
    }
}
