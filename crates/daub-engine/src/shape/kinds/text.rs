use std::rc::Rc;

use crate::coords::Transform;
use crate::draw::{DrawCmd, DrawList, TextCmd};
use crate::paint::Material;
use crate::shape::Geometry;

/// Single line of text drawn with the material's font at the shape position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Text {
    pub text: String,
}

impl Text {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl Geometry for Text {
    fn draw(&self, list: &mut DrawList, material: &Rc<Material>, transform: &Transform) {
        list.push(DrawCmd::Text(TextCmd {
            text: self.text.clone(),
            origin: transform.position,
            scale: transform.scale,
            material: Rc::clone(material),
        }));
    }
}
