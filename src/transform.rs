use convert_case::{Case, Casing};
use itertools::Itertools;
use token_vars_core::name::dasherize;

use crate::config::Transform;

/// Category / type / item classification of a variable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes {
    pub category: Option<String>,
    pub kind: Option<String>,
    pub item: Option<String>,
}

impl Attributes {
    pub fn from_path(path: &[String]) -> Self {
        let mut segments = path.iter().cloned();
        Self {
            category: segments.next(),
            kind: segments.next(),
            item: segments.next(),
        }
    }
}

/// A single variable on its way to a stylesheet.
#[derive(Debug, Clone, PartialEq)]
pub struct Variable {
    pub path: Vec<String>,
    pub name: String,
    pub value: String,
    pub type_: String,
    pub attributes: Option<Attributes>,
}

impl Variable {
    pub fn new(path: Vec<String>, value: String, type_: String) -> Self {
        let name = kebab_name(&path);
        Self {
            path,
            name,
            value,
            type_,
            attributes: None,
        }
    }

    pub fn apply(&mut self, transform: Transform) {
        match transform {
            Transform::AttributeCti => self.attributes = Some(Attributes::from_path(&self.path)),
            Transform::NameKebab => self.name = kebab_name(&self.path),
            Transform::NameSnake => self.name = cased_name(&self.path, Case::Snake),
            Transform::NameCamel => self.name = cased_name(&self.path, Case::Camel),
            Transform::NameConstant => self.name = cased_name(&self.path, Case::UpperSnake),
            Transform::ColorCss => {
                if self.is_color() {
                    if let Some(css) = css_color(&self.value) {
                        self.value = css;
                    }
                }
            }
        }
    }

    fn is_color(&self) -> bool {
        self.type_ == "color"
            || self
                .attributes
                .as_ref()
                .and_then(|attributes| attributes.category.as_deref())
                == Some("color")
    }
}

fn kebab_name(path: &[String]) -> String {
    dasherize(&path.iter().join("-"))
}

fn cased_name(path: &[String], case: Case) -> String {
    path.iter().join(" ").to_case(case)
}

/// Opaque colors become lowercase hex, translucent ones `rgba()`.
/// Returns `None` when the value is not a color.
pub fn css_color(value: &str) -> Option<String> {
    let color = csscolorparser::parse(value).ok()?;
    if color.a >= 1.0 {
        return Some(color.to_hex_string());
    }
    let channel = |c: f64| (c * 255.0).round() as u8;
    let alpha = (color.a * 100.0).round() / 100.0;
    Some(format!(
        "rgba({}, {}, {}, {})",
        channel(color.r),
        channel(color.g),
        channel(color.b),
        alpha
    ))
}
