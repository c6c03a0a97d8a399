use serde::Deserialize;
use std::error::Error;
use std::fs;
use std::path::Path;

use contour_edit::{Brush, Fill, StencilShape};
use contour_geom::Vec2;
use contour_world::EditCommand;

/// A TOML list of `[[edits]]` applied in order.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct EditScript {
    pub edits: Vec<ScriptedEdit>,
}

/// One edit at a map-local point. Brush fields left out fall back to the
/// command-line brush.
#[derive(Debug, Deserialize)]
pub struct ScriptedEdit {
    pub x: f32,
    pub y: f32,
    pub shape: Option<StencilShape>,
    pub fill: Option<Fill>,
    pub radius: Option<i32>,
}

impl ScriptedEdit {
    pub fn command(&self, base: &Brush) -> EditCommand {
        let brush = Brush::new(
            self.shape.unwrap_or(base.shape),
            self.fill.unwrap_or(base.fill),
            self.radius.unwrap_or(base.radius),
        );
        EditCommand::new(Vec2::new(self.x, self.y), brush)
    }
}

pub fn parse_script(s: &str) -> Result<EditScript, Box<dyn Error>> {
    Ok(toml::from_str(s)?)
}

pub fn load_script(path: &Path) -> Result<EditScript, Box<dyn Error>> {
    let s = fs::read_to_string(path)
        .map_err(|e| format!("reading edit script {}: {}", path.display(), e))?;
    parse_script(&s)
}

/// Parses `X,Y` as a map-local point.
pub fn parse_point(s: &str) -> Result<Vec2, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y but got '{}'", s))?;
    let x: f32 = x.trim().parse().map_err(|e| format!("bad x in '{}': {}", s, e))?;
    let y: f32 = y.trim().parse().map_err(|e| format!("bad y in '{}': {}", s, e))?;
    Ok(Vec2::new(x, y))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn script_overrides_fall_back_to_base_brush() {
        let script = parse_script(
            "[[edits]]\nx = 0.5\ny = -0.25\n\n[[edits]]\nx = 0.0\ny = 0.0\nshape = \"circle\"\nfill = \"empty\"\nradius = 3\n",
        )
        .unwrap();
        assert_eq!(script.edits.len(), 2);
        let base = Brush::new(StencilShape::Square, Fill::Filled, 1);
        let first = script.edits[0].command(&base);
        assert_eq!(first.point, Vec2::new(0.5, -0.25));
        assert_eq!(first.brush, base);
        let second = script.edits[1].command(&base);
        assert_eq!(second.brush, Brush::new(StencilShape::Circle, Fill::Empty, 3));
    }

    #[test]
    fn empty_script_has_no_edits() {
        assert!(parse_script("").unwrap().edits.is_empty());
    }

    #[test]
    fn points_parse_with_spaces() {
        assert_eq!(parse_point(" 0.5, -1").unwrap(), Vec2::new(0.5, -1.0));
        assert!(parse_point("0.5").is_err());
        assert!(parse_point("a,1").is_err());
    }
}
