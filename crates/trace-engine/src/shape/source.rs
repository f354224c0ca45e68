use serde::Deserialize;

/// Target shape definition as supplied by the shape source collaborator:
/// an SVG path data string plus its declared view box.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShapeDef {
    /// SVG path data (the `d` attribute).
    pub path: String,
    /// `[min_x, min_y, width, height]`, as in an SVG viewBox.
    pub view_box: [f32; 4],
}

impl ShapeDef {
    /// Parse a shape definition from JSON. Consumed once at startup.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// A shape with no path data. Scoring against it always indicates
    /// failure, which is the required degraded behavior for bad input.
    pub fn empty() -> Self {
        Self {
            path: String::new(),
            view_box: [0.0, 0.0, 1024.0, 605.0],
        }
    }

    /// Vertical center of the view box, the axis used by the mirror flip.
    pub fn center_y(&self) -> f32 {
        self.view_box[1] + self.view_box[3] / 2.0
    }
}
