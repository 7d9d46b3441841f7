use serde::{Deserialize, Serialize};

/// On-screen rectangle of a node in device pixels, `[x1,y1][x2,y2]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bounds {
    pub x1: i64,
    pub y1: i64,
    pub x2: i64,
    pub y2: i64,
}

impl Bounds {
    pub fn width(&self) -> i64 {
        self.x2 - self.x1
    }

    pub fn height(&self) -> i64 {
        self.y2 - self.y1
    }

    /// Zero-area and inverted rectangles are not tappable.
    pub fn is_valid(&self) -> bool {
        self.width() > 0 && self.height() > 0
    }

    /// Midpoint using floor division, matching what the executor taps.
    pub fn center(&self) -> Point {
        let mid = |a: i64, b: i64| (i128::from(a) + i128::from(b)).div_euclid(2) as i64;
        Point {
            x: mid(self.x1, self.x2),
            y: mid(self.y1, self.y2),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Point {
    pub x: i64,
    pub y: i64,
}

/// A retained, normalized node of the UI hierarchy.
///
/// `id` is 1-based and dense within one extraction; it carries no meaning
/// across extractions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UiElement {
    pub id: u32,
    /// Short class name, e.g. `Button` for `android.widget.Button`.
    #[serde(rename = "type")]
    pub element_type: String,
    pub text: String,
    pub description: String,
    pub resource_id: String,
    pub center: Point,
    pub bounds: Bounds,
    pub is_clickable: bool,
    /// Derived from `focusable`; see `perception::filter`.
    pub is_editable: bool,
}

/// Result of one pass through the pipeline: the LLM-facing prompt and the
/// lossless records the executor acts on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Perception {
    pub elements: Vec<UiElement>,
    pub prompt: String,
}

impl Perception {
    pub fn empty() -> Self {
        Self {
            elements: Vec::new(),
            prompt: String::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Looks up an element by the id shown to the agent.
    pub fn element(&self, id: u32) -> Option<&UiElement> {
        self.elements.iter().find(|e| e.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn center_uses_floor_division() {
        let b = Bounds { x1: 0, y1: 0, x2: 101, y2: 51 };
        assert_eq!(b.center(), Point { x: 50, y: 25 });
    }

    #[test]
    fn degenerate_bounds_are_invalid() {
        assert!(!Bounds { x1: 10, y1: 10, x2: 10, y2: 60 }.is_valid());
        assert!(!Bounds { x1: 0, y1: 20, x2: 40, y2: 20 }.is_valid());
        assert!(!Bounds { x1: 50, y1: 0, x2: 40, y2: 20 }.is_valid());
        assert!(Bounds { x1: 0, y1: 0, x2: 1, y2: 1 }.is_valid());
    }

    #[test]
    fn element_serializes_type_field() {
        let e = UiElement {
            id: 1,
            element_type: "Button".into(),
            text: "OK".into(),
            description: String::new(),
            resource_id: "com.app:id/btn_ok".into(),
            center: Point { x: 20, y: 10 },
            bounds: Bounds { x1: 0, y1: 0, x2: 40, y2: 20 },
            is_clickable: true,
            is_editable: false,
        };
        let v = serde_json::to_value(&e).unwrap();
        assert_eq!(v["type"], "Button");
        assert_eq!(v["center"]["x"], 20);
        assert_eq!(v["is_clickable"], true);
    }
}
