use serde::{Deserialize, Serialize};

use crate::datatypes::MAX_NESTING_DEPTH;

/// Options for writing the serialized form of a geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SerializeOptions {
    /// Whether to store the planar extent in the header of non-empty, non-point values.
    pub write_bounding_box: bool,

    /// Geometry collections nested deeper than this are rejected.
    pub max_nesting_depth: usize,
}

impl Default for SerializeOptions {
    fn default() -> Self {
        Self {
            write_bounding_box: true,
            max_nesting_depth: MAX_NESTING_DEPTH,
        }
    }
}

/// Options for reading the serialized form of a geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeserializeOptions {
    /// Geometry collections nested deeper than this are rejected.
    pub max_nesting_depth: usize,
}

impl Default for DeserializeOptions {
    fn default() -> Self {
        Self {
            max_nesting_depth: MAX_NESTING_DEPTH,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn options_from_json() {
        let options: SerializeOptions =
            serde_json::from_str(r#"{"write_bounding_box": false, "max_nesting_depth": 8}"#)
                .unwrap();
        assert!(!options.write_bounding_box);
        assert_eq!(options.max_nesting_depth, 8);

        let json = serde_json::to_string(&DeserializeOptions::default()).unwrap();
        assert_eq!(json, r#"{"max_nesting_depth":256}"#);
    }
}
