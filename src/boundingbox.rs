//! Survey bounding box in all three coordinate systems

use crate::types::{AnnotatedPoint, IndexPoint, WorldPoint};
use serde::{Deserialize, Serialize};

/// The four corners of a survey.
///
/// Corners are enumerated `(0,0), (max_i,0), (max_i,max_j), (0,max_j)`.
/// Consumers index into this order, so it is kept fixed even when the
/// world-space polygon winds clockwise.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub index: [IndexPoint; 4],
    pub annotation: [AnnotatedPoint; 4],
    pub world: [WorldPoint; 4],
}

impl BoundingBox {
    /// Index corners of a grid with the given last indices
    pub fn index_corners(max_i: i64, max_j: i64) -> [IndexPoint; 4] {
        [
            IndexPoint::new(0, 0),
            IndexPoint::new(max_i, 0),
            IndexPoint::new(max_i, max_j),
            IndexPoint::new(0, max_j),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_corner_order() {
        let corners = BoundingBox::index_corners(2, 1);
        let as_pairs: Vec<[i64; 2]> = corners.iter().map(|&p| p.into()).collect();
        assert_eq!(as_pairs, vec![[0, 0], [2, 0], [2, 1], [0, 1]]);
    }
}
