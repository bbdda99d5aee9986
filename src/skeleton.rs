// Ultralytics 🚀 AGPL-3.0 License - https://ultralytics.com/license

//! Skeleton hierarchy definition.
//!
//! The exported skeleton is the body subset of the `OpenPose` `BODY_25` keypoint
//! layout: 15 joints rooted at the mid-hip. Joints are identified by their
//! keypoint index, and the hierarchy is a parent mapping with exactly one root.

/// `BODY_25` joints exported to the skeleton, as `(joint, parent)` keypoint
/// index pairs in declaration order. The root has no parent.
const BODY25_PARENTS: [(usize, Option<usize>); 15] = [
    (8, None),      // MidHip (root)
    (1, Some(8)),   // Neck
    (0, Some(1)),   // Nose
    (2, Some(1)),   // RShoulder
    (3, Some(2)),   // RElbow
    (4, Some(3)),   // RWrist
    (5, Some(1)),   // LShoulder
    (6, Some(5)),   // LElbow
    (7, Some(6)),   // LWrist
    (9, Some(8)),   // RHip
    (10, Some(9)),  // RKnee
    (11, Some(10)), // RAnkle
    (12, Some(8)),  // LHip
    (13, Some(12)), // LKnee
    (14, Some(13)), // LAnkle
];

/// Joint hierarchy keyed by keypoint index.
///
/// Invariants: exactly one joint has no parent (the root), and every other
/// joint is reachable from the root through a finite parent chain. Declaration
/// order is preserved and determines child-visitation order everywhere.
#[derive(Debug, Clone)]
pub struct Skeleton {
    joints: Vec<(usize, Option<usize>)>,
}

impl Skeleton {
    /// The `BODY_25` body-joint skeleton.
    #[must_use]
    pub fn body25() -> Self {
        Self {
            joints: BODY25_PARENTS.to_vec(),
        }
    }

    /// Keypoint index of the root joint.
    ///
    /// # Panics
    ///
    /// Panics if the skeleton has no root; `body25()` always has one.
    #[must_use]
    pub fn root(&self) -> usize {
        self.joints
            .iter()
            .find(|(_, parent)| parent.is_none())
            .map(|(joint, _)| *joint)
            .expect("skeleton has a root joint")
    }

    /// Parent of `joint`, or `None` for the root and unknown indices.
    #[must_use]
    pub fn parent(&self, joint: usize) -> Option<usize> {
        self.joints
            .iter()
            .find(|(j, _)| *j == joint)
            .and_then(|(_, parent)| *parent)
    }

    /// Number of joints.
    #[must_use]
    pub fn len(&self) -> usize {
        self.joints.len()
    }

    /// Check if the skeleton has no joints.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.joints.is_empty()
    }

    /// All joint indices in declaration order.
    pub fn joints(&self) -> impl Iterator<Item = usize> + '_ {
        self.joints.iter().map(|(joint, _)| *joint)
    }

    /// Children of `joint` in declaration order.
    #[must_use]
    pub fn children(&self, joint: usize) -> Vec<usize> {
        self.joints
            .iter()
            .filter(|(_, parent)| *parent == Some(joint))
            .map(|(child, _)| *child)
            .collect()
    }

    /// Depth-first traversal order starting at the root, root included first.
    ///
    /// This single order drives both hierarchy emission and per-frame motion
    /// emission, so the channel order of the two sections matches by
    /// construction.
    #[must_use]
    pub fn traversal(&self) -> Vec<usize> {
        let mut order = Vec::with_capacity(self.joints.len());
        self.visit(self.root(), &mut order);
        order
    }

    fn visit(&self, joint: usize, order: &mut Vec<usize>) {
        order.push(joint);
        for child in self.children(joint) {
            self.visit(child, order);
        }
    }

    /// Display name of a joint in the output file.
    #[must_use]
    pub fn joint_name(&self, joint: usize) -> String {
        if joint == self.root() {
            "Hips".to_string()
        } else {
            format!("J{joint}")
        }
    }

    /// Total motion channels per frame: 6 for the root (translation +
    /// rotation), 3 rotation channels for every other joint.
    #[must_use]
    pub fn channel_count(&self) -> usize {
        6 + 3 * (self.len() - 1)
    }

    /// Highest keypoint index referenced by the skeleton.
    #[must_use]
    pub fn max_index(&self) -> usize {
        self.joints().max().unwrap_or(0)
    }
}

impl Default for Skeleton {
    fn default() -> Self {
        Self::body25()
    }
}
