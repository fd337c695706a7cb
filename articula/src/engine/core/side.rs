use nalgebra::Vector3;

/// One of the six axis-aligned faces of a box segment.
///
/// Children attach to a face of their parent. The face also decides the joint's twist and
/// swing axes, see [`SideType::axis`] and [`SideType::swing_axis`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum SideType {
    Right,
    Left,
    Up,
    Down,
    Forward,
    Back,
}

impl SideType {
    pub const ALL: [SideType; 6] = [
        SideType::Right,
        SideType::Left,
        SideType::Up,
        SideType::Down,
        SideType::Forward,
        SideType::Back,
    ];

    /// Unit vector pointing out of this face
    pub fn direction(self) -> Vector3<f32> {
        match self {
            SideType::Right => Vector3::new(1.0, 0.0, 0.0),
            SideType::Left => Vector3::new(-1.0, 0.0, 0.0),
            SideType::Up => Vector3::new(0.0, 1.0, 0.0),
            SideType::Down => Vector3::new(0.0, -1.0, 0.0),
            SideType::Forward => Vector3::new(0.0, 0.0, 1.0),
            SideType::Back => Vector3::new(0.0, 0.0, -1.0),
        }
    }

    pub fn inverse(self) -> SideType {
        match self {
            SideType::Right => SideType::Left,
            SideType::Left => SideType::Right,
            SideType::Up => SideType::Down,
            SideType::Down => SideType::Up,
            SideType::Forward => SideType::Back,
            SideType::Back => SideType::Forward,
        }
    }

    /// Twist axis of a joint attached on this face. It runs along the limb.
    pub fn axis(self) -> SideType {
        match self {
            SideType::Right | SideType::Left => SideType::Right,
            SideType::Up | SideType::Down => SideType::Up,
            SideType::Forward | SideType::Back => SideType::Forward,
        }
    }

    /// Swing axis of a joint attached on this face.
    ///
    /// Follows X -> Y -> Z -> X, so `axis x swing_axis` is always the remaining positive axis.
    pub fn swing_axis(self) -> SideType {
        match self.axis() {
            SideType::Right => SideType::Up,
            SideType::Up => SideType::Forward,
            _ => SideType::Right,
        }
    }
}
