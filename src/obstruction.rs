/// Axis-aligned bounding box in world coordinates
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    pub min_x: f32,
    pub min_y: f32,
    pub max_x: f32,
    pub max_y: f32,
}

impl Aabb {
    pub fn new(min_x: f32, min_y: f32, max_x: f32, max_y: f32) -> Self {
        Aabb {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Box centered on a point with the given half extents
    pub fn centered(cx: f32, cy: f32, half_w: f32, half_h: f32) -> Self {
        Aabb {
            min_x: cx - half_w,
            min_y: cy - half_h,
            max_x: cx + half_w,
            max_y: cy + half_h,
        }
    }

    pub fn center(&self) -> (f32, f32) {
        (
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }

    pub fn contains(&self, px: f32, py: f32) -> bool {
        px >= self.min_x && px <= self.max_x && py >= self.min_y && py <= self.max_y
    }

    /// Box grown by `amount` on every side
    pub fn inflated(&self, amount: f32) -> Self {
        Aabb {
            min_x: self.min_x - amount,
            min_y: self.min_y - amount,
            max_x: self.max_x + amount,
            max_y: self.max_y + amount,
        }
    }
}

/// Capsule-like shape swept between tile anchors during obstruction tests
///
/// The grid treats this as opaque; the built-in scene only uses the radius
/// (the sweep is in the ground plane).
#[derive(Clone, Copy, Debug)]
pub struct CollisionVolume {
    pub radius: f32,
    pub half_height: f32,
}

impl CollisionVolume {
    pub fn new(radius: f32, half_height: f32) -> Self {
        CollisionVolume {
            radius,
            half_height,
        }
    }
}

/// Host physics collaborator for swept obstruction tests
///
/// `sweep_blocked` returns true if anything blocks a sweep of `volume` between
/// the two anchors. Geometry inside either of the `ignore` rectangles (the
/// endpoint tiles) must not count as blocking.
pub trait CollisionScene {
    fn sweep_blocked(
        &self,
        volume: &CollisionVolume,
        from: (f32, f32),
        to: (f32, f32),
        ignore: &[Aabb; 2],
    ) -> bool;
}

/// Standalone scene of axis-aligned static blockers
#[derive(Default)]
pub struct StaticObstacleScene {
    obstacles: Vec<Aabb>,
}

impl StaticObstacleScene {
    pub fn new() -> Self {
        StaticObstacleScene {
            obstacles: Vec::new(),
        }
    }

    pub fn add_obstacle(&mut self, obstacle: Aabb) {
        self.obstacles.push(obstacle);
    }

    pub fn clear(&mut self) {
        self.obstacles.clear();
    }

    pub fn obstacles(&self) -> &[Aabb] {
        &self.obstacles
    }
}

impl CollisionScene for StaticObstacleScene {
    fn sweep_blocked(
        &self,
        volume: &CollisionVolume,
        from: (f32, f32),
        to: (f32, f32),
        ignore: &[Aabb; 2],
    ) -> bool {
        for obstacle in &self.obstacles {
            let (cx, cy) = obstacle.center();
            if ignore[0].contains(cx, cy) || ignore[1].contains(cx, cy) {
                continue;
            }

            // Sweeping a circle along a segment == segment vs inflated box
            let inflated = obstacle.inflated(volume.radius);
            if segment_intersects_aabb(from, to, &inflated) {
                return true;
            }
        }

        false
    }
}

/// Slab-method segment vs box intersection test
pub fn segment_intersects_aabb(from: (f32, f32), to: (f32, f32), aabb: &Aabb) -> bool {
    let dx = to.0 - from.0;
    let dy = to.1 - from.1;

    let mut t_min = 0.0f32;
    let mut t_max = 1.0f32;

    // X slab
    if dx.abs() < f32::EPSILON {
        if from.0 < aabb.min_x || from.0 > aabb.max_x {
            return false;
        }
    } else {
        let inv = 1.0 / dx;
        let mut t1 = (aabb.min_x - from.0) * inv;
        let mut t2 = (aabb.max_x - from.0) * inv;
        if t1 > t2 {
            std::mem::swap(&mut t1, &mut t2);
        }
        t_min = t_min.max(t1);
        t_max = t_max.min(t2);
        if t_min > t_max {
            return false;
        }
    }

    // Y slab
    if dy.abs() < f32::EPSILON {
        if from.1 < aabb.min_y || from.1 > aabb.max_y {
            return false;
        }
    } else {
        let inv = 1.0 / dy;
        let mut t1 = (aabb.min_y - from.1) * inv;
        let mut t2 = (aabb.max_y - from.1) * inv;
        if t1 > t2 {
            std::mem::swap(&mut t1, &mut t2);
        }
        t_min = t_min.max(t1);
        t_max = t_max.min(t2);
        if t_min > t_max {
            return false;
        }
    }

    true
}
