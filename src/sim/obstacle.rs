//! Obstacles and the field that spawns and recycles them
//!
//! Obstacles stand on the ground and scroll left at a constant speed. The
//! field keeps them in spawn order, which is also left-to-right order, and
//! tops the row back up to capacity whenever one scrolls off screen.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::geometry::Rect;
use crate::Tuning;
use crate::consts::MAX_OBSTACLES;

/// A single obstacle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    /// Left edge in scene space
    pub offset: f32,
    pub width: f32,
    /// Fixed at spawn
    pub height: f32,
}

impl Obstacle {
    pub fn new(id: u32, offset: f32, width: f32, height: f32) -> Self {
        Self {
            id,
            offset,
            width,
            height,
        }
    }

    /// Scroll left by `speed`
    #[inline]
    pub fn tick(&mut self, speed: f32) {
        self.offset -= speed;
    }

    /// True once the right edge has passed the left side of the screen
    #[inline]
    pub fn is_offscreen(&self) -> bool {
        self.offset + self.width <= 0.0
    }

    pub fn bounding_rect(&self) -> Rect {
        Rect::new(self.offset, 0.0, self.width, self.height)
    }
}

/// Display snapshot of an obstacle, emitted with `ObstacleSetChanged`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObstacleView {
    pub id: u32,
    pub offset: f32,
    pub height: f32,
}

impl From<&Obstacle> for ObstacleView {
    fn from(obstacle: &Obstacle) -> Self {
        Self {
            id: obstacle.id,
            offset: obstacle.offset,
            height: obstacle.height,
        }
    }
}

/// Capacity for a viewport: one obstacle per `min_spacing`, clamped to
/// `1..=MAX_OBSTACLES`
pub fn capacity_for(viewport_width: f32, min_spacing: f32) -> usize {
    if !viewport_width.is_finite() || viewport_width <= 0.0 || min_spacing <= 0.0 {
        return 1;
    }
    let slots = (viewport_width / min_spacing).ceil();
    if !slots.is_finite() || slots >= MAX_OBSTACLES as f32 {
        return MAX_OBSTACLES;
    }
    (slots as usize).clamp(1, MAX_OBSTACLES)
}

/// The row of obstacles
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObstacleField {
    /// Left-to-right, in spawn order
    pub obstacles: Vec<Obstacle>,
    pub capacity: usize,
    pub viewport_width: f32,
    width: f32,
    height_min: f32,
    height_max: f32,
    scroll_speed: f32,
    min_spacing: f32,
    spacing_jitter: f32,
    rng: Pcg32,
    next_id: u32,
}

impl ObstacleField {
    /// Create an empty field sized for `viewport_width`
    pub fn new(seed: u64, viewport_width: f32, tuning: &Tuning) -> Self {
        Self {
            obstacles: Vec::new(),
            capacity: capacity_for(viewport_width, tuning.min_spacing),
            viewport_width: sanitize_width(viewport_width),
            width: tuning.obstacle_width,
            height_min: tuning.obstacle_height_min,
            height_max: tuning.obstacle_height_max,
            scroll_speed: tuning.scroll_speed,
            min_spacing: tuning.min_spacing,
            spacing_jitter: tuning.spacing_jitter,
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
        }
    }

    /// Recompute capacity after a resize.
    ///
    /// Existing obstacles are kept even if they now exceed capacity; spawning
    /// simply pauses until the count drops below it.
    pub fn set_capacity(&mut self, viewport_width: f32) {
        self.viewport_width = sanitize_width(viewport_width);
        self.capacity = capacity_for(viewport_width, self.min_spacing);
    }

    pub fn len(&self) -> usize {
        self.obstacles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.obstacles.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Obstacle> {
        self.obstacles.iter()
    }

    /// Spawn obstacles until the field is at capacity
    pub fn replenish(&mut self) {
        while self.obstacles.len() < self.capacity {
            let offset = match self.obstacles.last().map(|o| o.offset) {
                Some(prev) => prev + self.min_spacing + self.jitter(),
                None => self.viewport_width,
            };
            let height = self.spawn_height();
            let id = self.next_id;
            self.next_id += 1;
            self.obstacles
                .push(Obstacle::new(id, offset, self.width, height));
        }
    }

    /// Scroll every obstacle, drop the ones that left the screen, then refill
    pub fn tick(&mut self) {
        let speed = self.scroll_speed;
        for obstacle in &mut self.obstacles {
            obstacle.tick(speed);
        }
        self.obstacles.retain(|o| !o.is_offscreen());
        self.replenish();
    }

    /// First obstacle whose rectangle overlaps `rect`
    pub fn first_overlapping(&self, rect: &Rect) -> Option<&Obstacle> {
        self.obstacles
            .iter()
            .find(|o| o.bounding_rect().overlaps(rect))
    }

    pub fn views(&self) -> Vec<ObstacleView> {
        self.obstacles.iter().map(ObstacleView::from).collect()
    }

    fn jitter(&mut self) -> f32 {
        if self.spacing_jitter > 0.0 {
            self.rng.random_range(0.0..=self.spacing_jitter)
        } else {
            0.0
        }
    }

    fn spawn_height(&mut self) -> f32 {
        if self.height_max > self.height_min {
            self.rng.random_range(self.height_min..=self.height_max)
        } else {
            self.height_min
        }
    }
}

fn sanitize_width(viewport_width: f32) -> f32 {
    if viewport_width.is_finite() {
        viewport_width.max(0.0)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn field(seed: u64, width: f32) -> ObstacleField {
        ObstacleField::new(seed, width, &Tuning::default())
    }

    #[test]
    fn test_capacity_from_viewport() {
        assert_eq!(capacity_for(1280.0, 400.0), 4);
        assert_eq!(capacity_for(1200.0, 400.0), 3);
        assert_eq!(capacity_for(1.0, 400.0), 1);
        assert_eq!(capacity_for(0.0, 400.0), 1);
        assert_eq!(capacity_for(-50.0, 400.0), 1);
        assert_eq!(capacity_for(f32::NAN, 400.0), 1);
    }

    #[test]
    fn test_capacity_is_capped() {
        assert_eq!(capacity_for(f32::MAX, 400.0), MAX_OBSTACLES);
        assert_eq!(capacity_for(f32::INFINITY, 400.0), 1);
        assert_eq!(capacity_for(4.0e8, 400.0), MAX_OBSTACLES);
        assert_eq!(capacity_for(1280.0, 1e-30), MAX_OBSTACLES);
    }

    #[test]
    fn test_huge_resize_keeps_field_bounded() {
        let mut field = field(4, 1280.0);
        field.replenish();
        field.set_capacity(4.0e8);
        field.tick();
        assert_eq!(field.capacity, MAX_OBSTACLES);
        assert_eq!(field.len(), MAX_OBSTACLES);
    }

    #[test]
    fn test_first_spawn_at_viewport_edge() {
        let mut field = field(7, 800.0);
        field.replenish();
        assert_eq!(field.len(), 2);
        assert_eq!(field.obstacles[0].offset, 800.0);
        let gap = field.obstacles[1].offset - field.obstacles[0].offset;
        assert!((400.0..=700.0).contains(&gap));
    }

    #[test]
    fn test_spawn_heights_in_range() {
        let mut field = field(3, 4000.0);
        field.replenish();
        for obstacle in field.iter() {
            assert!((50.0..=150.0).contains(&obstacle.height));
            assert_eq!(obstacle.width, 50.0);
        }
    }

    #[test]
    fn test_ids_are_unique_and_increasing() {
        let mut field = field(11, 1280.0);
        for _ in 0..1000 {
            field.tick();
        }
        let ids: Vec<u32> = field.iter().map(|o| o.id).collect();
        assert!(ids.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_tick_scrolls_by_constant_speed() {
        let mut field = field(1, 400.0);
        field.replenish();
        field.tick();
        assert_eq!(field.obstacles[0].offset, 400.0 - 7.5);
    }

    #[test]
    fn test_offscreen_obstacles_removed_once_in_order() {
        let mut field = field(5, 400.0);
        field.capacity = 0;
        field.obstacles = vec![
            Obstacle::new(1, -45.0, 50.0, 60.0),
            Obstacle::new(2, -44.0, 50.0, 60.0),
            Obstacle::new(3, 100.0, 50.0, 60.0),
            Obstacle::new(4, -49.0, 50.0, 60.0),
            Obstacle::new(5, 300.0, 50.0, 60.0),
        ];
        field.tick();
        // Adjacent removals must not skip a neighbour
        let ids: Vec<u32> = field.iter().map(|o| o.id).collect();
        assert_eq!(ids, vec![3, 5]);
    }

    #[test]
    fn test_offscreen_boundary() {
        assert!(Obstacle::new(1, -50.0, 50.0, 10.0).is_offscreen());
        assert!(!Obstacle::new(1, -49.9, 50.0, 10.0).is_offscreen());
    }

    #[test]
    fn test_respawn_after_empty_uses_viewport_edge() {
        let mut field = field(9, 400.0);
        field.replenish();
        field.obstacles.clear();
        field.replenish();
        assert_eq!(field.obstacles[0].offset, 400.0);
    }

    #[test]
    fn test_shrink_does_not_truncate() {
        let mut field = field(2, 1600.0);
        field.replenish();
        assert_eq!(field.len(), 4);

        field.set_capacity(400.0);
        assert_eq!(field.capacity, 1);
        field.replenish();
        assert_eq!(field.len(), 4);
    }

    #[test]
    fn test_grow_spawns_after_last() {
        let mut field = field(2, 400.0);
        field.replenish();
        field.set_capacity(1200.0);
        field.replenish();
        assert_eq!(field.len(), 3);
        assert_eq!(field.obstacles[0].offset, 400.0);
        assert!(field.obstacles[2].offset > field.obstacles[1].offset);
    }

    #[test]
    fn test_zero_jitter_spacing_is_exact() {
        let tuning = Tuning {
            spacing_jitter: 0.0,
            ..Default::default()
        };
        let mut field = ObstacleField::new(0, 1200.0, &tuning);
        field.replenish();
        let offsets: Vec<f32> = field.iter().map(|o| o.offset).collect();
        assert_eq!(offsets, vec![1200.0, 1600.0, 2000.0]);
    }

    #[test]
    fn test_same_seed_same_field() {
        let mut a = field(42, 1280.0);
        let mut b = field(42, 1280.0);
        for _ in 0..500 {
            a.tick();
            b.tick();
        }
        assert_eq!(a.obstacles, b.obstacles);
    }

    #[test]
    fn test_spacing_across_many_seeds() {
        for seed in 0..10_000u64 {
            let mut field = field(seed, 1280.0);
            field.replenish();
            for pair in field.obstacles.windows(2) {
                assert!(pair[1].offset - pair[0].offset >= 400.0 - 1e-3);
            }
        }
    }

    proptest! {
        #[test]
        fn prop_never_exceeds_capacity(seed in any::<u64>(), width in 1.0f32..5000.0, ticks in 0usize..400) {
            let mut field = field(seed, width);
            field.replenish();
            prop_assert!(field.len() <= field.capacity);
            for _ in 0..ticks {
                field.tick();
                prop_assert!(field.len() <= field.capacity);
            }
        }

        #[test]
        fn prop_spacing_holds_while_scrolling(seed in any::<u64>(), ticks in 0usize..600) {
            let mut field = field(seed, 1280.0);
            field.replenish();
            for _ in 0..ticks {
                field.tick();
            }
            for pair in field.obstacles.windows(2) {
                prop_assert!(pair[1].offset - pair[0].offset >= 400.0 - 1e-3);
            }
        }
    }
}
