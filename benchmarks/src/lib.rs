//! Scene builders shared by the collision benchmarks.

use std::collections::HashMap;

use glam::Vec2;
use rein_collide::ecs::components::{Body2d, Movement2d, Position2d};
use rein_collide::{
    AATriangle, BroadphaseKind, CollisionConfig, CollisionGroup, CollisionSystem, GridTileMap,
    NoopHandler, Rectf, Tile, TileMap, UniDirection,
};

/// Downward pull applied to every mover each tick, in pixels.
pub const GRAVITY_STEP: f32 = 6.0;

/// Deterministic xorshift so runs are comparable.
pub struct Scatter(u32);

impl Scatter {
    pub fn new(seed: u32) -> Self {
        Self(seed.max(1))
    }

    /// Uniform-ish value in `0..range`.
    pub fn next(&mut self, range: f32) -> f32 {
        self.0 ^= self.0 << 13;
        self.0 ^= self.0 >> 17;
        self.0 ^= self.0 << 5;
        (self.0 % 10_000) as f32 / 10_000.0 * range
    }
}

/// `n` small boxes spread over a square of side `extent`.
pub fn scatter_rects(n: usize, extent: f32) -> Vec<Rectf> {
    let mut scatter = Scatter::new(0x9e37_79b9);
    (0..n)
        .map(|_| {
            let pos = Vec2::new(scatter.next(extent), scatter.next(extent));
            let size = Vec2::new(8.0 + scatter.next(24.0), 8.0 + scatter.next(24.0));
            Rectf::from_pos_size(pos, size)
        })
        .collect()
}

/// A level with a floor, a ramp on each side and a one-way ledge.
pub fn setup_level(width: usize) -> anyhow::Result<GridTileMap> {
    let legend = HashMap::from([
        ('#', Tile::solid()),
        ('/', Tile::slope(AATriangle::SOUTHEAST)),
        ('\\', Tile::slope(AATriangle::SOUTHWEST)),
        ('=', Tile::unisolid(UniDirection::North)),
    ]);

    let width = width.max(8);
    let inner = width - 4;
    let mut text = String::new();
    text.push_str(&format!("#{}#\n", ".".repeat(width - 2)));
    text.push_str(&format!("#.{}.#\n", "=".repeat(inner)));
    for _ in 0..6 {
        text.push_str(&format!("#{}#\n", ".".repeat(width - 2)));
    }
    text.push_str(&format!("#\\{}/#\n", ".".repeat(inner)));
    text.push_str(&format!("{}\n", "#".repeat(width)));
    GridTileMap::parse(&text, &legend)
}

/// `n` falling movers above the level floor.
pub fn setup_crowd(n: usize, level_width: usize, kind: BroadphaseKind) -> CollisionSystem<usize> {
    let config = CollisionConfig {
        broadphase: kind,
        ..Default::default()
    };
    let mut system = CollisionSystem::new(config);
    let mut scatter = Scatter::new(0x1234_5678);
    let span = (level_width.max(8) - 2) as f32 * 32.0 - 24.0;
    for i in 0..n {
        let pos = Vec2::new(40.0 + scatter.next(span), 80.0 + scatter.next(160.0));
        let group = if i % 10 == 0 {
            CollisionGroup::MovingStatic
        } else {
            CollisionGroup::Moving
        };
        system.add(i, Rectf::from_pos_size(pos, Vec2::new(16.0, 24.0)), group);
    }
    system
}

/// Run `ticks` updates, giving every mover a gravity step and some drift first.
pub fn run_ticks(system: &mut CollisionSystem<usize>, level: &GridTileMap, ticks: usize) {
    let tilemaps: [&dyn TileMap; 1] = [level];
    let mut handler = NoopHandler;
    for tick in 0..ticks {
        let ids: Vec<_> = system.objects().map(|object| (object.id(), *object.entity())).collect();
        for (id, entity) in ids {
            let drift = if (entity + tick) % 2 == 0 { 1.5 } else { -1.5 };
            system.set_movement(id, Vec2::new(drift, GRAVITY_STEP)).ok();
        }
        system.update(&tilemaps, &mut handler);
    }
}

/// A hecs world holding `n` bodies over the level.
pub fn setup_world(n: usize, level_width: usize) -> hecs::World {
    let mut world = hecs::World::new();
    let mut scatter = Scatter::new(0xdead_beef);
    let span = (level_width.max(8) - 2) as f32 * 32.0 - 24.0;
    for _ in 0..n {
        let pos = Vec2::new(40.0 + scatter.next(span), 80.0 + scatter.next(160.0));
        world.spawn((
            Position2d(pos),
            Body2d::moving(Vec2::new(16.0, 24.0)),
            Movement2d(Vec2::new(0.0, GRAVITY_STEP)),
        ));
    }
    world
}
