use tether::{
    NoOpStepObserver, PolygonBody, Rope, RopeConfig, RopeEnd, RopeId, StepInput, StepObserver,
    Vec2, RELAXATION_ITERATIONS,
};

fn no_bodies() -> [PolygonBody<f32>; 0] {
    []
}

fn rope(start: Vec2<f32>, end: Vec2<f32>, segments: usize) -> Rope<f32> {
    Rope::new(RopeId(0), start, end, segments, RopeConfig::default()).unwrap()
}

#[test]
fn slack_rope_without_gravity_is_untouched() {
    let mut rope = rope(Vec2::new(0.0, 0.0), Vec2::new(100.0, 0.0), 4);
    let before = rope.positions();

    rope.update(&StepInput::new(Vec2::new(0.0, 0.0)), &mut no_bodies(), &mut NoOpStepObserver);

    assert_eq!(rope.positions(), before, "slack constraints must not correct anything");
}

#[test]
fn sag_under_gravity_keeps_fixed_ends() {
    let mut rope = rope(Vec2::new(0.0, 0.0), Vec2::new(100.0, 0.0), 4);
    let before = rope.positions();

    rope.update(&StepInput::new(Vec2::new(0.0, 1.0)), &mut no_bodies(), &mut NoOpStepObserver);

    assert_eq!(rope.point(0).pos, Vec2::new(0.0, 0.0));
    assert_eq!(rope.point(4).pos, Vec2::new(100.0, 0.0));
    for i in 1..4 {
        let dy = rope.point(i).pos.y - before[i].y;
        assert!(dy > 0.0, "point {} should sag, moved {}", i, dy);
        assert!(dy <= 1.0 + 1e-6, "point {} fell further than free fall: {}", i, dy);
    }
}

#[test]
fn taut_rope_sags_less_than_free_fall() {
    let mut rope = rope(Vec2::new(0.0, 0.0), Vec2::new(100.0, 0.0), 4);
    // 200 apart is well past the 150 total rest length
    rope.set_fixed_anchor(RopeEnd::End, Vec2::new(200.0, 0.0));

    rope.update(&StepInput::new(Vec2::new(0.0, 1.0)), &mut no_bodies(), &mut NoOpStepObserver);

    assert_eq!(rope.point(4).pos, Vec2::new(200.0, 0.0));
    let dy = rope.point(3).pos.y;
    assert!(dy > 0.0 && dy < 1.0, "relaxation should pull point 3 back up, dy = {}", dy);
    for i in 1..4 {
        let y = rope.point(i).pos.y;
        assert!(y > 0.0 && y <= 1.0, "point {} out of range: {}", i, y);
    }
}

#[test]
fn hanging_rope_settles_below_anchors() {
    let mut rope = rope(Vec2::new(10.0, 10.0), Vec2::new(90.0, 10.0), 10);
    let input = StepInput::new(Vec2::new(0.0, 0.5));

    for _ in 0..300 {
        rope.update(&input, &mut no_bodies(), &mut NoOpStepObserver);
    }

    let mid = rope.point(5).pos;
    assert!(mid.y > 30.0, "middle should hang well below the anchors, y = {}", mid.y);
    assert!(
        rope.total_length() <= rope.rest_length() * 1.15,
        "settled length {} should stay near rest length {}",
        rope.total_length(),
        rope.rest_length(),
    );
}

#[test]
fn boundary_clamp_keeps_points_inside() {
    let mut rope = rope(Vec2::new(10.0, 10.0), Vec2::new(90.0, 10.0), 8);
    let input = StepInput::new(Vec2::new(0.0, 2.0)).with_bounds(100.0, 40.0);

    let mut deepest = 0.0f32;
    for _ in 0..120 {
        rope.update(&input, &mut no_bodies(), &mut NoOpStepObserver);
        for p in rope.points() {
            assert!(p.pos.y <= 35.0 + 1e-4, "point below floor margin: {}", p.pos.y);
            assert!(p.pos.x >= 5.0 - 1e-4 && p.pos.x <= 95.0 + 1e-4);
            deepest = deepest.max(p.pos.y);
        }
    }
    assert!(deepest > 30.0, "rope should reach the floor, deepest y = {}", deepest);
}

#[derive(Default)]
struct Counter {
    syncs: usize,
    integrations: usize,
    iterations: usize,
    collisions: usize,
    tensions: usize,
    completes: usize,
}

impl StepObserver<f32> for Counter {
    fn on_endpoint_sync(&mut self) { self.syncs += 1; }
    fn on_integrate(&mut self) { self.integrations += 1; }
    fn on_collision(&mut self, _point: usize) { self.collisions += 1; }
    fn on_relaxation_iteration(&mut self, _iteration: usize) { self.iterations += 1; }
    fn on_tension(&mut self, _tension: f32) { self.tensions += 1; }
    fn on_step_complete(&mut self) { self.completes += 1; }
}

#[test]
fn observer_sees_every_phase() {
    let mut rope = rope(Vec2::new(0.0, 0.0), Vec2::new(100.0, 0.0), 4);
    let mut counter = Counter::default();

    rope.update(&StepInput::new(Vec2::new(0.0, 1.0)), &mut no_bodies(), &mut counter);

    assert_eq!(counter.syncs, 1);
    assert_eq!(counter.integrations, 1);
    assert_eq!(counter.iterations, RELAXATION_ITERATIONS);
    assert_eq!(counter.iterations, 25);
    assert_eq!(counter.tensions, 1);
    assert_eq!(counter.completes, 1);
    assert_eq!(counter.collisions, 0);
}

#[test]
fn picking_follows_the_moved_rope() {
    let mut rope = rope(Vec2::new(0.0, 0.0), Vec2::new(100.0, 0.0), 4);
    assert!(rope.is_near_point(Vec2::new(50.0, 2.0), 3.0));

    let input = StepInput::new(Vec2::new(0.0, 1.0));
    for _ in 0..200 {
        rope.update(&input, &mut no_bodies(), &mut NoOpStepObserver);
    }

    assert!(!rope.is_near_point(Vec2::new(50.0, 2.0), 3.0), "rope should have sagged away");
    let mid = rope.point(2).pos;
    assert!(rope.is_near_point(mid, 0.5));
}
