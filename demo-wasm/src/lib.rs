use tether::{
    BodyHandle, NoOpStepObserver, PolygonBody, Pulley, RenderSurface, RopeConfig, RopeEnd,
    RopeId, RopeSet, StepInput, Vec2,
};
use wasm_bindgen::prelude::*;

// ---- Rope Demo ----

/// A crate swinging on a rope from the ceiling, a second rope tied to the
/// floor, and a pulley the first rope rubs against.
#[wasm_bindgen]
pub struct RopeDemo {
    ropes: RopeSet<f32>,
    bodies: Vec<PolygonBody<f32>>,
    pulleys: Vec<Pulley<f32>>,
    input: StepInput<f32>,
    hanging: RopeId,
    selected: Option<RopeId>,
}

#[wasm_bindgen]
impl RopeDemo {
    #[wasm_bindgen(constructor)]
    pub fn new(width: f32, height: f32, segments: usize) -> Result<RopeDemo, JsError> {
        let cargo = BodyHandle::new(0, 0);
        let bodies = vec![
            PolygonBody::rectangle(cargo, Vec2::new(width * 0.5, height * 0.55), 30.0, 20.0),
            PolygonBody::rectangle(BodyHandle::new(1, 0), Vec2::new(width * 0.3, height * 0.7), 40.0, 25.0)
                .with_static(true),
        ];

        let mut ropes = RopeSet::new();
        let hanging = ropes.insert(
            Vec2::new(width * 0.5, 40.0),
            Vec2::new(width * 0.5, height * 0.55 - 20.0),
            segments,
            RopeConfig::new(),
        )?;
        if let Some(rope) = ropes.get_mut(hanging) {
            rope.attach_to_body(cargo, Vec2::new(0.0, -20.0), RopeEnd::End);
        }
        ropes.insert(
            Vec2::new(width * 0.5 + 30.0, height * 0.55),
            Vec2::new(width * 0.8, height - 40.0),
            segments,
            RopeConfig::new().with_stiffness(0.8),
        )?;

        let pulleys = vec![Pulley::new(Vec2::new(width * 0.5 + 40.0, 120.0), 24.0, hanging)];

        Ok(RopeDemo {
            ropes,
            bodies,
            pulleys,
            input: StepInput::new(Vec2::new(0.0, 0.4)).with_bounds(width, height),
            hanging,
            selected: None,
        })
    }

    /// Move the cargo body; the host engine would normally do this.
    pub fn move_cargo(&mut self, x: f32, y: f32, angle: f32) {
        self.bodies[0].set_transform(Vec2::new(x, y), angle);
    }

    pub fn update(&mut self) -> f32 {
        for body in &mut self.bodies {
            body.clear_forces();
        }
        let reports = self.ropes.update(&self.input, &mut self.bodies, &mut self.pulleys, &mut NoOpStepObserver);
        reports
            .iter()
            .find(|(id, _)| *id == self.hanging)
            .map_or(0.0, |(_, r)| r.tension)
    }

    /// Select the rope under the cursor, returning whether one was hit.
    pub fn pick(&mut self, x: f32, y: f32) -> bool {
        self.selected = self.ropes.pick(Vec2::new(x, y), 8.0);
        self.selected.is_some()
    }

    pub fn rope_count(&self) -> usize {
        self.ropes.len()
    }

    /// Flat [x0, y0, x1, y1, ...] positions of the rope at `index`.
    pub fn positions(&self, index: usize) -> Vec<f32> {
        let Some(rope) = self.ropes.iter().nth(index) else {
            return Vec::new();
        };
        let mut out = Vec::with_capacity(rope.len() * 2);
        for p in rope.points() {
            out.push(p.pos.x);
            out.push(p.pos.y);
        }
        out
    }

    /// Flat path for a canvas: per command an opcode (0 move, 1 line, 2 quad)
    /// followed by control and target coordinates, then endpoint markers as
    /// opcode 3 with x, y, attached.
    pub fn path(&self, index: usize) -> Vec<f32> {
        let mut surface = FlatPath::default();
        if let Some(rope) = self.ropes.iter().nth(index) {
            rope.render(&mut surface);
        }
        surface.data
    }

    pub fn pulley_angle(&self) -> f32 {
        self.pulleys.first().map_or(0.0, |p| p.angle)
    }

    pub fn cargo_force(&self) -> Vec<f32> {
        let f = self.bodies[0].force();
        vec![f.x, f.y]
    }
}

#[derive(Default)]
struct FlatPath {
    data: Vec<f32>,
}

impl RenderSurface<f32> for FlatPath {
    fn begin_path(&mut self) {}

    fn move_to(&mut self, to: Vec2<f32>) {
        self.data.extend_from_slice(&[0.0, to.x, to.y, to.x, to.y]);
    }

    fn line_to(&mut self, to: Vec2<f32>) {
        self.data.extend_from_slice(&[1.0, to.x, to.y, to.x, to.y]);
    }

    fn quad_to(&mut self, control: Vec2<f32>, to: Vec2<f32>) {
        self.data.extend_from_slice(&[2.0, control.x, control.y, to.x, to.y]);
    }

    fn stroke(&mut self) {}

    fn endpoint_marker(&mut self, at: Vec2<f32>, attached: bool) {
        self.data.extend_from_slice(&[3.0, at.x, at.y, if attached { 1.0 } else { 0.0 }, 0.0]);
    }
}
