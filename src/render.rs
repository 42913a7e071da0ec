//! Backend-agnostic drawing of a rope as a smoothed curve.

use crate::anchor::RopeEnd;
use crate::float::Float;
use crate::rope::Rope;
use crate::vec::Vec2;
use alloc::vec::Vec as AllocVec;

/// One step of a 2D path, in the vocabulary of canvas-style APIs.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum PathCommand<F: Float> {
    MoveTo(Vec2<F>),
    LineTo(Vec2<F>),
    QuadTo { control: Vec2<F>, to: Vec2<F> },
}

/// Drawing target for [`Rope::render`].
pub trait RenderSurface<F: Float> {
    fn begin_path(&mut self);
    fn move_to(&mut self, to: Vec2<F>);
    fn line_to(&mut self, to: Vec2<F>);
    fn quad_to(&mut self, control: Vec2<F>, to: Vec2<F>);
    fn stroke(&mut self);
    /// Marker at a rope end; `attached` is true for body-held ends.
    fn endpoint_marker(&mut self, at: Vec2<F>, attached: bool);
}

impl<F: Float> Rope<F> {
    /// Curve through the rope points.
    ///
    /// Interior points act as quadratic control points and the curve passes
    /// through the midpoints between them, so the drawn rope has no kinks.
    pub fn smoothed_path(&self) -> AllocVec<PathCommand<F>> {
        let pts = self.points();
        let mut path = AllocVec::with_capacity(pts.len());
        let Some(first) = pts.first() else {
            return path;
        };
        path.push(PathCommand::MoveTo(first.pos));

        let n = pts.len();
        if n == 2 {
            path.push(PathCommand::LineTo(pts[1].pos));
            return path;
        }
        for i in 1..n - 2 {
            path.push(PathCommand::QuadTo {
                control: pts[i].pos,
                to: pts[i].pos.midpoint(pts[i + 1].pos),
            });
        }
        path.push(PathCommand::QuadTo {
            control: pts[n - 2].pos,
            to: pts[n - 1].pos,
        });
        path
    }

    /// Draw the rope onto `surface`. Has no effect on simulation state.
    pub fn render<S: RenderSurface<F> + ?Sized>(&self, surface: &mut S) {
        surface.begin_path();
        for cmd in self.smoothed_path() {
            match cmd {
                PathCommand::MoveTo(p) => surface.move_to(p),
                PathCommand::LineTo(p) => surface.line_to(p),
                PathCommand::QuadTo { control, to } => surface.quad_to(control, to),
            }
        }
        surface.stroke();

        for end in [RopeEnd::Start, RopeEnd::End] {
            let at = self.point(self.endpoint_index(end)).pos;
            surface.endpoint_marker(at, self.attachment(end).is_some());
        }
    }
}
