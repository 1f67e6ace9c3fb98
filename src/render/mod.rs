//! Drawing support for towns
//!
//! The town is turned into a flat list of coloured shapes that any
//! `RenderContext` can replay. This module is READ-ONLY - it never modifies
//! town state, and it owns no canvas or pixel state.

pub mod colors;

use serde::Serialize;

use crate::core::types::Vec2;
use crate::town::district::{District, DistrictType};
use crate::town::state::Town;

pub use colors::Colour;

/// Production symbol size relative to the district radius
const PRODUCTION_BAR_LENGTH: f64 = 1.5;
const PRODUCTION_BAR_WIDTH: f64 = 0.25;

/// Number of diameters drawn across a transport district
const TRANSPORT_SPOKES: usize = 4;

/// Primitive shapes a renderer must be able to draw
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub enum Shape {
    Circle { center: Vec2, radius: f64 },
    Line { a: Vec2, b: Vec2 },
    Quadrilateral([Vec2; 4]),
}

/// A shape together with the colour to draw it in
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DrawCommand {
    pub colour: Colour,
    pub shape: Shape,
}

/// Draw target implemented by the UI layer
pub trait RenderContext {
    fn set_colour(&mut self, colour: Colour);
    fn draw_circle(&mut self, center: Vec2, radius: f64);
    fn draw_line(&mut self, a: Vec2, b: Vec2);
    fn draw_quadrilateral(&mut self, corners: [Vec2; 4]);

    fn draw_shape(&mut self, shape: &Shape) {
        match *shape {
            Shape::Circle { center, radius } => self.draw_circle(center, radius),
            Shape::Line { a, b } => self.draw_line(a, b),
            Shape::Quadrilateral(corners) => self.draw_quadrilateral(corners),
        }
    }
}

/// Collects the draw list for a town into a reusable buffer.
/// Links come first so districts are drawn over their ends.
pub fn collect_shapes(town: &Town, buffer: &mut Vec<DrawCommand>) {
    buffer.clear();

    let highlighted = town.highlighted_links();
    for link in town.links() {
        let (Some(a), Some(b)) = (town.get_district(link.uid0()), town.get_district(link.uid1())) else {
            continue;
        };
        buffer.push(DrawCommand {
            colour: colors::link_colour(highlighted.contains(link)),
            shape: Shape::Line {
                a: a.position(),
                b: b.position(),
            },
        });
    }

    for district in town.districts() {
        let colour = colors::district_colour(district);
        buffer.extend(
            district_shapes(district)
                .into_iter()
                .map(|shape| DrawCommand { colour, shape }),
        );
    }
}

/// Shapes making up one district's symbol
pub fn district_shapes(district: &District) -> Vec<Shape> {
    let center = district.position();
    let radius = district.radius();
    let mut shapes = vec![Shape::Circle { center, radius }];

    match district.district_type() {
        DistrictType::Housing => {}
        DistrictType::Transport => {
            for i in 0..TRANSPORT_SPOKES {
                let angle = i as f64 * std::f64::consts::PI / TRANSPORT_SPOKES as f64;
                let offset = Vec2::new(angle.cos(), angle.sin()) * radius;
                shapes.push(Shape::Line {
                    a: center - offset,
                    b: center + offset,
                });
            }
        }
        DistrictType::Production => {
            let half_length = PRODUCTION_BAR_LENGTH * radius / 2.0;
            let half_width = PRODUCTION_BAR_WIDTH * radius / 2.0;
            shapes.push(Shape::Quadrilateral([
                center + Vec2::new(-half_length, -half_width),
                center + Vec2::new(half_length, -half_width),
                center + Vec2::new(half_length, half_width),
                center + Vec2::new(-half_length, half_width),
            ]));
        }
    }
    shapes
}

/// Replay a town's draw list on a render context
pub fn render<R: RenderContext>(town: &Town, ctx: &mut R) {
    let mut commands = Vec::new();
    collect_shapes(town, &mut commands);

    let mut current = None;
    for command in &commands {
        if current != Some(command.colour) {
            ctx.set_colour(command.colour);
            current = Some(command.colour);
        }
        ctx.draw_shape(&command.shape);
    }
}
