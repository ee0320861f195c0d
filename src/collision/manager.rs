use std::f64::consts::FRAC_1_SQRT_2;

use crate::collision::toi;
use crate::collision::{ColliderId, ContactEvent};
use crate::geometry::{BoundingBox, Circle, Polygon, Shape, Terrain};
use crate::grid::cell_to_world;
use crate::math::Vec2;
use crate::objects::Body;
use crate::particles::ParticleBatch;

/// Distance a reprojected particle is placed outside the surface it hit.
pub const CONTACT_OFFSET: f64 = 1.0e-3;

/// Common scale applied to every particle damping factor.
const DAMPING_SCALE: f64 = FRAC_1_SQRT_2;

const CIRCLE_DAMP_TANG: f64 = 1.0;
const CIRCLE_DAMP_ORTH: f64 = 0.5;
const POLYGON_DAMP_TANG: f64 = 1.0;
const POLYGON_DAMP_ORTH: f64 = 0.5;
const TERRAIN_DAMP_TANG: f64 = 0.5;
const TERRAIN_DAMP_ORTH: f64 = 0.5;

/// Continuous collision detection over borrowed collections.
///
/// The manager owns no scene data: dynamic objects, static objects and
/// particle batches are lent to it for the duration of `detect_collisions`.
/// Rigid bodies are never mutated; reacting to their contacts is left to a
/// pluggable response hook. Particles are reprojected in place.
///
/// All coordinates are reconciled across grid cells: a pair in neighbouring
/// cells is tested with one side shifted by the world offset between the
/// cells.
pub struct CollisionManager<'a> {
    dynamic_objects: &'a [Body],
    static_objects: &'a [Body],
    particles: &'a mut [ParticleBatch],
    response: Option<Box<dyn FnMut(&ContactEvent) + 'a>>,
}

impl<'a> Default for CollisionManager<'a> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> CollisionManager<'a> {
    pub fn new() -> Self {
        Self {
            dynamic_objects: &[],
            static_objects: &[],
            particles: &mut [],
            response: None,
        }
    }

    pub fn set_dynamic_objects(&mut self, objects: &'a [Body]) {
        self.dynamic_objects = objects;
    }

    pub fn set_static_objects(&mut self, objects: &'a [Body]) {
        self.static_objects = objects;
    }

    pub fn set_particles(&mut self, particles: &'a mut [ParticleBatch]) {
        self.particles = particles;
    }

    /// Installs a hook invoked once per contact event after detection. What
    /// a contact does to the involved bodies is entirely the hook's policy.
    pub fn set_response_hook(&mut self, hook: impl FnMut(&ContactEvent) + 'a) {
        self.response = Some(Box::new(hook));
    }

    /// Runs broad and narrow phase over all lent collections and returns one
    /// event per colliding pair: the earliest contact within the step.
    /// Particles that hit a surface are reprojected in place.
    pub fn detect_collisions(&mut self) -> Vec<ContactEvent> {
        let mut events = Vec::new();
        let dynamics = self.dynamic_objects;
        let statics = self.static_objects;

        for i in 0..dynamics.len() {
            for j in (i + 1)..dynamics.len() {
                collect_pair(
                    &dynamics[i],
                    ColliderId::Dynamic(i),
                    &dynamics[j],
                    ColliderId::Dynamic(j),
                    &mut events,
                );
            }
            for (j, stat) in statics.iter().enumerate() {
                collect_pair(
                    &dynamics[i],
                    ColliderId::Dynamic(i),
                    stat,
                    ColliderId::Static(j),
                    &mut events,
                );
            }
        }

        for (bi, batch) in self.particles.iter_mut().enumerate() {
            for (oi, body) in dynamics.iter().enumerate() {
                test_particles_against_body(body, ColliderId::Dynamic(oi), bi, batch, &mut events);
            }
            for (oi, body) in statics.iter().enumerate() {
                test_particles_against_body(body, ColliderId::Static(oi), bi, batch, &mut events);
            }
        }

        if let Some(hook) = self.response.as_mut() {
            for event in &events {
                hook(event);
            }
        }
        events
    }
}

fn collect_pair(
    a: &Body,
    id_a: ColliderId,
    b: &Body,
    id_b: ColliderId,
    events: &mut Vec<ContactEvent>,
) {
    if a.depth_layers & b.depth_layers == 0 {
        return;
    }
    // Rigid shapes never span more than one cell, so anything beyond the
    // direct neighbourhood cannot touch.
    if !a.swept_bounding_box().overlaps(b.swept_bounding_box(), 1) {
        return;
    }
    if let Some((t, point)) = body_pair_contact(a, b) {
        events.push(ContactEvent {
            a: id_a,
            b: id_b,
            time: t,
            point,
            cell: a.cell(),
        });
    }
}

/// Earliest contact between two bodies across all of their shape pairs, in
/// the cell frame of `a`. Ties keep the first pair in iteration order.
fn body_pair_contact(a: &Body, b: &Body) -> Option<(f64, Vec2)> {
    let offset_b = cell_to_world(b.cell() - a.cell());
    let mut best: Option<(f64, Vec2)> = None;
    for sa in a.shapes() {
        for sb in b.shapes() {
            let candidate = match (sa.current(), sa.buffered(), sb.current(), sb.buffered()) {
                (Shape::Circle(a1), Shape::Circle(a0), Shape::Circle(b1), Shape::Circle(b0)) => {
                    circle_circle_contact(a0, a1, b0, b1, offset_b)
                }
                (Shape::Circle(c1), Shape::Circle(c0), Shape::Polygon(p1), Shape::Polygon(p0)) => {
                    circle_polygon_contact(c0, c1, Vec2::ZERO, p0, p1, offset_b)
                }
                (Shape::Polygon(p1), Shape::Polygon(p0), Shape::Circle(c1), Shape::Circle(c0)) => {
                    circle_polygon_contact(c0, c1, offset_b, p0, p1, Vec2::ZERO)
                }
                (Shape::Polygon(a1), Shape::Polygon(a0), Shape::Polygon(b1), Shape::Polygon(b0)) => {
                    // Vertices of each polygon against the edges of the other
                    min_contact(
                        polygon_polygon_contact(a0, a1, Vec2::ZERO, b0, b1, offset_b),
                        polygon_polygon_contact(b0, b1, offset_b, a0, a1, Vec2::ZERO),
                    )
                }
                // Terrain and planet narrow phases against rigid bodies are
                // not implemented: no contact by definition.
                _ => None,
            };
            best = min_contact(best, candidate);
        }
    }
    best.filter(|&(t, _)| t <= 1.0)
}

fn min_contact(a: Option<(f64, Vec2)>, b: Option<(f64, Vec2)>) -> Option<(f64, Vec2)> {
    match (a, b) {
        (Some(x), Some(y)) => {
            if y.0 < x.0 {
                Some(y)
            } else {
                Some(x)
            }
        }
        (Some(x), None) => Some(x),
        (None, y) => y,
    }
}

fn circle_circle_contact(
    a0: &Circle,
    a1: &Circle,
    b0: &Circle,
    b1: &Circle,
    offset_b: Vec2,
) -> Option<(f64, Vec2)> {
    let cb0 = b0.center + offset_b;
    let cb1 = b1.center + offset_b;
    let t = toi::circle_circle(a0.center, a1.center, a0.radius, cb0, cb1, b0.radius)?;
    let ca = a0.center + (a1.center - a0.center) * t;
    let cb = cb0 + (cb1 - cb0) * t;
    let point = ca + (cb - ca).normalize() * a0.radius;
    Some((t, point))
}

/// Circle against polygon: every polygon vertex is swept against the circle
/// and the circle against every edge. The vertex tests are required for
/// corners sharper than 90 degrees, which the edge test alone misses.
fn circle_polygon_contact(
    c0: &Circle,
    c1: &Circle,
    offset_c: Vec2,
    p0: &Polygon,
    p1: &Polygon,
    offset_p: Vec2,
) -> Option<(f64, Vec2)> {
    let cc0 = c0.center + offset_c;
    let cc1 = c1.center + offset_c;
    let radius = c0.radius;

    let mut best: Option<(f64, Vec2)> = None;

    for (v0, v1) in p0.vertices.iter().zip(&p1.vertices) {
        let v0 = *v0 + offset_p;
        let v1 = *v1 + offset_p;
        if let Some(t) = toi::point_circle(v0, v1, cc0, cc1, radius) {
            let point = v0 + (v1 - v0) * t;
            best = min_contact(best, Some((t, point)));
        }
    }

    for e in 0..p1.edge_count() {
        let (i, j) = p1.edge_indices(e);
        let la0 = p0.vertices[i] + offset_p;
        let lb0 = p0.vertices[j] + offset_p;
        let la1 = p1.vertices[i] + offset_p;
        let lb1 = p1.vertices[j] + offset_p;
        if let Some(t) = toi::line_circle(la0, lb0, la1, lb1, cc0, cc1, radius) {
            if best.is_some_and(|(bt, _)| t >= bt) {
                continue;
            }
            // The solver only places the center on the carrier line; the
            // contact counts when the center projects into the segment.
            let seg0 = la0 + (la1 - la0) * t;
            let seg1 = lb0 + (lb1 - lb0) * t;
            let length = (lb0 - la0).magnitude();
            let center_t = cc0 + (cc1 - cc0) * t;
            let proj = (seg1 - seg0).dot(center_t - seg0) / length;
            if proj >= 0.0 && proj <= length {
                let point = seg0 + (seg1 - seg0).normalize() * proj;
                best = Some((t, point));
            }
        }
    }
    best
}

/// Vertices of polygon `b` swept against the edges of polygon `a`. Covers
/// only half the contact cases; the caller runs it twice with the roles
/// swapped.
fn polygon_polygon_contact(
    a0: &Polygon,
    a1: &Polygon,
    offset_a: Vec2,
    b0: &Polygon,
    b1: &Polygon,
    offset_b: Vec2,
) -> Option<(f64, Vec2)> {
    let mut best: Option<(f64, Vec2)> = None;
    for e in 0..a1.edge_count() {
        let (i, j) = a1.edge_indices(e);
        let la0 = a0.vertices[i] + offset_a;
        let lb0 = a0.vertices[j] + offset_a;
        let la1 = a1.vertices[i] + offset_a;
        let lb1 = a1.vertices[j] + offset_a;
        for (v0, v1) in b0.vertices.iter().zip(&b1.vertices) {
            let v0 = *v0 + offset_b;
            let v1 = *v1 + offset_b;
            if let Some(contact) = toi::point_line(v0, v1, la0, lb0, la1, lb1) {
                let point = v0 + (v1 - v0) * contact.t;
                best = min_contact(best, Some((contact.t, point)));
            }
        }
    }
    best
}

/// Sweeps every active particle of a batch against one body, reprojecting
/// hit particles and recording their contacts. Coordinates are reconciled
/// into the batch's cell frame.
fn test_particles_against_body(
    body: &Body,
    body_id: ColliderId,
    batch_index: usize,
    batch: &mut ParticleBatch,
    events: &mut Vec<ContactEvent>,
) {
    let offset = cell_to_world(body.cell() - batch.cell);
    for dbs in body.shapes() {
        match (dbs.current(), dbs.buffered()) {
            (Shape::Circle(c1), Shape::Circle(c0)) => {
                particles_vs_circle(body, body_id, batch_index, batch, c0, c1, offset, events);
            }
            (Shape::Polygon(p1), Shape::Polygon(p0)) => {
                particles_vs_polygon(body, body_id, batch_index, batch, p0, p1, offset, events);
            }
            (Shape::Terrain(terrain), Shape::Terrain(_)) => {
                particles_vs_terrain(body, body_id, batch_index, batch, terrain, offset, events);
            }
            // Planet surfaces have no particle narrow phase: no contact
            (Shape::Planet(_), Shape::Planet(_)) => {}
            _ => {}
        }
    }
}

/// Bounding box of a particle's sweep, in the batch's cell.
fn particle_sweep_box(p0: Vec2, p1: Vec2, batch: &ParticleBatch) -> BoundingBox {
    let mut bb = BoundingBox::new();
    bb.reset_to_point(p1);
    bb.update_point(p0);
    bb.set_cell(batch.cell);
    bb
}

#[allow(clippy::too_many_arguments)]
fn particles_vs_circle(
    body: &Body,
    body_id: ColliderId,
    batch_index: usize,
    batch: &mut ParticleBatch,
    c0: &Circle,
    c1: &Circle,
    offset: Vec2,
    events: &mut Vec<ContactEvent>,
) {
    let cc0 = c0.center + offset;
    let cc1 = c1.center + offset;
    let radius = c0.radius;

    for slot in 0..batch.capacity() {
        if !batch.active[slot] {
            continue;
        }
        let p1 = batch.positions[slot];
        let p0 = batch.previous_positions[slot];
        let sweep = particle_sweep_box(p0, p1, batch);
        if !body.swept_bounding_box().overlaps(&sweep, 1) {
            continue;
        }

        let Some(t) = toi::point_circle(p0, p1, cc0, cc1, radius) else {
            continue;
        };
        if t > 1.0 {
            continue;
        }

        let point = p0 + (p1 - p0) * t;
        let center_t = cc0 + (cc1 - cc0) * t;
        let normal = (point - center_t).normalize();
        let tangent = Vec2::new(normal.y, -normal.x);

        // Decompose the direction of motion at the surface and damp the
        // components; the reflected direction falls out of the signs.
        let motion = (p1 - p0).normalize();
        let f_tang = motion.dot(tangent) * CIRCLE_DAMP_TANG;
        let f_orth = motion.cross(tangent) * CIRCLE_DAMP_ORTH;
        let damping = (f_tang * f_tang + f_orth * f_orth).sqrt() * DAMPING_SCALE;

        let speed = batch.velocities[slot].magnitude();
        let direction = (tangent * f_tang + normal * f_orth).normalize();
        // Particles are massless: without the body's velocity added back
        // they would be overtaken again next step.
        batch.velocities[slot] = direction * damping * speed + body.velocity;
        // Snap outside the current surface rather than to the contact
        // point; the body keeps moving regardless of the particle.
        batch.positions[slot] = cc1 + normal * (radius + CONTACT_OFFSET);

        events.push(ContactEvent {
            a: body_id,
            b: ColliderId::Particle {
                batch: batch_index,
                slot,
            },
            time: t,
            point,
            cell: batch.cell,
        });
    }
}

#[allow(clippy::too_many_arguments)]
fn particles_vs_polygon(
    body: &Body,
    body_id: ColliderId,
    batch_index: usize,
    batch: &mut ParticleBatch,
    p0: &Polygon,
    p1: &Polygon,
    offset: Vec2,
    events: &mut Vec<ContactEvent>,
) {
    for slot in 0..batch.capacity() {
        if !batch.active[slot] {
            continue;
        }
        let pos1 = batch.positions[slot];
        let pos0 = batch.previous_positions[slot];
        let sweep = particle_sweep_box(pos0, pos1, batch);
        if !body.swept_bounding_box().overlaps(&sweep, 1) {
            continue;
        }

        let mut best: Option<(f64, f64, usize)> = None;
        for e in 0..p1.edge_count() {
            let (i, j) = p1.edge_indices(e);
            let la0 = p0.vertices[i] + offset;
            let lb0 = p0.vertices[j] + offset;
            let la1 = p1.vertices[i] + offset;
            let lb1 = p1.vertices[j] + offset;
            if let Some(contact) = toi::point_line(pos0, pos1, la0, lb0, la1, lb1) {
                if best.map_or(true, |(bt, _, _)| contact.t < bt) {
                    best = Some((contact.t, contact.alpha, e));
                }
            }
        }

        let Some((t, alpha, edge)) = best else {
            continue;
        };
        if t > 1.0 {
            continue;
        }

        let (i, j) = p1.edge_indices(edge);
        let vi = p1.vertices[i] + offset;
        let vj = p1.vertices[j] + offset;

        let point = pos0 + (pos1 - pos0) * t;
        let tangent = (vi - vj).normalize();
        let velocity = batch.velocities[slot];
        let vel_tang = tangent * velocity.dot(tangent);
        // Pointing against the incoming orthogonal component: reflection
        let vel_orth = vel_tang - velocity;

        batch.velocities[slot] = (vel_orth * POLYGON_DAMP_ORTH + vel_tang * POLYGON_DAMP_TANG)
            * DAMPING_SCALE
            + body.velocity;
        batch.positions[slot] =
            vi + (vj - vi) * alpha + vel_orth.normalize() * CONTACT_OFFSET;

        events.push(ContactEvent {
            a: body_id,
            b: ColliderId::Particle {
                batch: batch_index,
                slot,
            },
            time: t,
            point,
            cell: batch.cell,
        });
    }
}

#[allow(clippy::too_many_arguments)]
fn particles_vs_terrain(
    body: &Body,
    body_id: ColliderId,
    batch_index: usize,
    batch: &mut ParticleBatch,
    terrain: &Terrain,
    offset: Vec2,
    events: &mut Vec<ContactEvent>,
) {
    let inc = terrain.ground_resolution;

    for slot in 0..batch.capacity() {
        if !batch.active[slot] {
            continue;
        }
        let pos1 = batch.positions[slot];
        let pos0 = batch.previous_positions[slot];
        let sweep = particle_sweep_box(pos0, pos1, batch);
        if !body.swept_bounding_box().overlaps(&sweep, 1) {
            continue;
        }

        // Only the surface segments under the particle's horizontal sweep
        // need testing.
        let left = (terrain.left() + offset.x).max(pos0.x.min(pos1.x));
        let right = (terrain.right() + offset.x).min(pos0.x.max(pos1.x));

        let mut x0 = terrain.snap_to_grid(left - offset.x) + offset.x;
        let mut x1 = x0 + inc;
        let mut y0 = terrain.surface(x0 - offset.x) + offset.y;
        let mut y1 = terrain.surface(x1 - offset.x) + offset.y;

        let motion = pos1 - pos0;
        let mut best: Option<(f64, Vec2, Vec2)> = None;

        while x0 < right {
            let seg = Vec2::new(x1 - x0, y1 - y0);
            let rel = pos0 - Vec2::new(x0, y0);

            // Line crossing time of the particle path with the segment's
            // carrier line
            let den = seg.cross(motion);
            if den != 0.0 {
                let t = -(seg.cross(rel)) / den;
                if (0.0..=1.0).contains(&t)
                    && best.map_or(true, |(bt, _, _)| t < bt)
                {
                    let hit = pos0 + motion * t;
                    // Cheap in-segment check against the segment length
                    if (hit - Vec2::new(x0, y0)).magnitude() < seg.magnitude() {
                        best = Some((t, hit, seg));
                    }
                }
            }

            x0 = x1;
            x1 += inc;
            y0 = y1;
            y1 = terrain.surface(x1 - offset.x) + offset.y;
        }

        let Some((t, point, seg)) = best else {
            continue;
        };

        let tangent = seg.normalize();
        let orth = tangent.perpendicular();
        let motion_dir = motion.normalize();
        let f_tang = motion_dir.dot(tangent) * TERRAIN_DAMP_TANG;
        let f_orth = motion_dir.cross(tangent) * TERRAIN_DAMP_ORTH;
        let damping = (f_tang * f_tang + f_orth * f_orth).sqrt() * DAMPING_SCALE;

        let speed = batch.velocities[slot].magnitude();
        let direction = (tangent * f_tang + orth * f_orth).normalize();
        batch.velocities[slot] = direction * damping * speed;
        batch.positions[slot] = point + (pos0 - point).normalize() * CONTACT_OFFSET;

        events.push(ContactEvent {
            a: body_id,
            b: ColliderId::Particle {
                batch: batch_index,
                slot,
            },
            time: t,
            point,
            cell: batch.cell,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::PolygonKind;
    use crate::grid::{Cell, CELL_SIZE};

    const EPSILON: f64 = 1e-9;

    fn circle_body(world: Vec2, radius: f64) -> Body {
        let mut body = Body::new();
        body.add_shape(Shape::Circle(Circle::new(Vec2::ZERO, radius)));
        body.set_origin(world);
        body.transform();
        body.update_buffers();
        body
    }

    fn square_body(lower_left: Vec2, size: f64) -> Body {
        let mut body = Body::new();
        body.add_shape(Shape::Polygon(Polygon::new(
            PolygonKind::Filled,
            vec![
                Vec2::new(0.0, 0.0),
                Vec2::new(size, 0.0),
                Vec2::new(size, size),
                Vec2::new(0.0, size),
            ],
        )));
        body.dynamic = false;
        body.set_origin(lower_left);
        body.transform();
        body.update_buffers();
        body
    }

    /// Sets a new current pose, keeping the old one buffered.
    fn move_body(body: &mut Body, world: Vec2) {
        body.set_origin(world);
        body.transform();
    }

    #[test]
    fn test_two_circles_head_on() {
        let resting = circle_body(Vec2::ZERO, 1.0);
        let mut approaching = circle_body(Vec2::new(10.0, 0.0), 1.0);
        move_body(&mut approaching, Vec2::new(1.0, 0.0));

        let bodies = [resting, approaching];
        let mut manager = CollisionManager::new();
        manager.set_dynamic_objects(&bodies);
        let events = manager.detect_collisions();

        assert_eq!(events.len(), 1);
        let event = &events[0];
        assert_eq!(event.a, ColliderId::Dynamic(0));
        assert_eq!(event.b, ColliderId::Dynamic(1));
        // Gap of 8 closes over 9 units of travel
        assert!((event.time - 8.0 / 9.0).abs() < EPSILON);
        assert!((event.point.x - 1.0).abs() < EPSILON);
        assert!(event.point.y.abs() < EPSILON);
    }

    #[test]
    fn test_disjoint_depth_layers_skip_pair() {
        let mut resting = circle_body(Vec2::ZERO, 1.0);
        let mut approaching = circle_body(Vec2::new(10.0, 0.0), 1.0);
        resting.depth_layers = 0x1;
        approaching.depth_layers = 0x2;
        move_body(&mut approaching, Vec2::new(1.0, 0.0));

        let bodies = [resting, approaching];
        let mut manager = CollisionManager::new();
        manager.set_dynamic_objects(&bodies);
        assert!(manager.detect_collisions().is_empty());
    }

    #[test]
    fn test_contact_across_cell_boundary() {
        // Bodies in neighbouring cells colliding near the shared border;
        // the pair must be tested in one reconciled frame.
        let resting = circle_body(Vec2::new(CELL_SIZE * 0.5 - 1.0, 0.0), 1.0);
        let mut approaching = circle_body(Vec2::new(CELL_SIZE * 0.5 + 9.0, 0.0), 1.0);
        move_body(&mut approaching, Vec2::new(CELL_SIZE * 0.5, 0.0));
        assert_eq!(resting.cell(), Cell::new(0, 0));
        assert_eq!(approaching.cell(), Cell::new(1, 0));

        let bodies = [resting, approaching];
        let mut manager = CollisionManager::new();
        manager.set_dynamic_objects(&bodies);
        let events = manager.detect_collisions();

        assert_eq!(events.len(), 1);
        let event = &events[0];
        assert!((event.time - 8.0 / 9.0).abs() < 1.0e-6);
        assert_eq!(event.cell, Cell::new(0, 0));
        // Contact point in the frame of the first body's cell
        assert!((event.point.x - CELL_SIZE * 0.5).abs() < 1.0e-3);
    }

    #[test]
    fn test_circle_drops_onto_polygon_edge() {
        let mut circle = circle_body(Vec2::new(2.0, 6.0), 1.0);
        move_body(&mut circle, Vec2::new(2.0, 2.0));
        let square = square_body(Vec2::ZERO, 4.0);

        let dynamics = [circle];
        let statics = [square];
        let mut manager = CollisionManager::new();
        manager.set_dynamic_objects(&dynamics);
        manager.set_static_objects(&statics);
        let events = manager.detect_collisions();

        assert_eq!(events.len(), 1);
        let event = &events[0];
        assert_eq!(event.b, ColliderId::Static(0));
        // Center reaches one radius above the top edge a quarter in
        assert!((event.time - 0.25).abs() < EPSILON);
        assert!((event.point.x - 2.0).abs() < EPSILON);
        assert!((event.point.y - 4.0).abs() < EPSILON);
    }

    #[test]
    fn test_vertex_grazing_at_step_end() {
        // Corner of the moving square reaches the other square's edge
        // exactly at the end of the step: t = 1 is a contact, not a miss.
        let target = square_body(Vec2::ZERO, 2.0);
        let mut mover = square_body(Vec2::new(3.0, 1.0), 1.0);
        mover.dynamic = true;
        move_body(&mut mover, Vec2::new(2.0, 1.0));

        // Narrow phase directly: swept boxes of a t=1 graze merely touch,
        // which the (strict) broad-phase separation test treats as apart.
        let (t, point) = body_pair_contact(&mover, &target).unwrap();
        assert!((t - 1.0).abs() < 1.0e-12);
        assert!((point.x - 2.0).abs() < 1.0e-12);
    }

    #[test]
    fn test_response_hook_sees_every_event() {
        let resting = circle_body(Vec2::ZERO, 1.0);
        let mut approaching = circle_body(Vec2::new(10.0, 0.0), 1.0);
        move_body(&mut approaching, Vec2::new(1.0, 0.0));

        let bodies = [resting, approaching];
        let mut seen = Vec::new();
        let event_count = {
            let mut manager = CollisionManager::new();
            manager.set_dynamic_objects(&bodies);
            manager.set_response_hook(|event: &ContactEvent| seen.push(event.time));
            manager.detect_collisions().len()
        };
        assert_eq!(seen.len(), event_count);
        assert_eq!(seen.len(), 1);
        assert!((seen[0] - 8.0 / 9.0).abs() < EPSILON);
    }

    #[test]
    fn test_particle_reflects_off_polygon() {
        let mut square = square_body(Vec2::ZERO, 4.0);
        square.dynamic = true;
        square.velocity = Vec2::new(0.5, 0.0);

        let mut batch = ParticleBatch::with_capacity(4);
        batch.spawn(Vec2::new(2.0, 5.0), Vec2::new(0.0, -2.0));
        batch.advance(1.0);
        assert_eq!(batch.positions()[0], Vec2::new(2.0, 3.0));

        let dynamics = [square];
        let mut batches = [batch];
        let mut manager = CollisionManager::new();
        manager.set_dynamic_objects(&dynamics);
        manager.set_particles(&mut batches);
        let events = manager.detect_collisions();
        drop(manager);

        assert_eq!(events.len(), 1);
        assert_eq!(
            events[0].b,
            ColliderId::Particle { batch: 0, slot: 0 }
        );
        assert!((events[0].time - 0.5).abs() < EPSILON);
        assert!((events[0].point - Vec2::new(2.0, 4.0)).magnitude() < EPSILON);

        // Normal component reflected and damped, body velocity added back
        let velocity = batches[0].velocities()[0];
        assert!((velocity.x - 0.5).abs() < EPSILON);
        assert!((velocity.y - 2.0 * 0.5 * FRAC_1_SQRT_2).abs() < EPSILON);
        // Snapped just outside the surface
        let position = batches[0].positions()[0];
        assert!((position.x - 2.0).abs() < EPSILON);
        assert!((position.y - (4.0 + CONTACT_OFFSET)).abs() < EPSILON);
    }

    #[test]
    fn test_particle_reflects_off_circle() {
        let circle = circle_body(Vec2::ZERO, 1.0);

        let mut batch = ParticleBatch::with_capacity(2);
        batch.spawn(Vec2::new(0.0, 3.0), Vec2::new(0.0, -2.5));
        batch.advance(1.0);

        let dynamics = [circle];
        let mut batches = [batch];
        let mut manager = CollisionManager::new();
        manager.set_dynamic_objects(&dynamics);
        manager.set_particles(&mut batches);
        let events = manager.detect_collisions();
        drop(manager);

        assert_eq!(events.len(), 1);
        assert!((events[0].time - 0.8).abs() < EPSILON);
        assert!((events[0].point - Vec2::new(0.0, 1.0)).magnitude() < EPSILON);

        let velocity = batches[0].velocities()[0];
        assert!(velocity.x.abs() < EPSILON);
        assert!((velocity.y - 2.5 * 0.5 * FRAC_1_SQRT_2).abs() < EPSILON);
        let position = batches[0].positions()[0];
        assert!((position.y - (1.0 + CONTACT_OFFSET)).abs() < EPSILON);
    }

    #[test]
    fn test_particle_bounces_on_terrain() {
        let mut ground = Body::new();
        ground.add_shape(Shape::Terrain(Terrain::new(
            Vec2::ZERO,
            8.0,
            1.0,
            vec![0.0; 9],
        )));
        ground.dynamic = false;
        ground.transform();
        ground.update_buffers();

        let mut batch = ParticleBatch::with_capacity(2);
        batch.spawn(Vec2::new(1.5, 1.0), Vec2::new(0.0, -2.0));
        batch.advance(1.0);

        let statics = [ground];
        let mut batches = [batch];
        let mut manager = CollisionManager::new();
        manager.set_static_objects(&statics);
        manager.set_particles(&mut batches);
        let events = manager.detect_collisions();
        drop(manager);

        assert_eq!(events.len(), 1);
        assert!((events[0].time - 0.5).abs() < EPSILON);
        assert!((events[0].point - Vec2::new(1.5, 0.0)).magnitude() < EPSILON);

        // Terrain damps both components by half before the common scale
        let velocity = batches[0].velocities()[0];
        assert!(velocity.x.abs() < EPSILON);
        assert!((velocity.y - 2.0 * 0.5 * FRAC_1_SQRT_2).abs() < EPSILON);
        let position = batches[0].positions()[0];
        assert!((position.y - CONTACT_OFFSET).abs() < EPSILON);
    }

    #[test]
    fn test_planet_pairs_report_no_contact() {
        let mut planet = Body::new();
        planet.add_shape(Shape::Planet(crate::geometry::Planet::new(
            Vec2::ZERO,
            100.0,
            10.0,
            1.0,
        )));
        planet.dynamic = false;
        planet.transform();
        planet.update_buffers();

        let mut circle = circle_body(Vec2::new(150.0, 0.0), 1.0);
        move_body(&mut circle, Vec2::new(90.0, 0.0));

        let mut batch = ParticleBatch::with_capacity(2);
        batch.spawn(Vec2::new(120.0, 0.0), Vec2::new(-50.0, 0.0));
        batch.advance(1.0);

        let dynamics = [circle];
        let statics = [planet];
        let mut batches = [batch];
        let mut manager = CollisionManager::new();
        manager.set_dynamic_objects(&dynamics);
        manager.set_static_objects(&statics);
        manager.set_particles(&mut batches);
        assert!(manager.detect_collisions().is_empty());
    }

    #[test]
    fn test_distant_pair_pruned_by_cells() {
        // Identical local coordinates two cells apart: broad phase prunes
        let near = circle_body(Vec2::ZERO, 1.0);
        let mut far = circle_body(Vec2::new(CELL_SIZE * 2.0 + 10.0, 0.0), 1.0);
        move_body(&mut far, Vec2::new(CELL_SIZE * 2.0 + 1.0, 0.0));
        assert_eq!(far.cell(), Cell::new(2, 0));

        let bodies = [near, far];
        let mut manager = CollisionManager::new();
        manager.set_dynamic_objects(&bodies);
        assert!(manager.detect_collisions().is_empty());
    }
}
