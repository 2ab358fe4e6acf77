use crate::canvas::{Canvas, Color, Font, FrameBuffer};
use crate::plan::Plan;
use crate::status::{Severity, StatusLine};

pub const BACKGROUND: Color = Color::rgb(0, 0, 20);
const GRID: Color = Color::rgb(32, 32, 32);
const ROOM: Color = Color::rgba(0, 255, 0, 60);
const WALL: Color = Color::rgb(128, 128, 128);
const NORMAL: Color = Color::rgb(200, 0, 150);
const THING_OUTER: Color = Color::rgb(0, 0, 144);
const THING_INNER: Color = Color::rgb(0, 255, 0);

/// Everything below the active tool's overlay.
pub fn render_plan(fb: &mut FrameBuffer, plan: &Plan, thing_scale: i32) {
    fb.clear(BACKGROUND);
    draw_grid(fb, plan.cell_scale());
    draw_rooms(fb, plan);
    draw_walls(fb, plan);
    draw_things(fb, plan, thing_scale);
}

fn draw_grid(canvas: &mut dyn Canvas, scale: i32) {
    let (w, h) = canvas.size();
    for x in (0..w).step_by(scale as usize) {
        canvas.draw_line(x, 0, x, h, GRID);
    }
    for y in (0..h).step_by(scale as usize) {
        canvas.draw_line(0, y, w, y, GRID);
    }
}

fn draw_rooms(canvas: &mut dyn Canvas, plan: &Plan) {
    let scale = plan.cell_scale();
    for room in plan.rooms() {
        canvas.fill_rect(room.x * scale, room.y * scale, scale, scale, ROOM);
    }
}

fn draw_walls(canvas: &mut dyn Canvas, plan: &Plan) {
    let scale = plan.cell_scale();
    for wall in plan.walls() {
        canvas.draw_line(
            wall.a[0] * scale,
            wall.a[1] * scale,
            wall.b[0] * scale,
            wall.b[1] * scale,
            WALL,
        );
        let [ox, oy] = wall.normal_origin;
        let [tx, ty] = wall.normal_tip();
        canvas.draw_line(ox, oy, tx, ty, NORMAL);
    }
}

fn draw_things(canvas: &mut dyn Canvas, plan: &Plan, scale: i32) {
    for thing in plan.things.all() {
        let [x, y] = thing.position;
        canvas.fill_rect(x, y, scale, scale, THING_OUTER);
        canvas.fill_rect(x + 1, y + 1, scale - 2, scale - 2, THING_INNER);
    }
}

/// Two status lines along the bottom edge.
pub fn draw_status(canvas: &mut dyn Canvas, status: &StatusLine) {
    let color = match status.severity {
        Severity::Info => Color::WHITE,
        Severity::Warning => Color::rgb(255, 255, 0),
        Severity::Error => Color::rgb(255, 128, 0),
    };
    let (_, h) = canvas.size();
    for (text, y) in [(&status.title, h - 32), (&status.detail, h - 16)] {
        let (tw, th) = canvas.text_size(text, Font::Small);
        canvas.fill_rect(0, y, tw, th, Color::BLACK);
        canvas.draw_text(0, y, text, Font::Small, color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::Limits;

    #[test]
    fn rooms_walls_and_things_are_painted() {
        let mut plan = Plan::new(32, Limits::default());
        plan.create_room(1, 1).unwrap();
        plan.things.place_or_select([200, 200], 8).unwrap();

        let mut fb = FrameBuffer::new(321, 321);
        render_plan(&mut fb, &plan, 8);

        assert_eq!(fb.pixel(5, 5), BACKGROUND.pack());
        // inside the room: green tint over the background
        let room = fb.pixel(40, 40);
        assert!((room >> 8) & 0xFF > 0);
        // west wall of the room runs along x = 32
        assert_eq!(fb.pixel(32, 40), WALL.pack());
        // north wall normal starts at the wall midpoint
        assert_eq!(fb.pixel(48, 33), NORMAL.pack());
        assert_eq!(fb.pixel(200, 200), THING_OUTER.pack());
        assert_eq!(fb.pixel(203, 203), THING_INNER.pack());
    }

    #[test]
    fn status_color_follows_severity() {
        let mut fb = FrameBuffer::new(200, 64);
        let mut status = StatusLine::default();
        status.error("File export error", "nope");
        draw_status(&mut fb, &status);
        assert!(fb.pixels.iter().any(|&p| p == Color::rgb(255, 128, 0).pack()));
    }
}
