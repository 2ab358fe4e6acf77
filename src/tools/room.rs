use super::{CursorKind, Lifecycle, Tool, ToolContext};
use crate::canvas::{Canvas, Color};
use crate::grid::{point_to_cell, snap_point_to_cell};
use crate::input::{InputEvent, Key, MouseButton};
use crate::plan::Plan;

pub const CROSSHAIR_COLOR: Color = Color::rgb(200, 200, 200);

/// Places rooms with left click / Space and removes them with right click /
/// Delete.
#[derive(Default)]
pub struct RoomTool;

impl Tool for RoomTool {
    fn handle_event(
        &mut self,
        ctx: &mut ToolContext<'_>,
        event: Option<&InputEvent>,
        cursor: [i32; 2],
        signal: Lifecycle,
    ) {
        match signal {
            Lifecycle::Reset => ctx.cursor.kind = CursorKind::Arrow,
            Lifecycle::Begin | Lifecycle::Stop => {}
            Lifecycle::Normal => {
                let [cx, cy] = point_to_cell(cursor, ctx.plan.cell_scale());
                let result = match event {
                    Some(InputEvent::Key(Key::Space) | InputEvent::MouseDown(MouseButton::Left)) => {
                        ctx.plan.create_room(cx, cy).map(drop)
                    }
                    Some(InputEvent::Key(Key::Delete) | InputEvent::MouseDown(MouseButton::Right)) => {
                        ctx.plan.delete_room(cx, cy).map(drop)
                    }
                    _ => Ok(()),
                };
                if let Err(e) = result {
                    ctx.status.warning(e);
                }
            }
        }
    }

    fn draw(&self, canvas: &mut dyn Canvas, plan: &Plan, cursor: [i32; 2], ticks_ms: u64) {
        let (w, h) = canvas.size();
        let [mx, my] = cursor;
        canvas.draw_line(mx, 0, mx, h, CROSSHAIR_COLOR);
        canvas.draw_line(0, my, w, my, CROSSHAIR_COLOR);

        let scale = plan.cell_scale();
        let [x, y] = snap_point_to_cell(cursor, scale);
        let alpha = (255.0 * (ticks_ms as f32 / 300.0).sin().abs()) as u8;
        canvas.fill_rect(x, y, scale, scale, Color::rgba(255, 0, 0, alpha));
    }
}
