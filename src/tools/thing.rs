use super::{Lifecycle, Tool, ToolContext};
use crate::canvas::{Canvas, Color, Font};
use crate::grid::{snap_point_to_cell, thing_scale};
use crate::input::{InputEvent, Key, MouseButton};
use crate::plan::Plan;
use crate::things::{Facing, Thing};
use crate::tools::room::CROSSHAIR_COLOR;

pub const PANEL_WIDTH: i32 = 225;
const CROSSHAIR_ARM: i32 = 96;

/// Places things, selects them and turns the selected one with the arrow
/// keys. The system cursor is hidden in favour of a small crosshair except
/// over the info panel.
#[derive(Default)]
pub struct ThingTool {
    show_info: bool,
    selected: Option<usize>,
    over_panel: bool,
    crosshair: [i32; 2],
}

impl ThingTool {
    fn on_input(&mut self, ctx: &mut ToolContext<'_>, event: &InputEvent, cursor: [i32; 2]) {
        let facing = match event {
            InputEvent::Key(Key::Char('e' | 'E')) => {
                self.show_info = !self.show_info;
                self.track_pointer(ctx, cursor);
                return;
            }
            InputEvent::Key(Key::Right) => Facing::East,
            InputEvent::Key(Key::Up) => Facing::North,
            InputEvent::Key(Key::Left) => Facing::West,
            InputEvent::Key(Key::Down) => Facing::South,
            InputEvent::MouseDown(MouseButton::Left) => {
                let scale = thing_scale(ctx.plan.cell_scale());
                match ctx.plan.things.place_or_select(cursor, scale) {
                    Ok(placement) => {
                        self.selected = Some(placement.index());
                        self.show_info = true;
                    }
                    Err(e) => ctx.status.warning(e),
                }
                return;
            }
            InputEvent::MouseMove { .. } => {
                self.track_pointer(ctx, cursor);
                return;
            }
            _ => return,
        };

        if let Err(e) = ctx.plan.things.set_facing(self.selected, facing) {
            ctx.status.warning(e);
        }
    }

    /// The system cursor only shows over the open info panel.
    fn track_pointer(&mut self, ctx: &mut ToolContext<'_>, cursor: [i32; 2]) {
        self.over_panel = self.show_info && cursor[0] < PANEL_WIDTH;
        ctx.cursor.visible = self.over_panel;
        if !self.over_panel {
            self.crosshair = cursor;
        }
    }

    fn draw_panel(&self, canvas: &mut dyn Canvas, plan: &Plan) {
        let (_, h) = canvas.size();
        canvas.fill_rect(0, 0, PANEL_WIDTH, h, Color::BLACK);
        for i in 1..50 {
            let y = (h as f32 - (i as f32 / 50.0).tan() * 50.0) as i32;
            canvas.draw_line(0, y, PANEL_WIDTH, y, Color::rgba(255, 255, 255, 60));
        }

        let Some((index, thing)) = self
            .selected
            .and_then(|i| plan.things.get(i).map(|t| (i, t)))
        else {
            canvas.draw_text(0, 0, "No thing selected.", Font::Small, Color::WHITE);
            return;
        };

        let mut y = 0;
        for line in info_lines(index, thing) {
            let (_, lh) = canvas.draw_text(0, y, &line, Font::Small, Color::WHITE);
            y += lh + 2;
        }
        y += Font::Small.line_height();

        // facing indicator
        let size = PANEL_WIDTH / 2;
        canvas.fill_rect(0, y, size + 4, size + 4, Color::rgb(20, 60, 20));
        canvas.fill_rect(0, y, size, size, Color::rgb(30, 200, 30));
        let center = [size / 2, y + size / 2];
        let [dx, dy] = thing.facing.direction();
        canvas.draw_line(
            center[0],
            center[1],
            center[0] + dx * size / 2,
            center[1] + dy * size / 2,
            Color::WHITE,
        );
    }
}

fn info_lines(index: usize, thing: &Thing) -> Vec<String> {
    vec![
        format!("Thing index {index}."),
        "----------------".to_string(),
        format!("flags    = {}", thing.flags),
        format!("position = ({}, {})", thing.position[0], thing.position[1]),
        format!("type     = {}", thing.kind),
        format!("facing   = {:?}", thing.facing),
    ]
}

impl Tool for ThingTool {
    fn handle_event(
        &mut self,
        ctx: &mut ToolContext<'_>,
        event: Option<&InputEvent>,
        cursor: [i32; 2],
        signal: Lifecycle,
    ) {
        match signal {
            Lifecycle::Begin => {
                // the pointer may have moved while another tool was active
                self.crosshair = cursor;
                self.track_pointer(ctx, cursor);
            }
            Lifecycle::Stop => ctx.cursor.visible = true,
            Lifecycle::Reset => {
                self.show_info = false;
                self.selected = None;
                self.over_panel = false;
                ctx.cursor.visible = false;
            }
            Lifecycle::Normal => {
                if let Some(event) = event {
                    self.on_input(ctx, event, cursor);
                }
            }
        }
    }

    fn draw(&self, canvas: &mut dyn Canvas, plan: &Plan, cursor: [i32; 2], ticks_ms: u64) {
        let scale = thing_scale(plan.cell_scale());
        let pulse = (ticks_ms as f32 / 100.0).sin().abs();

        let [hx, hy] = snap_point_to_cell(cursor, scale);
        canvas.fill_rect(hx, hy, scale, scale, Color::rgba(255, 255, 0, (255.0 * pulse) as u8));

        if let Some(thing) = self.selected.and_then(|i| plan.things.get(i)) {
            let [x, y] = thing.position;
            let alpha = (255.0 * (pulse / 2.0 + 0.5)) as u8;
            canvas.draw_rect(x - 4, y - 4, scale + 8, scale + 8, Color::rgba(0, 255, 0, alpha));
        }

        let [mx, my] = if self.over_panel { self.crosshair } else { cursor };
        let half = scale / 2;
        canvas.draw_line(mx, my - CROSSHAIR_ARM, mx, my - half, CROSSHAIR_COLOR);
        canvas.draw_line(mx, my + half, mx, my + CROSSHAIR_ARM, CROSSHAIR_COLOR);
        canvas.draw_line(mx - CROSSHAIR_ARM, my, mx - half, my, CROSSHAIR_COLOR);
        canvas.draw_line(mx + half, my, mx + CROSSHAIR_ARM, my, CROSSHAIR_COLOR);
        canvas.draw_rect(mx - half, my - half, scale, scale, CROSSHAIR_COLOR);

        if self.show_info {
            self.draw_panel(canvas, plan);
        }
    }
}
