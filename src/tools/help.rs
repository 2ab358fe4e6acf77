use super::{CursorKind, Lifecycle, Tool, ToolContext};
use crate::canvas::{Canvas, Color, Font};
use crate::export::FORMAT_MARKER;
use crate::input::InputEvent;
use crate::plan::Plan;

const PANEL_W: i32 = 800;
const PANEL_H: i32 = 500;
const LINE_STEP: i32 = 24;

/// Key reference screen. The text only exists while the tool is active.
#[derive(Default)]
pub struct HelpTool {
    lines: Option<Vec<String>>,
}

impl Tool for HelpTool {
    fn handle_event(
        &mut self,
        ctx: &mut ToolContext<'_>,
        _event: Option<&InputEvent>,
        _cursor: [i32; 2],
        signal: Lifecycle,
    ) {
        match signal {
            Lifecycle::Begin => {
                if self.lines.is_none() {
                    self.lines = Some(
                        [
                            FORMAT_MARKER,
                            "----------------",
                            "F1 - help screen;",
                            "F2 - room placing tool;",
                            "F3 - thing editing tool;",
                            "F5 - export world plan.",
                            "",
                            "Have a nice day.",
                        ]
                        .into_iter()
                        .map(String::from)
                        .collect(),
                    );
                }
            }
            Lifecycle::Stop => self.lines = None,
            Lifecycle::Reset => ctx.cursor.kind = CursorKind::Arrow,
            Lifecycle::Normal => {}
        }
    }

    fn draw(&self, canvas: &mut dyn Canvas, _plan: &Plan, _cursor: [i32; 2], _ticks_ms: u64) {
        let Some(lines) = &self.lines else {
            return;
        };
        let (w, h) = canvas.size();
        let left = w / 2 - PANEL_W / 2;
        let top = h / 2 - PANEL_H / 2;

        canvas.fill_rect(left, top, PANEL_W, PANEL_H, Color::rgb(10, 40, 30));
        canvas.draw_rect(left, top, PANEL_W, PANEL_H, Color::WHITE);

        let mut y = top + 1;
        for line in lines {
            canvas.draw_text(left + 1, y, line, Font::Large, Color::WHITE);
            y += LINE_STEP;
        }

        // author strip along the bottom edge
        let strip_y = top + PANEL_H - 20;
        canvas.fill_rect(left + 1, strip_y, PANEL_W - 2, 12, Color::BLACK);
        let credit = concat!("basilisk ", env!("CARGO_PKG_VERSION"));
        let (tw, _) = canvas.text_size(credit, Font::Small);
        canvas.draw_text(left + PANEL_W - tw - 12, strip_y + 2, credit, Font::Small, Color::WHITE);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canvas::FrameBuffer;
    use crate::tools::Harness;

    #[test]
    fn text_lives_between_begin_and_stop() {
        let mut h = Harness::new();
        let mut tool = HelpTool::default();
        assert!(tool.lines.is_none());

        tool.handle_event(&mut h.ctx(), None, [0, 0], Lifecycle::Begin);
        assert_eq!(tool.lines.as_ref().unwrap()[0], "Basilisk 0");

        let mut fb = FrameBuffer::new(1025, 705);
        tool.draw(&mut fb, &h.plan, [0, 0], 0);
        assert_ne!(fb.pixel(512, 352), 0);

        tool.handle_event(&mut h.ctx(), None, [0, 0], Lifecycle::Stop);
        assert!(tool.lines.is_none());
    }
}
