use std::path::{Path, PathBuf};

use super::{CursorKind, Lifecycle, Tool, ToolContext};
use crate::canvas::{Canvas, Color, Font};
use crate::export::export_plan;
use crate::input::{InputEvent, Key};
use crate::plan::Plan;

const OVERLAY_W: i32 = 800;
const OVERLAY_H: i32 = 128;
const CARET_BLINK_MS: u64 = 512;
const LABEL: &str = "Output file path: ";

/// Single-line editor for the export path. Typed keys are limited to
/// `[a-z0-9.,/]`; the starting text is kept as configured. The caret counts
/// characters, not bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathInput {
    text: String,
    caret: usize,
}

impl PathInput {
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
            caret: text.chars().count(),
        }
    }

    pub fn accepts(c: char) -> bool {
        c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '.' | ',' | '/')
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    fn len(&self) -> usize {
        self.text.chars().count()
    }

    /// Byte offset of the `n`th character.
    fn offset(&self, n: usize) -> usize {
        self.text
            .char_indices()
            .nth(n)
            .map_or(self.text.len(), |(i, _)| i)
    }

    /// Apply an editing key. Returns false for keys the editor ignores.
    pub fn edit(&mut self, key: Key) -> bool {
        match key {
            Key::Left => self.caret = self.caret.saturating_sub(1),
            Key::Right => self.caret = (self.caret + 1).min(self.len()),
            Key::Home => self.caret = 0,
            Key::End => self.caret = self.len(),
            Key::Backspace => {
                if self.caret > 0 {
                    self.caret -= 1;
                    let at = self.offset(self.caret);
                    self.text.remove(at);
                }
            }
            Key::Delete => {
                if self.caret < self.len() {
                    let at = self.offset(self.caret);
                    self.text.remove(at);
                }
            }
            Key::Char(c) if Self::accepts(c) => {
                let at = self.offset(self.caret);
                self.text.insert(at, c);
                self.caret += 1;
            }
            _ => return false,
        }
        true
    }

    /// Text with the caret drawn as `_` over the character it sits on.
    pub fn with_caret(&self) -> String {
        let mut shown = self.text.clone();
        if self.caret < self.len() {
            let at = self.offset(self.caret);
            let next = self.offset(self.caret + 1);
            shown.replace_range(at..next, "_");
        } else {
            shown.push('_');
        }
        shown
    }
}

/// Writes the plan to a user-chosen path on Enter.
pub struct ExportTool {
    input: PathInput,
    exported: bool,
    canvas_size: (i32, i32),
}

impl ExportTool {
    pub fn new(default_path: &Path, canvas_size: (i32, i32)) -> Self {
        Self {
            input: PathInput::new(&default_path.to_string_lossy()),
            exported: false,
            canvas_size,
        }
    }

    fn overlay_origin(canvas_size: (i32, i32)) -> (i32, i32) {
        (
            canvas_size.0 / 2 - OVERLAY_W / 2,
            canvas_size.1 / 2 - OVERLAY_H / 2,
        )
    }

    fn export(&mut self, ctx: &mut ToolContext<'_>) {
        let path = PathBuf::from(self.input.text());
        match export_plan(&*ctx.plan, &path) {
            Ok(()) => {
                ctx.status.info("File export", "The file was successfully written.");
                self.exported = true;
            }
            Err(e) => {
                ctx.status.error("File export error", e);
                self.exported = false;
            }
        }
    }
}

impl Tool for ExportTool {
    fn handle_event(
        &mut self,
        ctx: &mut ToolContext<'_>,
        event: Option<&InputEvent>,
        _cursor: [i32; 2],
        signal: Lifecycle,
    ) {
        match signal {
            Lifecycle::Reset => {
                ctx.cursor.kind = CursorKind::Arrow;
                self.exported = false;
            }
            Lifecycle::Begin => {}
            Lifecycle::Stop => ctx.cursor.kind = CursorKind::Arrow,
            Lifecycle::Normal => match event {
                Some(InputEvent::Key(Key::Enter)) => self.export(ctx),
                Some(InputEvent::Key(key)) => {
                    self.input.edit(*key);
                }
                Some(InputEvent::MouseMove { x, y }) => {
                    let (left, top) = Self::overlay_origin(self.canvas_size);
                    let inside = (left..left + OVERLAY_W).contains(x) && (top..top + OVERLAY_H).contains(y);
                    ctx.cursor.kind = if inside { CursorKind::Text } else { CursorKind::Arrow };
                }
                _ => {}
            },
        }
    }

    fn draw(&self, canvas: &mut dyn Canvas, _plan: &Plan, _cursor: [i32; 2], ticks_ms: u64) {
        let (left, top) = Self::overlay_origin(canvas.size());
        canvas.fill_rect(left, top, OVERLAY_W, OVERLAY_H, Color::rgba(0, 0, 0, 196));
        canvas.draw_rect(left, top, OVERLAY_W, OVERLAY_H, Color::WHITE);

        let (label_w, line_h) = canvas.draw_text(left, top, LABEL, Font::Large, Color::WHITE);
        let shown = if ticks_ms % CARET_BLINK_MS > CARET_BLINK_MS / 2 {
            self.input.with_caret()
        } else {
            self.input.text().to_string()
        };
        canvas.draw_text(left + label_w, top, &shown, Font::Large, Color::WHITE);

        let mut y = top + line_h;
        canvas.draw_text(
            left,
            y,
            "Insert the file's name and press RETURN to write...",
            Font::Large,
            Color::WHITE,
        );
        if self.exported {
            y += line_h;
            canvas.draw_text(left, y, "The file has been written.", Font::Large, Color::WHITE);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::status::Severity;
    use crate::tools::Harness;

    fn type_keys(input: &mut PathInput, keys: &[Key]) {
        for &k in keys {
            input.edit(k);
        }
    }

    #[test]
    fn editing_moves_caret_and_filters_characters() {
        let mut input = PathInput::new("./plans/t");
        assert_eq!(input.caret, 9);

        type_keys(&mut input, &[Key::Char('2'), Key::Char('X'), Key::Char('!')]);
        assert_eq!(input.text(), "./plans/t2");

        type_keys(&mut input, &[Key::Home, Key::Delete, Key::Delete]);
        assert_eq!(input.text(), "plans/t2");
        assert_eq!(input.caret, 0);

        type_keys(&mut input, &[Key::Backspace, Key::End, Key::Backspace, Key::Left]);
        assert_eq!(input.text(), "plans/t");
        assert_eq!(input.caret, 6);

        type_keys(&mut input, &[Key::Right, Key::Right, Key::Delete]);
        assert_eq!(input.caret, 7);
        assert_eq!(input.text(), "plans/t");
        assert!(!input.edit(Key::F(1)));
    }

    #[test]
    fn configured_path_is_kept_verbatim() {
        let tool = ExportTool::new(Path::new("/home/Alice/My-Plans/plan_1.txt"), (1025, 705));
        assert_eq!(tool.input.text(), "/home/Alice/My-Plans/plan_1.txt");
        assert_eq!(tool.input.caret, 31);

        // typing is still filtered, and editing works around kept characters
        let mut input = PathInput::new("Ä-b");
        assert!(!input.edit(Key::Char('Z')));
        type_keys(&mut input, &[Key::Home, Key::Right, Key::Char('x'), Key::Delete]);
        assert_eq!(input.text(), "Äxb");
        assert_eq!(input.with_caret(), "Äx_");
        type_keys(&mut input, &[Key::Home, Key::Delete]);
        assert_eq!(input.text(), "xb");
    }

    #[test]
    fn caret_marker() {
        let mut input = PathInput::new("ab");
        assert_eq!(input.with_caret(), "ab_");
        input.edit(Key::Home);
        assert_eq!(input.with_caret(), "_b");
    }

    #[test]
    fn enter_exports_and_reset_clears_flag() {
        let dir = std::env::temp_dir().join(format!("basilisk-{}-tool", std::process::id()));
        let path = dir.join("plan");
        let mut tool = ExportTool::new(Path::new("/unused"), (1025, 705));
        tool.input = PathInput {
            text: path.to_string_lossy().into_owned(),
            caret: 0,
        };

        let mut h = Harness::new();
        h.plan.create_room(0, 0).unwrap();
        tool.handle_event(&mut h.ctx(), Some(&InputEvent::Key(Key::Enter)), [0, 0], Lifecycle::Normal);
        assert!(tool.exported);
        assert_eq!(h.status.severity, Severity::Info);
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "Basilisk 0\n1\n0 0\n0\n"
        );

        tool.handle_event(&mut h.ctx(), None, [0, 0], Lifecycle::Reset);
        assert!(!tool.exported);
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn failed_export_reports_error() {
        let mut tool = ExportTool::new(Path::new("/"), (1025, 705));
        let mut h = Harness::new();
        tool.handle_event(&mut h.ctx(), Some(&InputEvent::Key(Key::Enter)), [0, 0], Lifecycle::Normal);
        assert!(!tool.exported);
        assert_eq!(h.status.severity, Severity::Error);
        assert_eq!(h.status.title, "File export error");
    }
}
