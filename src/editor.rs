//! The editor session: plan, status line, tools and frame pacing, independent
//! of the window system.

use std::time::Duration;

use tracing::info;

use crate::canvas::FrameBuffer;
use crate::config::{Config, FrameDelays};
use crate::input::{InputEvent, Key};
use crate::plan::Plan;
use crate::renderer;
use crate::status::StatusLine;
use crate::tools::{
    CursorState, ExportTool, HelpTool, Lifecycle, RoomTool, ThingTool, Tool, ToolContext, ToolKind,
    Toolbox,
};

pub struct Editor {
    pub plan: Plan,
    pub status: StatusLine,
    pub cursor: CursorState,
    tools: Toolbox,
    thing_scale: i32,
    pointer: [i32; 2],
    pointer_moved: bool,
    has_focus: bool,
    occluded: bool,
    running: bool,
    delays: FrameDelays,
}

impl Editor {
    /// Start with the help tool active.
    pub fn new(config: &Config) -> Self {
        let (w, h) = config.canvas_size();
        let tools: [Box<dyn Tool>; 4] = [
            Box::new(HelpTool::default()),
            Box::new(RoomTool),
            Box::new(ThingTool::default()),
            Box::new(ExportTool::new(&config.export_path, (w as i32, h as i32))),
        ];
        let mut editor = Self {
            plan: Plan::from_config(config),
            status: StatusLine::default(),
            cursor: CursorState::default(),
            tools: Toolbox::with_tools(tools),
            thing_scale: config.thing_scale(),
            pointer: [0, 0],
            pointer_moved: false,
            has_focus: true,
            occluded: false,
            running: true,
            delays: config.frame_delay,
        };
        let pointer = editor.pointer;
        editor.tools.begin(
            &mut ToolContext {
                plan: &mut editor.plan,
                status: &mut editor.status,
                cursor: &mut editor.cursor,
            },
            pointer,
        );
        editor.status.info(
            "All okay.",
            "F1 - help; F2 - room tool; F3 - thing tool; F5 - export world plan.",
        );
        editor
    }

    pub fn active_tool(&self) -> ToolKind {
        self.tools.active()
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn handle(&mut self, event: InputEvent) {
        let mut ctx = ToolContext {
            plan: &mut self.plan,
            status: &mut self.status,
            cursor: &mut self.cursor,
        };
        match event {
            InputEvent::Quit => {
                self.running = false;
                return;
            }
            InputEvent::Focus(focused) => self.has_focus = focused,
            InputEvent::Occluded(hidden) => self.occluded = hidden,
            InputEvent::MouseMove { x, y } => {
                self.pointer = [x, y];
                self.pointer_moved = true;
            }
            InputEvent::Key(Key::Escape) => {
                let active = self.tools.active();
                self.tools
                    .signal(active, &mut ctx, self.pointer, Lifecycle::Reset);
                return;
            }
            InputEvent::Key(Key::F(n)) => {
                if let Some((kind, title, detail)) = tool_binding(n) {
                    if self.tools.switch_to(kind, &mut ctx, self.pointer) {
                        info!(tool = ?kind, "tool selected");
                    }
                    ctx.status.info(title, detail);
                    return;
                }
            }
            _ => {}
        }
        self.tools.dispatch(&event, &mut ctx, self.pointer);
    }

    /// Delay before the next frame; clears the per-frame motion flag.
    pub fn end_frame(&mut self) -> Duration {
        let present = self.has_focus && !self.occluded;
        let delay = self.delays.pick(present, self.pointer_moved);
        self.pointer_moved = false;
        delay
    }

    pub fn draw(&self, fb: &mut FrameBuffer, ticks_ms: u64) {
        renderer::render_plan(fb, &self.plan, self.thing_scale);
        self.tools.draw(fb, &self.plan, self.pointer, ticks_ms);
        renderer::draw_status(fb, &self.status);
    }

    /// Send `Stop` to the active tool before the window goes away.
    pub fn shutdown(&mut self) {
        let active = self.tools.active();
        self.tools.signal(
            active,
            &mut ToolContext {
                plan: &mut self.plan,
                status: &mut self.status,
                cursor: &mut self.cursor,
            },
            self.pointer,
            Lifecycle::Stop,
        );
        info!("Goodbye.");
    }
}

fn tool_binding(n: u8) -> Option<(ToolKind, &'static str, &'static str)> {
    Some(match n {
        1 => (ToolKind::Help, "Help", "F1 - help; F2 - room tool; F3 - thing tool; F5 - export."),
        2 => (
            ToolKind::Room,
            "Room tool is now being used.",
            "Left click/Space places a room, right click/Delete removes it.",
        ),
        3 => (
            ToolKind::Thing,
            "Thing placing tool is now being used.",
            "Click places or selects; arrows turn it; E toggles the info panel.",
        ),
        5 => (ToolKind::Export, "Exporting world plan.", "Type the file path and press Enter."),
        _ => return None,
    })
}
