//! Editing tools and the dispatcher that keeps exactly one of them active.

use tracing::debug;

use crate::canvas::Canvas;
use crate::input::InputEvent;
use crate::plan::Plan;
use crate::status::StatusLine;

mod export;
mod help;
mod room;
mod thing;

pub use export::ExportTool;
pub use help::HelpTool;
pub use room::RoomTool;
pub use thing::ThingTool;

/// Why a tool is being called.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    /// Regular input while active.
    Normal,
    /// Re-selected while active, or cancelled: back to a neutral sub-state.
    Reset,
    /// About to become inactive.
    Stop,
    /// Just became active.
    Begin,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolKind {
    Help,
    Room,
    Thing,
    Export,
}

impl ToolKind {
    #[cfg(test)]
    pub const ALL: [ToolKind; 4] = [ToolKind::Help, ToolKind::Room, ToolKind::Thing, ToolKind::Export];

    #[inline]
    fn slot(self) -> usize {
        self as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CursorKind {
    Arrow,
    Text,
}

/// System cursor as the tools want it; applied to the window every frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CursorState {
    pub kind: CursorKind,
    pub visible: bool,
}

impl Default for CursorState {
    fn default() -> Self {
        Self {
            kind: CursorKind::Arrow,
            visible: true,
        }
    }
}

/// What a tool may touch while handling a call.
pub struct ToolContext<'a> {
    pub plan: &'a mut Plan,
    pub status: &'a mut StatusLine,
    pub cursor: &'a mut CursorState,
}

pub trait Tool {
    /// `event` is only set for `Lifecycle::Normal`.
    fn handle_event(
        &mut self,
        ctx: &mut ToolContext<'_>,
        event: Option<&InputEvent>,
        cursor: [i32; 2],
        signal: Lifecycle,
    );

    fn draw(&self, canvas: &mut dyn Canvas, plan: &Plan, cursor: [i32; 2], ticks_ms: u64);
}

/// Lifecycle calls needed to go from `current` to `requested`.
pub fn transition(current: ToolKind, requested: ToolKind) -> Vec<(ToolKind, Lifecycle)> {
    if current == requested {
        vec![(current, Lifecycle::Reset)]
    } else {
        vec![(current, Lifecycle::Stop), (requested, Lifecycle::Begin)]
    }
}

pub struct Toolbox {
    tools: [Box<dyn Tool>; 4],
    active: ToolKind,
}

impl Toolbox {
    /// Tools in `ToolKind` declaration order. Help starts active but has not been
    /// sent `Begin` yet.
    pub fn with_tools(tools: [Box<dyn Tool>; 4]) -> Self {
        Self {
            tools,
            active: ToolKind::Help,
        }
    }

    pub fn active(&self) -> ToolKind {
        self.active
    }

    pub fn begin(&mut self, ctx: &mut ToolContext<'_>, cursor: [i32; 2]) {
        self.signal(self.active, ctx, cursor, Lifecycle::Begin);
    }

    /// Make `requested` active, running the lifecycle hooks. Returns true if
    /// the active tool changed.
    pub fn switch_to(&mut self, requested: ToolKind, ctx: &mut ToolContext<'_>, cursor: [i32; 2]) -> bool {
        let from = self.active;
        for (kind, signal) in transition(from, requested) {
            self.signal(kind, ctx, cursor, signal);
        }
        self.active = requested;
        if from != requested {
            *ctx.cursor = CursorState {
                kind: CursorKind::Arrow,
                ..*ctx.cursor
            };
            debug!(?from, to = ?requested, "tool switched");
        }
        from != requested
    }

    pub fn signal(&mut self, kind: ToolKind, ctx: &mut ToolContext<'_>, cursor: [i32; 2], signal: Lifecycle) {
        self.tools[kind.slot()].handle_event(ctx, None, cursor, signal);
    }

    pub fn dispatch(&mut self, event: &InputEvent, ctx: &mut ToolContext<'_>, cursor: [i32; 2]) {
        self.tools[self.active.slot()].handle_event(ctx, Some(event), cursor, Lifecycle::Normal);
    }

    pub fn draw(&self, canvas: &mut dyn Canvas, plan: &Plan, cursor: [i32; 2], ticks_ms: u64) {
        self.tools[self.active.slot()].draw(canvas, plan, cursor, ticks_ms);
    }
}

/// Owned state a `ToolContext` can borrow from in tests.
#[cfg(test)]
pub(crate) struct Harness {
    pub plan: Plan,
    pub status: StatusLine,
    pub cursor: CursorState,
}

#[cfg(test)]
impl Harness {
    pub fn new() -> Self {
        Self {
            plan: Plan::new(32, crate::plan::Limits::default()),
            status: StatusLine::default(),
            cursor: CursorState::default(),
        }
    }

    pub fn ctx(&mut self) -> ToolContext<'_> {
        ToolContext {
            plan: &mut self.plan,
            status: &mut self.status,
            cursor: &mut self.cursor,
        }
    }
}
