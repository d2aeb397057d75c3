use egui::{Key, Modifiers, Pos2};
use rand::SeedableRng;
use rand::rngs::StdRng;

use super::{Tool, draw_preview};
use crate::command::{AirbrushCommand, spray};
use crate::input::PointerEvent;
use crate::state::EditorContext;

#[derive(Debug, Clone, PartialEq)]
pub enum AirbrushState {
    Idle,
    Spraying {
        command: AirbrushCommand,
        pos: Pos2,
        last_emit: f64,
        /// Fractional droplets owed from previous ticks
        carry: f32,
    },
}

/// Sprays droplets around the pointer while the button is held. Droplets are
/// emitted on ticks at the configured rate and baked into the command.
#[derive(Debug)]
pub struct AirbrushTool {
    state: AirbrushState,
    rng: StdRng,
}

impl AirbrushTool {
    pub fn new(seed: u64) -> Self {
        Self {
            state: AirbrushState::Idle,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn state(&self) -> &AirbrushState {
        &self.state
    }

    fn emit(&mut self, now: f64, ctx: &mut EditorContext) {
        let rate = ctx.settings.airbrush_emission_rate;
        let jet = ctx.settings.airbrush_jet_diameter;
        let AirbrushState::Spraying {
            command,
            pos,
            last_emit,
            carry,
        } = &mut self.state
        else {
            return;
        };

        let elapsed = (now - *last_emit).max(0.0) as f32;
        let owed = elapsed * rate + *carry;
        let count = owed.floor();
        *carry = owed - count;
        *last_emit = now;
        if count < 1.0 {
            return;
        }

        let droplets = spray(&mut self.rng, *pos, jet, count as usize);
        command.add_droplets(droplets);
        let preview = command.clone();
        draw_preview(ctx, preview);
    }
}

impl Tool for AirbrushTool {
    fn name(&self) -> &'static str {
        "Airbrush"
    }

    fn on_pointer_down(&mut self, event: &PointerEvent, ctx: &mut EditorContext) {
        // A second press while spraying is ignored.
        if !event.is_primary() || self.is_busy() {
            return;
        }
        ctx.begin_gesture();
        let command = AirbrushCommand::new(ctx.style.primary_color, ctx.settings.airbrush_droplet_diameter);
        self.state = AirbrushState::Spraying {
            command,
            pos: event.pos,
            last_emit: event.time,
            // Start with one droplet so a quick click leaves a mark.
            carry: 1.0,
        };
        self.emit(event.time, ctx);
    }

    fn on_pointer_move(&mut self, event: &PointerEvent, _ctx: &mut EditorContext) {
        if let AirbrushState::Spraying { pos, .. } = &mut self.state {
            *pos = event.pos;
        }
    }

    fn on_pointer_up(&mut self, event: &PointerEvent, ctx: &mut EditorContext) {
        if !event.is_primary() || !self.is_busy() {
            return;
        }
        self.emit(event.time, ctx);
        if let AirbrushState::Spraying { command, .. } = std::mem::replace(&mut self.state, AirbrushState::Idle) {
            if command.is_empty() {
                ctx.cancel_gesture();
            } else {
                log::debug!("Airbrush committed {} droplets", command.droplets().len());
                ctx.commit(command);
            }
        }
    }

    fn on_key_down(&mut self, key: Key, _modifiers: Modifiers, _time: f64, ctx: &mut EditorContext) -> bool {
        if key == Key::Escape && self.is_busy() {
            self.cancel(ctx);
            return true;
        }
        false
    }

    fn on_tick(&mut self, now: f64, ctx: &mut EditorContext) {
        self.emit(now, ctx);
    }

    fn wants_ticks(&self) -> bool {
        self.is_busy()
    }

    fn cancel(&mut self, ctx: &mut EditorContext) {
        if self.is_busy() {
            ctx.cancel_gesture();
        }
        self.state = AirbrushState::Idle;
    }

    fn is_busy(&self) -> bool {
        matches!(self.state, AirbrushState::Spraying { .. })
    }

    fn state_name(&self) -> &'static str {
        match self.state {
            AirbrushState::Idle => "Idle",
            AirbrushState::Spraying { .. } => "Spraying",
        }
    }
}
