use indexmap::IndexSet;
use log::{debug, trace};

use crate::action::{Action, ActionError, Undo};
use crate::grid::{Grid, Position, Size};
use crate::module::{Chunk, Module, ModuleKind};
use crate::property::PropMap;
use crate::pulse::Pulse;

/// The simulated board: one module per cell, the coordinates of the modules
/// that fire on their own, and the pulses currently in flight.
#[derive(Debug, Clone)]
pub struct Board {
    modules: Grid<Module>,
    active: IndexSet<Position>,
    pulses: IndexSet<Pulse>,
}

impl Board {
    pub fn new(size: Size) -> Self {
        Self {
            modules: Grid::new(size, &mut |position| Module::new(ModuleKind::Empty, position)),
            active: IndexSet::new(),
            pulses: IndexSet::new(),
        }
    }

    pub fn size(&self) -> Size {
        self.modules.size()
    }

    pub fn get(&self, position: Position) -> Option<&Module> {
        self.modules.get(position)
    }

    pub fn modules(&self) -> &Grid<Module> {
        &self.modules
    }

    pub fn active(&self) -> impl Iterator<Item = Position> + '_ {
        self.active.iter().copied()
    }

    pub fn is_active(&self, position: Position) -> bool {
        self.active.contains(&position)
    }

    pub fn pulses(&self) -> impl Iterator<Item = &Pulse> + '_ {
        self.pulses.iter()
    }

    pub fn add_pulse(&mut self, pulse: Pulse) -> bool {
        pulse.position.is_inner(self.size()) && self.pulses.insert(pulse)
    }

    pub fn get_prop_at(&self, position: Position) -> PropMap {
        self.get(position).map(Module::exposed_props).unwrap_or_default()
    }

    pub fn get_name_at(&self, position: Position) -> Option<&'static str> {
        self.get(position).map(Module::name)
    }

    pub fn get_chunk_at(&self, position: Position) -> Option<Chunk> {
        self.get(position)?.chunk()
    }

    /// Advances the simulation by one tick.
    ///
    /// Existing pulses are routed first, then every active module gets the
    /// beat. Pulses emitted in this tick are routed on the next one.
    pub fn update(&mut self, beats: u64) {
        let size = self.size();
        let mut next = IndexSet::with_capacity(self.pulses.len());

        for pulse in &self.pulses {
            let Some(module) = self.modules.get(pulse.position) else {
                continue;
            };

            for routed in module.on_pulse(*pulse) {
                if routed.position.is_inner(size) {
                    next.insert(routed);
                } else {
                    trace!("pulse left the board at {}", routed.position);
                }
            }
        }

        for position in &self.active {
            if let Some(module) = self.modules.get(*position) {
                next.extend(module.on_beat(beats));
            }
        }

        debug!("beat {}: {} -> {} pulses", beats, self.pulses.len(), next.len());

        self.pulses = next;
    }

    /// Replaces the module at `position` with the result of `action`,
    /// keeping the active set in step with the new occupant.
    pub fn apply(&mut self, action: &Action, position: Position) -> Result<Undo, ActionError> {
        let current = self.get(position).ok_or(ActionError::OutOfBounds(position))?;
        let (replacement, undo) = action.apply(current)?;

        self.install(position, replacement);

        Ok(undo)
    }

    /// Puts back what an earlier [`Board::apply`] at `position` replaced.
    pub fn revert(&mut self, undo: &Undo, position: Position) -> Result<(), ActionError> {
        let current = self.get(position).ok_or(ActionError::OutOfBounds(position))?;
        let restored = undo.apply(current)?;

        self.install(position, restored);

        Ok(())
    }

    fn install(&mut self, position: Position, module: Module) {
        let active = module.active();

        if let Ok(previous) = self.modules.replace(position, module) {
            if previous.active() {
                self.active.shift_remove(&position);
            }

            if active {
                self.active.insert(position);
            }
        }
    }
}
