use crate::config::MapConfig;
use crate::motion;
use crate::registry::AircraftRegistry;
use crate::render::{IconSpec, MapHandle, MapRenderer, RenderError, reconcile};
use crate::scheduler::SteppableTask;

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum SimulationState {
    Idle,
    Running,
}

/// Outcome of a single tick.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct TickReport {
    pub tick: u64,
    pub rendered: usize,
    pub failed: usize,
}

/// Everything a tick needs: the aircraft, the map they are drawn on, and the
/// renderer that draws them. Built once at startup.
pub struct Simulation<R: MapRenderer> {
    registry: AircraftRegistry,
    renderer: R,
    map: MapHandle,
    icon: IconSpec,
    state: SimulationState,
    ticks: u64,
}

impl<R: MapRenderer> Simulation<R> {
    /// Creates the map and its tile layer, leaving the simulation [`SimulationState::Idle`].
    ///
    /// # Errors
    ///
    /// Fails if the renderer cannot create the map or its tile layer.
    pub fn new(
        registry: AircraftRegistry,
        mut renderer: R,
        map_config: &MapConfig,
    ) -> Result<Self, RenderError> {
        let map = renderer.create_map(map_config.center(), map_config.zoom)?;
        renderer.add_tile_layer(
            map,
            &map_config.tile_url_template,
            &map_config.attribution,
            map_config.max_zoom,
        )?;

        Ok(Simulation {
            registry,
            renderer,
            map,
            icon: IconSpec::airplane(),
            state: SimulationState::Idle,
            ticks: 0,
        })
    }

    /// Advances every aircraft one step and reconciles its marker.
    ///
    /// Records are handled in registry order, motion before render. A render
    /// failure is logged and only skips that aircraft's visual for this tick.
    pub fn tick(&mut self) -> TickReport {
        self.state = SimulationState::Running;
        self.ticks += 1;

        let renderer = &mut self.renderer;
        let map = self.map;
        let icon = &self.icon;
        let mut rendered = 0;
        let mut failed = 0;

        self.registry.for_each(|aircraft| {
            motion::advance(aircraft);
            match reconcile(&mut *renderer, map, icon, aircraft) {
                Ok(()) => rendered += 1,
                Err(err) => {
                    failed += 1;
                    log::warn!("Skipping render of {0} this tick: {err}", aircraft.id());
                }
            }
        });

        log::debug!(
            "Tick {0}: rendered {rendered}, failed {failed}",
            self.ticks
        );
        TickReport {
            tick: self.ticks,
            rendered,
            failed,
        }
    }

    #[must_use]
    pub fn state(&self) -> SimulationState {
        self.state
    }

    #[must_use]
    pub fn registry(&self) -> &AircraftRegistry {
        &self.registry
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    #[must_use]
    pub fn map(&self) -> MapHandle {
        self.map
    }
}

impl<R: MapRenderer + Send + 'static> SteppableTask for Simulation<R> {
    // There is no stopped state; only the scheduler's stop signal ends the loop.
    fn step(&mut self) -> bool {
        self.tick();
        true
    }
}
