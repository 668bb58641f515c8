//! Screen update scheduling
//!
//! Two independent triggers decide which screens get rasterized:
//!
//! - **Tick** ([`ScreenUpdateScheduler::update`]): once per simulation step,
//!   the host at the front of the pending queue drains one dirty screen with
//!   an unbounded budget and goes to the back of the queue if it still has
//!   work. One host per tick, however many are pending.
//! - **Resources freed** ([`ScreenUpdateScheduler::on_resources_freed`]):
//!   whenever the renderer reports freed budget, the nearest visible stale
//!   legacy panel or dirty host in front of the viewer is updated under that
//!   budget. This path ignores the pending queue entirely.
//!
//! Everything runs on the caller's thread; nothing blocks or suspends.

mod pending;

use std::collections::HashMap;
use std::sync::Arc;

use crate::config::SchedulerConfig;
use crate::ecs::Entity;
use crate::foundation::collections::{HandleMap, HostHandle};
use crate::render::ScreenRenderer;
use crate::scene::{Scene, Viewpoint};
use crate::screens::{
    LayoutDefinition, MultiScreenHost, Registration, ScreenError, ScreenLayout, ScreenView,
};

pub(crate) use pending::PendingSet;

/// Object picked by a resource-freed signal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateCandidate {
    /// A stale single-screen legacy panel
    LegacySurface(Entity),
    /// A multi-screen host with dirty screens
    Host(Entity),
}

impl UpdateCandidate {
    /// Entity of the candidate
    #[must_use]
    pub const fn entity(self) -> Entity {
        match self {
            Self::LegacySurface(entity) | Self::Host(entity) => entity,
        }
    }
}

/// Process-wide screen update service
///
/// Owns the multi-screen hosts, the pending set, and the injected scene and
/// renderer. Triggers do nothing until [`attach`](Self::attach) is called.
pub struct ScreenUpdateScheduler<S: Scene, R: ScreenRenderer> {
    config: SchedulerConfig,
    scene: S,
    renderer: R,
    hosts: HandleMap<HostHandle, MultiScreenHost>,
    by_entity: HashMap<Entity, HostHandle>,
    pending: PendingSet,
    attached: bool,
}

impl<S: Scene, R: ScreenRenderer> ScreenUpdateScheduler<S, R> {
    /// Create a detached scheduler
    pub fn new(config: SchedulerConfig, scene: S, renderer: R) -> Self {
        Self {
            config,
            scene,
            renderer,
            hosts: HandleMap::with_key(),
            by_entity: HashMap::new(),
            pending: PendingSet::default(),
            attached: false,
        }
    }

    /// Start reacting to ticks and renderer signals
    pub fn attach(&mut self) {
        if self.attached {
            return;
        }
        self.attached = true;
        log::info!(
            "Screen update scheduler attached (visibility radius {}, headless {})",
            self.config.visibility_radius,
            self.config.headless
        );
    }

    /// Stop reacting to triggers and drop all pending work
    ///
    /// Hosts and their dirty flags survive; a later attach only picks them up
    /// through resource signals or their next clean-to-dirty transition.
    pub fn detach(&mut self) {
        if !self.attached {
            return;
        }
        self.attached = false;
        self.pending.clear();
        log::info!("Screen update scheduler detached");
    }

    /// Whether triggers are live
    #[must_use]
    pub const fn is_attached(&self) -> bool {
        self.attached
    }

    /// Active configuration
    #[must_use]
    pub const fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    /// Injected scene
    #[must_use]
    pub const fn scene(&self) -> &S {
        &self.scene
    }

    /// Injected scene, for the simulation to update
    pub fn scene_mut(&mut self) -> &mut S {
        &mut self.scene
    }

    /// Injected renderer
    #[must_use]
    pub const fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Injected renderer
    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    /// Give `entity` a multi-screen host, replacing any existing one
    pub fn attach_host(&mut self, entity: Entity, layout: Arc<ScreenLayout>) -> HostHandle {
        if self.by_entity.contains_key(&entity) {
            self.detach_host(entity);
        }
        log::info!("Creating multi screen host for {entity} with layout '{}'", layout.name());
        let handle = self.hosts.insert(MultiScreenHost::new(entity, layout));
        self.by_entity.insert(entity, handle);
        handle
    }

    /// Validate `definition` and give `entity` a host with it
    ///
    /// Fails with [`ScreenError::MalformedLayout`] without touching any
    /// existing host of `entity`.
    pub fn attach_host_from_definition(
        &mut self,
        entity: Entity,
        definition: LayoutDefinition,
    ) -> Result<HostHandle, ScreenError> {
        let layout = ScreenLayout::from_definition(definition)?;
        Ok(self.attach_host(entity, Arc::new(layout)))
    }

    /// Destroy the host of `entity`, removing it from the pending set
    pub fn detach_host(&mut self, entity: Entity) -> Option<MultiScreenHost> {
        let handle = self.by_entity.remove(&entity)?;
        self.pending.remove(handle);
        let host = self.hosts.remove(handle);
        log::info!("Removed multi screen host for {entity}");
        host
    }

    /// Host of `entity`
    #[must_use]
    pub fn host(&self, entity: Entity) -> Option<&MultiScreenHost> {
        self.hosts.get(*self.by_entity.get(&entity)?)
    }

    /// Number of live hosts
    #[must_use]
    pub fn host_count(&self) -> usize {
        self.hosts.len()
    }

    /// Number of hosts in the pending set
    #[must_use]
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Whether the host of `entity` is in the pending set
    #[must_use]
    pub fn is_pending(&self, entity: Entity) -> bool {
        self.by_entity
            .get(&entity)
            .is_some_and(|&handle| self.pending.contains(handle))
    }

    /// Access one screen of `entity` by id (case-insensitive)
    pub fn screen(&mut self, entity: Entity, id: &str) -> Result<ScreenView<'_>, ScreenError> {
        let handle = *self
            .by_entity
            .get(&entity)
            .ok_or(ScreenError::MissingCapability { entity })?;
        let host = self
            .hosts
            .get_mut(handle)
            .ok_or(ScreenError::MissingCapability { entity })?;
        let index = host.index_of(id)?;

        Ok(ScreenView::new(
            host,
            index,
            Registration {
                handle,
                pending: &mut self.pending,
                scene: &self.scene,
                visibility_radius: self.config.visibility_radius,
            },
        ))
    }

    /// Drain one screen of `entity` under `budget`, bypassing both triggers
    pub fn drain_host(&mut self, entity: Entity, budget: u64) -> bool {
        let host = self
            .by_entity
            .get(&entity)
            .and_then(|&handle| self.hosts.get_mut(handle));
        let Some(host) = host else {
            return false;
        };
        host.drain_one(&self.scene, &mut self.renderer, budget)
    }

    /// Periodic tick: advance at most one pending host
    pub fn update(&mut self) {
        if !self.attached {
            return;
        }
        if self.config.headless {
            if !self.pending.is_empty() {
                log::debug!("Headless: dropping {} pending screen hosts", self.pending.len());
            }
            self.pending.clear();
            return;
        }

        let Some(handle) = self.pending.pop_front() else {
            return;
        };
        let radius = self.config.visibility_radius;
        let has_more = self.hosts.get_mut(handle).is_some_and(|host| {
            host.is_visible(&self.scene, radius)
                && host.drain_one(&self.scene, &mut self.renderer, u64::MAX)
        });

        if has_more {
            self.pending.requeue(handle);
        } else {
            self.pending.forget(handle);
            log::trace!("Screen host left the pending set");
        }
    }

    /// Resource-freed signal: update the single best candidate under `budget`
    ///
    /// Returns the candidate that was picked, if any.
    pub fn on_resources_freed(&mut self, budget: u64) -> Option<UpdateCandidate> {
        if !self.attached || self.config.headless {
            return None;
        }
        let view = self.scene.viewpoint()?;
        let candidate = self.select_candidate(&view)?;
        log::debug!("Freed budget {budget} goes to {candidate:?}");

        match candidate {
            UpdateCandidate::LegacySurface(entity) => {
                self.scene.refresh_legacy_surface(entity, budget);
            }
            UpdateCandidate::Host(entity) => {
                self.drain_host(entity, budget);
            }
        }
        Some(candidate)
    }

    /// Handle every freed-resource signal the renderer has queued
    ///
    /// Returns the number of signals consumed.
    pub fn pump_renderer_signals(&mut self) -> usize {
        let mut consumed = 0;
        while let Some(budget) = self.renderer.poll_resources_freed() {
            self.on_resources_freed(budget);
            consumed += 1;
        }
        consumed
    }

    /// Nearest stale legacy panel or dirty host inside the region of interest
    fn select_candidate(&self, view: &Viewpoint) -> Option<UpdateCandidate> {
        let radius = self.config.visibility_radius;
        let center = view.point_ahead(self.config.interest_distance);

        let mut best = None;
        let mut best_distance = radius;
        for entity in self.scene.query_sphere(center, self.config.interest_radius) {
            let Some(position) = self.scene.position(entity) else {
                continue;
            };
            let distance = view.distance_to(&position);
            if distance >= best_distance {
                continue;
            }

            let candidate = if self.is_stale_legacy_surface(entity, radius) {
                Some(UpdateCandidate::LegacySurface(entity))
            } else if self.is_dirty_visible_host(entity, radius) {
                Some(UpdateCandidate::Host(entity))
            } else {
                None
            };
            if candidate.is_some() {
                best = candidate;
                best_distance = distance;
            }
        }
        best
    }

    fn is_stale_legacy_surface(&self, entity: Entity, radius: f32) -> bool {
        self.scene
            .legacy_surface(entity)
            .is_some_and(|status| {
                status.stale && status.shown && self.scene.is_within_range(entity, radius)
            })
    }

    fn is_dirty_visible_host(&self, entity: Entity, radius: f32) -> bool {
        self.host(entity)
            .is_some_and(|host| host.is_dirty() && host.is_visible(&self.scene, radius))
    }
}
