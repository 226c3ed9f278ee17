//! Attack definitions and the per-agent attack book.
//!
//! Definitions are registered once when an agent is built and never change
//! afterwards. The book keeps registration order, which is also the
//! selector's tie-break order.

use std::fmt;
use std::sync::Arc;

use skirmish_core::config::AttackSpec;
use skirmish_core::enums::{AttackKind, BossPhase};

use crate::body::Body;
use crate::host::{CombatWorld, EventSink, TargetInfo};

/// Situation handed to availability predicates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AvailabilityContext {
    /// `None` for agents without a phase controller.
    pub boss_phase: Option<BossPhase>,
    pub health_ratio: f64,
    pub target_distance: Option<f64>,
}

/// Everything a custom effect may touch when it fires.
pub struct EffectContext<'a> {
    pub attack: &'a AttackDefinition,
    pub body: &'a mut Body,
    pub target: Option<TargetInfo>,
    pub world: &'a mut dyn CombatWorld,
    pub events: &'a mut dyn EventSink,
}

pub type AvailabilityFn = Arc<dyn Fn(&AvailabilityContext) -> bool + Send + Sync>;

/// Replaces the default effect of an attack entirely.
///
/// Panics are not caught by the pipeline.
pub type CustomEffectFn = Arc<dyn Fn(&mut EffectContext<'_>) + Send + Sync>;

#[derive(Clone)]
pub struct AttackDefinition {
    pub name: String,
    pub kind: AttackKind,
    pub damage: f64,
    pub range: f64,
    pub telegraph_ms: f64,
    pub commit_ms: f64,
    pub cooldown_ms: f64,
    pub priority: f64,
    pub needs_face_target: bool,
    pub availability: Option<AvailabilityFn>,
    pub custom: Option<CustomEffectFn>,
}

impl AttackDefinition {
    /// A definition with zero timings and priority, facing its target.
    pub fn new(name: impl Into<String>, kind: AttackKind, damage: f64, range: f64) -> Self {
        Self {
            name: name.into(),
            kind,
            damage,
            range,
            telegraph_ms: 0.0,
            commit_ms: 0.0,
            cooldown_ms: 0.0,
            priority: 0.0,
            needs_face_target: true,
            availability: None,
            custom: None,
        }
    }

    pub fn with_timing(mut self, telegraph_ms: f64, commit_ms: f64, cooldown_ms: f64) -> Self {
        self.telegraph_ms = telegraph_ms;
        self.commit_ms = commit_ms;
        self.cooldown_ms = cooldown_ms;
        self
    }

    pub fn with_priority(mut self, priority: f64) -> Self {
        self.priority = priority;
        self
    }

    pub fn without_facing(mut self) -> Self {
        self.needs_face_target = false;
        self
    }

    pub fn with_availability<F>(mut self, predicate: F) -> Self
    where
        F: Fn(&AvailabilityContext) -> bool + Send + Sync + 'static,
    {
        self.availability = Some(Arc::new(predicate));
        self
    }

    pub fn with_custom_effect<F>(mut self, effect: F) -> Self
    where
        F: Fn(&mut EffectContext<'_>) + Send + Sync + 'static,
    {
        self.custom = Some(Arc::new(effect));
        self
    }

    /// Restrict the attack to the listed boss phases.
    pub fn gated_to(self, phases: Vec<BossPhase>) -> Self {
        self.with_availability(move |ctx| ctx.boss_phase.is_some_and(|phase| phases.contains(&phase)))
    }

    pub fn from_spec(spec: &AttackSpec) -> Self {
        let mut definition = Self::new(spec.name.clone(), spec.kind, spec.damage, spec.range)
            .with_timing(spec.telegraph_ms, spec.commit_ms, spec.cooldown_ms)
            .with_priority(spec.priority);
        definition.needs_face_target = spec.needs_face_target;
        if !spec.phases.is_empty() {
            definition = definition.gated_to(spec.phases.clone());
        }
        definition
    }

    /// Whether the availability predicate (if any) holds.
    pub fn is_available(&self, ctx: &AvailabilityContext) -> bool {
        self.availability.as_ref().map_or(true, |pred| pred(ctx))
    }
}

impl fmt::Debug for AttackDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AttackDefinition")
            .field("name", &self.name)
            .field("kind", &self.kind)
            .field("damage", &self.damage)
            .field("range", &self.range)
            .field("telegraph_ms", &self.telegraph_ms)
            .field("commit_ms", &self.commit_ms)
            .field("cooldown_ms", &self.cooldown_ms)
            .field("priority", &self.priority)
            .field("needs_face_target", &self.needs_face_target)
            .field("gated", &self.availability.is_some())
            .field("custom", &self.custom.is_some())
            .finish()
    }
}

/// Ordered set of attack definitions, unique by name.
#[derive(Debug, Clone, Default)]
pub struct AttackBook {
    definitions: Vec<AttackDefinition>,
}

impl AttackBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a definition. Returns false (and keeps the existing one)
    /// when the name is already taken.
    pub fn register(&mut self, definition: AttackDefinition) -> bool {
        if self.get(&definition.name).is_some() {
            return false;
        }
        self.definitions.push(definition);
        true
    }

    pub fn get(&self, name: &str) -> Option<&AttackDefinition> {
        self.definitions.iter().find(|d| d.name == name)
    }

    /// Remove a definition. Unknown names are a no-op.
    pub fn remove(&mut self, name: &str) -> Option<AttackDefinition> {
        let index = self.definitions.iter().position(|d| d.name == name)?;
        Some(self.definitions.remove(index))
    }

    /// Definitions in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &AttackDefinition> {
        self.definitions.iter()
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

impl FromIterator<AttackDefinition> for AttackBook {
    fn from_iter<T: IntoIterator<Item = AttackDefinition>>(iter: T) -> Self {
        let mut book = AttackBook::new();
        for definition in iter {
            book.register(definition);
        }
        book
    }
}
