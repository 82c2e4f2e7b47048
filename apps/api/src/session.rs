//! Session-held résumé state, the one mutable thing in the service.
//!
//! The record is only ever replaced wholesale by `adopt`, from the completion
//! of a generation that holds the single-slot `GenerationGuard`. Readers take an
//! `Arc` snapshot and never observe a partially updated record.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::layout::Surface;
use crate::models::{ResumeRecord, TemplateVariant};

/// The adopted record plus where it sits in the generation history.
#[derive(Debug, Clone)]
pub struct ResumeSnapshot {
    /// 1 for the first adopted record, +1 for each replacement.
    pub generation: u64,
    pub generated_at: DateTime<Utc>,
    pub record: Arc<ResumeRecord>,
}

#[derive(Default)]
struct SessionState {
    current: Option<ResumeSnapshot>,
    /// Laid-out surfaces for `current`, keyed by variant. Cleared on adoption.
    surfaces: HashMap<TemplateVariant, Arc<Surface>>,
}

/// Returned by `begin_generation` when another generation holds the slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationBusy;

/// Returned by `adopt` when a newer generation was started after this one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StaleGeneration {
    pub ticket: u64,
    pub latest: u64,
}

pub struct ResumeSession {
    state: RwLock<SessionState>,
    in_flight: AtomicBool,
    latest_ticket: AtomicU64,
}

/// Holds the single generation slot. Released on drop, including when the
/// request future is cancelled mid-call.
pub struct GenerationGuard {
    session: Arc<ResumeSession>,
    ticket: u64,
}

impl GenerationGuard {
    pub fn ticket(&self) -> u64 {
        self.ticket
    }
}

impl Drop for GenerationGuard {
    fn drop(&mut self) {
        self.session.in_flight.store(false, Ordering::Release);
        debug!(ticket = self.ticket, "Generation slot released");
    }
}

impl Default for ResumeSession {
    fn default() -> Self {
        Self::new()
    }
}

impl ResumeSession {
    pub fn new() -> Self {
        Self {
            state: RwLock::new(SessionState::default()),
            in_flight: AtomicBool::new(false),
            latest_ticket: AtomicU64::new(0),
        }
    }

    /// Claims the generation slot, or reports that one is already taken.
    pub fn begin_generation(self: &Arc<Self>) -> Result<GenerationGuard, GenerationBusy> {
        self.in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| GenerationBusy)?;

        let ticket = self.latest_ticket.fetch_add(1, Ordering::AcqRel) + 1;
        Ok(GenerationGuard {
            session: Arc::clone(self),
            ticket,
        })
    }

    pub fn is_generating(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Replaces the current record. Stored surfaces belong to the old record
    /// and are dropped.
    pub async fn adopt(
        &self,
        guard: &GenerationGuard,
        record: ResumeRecord,
    ) -> Result<ResumeSnapshot, StaleGeneration> {
        let latest = self.latest_ticket.load(Ordering::Acquire);
        if guard.ticket != latest {
            warn!(
                ticket = guard.ticket,
                latest, "Discarding stale generation result"
            );
            return Err(StaleGeneration {
                ticket: guard.ticket,
                latest,
            });
        }

        let mut state = self.state.write().await;
        let generation = state.current.as_ref().map_or(1, |s| s.generation + 1);
        let snapshot = ResumeSnapshot {
            generation,
            generated_at: Utc::now(),
            record: Arc::new(record),
        };
        state.current = Some(snapshot.clone());
        state.surfaces.clear();
        Ok(snapshot)
    }

    pub async fn current(&self) -> Option<ResumeSnapshot> {
        self.state.read().await.current.clone()
    }

    /// Stores a rendered surface if the record it was laid out from is still current.
    pub async fn store_surface(
        &self,
        generation: u64,
        variant: TemplateVariant,
        surface: Arc<Surface>,
    ) -> bool {
        let mut state = self.state.write().await;
        let is_current = state
            .current
            .as_ref()
            .is_some_and(|s| s.generation == generation);
        if is_current {
            state.surfaces.insert(variant, surface);
        }
        is_current
    }

    /// The surface rendered for `variant` from the current record, if any.
    pub async fn surface(&self, variant: TemplateVariant) -> Option<(ResumeSnapshot, Arc<Surface>)> {
        let state = self.state.read().await;
        let snapshot = state.current.clone()?;
        let surface = state.surfaces.get(&variant).cloned()?;
        Some((snapshot, surface))
    }
}
