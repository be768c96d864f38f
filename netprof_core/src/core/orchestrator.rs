//! User-initiated profile workflows.
//!
//! Each workflow is a short state machine:
//!
//! ```text
//! Idle -> Confirming -> InFlight -> Succeeded -> Idle
//!              |            \----> Failed ----> Idle
//!              \--(declined)----------------> Idle
//! ```
//!
//! A deferred create goes `InFlight -> Idle` directly.
//!
//! The orchestrator keeps no state of its own between runs; it borrows the
//! session manager for remote calls and an injected [`Confirm`] for the
//! user's answer, so any front-end (terminal, GUI, tests) can drive it.
//! Phase changes are broadcast as [`WorkflowEvent`]s for front-ends that
//! want to render progress.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, error, info};
use tokio::sync::broadcast;

use super::errors::{ProfileError, Result};
use super::profile::{find_profile, validate_name, ProfileRecord};
use super::session_manager::SessionManager;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WorkflowKind {
    Switch,
    Remove,
    Create,
}

impl WorkflowKind {
    /// Text for the notification shown after a successful run.
    pub fn success_message(self, name: &str) -> String {
        match self {
            WorkflowKind::Switch => format!("Profile '{name}' switched successfully"),
            WorkflowKind::Remove => format!("Profile '{name}' removed successfully"),
            WorkflowKind::Create => format!("Profile '{name}' created"),
        }
    }

    /// Prefix for the notification shown after a failed run.
    pub fn failure_context(self) -> &'static str {
        match self {
            WorkflowKind::Switch => "failed to select profile",
            WorkflowKind::Remove => "failed to remove profile",
            WorkflowKind::Create => "failed to create profile",
        }
    }
}

impl fmt::Display for WorkflowKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorkflowKind::Switch => f.write_str("switch"),
            WorkflowKind::Remove => f.write_str("remove"),
            WorkflowKind::Create => f.write_str("create"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WorkflowPhase {
    Idle,
    Confirming,
    InFlight,
    Succeeded,
    Failed,
}

impl WorkflowPhase {
    pub fn can_advance_to(self, next: WorkflowPhase) -> bool {
        use WorkflowPhase::*;
        matches!(
            (self, next),
            (Idle, Confirming)
                | (Idle, InFlight)
                | (Idle, Failed)
                | (Confirming, InFlight)
                | (Confirming, Idle)
                | (InFlight, Succeeded)
                | (InFlight, Failed)
                | (InFlight, Idle)
                | (Succeeded, Idle)
                | (Failed, Idle)
        )
    }
}

/// One phase change of one workflow run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkflowEvent {
    pub kind: WorkflowKind,
    pub target: String,
    pub phase: WorkflowPhase,
}

/// What the user is asked before a destructive or state-changing call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmPrompt {
    pub title: String,
    pub message: String,
}

impl ConfirmPrompt {
    fn for_switch(name: &str) -> Self {
        Self {
            title: "Switch Profile".into(),
            message: format!("Are you sure you want to switch to '{name}'?"),
        }
    }

    fn for_remove(name: &str) -> Self {
        Self {
            title: "Delete Profile".into(),
            message: format!("Are you sure you want to delete '{name}'?"),
        }
    }
}

/// The front-end's yes/no dialog.
#[async_trait]
pub trait Confirm: Send + Sync {
    /// `true` only when the user explicitly affirmed.
    async fn confirm(&self, prompt: &ConfirmPrompt) -> bool;
}

/// How a workflow ended when it did not fail.
#[derive(Debug, Clone, PartialEq)]
pub enum WorkflowOutcome {
    /// The daemon accepted the mutation. `profiles` is the snapshot after the
    /// follow-up refresh, or the last good one when that refresh failed, in
    /// which case `refresh_error` says why.
    Completed {
        profiles: Vec<ProfileRecord>,
        refresh_error: Option<ProfileError>,
    },
    /// The target is already the active profile; nothing was sent.
    AlreadyActive,
    /// The user said no.
    Declined,
    /// Input was accepted but the operation is not wired to the daemon yet.
    /// The run goes `InFlight -> Idle` without a `Succeeded` event.
    Deferred,
}

/// Drives the switch, remove and create workflows.
#[derive(Clone)]
pub struct ActionOrchestrator {
    session: SessionManager,
    confirm: Arc<dyn Confirm>,
    events: broadcast::Sender<WorkflowEvent>,
}

impl ActionOrchestrator {
    pub fn new(session: SessionManager, confirm: Arc<dyn Confirm>) -> Self {
        let (events, _) = broadcast::channel(64);
        Self {
            session,
            confirm,
            events,
        }
    }

    pub fn session(&self) -> &SessionManager {
        &self.session
    }

    /// Phase changes of every workflow started after this call.
    pub fn subscribe(&self) -> broadcast::Receiver<WorkflowEvent> {
        self.events.subscribe()
    }

    /// Make `name` the active profile, after the user confirms.
    ///
    /// The target must be in the current snapshot; switching to the profile
    /// that is already active is a no-op that never reaches the daemon.
    pub async fn switch_profile(&self, name: &str) -> Result<WorkflowOutcome> {
        let mut run = Run::new(&self.events, WorkflowKind::Switch, name);
        let snapshot = self.session.profiles();

        let target = match validate_name(name).and_then(|name| {
            find_profile(&snapshot, name)
                .ok_or_else(|| ProfileError::invalid(format!("unknown profile '{name}'")))
        }) {
            Ok(target) => target,
            Err(e) => return Err(run.fail(e)),
        };
        if target.is_active {
            debug!("'{}' is already active, nothing to do", name);
            return Ok(WorkflowOutcome::AlreadyActive);
        }

        if !run.confirm(self.confirm.as_ref(), ConfirmPrompt::for_switch(name)).await {
            return Ok(WorkflowOutcome::Declined);
        }

        run.advance(WorkflowPhase::InFlight);
        match self.session.switch_active(name).await {
            Ok(()) => Ok(self.finish_mutation(run).await),
            Err(e) => Err(run.fail(e)),
        }
    }

    /// Delete `name`, after the user confirms.
    pub async fn remove_profile(&self, name: &str) -> Result<WorkflowOutcome> {
        let mut run = Run::new(&self.events, WorkflowKind::Remove, name);
        if let Err(e) = validate_name(name) {
            return Err(run.fail(e));
        }

        if !run.confirm(self.confirm.as_ref(), ConfirmPrompt::for_remove(name)).await {
            return Ok(WorkflowOutcome::Declined);
        }

        run.advance(WorkflowPhase::InFlight);
        match self.session.remove_profile(name).await {
            Ok(()) => Ok(self.finish_mutation(run).await),
            Err(e) => Err(run.fail(e)),
        }
    }

    /// Create `name`. The name comes from the front-end's form, whose submit
    /// button is the confirmation, so no separate prompt is shown.
    ///
    /// Creation is not wired to the daemon yet: a valid name yields
    /// [`WorkflowOutcome::Deferred`] and the cache is not refreshed.
    pub async fn create_profile(&self, name: &str) -> Result<WorkflowOutcome> {
        let mut run = Run::new(&self.events, WorkflowKind::Create, name);
        if let Err(e) = validate_name(name) {
            return Err(run.fail(e));
        }

        run.advance(WorkflowPhase::InFlight);
        match self.session.create_profile(name).await {
            // Nothing was created, so no `Succeeded` is broadcast.
            Ok(()) => {
                run.advance(WorkflowPhase::Idle);
                Ok(WorkflowOutcome::Deferred)
            }
            Err(e) => Err(run.fail(e)),
        }
    }

    /// The mutation went through: pull the daemon's view before reporting.
    async fn finish_mutation(&self, mut run: Run<'_>) -> WorkflowOutcome {
        run.advance(WorkflowPhase::Succeeded);
        info!("{}", run.kind.success_message(&run.target));

        let outcome = match self.session.list_profiles().await {
            Ok(profiles) => WorkflowOutcome::Completed {
                profiles,
                refresh_error: None,
            },
            Err(e) => {
                error!("refresh after {} of '{}' failed: {}", run.kind, run.target, e);
                WorkflowOutcome::Completed {
                    profiles: self.session.profiles(),
                    refresh_error: Some(e),
                }
            }
        };
        run.advance(WorkflowPhase::Idle);
        outcome
    }
}

/// Phase bookkeeping for a single workflow run.
struct Run<'a> {
    events: &'a broadcast::Sender<WorkflowEvent>,
    kind: WorkflowKind,
    target: String,
    phase: WorkflowPhase,
}

impl<'a> Run<'a> {
    fn new(events: &'a broadcast::Sender<WorkflowEvent>, kind: WorkflowKind, target: &str) -> Self {
        Self {
            events,
            kind,
            target: target.to_owned(),
            phase: WorkflowPhase::Idle,
        }
    }

    fn advance(&mut self, next: WorkflowPhase) {
        debug_assert!(
            self.phase.can_advance_to(next),
            "illegal transition {:?} -> {:?}",
            self.phase,
            next
        );
        debug!("{} '{}': {:?} -> {:?}", self.kind, self.target, self.phase, next);
        self.phase = next;
        // No subscribers is fine.
        let _ = self.events.send(WorkflowEvent {
            kind: self.kind,
            target: self.target.clone(),
            phase: next,
        });
    }

    async fn confirm(&mut self, confirm: &dyn Confirm, prompt: ConfirmPrompt) -> bool {
        self.advance(WorkflowPhase::Confirming);
        let affirmed = confirm.confirm(&prompt).await;
        if !affirmed {
            info!("{} of '{}' declined by user", self.kind, self.target);
            self.advance(WorkflowPhase::Idle);
        }
        affirmed
    }

    fn fail(&mut self, e: ProfileError) -> ProfileError {
        self.advance(WorkflowPhase::Failed);
        error!("{}: {}", self.kind.failure_context(), e);
        self.advance(WorkflowPhase::Idle);
        e
    }
}
