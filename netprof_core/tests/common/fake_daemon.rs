//! A deterministic **in‑process stand‑in** for the daemon's profile endpoint.
//!
//! *  **From the test's perspective**
//!    * Seed the daemon's profiles with `FakeDaemon::with_profiles`.
//!    * Script how each call behaves with `set_get` / `set_switch` / `set_remove`.
//!    * Inspect how often each call reached the "daemon" with `calls`.
//!
//! Switch and remove really change the fake's state, so a follow-up
//! `get_profiles` shows the effect like the real daemon would.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use netprof_core::{ProfileError, ProfileRecord, ProfileService, SwitchReply};
use tokio::sync::Notify;

#[derive(Debug, Clone)]
pub enum Behaviour {
    /// Act like a healthy daemon.
    Normal,
    /// Return this error as a transport-level fault.
    Fault(ProfileError),
    /// Answer a switch with `success = false` and this reason.
    Refuse(String),
    /// Never answer.
    Hang,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Get,
    Switch,
    Remove,
}

pub struct FakeDaemon {
    profiles: Mutex<Vec<ProfileRecord>>,
    get: Mutex<Behaviour>,
    switch: Mutex<Behaviour>,
    remove: Mutex<Behaviour>,
    get_calls: AtomicUsize,
    switch_calls: AtomicUsize,
    remove_calls: AtomicUsize,
    /// Signalled every time a call enters the fake.
    pub entered: Notify,
}

impl FakeDaemon {
    pub fn with_profiles(profiles: &[(&str, bool)]) -> Arc<Self> {
        Arc::new(Self {
            profiles: Mutex::new(
                profiles
                    .iter()
                    .map(|(name, active)| ProfileRecord::new(*name, *active))
                    .collect(),
            ),
            get: Mutex::new(Behaviour::Normal),
            switch: Mutex::new(Behaviour::Normal),
            remove: Mutex::new(Behaviour::Normal),
            get_calls: AtomicUsize::new(0),
            switch_calls: AtomicUsize::new(0),
            remove_calls: AtomicUsize::new(0),
            entered: Notify::new(),
        })
    }

    pub fn set_get(&self, b: Behaviour) {
        *self.get.lock().unwrap() = b;
    }

    pub fn set_switch(&self, b: Behaviour) {
        *self.switch.lock().unwrap() = b;
    }

    pub fn set_remove(&self, b: Behaviour) {
        *self.remove.lock().unwrap() = b;
    }

    /// Replace the daemon-side state directly (e.g. another client acted).
    pub fn replace_profiles(&self, profiles: Vec<ProfileRecord>) {
        *self.profiles.lock().unwrap() = profiles;
    }

    pub fn calls(&self, op: Op) -> usize {
        match op {
            Op::Get => self.get_calls.load(Ordering::SeqCst),
            Op::Switch => self.switch_calls.load(Ordering::SeqCst),
            Op::Remove => self.remove_calls.load(Ordering::SeqCst),
        }
    }

    pub fn total_calls(&self) -> usize {
        self.calls(Op::Get) + self.calls(Op::Switch) + self.calls(Op::Remove)
    }

    fn enter(&self, counter: &AtomicUsize, behaviour: &Mutex<Behaviour>) -> Behaviour {
        counter.fetch_add(1, Ordering::SeqCst);
        self.entered.notify_waiters();
        behaviour.lock().unwrap().clone()
    }
}

#[async_trait]
impl ProfileService for FakeDaemon {
    async fn get_profiles(&self) -> Result<Vec<ProfileRecord>, ProfileError> {
        match self.enter(&self.get_calls, &self.get) {
            Behaviour::Normal | Behaviour::Refuse(_) => Ok(self.profiles.lock().unwrap().clone()),
            Behaviour::Fault(e) => Err(e),
            Behaviour::Hang => std::future::pending().await,
        }
    }

    async fn switch_profile(&self, name: &str) -> Result<SwitchReply, ProfileError> {
        match self.enter(&self.switch_calls, &self.switch) {
            Behaviour::Normal => {
                let mut profiles = self.profiles.lock().unwrap();
                if !profiles.iter().any(|p| p.name == name) {
                    return Ok(SwitchReply::failed(format!("profile '{name}' not found")));
                }
                for p in profiles.iter_mut() {
                    p.is_active = p.name == name;
                }
                Ok(SwitchReply::ok())
            }
            Behaviour::Refuse(reason) => Ok(SwitchReply::failed(reason)),
            Behaviour::Fault(e) => Err(e),
            Behaviour::Hang => std::future::pending().await,
        }
    }

    async fn remove_profile(&self, name: &str) -> Result<(), ProfileError> {
        match self.enter(&self.remove_calls, &self.remove) {
            Behaviour::Normal | Behaviour::Refuse(_) => {
                let mut profiles = self.profiles.lock().unwrap();
                let before = profiles.len();
                profiles.retain(|p| p.name != name);
                if profiles.len() == before {
                    return Err(ProfileError::remote(
                        "remove profile",
                        format!("profile '{name}' not found"),
                    ));
                }
                Ok(())
            }
            Behaviour::Fault(e) => Err(e),
            Behaviour::Hang => std::future::pending().await,
        }
    }
}

/// A `Confirm` that always gives the same answer and remembers what it was asked.
pub struct ScriptedConfirm {
    answer: bool,
    pub asked: Mutex<Vec<netprof_core::ConfirmPrompt>>,
}

impl ScriptedConfirm {
    pub fn answering(answer: bool) -> Arc<Self> {
        Arc::new(Self {
            answer,
            asked: Mutex::new(Vec::new()),
        })
    }

    pub fn times_asked(&self) -> usize {
        self.asked.lock().unwrap().len()
    }
}

#[async_trait]
impl netprof_core::Confirm for ScriptedConfirm {
    async fn confirm(&self, prompt: &netprof_core::ConfirmPrompt) -> bool {
        self.asked.lock().unwrap().push(prompt.clone());
        self.answer
    }
}
