//! Seeded randomized scenario driver.
//!
//! Drives a real [`Dispatcher`] + [`RoomStore`] pair with a random
//! interleaving of room operations and their completions, including injected
//! host failures and deletes of absent rooms, and checks store invariants
//! after every step. The RNG is seeded, so a failing seed reproduces
//! exactly.

use std::rc::Rc;

use parlor_core::{
    Dispatcher, HostApi, HostError, PanelAction, Room, RoomStore, RoomStoreConfig, RoomToken,
};
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use thiserror::Error;

use crate::fake_host::FakeHost;
use crate::fixtures::room_fixture;

/// A store invariant observed to be broken, with the step it broke at.
#[derive(Debug, Error)]
pub enum InvariantViolation {
    /// Two rooms share a token.
    #[error("duplicate room token {token} after step {step}")]
    DuplicateToken {
        /// Step index the violation was observed at.
        step: usize,
        /// The duplicated token.
        token: RoomToken,
    },

    /// `pending_initial_retrieval` is set with no fetch outstanding.
    #[error("pending_initial_retrieval set with no outstanding fetch after step {step}")]
    RetrievalFlagStuck {
        /// Step index the violation was observed at.
        step: usize,
    },

    /// `pending_creation` is set with no creation outstanding.
    #[error("pending_creation set with no outstanding creation after step {step}")]
    CreationFlagStuck {
        /// Step index the violation was observed at.
        step: usize,
    },

    /// A dispatch failed; the store is expected never to error.
    #[error("dispatch failed at step {step}: {message}")]
    Dispatch {
        /// Step index the dispatch failed at.
        step: usize,
        /// Rendered dispatch error.
        message: String,
    },
}

/// Summary of a completed scenario run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScenarioReport {
    /// Steps executed.
    pub steps: usize,
    /// Completions delivered back to the store.
    pub completions: usize,
    /// Host failures injected.
    pub failures: usize,
}

/// A seeded randomized run against a dispatcher/store pair.
#[derive(Debug, Clone, Copy)]
pub struct Scenario {
    seed: u64,
    steps: usize,
}

impl Scenario {
    /// Scenario with the given seed and the default step count.
    pub fn new(seed: u64) -> Self {
        Self { seed, steps: 200 }
    }

    /// Override the number of steps.
    pub fn steps(mut self, steps: usize) -> Self {
        self.steps = steps;
        self
    }

    /// Run the scenario, checking invariants after every step.
    ///
    /// # Errors
    ///
    /// Returns the first [`InvariantViolation`] observed.
    pub fn run(self) -> Result<ScenarioReport, InvariantViolation> {
        let mut rng = ChaCha8Rng::seed_from_u64(self.seed);
        let dispatcher = Dispatcher::new();
        let host = Rc::new(FakeHost::new());
        let store =
            RoomStore::new(&dispatcher, RoomStoreConfig { host: Rc::clone(&host) as Rc<dyn HostApi> });

        let mut world = World::default();

        for step in 0..self.steps {
            let action = world.pick_step(&mut rng, &store.store_state().rooms);
            dispatcher
                .dispatch(&action)
                .map_err(|error| InvariantViolation::Dispatch { step, message: error.to_string() })?;

            world.check(step, &store.store_state())?;
        }

        Ok(ScenarioReport {
            steps: self.steps,
            completions: world.completions,
            failures: world.failures,
        })
    }
}

/// Bookkeeping the driver holds about outstanding host operations.
#[derive(Debug, Default)]
struct World {
    outstanding_fetches: usize,
    outstanding_creates: usize,
    outstanding_deletes: Vec<RoomToken>,
    next_token: u64,
    next_ctime: u64,
    completions: usize,
    failures: usize,
}

impl World {
    /// Choose the next action to dispatch, keeping completion counts in
    /// sync with what the store was told to initiate.
    fn pick_step(&mut self, rng: &mut ChaCha8Rng, current_rooms: &[Room]) -> PanelAction {
        loop {
            match rng.gen_range(0..8_u8) {
                0 => {
                    self.outstanding_fetches += 1;
                    return PanelAction::GetAllRooms;
                },
                1 if self.outstanding_fetches > 0 => {
                    self.outstanding_fetches -= 1;
                    self.completions += 1;
                    return PanelAction::RoomsFetched { result: self.fetch_result(rng) };
                },
                2 => {
                    self.outstanding_creates += 1;
                    return PanelAction::CreateRoom {
                        name_template: "Conversation {{number}}".into(),
                        room_owner: "owner@example.com".into(),
                    };
                },
                3 if self.outstanding_creates > 0 => {
                    self.outstanding_creates -= 1;
                    self.completions += 1;
                    return PanelAction::RoomCreated { result: self.create_result(rng) };
                },
                4 => {
                    let token = self.delete_target(rng, current_rooms);
                    self.outstanding_deletes.push(token.clone());
                    return PanelAction::DeleteRoom { room_token: token };
                },
                5 if !self.outstanding_deletes.is_empty() => {
                    let index = rng.gen_range(0..self.outstanding_deletes.len());
                    let token = self.outstanding_deletes.swap_remove(index);
                    self.completions += 1;
                    let result = if rng.gen_bool(0.85) {
                        Ok(())
                    } else {
                        self.failures += 1;
                        Err(HostError::Failed("delete refused".into()))
                    };
                    return PanelAction::RoomDeleted { room_token: token, result };
                },
                6 if !current_rooms.is_empty() => {
                    let room = &current_rooms[rng.gen_range(0..current_rooms.len())];
                    return PanelAction::CopyRoomUrl { room_url: room.room_url.clone() };
                },
                7 if !current_rooms.is_empty() => {
                    let room = &current_rooms[rng.gen_range(0..current_rooms.len())];
                    return PanelAction::OpenRoom { room_token: room.room_token.clone() };
                },
                _ => {},
            }
        }
    }

    fn fetch_result(&mut self, rng: &mut ChaCha8Rng) -> Result<Vec<Room>, HostError> {
        if rng.gen_bool(0.2) {
            self.failures += 1;
            return Err(HostError::Failed("fetch refused".into()));
        }
        let count = rng.gen_range(0..4);
        Ok((0..count).map(|_| self.fresh_room()).collect())
    }

    fn create_result(&mut self, rng: &mut ChaCha8Rng) -> Result<Room, HostError> {
        if rng.gen_bool(0.2) {
            self.failures += 1;
            return Err(HostError::Rejected { code: 400, reason: "create refused".into() });
        }
        Ok(self.fresh_room())
    }

    fn fresh_room(&mut self) -> Room {
        self.next_token += 1;
        self.next_ctime += 1;
        room_fixture(&format!("tok-{}", self.next_token), self.next_ctime)
    }

    /// Half the time target a room the store knows, otherwise a token that
    /// was never (or no longer is) in the list.
    fn delete_target(&mut self, rng: &mut ChaCha8Rng, current_rooms: &[Room]) -> RoomToken {
        if !current_rooms.is_empty() && rng.gen_bool(0.5) {
            current_rooms[rng.gen_range(0..current_rooms.len())].room_token.clone()
        } else {
            self.next_token += 1;
            RoomToken::new(format!("ghost-{}", self.next_token))
        }
    }

    fn check(
        &self,
        step: usize,
        state: &parlor_core::RoomStoreState,
    ) -> Result<(), InvariantViolation> {
        let mut seen = std::collections::HashSet::new();
        for room in &state.rooms {
            if !seen.insert(room.room_token.clone()) {
                return Err(InvariantViolation::DuplicateToken {
                    step,
                    token: room.room_token.clone(),
                });
            }
        }

        if self.outstanding_fetches == 0 && state.pending_initial_retrieval {
            return Err(InvariantViolation::RetrievalFlagStuck { step });
        }
        if self.outstanding_creates == 0 && state.pending_creation {
            return Err(InvariantViolation::CreationFlagStuck { step });
        }

        Ok(())
    }
}
