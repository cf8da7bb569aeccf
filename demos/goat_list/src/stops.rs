//! The three stops of the goat-list app, plus the agent behavior that tours them.

use std::sync::{Mutex, MutexGuard, PoisonError};

use ma_agent::{AgentBehavior, MobileAgentStop, Relay, StopContext, Traveler};
use ma_core::{AgentId, Mode, MovementType, RelayResult, StopId, Task};

/// Diagnostics type codes, as they appear in the journey trace.
pub const GOAT_STORE_CODE: u32 = 1;
pub const GOAT_LIST_VIEW_CODE: u32 = 2;
pub const APP_SHELL_CODE: u32 = 3;

/// Commit attempts an agent makes before giving up on a busy store.
const MAX_COMMIT_ATTEMPTS: u32 = 5;

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(PoisonError::into_inner)
}

// ── Tasks ─────────────────────────────────────────────────────────────────────

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum GoatTask {
    RetrieveGoatList,
    DisplayGoatList,
    AddGoat,
    Commit,
    SortGoats,
}

impl Task for GoatTask {
    fn identifier(&self) -> &'static str {
        match self {
            GoatTask::RetrieveGoatList => "retrieve_goat_list",
            GoatTask::DisplayGoatList  => "display_goat_list",
            GoatTask::AddGoat          => "add_goat",
            GoatTask::Commit           => "commit",
            GoatTask::SortGoats        => "sort_goats",
        }
    }
}

// ── GoatStore ─────────────────────────────────────────────────────────────────

/// Persistent goat list.  New names are staged first and become visible on
/// commit.  The store turns away the first `busy_commits` commits.
pub struct GoatStore {
    goats:        Mutex<Vec<String>>,
    staged:       Mutex<Vec<String>>,
    busy_commits: Mutex<u32>,
}

impl GoatStore {
    pub fn new<'a>(goats: impl IntoIterator<Item = &'a str>, busy_commits: u32) -> Self {
        Self {
            goats:        Mutex::new(goats.into_iter().map(str::to_owned).collect()),
            staged:       Mutex::new(Vec::new()),
            busy_commits: Mutex::new(busy_commits),
        }
    }

    pub fn goats(&self) -> Vec<String> {
        lock(&self.goats).clone()
    }

    /// Stage `name` for the next commit.  Rejects blank names and names
    /// already stored or staged.
    pub fn stage(&self, name: &str) -> bool {
        let name = name.trim();
        if name.is_empty() || lock(&self.goats).iter().any(|g| g == name) {
            return false;
        }
        let mut staged = lock(&self.staged);
        if staged.iter().any(|g| g == name) {
            return false;
        }
        staged.push(name.to_owned());
        true
    }

    /// Move every staged name into the list.  `false` if the store is busy.
    pub fn try_commit(&self) -> bool {
        let mut busy = lock(&self.busy_commits);
        if *busy > 0 {
            *busy -= 1;
            return false;
        }
        let staged: Vec<String> = lock(&self.staged).drain(..).collect();
        lock(&self.goats).extend(staged);
        true
    }
}

impl MobileAgentStop for GoatStore {
    fn diagnostics_type_code(&self) -> u32 {
        GOAT_STORE_CODE
    }
}

// ── GoatListView ──────────────────────────────────────────────────────────────

/// What the user currently sees.
#[derive(Default)]
pub struct GoatListView {
    shown: Mutex<Vec<String>>,
}

impl GoatListView {
    pub fn show(&self, goats: &[String]) {
        *lock(&self.shown) = goats.to_vec();
    }

    pub fn shown(&self) -> Vec<String> {
        lock(&self.shown).clone()
    }
}

impl MobileAgentStop for GoatListView {
    fn diagnostics_type_code(&self) -> u32 {
        GOAT_LIST_VIEW_CODE
    }
}

// ── AppShell ──────────────────────────────────────────────────────────────────

/// Where every journey starts and parks.  Records how each journey ended.
#[derive(Default)]
pub struct AppShell {
    outcomes: Mutex<Vec<(AgentId, &'static str)>>,
}

impl AppShell {
    pub fn outcomes(&self) -> Vec<(AgentId, &'static str)> {
        lock(&self.outcomes).clone()
    }
}

impl MobileAgentStop for AppShell {
    fn diagnostics_type_code(&self) -> u32 {
        APP_SHELL_CODE
    }

    fn receive_mobile_agent(
        &self,
        agent: &mut dyn Traveler,
        relay: &mut Relay<'_>,
    ) -> RelayResult<()> {
        if agent.movement_type() == MovementType::Park {
            lock(&self.outcomes).push((agent.agent_id(), agent.mode_identifier()));
        }
        agent.hello(relay)
    }
}

// ── Behavior ──────────────────────────────────────────────────────────────────

/// Optionally adds a goat, then refreshes the displayed list.
///
/// ```text
/// shell ─▶ store:add_goat ─▶ store:commit (↺ while busy) ─▶ store:retrieve_goat_list
///       ─▶ view:sort_goats ─▶ view:display_goat_list ─▶ park at shell
/// ```
pub struct GoatListAgent {
    store:           StopId,
    view:            StopId,
    new_goat:        Option<String>,
    goats:           Vec<String>,
    commit_attempts: u32,
}

impl GoatListAgent {
    pub fn new(store: StopId, view: StopId, new_goat: Option<String>) -> Self {
        Self { store, view, new_goat, goats: Vec::new(), commit_attempts: 0 }
    }

    pub fn commit_attempts(&self) -> u32 {
        self.commit_attempts
    }
}

impl AgentBehavior for GoatListAgent {
    type Task = GoatTask;

    fn activated(&mut self, ctx: &mut StopContext<'_, GoatTask>) {
        match self.new_goat {
            Some(_) => ctx.go_to(self.store, GoatTask::AddGoat),
            None => ctx.go_to(self.store, GoatTask::RetrieveGoatList),
        }
    }

    fn execute(&mut self, task: GoatTask, ctx: &mut StopContext<'_, GoatTask>) {
        match task {
            GoatTask::AddGoat | GoatTask::Commit | GoatTask::RetrieveGoatList => {
                let Some(store) = ctx.stop_as::<GoatStore>() else {
                    ctx.fail();
                    return;
                };
                match task {
                    GoatTask::AddGoat => match self.new_goat.as_deref() {
                        Some(name) if store.stage(name) => ctx.go_to(self.store, GoatTask::Commit),
                        _ => {
                            tracing::warn!(agent = ctx.agent.0, goat = ?self.new_goat, "goat rejected");
                            ctx.fail();
                        }
                    },
                    GoatTask::Commit => {
                        self.commit_attempts += 1;
                        if store.try_commit() {
                            ctx.go_to(self.store, GoatTask::RetrieveGoatList);
                        } else if self.commit_attempts < MAX_COMMIT_ATTEMPTS {
                            ctx.itinerary.revisit();
                        } else {
                            ctx.fail();
                        }
                    }
                    _ => {
                        self.goats = store.goats();
                        ctx.go_to(self.view, GoatTask::SortGoats);
                    }
                }
            }
            GoatTask::SortGoats => {
                self.goats.sort();
                ctx.go_to(self.view, GoatTask::DisplayGoatList);
            }
            GoatTask::DisplayGoatList => {
                let Some(view) = ctx.stop_as::<GoatListView>() else {
                    ctx.fail();
                    return;
                };
                view.show(&self.goats);
                ctx.finish();
            }
        }
    }

    fn deactivated(&mut self, final_mode: Mode<GoatTask>) {
        tracing::info!(mode = %final_mode, goats = self.goats.len(), "goat list journey over");
    }
}
