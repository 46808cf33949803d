//! Submitted processes and their lifecycle.

use alloc::format;
use alloc::vec::Vec;
use core::fmt;

use pagemem::ProcessId;

/// Shortest accepted burst, in abstract time units.
pub const MIN_BURST: u32 = 1;
/// Longest accepted burst, in abstract time units.
pub const MAX_BURST: u32 = 20;

const_assert!(burst_bounds; MIN_BURST >= 1 && MIN_BURST <= MAX_BURST);

/// Prefix of generated process ids.
const AUTO_ID_PREFIX: &str = "P";

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum LifecycleState {
    Waiting,
    Running,
    Completed,
}

impl LifecycleState {
    /// Whether moving from `self` to `next` is allowed.
    ///
    /// A process starts out waiting, runs once it holds its frames, and either
    /// completes or goes back to waiting if its frames could not be allocated.
    pub fn can_transition_to(self, next: LifecycleState) -> bool {
        use self::LifecycleState::*;
        match (self, next) {
            (Waiting, Running) | (Running, Waiting) | (Running, Completed) => true,
            _ => false,
        }
    }
}

impl fmt::Display for LifecycleState {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(match self {
            LifecycleState::Waiting => "waiting",
            LifecycleState::Running => "running",
            LifecycleState::Completed => "completed",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Process {
    id: ProcessId,
    page_count: usize,
    burst: u32,
    state: LifecycleState,
}

impl Process {
    pub fn id(&self) -> &ProcessId {
        &self.id
    }

    /// Number of pages, fixed at submission.
    pub fn page_count(&self) -> usize {
        self.page_count
    }

    /// Burst duration in abstract time units.
    pub fn burst(&self) -> u32 {
        self.burst
    }

    pub fn state(&self) -> LifecycleState {
        self.state
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitError {
    /// Another process already uses this id.
    DuplicateId(ProcessId),
    /// Page count outside of `1..=max`.
    InvalidPageCount { requested: usize, max: usize },
    /// Burst outside of `MIN_BURST..=MAX_BURST`.
    InvalidBurst(u32),
}

impl fmt::Display for SubmitError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SubmitError::DuplicateId(_) => f.write_str("Process ID must be unique!"),
            SubmitError::InvalidPageCount { max, .. } => {
                write!(f, "Process size must be between 1 and {} pages!", max)
            }
            SubmitError::InvalidBurst(_) => {
                write!(f, "Burst time must be between {} and {}!", MIN_BURST, MAX_BURST)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransitionError {
    UnknownProcess(ProcessId),
    Invalid {
        id: ProcessId,
        from: LifecycleState,
        to: LifecycleState,
    },
}

impl fmt::Display for TransitionError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TransitionError::UnknownProcess(id) => write!(f, "no process {}", id),
            TransitionError::Invalid { id, from, to } => {
                write!(f, "process {} cannot go from {} to {}", id, from, to)
            }
        }
    }
}

/// All submitted processes, in submission order.
pub struct ProcessRegistry {
    processes: Vec<Process>,
    /// Number used for the next generated id. Never goes back, not even on reset.
    next_auto_id: usize,
}

impl Default for ProcessRegistry {
    fn default() -> Self {
        ProcessRegistry::new()
    }
}

impl ProcessRegistry {
    pub fn new() -> Self {
        ProcessRegistry {
            processes: Vec::new(),
            next_auto_id: 1,
        }
    }

    /// Admit a new waiting process.
    ///
    /// A blank `id` is replaced by a generated `P<n>`; the number is used up even if
    /// the submission is rejected afterwards. `max_pages` is the size of the frame
    /// pool the process must fit into.
    pub fn submit(
        &mut self,
        id: &str,
        page_count: usize,
        burst: u32,
        max_pages: usize,
    ) -> Result<Process, SubmitError> {
        let id = match id.trim() {
            "" => {
                let generated = format!("{}{}", AUTO_ID_PREFIX, self.next_auto_id);
                self.next_auto_id += 1;
                ProcessId::new(generated)
            }
            given => ProcessId::from(given),
        };

        if self.get(&id).is_some() {
            return Err(SubmitError::DuplicateId(id));
        }
        if page_count < 1 || page_count > max_pages {
            return Err(SubmitError::InvalidPageCount {
                requested: page_count,
                max: max_pages,
            });
        }
        if burst < MIN_BURST || burst > MAX_BURST {
            return Err(SubmitError::InvalidBurst(burst));
        }

        let process = Process {
            id,
            page_count,
            burst,
            state: LifecycleState::Waiting,
        };
        self.processes.push(process.clone());
        Ok(process)
    }

    pub fn get(&self, id: &ProcessId) -> Option<&Process> {
        self.processes.iter().find(|p| &p.id == id)
    }

    pub fn processes(&self) -> &[Process] {
        &self.processes
    }

    pub fn len(&self) -> usize {
        self.processes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.processes.is_empty()
    }

    /// Waiting processes in submission order.
    pub fn waiting_processes(&self) -> impl Iterator<Item = &Process> {
        self.processes
            .iter()
            .filter(|p| p.state == LifecycleState::Waiting)
    }

    /// Largest page count of any registered process.
    pub fn max_page_count(&self) -> Option<usize> {
        self.processes.iter().map(|p| p.page_count).max()
    }

    pub fn transition(&mut self, id: &ProcessId, next: LifecycleState) -> Result<(), TransitionError> {
        let process = self
            .processes
            .iter_mut()
            .find(|p| &p.id == id)
            .ok_or_else(|| TransitionError::UnknownProcess(id.clone()))?;

        if !process.state.can_transition_to(next) {
            return Err(TransitionError::Invalid {
                id: id.clone(),
                from: process.state,
                to: next,
            });
        }
        trace!("[sched] {}: {} -> {}", id, process.state, next);
        process.state = next;
        Ok(())
    }

    /// Forget every process. Generated ids keep counting from where they were.
    pub fn reset_all(&mut self) {
        self.processes.clear();
    }
}
