use log::info;

pub type TaskID = u32;

/// Work driven by the [`Scheduler`] once per period.
pub trait SteppableTask: Send + 'static {
    /// Runs one step. Returning `false` ends the task.
    fn step(&mut self) -> bool;
}

/// Runs each task on its own named thread at a fixed period.
///
/// The first step runs as soon as the task is added; later steps follow on a
/// fixed `period` beat that slow steps do not shift.
pub struct Scheduler {
    next_task_id: TaskID,
    tasks: std::collections::HashMap<TaskID, ScheduledTask>,
}

impl Scheduler {
    #[must_use]
    pub fn new() -> Self {
        Scheduler {
            next_task_id: 0,
            tasks: std::collections::HashMap::new(),
        }
    }

    /// Starts `task` on a dedicated thread, stepping it every `period`.
    ///
    /// # Errors
    ///
    /// Returns the OS error if the thread cannot be spawned.
    pub fn add_task<T>(&mut self, task: T, period: std::time::Duration) -> std::io::Result<TaskID>
    where
        T: SteppableTask,
    {
        let id = self.next_task_id;
        let (stop_sender, stop_receiver) = crossbeam_channel::bounded::<()>(1);

        let handle = std::thread::Builder::new()
            .name(std::any::type_name::<T>().to_string())
            .spawn(move || run_periodically(task, period, &stop_receiver))?;

        self.tasks.insert(
            id,
            ScheduledTask {
                handle,
                stop_sender,
            },
        );
        self.next_task_id += 1;
        Ok(id)
    }

    pub fn stop_all_tasks(&self) {
        info!("Scheduler: Signaling all tasks to stop...");
        for task in self.tasks.values() {
            let _ = task.stop_sender.try_send(());
        }
    }

    pub fn wait_on_task_finish(&mut self, task_id: TaskID) {
        if let Some(task) = self.tasks.remove(&task_id) {
            if task.handle.join().is_err() {
                log::error!("Scheduler: task {task_id} panicked");
            }
        }
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Scheduler::new()
    }
}

// Steps once up front, then once per ticker beat until the task declines or
// a stop arrives. Beats missed during a slow step are dropped, not queued.
fn run_periodically<T: SteppableTask>(
    mut task: T,
    period: std::time::Duration,
    stop_receiver: &crossbeam_channel::Receiver<()>,
) {
    let ticker = crossbeam_channel::tick(period);
    while task.step() {
        crossbeam_channel::select! {
            recv(ticker) -> _ => {}
            recv(stop_receiver) -> _ => break,
        }
    }
}

/// Outcome of [`Cadence::poll`].
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum CadencePoll {
    /// A tick is due; the next one is scheduled one interval from now.
    TickNow,
    /// Nothing to do for this long.
    Wait(std::time::Duration),
}

/// Fixed-interval timing for loops that cannot block, such as a frame loop.
///
/// The first poll is always due.
#[derive(Debug, Clone)]
pub struct Cadence {
    interval: std::time::Duration,
    next_tick: Option<std::time::Instant>,
}

impl Cadence {
    #[must_use]
    pub fn new(interval: std::time::Duration) -> Self {
        Cadence {
            interval,
            next_tick: None,
        }
    }

    #[must_use]
    pub fn interval(&self) -> std::time::Duration {
        self.interval
    }

    pub fn poll(&mut self, now: std::time::Instant) -> CadencePoll {
        match self.next_tick {
            Some(next_tick) if now < next_tick => CadencePoll::Wait(next_tick - now),
            _ => {
                self.next_tick = Some(now + self.interval);
                CadencePoll::TickNow
            }
        }
    }
}

struct ScheduledTask {
    handle: std::thread::JoinHandle<()>,
    stop_sender: crossbeam_channel::Sender<()>,
}
