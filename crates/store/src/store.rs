//! # TimeSlot Store
//!
//! Sole owner of the slot collection. A [`SlotStore`] handle forwards each
//! request to a background task over a bounded queue; the task applies them
//! one at a time in arrival order.
//!
//! Each backed operation moves the status to pending, awaits one backing
//! call under a timeout, and settles. The in-memory collection only changes
//! after the backing call succeeded, so a failure leaves the last-known-good
//! collection in place.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use chrono::{NaiveDate, NaiveTime};
use slotbook_core::{
    errors::{SlotError, SlotResult},
    models::{
        schedule::{DailyTemplate, DateRange, RangePolicy},
        time_slot::TimeSlot,
    },
    scheduler::{self, RangePlan},
};
use slotbook_db::backend::SlotBackend;
use tokio::sync::{mpsc, oneshot, watch};
use tracing::{debug, info, warn};

use crate::status::StoreStatus;

/// Tuning for the store task.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Upper bound on a single backing call.
    pub operation_timeout: Duration,
    /// Commands that may wait in the queue before senders are held back.
    pub queue_capacity: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            operation_timeout: Duration::from_secs(10),
            queue_capacity: 64,
        }
    }
}

type Reply<T> = oneshot::Sender<SlotResult<T>>;

enum Command {
    FetchAll {
        reply: Reply<Vec<TimeSlot>>,
    },
    List {
        reply: Reply<Vec<TimeSlot>>,
    },
    Create {
        slot: TimeSlot,
        reply: Reply<TimeSlot>,
    },
    SetAvailability {
        id: String,
        available: bool,
        reply: Reply<TimeSlot>,
    },
    Delete {
        id: String,
        strict: bool,
        reply: Reply<()>,
    },
    ReplaceRange {
        plan: RangePlan,
        reply: Reply<()>,
    },
}

/// Handle to the store task.
#[derive(Clone)]
pub struct SlotStore {
    commands: mpsc::Sender<Command>,
    status: watch::Receiver<StoreStatus>,
}

impl SlotStore {
    /// Spawns the store task on the current tokio runtime.
    ///
    /// The collection starts empty; call [`SlotStore::fetch_all`] to load it
    /// from the backend. The task stops once every handle is dropped.
    pub fn spawn(backend: Arc<dyn SlotBackend>, config: StoreConfig) -> Self {
        let (commands, receiver) = mpsc::channel(config.queue_capacity.max(1));
        let (status_tx, status) = watch::channel(StoreStatus::default());

        let actor = StoreActor {
            slots: Vec::new(),
            backend,
            timeout: config.operation_timeout,
            status: status_tx,
        };
        tokio::spawn(actor.run(receiver));

        Self { commands, status }
    }

    /// Refreshes the collection from the backend and returns it.
    pub async fn fetch_all(&self) -> SlotResult<Vec<TimeSlot>> {
        self.request(|reply| Command::FetchAll { reply }).await
    }

    /// Snapshot of the collection after every previously queued write.
    ///
    /// Order is unspecified; sort before display.
    pub async fn list(&self) -> SlotResult<Vec<TimeSlot>> {
        self.request(|reply| Command::List { reply }).await
    }

    /// Creates an available slot, replacing any slot with the same id.
    pub async fn create(
        &self,
        date: NaiveDate,
        start_time: NaiveTime,
        end_time: NaiveTime,
    ) -> SlotResult<TimeSlot> {
        let slot = TimeSlot::new(date, start_time, end_time);
        self.request(|reply| Command::Create { slot, reply }).await
    }

    /// Sets the availability flag; fails with `NotFound` for an unknown id.
    pub async fn set_availability(&self, id: &str, available: bool) -> SlotResult<TimeSlot> {
        let id = id.to_string();
        self.request(|reply| Command::SetAvailability {
            id,
            available,
            reply,
        })
        .await
    }

    /// Removes a slot. An unknown id is a silent no-op.
    pub async fn delete(&self, id: &str) -> SlotResult<()> {
        let id = id.to_string();
        self.request(|reply| Command::Delete {
            id,
            strict: false,
            reply,
        })
        .await
    }

    /// Removes a slot, reporting `NotFound` for an unknown id.
    pub async fn delete_strict(&self, id: &str) -> SlotResult<()> {
        let id = id.to_string();
        self.request(|reply| Command::Delete {
            id,
            strict: true,
            reply,
        })
        .await
    }

    /// Evicts every slot dated inside `window` and installs `slots`.
    ///
    /// This is the primitive behind [`SlotStore::schedule_range`].
    pub async fn replace_range(&self, window: DateRange, slots: Vec<TimeSlot>) -> SlotResult<()> {
        let plan = RangePlan { window, slots };
        self.request(|reply| Command::ReplaceRange { plan, reply }).await
    }

    /// Materializes `templates` over `range` and resets the range to them.
    ///
    /// Returns the generated slots in emission order. Under
    /// [`RangePolicy::Lenient`] an inverted range returns nothing and leaves
    /// the collection untouched.
    pub async fn schedule_range(
        &self,
        range: DateRange,
        templates: &[DailyTemplate],
        weekdays_only: bool,
        policy: RangePolicy,
    ) -> SlotResult<Vec<TimeSlot>> {
        let Some(plan) = scheduler::plan_with_policy(range, templates, weekdays_only, policy)?
        else {
            debug!(
                "Ignoring inverted range: start={}, end={}",
                range.start_date, range.end_date
            );
            return Ok(Vec::new());
        };

        let installed = plan.slots.clone();
        self.request(|reply| Command::ReplaceRange { plan, reply }).await?;

        Ok(installed)
    }

    /// Current status.
    pub fn status(&self) -> StoreStatus {
        self.status.borrow().clone()
    }

    /// Receiver that observes every status transition.
    pub fn subscribe(&self) -> watch::Receiver<StoreStatus> {
        self.status.clone()
    }

    async fn request<T>(&self, command: impl FnOnce(Reply<T>) -> Command) -> SlotResult<T> {
        let (reply, response) = oneshot::channel();

        self.commands
            .send(command(reply))
            .await
            .map_err(|_| SlotError::Unavailable("store task has stopped".to_string()))?;

        response
            .await
            .map_err(|_| SlotError::Unavailable("store task dropped the request".to_string()))?
    }
}

struct StoreActor {
    slots: Vec<TimeSlot>,
    backend: Arc<dyn SlotBackend>,
    timeout: Duration,
    status: watch::Sender<StoreStatus>,
}

impl StoreActor {
    async fn run(mut self, mut commands: mpsc::Receiver<Command>) {
        while let Some(command) = commands.recv().await {
            self.handle(command).await;
        }
        debug!("Slot store stopped: all handles dropped");
    }

    async fn handle(&mut self, command: Command) {
        // A dropped receiver means the caller stopped waiting; the work is
        // still done
        match command {
            Command::List { reply } => {
                let _ = reply.send(Ok(self.slots.clone()));
            }
            Command::FetchAll { reply } => {
                self.begin();
                let result = self.fetch_all().await;
                let _ = reply.send(self.finish(result));
            }
            Command::Create { slot, reply } => {
                self.begin();
                let result = self.create(slot).await;
                let _ = reply.send(self.finish(result));
            }
            Command::SetAvailability {
                id,
                available,
                reply,
            } => {
                self.begin();
                let result = self.set_availability(id, available).await;
                let _ = reply.send(self.finish(result));
            }
            Command::Delete { id, strict, reply } => {
                self.begin();
                let result = self.delete(id, strict).await;
                let _ = reply.send(self.finish(result));
            }
            Command::ReplaceRange { plan, reply } => {
                self.begin();
                let result = self.replace_range(plan).await;
                let _ = reply.send(self.finish(result));
            }
        }
    }

    fn begin(&self) {
        self.status.send_replace(StoreStatus::pending());
    }

    fn finish<T>(&self, result: SlotResult<T>) -> SlotResult<T> {
        let error = result.as_ref().err().map(|e| e.to_string());
        self.status.send_replace(StoreStatus::settled(error));
        result
    }

    /// Awaits one backing call under the operation timeout.
    ///
    /// A timed-out call is dropped, not rolled back: a backend may already
    /// have committed it. Mutating operations go through
    /// [`StoreActor::call_mutating`] to pick up such a write.
    async fn call<T>(
        &self,
        operation: &str,
        backing: impl Future<Output = eyre::Result<T>>,
    ) -> SlotResult<T> {
        match tokio::time::timeout(self.timeout, backing).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(report)) => {
                warn!("Backing call failed: operation={}, error={}", operation, report);
                Err(SlotError::BackingFailure(report))
            }
            Err(_) => {
                warn!(
                    "Backing call timed out: operation={}, timeout={:?}",
                    operation, self.timeout
                );
                Err(SlotError::Timeout(self.timeout))
            }
        }
    }

    /// Like [`StoreActor::call`], but re-reads the backend after a timeout
    /// so a write that landed late is reflected. The caller still gets the
    /// timeout.
    async fn call_mutating<T>(
        &mut self,
        operation: &str,
        backing: impl Future<Output = eyre::Result<T>>,
    ) -> SlotResult<T> {
        let result = self.call(operation, backing).await;
        if matches!(result, Err(SlotError::Timeout(_))) {
            self.resync(operation).await;
        }
        result
    }

    /// Best-effort reload after an ambiguous write; failures only log.
    async fn resync(&mut self, operation: &str) {
        let backend = Arc::clone(&self.backend);
        match tokio::time::timeout(self.timeout, backend.fetch_all()).await {
            Ok(Ok(fetched)) => {
                self.install(fetched);
                info!(
                    "Resynced after timed-out call: operation={}, count={}",
                    operation,
                    self.slots.len()
                );
            }
            Ok(Err(report)) => {
                warn!("Resync failed: operation={}, error={}", operation, report);
            }
            Err(_) => {
                warn!("Resync timed out: operation={}", operation);
            }
        }
    }

    fn install(&mut self, fetched: Vec<TimeSlot>) {
        let mut slots = Vec::with_capacity(fetched.len());
        scheduler::upsert_all(&mut slots, fetched);
        self.slots = slots;
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.slots.iter().position(|slot| slot.id == id)
    }

    async fn fetch_all(&mut self) -> SlotResult<Vec<TimeSlot>> {
        let fetched = self.call("fetch_all", self.backend.fetch_all()).await?;

        self.install(fetched);
        debug!("Fetched time slots: count={}", self.slots.len());

        Ok(self.slots.clone())
    }

    async fn create(&mut self, slot: TimeSlot) -> SlotResult<TimeSlot> {
        debug!("Creating time slot: id={}", slot.id);
        let backend = Arc::clone(&self.backend);
        self.call_mutating("create", backend.upsert(slot.clone())).await?;

        scheduler::upsert(&mut self.slots, slot.clone());
        Ok(slot)
    }

    async fn set_availability(&mut self, id: String, available: bool) -> SlotResult<TimeSlot> {
        let Some(index) = self.position(&id) else {
            return Err(SlotError::NotFound(format!("Time slot {} not found", id)));
        };

        debug!("Setting availability: id={}, available={}", id, available);
        let backend = Arc::clone(&self.backend);
        self.call_mutating("set_availability", backend.set_availability(id, available))
            .await?;

        let slot = &mut self.slots[index];
        slot.available = available;
        Ok(slot.clone())
    }

    async fn delete(&mut self, id: String, strict: bool) -> SlotResult<()> {
        let Some(index) = self.position(&id) else {
            if strict {
                return Err(SlotError::NotFound(format!("Time slot {} not found", id)));
            }
            debug!("Delete of unknown time slot ignored: id={}", id);
            return Ok(());
        };

        debug!("Deleting time slot: id={}", id);
        let backend = Arc::clone(&self.backend);
        self.call_mutating("delete", backend.delete(id)).await?;

        self.slots.remove(index);
        Ok(())
    }

    async fn replace_range(&mut self, plan: RangePlan) -> SlotResult<()> {
        let backend = Arc::clone(&self.backend);
        self.call_mutating(
            "replace_range",
            backend.replace_range(plan.window, plan.slots.clone()),
        )
        .await?;

        let before = self.slots.len();
        scheduler::apply(&mut self.slots, &plan);
        info!(
            "Replaced time slots in range: start={}, end={}, generated={}, total_before={}, total_after={}",
            plan.window.start_date,
            plan.window.end_date,
            plan.slots.len(),
            before,
            self.slots.len()
        );
        Ok(())
    }
}
