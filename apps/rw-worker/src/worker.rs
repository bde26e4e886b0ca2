use std::{sync::Arc, time::Duration};

use tokio::{
	sync::watch,
	task::{JoinError, JoinHandle},
	time::{self, Instant, MissedTickBehavior},
};

use rw_service::RankService;

// Stand-in deadline for intervals too long to add to `Instant::now()`.
const FAR_FUTURE: Duration = Duration::from_secs(30 * 365 * 24 * 60 * 60);

/// Periodically fetches the tracked user's rank and records it.
pub struct Scheduler {
	service: Arc<RankService>,
	interval: Duration,
	fetch_on_start: bool,
}
impl Scheduler {
	pub fn new(service: Arc<RankService>, interval: Duration) -> Self {
		Self { service, interval, fetch_on_start: false }
	}

	pub fn from_config(service: Arc<RankService>, tracker: &rw_config::Tracker) -> Self {
		Self::new(service, tracker.interval()).fetch_on_start(tracker.fetch_on_start)
	}

	/// Fire the first tick immediately instead of one interval after start.
	pub fn fetch_on_start(mut self, enabled: bool) -> Self {
		self.fetch_on_start = enabled;

		self
	}

	pub fn spawn(self) -> SchedulerHandle {
		let (shutdown, signal) = watch::channel(false);
		let task = tokio::spawn(self.run(signal));

		SchedulerHandle { shutdown, task }
	}

	async fn run(self, mut signal: watch::Receiver<bool>) {
		let now = Instant::now();
		let first = if self.fetch_on_start {
			now
		} else {
			now.checked_add(self.interval).unwrap_or_else(|| now + FAR_FUTURE)
		};
		let mut ticker = time::interval_at(first, self.interval);

		ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

		tracing::info!(
			username = %self.service.username,
			interval_secs = self.interval.as_secs(),
			fetch_on_start = self.fetch_on_start,
			"Rank scheduler started."
		);

		loop {
			tokio::select! {
				_ = ticker.tick() => tick(&self.service).await,
				changed = signal.changed() => {
					if changed.is_err() || *signal.borrow() {
						break;
					}
				},
			}
		}

		tracing::info!("Rank scheduler stopped.");
	}
}

/// Owns the running scheduler task. Dropping the handle also stops the loop.
pub struct SchedulerHandle {
	shutdown: watch::Sender<bool>,
	task: JoinHandle<()>,
}
impl SchedulerHandle {
	/// Stops the loop after any in-flight tick finishes.
	pub async fn shutdown(self) -> Result<(), JoinError> {
		let _ = self.shutdown.send(true);

		self.task.await
	}

	pub fn is_finished(&self) -> bool {
		self.task.is_finished()
	}
}

/// One firing. Failures are logged and dropped; the next tick is unaffected.
pub async fn tick(service: &RankService) {
	tracing::debug!(username = %service.username, "Scheduled rank fetch starting.");

	if let Err(err) = service.record_scheduled().await {
		tracing::error!(username = %service.username, error = %err, "Scheduled rank fetch failed.");
	}
}
