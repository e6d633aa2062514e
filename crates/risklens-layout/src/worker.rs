//! Frame-driven background worker for the layout
//!
//! The worker task is the only writer of node positions. Views read
//! snapshots from a `watch` channel and push replacement graphs over `mpsc`.
//! The loop runs until [`LayoutHandle::stop`] is called or the handle is
//! dropped; it never stops on its own.

use crate::{LayoutConfig, LayoutError, SimNode, Simulation};
use risklens_analysis::CorrelationNetwork;
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tokio::time::{interval, Duration, MissedTickBehavior};

const UPDATE_QUEUE: usize = 8;

/// Runs a [`Simulation`] on a fixed frame interval
///
/// # Examples
///
/// ```no_run
/// use risklens_layout::{LayoutConfig, LayoutWorker};
/// use risklens_analysis::CorrelationNetwork;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let worker = LayoutWorker::new(LayoutConfig::default())?;
///     let handle = worker.spawn();
///
///     handle.update(CorrelationNetwork::default()).await?;
///     let frame = handle.snapshot();
///     println!("{} nodes", frame.len());
///
///     // Cancel the loop when the view goes away
///     handle.stop().await?;
///     Ok(())
/// }
/// ```
pub struct LayoutWorker {
    simulation: Simulation,
    interval: Duration,
}

impl LayoutWorker {
    /// Create a worker over an empty simulation
    pub fn new(config: LayoutConfig) -> Result<Self, LayoutError> {
        config.validate()?;
        let interval = config.frame_interval();
        Ok(Self {
            simulation: Simulation::new(config),
            interval,
        })
    }

    /// Create a worker around an existing simulation
    pub fn with_simulation(simulation: Simulation) -> Result<Self, LayoutError> {
        simulation.config().validate()?;
        let interval = simulation.config().frame_interval();
        Ok(Self {
            simulation,
            interval,
        })
    }

    /// The simulation as it stands
    pub fn simulation(&self) -> &Simulation {
        &self.simulation
    }

    /// Run a fixed number of frames on the current task (useful for testing)
    pub async fn run_frames(&mut self, frames: usize) {
        let mut ticker = interval(self.interval);

        for _ in 0..frames {
            ticker.tick().await;
            self.simulation.tick();
        }

        tracing::debug!(frames, ticks = self.simulation.ticks(), "layout frames complete");
    }

    /// Move the simulation onto a tokio task
    ///
    /// Must be called from within a tokio runtime.
    pub fn spawn(self) -> LayoutHandle {
        let (snapshot_tx, snapshot_rx) = watch::channel(self.simulation.nodes().to_vec());
        let (update_tx, update_rx) = mpsc::channel(UPDATE_QUEUE);
        let (shutdown_tx, shutdown_rx) = oneshot::channel();

        let task = tokio::spawn(run_loop(
            self.simulation,
            self.interval,
            snapshot_tx,
            update_rx,
            shutdown_rx,
        ));

        LayoutHandle {
            snapshots: snapshot_rx,
            updates: update_tx,
            shutdown: Some(shutdown_tx),
            task: Some(task),
        }
    }
}

async fn run_loop(
    mut simulation: Simulation,
    frame: Duration,
    snapshots: watch::Sender<Vec<SimNode>>,
    mut updates: mpsc::Receiver<CorrelationNetwork>,
    mut shutdown: oneshot::Receiver<()>,
) -> Simulation {
    let mut ticker = interval(frame);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    tracing::info!("Layout worker started (frame: {:?})", frame);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                simulation.tick();
                snapshots.send_replace(simulation.nodes().to_vec());
            }
            Some(network) = updates.recv() => {
                simulation.sync(network);
                snapshots.send_replace(simulation.nodes().to_vec());
            }
            // Fires on an explicit stop and when the handle is dropped
            _ = &mut shutdown => {
                break;
            }
        }
    }

    tracing::info!(
        "Layout worker stopped after {} ticks ({} nodes)",
        simulation.ticks(),
        simulation.nodes().len()
    );

    simulation
}

/// Owner's side of a running [`LayoutWorker`]
///
/// Dropping the handle cancels the worker.
pub struct LayoutHandle {
    snapshots: watch::Receiver<Vec<SimNode>>,
    updates: mpsc::Sender<CorrelationNetwork>,
    shutdown: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<Simulation>>,
}

impl LayoutHandle {
    /// Latest published node positions
    pub fn snapshot(&self) -> Vec<SimNode> {
        self.snapshots.borrow().clone()
    }

    /// A receiver that is notified on every published frame
    pub fn subscribe(&self) -> watch::Receiver<Vec<SimNode>> {
        self.snapshots.clone()
    }

    /// Replace the graph; surviving nodes keep their positions
    pub async fn update(&self, network: CorrelationNetwork) -> Result<(), LayoutError> {
        self.updates
            .send(network)
            .await
            .map_err(|_| LayoutError::Stopped)
    }

    /// Whether the worker task is still running
    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|t| !t.is_finished())
    }

    /// Cancel the worker and return its final simulation state
    pub async fn stop(mut self) -> Result<Simulation, LayoutError> {
        if let Some(shutdown) = self.shutdown.take() {
            // The task may already be gone; joining reports that below
            let _ = shutdown.send(());
        }

        let task = self.task.take().ok_or(LayoutError::Stopped)?;
        task.await.map_err(|e| LayoutError::Worker(e.to_string()))
    }
}

impl Drop for LayoutHandle {
    fn drop(&mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }
    }
}
