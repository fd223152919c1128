// Copyright 2026 bourse contributors
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

mod control;
mod state;

pub use control::EngineCommand;
pub use state::EngineState;

use std::thread::{self, JoinHandle};

use bourse_core::{OrderCommand, Pair, Trade};
use bourse_settlement::{SettlementError, Store, StoreError};
use crossbeam::channel::{Receiver, Sender, TrySendError, bounded};
use thiserror::Error;
use tokio::sync::oneshot;
use tracing::{debug, info, warn};

use crate::config::MatchingConfig;

/// Error types for engine operations
#[derive(Debug, Error)]
pub enum EngineError {
	#[error(transparent)]
	Settlement(#[from] SettlementError),
	#[error(transparent)]
	Store(#[from] StoreError),
	#[error("pair {submitted} does not trade on this engine ({engine})")]
	PairMismatch { submitted: Pair, engine: Pair },
	/// The command channel is full; the matching loop is not keeping
	/// up and the submission was rejected rather than queued.
	#[error("engine overloaded")]
	Overloaded,
	#[error("engine has shut down")]
	Shutdown,
}

/// Matching engine with a single-threaded command loop
///
/// `start` seeds the book from the store, runs the startup
/// reconciliation sweep, and then hands the state to a dedicated
/// thread. From that point every submission and every reconciliation
/// request is processed one at a time by that thread, which is what
/// makes the check-insert-match-settle sequence atomic with respect to
/// concurrent callers, including two orders racing to spend the same
/// balance.
///
/// Store calls are blocking I/O and run inside the loop on purpose:
/// admitting an order and recording its fills must not interleave with
/// another submission.
pub struct MatchingEngine {
	thread_handle: Option<JoinHandle<()>>,
	sender: Sender<EngineCommand>,
}

impl MatchingEngine {
	/// Start the engine: seed the book with the store's pending orders
	/// for the configured pair, settle whatever the startup sweep
	/// pairs up, then spawn the matching loop. Returns the engine and
	/// the trades found by the sweep.
	pub fn start(
		config: MatchingConfig,
		store: Box<dyn Store>,
	) -> Result<(Self, Vec<Trade>), EngineError> {
		let mut state = EngineState::bootstrap(config.pair.clone(), store)?;
		let startup_trades = state.reconcile()?;
		if !startup_trades.is_empty() {
			info!(
				target: "engine",
				trades = startup_trades.len(),
				"startup reconciliation settled missed matches"
			);
		}

		let (sender, receiver) = bounded(config.command_queue_size);
		let verbose = config.verbose_logging;
		let thread_handle = thread::Builder::new()
			.name("matching-loop".to_string())
			.spawn(move || {
				info!(target: "engine", pair = %state.book.pair(), "matching engine started");
				Self::run_loop(&mut state, &receiver, verbose);
				info!(target: "engine", "matching engine stopped");
			})
			.expect("Failed to spawn matching engine thread");

		Ok((
			Self {
				thread_handle: Some(thread_handle),
				sender,
			},
			startup_trades,
		))
	}

	/// The matching loop. Exits on a `Shutdown` command or when every
	/// sender (engine and all handles) is gone.
	fn run_loop(state: &mut EngineState, receiver: &Receiver<EngineCommand>, verbose: bool) {
		loop {
			let cmd = match receiver.recv() {
				Ok(cmd) => cmd,
				Err(_) => break,
			};

			match cmd {
				EngineCommand::Submit {
					command,
					respond_to,
				} => {
					if verbose {
						debug!(
							target: "engine",
							owner = command.owner,
							side = ?command.side,
							amount = %command.amount,
							price = %command.price,
							"processing order"
						);
					}
					let result = state.submit(command);
					if let Err(e) = &result {
						warn!(target: "engine", error = %e, "order rejected");
					}
					// The requester may have given up waiting.
					let _ = respond_to.send(result);
				}
				EngineCommand::Reconcile { respond_to } => {
					let _ = respond_to.send(state.reconcile());
				}
				EngineCommand::Shutdown => break,
			}
		}
	}

	/// A cloneable handle for submitting requests to the loop.
	pub fn handle(&self) -> EngineHandle {
		EngineHandle {
			sender: self.sender.clone(),
		}
	}

	/// Stop the matching loop after it drains in-flight work.
	pub fn shutdown(mut self) {
		info!(target: "engine", "shutting down matching engine");
		self.join();
	}

	fn join(&mut self) {
		let _ = self.sender.send(EngineCommand::Shutdown);
		if let Some(handle) = self.thread_handle.take()
			&& let Err(e) = handle.join()
		{
			warn!(target: "engine", "matching thread panicked: {:?}", e);
		}
	}
}

impl Drop for MatchingEngine {
	fn drop(&mut self) {
		self.join();
	}
}

/// Requester side of the engine
///
/// Cheap to clone and safe to share across threads and tasks; every
/// request is answered over its own oneshot channel. When the command
/// queue is full the handle fails fast with
/// [`EngineError::Overloaded`] instead of blocking the caller.
#[derive(Clone)]
pub struct EngineHandle {
	sender: Sender<EngineCommand>,
}

impl EngineHandle {
	/// Submit one order; resolves to the zero or one trades it
	/// produced. Rejections (insufficient funds, store failures)
	/// surface here unchanged.
	pub async fn submit(&self, command: OrderCommand) -> Result<Vec<Trade>, EngineError> {
		let (respond_to, response) = oneshot::channel();
		self.send(EngineCommand::Submit {
			command,
			respond_to,
		})?;
		response.await.map_err(|_| EngineError::Shutdown)?
	}

	/// Re-run the full reconciliation sweep; resolves to the trades it
	/// settled.
	pub async fn reconcile(&self) -> Result<Vec<Trade>, EngineError> {
		let (respond_to, response) = oneshot::channel();
		self.send(EngineCommand::Reconcile { respond_to })?;
		response.await.map_err(|_| EngineError::Shutdown)?
	}

	fn send(&self, cmd: EngineCommand) -> Result<(), EngineError> {
		self.sender.try_send(cmd).map_err(|e| match e {
			TrySendError::Full(_) => EngineError::Overloaded,
			TrySendError::Disconnected(_) => EngineError::Shutdown,
		})
	}
}
