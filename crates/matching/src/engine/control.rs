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

use bourse_core::{OrderCommand, Trade};
use tokio::sync::oneshot;

use crate::engine::EngineError;

/// Requests processed by the engine's owning loop
///
/// Every book mutation travels through one of these messages, so the
/// matching loop serializes them and no shared mutable book state
/// exists anywhere else. Each request carries a oneshot channel for
/// its reply; the requester awaits without blocking the loop.
#[derive(Debug)]
pub enum EngineCommand {
	/// Admit one order: liquidity check, persist, insert into the
	/// book, match once against the opposite side, settle any trade.
	Submit {
		command: OrderCommand,
		respond_to: oneshot::Sender<Result<Vec<Trade>, EngineError>>,
	},

	/// Re-run the full buy-side sweep against the sell side and settle
	/// whatever it pairs. Safe to request at any time.
	Reconcile {
		respond_to: oneshot::Sender<Result<Vec<Trade>, EngineError>>,
	},

	/// Stop the loop once in-flight work completes.
	Shutdown,
}
