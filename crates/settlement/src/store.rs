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

use bourse_core::{Order, OrderCommand, OrderId, Pair, UserId};
use rust_decimal::Decimal;
use thiserror::Error;

/// Error types for persistence operations
#[derive(Debug, Error)]
pub enum StoreError {
	/// [`Store::record_fill`] was asked to fill an order whose stored
	/// status is already filled. A logic fault, not retried; it guards
	/// re-entrant settlement of the same order.
	#[error("order {0} is already filled")]
	AlreadyFilled(OrderId),
	#[error("unknown order {0}")]
	UnknownOrder(OrderId),
	/// Implementation-specific lookup/save failure, propagated to the
	/// caller unchanged. The engine performs no recovery or retry.
	#[error("store backend error: {0}")]
	Backend(String),
}

/// Persistence contract consumed by the matching engine
///
/// This is the complete surface through which the engine and the
/// settlement bridge reach durable state. Everything else about the
/// persistence layer (users, credentials, funding) is outside the
/// engine's view.
///
/// Implementations are driven from the engine's single owning thread,
/// so methods take `&mut self` and need no interior locking. Calls may
/// block on I/O.
pub trait Store: Send {
	/// All pending orders for a pair, in stored order.
	///
	/// Used once at startup to seed the book; the returned order
	/// determines the tie-break among equal-priced orders during the
	/// reconciliation that follows.
	fn load_pending(&self, pair: &Pair) -> Result<Vec<Order>, StoreError>;

	/// Persist a new order, assigning it the next id and pending
	/// status. Called before the order is inserted into the book; a
	/// failure here means the order never enters the book.
	fn save_order(&mut self, cmd: OrderCommand) -> Result<Order, StoreError>;

	/// Recorded balance of one asset for one user. Unknown (user,
	/// asset) combinations read as zero.
	fn balance(&self, user: UserId, asset: &str) -> Result<Decimal, StoreError>;

	/// Mark an order filled and apply its settlement legs to the
	/// owner's balances, as one step.
	///
	/// Fails with [`StoreError::AlreadyFilled`] (applying no deltas)
	/// when the stored status is already filled. Each side of a match
	/// is recorded by its own call; a failure on the second call after
	/// the first succeeded is surfaced, not rolled back.
	fn record_fill(&mut self, order: &Order) -> Result<(), StoreError>;
}
