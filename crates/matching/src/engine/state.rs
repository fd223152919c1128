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

use bourse_core::{OrderCommand, Pair, Trade};
use bourse_settlement::{Store, settle_trade, verify_liquidity};
use tracing::info;

use crate::engine::EngineError;
use crate::matcher;
use crate::orderbook::OrderBook;

/// Matching engine state: the book plus the store it settles against
///
/// Owned by the matching loop in normal operation; public so that
/// single-threaded embeddings and tests can drive the same pipeline
/// synchronously.
pub struct EngineState {
	/// The order book for this engine's pair
	pub book: OrderBook,
	store: Box<dyn Store>,
}

impl EngineState {
	/// Load every pending order for the pair from the store and seed
	/// the book with them. The stored order fixes the tie-break among
	/// equal prices for the reconciliation that normally follows.
	pub fn bootstrap(pair: Pair, store: Box<dyn Store>) -> Result<Self, EngineError> {
		let pending = store.load_pending(&pair)?;
		info!(
			target: "engine",
			pair = %pair,
			resting = pending.len(),
			"seeding book from store"
		);
		Ok(Self {
			book: OrderBook::seed(pair, pending),
			store,
		})
	}

	/// Admit one order end to end.
	///
	/// Sequence: liquidity check, persist, insert, match once against
	/// the opposite side, settle both legs of any trade. A failure at
	/// any step propagates and every earlier step short of settlement
	/// leaves the book as it was; in particular a rejected or
	/// unsaved order never enters the book.
	pub fn submit(&mut self, command: OrderCommand) -> Result<Vec<Trade>, EngineError> {
		if command.pair != *self.book.pair() {
			return Err(EngineError::PairMismatch {
				submitted: command.pair,
				engine: self.book.pair().clone(),
			});
		}

		verify_liquidity(&*self.store, &command)?;
		let order = self.store.save_order(command)?;
		self.book.insert(order.clone());

		match matcher::find_match(&mut self.book, &order) {
			Some(mut trade) => {
				settle_trade(&mut *self.store, &mut trade)?;
				Ok(vec![trade])
			}
			None => Ok(Vec::new()),
		}
	}

	/// Sweep the whole book for missed matches and settle each one.
	///
	/// A partial settlement failure propagates immediately; trades
	/// already settled in this pass stay settled.
	pub fn reconcile(&mut self) -> Result<Vec<Trade>, EngineError> {
		let mut trades = matcher::reconcile(&mut self.book);
		for trade in &mut trades {
			settle_trade(&mut *self.store, trade)?;
		}
		Ok(trades)
	}
}
