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

use std::collections::HashMap;

use bourse_core::{Order, OrderCommand, OrderStatus, Pair, UserId};
use rust_decimal::Decimal;

use crate::store::{Store, StoreError};
use crate::transfer::SettlementLegs;

/// In-memory implementation of [`Store`]
///
/// A lightweight, non-persistent store for development and testing.
/// Orders live in a vector indexed by their id; balances in a flat
/// map keyed by (user, asset).
///
/// Characteristics:
/// - No durability; everything is lost on drop
/// - Sequential id assignment in save order
/// - `load_pending` returns orders in the order they were saved,
///   which fixes the tie-break among equal prices at reconciliation
pub struct MemoryStore {
	/// All orders ever saved, indexed by id
	orders: Vec<Order>,
	/// Balance per (user, asset code)
	balances: HashMap<(UserId, String), Decimal>,
}

impl MemoryStore {
	pub fn new() -> Self {
		Self {
			orders: Vec::new(),
			balances: HashMap::new(),
		}
	}

	/// Add funds to a user's balance of one asset.
	///
	/// External funding is outside the engine's scope; this exists so
	/// tests and seed fixtures can set up accounts.
	pub fn deposit(&mut self, user: UserId, asset: &str, quantity: Decimal) {
		*self
			.balances
			.entry((user, asset.to_string()))
			.or_insert(Decimal::ZERO) += quantity;
	}
}

impl Default for MemoryStore {
	fn default() -> Self {
		Self::new()
	}
}

impl Store for MemoryStore {
	fn load_pending(&self, pair: &Pair) -> Result<Vec<Order>, StoreError> {
		Ok(self
			.orders
			.iter()
			.filter(|o| &o.pair == pair && !o.is_filled())
			.cloned()
			.collect())
	}

	fn save_order(&mut self, cmd: OrderCommand) -> Result<Order, StoreError> {
		let order = Order::from_command(self.orders.len() as u64, cmd);
		self.orders.push(order.clone());
		Ok(order)
	}

	fn balance(&self, user: UserId, asset: &str) -> Result<Decimal, StoreError> {
		Ok(self
			.balances
			.get(&(user, asset.to_string()))
			.copied()
			.unwrap_or(Decimal::ZERO))
	}

	fn record_fill(&mut self, order: &Order) -> Result<(), StoreError> {
		let stored = self
			.orders
			.get_mut(order.id as usize)
			.ok_or(StoreError::UnknownOrder(order.id))?;
		if stored.is_filled() {
			return Err(StoreError::AlreadyFilled(order.id));
		}
		stored.status = OrderStatus::Filled;

		let legs = SettlementLegs::for_order(stored);
		let owner = stored.owner;
		*self
			.balances
			.entry((owner, legs.credit.asset))
			.or_insert(Decimal::ZERO) += legs.credit.quantity;
		*self
			.balances
			.entry((owner, legs.debit.asset))
			.or_insert(Decimal::ZERO) -= legs.debit.quantity;
		Ok(())
	}
}
