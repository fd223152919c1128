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

use bourse_core::{Order, OrderStatus, Side, Trade};
use rust_decimal::Decimal;
use tracing::debug;

use crate::{SettlementError, store::Store};

/// One balance movement: an asset and a quantity of it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BalanceLeg {
	pub asset: String,
	pub quantity: Decimal,
}

/// The two balance movements that settle one filled order
///
/// A buy receives the base asset it bought (`amount`) and gives up the
/// quote asset it paid (`amount * price`); a sell is the mirror image.
/// Both movements apply to the order's own user; the counterparty is
/// settled by its own order's legs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettlementLegs {
	/// Added to the owner's balance of `credit.asset`.
	pub credit: BalanceLeg,
	/// Subtracted from the owner's balance of `debit.asset`.
	pub debit: BalanceLeg,
}

impl SettlementLegs {
	pub fn for_order(order: &Order) -> Self {
		let base = BalanceLeg {
			asset: order.pair.base().to_string(),
			quantity: order.amount,
		};
		let quote = BalanceLeg {
			asset: order.pair.quote().to_string(),
			quantity: order.amount * order.price,
		};
		match order.side {
			Side::Buy => SettlementLegs {
				credit: base,
				debit: quote,
			},
			Side::Sell => SettlementLegs {
				credit: quote,
				debit: base,
			},
		}
	}
}

/// Settle one side of a match: record the fill and mirror the status
/// transition onto the caller's copy of the order.
///
/// The store applies the legs and guards against an order being filled
/// twice; [`StoreError::AlreadyFilled`] propagates out of here as a
/// logic fault.
///
/// [`StoreError::AlreadyFilled`]: crate::StoreError::AlreadyFilled
pub fn settle(store: &mut dyn Store, order: &mut Order) -> Result<(), SettlementError> {
	store.record_fill(order)?;
	order.status = OrderStatus::Filled;
	debug!(
		target: "settlement",
		order_id = order.id,
		owner = order.owner,
		"order settled"
	);
	Ok(())
}

/// Settle both sides of a trade, buy leg first.
///
/// Each side settles independently against its own user's balances. If
/// the sell leg fails after the buy leg succeeded, the error surfaces
/// and the buy leg stays applied; the persisted state is inconsistent
/// and the caller is told so.
pub fn settle_trade(store: &mut dyn Store, trade: &mut Trade) -> Result<(), SettlementError> {
	settle(store, &mut trade.buy)?;
	settle(store, &mut trade.sell)?;
	Ok(())
}
