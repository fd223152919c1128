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

use bourse_core::{OrderCommand, Pair, Side};
use rust_decimal::Decimal;

use crate::{SettlementError, store::Store};

/// Asset and quantity a user must hold to cover an order.
///
/// A sell gives up the base asset, so it must be covered by base-asset
/// `amount`; a buy gives up the quote asset, so it must be covered by
/// quote-asset `amount * price`. This selection and the debit leg of
/// [`crate::SettlementLegs`] must always agree.
pub fn required_funding(side: Side, pair: &Pair, amount: Decimal, price: Decimal) -> (String, Decimal) {
	match side {
		Side::Sell => (pair.base().to_string(), amount),
		Side::Buy => (pair.quote().to_string(), amount * price),
	}
}

/// Check that the submitting user's recorded balance covers the order.
///
/// Advisory only: nothing is reserved, so two orders admitted back to
/// back can both pass against the same funds. The engine serializes
/// submissions to keep check-then-admit atomic per engine; the check
/// still cannot see funds consumed by other engines on the same store.
pub fn verify_liquidity(store: &dyn Store, cmd: &OrderCommand) -> Result<(), SettlementError> {
	let (asset, required) = required_funding(cmd.side, &cmd.pair, cmd.amount, cmd.price);
	let available = store.balance(cmd.owner, &asset)?;
	if available < required {
		return Err(SettlementError::InsufficientFunds {
			asset,
			required,
			available,
		});
	}
	Ok(())
}
