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

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// User identifier, assigned by the persistence layer.
pub type UserId = u64;

/// Order identifier, assigned by the persistence layer on save.
pub type OrderId = u64;

/// Order side (buy or sell)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
	Buy,
	Sell,
}

impl Side {
	/// The side a counter-order must be on to match this one.
	pub fn opposite(self) -> Side {
		match self {
			Side::Buy => Side::Sell,
			Side::Sell => Side::Buy,
		}
	}
}

/// Order status
///
/// An order is created `Pending` and transitions to `Filled` exactly
/// once, by settlement. There is no cancelled or expired state; a
/// resting order stays `Pending` until matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
	Pending,
	Filled,
}

/// Error raised when parsing an asset pair string
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid asset pair {0:?}, expected \"BASE-QUOTE\"")]
pub struct PairParseError(pub String);

/// Asset pair traded by an order, e.g. `EUR-USD`
///
/// The base asset is what an order's `amount` counts; the quote asset
/// is what its `price` is denominated in. Serialized as the joined
/// `"BASE-QUOTE"` string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Pair {
	base: String,
	quote: String,
}

impl Pair {
	/// The asset whose quantity an order's `amount` denotes.
	pub fn base(&self) -> &str {
		&self.base
	}

	/// The asset an order's `price` is denominated in.
	pub fn quote(&self) -> &str {
		&self.quote
	}
}

impl FromStr for Pair {
	type Err = PairParseError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let (base, quote) = s.split_once('-').ok_or_else(|| PairParseError(s.to_string()))?;
		if base.is_empty() || quote.is_empty() || quote.contains('-') {
			return Err(PairParseError(s.to_string()));
		}
		Ok(Pair {
			base: base.to_string(),
			quote: quote.to_string(),
		})
	}
}

impl fmt::Display for Pair {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}-{}", self.base, self.quote)
	}
}

impl TryFrom<String> for Pair {
	type Error = PairParseError;

	fn try_from(s: String) -> Result<Self, Self::Error> {
		s.parse()
	}
}

impl From<Pair> for String {
	fn from(pair: Pair) -> String {
		pair.to_string()
	}
}

/// Order submission received from the request layer
///
/// This represents an order that has been validated and authenticated
/// upstream and is ready to enter the engine pipeline. It has no id
/// yet; the persistence layer assigns one on save.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderCommand {
	/// Submitting user
	pub owner: UserId,
	/// Order side
	pub side: Side,
	/// Asset pair traded
	pub pair: Pair,
	/// Quantity of the base asset
	pub amount: Decimal,
	/// Quote-asset price per unit of base asset
	pub price: Decimal,
}

/// Order held by the book or recorded by the persistence layer
///
/// Identity fields are immutable once created; only `status` changes,
/// and only through settlement.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
	/// Unique order id
	pub id: OrderId,
	/// Submitting user
	pub owner: UserId,
	/// Order side
	pub side: Side,
	/// Asset pair traded
	pub pair: Pair,
	/// Quantity of the base asset
	pub amount: Decimal,
	/// Quote-asset price per unit of base asset
	pub price: Decimal,
	/// Lifecycle status
	pub status: OrderStatus,
}

impl Order {
	/// Build the persisted form of a command once the store has
	/// assigned it an id. Orders always start out pending.
	pub fn from_command(id: OrderId, cmd: OrderCommand) -> Self {
		Self {
			id,
			owner: cmd.owner,
			side: cmd.side,
			pair: cmd.pair,
			amount: cmd.amount,
			price: cmd.price,
			status: OrderStatus::Pending,
		}
	}

	pub fn is_filled(&self) -> bool {
		self.status == OrderStatus::Filled
	}
}

/// A matched pair of opposite-side orders
///
/// Both orders share the same pair, price, and amount by construction;
/// the matcher only pairs orders on exact equality of both.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trade {
	/// Generated trade id
	pub trade_id: String,
	/// The buy-side order
	pub buy: Order,
	/// The sell-side order
	pub sell: Order,
}

impl Trade {
	pub fn new(buy: Order, sell: Order) -> Self {
		Self {
			trade_id: format!("trade_{}", uuid::Uuid::new_v4()),
			buy,
			sell,
		}
	}

	/// Price both legs executed at.
	pub fn price(&self) -> Decimal {
		self.buy.price
	}

	/// Base-asset quantity both legs executed for.
	pub fn amount(&self) -> Decimal {
		self.buy.amount
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rust_decimal_macros::dec;

	#[test]
	fn test_pair_parsing() {
		let pair: Pair = "EUR-USD".parse().unwrap();
		assert_eq!(pair.base(), "EUR");
		assert_eq!(pair.quote(), "USD");
		assert_eq!(pair.to_string(), "EUR-USD");
	}

	#[test]
	fn test_pair_rejects_malformed() {
		assert!("EURUSD".parse::<Pair>().is_err());
		assert!("-USD".parse::<Pair>().is_err());
		assert!("EUR-".parse::<Pair>().is_err());
		assert!("EUR-USD-JPY".parse::<Pair>().is_err());
	}

	#[test]
	fn test_pair_serde_as_string() {
		let pair: Pair = "BTC-USDT".parse().unwrap();
		let json = serde_json::to_string(&pair).unwrap();
		assert_eq!(json, "\"BTC-USDT\"");
		let back: Pair = serde_json::from_str(&json).unwrap();
		assert_eq!(back, pair);
	}

	#[test]
	fn test_order_from_command_is_pending() {
		let cmd = OrderCommand {
			owner: 7,
			side: Side::Buy,
			pair: "EUR-USD".parse().unwrap(),
			amount: dec!(100),
			price: dec!(2),
		};

		let order = Order::from_command(42, cmd);
		assert_eq!(order.id, 42);
		assert_eq!(order.status, OrderStatus::Pending);
		assert!(!order.is_filled());
	}

	#[test]
	fn test_side_opposite() {
		assert_eq!(Side::Buy.opposite(), Side::Sell);
		assert_eq!(Side::Sell.opposite(), Side::Buy);
	}
}
