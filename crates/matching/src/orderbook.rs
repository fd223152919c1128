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

use std::collections::BTreeMap;

use bourse_core::{Order, OrderId, Pair, Side};
use rust_decimal::Decimal;

/// Price level in the order book
///
/// A price level holds every resting order at one price, in the order
/// they were inserted. First-in stays ahead of later equal-priced
/// orders, which fixes the tie-break the matcher relies on.
#[derive(Debug, Clone)]
pub struct PriceLevel {
	price: Decimal,
	orders: Vec<Order>,
}

impl PriceLevel {
	fn new(price: Decimal) -> Self {
		Self {
			price,
			orders: Vec::new(),
		}
	}

	fn add_order(&mut self, order: Order) {
		self.orders.push(order);
	}

	fn remove_order(&mut self, order_id: OrderId) -> Option<Order> {
		let pos = self.orders.iter().position(|o| o.id == order_id)?;
		Some(self.orders.remove(pos))
	}

	pub fn price(&self) -> Decimal {
		self.price
	}

	/// Resting orders at this price, oldest first.
	pub fn orders(&self) -> &[Order] {
		&self.orders
	}

	pub fn is_empty(&self) -> bool {
		self.orders.is_empty()
	}

	pub fn order_count(&self) -> usize {
		self.orders.len()
	}
}

/// One side of the book: price levels in ascending order
///
/// Both sides ascend, because the matcher scans each side
/// cheapest-first; there is no bid/ask asymmetry in exact-match
/// semantics.
#[derive(Debug, Clone, Default)]
pub struct BookSide {
	levels: BTreeMap<Decimal, PriceLevel>,
}

impl BookSide {
	fn add_order(&mut self, order: Order) {
		self.levels
			.entry(order.price)
			.or_insert_with(|| PriceLevel::new(order.price))
			.add_order(order);
	}

	fn remove_order(&mut self, price: Decimal, order_id: OrderId) -> Option<Order> {
		let level = self.levels.get_mut(&price)?;
		let order = level.remove_order(order_id)?;
		if level.is_empty() {
			self.levels.remove(&price);
		}
		Some(order)
	}

	/// Price levels in ascending price order.
	pub fn levels(&self) -> impl Iterator<Item = &PriceLevel> {
		self.levels.values()
	}

	/// Resting orders in ascending price order, insertion order within
	/// a price.
	pub fn iter(&self) -> impl Iterator<Item = &Order> {
		self.levels.values().flat_map(|level| level.orders.iter())
	}

	pub fn order_count(&self) -> usize {
		self.levels.values().map(|l| l.order_count()).sum()
	}

	pub fn is_empty(&self) -> bool {
		self.levels.is_empty()
	}
}

/// Order book for one asset pair (single-threaded)
///
/// Two independently sorted sides of pending orders. All operations
/// are designed to be called from a single thread (the matching loop);
/// there is no interior locking.
#[derive(Debug, Clone)]
pub struct OrderBook {
	pair: Pair,
	buys: BookSide,
	sells: BookSide,
}

impl OrderBook {
	/// Create an empty book for a pair.
	pub fn new(pair: Pair) -> Self {
		Self {
			pair,
			buys: BookSide::default(),
			sells: BookSide::default(),
		}
	}

	/// Build a book from a batch of pending orders, inserting them in
	/// the order given. The batch order decides the tie-break among
	/// equal prices, exactly as live insertion would.
	pub fn seed(pair: Pair, orders: Vec<Order>) -> Self {
		let mut book = Self::new(pair);
		for order in orders {
			book.insert(order);
		}
		book
	}

	pub fn pair(&self) -> &Pair {
		&self.pair
	}

	/// Insert a pending order into its side. The order lands after all
	/// cheaper-or-equal orders already present; always succeeds.
	pub fn insert(&mut self, order: Order) {
		self.side_mut(order.side).add_order(order);
	}

	/// Remove a resting order, dropping its price level if that
	/// empties it. Returns `None` if no such order rests at the price.
	pub fn remove(&mut self, side: Side, price: Decimal, order_id: OrderId) -> Option<Order> {
		self.side_mut(side).remove_order(price, order_id)
	}

	pub fn side(&self, side: Side) -> &BookSide {
		match side {
			Side::Buy => &self.buys,
			Side::Sell => &self.sells,
		}
	}

	fn side_mut(&mut self, side: Side) -> &mut BookSide {
		match side {
			Side::Buy => &mut self.buys,
			Side::Sell => &mut self.sells,
		}
	}

	/// Total number of resting orders across both sides.
	pub fn order_count(&self) -> usize {
		self.buys.order_count() + self.sells.order_count()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use bourse_core::{OrderStatus, Side};
	use rust_decimal_macros::dec;

	fn create_test_order(id: OrderId, side: Side, price: Decimal) -> Order {
		Order {
			id,
			owner: 1,
			side,
			pair: "EUR-USD".parse().unwrap(),
			amount: dec!(100),
			price,
			status: OrderStatus::Pending,
		}
	}

	#[test]
	fn test_insert_and_remove() {
		let mut book = OrderBook::new("EUR-USD".parse().unwrap());

		book.insert(create_test_order(1, Side::Buy, dec!(2)));
		assert_eq!(book.order_count(), 1);

		let removed = book.remove(Side::Buy, dec!(2), 1);
		assert!(removed.is_some());
		assert_eq!(book.order_count(), 0);
		assert!(book.side(Side::Buy).is_empty());
	}

	#[test]
	fn test_side_stays_price_ascending() {
		let mut book = OrderBook::new("EUR-USD".parse().unwrap());

		for (id, price) in [(1, dec!(5)), (2, dec!(1)), (3, dec!(3)), (4, dec!(2))] {
			book.insert(create_test_order(id, Side::Sell, price));
		}

		let prices: Vec<Decimal> = book.side(Side::Sell).iter().map(|o| o.price).collect();
		assert_eq!(prices, vec![dec!(1), dec!(2), dec!(3), dec!(5)]);
	}

	#[test]
	fn test_equal_prices_keep_insertion_order() {
		let mut book = OrderBook::new("EUR-USD".parse().unwrap());

		book.insert(create_test_order(10, Side::Buy, dec!(2)));
		book.insert(create_test_order(11, Side::Buy, dec!(1)));
		book.insert(create_test_order(12, Side::Buy, dec!(2)));
		book.insert(create_test_order(13, Side::Buy, dec!(2)));

		let ids: Vec<OrderId> = book.side(Side::Buy).iter().map(|o| o.id).collect();
		assert_eq!(ids, vec![11, 10, 12, 13]);
	}

	#[test]
	fn test_seed_preserves_batch_order_among_equals() {
		let orders = vec![
			create_test_order(7, Side::Sell, dec!(4)),
			create_test_order(3, Side::Sell, dec!(4)),
			create_test_order(5, Side::Sell, dec!(4)),
		];
		let book = OrderBook::seed("EUR-USD".parse().unwrap(), orders);

		let ids: Vec<OrderId> = book.side(Side::Sell).iter().map(|o| o.id).collect();
		assert_eq!(ids, vec![7, 3, 5]);
	}

	#[test]
	fn test_remove_drops_empty_level() {
		let mut book = OrderBook::new("EUR-USD".parse().unwrap());
		book.insert(create_test_order(1, Side::Sell, dec!(2)));
		book.insert(create_test_order(2, Side::Sell, dec!(3)));

		book.remove(Side::Sell, dec!(2), 1);
		let level_prices: Vec<Decimal> =
			book.side(Side::Sell).levels().map(|l| l.price()).collect();
		assert_eq!(level_prices, vec![dec!(3)]);
	}

	#[test]
	fn test_remove_misses_are_none() {
		let mut book = OrderBook::new("EUR-USD".parse().unwrap());
		book.insert(create_test_order(1, Side::Buy, dec!(2)));

		assert!(book.remove(Side::Buy, dec!(3), 1).is_none());
		assert!(book.remove(Side::Buy, dec!(2), 99).is_none());
		assert!(book.remove(Side::Sell, dec!(2), 1).is_none());
		assert_eq!(book.order_count(), 1);
	}
}
