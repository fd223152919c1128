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

//! Exact-match pairing over the order book.
//!
//! A match requires the anchor and the counter-order to agree exactly
//! on price AND amount. No partial quantities and no price improvement
//! are performed; that constraint is the system's contract, not an
//! oversight. The scan is O(book depth) per attempt, accepted for
//! small books.

use bourse_core::{Order, OrderId, Side, Trade};
use tracing::info;

use crate::orderbook::{BookSide, OrderBook};

/// Find and remove at most one counter-order for an anchor already
/// resting in the book.
///
/// Walks the opposite side in ascending price order, never past the
/// anchor's price, and fires on the first resting order whose price
/// and amount both equal the anchor's exactly. On a match both orders
/// leave the book and come back as a [`Trade`]; otherwise the book is
/// untouched and the anchor stays resident.
pub fn find_match(book: &mut OrderBook, anchor: &Order) -> Option<Trade> {
	let counter_side = anchor.side.opposite();
	let counter_id = scan(book.side(counter_side), anchor)?;

	let anchor_order = book.remove(anchor.side, anchor.price, anchor.id)?;
	let Some(counter) = book.remove(counter_side, anchor.price, counter_id) else {
		// Unreachable unless the scan result was stale; keep the book
		// consistent rather than half-removing a pair.
		book.insert(anchor_order);
		return None;
	};

	let (buy, sell) = match anchor_order.side {
		Side::Buy => (anchor_order, counter),
		Side::Sell => (counter, anchor_order),
	};
	info!(
		target: "matcher",
		buy_id = buy.id,
		sell_id = sell.id,
		pair = %buy.pair,
		price = %buy.price,
		amount = %buy.amount,
		"orders matched"
	);
	Some(Trade::new(buy, sell))
}

/// Walk the counter side while its prices stay at or below the
/// anchor's, returning the first order with exactly equal price and
/// amount. Cheaper levels are scanned first but can never fire.
fn scan(counter_side: &BookSide, anchor: &Order) -> Option<OrderId> {
	for level in counter_side.levels() {
		if level.price() > anchor.price {
			return None;
		}
		if level.price() == anchor.price {
			return level
				.orders()
				.iter()
				.find(|o| o.amount == anchor.amount)
				.map(|o| o.id);
		}
	}
	None
}

/// Sweep every resting buy order against the sell side.
///
/// Buys are visited in book order (ascending price, insertion order
/// within a price); each successful match removes both sides, so a
/// second sweep over the same book finds nothing new. Returns every
/// trade found, each ordered (buy, sell).
pub fn reconcile(book: &mut OrderBook) -> Vec<Trade> {
	let buys: Vec<Order> = book.side(Side::Buy).iter().cloned().collect();
	let mut trades = Vec::new();
	for buy in &buys {
		if let Some(trade) = find_match(book, buy) {
			trades.push(trade);
		}
	}
	trades
}

#[cfg(test)]
mod tests {
	use super::*;
	use bourse_core::OrderStatus;
	use rust_decimal::Decimal;
	use rust_decimal_macros::dec;

	fn order(id: OrderId, side: Side, price: Decimal, amount: Decimal) -> Order {
		Order {
			id,
			owner: id,
			side,
			pair: "EUR-USD".parse().unwrap(),
			amount,
			price,
			status: OrderStatus::Pending,
		}
	}

	fn book_with(orders: Vec<Order>) -> OrderBook {
		OrderBook::seed("EUR-USD".parse().unwrap(), orders)
	}

	#[test]
	fn test_exact_pair_matches() {
		let mut book = book_with(vec![
			order(0, Side::Buy, dec!(1), dec!(100)),
			order(1, Side::Sell, dec!(1), dec!(100)),
		]);

		let trades = reconcile(&mut book);
		assert_eq!(trades.len(), 1);
		assert_eq!(trades[0].buy.id, 0);
		assert_eq!(trades[0].sell.id, 1);
		assert_eq!(book.order_count(), 0);
	}

	#[test]
	fn test_price_difference_never_matches() {
		let mut book = book_with(vec![
			order(0, Side::Buy, dec!(2), dec!(100)),
			// Cheaper, so it is scanned, but unequal price cannot fire.
			order(1, Side::Sell, dec!(1), dec!(100)),
		]);

		assert!(reconcile(&mut book).is_empty());
		assert_eq!(book.order_count(), 2);
	}

	#[test]
	fn test_amount_difference_never_matches() {
		let mut book = book_with(vec![
			order(0, Side::Buy, dec!(1), dec!(100)),
			order(1, Side::Sell, dec!(1), dec!(50)),
		]);

		assert!(reconcile(&mut book).is_empty());
		assert_eq!(book.order_count(), 2);
	}

	#[test]
	fn test_scan_stops_past_anchor_price() {
		let mut book = book_with(vec![
			order(0, Side::Buy, dec!(1), dec!(100)),
			// Exact amount, but resting above the anchor's price.
			order(1, Side::Sell, dec!(2), dec!(100)),
		]);

		let buy = book.side(Side::Buy).iter().next().unwrap().clone();
		assert!(find_match(&mut book, &buy).is_none());
		assert_eq!(book.order_count(), 2);
	}

	// Three buys at prices 1, 2, 3 against sells at 1 and 10: only the
	// two orders that agree exactly on price may pair.
	#[test]
	fn test_reconcile_pairs_only_exact_price() {
		let mut book = book_with(vec![
			order(0, Side::Buy, dec!(1), dec!(100)),
			order(2, Side::Buy, dec!(2), dec!(100)),
			order(4, Side::Buy, dec!(3), dec!(100)),
			order(3, Side::Sell, dec!(1), dec!(100)),
			order(1, Side::Sell, dec!(10), dec!(100)),
		]);

		let trades = reconcile(&mut book);
		assert_eq!(trades.len(), 1);
		assert_eq!(trades[0].buy.id, 0);
		assert_eq!(trades[0].sell.id, 3);

		// Everyone else still rests exactly where they were.
		let buy_ids: Vec<OrderId> = book.side(Side::Buy).iter().map(|o| o.id).collect();
		let sell_ids: Vec<OrderId> = book.side(Side::Sell).iter().map(|o| o.id).collect();
		assert_eq!(buy_ids, vec![2, 4]);
		assert_eq!(sell_ids, vec![1]);
	}

	#[test]
	fn test_first_in_wins_among_equal_counters() {
		let mut book = book_with(vec![
			order(5, Side::Sell, dec!(1), dec!(100)),
			order(6, Side::Sell, dec!(1), dec!(100)),
		]);

		let anchor = order(7, Side::Buy, dec!(1), dec!(100));
		book.insert(anchor.clone());

		let trade = find_match(&mut book, &anchor).unwrap();
		assert_eq!(trade.sell.id, 5);
		assert_eq!(book.order_count(), 1);
	}

	#[test]
	fn test_one_match_per_anchor() {
		let mut book = book_with(vec![
			order(1, Side::Sell, dec!(1), dec!(100)),
			order(2, Side::Sell, dec!(1), dec!(100)),
		]);

		let anchor = order(3, Side::Buy, dec!(1), dec!(100));
		book.insert(anchor.clone());
		assert!(find_match(&mut book, &anchor).is_some());

		// The second sell stays; the anchor is gone with the first.
		assert_eq!(book.side(Side::Sell).order_count(), 1);
		assert!(book.side(Side::Buy).is_empty());
	}

	#[test]
	fn test_self_match_is_permitted() {
		// Same owner on both sides; the matcher does not care.
		let mut buy = order(0, Side::Buy, dec!(1), dec!(100));
		let mut sell = order(1, Side::Sell, dec!(1), dec!(100));
		buy.owner = 9;
		sell.owner = 9;
		let mut book = book_with(vec![buy, sell]);

		let trades = reconcile(&mut book);
		assert_eq!(trades.len(), 1);
		assert_eq!(trades[0].buy.owner, trades[0].sell.owner);
	}

	#[test]
	fn test_missing_anchor_leaves_book_untouched() {
		let mut book = book_with(vec![order(1, Side::Sell, dec!(1), dec!(100))]);

		// Anchor was never inserted; nothing may change.
		let anchor = order(2, Side::Buy, dec!(1), dec!(100));
		assert!(find_match(&mut book, &anchor).is_none());
		assert_eq!(book.order_count(), 1);
	}
}
