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

//! Submit latency against book depth.
//!
//! The matcher walks the counter side level by level, so a match
//! attempt is linear in the number of cheaper price levels. This bench
//! makes that cost visible: the anchor matches the deepest level, the
//! worst case for the scan.

use bourse_core::{OrderCommand, Side};
use bourse_matching::EngineState;
use bourse_settlement::{MemoryStore, Store};
use criterion::{BatchSize, BenchmarkId, Criterion, criterion_group, criterion_main};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

const BOOK_DEPTHS: &[usize] = &[8, 64, 512];

fn command(owner: u64, side: Side, price: Decimal) -> OrderCommand {
	OrderCommand {
		owner,
		side,
		pair: "EUR-USD".parse().unwrap(),
		amount: dec!(100),
		price,
	}
}

/// A book with `depth` sells at distinct ascending prices, plus the
/// buy command that matches the most expensive of them.
fn setup_state(depth: usize) -> (EngineState, OrderCommand) {
	let mut store = MemoryStore::new();
	store.deposit(1, "USD", dec!(1000000));
	store.deposit(2, "EUR", dec!(1000000));

	for i in 1..=depth {
		store
			.save_order(command(2, Side::Sell, Decimal::from(i as u64)))
			.unwrap();
	}

	let state = EngineState::bootstrap("EUR-USD".parse().unwrap(), Box::new(store)).unwrap();
	let anchor = command(1, Side::Buy, Decimal::from(depth as u64));
	(state, anchor)
}

fn bench_submit(c: &mut Criterion) {
	let mut group = c.benchmark_group("submit_full_scan");

	for &depth in BOOK_DEPTHS {
		group.bench_with_input(BenchmarkId::from_parameter(depth), &depth, |b, &depth| {
			b.iter_batched(
				|| setup_state(depth),
				|(mut state, anchor)| state.submit(anchor).unwrap(),
				BatchSize::SmallInput,
			);
		});
	}

	group.finish();
}

criterion_group!(benches, bench_submit);
criterion_main!(benches);
