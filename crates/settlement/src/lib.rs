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

//! Settlement bridge between the matching engine and user balances.
//!
//! This crate owns the two money-touching steps of an order's life:
//! the pre-trade liquidity check that gates admission to the book, and
//! the post-match balance transfer that turns a filled order into
//! ownership changes. It also defines the narrow [`Store`] contract
//! through which both steps reach the persistence layer, plus an
//! in-memory implementation of it.
//!
//! The liquidity check is advisory at submission time only: it does
//! not reserve funds, so callers that want check-then-admit atomicity
//! must serialize submissions themselves (the matching engine does).

pub mod liquidity;
pub mod memory;
pub mod store;
pub mod transfer;

use rust_decimal::Decimal;
use thiserror::Error;

pub use liquidity::{required_funding, verify_liquidity};
pub use memory::MemoryStore;
pub use store::{Store, StoreError};
pub use transfer::{BalanceLeg, SettlementLegs, settle, settle_trade};

/// Error types for settlement operations
#[derive(Debug, Error)]
pub enum SettlementError {
	/// The submitting user cannot cover the order. Raised before the
	/// order is persisted or inserted into the book.
	#[error("insufficient funds: need {required} {asset}, have {available}")]
	InsufficientFunds {
		asset: String,
		required: Decimal,
		available: Decimal,
	},
	#[error(transparent)]
	Store(#[from] StoreError),
}
