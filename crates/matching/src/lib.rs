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

//! Bourse Matching Engine
//!
//! This crate holds the core of the exchange: a price-ordered book of
//! resting orders for one asset pair, the matcher that pairs orders of
//! exactly equal price and quantity, and the engine actor that owns
//! book state and drives settlement.
//!
//! Architecture:
//! - Single-threaded matching core: one dedicated thread owns the book
//!   and the store, so every check-insert-match-settle sequence is
//!   atomic with respect to every other submission
//! - MPSC command channel for ingress, oneshot replies per request
//! - Exact-match semantics: a trade requires identical price AND
//!   identical amount; no partial fills, no price improvement

pub mod config;
pub mod engine;
pub mod matcher;
pub mod orderbook;

pub use config::MatchingConfig;
pub use engine::{EngineCommand, EngineError, EngineHandle, EngineState, MatchingEngine};
pub use matcher::{find_match, reconcile};
pub use orderbook::{BookSide, OrderBook, PriceLevel};
