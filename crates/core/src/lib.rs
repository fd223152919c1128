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

//! Shared data model for the bourse matching engine.
//!
//! This crate defines the order, trade, and asset-pair types exchanged
//! between the matching engine, the settlement bridge, and the
//! persistence layer. It carries no behavior beyond construction and
//! parsing; all balance arithmetic lives in the settlement crate.

pub mod types;

pub use types::*;
