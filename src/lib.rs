// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod aggregate;
pub mod cli;
pub mod commands;
pub mod config;
pub mod draft;
pub mod error;
pub mod logger;
pub mod models;
pub mod session;
pub mod store;
pub mod utils;
pub mod valuation;
