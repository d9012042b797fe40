// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod aggregate;
pub mod cli;
pub mod config;
pub mod db;
pub mod export;
pub mod filter;
pub mod format;
pub mod models;
pub mod normalize;
pub mod source;
pub mod store;
pub mod templates;
pub mod utils;
pub mod validate;
pub mod commands;
