// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod importer;
pub mod transactions;
pub mod stock;
pub mod fish;
pub mod reports;
pub mod exporter;
pub mod template;
pub mod settings;
