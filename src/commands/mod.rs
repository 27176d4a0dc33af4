// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

pub mod overview;
pub mod assets;
pub mod liabilities;
pub mod transactions;
pub mod advisor;
pub mod exporter;
pub mod doctor;
