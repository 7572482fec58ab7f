/*
 * This file is part of Adaptive MIPI.
 *
 * Copyright (C) 2025 Adaptive MIPI contributors
 *
 * Adaptive MIPI is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * Adaptive MIPI is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with Adaptive MIPI. If not, see <https://www.gnu.org/licenses/>.
 */

//! Adaptive MIPI - RF channel aware camera MIPI clock selection
//!
//! Front end over `am-core`: the `amctl` command line, offline frame decoding
//! and resolution, and a client for `adaptive-mipid`.

pub mod cli;
pub mod client;
pub mod commands;
