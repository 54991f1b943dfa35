// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

pub mod auth_handler;
pub mod data_handler;
pub mod scrape_handler;
