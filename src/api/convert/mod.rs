// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Image-to-HTML conversion endpoint
//!
//! Provides POST /convert-to-html for reconstructing an uploaded image's
//! text layout as positioned HTML.

pub mod handler;
pub mod response;

pub use handler::convert_to_html_handler;
pub use response::ConvertResponse;
