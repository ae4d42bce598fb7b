//! Positioned-text input model.
//!
//! Tokens are produced by an external PDF decoder, one ordered list per page.
//! This crate never parses raw PDF bytes itself; everything downstream
//! (row clustering, table reconstruction, record extraction) consumes this
//! representation.

use serde::{Deserialize, Serialize};

/// A positioned text fragment extracted from one page.
///
/// Coordinates are in the decoder's layout units with Y increasing downward.
/// Ownership is transient: a token is consumed once per page and never
/// mutated after the decoder hands it over.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    /// The text content of the fragment
    pub text: String,
    /// X coordinate of the fragment's left edge
    pub x: f32,
    /// Y coordinate of the fragment's baseline
    pub y: f32,
    /// Width of the fragment
    pub width: f32,
    /// Height of the fragment
    pub height: f32,
    /// Font size in points
    pub font_size: f32,
}

impl Token {
    /// Create a token with explicit geometry.
    pub fn new(text: impl Into<String>, x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            text: text.into(),
            x,
            y,
            width,
            height,
            font_size: height,
        }
    }

    /// Horizontal center of the fragment, used for column assignment.
    pub fn center_x(&self) -> f32 {
        self.x + self.width / 2.0
    }
}

/// A visual row: tokens sharing a page and a Y coordinate within tolerance.
///
/// Invariant: tokens are ordered by ascending X, and the rows of a page are
/// ordered by ascending representative Y (see [`crate::layout::clustering`]).
#[derive(Debug, Clone, Default)]
pub struct Row {
    /// Representative Y coordinate (the Y of the first token placed)
    pub y: f32,
    /// Tokens in this row, ascending by X
    pub tokens: Vec<Token>,
}

impl Row {
    /// Concatenate the row's token texts with single spaces.
    pub fn text(&self) -> String {
        self.tokens
            .iter()
            .map(|t| t.text.as_str())
            .collect::<Vec<_>>()
            .join(" ")
    }
}
