//! Vertex attribute channel identification.

use serde::{Deserialize, Serialize};

/// Identifies a per-vertex attribute channel.
///
/// The discriminant is the vertex-shader input location the renderer binds
/// the channel to, so the order here is part of the output contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum AttributeChannel {
    /// Vertex position (location 0).
    Position = 0,
    /// Vertex color (location 1).
    Color = 1,
    /// Unit vertex normal (location 2).
    Normal = 2,
}

impl AttributeChannel {
    /// Number of components per vertex in every channel.
    pub const COMPONENTS: usize = 3;

    /// Returns all channels in binding order.
    pub const fn all() -> [AttributeChannel; 3] {
        [
            AttributeChannel::Position,
            AttributeChannel::Color,
            AttributeChannel::Normal,
        ]
    }

    /// Returns the shader input location (0-2).
    pub const fn location(self) -> u32 {
        self as u32
    }

    /// Creates a channel from a shader location (0-2).
    pub const fn from_location(location: u32) -> Option<AttributeChannel> {
        match location {
            0 => Some(AttributeChannel::Position),
            1 => Some(AttributeChannel::Color),
            2 => Some(AttributeChannel::Normal),
            _ => None,
        }
    }

    /// Returns a short name for the channel (e.g., "position", "normal").
    pub const fn short_name(self) -> &'static str {
        match self {
            AttributeChannel::Position => "position",
            AttributeChannel::Color => "color",
            AttributeChannel::Normal => "normal",
        }
    }
}
