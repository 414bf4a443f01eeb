//=========================================================================
// Recording Canvas (tests only)
//=========================================================================
//
// Captures draw calls so tests can assert on what a screen or effect
// rendered without rasterizing anything.
//
//=========================================================================

use super::{Canvas, Color, Rect, Text, Texture, Vec2};

/// One captured draw call.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum DrawCommand {
    Clear(Color),
    FillRect { rect: Rect, color: Color },
    Line { from: Vec2, to: Vec2, color: Color },
    Texture { size: (u32, u32), dest: Rect, tint: Color },
    Text { content: String, position: Vec2, size: f32, color: Color },
}

/// Canvas that records instead of drawing.
pub(crate) struct RecordingCanvas {
    width: u32,
    height: u32,
    pub(crate) commands: Vec<DrawCommand>,
}

impl RecordingCanvas {
    pub(crate) fn new(width: u32, height: u32) -> Self {
        Self { width, height, commands: Vec::new() }
    }

    pub(crate) fn textures(&self) -> Vec<(Rect, Color)> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Texture { dest, tint, .. } => Some((*dest, *tint)),
                _ => None,
            })
            .collect()
    }

    pub(crate) fn texts(&self) -> Vec<(String, Vec2, Color)> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { content, position, color, .. } => {
                    Some((content.clone(), *position, *color))
                }
                _ => None,
            })
            .collect()
    }

    pub(crate) fn lines(&self) -> Vec<(Vec2, Vec2, Color)> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Line { from, to, color } => Some((*from, *to, *color)),
                _ => None,
            })
            .collect()
    }

    pub(crate) fn rects(&self) -> Vec<(Rect, Color)> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::FillRect { rect, color } => Some((*rect, *color)),
                _ => None,
            })
            .collect()
    }

    pub(crate) fn has_text(&self, content: &str) -> bool {
        self.texts().iter().any(|(c, _, _)| c == content)
    }
}

impl Canvas for RecordingCanvas {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn clear(&mut self, color: Color) {
        self.commands.push(DrawCommand::Clear(color));
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.commands.push(DrawCommand::FillRect { rect, color });
    }

    fn draw_line(&mut self, from: Vec2, to: Vec2, color: Color) {
        self.commands.push(DrawCommand::Line { from, to, color });
    }

    fn draw_texture(&mut self, texture: &Texture, dest: Rect, tint: Color) {
        self.commands.push(DrawCommand::Texture { size: texture.size(), dest, tint });
    }

    fn draw_text(&mut self, text: &Text) {
        self.commands.push(DrawCommand::Text {
            content: text.content.clone(),
            position: text.position,
            size: text.size,
            color: text.color,
        });
    }
}
