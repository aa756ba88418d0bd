//! Reader for the brush-based `.map` text format written by level editors.
//!
//! ```text
//! // comment
//! {
//! "classname" "worldspawn"
//! {
//! ( x y z ) ( x y z ) ( x y z ) texture offset_u offset_v angle scale_u scale_v contents surface
//! ...
//! }
//! }
//! ```
//!
//! Coordinates in the file are Z-up. They are converted to the Y-up world as they are read.

use common::plane::Plane;
use glam::Vec3;
use thiserror::Error;
use tmf::entities::{parse_key_value, Entity};

use crate::uv::TextureAttributes;

/// Whitespace-separated fields in a brush side line.
pub const SIDE_FIELD_COUNT: usize = 23;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ParserState {
    OutsideEntity,
    EntityOpen,
    BrushOpen,
}

#[derive(Clone, Debug, PartialEq, Error)]
pub enum ParseError {
    #[error("line {line}: `{{` inside a brush")]
    NestedBrush { line: usize },
    #[error("line {line}: `}}` with nothing open")]
    UnbalancedClose { line: usize },
    #[error("line {line}: unexpected {text:?}")]
    UnknownToken { line: usize, text: String },
    #[error("line {line}: brush side has {found} fields, expected {}", SIDE_FIELD_COUNT)]
    FieldCount { line: usize, found: usize },
    #[error("line {line}: malformed point in {text:?}")]
    MalformedPoint { line: usize, text: String },
    #[error("line {line}: {text:?} is not a number")]
    InvalidNumber { line: usize, text: String },
    #[error("line {line}: brush side points are collinear")]
    DegeneratePlane { line: usize },
    #[error("line {line}: input ended with an open {state:?}")]
    UnexpectedEof { line: usize, state: ParserState },
}

/// One side of a brush, with the editor's texturing and flags.
#[derive(Clone, Debug, PartialEq)]
pub struct MapPlane {
    pub plane: Plane,
    pub texture: String,
    pub attributes: TextureAttributes,
    pub content_flags: i32,
    pub surface_flags: i32,
    pub line: usize,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct MapBrush {
    pub sides: Vec<MapPlane>,
    pub line: usize,
}

impl MapBrush {
    pub fn planes(&self) -> Vec<Plane> {
        self.sides.iter().map(|side| side.plane).collect()
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct MapEntity {
    pub entity: Entity,
    pub brushes: Vec<MapBrush>,
    pub line: usize,
}

fn parse_number<T: std::str::FromStr>(token: &str, line: usize) -> Result<T, ParseError> {
    token.parse().map_err(|_| ParseError::InvalidNumber {
        line,
        text: token.to_owned(),
    })
}

/// Parse a brush side line into a plane in world space.
pub fn parse_side(text: &str, line: usize) -> Result<MapPlane, ParseError> {
    let tokens: Vec<&str> = text.split_whitespace().collect();
    if tokens.len() != SIDE_FIELD_COUNT {
        return Err(ParseError::FieldCount {
            line,
            found: tokens.len(),
        });
    }

    let mut points = [Vec3::ZERO; 3];
    for (point, group) in points.iter_mut().zip(tokens.chunks_exact(5)) {
        let [open, x, y, z, close] = group else {
            unreachable!("chunks_exact yields groups of five");
        };
        if *open != "(" || *close != ")" {
            return Err(ParseError::MalformedPoint {
                line,
                text: group.join(" "),
            });
        }

        let x: f32 = parse_number(x, line)?;
        let y: f32 = parse_number(y, line)?;
        let z: f32 = parse_number(z, line)?;
        // Z-up editor space to the Y-up world
        *point = Vec3::new(y, z, x);
    }

    let plane = Plane::from_quake_points(points).ok_or(ParseError::DegeneratePlane { line })?;

    let attributes = TextureAttributes {
        offset_u: parse_number(tokens[16], line)?,
        offset_v: parse_number(tokens[17], line)?,
        angle_degrees: parse_number(tokens[18], line)?,
        scale_u: parse_number(tokens[19], line)?,
        scale_v: parse_number(tokens[20], line)?,
    };

    Ok(MapPlane {
        plane,
        texture: tokens[15].to_owned(),
        attributes,
        content_flags: parse_number(tokens[21], line)?,
        surface_flags: parse_number(tokens[22], line)?,
        line,
    })
}

/// Line-by-line state machine over the map text.
pub struct MapParser {
    state: ParserState,
    entities: Vec<MapEntity>,
    entity: MapEntity,
    brush: MapBrush,
    line: usize,
}

impl Default for MapParser {
    fn default() -> Self {
        Self {
            state: ParserState::OutsideEntity,
            entities: Vec::new(),
            entity: MapEntity::default(),
            brush: MapBrush::default(),
            line: 0,
        }
    }
}

impl MapParser {
    pub fn state(&self) -> ParserState {
        self.state
    }

    /// Feed the next line of the file.
    pub fn feed(&mut self, text: &str) -> Result<(), ParseError> {
        self.line += 1;
        let line = self.line;
        let text = text.trim();

        if text.is_empty() || text.starts_with("//") {
            return Ok(());
        }

        match (self.state, text) {
            (ParserState::OutsideEntity, "{") => {
                self.entity = MapEntity {
                    line,
                    ..Default::default()
                };
                self.state = ParserState::EntityOpen;
            }
            (ParserState::EntityOpen, "{") => {
                self.brush = MapBrush {
                    line,
                    ..Default::default()
                };
                self.state = ParserState::BrushOpen;
            }
            (ParserState::BrushOpen, "{") => return Err(ParseError::NestedBrush { line }),

            (ParserState::OutsideEntity, "}") => return Err(ParseError::UnbalancedClose { line }),
            (ParserState::EntityOpen, "}") => {
                let entity = std::mem::take(&mut self.entity);
                log::trace!(
                    "Entity at line {} with {} brushes",
                    entity.line,
                    entity.brushes.len()
                );
                self.entities.push(entity);
                self.state = ParserState::OutsideEntity;
            }
            (ParserState::BrushOpen, "}") => {
                let brush = std::mem::take(&mut self.brush);
                self.entity.brushes.push(brush);
                self.state = ParserState::EntityOpen;
            }

            (ParserState::EntityOpen, _) => {
                let (key, value) = parse_key_value(text).ok_or_else(|| ParseError::UnknownToken {
                    line,
                    text: text.to_owned(),
                })?;
                self.entity.entity.set(key, value);
            }
            (ParserState::BrushOpen, _) if text.starts_with('(') => {
                let side = parse_side(text, line)?;
                self.brush.sides.push(side);
            }
            (ParserState::BrushOpen | ParserState::OutsideEntity, _) => {
                return Err(ParseError::UnknownToken {
                    line,
                    text: text.to_owned(),
                })
            }
        }

        Ok(())
    }

    /// End of input. Fails if an entity or brush is still open.
    pub fn finish(self) -> Result<Vec<MapEntity>, ParseError> {
        match self.state {
            ParserState::OutsideEntity => Ok(self.entities),
            state => Err(ParseError::UnexpectedEof {
                line: self.line,
                state,
            }),
        }
    }
}

pub fn parse_map(text: &str) -> Result<Vec<MapEntity>, ParseError> {
    let mut parser = MapParser::default();
    for line in text.lines() {
        parser.feed(line)?;
    }
    parser.finish()
}

#[cfg(test)]
mod parser_tests {
    use glam::vec3;

    use super::*;

    const BOX: &str = r#"// Game: Generic
// Format: Quake2
{
"classname" "worldspawn"
"message" "two rooms"
// brush 0
{
( -64 -64 -16 ) ( -64 -63 -16 ) ( -64 -64 -15 ) base/wall 0 0 0 1 1 0 0
( -64 -64 -16 ) ( -64 -64 -15 ) ( -63 -64 -16 ) base/wall 0 0 0 1 1 0 0
( -64 -64 -16 ) ( -63 -64 -16 ) ( -64 -63 -16 ) base/floor 16 8 90 0.5 2 1 4
( 64 64 16 ) ( 64 65 16 ) ( 65 64 16 ) base/floor 0 0 0 1 1 0 0
( 64 64 16 ) ( 65 64 16 ) ( 64 64 17 ) base/wall 0 0 0 1 1 0 0
( 64 64 16 ) ( 64 64 17 ) ( 64 65 16 ) __TB_empty 0 0 0 1 1 0 0
}
}
{
"classname" "info_player_start"
"origin" "0 0 24"
}
"#;

    #[test]
    fn parses_entities_and_brushes() {
        let entities = parse_map(BOX).unwrap();

        assert_eq!(entities.len(), 2);

        let world = &entities[0];
        assert_eq!(world.entity.classname(), Some("worldspawn"));
        assert_eq!(world.entity.get("message"), Some("two rooms"));
        assert_eq!(world.line, 3);
        assert_eq!(world.brushes.len(), 1);

        let brush = &world.brushes[0];
        assert_eq!(brush.line, 7);
        assert_eq!(brush.sides.len(), 6);
        assert_eq!(brush.sides[5].texture, "__TB_empty");

        let floor = &brush.sides[2];
        assert_eq!(floor.line, 10);
        assert_eq!(floor.texture, "base/floor");
        assert_eq!(
            floor.attributes,
            TextureAttributes {
                offset_u: 16.0,
                offset_v: 8.0,
                angle_degrees: 90.0,
                scale_u: 0.5,
                scale_v: 2.0,
            }
        );
        assert_eq!(floor.content_flags, 1);
        assert_eq!(floor.surface_flags, 4);

        let player = &entities[1];
        assert!(player.brushes.is_empty());
        assert_eq!(player.entity.origin(), Some(vec3(0.0, 0.0, 24.0)));
    }

    #[test]
    fn sides_are_converted_to_y_up() {
        let entities = parse_map(BOX).unwrap();
        let planes = entities[0].brushes[0].planes();

        // editor -X, -Y, -Z, +Z, +Y, +X faces
        let expected = [
            (Vec3::NEG_Z, 64.0),
            (Vec3::NEG_X, 64.0),
            (Vec3::NEG_Y, 16.0),
            (Vec3::Y, 16.0),
            (Vec3::X, 64.0),
            (Vec3::Z, 64.0),
        ];

        for (plane, (normal, dist)) in planes.iter().zip(expected) {
            assert!(plane.normal.abs_diff_eq(normal, 1e-6), "{plane:?}");
            assert!((plane.dist() - dist).abs() < 1e-4, "{plane:?}");
        }
    }

    fn error(text: &str) -> ParseError {
        parse_map(text).unwrap_err()
    }

    #[test]
    fn structural_errors() {
        assert_eq!(error("{\n{\n{\n"), ParseError::NestedBrush { line: 3 });
        assert_eq!(error("}\n"), ParseError::UnbalancedClose { line: 1 });
        assert_eq!(
            error("{\n}\n}\n"),
            ParseError::UnbalancedClose { line: 3 }
        );
        assert_eq!(
            error("{\n\"classname\" \"worldspawn\"\n"),
            ParseError::UnexpectedEof {
                line: 2,
                state: ParserState::EntityOpen
            }
        );
        assert_eq!(
            error("{\n{\n"),
            ParseError::UnexpectedEof {
                line: 2,
                state: ParserState::BrushOpen
            }
        );
    }

    #[test]
    fn unknown_lines() {
        assert_eq!(
            error("worldspawn\n"),
            ParseError::UnknownToken {
                line: 1,
                text: "worldspawn".to_owned()
            }
        );
        assert_eq!(
            error("{\nclassname worldspawn\n}\n"),
            ParseError::UnknownToken {
                line: 2,
                text: "classname worldspawn".to_owned()
            }
        );
        assert_eq!(
            error("{\n{\npatchDef2\n}\n}\n"),
            ParseError::UnknownToken {
                line: 3,
                text: "patchDef2".to_owned()
            }
        );
    }

    #[test]
    fn side_errors() {
        let side = |text: &str| parse_side(text, 9).unwrap_err();

        assert_eq!(
            side("( 0 0 0 ) ( 1 0 0 ) ( 0 1 0 ) tex 0 0 0 1 1"),
            ParseError::FieldCount { line: 9, found: 21 }
        );
        assert_eq!(
            side("( 0 0 0 ) [ 1 0 0 ] ( 0 1 0 ) tex 0 0 0 1 1 0 0"),
            ParseError::MalformedPoint {
                line: 9,
                text: "[ 1 0 0 ]".to_owned()
            }
        );
        assert_eq!(
            side("( 0 0 zero ) ( 1 0 0 ) ( 0 1 0 ) tex 0 0 0 1 1 0 0"),
            ParseError::InvalidNumber {
                line: 9,
                text: "zero".to_owned()
            }
        );
        assert_eq!(
            side("( 0 0 0 ) ( 1 0 0 ) ( 0 1 0 ) tex 0 0 0 1 1 0 0.5"),
            ParseError::InvalidNumber {
                line: 9,
                text: "0.5".to_owned()
            }
        );
        assert_eq!(
            side("( 0 0 0 ) ( 1 0 0 ) ( 2 0 0 ) tex 0 0 0 1 1 0 0"),
            ParseError::DegeneratePlane { line: 9 }
        );
    }

    #[test]
    fn later_keys_replace_earlier_ones() {
        let entities = parse_map("{\n\"a\" \"1\"\n\"a\" \"2\"\n}\n").unwrap();
        assert_eq!(entities[0].entity.get("a"), Some("2"));
        assert_eq!(entities[0].entity.len(), 1);
    }
}
