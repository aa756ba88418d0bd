use std::fmt::Write;

use glam::Vec3;

use crate::error::TMFError;

/// A key/value bag describing one game object. Keys keep the order they were first set in.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Entity {
    properties: Vec<(String, String)>,
}

/// Where the geometry of an entity comes from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ModelRef {
    /// `*N`, the Nth model of this map file.
    Internal(usize),
    /// Anything else, a path to a model outside the map.
    External(String),
}

impl Entity {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.properties
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Set `key`, replacing any earlier value in place.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        match self.properties.iter_mut().find(|(k, _)| *k == key) {
            Some((_, v)) => *v = value,
            None => self.properties.push((key, value)),
        }
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        let index = self.properties.iter().position(|(k, _)| k == key)?;
        Some(self.properties.remove(index).1)
    }

    pub fn properties(&self) -> impl Iterator<Item = (&str, &str)> {
        self.properties
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    pub fn classname(&self) -> Option<&str> {
        self.get("classname")
    }

    pub fn model(&self) -> Option<ModelRef> {
        let model = self.get("model")?;
        Some(
            match model.strip_prefix('*').and_then(|n| n.parse().ok()) {
                Some(index) => ModelRef::Internal(index),
                None => ModelRef::External(model.to_owned()),
            },
        )
    }

    /// The `origin` property as written in the source map.
    pub fn origin(&self) -> Option<Vec3> {
        let mut parts = self.get("origin")?.split_whitespace().map(str::parse::<f32>);
        let x = parts.next()?.ok()?;
        let y = parts.next()?.ok()?;
        let z = parts.next()?.ok()?;
        if parts.next().is_some() {
            return None;
        }
        Some(Vec3::new(x, y, z))
    }
}

/// Split a `"key" "value"` line. Everything between the outer quotes and the first `" "` is the
/// key, the rest is the value.
pub fn parse_key_value(line: &str) -> Option<(&str, &str)> {
    line.strip_prefix('"')?.strip_suffix('"')?.split_once("\" \"")
}

/// The entity chunk text: each entity as `{`, one `"key" "value"` line per property, `}`.
pub fn format_entities<'a>(entities: impl IntoIterator<Item = &'a Entity>) -> String {
    let mut text = String::new();
    for entity in entities {
        text.push_str("{\n");
        for (key, value) in entity.properties() {
            // writing to a String cannot fail
            let _ = writeln!(text, "\"{key}\" \"{value}\"");
        }
        text.push_str("}\n");
    }
    text
}

pub fn parse_entities(text: &str) -> Result<Vec<Entity>, TMFError> {
    let mut entities = Vec::new();
    let mut current: Option<Entity> = None;
    let mut last_line = 0;

    for (index, line) in text.lines().enumerate() {
        let line_number = index + 1;
        last_line = line_number;
        let syntax = |message| TMFError::EntitySyntax {
            line: line_number,
            message,
        };

        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match line {
            "{" => {
                if current.replace(Entity::new()).is_some() {
                    return Err(syntax("entity opened inside another entity"));
                }
            }
            "}" => {
                let entity = current.take().ok_or_else(|| syntax("unmatched }"))?;
                entities.push(entity);
            }
            _ => {
                let entity = current
                    .as_mut()
                    .ok_or_else(|| syntax("property outside of an entity"))?;
                let (key, value) =
                    parse_key_value(line).ok_or_else(|| syntax("expected \"key\" \"value\""))?;
                entity.set(key, value);
            }
        }
    }

    if current.is_some() {
        return Err(TMFError::EntitySyntax {
            line: last_line,
            message: "entity is never closed",
        });
    }

    Ok(entities)
}

#[cfg(test)]
mod entities_tests {
    use super::*;

    fn entity(properties: &[(&str, &str)]) -> Entity {
        let mut entity = Entity::new();
        for (k, v) in properties {
            entity.set(*k, *v);
        }
        entity
    }

    #[test]
    fn key_value_lines() {
        assert_eq!(parse_key_value("\"a\" \"b c\""), Some(("a", "b c")));
        assert_eq!(parse_key_value("\"\" \"\""), Some(("", "")));
        assert_eq!(parse_key_value("\"origin\" \"0 0 0\""), Some(("origin", "0 0 0")));
        assert_eq!(parse_key_value("a b"), None);
        assert_eq!(parse_key_value("\"a\""), None);
    }

    #[test]
    fn entity_text_layout() {
        let entities = [
            entity(&[("classname", "worldspawn"), ("message", "hi")]),
            entity(&[("classname", "func_door"), ("model", "*1")]),
        ];

        let text = format_entities(&entities);

        assert_eq!(
            text,
            "{\n\"classname\" \"worldspawn\"\n\"message\" \"hi\"\n}\n\
             {\n\"classname\" \"func_door\"\n\"model\" \"*1\"\n}\n"
        );
        assert_eq!(parse_entities(&text).unwrap(), entities);
    }

    #[test]
    fn set_keeps_first_position() {
        let mut e = entity(&[("a", "1"), ("b", "2")]);
        e.set("a", "3");

        assert_eq!(e.properties().collect::<Vec<_>>(), [("a", "3"), ("b", "2")]);
        assert_eq!(e.remove("a"), Some("3".to_owned()));
        assert_eq!(e.get("a"), None);
        assert_eq!(e.len(), 1);
    }

    #[test]
    fn model_references() {
        assert_eq!(
            entity(&[("model", "*3")]).model(),
            Some(ModelRef::Internal(3))
        );
        assert_eq!(
            entity(&[("model", "props/crate.obj")]).model(),
            Some(ModelRef::External("props/crate.obj".to_owned()))
        );
        assert_eq!(
            entity(&[("model", "*door")]).model(),
            Some(ModelRef::External("*door".to_owned()))
        );
        assert_eq!(entity(&[]).model(), None);
    }

    #[test]
    fn origin_needs_three_numbers() {
        assert_eq!(
            entity(&[("origin", "1 -2 3.5")]).origin(),
            Some(Vec3::new(1.0, -2.0, 3.5))
        );
        assert_eq!(entity(&[("origin", "1 2")]).origin(), None);
        assert_eq!(entity(&[("origin", "1 2 3 4")]).origin(), None);
        assert_eq!(entity(&[("origin", "1 x 3")]).origin(), None);
    }

    #[test]
    fn malformed_entity_text() {
        let cases = [
            ("{\n{\n}\n", 2),
            ("}\n", 1),
            ("\"a\" \"b\"\n", 1),
            ("{\nnot a property\n}\n", 2),
            ("{\n\"a\" \"b\"\n", 2),
        ];

        for (text, expected) in cases {
            match parse_entities(text) {
                Err(TMFError::EntitySyntax { line, .. }) => assert_eq!(line, expected, "{text:?}"),
                other => panic!("{text:?} parsed as {other:?}"),
            }
        }
    }
}
