//! Byte-level descriptions of the record types, used to check the in-memory structs against the
//! file format and to print records field by field.

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FieldKind {
    I32,
    U32,
    F32,
    /// NUL-padded text.
    Bytes,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Field {
    pub name: &'static str,
    pub offset: usize,
    pub width: usize,
    pub kind: FieldKind,
}

impl Field {
    pub const fn new(name: &'static str, offset: usize, kind: FieldKind) -> Self {
        Self {
            name,
            offset,
            width: 4,
            kind,
        }
    }

    pub const fn bytes(name: &'static str, offset: usize, width: usize) -> Self {
        Self {
            name,
            offset,
            width,
            kind: FieldKind::Bytes,
        }
    }

    /// Render this field of `record` for display. Returns `None` if the record is too short.
    pub fn format(&self, record: &[u8]) -> Option<String> {
        let raw = record.get(self.offset..self.offset + self.width)?;
        Some(match self.kind {
            FieldKind::I32 => i32::from_le_bytes(raw.try_into().ok()?).to_string(),
            FieldKind::U32 => u32::from_le_bytes(raw.try_into().ok()?).to_string(),
            FieldKind::F32 => f32::from_le_bytes(raw.try_into().ok()?).to_string(),
            FieldKind::Bytes => {
                let end = raw.iter().position(|b| *b == 0).unwrap_or(raw.len());
                format!("{:?}", String::from_utf8_lossy(&raw[..end]))
            }
        })
    }
}

/// Size of a record with the given fields, assuming they are listed in order and tightly packed.
pub const fn record_size(layout: &[Field]) -> usize {
    match layout.last() {
        Some(field) => field.offset + field.width,
        None => 0,
    }
}

/// Whether each field starts where the previous one ended.
pub fn is_packed(layout: &[Field]) -> bool {
    layout
        .windows(2)
        .all(|pair| pair[0].offset + pair[0].width == pair[1].offset)
        && layout.first().map_or(true, |field| field.offset == 0)
}

#[cfg(test)]
mod layout_tests {
    use super::*;

    #[test]
    fn formats_each_kind() {
        let mut record = Vec::new();
        record.extend_from_slice(&(-3i32).to_le_bytes());
        record.extend_from_slice(&7u32.to_le_bytes());
        record.extend_from_slice(&1.5f32.to_le_bytes());
        record.extend_from_slice(b"ab\0\0");

        let layout = [
            Field::new("a", 0, FieldKind::I32),
            Field::new("b", 4, FieldKind::U32),
            Field::new("c", 8, FieldKind::F32),
            Field::bytes("d", 12, 4),
        ];

        assert!(is_packed(&layout));
        assert_eq!(record_size(&layout), 16);

        let text: Vec<String> = layout
            .iter()
            .map(|field| field.format(&record).unwrap())
            .collect();
        assert_eq!(text, ["-3", "7", "1.5", "\"ab\""]);

        assert_eq!(layout[3].format(&record[..8]), None);
    }

    #[test]
    fn gaps_are_not_packed() {
        let layout = [
            Field::new("a", 0, FieldKind::I32),
            Field::new("b", 8, FieldKind::I32),
        ];
        assert!(!is_packed(&layout));
    }
}
