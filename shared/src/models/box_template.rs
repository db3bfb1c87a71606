//! Box Template Model
//!
//! Parametric structure of a box/package product. A template is an ordered
//! list of pieces; each piece carries named single-letter fields and two
//! dimension expressions (width, height) over those fields.
//!
//! Quotations copy the template by value at creation/edit time. Editing a
//! template later never changes past quotations.

use crate::types::Timestamp;
use serde::{Deserialize, Serialize};

/// One named numeric field of a piece
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Field {
    pub id: i64,
    pub name: String,
    /// Single letter, unique within the piece; referenced by the piece's
    /// dimension expressions (case-insensitive)
    pub key: String,
    pub value: f64,
}

/// One physical part of the box (lid, body, divider, ...)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Piece {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub fields: Vec<Field>,
    /// Arithmetic expression over field keys, e.g. "A+2*B"
    pub width_expression: String,
    pub height_expression: String,
}

impl Piece {
    /// Look up a field value by its single-letter key (case-insensitive).
    pub fn field_value(&self, key: char) -> Option<f64> {
        self.fields
            .iter()
            .find(|f| {
                f.key
                    .chars()
                    .next()
                    .is_some_and(|k| k.eq_ignore_ascii_case(&key))
            })
            .map(|f| f.value)
    }
}

/// Box template entity
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BoxTemplate {
    pub id: i64,
    pub name: String,
    pub code: String,
    #[serde(default)]
    pub pieces: Vec<Piece>,
    #[serde(default)]
    pub created_at: Timestamp,
    #[serde(default)]
    pub updated_at: Timestamp,
}

impl BoxTemplate {
    /// Find a piece by id
    pub fn piece(&self, id: i64) -> Option<&Piece> {
        self.pieces.iter().find(|p| p.id == id)
    }
}

/// Piece field input (for create/update, without id)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldInput {
    pub name: String,
    pub key: String,
    pub value: f64,
}

/// Piece input (for create/update)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PieceInput {
    pub name: String,
    #[serde(default)]
    pub fields: Vec<FieldInput>,
    pub width_expression: String,
    pub height_expression: String,
}

/// Create box template payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BoxTemplateCreate {
    pub name: String,
    pub code: Option<String>,
    #[serde(default)]
    pub pieces: Vec<PieceInput>,
}

/// Update box template payload (a present piece list replaces the whole
/// structure; existing quotations keep their own snapshot)
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct BoxTemplateUpdate {
    pub name: Option<String>,
    pub code: Option<String>,
    pub pieces: Option<Vec<PieceInput>>,
}

fn build_pieces(inputs: Vec<PieceInput>) -> Vec<Piece> {
    inputs
        .into_iter()
        .enumerate()
        .map(|(pi, piece)| Piece {
            id: pi as i64 + 1,
            name: piece.name,
            fields: piece
                .fields
                .into_iter()
                .enumerate()
                .map(|(fi, field)| Field {
                    id: fi as i64 + 1,
                    name: field.name,
                    key: field.key,
                    value: field.value,
                })
                .collect(),
            width_expression: piece.width_expression,
            height_expression: piece.height_expression,
        })
        .collect()
}

impl BoxTemplate {
    /// Build a new entity from a create payload.
    ///
    /// Piece and field ids are sequential within the template; steps of a
    /// quotation reference them through the quotation's own snapshot, so
    /// renumbering on a later update never reaches saved quotations.
    pub fn create(input: BoxTemplateCreate) -> Self {
        let now = crate::util::now_millis();
        Self {
            id: crate::util::snowflake_id(),
            name: input.name,
            code: input
                .code
                .unwrap_or_else(|| crate::util::generate_code("BT")),
            pieces: build_pieces(input.pieces),
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply an update payload in place
    pub fn apply_update(&mut self, update: BoxTemplateUpdate) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(code) = update.code {
            self.code = code;
        }
        if let Some(pieces) = update.pieces {
            self.pieces = build_pieces(pieces);
        }
        self.updated_at = crate::util::now_millis();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn piece_with_fields() -> Piece {
        Piece {
            id: 1,
            name: "Body".to_string(),
            fields: vec![
                Field {
                    id: 1,
                    name: "Length".to_string(),
                    key: "A".to_string(),
                    value: 120.0,
                },
                Field {
                    id: 2,
                    name: "Depth".to_string(),
                    key: "b".to_string(),
                    value: 35.5,
                },
            ],
            width_expression: "A+B".to_string(),
            height_expression: "B".to_string(),
        }
    }

    #[test]
    fn test_field_value_case_insensitive() {
        let piece = piece_with_fields();
        assert_eq!(piece.field_value('a'), Some(120.0));
        assert_eq!(piece.field_value('A'), Some(120.0));
        assert_eq!(piece.field_value('B'), Some(35.5));
    }

    #[test]
    fn test_field_value_unknown_key() {
        let piece = piece_with_fields();
        assert_eq!(piece.field_value('Z'), None);
    }

    #[test]
    fn test_create_numbers_pieces_and_generates_code() {
        let template = BoxTemplate::create(BoxTemplateCreate {
            name: "Pizza box".to_string(),
            code: None,
            pieces: vec![
                PieceInput {
                    name: "Lid".to_string(),
                    fields: vec![FieldInput {
                        name: "Side".to_string(),
                        key: "A".to_string(),
                        value: 330.0,
                    }],
                    width_expression: "A".to_string(),
                    height_expression: "A".to_string(),
                },
                PieceInput {
                    name: "Base".to_string(),
                    fields: vec![],
                    width_expression: "".to_string(),
                    height_expression: "".to_string(),
                },
            ],
        });
        assert!(template.code.starts_with("BT"));
        assert_eq!(template.pieces[0].id, 1);
        assert_eq!(template.pieces[1].id, 2);
        assert_eq!(template.pieces[0].fields[0].id, 1);
    }

    #[test]
    fn test_piece_lookup() {
        let template = BoxTemplate {
            id: 9,
            name: "Shoe box".to_string(),
            code: "BT00001".to_string(),
            pieces: vec![piece_with_fields()],
            created_at: 0,
            updated_at: 0,
        };
        assert!(template.piece(1).is_some());
        assert!(template.piece(2).is_none());
    }
}
