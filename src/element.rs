//! Element model: card elements, their typed payloads, and the ordered store.
//!
//! This module defines what sits on a card face (`CanvasElement`), the closed
//! set of element kinds (`ElementKind`) and their payloads (`ElementPayload`),
//! a geometry-only update type (`GeometryUpdate`), and the runtime list that
//! mirrors the host's element list (`ElementList`).
//!
//! The engine only ever writes geometry. Payload edits go through a separate
//! path (`ElementList::apply_payload`) so the two can never be mixed in one
//! update.
//!
//! Host fields the payload types don't model (styling, borders, fields of
//! element types newer than this crate) ride along in `CanvasElement::extra`
//! and are written back untouched on serialization.

#[cfg(test)]
#[path = "element_test.rs"]
mod element_test;

use serde::{Deserialize, Serialize, Serializer};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::consts::TITLE_FONT_SIZE;
use crate::geometry::Geometry;

/// Unique identifier for a card element.
pub type ElementId = Uuid;

/// The closed set of element types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ElementKind {
    Text,
    Image,
    Audio,
    Drawing,
    Youtube,
    DeckEmbed,
    MultipleChoice,
    TrueFalse,
    FillInBlank,
    /// Any type this crate doesn't know about.
    #[serde(other)]
    Other,
}

impl ElementKind {
    /// Whether this kind is a quiz element (answerable in study mode).
    #[must_use]
    pub fn is_interactive(self) -> bool {
        matches!(self, Self::MultipleChoice | Self::TrueFalse | Self::FillInBlank)
    }
}

/// Type-specific content of an element, tagged by `type` on the wire.
///
/// The engine never reads these fields except `Text::font_size`, which the
/// content-priority layout uses to tell titles from body text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case", rename_all_fields = "camelCase")]
pub enum ElementPayload {
    Text {
        #[serde(default)]
        content: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        font_size: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        font_family: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        color: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        text_align: Option<String>,
    },
    Image {
        #[serde(default)]
        src: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        alt: Option<String>,
    },
    Audio {
        #[serde(default)]
        src: String,
    },
    Drawing {
        /// Stroke data as recorded by the drawing surface.
        #[serde(default)]
        strokes: serde_json::Value,
    },
    Youtube {
        #[serde(default)]
        video_id: String,
    },
    DeckEmbed {
        #[serde(default)]
        deck_id: String,
    },
    MultipleChoice {
        #[serde(default)]
        question: String,
        #[serde(default)]
        options: Vec<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        correct_index: Option<usize>,
    },
    TrueFalse {
        #[serde(default)]
        statement: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        answer: Option<bool>,
    },
    FillInBlank {
        #[serde(default)]
        prompt: String,
        #[serde(default)]
        answers: Vec<String>,
    },
    /// Unknown `type` tag. The element's fields, tag included, are kept in
    /// `CanvasElement::extra`.
    #[serde(other)]
    Other,
}

impl ElementPayload {
    #[must_use]
    pub fn kind(&self) -> ElementKind {
        match self {
            Self::Text { .. } => ElementKind::Text,
            Self::Image { .. } => ElementKind::Image,
            Self::Audio { .. } => ElementKind::Audio,
            Self::Drawing { .. } => ElementKind::Drawing,
            Self::Youtube { .. } => ElementKind::Youtube,
            Self::DeckEmbed { .. } => ElementKind::DeckEmbed,
            Self::MultipleChoice { .. } => ElementKind::MultipleChoice,
            Self::TrueFalse { .. } => ElementKind::TrueFalse,
            Self::FillInBlank { .. } => ElementKind::FillInBlank,
            Self::Other => ElementKind::Other,
        }
    }

    /// A text payload whose font size exceeds [`TITLE_FONT_SIZE`].
    #[must_use]
    pub fn is_title(&self) -> bool {
        matches!(self, Self::Text { font_size: Some(size), .. } if *size > TITLE_FONT_SIZE)
    }
}

/// A positioned element on one face of a card.
///
/// On the wire the payload fields sit next to the geometry fields, with
/// `type` as the discriminator.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(try_from = "RawElement")]
pub struct CanvasElement {
    /// Stable identifier for the element's lifetime.
    pub id: ElementId,
    /// Left edge in canvas-local units.
    pub x: f64,
    /// Top edge in canvas-local units.
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Degrees, applied around the element's center when rendering only.
    /// Hit-testing, drag and resize all ignore it.
    #[serde(default)]
    pub rotation: f64,
    /// Stacking order; ties are broken by list order.
    pub z_index: i64,
    pub payload: ElementPayload,
    /// Host fields the payload doesn't model, preserved verbatim.
    pub extra: Map<String, Value>,
}

/// Wire shape of [`CanvasElement`]: geometry plus every other field as-is.
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawElement {
    id: ElementId,
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    #[serde(default)]
    rotation: f64,
    #[serde(default)]
    z_index: i64,
    #[serde(flatten)]
    fields: Map<String, Value>,
}

/// The wire fields a typed payload writes. `Other` writes none.
fn payload_fields(payload: &ElementPayload) -> Result<Map<String, Value>, serde_json::Error> {
    if matches!(payload, ElementPayload::Other) {
        return Ok(Map::new());
    }
    match serde_json::to_value(payload)? {
        Value::Object(fields) => Ok(fields),
        other => Err(<serde_json::Error as serde::ser::Error>::custom(format!("payload is not an object: {other}"))),
    }
}

impl TryFrom<RawElement> for CanvasElement {
    type Error = serde_json::Error;

    fn try_from(raw: RawElement) -> Result<Self, Self::Error> {
        let payload: ElementPayload = serde_json::from_value(Value::Object(raw.fields.clone()))?;
        let modeled = payload_fields(&payload)?;
        let extra = raw.fields.into_iter().filter(|(key, _)| !modeled.contains_key(key)).collect();
        Ok(Self {
            id: raw.id,
            x: raw.x,
            y: raw.y,
            width: raw.width,
            height: raw.height,
            rotation: raw.rotation,
            z_index: raw.z_index,
            payload,
            extra,
        })
    }
}

impl Serialize for CanvasElement {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut fields = self.extra.clone();
        fields.extend(payload_fields(&self.payload).map_err(serde::ser::Error::custom)?);
        RawElement {
            id: self.id,
            x: self.x,
            y: self.y,
            width: self.width,
            height: self.height,
            rotation: self.rotation,
            z_index: self.z_index,
            fields,
        }
        .serialize(serializer)
    }
}

impl CanvasElement {
    /// Create an element with a fresh id and default stacking.
    #[must_use]
    pub fn new(payload: ElementPayload, geometry: Geometry) -> Self {
        Self {
            id: Uuid::new_v4(),
            x: geometry.x,
            y: geometry.y,
            width: geometry.width,
            height: geometry.height,
            rotation: 0.0,
            z_index: 0,
            payload,
            extra: Map::new(),
        }
    }

    #[must_use]
    pub fn kind(&self) -> ElementKind {
        self.payload.kind()
    }

    #[must_use]
    pub fn geometry(&self) -> Geometry {
        Geometry { x: self.x, y: self.y, width: self.width, height: self.height }
    }

    /// Apply a geometry update in place. Payload fields are never touched.
    pub fn apply_geometry(&mut self, update: &GeometryUpdate) {
        if let Some(x) = update.x {
            self.x = x;
        }
        if let Some(y) = update.y {
            self.y = y;
        }
        if let Some(w) = update.width {
            self.width = w;
        }
        if let Some(h) = update.height {
            self.height = h;
        }
        if let Some(z) = update.z_index {
            self.z_index = z;
        }
    }
}

/// Sparse geometry update for an element. Only present fields are applied.
///
/// Payload changes go through [`ElementList::apply_payload`] instead.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeometryUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub z_index: Option<i64>,
}

impl GeometryUpdate {
    /// An update carrying the full geometry and a new stacking order.
    #[must_use]
    pub fn with_z_index(geometry: Geometry, z_index: i64) -> Self {
        Self { z_index: Some(z_index), ..Self::from(geometry) }
    }
}

impl From<Geometry> for GeometryUpdate {
    fn from(g: Geometry) -> Self {
        Self { x: Some(g.x), y: Some(g.y), width: Some(g.width), height: Some(g.height), z_index: None }
    }
}

/// Ordered in-memory list of the elements on one card face.
///
/// List order is significant: it breaks z-index ties and drives the order
/// in which arrangement heuristics visit elements.
#[derive(Debug, Clone, Default)]
pub struct ElementList {
    elements: Vec<CanvasElement>,
}

impl ElementList {
    /// Create an empty list.
    #[must_use]
    pub fn new() -> Self {
        Self { elements: Vec::new() }
    }

    /// Insert an element, replacing in place when the id is already present
    /// and appending otherwise.
    pub fn insert(&mut self, el: CanvasElement) {
        match self.position(&el.id) {
            Some(i) => self.elements[i] = el,
            None => self.elements.push(el),
        }
    }

    /// Remove an element by id, returning it if it was present.
    pub fn remove(&mut self, id: &ElementId) -> Option<CanvasElement> {
        let i = self.position(id)?;
        Some(self.elements.remove(i))
    }

    #[must_use]
    pub fn get(&self, id: &ElementId) -> Option<&CanvasElement> {
        self.elements.iter().find(|e| e.id == *id)
    }

    #[must_use]
    pub fn contains(&self, id: &ElementId) -> bool {
        self.position(id).is_some()
    }

    /// Apply a geometry update. Returns false if the element doesn't exist.
    pub fn apply_geometry(&mut self, id: &ElementId, update: &GeometryUpdate) -> bool {
        let Some(el) = self.elements.iter_mut().find(|e| e.id == *id) else {
            return false;
        };
        el.apply_geometry(update);
        true
    }

    /// Replace an element's payload. Returns false if the element doesn't exist.
    pub fn apply_payload(&mut self, id: &ElementId, payload: ElementPayload) -> bool {
        let Some(el) = self.elements.iter_mut().find(|e| e.id == *id) else {
            return false;
        };
        el.payload = payload;
        true
    }

    /// Replace all elements with a full snapshot, keeping the given order.
    pub fn load_snapshot(&mut self, elements: Vec<CanvasElement>) {
        self.elements = elements;
    }

    /// Elements in list order.
    #[must_use]
    pub fn as_slice(&self) -> &[CanvasElement] {
        &self.elements
    }

    pub fn iter(&self) -> impl Iterator<Item = &CanvasElement> {
        self.elements.iter()
    }

    /// Elements sorted bottom-to-top for drawing: by `z_index`, ties kept in
    /// list order.
    #[must_use]
    pub fn sorted_elements(&self) -> Vec<&CanvasElement> {
        let mut els: Vec<&CanvasElement> = self.elements.iter().collect();
        els.sort_by_key(|e| e.z_index);
        els
    }

    /// Number of elements currently in the list.
    #[must_use]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Returns `true` if the list contains no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    fn position(&self, id: &ElementId) -> Option<usize> {
        self.elements.iter().position(|e| e.id == *id)
    }
}

/// Which face of a card an element list belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CardSide {
    #[default]
    Front,
    Back,
}

/// The two independent element lists of a card.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CardFaces {
    #[serde(default)]
    pub front: Vec<CanvasElement>,
    #[serde(default)]
    pub back: Vec<CanvasElement>,
}

impl CardFaces {
    #[must_use]
    pub fn side(&self, side: CardSide) -> &[CanvasElement] {
        match side {
            CardSide::Front => &self.front,
            CardSide::Back => &self.back,
        }
    }

    pub fn side_mut(&mut self, side: CardSide) -> &mut Vec<CanvasElement> {
        match side {
            CardSide::Front => &mut self.front,
            CardSide::Back => &mut self.back,
        }
    }
}
