//! Filter reference models: focuses, industries, regions.

use serde::Serialize;

use crate::errors::ShapeError;
use crate::models::shape::{member_ids, optional_str, required_enum, required_str};
use crate::models::Status;
use crate::store::Document;

/// Common fields of every filter document: a display name plus the ids of
/// the members carrying it. Membership ids are normalized best-effort at
/// construction; see [`member_ids`].
#[derive(Debug, Clone, Serialize)]
pub struct Filter {
    pub id: String,
    pub name: String,
    pub members: Vec<String>,
}

impl Filter {
    pub fn from_document(doc: &Document) -> Result<Self, ShapeError> {
        Ok(Self {
            id: doc.id.clone(),
            name: required_str(&doc.fields, "name")?,
            members: member_ids(&doc.fields, "members")?,
        })
    }
}

/// A focus area, e.g. an engineering discipline.
#[derive(Debug, Clone, Serialize)]
pub struct Focus {
    #[serde(flatten)]
    pub filter: Filter,
    pub status: Status,
}

impl Focus {
    pub fn from_document(doc: &Document) -> Result<Self, ShapeError> {
        Ok(Self {
            filter: Filter::from_document(doc)?,
            status: required_enum(&doc.fields, "status", Status::from_str, Status::ALLOWED)?,
        })
    }
}

/// An industry a member works in.
#[derive(Debug, Clone, Serialize)]
pub struct Industry {
    #[serde(flatten)]
    pub filter: Filter,
    pub status: Status,
}

impl Industry {
    pub fn from_document(doc: &Document) -> Result<Self, ShapeError> {
        Ok(Self {
            filter: Filter::from_document(doc)?,
            status: required_enum(&doc.fields, "status", Status::from_str, Status::ALLOWED)?,
        })
    }
}

/// A geographic region. Carries optional coordinates and, unlike the other
/// filter variants, no status field in its projection.
#[derive(Debug, Clone, Serialize)]
pub struct Region {
    #[serde(flatten)]
    pub filter: Filter,
    pub latitude: Option<String>,
    pub longitude: Option<String>,
}

impl Region {
    pub fn from_document(doc: &Document) -> Result<Self, ShapeError> {
        Ok(Self {
            filter: Filter::from_document(doc)?,
            latitude: optional_str(&doc.fields, "latitude")?,
            longitude: optional_str(&doc.fields, "longitude")?,
        })
    }
}
