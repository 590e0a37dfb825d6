//! Public member projection.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::errors::ShapeError;
use crate::models::shape::{
    optional_bool, optional_datetime, optional_enum, optional_ref, optional_str, ref_list,
    required_str,
};
use crate::models::{CompanySize, DocRef, Status, YearsOfExperience};
use crate::store::Document;

/// The public projection of a member document.
///
/// Exactly these fields are exposed; anything else on the raw document
/// (in particular secure member data) never leaves the shaping step.
/// Optional fields serialize as `null` when unset.
#[derive(Debug, Clone, Serialize)]
pub struct MemberPublic {
    pub id: String,
    pub name: String,
    pub masked_email: String,
    pub link: String,
    pub location: String,
    pub title: String,
    pub company_size: Option<CompanySize>,
    pub years_experience: Option<YearsOfExperience>,
    pub focuses: Vec<DocRef>,
    pub industries: Vec<DocRef>,
    pub regions: Vec<DocRef>,
    pub status: Option<Status>,
    pub last_modified: Option<DateTime<Utc>>,
    pub last_modified_by: Option<DocRef>,
    pub requests: Option<String>,
    pub unsubscribed: Option<bool>,
}

impl MemberPublic {
    /// Shape a raw member document, failing on the first invalid field.
    pub fn from_document(doc: &Document) -> Result<Self, ShapeError> {
        let fields = &doc.fields;
        Ok(Self {
            id: doc.id.clone(),
            name: required_str(fields, "name")?,
            masked_email: required_str(fields, "masked_email")?,
            link: required_str(fields, "link")?,
            location: required_str(fields, "location")?,
            title: required_str(fields, "title")?,
            company_size: optional_enum(
                fields,
                "company_size",
                CompanySize::from_str,
                CompanySize::ALLOWED,
            )?,
            years_experience: optional_enum(
                fields,
                "years_experience",
                YearsOfExperience::from_str,
                YearsOfExperience::ALLOWED,
            )?,
            focuses: ref_list(fields, "focuses")?,
            industries: ref_list(fields, "industries")?,
            regions: ref_list(fields, "regions")?,
            status: optional_enum(fields, "status", Status::from_str, Status::ALLOWED)?,
            last_modified: optional_datetime(fields, "last_modified")?,
            last_modified_by: optional_ref(fields, "last_modified_by")?,
            requests: optional_str(fields, "requests")?,
            unsubscribed: optional_bool(fields, "unsubscribed")?,
        })
    }
}
