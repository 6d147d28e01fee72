//! Job posting entity - Vacancies advertised to nurses on the public site.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Job posting database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "job_postings")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub title: String,
    /// Town or region of the practice (e.g., "Leeds")
    pub location: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    /// Free-form pay text such as "£18-£22/hr"
    pub pay_rate: Option<String>,
    /// "locum", "permanent", "temporary", ...
    pub employment_type: String,
    /// Inactive postings are hidden from the public listing but kept for admins
    pub is_active: bool,
    pub created_at: DateTimeUtc,
    pub updated_at: DateTimeUtc,
}

/// Job postings have no relationships with other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
