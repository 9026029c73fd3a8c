use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::{format_for_form, format_medium};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "author")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    #[sea_orm(column_type = "String(StringLen::N(100))")]
    pub first_name: String,
    #[sea_orm(column_type = "String(StringLen::N(100))")]
    pub family_name: String,

    pub date_of_birth: Option<Date>,
    pub date_of_death: Option<Date>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::book::Entity")]
    Book,
}

impl Related<super::book::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Book.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// "Family, First", or empty when either part is missing.
    pub fn name(&self) -> String {
        if self.first_name.is_empty() || self.family_name.is_empty() {
            return String::new();
        }
        format!("{}, {}", self.family_name, self.first_name)
    }

    pub fn url(&self) -> String {
        format!("/catalog/author/{}", self.id)
    }

    pub fn date_of_birth_formatted(&self) -> String {
        format_medium(self.date_of_birth)
    }

    pub fn date_of_death_formatted(&self) -> String {
        format_medium(self.date_of_death)
    }

    pub fn date_of_birth_for_form(&self) -> String {
        format_for_form(self.date_of_birth)
    }

    pub fn date_of_death_for_form(&self) -> String {
        format_for_form(self.date_of_death)
    }

    /// `"<birth> - <death>"`, leaving either side blank when unknown.
    pub fn lifespan(&self) -> String {
        format!(
            "{} - {}",
            self.date_of_birth_formatted(),
            self.date_of_death_formatted()
        )
    }
}
