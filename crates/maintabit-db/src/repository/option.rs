//! SurrealDB implementation of [`OptionRepository`].
//!
//! Options are stored flat: the variant tag goes into `option_type`, the
//! variant-specific fields into nullable columns. Decoding rebuilds the
//! [`OptionKind`] and rejects rows that break the per-variant rules.

use chrono::{DateTime, Utc};
use maintabit_core::error::MaintabitResult;
use maintabit_core::models::option::{DirectoryOption, OptionFilter, OptionKind, OptionType};
use maintabit_core::repository::OptionRepository;
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use uuid::Uuid;

use crate::error::DbError;

#[derive(Debug, SurrealValue)]
struct OptionRow {
    record_id: String,
    option_type: String,
    option_value: String,
    code: Option<String>,
    parent_category: Option<String>,
    is_active: bool,
    created_at: DateTime<Utc>,
}

impl OptionRow {
    fn try_into_option(self) -> Result<DirectoryOption, DbError> {
        let id = Uuid::parse_str(&self.record_id)
            .map_err(|e| DbError::Decode(format!("invalid UUID: {e}")))?;
        let option_type = self
            .option_type
            .parse::<OptionType>()
            .map_err(DbError::Decode)?;
        let value = self.option_value;
        let kind = match option_type {
            OptionType::Category => OptionKind::Category { value },
            OptionType::FacilityType => OptionKind::FacilityType { value },
            OptionType::Other => OptionKind::Other { value },
            OptionType::Department => OptionKind::Department {
                value,
                code: self.code,
            },
            OptionType::SubCategory => OptionKind::SubCategory {
                value,
                parent_category: self.parent_category.ok_or_else(|| {
                    DbError::Decode(format!("sub-category {id} has no parent category"))
                })?,
            },
        };
        Ok(DirectoryOption {
            id,
            kind,
            is_active: self.is_active,
            created_at: self.created_at,
        })
    }
}

#[derive(Debug, SurrealValue)]
struct CountRow {
    total: u64,
}

const SELECT_OPTION: &str = "SELECT meta::id(id) AS record_id, * FROM";

fn decode_all(rows: Vec<OptionRow>) -> Result<Vec<DirectoryOption>, DbError> {
    rows.into_iter().map(OptionRow::try_into_option).collect()
}

fn first_option(rows: Vec<OptionRow>, id: String) -> Result<DirectoryOption, DbError> {
    rows.into_iter()
        .next()
        .ok_or(DbError::NotFound {
            entity: "dynamic_option".into(),
            id,
        })?
        .try_into_option()
}

/// SurrealDB implementation of the option directory.
#[derive(Clone)]
pub struct SurrealOptionRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealOptionRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }
}

impl<C: Connection> OptionRepository for SurrealOptionRepository<C> {
    async fn create(&self, kind: OptionKind) -> MaintabitResult<DirectoryOption> {
        let id_str = Uuid::new_v4().to_string();

        let result = self
            .db
            .query(format!(
                "CREATE type::record('dynamic_option', $id) SET \
                 option_type = $option_type, option_value = $option_value, \
                 code = $code, parent_category = $parent_category, \
                 is_active = true; \
                 {SELECT_OPTION} type::record('dynamic_option', $id)"
            ))
            .bind(("id", id_str.clone()))
            .bind(("option_type", kind.option_type().as_str().to_string()))
            .bind(("option_value", kind.value().to_string()))
            .bind(("code", kind.code().map(str::to_owned)))
            .bind((
                "parent_category",
                kind.parent_category().map(str::to_owned),
            ))
            .await
            .map_err(DbError::from)?;

        let mut result = result
            .check()
            .map_err(|e| DbError::from_write(e, "dynamic_option"))?;

        let rows: Vec<OptionRow> = result.take(1).map_err(DbError::from)?;
        Ok(first_option(rows, id_str)?)
    }

    async fn get_by_id(&self, id: Uuid) -> MaintabitResult<DirectoryOption> {
        let id_str = id.to_string();

        let mut result = self
            .db
            .query(format!("{SELECT_OPTION} type::record('dynamic_option', $id)"))
            .bind(("id", id_str.clone()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<OptionRow> = result.take(0).map_err(DbError::from)?;
        Ok(first_option(rows, id_str)?)
    }

    async fn list(&self, filter: OptionFilter) -> MaintabitResult<Vec<DirectoryOption>> {
        let mut conditions = Vec::new();
        if filter.option_type.is_some() {
            conditions.push("option_type = $option_type");
        }
        let parent_category = match filter.option_type {
            Some(OptionType::SubCategory) => filter.parent_category,
            _ => None,
        };
        if parent_category.is_some() {
            conditions.push("parent_category = $parent_category");
        }

        let where_clause = if conditions.is_empty() {
            String::new()
        } else {
            format!(" WHERE {}", conditions.join(" AND "))
        };

        let query =
            format!("{SELECT_OPTION} dynamic_option{where_clause} ORDER BY created_at ASC");

        let mut builder = self.db.query(&query);
        if let Some(option_type) = filter.option_type {
            builder = builder.bind(("option_type", option_type.as_str().to_string()));
        }
        if let Some(parent_category) = parent_category {
            builder = builder.bind(("parent_category", parent_category));
        }

        let mut result = builder.await.map_err(DbError::from)?;
        let rows: Vec<OptionRow> = result.take(0).map_err(DbError::from)?;
        Ok(decode_all(rows)?)
    }

    async fn replace(
        &self,
        id: Uuid,
        kind: OptionKind,
        is_active: bool,
    ) -> MaintabitResult<DirectoryOption> {
        let id_str = id.to_string();

        let result = self
            .db
            .query(format!(
                "UPDATE type::record('dynamic_option', $id) SET \
                 option_type = $option_type, option_value = $option_value, \
                 code = $code, parent_category = $parent_category, \
                 is_active = $is_active; \
                 {SELECT_OPTION} type::record('dynamic_option', $id)"
            ))
            .bind(("id", id_str.clone()))
            .bind(("option_type", kind.option_type().as_str().to_string()))
            .bind(("option_value", kind.value().to_string()))
            .bind(("code", kind.code().map(str::to_owned)))
            .bind((
                "parent_category",
                kind.parent_category().map(str::to_owned),
            ))
            .bind(("is_active", is_active))
            .await
            .map_err(DbError::from)?;

        let mut result = result
            .check()
            .map_err(|e| DbError::from_write(e, "dynamic_option"))?;

        let rows: Vec<OptionRow> = result.take(1).map_err(DbError::from)?;
        Ok(first_option(rows, id_str)?)
    }

    async fn delete(&self, id: Uuid) -> MaintabitResult<()> {
        let id_str = id.to_string();

        let mut result = self
            .db
            .query("DELETE type::record('dynamic_option', $id) RETURN BEFORE")
            .bind(("id", id_str.clone()))
            .await
            .map_err(DbError::from)?;

        let deleted: Vec<surrealdb_types::Value> = result.take(0).map_err(DbError::from)?;
        if deleted.is_empty() {
            return Err(DbError::NotFound {
                entity: "dynamic_option".into(),
                id: id_str,
            }
            .into());
        }
        Ok(())
    }

    async fn find_department(&self, name: &str) -> MaintabitResult<Option<DirectoryOption>> {
        let mut result = self
            .db
            .query(format!(
                "{SELECT_OPTION} dynamic_option \
                 WHERE option_type = 'department' \
                 AND string::lowercase(option_value) = $name \
                 ORDER BY is_active DESC, code DESC"
            ))
            .bind(("name", name.trim().to_lowercase()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<OptionRow> = result.take(0).map_err(DbError::from)?;
        Ok(rows
            .into_iter()
            .next()
            .map(OptionRow::try_into_option)
            .transpose()?)
    }

    async fn count(&self) -> MaintabitResult<u64> {
        let mut result = self
            .db
            .query("SELECT count() AS total FROM dynamic_option GROUP ALL")
            .await
            .map_err(DbError::from)?;
        let rows: Vec<CountRow> = result.take(0).map_err(DbError::from)?;
        Ok(rows.first().map(|r| r.total).unwrap_or(0))
    }
}
