//! Administrator-managed option directory.

use maintabit_core::error::{MaintabitError, MaintabitResult};
use maintabit_core::models::option::{DirectoryOption, OptionFilter, OptionKind, UpdateOption};
use maintabit_core::repository::OptionRepository;
use tracing::info;
use uuid::Uuid;

pub struct OptionService<O: OptionRepository> {
    options: O,
}

impl<O: OptionRepository> OptionService<O> {
    pub fn new(options: O) -> Self {
        Self { options }
    }

    pub async fn create(&self, mut kind: OptionKind) -> MaintabitResult<DirectoryOption> {
        kind.normalize();
        kind.validate()?;
        self.ensure_unique_department(&kind, None).await?;
        let option = self.options.create(kind).await?;
        info!(
            option_id = %option.id,
            option_type = %option.kind.option_type(),
            "Option created"
        );
        Ok(option)
    }

    pub async fn list(&self, filter: OptionFilter) -> MaintabitResult<Vec<DirectoryOption>> {
        self.options.list(filter).await
    }

    /// Apply a partial update. The option keeps its variant.
    pub async fn update(&self, id: Uuid, patch: UpdateOption) -> MaintabitResult<DirectoryOption> {
        let current = self.options.get_by_id(id).await?;
        let mut kind = current.kind;
        kind.apply(&patch)?;
        let is_active = patch.is_active.unwrap_or(current.is_active);
        if is_active {
            self.ensure_unique_department(&kind, Some(id)).await?;
        }

        let option = self.options.replace(id, kind, is_active).await?;
        info!(option_id = %option.id, "Option updated");
        Ok(option)
    }

    /// A department name, compared case-insensitively, maps to at most one
    /// active entry. `own_id` is the entry being updated, if any.
    async fn ensure_unique_department(
        &self,
        kind: &OptionKind,
        own_id: Option<Uuid>,
    ) -> MaintabitResult<()> {
        if !matches!(kind, OptionKind::Department { .. }) {
            return Ok(());
        }
        match self.options.find_department(kind.value()).await? {
            Some(existing) if existing.is_active && Some(existing.id) != own_id => {
                Err(MaintabitError::AlreadyExists {
                    entity: "department".into(),
                })
            }
            _ => Ok(()),
        }
    }

    pub async fn delete(&self, id: Uuid) -> MaintabitResult<()> {
        self.options.delete(id).await?;
        info!(option_id = %id, "Option deleted");
        Ok(())
    }
}
