//! Entity and migration descriptors supplied by the persistence layer.

use common::models::{EntityDescriptor, MigrationDescriptor, ResourceFamily};

/// Externally owned descriptor lists, forwarded verbatim into option records.
#[derive(Debug, Clone, Default)]
pub struct DescriptorCatalog {
    entities: Vec<EntityDescriptor>,
    sqlite_migrations: Vec<MigrationDescriptor>,
    postgres_migrations: Vec<MigrationDescriptor>,
    mysql_migrations: Vec<MigrationDescriptor>,
}

impl DescriptorCatalog {
    /// Creates a catalog with the given entities and no migrations.
    pub fn new(entities: impl IntoIterator<Item = EntityDescriptor>) -> Self {
        Self {
            entities: entities.into_iter().collect(),
            ..Default::default()
        }
    }

    /// Sets the migration list of `family`, keeping the given order.
    pub fn with_migrations(
        mut self,
        family: ResourceFamily,
        migrations: impl IntoIterator<Item = MigrationDescriptor>,
    ) -> Self {
        *self.migrations_mut(family) = migrations.into_iter().collect();
        self
    }

    /// Entity descriptors in registration order.
    pub fn entities(&self) -> &[EntityDescriptor] {
        &self.entities
    }

    /// Migration descriptors of `family` in registration order.
    pub fn migrations_for(&self, family: ResourceFamily) -> &[MigrationDescriptor] {
        match family {
            ResourceFamily::Sqlite => &self.sqlite_migrations,
            ResourceFamily::Postgres => &self.postgres_migrations,
            ResourceFamily::MySql => &self.mysql_migrations,
        }
    }

    fn migrations_mut(&mut self, family: ResourceFamily) -> &mut Vec<MigrationDescriptor> {
        match family {
            ResourceFamily::Sqlite => &mut self.sqlite_migrations,
            ResourceFamily::Postgres => &mut self.postgres_migrations,
            ResourceFamily::MySql => &mut self.mysql_migrations,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_migrations_are_per_family() {
        let catalog = DescriptorCatalog::new([EntityDescriptor::new("User")])
            .with_migrations(
                ResourceFamily::MySql,
                [
                    MigrationDescriptor::new("InitialMigration1588157391238"),
                    MigrationDescriptor::new("WebhookModel1592447867632"),
                ],
            );
        assert_eq!(catalog.entities().len(), 1);
        assert!(catalog.migrations_for(ResourceFamily::Sqlite).is_empty());
        let mysql = catalog.migrations_for(ResourceFamily::MySql);
        assert_eq!(mysql[0].name, "InitialMigration1588157391238");
        assert_eq!(mysql[1].name, "WebhookModel1592447867632");
    }
}
