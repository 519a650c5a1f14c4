use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tempfile::TempDir;

use fieldservice_crm::db::{DbPool, establish_connection_pool};
use fieldservice_crm::repository::DieselRepository;

pub const OPERATIONAL_MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations/operational");
pub const BILLING_MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations/billing");

/// Per-test database pair living in a temporary directory, migrated on
/// creation and removed when dropped.
pub struct TestDb {
    _dir: TempDir,
    operational: DbPool,
    billing: DbPool,
}

impl TestDb {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create a temporary directory");

        let operational = Self::migrated_pool(
            dir.path().join("operational.db"),
            OPERATIONAL_MIGRATIONS,
        );
        let billing = Self::migrated_pool(dir.path().join("billing.db"), BILLING_MIGRATIONS);

        Self {
            _dir: dir,
            operational,
            billing,
        }
    }

    fn migrated_pool(path: std::path::PathBuf, migrations: EmbeddedMigrations) -> DbPool {
        let url = path.to_str().expect("Non UTF-8 temporary path").to_string();
        let pool = establish_connection_pool(&url).expect("Failed to build the pool");
        let mut conn = pool.get().expect("Failed to acquire a connection");
        conn.run_pending_migrations(migrations)
            .expect("Failed to run migrations");
        pool
    }

    #[allow(dead_code)]
    pub fn operational_pool(&self) -> &DbPool {
        &self.operational
    }

    #[allow(dead_code)]
    pub fn billing_pool(&self) -> &DbPool {
        &self.billing
    }

    pub fn repo(&self) -> DieselRepository {
        DieselRepository::new(self.operational.clone(), self.billing.clone())
    }
}
