//! Isolated test database utility that creates and cleans up temporary databases
//! Each test gets its own database that is dropped when the test completes
//!
//! This uses TEST_DATABASE_URL from the environment to connect to the test database server.
#![allow(dead_code)]

use diesel::r2d2::{self, ConnectionManager};
use diesel::sql_types::Text;
use diesel::{sql_query, Connection, PgConnection, RunQueryDsl};
use dsmovie_lib::modules::user::{User, UserRepository, UserRepositoryImpl};
use dsmovie_lib::shared::Database;
use dsmovie_lib::AppContext;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::thread;

static TEST_DB_COUNTER: AtomicU32 = AtomicU32::new(0);

/// Migrated throwaway database, dropped on `Drop`
///
/// # Example
/// ```rust
/// #[tokio::test]
/// async fn test_something() {
///     let test_db = TestDb::new();
///     let context = test_db.context();
///     // Test...
/// }
/// ```
pub struct TestDb {
    default_db_url: String,
    name: String,
    database: Arc<Database>,
}

impl TestDb {
    /// Creates a new isolated test database with a unique name and applies
    /// the embedded migrations
    ///
    /// Database name format: dsmovie_test_{process_id}_{counter}
    pub fn new() -> Self {
        dotenvy::dotenv().ok();

        let name = format!(
            "dsmovie_test_{}_{}",
            std::process::id(),
            TEST_DB_COUNTER.fetch_add(1, Ordering::SeqCst)
        );

        let test_db_url = std::env::var("TEST_DATABASE_URL")
            .expect("TEST_DATABASE_URL must be set in .env for database tests");

        let mut conn = PgConnection::establish(&test_db_url)
            .expect("Failed to connect to test database server");

        sql_query(format!("CREATE DATABASE {}", name))
            .execute(&mut conn)
            .unwrap_or_else(|e| panic!("Failed to create test database {}: {}", name, e));

        // Replace the database name in the URL (everything after the last '/')
        let isolated_db_url = match test_db_url.rfind('/') {
            Some(last_slash) => format!("{}/{}", &test_db_url[..last_slash], name),
            None => panic!("Invalid TEST_DATABASE_URL format: {}", test_db_url),
        };

        let manager = ConnectionManager::<PgConnection>::new(isolated_db_url);
        let pool = r2d2::Pool::builder()
            .max_size(10)
            .test_on_check_out(true)
            .build(manager)
            .expect("Failed to build test database connection pool");

        let database = Arc::new(Database::from_pool(pool));
        database
            .run_migrations()
            .expect("Unable to migrate the test database");

        Self {
            default_db_url: test_db_url,
            name,
            database,
        }
    }

    pub fn database(&self) -> Arc<Database> {
        Arc::clone(&self.database)
    }

    /// Services wired to the PostgreSQL repositories of this database
    pub fn context(&self) -> AppContext {
        AppContext::with_database(self.database())
    }

    /// Users are owned by the authentication layer, so tests seed them with SQL
    pub async fn add_user(&self, name: &str, email: &str) -> User {
        let mut conn = self
            .database
            .get_connection()
            .expect("Unable to connect to the test database");
        sql_query("INSERT INTO tb_user (name, email) VALUES ($1, $2)")
            .bind::<Text, _>(name)
            .bind::<Text, _>(email)
            .execute(&mut conn)
            .expect("Failed to insert user");
        drop(conn);

        UserRepositoryImpl::new(self.database())
            .find_by_email(email)
            .await
            .expect("Failed to read back user")
            .expect("Inserted user is missing")
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl Drop for TestDb {
    /// Terminates the remaining connections and drops the database.
    /// If the thread is panicking the database is kept for debugging.
    fn drop(&mut self) {
        if thread::panicking() {
            eprintln!(
                "TestDb keeping database '{}' after panic for debugging",
                self.name
            );
            return;
        }

        let mut conn = match PgConnection::establish(&self.default_db_url) {
            Ok(conn) => conn,
            Err(e) => {
                eprintln!("Failed to connect for cleanup of '{}': {}", self.name, e);
                return;
            }
        };

        if let Err(e) = sql_query(format!(
            "SELECT pg_terminate_backend(pid) FROM pg_stat_activity WHERE datname = '{}'",
            self.name
        ))
        .execute(&mut conn)
        {
            eprintln!("Failed to terminate connections for '{}': {}", self.name, e);
        }

        match sql_query(format!("DROP DATABASE IF EXISTS {}", self.name)).execute(&mut conn) {
            Ok(_) => log::debug!("Cleaned up test database: {}", self.name),
            Err(e) => eprintln!("Failed to drop test database '{}': {}", self.name, e),
        }
    }
}
