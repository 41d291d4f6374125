//! Shared test infrastructure: isolated databases, fake outbound clients and
//! a fully wired application per test.

/// Builds the actix test service for a [`TestApp`], guard and routes included
#[allow(unused_macros)]
macro_rules! init_test_service {
    ($test_app:expr) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .app_data($test_app.app_state().clone())
                .wrap(recap_server::middleware::SessionGate)
                .configure(recap_server::routes::configure_routes),
        )
        .await
    };
}

pub mod config;
pub mod database;

#[allow(unused_imports)]
pub use app::TestApp;
#[allow(unused_imports)]
pub use config::TestConfig;
#[allow(unused_imports)]
pub use database::TestDatabase;
#[allow(unused_imports)]
pub use fakes::{FakeEmailSender, FakeLlmClient};
#[allow(unused_imports)]
pub use fixtures::TestDataGenerator;

#[cfg(test)]
mod isolation_tests {
    use super::*;

    #[test]
    fn test_databases_are_isolated() {
        let db1 = TestDatabase::new().unwrap();
        let db2 = TestDatabase::new().unwrap();

        assert_ne!(db1.config.test_id, db2.config.test_id);
        assert_ne!(db1.path(), db2.path());

        let user = TestDataGenerator::create_user("iso@example.com", None);
        db1.db().create_user(&user).unwrap();

        assert!(db1.db().get_user_by_email("iso@example.com").is_ok());
        assert!(db2.db().get_user_by_email("iso@example.com").is_err());
    }
}
