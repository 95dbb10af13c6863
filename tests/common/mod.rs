#![allow(dead_code)]

use testcontainers::{core::WaitFor, GenericImage, RunnableImage};

/// The PostgreSQL Docker image to use for testing
pub const POSTGRES_IMAGE: &str = "postgres";
pub const POSTGRES_TAG: &str = "16-alpine";

/// Default PostgreSQL port
pub const POSTGRES_PORT: u16 = 5432;

/// Default credentials for the container
pub const POSTGRES_USER: &str = "postgres";
pub const POSTGRES_PASSWORD: &str = "mindchat_password";
pub const POSTGRES_DB: &str = "postgres";

/// Create a runnable PostgreSQL container
pub fn create_postgres_container() -> RunnableImage<GenericImage> {
    let image = GenericImage::new(POSTGRES_IMAGE, POSTGRES_TAG)
        .with_env_var("POSTGRES_PASSWORD", POSTGRES_PASSWORD)
        .with_wait_for(WaitFor::message_on_stderr(
            "database system is ready to accept connections",
        ));

    RunnableImage::from(image).with_tag(POSTGRES_TAG)
}

/// Build a connection string for the running container
pub fn build_connection_string(host: &str, port: u16) -> String {
    format!(
        "postgresql://{}:{}@{}:{}/{}",
        POSTGRES_USER, POSTGRES_PASSWORD, host, port, POSTGRES_DB
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use mindchat::store::PostgresConfig;

    #[test]
    fn test_connection_string_parses() {
        let config =
            PostgresConfig::from_connection_string(&build_connection_string("127.0.0.1", 49153))
                .unwrap();
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 49153);
        assert_eq!(config.user, POSTGRES_USER);
        assert_eq!(config.password, POSTGRES_PASSWORD);
        assert_eq!(config.database, POSTGRES_DB);
    }
}
