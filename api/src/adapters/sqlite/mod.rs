//! SQLite adapters
//!
//! Implementations of repository traits using SeaORM and SQLite.

pub mod member_repo;

pub use member_repo::SqliteMemberRepository;

use sea_orm::{ConnectionTrait, DatabaseConnection, Schema};

use crate::entity::members;
use crate::error::DomainError;

/// Create the members table if this is a fresh database.
pub async fn init_schema(db: &DatabaseConnection) -> Result<(), DomainError> {
    let backend = db.get_database_backend();
    let schema = Schema::new(backend);

    let mut stmt = schema.create_table_from_entity(members::Entity);
    stmt.if_not_exists();

    db.execute(backend.build(&stmt))
        .await
        .map_err(|e| DomainError::Database(e.to_string()))?;
    Ok(())
}
