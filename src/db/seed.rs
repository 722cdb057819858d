use crate::domain::models::UserRole;
use crate::error::AppError;
use sqlx::SqlitePool;

struct SeedUser<'a> {
    name: &'a str,
    email: &'a str,
    role: UserRole,
}

/// Seeds one admin and one respondent reference user. Keyed by the unique
/// email column, so repeated startups never duplicate them.
pub async fn seed_users(pool: &SqlitePool) -> Result<(), AppError> {
    let users = [
        SeedUser {
            name: "Admin",
            email: "admin@email.com",
            role: UserRole::Admin,
        },
        SeedUser {
            name: "Juan Perez",
            email: "juan@email.com",
            role: UserRole::Respondent,
        },
    ];

    for user in users {
        sqlx::query("INSERT OR IGNORE INTO users (name, email, role) VALUES (?, ?, ?)")
            .bind(user.name)
            .bind(user.email)
            .bind(user.role)
            .execute(pool)
            .await?;
    }
    Ok(())
}
