use secrecy::{ExposeSecret, Secret};
use sqlx::{PgPool, Row, postgres::PgRow};
use turnstile_core::{
    NewUser, RepositoryError, SocialProfile, User, UserRepository, UserUpdate,
};

/// Postgres-backed user repository.
///
/// Queries are checked at runtime rather than through the compile-time
/// macros so the crate builds without a database at hand.
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl UserRepository for PgUserRepository {
    #[tracing::instrument(name = "Finding user by email in PostgreSQL", skip_all)]
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepositoryError> {
        let row = sqlx::query(
            r#"
            SELECT id, name, email, password_hash, phone, address, image_url,
                   job_title, bio, is_email_verified, created_at, updated_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(unexpected)?;

        Ok(row.as_ref().map(map_user))
    }

    #[tracing::instrument(name = "Finding user by id in PostgreSQL", skip_all)]
    async fn find_by_id(&self, id: i64) -> Result<Option<User>, RepositoryError> {
        let row = sqlx::query(
            r#"
            SELECT id, name, email, password_hash, phone, address, image_url,
                   job_title, bio, is_email_verified, created_at, updated_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(unexpected)?;

        Ok(row.as_ref().map(map_user))
    }

    #[tracing::instrument(name = "Creating user in PostgreSQL", skip_all)]
    async fn create(&self, new_user: NewUser) -> Result<User, RepositoryError> {
        let row = insert_user(&self.pool, &new_user).await.map_err(unexpected)?;
        Ok(map_user(&row))
    }

    #[tracing::instrument(name = "Updating user in PostgreSQL", skip_all)]
    async fn update(&self, id: i64, changes: UserUpdate) -> Result<User, RepositoryError> {
        let row = sqlx::query(
            r#"
            UPDATE users SET
                name = COALESCE($2, name),
                phone = COALESCE($3, phone),
                address = COALESCE($4, address),
                image_url = COALESCE($5, image_url),
                job_title = COALESCE($6, job_title),
                bio = COALESCE($7, bio),
                is_email_verified = COALESCE($8, is_email_verified),
                updated_at = now()
            WHERE id = $1
            RETURNING id, name, email, password_hash, phone, address, image_url,
                      job_title, bio, is_email_verified, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(changes.name)
        .bind(changes.phone)
        .bind(changes.address)
        .bind(changes.image_url)
        .bind(changes.job_title)
        .bind(changes.bio)
        .bind(changes.is_email_verified)
        .fetch_optional(&self.pool)
        .await
        .map_err(unexpected)?;

        match row {
            Some(row) => Ok(map_user(&row)),
            None => Err(RepositoryError::NotFound),
        }
    }

    #[tracing::instrument(name = "Resolving social identity in PostgreSQL", skip_all)]
    async fn find_or_create_from_social(
        &self,
        profile: &SocialProfile,
    ) -> Result<User, RepositoryError> {
        let mut tx = self.pool.begin().await.map_err(unexpected)?;

        if let Some(user) =
            identity_owner(&mut *tx, &profile.provider, &profile.provider_user_id)
                .await
                .map_err(unexpected)?
        {
            tx.commit().await.map_err(unexpected)?;
            return Ok(user);
        }

        let linked = match profile.email.as_deref() {
            Some(email) => sqlx::query(
                r#"
                SELECT id, name, email, password_hash, phone, address, image_url,
                       job_title, bio, is_email_verified, created_at, updated_at
                FROM users
                WHERE email = $1
                "#,
            )
            .bind(email)
            .fetch_optional(&mut *tx)
            .await
            .map_err(unexpected)?
            .as_ref()
            .map(map_user),
            None => None,
        };

        let user = match linked {
            Some(user) => user,
            None => {
                let row = insert_user(&mut *tx, &NewUser::from_social(profile))
                    .await
                    .map_err(unexpected)?;
                map_user(&row)
            }
        };

        let inserted = sqlx::query(
            r#"
            INSERT INTO oauth_identities (provider, provider_user_id, user_id)
            VALUES ($1, $2, $3)
            "#,
        )
        .bind(&profile.provider)
        .bind(&profile.provider_user_id)
        .bind(user.id)
        .execute(&mut *tx)
        .await;

        match inserted {
            Ok(_) => {
                tx.commit().await.map_err(unexpected)?;
                Ok(user)
            }
            // Lost the race: a concurrent callback linked this identity
            // between our lookup and our insert. The identity now exists, so
            // re-read it instead of surfacing the constraint violation.
            Err(error) if is_unique_violation(&error) => {
                tx.rollback().await.ok();
                identity_owner(&self.pool, &profile.provider, &profile.provider_user_id)
                    .await
                    .map_err(unexpected)?
                    .ok_or_else(|| {
                        RepositoryError::Unexpected(
                            "identity vanished after duplicate-insert conflict".to_string(),
                        )
                    })
            }
            Err(error) => Err(unexpected(error)),
        }
    }
}

async fn identity_owner<'e>(
    executor: impl sqlx::Executor<'e, Database = sqlx::Postgres>,
    provider: &str,
    provider_user_id: &str,
) -> Result<Option<User>, sqlx::Error> {
    let row = sqlx::query(
        r#"
        SELECT u.id, u.name, u.email, u.password_hash, u.phone, u.address,
               u.image_url, u.job_title, u.bio, u.is_email_verified,
               u.created_at, u.updated_at
        FROM oauth_identities i
        JOIN users u ON u.id = i.user_id
        WHERE i.provider = $1 AND i.provider_user_id = $2
        "#,
    )
    .bind(provider)
    .bind(provider_user_id)
    .fetch_optional(executor)
    .await?;

    Ok(row.as_ref().map(map_user))
}

async fn insert_user<'e>(
    executor: impl sqlx::Executor<'e, Database = sqlx::Postgres>,
    new_user: &NewUser,
) -> Result<PgRow, sqlx::Error> {
    sqlx::query(
        r#"
        INSERT INTO users (name, email, password_hash, phone, address, image_url, is_email_verified)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING id, name, email, password_hash, phone, address, image_url,
                  job_title, bio, is_email_verified, created_at, updated_at
        "#,
    )
    .bind(&new_user.name)
    .bind(&new_user.email)
    .bind(
        new_user
            .password_hash
            .as_ref()
            .map(|hash| hash.expose_secret().clone()),
    )
    .bind(&new_user.phone)
    .bind(&new_user.address)
    .bind(&new_user.image_url)
    .bind(new_user.is_email_verified)
    .fetch_one(executor)
    .await
}

fn map_user(row: &PgRow) -> User {
    User {
        id: row.get("id"),
        name: row.get("name"),
        email: row.get("email"),
        password_hash: row
            .get::<Option<String>, _>("password_hash")
            .map(Secret::from),
        phone: row.get("phone"),
        address: row.get("address"),
        image_url: row.get("image_url"),
        job_title: row.get("job_title"),
        bio: row.get("bio"),
        is_email_verified: row.get("is_email_verified"),
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

fn unexpected(error: sqlx::Error) -> RepositoryError {
    RepositoryError::Unexpected(error.to_string())
}

fn is_unique_violation(error: &sqlx::Error) -> bool {
    error
        .as_database_error()
        .is_some_and(|db_error| db_error.is_unique_violation())
}
