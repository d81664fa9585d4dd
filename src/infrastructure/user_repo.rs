use diesel::prelude::*;
use uuid::Uuid;

use crate::db::DbPool;
use crate::domain::errors::DomainError;
use crate::domain::ports::UserRepository;
use crate::domain::user::{NewUser, User};
use crate::schema::users;

use super::models::{NewUserRow, UserRow};

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            id: row.id,
            privy_id: row.privy_id,
            wallet_address: row.wallet_address,
            email: row.email,
            created_at: row.created_at,
        }
    }
}

pub struct DieselUserRepository {
    pool: DbPool,
}

impl DieselUserRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl UserRepository for DieselUserRepository {
    fn find_by_privy_id(&self, privy_id: &str) -> Result<Option<User>, DomainError> {
        let mut conn = self.pool.get()?;

        let user = users::table
            .filter(users::privy_id.eq(privy_id))
            .select(UserRow::as_select())
            .first(&mut conn)
            .optional()?;

        Ok(user.map(User::from))
    }

    fn create(&self, user: NewUser) -> Result<Option<User>, DomainError> {
        let mut conn = self.pool.get()?;

        let row = diesel::insert_into(users::table)
            .values(&NewUserRow {
                id: Uuid::new_v4(),
                privy_id: &user.privy_id,
                wallet_address: user.wallet_address.as_deref(),
            })
            .on_conflict(users::privy_id)
            .do_nothing()
            .returning(UserRow::as_returning())
            .get_result(&mut conn)
            .optional()?;

        Ok(row.map(User::from))
    }

    fn update_email(&self, privy_id: &str, email: &str) -> Result<bool, DomainError> {
        let mut conn = self.pool.get()?;

        let updated = diesel::update(users::table.filter(users::privy_id.eq(privy_id)))
            .set(users::email.eq(email))
            .execute(&mut conn)?;

        Ok(updated > 0)
    }

    fn count(&self) -> Result<i64, DomainError> {
        let mut conn = self.pool.get()?;
        Ok(users::table.count().get_result(&mut conn)?)
    }
}
