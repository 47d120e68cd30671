//! PostgreSQL implementation of the `MotorStore` port
//!
//! Queries are bound at runtime and mapped from row structs onto domain
//! types. The expired-policy query computes the set-difference against the
//! processed-expiration ledger in SQL, and ledger rows are appended inside
//! a single transaction so a scan's batch lands atomically.

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::PgPool;

use core_kernel::ports::DomainPort;
use core_kernel::{CarId, ClaimId, OwnerId, PolicyId, StoreError};
use domain_motor::expiration::NewProcessedExpiration;
use domain_motor::ports::{CarWithOwner, ExpiredPolicy, MotorStore};
use domain_motor::{Car, Claim, InsurancePolicy, NewCar, NewClaim, NewPolicy, Owner};

use crate::error::to_store_error;

/// SQLx-backed `MotorStore`
///
/// Cheap to clone; every operation checks a connection out of the pool for
/// its own duration, so no handle outlives a single call.
#[derive(Debug, Clone)]
pub struct PgMotorStore {
    pool: PgPool,
}

impl PgMotorStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn exists(&self, sql: &str, id: i64) -> Result<bool, StoreError> {
        sqlx::query_scalar::<_, bool>(sql)
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(to_store_error)
    }
}

impl DomainPort for PgMotorStore {}

#[async_trait]
impl MotorStore for PgMotorStore {
    async fn owner_exists(&self, id: OwnerId) -> Result<bool, StoreError> {
        self.exists("SELECT EXISTS (SELECT 1 FROM owners WHERE id = $1)", id.get())
            .await
    }

    async fn car_exists(&self, id: CarId) -> Result<bool, StoreError> {
        self.exists("SELECT EXISTS (SELECT 1 FROM cars WHERE id = $1)", id.get())
            .await
    }

    async fn policy_exists(&self, id: PolicyId) -> Result<bool, StoreError> {
        self.exists("SELECT EXISTS (SELECT 1 FROM policies WHERE id = $1)", id.get())
            .await
    }

    async fn vin_exists(&self, vin: &str) -> Result<bool, StoreError> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM cars WHERE vin = $1)")
            .bind(vin)
            .fetch_one(&self.pool)
            .await
            .map_err(to_store_error)
    }

    async fn find_owner(&self, id: OwnerId) -> Result<Option<Owner>, StoreError> {
        let row = sqlx::query_as::<_, OwnerRow>("SELECT id, name, email FROM owners WHERE id = $1")
            .bind(id.get())
            .fetch_optional(&self.pool)
            .await
            .map_err(to_store_error)?;

        Ok(row.map(Owner::from))
    }

    async fn list_cars(&self) -> Result<Vec<CarWithOwner>, StoreError> {
        let rows = sqlx::query_as::<_, CarOwnerRow>(
            r#"
            SELECT
                c.id,
                c.vin,
                c.make,
                c.model,
                c.year_of_manufacture,
                c.owner_id,
                o.name AS owner_name,
                o.email AS owner_email
            FROM cars c
            JOIN owners o ON o.id = c.owner_id
            ORDER BY c.id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(to_store_error)?;

        Ok(rows.into_iter().map(CarWithOwner::from).collect())
    }

    async fn insert_car(&self, car: NewCar) -> Result<Car, StoreError> {
        let row = sqlx::query_as::<_, CarRow>(
            r#"
            INSERT INTO cars (vin, make, model, year_of_manufacture, owner_id)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, vin, make, model, year_of_manufacture, owner_id
            "#,
        )
        .bind(&car.vin)
        .bind(&car.make)
        .bind(&car.model)
        .bind(car.year_of_manufacture)
        .bind(car.owner_id.get())
        .fetch_one(&self.pool)
        .await
        .map_err(to_store_error)?;

        Ok(row.into())
    }

    async fn list_policies(&self, car_id: CarId) -> Result<Vec<InsurancePolicy>, StoreError> {
        let rows = sqlx::query_as::<_, PolicyRow>(
            r#"
            SELECT id, car_id, provider, start_date, end_date
            FROM policies
            WHERE car_id = $1
            ORDER BY id
            "#,
        )
        .bind(car_id.get())
        .fetch_all(&self.pool)
        .await
        .map_err(to_store_error)?;

        Ok(rows.into_iter().map(InsurancePolicy::from).collect())
    }

    async fn insert_policy(&self, policy: NewPolicy) -> Result<InsurancePolicy, StoreError> {
        let row = sqlx::query_as::<_, PolicyRow>(
            r#"
            INSERT INTO policies (car_id, provider, start_date, end_date)
            VALUES ($1, $2, $3, $4)
            RETURNING id, car_id, provider, start_date, end_date
            "#,
        )
        .bind(policy.car_id.get())
        .bind(&policy.provider)
        .bind(policy.start_date)
        .bind(policy.end_date)
        .fetch_one(&self.pool)
        .await
        .map_err(to_store_error)?;

        Ok(row.into())
    }

    async fn list_claims(&self, car_id: CarId) -> Result<Vec<Claim>, StoreError> {
        let rows = sqlx::query_as::<_, ClaimRow>(
            r#"
            SELECT id, car_id, claim_date, description, amount
            FROM claims
            WHERE car_id = $1
            ORDER BY id
            "#,
        )
        .bind(car_id.get())
        .fetch_all(&self.pool)
        .await
        .map_err(to_store_error)?;

        Ok(rows.into_iter().map(Claim::from).collect())
    }

    async fn insert_claim(&self, claim: NewClaim) -> Result<Claim, StoreError> {
        let row = sqlx::query_as::<_, ClaimRow>(
            r#"
            INSERT INTO claims (car_id, claim_date, description, amount)
            VALUES ($1, $2, $3, $4)
            RETURNING id, car_id, claim_date, description, amount
            "#,
        )
        .bind(claim.car_id.get())
        .bind(claim.claim_date)
        .bind(&claim.description)
        .bind(claim.amount)
        .fetch_one(&self.pool)
        .await
        .map_err(to_store_error)?;

        Ok(row.into())
    }

    async fn list_policies_expired_before(
        &self,
        date: NaiveDate,
    ) -> Result<Vec<ExpiredPolicy>, StoreError> {
        let rows = sqlx::query_as::<_, ExpiredPolicyRow>(
            r#"
            SELECT
                p.id,
                p.car_id,
                c.vin,
                o.name AS owner_name,
                p.provider,
                p.end_date
            FROM policies p
            JOIN cars c ON c.id = p.car_id
            JOIN owners o ON o.id = c.owner_id
            WHERE p.end_date < $1
              AND NOT EXISTS (
                  SELECT 1 FROM processed_expirations pe WHERE pe.policy_id = p.id
              )
            ORDER BY p.id
            "#,
        )
        .bind(date)
        .fetch_all(&self.pool)
        .await
        .map_err(to_store_error)?;

        Ok(rows.into_iter().map(ExpiredPolicy::from).collect())
    }

    async fn insert_processed_expirations(
        &self,
        entries: &[NewProcessedExpiration],
    ) -> Result<(), StoreError> {
        let mut tx = self.pool.begin().await.map_err(to_store_error)?;

        for entry in entries {
            sqlx::query(
                r#"
                INSERT INTO processed_expirations (policy_id, expiration_date, processed_at)
                VALUES ($1, $2, $3)
                "#,
            )
            .bind(entry.policy_id.get())
            .bind(entry.expiration_date)
            .bind(entry.processed_at)
            .execute(&mut *tx)
            .await
            .map_err(to_store_error)?;
        }

        tx.commit().await.map_err(to_store_error)
    }
}

#[derive(sqlx::FromRow)]
struct OwnerRow {
    id: i64,
    name: String,
    email: Option<String>,
}

impl From<OwnerRow> for Owner {
    fn from(row: OwnerRow) -> Self {
        Owner {
            id: OwnerId::new(row.id),
            name: row.name,
            email: row.email,
        }
    }
}

#[derive(sqlx::FromRow)]
struct CarRow {
    id: i64,
    vin: String,
    make: Option<String>,
    model: Option<String>,
    year_of_manufacture: i32,
    owner_id: i64,
}

impl From<CarRow> for Car {
    fn from(row: CarRow) -> Self {
        Car {
            id: CarId::new(row.id),
            vin: row.vin,
            make: row.make,
            model: row.model,
            year_of_manufacture: row.year_of_manufacture,
            owner_id: OwnerId::new(row.owner_id),
        }
    }
}

#[derive(sqlx::FromRow)]
struct CarOwnerRow {
    id: i64,
    vin: String,
    make: Option<String>,
    model: Option<String>,
    year_of_manufacture: i32,
    owner_id: i64,
    owner_name: String,
    owner_email: Option<String>,
}

impl From<CarOwnerRow> for CarWithOwner {
    fn from(row: CarOwnerRow) -> Self {
        CarWithOwner {
            car: Car {
                id: CarId::new(row.id),
                vin: row.vin,
                make: row.make,
                model: row.model,
                year_of_manufacture: row.year_of_manufacture,
                owner_id: OwnerId::new(row.owner_id),
            },
            owner: Owner {
                id: OwnerId::new(row.owner_id),
                name: row.owner_name,
                email: row.owner_email,
            },
        }
    }
}

#[derive(sqlx::FromRow)]
struct PolicyRow {
    id: i64,
    car_id: i64,
    provider: Option<String>,
    start_date: NaiveDate,
    end_date: NaiveDate,
}

impl From<PolicyRow> for InsurancePolicy {
    fn from(row: PolicyRow) -> Self {
        InsurancePolicy {
            id: PolicyId::new(row.id),
            car_id: CarId::new(row.car_id),
            provider: row.provider,
            start_date: row.start_date,
            end_date: row.end_date,
        }
    }
}

#[derive(sqlx::FromRow)]
struct ClaimRow {
    id: i64,
    car_id: i64,
    claim_date: NaiveDate,
    description: String,
    amount: Decimal,
}

impl From<ClaimRow> for Claim {
    fn from(row: ClaimRow) -> Self {
        Claim {
            id: ClaimId::new(row.id),
            car_id: CarId::new(row.car_id),
            claim_date: row.claim_date,
            description: row.description,
            amount: row.amount,
        }
    }
}

#[derive(sqlx::FromRow)]
struct ExpiredPolicyRow {
    id: i64,
    car_id: i64,
    vin: String,
    owner_name: String,
    provider: Option<String>,
    end_date: NaiveDate,
}

impl From<ExpiredPolicyRow> for ExpiredPolicy {
    fn from(row: ExpiredPolicyRow) -> Self {
        ExpiredPolicy {
            policy_id: PolicyId::new(row.id),
            car_id: CarId::new(row.car_id),
            vin: row.vin,
            owner_name: row.owner_name,
            provider: row.provider,
            end_date: row.end_date,
        }
    }
}
