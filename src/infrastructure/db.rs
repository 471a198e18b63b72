use sea_orm::{
    ConnectionTrait, Database, DatabaseConnection, DatabaseTransaction, DbErr, Statement,
    TransactionTrait,
};

use crate::domain::DomainError;

pub async fn init_db(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    let db = Database::connect(database_url).await?;

    run_migrations(&db).await?;

    tracing::info!("database initialised");
    Ok(db)
}

async fn run_migrations(db: &DatabaseConnection) -> Result<(), DbErr> {
    // customers.email carries the uniqueness constraint; the invariant
    // spans active and inactive rows alike.
    db.execute(Statement::from_string(
        db.get_database_backend(),
        r#"
        CREATE TABLE IF NOT EXISTS customers (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            first_name TEXT NOT NULL,
            last_name TEXT NOT NULL,
            email TEXT NOT NULL UNIQUE,
            phone TEXT,
            customer_type TEXT,
            notes TEXT,
            is_active BOOLEAN NOT NULL DEFAULT 1,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )
        "#
        .to_owned(),
    ))
    .await?;

    db.execute(Statement::from_string(
        db.get_database_backend(),
        r#"
        CREATE TABLE IF NOT EXISTS addresses (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            customer_id INTEGER NOT NULL REFERENCES customers(id) ON DELETE CASCADE,
            address_type TEXT NOT NULL,
            street TEXT NOT NULL,
            city TEXT NOT NULL,
            state TEXT NOT NULL,
            zip_code TEXT NOT NULL,
            country TEXT NOT NULL DEFAULT 'USA',
            is_primary BOOLEAN NOT NULL DEFAULT 0
        )
        "#
        .to_owned(),
    ))
    .await?;

    db.execute(Statement::from_string(
        db.get_database_backend(),
        r#"
        CREATE TABLE IF NOT EXISTS orders (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            order_number TEXT NOT NULL,
            order_date TEXT NOT NULL,
            total_amount REAL NOT NULL,
            status TEXT NOT NULL,
            description TEXT
        )
        "#
        .to_owned(),
    ))
    .await?;

    // Attributed many-to-many join; duplicate (customer_id, order_id)
    // pairs stay allowed, hence the surrogate key.
    db.execute(Statement::from_string(
        db.get_database_backend(),
        r#"
        CREATE TABLE IF NOT EXISTS customer_orders (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            customer_id INTEGER NOT NULL REFERENCES customers(id),
            order_id INTEGER NOT NULL REFERENCES orders(id) ON DELETE CASCADE,
            role TEXT NOT NULL
        )
        "#
        .to_owned(),
    ))
    .await?;

    Ok(())
}

/// A bounded set of staged writes committed atomically as one
/// transaction.
///
/// Repository write methods stage against the unit of work; nothing is
/// visible outside it until [`commit`](UnitOfWork::commit). Dropping an
/// uncommitted unit of work rolls everything back, so a partial
/// multi-row write never persists.
pub struct UnitOfWork {
    txn: DatabaseTransaction,
}

impl UnitOfWork {
    pub async fn begin(db: &DatabaseConnection) -> Result<Self, DomainError> {
        let txn = db.begin().await?;
        Ok(Self { txn })
    }

    /// Flushes all staged operations as a single atomic transaction.
    pub async fn commit(self) -> Result<(), DomainError> {
        self.txn.commit().await?;
        Ok(())
    }

    /// Discards all staged operations.
    pub async fn rollback(self) -> Result<(), DomainError> {
        self.txn.rollback().await?;
        Ok(())
    }

    pub(crate) fn conn(&self) -> &DatabaseTransaction {
        &self.txn
    }
}
