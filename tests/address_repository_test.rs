//! Address repository integration tests

use clientele::db::{self, UnitOfWork};
use clientele::models::customer::CustomerType;
use clientele::models::AddressType;
use clientele::repositories::{
    AddressRepository, CreateAddressInput, CreateCustomerInput, CustomerRepository,
    UpdateAddressInput,
};
use sea_orm::DatabaseConnection;

async fn setup_test_db() -> DatabaseConnection {
    db::init_db("sqlite::memory:")
        .await
        .expect("Failed to init DB")
}

async fn create_test_customer(db: &DatabaseConnection, email: &str) -> i32 {
    let repo = CustomerRepository::new(db.clone());
    let uow = UnitOfWork::begin(db).await.expect("Failed to begin uow");
    let created = repo
        .create(
            &uow,
            CreateCustomerInput {
                first_name: "John".to_string(),
                last_name: "Doe".to_string(),
                email: email.to_string(),
                phone: None,
                customer_type: CustomerType::Individual,
                notes: None,
                primary_address: None,
            },
        )
        .await
        .expect("Failed to create customer");
    uow.commit().await.expect("Failed to commit");
    created.id
}

async fn create_test_address(
    db: &DatabaseConnection,
    customer_id: i32,
    street: &str,
    is_primary: bool,
) -> i32 {
    let repo = AddressRepository::new(db.clone());
    let uow = UnitOfWork::begin(db).await.expect("Failed to begin uow");
    let created = repo
        .create(
            &uow,
            CreateAddressInput {
                customer_id,
                address_type: AddressType::Home,
                street: street.to_string(),
                city: "Anytown".to_string(),
                state: "CA".to_string(),
                zip_code: "12345".to_string(),
                country: None,
                is_primary,
            },
        )
        .await
        .expect("Failed to create address");
    uow.commit().await.expect("Failed to commit");
    created.id
}

#[tokio::test]
async fn test_create_list_and_get() {
    let db = setup_test_db().await;
    let repo = AddressRepository::new(db.clone());
    let customer_id = create_test_customer(&db, "john@x.com").await;

    let first = create_test_address(&db, customer_id, "123 Main St", true).await;
    let second = create_test_address(&db, customer_id, "456 Business Ave", false).await;

    let addresses = repo.list_by_customer(customer_id).await.unwrap();
    assert_eq!(addresses.len(), 2);

    let found = repo.get_by_id(first).await.unwrap().unwrap();
    assert_eq!(found.street, "123 Main St");
    assert_eq!(found.country, "USA");
    assert!(found.is_primary);

    let found = repo.get_by_id(second).await.unwrap().unwrap();
    assert!(!found.is_primary);

    // Scoped to the owning customer
    let other = create_test_customer(&db, "jane@x.com").await;
    assert!(repo.list_by_customer(other).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_update_overwrites_but_keeps_owner() {
    let db = setup_test_db().await;
    let repo = AddressRepository::new(db.clone());
    let customer_id = create_test_customer(&db, "john@x.com").await;
    let address_id = create_test_address(&db, customer_id, "123 Main St", true).await;

    let uow = UnitOfWork::begin(&db).await.unwrap();
    let updated = repo
        .update(
            &uow,
            UpdateAddressInput {
                id: address_id,
                address_type: AddressType::Work,
                street: "789 Office Blvd".to_string(),
                city: "Commerce City".to_string(),
                state: "NY".to_string(),
                zip_code: "67890".to_string(),
                country: Some("USA".to_string()),
                is_primary: true,
            },
        )
        .await
        .unwrap();
    uow.commit().await.unwrap();

    assert_eq!(updated.street, "789 Office Blvd");
    assert_eq!(updated.address_type, "Work");
    assert_eq!(updated.customer_id, customer_id);
}

#[tokio::test]
async fn test_update_missing_address_is_not_found() {
    let db = setup_test_db().await;
    let repo = AddressRepository::new(db.clone());

    let uow = UnitOfWork::begin(&db).await.unwrap();
    let result = repo
        .update(
            &uow,
            UpdateAddressInput {
                id: 999,
                address_type: AddressType::Home,
                street: "123 Main St".to_string(),
                city: "Anytown".to_string(),
                state: "CA".to_string(),
                zip_code: "12345".to_string(),
                country: None,
                is_primary: false,
            },
        )
        .await;
    assert!(matches!(
        result,
        Err(clientele::domain::DomainError::NotFound)
    ));
    uow.rollback().await.unwrap();
}

#[tokio::test]
async fn test_delete_is_hard_and_not_found_on_missing() {
    let db = setup_test_db().await;
    let repo = AddressRepository::new(db.clone());
    let customer_id = create_test_customer(&db, "john@x.com").await;
    let address_id = create_test_address(&db, customer_id, "123 Main St", false).await;

    let uow = UnitOfWork::begin(&db).await.unwrap();
    repo.delete(&uow, address_id).await.unwrap();
    uow.commit().await.unwrap();

    assert!(repo.get_by_id(address_id).await.unwrap().is_none());

    let uow = UnitOfWork::begin(&db).await.unwrap();
    let result = repo.delete(&uow, address_id).await;
    assert!(matches!(
        result,
        Err(clientele::domain::DomainError::NotFound)
    ));
    uow.rollback().await.unwrap();
}

#[tokio::test]
async fn test_set_primary_keeps_exactly_one_primary() {
    let db = setup_test_db().await;
    let repo = AddressRepository::new(db.clone());
    let customer_id = create_test_customer(&db, "john@x.com").await;

    let first = create_test_address(&db, customer_id, "123 Main St", true).await;
    let second = create_test_address(&db, customer_id, "456 Business Ave", false).await;
    let third = create_test_address(&db, customer_id, "789 Office Blvd", false).await;

    for target in [second, third, first, first, second] {
        repo.set_primary(customer_id, target).await.unwrap();

        let addresses = repo.list_by_customer(customer_id).await.unwrap();
        let primaries: Vec<i32> = addresses
            .iter()
            .filter(|a| a.is_primary)
            .map(|a| a.id)
            .collect();
        assert_eq!(primaries, vec![target]);
    }
}

#[tokio::test]
async fn test_set_primary_rejects_foreign_or_missing_address() {
    let db = setup_test_db().await;
    let repo = AddressRepository::new(db.clone());
    let owner = create_test_customer(&db, "john@x.com").await;
    let other = create_test_customer(&db, "jane@x.com").await;

    let owned = create_test_address(&db, owner, "123 Main St", true).await;
    let foreign = create_test_address(&db, other, "456 Business Ave", true).await;

    // Address of another customer
    let result = repo.set_primary(owner, foreign).await;
    assert!(matches!(
        result,
        Err(clientele::domain::DomainError::NotFound)
    ));

    // Missing address id
    let result = repo.set_primary(owner, 999).await;
    assert!(matches!(
        result,
        Err(clientele::domain::DomainError::NotFound)
    ));

    // Flags untouched by the rejected calls
    let addresses = repo.list_by_customer(owner).await.unwrap();
    assert_eq!(addresses.len(), 1);
    assert_eq!(addresses[0].id, owned);
    assert!(addresses[0].is_primary);

    // Customer with zero addresses: nothing to promote
    let empty = create_test_customer(&db, "acme@x.com").await;
    let result = repo.set_primary(empty, owned).await;
    assert!(matches!(
        result,
        Err(clientele::domain::DomainError::NotFound)
    ));
}

#[tokio::test]
async fn test_create_for_missing_customer_is_conflict() {
    let db = setup_test_db().await;
    let repo = AddressRepository::new(db.clone());

    let uow = UnitOfWork::begin(&db).await.unwrap();
    let result = repo
        .create(
            &uow,
            CreateAddressInput {
                customer_id: 999,
                address_type: AddressType::Home,
                street: "123 Main St".to_string(),
                city: "Anytown".to_string(),
                state: "CA".to_string(),
                zip_code: "12345".to_string(),
                country: None,
                is_primary: false,
            },
        )
        .await;
    assert!(matches!(
        result,
        Err(clientele::domain::DomainError::Conflict(_))
    ));
    uow.rollback().await.unwrap();
}
