use sea_orm::*;

use crate::models::{address, customer, customer_order, order};

/// Inserts demo customers, addresses, orders and their links.
/// No-op when the store already holds customers.
pub async fn seed_demo_data(db: &DatabaseConnection) -> Result<(), DbErr> {
    if customer::Entity::find().count(db).await? > 0 {
        return Ok(());
    }

    let now = chrono::Utc::now().to_rfc3339();

    // 1. Customers
    let customers = vec![
        customer::ActiveModel {
            first_name: Set("John".to_owned()),
            last_name: Set("Doe".to_owned()),
            email: Set("john.doe@email.com".to_owned()),
            phone: Set(Some("(555) 123-4567".to_owned())),
            customer_type: Set(Some("Individual".to_owned())),
            is_active: Set(true),
            created_at: Set(now.clone()),
            updated_at: Set(now.clone()),
            ..Default::default()
        },
        customer::ActiveModel {
            first_name: Set("Jane".to_owned()),
            last_name: Set("Smith".to_owned()),
            email: Set("jane.smith@email.com".to_owned()),
            phone: Set(Some("(555) 987-6543".to_owned())),
            customer_type: Set(Some("Premium".to_owned())),
            is_active: Set(true),
            created_at: Set(now.clone()),
            updated_at: Set(now.clone()),
            ..Default::default()
        },
        customer::ActiveModel {
            first_name: Set("Acme".to_owned()),
            last_name: Set("Corporation".to_owned()),
            email: Set("contact@acme.com".to_owned()),
            phone: Set(Some("(555) 555-0123".to_owned())),
            customer_type: Set(Some("Business".to_owned())),
            is_active: Set(true),
            created_at: Set(now.clone()),
            updated_at: Set(now.clone()),
            ..Default::default()
        },
    ];

    let mut customer_ids = Vec::new();
    for model in customers {
        customer_ids.push(model.insert(db).await?.id);
    }

    // 2. Addresses (one primary each for the first two customers)
    let addresses = vec![
        address::ActiveModel {
            customer_id: Set(customer_ids[0]),
            address_type: Set("Home".to_owned()),
            street: Set("123 Main St".to_owned()),
            city: Set("Anytown".to_owned()),
            state: Set("CA".to_owned()),
            zip_code: Set("12345".to_owned()),
            country: Set("USA".to_owned()),
            is_primary: Set(true),
            ..Default::default()
        },
        address::ActiveModel {
            customer_id: Set(customer_ids[1]),
            address_type: Set("Work".to_owned()),
            street: Set("456 Business Ave".to_owned()),
            city: Set("Commerce City".to_owned()),
            state: Set("NY".to_owned()),
            zip_code: Set("67890".to_owned()),
            country: Set("USA".to_owned()),
            is_primary: Set(true),
            ..Default::default()
        },
    ];

    for model in addresses {
        model.insert(db).await?;
    }

    // 3. Orders
    let first_order = order::ActiveModel {
        order_number: Set("ORD-001".to_owned()),
        order_date: Set(now.clone()),
        total_amount: Set(299.99),
        status: Set("Completed".to_owned()),
        description: Set(Some("First sample order".to_owned())),
        ..Default::default()
    }
    .insert(db)
    .await?;

    let second_order = order::ActiveModel {
        order_number: Set("ORD-002".to_owned()),
        order_date: Set(now.clone()),
        total_amount: Set(149.50),
        status: Set("Pending".to_owned()),
        description: Set(Some("Second sample order".to_owned())),
        ..Default::default()
    }
    .insert(db)
    .await?;

    // 4. Customer-order links with roles
    let links = vec![
        (customer_ids[0], first_order.id, "Primary"),
        (customer_ids[1], second_order.id, "Primary"),
        (customer_ids[0], second_order.id, "Secondary"),
    ];

    for (customer_id, order_id, role) in links {
        customer_order::ActiveModel {
            customer_id: Set(customer_id),
            order_id: Set(order_id),
            role: Set(role.to_owned()),
            ..Default::default()
        }
        .insert(db)
        .await?;
    }

    tracing::info!("seeded demo customers, addresses and orders");
    Ok(())
}
