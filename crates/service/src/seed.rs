//! Demo data: one admin, two customers, three owners, three businesses
//! (one still pending) and nine products.

use sea_orm::{DatabaseConnection, DatabaseTransaction, EntityTrait, TransactionTrait};
use tracing::info;
use uuid::Uuid;

use models::business::{self, BusinessCategory, NewBusiness};
use models::product::{self, NewProduct, ProductCategory};
use models::user::{self, NewUser, Role};

use crate::auth::password::hash_password;
use crate::errors::ServiceError;

struct SeedUser {
    name: &'static str,
    email: &'static str,
    password: &'static str,
    role: Role,
    city: &'static str,
}

struct SeedBusiness {
    owner_email: &'static str,
    name: &'static str,
    category: BusinessCategory,
    address: &'static str,
    city: &'static str,
    phone: &'static str,
    description: &'static str,
    approved: bool,
    products: &'static [SeedProduct],
}

struct SeedProduct {
    name: &'static str,
    price: f64,
    category: ProductCategory,
    description: &'static str,
    availability: bool,
}

const USERS: &[SeedUser] = &[
    SeedUser { name: "Admin User", email: "admin@example.com", password: "admin123", role: Role::Admin, city: "New York" },
    SeedUser { name: "John Doe", email: "john@example.com", password: "customer123", role: Role::Customer, city: "New York" },
    SeedUser { name: "Jane Smith", email: "jane@example.com", password: "customer123", role: Role::Customer, city: "Los Angeles" },
    SeedUser { name: "Mike Johnson", email: "mike@example.com", password: "business123", role: Role::Business, city: "New York" },
    SeedUser { name: "Sarah Williams", email: "sarah@example.com", password: "business123", role: Role::Business, city: "Los Angeles" },
    SeedUser { name: "David Brown", email: "david@example.com", password: "business123", role: Role::Business, city: "Chicago" },
];

const BUSINESSES: &[SeedBusiness] = &[
    SeedBusiness {
        owner_email: "mike@example.com",
        name: "Mike's Pizza Palace",
        category: BusinessCategory::Restaurant,
        address: "123 Main Street",
        city: "New York",
        phone: "(555) 123-4567",
        description: "Best pizza in New York! Fresh ingredients and authentic Italian recipes.",
        approved: true,
        products: &[
            SeedProduct {
                name: "Margherita Pizza",
                price: 12.99,
                category: ProductCategory::FoodAndBeverages,
                description: "Classic margherita pizza with fresh mozzarella, basil, and tomato sauce.",
                availability: true,
            },
            SeedProduct {
                name: "Pepperoni Pizza",
                price: 14.99,
                category: ProductCategory::FoodAndBeverages,
                description: "Loaded with premium pepperoni and extra cheese.",
                availability: true,
            },
            SeedProduct {
                name: "Caesar Salad",
                price: 8.99,
                category: ProductCategory::FoodAndBeverages,
                description: "Fresh romaine lettuce with Caesar dressing and croutons.",
                availability: true,
            },
        ],
    },
    SeedBusiness {
        owner_email: "sarah@example.com",
        name: "Sarah's Fashion Boutique",
        category: BusinessCategory::Fashion,
        address: "456 Sunset Blvd",
        city: "Los Angeles",
        phone: "(555) 234-5678",
        description: "Trendy fashion for everyone. Latest styles and affordable prices.",
        approved: true,
        products: &[
            SeedProduct {
                name: "Summer Dress",
                price: 49.99,
                category: ProductCategory::Clothing,
                description: "Flowy summer dress perfect for warm weather. Available in multiple colors.",
                availability: true,
            },
            SeedProduct {
                name: "Designer Jeans",
                price: 89.99,
                category: ProductCategory::Clothing,
                description: "Premium quality denim jeans with a modern fit.",
                availability: true,
            },
            SeedProduct {
                name: "Leather Handbag",
                price: 129.99,
                category: ProductCategory::Clothing,
                description: "Genuine leather handbag with multiple compartments.",
                availability: true,
            },
        ],
    },
    SeedBusiness {
        owner_email: "david@example.com",
        name: "Tech Haven Electronics",
        category: BusinessCategory::Electronics,
        address: "789 Michigan Ave",
        city: "Chicago",
        phone: "(555) 345-6789",
        description: "Your one-stop shop for all electronics and gadgets.",
        approved: false,
        products: &[
            SeedProduct {
                name: "Wireless Headphones",
                price: 79.99,
                category: ProductCategory::Electronics,
                description: "Premium wireless headphones with noise cancellation and 30-hour battery life.",
                availability: true,
            },
            SeedProduct {
                name: "Smart Watch",
                price: 199.99,
                category: ProductCategory::Electronics,
                description: "Feature-packed smart watch with fitness tracking and notifications.",
                availability: true,
            },
            SeedProduct {
                name: "Bluetooth Speaker",
                price: 59.99,
                category: ProductCategory::Electronics,
                description: "Portable Bluetooth speaker with powerful sound and waterproof design.",
                availability: false,
            },
        ],
    },
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedSummary {
    pub users: usize,
    pub businesses: usize,
    pub products: usize,
}

/// Wipe every directory table and load the demo data in one transaction.
pub async fn run(db: &DatabaseConnection) -> Result<SeedSummary, ServiceError> {
    let txn = db.begin().await.map_err(ServiceError::db)?;
    clear(&txn).await?;
    info!("cleared existing data");

    let mut summary = SeedSummary::default();
    let mut owners: Vec<(&str, Uuid)> = Vec::new();
    for u in USERS {
        let password_hash = hash_password(u.password).map_err(ServiceError::db)?;
        let created = user::create(&txn, NewUser {
            name: u.name.into(),
            email: u.email.into(),
            password_hash,
            role: u.role,
            city: u.city.into(),
        })
        .await?;
        owners.push((u.email, created.id));
        summary.users += 1;
    }

    for b in BUSINESSES {
        let owner_id = owners
            .iter()
            .find(|(email, _)| *email == b.owner_email)
            .map(|(_, id)| *id)
            .ok_or_else(|| ServiceError::not_found("Seed owner"))?;
        let created = business::create(&txn, owner_id, NewBusiness {
            name: b.name.into(),
            category: b.category,
            address: b.address.into(),
            city: b.city.into(),
            phone: Some(b.phone.into()),
            description: Some(b.description.into()),
        }, b.approved)
        .await?;
        summary.businesses += 1;
        for p in b.products {
            product::create(&txn, created.id, NewProduct {
                name: p.name.into(),
                price: p.price,
                category: p.category,
                description: p.description.into(),
                availability: p.availability,
            })
            .await?;
            summary.products += 1;
        }
    }

    txn.commit().await.map_err(ServiceError::db)?;
    info!(users = summary.users, businesses = summary.businesses, products = summary.products, "seed_complete");
    Ok(summary)
}

async fn clear(txn: &DatabaseTransaction) -> Result<(), ServiceError> {
    product::Entity::delete_many().exec(txn).await.map_err(ServiceError::db)?;
    business::Entity::delete_many().exec(txn).await.map_err(ServiceError::db)?;
    user::Entity::delete_many().exec(txn).await.map_err(ServiceError::db)?;
    Ok(())
}

/// Accounts created by [`run`], for printing after seeding.
pub fn accounts() -> impl Iterator<Item = (&'static str, &'static str, Role)> {
    USERS.iter().map(|u| (u.email, u.password, u.role))
}
