use chrono::NaiveDate;

use super::*;
use crate::db::DbService;
use crate::db::repository::{dining_table, menu_item, venue};
use shared::models::{
    AllocationStatus, DiningTableCreate, MenuItemCreate, TableStatus, VenueCreate,
};

mod test_concurrency;
mod test_flows;

async fn test_service() -> (DbService, AllocationService) {
    let db = DbService::open_in_memory().await.unwrap();
    let service = AllocationService::new(db.clone());
    (db, service)
}

async fn seed_table(db: &DbService, number: i32, capacity: i32) -> i64 {
    dining_table::create(
        db.write(),
        DiningTableCreate {
            table_number: number,
            capacity,
            status: None,
            location: None,
            description: None,
        },
    )
    .await
    .unwrap()
    .id
}

async fn seed_venue(db: &DbService, name: &str, capacity: i32) -> i64 {
    venue::create(
        db.write(),
        VenueCreate {
            name: name.to_string(),
            capacity,
            price_per_hour: Some(120.0),
        },
    )
    .await
    .unwrap()
    .id
}

async fn seed_menu_item(db: &DbService, name: &str, price: f64) -> i64 {
    menu_item::create(
        db.write(),
        MenuItemCreate {
            name: name.to_string(),
            description: None,
            price,
            category: "MAINS".into(),
            is_available: None,
            preparation_minutes: None,
            image_url: None,
            ingredients: None,
        },
    )
    .await
    .unwrap()
    .id
}

fn date(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

fn item(menu_item_id: i64, quantity: i32) -> NewItem {
    NewItem {
        menu_item_id,
        quantity,
        special_requests: None,
    }
}

fn order_req(table_id: i64, items: Vec<NewItem>) -> CreateAllocation {
    CreateAllocation {
        target: AllocationTarget::Table { table_id },
        customer_name: Some("Walk-in".into()),
        party_size: Some(2),
        special_instructions: None,
        items,
    }
}

fn booking_req(venue_id: i64, date: NaiveDate, attendees: i32) -> CreateAllocation {
    CreateAllocation {
        target: AllocationTarget::Venue { venue_id, date },
        customer_name: Some("Acme Corp".into()),
        party_size: Some(attendees),
        special_instructions: None,
        items: Vec::new(),
    }
}

/// Walk an order from PENDING to a terminal COMPLETED through every stage
async fn complete_order(service: &AllocationService, id: i64) {
    for status in [
        AllocationStatus::Confirmed,
        AllocationStatus::Preparing,
        AllocationStatus::Ready,
        AllocationStatus::Completed,
    ] {
        service.change_status(id, status).await.unwrap();
    }
}
