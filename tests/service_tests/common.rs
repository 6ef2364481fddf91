//! Shared fixtures for the service tests

use std::thread;
use std::time::Duration;

use bakery_store::driver::Driver;
use bakery_store::model::{BreadSchedule, CroissantSlot, NewOrder, Order, OrderItem};
use bakery_store::repository::{OrderRepository, SqlOrderRepository};
use bakery_store::{Context, OrderService, Result, Timeouts};
use chrono::Utc;

/// An order that passes every business rule
pub fn valid_order(customer: &str) -> NewOrder {
    NewOrder {
        customer_name: customer.to_string(),
        address: "1 Mill Lane".to_string(),
        phone: "555-0100".to_string(),
        items: vec![OrderItem::new("Baguette", 2)],
        bread_schedule: BreadSchedule {
            days: vec!["mon".to_string(), "thu".to_string()],
            frequency: "weekly".to_string(),
            start_date: "2024-05-06".to_string(),
            notes: String::new(),
        },
        croissant_schedule: vec![CroissantSlot::new("sat", 4, "butter")],
        comment: "leave at the back door".to_string(),
    }
}

/// Order service over a fresh in-memory driver
pub fn setup_order_service() -> (Driver, OrderService) {
    let driver = Driver::in_memory().unwrap();
    let repo = SqlOrderRepository::new(driver.connect());
    let service = OrderService::start(repo, Timeouts::default()).unwrap();
    (driver, service)
}

/// Repository that takes `delay` to save anything
pub struct SlowOrderRepository {
    pub delay: Duration,
    pub saved: Vec<Order>,
}

impl SlowOrderRepository {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            saved: Vec::new(),
        }
    }
}

impl OrderRepository for SlowOrderRepository {
    fn save(&mut self, _ctx: &Context, order: NewOrder) -> Result<Order> {
        thread::sleep(self.delay);
        let order = Order::from_new(order, self.saved.len() as i64 + 1, Utc::now());
        self.saved.push(order.clone());
        Ok(order)
    }

    fn list(&mut self, _ctx: &Context) -> Result<Vec<Order>> {
        Ok(self.saved.iter().rev().cloned().collect())
    }
}
