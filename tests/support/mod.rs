//! Shared fixtures for the integration tests.
#![allow(dead_code)]

pub mod catalog_server;

use storefront_state::{Product, Rating};

pub fn product(id: u64, title: &str, price: f64) -> Product {
    Product {
        id,
        title: title.to_string(),
        price,
        description: format!("{} description", title),
        category: "clothing".to_string(),
        image: format!("https://fakestoreapi.com/img/{}.jpg", id),
        rating: Rating {
            rate: 4.0,
            count: 10,
        },
    }
}

/// Route `tracing` output to the test harness so warnings show on failure.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

/// "Red Shirt", "Blue Shirt", "Green Hat".
pub fn wardrobe() -> Vec<Product> {
    vec![
        product(1, "Red Shirt", 19.99),
        product(2, "Blue Shirt", 21.5),
        product(3, "Green Hat", 9.0),
    ]
}

/// `count` products titled "Item 1".."Item N" with price equal to the id.
pub fn numbered(count: u64) -> Vec<Product> {
    (1..=count)
        .map(|i| product(i, &format!("Item {}", i), i as f64))
        .collect()
}

/// Deterministic pseudo-random sequence for driving the cart.
pub struct Lcg(u64);

impl Lcg {
    pub fn new(seed: u64) -> Self {
        Self(seed)
    }

    pub fn next_below(&mut self, bound: u64) -> u64 {
        self.0 = self
            .0
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        (self.0 >> 33) % bound
    }
}
