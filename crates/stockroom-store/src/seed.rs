//! Sample records the development UI starts with.

use stockroom_core::{Product, Sale};

pub fn sample_products() -> Vec<Product> {
    vec![
        product(1, "Product 1", 1999, 100, "Electronics"),
        product(2, "Product 2", 2999, 50, "Clothing"),
        product(3, "Product 3", 3999, 75, "Food"),
    ]
}

pub fn sample_sales() -> Vec<Sale> {
    vec![
        sale(1, 1, 3, 5997, "2023-04-01", "John Doe"),
        sale(2, 2, 1, 2999, "2023-04-02", "Jane Smith"),
        sale(3, 3, 2, 7998, "2023-04-03", "Bob Johnson"),
    ]
}

fn product(id: u32, name: &str, price_cents: i64, stock: i64, category: &str) -> Product {
    Product {
        id,
        name: name.to_string(),
        price_cents,
        stock,
        category: category.to_string(),
    }
}

fn sale(id: u32, product_id: u32, quantity: i64, total_cents: i64, date: &str, customer: &str) -> Sale {
    Sale {
        id,
        product_id,
        quantity,
        total_cents,
        date: date.to_string(),
        customer: customer.to_string(),
    }
}
