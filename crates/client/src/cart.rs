//! In-memory shopping cart.
//!
//! Lines are keyed by product name and kept in the order they were first
//! added. The cart lives only as long as the page that owns it.

use rust_decimal::Decimal;

use frostbites_core::Price;

/// One cart line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartItem {
    pub name: String,
    pub price: Price,
    pub quantity: u32,
}

impl CartItem {
    /// Price of the whole line, rounded to cents.
    #[must_use]
    pub fn subtotal(&self) -> Price {
        Price::round_cents(self.price.times(self.quantity))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one unit of a product.
    ///
    /// A product already in the cart gets its quantity bumped and its price
    /// replaced with `price`.
    pub fn add(&mut self, name: &str, price: Price) {
        if let Some(item) = self.items.iter_mut().find(|i| i.name == name) {
            item.quantity += 1;
            item.price = price;
        } else {
            self.items.push(CartItem {
                name: name.to_string(),
                price,
                quantity: 1,
            });
        }
    }

    /// Take away one unit of a product, dropping the line at zero.
    ///
    /// Does nothing if the product is not in the cart.
    pub fn remove(&mut self, name: &str) {
        let Some(index) = self.items.iter().position(|i| i.name == name) else {
            return;
        };
        if let Some(item) = self.items.get_mut(index) {
            if item.quantity > 1 {
                item.quantity -= 1;
            } else {
                self.items.remove(index);
            }
        }
    }

    /// Units of a product in the cart (0 if absent).
    #[must_use]
    pub fn quantity_of(&self, name: &str) -> u32 {
        self.items
            .iter()
            .find(|i| i.name == name)
            .map_or(0, |i| i.quantity)
    }

    /// Sum of price times quantity over every line, rounded to cents once.
    #[must_use]
    pub fn total(&self) -> Price {
        let sum: Decimal = self
            .items
            .iter()
            .map(|i| i.price.times(i.quantity))
            .sum();
        Price::round_cents(sum)
    }

    /// Total with exactly two decimals, e.g. `12.50`.
    #[must_use]
    pub fn total_display(&self) -> String {
        self.total().to_fixed()
    }

    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Total number of units across all lines.
    #[must_use]
    pub fn unit_count(&self) -> u32 {
        self.items.iter().map(|i| i.quantity).sum()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}
