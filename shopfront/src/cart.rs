//! Cart slice: lines keyed by product, with an always-consistent total.
//!
//! The cart is purely in-memory. It never touches storage and produces
//! no effects; it exists only within a session and is cleared when an
//! order is placed.

use shopfront_core::SmallVec;
use shopfront_core::effect::Effect;
use shopfront_core::reducer::Reducer;

use crate::types::{CartLine, Product};

/// The cart contents plus a derived total.
///
/// `total_price` is recomputed on every mutation rather than read lazily,
/// so any observer sees a total that matches the lines.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CartState {
    lines: Vec<CartLine>,
    total_price: f64,
}

impl CartState {
    /// The lines currently in the cart, insertion-ordered.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Sum of line subtotals.
    #[must_use]
    pub const fn total_price(&self) -> f64 {
        self.total_price
    }

    /// Total number of units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.lines.iter().map(|line| line.quantity).sum()
    }

    /// Whether the cart holds no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    fn recompute_total(&mut self) {
        self.total_price = self.lines.iter().map(CartLine::subtotal).sum();
    }
}

#[derive(Debug, Clone)]
pub enum CartAction {
    /// Add one unit of a product; an existing line has its quantity bumped.
    AddProduct(Product),
    /// Drop a line entirely, regardless of its quantity. Unknown ids are a no-op.
    RemoveProduct { product_id: u64 },
    /// Empty the cart.
    Clear,
}

/// The cart needs no collaborators.
#[derive(Debug, Clone, Copy, Default)]
pub struct CartEnvironment;

#[derive(Debug, Clone, Copy, Default)]
pub struct CartReducer;

impl CartReducer {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Reducer for CartReducer {
    type State = CartState;
    type Action = CartAction;
    type Environment = CartEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        _environment: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            CartAction::AddProduct(product) => {
                if let Some(line) = state
                    .lines
                    .iter_mut()
                    .find(|line| line.product_id == product.id)
                {
                    line.quantity += 1;
                } else {
                    state.lines.push(CartLine::from_product(&product));
                }
                state.recompute_total();
            }
            CartAction::RemoveProduct { product_id } => {
                state.lines.retain(|line| line.product_id != product_id);
                state.recompute_total();
            }
            CartAction::Clear => {
                state.lines.clear();
                state.total_price = 0.0;
            }
        }
        SmallVec::new()
    }
}
