use common::Money;

use crate::ValidationError;

use super::Product;
use super::aggregate::check_price;

/// Operations spanning several products.
pub struct ProductService;

impl ProductService {
    /// Raises every product's price by `percent` percent.
    ///
    /// All new prices are validated before any product changes, so a
    /// rejected call leaves every price as it was.
    pub fn increase_price(products: &mut [Product], percent: i64) -> Result<(), ValidationError> {
        let new_prices = products
            .iter()
            .map(|product| -> Result<Money, ValidationError> {
                let price = product
                    .price()
                    .checked_percentage(percent)
                    .and_then(|increase| product.price().checked_add(increase))
                    .ok_or(ValidationError::AmountOverflow { entity: "Product" })?;
                check_price(price).map(|()| price)
            })
            .collect::<Result<Vec<_>, _>>()?;

        for (product, price) in products.iter_mut().zip(new_prices) {
            product.change_price(price)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_increase_price_of_all_products() {
        let mut products = vec![
            Product::new("p1", "Product 1", Money::from_cents(1000)).unwrap(),
            Product::new("p2", "Product 2", Money::from_cents(2000)).unwrap(),
        ];

        ProductService::increase_price(&mut products, 100).unwrap();

        assert_eq!(products[0].price(), Money::from_cents(2000));
        assert_eq!(products[1].price(), Money::from_cents(4000));
    }

    #[test]
    fn test_decrease_below_zero_changes_nothing() {
        let mut products = vec![
            Product::new("p1", "Product 1", Money::from_cents(1000)).unwrap(),
            Product::new("p2", "Product 2", Money::from_cents(2000)).unwrap(),
        ];

        let result = ProductService::increase_price(&mut products, -150);

        assert!(matches!(result, Err(ValidationError::NegativePrice { .. })));
        assert_eq!(products[0].price(), Money::from_cents(1000));
        assert_eq!(products[1].price(), Money::from_cents(2000));
    }

    #[test]
    fn test_increase_past_representable_price_changes_nothing() {
        let mut products = vec![
            Product::new("p1", "Product 1", Money::from_cents(1000)).unwrap(),
            Product::new("p2", "Product 2", Money::from_cents(i64::MAX / 2 + 1)).unwrap(),
        ];

        let result = ProductService::increase_price(&mut products, 100);

        assert_eq!(
            result,
            Err(ValidationError::AmountOverflow { entity: "Product" })
        );
        assert_eq!(products[0].price(), Money::from_cents(1000));
        assert_eq!(products[1].price(), Money::from_cents(i64::MAX / 2 + 1));
    }
}
