//! Typed interpretation of raw chat text.
//!
//! Raw messages are parsed exactly once into one of these values before the
//! state machine looks at them.

use std::num::NonZeroU32;

use ordering::{Catalog, ItemCode, MenuItem};

/// A main-menu command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuCommand {
    /// `1`: show the catalog.
    BrowseCatalog,
    /// `99`: check out the cart.
    Checkout,
    /// `98`: show placed orders.
    OrderHistory,
    /// `97`: show the cart.
    CurrentOrder,
    /// `0`: empty the cart.
    CancelOrder,
    /// A catalog code typed directly at the main menu.
    SelectItem(ItemCode),
    Unrecognized,
}

impl MenuCommand {
    /// Parses trimmed input. Command codes take precedence over catalog codes.
    pub fn parse(input: &str, catalog: &Catalog) -> Self {
        match input.trim() {
            "1" => MenuCommand::BrowseCatalog,
            "99" => MenuCommand::Checkout,
            "98" => MenuCommand::OrderHistory,
            "97" => MenuCommand::CurrentOrder,
            "0" => MenuCommand::CancelOrder,
            other => match resolve_item(other, catalog) {
                Some(item) => MenuCommand::SelectItem(item.code),
                None => MenuCommand::Unrecognized,
            },
        }
    }
}

/// Resolves input that should name a catalog item.
pub fn resolve_item<'a>(input: &str, catalog: &'a Catalog) -> Option<&'a MenuItem> {
    let code: u32 = input.trim().parse().ok()?;
    catalog.resolve(ItemCode::new(code))
}

/// Interpretation of input while waiting for a quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityInput {
    Valid(NonZeroU32),
    /// An integer that is zero or negative.
    NotPositive(i64),
    /// A positive integer too large to be a quantity.
    TooLarge,
    NotANumber,
}

impl QuantityInput {
    pub fn parse(input: &str) -> Self {
        let input = input.trim();
        match input.parse::<i64>() {
            Ok(n) if n <= 0 => QuantityInput::NotPositive(n),
            Ok(n) => u32::try_from(n)
                .ok()
                .and_then(NonZeroU32::new)
                .map_or(QuantityInput::TooLarge, QuantityInput::Valid),
            Err(_) if is_integer_literal(input) => {
                if input.starts_with('-') {
                    QuantityInput::NotPositive(i64::MIN)
                } else {
                    QuantityInput::TooLarge
                }
            }
            Err(_) => QuantityInput::NotANumber,
        }
    }
}

fn is_integer_literal(input: &str) -> bool {
    let digits = input.strip_prefix(['+', '-']).unwrap_or(input);
    !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit())
}

/// Answer to the checkout confirmation prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Confirm,
    Decline,
}

impl Confirmation {
    /// Only `1` confirms; anything else declines.
    pub fn parse(input: &str) -> Self {
        if input.trim() == "1" {
            Confirmation::Confirm
        } else {
            Confirmation::Decline
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_menu_command_codes() {
        let catalog = Catalog::standard();
        assert_eq!(MenuCommand::parse("1", &catalog), MenuCommand::BrowseCatalog);
        assert_eq!(MenuCommand::parse(" 99 ", &catalog), MenuCommand::Checkout);
        assert_eq!(MenuCommand::parse("98", &catalog), MenuCommand::OrderHistory);
        assert_eq!(MenuCommand::parse("97", &catalog), MenuCommand::CurrentOrder);
        assert_eq!(MenuCommand::parse("0", &catalog), MenuCommand::CancelOrder);
    }

    #[test]
    fn test_menu_command_direct_item_code() {
        let catalog = Catalog::standard();
        assert_eq!(
            MenuCommand::parse("101", &catalog),
            MenuCommand::SelectItem(ItemCode::new(101))
        );
        assert_eq!(MenuCommand::parse("555", &catalog), MenuCommand::Unrecognized);
        assert_eq!(MenuCommand::parse("hello", &catalog), MenuCommand::Unrecognized);
        assert_eq!(MenuCommand::parse("", &catalog), MenuCommand::Unrecognized);
    }

    #[test]
    fn test_command_codes_win_over_catalog_codes() {
        let catalog = Catalog::new(vec![ordering::MenuItem::new(
            1,
            "Puff-puff",
            ordering::Money::from_naira(100),
        )])
        .unwrap();
        assert_eq!(MenuCommand::parse("1", &catalog), MenuCommand::BrowseCatalog);
    }

    #[test]
    fn test_quantity_parsing() {
        assert_eq!(
            QuantityInput::parse("2"),
            QuantityInput::Valid(NonZeroU32::new(2).unwrap())
        );
        assert_eq!(
            QuantityInput::parse(" +3 "),
            QuantityInput::Valid(NonZeroU32::new(3).unwrap())
        );
        assert_eq!(QuantityInput::parse("0"), QuantityInput::NotPositive(0));
        assert_eq!(QuantityInput::parse("-4"), QuantityInput::NotPositive(-4));
        assert_eq!(QuantityInput::parse("abc"), QuantityInput::NotANumber);
        assert_eq!(QuantityInput::parse("2.5"), QuantityInput::NotANumber);
        assert_eq!(QuantityInput::parse(""), QuantityInput::NotANumber);
        assert_eq!(QuantityInput::parse("5000000000"), QuantityInput::TooLarge);
        assert_eq!(
            QuantityInput::parse("99999999999999999999999"),
            QuantityInput::TooLarge
        );
        assert!(matches!(
            QuantityInput::parse("-99999999999999999999999"),
            QuantityInput::NotPositive(_)
        ));
    }

    #[test]
    fn test_confirmation() {
        assert_eq!(Confirmation::parse("1"), Confirmation::Confirm);
        assert_eq!(Confirmation::parse(" 1\n"), Confirmation::Confirm);
        assert_eq!(Confirmation::parse("no"), Confirmation::Decline);
        assert_eq!(Confirmation::parse("yes"), Confirmation::Decline);
    }
}
