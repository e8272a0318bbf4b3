//! Outbound bot messages.

use std::fmt;

use ordering::{LedgerEntry, LineItem, MenuItem, Money};
use thiserror::Error;

const MAIN_MENU: &str = "1. Place an order\n\
                         99. Checkout order\n\
                         98. See order history\n\
                         97. See current order\n\
                         0. Cancel order";

const SEE_MENU: &str = "1. See menu";

/// Input the current phase cannot accept. Always answered with a
/// re-prompt; never a fault.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("Please tell me your name so we can get started.")]
    BlankName,

    #[error("Invalid selection. Please try again.")]
    InvalidSelection,

    #[error("Invalid quantity. Please enter a whole number greater than zero.")]
    InvalidQuantity,

    #[error("No order to place. Place an order\n1. See menu")]
    EmptyCartCheckout,
}

impl Rejection {
    /// Short label for metrics.
    pub fn reason(&self) -> &'static str {
        match self {
            Rejection::BlankName => "blank_name",
            Rejection::InvalidSelection => "invalid_selection",
            Rejection::InvalidQuantity => "invalid_quantity",
            Rejection::EmptyCartCheckout => "empty_cart_checkout",
        }
    }
}

/// A reply to exactly one inbound message (or the connect greeting).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Sent once when a connection opens.
    Greeting,
    Welcome { name: String },
    Catalog { items: Vec<MenuItem> },
    AskQuantity { item: MenuItem },
    LineAdded { line: LineItem, total: Money },
    CurrentOrder { lines: Vec<LineItem>, total: Money },
    EmptyCart,
    CheckoutSummary { lines: Vec<LineItem>, total: Money },
    OrderPlaced { total: Money },
    CheckoutDeclined,
    OrderCancelled,
    History { entries: Vec<LedgerEntry> },
    NoHistory,
    Rejected(Rejection),
}

impl From<Rejection> for Reply {
    fn from(rejection: Rejection) -> Self {
        Reply::Rejected(rejection)
    }
}

impl fmt::Display for Reply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reply::Greeting => write!(f, "Hello! What's your name?"),
            Reply::Welcome { name } => {
                write!(f, "Welcome to the ChatBot, {name}!\n{MAIN_MENU}")
            }
            Reply::Catalog { items } => write!(
                f,
                "Here is a list of items you can order:\n{}\nPlease select one by typing its number.",
                menu_listing(items)
            ),
            Reply::AskQuantity { item } => write!(
                f,
                "How many {} would you like? ({} each)",
                item.name, item.unit_price
            ),
            Reply::LineAdded { line, total } => write!(
                f,
                "{} has been added to your order ({}). Running total: {total}.\n\
                 Do you want to add more items to your order?\n{SEE_MENU}\n\
                 If not, type 99 to checkout.",
                describe_line(line),
                line.subtotal()
            ),
            Reply::CurrentOrder { lines, total } => write!(
                f,
                "Here is your current order:\n{}\nTotal: {total}",
                itemize(lines)
            ),
            Reply::EmptyCart => write!(f, "No current order. Place an order\n{SEE_MENU}"),
            Reply::CheckoutSummary { lines, total } => write!(
                f,
                "Here is your order summary:\n{}\nTotal: {total}\n\
                 Type 1 to confirm your order, or anything else to cancel.",
                itemize(lines)
            ),
            Reply::OrderPlaced { total } => {
                write!(f, "Order placed! Total: {total}. Thank you.\n{MAIN_MENU}")
            }
            Reply::CheckoutDeclined | Reply::OrderCancelled => {
                write!(f, "Order cancelled. Place a new order\n{SEE_MENU}")
            }
            Reply::History { entries } => {
                write!(f, "Here is your order history:")?;
                for entry in entries {
                    let items: Vec<String> = entry.lines.iter().map(describe_line).collect();
                    write!(
                        f,
                        "\nOrder {}: {} ({})",
                        entry.number,
                        items.join(", "),
                        entry.total
                    )?;
                }
                Ok(())
            }
            Reply::NoHistory => write!(f, "No previous orders"),
            Reply::Rejected(rejection) => write!(f, "{rejection}"),
        }
    }
}

/// Renders `code. name - price` lines for the given items.
pub fn menu_listing(items: &[MenuItem]) -> String {
    items
        .iter()
        .map(|item| format!("{}. {} - {}", item.code, item.name, item.unit_price))
        .collect::<Vec<_>>()
        .join("\n")
}

fn describe_line(line: &LineItem) -> String {
    format!("{} x {}", line.quantity(), line.item().name)
}

fn itemize(lines: &[LineItem]) -> String {
    lines
        .iter()
        .map(|line| format!("- {}: {}", describe_line(line), line.subtotal()))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use std::num::NonZeroU32;

    use ordering::Catalog;

    use super::*;

    fn jollof_line(quantity: u32) -> LineItem {
        LineItem::new(
            MenuItem::new(100, "Jollof", Money::from_naira(1500)),
            NonZeroU32::new(quantity).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn test_menu_listing() {
        let listing = menu_listing(Catalog::standard().list());
        assert_eq!(
            listing,
            "100. Jollof - ₦1,500\n101. Indomie - ₦800\n102. Poundo - ₦2,000\n103. Semo - ₦1,800"
        );
    }

    #[test]
    fn test_welcome_includes_name_and_menu() {
        let text = Reply::Welcome { name: "Amy".into() }.to_string();
        assert!(text.starts_with("Welcome to the ChatBot, Amy!"));
        assert!(text.contains("99. Checkout order"));
        assert!(text.contains("0. Cancel order"));
    }

    #[test]
    fn test_line_added_reports_subtotal_and_total() {
        let text = Reply::LineAdded {
            line: jollof_line(2),
            total: Money::from_naira(3800),
        }
        .to_string();
        assert!(text.contains("2 x Jollof has been added to your order (₦3,000)"));
        assert!(text.contains("Running total: ₦3,800."));
    }

    #[test]
    fn test_checkout_summary_is_itemized() {
        let text = Reply::CheckoutSummary {
            lines: vec![jollof_line(2)],
            total: Money::from_naira(3000),
        }
        .to_string();
        assert!(text.contains("- 2 x Jollof: ₦3,000"));
        assert!(text.contains("Total: ₦3,000"));
        assert!(text.contains("Type 1 to confirm"));
    }

    #[test]
    fn test_rejection_text() {
        assert_eq!(
            Reply::from(Rejection::InvalidSelection).to_string(),
            "Invalid selection. Please try again."
        );
        assert!(
            Reply::from(Rejection::EmptyCartCheckout)
                .to_string()
                .starts_with("No order to place.")
        );
        assert_eq!(Rejection::InvalidQuantity.reason(), "invalid_quantity");
    }
}
