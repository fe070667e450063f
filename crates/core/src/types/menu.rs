//! Menu types: pizza types, toppings and cart line items.
//!
//! Wire names are the display names shown on the order form
//! (`"Pepperoni"`, `"Extra Cheese"`, ...). Anything else is rejected at the
//! boundary by [`PizzaType::parse`] and [`Topping::parse`].

use core::fmt;

use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing menu selections.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum MenuError {
    /// The pizza type is not on the menu.
    #[error("unknown pizza type: {0}")]
    UnknownPizzaType(String),
    /// A topping is not on the menu.
    #[error("unknown topping: {0}")]
    UnknownTopping(String),
}

/// Pizza base type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PizzaType {
    Pepperoni,
    Vegetable,
    Cheese,
}

impl PizzaType {
    /// All pizza types, in menu order.
    pub const ALL: [Self; 3] = [Self::Pepperoni, Self::Vegetable, Self::Cheese];

    /// Parse a pizza type from its menu name.
    ///
    /// # Errors
    ///
    /// Returns `MenuError::UnknownPizzaType` for anything not on the menu.
    pub fn parse(s: &str) -> Result<Self, MenuError> {
        match s {
            "Pepperoni" => Ok(Self::Pepperoni),
            "Vegetable" => Ok(Self::Vegetable),
            "Cheese" => Ok(Self::Cheese),
            other => Err(MenuError::UnknownPizzaType(other.to_owned())),
        }
    }

    /// Menu name of this pizza type.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Pepperoni => "Pepperoni",
            Self::Vegetable => "Vegetable",
            Self::Cheese => "Cheese",
        }
    }
}

impl fmt::Display for PizzaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for PizzaType {
    type Err = MenuError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Optional pizza topping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Topping {
    Mushroom,
    Onions,
    Olives,
    #[serde(rename = "Extra Cheese")]
    ExtraCheese,
}

impl Topping {
    /// All toppings, in menu order.
    pub const ALL: [Self; 4] = [Self::Mushroom, Self::Onions, Self::Olives, Self::ExtraCheese];

    /// Parse a topping from its menu name.
    ///
    /// # Errors
    ///
    /// Returns `MenuError::UnknownTopping` for anything not on the menu.
    pub fn parse(s: &str) -> Result<Self, MenuError> {
        match s {
            "Mushroom" => Ok(Self::Mushroom),
            "Onions" => Ok(Self::Onions),
            "Olives" => Ok(Self::Olives),
            "Extra Cheese" => Ok(Self::ExtraCheese),
            other => Err(MenuError::UnknownTopping(other.to_owned())),
        }
    }

    /// Menu name of this topping.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Mushroom => "Mushroom",
            Self::Onions => "Onions",
            Self::Olives => "Olives",
            Self::ExtraCheese => "Extra Cheese",
        }
    }
}

impl fmt::Display for Topping {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for Topping {
    type Err = MenuError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// One pizza with its topping selection.
///
/// Toppings behave as a set: duplicates are dropped on construction and the
/// first-occurrence order is kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawLineItem")]
pub struct LineItem {
    #[serde(rename = "type")]
    pizza_type: PizzaType,
    toppings: Vec<Topping>,
}

/// Wire shape of a [`LineItem`] before duplicate toppings are collapsed.
#[derive(Deserialize)]
struct RawLineItem {
    #[serde(rename = "type")]
    pizza_type: PizzaType,
    #[serde(default)]
    toppings: Vec<Topping>,
}

impl From<RawLineItem> for LineItem {
    fn from(raw: RawLineItem) -> Self {
        Self::new(raw.pizza_type, raw.toppings)
    }
}

impl LineItem {
    /// Create a line item, collapsing repeated toppings.
    #[must_use]
    pub fn new(pizza_type: PizzaType, toppings: impl IntoIterator<Item = Topping>) -> Self {
        let mut unique = Vec::new();
        for topping in toppings {
            if !unique.contains(&topping) {
                unique.push(topping);
            }
        }
        Self {
            pizza_type,
            toppings: unique,
        }
    }

    /// Parse a line item from raw menu names.
    ///
    /// # Errors
    ///
    /// Returns the first `MenuError` encountered.
    pub fn parse<S: AsRef<str>>(pizza_type: &str, toppings: &[S]) -> Result<Self, MenuError> {
        let pizza_type = PizzaType::parse(pizza_type)?;
        let toppings = toppings
            .iter()
            .map(|t| Topping::parse(t.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(pizza_type, toppings))
    }

    #[must_use]
    pub const fn pizza_type(&self) -> PizzaType {
        self.pizza_type
    }

    #[must_use]
    pub fn toppings(&self) -> &[Topping] {
        &self.toppings
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_known_pizza_types() {
        for pizza in PizzaType::ALL {
            assert_eq!(PizzaType::parse(pizza.name()).unwrap(), pizza);
        }
    }

    #[test]
    fn test_parse_rejects_unknown_pizza_type() {
        assert_eq!(
            PizzaType::parse("Pineapple"),
            Err(MenuError::UnknownPizzaType("Pineapple".to_string()))
        );
        // Names are case sensitive
        assert!(PizzaType::parse("cheese").is_err());
    }

    #[test]
    fn test_parse_known_toppings() {
        for topping in Topping::ALL {
            assert_eq!(Topping::parse(topping.name()).unwrap(), topping);
        }
    }

    #[test]
    fn test_line_item_rejects_unknown_topping() {
        let result = LineItem::parse("Cheese", &["Mushroom", "Anchovies"]);
        assert_eq!(
            result,
            Err(MenuError::UnknownTopping("Anchovies".to_string()))
        );
    }

    #[test]
    fn test_line_item_without_toppings() {
        let item = LineItem::parse::<&str>("Vegetable", &[]).unwrap();
        assert_eq!(item.pizza_type(), PizzaType::Vegetable);
        assert!(item.toppings().is_empty());
    }

    #[test]
    fn test_line_item_collapses_duplicate_toppings() {
        let item = LineItem::parse("Pepperoni", &["Olives", "Onions", "Olives"]).unwrap();
        assert_eq!(item.toppings(), &[Topping::Olives, Topping::Onions]);
    }

    #[test]
    fn test_line_item_wire_format() {
        let item = LineItem::new(PizzaType::Cheese, [Topping::ExtraCheese]);
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "type": "Cheese", "toppings": ["Extra Cheese"] })
        );

        let parsed: LineItem =
            serde_json::from_value(serde_json::json!({ "type": "Pepperoni" })).unwrap();
        assert!(parsed.toppings().is_empty());
    }

    #[test]
    fn test_deserialize_collapses_duplicate_toppings() {
        let item: LineItem = serde_json::from_value(serde_json::json!({
            "type": "Cheese",
            "toppings": ["Olives", "Olives", "Extra Cheese", "Olives"]
        }))
        .unwrap();
        assert_eq!(item.toppings(), &[Topping::Olives, Topping::ExtraCheese]);
    }
}
