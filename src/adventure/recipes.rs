//! Static crafting table keyed by output item.
//!
//! Quantities are not tracked: a recipe needs each input present in the
//! inventory, consumes one presence of each, and yields one presence of the
//! output.

use super::catalog::{ItemKey, ItemSet};

#[derive(Debug)]
pub struct Recipe {
    pub output: ItemKey,
    pub inputs: &'static [ItemKey],
}

impl Recipe {
    /// Inputs not currently carried, in recipe order.
    pub fn missing_from(&self, inventory: &ItemSet) -> Vec<ItemKey> {
        self.inputs
            .iter()
            .copied()
            .filter(|k| !inventory.contains(*k))
            .collect()
    }
}

pub static RECIPES: [Recipe; 12] = [
    Recipe {
        output: ItemKey::Planks,
        inputs: &[ItemKey::Wood],
    },
    Recipe {
        output: ItemKey::Sticks,
        inputs: &[ItemKey::Planks],
    },
    Recipe {
        output: ItemKey::Torch,
        inputs: &[ItemKey::Coal, ItemKey::Sticks],
    },
    Recipe {
        output: ItemKey::WoodenPickaxe,
        inputs: &[ItemKey::Planks, ItemKey::Sticks],
    },
    Recipe {
        output: ItemKey::WoodenSword,
        inputs: &[ItemKey::Planks, ItemKey::Sticks],
    },
    Recipe {
        output: ItemKey::StonePickaxe,
        inputs: &[ItemKey::Stone, ItemKey::Sticks],
    },
    Recipe {
        output: ItemKey::StoneSword,
        inputs: &[ItemKey::Stone, ItemKey::Sticks],
    },
    Recipe {
        output: ItemKey::IronPickaxe,
        inputs: &[ItemKey::Iron, ItemKey::Sticks],
    },
    Recipe {
        output: ItemKey::IronSword,
        inputs: &[ItemKey::Iron, ItemKey::Sticks],
    },
    Recipe {
        output: ItemKey::DiamondPickaxe,
        inputs: &[ItemKey::Diamond, ItemKey::Sticks],
    },
    Recipe {
        output: ItemKey::DiamondSword,
        inputs: &[ItemKey::Diamond, ItemKey::Sticks],
    },
    Recipe {
        output: ItemKey::Computer,
        inputs: &[ItemKey::Iron, ItemKey::Coal, ItemKey::Stone],
    },
];

pub fn recipe_for(output: ItemKey) -> Option<&'static Recipe> {
    RECIPES.iter().find(|r| r.output == output)
}

/// One line per recipe, e.g. "a torch: some coal + some sticks".
pub fn recipe_lines() -> Vec<String> {
    RECIPES
        .iter()
        .map(|r| {
            let inputs: Vec<&str> = r.inputs.iter().map(|k| k.name()).collect();
            format!("{}: {}", r.output.name(), inputs.join(" + "))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_output_has_at_most_one_recipe() {
        for (i, a) in RECIPES.iter().enumerate() {
            for b in RECIPES.iter().skip(i + 1) {
                assert_ne!(a.output, b.output);
            }
        }
    }

    #[test]
    fn lookup_and_missing_inputs() {
        let recipe = recipe_for(ItemKey::WoodenPickaxe).expect("recipe");
        let mut inv = ItemSet::new();
        inv.insert(ItemKey::Planks);
        assert_eq!(recipe.missing_from(&inv), vec![ItemKey::Sticks]);
        inv.insert(ItemKey::Sticks);
        assert!(recipe.missing_from(&inv).is_empty());
        assert!(recipe_for(ItemKey::Zombie).is_none());
    }

    #[test]
    fn recipe_lines_name_ingredients() {
        let lines = recipe_lines();
        assert!(lines.contains(&"a torch: some coal + some sticks".to_string()));
    }
}
