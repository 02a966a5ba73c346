//! Item catalog: the canonical, immutable definition of every item, material,
//! tool and creature in the game.
//!
//! Rooms and the inventory never own item data. They hold an [`ItemSet`] of
//! [`ItemKey`]s (presence only, no quantities) and look the rest up here.
//!
//! Name resolution is always scoped to a given mapping (inventory, room or the
//! full catalog): exact display name first, then aliases, first match in the
//! mapping's insertion order wins. Aliases are allowed to overlap, e.g.
//! "pickaxe" resolves to whichever pickaxe the mapping lists first.

use serde::{Deserialize, Serialize};

/// Behavioural tags attached to catalog entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tag {
    Droppable,
    Heavy,
    Creature,
    Monster,
    Nocturnal,
    Tool,
    Ore,
    Material,
    Food,
    Infinite,
}

/// What kind of tool an item is, or what kind of tool an ore demands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolCategory {
    Pickaxe,
    Sword,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ItemKey {
    // Materials and ores
    Stone,
    Coal,
    Iron,
    Diamond,
    Wood,
    Planks,
    Sticks,
    Wool,
    Bones,
    Thread,
    Gunpowder,
    Feathers,
    // Food
    Pork,
    Beef,
    RawChicken,
    Mutton,
    RottenFlesh,
    // Tools and crafted goods
    Torch,
    WoodenPickaxe,
    StonePickaxe,
    IronPickaxe,
    DiamondPickaxe,
    WoodenSword,
    StoneSword,
    IronSword,
    DiamondSword,
    Computer,
    // Animals
    Pig,
    Cow,
    Chicken,
    Sheep,
    // Monsters
    Zombie,
    Skeleton,
    Spider,
    Creeper,
    // Scenery
    River,
    CaveEntrance,
    SurfaceExit,
}

impl ItemKey {
    /// Every key, in catalog order.
    pub const ALL: [ItemKey; 38] = [
        ItemKey::Stone,
        ItemKey::Coal,
        ItemKey::Iron,
        ItemKey::Diamond,
        ItemKey::Wood,
        ItemKey::Planks,
        ItemKey::Sticks,
        ItemKey::Wool,
        ItemKey::Bones,
        ItemKey::Thread,
        ItemKey::Gunpowder,
        ItemKey::Feathers,
        ItemKey::Pork,
        ItemKey::Beef,
        ItemKey::RawChicken,
        ItemKey::Mutton,
        ItemKey::RottenFlesh,
        ItemKey::Torch,
        ItemKey::WoodenPickaxe,
        ItemKey::StonePickaxe,
        ItemKey::IronPickaxe,
        ItemKey::DiamondPickaxe,
        ItemKey::WoodenSword,
        ItemKey::StoneSword,
        ItemKey::IronSword,
        ItemKey::DiamondSword,
        ItemKey::Computer,
        ItemKey::Pig,
        ItemKey::Cow,
        ItemKey::Chicken,
        ItemKey::Sheep,
        ItemKey::Zombie,
        ItemKey::Skeleton,
        ItemKey::Spider,
        ItemKey::Creeper,
        ItemKey::River,
        ItemKey::CaveEntrance,
        ItemKey::SurfaceExit,
    ];

    pub fn def(self) -> &'static ItemDef {
        &CATALOG[self as usize]
    }

    pub fn name(self) -> &'static str {
        self.def().name
    }

    pub fn has(self, tag: Tag) -> bool {
        self.def().tags.contains(&tag)
    }
}

/// Animals that can be placed on the surface.
pub const FAUNA: [ItemKey; 4] = [ItemKey::Pig, ItemKey::Cow, ItemKey::Chicken, ItemKey::Sheep];

/// Monster types the turn simulator may spawn.
pub const MONSTERS: [ItemKey; 4] = [
    ItemKey::Zombie,
    ItemKey::Skeleton,
    ItemKey::Spider,
    ItemKey::Creeper,
];

#[derive(Debug)]
pub struct ItemDef {
    pub key: ItemKey,
    /// Display name and exact-match identity, e.g. "a wooden pickaxe".
    pub name: &'static str,
    pub aliases: &'static [&'static str],
    pub tags: &'static [Tag],
    /// Tool strength, or the strength an ore demands. Zero when unused.
    pub tier: u8,
    pub category: Option<ToolCategory>,
    /// Left in the room when a creature is killed.
    pub drops: &'static [ItemKey],
    /// Granted (3 in 5) on every hit, killing or not.
    pub hit_drops: &'static [ItemKey],
    pub description: &'static str,
}

const fn item(
    key: ItemKey,
    name: &'static str,
    aliases: &'static [&'static str],
    tags: &'static [Tag],
    description: &'static str,
) -> ItemDef {
    ItemDef {
        key,
        name,
        aliases,
        tags,
        tier: 0,
        category: None,
        drops: &[],
        hit_drops: &[],
        description,
    }
}

const fn ore(
    key: ItemKey,
    name: &'static str,
    aliases: &'static [&'static str],
    tags: &'static [Tag],
    tier: u8,
    description: &'static str,
) -> ItemDef {
    ItemDef {
        tier,
        category: Some(ToolCategory::Pickaxe),
        ..item(key, name, aliases, tags, description)
    }
}

const fn tool(
    key: ItemKey,
    name: &'static str,
    aliases: &'static [&'static str],
    category: ToolCategory,
    tier: u8,
    description: &'static str,
) -> ItemDef {
    ItemDef {
        tier,
        category: Some(category),
        ..item(key, name, aliases, &[Tag::Droppable, Tag::Tool], description)
    }
}

const fn creature(
    key: ItemKey,
    name: &'static str,
    aliases: &'static [&'static str],
    tags: &'static [Tag],
    drops: &'static [ItemKey],
    hit_drops: &'static [ItemKey],
    description: &'static str,
) -> ItemDef {
    ItemDef {
        drops,
        hit_drops,
        ..item(key, name, aliases, tags, description)
    }
}

const DROPPABLE_MATERIAL: &[Tag] = &[Tag::Droppable, Tag::Material];
const DROPPABLE_FOOD: &[Tag] = &[Tag::Droppable, Tag::Food];
const ANIMAL: &[Tag] = &[Tag::Creature, Tag::Heavy];

/// Indexed by `ItemKey as usize`; order must match the enum.
pub static CATALOG: [ItemDef; 38] = [
    ore(
        ItemKey::Stone,
        "some stone",
        &["stone", "cobblestone", "rock"],
        &[Tag::Ore, Tag::Droppable, Tag::Material, Tag::Infinite],
        1,
        "Plain grey stone. There is always more of it.",
    ),
    ore(
        ItemKey::Coal,
        "some coal",
        &["coal", "coal ore"],
        &[Tag::Ore, Tag::Droppable, Tag::Material],
        1,
        "Black, dusty lumps that burn well.",
    ),
    ore(
        ItemKey::Iron,
        "some iron",
        &["iron", "iron ore"],
        &[Tag::Ore, Tag::Droppable, Tag::Material],
        2,
        "Rust-flecked ore. A wooden pick will only scratch it.",
    ),
    ore(
        ItemKey::Diamond,
        "a diamond",
        &["diamond", "diamonds", "diamond ore"],
        &[Tag::Ore, Tag::Droppable, Tag::Material],
        3,
        "A glittering blue gem, harder than anything but iron.",
    ),
    item(
        ItemKey::Wood,
        "some wood",
        &["wood", "log", "logs"],
        DROPPABLE_MATERIAL,
        "A rough log, freshly cut.",
    ),
    item(
        ItemKey::Planks,
        "some planks",
        &["planks", "plank", "wooden planks"],
        DROPPABLE_MATERIAL,
        "Neatly squared wooden planks.",
    ),
    item(
        ItemKey::Sticks,
        "some sticks",
        &["sticks", "stick"],
        DROPPABLE_MATERIAL,
        "A bundle of thin sticks. Good for handles.",
    ),
    item(
        ItemKey::Wool,
        "some wool",
        &["wool"],
        DROPPABLE_MATERIAL,
        "A soft tuft of sheep's wool.",
    ),
    item(
        ItemKey::Bones,
        "some bones",
        &["bones", "bone"],
        DROPPABLE_MATERIAL,
        "Bleached bones that rattle faintly.",
    ),
    item(
        ItemKey::Thread,
        "some string",
        &["string", "thread", "web"],
        DROPPABLE_MATERIAL,
        "Sticky spider silk.",
    ),
    item(
        ItemKey::Gunpowder,
        "some gunpowder",
        &["gunpowder", "powder"],
        DROPPABLE_MATERIAL,
        "Grey powder that smells of sulphur.",
    ),
    item(
        ItemKey::Feathers,
        "some feathers",
        &["feathers", "feather"],
        DROPPABLE_MATERIAL,
        "A handful of white feathers.",
    ),
    item(
        ItemKey::Pork,
        "some raw pork",
        &["pork", "raw pork", "porkchop"],
        DROPPABLE_FOOD,
        "A pink slab of pork.",
    ),
    item(
        ItemKey::Beef,
        "some raw beef",
        &["beef", "raw beef", "steak"],
        DROPPABLE_FOOD,
        "A red slab of beef.",
    ),
    item(
        ItemKey::RawChicken,
        "some raw chicken",
        &["chicken", "raw chicken"],
        DROPPABLE_FOOD,
        "Pale chicken meat. Best not to think about it.",
    ),
    item(
        ItemKey::Mutton,
        "some raw mutton",
        &["mutton", "raw mutton"],
        DROPPABLE_FOOD,
        "A slab of mutton.",
    ),
    item(
        ItemKey::RottenFlesh,
        "some rotten flesh",
        &["rotten flesh", "flesh"],
        DROPPABLE_FOOD,
        "It smells awful, but it is technically food.",
    ),
    item(
        ItemKey::Torch,
        "a torch",
        &["torch", "torches"],
        &[Tag::Droppable, Tag::Material],
        "A stick tipped with burning coal. It keeps the dark at bay.",
    ),
    tool(
        ItemKey::WoodenPickaxe,
        "a wooden pickaxe",
        &["wooden pickaxe", "wood pickaxe", "pickaxe", "pick"],
        ToolCategory::Pickaxe,
        1,
        "A flimsy wooden pickaxe. Good enough for stone and coal.",
    ),
    tool(
        ItemKey::StonePickaxe,
        "a stone pickaxe",
        &["stone pickaxe", "pickaxe", "pick"],
        ToolCategory::Pickaxe,
        2,
        "A stone-headed pickaxe that can break iron ore.",
    ),
    tool(
        ItemKey::IronPickaxe,
        "an iron pickaxe",
        &["iron pickaxe", "pickaxe", "pick"],
        ToolCategory::Pickaxe,
        3,
        "A solid iron pickaxe, strong enough for diamonds.",
    ),
    tool(
        ItemKey::DiamondPickaxe,
        "a diamond pickaxe",
        &["diamond pickaxe", "pickaxe", "pick"],
        ToolCategory::Pickaxe,
        4,
        "The finest pickaxe there is.",
    ),
    tool(
        ItemKey::WoodenSword,
        "a wooden sword",
        &["wooden sword", "wood sword", "sword"],
        ToolCategory::Sword,
        1,
        "A wooden sword. Better than your fists.",
    ),
    tool(
        ItemKey::StoneSword,
        "a stone sword",
        &["stone sword", "sword"],
        ToolCategory::Sword,
        2,
        "A heavy stone blade.",
    ),
    tool(
        ItemKey::IronSword,
        "an iron sword",
        &["iron sword", "sword"],
        ToolCategory::Sword,
        3,
        "A sharp iron sword.",
    ),
    tool(
        ItemKey::DiamondSword,
        "a diamond sword",
        &["diamond sword", "sword"],
        ToolCategory::Sword,
        4,
        "A diamond sword. Nothing survives it.",
    ),
    item(
        ItemKey::Computer,
        "a computer",
        &["computer", "pc"],
        &[Tag::Droppable],
        "A humming beige box. You should not have built this.",
    ),
    creature(
        ItemKey::Pig,
        "a pig",
        &["pig", "pigs"],
        ANIMAL,
        &[ItemKey::Pork],
        &[],
        "A pink pig, snuffling around.",
    ),
    creature(
        ItemKey::Cow,
        "a cow",
        &["cow", "cows"],
        ANIMAL,
        &[ItemKey::Beef],
        &[],
        "A placid cow, chewing.",
    ),
    creature(
        ItemKey::Chicken,
        "a chicken",
        &["chicken", "chickens", "hen"],
        ANIMAL,
        &[ItemKey::RawChicken, ItemKey::Feathers],
        &[],
        "A chicken. It clucks at you suspiciously.",
    ),
    creature(
        ItemKey::Sheep,
        "a sheep",
        &["sheep"],
        ANIMAL,
        &[ItemKey::Mutton],
        &[ItemKey::Wool],
        "A woolly sheep. Hitting it might shake some wool loose.",
    ),
    creature(
        ItemKey::Zombie,
        "a zombie",
        &["zombie", "zombies"],
        &[Tag::Creature, Tag::Monster, Tag::Heavy],
        &[ItemKey::RottenFlesh],
        &[],
        "A shambling zombie with outstretched arms.",
    ),
    creature(
        ItemKey::Skeleton,
        "a skeleton",
        &["skeleton", "skeletons"],
        &[Tag::Creature, Tag::Monster, Tag::Heavy],
        &[ItemKey::Bones],
        &[],
        "A rattling skeleton.",
    ),
    creature(
        ItemKey::Spider,
        "a spider",
        &["spider", "spiders"],
        &[Tag::Creature, Tag::Monster, Tag::Nocturnal, Tag::Heavy],
        &[ItemKey::Thread],
        &[],
        "A huge spider with too many red eyes.",
    ),
    creature(
        ItemKey::Creeper,
        "a creeper",
        &["creeper", "creepers"],
        &[Tag::Creature, Tag::Monster, Tag::Nocturnal, Tag::Heavy],
        &[ItemKey::Gunpowder],
        &[],
        "A silent green creeper. It hisses.",
    ),
    item(
        ItemKey::River,
        "a river",
        &["river", "water", "stream"],
        &[Tag::Heavy, Tag::Infinite],
        "Cold, clear water running over smooth stones.",
    ),
    item(
        ItemKey::CaveEntrance,
        "a cave entrance",
        &["cave entrance", "cave", "entrance", "hole"],
        &[Tag::Heavy, Tag::Infinite],
        "A dark opening leading down into the earth.",
    ),
    item(
        ItemKey::SurfaceExit,
        "an exit to the surface",
        &["exit to the surface", "exit", "surface", "daylight"],
        &[Tag::Heavy, Tag::Infinite],
        "A shaft of daylight falls from an opening above.",
    ),
];

/// Lowercase, trim and collapse internal whitespace.
pub fn normalize_name(name: &str) -> String {
    name.to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Resolve a player-typed name against a mapping of keys.
///
/// Exact display-name match across the whole mapping first, then alias match;
/// within each pass the first key in the mapping's order wins.
pub fn resolve<I>(name: &str, keys: I) -> Option<ItemKey>
where
    I: IntoIterator<Item = ItemKey>,
    I::IntoIter: Clone,
{
    let query = normalize_name(name);
    if query.is_empty() {
        return None;
    }
    let keys = keys.into_iter();
    keys.clone()
        .find(|k| k.name() == query)
        .or_else(|| keys.clone().find(|k| k.def().aliases.contains(&query.as_str())))
}

/// Resolve against the full catalog.
pub fn resolve_any(name: &str) -> Option<ItemKey> {
    resolve(name, ItemKey::ALL.iter().copied())
}

/// Insertion-ordered presence set of items. Holding a key means "at least one
/// is here"; inserting an already-present key is a no-op.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemSet {
    keys: Vec<ItemKey>,
}

impl ItemSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, key: ItemKey) -> bool {
        self.keys.contains(&key)
    }

    /// Returns true if the key was newly added.
    pub fn insert(&mut self, key: ItemKey) -> bool {
        if self.contains(key) {
            return false;
        }
        self.keys.push(key);
        true
    }

    /// Returns true if the key was present.
    pub fn remove(&mut self, key: ItemKey) -> bool {
        match self.keys.iter().position(|k| *k == key) {
            Some(idx) => {
                self.keys.remove(idx);
                true
            }
            None => false,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = ItemKey> + Clone + '_ {
        self.keys.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn with_tag(&self, tag: Tag) -> impl Iterator<Item = ItemKey> + '_ {
        self.iter().filter(move |k| k.has(tag))
    }

    pub fn resolve(&self, name: &str) -> Option<ItemKey> {
        resolve(name, self.iter())
    }
}

impl FromIterator<ItemKey> for ItemSet {
    fn from_iter<T: IntoIterator<Item = ItemKey>>(iter: T) -> Self {
        let mut set = ItemSet::new();
        for key in iter {
            set.insert(key);
        }
        set
    }
}
