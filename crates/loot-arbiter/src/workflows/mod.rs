pub mod loot;
