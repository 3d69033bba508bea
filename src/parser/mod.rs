mod blocks;
mod quick;
mod recipes;

pub use quick::parse_quick_recipes;
pub use recipes::parse_recipes;
