pub mod houses;
pub mod signs;

pub use houses::{find_house, locate_house};
pub use signs::{normalize_degrees, sign_index, to_zodiac, ZodiacSign};
